//! Domain types and pure logic shared by the colcalc crates.
//!
//! Nothing in this crate performs I/O: column number parsing, request
//! payload normalization, pagination arithmetic, and the error taxonomy
//! live here so the storage, platform, and HTTP crates agree on them.

pub mod error;
pub mod numeric;
pub mod pagination;
pub mod payload;
pub mod transform;
pub mod types;
