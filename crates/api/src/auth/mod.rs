//! Authentication primitives.
//!
//! - [`session`] -- verification of the platform-signed session token.

pub mod session;
