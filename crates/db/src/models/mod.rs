//! Row structs and DTOs.

pub mod calculation;
