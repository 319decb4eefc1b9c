//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod calculation_repo;

pub use calculation_repo::CalculationRepo;
