//! Domain layer - pure data transforms with no external dependencies.
//!
//! This layer contains the structural operations of the library:
//! - Sequence transforms (chunk, compact, difference, intersection)
//! - Mapping projections (pick, omit)
//! - The `Value` tree with deep equality, deep clone, and flatten
//!
//! Nothing in this layer touches time, threads, or I/O; every function is
//! pure and independently testable.

pub mod map;
pub mod seq;
pub mod value;
