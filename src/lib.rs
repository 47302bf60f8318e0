//! Reed-Solomon erasure coding engine over GF(2^w), for `w in {4, 8, 16}`.
//!
//! This crate is the coding core: field arithmetic, matrix containers and
//! constructors, Gauss-Jordan inversion, and the streaming encode/repair
//! driver. The binary target (`src/main.rs` and its `cli`/`shell` modules)
//! is a thin shell around it: argument parsing, shard-file layout,
//! progress reporting, process exit handling.

pub mod codec;
pub mod error;
pub mod field;
pub mod matrix_ops;
pub mod numeric;
