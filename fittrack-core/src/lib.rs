//! Pure domain types for fittrack.
//!
//! Nothing in this crate touches the file system or the async runtime; the
//! record store and orchestration services live in the `fittrack` crate.

pub mod models;
