//! fittrack: goals and progress for running distance and water intake,
//! persisted to JSON files in a local data directory.
//!
//! Layering, leaves first:
//!
//! - [`models`]: value objects and records (re-exported from `fittrack-core`).
//! - [`store`]: one [`RecordStore`](store::RecordStore) per record kind, an
//!   in-memory collection mirrored to a single file.
//! - [`services`]: business rules on top of the stores.

pub mod config;
pub mod error;
pub mod services;
pub mod store;

pub use fittrack_core::models;

pub use error::{Error, Result};
