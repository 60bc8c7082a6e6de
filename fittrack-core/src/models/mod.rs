//! Domain models for fittrack.
//!
//! # Core Concepts
//!
//! ## Value Objects
//!
//! - [`RunningDistance`] and [`WaterContent`]: a magnitude paired with a unit,
//!   convertible between the units of their family.
//! - [`Measurement`]: the tagged union of the two, keyed by [`Category`].
//!
//! ## Records
//!
//! Records are what the stores persist. Each carries a store-assigned id and a
//! creation timestamp on top of its measurement:
//!
//! - [`Goal`]: a target for one category. At most one goal per category is active.
//! - [`ProgressEntry`]: a logged amount of running or water intake.

mod category;
mod error;
mod goal;
mod measurement;
mod progress;
mod record;
mod units;

pub use category::*;
pub use error::*;
pub use goal::*;
pub use measurement::*;
pub use progress::*;
pub use record::*;
pub use units::*;
