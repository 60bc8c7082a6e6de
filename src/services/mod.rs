//! Business rules layered over the record stores.
//!
//! - [`GoalService`]: keeps at most one active goal per category.
//! - [`ProgressService`]: timestamps and stores progress entries.

mod goals;
mod progress;

pub use goals::GoalService;
pub use progress::ProgressService;
