//! Local search over request-to-vehicle groupings.
//!
//! - [`Assignment`] — search state: which requests each vehicle serves
//! - [`relocate_move`] — random single-request relocation between vehicles
//! - [`GroupingOptimizer`] — makespan hill-climber with plateau acceptance

mod assignment;
mod optimizer;
mod relocate;

pub use assignment::Assignment;
pub use optimizer::{GroupingConfig, GroupingOptimizer, GroupingResult};
pub use relocate::relocate_move;
