//! End-to-end analysis pipeline
//!
//! discover → map → execute → aggregate → rank → optimize

mod report;
mod runner;

pub use report::{ModuleReport, Report};
pub use runner::Pipeline;
