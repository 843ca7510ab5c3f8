//! Analysis module
//!
//! Rolls test summaries up into module summaries and ranks modules by
//! flakiness and by runtime.

mod aggregate;
mod flakiest;
mod slowest;

pub use aggregate::{summarize_modules, ModuleSummary};
pub use flakiest::{find_flakiest, Flakiest};
pub use slowest::{find_slowest, RuntimeQuantizer, SlowModule};
