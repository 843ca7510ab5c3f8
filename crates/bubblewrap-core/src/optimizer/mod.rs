//! Budgeted subset optimizer
//!
//! Picks the largest set of tests that fits in half of the suite's total
//! runtime.

mod knapsack;
mod recommend;

pub use knapsack::{max_count_subset, shortest_first_subset};
pub use recommend::{Recommendation, RecommendedSet, SubsetMethod, SubsetOptimizer};
