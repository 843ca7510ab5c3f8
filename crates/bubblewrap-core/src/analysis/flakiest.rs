//! Flakiest-module search
//!
//! A single left fold carrying the running maximum and every module tied
//! with it. Works on owned summaries or references.

use std::borrow::Borrow;

use super::aggregate::ModuleSummary;

/// The maximum flake rate and every module that reaches it, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Flakiest<T> {
    /// `None` only for empty input.
    pub max_flake_rate: Option<f64>,
    pub modules: Vec<T>,
}

impl<T: Borrow<ModuleSummary>> Flakiest<T> {
    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.borrow().name.as_str()).collect()
    }
}

/// Find the flakiest module(s), keeping all ties.
pub fn find_flakiest<T, I>(modules: I) -> Flakiest<T>
where
    I: IntoIterator<Item = T>,
    T: Borrow<ModuleSummary>,
{
    modules.into_iter().fold(
        Flakiest {
            max_flake_rate: None,
            modules: Vec::new(),
        },
        |mut acc, module| {
            let rate = module.borrow().flake_rate;
            match acc.max_flake_rate {
                Some(max) if rate < max => {}
                Some(max) if rate == max => acc.modules.push(module),
                _ => {
                    acc.max_flake_rate = Some(rate);
                    acc.modules.clear();
                    acc.modules.push(module);
                }
            }
            acc
        },
    )
}
