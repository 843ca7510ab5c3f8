//! Slowest-module search (approximate top-K)
//!
//! Runtimes are quantized into integer keys and ranked with a counting
//! pass over the keys rather than a full sort. Modules sharing the key of
//! the boundary bucket are all kept, so the result may hold more than K
//! entries.

use std::collections::BTreeMap;

use serde::Serialize;

use super::aggregate::ModuleSummary;
use crate::config::{AnalysisConfig, Quantization};

/// Maps a runtime in seconds onto an integer bucket key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeQuantizer {
    mode: Quantization,
    decimals: u32,
}

impl RuntimeQuantizer {
    /// Whole seconds, truncated.
    pub fn floor() -> Self {
        Self {
            mode: Quantization::Floor,
            decimals: 0,
        }
    }

    /// Rounded to `decimals` fractional digits.
    pub fn round(decimals: u32) -> Self {
        Self {
            mode: Quantization::Round,
            decimals,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        match config.effective_quantization() {
            Quantization::Floor => Self::floor(),
            Quantization::Round => Self::round(config.effective_decimals()),
        }
    }

    fn scale(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }

    pub fn key(&self, runtime: f64) -> i64 {
        match self.mode {
            Quantization::Floor => runtime.floor() as i64,
            Quantization::Round => (runtime * self.scale()).round() as i64,
        }
    }

    /// The runtime a key stands for.
    pub fn value(&self, key: i64) -> f64 {
        match self.mode {
            Quantization::Floor => key as f64,
            Quantization::Round => key as f64 / self.scale(),
        }
    }
}

impl Default for RuntimeQuantizer {
    fn default() -> Self {
        Self::round(3)
    }
}

/// One entry of the slowest-module ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowModule {
    pub name: String,
    /// Exact runtime in seconds.
    pub runtime: f64,
    /// Runtime after quantization; the ranking key.
    pub quantized: f64,
}

/// Rank the `count` slowest modules, slowest first. Ties keep input order.
///
/// Every module in a bucket needed to reach `count` entries is included.
/// `count >= modules.len()` returns every module; `count == 0` returns none.
pub fn find_slowest(
    modules: &[ModuleSummary],
    count: usize,
    quantizer: RuntimeQuantizer,
) -> Vec<SlowModule> {
    if count == 0 || modules.is_empty() {
        return Vec::new();
    }

    let keys: Vec<i64> = modules.iter().map(|m| quantizer.key(m.runtime)).collect();

    let mut populations: BTreeMap<i64, usize> = BTreeMap::new();
    for key in &keys {
        *populations.entry(*key).or_default() += 1;
    }

    // Lowest key that still has to be emitted to reach `count` entries.
    let mut window_start = i64::MAX;
    let mut reached = 0;
    for (key, population) in populations.iter().rev() {
        window_start = *key;
        reached += population;
        if reached >= count {
            break;
        }
    }

    // Ascending output ranges for the buckets inside the window.
    let mut bounds: Vec<(usize, usize)> = Vec::new();
    let mut cursors: BTreeMap<i64, usize> = BTreeMap::new();
    let mut offset = 0;
    for (key, population) in populations.range(window_start..) {
        bounds.push((offset, offset + population));
        cursors.insert(*key, offset);
        offset += population;
    }

    let mut slots: Vec<Option<SlowModule>> = vec![None; offset];
    for (module, key) in modules.iter().zip(&keys) {
        if let Some(cursor) = cursors.get_mut(key) {
            slots[*cursor] = Some(SlowModule {
                name: module.name.clone(),
                runtime: module.runtime,
                quantized: quantizer.value(*key),
            });
            *cursor += 1;
        }
    }

    let mut ranked = Vec::with_capacity(offset);
    for &(start, end) in bounds.iter().rev() {
        ranked.extend(slots[start..end].iter_mut().filter_map(Option::take));
    }

    tracing::debug!(
        requested = count,
        returned = ranked.len(),
        buckets = bounds.len(),
        "ranked slowest modules"
    );
    ranked
}
