use std::path::PathBuf;

use bubblewrap_core::optimizer::{max_count_subset, shortest_first_subset};
use bubblewrap_core::{RecommendedSet, SubsetOptimizer};
use proptest::prelude::*;

fn brute_force_best(weights: &[u64], budget: u64) -> usize {
    (0u32..1 << weights.len())
        .filter(|mask| {
            (0..weights.len())
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| weights[i])
                .sum::<u64>()
                <= budget
        })
        .map(|mask| mask.count_ones() as usize)
        .max()
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn subset_fits_and_is_maximal(weights in prop::collection::vec(0u64..40, 0..12)) {
        let budget = weights.iter().sum::<u64>() / 2;
        let chosen = max_count_subset(&weights, budget, 1_000_000).unwrap();

        let total: u64 = chosen.iter().map(|&i| weights[i]).sum();
        prop_assert!(total <= budget);
        prop_assert_eq!(chosen.len(), brute_force_best(&weights, budget));

        // Ascending, no duplicates
        for pair in chosen.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn recommendation_partitions_the_suite(runtimes in prop::collection::vec(0.0f64..30.0, 0..10)) {
        let tests: Vec<(PathBuf, f64)> = runtimes
            .iter()
            .enumerate()
            .map(|(i, secs)| (PathBuf::from(format!("test_{i}.py")), *secs))
            .collect();
        let rec = SubsetOptimizer::new(10, 1_000_000).recommend(&tests);

        prop_assert_eq!(rec.selected.len() + rec.complement.len(), tests.len());
        prop_assert_eq!(rec.cutoff_units, rec.total_units / 2);
        if rec.selected.is_empty() {
            prop_assert_eq!(rec.choice, RecommendedSet::Complement);
            prop_assert_eq!(&rec.recommended, &rec.complement);
            prop_assert_eq!(rec.recommended.len(), tests.len());
        } else if rec.selected.len() < rec.complement.len() {
            prop_assert_eq!(rec.choice, RecommendedSet::Selected);
            prop_assert_eq!(&rec.recommended, &rec.selected);
        } else {
            prop_assert_eq!(rec.choice, RecommendedSet::Complement);
            prop_assert_eq!(&rec.recommended, &rec.complement);
        }
    }

    #[test]
    fn shortest_first_matches_table_when_table_is_bounded(
        runtimes in prop::collection::vec(0.0f64..30.0, 0..10)
    ) {
        let tests: Vec<(PathBuf, f64)> = runtimes
            .iter()
            .enumerate()
            .map(|(i, secs)| (PathBuf::from(format!("test_{i}.py")), *secs))
            .collect();
        let exact = SubsetOptimizer::new(10, 1_000_000).recommend(&tests);
        let bounded = SubsetOptimizer::new(10, 1).recommend(&tests);

        let weights: Vec<u64> = runtimes.iter().map(|s| (s * 10.0).round() as u64).collect();
        let used: u64 = bounded
            .selected
            .iter()
            .map(|p| weights[tests.iter().position(|(t, _)| t == p).unwrap()])
            .sum();
        prop_assert!(used <= bounded.cutoff_units);
        prop_assert_eq!(bounded.selected.len(), exact.selected.len());
        prop_assert_eq!(bounded.selected.len(), shortest_first_subset(&weights, bounded.cutoff_units).len());
    }
}
