use bubblewrap_core::{find_flakiest, find_slowest, ModuleSummary, RuntimeQuantizer};
use proptest::prelude::*;

fn with_rates(rates: &[u8]) -> Vec<ModuleSummary> {
    rates
        .iter()
        .enumerate()
        .map(|(i, r)| ModuleSummary::from_stats(format!("m{i}"), f64::from(*r) / 10.0, 0.0))
        .collect()
}

fn with_runtimes(quarters: &[u16]) -> Vec<ModuleSummary> {
    quarters
        .iter()
        .enumerate()
        .map(|(i, q)| ModuleSummary::from_stats(format!("m{i}"), 0.0, f64::from(*q) / 4.0))
        .collect()
}

fn sorted_names(modules: &[&ModuleSummary]) -> Vec<String> {
    let mut names: Vec<String> = modules.iter().map(|m| m.name.clone()).collect();
    names.sort();
    names
}

proptest! {
    #[test]
    fn flakiest_is_the_exact_tied_maximum(
        modules in prop::collection::vec(0u8..6, 0..30)
            .prop_map(|rates| with_rates(&rates))
            .prop_shuffle()
    ) {
        let flakiest = find_flakiest(&modules);
        let true_max = modules.iter().map(|m| m.flake_rate).reduce(f64::max);
        prop_assert_eq!(flakiest.max_flake_rate, true_max);

        let expected: Vec<&ModuleSummary> = modules
            .iter()
            .filter(|m| Some(m.flake_rate) == true_max)
            .collect();
        prop_assert_eq!(sorted_names(&flakiest.modules), sorted_names(&expected));
    }

    #[test]
    fn flakiest_ignores_input_order(
        (original, shuffled) in prop::collection::vec(0u8..6, 1..30)
            .prop_map(|rates| with_rates(&rates))
            .prop_flat_map(|modules| (Just(modules.clone()), Just(modules).prop_shuffle()))
    ) {
        let left = find_flakiest(&original);
        let right = find_flakiest(&shuffled);
        prop_assert_eq!(left.max_flake_rate, right.max_flake_rate);
        prop_assert_eq!(sorted_names(&left.modules), sorted_names(&right.modules));
    }

    #[test]
    fn slowest_keeps_every_boundary_tie(
        quarters in prop::collection::vec(0u16..40, 0..40),
        count in 0usize..20,
        floor in any::<bool>(),
    ) {
        let modules = with_runtimes(&quarters);
        let quantizer = if floor { RuntimeQuantizer::floor() } else { RuntimeQuantizer::round(1) };
        let ranked = find_slowest(&modules, count, quantizer);

        prop_assert!(ranked.len() >= count.min(modules.len()));
        if count == 0 {
            prop_assert!(ranked.is_empty());
        }

        // Slowest first
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].quantized >= pair[1].quantized);
        }

        if let Some(boundary) = ranked.last().map(|m| quantizer.key(m.runtime)) {
            for module in &modules {
                let key = quantizer.key(module.runtime);
                let included = ranked.iter().any(|r| r.name == module.name);
                // Nothing left out is slower than the boundary, and the boundary bucket is complete
                if key >= boundary {
                    prop_assert!(included, "{} ({}) missing", module.name, module.runtime);
                } else {
                    prop_assert!(!included);
                }
            }
        }
    }
}
