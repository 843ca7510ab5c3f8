//! 0/1 maximum-count knapsack.

use crate::errors::OptimizerError;

/// Indices (ascending) of a maximum-cardinality subset of `weights` whose
/// total is at most `budget`.
///
/// Solved with an explicit `(items + 1) x (budget + 1)` table of counts and
/// a backtracking pass. The table may not exceed `max_cells` entries.
pub fn max_count_subset(
    weights: &[u64],
    budget: u64,
    max_cells: u64,
) -> Result<Vec<usize>, OptimizerError> {
    if weights.is_empty() {
        return Ok(Vec::new());
    }

    let cells = (weights.len() as u128 + 1) * (u128::from(budget) + 1);
    if cells > u128::from(max_cells) {
        return Err(OptimizerError::TableTooLarge { cells, max_cells });
    }
    let width = usize::try_from(budget)
        .map_err(|_| OptimizerError::TableTooLarge { cells, max_cells })?
        + 1;

    // table[i * width + b]: best count using the first i items within b.
    let mut table = vec![0u32; (weights.len() + 1) * width];
    for (i, &weight) in weights.iter().enumerate() {
        let (done, rest) = table.split_at_mut((i + 1) * width);
        let prev = &done[i * width..];
        let row = &mut rest[..width];
        for b in 0..width {
            let skip = prev[b];
            row[b] = match usize::try_from(weight) {
                Ok(w) if w <= b => skip.max(prev[b - w] + 1),
                _ => skip,
            };
        }
    }

    let mut chosen = Vec::new();
    let mut b = width - 1;
    for i in (1..=weights.len()).rev() {
        let best = table[i * width + b];
        if let Ok(w) = usize::try_from(weights[i - 1]) {
            if w <= b && table[(i - 1) * width + b - w] + 1 == best {
                chosen.push(i - 1);
                b -= w;
            }
        }
    }
    chosen.reverse();
    Ok(chosen)
}

/// Indices (ascending) of the shortest items whose running total stays
/// within `budget`.
///
/// Taking items in ascending weight order maximizes the count, so this
/// gives the same cardinality as the table without any allocation bound.
pub fn shortest_first_subset(weights: &[u64], budget: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by_key(|&i| weights[i]);

    let mut used: u64 = 0;
    let mut chosen: Vec<usize> = order
        .into_iter()
        .take_while(|&i| match used.checked_add(weights[i]) {
            Some(total) if total <= budget => {
                used = total;
                true
            }
            _ => false,
        })
        .collect();
    chosen.sort_unstable();
    chosen
}
