//! Greedy decoding of random keys into a concrete assignment.

use super::model::MemProblem;
use crate::brkga::Decoder;

/// Decodes a random-key chromosome into a feasible memory-bank assignment
/// and its total cost.
///
/// Keys act purely as priorities: the highest-keyed data structure is
/// placed first, each into the allocable bank with the lowest marginal
/// cost. The continuous key space is what the engine recombines; the
/// discrete, capacity-constrained assignment space is resolved here.
///
/// The decoder borrows the template problem and never mutates it — every
/// decode works on a [`MemProblem::working_copy`], so decoding the same
/// chromosome twice yields identical results.
pub struct GreedyDecoder<'a> {
    template: &'a MemProblem,
}

impl<'a> GreedyDecoder<'a> {
    pub fn new(template: &'a MemProblem) -> Self {
        Self { template }
    }

    /// Decodes `keys` into a fully assigned copy of the template, conflict
    /// statuses refreshed.
    ///
    /// # Panics
    ///
    /// Panics if an allocation fails after candidate filtering. The
    /// external bank is always allocable, so this indicates a capacity
    /// accounting bug, not a property of the instance.
    pub fn decode_assignment(&self, keys: &[f64]) -> MemProblem {
        let mut problem = self.template.working_copy();
        let external = problem.external_bank();

        for item in placement_order(keys) {
            let mut best: Option<(f64, usize)> = None;
            for bank in 0..=external {
                if !problem.is_allocable(item, bank) {
                    continue;
                }
                let cost = problem.marginal_cost(item, bank);
                // Strict `<` keeps the lowest bank index on ties.
                if best.is_none_or(|(lowest, _)| cost < lowest) {
                    best = Some((cost, bank));
                }
            }
            let (_, bank) = best.expect("external bank is always allocable");
            assert!(
                problem.allocate(item, bank),
                "bank {bank} rejected item {item} after passing the allocable filter"
            );
        }

        problem.refresh_conflicts();
        problem
    }
}

impl Decoder for GreedyDecoder<'_> {
    fn decode(&self, keys: &[f64]) -> f64 {
        self.decode_assignment(keys).total_cost()
    }
}

/// Permutation of item indices from highest to lowest key, first occurrence
/// winning ties.
///
/// O(n²) selection. An index sort by key would be the scalable substitute,
/// but at the instance sizes this targets the repeated scan is fine and
/// keeps the tie-break rule obvious.
fn placement_order(keys: &[f64]) -> Vec<usize> {
    let n = keys.len();
    let mut chosen = vec![false; n];
    let mut order = Vec::with_capacity(n);

    for _ in 0..n {
        let mut pick = usize::MAX;
        for i in 0..n {
            if chosen[i] {
                continue;
            }
            if pick == usize::MAX || keys[i] > keys[pick] {
                pick = i;
            }
        }
        debug_assert!(pick != usize::MAX);
        chosen[pick] = true;
        order.push(pick);
    }
    order
}
