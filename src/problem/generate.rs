//! Random instance generation.

use super::model::{Conflict, DataStruct, MemBank, MemProblem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Value ranges for [`random_problem`].
#[derive(Debug, Clone)]
pub struct InstanceRanges {
    /// Number of data structures.
    pub items: usize,

    /// Number of bounded banks.
    pub banks: usize,

    /// Number of conflict pairs. Endpoints are drawn independently, so a
    /// pair may repeat or even be degenerate (`a == b`).
    pub conflicts: usize,

    /// Data structure sizes.
    pub item_size: RangeInclusive<u64>,

    /// Data structure placement costs.
    pub item_cost: RangeInclusive<u64>,

    /// Bank capacities.
    pub bank_capacity: RangeInclusive<u64>,

    /// Conflict costs.
    pub conflict_cost: RangeInclusive<u64>,

    /// Externalization penalty.
    pub penalty: RangeInclusive<u64>,
}

impl Default for InstanceRanges {
    fn default() -> Self {
        Self {
            items: 16,
            banks: 4,
            conflicts: 10,
            item_size: 1..=8,
            item_cost: 1..=20,
            bank_capacity: 10..=30,
            conflict_cost: 1..=10,
            penalty: 2..=4,
        }
    }
}

/// Generates a random instance with an empty assignment.
pub fn random_problem(ranges: &InstanceRanges, seed: u64) -> MemProblem {
    let mut rng = StdRng::seed_from_u64(seed);

    let penalty = rng.random_range(ranges.penalty.clone()) as f64;

    let membanks = (0..ranges.banks)
        .map(|_| MemBank {
            capacity: rng.random_range(ranges.bank_capacity.clone()),
        })
        .collect();

    let datastructs = (0..ranges.items)
        .map(|_| DataStruct {
            size: rng.random_range(ranges.item_size.clone()),
            cost: rng.random_range(ranges.item_cost.clone()) as f64,
        })
        .collect();

    let conflicts = (0..ranges.conflicts)
        .map(|_| {
            Conflict::new(
                rng.random_range(0..ranges.items),
                rng.random_range(0..ranges.items),
                rng.random_range(ranges.conflict_cost.clone()) as f64,
            )
        })
        .collect();

    MemProblem::new(datastructs, membanks, conflicts, penalty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respects_counts_and_ranges() {
        let ranges = InstanceRanges::default();
        let problem = random_problem(&ranges, 42);

        assert_eq!(problem.items(), ranges.items);
        assert_eq!(problem.banks(), ranges.banks);
        assert_eq!(problem.conflicts().len(), ranges.conflicts);

        for ds in problem.datastructs() {
            assert!(ranges.item_size.contains(&ds.size));
            assert!(ranges.item_cost.contains(&(ds.cost as u64)));
        }
        for bank in problem.membanks() {
            assert!(ranges.bank_capacity.contains(&bank.capacity));
        }
        for conflict in problem.conflicts() {
            assert!(conflict.a < ranges.items);
            assert!(conflict.b < ranges.items);
            assert_eq!(conflict.status, 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_instance() {
        let ranges = InstanceRanges::default();
        let a = random_problem(&ranges, 9);
        let b = random_problem(&ranges, 9);
        assert_eq!(a.datastructs(), b.datastructs());
        assert_eq!(a.membanks(), b.membanks());
        assert_eq!(a.conflicts(), b.conflicts());
        assert_eq!(a.penalty(), b.penalty());
    }
}
