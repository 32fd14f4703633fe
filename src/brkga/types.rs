//! Core types for the BRKGA engine.

use std::cmp::Ordering;

/// Decoder contract for the BRKGA engine.
///
/// This is the **only** trait a user must implement. It maps a random-key
/// chromosome (a slice of `f64` in `[0, 1)`) to a cost value. Lower cost is
/// better (minimization).
///
/// A decoder must be a pure function of its keys: decoding the same
/// chromosome twice against unchanged decoder state must yield the same
/// cost. The engine relies on this both for ranking and for the optional
/// parallel evaluation of a batch.
pub trait Decoder: Send + Sync {
    /// Decodes a random-key chromosome and returns its cost.
    ///
    /// `keys` has length [`BrkgaConfig::chromosome_length`].
    ///
    /// [`BrkgaConfig::chromosome_length`]: super::BrkgaConfig::chromosome_length
    fn decode(&self, keys: &[f64]) -> f64;
}

/// A decoded chromosome paired with its fitness.
///
/// Individuals order by fitness ascending; ties break by lexicographic
/// comparison of the key vectors, so ranking is a total order and
/// same-fitness individuals sort reproducibly.
#[derive(Debug, Clone)]
pub struct Individual {
    /// Cost of the decoded solution. Lower is better.
    pub fitness: f64,

    /// The random-key chromosome, `n` values in `[0, 1)`.
    pub keys: Vec<f64>,
}

impl Individual {
    pub fn new(fitness: f64, keys: Vec<f64>) -> Self {
        Self { fitness, keys }
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Individual {}

impl PartialOrd for Individual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Individual {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fitness
            .total_cmp(&other.fitness)
            .then_with(|| lexicographic(&self.keys, &other.keys))
    }
}

fn lexicographic(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_by_fitness_first() {
        let low = Individual::new(1.0, vec![0.9, 0.9]);
        let high = Individual::new(2.0, vec![0.1, 0.1]);
        assert!(low < high);
    }

    #[test]
    fn test_ties_break_on_keys() {
        let first = Individual::new(5.0, vec![0.1, 0.2]);
        let second = Individual::new(5.0, vec![0.1, 0.3]);
        assert!(first < second);
        assert_eq!(first, first.clone());
    }

    #[test]
    fn test_sort_is_ascending() {
        let mut population = vec![
            Individual::new(3.0, vec![0.5]),
            Individual::new(1.0, vec![0.5]),
            Individual::new(2.0, vec![0.5]),
        ];
        population.sort();
        let fitnesses: Vec<f64> = population.iter().map(|ind| ind.fitness).collect();
        assert_eq!(fitnesses, vec![1.0, 2.0, 3.0]);
    }
}
