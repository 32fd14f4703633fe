//! BRKGA generational evolution engine.

use super::config::BrkgaConfig;
use super::types::{Decoder, Individual};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Composition of one generation produced by [`BrkgaEngine::evolve`].
#[derive(Debug, Clone, Copy)]
pub struct GenerationStats {
    /// Elite individuals carried over unchanged.
    pub elites: usize,

    /// Mutants injected this generation.
    pub mutants: usize,

    /// Crossover offspring produced this generation.
    pub offspring: usize,

    /// Best fitness after the generation transition.
    pub best_fitness: f64,
}

/// The BRKGA evolution engine.
///
/// Holds exactly two population slots, `previous` and `current`, both
/// rank-sorted and of exactly `p` individuals; [`evolve`] replaces them
/// wholesale. The engine has no built-in stopping rule — the caller owns
/// the generation budget and drives [`evolve`] in a loop.
///
/// All randomness comes from one seeded generator owned by the engine, and
/// every draw (population init, mutation coins, parent and allele choices)
/// happens in a fixed order, so two engines built from the same
/// `(decoder, config, seed)` produce identical runs.
///
/// [`evolve`]: BrkgaEngine::evolve
pub struct BrkgaEngine<D: Decoder> {
    config: BrkgaConfig,
    decoder: D,
    rng: StdRng,
    previous: Vec<Individual>,
    current: Vec<Individual>,
}

impl<D: Decoder> BrkgaEngine<D> {
    /// Builds an engine with a ranked initial population of uniform-random
    /// chromosomes. `previous` starts as a copy of `current`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not validate.
    pub fn new(decoder: D, config: BrkgaConfig) -> Self {
        config.validate().expect("invalid BrkgaConfig");

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let n = config.chromosome_length;
        let initial: Vec<Vec<f64>> = (0..config.population_size)
            .map(|_| (0..n).map(|_| rng.random_range(0.0..1.0)).collect())
            .collect();

        let mut engine = Self {
            config,
            decoder,
            rng,
            previous: Vec::new(),
            current: Vec::new(),
        };
        engine.current = engine.rank(initial);
        engine.previous = engine.current.clone();
        engine
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &BrkgaConfig {
        &self.config
    }

    /// The current population, sorted ascending by fitness.
    pub fn population(&self) -> &[Individual] {
        &self.current
    }

    /// The lowest-fitness individual of the current population.
    pub fn best_solution(&self) -> &Individual {
        &self.current[0]
    }

    /// Performs one generation transition.
    ///
    /// 1. The best `floor(p * pe)` of `previous` are copied unchanged.
    /// 2. Each of the `p` previous individuals spawns a mutant with
    ///    probability `pm`; mutant genes take a fresh uniform draw or the
    ///    parent's allele with even odds. The mutant count is therefore
    ///    binomial, not a fixed quota.
    /// 3. The remainder is filled by biased uniform crossover of one elite
    ///    and one non-elite parent, drawn uniformly with replacement; each
    ///    gene comes from the elite parent with probability `rhoe`.
    /// 4. Elite, offspring, and mutants merge, sort ascending, and
    ///    truncate to `p`. `previous` becomes the old `current`.
    ///
    /// When mutants plus elites already exceed `p`, the crossover count is
    /// clamped to zero and truncation restores the population size.
    pub fn evolve(&mut self) -> GenerationStats {
        let p = self.config.population_size;
        let n = self.config.chromosome_length;
        let pm = self.config.mutation_prob;
        let rhoe = self.config.elite_inheritance_prob;
        let elite_count = self.config.elite_count();

        let elite: Vec<Individual> = self.previous[..elite_count].to_vec();

        let mut mutant_keys: Vec<Vec<f64>> = Vec::new();
        {
            let rng = &mut self.rng;
            for parent in &self.previous {
                if rng.random_range(0.0..1.0) >= pm {
                    continue;
                }
                let keys = parent
                    .keys
                    .iter()
                    .map(|&allele| {
                        if rng.random_range(0.0..1.0) <= 0.5 {
                            rng.random_range(0.0..1.0)
                        } else {
                            allele
                        }
                    })
                    .collect();
                mutant_keys.push(keys);
            }
        }
        let mutants = self.rank(mutant_keys);

        let crossover_count = p.saturating_sub(elite_count + mutants.len());
        let mut offspring_keys: Vec<Vec<f64>> = Vec::with_capacity(crossover_count);
        {
            let rng = &mut self.rng;
            let previous = &self.previous;
            for _ in 0..crossover_count {
                let ei = rng.random_range(0..elite_count);
                let ni = rng.random_range(elite_count..p);
                let keys = (0..n)
                    .map(|gene| {
                        if rng.random_range(0.0..1.0) <= rhoe {
                            previous[ei].keys[gene]
                        } else {
                            previous[ni].keys[gene]
                        }
                    })
                    .collect();
                offspring_keys.push(keys);
            }
        }
        let offspring = self.decode_batch(offspring_keys);

        let stats_mutants = mutants.len();
        let stats_offspring = offspring.len();

        let mut next = elite;
        next.extend(offspring);
        next.extend(mutants);
        next.sort();
        next.truncate(p);

        self.previous = std::mem::replace(&mut self.current, next);
        // Cannot overflow by construction; kept as a guard.
        self.previous.truncate(p);

        let best_fitness = self.current[0].fitness;
        log::debug!(
            "generation: best {best_fitness} ({elite_count} elite, \
             {stats_offspring} offspring, {stats_mutants} mutants)"
        );

        GenerationStats {
            elites: elite_count,
            mutants: stats_mutants,
            offspring: stats_offspring,
            best_fitness,
        }
    }

    /// Decodes a batch of chromosomes and returns the individuals sorted
    /// ascending by fitness.
    fn rank(&self, batch: Vec<Vec<f64>>) -> Vec<Individual> {
        let mut individuals = self.decode_batch(batch);
        individuals.sort();
        individuals
    }

    fn decode_batch(&self, batch: Vec<Vec<f64>>) -> Vec<Individual> {
        let decoder = &self.decoder;
        if self.config.parallel {
            batch
                .into_par_iter()
                .map(|keys| {
                    let fitness = decoder.decode(&keys);
                    Individual::new(fitness, keys)
                })
                .collect()
        } else {
            batch
                .into_iter()
                .map(|keys| {
                    let fitness = decoder.decode(&keys);
                    Individual::new(fitness, keys)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimize the sum of keys; optimum approaches 0.
    struct SumDecoder;

    impl Decoder for SumDecoder {
        fn decode(&self, keys: &[f64]) -> f64 {
            keys.iter().sum()
        }
    }

    #[test]
    fn test_population_sizes_invariant() {
        let config = BrkgaConfig::new(8).with_population_size(20).with_seed(42);
        let mut engine = BrkgaEngine::new(SumDecoder, config);
        for _ in 0..30 {
            engine.evolve();
            assert_eq!(engine.current.len(), 20);
            assert_eq!(engine.previous.len(), 20);
        }
    }

    #[test]
    fn test_best_fitness_never_regresses() {
        let config = BrkgaConfig::new(10).with_population_size(30).with_seed(7);
        let mut engine = BrkgaEngine::new(SumDecoder, config);
        let mut best = engine.best_solution().fitness;
        for _ in 0..50 {
            let stats = engine.evolve();
            assert!(
                stats.best_fitness <= best,
                "best regressed: {} > {}",
                stats.best_fitness,
                best
            );
            best = stats.best_fitness;
        }
    }

    #[test]
    fn test_improves_on_sum() {
        let config = BrkgaConfig::new(10).with_population_size(30).with_seed(3);
        let mut engine = BrkgaEngine::new(SumDecoder, config);
        let initial = engine.best_solution().fitness;
        for _ in 0..200 {
            engine.evolve();
        }
        assert!(engine.best_solution().fitness < initial);
    }

    #[test]
    fn test_deterministic_given_seed() {
        let make = || {
            BrkgaEngine::new(
                SumDecoder,
                BrkgaConfig::new(12).with_population_size(25).with_seed(99),
            )
        };
        let mut a = make();
        let mut b = make();
        for _ in 0..20 {
            a.evolve();
            b.evolve();
            assert_eq!(a.best_solution().fitness, b.best_solution().fitness);
            assert_eq!(a.best_solution().keys, b.best_solution().keys);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = BrkgaConfig::new(12).with_population_size(25).with_seed(5);
        let parallel = sequential.clone().with_parallel(true);
        let mut a = BrkgaEngine::new(SumDecoder, sequential);
        let mut b = BrkgaEngine::new(SumDecoder, parallel);
        for _ in 0..15 {
            a.evolve();
            b.evolve();
            assert_eq!(a.best_solution().fitness, b.best_solution().fitness);
        }
    }

    #[test]
    fn test_mutant_rate_converges_to_pm() {
        let config = BrkgaConfig::new(6).with_population_size(50).with_seed(1234);
        let mut engine = BrkgaEngine::new(SumDecoder, config);

        let generations = 400;
        let mut produced = 0usize;
        for _ in 0..generations {
            produced += engine.evolve().mutants;
        }
        let rate = produced as f64 / (generations * 50) as f64;
        assert!(
            (rate - 0.10).abs() < 0.02,
            "mutant rate {rate} not within tolerance of pm = 0.10"
        );
    }

    #[test]
    fn test_mutant_overflow_clamps_crossover() {
        // pm = 1.0 makes mutants + elites exceed p every generation.
        let config = BrkgaConfig::new(5)
            .with_population_size(10)
            .with_mutation_prob(1.0)
            .with_seed(11);
        let mut engine = BrkgaEngine::new(SumDecoder, config);
        for _ in 0..10 {
            let stats = engine.evolve();
            assert_eq!(stats.offspring, 0);
            assert_eq!(engine.current.len(), 10);
        }
    }

    #[test]
    fn test_elites_survive_verbatim() {
        let config = BrkgaConfig::new(8).with_population_size(20).with_seed(21);
        let mut engine = BrkgaEngine::new(SumDecoder, config);
        for _ in 0..10 {
            let best_before = engine.best_solution().clone();
            engine.evolve();
            // The previous best is elite; something at least as good must
            // lead the new generation.
            assert!(engine.best_solution().fitness <= best_before.fitness);
        }
    }

    #[test]
    #[should_panic(expected = "invalid BrkgaConfig")]
    fn test_rejects_invalid_config() {
        let config = BrkgaConfig::new(0);
        let _ = BrkgaEngine::new(SumDecoder, config);
    }
}
