//! BRKGA engine configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`BrkgaEngine`].
///
/// Every generation keeps the best `elite_fraction` of the population,
/// replaces each individual with probability `mutation_prob` by a mutant of
/// itself, and fills the remainder with biased-crossover offspring.
///
/// # Examples
///
/// ```
/// use membank_brkga::brkga::BrkgaConfig;
///
/// let config = BrkgaConfig::new(50) // 50 random keys
///     .with_population_size(100)
///     .with_elite_fraction(0.20)
///     .with_mutation_prob(0.10)
///     .with_elite_inheritance_prob(0.70)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
///
/// [`BrkgaEngine`]: super::BrkgaEngine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BrkgaConfig {
    /// Number of random keys per chromosome.
    pub chromosome_length: usize,

    /// Total population size.
    pub population_size: usize,

    /// Fraction of the population preserved as elite each generation
    /// (0.10–0.25 typical). The elite count is `floor(p * elite_fraction)`.
    pub elite_fraction: f64,

    /// Per-individual probability of spawning a mutant each generation.
    ///
    /// Unlike a fixed mutant quota, the number of mutants in a generation
    /// is binomial: each of the `p` individuals independently produces a
    /// mutant of itself with this probability.
    pub mutation_prob: f64,

    /// Probability that an offspring inherits the elite parent's allele
    /// during biased uniform crossover (0.55–0.80 typical).
    ///
    /// Must be > 0.5 for the bias toward elite to be meaningful.
    pub elite_inheritance_prob: f64,

    /// Whether to decode chromosome batches in parallel using rayon.
    ///
    /// Key generation always stays on the engine's single RNG, so this
    /// does not affect reproducibility.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl BrkgaConfig {
    /// Creates a configuration with the given chromosome length and the
    /// classic parameter set: p = 20, pe = 0.2, pm = 0.1, rhoe = 0.7.
    pub fn new(chromosome_length: usize) -> Self {
        Self {
            chromosome_length,
            population_size: 20,
            elite_fraction: 0.20,
            mutation_prob: 0.10,
            elite_inheritance_prob: 0.70,
            parallel: false,
            seed: None,
        }
    }

    pub fn with_population_size(mut self, p: usize) -> Self {
        self.population_size = p;
        self
    }

    pub fn with_elite_fraction(mut self, f: f64) -> Self {
        self.elite_fraction = f.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_prob(mut self, p: f64) -> Self {
        self.mutation_prob = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_elite_inheritance_prob(mut self, p: f64) -> Self {
        self.elite_inheritance_prob = p.clamp(0.5, 1.0);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elite individuals implied by this configuration.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_fraction) as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.chromosome_length == 0 {
            return Err("chromosome_length must be at least 1".into());
        }
        if self.population_size < 3 {
            return Err("population_size must be at least 3".into());
        }
        if self.elite_count() == 0 {
            return Err("elite_fraction too small: no elite individuals".into());
        }
        if self.elite_count() >= self.population_size {
            return Err(format!(
                "elite_fraction ({}) leaves no non-elite individuals",
                self.elite_fraction
            ));
        }
        if self.elite_inheritance_prob <= 0.5 {
            return Err("elite_inheritance_prob must be > 0.5".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let config = BrkgaConfig::new(30);
        assert_eq!(config.chromosome_length, 30);
        assert_eq!(config.population_size, 20);
        assert!((config.elite_fraction - 0.20).abs() < 1e-10);
        assert!((config.mutation_prob - 0.10).abs() < 1e-10);
        assert!((config.elite_inheritance_prob - 0.70).abs() < 1e-10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(BrkgaConfig::new(10).validate().is_ok());
    }

    #[test]
    fn test_validate_zero_chromosome() {
        assert!(BrkgaConfig::new(0).validate().is_err());
    }

    #[test]
    fn test_validate_elite_bounds() {
        let none = BrkgaConfig::new(10).with_elite_fraction(0.01);
        assert!(none.validate().is_err());

        let all = BrkgaConfig::new(10).with_elite_fraction(1.0);
        assert!(all.validate().is_err());
    }

    #[test]
    fn test_elite_count_floors() {
        let config = BrkgaConfig::new(10).with_population_size(23);
        // floor(23 * 0.2) = 4
        assert_eq!(config.elite_count(), 4);
    }

    #[test]
    fn test_clamp_inheritance() {
        let config = BrkgaConfig::new(10).with_elite_inheritance_prob(0.2);
        assert!((config.elite_inheritance_prob - 0.5).abs() < 1e-10);
        assert!(config.validate().is_err());
    }
}
