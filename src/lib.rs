//! Memory-bank assignment via a Biased Random-Key Genetic Algorithm.
//!
//! The problem: place each of `n` data structures into one of `m`
//! capacity-limited memory banks, or into a synthetic, capacity-unbounded
//! external bank at a penalty. Co-locating (or jointly externalizing) two
//! conflicting structures adds a pairwise cost. The objective is the sum of
//! placement costs, externalization penalties, and conflict contributions.
//!
//! Two layers, cleanly separated:
//!
//! - [`brkga`] — the generic evolutionary engine. Chromosomes are vectors of
//!   `f64` random keys in `[0, 1)`; the engine handles elite copy, mutant
//!   generation, and biased uniform crossover, and knows nothing about
//!   memory banks. A user-provided [`brkga::Decoder`] maps keys to a cost.
//! - [`problem`] — the memory-bank domain: the cost model
//!   ([`problem::MemProblem`]), the greedy decoding heuristic
//!   ([`problem::GreedyDecoder`]), the text-format loader/writer, and random
//!   instance generation.
//!
//! # Example
//!
//! ```
//! use membank_brkga::brkga::{BrkgaConfig, BrkgaEngine};
//! use membank_brkga::problem::{random_problem, GreedyDecoder, InstanceRanges};
//!
//! let problem = random_problem(&InstanceRanges::default(), 7);
//! let decoder = GreedyDecoder::new(&problem);
//! let config = BrkgaConfig::new(problem.items()).with_seed(42);
//!
//! let mut engine = BrkgaEngine::new(decoder, config);
//! for _ in 0..50 {
//!     engine.evolve();
//! }
//! assert!(engine.best_solution().fitness.is_finite());
//! ```
//!
//! # References
//!
//! - Bean (1994), "Genetic algorithms and random keys for sequencing and optimization"
//! - Gonçalves & Resende (2011), "Biased random-key genetic algorithms for
//!   combinatorial optimization", *J. Heuristics* 17(5), 487–525

pub mod brkga;
pub mod problem;
