//! Biased Random-Key Genetic Algorithm (BRKGA) engine.
//!
//! BRKGA separates the evolutionary search from the problem by using a
//! random-key representation: chromosomes are vectors of `f64` in `[0, 1)`,
//! and a user-provided **decoder** maps keys to a cost. The engine handles
//! population management (elite copy, probabilistic mutant generation,
//! biased uniform crossover) entirely; the user implements only [`Decoder`].
//!
//! Unlike a run-to-completion solver, [`BrkgaEngine`] is stepwise: the
//! caller drives [`BrkgaEngine::evolve`] one generation at a time and
//! decides when to stop.
//!
//! # References
//!
//! - Bean (1994), "Genetic algorithms and random keys for sequencing and optimization"
//! - Gonçalves & Resende (2011), "Biased random-key genetic algorithms for
//!   combinatorial optimization", *J. Heuristics* 17(5), 487–525

mod config;
mod engine;
mod types;

pub use config::BrkgaConfig;
pub use engine::{BrkgaEngine, GenerationStats};
pub use types::{Decoder, Individual};
