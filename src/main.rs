//! CLI driver: run the BRKGA on a problem file for a fixed number of
//! generations and report the best solution found.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use membank_brkga::brkga::{BrkgaConfig, BrkgaEngine};
use membank_brkga::problem::{read_problem, GreedyDecoder};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let (iterations, path) = match (args.get(1), args.get(2)) {
        (Some(iters), Some(path)) => match iters.parse::<usize>() {
            Ok(iterations) => (iterations, path),
            Err(_) => {
                eprintln!("error: iterations must be a non-negative integer, got `{iters}`");
                return ExitCode::FAILURE;
            }
        },
        _ => {
            eprintln!("Usage: {} <iterations> <problem-file>", args[0]);
            return ExitCode::FAILURE;
        }
    };

    let problem = match read_problem(path) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("error: {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "loaded {path}: {} items, {} banks, {} conflicts, penalty {}",
        problem.items(),
        problem.banks(),
        problem.conflicts().len(),
        problem.penalty()
    );

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);
    let config = BrkgaConfig::new(problem.items())
        .with_population_size(20)
        .with_seed(seed);

    let decoder = GreedyDecoder::new(&problem);
    let mut engine = BrkgaEngine::new(decoder, config);

    for generation in 0..iterations {
        let stats = engine.evolve();
        info!("generation {generation}: best cost {}", stats.best_fitness);
    }

    let best = engine.best_solution();
    println!("best cost: {}", best.fitness);
    println!("chromosome: {:?}", best.keys);
    ExitCode::SUCCESS
}
