//! Memory-bank assignment domain: cost model, greedy decoder, text I/O,
//! and random instance generation.

mod decode;
mod generate;
mod io;
mod model;

pub use decode::GreedyDecoder;
pub use generate::{random_problem, InstanceRanges};
pub use io::{format_problem, parse_problem, read_problem, write_problem, FormatError};
pub use model::{Conflict, DataStruct, MemBank, MemProblem};
