//! Text-format loader and writer for problem instances.
//!
//! An instance is a sequence of `name = value;` statements: scalar counts
//! (`num_data_structures`, `num_memory_banks`, `p` for the penalty,
//! `conflicts`) and bracketed integer lists (`s` sizes, `c` capacities,
//! `e` placement costs, `d` conflict costs, `A`/`B` zero-based conflict
//! endpoints parallel to `d`). The external bank is implicit and never
//! appears in the file.

use super::model::{Conflict, DataStruct, MemBank, MemProblem};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Errors raised while reading or validating a problem file.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` has unparseable value `{value}`")]
    InvalidValue { field: String, value: String },

    #[error("field `{field}` has {found} entries, expected {expected}")]
    CountMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("field `{field}` references item {index}, but there are only {items} items")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        items: usize,
    },
}

/// Reads and parses a problem file.
pub fn read_problem(path: impl AsRef<Path>) -> Result<MemProblem, FormatError> {
    parse_problem(&fs::read_to_string(path)?)
}

/// Parses a problem definition from its textual form.
pub fn parse_problem(text: &str) -> Result<MemProblem, FormatError> {
    let mut items_n = None;
    let mut banks_n = None;
    let mut penalty = None;
    let mut conflicts_n = None;
    let mut sizes = None;
    let mut capacities = None;
    let mut item_costs = None;
    let mut conflict_costs = None;
    let mut endpoints_a = None;
    let mut endpoints_b = None;

    for statement in text.split(';') {
        let Some((name, value)) = statement.split_once('=') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        match name {
            "num_data_structures" => items_n = Some(parse_scalar(name, value)?),
            "num_memory_banks" => banks_n = Some(parse_scalar(name, value)?),
            "p" => penalty = Some(parse_scalar(name, value)?),
            "conflicts" => conflicts_n = Some(parse_scalar(name, value)?),
            "s" => sizes = Some(parse_list(name, value)?),
            "c" => capacities = Some(parse_list(name, value)?),
            "e" => item_costs = Some(parse_list(name, value)?),
            "d" => conflict_costs = Some(parse_list(name, value)?),
            "A" => endpoints_a = Some(parse_list(name, value)?),
            "B" => endpoints_b = Some(parse_list(name, value)?),
            _ => {}
        }
    }

    let items_n = items_n.ok_or(FormatError::MissingField("num_data_structures"))? as usize;
    let banks_n = banks_n.ok_or(FormatError::MissingField("num_memory_banks"))? as usize;
    let penalty = penalty.ok_or(FormatError::MissingField("p"))?;
    let conflicts_n = conflicts_n.ok_or(FormatError::MissingField("conflicts"))? as usize;
    let sizes = sized(sizes.ok_or(FormatError::MissingField("s"))?, "s", items_n)?;
    let capacities = sized(capacities.ok_or(FormatError::MissingField("c"))?, "c", banks_n)?;
    let item_costs = sized(item_costs.ok_or(FormatError::MissingField("e"))?, "e", items_n)?;
    let conflict_costs = sized(
        conflict_costs.ok_or(FormatError::MissingField("d"))?,
        "d",
        conflicts_n,
    )?;
    let endpoints_a = sized(endpoints_a.ok_or(FormatError::MissingField("A"))?, "A", conflicts_n)?;
    let endpoints_b = sized(endpoints_b.ok_or(FormatError::MissingField("B"))?, "B", conflicts_n)?;

    let datastructs = sizes
        .iter()
        .zip(&item_costs)
        .map(|(&size, &cost)| DataStruct {
            size: size as u64,
            cost,
        })
        .collect();

    let membanks = capacities
        .iter()
        .map(|&capacity| MemBank {
            capacity: capacity as u64,
        })
        .collect();

    let mut conflicts = Vec::with_capacity(conflicts_n);
    for k in 0..conflicts_n {
        for (field, value) in [("A", endpoints_a[k]), ("B", endpoints_b[k])] {
            let index = value as usize;
            if index >= items_n {
                return Err(FormatError::IndexOutOfRange {
                    field,
                    index,
                    items: items_n,
                });
            }
        }
        conflicts.push(Conflict::new(
            endpoints_a[k] as usize,
            endpoints_b[k] as usize,
            conflict_costs[k],
        ));
    }

    Ok(MemProblem::new(datastructs, membanks, conflicts, penalty))
}

/// Renders a problem in the same statement layout the parser reads.
pub fn format_problem(problem: &MemProblem) -> String {
    let join = |values: Vec<String>| values.join(", ");
    let mut out = String::new();

    let _ = writeln!(out, "num_data_structures = {};", problem.items());
    let _ = writeln!(out, "num_memory_banks = {};", problem.banks());
    let _ = writeln!(out, "p = {};", problem.penalty());
    let _ = writeln!(out, "conflicts = {};", problem.conflicts().len());
    out.push('\n');

    let sizes = problem.datastructs().iter().map(|d| d.size.to_string()).collect();
    let _ = writeln!(out, "s = [{}];", join(sizes));

    let capacities = problem.membanks().iter().map(|b| b.capacity.to_string()).collect();
    let _ = writeln!(out, "c = [{}];", join(capacities));

    let costs = problem.datastructs().iter().map(|d| d.cost.to_string()).collect();
    let _ = writeln!(out, "e = [{}];", join(costs));

    let dcosts = problem.conflicts().iter().map(|c| c.cost.to_string()).collect();
    let _ = writeln!(out, "d = [{}];", join(dcosts));
    out.push('\n');

    let a = problem.conflicts().iter().map(|c| c.a.to_string()).collect();
    let _ = writeln!(out, "A = [{}];", join(a));

    let b = problem.conflicts().iter().map(|c| c.b.to_string()).collect();
    let _ = writeln!(out, "B = [{}];", join(b));

    out
}

/// Writes a problem file in the textual layout.
pub fn write_problem(problem: &MemProblem, path: impl AsRef<Path>) -> Result<(), FormatError> {
    fs::write(path, format_problem(problem))?;
    Ok(())
}

fn parse_scalar(field: &str, value: &str) -> Result<f64, FormatError> {
    value.parse().map_err(|_| FormatError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_list(field: &str, value: &str) -> Result<Vec<f64>, FormatError> {
    let invalid = || FormatError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    };

    let inner = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?
        .trim();

    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|entry| entry.trim().parse().map_err(|_| invalid()))
        .collect()
}

fn sized(values: Vec<f64>, field: &'static str, expected: usize) -> Result<Vec<f64>, FormatError> {
    if values.len() != expected {
        return Err(FormatError::CountMismatch {
            field,
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}
