//! # Instance Input
//!
//! Reads and writes problem instances in a plain whitespace-separated format:
//!
//! ```text
//! <object_count> <sack_capacity>
//! <profit> <weight>      # object_count lines
//! ```
//!
//! ## Example
//!
//! ```rust
//! use knapsack_evolve::input::read_instance;
//!
//! let text = "10 5\n".to_string() + &"1 1\n".repeat(10);
//! let instance = read_instance(text.as_bytes()).unwrap();
//!
//! assert_eq!(instance.catalog.len(), 10);
//! assert_eq!(instance.sack_capacity, 5);
//! ```

use std::io::{BufRead, BufReader, Read, Write};

use crate::catalog::{Catalog, Item};
use crate::error::{GeneticError, OptionExt, Result};

/// A catalog together with the capacity of the sack it must fit into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub catalog: Catalog,
    pub sack_capacity: i64,
}

fn parse_pair(line: &str, line_no: usize) -> Result<(i64, i64)> {
    let mut fields = line.split_whitespace().map(|field| {
        field.parse::<i64>().map_err(|e| GeneticError::Parse {
            line: line_no,
            message: format!("invalid integer '{}': {}", field, e),
        })
    });

    match (fields.next(), fields.next()) {
        (Some(first), Some(second)) => Ok((first?, second?)),
        _ => Err(GeneticError::Parse {
            line: line_no,
            message: "expected two integers".to_string(),
        }),
    }
}

/// Parses an instance.
///
/// Blank lines are skipped. Lines after the last expected item are ignored.
///
/// # Errors
///
/// - `Io` if reading fails
/// - `Parse` for a missing header, a malformed line, or fewer items than announced
/// - `Configuration` if the object count is zero, negative, or not a multiple of 10
pub fn read_instance<R: Read>(reader: R) -> Result<Instance> {
    let mut lines = BufReader::new(reader)
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !matches!(line, Ok(text) if text.trim().is_empty()));

    let (line_no, header) = lines.next().ok_or_else_genetic(|| GeneticError::Parse {
        line: 1,
        message: "missing header".to_string(),
    })?;
    let (object_count, sack_capacity) = parse_pair(&header?, line_no)?;

    if object_count <= 0 || object_count % 10 != 0 {
        return Err(GeneticError::Configuration(format!(
            "Object count must be a positive multiple of 10, got {}",
            object_count
        )));
    }

    let object_count = object_count as usize;
    let mut items = Vec::new();
    for (line_no, line) in lines.by_ref().take(object_count) {
        let (profit, weight) = parse_pair(&line?, line_no)?;
        items.push(Item::new(profit, weight));
    }

    if items.len() < object_count {
        return Err(GeneticError::Parse {
            line: line_no + items.len() + 1,
            message: format!("expected {} items, found {}", object_count, items.len()),
        });
    }

    Ok(Instance {
        catalog: Catalog::new(items),
        sack_capacity,
    })
}

/// Writes an instance in the format `read_instance` accepts.
pub fn write_instance<W: Write>(mut writer: W, instance: &Instance) -> Result<()> {
    writeln!(writer, "{} {}", instance.catalog.len(), instance.sack_capacity)?;
    for item in &instance.catalog {
        writeln!(writer, "{} {}", item.profit, item.weight)?;
    }
    writer.flush()?;
    Ok(())
}
