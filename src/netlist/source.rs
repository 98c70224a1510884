//! Instruction file loading.
//!
//! A circuit file is plain text:
//! - One assignment per line (`x AND y -> d`)
//! - Lines starting with `#` or `;` are comments
//! - Blank lines are ignored

use crate::netlist::table::{AssignmentTable, TableError};
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Read the instruction lines of a circuit file, trimmed, without comments.
///
/// Each line is paired with its 1-based line number in the file.
pub fn read_instructions<P: AsRef<Path>>(path: P) -> Result<Vec<(usize, String)>, SourceError> {
    let file = std::fs::File::open(path.as_ref())
        .map_err(|e| SourceError::IoError(e.to_string()))?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| SourceError::IoError(e.to_string()))?;
        if let Some(instr) = instruction_text(&line) {
            lines.push((line_num + 1, instr.to_string()));
        }
    }

    Ok(lines)
}

/// Split in-memory text into instruction lines, as [`read_instructions`] does.
pub fn instruction_lines(text: &str) -> Vec<(usize, String)> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| instruction_text(line).map(|s| (i + 1, s.to_string())))
        .collect()
}

fn instruction_text(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
        None
    } else {
        Some(trimmed)
    }
}

/// Build an assignment table from numbered lines, failing on the first bad one.
pub fn build_table(lines: &[(usize, String)]) -> Result<AssignmentTable, SourceError> {
    let mut table = AssignmentTable::new();
    for (line_num, text) in lines {
        table
            .add_instruction(text)
            .map_err(|source| SourceError::Instruction {
                line: *line_num,
                source,
            })?;
    }
    Ok(table)
}

/// Load and parse a circuit file in one step.
pub fn load_circuit<P: AsRef<Path>>(path: P) -> Result<AssignmentTable, SourceError> {
    let lines = read_instructions(path)?;
    build_table(&lines)
}

/// Errors that can occur while loading a circuit file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("line {line}: {source}")]
    Instruction { line: usize, source: TableError },
}
