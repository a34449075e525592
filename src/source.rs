use std::io::BufRead;

use anyhow::{Context, Result};

use crate::model::RawRow;

/// Read crawler output, one JSON object per line.
///
/// Blank lines are skipped. A line that fails to parse is yielded as an error
/// carrying its line number, and reading carries on with the next line.
pub fn read_rows<R: BufRead>(reader: R) -> impl Iterator<Item = Result<RawRow>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let lineno = idx + 1;
            let line = match line.with_context(|| format!("Failed to read line {}", lineno)) {
                Ok(l) => l,
                Err(e) => return Some(Err(e)),
            };
            if line.trim().is_empty() {
                return None;
            }
            Some(
                serde_json::from_str::<RawRow>(&line)
                    .with_context(|| format!("Invalid row on line {}", lineno)),
            )
        })
}
