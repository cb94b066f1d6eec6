//! Input files hold one sequence per line.

use anyhow::{Context, Result};
use memchr::memchr_iter;
use std::fs;
use std::path::Path;

/// One non-empty input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based line number in the file
    pub number: usize,
    pub symbols: Vec<char>,
}

/// Read `path` and split it into sequences
pub fn read_sequences(path: &Path) -> Result<Vec<InputLine>> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(split_lines(&bytes))
}

/// Split on `\n`, dropping a trailing `\r` and skipping empty lines.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn split_lines(bytes: &[u8]) -> Vec<InputLine> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut number = 1;

    let ends = memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len()));
    for end in ends {
        let mut line = &bytes[start..end];
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
        if !line.is_empty() {
            lines.push(InputLine {
                number,
                symbols: String::from_utf8_lossy(line).chars().collect(),
            });
        }
        start = end + 1;
        number += 1;
    }

    lines
}
