//! Address trace parsing.
//!
//! A trace is plain text with one address per line, either hexadecimal with
//! a `0x` prefix or decimal. Blank lines are skipped and `#` starts a comment
//! that runs to the end of the line.
//!
//! ```text
//! # warm-up
//! 0xface00a000000000
//! 0xface00a000000040   # next line
//! 4096
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::error::TraceError;

/// Parses a single trace line.
///
/// Returns `Ok(None)` for blank and comment-only lines.
///
/// # Errors
///
/// Returns [`TraceError::Parse`] carrying `line_no` if the text is not an
/// address.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<u64>, TraceError> {
    let text = line.split_once('#').map_or(line, |(head, _)| head).trim();
    if text.is_empty() {
        return Ok(None);
    }

    let digits = text.replace('_', "");
    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse(),
    };

    parsed.map(Some).map_err(|_| TraceError::Parse {
        line: line_no,
        text: text.to_string(),
    })
}

/// Parses every address from a buffered reader.
///
/// # Errors
///
/// Returns the first [`TraceError`] encountered; nothing is returned
/// for a partially parsed trace.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<u64>, TraceError> {
    let mut addrs = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        if let Some(addr) = parse_line(&line?, i + 1)? {
            addrs.push(addr);
        }
    }
    Ok(addrs)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read and
/// [`TraceError::Parse`] for the first malformed line.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<u64>, TraceError> {
    let file = File::open(path)?;
    parse(BufReader::new(file))
}
