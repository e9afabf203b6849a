//! File reading for corpus building
//!
//! Provides consistent handling for:
//! - Non-UTF-8 files (strict by default, lossy on request)
//! - Line terminators (`\n`, `\r\n` and lone `\r`)

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::model::CodematError;

/// Strategy for handling non-UTF-8 content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingStrategy {
    /// Reject files with invalid UTF-8 (the file is skipped)
    #[default]
    Strict,
    /// Use lossy conversion (replace invalid bytes with U+FFFD)
    Lossy,
}

/// Read a file and split it into lines with terminators stripped
///
/// The handle is closed when this returns, on success or error.
pub fn read_lines(path: &Path, encoding: EncodingStrategy) -> Result<Vec<String>, CodematError> {
    let read_error = |source: std::io::Error| CodematError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).map_err(read_error)?;

    let content = match String::from_utf8(buffer) {
        Ok(content) => content,
        Err(e) => match encoding {
            EncodingStrategy::Strict => {
                return Err(read_error(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    e.utf8_error(),
                )));
            }
            EncodingStrategy::Lossy => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        },
    };

    Ok(split_lines(&content))
}

/// Split text into lines, treating `\n`, `\r\n` and `\r` as terminators
///
/// A trailing terminator does not open an extra empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                lines.push(rest[..idx].to_string());
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}
