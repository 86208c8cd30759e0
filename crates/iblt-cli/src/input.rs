// crates/iblt-cli/src/input.rs
//
// Reads key/value pairs from tab-separated text files.
//
// One `key<TAB>value` per line. The value is everything after the first
// tab, so it may itself contain tabs. Blank lines and lines starting with
// `#` are skipped.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// An owned key/value pair.
pub type Pair = (Vec<u8>, Vec<u8>);

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: expected key<TAB>value")]
    MissingTab { line: usize },
}

/// Parse pairs from file contents. Line numbers in errors are 1-based.
pub fn parse_pairs(text: &str) -> Result<Vec<Pair>, InputError> {
    let mut pairs = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line
            .split_once('\t')
            .ok_or(InputError::MissingTab { line: idx + 1 })?;
        pairs.push((key.as_bytes().to_vec(), value.as_bytes().to_vec()));
    }
    Ok(pairs)
}

/// Read and parse a pairs file.
pub fn read_pairs(path: &Path) -> Result<Vec<Pair>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let pairs = parse_pairs(&text)?;
    tracing::debug!("Read {} pairs from {}", pairs.len(), path.display());
    Ok(pairs)
}
