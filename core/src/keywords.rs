//! Keyword ingestion: free text split on a delimiter, or the first column of
//! a CSV file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Where a keyword list comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordSource {
    Text {
        text: String,
        #[serde(default = "default_delimiter")]
        delimiter: String,
    },
    File {
        file: PathBuf,
        #[serde(default = "default_delimiter")]
        delimiter: String,
    },
    Csv {
        csv: PathBuf,
    },
}

fn default_delimiter() -> String {
    ",".to_string()
}

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("failed to read keyword file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Split `text` on `delimiter`, trim every entry and drop empty ones.
///
/// The two-character sequence `\n` (backslash, n) stands for a newline, so a
/// delimiter typed into a single-line field can still split lines. An empty
/// delimiter also means newline.
pub fn parse_keywords_from_text(text: &str, delimiter: &str) -> Vec<String> {
    let delimiter = match delimiter {
        "" | "\\n" => "\n",
        other => other,
    };
    text.split(delimiter)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keywords from the first column of CSV `text`.
///
/// The first record is a header and is skipped. Cells are trimmed; empty
/// cells and the literal `nan` are dropped. Quoted fields may contain
/// delimiters, doubled quotes and line breaks. Records may have differing
/// field counts; unreadable records are skipped.
pub fn parse_keywords_from_csv(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    reader
        .records()
        .filter_map(|record| match record {
            Ok(record) => record.get(0).map(|cell| cell.trim().to_string()),
            Err(err) => {
                warn!(error = %err, "skipping unreadable CSV record");
                None
            }
        })
        .filter(|k| !k.is_empty() && k != "nan")
        .collect()
}

/// Read and parse keywords from `source`.
pub fn load_keywords(source: &KeywordSource) -> Result<Vec<String>, KeywordError> {
    let keywords = match source {
        KeywordSource::Text { text, delimiter } => parse_keywords_from_text(text, delimiter),
        KeywordSource::File { file, delimiter } => {
            parse_keywords_from_text(&read_file(file)?, delimiter)
        }
        KeywordSource::Csv { csv } => parse_keywords_from_csv(&read_file(csv)?),
    };
    debug!(count = keywords.len(), "loaded keywords");
    Ok(keywords)
}

/// The first `limit` keywords.
pub fn keyword_preview(keywords: &[String], limit: usize) -> &[String] {
    &keywords[..keywords.len().min(limit)]
}

fn read_file(path: &Path) -> Result<String, KeywordError> {
    std::fs::read_to_string(path).map_err(|source| KeywordError::Io {
        path: path.to_path_buf(),
        source,
    })
}
