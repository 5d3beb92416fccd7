//! Extraction of numeric annotations from free-text file headers.
//!
//! Both extractors scan the whole text once with a regular expression and
//! return `None` when the annotation is absent. No plausibility check is made
//! on the extracted number.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// pH assumed by callers when a file does not state one.
pub const DEFAULT_PH: f64 = 5.0;

const PH_LABEL: &str = "pH";

static PH_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pH.*\d+.*").expect("pH line pattern is valid"));
static RESOLUTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"RESOLUTION.*\d+\.\d+.*ANGSTROMS.").expect("resolution line pattern is valid")
});
static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+").expect("decimal pattern is valid"));
static SPACED_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" \d{1,2} ").expect("integer pattern is valid"));

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

fn read_text(path: &Path) -> Result<String, MetadataError> {
    std::fs::read_to_string(path).map_err(|e| MetadataError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Finds the pH stated in `text`.
///
/// The first line fragment that starts with `pH` and contains a digit is
/// searched for decimals and for one- or two-digit integers surrounded by
/// spaces. The candidate starting closest to the `pH` label wins; decimals
/// are preferred over integers at equal distance.
pub fn extract_ph(text: &str) -> Option<f64> {
    let line = PH_LINE.find(text)?.as_str();
    let label = line.find(PH_LABEL)?;

    DECIMAL
        .find_iter(line)
        .chain(SPACED_INTEGER.find_iter(line))
        .filter_map(|m| {
            let value = m.as_str().trim().parse::<f64>().ok()?;
            Some((m.start().abs_diff(label), value))
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, value)| value)
}

/// Like [`extract_ph`], falling back to `default` when no pH is stated.
pub fn ph_or(text: &str, default: f64) -> f64 {
    extract_ph(text).unwrap_or(default)
}

/// Reads the file at `path` and extracts its pH, falling back to `default`.
pub fn read_ph(path: &Path, default: f64) -> Result<f64, MetadataError> {
    Ok(ph_or(&read_text(path)?, default))
}

/// Finds the resolution, in Angstroms, of a `RESOLUTION. <x> ANGSTROMS.` remark.
pub fn extract_resolution(text: &str) -> Option<f64> {
    let line = RESOLUTION_LINE.find(text)?.as_str();
    DECIMAL.find(line)?.as_str().parse().ok()
}

/// Reads the file at `path` and extracts its resolution.
pub fn read_resolution(path: &Path) -> Result<Option<f64>, MetadataError> {
    Ok(extract_resolution(&read_text(path)?))
}
