use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Serialization error for '{path}': {source}")]
    Encode {
        path: String,
        source: bincode::Error,
    },
    #[error("Deserialization error for '{path}': {source}")]
    Decode {
        path: String,
        source: bincode::Error,
    },
}

fn io_error(path: &Path, source: std::io::Error) -> PersistError {
    PersistError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    }
}

/// Serializes `value` to a binary file at `path` and returns its absolute location.
///
/// The file carries no version or schema information; it can only be read back
/// with [`load`] into the same type.
pub fn dump<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<PathBuf, PersistError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, value).map_err(|e| PersistError::Encode {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    writer.flush().map_err(|e| io_error(path, e))?;

    let absolute = std::path::absolute(path).map_err(|e| io_error(path, e))?;
    info!("Saved {}", absolute.display());
    Ok(absolute)
}

/// Reads back a value written by [`dump`].
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, PersistError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    bincode::deserialize_from(BufReader::new(file)).map_err(|e| PersistError::Decode {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        values: Vec<f64>,
        nested: BTreeMap<String, Option<u32>>,
    }

    #[test]
    fn dump_then_load_returns_equal_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.bin");
        let mut nested = BTreeMap::new();
        nested.insert("a".to_string(), Some(1));
        nested.insert("b".to_string(), None);
        let sample = Sample {
            name: "1ABC".to_string(),
            values: vec![1.5, -2.0],
            nested,
        };

        let saved = dump(&sample, &path).unwrap();
        let loaded: Sample = load(&saved).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn dump_returns_absolute_path() {
        let dir = tempdir().unwrap();
        let saved = dump(&vec![1u8, 2, 3], dir.path().join("v.bin")).unwrap();
        assert!(saved.is_absolute());
        assert!(saved.exists());
    }

    #[test]
    fn load_of_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result: Result<Vec<u8>, _> = load(dir.path().join("missing.bin"));
        assert!(matches!(result, Err(PersistError::Io { .. })));
    }

    #[test]
    fn load_of_truncated_file_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.bin");
        std::fs::write(&path, [1u8, 0]).unwrap();
        let result: Result<String, _> = load(&path);
        assert!(matches!(result, Err(PersistError::Decode { .. })));
    }

    #[test]
    fn dump_into_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let result = dump(&1u32, dir.path().join("no/such/dir/x.bin"));
        assert!(matches!(result, Err(PersistError::Io { .. })));
    }
}
