use pdbkit::core::devices::DeviceError;
use pdbkit::core::io::persist::PersistError;
use pdbkit::core::metadata::MetadataError;
use pdbkit::core::residues::ResidueError;
use pdbkit::remote::config::ConfigError;
use pdbkit::remote::error::RemoteError;
use pdbkit::workflows::download::DownloadError;
use pdbkit::workflows::sequence::SequenceError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Residue(#[from] ResidueError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("Network error: {0}")]
    Network(#[from] RemoteError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid endpoint configuration: {0}")]
    Endpoint(#[from] ConfigError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
