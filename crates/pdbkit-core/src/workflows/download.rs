use crate::core::io::pdb::{PdbError, PdbFile};
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use crate::remote::client::HttpSource;
use crate::remote::error::RemoteError;
use crate::workflows::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Cannot download PDB {pdb_id}: {source}")]
    Remote {
        pdb_id: String,
        #[source]
        source: RemoteError,
    },

    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse downloaded file '{path}': {source}", path = path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Cannot find chain {chain_id} for PDB {pdb_id}; full structure kept at '{path}'", path = path.display())]
    ChainNotFound {
        pdb_id: String,
        chain_id: char,
        path: PathBuf,
    },
}

/// What to download and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub pdb_id: String,
    /// Keep only this chain of the first model.
    pub chain_id: Option<char>,
    /// Output directory; the current directory when `None`.
    pub destination: Option<PathBuf>,
}

impl DownloadRequest {
    pub fn new(pdb_id: impl Into<String>) -> Self {
        Self {
            pdb_id: pdb_id.into(),
            chain_id: None,
            destination: None,
        }
    }

    pub fn chain(mut self, chain_id: char) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn destination(mut self, dir: impl Into<PathBuf>) -> Self {
        self.destination = Some(dir.into());
        self
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DownloadError + '_ {
    move |source| DownloadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Downloads a structure file and optionally trims it to one chain.
///
/// The full entry is written to `<destination>/<ID>.pdb`. When a chain is
/// requested, the first model is searched for it; on success the chain alone
/// is written to `<destination>/<ID><CHAIN>.pdb` and the full file is removed,
/// otherwise the full file is left in place and
/// [`DownloadError::ChainNotFound`] is returned.
///
/// Returns the path of the file that remains on disk.
pub fn download_structure(
    source: &impl HttpSource,
    request: &DownloadRequest,
) -> Result<PathBuf, DownloadError> {
    download_structure_with_progress(source, request, &ProgressReporter::new())
}

/// [`download_structure`] with progress events.
#[instrument(skip_all, name = "download_workflow", fields(pdb_id = %request.pdb_id))]
pub fn download_structure_with_progress(
    source: &impl HttpSource,
    request: &DownloadRequest,
    reporter: &ProgressReporter,
) -> Result<PathBuf, DownloadError> {
    let pdb_id = request.pdb_id.as_str();
    let destination = match &request.destination {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(io_error(Path::new(".")))?,
    };
    fs::create_dir_all(&destination).map_err(io_error(&destination))?;

    let url = source.config().structure_url(pdb_id);
    reporter.report(Progress::Fetching { url: url.clone() });
    let content = source
        .get_text(&url)
        .map_err(|e| DownloadError::Remote {
            pdb_id: pdb_id.to_string(),
            source: e,
        })?;

    let full_path = destination.join(format!("{}.pdb", pdb_id));
    reporter.report(Progress::Writing {
        path: full_path.clone(),
    });
    fs::write(&full_path, content).map_err(io_error(&full_path))?;

    let final_path = match request.chain_id {
        Some(chain_id) => extract_chain(pdb_id, chain_id, &full_path, &destination, reporter)?,
        None => full_path,
    };

    info!("PDB {} downloaded to {}", pdb_id, final_path.display());
    Ok(final_path)
}

fn extract_chain(
    pdb_id: &str,
    chain_id: char,
    full_path: &Path,
    destination: &Path,
    reporter: &ProgressReporter,
) -> Result<PathBuf, DownloadError> {
    reporter.report(Progress::ExtractingChain { chain_id });

    let structure = PdbFile::read_from_path(full_path).map_err(|e| DownloadError::Parse {
        path: full_path.to_path_buf(),
        source: e,
    })?;
    if structure.model_count() > 1 {
        warn!(
            "Multiple models found for {}, only the first model is taken.",
            pdb_id
        );
    }

    let chain = structure
        .first_model()
        .and_then(|model| model.chain(chain_id))
        .ok_or_else(|| DownloadError::ChainNotFound {
            pdb_id: pdb_id.to_string(),
            chain_id,
            path: full_path.to_path_buf(),
        })?;

    let chain_path = destination.join(format!("{}{}.pdb", pdb_id, chain_id));
    reporter.report(Progress::Writing {
        path: chain_path.clone(),
    });
    PdbFile::write_to_path(&Structure::from_chain(chain.clone()), &chain_path).map_err(|e| {
        match e {
            PdbError::Io(source) => DownloadError::Io {
                path: chain_path.clone(),
                source,
            },
            other => DownloadError::Parse {
                path: chain_path.clone(),
                source: other,
            },
        }
    })?;
    fs::remove_file(full_path).map_err(io_error(full_path))?;

    Ok(chain_path)
}
