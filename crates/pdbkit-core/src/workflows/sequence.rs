use crate::core::io::fasta::{self, FastaError};
use crate::remote::client::HttpSource;
use crate::remote::error::RemoteError;
use crate::workflows::progress::{Progress, ProgressReporter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Number of superseded-identifier redirects followed before giving up.
pub const MAX_SUPERSEDED_HOPS: usize = 5;

const REMOVED_ENTRY_MARKER: &str = "<!DOCTYPE html";
const REPLACEMENT_MARKER: &str = "It has been replaced (superseded) by&nbsp<a href=\"/structure/";
const PDB_ID_LEN: usize = 4;

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("Cannot find sequence for PDB {pdb_id}: {source}")]
    Remote {
        pdb_id: String,
        #[source]
        source: RemoteError,
    },

    #[error("Invalid sequence feed for PDB {pdb_id}: {source}")]
    Feed {
        pdb_id: String,
        #[source]
        source: FastaError,
    },

    #[error("Chain {chain_id} not found in sequence feed for PDB {pdb_id}")]
    ChainNotFound { pdb_id: String, chain_id: String },

    #[error("PDB {pdb_id} was removed and no replacement entry is listed")]
    NoReplacement { pdb_id: String },

    #[error("Gave up after {hops} superseded redirects starting from PDB {pdb_id}")]
    TooManyRedirects { pdb_id: String, hops: usize },
}

/// Sequences fetched for a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceRecord {
    /// The sequence of the requested chain.
    Single(String),
    /// Every chain of the entry, keyed by chain id.
    Chains(BTreeMap<String, String>),
}

impl SequenceRecord {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(seq) => Some(seq),
            Self::Chains(_) => None,
        }
    }
}

/// Maps the "blank chain" placeholder `_` to chain `A`.
pub fn normalize_chain_id(chain_id: &str) -> &str {
    if chain_id == "_" { "A" } else { chain_id }
}

/// Reads the replacement identifier from a "removed entry" page.
pub fn find_replacement(page: &str) -> Option<String> {
    let (_, rest) = page.split_once(REPLACEMENT_MARKER)?;
    let id: String = rest.chars().take(PDB_ID_LEN).collect();
    (id.chars().count() == PDB_ID_LEN).then_some(id)
}

fn is_removed_entry(feed: &str) -> bool {
    feed.lines().any(|line| line.contains(REMOVED_ENTRY_MARKER))
}

/// Fetches the sequences of `pdb_id`, or of one chain when `chain_id` is given.
///
/// When the identifier has been removed from the database the feed comes back
/// as an HTML page; the replacement identifier is then read from the
/// "removed entry" page and the fetch restarts with it, at most
/// [`MAX_SUPERSEDED_HOPS`] times.
pub fn fetch_sequence(
    source: &impl HttpSource,
    pdb_id: &str,
    chain_id: Option<&str>,
) -> Result<SequenceRecord, SequenceError> {
    fetch_sequence_with_progress(source, pdb_id, chain_id, &ProgressReporter::new())
}

/// [`fetch_sequence`] with progress events.
#[instrument(skip(source, reporter), name = "sequence_workflow")]
pub fn fetch_sequence_with_progress(
    source: &impl HttpSource,
    pdb_id: &str,
    chain_id: Option<&str>,
    reporter: &ProgressReporter,
) -> Result<SequenceRecord, SequenceError> {
    let chain_id = chain_id.map(normalize_chain_id);
    let mut current_id = pdb_id.to_string();

    for hop in 0..=MAX_SUPERSEDED_HOPS {
        let url = source.config().sequence_url(&current_id);
        reporter.report(Progress::Fetching { url: url.clone() });
        let feed = source.get_text(&url).map_err(|e| SequenceError::Remote {
            pdb_id: current_id.clone(),
            source: e,
        })?;

        if !is_removed_entry(&feed) {
            return parse_feed(&feed, &current_id, chain_id);
        }
        if hop == MAX_SUPERSEDED_HOPS {
            break;
        }

        let replacement = resolve_replacement(source, &current_id, reporter)?;
        info!("PDB {} has been superseded by {}", current_id, replacement);
        reporter.report(Progress::Superseded {
            old_id: current_id,
            new_id: replacement.clone(),
        });
        current_id = replacement;
    }

    Err(SequenceError::TooManyRedirects {
        pdb_id: pdb_id.to_string(),
        hops: MAX_SUPERSEDED_HOPS,
    })
}

fn resolve_replacement(
    source: &impl HttpSource,
    pdb_id: &str,
    reporter: &ProgressReporter,
) -> Result<String, SequenceError> {
    let url = source.config().removed_url(pdb_id);
    debug!("PDB {} is no longer served, checking {}", pdb_id, url);
    reporter.report(Progress::Fetching { url: url.clone() });
    let page = source.get_text(&url).map_err(|e| SequenceError::Remote {
        pdb_id: pdb_id.to_string(),
        source: e,
    })?;
    find_replacement(&page).ok_or_else(|| SequenceError::NoReplacement {
        pdb_id: pdb_id.to_string(),
    })
}

fn parse_feed(
    feed: &str,
    pdb_id: &str,
    chain_id: Option<&str>,
) -> Result<SequenceRecord, SequenceError> {
    match chain_id {
        None => fasta::parse_all_chains(feed.lines())
            .map(SequenceRecord::Chains)
            .map_err(|e| SequenceError::Feed {
                pdb_id: pdb_id.to_string(),
                source: e,
            }),
        Some(chain_id) => fasta::parse_single_chain(feed.lines(), pdb_id, chain_id)
            .map(SequenceRecord::Single)
            .ok_or_else(|| SequenceError::ChainNotFound {
                pdb_id: pdb_id.to_string(),
                chain_id: chain_id.to_string(),
            }),
    }
}
