use crate::cli::SequenceArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pdbkit::core::io::persist;
use pdbkit::remote::client::RcsbClient;
use pdbkit::workflows::progress::ProgressReporter;
use pdbkit::workflows::sequence::{self, SequenceRecord};
use std::path::Path;
use tracing::info;

pub fn run(args: SequenceArgs, config: &AppConfig) -> Result<()> {
    let client = RcsbClient::new(config.remote.clone())?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = sequence::fetch_sequence_with_progress(
        &client,
        &args.pdb_id,
        args.chain.as_deref(),
        &reporter,
    );
    progress_handler.clear();
    let record = result?;

    print!("{}", render(&record));

    if let Some(path) = &args.save {
        eprintln!("{}", save(&record, path)?);
    }
    Ok(())
}

/// Writes `record` with [`persist::dump`] and returns the notice naming its absolute location.
fn save(record: &SequenceRecord, path: &Path) -> Result<String> {
    let saved = persist::dump(record, path)?;
    info!("Sequence record written to {:?}", saved);
    Ok(format!("Saved to {}", saved.display()))
}

/// One sequence per line; all-chains records are prefixed with their chain id.
fn render(record: &SequenceRecord) -> String {
    match record {
        SequenceRecord::Single(seq) => format!("{}\n", seq),
        SequenceRecord::Chains(chains) => chains
            .iter()
            .map(|(chain, seq)| format!("{}\t{}\n", chain, seq))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn render_prints_chain_table() {
        let record = SequenceRecord::Chains(BTreeMap::from([
            ("B".to_string(), "GHV".to_string()),
            ("A".to_string(), "MKT".to_string()),
        ]));
        assert_eq!(render(&record), "A\tMKT\nB\tGHV\n");
    }

    #[test]
    fn save_notice_names_absolute_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1abc.bin");
        let record = SequenceRecord::Single("MKT".to_string());

        let notice = save(&record, &path).unwrap();

        let absolute = std::path::absolute(&path).unwrap();
        assert_eq!(notice, format!("Saved to {}", absolute.display()));
        let loaded: SequenceRecord = persist::load(&absolute).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn render_prints_single_sequence() {
        assert_eq!(render(&SequenceRecord::Single("MKT".to_string())), "MKT\n");
    }
}
