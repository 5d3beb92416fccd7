use crate::error::Result;
use std::fs::{self, File};
use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::{Layer, filter::LevelFilter, fmt, prelude::*, registry::LookupSpan};

/// Maps `-v` repetitions and `--quiet` to the console level filter.
///
/// Errors are always shown, even with `--quiet`.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbosity) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

fn create_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

/// Plain-text layer for `--log-file`, carrying targets and thread ids.
fn file_layer<S>(file: File) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .boxed()
}

/// Installs the global subscriber: a compact stderr layer filtered by
/// verbosity, plus a file layer when `log_file` is given.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(level_filter(verbosity, quiet));

    let file = log_file.map(create_log_file).transpose()?;

    tracing_subscriber::registry()
        .with(console)
        .with(file.map(file_layer))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serial_test::serial;
    use tracing::{debug, info, warn};

    #[test]
    fn verbosity_maps_to_level_filters() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::ERROR);
    }

    #[test]
    #[serial]
    fn file_layer_records_workflow_events() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("logs/pdbkit.log");

        let file = create_log_file(&log_path).unwrap();
        let subscriber = tracing_subscriber::registry().with(file_layer(file));
        tracing::subscriber::with_default(subscriber, || {
            info!("PDB {} downloaded to {}", "1ABC", "/tmp/1ABC.pdb");
            warn!("Multiple models found for {}, only the first model is taken.", "2NMR");
            debug!("Sending request to {}", "https://files.rcsb.org/download/1ABC.pdb");
        });

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("PDB 1ABC downloaded to /tmp/1ABC.pdb"));
        assert!(content.contains("WARN"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn log_file_in_missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/run.log");

        create_log_file(&nested).unwrap();
        assert!(nested.exists());
    }

    #[test]
    #[serial]
    fn directory_as_log_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = create_log_file(dir.path());
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
