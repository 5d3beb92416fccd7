use crate::cli::DownloadArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pdbkit::remote::client::RcsbClient;
use pdbkit::workflows::download::{self, DownloadRequest};
use pdbkit::workflows::progress::ProgressReporter;
use tracing::info;

pub fn run(args: DownloadArgs, config: &AppConfig) -> Result<()> {
    let client = RcsbClient::new(config.remote.clone())?;

    let mut request = DownloadRequest::new(args.pdb_id);
    request.chain_id = args.chain;
    request.destination = args.destination;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the download workflow for {}...", request.pdb_id);
    match download::download_structure_with_progress(&client, &request, &reporter) {
        Ok(path) => {
            progress_handler.finish("✓ Download complete.");
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => {
            progress_handler.finish("✗ Download failed.");
            Err(e.into())
        }
    }
}
