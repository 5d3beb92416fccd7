mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("pdbkit CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let app_config = config::load(cli.config.as_deref(), &cli.set_values)?;
    debug!("Effective configuration: {:?}", &app_config);

    let command_result = match cli.command {
        Commands::Download(args) => {
            info!("Dispatching to 'download' command.");
            commands::download::run(args, &app_config)
        }
        Commands::Sequence(args) => {
            info!("Dispatching to 'sequence' command.");
            commands::sequence::run(args, &app_config)
        }
        Commands::Decode(args) => commands::residues::run_decode(args),
        Commands::Encode(args) => commands::residues::run_encode(args),
        Commands::Ph(args) => commands::metadata::run_ph(args, &app_config),
        Commands::Resolution(args) => commands::metadata::run_resolution(args),
        Commands::Gpu(args) => {
            info!("Dispatching to 'gpu' command.");
            commands::gpu::run(args, &app_config)
        }
        Commands::Config(args) => {
            commands::config::run(args, cli.config.as_deref(), &app_config)
        }
    };

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }

    command_result
}
