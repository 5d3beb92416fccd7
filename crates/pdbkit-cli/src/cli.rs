use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "pdbkit - Command-line utilities for Protein Data Bank entries: downloads, sequences, residue codes and header metadata.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the OS-specific configuration directory.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S remote.timeout-secs=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a structure file, optionally keeping a single chain.
    Download(DownloadArgs),
    /// Fetch the sequence of one chain, or of all chains, of an entry.
    Sequence(SequenceArgs),
    /// Translate one-letter residue codes to three-letter codes.
    Decode(DecodeArgs),
    /// Translate three-letter residue codes to a one-letter sequence.
    Encode(EncodeArgs),
    /// Extract the crystallization pH from a PDB file header.
    Ph(PhArgs),
    /// Extract the resolution from a PDB file header.
    Resolution(ResolutionArgs),
    /// Print the index of the most idle GPU.
    Gpu(GpuArgs),
    /// Inspect the configuration used by pdbkit.
    Config(ConfigArgs),
}

/// Arguments for the `download` subcommand.
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Identifier of the entry (e.g., 1ABC).
    #[arg(required = true, value_name = "ID")]
    pub pdb_id: String,

    /// Keep only this chain of the first model.
    #[arg(long, value_name = "CHAIN")]
    pub chain: Option<char>,

    /// Directory to write the structure file into.
    /// Defaults to the current directory.
    #[arg(short, long = "dest", value_name = "DIR")]
    pub destination: Option<PathBuf>,
}

/// Arguments for the `sequence` subcommand.
#[derive(Args, Debug)]
pub struct SequenceArgs {
    /// Identifier of the entry (e.g., 1ABC).
    #[arg(required = true, value_name = "ID")]
    pub pdb_id: String,

    /// Only fetch this chain. `_` stands for chain A.
    #[arg(long, value_name = "CHAIN")]
    pub chain: Option<String>,

    /// Save the fetched sequences to a binary file.
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,
}

/// Residue override options shared by `decode` and `encode`.
#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    /// Add a residue mapping for this call, e.g. `X=MSE` or `MSE=M`.
    /// Can be used multiple times.
    #[arg(long = "override", value_name = "K=V")]
    pub overrides: Vec<String>,

    /// Load residue mappings from a TOML file with
    /// `[one-to-three]` and `[three-to-one]` tables.
    #[arg(long, value_name = "PATH")]
    pub overrides_file: Option<PathBuf>,
}

/// Arguments for the `decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// One-letter code or sequence (e.g., MKT).
    #[arg(required = true, value_name = "SEQ")]
    pub sequence: String,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the `encode` subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Three-letter residue codes (e.g., MET LYS THR).
    #[arg(required = true, num_args(1..), value_name = "CODE")]
    pub codes: Vec<String>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the `ph` subcommand.
#[derive(Args, Debug)]
pub struct PhArgs {
    /// Path to a PDB file.
    #[arg(required = true, value_name = "FILE")]
    pub file: PathBuf,

    /// Value reported when the header carries no pH.
    /// Overrides `metadata.default-ph` from the config file.
    #[arg(long = "default", value_name = "FLOAT")]
    pub default_ph: Option<f64>,
}

/// Arguments for the `resolution` subcommand.
#[derive(Args, Debug)]
pub struct ResolutionArgs {
    /// Path to a PDB file.
    #[arg(required = true, value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the `gpu` subcommand.
#[derive(Args, Debug)]
pub struct GpuArgs {
    /// Minimum free memory fraction for a device to count as idle.
    /// Overrides `device.idle-threshold` from the config file.
    #[arg(long, value_name = "FLOAT")]
    pub threshold: Option<f64>,
}

/// Arguments for the `config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Available commands for configuration inspection.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the path of the configuration file in use.
    Path,
    /// Show the effective configuration after merging file values and defaults.
    Show,
}
