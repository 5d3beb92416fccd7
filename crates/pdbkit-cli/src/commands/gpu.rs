use crate::cli::GpuArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use pdbkit::core::devices::{self, NvidiaSmi};

pub fn run(args: GpuArgs, config: &AppConfig) -> Result<()> {
    let threshold = args.threshold.unwrap_or(config.idle_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(CliError::Argument(format!(
            "--threshold must be between 0 and 1, got {}",
            threshold
        )));
    }

    match devices::pick_idle_device(&NvidiaSmi, threshold)? {
        Some(index) => println!("{}", index),
        None => println!("None"),
    }
    Ok(())
}
