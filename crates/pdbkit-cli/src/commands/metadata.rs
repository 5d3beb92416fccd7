use crate::cli::{PhArgs, ResolutionArgs};
use crate::config::AppConfig;
use crate::error::Result;
use pdbkit::core::metadata;

pub fn run_ph(args: PhArgs, config: &AppConfig) -> Result<()> {
    let default = args.default_ph.unwrap_or(config.default_ph);
    println!("{}", metadata::read_ph(&args.file, default)?);
    Ok(())
}

pub fn run_resolution(args: ResolutionArgs) -> Result<()> {
    match metadata::read_resolution(&args.file)? {
        Some(resolution) => println!("{}", resolution),
        None => println!("None"),
    }
    Ok(())
}
