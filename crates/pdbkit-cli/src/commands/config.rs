use crate::cli::{ConfigArgs, ConfigCommands};
use crate::config::{self, AppConfig};
use crate::error::Result;
use std::path::Path;

pub fn run(args: ConfigArgs, explicit_path: Option<&Path>, effective: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            let path = match explicit_path {
                Some(path) => path.to_path_buf(),
                None => config::default_config_path()?,
            };
            let status = if path.exists() { "" } else { " (not found, using defaults)" };
            println!("{}{}", path.display(), status);
        }
        ConfigCommands::Show => {
            print!("{}", effective.to_toml()?);
        }
    }
    Ok(())
}
