use crate::cli::{DecodeArgs, EncodeArgs, OverrideArgs};
use crate::error::Result;
use pdbkit::core::residues::{self, Decoded, ResidueOverrides};
use tracing::debug;

/// Builds the call-scoped override table: file entries first, then `--override` pairs.
fn build_overrides(args: &OverrideArgs) -> Result<Option<ResidueOverrides>> {
    let mut overrides = match &args.overrides_file {
        Some(path) => {
            debug!("Loading residue overrides from {:?}", path);
            ResidueOverrides::load(path)?
        }
        None => ResidueOverrides::new(),
    };
    for pair in &args.overrides {
        overrides = overrides.with_pair(pair)?;
    }
    Ok((!overrides.is_empty()).then_some(overrides))
}

pub fn run_decode(args: DecodeArgs) -> Result<()> {
    let overrides = build_overrides(&args.overrides)?;
    match residues::decode(&args.sequence, overrides.as_ref())? {
        Decoded::Residue(code) => println!("{}", code),
        Decoded::Sequence(codes) => println!("{}", codes.join(" ")),
    }
    Ok(())
}

pub fn run_encode(args: EncodeArgs) -> Result<()> {
    let overrides = build_overrides(&args.overrides)?;
    println!("{}", residues::encode(args.codes.as_slice(), overrides.as_ref())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn no_overrides_yields_none() {
        assert!(build_overrides(&OverrideArgs::default()).unwrap().is_none());
    }

    #[test]
    fn command_line_pairs_win_over_file_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("overrides.toml");
        fs::write(&path, "[one-to-three]\nX = \"MSE\"\n").unwrap();
        let args = OverrideArgs {
            overrides: vec!["X=SEC".to_string()],
            overrides_file: Some(path),
        };

        let overrides = build_overrides(&args).unwrap().unwrap();
        assert_eq!(
            residues::decode_residue('X', Some(&overrides)).unwrap(),
            "SEC"
        );
    }

    #[test]
    fn malformed_pair_is_residue_error() {
        let args = OverrideArgs {
            overrides: vec!["nonsense".to_string()],
            overrides_file: None,
        };
        assert!(matches!(build_overrides(&args), Err(CliError::Residue(_))));
    }
}
