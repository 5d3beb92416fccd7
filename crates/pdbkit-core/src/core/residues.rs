use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Marker substituted for residues that have no three-letter code.
pub const UNKNOWN_RESIDUE: &str = "UNK";

static THREE_TO_ONE: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
};

static ONE_TO_THREE: Map<char, &'static str> = phf_map! {
    'A' => "ALA", 'R' => "ARG", 'N' => "ASN", 'D' => "ASP", 'C' => "CYS",
    'Q' => "GLN", 'E' => "GLU", 'G' => "GLY", 'H' => "HIS", 'I' => "ILE",
    'L' => "LEU", 'K' => "LYS", 'M' => "MET", 'F' => "PHE", 'P' => "PRO",
    'S' => "SER", 'T' => "THR", 'W' => "TRP", 'Y' => "TYR", 'V' => "VAL",
};

#[derive(Debug, Error)]
pub enum ResidueError {
    #[error("No three-letter code is known for residue '{0}'")]
    UnknownOneLetter(char),
    #[error("No one-letter code is known for residue '{0}'")]
    UnknownThreeLetter(String),
    #[error("Invalid override entry '{key}' => '{value}': {reason}")]
    InvalidOverride {
        key: String,
        value: String,
        reason: &'static str,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Extra residue code pairs layered over the standard table for a single call.
///
/// The static tables are never modified; every translation builds its lookup
/// from the static entries first and these entries second, so an override
/// only affects the call it is passed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueOverrides {
    one_to_three: HashMap<char, String>,
    three_to_one: HashMap<String, char>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawOverrides {
    #[serde(rename = "one-to-three", default)]
    one_to_three: HashMap<String, String>,
    #[serde(rename = "three-to-one", default)]
    three_to_one: HashMap<String, String>,
}

impl ResidueOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a one-letter code to a three-letter code. Both sides are uppercased.
    pub fn with_one_letter(mut self, code: char, three_letter: &str) -> Self {
        self.one_to_three
            .insert(code.to_ascii_uppercase(), three_letter.to_ascii_uppercase());
        self
    }

    /// Maps a three-letter code to a one-letter code. Both sides are uppercased.
    pub fn with_three_letter(mut self, three_letter: &str, code: char) -> Self {
        self.three_to_one
            .insert(three_letter.to_ascii_uppercase(), code.to_ascii_uppercase());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.one_to_three.is_empty() && self.three_to_one.is_empty()
    }

    /// Parses a `KEY=VALUE` pair, deciding the direction from the key length.
    ///
    /// `X=SEC` maps one-letter `X` to `SEC`; `SEC=U` maps `SEC` to `U`.
    pub fn with_pair(self, pair: &str) -> Result<Self, ResidueError> {
        let (key, value) = pair.split_once('=').ok_or_else(|| ResidueError::InvalidOverride {
            key: pair.to_string(),
            value: String::new(),
            reason: "expected KEY=VALUE",
        })?;
        let (key, value) = (key.trim(), value.trim());
        let invalid = |reason| ResidueError::InvalidOverride {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };

        match (single_char(key), single_char(value)) {
            (Some(code), None) if !value.is_empty() => Ok(self.with_one_letter(code, value)),
            (None, Some(code)) if !key.is_empty() => Ok(self.with_three_letter(key, code)),
            _ => Err(invalid("exactly one side must be a single character")),
        }
    }

    /// Loads overrides from a TOML file with `[one-to-three]` and `[three-to-one]` tables.
    pub fn load(path: &Path) -> Result<Self, ResidueError> {
        let content = std::fs::read_to_string(path).map_err(|e| ResidueError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: RawOverrides = toml::from_str(&content).map_err(|e| ResidueError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut overrides = Self::new();
        for (key, value) in raw.one_to_three {
            let code = single_char(&key).ok_or_else(|| ResidueError::InvalidOverride {
                key: key.clone(),
                value: value.clone(),
                reason: "one-to-three keys must be a single character",
            })?;
            overrides = overrides.with_one_letter(code, &value);
        }
        for (key, value) in raw.three_to_one {
            let code = single_char(&value).ok_or_else(|| ResidueError::InvalidOverride {
                key: key.clone(),
                value: value.clone(),
                reason: "three-to-one values must be a single character",
            })?;
            overrides = overrides.with_three_letter(&key, code);
        }
        Ok(overrides)
    }

    /// Merges `other` on top of `self`; entries of `other` win.
    pub fn merged(mut self, other: ResidueOverrides) -> Self {
        self.one_to_three.extend(other.one_to_three);
        self.three_to_one.extend(other.three_to_one);
        self
    }

    fn three_letter_for(&self, code: char) -> Option<&str> {
        self.one_to_three.get(&code).map(String::as_str)
    }

    fn one_letter_for(&self, code: &str) -> Option<char> {
        self.three_to_one.get(code).copied()
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn lookup_three_letter(code: char, overrides: Option<&ResidueOverrides>) -> Option<String> {
    let code = code.to_ascii_uppercase();
    overrides
        .and_then(|o| o.three_letter_for(code))
        .map(str::to_string)
        .or_else(|| ONE_TO_THREE.get(&code).map(|s| s.to_string()))
}

fn lookup_one_letter(code: &str, overrides: Option<&ResidueOverrides>) -> Option<char> {
    let code = code.trim().to_ascii_uppercase();
    overrides
        .and_then(|o| o.one_letter_for(&code))
        .or_else(|| THREE_TO_ONE.get(code.as_str()).copied())
}

/// Result of [`decode`]: a lone residue or a decoded sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Residue(String),
    Sequence(Vec<String>),
}

/// Translates a single one-letter code, failing when it is not mapped.
pub fn decode_residue(
    code: char,
    overrides: Option<&ResidueOverrides>,
) -> Result<String, ResidueError> {
    lookup_three_letter(code, overrides)
        .ok_or_else(|| ResidueError::UnknownOneLetter(code.to_ascii_uppercase()))
}

/// Translates every residue of `seq`; unmapped residues become [`UNKNOWN_RESIDUE`].
pub fn decode_sequence(seq: &str, overrides: Option<&ResidueOverrides>) -> Vec<String> {
    seq.chars()
        .map(|c| lookup_three_letter(c, overrides).unwrap_or_else(|| UNKNOWN_RESIDUE.to_string()))
        .collect()
}

/// Decodes one-letter input: a single character is strict, longer input is lenient.
pub fn decode(seq: &str, overrides: Option<&ResidueOverrides>) -> Result<Decoded, ResidueError> {
    match single_char(seq) {
        Some(code) => decode_residue(code, overrides).map(Decoded::Residue),
        None => Ok(Decoded::Sequence(decode_sequence(seq, overrides))),
    }
}

/// Joins three-letter codes into a one-letter sequence. Any unmapped code fails the call.
pub fn encode<S: AsRef<str>>(
    codes: &[S],
    overrides: Option<&ResidueOverrides>,
) -> Result<String, ResidueError> {
    codes
        .iter()
        .map(|code| {
            let code = code.as_ref();
            lookup_one_letter(code, overrides)
                .ok_or_else(|| ResidueError::UnknownThreeLetter(code.trim().to_ascii_uppercase()))
        })
        .collect()
}

/// Iterates the standard one-letter codes.
pub fn standard_one_letter_codes() -> impl Iterator<Item = char> {
    ONE_TO_THREE.keys().copied()
}

/// Iterates the standard three-letter codes.
pub fn standard_three_letter_codes() -> impl Iterator<Item = &'static str> {
    THREE_TO_ONE.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn decode_then_encode_round_trips_every_one_letter_code() {
        for code in standard_one_letter_codes() {
            let three = decode_residue(code, None).unwrap();
            assert_eq!(encode(&[three], None).unwrap(), code.to_string());
        }
    }

    #[test]
    fn encode_then_decode_round_trips_every_three_letter_code() {
        for code in standard_three_letter_codes() {
            let one = encode(&[code], None).unwrap();
            assert_eq!(decode(&one, None).unwrap(), Decoded::Residue(code.to_string()));
        }
    }

    #[test]
    fn decode_residue_is_case_insensitive() {
        assert_eq!(decode_residue('w', None).unwrap(), "TRP");
    }

    #[test]
    fn decode_residue_fails_for_unmapped_code() {
        assert!(matches!(
            decode_residue('X', None),
            Err(ResidueError::UnknownOneLetter('X'))
        ));
        assert!(decode("x", None).is_err());
    }

    #[test]
    fn decode_sequence_substitutes_unknown_marker() {
        let decoded = decode_sequence("MXk", None);
        assert_eq!(decoded, vec!["MET", UNKNOWN_RESIDUE, "LYS"]);
    }

    #[test]
    fn decode_of_multi_char_input_never_fails() {
        let decoded = decode("AZB", None).unwrap();
        assert_eq!(
            decoded,
            Decoded::Sequence(vec![
                "ALA".to_string(),
                UNKNOWN_RESIDUE.to_string(),
                UNKNOWN_RESIDUE.to_string()
            ])
        );
    }

    #[test]
    fn decode_of_empty_input_is_an_empty_sequence() {
        assert_eq!(decode("", None).unwrap(), Decoded::Sequence(Vec::new()));
    }

    #[test]
    fn encode_uppercases_and_trims_codes() {
        assert_eq!(encode(&["met", " Lys ", "THR"], None).unwrap(), "MKT");
    }

    #[test]
    fn encode_fails_on_first_unmapped_code() {
        assert!(matches!(
            encode(&["ALA", "sec", "XYZ"], None),
            Err(ResidueError::UnknownThreeLetter(code)) if code == "SEC"
        ));
    }

    #[test]
    fn overrides_apply_only_to_the_call_they_are_passed_to() {
        let overrides = ResidueOverrides::new()
            .with_one_letter('U', "SEC")
            .with_three_letter("sec", 'u');

        assert_eq!(decode_residue('U', Some(&overrides)).unwrap(), "SEC");
        assert_eq!(encode(&["SEC"], Some(&overrides)).unwrap(), "U");

        assert!(decode_residue('U', None).is_err());
        assert!(encode(&["SEC"], None).is_err());
    }

    #[test]
    fn overrides_take_precedence_over_standard_entries() {
        let overrides = ResidueOverrides::new().with_one_letter('H', "HSE");
        assert_eq!(decode_sequence("AH", Some(&overrides)), vec!["ALA", "HSE"]);
        assert_eq!(decode_sequence("AH", None), vec!["ALA", "HIS"]);
    }

    #[test]
    fn with_pair_infers_direction_from_key_length() {
        let overrides = ResidueOverrides::new()
            .with_pair("O=PYL")
            .unwrap()
            .with_pair("PYL=O")
            .unwrap();
        assert_eq!(decode_residue('o', Some(&overrides)).unwrap(), "PYL");
        assert_eq!(encode(&["pyl"], Some(&overrides)).unwrap(), "O");
    }

    #[test]
    fn with_pair_rejects_malformed_entries() {
        assert!(ResidueOverrides::new().with_pair("ABC").is_err());
        assert!(ResidueOverrides::new().with_pair("AB=CD").is_err());
        assert!(ResidueOverrides::new().with_pair("A=B").is_err());
        assert!(ResidueOverrides::new().with_pair("A=").is_err());
    }

    #[test]
    fn load_reads_both_tables_from_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("overrides.toml");
        fs::write(
            &path,
            "[one-to-three]\nU = \"SEC\"\n\n[three-to-one]\nMSE = \"M\"\n",
        )
        .unwrap();

        let overrides = ResidueOverrides::load(&path).unwrap();
        assert_eq!(decode_residue('U', Some(&overrides)).unwrap(), "SEC");
        assert_eq!(encode(&["MSE", "ALA"], Some(&overrides)).unwrap(), "MA");
    }

    #[test]
    fn load_rejects_multi_character_one_letter_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("overrides.toml");
        fs::write(&path, "[one-to-three]\nUU = \"SEC\"\n").unwrap();

        let result = ResidueOverrides::load(&path);
        assert!(matches!(result, Err(ResidueError::InvalidOverride { .. })));
    }

    #[test]
    fn load_reports_missing_file_as_io_error() {
        let dir = tempdir().unwrap();
        let result = ResidueOverrides::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ResidueError::Io { .. })));
    }

    #[test]
    fn merged_prefers_later_entries() {
        let first = ResidueOverrides::new().with_one_letter('X', "UNL");
        let second = ResidueOverrides::new().with_one_letter('X', "XAA");
        let merged = first.merged(second);
        assert_eq!(decode_residue('X', Some(&merged)).unwrap(), "XAA");
    }
}
