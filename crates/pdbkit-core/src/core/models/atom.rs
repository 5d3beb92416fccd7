use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The coordinate record an atom was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordType {
    /// Standard polymer atom (`ATOM`).
    #[default]
    Atom,
    /// Non-standard group or ligand atom (`HETATM`).
    Hetatm,
}

#[derive(Debug, Error)]
#[error("Invalid coordinate record type '{0}'")]
pub struct ParseRecordTypeError(pub String);

impl FromStr for RecordType {
    type Err = ParseRecordTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ATOM" => Ok(RecordType::Atom),
            "HETATM" => Ok(RecordType::Hetatm),
            other => Err(ParseRecordTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecordType::Atom => "ATOM",
                RecordType::Hetatm => "HETATM",
            }
        )
    }
}

/// A single ATOM/HETATM record of a PDB file.
///
/// Column-oriented fields are kept as they appeared in the file so that a
/// chain written back out lines up with the original.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Whether the atom came from an `ATOM` or `HETATM` record.
    pub record_type: RecordType,
    /// Atom serial number (columns 7-11).
    pub serial: usize,
    /// The raw, four-column atom name field (e.g. `" CA "`).
    pub name_field: String,
    /// Alternate location indicator, blank when absent.
    pub alt_loc: char,
    /// Residue name (e.g. `"ALA"`).
    pub residue_name: String,
    /// Chain identifier.
    pub chain_id: char,
    /// Residue sequence number.
    pub residue_number: isize,
    /// Residue insertion code, blank when absent.
    pub insertion_code: char,
    /// Orthogonal coordinates in Angstroms.
    pub position: Point3<f64>,
    pub occupancy: f64,
    pub temp_factor: f64,
    pub segment_id: String,
    pub element: String,
    pub charge: String,
}

impl Atom {
    /// Creates an `ATOM` record with blank optional columns.
    pub fn new(
        serial: usize,
        name: &str,
        residue_name: &str,
        chain_id: char,
        residue_number: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            record_type: RecordType::Atom,
            serial,
            name_field: format!(" {:<3}", name),
            alt_loc: ' ',
            residue_name: residue_name.to_string(),
            chain_id,
            residue_number,
            insertion_code: ' ',
            position,
            occupancy: 1.0,
            temp_factor: 0.0,
            segment_id: String::new(),
            element: String::new(),
            charge: String::new(),
        }
    }

    /// The atom name without column padding.
    pub fn name(&self) -> &str {
        self.name_field.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parses_known_records() {
        assert_eq!("ATOM".parse::<RecordType>().unwrap(), RecordType::Atom);
        assert_eq!("HETATM".parse::<RecordType>().unwrap(), RecordType::Hetatm);
        assert_eq!("ATOM  ".parse::<RecordType>().unwrap(), RecordType::Atom);
    }

    #[test]
    fn record_type_rejects_other_records() {
        assert!("ANISOU".parse::<RecordType>().is_err());
        assert!("".parse::<RecordType>().is_err());
    }

    #[test]
    fn record_type_display_matches_record_names() {
        assert_eq!(RecordType::Atom.to_string(), "ATOM");
        assert_eq!(RecordType::Hetatm.to_string(), "HETATM");
    }

    #[test]
    fn new_atom_pads_name_field_and_uses_defaults() {
        let atom = Atom::new(1, "CA", "GLY", 'A', 5, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.name_field, " CA ");
        assert_eq!(atom.name(), "CA");
        assert_eq!(atom.record_type, RecordType::Atom);
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.temp_factor, 0.0);
        assert_eq!(atom.alt_loc, ' ');
    }
}
