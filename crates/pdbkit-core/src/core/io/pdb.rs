use crate::core::io::traits::StructureFile;
use crate::core::models::atom::{Atom, RecordType};
use crate::core::models::structure::{Model, Structure};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::trace;

/// Shortest ATOM/HETATM line that still carries all three coordinates.
const MIN_ATOM_LINE_LEN: usize = 54;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("MODEL record without a serial number")]
    InvalidModelFormat,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> char {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .unwrap_or(' ')
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_optional_float(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    default: f64,
) -> Result<f64, PdbError> {
    if slice_and_trim(line, start, end).is_empty() {
        Ok(default)
    } else {
        parse_float(line, line_num, start, end)
    }
}

fn parse_atom_line(line: &str, line_num: usize, record_type: RecordType) -> Result<Atom, PdbError> {
    if line.len() < MIN_ATOM_LINE_LEN {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }

    let serial_str = slice_and_trim(line, 6, 11);
    let serial: usize = serial_str.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: "7-11".into(),
            value: serial_str.into(),
        },
    })?;
    let res_seq_str = slice_and_trim(line, 22, 26);
    let residue_number: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: "23-26".into(),
            value: res_seq_str.into(),
        },
    })?;

    let x = parse_float(line, line_num, 30, 38)?;
    let y = parse_float(line, line_num, 38, 46)?;
    let z = parse_float(line, line_num, 46, 54)?;

    Ok(Atom {
        record_type,
        serial,
        name_field: line.get(12..16).unwrap_or("").to_string(),
        alt_loc: column_char(line, 16),
        residue_name: slice_and_trim(line, 17, 20).to_string(),
        chain_id: column_char(line, 21),
        residue_number,
        insertion_code: column_char(line, 26),
        position: Point3::new(x, y, z),
        occupancy: parse_optional_float(line, line_num, 54, 60, 1.0)?,
        temp_factor: parse_optional_float(line, line_num, 60, 66, 0.0)?,
        segment_id: slice_and_trim(line, 72, 76).to_string(),
        element: slice_and_trim(line, 76, 78).to_string(),
        charge: slice_and_trim(line, 78, 80).to_string(),
    })
}

fn format_atom_line(atom: &Atom, serial: usize) -> String {
    format!(
        "{:<6}{:>5} {:<4}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}      {:<4}{:>2}{:>2}",
        atom.record_type.to_string(),
        serial,
        atom.name_field,
        atom.alt_loc,
        atom.residue_name,
        atom.chain_id,
        atom.residue_number,
        atom.insertion_code,
        atom.position.x,
        atom.position.y,
        atom.position.z,
        atom.occupancy,
        atom.temp_factor,
        atom.segment_id,
        atom.element,
        atom.charge
    )
}

fn format_ter_line(last: &Atom, serial: usize) -> String {
    format!(
        "TER   {:>5}      {:>3} {}{:>4}{}",
        serial, last.residue_name, last.chain_id, last.residue_number, last.insertion_code
    )
}

/// Reader and writer for the coordinate section of PDB files.
///
/// Only `MODEL`, `ENDMDL`, `ATOM` and `HETATM` records are interpreted; header
/// and connectivity records are skipped on read and not emitted on write.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut structure = Structure::new();
        let mut current: Option<Model> = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "MODEL" => {
                    if let Some(model) = current.take() {
                        structure.push_model(model);
                    }
                    let serial = line
                        .split_whitespace()
                        .nth(1)
                        .and_then(|s| s.parse().ok())
                        .ok_or(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::InvalidModelFormat,
                        })?;
                    current = Some(Model::new(Some(serial)));
                }
                "ENDMDL" => {
                    let model = current.take().ok_or_else(|| {
                        PdbError::Inconsistency(format!(
                            "ENDMDL on line {} without a matching MODEL",
                            line_num
                        ))
                    })?;
                    structure.push_model(model);
                }
                record @ ("ATOM" | "HETATM") => {
                    let record_type = record.parse::<RecordType>().map_err(|e| {
                        PdbError::Inconsistency(e.to_string())
                    })?;
                    let atom = parse_atom_line(&line, line_num, record_type)?;
                    current.get_or_insert_with(|| Model::new(None)).add_atom(atom);
                }
                "END" => break,
                other => trace!("Skipping '{}' record on line {}", other, line_num),
            }
        }

        if let Some(model) = current.take() {
            structure.push_model(model);
        }
        if structure.atom_count() == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok(structure)
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        let wrap_models = structure.model_count() > 1;

        for (index, model) in structure.models().iter().enumerate() {
            if wrap_models {
                writeln!(writer, "MODEL     {:>4}", model.serial.unwrap_or(index + 1))?;
            }

            let mut serial = 1;
            for chain in model.chains() {
                for atom in chain.atoms() {
                    writeln!(writer, "{}", format_atom_line(atom, serial))?;
                    serial += 1;
                }
                if let Some(last) = chain.atoms().last() {
                    writeln!(writer, "{}", format_ter_line(last, serial))?;
                    serial += 1;
                }
            }

            if wrap_models {
                writeln!(writer, "ENDMDL")?;
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}
