use std::process::Command;
use thiserror::Error;
use tracing::{debug, info};

/// Devices whose free fraction is below this value are considered busy.
pub const IDLE_THRESHOLD: f64 = 0.1;

const NVIDIA_SMI: &str = "nvidia-smi";
const NVIDIA_SMI_ARGS: [&str; 2] = ["--format=csv", "--query-gpu=memory.used,memory.free"];

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("'{command}' exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("Device query output is not valid UTF-8")]
    InvalidEncoding,
    #[error("CSV parsing error in device table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid memory value on row {row} (value: '{value}')")]
    InvalidValue { row: usize, value: String },
    #[error("Row {row} has {found} columns, expected 2")]
    ColumnCount { row: usize, found: usize },
}

/// Memory usage of one accelerator, in MiB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceMemory {
    pub used: f64,
    pub free: f64,
}

impl DeviceMemory {
    /// Free memory over total memory; zero for a device reporting no memory.
    pub fn free_fraction(&self) -> f64 {
        let total = self.used + self.free;
        if total > 0.0 { self.free / total } else { 0.0 }
    }
}

/// Source of the raw device memory table.
pub trait MemoryQuery {
    /// Returns CSV text with a header row and `used, free` columns per device.
    fn query(&self) -> Result<String, DeviceError>;
}

/// Queries NVIDIA GPUs through the `nvidia-smi` command.
#[derive(Debug, Clone, Default)]
pub struct NvidiaSmi;

impl MemoryQuery for NvidiaSmi {
    fn query(&self) -> Result<String, DeviceError> {
        debug!("Running {} {:?}", NVIDIA_SMI, NVIDIA_SMI_ARGS);
        let output = Command::new(NVIDIA_SMI)
            .args(NVIDIA_SMI_ARGS)
            .output()
            .map_err(|e| DeviceError::Spawn {
                command: NVIDIA_SMI.to_string(),
                source: e,
            })?;
        if !output.status.success() {
            return Err(DeviceError::CommandFailed {
                command: NVIDIA_SMI.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8(output.stdout).map_err(|_| DeviceError::InvalidEncoding)
    }
}

fn parse_mib(value: &str, row: usize) -> Result<f64, DeviceError> {
    value
        .trim()
        .trim_end_matches("MiB")
        .trim()
        .parse()
        .map_err(|_| DeviceError::InvalidValue {
            row,
            value: value.to_string(),
        })
}

/// Parses the `memory.used, memory.free` table printed by `nvidia-smi`.
pub fn parse_memory_table(table: &str) -> Result<Vec<DeviceMemory>, DeviceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(table.as_bytes());

    let mut devices = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != 2 {
            return Err(DeviceError::ColumnCount {
                row,
                found: record.len(),
            });
        }
        devices.push(DeviceMemory {
            used: parse_mib(&record[0], row)?,
            free: parse_mib(&record[1], row)?,
        });
    }
    Ok(devices)
}

/// Index of the device with the highest free fraction, unless even that
/// device is below `threshold`. Ties go to the lowest index.
pub fn select_idle_device(devices: &[DeviceMemory], threshold: f64) -> Option<usize> {
    let (index, best) = devices
        .iter()
        .map(DeviceMemory::free_fraction)
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, fraction)| match best {
            Some((_, top)) if top >= fraction => best,
            _ => Some((i, fraction)),
        })?;

    (best >= threshold).then_some(index)
}

/// Queries device memory and returns the most idle device, if any is idle enough.
pub fn pick_idle_device(
    query: &impl MemoryQuery,
    threshold: f64,
) -> Result<Option<usize>, DeviceError> {
    let devices = parse_memory_table(&query.query()?)?;
    let picked = select_idle_device(&devices, threshold);
    match picked {
        Some(index) => info!(
            "Device {} selected ({:.1}% free)",
            index,
            devices[index].free_fraction() * 100.0
        ),
        None => info!(
            "No idle device among {} (threshold {:.0}%)",
            devices.len(),
            threshold * 100.0
        ),
    }
    Ok(picked)
}
