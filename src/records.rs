use crate::core::VehicleRecord;
use crate::tax::LiveZoneData;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("no input received, provide a file or pipe data to stdin")]
    EmptyInput,
    #[error("unsupported input format '{0}', expected .csv or .json")]
    UnsupportedFormat(String),
    #[error("invalid vehicle on row {row}: {source}")]
    InvalidRow { row: usize, source: csv::Error },
    #[error("invalid vehicle JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Input root for vehicle JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VehicleBatch {
    pub vehicles: Vec<VehicleEntry>,
}

/// A vehicle plus any live zone results already fetched for it
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VehicleEntry {
    #[serde(flatten)]
    pub vehicle: VehicleRecord,
    /// Live ULEZ / CAZ results; schemes left out are estimated
    #[serde(default)]
    pub live: LiveZoneData,
}

impl From<VehicleRecord> for VehicleEntry {
    fn from(vehicle: VehicleRecord) -> Self {
        VehicleEntry {
            vehicle,
            live: LiveZoneData::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
}

/// Read vehicles from a CSV or JSON file, or stdin with "-"
pub fn read_vehicles(path: &Path) -> Result<Vec<VehicleEntry>, RecordError> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        let format = sniff_format(&buffer)?;
        return read_format(format, buffer.as_slice());
    }

    let format = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Format::Csv,
        Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
        other => {
            return Err(RecordError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            ))
        }
    };
    let reader = BufReader::new(File::open(path)?);
    read_format(format, reader)
}

fn sniff_format(buffer: &[u8]) -> Result<Format, RecordError> {
    match buffer.iter().find(|b| !b.is_ascii_whitespace()) {
        None => Err(RecordError::EmptyInput),
        Some(b'{') => Ok(Format::Json),
        Some(_) => Ok(Format::Csv),
    }
}

fn read_format<R: Read>(format: Format, reader: R) -> Result<Vec<VehicleEntry>, RecordError> {
    let vehicles = match format {
        Format::Csv => read_csv(reader)?
            .into_iter()
            .map(VehicleEntry::from)
            .collect(),
        Format::Json => read_json(reader)?,
    };
    log::info!("Read {} vehicle(s)", vehicles.len());
    Ok(vehicles)
}

/// Read vehicles from CSV with a header row. Empty cells are treated as missing.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<VehicleRecord>, RecordError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    rdr.deserialize::<VehicleRecord>()
        .enumerate()
        // row 1 is the header
        .map(|(i, record)| record.map_err(|source| RecordError::InvalidRow { row: i + 2, source }))
        .collect()
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<VehicleEntry>, RecordError> {
    let batch: VehicleBatch = serde_json::from_reader(reader)?;
    Ok(batch.vehicles)
}
