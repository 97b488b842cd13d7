//! Reads the collector's results table.
//!
//! Expected header (column order is free):
//! `benchmark,kind,profile,scenario,frontend,backend,linker,borrowck,typeck,metadata`
//!
//! An empty duration cell means the phase was not measured for that run. It
//! is read as NaN so the gap stays in that one field instead of failing the
//! whole table.

use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Phase, PhaseValues, Profile, Record, Scenario, TargetKind};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("line {line}: {source}")]
    Decode {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("line {line}: {phase} duration must be a finite non-negative number, got {value}")]
    InvalidDuration { line: u64, phase: Phase, value: f64 },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    benchmark: String,
    kind: TargetKind,
    profile: Profile,
    scenario: Scenario,
    frontend: Option<f64>,
    backend: Option<f64>,
    linker: Option<f64>,
    borrowck: Option<f64>,
    typeck: Option<f64>,
    metadata: Option<f64>,
}

impl CsvRow {
    fn into_record(self, line: u64) -> Result<Record, LoadError> {
        let missing = |v: Option<f64>| v.unwrap_or(f64::NAN);
        let durations = PhaseValues {
            frontend: missing(self.frontend),
            backend: missing(self.backend),
            linker: missing(self.linker),
            borrowck: missing(self.borrowck),
            typeck: missing(self.typeck),
            metadata: missing(self.metadata),
        };
        if let Some((phase, value)) = durations
            .iter()
            .find(|(_, v)| v.is_infinite() || *v < 0.0)
        {
            return Err(LoadError::InvalidDuration { line, phase, value });
        }
        let gaps = durations.iter().filter(|(_, v)| v.is_nan()).count();
        if gaps > 0 {
            tracing::debug!(line, gaps, "row has unmeasured phases");
        }
        Ok(Record {
            benchmark: self.benchmark,
            profile: self.profile,
            scenario: self.scenario,
            kind: self.kind,
            durations,
        })
    }
}

/// Load every record from a CSV file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>, LoadError> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let records = read_from(reader)?;
    tracing::debug!(path = %path.display(), count = records.len(), "loaded results");
    Ok(records)
}

/// Read records from any CSV source with a header row.
pub fn read_records(input: impl io::Read) -> Result<Vec<Record>, LoadError> {
    read_from(csv::Reader::from_reader(input))
}

fn read_from<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>, LoadError> {
    let headers = reader
        .headers()
        .map_err(|source| LoadError::Decode { line: 1, source })?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| LoadError::Decode {
            line: source.position().map_or(0, csv::Position::line),
            source,
        })?;
        let line = row.position().map_or(0, csv::Position::line);
        let parsed: CsvRow = row
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::Decode { line, source })?;
        records.push(parsed.into_record(line)?);
    }
    Ok(records)
}
