//! Dataset loading service
//!
//! Reads the Ergast CSV export (latin-1, `\N` for missing values), joins
//! results with drivers and races and hands back an immutable [`Dataset`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv_async::AsyncReaderBuilder;
use futures::executor::block_on;
use futures::StreamExt;
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, CsvResultExt, IoResultExt};
use crate::domain::{Dataset, RaceResult};
use crate::infrastructure::traits::FileSystem;

pub const RESULTS_FILE: &str = "results.csv";
pub const DRIVERS_FILE: &str = "drivers.csv";
pub const RACES_FILE: &str = "races.csv";

/// Marker the export uses for missing values.
const MISSING: &str = "\\N";

/// Decoded CSV file: header names and string cells.
#[derive(Debug, Clone)]
struct CsvTable {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    fn column(&self, name: &str) -> ApplicationResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ApplicationError::InvalidDataset {
                path: self.path.clone(),
                message: format!("missing column '{name}'"),
            })
    }
}

fn cell(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != MISSING)
}

/// Numeric cell; missing, unparsable or non-finite values count as 0.
fn number(row: &[String], idx: usize) -> f64 {
    cell(row, idx)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn id(row: &[String], idx: usize) -> Option<i64> {
    cell(row, idx).and_then(|s| s.parse().ok())
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn parse_csv(bytes: &[u8]) -> Result<(Vec<String>, Vec<Vec<String>>), csv_async::Error> {
    block_on(async {
        let mut reader = AsyncReaderBuilder::new()
            .flexible(true)
            .create_reader(bytes);
        let headers: Vec<String> = reader
            .byte_headers()
            .await?
            .iter()
            .map(decode_latin1)
            .collect();

        let mut rows = Vec::new();
        let mut records = reader.byte_records();
        while let Some(record) = records.next().await {
            rows.push(record?.iter().map(decode_latin1).collect());
        }
        Ok((headers, rows))
    })
}

/// Service for loading the F1 dataset from a directory.
pub struct DatasetService {
    fs: Arc<dyn FileSystem>,
}

impl DatasetService {
    /// Create a new dataset service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and join the three CSV files in `data_dir`.
    ///
    /// Results whose driver or race is unknown are dropped.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, data_dir: &Path) -> ApplicationResult<Dataset> {
        if !self.fs.is_dir(data_dir) {
            return Err(ApplicationError::DatasetNotFound(data_dir.to_path_buf()));
        }

        let drivers = self.read_drivers(&data_dir.join(DRIVERS_FILE))?;
        let races = self.read_races(&data_dir.join(RACES_FILE))?;
        let results = self.read_table(&data_dir.join(RESULTS_FILE))?;

        let race_col = results.column("raceId")?;
        let driver_col = results.column("driverId")?;
        let grid_col = results.column("grid")?;
        let position_col = results.column("positionOrder")?;
        let points_col = results.column("points")?;

        let mut joined = Vec::with_capacity(results.rows.len());
        let mut dropped = 0usize;
        for row in &results.rows {
            let (Some(race_id), Some(driver_id)) = (id(row, race_col), id(row, driver_col)) else {
                dropped += 1;
                continue;
            };
            let (Some(driver_name), Some((year, race_name))) =
                (drivers.get(&driver_id), races.get(&race_id))
            else {
                dropped += 1;
                continue;
            };
            joined.push(RaceResult {
                race_id,
                driver_id,
                driver_name: driver_name.clone(),
                year: *year,
                race_name: race_name.clone(),
                grid: number(row, grid_col),
                position_order: number(row, position_col).max(0.0) as u32,
                points: number(row, points_col).max(0.0),
            });
        }
        if dropped > 0 {
            warn!("dropped {dropped} results without matching driver or race");
        }
        debug!("load: joined {} results", joined.len());

        Ok(Dataset::new(joined))
    }

    /// driverId -> `forename surname`
    fn read_drivers(&self, path: &Path) -> ApplicationResult<HashMap<i64, String>> {
        let table = self.read_table(path)?;
        let id_col = table.column("driverId")?;
        let forename_col = table.column("forename")?;
        let surname_col = table.column("surname")?;

        Ok(table
            .rows
            .iter()
            .filter_map(|row| {
                let driver_id = id(row, id_col)?;
                let forename = cell(row, forename_col).unwrap_or_default();
                let surname = cell(row, surname_col).unwrap_or_default();
                let name = format!("{forename} {surname}").trim().to_string();
                (!name.is_empty()).then_some((driver_id, name))
            })
            .collect())
    }

    /// raceId -> (year, grand prix name)
    fn read_races(&self, path: &Path) -> ApplicationResult<HashMap<i64, (i32, String)>> {
        let table = self.read_table(path)?;
        let id_col = table.column("raceId")?;
        let year_col = table.column("year")?;
        let name_col = table.column("name")?;

        Ok(table
            .rows
            .iter()
            .filter_map(|row| {
                let race_id = id(row, id_col)?;
                let year = cell(row, year_col)?.parse().ok()?;
                let name = cell(row, name_col).unwrap_or_default().to_string();
                Some((race_id, (year, name)))
            })
            .collect())
    }

    fn read_table(&self, path: &Path) -> ApplicationResult<CsvTable> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::DatasetNotFound(path.to_path_buf()));
        }
        let bytes = self.fs.read(path).with_path_context("read dataset file", path)?;
        let (headers, rows) = parse_csv(&bytes).in_dataset_file(path)?;
        debug!("read_table: {} rows from {}", rows.len(), path.display());
        Ok(CsvTable {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }
}
