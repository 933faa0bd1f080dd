use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::LoadError;
use crate::config::Config;
use crate::models::{CitySelection, FilterSelection, RawTrip, Trip, TripTable, parse_timestamp};

const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "End Time",
    "Start Station",
    "End Station",
    "User Type",
];

const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";

/// Load the trips for a selection and apply its month and day filters
pub fn load_trips(config: &Config, selection: &FilterSelection) -> Result<TripTable, LoadError> {
    let sources = resolve_sources(config, &selection.city)?;

    let mut table = TripTable::default();
    for path in &sources {
        read_source(path, &mut table)?;
    }
    let loaded = table.len();

    let table = table.filter(selection.month, selection.day);
    info!(
        "{}: loaded {} trips from {} file(s), {} after filtering",
        selection,
        loaded,
        sources.len(),
        table.len()
    );

    Ok(table)
}

/// Files backing a city selection, in concatenation order
pub fn resolve_sources(config: &Config, city: &CitySelection) -> Result<Vec<PathBuf>, LoadError> {
    match city {
        CitySelection::Named(name) => {
            let path = config
                .source_path(name)
                .ok_or_else(|| LoadError::UnknownCity(name.clone()))?;
            if !path.is_file() {
                return Err(LoadError::MissingSource {
                    city: name.clone(),
                    path,
                });
            }
            Ok(vec![path])
        }
        CitySelection::All => discover_sources(&config.data_dir),
    }
}

/// Every `*.csv` in `dir`, sorted by path
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let pattern = dir.join("*.csv");
    let pattern_str = pattern.to_string_lossy();

    let mut paths: Vec<PathBuf> = glob(&pattern_str)
        .map_err(|e| LoadError::Scan {
            pattern: pattern_str.to_string(),
            message: e.to_string(),
        })?
        .flatten()
        .filter(|p| p.is_file())
        .collect();

    if paths.is_empty() {
        return Err(LoadError::NoSources(dir.to_path_buf()));
    }

    paths.sort();
    debug!("discovered {} source file(s) in {:?}", paths.len(), dir);
    Ok(paths)
}

/// Append the rows of one CSV file to `table`
fn read_source(path: &Path, table: &mut TripTable) -> Result<(), LoadError> {
    debug!("reading {:?}", path);
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);

    for column in REQUIRED_COLUMNS {
        if !has_column(column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    table.has_gender |= has_column(GENDER_COLUMN);
    table.has_birth_year |= has_column(BIRTH_YEAR_COLUMN);

    for (index, result) in reader.deserialize::<RawTrip>().enumerate() {
        let raw = result.map_err(csv_err)?;
        // Header is line 1
        let trip = convert_row(raw, table.len(), path, index + 2)?;
        table.trips.push(trip);
    }

    Ok(())
}

fn convert_row(raw: RawTrip, row_id: usize, path: &Path, line: usize) -> Result<Trip, LoadError> {
    let timestamp = |value: &str, column: &'static str| {
        parse_timestamp(value).ok_or_else(|| LoadError::BadTimestamp {
            path: path.to_path_buf(),
            row: line,
            column,
            value: value.to_string(),
        })
    };

    let start_time = timestamp(&raw.start_time, "Start Time")?;
    let end_time = timestamp(&raw.end_time, "End Time")?;

    let mut trip = Trip::new(row_id, start_time, end_time, raw.start_station, raw.end_station);
    trip.user_type = raw.user_type.filter(|s| !s.is_empty());
    trip.gender = raw.gender.filter(|s| !s.is_empty());
    trip.birth_year = raw
        .birth_year
        .filter(|y| y.is_finite())
        .map(|y| y.trunc() as i32);

    Ok(trip)
}
