use std::fmt;

use super::{StatsError, mode, value_counts};
use crate::models::TripTable;

/// Most popular stations and start/end route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub route: (String, String),
    pub route_trips: usize,
}

pub fn station_stats(table: &TripTable) -> Result<StationStats, StatsError> {
    let start_station = mode(table.iter().map(|t| t.start_station.as_str()))
        .ok_or(StatsError::NoData)?
        .to_string();
    let end_station = mode(table.iter().map(|t| t.end_station.as_str()))
        .ok_or(StatsError::NoData)?
        .to_string();

    // Pairs are grouped in lexicographic order; the first group with the top count wins
    let ((from, to), route_trips) = value_counts(
        table
            .iter()
            .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
    )
    .into_iter()
    .next()
    .ok_or(StatsError::NoData)?;

    Ok(StationStats {
        start_station,
        end_station,
        route: (from.to_string(), to.to_string()),
        route_trips,
    })
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The starting station most used is {}", self.start_station)?;
        writeln!(f, "The ending station most used is {}", self.end_station)?;
        write!(
            f,
            "The route most used is {} -> {} ({} trips)",
            self.route.0, self.route.1, self.route_trips
        )
    }
}
