use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike, Weekday};
use serde::Deserialize;

use super::filter::{DayFilter, MonthFilter};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a trip timestamp such as "2017-06-23 15:09:32"
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Raw CSV row as found in the city extracts
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type")]
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender")]
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year")]
    #[serde(default)]
    pub birth_year: Option<f64>,
}

/// One bicycle trip with its derived time-part fields
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Position in the loaded table before filtering
    pub row_id: usize,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

impl Trip {
    pub fn new(
        row_id: usize,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Self {
            row_id,
            start_time,
            end_time,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    /// Travel time from start to end
    pub fn duration(&self) -> TimeDelta {
        self.end_time.signed_duration_since(self.start_time)
    }
}

/// In-memory trip table for one session iteration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripTable {
    pub trips: Vec<Trip>,
    /// At least one loaded source carries a gender column
    pub has_gender: bool,
    /// At least one loaded source carries a birth-year column
    pub has_birth_year: bool,
}

impl TripTable {
    pub fn new(trips: Vec<Trip>, has_gender: bool, has_birth_year: bool) -> Self {
        Self {
            trips,
            has_gender,
            has_birth_year,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    /// Keep only trips matching both filters, preserving order
    pub fn filter(mut self, month: MonthFilter, day: DayFilter) -> Self {
        self.trips
            .retain(|t| month.matches(t.month) && day.matches(t.weekday));
        self
    }

    /// Rows in `[offset, offset + count)`, clamped to the table
    pub fn rows(&self, offset: usize, count: usize) -> &[Trip] {
        let start = offset.min(self.trips.len());
        let end = offset.saturating_add(count).min(self.trips.len());
        &self.trips[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filter::Month;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2017-01-01 09:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 09:07:57.0").is_some());
        assert!(parse_timestamp("2017-01-01T09:07:57").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_derived_fields() {
        let trip = Trip::new(0, ts("2017-03-15 17:30:00"), ts("2017-03-15 17:45:00"), "A", "B");
        assert_eq!(trip.month, 3);
        assert_eq!(trip.weekday, Weekday::Wed);
        assert_eq!(trip.hour, 17);
        assert_eq!(trip.duration(), TimeDelta::minutes(15));
    }

    #[test]
    fn test_filter_preserves_order() {
        let trips = vec![
            Trip::new(0, ts("2017-03-01 08:00:00"), ts("2017-03-01 08:10:00"), "A", "B"),
            Trip::new(1, ts("2017-01-02 08:00:00"), ts("2017-01-02 08:10:00"), "A", "B"),
            Trip::new(2, ts("2017-03-02 08:00:00"), ts("2017-03-02 08:10:00"), "C", "D"),
        ];
        let table = TripTable::new(trips, false, false)
            .filter(MonthFilter::Only(Month::March), DayFilter::All);
        let ids: Vec<usize> = table.iter().map(|t| t.row_id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_rows_clamped() {
        let trips = (0..7)
            .map(|i| Trip::new(i, ts("2017-03-01 08:00:00"), ts("2017-03-01 08:10:00"), "A", "B"))
            .collect();
        let table = TripTable::new(trips, false, false);
        assert_eq!(table.rows(0, 5).len(), 5);
        assert_eq!(table.rows(5, 5).len(), 2);
        assert!(table.rows(10, 5).is_empty());
        assert!(table.rows(usize::MAX, 5).is_empty());
    }
}
