pub mod duration;
pub mod station;
pub mod time;
pub mod users;

use chrono::TimeDelta;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::{self, Write};
use std::time::Instant;
use thiserror::Error;

use crate::models::TripTable;

pub use duration::{DurationStats, trip_duration_stats};
pub use station::{StationStats, station_stats};
pub use time::{TimeStats, time_stats};
pub use users::{BirthYearStats, UserStats, user_stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("No data available for the selected filters.")]
    NoData,
}

/// Most frequent value. Ties resolve to the smallest value.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Count of each distinct value, highest count first, ties by value
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut counts: Vec<(T, usize)> = counts.into_iter().collect();
    // Stable sort keeps the value order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Format as "D days HH:MM:SS", with microseconds when present
pub fn format_duration(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let delta = delta.abs();

    let days = delta.num_days();
    let secs = delta.num_seconds() - days * 86_400;
    let micros = (delta - TimeDelta::seconds(delta.num_seconds()))
        .num_microseconds()
        .unwrap_or(0);
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if micros > 0 {
        format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
    } else {
        format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Print one report block: heading, body or no-data notice, timing, separator
pub fn write_report<W, R, F>(out: &mut W, title: &str, compute: F) -> io::Result<()>
where
    W: Write,
    R: Display,
    F: FnOnce() -> Result<R, StatsError>,
{
    writeln!(out, "\n\nCalculating {}...\n", title)?;
    let started = Instant::now();

    match compute() {
        Ok(report) => writeln!(out, "{}", report)?,
        Err(e) => writeln!(out, "{}", e)?,
    }

    writeln!(out, "\n\nThis took {:.6} seconds.", started.elapsed().as_secs_f64())?;
    writeln!(out, "{}", "-".repeat(40))
}

/// Run the four reports in their fixed order
pub fn write_all_reports<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    write_report(out, "The Most Frequent Times of Travel", || time_stats(table))?;
    write_report(out, "The Most Popular Stations and Trip", || station_stats(table))?;
    write_report(out, "Trip Duration", || trip_duration_stats(table))?;
    write_report(out, "User Stats", || user_stats(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_single_value() {
        assert_eq!(mode(vec![7, 7, 7]), Some(7));
    }

    #[test]
    fn test_mode_tie_takes_smallest() {
        assert_eq!(mode(vec!["b", "a", "b", "a", "c"]), Some("a"));
        assert_eq!(mode(vec![3, 1, 3]), Some(3));
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts(vec!["Customer", "Subscriber", "Subscriber", "Dependent"]);
        assert_eq!(
            counts,
            vec![("Subscriber", 2), ("Customer", 1), ("Dependent", 1)]
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::minutes(30)), "0 days 00:30:00");
        assert_eq!(
            format_duration(TimeDelta::days(2) + TimeDelta::seconds(3661)),
            "2 days 01:01:01"
        );
        assert_eq!(
            format_duration(TimeDelta::milliseconds(1500)),
            "0 days 00:00:01.500000"
        );
        assert_eq!(format_duration(TimeDelta::minutes(-5)), "-0 days 00:05:00");
    }

    #[test]
    fn test_write_report_no_data() {
        let mut out = Vec::new();
        write_report(&mut out, "Nothing", || Err::<String, _>(StatsError::NoData)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Calculating Nothing..."));
        assert!(text.contains("No data available for the selected filters."));
        assert!(text.contains("This took"));
    }

    #[test]
    fn test_all_reports_on_empty_table() {
        let mut out = Vec::new();
        write_all_reports(&mut out, &TripTable::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("No data available").count(), 4);
    }
}
