use chrono::TimeDelta;
use std::fmt;

use super::{StatsError, format_duration};
use crate::models::TripTable;

/// Total and mean travel time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationStats {
    pub total: TimeDelta,
    pub mean: TimeDelta,
    pub trips: usize,
}

pub fn trip_duration_stats(table: &TripTable) -> Result<DurationStats, StatsError> {
    if table.is_empty() {
        return Err(StatsError::NoData);
    }

    let trips = table.len();
    let total = table
        .iter()
        .map(|t| t.duration())
        .fold(TimeDelta::zero(), |acc, d| acc + d);

    let mean = match total.num_microseconds() {
        Some(us) => TimeDelta::microseconds(us / trips as i64),
        None => TimeDelta::seconds(total.num_seconds() / trips as i64),
    };

    Ok(DurationStats { total, mean, trips })
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total travel time is {}", format_duration(self.total))?;
        write!(f, "The average travel time is {}", format_duration(self.mean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Trip, parse_timestamp};

    fn trip(start: &str, end: &str) -> Trip {
        Trip::new(
            0,
            parse_timestamp(start).unwrap(),
            parse_timestamp(end).unwrap(),
            "A",
            "B",
        )
    }

    #[test]
    fn test_sum_and_mean() {
        let table = TripTable::new(
            vec![
                trip("2017-02-01 10:00:00", "2017-02-01 10:10:00"),
                trip("2017-02-01 11:00:00", "2017-02-01 11:20:00"),
            ],
            false,
            false,
        );
        let stats = trip_duration_stats(&table).unwrap();
        assert_eq!(stats.total, TimeDelta::minutes(30));
        assert_eq!(stats.mean, TimeDelta::minutes(15));
        assert_eq!(stats.trips, 2);

        let text = stats.to_string();
        assert!(text.contains("Total travel time is 0 days 00:30:00"));
        assert!(text.contains("The average travel time is 0 days 00:15:00"));
    }

    #[test]
    fn test_duration_empty() {
        assert_eq!(trip_duration_stats(&TripTable::default()), Err(StatsError::NoData));
    }
}
