use chrono::Weekday;
use std::fmt;

use super::{StatsError, mode};
use crate::models::filter::WEEKDAYS;
use crate::models::{TripTable, month_name, weekday_name};

/// Most frequent times of travel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

pub fn time_stats(table: &TripTable) -> Result<TimeStats, StatsError> {
    let month = mode(table.iter().map(|t| t.month)).ok_or(StatsError::NoData)?;
    let weekday = mode(table.iter().map(|t| t.weekday.num_days_from_monday()))
        .and_then(|d| WEEKDAYS.get(d as usize).copied())
        .ok_or(StatsError::NoData)?;
    let hour = mode(table.iter().map(|t| t.hour)).ok_or(StatsError::NoData)?;

    Ok(TimeStats {
        month,
        weekday,
        hour,
    })
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The month in which services were most used is {}",
            month_name(self.month)
        )?;
        writeln!(
            f,
            "The day of the week in which services were most used is {}",
            weekday_name(self.weekday)
        )?;
        write!(f, "The hour in which services were most used is {}", self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Trip, parse_timestamp};

    fn trip(start: &str) -> Trip {
        let ts = parse_timestamp(start).unwrap();
        Trip::new(0, ts, ts, "A", "B")
    }

    #[test]
    fn test_time_stats() {
        let table = TripTable::new(
            vec![
                trip("2017-03-06 08:00:00"),
                trip("2017-03-13 08:30:00"),
                trip("2017-01-04 17:00:00"),
            ],
            false,
            false,
        );
        let stats = time_stats(&table).unwrap();
        assert_eq!(stats.month, 3);
        assert_eq!(stats.weekday, Weekday::Mon);
        assert_eq!(stats.hour, 8);

        let text = stats.to_string();
        assert!(text.contains("most used is March"));
        assert!(text.contains("most used is Monday"));
    }

    #[test]
    fn test_time_stats_empty() {
        assert_eq!(time_stats(&TripTable::default()), Err(StatsError::NoData));
    }
}
