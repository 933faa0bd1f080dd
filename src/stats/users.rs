use std::fmt;

use super::{StatsError, mode, value_counts};
use crate::models::TripTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// User demographics. Missing gender or birth-year data is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub gender: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYearStats>,
}

pub fn user_stats(table: &TripTable) -> Result<UserStats, StatsError> {
    if table.is_empty() {
        return Err(StatsError::NoData);
    }

    let user_types = owned(value_counts(
        table.iter().filter_map(|t| t.user_type.as_deref()),
    ));

    let gender = if table.has_gender {
        let counts = owned(value_counts(table.iter().filter_map(|t| t.gender.as_deref())));
        (!counts.is_empty()).then_some(counts)
    } else {
        None
    };

    let birth_years = if table.has_birth_year {
        birth_year_stats(table)
    } else {
        None
    };

    Ok(UserStats {
        user_types,
        gender,
        birth_years,
    })
}

fn birth_year_stats(table: &TripTable) -> Option<BirthYearStats> {
    let years = || table.iter().filter_map(|t| t.birth_year);
    Some(BirthYearStats {
        earliest: years().min()?,
        most_recent: years().max()?,
        most_common: mode(years())?,
    })
}

fn owned(counts: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Count of different types of users:")?;
        for (user_type, count) in &self.user_types {
            writeln!(f, "  {:<12} {}", user_type, count)?;
        }

        match &self.gender {
            Some(counts) => {
                writeln!(f, "\nCount of users by gender:")?;
                for (gender, count) in counts {
                    writeln!(f, "  {:<12} {}", gender, count)?;
                }
            }
            None => writeln!(f, "\nThere's no data on user gender. Sorry.")?,
        }

        match &self.birth_years {
            Some(years) => {
                writeln!(f, "\nEarliest year of birth: {}", years.earliest)?;
                writeln!(f, "Most recent year of birth: {}", years.most_recent)?;
                write!(f, "Most common year of birth: {}", years.most_common)
            }
            None => write!(f, "\nThere's no data on user's year of birth. Sorry."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Trip, parse_timestamp};

    fn trip(user_type: &str) -> Trip {
        let ts = parse_timestamp("2017-04-01 12:00:00").unwrap();
        Trip::new(0, ts, ts, "A", "B").with_user_type(user_type)
    }

    #[test]
    fn test_user_stats_with_demographics() {
        let trips = vec![
            trip("Subscriber").with_gender("Male").with_birth_year(1989),
            trip("Subscriber").with_gender("Female").with_birth_year(1975),
            trip("Customer").with_gender("Male").with_birth_year(1989),
            trip("Subscriber").with_birth_year(2001),
            trip("Customer"),
        ];
        let stats = user_stats(&TripTable::new(trips, true, true)).unwrap();

        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 3), ("Customer".to_string(), 2)]
        );
        assert_eq!(
            stats.gender,
            Some(vec![("Male".to_string(), 2), ("Female".to_string(), 1)])
        );
        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: 1975,
                most_recent: 2001,
                most_common: 1989,
            })
        );
    }

    #[test]
    fn test_user_stats_without_gender_column() {
        let stats = user_stats(&TripTable::new(vec![trip("Subscriber")], false, false)).unwrap();
        assert_eq!(stats.gender, None);
        assert_eq!(stats.birth_years, None);

        let text = stats.to_string();
        assert!(text.contains("no data on user gender"));
        assert!(text.contains("no data on user's year of birth"));
    }

    #[test]
    fn test_empty_gender_column_counts_as_missing() {
        let stats = user_stats(&TripTable::new(vec![trip("Customer")], true, true)).unwrap();
        assert_eq!(stats.gender, None);
        assert_eq!(stats.birth_years, None);
    }

    #[test]
    fn test_user_stats_empty() {
        assert_eq!(user_stats(&TripTable::default()), Err(StatsError::NoData));
    }
}
