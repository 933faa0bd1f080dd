use chrono::Weekday;
use std::fmt;
use thiserror::Error;

use crate::config::CityMap;

/// A filter value outside its fixed domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown city: {0:?}")]
    UnknownCity(String),
    #[error("unknown month: {0:?} (expected january..june or all)")]
    UnknownMonth(String),
    #[error("unknown day: {0:?} (expected monday..sunday or all)")]
    UnknownDay(String),
}

/// Literal accepted by every selection to mean "no filter"
pub const ALL: &str = "all";

/// The months covered by the trip extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::January => "january",
            Self::February => "february",
            Self::March => "march",
            Self::April => "april",
            Self::May => "may",
            Self::June => "june",
        }
    }

    /// 1-based calendar month number
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }
}

/// Full English month name for a calendar month number
pub fn month_name(number: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    number
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Full English weekday name, e.g. "Monday"
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a full weekday name, case-insensitively
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    WEEKDAYS
        .into_iter()
        .find(|d| weekday_name(*d).to_lowercase() == name)
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitySelection {
    All,
    Named(String),
}

impl CitySelection {
    /// Validate against the known city keys plus "all"
    pub fn parse(input: &str, cities: &CityMap) -> Result<Self, FilterError> {
        let city = input.trim().to_lowercase();
        if city == ALL {
            Ok(Self::All)
        } else if cities.contains(&city) {
            Ok(Self::Named(city))
        } else {
            Err(FilterError::UnknownCity(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Named(city) => city,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl MonthFilter {
    pub fn parse(input: &str) -> Result<Self, FilterError> {
        let month = input.trim().to_lowercase();
        if month == ALL {
            return Ok(Self::All);
        }
        Month::from_name(&month)
            .map(Self::Only)
            .ok_or_else(|| FilterError::UnknownMonth(input.to_string()))
    }

    /// Whether a calendar month number passes this filter
    pub fn matches(&self, month: u32) -> bool {
        match self {
            Self::All => true,
            Self::Only(m) => m.number() == month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => ALL,
            Self::Only(m) => m.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn parse(input: &str) -> Result<Self, FilterError> {
        let day = input.trim().to_lowercase();
        if day == ALL {
            return Ok(Self::All);
        }
        parse_weekday(&day)
            .map(Self::Only)
            .ok_or_else(|| FilterError::UnknownDay(input.to_string()))
    }

    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            Self::All => true,
            Self::Only(d) => *d == day,
        }
    }

    pub fn as_str(&self) -> String {
        match self {
            Self::All => ALL.to_string(),
            Self::Only(d) => weekday_name(*d).to_lowercase(),
        }
    }
}

/// City, month and day chosen for one session iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: CitySelection,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    /// Build a selection from raw strings, rejecting anything outside the domains
    pub fn parse(
        city: &str,
        month: &str,
        day: &str,
        cities: &CityMap,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            city: CitySelection::parse(city, cities)?,
            month: MonthFilter::parse(month)?,
            day: DayFilter::parse(day)?,
        })
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "city: {}, month: {}, day: {}",
            self.city.as_str(),
            self.month.as_str(),
            self.day.as_str()
        )
    }
}
