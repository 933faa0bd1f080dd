pub mod filter;
pub mod trip;

pub use filter::{
    CitySelection, DayFilter, FilterError, FilterSelection, Month, MonthFilter, month_name,
    weekday_name,
};
pub use trip::{RawTrip, Trip, TripTable, parse_timestamp};
