//! Interactive bikeshare trip statistics.
//!
//! Loads per-city trip extracts, filters them by month and weekday, and
//! prints travel-time, station, duration and user reports.

pub mod browser;
pub mod config;
pub mod data;
pub mod models;
pub mod prompt;
pub mod session;
pub mod stats;

pub use config::{CityMap, Config};
pub use data::{LoadError, load_trips};
pub use models::{FilterSelection, Trip, TripTable};
pub use session::run_session;
