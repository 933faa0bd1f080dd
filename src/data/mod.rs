pub mod error;
pub mod reader;

pub use error::LoadError;
pub use reader::{discover_sources, load_trips, resolve_sources};
