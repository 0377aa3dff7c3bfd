pub mod climate_data;
pub mod sqlite;

pub use climate_data::{ClimateData, Error};
pub use sqlite::SqliteStore;
