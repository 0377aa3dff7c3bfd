pub mod db;
pub mod engine;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use db::{ClimateData, Error as StoreError, SqliteStore};
pub use engine::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
