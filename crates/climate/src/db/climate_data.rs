use async_trait::async_trait;
use time::Date;

use crate::{ActivityRank, DateError, DateRange, DateWindow, PrecipitationReading};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Stored date is not valid: {0}")]
    StoredDate(#[from] DateError),
}

/// Read-only access to the observation dataset
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Every (date, precipitation) pair, in storage order
    async fn all_precipitation(&self) -> Result<Vec<PrecipitationReading>, Error>;
    async fn all_station_ids(&self) -> Result<Vec<String>, Error>;
    async fn observation_counts_by_station(&self) -> Result<Vec<ActivityRank>, Error>;
    /// Latest observation date in the dataset, `None` when it is empty
    async fn latest_date(&self) -> Result<Option<Date>, Error>;
    async fn latest_date_for_station(&self, station_id: &str) -> Result<Option<Date>, Error>;
    /// Temperatures whose date falls inside `range`, filtered store-side
    async fn temperatures_in_range(&self, range: &DateRange) -> Result<Vec<f64>, Error>;
    /// Temperatures recorded by one station inside `window`, ordered by date
    async fn station_temperatures(
        &self,
        station_id: &str,
        window: &DateWindow,
    ) -> Result<Vec<f64>, Error>;
}
