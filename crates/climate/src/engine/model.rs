use serde::Serialize;
use time::Date;
use utoipa::ToSchema;

use super::dates::serialize_date;

/// One daily reading from a station. Read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station_id: String,
    pub date: Date,
    pub precipitation: Option<f64>,
    pub temperature: f64,
}

/// A date paired with its (possibly missing) precipitation value
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationReading {
    pub date: Date,
    pub precipitation: Option<f64>,
}

impl From<&Observation> for PrecipitationReading {
    fn from(observation: &Observation) -> Self {
        Self {
            date: observation.date,
            precipitation: observation.precipitation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PrecipitationPoint {
    #[serde(serialize_with = "serialize_date")]
    #[schema(value_type = String, format = Date, example = "2017-08-23")]
    pub date: Date,
    /// Precipitation in inches, `0` when the station recorded nothing
    pub precipitation: f64,
}

/// Number of observations recorded by a station
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRank {
    pub station_id: String,
    pub count: u64,
}
