//! Query and aggregation logic over daily climate observations.
//!
//! Everything here is synchronous and pure; the handlers fetch rows through
//! [`crate::ClimateData`] and hand them to these functions.

pub mod aggregate;
pub mod dates;
pub mod format;
pub mod model;
pub mod precipitation;
pub mod ranking;

pub use aggregate::{aggregate, summarize, TemperatureAggregate};
pub use dates::{
    format_date, last_year_window, parse_date, serialize_date, DateError, DateRange, DateWindow,
};
pub use format::{format_aggregate, AggregateBody, LabeledAggregate, OutputMode};
pub use model::{ActivityRank, Observation, PrecipitationPoint, PrecipitationReading};
pub use precipitation::series_in_window;
pub use ranking::{count_by_station, most_active_station, NoActiveStation};
