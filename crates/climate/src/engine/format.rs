use serde::Serialize;
use utoipa::ToSchema;

use super::aggregate::TemperatureAggregate;

/// Response shape for temperature aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `[TMIN, TAVG, TMAX]`
    #[default]
    List,
    /// `{"TAVG": .., "TMAX": .., "TMIN": ..}`
    Dict,
}

impl OutputMode {
    /// Only the exact string `dict` selects the mapping; anything else,
    /// including a missing flag, falls back to the list.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("dict") => OutputMode::Dict,
            _ => OutputMode::List,
        }
    }
}

/// Labeled aggregate. Fields are declared in alphabetical key order, which is
/// the order they serialize in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct LabeledAggregate {
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregateBody {
    List([Option<f64>; 3]),
    Dict(LabeledAggregate),
}

pub fn format_aggregate(aggregate: &TemperatureAggregate, mode: OutputMode) -> AggregateBody {
    match mode {
        OutputMode::List => {
            AggregateBody::List([aggregate.min(), aggregate.avg(), aggregate.max()])
        }
        OutputMode::Dict => AggregateBody::Dict(LabeledAggregate {
            tavg: aggregate.avg(),
            tmax: aggregate.max(),
            tmin: aggregate.min(),
        }),
    }
}
