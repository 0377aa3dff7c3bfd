use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::Uri,
    Json,
};
use itertools::Itertools;
use log::{debug, info};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use super::{ApiError, ErrorBody};
use crate::{
    format_aggregate, format_date, last_year_window, most_active_station, parse_date,
    series_in_window, summarize, AggregateBody, AppState, DateRange, OutputMode,
    PrecipitationPoint,
};

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AggregateParams {
    /// `dict` returns `{"TAVG", "TMAX", "TMIN"}`; anything else returns `[TMIN, TAVG, TMAX]`
    pub mode: Option<String>,
}

impl AggregateParams {
    fn output_mode(&self) -> OutputMode {
        OutputMode::from_flag(self.mode.as_deref())
    }
}

/// A query string that fails to deserialize (a repeated `mode`, say) selects
/// the default list output instead of rejecting the request.
fn output_mode(params: Result<Query<AggregateParams>, QueryRejection>) -> OutputMode {
    match params {
        Ok(Query(params)) => params.output_mode(),
        Err(rejection) => {
            debug!("ignoring unreadable query string: {}", rejection);
            OutputMode::List
        }
    }
}

/// Path segments after `/api/v1.0/`, still percent-encoded
fn raw_date_segments(uri: &Uri) -> Vec<&str> {
    uri.path()
        .trim_start_matches("/api/v1.0/")
        .split('/')
        .collect()
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Daily precipitation for the twelve months ending at the latest observation", body = Vec<PrecipitationPoint>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationPoint>>, ApiError> {
    let Some(latest) = state.climate_db.latest_date().await? else {
        info!("dataset has no observations, returning empty precipitation series");
        return Ok(Json(vec![]));
    };

    let window = last_year_window(latest);
    debug!(
        "precipitation window: {} to {}",
        format_date(window.start()),
        format_date(window.end())
    );
    let readings = state.climate_db.all_precipitation().await?;

    Ok(Json(series_in_window(readings, &window)))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Station identifiers in alphabetical order", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let station_ids = state.climate_db.all_station_ids().await?;
    Ok(Json(station_ids.into_iter().sorted().dedup().collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperatures of the most active station over its latest twelve months", body = Vec<f64>),
        (status = NOT_FOUND, description = "The dataset has no stations", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn tobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<f64>>, ApiError> {
    let counts = state.climate_db.observation_counts_by_station().await?;
    let most_active = most_active_station(counts)?;
    info!(
        "most active station: {} ({} observations)",
        most_active.station_id, most_active.count
    );

    let Some(latest) = state
        .climate_db
        .latest_date_for_station(&most_active.station_id)
        .await?
    else {
        return Ok(Json(vec![]));
    };

    let temperatures = state
        .climate_db
        .station_temperatures(&most_active.station_id, &last_year_window(latest))
        .await?;

    Ok(Json(temperatures))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First date to include, yyyy-mm-dd"),
        AggregateParams
    ),
    responses(
        (status = OK, description = "[TMIN, TAVG, TMAX] for every date on or after start, nulls when nothing matched", body = Vec<f64>),
        (status = BAD_REQUEST, description = "Start date is not a valid yyyy-mm-dd date", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    start: Result<Path<String>, PathRejection>,
    params: Result<Query<AggregateParams>, QueryRejection>,
) -> Result<Json<AggregateBody>, ApiError> {
    let Ok(Path(start)) = start else {
        let segments = raw_date_segments(&uri);
        return Err(ApiError::bad_start(segments.first().copied().unwrap_or_default()));
    };
    let start_date = parse_date(&start).map_err(|_| ApiError::bad_start(&start))?;

    let range = DateRange::from_start(start_date);
    let temperatures = state.climate_db.temperatures_in_range(&range).await?;
    let aggregate = summarize(temperatures);

    Ok(Json(format_aggregate(&aggregate, output_mode(params))))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date to include, yyyy-mm-dd"),
        ("end" = String, Path, description = "Last date to include, yyyy-mm-dd"),
        AggregateParams
    ),
    responses(
        (status = OK, description = "[TMIN, TAVG, TMAX] for dates between start and end inclusive, nulls when nothing matched", body = Vec<f64>),
        (status = BAD_REQUEST, description = "Start and/or end date is not a valid yyyy-mm-dd date", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query climate data", body = ErrorBody)
    ))]
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    dates: Result<Path<(String, String)>, PathRejection>,
    params: Result<Query<AggregateParams>, QueryRejection>,
) -> Result<Json<AggregateBody>, ApiError> {
    let Ok(Path((start, end))) = dates else {
        let segments = raw_date_segments(&uri);
        return Err(ApiError::bad_range(
            segments.first().copied().unwrap_or_default(),
            segments.get(1).copied().unwrap_or_default(),
        ));
    };
    let (Ok(start_date), Ok(end_date)) = (parse_date(&start), parse_date(&end)) else {
        return Err(ApiError::bad_range(&start, &end));
    };

    let range = DateRange::between(start_date, end_date);
    let temperatures = state.climate_db.temperatures_in_range(&range).await?;
    let aggregate = summarize(temperatures);

    Ok(Json(format_aggregate(&aggregate, output_mode(params))))
}
