use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{db, NoActiveStation};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    MalformedDate(String),
    #[error(transparent)]
    NoActiveStation(#[from] NoActiveStation),
    #[error("Failed to query climate data: {0}")]
    StoreUnavailable(#[from] db::Error),
}

impl ApiError {
    pub fn bad_start(start: &str) -> Self {
        ApiError::MalformedDate(format!(
            "Start date {} is not a valid date in yyyy-mm-dd format",
            start
        ))
    }

    pub fn bad_range(start: &str, end: &str) -> Self {
        ApiError::MalformedDate(format!(
            "Start date {} and/or End date {} is not a valid date in yyyy-mm-dd format",
            start, end
        ))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedDate(_) => StatusCode::BAD_REQUEST,
            ApiError::NoActiveStation(_) => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::StoreUnavailable(err) => {
                error!("error querying climate data: {}", err);
                String::from("Failed to query climate data")
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
