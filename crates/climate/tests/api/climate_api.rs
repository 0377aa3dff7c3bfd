use crate::helpers::{spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use climate::{
    last_year_window, ActivityRank, DateError, DateRange, PrecipitationReading, StoreError,
};
use mockall::predicate::eq;
use serde_json::json;
use std::sync::Arc;
use time::{macros::date, Date};

fn reading(date: Date, precipitation: Option<f64>) -> PrecipitationReading {
    PrecipitationReading {
        date,
        precipitation,
    }
}

fn rank(station_id: &str, count: u64) -> ActivityRank {
    ActivityRank {
        station_id: station_id.to_owned(),
        count,
    }
}

#[tokio::test]
async fn precipitation_covers_last_twelve_months_sorted_with_zero_fill() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_latest_date()
        .times(1)
        .returning(|| Ok(Some(date!(2017 - 08 - 23))));
    climate_data.expect_all_precipitation().times(1).returning(|| {
        Ok(vec![
            reading(date!(2017 - 08 - 23), Some(0.0)),
            reading(date!(2016 - 08 - 22), Some(0.4)),
            reading(date!(2016 - 08 - 24), None),
            reading(date!(2010 - 01 - 01), Some(0.08)),
            reading(date!(2016 - 08 - 23), Some(0.08)),
        ])
    });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "date": "2016-08-23", "precipitation": 0.08 },
            { "date": "2016-08-24", "precipitation": 0.0 },
            { "date": "2017-08-23", "precipitation": 0.0 },
        ])
    );
}

#[tokio::test]
async fn precipitation_of_empty_dataset_is_empty_list() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_latest_date()
        .times(1)
        .returning(|| Ok(None));
    climate_data.expect_all_precipitation().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn stations_are_sorted_alphabetically() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_all_station_ids().times(1).returning(|| {
        Ok(vec![
            String::from("USC00519397"),
            String::from("USC00513117"),
            String::from("USC00519281"),
        ])
    });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["USC00513117", "USC00519281", "USC00519397"]));
}

#[tokio::test]
async fn tobs_uses_most_active_station_window() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observation_counts_by_station()
        .times(1)
        .returning(|| {
            Ok(vec![
                rank("USC00519397", 2000),
                rank("USC00519281", 2772),
            ])
        });
    climate_data
        .expect_latest_date_for_station()
        .with(eq("USC00519281"))
        .times(1)
        .returning(|_| Ok(Some(date!(2017 - 08 - 18))));
    climate_data
        .expect_station_temperatures()
        .with(
            eq("USC00519281"),
            eq(last_year_window(date!(2017 - 08 - 18))),
        )
        .times(1)
        .returning(|_, _| Ok(vec![77.0, 80.0, 79.0]));

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([77.0, 80.0, 79.0]));
}

#[tokio::test]
async fn tobs_without_stations_is_not_found() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observation_counts_by_station()
        .times(1)
        .returning(|| Ok(vec![]));
    climate_data.expect_latest_date_for_station().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No stations found in the dataset" }));
}

#[tokio::test]
async fn start_date_returns_min_avg_max() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperatures_in_range()
        .with(eq(DateRange::from_start(date!(2017 - 07 - 01))))
        .times(1)
        .returning(|_| Ok(vec![70.0, 75.0, 80.0]));

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/2017-07-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([70.0, 75.0, 80.0]));
}

#[tokio::test]
async fn dict_mode_returns_labeled_mapping() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperatures_in_range()
        .with(eq(DateRange::from_start(date!(2017 - 07 - 01))))
        .times(1)
        .returning(|_| Ok(vec![70.0, 75.0, 80.0]));

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get("/api/v1.0/2017-07-01?mode=dict").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"TAVG":75.0,"TMAX":80.0,"TMIN":70.0}"#
    );
}

#[tokio::test]
async fn unrecognized_mode_falls_back_to_list() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperatures_in_range()
        .times(2)
        .returning(|_| Ok(vec![70.0, 75.0, 80.0]));

    let test_app = spawn_app(Arc::new(climate_data)).await;

    for uri in [
        "/api/v1.0/2017-07-01?mode=DICT",
        "/api/v1.0/2017-07-01?mode=table",
    ] {
        let (status, body) = test_app.get_json(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([70.0, 75.0, 80.0]));
    }
}

#[tokio::test]
async fn malformed_start_date_is_bad_request() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_temperatures_in_range().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/not-a-date").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Start date not-a-date is not a valid date in yyyy-mm-dd format" })
    );

    let (status, _) = test_app.get_json("/api/v1.0/2017-02-30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn future_start_date_is_all_null() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperatures_in_range()
        .with(eq(DateRange::from_start(date!(2050 - 01 - 01))))
        .times(2)
        .returning(|_| Ok(vec![]));

    let test_app = spawn_app(Arc::new(climate_data)).await;

    let (status, body) = test_app.get_json("/api/v1.0/2050-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([null, null, null]));

    let (status, body) = test_app.get_json("/api/v1.0/2050-01-01?mode=dict").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "TAVG": null, "TMAX": null, "TMIN": null }));
}

#[tokio::test]
async fn start_and_end_bound_the_range() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperatures_in_range()
        .with(eq(DateRange::between(
            date!(2017 - 07 - 01),
            date!(2017 - 07 - 14),
        )))
        .times(1)
        .returning(|_| Ok(vec![71.0, 74.5, 79.0, 76.0]));

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/2017-07-01/2017-07-14").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([71.0, 75.12, 79.0]));
}

#[tokio::test]
async fn malformed_end_date_is_bad_request() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_temperatures_in_range().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app
        .get_json("/api/v1.0/2017-07-01/2017-13-01?mode=dict")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Start date 2017-07-01 and/or End date 2017-13-01 is not a valid date in yyyy-mm-dd format" })
    );
}

#[tokio::test]
async fn inverted_range_is_empty_not_an_error() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperatures_in_range()
        .with(eq(DateRange::between(
            date!(2017 - 07 - 14),
            date!(2017 - 07 - 01),
        )))
        .times(1)
        .returning(|_| Ok(vec![]));

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/2017-07-14/2017-07-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([null, null, null]));
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_all_station_ids().times(1).returning(|| {
        Err(StoreError::StoredDate(DateError {
            input: String::from("2017/08/23"),
        }))
    });

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to query climate data" }));
}

#[tokio::test]
async fn repeated_mode_falls_back_to_list() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_temperatures_in_range()
        .with(eq(DateRange::from_start(date!(2017 - 07 - 01))))
        .times(1)
        .returning(|_| Ok(vec![70.0, 75.0, 80.0]));
    climate_data
        .expect_temperatures_in_range()
        .with(eq(DateRange::between(
            date!(2017 - 07 - 01),
            date!(2017 - 07 - 14),
        )))
        .times(1)
        .returning(|_| Ok(vec![70.0, 75.0, 80.0]));

    let test_app = spawn_app(Arc::new(climate_data)).await;

    for uri in [
        "/api/v1.0/2017-07-01?mode=dict&mode=list",
        "/api/v1.0/2017-07-01/2017-07-14?mode=dict&mode=dict",
    ] {
        let (status, body) = test_app.get_json(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([70.0, 75.0, 80.0]));
    }
}

#[tokio::test]
async fn undecodable_start_segment_is_json_bad_request() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_temperatures_in_range().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/%FF").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Start date %FF is not a valid date in yyyy-mm-dd format" })
    );
}

#[tokio::test]
async fn undecodable_end_segment_is_json_bad_request() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_temperatures_in_range().never();

    let test_app = spawn_app(Arc::new(climate_data)).await;
    let (status, body) = test_app.get_json("/api/v1.0/2017-07-01/%FF?mode=dict").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Start date 2017-07-01 and/or End date %FF is not a valid date in yyyy-mm-dd format" })
    );
}
