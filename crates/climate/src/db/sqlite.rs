use anyhow::Context;
use async_trait::async_trait;
use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    FromRow,
};
use std::time::Duration;
use time::Date;

use super::{ClimateData, Error};
use crate::{format_date, parse_date, ActivityRank, DateRange, DateWindow, PrecipitationReading};

/// `measurement(id, station, date, prcp, tobs)` projected to the columns the
/// precipitation series needs
#[derive(FromRow)]
struct PrecipitationRow {
    date: String,
    prcp: Option<f64>,
}

#[derive(FromRow)]
struct StationCountRow {
    station: String,
    observations: i64,
}

/// The observation dataset, opened read-only for the life of the process
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(path: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open dataset at {}", path))?;

        info!("SQLite dataset opened read-only at: {}", path);
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check connectivity and that both tables the API reads are present.
    pub async fn health_check(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Dataset connectivity check failed")?;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name IN ('measurement', 'station')",
        )
        .fetch_one(&self.pool)
        .await
        .context("Dataset schema check failed")?;
        if tables != 2 {
            return Err(anyhow::anyhow!(
                "Dataset is missing the measurement and/or station table"
            ));
        }

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("SQLite dataset closed");
    }
}

fn parse_stored(date: Option<String>) -> Result<Option<Date>, Error> {
    Ok(date.as_deref().map(parse_date).transpose()?)
}

#[async_trait]
impl ClimateData for SqliteStore {
    async fn all_precipitation(&self) -> Result<Vec<PrecipitationReading>, Error> {
        let rows: Vec<PrecipitationRow> =
            sqlx::query_as("SELECT date, prcp FROM measurement ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|row| -> Result<PrecipitationReading, Error> {
                Ok(PrecipitationReading {
                    date: parse_date(&row.date)?,
                    precipitation: row.prcp,
                })
            })
            .collect()
    }

    async fn all_station_ids(&self) -> Result<Vec<String>, Error> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT station FROM station ORDER BY station")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn observation_counts_by_station(&self) -> Result<Vec<ActivityRank>, Error> {
        let rows: Vec<StationCountRow> = sqlx::query_as(
            "SELECT station, COUNT(*) AS observations FROM measurement
             GROUP BY station ORDER BY station",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ActivityRank {
                station_id: row.station,
                count: row.observations.max(0) as u64,
            })
            .collect())
    }

    async fn latest_date(&self) -> Result<Option<Date>, Error> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        parse_stored(latest)
    }

    async fn latest_date_for_station(&self, station_id: &str) -> Result<Option<Date>, Error> {
        let latest: Option<String> =
            sqlx::query_scalar("SELECT MAX(date) FROM measurement WHERE station = ?")
                .bind(station_id)
                .fetch_one(&self.pool)
                .await?;
        parse_stored(latest)
    }

    async fn temperatures_in_range(&self, range: &DateRange) -> Result<Vec<f64>, Error> {
        let start = range.start;
        let temperatures: Vec<f64> = match range.end {
            Some(end) => {
                sqlx::query_scalar(
                    "SELECT tobs FROM measurement
                     WHERE tobs IS NOT NULL AND date >= ? AND date <= ?",
                )
                .bind(format_date(start))
                .bind(format_date(end))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT tobs FROM measurement WHERE tobs IS NOT NULL AND date >= ?",
                )
                .bind(format_date(start))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(temperatures)
    }

    async fn station_temperatures(
        &self,
        station_id: &str,
        window: &DateWindow,
    ) -> Result<Vec<f64>, Error> {
        let temperatures: Vec<f64> = sqlx::query_scalar(
            "SELECT tobs FROM measurement
             WHERE tobs IS NOT NULL AND station = ? AND date >= ? AND date <= ?
             ORDER BY date",
        )
        .bind(station_id)
        .bind(format_date(window.start()))
        .bind(format_date(window.end()))
        .fetch_all(&self.pool)
        .await?;
        Ok(temperatures)
    }
}
