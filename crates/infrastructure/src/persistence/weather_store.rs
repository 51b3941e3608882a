//! SQLite-based local weather store

use std::sync::Arc;

use application::{ApplicationError, WeatherStorePort};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use domain::WeatherRecord;
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, DatabaseError};

/// Stored dates are ISO-8601 calendar dates
const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-based weather store
#[derive(Debug, Clone)]
pub struct SqliteWeatherStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteWeatherStore {
    /// Create a new SQLite weather store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Insert or replace the forecast for a location and day
    #[instrument(skip(self, record), fields(condition = %record.condition_id))]
    pub async fn upsert(
        &self,
        location: &str,
        date: NaiveDate,
        record: WeatherRecord,
    ) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let location = location.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_error)?;

            conn.execute(
                "INSERT INTO weather (location, date, weather_id, max_temp, min_temp)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (location, date) DO UPDATE SET
                    weather_id = excluded.weather_id,
                    max_temp = excluded.max_temp,
                    min_temp = excluded.min_temp",
                params![
                    location,
                    date.format(DATE_FORMAT).to_string(),
                    record.condition_id.value(),
                    record.max_temp,
                    record.min_temp,
                ],
            )
            .map_err(storage_error)?;

            debug!("Saved weather record");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    /// Earliest record for `location` dated on or after `date`
    #[instrument(skip(self))]
    pub async fn first_on_or_after(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<Option<WeatherRecord>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let location = location.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(storage_error)?;

            let record = conn
                .query_row(
                    "SELECT weather_id, max_temp, min_temp
                     FROM weather
                     WHERE location = ?1 AND date >= ?2
                     ORDER BY date ASC
                     LIMIT 1",
                    params![location, date.format(DATE_FORMAT).to_string()],
                    row_to_record,
                )
                .optional()
                .map_err(storage_error)?;

            debug!(found = record.is_some(), "Queried weather record");
            Ok(record)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

#[async_trait]
impl WeatherStorePort for SqliteWeatherStore {
    async fn today(&self, location: &str) -> Result<Option<WeatherRecord>, ApplicationError> {
        self.first_on_or_after(location, Local::now().date_naive())
            .await
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<WeatherRecord> {
    Ok(WeatherRecord::new(
        row.get::<_, i32>(0)?,
        row.get::<_, f64>(1)?,
        row.get::<_, f64>(2)?,
    ))
}

fn storage_error(e: impl Into<DatabaseError>) -> ApplicationError {
    ApplicationError::Storage(e.into().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::persistence::create_pool;

    fn store() -> SqliteWeatherStore {
        let pool = create_pool(&DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
            run_migrations: true,
        })
        .unwrap();
        SqliteWeatherStore::new(Arc::new(pool))
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[tokio::test]
    async fn empty_store_has_no_record() {
        let store = store();
        assert_eq!(store.today("94043").await.unwrap(), None);
    }

    #[tokio::test]
    async fn earliest_row_on_or_after_date_wins() {
        let store = store();
        store
            .upsert("94043", day("2026-10-21"), WeatherRecord::new(800, 25.0, 12.0))
            .await
            .unwrap();
        store
            .upsert("94043", day("2026-10-20"), WeatherRecord::new(500, 21.6, 14.2))
            .await
            .unwrap();
        store
            .upsert("94043", day("2026-10-18"), WeatherRecord::new(600, 1.0, -3.0))
            .await
            .unwrap();

        let record = store
            .first_on_or_after("94043", day("2026-10-19"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record, WeatherRecord::new(500, 21.6, 14.2));
    }

    #[tokio::test]
    async fn rows_are_scoped_by_location() {
        let store = store();
        store
            .upsert("london", day("2026-10-19"), WeatherRecord::new(300, 14.0, 9.0))
            .await
            .unwrap();

        assert!(
            store
                .first_on_or_after("94043", day("2026-10-19"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn upsert_replaces_existing_day() {
        let store = store();
        let date = day("2026-10-19");
        store
            .upsert("94043", date, WeatherRecord::new(500, 21.6, 14.2))
            .await
            .unwrap();
        store
            .upsert("94043", date, WeatherRecord::new(211, 19.0, 11.0))
            .await
            .unwrap();

        let record = store.first_on_or_after("94043", date).await.unwrap().unwrap();
        assert_eq!(record.condition_id.value(), 211);
    }

    #[tokio::test]
    async fn today_reads_current_local_date() {
        let store = store();
        store
            .upsert("94043", Local::now().date_naive(), WeatherRecord::new(801, 18.0, 8.0))
            .await
            .unwrap();

        let record = store.today("94043").await.unwrap().unwrap();
        assert_eq!(record.condition_id.value(), 801);
    }
}
