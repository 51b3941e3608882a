//! Integration tests for the SQLite weather store
//!
//! These tests run against file-backed databases in temporary directories.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use application::WeatherStorePort;
use chrono::{Days, Local, NaiveDate};
use domain::WeatherRecord;
use infrastructure::config::DatabaseConfig;
use infrastructure::persistence::{SqliteWeatherStore, create_pool, migrations};
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn file_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        path: dir.path().join("sunsync.db").to_string_lossy().into_owned(),
        max_connections: 4,
        run_migrations: true,
    }
}

fn open_store(config: &DatabaseConfig) -> SqliteWeatherStore {
    let pool = create_pool(config).expect("Failed to create pool");
    SqliteWeatherStore::new(Arc::new(pool))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ============================================================================
// Weather Store Tests
// ============================================================================

mod weather_store_tests {
    use super::*;

    #[tokio::test]
    async fn records_survive_reopening_the_database() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir);

        open_store(&config)
            .upsert("94043", today(), WeatherRecord::new(500, 21.6, 14.2))
            .await
            .expect("Failed to upsert");

        let reopened = open_store(&config);
        let record = reopened.today("94043").await.unwrap().unwrap();
        assert_eq!(record, WeatherRecord::new(500, 21.6, 14.2));
    }

    #[tokio::test]
    async fn stale_rows_are_skipped_for_the_next_future_day() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&file_config(&dir));
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();

        store
            .upsert("94043", yesterday, WeatherRecord::new(600, -2.0, -9.0))
            .await
            .unwrap();
        store
            .upsert("94043", tomorrow, WeatherRecord::new(802, 17.0, 8.0))
            .await
            .unwrap();

        let record = store.today("94043").await.unwrap().unwrap();
        assert_eq!(record.condition_id.value(), 802);
    }

    #[tokio::test]
    async fn only_past_rows_means_no_data() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&file_config(&dir));
        let last_week = today().checked_sub_days(Days::new(7)).unwrap();

        store
            .upsert("94043", last_week, WeatherRecord::new(800, 30.0, 20.0))
            .await
            .unwrap();

        assert!(store.today("94043").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_upserts_for_different_locations() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&file_config(&dir));

        let mut handles = Vec::new();
        for (i, location) in ["oslo", "lima", "pune", "kyiv"].into_iter().enumerate() {
            let store = store.clone();
            let code = 800 + i32::try_from(i).unwrap();
            handles.push(tokio::spawn(async move {
                store
                    .upsert(location, today(), WeatherRecord::new(code, 10.0, 5.0))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let record = store.today("pune").await.unwrap().unwrap();
        assert_eq!(record.condition_id.value(), 802);
    }

    #[tokio::test]
    async fn negative_and_fractional_temperatures_are_stored_exactly() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&file_config(&dir));

        store
            .upsert("reykjavik", today(), WeatherRecord::new(601, -0.5, -12.75))
            .await
            .unwrap();

        let record = store.today("reykjavik").await.unwrap().unwrap();
        assert!((record.max_temp - -0.5).abs() < f64::EPSILON);
        assert!((record.min_temp - -12.75).abs() < f64::EPSILON);
    }
}

// ============================================================================
// Migration Tests
// ============================================================================

mod migration_tests {
    use super::*;

    #[test]
    fn pool_without_migrations_leaves_schema_unversioned() {
        let dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            run_migrations: false,
            ..file_config(&dir)
        };

        let pool = create_pool(&config).unwrap();
        let conn = pool.get().unwrap();
        assert_eq!(migrations::get_schema_version(&conn).unwrap(), 0);

        migrations::run_migrations(&conn).unwrap();
        assert_eq!(migrations::get_schema_version(&conn).unwrap(), 1);
    }
}
