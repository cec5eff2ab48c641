//! `SQLite` implementation of [`ReadingRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::ReadingRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{ReadingId, SensorId};
use smarthome_domain::reading::Reading;
use smarthome_domain::time::Timestamp;

use crate::codec::{decode_error, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Reading);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let sensor_id: String = row.try_get("sensor_id")?;
        let recorded_at: String = row.try_get("recorded_at")?;

        Ok(Self(Reading {
            id: ReadingId::from_str(&id).map_err(decode_error)?,
            sensor_id: SensorId::from_str(&sensor_id).map_err(decode_error)?,
            value: row.try_get("value")?,
            recorded_at: decode_timestamp(&recorded_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO readings (id, sensor_id, value, recorded_at)
    VALUES (?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM readings WHERE id = ?";

const SELECT_BY_SENSOR_IN_RANGE: &str = r"
    SELECT * FROM readings
    WHERE sensor_id = ? AND recorded_at >= ? AND recorded_at <= ?
    ORDER BY recorded_at ASC, rowid ASC
";

const SELECT_IDS_BY_SENSOR_IN_RANGE: &str = r"
    SELECT id FROM readings
    WHERE sensor_id = ? AND recorded_at >= ? AND recorded_at <= ?
    ORDER BY recorded_at ASC, rowid ASC
";

const SELECT_LATEST_BY_SENSOR: &str = r"
    SELECT * FROM readings
    WHERE sensor_id = ?
    ORDER BY recorded_at DESC, rowid DESC
    LIMIT 1
";

/// `SQLite`-backed reading repository.
#[derive(Clone)]
pub struct SqliteReadingRepository {
    pool: SqlitePool,
}

impl SqliteReadingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReadingRepository for SqliteReadingRepository {
    fn create(
        &self,
        reading: Reading,
    ) -> impl Future<Output = Result<Reading, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(reading.id.to_string())
                .bind(reading.sensor_id.to_string())
                .bind(reading.value)
                .bind(encode_timestamp(reading.recorded_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(reading)
        }
    }

    fn get_by_id(
        &self,
        id: ReadingId,
    ) -> impl Future<Output = Result<Option<Reading>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn find_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        start: Timestamp,
        end: Timestamp,
    ) -> impl Future<Output = Result<Vec<Reading>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_SENSOR_IN_RANGE)
                .bind(sensor_id.to_string())
                .bind(encode_timestamp(start))
                .bind(encode_timestamp(end))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_ids_by_sensor_in_period(
        &self,
        sensor_id: SensorId,
        start: Timestamp,
        end: Timestamp,
    ) -> impl Future<Output = Result<Vec<ReadingId>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<(String,)> = sqlx::query_as(SELECT_IDS_BY_SENSOR_IN_RANGE)
                .bind(sensor_id.to_string())
                .bind(encode_timestamp(start))
                .bind(encode_timestamp(end))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let ids = rows
                .iter()
                .map(|(id,)| ReadingId::from_str(id))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| StorageError::from(decode_error(err)))?;
            Ok(ids)
        }
    }

    fn find_latest_by_sensor(
        &self,
        sensor_id: SensorId,
    ) -> impl Future<Output = Result<Option<Reading>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_LATEST_BY_SENSOR)
                .bind(sensor_id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use chrono::TimeDelta;

    fn reading(sensor_id: SensorId, at: Timestamp, value: f64) -> Reading {
        Reading::builder()
            .sensor_id(sensor_id)
            .value(value)
            .recorded_at(at)
            .build()
            .unwrap()
    }

    async fn setup() -> (SqliteReadingRepository, SensorId) {
        let pool = test_support::pool().await;
        let sensor = test_support::sensor(&pool, "SensorOfPowerConsumption").await;
        (SqliteReadingRepository::new(pool), sensor.id)
    }

    #[tokio::test]
    async fn should_create_and_retrieve_reading() {
        let (repo, sensor_id) = setup().await;
        let r = reading(sensor_id, smarthome_domain::time::now(), 21.5);

        repo.create(r.clone()).await.unwrap();

        assert_eq!(repo.get_by_id(r.id).await.unwrap(), Some(r));
    }

    #[tokio::test]
    async fn should_return_none_when_reading_not_found() {
        let (repo, _) = setup().await;
        assert!(repo.get_by_id(ReadingId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_include_both_bounds_in_range_query() {
        let (repo, sensor_id) = setup().await;
        let t0 = smarthome_domain::time::now() - TimeDelta::hours(2);
        let end = t0 + TimeDelta::hours(1);
        for (at, value) in [
            (t0 - TimeDelta::seconds(1), 0.0),
            (t0, 1.0),
            (t0 + TimeDelta::minutes(30), 2.0),
            (end, 3.0),
            (end + TimeDelta::milliseconds(1), 4.0),
        ] {
            repo.create(reading(sensor_id, at, value)).await.unwrap();
        }

        let readings = repo
            .find_by_sensor_in_period(sensor_id, t0, end)
            .await
            .unwrap();
        let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);

        let ids = repo
            .find_ids_by_sensor_in_period(sensor_id, t0, end)
            .await
            .unwrap();
        let expected: Vec<ReadingId> = readings.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn should_order_range_by_time_not_insertion() {
        let (repo, sensor_id) = setup().await;
        let t0 = smarthome_domain::time::now() - TimeDelta::hours(1);
        repo.create(reading(sensor_id, t0 + TimeDelta::minutes(10), 2.0))
            .await
            .unwrap();
        repo.create(reading(sensor_id, t0 + TimeDelta::minutes(5), 1.0))
            .await
            .unwrap();

        let readings = repo
            .find_by_sensor_in_period(sensor_id, t0, t0 + TimeDelta::minutes(30))
            .await
            .unwrap();
        let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[tokio::test]
    async fn should_return_latest_reading_of_sensor() {
        let (repo, sensor_id) = setup().await;
        let t0 = smarthome_domain::time::now() - TimeDelta::hours(1);
        let latest = reading(sensor_id, t0 + TimeDelta::minutes(20), 9.0);
        repo.create(latest.clone()).await.unwrap();
        repo.create(reading(sensor_id, t0, 1.0)).await.unwrap();

        assert_eq!(
            repo.find_latest_by_sensor(sensor_id).await.unwrap(),
            Some(latest)
        );
        assert!(
            repo.find_latest_by_sensor(SensorId::new())
                .await
                .unwrap()
                .is_none()
        );
    }
}
