//! `SQLite` implementation of [`SensorRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::SensorRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, SensorId, SensorModelName};
use smarthome_domain::sensor::Sensor;

use crate::codec::decode_error;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Sensor`].
struct Wrapper(Sensor);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Sensor> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let device_id: String = row.try_get("device_id")?;
        let model: String = row.try_get("model")?;

        Ok(Self(Sensor {
            id: SensorId::from_str(&id).map_err(decode_error)?,
            device_id: DeviceId::from_str(&device_id).map_err(decode_error)?,
            model: SensorModelName::new(model).map_err(decode_error)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO sensors (id, device_id, model) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM sensors WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM sensors ORDER BY rowid";
const SELECT_BY_DEVICE: &str = "SELECT * FROM sensors WHERE device_id = ? ORDER BY rowid";
const SELECT_BY_DEVICE_AND_MODEL: &str =
    "SELECT * FROM sensors WHERE device_id = ? AND model = ? ORDER BY rowid";

/// `SQLite`-backed sensor repository.
#[derive(Clone)]
pub struct SqliteSensorRepository {
    pool: SqlitePool,
}

impl SqliteSensorRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn query_by_device_and_model(
        pool: SqlitePool,
        device_id: DeviceId,
        model: String,
    ) -> Result<Vec<Sensor>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_DEVICE_AND_MODEL)
            .bind(device_id.to_string())
            .bind(model)
            .fetch_all(&pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

impl SensorRepository for SqliteSensorRepository {
    fn create(
        &self,
        sensor: Sensor,
    ) -> impl Future<Output = Result<Sensor, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(sensor.id.to_string())
                .bind(sensor.device_id.to_string())
                .bind(sensor.model.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(sensor)
        }
    }

    fn get_by_id(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_DEVICE)
                .bind(device_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_device_and_model(
        &self,
        device_id: DeviceId,
        model: &SensorModelName,
    ) -> impl Future<Output = Result<Vec<Sensor>, SmartHomeError>> + Send {
        Self::query_by_device_and_model(self.pool.clone(), device_id, model.to_string())
    }

    fn find_ids_by_device_and_model(
        &self,
        device_id: DeviceId,
        model: &SensorModelName,
    ) -> impl Future<Output = Result<Vec<SensorId>, SmartHomeError>> + Send {
        let sensors = Self::query_by_device_and_model(self.pool.clone(), device_id, model.to_string());
        async move { Ok(sensors.await?.into_iter().map(|s| s.id).collect()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn model(name: &str) -> SensorModelName {
        SensorModelName::new(name).unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_sensor() {
        let pool = test_support::pool().await;
        let sensor = test_support::sensor(&pool, "SensorOfTemperature").await;
        let repo = SqliteSensorRepository::new(pool);

        let fetched = repo.get_by_id(sensor.id).await.unwrap().unwrap();
        assert_eq!(fetched, sensor);
    }

    #[tokio::test]
    async fn should_reject_sensor_of_unknown_device() {
        let repo = SqliteSensorRepository::new(test_support::pool().await);
        let result = repo
            .create(Sensor::new(DeviceId::new(), model("SensorOfTemperature")))
            .await;
        assert!(matches!(result, Err(SmartHomeError::Storage(_))));
    }

    #[tokio::test]
    async fn should_filter_by_device_and_model() {
        let pool = test_support::pool().await;
        let device = test_support::device(&pool, "Meter").await;
        let repo = SqliteSensorRepository::new(pool);
        let power = repo
            .create(Sensor::new(device.id, model("SensorOfPowerConsumption")))
            .await
            .unwrap();
        repo.create(Sensor::new(device.id, model("SensorOfTemperature")))
            .await
            .unwrap();

        let found = repo
            .find_by_device_and_model(device.id, &model("SensorOfPowerConsumption"))
            .await
            .unwrap();
        assert_eq!(found, vec![power.clone()]);

        let ids = repo
            .find_ids_by_device_and_model(device.id, &model("SensorOfPowerConsumption"))
            .await
            .unwrap();
        assert_eq!(ids, vec![power.id]);

        assert_eq!(repo.find_by_device(device.id).await.unwrap().len(), 2);
        assert!(
            repo.find_ids_by_device_and_model(DeviceId::new(), &model("SensorOfTemperature"))
                .await
                .unwrap()
                .is_empty()
        );
    }
}
