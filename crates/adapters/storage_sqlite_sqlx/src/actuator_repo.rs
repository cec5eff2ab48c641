//! `SQLite` implementation of [`ActuatorRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::ActuatorRepository;
use smarthome_domain::actuator::Actuator;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{ActuatorId, ActuatorModelName, DeviceId};

use crate::codec::decode_error;
use crate::error::StorageError;

struct Wrapper(Actuator);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let device_id: String = row.try_get("device_id")?;
        let model: String = row.try_get("model")?;

        Ok(Self(Actuator {
            id: ActuatorId::from_str(&id).map_err(decode_error)?,
            device_id: DeviceId::from_str(&device_id).map_err(decode_error)?,
            model: ActuatorModelName::new(model).map_err(decode_error)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO actuators (id, device_id, model) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM actuators WHERE id = ?";
const SELECT_IDS_BY_DEVICE: &str = "SELECT id FROM actuators WHERE device_id = ? ORDER BY rowid";

/// `SQLite`-backed actuator repository.
#[derive(Clone)]
pub struct SqliteActuatorRepository {
    pool: SqlitePool,
}

impl SqliteActuatorRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ActuatorRepository for SqliteActuatorRepository {
    fn create(
        &self,
        actuator: Actuator,
    ) -> impl Future<Output = Result<Actuator, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(actuator.id.to_string())
                .bind(actuator.device_id.to_string())
                .bind(actuator.model.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(actuator)
        }
    }

    fn get_by_id(
        &self,
        id: ActuatorId,
    ) -> impl Future<Output = Result<Option<Actuator>, SmartHomeError>> + Send {
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

    fn find_ids_by_device(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Vec<ActuatorId>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<(String,)> = sqlx::query_as(SELECT_IDS_BY_DEVICE)
                .bind(device_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let ids = rows
                .iter()
                .map(|(id,)| ActuatorId::from_str(id))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| StorageError::from(decode_error(err)))?;
            Ok(ids)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn blind_roller() -> ActuatorModelName {
        ActuatorModelName::new("ActuatorOfBlindRoller").unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_actuator() {
        let pool = test_support::pool().await;
        let device = test_support::device(&pool, "Blind").await;
        let repo = SqliteActuatorRepository::new(pool);
        let actuator = repo
            .create(Actuator::new(device.id, blind_roller()))
            .await
            .unwrap();

        let fetched = repo.get_by_id(actuator.id).await.unwrap();
        assert_eq!(fetched, Some(actuator));
    }

    #[tokio::test]
    async fn should_return_none_when_actuator_missing() {
        let repo = SqliteActuatorRepository::new(test_support::pool().await);
        assert!(repo.get_by_id(ActuatorId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_list_actuator_ids_of_device_in_insertion_order() {
        let pool = test_support::pool().await;
        let device = test_support::device(&pool, "Blind").await;
        let other = test_support::device(&pool, "Switch").await;
        let repo = SqliteActuatorRepository::new(pool);
        let first = repo
            .create(Actuator::new(device.id, blind_roller()))
            .await
            .unwrap();
        let second = repo
            .create(Actuator::new(device.id, blind_roller()))
            .await
            .unwrap();
        repo.create(Actuator::new(other.id, blind_roller()))
            .await
            .unwrap();

        assert_eq!(
            repo.find_ids_by_device(device.id).await.unwrap(),
            vec![first.id, second.id]
        );
    }

    #[tokio::test]
    async fn should_reject_actuator_of_unknown_device() {
        let repo = SqliteActuatorRepository::new(test_support::pool().await);
        let result = repo
            .create(Actuator::new(DeviceId::new(), blind_roller()))
            .await;
        assert!(matches!(result, Err(SmartHomeError::Storage(_))));
    }
}
