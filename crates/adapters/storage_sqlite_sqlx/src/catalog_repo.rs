//! `SQLite` implementations of the catalog repositories:
//! [`DeviceTypeRepository`], [`SensorTypeRepository`], [`SensorModelRepository`],
//! [`ActuatorTypeRepository`] and [`ActuatorModelRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::{
    ActuatorModelRepository, ActuatorTypeRepository, DeviceTypeRepository, SensorModelRepository,
    SensorTypeRepository,
};
use smarthome_domain::actuator::{ActuatorModel, ActuatorType};
use smarthome_domain::device::DeviceType;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{
    ActuatorModelName, ActuatorTypeName, DeviceTypeName, SensorModelName, SensorTypeId,
};
use smarthome_domain::sensor::{SensorModel, SensorType};

use crate::codec::decode_error;
use crate::error::StorageError;

struct DeviceTypeRow(DeviceType);

impl<'r> FromRow<'r, SqliteRow> for DeviceTypeRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let name: String = row.try_get("name")?;
        Ok(Self(DeviceType {
            name: DeviceTypeName::new(name).map_err(decode_error)?,
        }))
    }
}

struct SensorTypeRow(SensorType);

impl<'r> FromRow<'r, SqliteRow> for SensorTypeRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(SensorType {
            id: SensorTypeId::new(id).map_err(decode_error)?,
            name: row.try_get("name")?,
            unit: row.try_get("unit")?,
        }))
    }
}

struct SensorModelRow(SensorModel);

impl<'r> FromRow<'r, SqliteRow> for SensorModelRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let name: String = row.try_get("name")?;
        let sensor_type_id: String = row.try_get("sensor_type_id")?;
        Ok(Self(SensorModel {
            name: SensorModelName::new(name).map_err(decode_error)?,
            sensor_type_id: SensorTypeId::new(sensor_type_id).map_err(decode_error)?,
        }))
    }
}

struct ActuatorTypeRow(ActuatorType);

impl<'r> FromRow<'r, SqliteRow> for ActuatorTypeRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let name: String = row.try_get("name")?;
        Ok(Self(ActuatorType {
            name: ActuatorTypeName::new(name).map_err(decode_error)?,
        }))
    }
}

struct ActuatorModelRow(ActuatorModel);

impl<'r> FromRow<'r, SqliteRow> for ActuatorModelRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let name: String = row.try_get("name")?;
        let actuator_type: String = row.try_get("actuator_type")?;
        Ok(Self(ActuatorModel {
            name: ActuatorModelName::new(name).map_err(decode_error)?,
            actuator_type: ActuatorTypeName::new(actuator_type).map_err(decode_error)?,
        }))
    }
}

const INSERT_DEVICE_TYPE: &str = "INSERT INTO device_types (name) VALUES (?)";
const SELECT_DEVICE_TYPE: &str = "SELECT * FROM device_types WHERE name = ?";
const SELECT_DEVICE_TYPES: &str = "SELECT * FROM device_types ORDER BY rowid";

const INSERT_SENSOR_TYPE: &str = "INSERT INTO sensor_types (id, name, unit) VALUES (?, ?, ?)";
const SELECT_SENSOR_TYPE: &str = "SELECT * FROM sensor_types WHERE id = ?";
const SELECT_SENSOR_TYPES: &str = "SELECT * FROM sensor_types ORDER BY rowid";

const INSERT_SENSOR_MODEL: &str = "INSERT INTO sensor_models (name, sensor_type_id) VALUES (?, ?)";
const SELECT_SENSOR_MODEL: &str = "SELECT * FROM sensor_models WHERE name = ?";
const SELECT_SENSOR_MODELS: &str = "SELECT * FROM sensor_models ORDER BY rowid";
const SELECT_SENSOR_MODELS_BY_TYPE: &str =
    "SELECT * FROM sensor_models WHERE sensor_type_id = ? ORDER BY rowid";

const INSERT_ACTUATOR_TYPE: &str = "INSERT INTO actuator_types (name) VALUES (?)";
const SELECT_ACTUATOR_TYPE: &str = "SELECT * FROM actuator_types WHERE name = ?";
const SELECT_ACTUATOR_TYPES: &str = "SELECT * FROM actuator_types ORDER BY rowid";

const INSERT_ACTUATOR_MODEL: &str =
    "INSERT INTO actuator_models (name, actuator_type) VALUES (?, ?)";
const SELECT_ACTUATOR_MODEL: &str = "SELECT * FROM actuator_models WHERE name = ?";
const SELECT_ACTUATOR_MODELS: &str = "SELECT * FROM actuator_models ORDER BY rowid";
const SELECT_ACTUATOR_MODELS_BY_TYPE: &str =
    "SELECT * FROM actuator_models WHERE actuator_type = ? ORDER BY rowid";

/// `SQLite`-backed device type catalog.
#[derive(Clone)]
pub struct SqliteDeviceTypeRepository {
    pool: SqlitePool,
}

impl SqliteDeviceTypeRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceTypeRepository for SqliteDeviceTypeRepository {
    fn create(
        &self,
        device_type: DeviceType,
    ) -> impl Future<Output = Result<DeviceType, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_DEVICE_TYPE)
                .bind(device_type.name.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device_type)
        }
    }

    fn get_by_name(
        &self,
        name: &DeviceTypeName,
    ) -> impl Future<Output = Result<Option<DeviceType>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_string();
        async move {
            let row: Option<DeviceTypeRow> = sqlx::query_as(SELECT_DEVICE_TYPE)
                .bind(name)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<DeviceType>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<DeviceTypeRow> = sqlx::query_as(SELECT_DEVICE_TYPES)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }
}

/// `SQLite`-backed sensor type catalog.
#[derive(Clone)]
pub struct SqliteSensorTypeRepository {
    pool: SqlitePool,
}

impl SqliteSensorTypeRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SensorTypeRepository for SqliteSensorTypeRepository {
    fn create(
        &self,
        sensor_type: SensorType,
    ) -> impl Future<Output = Result<SensorType, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_SENSOR_TYPE)
                .bind(sensor_type.id.as_str())
                .bind(&sensor_type.name)
                .bind(&sensor_type.unit)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(sensor_type)
        }
    }

    fn get_by_id(
        &self,
        id: &SensorTypeId,
    ) -> impl Future<Output = Result<Option<SensorType>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let id = id.to_string();
        async move {
            let row: Option<SensorTypeRow> = sqlx::query_as(SELECT_SENSOR_TYPE)
                .bind(id)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<SensorType>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<SensorTypeRow> = sqlx::query_as(SELECT_SENSOR_TYPES)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }
}

/// `SQLite`-backed sensor model catalog.
#[derive(Clone)]
pub struct SqliteSensorModelRepository {
    pool: SqlitePool,
}

impl SqliteSensorModelRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SensorModelRepository for SqliteSensorModelRepository {
    fn create(
        &self,
        model: SensorModel,
    ) -> impl Future<Output = Result<SensorModel, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_SENSOR_MODEL)
                .bind(model.name.as_str())
                .bind(model.sensor_type_id.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(model)
        }
    }

    fn get_by_name(
        &self,
        name: &SensorModelName,
    ) -> impl Future<Output = Result<Option<SensorModel>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_string();
        async move {
            let row: Option<SensorModelRow> = sqlx::query_as(SELECT_SENSOR_MODEL)
                .bind(name)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<SensorModel>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<SensorModelRow> = sqlx::query_as(SELECT_SENSOR_MODELS)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }

    fn find_by_sensor_type(
        &self,
        sensor_type_id: &SensorTypeId,
    ) -> impl Future<Output = Result<Vec<SensorModel>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let sensor_type_id = sensor_type_id.to_string();
        async move {
            let rows: Vec<SensorModelRow> = sqlx::query_as(SELECT_SENSOR_MODELS_BY_TYPE)
                .bind(sensor_type_id)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }
}

/// `SQLite`-backed actuator type catalog.
#[derive(Clone)]
pub struct SqliteActuatorTypeRepository {
    pool: SqlitePool,
}

impl SqliteActuatorTypeRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ActuatorTypeRepository for SqliteActuatorTypeRepository {
    fn create(
        &self,
        actuator_type: ActuatorType,
    ) -> impl Future<Output = Result<ActuatorType, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_ACTUATOR_TYPE)
                .bind(actuator_type.name.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(actuator_type)
        }
    }

    fn get_by_name(
        &self,
        name: &ActuatorTypeName,
    ) -> impl Future<Output = Result<Option<ActuatorType>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_string();
        async move {
            let row: Option<ActuatorTypeRow> = sqlx::query_as(SELECT_ACTUATOR_TYPE)
                .bind(name)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ActuatorType>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<ActuatorTypeRow> = sqlx::query_as(SELECT_ACTUATOR_TYPES)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }
}

/// `SQLite`-backed actuator model catalog.
#[derive(Clone)]
pub struct SqliteActuatorModelRepository {
    pool: SqlitePool,
}

impl SqliteActuatorModelRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ActuatorModelRepository for SqliteActuatorModelRepository {
    fn create(
        &self,
        model: ActuatorModel,
    ) -> impl Future<Output = Result<ActuatorModel, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_ACTUATOR_MODEL)
                .bind(model.name.as_str())
                .bind(model.actuator_type.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(model)
        }
    }

    fn get_by_name(
        &self,
        name: &ActuatorModelName,
    ) -> impl Future<Output = Result<Option<ActuatorModel>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_string();
        async move {
            let row: Option<ActuatorModelRow> = sqlx::query_as(SELECT_ACTUATOR_MODEL)
                .bind(name)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ActuatorModel>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<ActuatorModelRow> = sqlx::query_as(SELECT_ACTUATOR_MODELS)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }

    fn find_by_actuator_type(
        &self,
        actuator_type: &ActuatorTypeName,
    ) -> impl Future<Output = Result<Vec<ActuatorModel>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let actuator_type = actuator_type.to_string();
        async move {
            let rows: Vec<ActuatorModelRow> = sqlx::query_as(SELECT_ACTUATOR_MODELS_BY_TYPE)
                .bind(actuator_type)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|r| r.0).collect())
        }
    }
}
