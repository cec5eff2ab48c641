//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::DeviceRepository;
use smarthome_domain::device::Device;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, DeviceTypeName, RoomId};

use crate::codec::decode_error;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let device_type: String = row.try_get("device_type")?;
        let room_id: String = row.try_get("room_id")?;

        Ok(Self(Device {
            id: DeviceId::from_str(&id).map_err(decode_error)?,
            name: row.try_get("name")?,
            device_type: DeviceTypeName::new(device_type).map_err(decode_error)?,
            room_id: RoomId::from_str(&room_id).map_err(decode_error)?,
            active: row.try_get("active")?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO devices (id, name, device_type, room_id, active) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY rowid";
const SELECT_BY_ROOM: &str = "SELECT * FROM devices WHERE room_id = ? ORDER BY rowid";
const SELECT_IDS_BY_TYPE: &str = "SELECT id FROM devices WHERE device_type = ? ORDER BY rowid";
const UPDATE: &str =
    "UPDATE devices SET name = ?, device_type = ?, room_id = ?, active = ? WHERE id = ?";

/// `SQLite`-backed device repository.
#[derive(Clone)]
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(device.id.to_string())
                .bind(&device.name)
                .bind(device.device_type.as_str())
                .bind(device.room_id.to_string())
                .bind(device.active)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        device: Device,
    ) -> impl Future<Output = Result<Device, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&device.name)
                .bind(device.device_type.as_str())
                .bind(device.room_id.to_string())
                .bind(device.active)
                .bind(device.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(device)
        }
    }

    fn find_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_ROOM)
                .bind(room_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_ids_by_device_type(
        &self,
        device_type: &DeviceTypeName,
    ) -> impl Future<Output = Result<Vec<DeviceId>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let device_type = device_type.to_string();
        async move {
            let rows: Vec<(String,)> = sqlx::query_as(SELECT_IDS_BY_TYPE)
                .bind(device_type)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let ids = rows
                .iter()
                .map(|(id,)| DeviceId::from_str(id))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| StorageError::from(decode_error(err)))?;
            Ok(ids)
        }
    }
}
