//! `SQLite` implementation of [`RoomRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::RoomRepository;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{HouseName, RoomId};
use smarthome_domain::room::{Dimensions, Room};

use crate::codec::decode_error;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Room`].
struct Wrapper(Room);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Room> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let house_name: String = row.try_get("house_name")?;

        Ok(Self(Room {
            id: RoomId::from_str(&id).map_err(decode_error)?,
            name: row.try_get("name")?,
            house_name: HouseName::new(house_name).map_err(decode_error)?,
            floor: row.try_get("floor")?,
            dimensions: Dimensions {
                width: row.try_get("width")?,
                height: row.try_get("height")?,
                length: row.try_get("length")?,
            },
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO rooms (id, name, house_name, floor, width, height, length)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM rooms WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM rooms ORDER BY rowid";
const SELECT_BY_HOUSE: &str = "SELECT * FROM rooms WHERE house_name = ? ORDER BY rowid";

/// `SQLite`-backed room repository.
#[derive(Clone)]
pub struct SqliteRoomRepository {
    pool: SqlitePool,
}

impl SqliteRoomRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RoomRepository for SqliteRoomRepository {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(room.id.to_string())
                .bind(&room.name)
                .bind(room.house_name.as_str())
                .bind(room.floor)
                .bind(room.dimensions.width)
                .bind(room.dimensions.height)
                .bind(room.dimensions.length)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(room)
        }
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, SmartHomeError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_house(
        &self,
        house_name: &HouseName,
    ) -> impl Future<Output = Result<Vec<Room>, SmartHomeError>> + Send {
        let pool = self.pool.clone();
        let house_name = house_name.to_string();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_HOUSE)
                .bind(house_name)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
