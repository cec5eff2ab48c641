//! # smarthome-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `smarthome-app::ports::storage`
//! - Bundle them as [`SqliteStorage`](storage::SqliteStorage), the `Storage` implementation
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `smarthome-app` (for port traits) and `smarthome-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod codec;
pub mod error;
pub mod pool;

pub mod actuator_repo;
pub mod catalog_repo;
pub mod device_repo;
pub mod house_repo;
pub mod reading_repo;
pub mod room_repo;
pub mod sensor_repo;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use actuator_repo::SqliteActuatorRepository;
pub use catalog_repo::{
    SqliteActuatorModelRepository, SqliteActuatorTypeRepository, SqliteDeviceTypeRepository,
    SqliteSensorModelRepository, SqliteSensorTypeRepository,
};
pub use device_repo::SqliteDeviceRepository;
pub use error::StorageError;
pub use house_repo::SqliteHouseRepository;
pub use pool::{Config, Database};
pub use reading_repo::SqliteReadingRepository;
pub use room_repo::SqliteRoomRepository;
pub use sensor_repo::SqliteSensorRepository;
pub use storage::SqliteStorage;
