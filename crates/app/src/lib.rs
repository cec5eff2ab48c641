//! # smarthome-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   one repository per aggregate (houses, rooms, devices, sensors, readings)
//!   and per catalog (device types, sensor types, sensor models), bundled
//!   behind the [`Storage`](ports::Storage) trait
//! - Define **driving/inbound ports** as use-case structs:
//!   - `HouseService`, `RoomService`, `DeviceService`, `SensorService`
//!   - `CatalogService` — seed and query the catalogs
//!   - `ReadingService` — record readings and run the periodic aggregations
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
