//! Shared application state for axum handlers.

use std::sync::Arc;

use smarthome_app::ports::Storage;
use smarthome_app::services::actuator_service::ActuatorService;
use smarthome_app::services::catalog_service::CatalogService;
use smarthome_app::services::device_service::DeviceService;
use smarthome_app::services::house_service::HouseService;
use smarthome_app::services::reading_service::{AggregationConfig, ReadingService};
use smarthome_app::services::room_service::RoomService;
use smarthome_app::services::sensor_service::SensorService;

/// Application state shared across all axum handlers.
///
/// Generic over the storage bundle to avoid dynamic dispatch.
/// `Clone` is implemented manually so only the `Arc` wrappers are cloned.
pub struct AppState<S> {
    pub house_service: Arc<HouseService<S>>,
    pub room_service: Arc<RoomService<S>>,
    pub device_service: Arc<DeviceService<S>>,
    pub sensor_service: Arc<SensorService<S>>,
    pub actuator_service: Arc<ActuatorService<S>>,
    pub catalog_service: Arc<CatalogService<S>>,
    /// Readings and the aggregation engine.
    pub reading_service: Arc<ReadingService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            house_service: Arc::clone(&self.house_service),
            room_service: Arc::clone(&self.room_service),
            device_service: Arc::clone(&self.device_service),
            sensor_service: Arc::clone(&self.sensor_service),
            actuator_service: Arc::clone(&self.actuator_service),
            catalog_service: Arc::clone(&self.catalog_service),
            reading_service: Arc::clone(&self.reading_service),
        }
    }
}

impl<S: Storage> AppState<S> {
    /// Build every service over the same storage.
    pub fn new(storage: S, aggregation: AggregationConfig) -> Self {
        Self {
            house_service: Arc::new(HouseService::new(storage.clone())),
            room_service: Arc::new(RoomService::new(storage.clone())),
            device_service: Arc::new(DeviceService::new(storage.clone())),
            sensor_service: Arc::new(SensorService::new(storage.clone())),
            actuator_service: Arc::new(ActuatorService::new(storage.clone())),
            catalog_service: Arc::new(CatalogService::new(storage.clone())),
            reading_service: Arc::new(ReadingService::new(storage, aggregation)),
        }
    }
}
