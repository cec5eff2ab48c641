//! Sensor service — attach sensors to devices and look them up.

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, SensorId, SensorModelName};
use smarthome_domain::sensor::Sensor;

use crate::ports::{DeviceRepository, SensorModelRepository, SensorRepository, Storage};
use crate::services::found;

/// Application service for sensors.
pub struct SensorService<S> {
    storage: S,
}

impl<S: Storage> SensorService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Attach a sensor of the given model to a device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device or the sensor model
    /// does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn add_sensor(
        &self,
        device_id: DeviceId,
        model: SensorModelName,
    ) -> Result<Sensor, SmartHomeError> {
        let device = self.storage.devices().get_by_id(device_id).await?;
        found(device, "Device", device_id)?;
        let known = self.storage.sensor_models().get_by_name(&model).await?;
        found(known, "SensorModel", &model)?;

        self.storage
            .sensors()
            .create(Sensor::new(device_id, model))
            .await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no sensor has `id`.
    #[tracing::instrument(skip(self))]
    pub async fn get_sensor(&self, id: SensorId) -> Result<Sensor, SmartHomeError> {
        let sensor = self.storage.sensors().get_by_id(id).await?;
        found(sensor, "Sensor", id)
    }

    /// Ids of the sensors attached to a device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn list_sensor_ids_for_device(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<SensorId>, SmartHomeError> {
        let device = self.storage.devices().get_by_id(device_id).await?;
        found(device, "Device", device_id)?;
        let sensors = self.storage.sensors().find_by_device(device_id).await?;
        Ok(sensors.into_iter().map(|s| s.id).collect())
    }
}
