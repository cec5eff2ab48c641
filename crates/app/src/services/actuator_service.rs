//! Actuator service — attach actuators to devices and look them up.

use smarthome_domain::actuator::Actuator;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{ActuatorId, ActuatorModelName, DeviceId};

use crate::ports::{ActuatorModelRepository, ActuatorRepository, DeviceRepository, Storage};
use crate::services::found;

/// Application service for actuators.
pub struct ActuatorService<S> {
    storage: S,
}

impl<S: Storage> ActuatorService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Attach an actuator of the given model to a device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device or the actuator
    /// model does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn add_actuator(
        &self,
        device_id: DeviceId,
        model: ActuatorModelName,
    ) -> Result<Actuator, SmartHomeError> {
        let device = self.storage.devices().get_by_id(device_id).await?;
        found(device, "Device", device_id)?;
        let known = self.storage.actuator_models().get_by_name(&model).await?;
        found(known, "ActuatorModel", &model)?;

        self.storage
            .actuators()
            .create(Actuator::new(device_id, model))
            .await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no actuator has `id`.
    #[tracing::instrument(skip(self))]
    pub async fn get_actuator(&self, id: ActuatorId) -> Result<Actuator, SmartHomeError> {
        let actuator = self.storage.actuators().get_by_id(id).await?;
        found(actuator, "Actuator", id)
    }

    /// Ids of the actuators attached to a device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the device does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn list_actuator_ids_for_device(
        &self,
        device_id: DeviceId,
    ) -> Result<Vec<ActuatorId>, SmartHomeError> {
        let device = self.storage.devices().get_by_id(device_id).await?;
        found(device, "Device", device_id)?;
        self.storage.actuators().find_ids_by_device(device_id).await
    }
}
