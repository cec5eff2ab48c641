//! Device service — use-cases for managing devices.

use std::collections::BTreeMap;

use smarthome_domain::device::Device;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::{DeviceId, DeviceTypeName, RoomId};

use crate::ports::{
    DeviceRepository, DeviceTypeRepository, RoomRepository, SensorModelRepository,
    SensorRepository, SensorTypeRepository, Storage,
};
use crate::services::found;

/// Application service for device operations.
pub struct DeviceService<S> {
    storage: S,
}

impl<S: Storage> DeviceService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Install a new, active device in a room.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the room or the device type
    /// does not exist, [`SmartHomeError::Validation`] if invariants fail, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn add_device(
        &self,
        room_id: RoomId,
        name: String,
        device_type: DeviceTypeName,
    ) -> Result<Device, SmartHomeError> {
        let room = self.storage.rooms().get_by_id(room_id).await?;
        found(room, "Room", room_id)?;
        let known = self.storage.device_types().get_by_name(&device_type).await?;
        found(known, "DeviceType", &device_type)?;

        let device = Device::builder()
            .name(name)
            .device_type(device_type)
            .room_id(room_id)
            .build()?;
        self.storage.devices().create(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, SmartHomeError> {
        let device = self.storage.devices().get_by_id(id).await?;
        found(device, "Device", id)
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, SmartHomeError> {
        self.storage.devices().get_all().await
    }

    /// List the devices installed in a room.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the room does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices_in_room(&self, room_id: RoomId) -> Result<Vec<Device>, SmartHomeError> {
        let room = self.storage.rooms().get_by_id(room_id).await?;
        found(room, "Room", room_id)?;
        self.storage.devices().find_by_room(room_id).await
    }

    /// Deactivate a device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for an unknown device and
    /// [`SmartHomeError::Validation`] when it is already inactive.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate_device(&self, id: DeviceId) -> Result<Device, SmartHomeError> {
        let mut device = self.get_device(id).await?;
        device.deactivate()?;
        self.storage.devices().update(device).await
    }

    /// Group devices by the name of the sensor types their sensors measure.
    ///
    /// A device appears once per group however many matching sensors it
    /// carries. Sensor types without any device are left out. Sensors whose
    /// model or type is no longer in the catalog are skipped.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn devices_by_sensor_type(
        &self,
    ) -> Result<BTreeMap<String, Vec<Device>>, SmartHomeError> {
        let mut groups: BTreeMap<String, Vec<Device>> = BTreeMap::new();

        for sensor in self.storage.sensors().get_all().await? {
            let Some(model) = self.storage.sensor_models().get_by_name(&sensor.model).await? else {
                tracing::debug!(model = %sensor.model, "sensor model not in catalog, skipping");
                continue;
            };
            let Some(sensor_type) = self
                .storage
                .sensor_types()
                .get_by_id(&model.sensor_type_id)
                .await?
            else {
                continue;
            };
            let Some(device) = self.storage.devices().get_by_id(sensor.device_id).await? else {
                continue;
            };

            let members = groups.entry(sensor_type.name).or_default();
            if !members.iter().any(|d| d.id == device.id) {
                members.push(device);
            }
        }

        Ok(groups)
    }
}
