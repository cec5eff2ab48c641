//! Device — a piece of equipment installed in a room, carrying sensors.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DeviceId, DeviceTypeName, RoomId};

/// Catalog entry classifying devices, e.g. `GridPowerMeter`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceType {
    pub name: DeviceTypeName,
}

/// A device installed in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub device_type: DeviceTypeName,
    pub room_id: RoomId,
    pub active: bool,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when `name` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }

    /// Switch the device off for good.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DeviceAlreadyInactive`] when the device was
    /// already deactivated.
    pub fn deactivate(&mut self) -> Result<(), ValidationError> {
        if !self.active {
            return Err(ValidationError::DeviceAlreadyInactive);
        }
        self.active = false;
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    device_type: Option<DeviceTypeName>,
    room_id: Option<RoomId>,
    active: Option<bool>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: DeviceTypeName) -> Self {
        self.device_type = Some(device_type);
        self
    }

    #[must_use]
    pub fn room_id(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// New devices are active unless stated otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if the name or device type is missing.
    pub fn build(self) -> Result<Device, ValidationError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            device_type: self.device_type.ok_or(ValidationError::EmptyName)?,
            room_id: self.room_id.unwrap_or_default(),
            active: self.active.unwrap_or(true),
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thermometer() -> Device {
        Device::builder()
            .name("Thermometer")
            .device_type(DeviceTypeName::new("Thermometer").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_active_device_by_default() {
        assert!(thermometer().active);
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Device::builder()
            .device_type(DeviceTypeName::new("Meter").unwrap())
            .build();
        assert_eq!(result, Err(ValidationError::EmptyName));
    }

    #[test]
    fn should_deactivate_active_device() {
        let mut device = thermometer();
        device.deactivate().unwrap();
        assert!(!device.active);
    }

    #[test]
    fn should_fail_when_deactivating_twice() {
        let mut device = thermometer();
        device.deactivate().unwrap();
        assert_eq!(
            device.deactivate(),
            Err(ValidationError::DeviceAlreadyInactive)
        );
    }
}
