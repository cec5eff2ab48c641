//! Sensors and their catalogs.
//!
//! A [`SensorType`] names a measured quantity and its unit, a
//! [`SensorModel`] is a kind of sensor measuring one type, and a [`Sensor`]
//! is an instance of a model attached to a device.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DeviceId, SensorId, SensorModelName, SensorTypeId};

/// A measured quantity and its unit, e.g. `Temperature` in `Celsius`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorType {
    pub id: SensorTypeId,
    pub name: String,
    pub unit: String,
}

impl SensorType {
    /// Create a sensor type whose id is `name` followed by `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when either part is blank.
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let unit = unit.into();
        if name.trim().is_empty() || unit.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let id = SensorTypeId::new(format!("{name}{unit}"))?;
        Ok(Self { id, name, unit })
    }
}

/// Catalog entry describing a kind of sensor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorModel {
    pub name: SensorModelName,
    pub sensor_type_id: SensorTypeId,
}

/// A sensor attached to a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: SensorId,
    pub device_id: DeviceId,
    pub model: SensorModelName,
}

impl Sensor {
    #[must_use]
    pub fn new(device_id: DeviceId, model: SensorModelName) -> Self {
        Self {
            id: SensorId::new(),
            device_id,
            model,
        }
    }
}
