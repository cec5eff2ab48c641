//! Actuators and their catalogs.
//!
//! An [`ActuatorType`] names a kind of action, an [`ActuatorModel`] is a
//! concrete actuator of one type, and an [`Actuator`] is an instance of a
//! model attached to a device.

use serde::{Deserialize, Serialize};

use crate::id::{ActuatorId, ActuatorModelName, ActuatorTypeName, DeviceId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActuatorType {
    pub name: ActuatorTypeName,
}

/// Catalog entry describing a kind of actuator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActuatorModel {
    pub name: ActuatorModelName,
    pub actuator_type: ActuatorTypeName,
}

/// An actuator attached to a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actuator {
    pub id: ActuatorId,
    pub device_id: DeviceId,
    pub model: ActuatorModelName,
}

impl Actuator {
    #[must_use]
    pub fn new(device_id: DeviceId, model: ActuatorModelName) -> Self {
        Self {
            id: ActuatorId::new(),
            device_id,
            model,
        }
    }
}
