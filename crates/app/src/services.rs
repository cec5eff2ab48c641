//! Application services — use-case implementations.
//!
//! Each service struct accepts a [`Storage`](crate::ports::Storage)
//! implementation via a generic parameter (constructor injection), keeping
//! this layer decoupled from concrete adapters.

pub mod actuator_service;
pub mod catalog_service;
pub mod device_service;
pub mod house_service;
pub mod reading_service;
pub mod room_service;
pub mod sensor_service;

use smarthome_domain::error::{NotFoundError, SmartHomeError};

/// Turn a missing lookup into [`SmartHomeError::NotFound`].
pub(crate) fn found<T>(
    value: Option<T>,
    entity: &'static str,
    id: impl ToString,
) -> Result<T, SmartHomeError> {
    value.ok_or_else(|| {
        NotFoundError {
            entity,
            id: id.to_string(),
        }
        .into()
    })
}
