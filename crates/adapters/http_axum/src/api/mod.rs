//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod actuators;
#[allow(clippy::missing_errors_doc)]
pub mod catalog;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod houses;
#[allow(clippy::missing_errors_doc)]
pub mod readings;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
#[allow(clippy::missing_errors_doc)]
pub mod sensors;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post, put};

use smarthome_app::ports::Storage;
use smarthome_domain::error::ValidationError;
use smarthome_domain::time::{self, Timestamp};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S: Storage>() -> Router<AppState<S>> {
    Router::new()
        // Houses
        .route("/houses", get(houses::list::<S>).post(houses::create::<S>))
        .route("/houses/countries", get(houses::countries::<S>))
        .route("/houses/{name}", get(houses::get::<S>))
        .route("/houses/{name}/location", put(houses::configure_location::<S>))
        .route(
            "/houses/{name}/rooms",
            get(rooms::list_in_house::<S>).post(rooms::create::<S>),
        )
        // Rooms
        .route("/rooms", get(rooms::list::<S>))
        .route("/rooms/{id}", get(rooms::get::<S>))
        .route(
            "/rooms/{id}/devices",
            get(devices::list_in_room::<S>).post(devices::create::<S>),
        )
        // Devices
        .route("/devices", get(devices::list::<S>))
        .route("/devices/by-sensor-type", get(devices::by_sensor_type::<S>))
        .route("/devices/{id}", get(devices::get::<S>))
        .route("/devices/{id}/deactivate", put(devices::deactivate::<S>))
        .route(
            "/devices/{id}/sensors",
            get(sensors::list_for_device::<S>).post(sensors::create::<S>),
        )
        .route(
            "/devices/{id}/actuators",
            get(actuators::list_for_device::<S>).post(actuators::create::<S>),
        )
        .route("/devices/{id}/readings", get(readings::list_for_device::<S>))
        .route(
            "/devices/{id}/reading-ids",
            get(readings::list_ids_for_device::<S>),
        )
        // Sensors
        .route("/sensors/{id}", get(sensors::get::<S>))
        .route("/sensors/{id}/readings", post(readings::record::<S>))
        .route("/sensors/{id}/readings/latest", get(readings::latest::<S>))
        // Actuators
        .route("/actuators/{id}", get(actuators::get::<S>))
        // Readings and aggregations
        .route(
            "/readings/max-temperature-difference",
            get(readings::max_temperature_difference::<S>),
        )
        .route(
            "/readings/peak-power-consumption",
            get(readings::peak_power_consumption::<S>),
        )
        .route("/readings/{id}", get(readings::get::<S>))
        // Catalogs
        .route("/device-types", get(catalog::list_device_types::<S>))
        .route("/sensor-types", get(catalog::list_sensor_types::<S>))
        .route("/sensor-types/{id}", get(catalog::get_sensor_type::<S>))
        .route(
            "/sensor-types/{id}/models",
            get(catalog::list_models_of_type::<S>),
        )
        .route("/sensor-models", get(catalog::list_sensor_models::<S>))
        .route("/sensor-models/{name}", get(catalog::get_sensor_model::<S>))
        .route("/actuator-types", get(catalog::list_actuator_types::<S>))
        .route("/actuator-types/{name}", get(catalog::get_actuator_type::<S>))
        .route(
            "/actuator-types/{name}/models",
            get(catalog::list_actuator_models_of_type::<S>),
        )
        .route("/actuator-models", get(catalog::list_actuator_models::<S>))
        .route(
            "/actuator-models/{name}",
            get(catalog::get_actuator_model::<S>),
        )
}

/// Parse a UUID-backed identifier taken from the path or the query string.
pub(crate) fn parse_id<T: FromStr>(value: &str) -> Result<T, ApiError> {
    T::from_str(value).map_err(|_| ValidationError::InvalidId(value.to_owned()).into())
}

/// Parse an optional RFC 3339 timestamp, leaving absence to the service.
pub(crate) fn parse_timestamp(value: Option<&str>) -> Result<Option<Timestamp>, ApiError> {
    Ok(value.map(time::parse).transpose()?)
}
