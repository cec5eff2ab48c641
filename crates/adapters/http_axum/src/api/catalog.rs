//! JSON REST handlers for the device type, sensor and actuator catalogs.

use axum::Json;
use axum::extract::{Path, State};

use smarthome_app::ports::Storage;
use smarthome_domain::actuator::{ActuatorModel, ActuatorType};
use smarthome_domain::device::DeviceType;
use smarthome_domain::id::{ActuatorModelName, ActuatorTypeName, SensorModelName, SensorTypeId};
use smarthome_domain::sensor::{SensorModel, SensorType};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/device-types`
pub async fn list_device_types<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<DeviceType>>, ApiError> {
    Ok(Json(state.catalog_service.list_device_types().await?))
}

/// `GET /api/sensor-types`
pub async fn list_sensor_types<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<SensorType>>, ApiError> {
    Ok(Json(state.catalog_service.list_sensor_types().await?))
}

/// `GET /api/sensor-types/:id`
pub async fn get_sensor_type<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<SensorType>, ApiError> {
    let id = SensorTypeId::new(id)?;
    Ok(Json(state.catalog_service.get_sensor_type(&id).await?))
}

/// `GET /api/sensor-types/:id/models`
pub async fn list_models_of_type<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SensorModel>>, ApiError> {
    let id = SensorTypeId::new(id)?;
    Ok(Json(
        state.catalog_service.list_sensor_models_of_type(&id).await?,
    ))
}

/// `GET /api/sensor-models`
pub async fn list_sensor_models<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<SensorModel>>, ApiError> {
    Ok(Json(state.catalog_service.list_sensor_models().await?))
}

/// `GET /api/sensor-models/:name`
pub async fn get_sensor_model<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<SensorModel>, ApiError> {
    let name = SensorModelName::new(name)?;
    Ok(Json(state.catalog_service.get_sensor_model(&name).await?))
}

/// `GET /api/actuator-types`
pub async fn list_actuator_types<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<ActuatorType>>, ApiError> {
    Ok(Json(state.catalog_service.list_actuator_types().await?))
}

/// `GET /api/actuator-types/:name`
pub async fn get_actuator_type<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<ActuatorType>, ApiError> {
    let name = ActuatorTypeName::new(name)?;
    Ok(Json(state.catalog_service.get_actuator_type(&name).await?))
}

/// `GET /api/actuator-types/:name/models`
pub async fn list_actuator_models_of_type<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ActuatorModel>>, ApiError> {
    let name = ActuatorTypeName::new(name)?;
    Ok(Json(
        state
            .catalog_service
            .list_actuator_models_of_type(&name)
            .await?,
    ))
}

/// `GET /api/actuator-models`
pub async fn list_actuator_models<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<ActuatorModel>>, ApiError> {
    Ok(Json(state.catalog_service.list_actuator_models().await?))
}

/// `GET /api/actuator-models/:name`
pub async fn get_actuator_model<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<ActuatorModel>, ApiError> {
    let name = ActuatorModelName::new(name)?;
    Ok(Json(state.catalog_service.get_actuator_model(&name).await?))
}
