//! JSON REST handlers for sensors.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use smarthome_app::ports::Storage;
use smarthome_domain::id::{DeviceId, SensorId, SensorModelName};
use smarthome_domain::sensor::Sensor;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for adding a sensor to a device.
#[derive(Deserialize)]
pub struct CreateSensorRequest {
    pub model: String,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Sensor>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/sensors/:id`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Sensor>, ApiError> {
    let sensor_id: SensorId = parse_id(&id)?;
    let sensor = state.sensor_service.get_sensor(sensor_id).await?;
    Ok(Json(sensor))
}

/// `GET /api/devices/:id/sensors`
///
/// Returns the ids of the device's sensors.
pub async fn list_for_device<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SensorId>>, ApiError> {
    let device_id: DeviceId = parse_id(&id)?;
    let ids = state
        .sensor_service
        .list_sensor_ids_for_device(device_id)
        .await?;
    Ok(Json(ids))
}

/// `POST /api/devices/:id/sensors`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<CreateSensorRequest>,
) -> Result<CreateResponse, ApiError> {
    let device_id: DeviceId = parse_id(&id)?;
    let model = SensorModelName::new(req.model)?;
    let sensor = state.sensor_service.add_sensor(device_id, model).await?;
    Ok(CreateResponse::Created(Json(sensor)))
}
