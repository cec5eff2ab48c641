//! JSON REST handlers for actuators.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use smarthome_app::ports::Storage;
use smarthome_domain::actuator::Actuator;
use smarthome_domain::id::{ActuatorId, ActuatorModelName, DeviceId};

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for adding an actuator to a device.
#[derive(Deserialize)]
pub struct CreateActuatorRequest {
    pub model: String,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Actuator>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/actuators/:id`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Actuator>, ApiError> {
    let actuator_id: ActuatorId = parse_id(&id)?;
    let actuator = state.actuator_service.get_actuator(actuator_id).await?;
    Ok(Json(actuator))
}

/// `GET /api/devices/:id/actuators`
///
/// Returns the ids of the device's actuators.
pub async fn list_for_device<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ActuatorId>>, ApiError> {
    let device_id: DeviceId = parse_id(&id)?;
    let ids = state
        .actuator_service
        .list_actuator_ids_for_device(device_id)
        .await?;
    Ok(Json(ids))
}

/// `POST /api/devices/:id/actuators`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<CreateActuatorRequest>,
) -> Result<CreateResponse, ApiError> {
    let device_id: DeviceId = parse_id(&id)?;
    let model = ActuatorModelName::new(req.model)?;
    let actuator = state
        .actuator_service
        .add_actuator(device_id, model)
        .await?;
    Ok(CreateResponse::Created(Json(actuator)))
}
