//! JSON REST handlers for devices.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use smarthome_app::ports::Storage;
use smarthome_domain::device::Device;
use smarthome_domain::id::{DeviceId, DeviceTypeName, RoomId};

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for adding a device to a room.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    pub device_type: String,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and deactivate endpoints.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<S: Storage>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError> {
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/:id`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let device_id: DeviceId = parse_id(&id)?;
    let device = state.device_service.get_device(device_id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `GET /api/rooms/:id/devices`
pub async fn list_in_room<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let room_id: RoomId = parse_id(&id)?;
    let devices = state.device_service.list_devices_in_room(room_id).await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `POST /api/rooms/:id/devices`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError> {
    let room_id: RoomId = parse_id(&id)?;
    let device_type = DeviceTypeName::new(req.device_type)?;
    let device = state
        .device_service
        .add_device(room_id, req.name, device_type)
        .await?;
    Ok(CreateResponse::Created(Json(device)))
}

/// `PUT /api/devices/:id/deactivate`
pub async fn deactivate<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let device_id: DeviceId = parse_id(&id)?;
    let device = state.device_service.deactivate_device(device_id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `GET /api/devices/by-sensor-type`
pub async fn by_sensor_type<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<BTreeMap<String, Vec<Device>>>, ApiError> {
    let groups = state.device_service.devices_by_sensor_type().await?;
    Ok(Json(groups))
}
