//! JSON REST handlers for rooms.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use smarthome_app::ports::Storage;
use smarthome_domain::id::{HouseName, RoomId};
use smarthome_domain::room::{Dimensions, Room};

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for adding a room to a house.
#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    #[serde(default)]
    pub floor: i32,
    pub dimensions: Dimensions,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Room>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Room>),
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
    Created(Json<Room>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/rooms`
pub async fn list<S: Storage>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError> {
    let rooms = state.room_service.list_rooms().await?;
    Ok(ListResponse::Ok(Json(rooms)))
}

/// `GET /api/rooms/:id`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let room_id: RoomId = parse_id(&id)?;
    let room = state.room_service.get_room(room_id).await?;
    Ok(GetResponse::Ok(Json(room)))
}

/// `GET /api/houses/:name/rooms`
pub async fn list_in_house<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<ListResponse, ApiError> {
    let name = HouseName::new(name)?;
    let rooms = state.room_service.list_rooms_in_house(&name).await?;
    Ok(ListResponse::Ok(Json(rooms)))
}

/// `POST /api/houses/:name/rooms`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<CreateResponse, ApiError> {
    let house_name = HouseName::new(name)?;
    let room = state
        .room_service
        .add_room(house_name, req.name, req.floor, req.dimensions)
        .await?;
    Ok(CreateResponse::Created(Json(room)))
}
