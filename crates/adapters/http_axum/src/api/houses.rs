//! JSON REST handlers for houses.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use smarthome_app::ports::Storage;
use smarthome_domain::house::{House, Location};
use smarthome_domain::id::HouseName;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a house.
#[derive(Deserialize)]
pub struct CreateHouseRequest {
    pub name: String,
    pub location: Location,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<House>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<House>),
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
    Created(Json<House>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/houses`
pub async fn list<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<ListResponse, ApiError> {
    let houses = state.house_service.list_houses().await?;
    Ok(ListResponse::Ok(Json(houses)))
}

/// `GET /api/houses/countries`
pub async fn countries<S: Storage>(State(state): State<AppState<S>>) -> Json<Vec<String>> {
    Json(state.house_service.available_countries())
}

/// `GET /api/houses/:name`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<GetResponse, ApiError> {
    let name = HouseName::new(name)?;
    let house = state.house_service.get_house(&name).await?;
    Ok(GetResponse::Ok(Json(house)))
}

/// `POST /api/houses`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Json(req): Json<CreateHouseRequest>,
) -> Result<CreateResponse, ApiError> {
    let name = HouseName::new(req.name)?;
    let house = state.house_service.add_house(name, req.location).await?;
    Ok(CreateResponse::Created(Json(house)))
}

/// `PUT /api/houses/:name/location`
pub async fn configure_location<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
    Json(location): Json<Location>,
) -> Result<GetResponse, ApiError> {
    let name = HouseName::new(name)?;
    let house = state
        .house_service
        .configure_location(&name, location)
        .await?;
    Ok(GetResponse::Ok(Json(house)))
}
