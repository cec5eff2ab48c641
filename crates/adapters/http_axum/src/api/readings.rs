//! JSON REST handlers for readings and the aggregation endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use smarthome_app::ports::Storage;
use smarthome_domain::error::ValidationError;
use smarthome_domain::id::{DeviceId, ReadingId, SensorId};
use smarthome_domain::reading::Reading;

use crate::api::{parse_id, parse_timestamp};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for recording a reading.
#[derive(Deserialize)]
pub struct RecordReadingRequest {
    pub value: f64,
    /// RFC 3339. Defaults to the time of the request.
    pub recorded_at: Option<String>,
}

/// Query parameters bounding a period.
#[derive(Deserialize)]
pub struct PeriodQuery {
    /// Start of the period (RFC 3339).
    pub from: Option<String>,
    /// End of the period (RFC 3339), not after now.
    pub to: Option<String>,
}

/// Query parameters for the temperature difference endpoint.
#[derive(Deserialize)]
pub struct TemperatureDifferenceQuery {
    pub device_a: Option<String>,
    pub device_b: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Body of the aggregation endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AggregateResponse {
    pub value: f64,
}

/// Possible responses from the record endpoint.
pub enum CreateResponse {
    Created(Json<Reading>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

fn required_device(value: Option<&str>) -> Result<DeviceId, ApiError> {
    let value = value.ok_or_else(|| ValidationError::InvalidId(String::new()))?;
    parse_id(value)
}

/// `POST /api/sensors/:id/readings`
pub async fn record<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<RecordReadingRequest>,
) -> Result<CreateResponse, ApiError> {
    let sensor_id: SensorId = parse_id(&id)?;
    let recorded_at = parse_timestamp(req.recorded_at.as_deref())?;
    let reading = state
        .reading_service
        .add_reading(sensor_id, req.value, recorded_at)
        .await?;
    Ok(CreateResponse::Created(Json(reading)))
}

/// `GET /api/readings/:id`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Reading>, ApiError> {
    let reading_id: ReadingId = parse_id(&id)?;
    let reading = state.reading_service.get_reading(reading_id).await?;
    Ok(Json(reading))
}

/// `GET /api/sensors/:id/readings/latest`
pub async fn latest<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Reading>, ApiError> {
    let sensor_id: SensorId = parse_id(&id)?;
    let reading = state.reading_service.latest_reading(sensor_id).await?;
    Ok(Json(reading))
}

/// `GET /api/devices/:id/readings?from=&to=`
pub async fn list_for_device<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let device_id: DeviceId = parse_id(&id)?;
    let from = parse_timestamp(params.from.as_deref())?;
    let to = parse_timestamp(params.to.as_deref())?;
    let readings = state
        .reading_service
        .readings_for_device(device_id, from, to)
        .await?;
    Ok(Json(readings))
}

/// `GET /api/devices/:id/reading-ids?from=&to=`
pub async fn list_ids_for_device<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<Vec<ReadingId>>, ApiError> {
    let device_id: DeviceId = parse_id(&id)?;
    let from = parse_timestamp(params.from.as_deref())?;
    let to = parse_timestamp(params.to.as_deref())?;
    let ids = state
        .reading_service
        .reading_ids_for_device(device_id, from, to)
        .await?;
    Ok(Json(ids))
}

/// `GET /api/readings/max-temperature-difference?device_a=&device_b=&from=&to=`
pub async fn max_temperature_difference<S: Storage>(
    State(state): State<AppState<S>>,
    Query(params): Query<TemperatureDifferenceQuery>,
) -> Result<Json<AggregateResponse>, ApiError> {
    let device_a = required_device(params.device_a.as_deref())?;
    let device_b = required_device(params.device_b.as_deref())?;
    let from = parse_timestamp(params.from.as_deref())?;
    let to = parse_timestamp(params.to.as_deref())?;
    let value = state
        .reading_service
        .max_instant_temperature_difference(device_a, device_b, from, to)
        .await?;
    Ok(Json(AggregateResponse { value }))
}

/// `GET /api/readings/peak-power-consumption?from=&to=`
pub async fn peak_power_consumption<S: Storage>(
    State(state): State<AppState<S>>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<AggregateResponse>, ApiError> {
    let from = parse_timestamp(params.from.as_deref())?;
    let to = parse_timestamp(params.to.as_deref())?;
    let value = state
        .reading_service
        .peak_power_consumption(from, to)
        .await?;
    Ok(Json(AggregateResponse { value }))
}
