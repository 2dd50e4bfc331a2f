//! Route handlers. Thin: decode, call the use case, encode.

use super::error::ApiError;
use super::state::AppState;
use crate::domain::{ChatFailure, ChatReply, ConversationMessage, DomainError, GeoPoint};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ConversationMessage>,
}

#[derive(Debug, Deserialize)]
pub struct AddLocationRequest {
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lng: f64,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ChatFailure> {
    let Json(request) = payload.map_err(|e| ChatFailure::invalid_request(e.body_text()))?;
    debug!(messages = request.messages.len(), "chat request");
    state.chat.send(&request.messages).await.map(Json)
}

pub async fn add_location(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    payload: Result<Json<AddLocationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError(DomainError::Validation(e.body_text())))?;
    debug!("Adding location to trip: {}", trip_id);
    let location = state
        .locations
        .add_location(&trip_id, &request.address)
        .await?;
    Ok((StatusCode::CREATED, Json(location)))
}

pub async fn list_locations(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let locations = state.locations.list_locations(&trip_id).await?;
    Ok(Json(locations))
}

pub async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<ReverseQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lng) {
        return Err(DomainError::Validation(format!(
            "coordinate out of range: {},{}",
            query.lat, query.lng
        ))
        .into());
    }
    let info = state
        .reverse_geocoder
        .lookup(GeoPoint::new(query.lat, query.lng))
        .await;
    Ok(Json(info))
}
