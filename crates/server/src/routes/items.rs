use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use service::errors::ServiceError;
use service::items::{parse_item_id, Item, ItemId, ItemPayload};

use super::AppState;
use crate::errors::ApiError;

pub const DELETED_MESSAGE: &str = "Item deleted successfully";

/// A segment that is not an integer matches no item.
fn item_id(raw: &str) -> Result<ItemId, ApiError> {
    parse_item_id(raw).ok_or_else(|| ServiceError::not_found("Item").into())
}

/// Request body as a JSON object.
///
/// A request without a JSON content type (usually no body at all) counts as `{}`.
/// Broken JSON, non-object JSON and oversized bodies are rejected with the
/// status axum assigns (400, 422, 413).
fn body(payload: Result<Json<ItemPayload>, JsonRejection>) -> Result<ItemPayload, ApiError> {
    match payload {
        Ok(Json(p)) => Ok(p),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(ItemPayload::new()),
        Err(rejection) => Err(rejection.into()),
    }
}

/// List all items in insertion order
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.items.list().await)
}

/// Fetch one item by id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = item_id(&id)?;
    Ok(Json(state.items.get(id).await?))
}

/// Create an item; answers 201 with the assigned id
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let created = state.items.create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Merge the body into an existing item (the URL id always wins)
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    // id first: an unknown item is 404 even when the body is bad
    let id = item_id(&id)?;
    let payload = body(payload)?;
    Ok(Json(state.items.update(id, payload).await?))
}

/// Delete an item by id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = item_id(&id)?;
    state.items.delete(id).await?;
    Ok(Json(Message::new(DELETED_MESSAGE)))
}

/// Unmatched method/path, answered in JSON like every other route
pub async fn not_found(method: axum::http::Method, uri: axum::http::Uri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, format!("Cannot {} {}", method, uri.path()))
}
