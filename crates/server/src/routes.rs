use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Message};
use service::store::ItemRepository;

pub mod items;

pub const ROOT_MESSAGE: &str = "Mock Items API is running successfully";

/// Shared handler state: the item collection behind its repository trait.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
}

impl AppState {
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }
}

pub async fn root() -> Json<Message> {
    Json(Message::new(ROOT_MESSAGE))
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    // Express-style non-strict routing: a trailing slash reaches the same handlers
    let collection = get(items::list_items).post(items::create_item);
    let member = get(items::get_item)
        .put(items::update_item)
        .delete(items::delete_item);
    let item_routes = Router::new()
        .route("/items", collection.clone())
        .route("/items/", collection)
        .route("/items/:id", member.clone())
        .route("/items/:id/", member);

    public
        .merge(item_routes)
        .fallback(items::not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
