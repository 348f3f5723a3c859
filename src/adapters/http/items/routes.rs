//! HTTP routes for item endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use crate::adapters::http::spa::api_not_found;

use super::handlers::{add_item, delete_item, list_items, update_item, ItemHandlers};

/// Creates the router for one item collection, e.g. `/api/tasks`.
pub fn item_routes(handlers: ItemHandlers) -> Router {
    let collection = format!("/api/{}", handlers.kind().table());
    let member = format!("{}/:id", collection);

    Router::new()
        .route(
            &collection,
            get(list_items).post(add_item).fallback(api_not_found),
        )
        .route(
            &member,
            put(update_item).delete(delete_item).fallback(api_not_found),
        )
        .with_state(handlers)
}
