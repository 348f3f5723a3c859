//! HTTP handlers for the item collections.
//!
//! The same four handlers serve `/api/tasks`, `/api/goals`, `/api/reminders`
//! and `/api/habits`; the kind travels in the handler state.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::adapters::http::dto::{ErrorResponse, SuccessResponse};
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::application::handlers::items::{
    AddItemCommand, AddItemHandler, DeleteItemCommand, DeleteItemHandler, ListItemsHandler,
    ListItemsQuery, UpdateItemCommand, UpdateItemHandler,
};
use crate::domain::foundation::ItemId;
use crate::domain::planner::{ItemError, ItemKind};
use crate::ports::ItemRepository;

use super::dto::ItemCreatedResponse;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ItemHandlers {
    kind: ItemKind,
    list_handler: Arc<ListItemsHandler>,
    add_handler: Arc<AddItemHandler>,
    update_handler: Arc<UpdateItemHandler>,
    delete_handler: Arc<DeleteItemHandler>,
}

impl ItemHandlers {
    /// Wires all four handlers for one kind against a repository.
    pub fn new(kind: ItemKind, repository: Arc<dyn ItemRepository>) -> Self {
        Self {
            kind,
            list_handler: Arc::new(ListItemsHandler::new(repository.clone())),
            add_handler: Arc::new(AddItemHandler::new(repository.clone())),
            update_handler: Arc::new(UpdateItemHandler::new(repository.clone())),
            delete_handler: Arc::new(DeleteItemHandler::new(repository)),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/{kind} - List the caller's items
///
/// Anonymous callers get 401 with an empty array, which the client renders
/// as an empty list.
pub async fn list_items(
    State(handlers): State<ItemHandlers>,
    OptionalAuth(user): OptionalAuth,
) -> Response {
    let Some(user) = user else {
        return (StatusCode::UNAUTHORIZED, Json(Vec::<Value>::new())).into_response();
    };

    let query = ListItemsQuery {
        kind: handlers.kind,
        user_id: user.id,
    };

    match handlers.list_handler.handle(query).await {
        Ok(items) => {
            let body: Vec<Value> = items.iter().map(|item| item.to_json()).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_item_error(e),
    }
}

/// POST /api/{kind} - Create an item
pub async fn add_item(
    State(handlers): State<ItemHandlers>,
    RequireAuth(user): RequireAuth,
    body: Bytes,
) -> Response {
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let cmd = AddItemCommand {
        kind: handlers.kind,
        user_id: user.id,
        payload,
    };

    match handlers.add_handler.handle(cmd).await {
        Ok(item) => (StatusCode::OK, Json(ItemCreatedResponse::new(item.id().as_str()))).into_response(),
        Err(e) => handle_item_error(e),
    }
}

/// PUT /api/{kind}/:id - Update an item
pub async fn update_item(
    State(handlers): State<ItemHandlers>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<String>,
    body: Bytes,
) -> Response {
    let Ok(item_id) = ItemId::new(item_id) else {
        return not_found();
    };
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let cmd = UpdateItemCommand {
        kind: handlers.kind,
        user_id: user.id,
        item_id,
        payload,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => handle_item_error(e),
    }
}

/// DELETE /api/{kind}/:id - Delete an item
pub async fn delete_item(
    State(handlers): State<ItemHandlers>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<String>,
) -> Response {
    let Ok(item_id) = ItemId::new(item_id) else {
        return not_found();
    };

    let cmd = DeleteItemCommand {
        kind: handlers.kind,
        user_id: user.id,
        item_id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => handle_item_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_body(body: &Bytes) -> Result<Value, Response> {
    serde_json::from_slice(body).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid JSON body")),
        )
            .into_response()
    })
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found())).into_response()
}

fn handle_item_error(error: ItemError) -> Response {
    match error {
        ItemError::NotFound(_) => not_found(),
        ItemError::AlreadyExists(_) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Item already exists")),
        )
            .into_response(),
        ItemError::InvalidPayload(msg) | ItemError::ValidationFailed { message: msg, .. } => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
        }
        ItemError::Infrastructure(msg) => {
            tracing::error!("Item storage error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
                .into_response()
        }
    }
}
