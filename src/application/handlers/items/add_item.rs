//! AddItemHandler - Command handler for creating a task, goal, reminder or habit.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::foundation::{ItemId, Timestamp, UserId};
use crate::domain::planner::{ItemError, ItemKind, PlannerItem};
use crate::ports::ItemRepository;

/// Command to create an item from a client payload.
#[derive(Debug, Clone)]
pub struct AddItemCommand {
    pub kind: ItemKind,
    pub user_id: UserId,
    pub payload: Value,
}

/// Handler for creating items.
pub struct AddItemHandler {
    repository: Arc<dyn ItemRepository>,
}

impl AddItemHandler {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AddItemCommand) -> Result<PlannerItem, ItemError> {
        let payload = cmd
            .payload
            .as_object()
            .ok_or_else(|| ItemError::invalid_payload("Request body must be a JSON object"))?;

        // 1. Resolve the id: client-chosen or generated
        let id = ItemId::from_payload(payload.get("id"))?;

        // 2. Build the item; the caller always owns it
        let item = PlannerItem::create(cmd.kind, id, cmd.user_id, payload, Timestamp::now().date())?;

        // 3. Persist
        self.repository.insert(&item).await?;

        debug!(kind = %cmd.kind, item_id = %item.id(), "Item created");
        Ok(item)
    }
}
