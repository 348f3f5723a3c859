//! ListItemsHandler - Query handler for a user's items of one kind.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::planner::{ItemError, ItemKind, PlannerItem};
use crate::ports::ItemRepository;

/// Query for every item of a kind owned by a user.
#[derive(Debug, Clone)]
pub struct ListItemsQuery {
    pub kind: ItemKind,
    pub user_id: UserId,
}

/// Handler for listing items.
pub struct ListItemsHandler {
    repository: Arc<dyn ItemRepository>,
}

impl ListItemsHandler {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListItemsQuery) -> Result<Vec<PlannerItem>, ItemError> {
        let items = self
            .repository
            .list_for_user(query.kind, &query.user_id)
            .await?;
        Ok(items)
    }
}
