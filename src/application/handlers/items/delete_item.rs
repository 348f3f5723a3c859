//! DeleteItemHandler - Command handler for removing an item.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::planner::{ItemError, ItemKind};
use crate::ports::ItemRepository;

/// Command to delete one of the caller's items.
#[derive(Debug, Clone)]
pub struct DeleteItemCommand {
    pub kind: ItemKind,
    pub user_id: UserId,
    pub item_id: ItemId,
}

/// Handler for deleting items.
pub struct DeleteItemHandler {
    repository: Arc<dyn ItemRepository>,
}

impl DeleteItemHandler {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteItemCommand) -> Result<(), ItemError> {
        let owned = self
            .repository
            .find_by_id(cmd.kind, &cmd.item_id)
            .await?
            .is_some_and(|item| item.is_owned_by(&cmd.user_id));
        if !owned {
            return Err(ItemError::not_found(cmd.item_id));
        }

        self.repository.delete(cmd.kind, &cmd.item_id).await?;

        debug!(kind = %cmd.kind, item_id = %cmd.item_id, "Item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryItemRepository;
    use crate::domain::planner::PlannerItem;
    use chrono::NaiveDate;
    use serde_json::json;

    async fn setup() -> (Arc<InMemoryItemRepository>, DeleteItemHandler) {
        let repo = Arc::new(InMemoryItemRepository::new());
        let item = PlannerItem::create(
            ItemKind::Reminder,
            ItemId::new("r1").unwrap(),
            UserId::new("alice").unwrap(),
            json!({"text": "Dentist"}).as_object().unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
        .unwrap();
        repo.insert(&item).await.unwrap();
        let handler = DeleteItemHandler::new(repo.clone());
        (repo, handler)
    }

    fn command(owner: &str) -> DeleteItemCommand {
        DeleteItemCommand {
            kind: ItemKind::Reminder,
            user_id: UserId::new(owner).unwrap(),
            item_id: ItemId::new("r1").unwrap(),
        }
    }

    #[tokio::test]
    async fn owner_can_delete() {
        let (repo, handler) = setup().await;
        handler.handle(command("alice")).await.unwrap();
        assert_eq!(repo.count(ItemKind::Reminder).await, 0);
    }

    #[tokio::test]
    async fn other_user_gets_not_found_and_item_survives() {
        let (repo, handler) = setup().await;
        let err = handler.handle(command("bob")).await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound(_)));
        assert_eq!(repo.count(ItemKind::Reminder).await, 1);
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let (_repo, handler) = setup().await;
        handler.handle(command("alice")).await.unwrap();
        assert!(matches!(
            handler.handle(command("alice")).await,
            Err(ItemError::NotFound(_))
        ));
    }
}
