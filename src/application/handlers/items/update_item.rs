//! UpdateItemHandler - Command handler for partial item updates.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::foundation::{ItemId, Timestamp, UserId};
use crate::domain::planner::{ItemError, ItemKind};
use crate::ports::ItemRepository;

/// Command to apply a client payload to an existing item.
#[derive(Debug, Clone)]
pub struct UpdateItemCommand {
    pub kind: ItemKind,
    pub user_id: UserId,
    pub item_id: ItemId,
    pub payload: Value,
}

/// Handler for updating items.
pub struct UpdateItemHandler {
    repository: Arc<dyn ItemRepository>,
}

impl UpdateItemHandler {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateItemCommand) -> Result<(), ItemError> {
        // Items owned by someone else look exactly like missing ones
        let mut item = self
            .repository
            .find_by_id(cmd.kind, &cmd.item_id)
            .await?
            .filter(|item| item.is_owned_by(&cmd.user_id))
            .ok_or_else(|| ItemError::not_found(cmd.item_id.clone()))?;

        let payload = cmd
            .payload
            .as_object()
            .ok_or_else(|| ItemError::invalid_payload("Request body must be a JSON object"))?;

        item.apply_update(payload, Timestamp::now().date())?;
        self.repository.update(&item).await?;

        debug!(kind = %cmd.kind, item_id = %cmd.item_id, "Item updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryItemRepository;
    use crate::domain::planner::{current_streak, PlannerItem};
    use serde_json::json;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn setup(kind: ItemKind, payload: Value) -> (Arc<InMemoryItemRepository>, UpdateItemHandler) {
        let repo = Arc::new(InMemoryItemRepository::new());
        let item = PlannerItem::create(
            kind,
            ItemId::new("1").unwrap(),
            user("alice"),
            payload.as_object().unwrap(),
            Timestamp::now().date(),
        )
        .unwrap();
        repo.insert(&item).await.unwrap();
        let handler = UpdateItemHandler::new(repo.clone());
        (repo, handler)
    }

    fn command(kind: ItemKind, owner: &str, payload: Value) -> UpdateItemCommand {
        UpdateItemCommand {
            kind,
            user_id: user(owner),
            item_id: ItemId::new("1").unwrap(),
            payload,
        }
    }

    #[tokio::test]
    async fn applies_known_columns() {
        let (repo, handler) = setup(ItemKind::Task, json!({"text": "draft"})).await;
        handler
            .handle(command(
                ItemKind::Task,
                "alice",
                json!({"status": "DONE", "bogus": 1, "id": "other"}),
            ))
            .await
            .unwrap();

        let stored = repo
            .find_by_id(ItemKind::Task, &ItemId::new("1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.get("status"), &json!("DONE"));
        assert_eq!(stored.get("text"), &json!("draft"));
        assert!(stored.fields().get("bogus").is_none());
    }

    #[tokio::test]
    async fn other_users_item_is_not_found() {
        let (_repo, handler) = setup(ItemKind::Goal, json!({"text": "mine"})).await;
        let err = handler
            .handle(command(ItemKind::Goal, "bob", json!({"text": "theirs"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let (_repo, handler) = setup(ItemKind::Goal, json!({"text": "mine"})).await;
        let err = handler
            .handle(command(ItemKind::Reminder, "alice", json!({"text": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::NotFound(_)));
    }

    #[tokio::test]
    async fn invalid_value_leaves_item_untouched() {
        let (repo, handler) = setup(ItemKind::Task, json!({"text": "keep"})).await;
        let err = handler
            .handle(command(
                ItemKind::Task,
                "alice",
                json!({"text": "changed", "date": "x".repeat(21)}),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::ValidationFailed { .. }));

        let stored = repo
            .find_by_id(ItemKind::Task, &ItemId::new("1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.get("text"), &json!("keep"));
    }

    #[tokio::test]
    async fn habit_completions_refresh_streak() {
        let (repo, handler) = setup(ItemKind::Habit, json!({"text": "Read"})).await;
        let today = Timestamp::now().date();
        let yesterday = today.pred_opt().unwrap();
        let completions = json!([
            {"date": today.format("%Y-%m-%d").to_string(), "completed": true},
            {"date": yesterday.format("%Y-%m-%d").to_string(), "completed": true},
        ]);

        handler
            .handle(command(
                ItemKind::Habit,
                "alice",
                json!({"completions": completions.clone()}),
            ))
            .await
            .unwrap();

        let stored = repo
            .find_by_id(ItemKind::Habit, &ItemId::new("1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.get("streak"), &json!(current_streak(&completions, today)));
        assert_eq!(stored.get("streak"), &json!(2));
    }
}
