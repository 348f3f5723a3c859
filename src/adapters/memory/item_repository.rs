//! In-memory item repository.
//!
//! Stores items per kind in insertion order. Useful for tests and for
//! running the API without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, UserId};
use crate::domain::planner::{ItemKind, PlannerItem};
use crate::ports::ItemRepository;

/// In-memory storage for planner items
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<ItemKind, Vec<PlannerItem>>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items of a kind, across all users
    pub async fn count(&self, kind: ItemKind) -> usize {
        self.items.read().await.get(&kind).map_or(0, Vec::len)
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list_for_user(
        &self,
        kind: ItemKind,
        user_id: &UserId,
    ) -> Result<Vec<PlannerItem>, DomainError> {
        let items = self.items.read().await;
        Ok(items
            .get(&kind)
            .map(|list| {
                list.iter()
                    .filter(|item| item.is_owned_by(user_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, item: &PlannerItem) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        let list = items.entry(item.kind()).or_default();
        if list.iter().any(|existing| existing.id() == item.id()) {
            return Err(DomainError::new(
                ErrorCode::ItemAlreadyExists,
                format!("{} already exists: {}", item.kind().label(), item.id()),
            )
            .with_detail("id", item.id().as_str()));
        }
        list.push(item.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        kind: ItemKind,
        id: &ItemId,
    ) -> Result<Option<PlannerItem>, DomainError> {
        let items = self.items.read().await;
        Ok(items
            .get(&kind)
            .and_then(|list| list.iter().find(|item| item.id() == id))
            .cloned())
    }

    async fn update(&self, item: &PlannerItem) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        let slot = items
            .get_mut(&item.kind())
            .and_then(|list| list.iter_mut().find(|existing| existing.id() == item.id()))
            .ok_or_else(|| not_found(item.kind(), item.id()))?;
        *slot = item.clone();
        Ok(())
    }

    async fn delete(&self, kind: ItemKind, id: &ItemId) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        let list = items.get_mut(&kind).ok_or_else(|| not_found(kind, id))?;
        let pos = list
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| not_found(kind, id))?;
        list.remove(pos);
        Ok(())
    }
}

fn not_found(kind: ItemKind, id: &ItemId) -> DomainError {
    DomainError::new(
        ErrorCode::ItemNotFound,
        format!("{} not found: {}", kind.label(), id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn item(kind: ItemKind, id: &str, owner: &str) -> PlannerItem {
        PlannerItem::create(
            kind,
            ItemId::new(id).unwrap(),
            UserId::new(owner).unwrap(),
            json!({"text": format!("item {id}")}).as_object().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn list_is_scoped_by_owner_and_kind() {
        let repo = InMemoryItemRepository::new();
        repo.insert(&item(ItemKind::Task, "1", "alice")).await.unwrap();
        repo.insert(&item(ItemKind::Task, "2", "bob")).await.unwrap();
        repo.insert(&item(ItemKind::Goal, "3", "alice")).await.unwrap();

        let alice = UserId::new("alice").unwrap();
        let tasks = repo.list_for_user(ItemKind::Task, &alice).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id().as_str(), "1");
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let repo = InMemoryItemRepository::new();
        repo.insert(&item(ItemKind::Habit, "1", "alice")).await.unwrap();
        let err = repo
            .insert(&item(ItemKind::Habit, "1", "bob"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ItemAlreadyExists);
        assert_eq!(err.details.get("id"), Some(&"1".to_string()));
    }

    #[tokio::test]
    async fn same_id_in_different_kinds_is_fine() {
        let repo = InMemoryItemRepository::new();
        repo.insert(&item(ItemKind::Task, "1", "alice")).await.unwrap();
        repo.insert(&item(ItemKind::Goal, "1", "alice")).await.unwrap();
        assert_eq!(repo.count(ItemKind::Task).await, 1);
        assert_eq!(repo.count(ItemKind::Goal).await, 1);
    }

    #[tokio::test]
    async fn update_and_delete_missing_items_fail() {
        let repo = InMemoryItemRepository::new();
        let missing = item(ItemKind::Reminder, "9", "alice");
        assert_eq!(
            repo.update(&missing).await.unwrap_err().code,
            ErrorCode::ItemNotFound
        );
        assert_eq!(
            repo.delete(ItemKind::Reminder, missing.id())
                .await
                .unwrap_err()
                .code,
            ErrorCode::ItemNotFound
        );
    }

    #[tokio::test]
    async fn delete_removes_item() {
        let repo = InMemoryItemRepository::new();
        let task = item(ItemKind::Task, "1", "alice");
        repo.insert(&task).await.unwrap();
        repo.delete(ItemKind::Task, task.id()).await.unwrap();
        assert!(repo
            .find_by_id(ItemKind::Task, task.id())
            .await
            .unwrap()
            .is_none());
    }
}
