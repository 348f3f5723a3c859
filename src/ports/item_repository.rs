//! Planner item repository port.
//!
//! One repository serves all four item kinds; every call names the kind so
//! implementations can pick the table.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ItemId, UserId};
use crate::domain::planner::{ItemKind, PlannerItem};

/// Persistence for planner items.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items of a kind owned by a user.
    async fn list_for_user(
        &self,
        kind: ItemKind,
        user_id: &UserId,
    ) -> Result<Vec<PlannerItem>, DomainError>;

    /// Insert a new item.
    ///
    /// # Errors
    ///
    /// - `ItemAlreadyExists` (with an `id` detail) if the id is taken
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, item: &PlannerItem) -> Result<(), DomainError>;

    /// Find an item by id regardless of owner.
    async fn find_by_id(
        &self,
        kind: ItemKind,
        id: &ItemId,
    ) -> Result<Option<PlannerItem>, DomainError>;

    /// Overwrite an existing item's columns.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if the item doesn't exist
    async fn update(&self, item: &PlannerItem) -> Result<(), DomainError>;

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if the item doesn't exist
    async fn delete(&self, kind: ItemKind, id: &ItemId) -> Result<(), DomainError>;
}
