//! Generic item handlers.
//!
//! One set of handlers serves tasks, goals, reminders and habits; the
//! `ItemKind` on each command selects the table and column set.

mod add_item;
mod delete_item;
mod list_items;
mod update_item;

pub use add_item::{AddItemCommand, AddItemHandler};
pub use delete_item::{DeleteItemCommand, DeleteItemHandler};
pub use list_items::{ListItemsHandler, ListItemsQuery};
pub use update_item::{UpdateItemCommand, UpdateItemHandler};
