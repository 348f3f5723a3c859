//! Planner domain module.
//!
//! Tasks, goals, reminders and habits share one aggregate, `PlannerItem`,
//! parameterised by `ItemKind`. The kind fixes the column set; the aggregate
//! enforces which payload keys may be written and how.

mod errors;
mod item;
mod kind;
mod streak;

pub use errors::ItemError;
pub use item::PlannerItem;
pub use kind::{FieldDefault, FieldSpec, FieldType, ItemKind, DEFAULT_TASK_STATUS};
pub use streak::{completed_days, current_streak};
