//! Planner item kinds and their column sets.
//!
//! Each kind maps to its own table. The generic CRUD handlers never know
//! which kind they serve; they look the column set up here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free text, optionally bounded in characters.
    Text { max_len: Option<usize> },
    /// 32-bit signed integer.
    Integer,
    /// Arbitrary JSON document.
    Json,
}

/// Value a column takes when a new item's payload does not mention it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Null,
    Text(&'static str),
    Integer(i32),
    EmptyList,
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            FieldDefault::Null => Value::Null,
            FieldDefault::Text(s) => Value::String(s.to_string()),
            FieldDefault::Integer(n) => Value::from(n),
            FieldDefault::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// Description of a single user-editable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    /// Column is NOT NULL and has no default.
    pub required: bool,
    pub default: FieldDefault,
}

impl FieldSpec {
    const fn text(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Text { max_len: None },
            required: false,
            default: FieldDefault::Null,
        }
    }

    const fn varchar(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            field_type: FieldType::Text {
                max_len: Some(max_len),
            },
            required: false,
            default: FieldDefault::Null,
        }
    }

    const fn json(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Json,
            required: false,
            default: FieldDefault::EmptyList,
        }
    }

    const fn integer(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Integer,
            required: false,
            default: FieldDefault::Null,
        }
    }

    const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    const fn with_default(self, default: FieldDefault) -> Self {
        Self { default, ..self }
    }
}

const TEXT: FieldSpec = FieldSpec::text("text").required();
const DATE: FieldSpec = FieldSpec::varchar("date", 20);

const TASK_FIELDS: &[FieldSpec] = &[
    TEXT,
    DATE,
    FieldSpec::json("tags"),
    FieldSpec::varchar("status", 50).with_default(FieldDefault::Text(DEFAULT_TASK_STATUS)),
    FieldSpec::text("note"),
];

const GOAL_FIELDS: &[FieldSpec] = &[TEXT, FieldSpec::varchar("priority", 20), DATE];

const REMINDER_FIELDS: &[FieldSpec] = &[
    TEXT,
    DATE,
    FieldSpec::varchar("time", 10),
    FieldSpec::varchar("repeat", 20),
];

const HABIT_FIELDS: &[FieldSpec] = &[
    TEXT,
    FieldSpec::varchar("frequency", 50),
    FieldSpec::json("completions"),
    FieldSpec::integer("streak").with_default(FieldDefault::Integer(0)),
];

/// Status given to tasks created without one.
pub const DEFAULT_TASK_STATUS: &str = "NOT STARTED";

/// The four kinds of planner items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Task,
    Goal,
    Reminder,
    Habit,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Task,
        ItemKind::Goal,
        ItemKind::Reminder,
        ItemKind::Habit,
    ];

    /// Table name, also used as the URL collection segment.
    pub fn table(&self) -> &'static str {
        match self {
            ItemKind::Task => "tasks",
            ItemKind::Goal => "goals",
            ItemKind::Reminder => "reminders",
            ItemKind::Habit => "habits",
        }
    }

    /// Human readable singular name.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Task => "Task",
            ItemKind::Goal => "Goal",
            ItemKind::Reminder => "Reminder",
            ItemKind::Habit => "Habit",
        }
    }

    /// User-editable columns, in table order (excluding `id` and `user_id`).
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            ItemKind::Task => TASK_FIELDS,
            ItemKind::Goal => GOAL_FIELDS,
            ItemKind::Reminder => REMINDER_FIELDS,
            ItemKind::Habit => HABIT_FIELDS,
        }
    }

    /// Looks up a column by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|k| k.table() == s)
            .ok_or_else(|| format!("unknown item kind: {}", s))
    }
}
