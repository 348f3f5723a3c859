//! PlannerItem aggregate.
//!
//! A single row of one of the four planner tables. Column values are kept as
//! JSON so that the CRUD handlers can stay generic over the item kind, but
//! every write goes through the kind's column set and type checks.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::domain::foundation::{ItemId, UserId, ValidationError};

use super::kind::{FieldSpec, FieldType, ItemKind};
use super::streak::current_streak;

/// Payload keys that are never written from client input.
const PROTECTED_KEYS: [&str; 2] = ["id", "user_id"];

/// A task, goal, reminder or habit owned by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerItem {
    kind: ItemKind,
    id: ItemId,
    user_id: UserId,
    fields: Map<String, Value>,
}

impl PlannerItem {
    /// Builds a new item from a client payload.
    ///
    /// Unknown keys, `id` and `user_id` are ignored. Columns the payload does
    /// not mention take their default. `today` anchors the habit streak.
    pub fn create(
        kind: ItemKind,
        id: ItemId,
        owner: UserId,
        payload: &Map<String, Value>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let mut fields: Map<String, Value> = kind
            .fields()
            .iter()
            .map(|spec| (spec.name.to_string(), spec.default.to_value()))
            .collect();

        let accepted = accept_payload(kind, payload)?;
        fields.extend(accepted.clone());

        for spec in kind.fields().iter().filter(|spec| spec.required) {
            if fields.get(spec.name).map_or(true, Value::is_null) {
                return Err(ValidationError::required(spec.name));
            }
        }

        let mut item = Self {
            kind,
            id,
            user_id: owner,
            fields,
        };
        item.refresh_streak(&accepted, today);
        Ok(item)
    }

    /// Rebuilds an item from storage without validation.
    pub fn reconstitute(
        kind: ItemKind,
        id: ItemId,
        user_id: UserId,
        fields: Map<String, Value>,
    ) -> Self {
        Self {
            kind,
            id,
            user_id,
            fields,
        }
    }

    /// Applies a partial update from a client payload.
    ///
    /// The whole payload is validated before any column changes.
    pub fn apply_update(
        &mut self,
        payload: &Map<String, Value>,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        let accepted = accept_payload(self.kind, payload)?;
        self.fields.extend(accepted.clone());
        self.refresh_streak(&accepted, today);
        Ok(())
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Value of a column, `Null` when absent.
    pub fn get(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&Value::Null)
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// API representation: `id` plus every column except `user_id`.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::with_capacity(self.fields.len() + 1);
        obj.insert("id".to_string(), Value::String(self.id.to_string()));
        for spec in self.kind.fields() {
            obj.insert(spec.name.to_string(), self.get(spec.name).clone());
        }
        Value::Object(obj)
    }

    /// Habits derive their streak from completions unless the client set it.
    fn refresh_streak(&mut self, accepted: &Map<String, Value>, today: NaiveDate) {
        if self.kind != ItemKind::Habit
            || !accepted.contains_key("completions")
            || accepted.contains_key("streak")
        {
            return;
        }
        let streak = current_streak(self.get("completions"), today);
        self.fields.insert("streak".to_string(), Value::from(streak));
    }
}

/// Filters a payload down to the kind's columns and type-checks each value.
fn accept_payload(
    kind: ItemKind,
    payload: &Map<String, Value>,
) -> Result<Map<String, Value>, ValidationError> {
    let mut accepted = Map::new();
    for (key, value) in payload {
        if PROTECTED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let Some(spec) = kind.field(key) else {
            continue;
        };
        check_value(spec, value)?;
        accepted.insert(key.clone(), value.clone());
    }
    Ok(accepted)
}

fn check_value(spec: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    if value.is_null() {
        return if spec.required {
            Err(ValidationError::required(spec.name))
        } else {
            Ok(())
        };
    }

    match spec.field_type {
        FieldType::Text { max_len } => {
            let Some(text) = value.as_str() else {
                return Err(ValidationError::invalid_format(spec.name, "must be a string"));
            };
            if text.contains('\0') {
                return Err(nul_error(spec.name));
            }
            match max_len {
                Some(max) if text.chars().count() > max => {
                    Err(ValidationError::too_long(spec.name, max))
                }
                _ => Ok(()),
            }
        }
        FieldType::Integer => match value.as_i64() {
            Some(n) if i32::try_from(n).is_ok() => Ok(()),
            _ => Err(ValidationError::invalid_format(
                spec.name,
                "must be a 32-bit integer",
            )),
        },
        FieldType::Json if contains_nul(value) => Err(nul_error(spec.name)),
        FieldType::Json => Ok(()),
    }
}

/// Postgres TEXT and JSONB cannot store U+0000, in values or object keys.
fn contains_nul(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\0'),
        Value::Array(items) => items.iter().any(contains_nul),
        Value::Object(obj) => obj.iter().any(|(k, v)| k.contains('\0') || contains_nul(v)),
        _ => false,
    }
}

fn nul_error(field: &str) -> ValidationError {
    ValidationError::invalid_format(field, "must not contain NUL characters")
}
