//! PostgreSQL implementation of ItemRepository.
//!
//! One repository serves all four planner tables. Column lists and bind
//! types come from the kind's field set, so the SQL is assembled per call.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Row};

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, UserId};
use crate::domain::planner::{FieldSpec, FieldType, ItemKind, PlannerItem};
use crate::ports::ItemRepository;

/// PostgreSQL implementation of ItemRepository.
#[derive(Clone)]
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    /// Creates a new PostgresItemRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn list_for_user(
        &self,
        kind: ItemKind,
        user_id: &UserId,
    ) -> Result<Vec<PlannerItem>, DomainError> {
        let sql = format!(
            "SELECT id, user_id, {} FROM {} WHERE user_id = $1",
            column_list(kind),
            kind.table()
        );
        let rows = sqlx::query(&sql)
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(&format!("Failed to list {}", kind.table()), e))?;

        rows.iter().map(|row| row_to_item(kind, row)).collect()
    }

    async fn insert(&self, item: &PlannerItem) -> Result<(), DomainError> {
        let kind = item.kind();
        let fields = kind.fields();
        let placeholders = (3..fields.len() + 3)
            .map(|n| format!("${}", n))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} (id, user_id, {}) VALUES ($1, $2, {})",
            kind.table(),
            column_list(kind),
            placeholders
        );

        let mut query = sqlx::query(&sql)
            .bind(item.id().as_str())
            .bind(item.user_id().as_str());
        for spec in fields {
            query = bind_field(query, spec, item.get(spec.name));
        }

        match query.execute(&self.pool).await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::ItemAlreadyExists,
                    format!("{} already exists: {}", kind.label(), item.id()),
                )
                .with_detail("id", item.id().as_str()))
            }
            Err(e) => Err(DomainError::database(
                &format!("Failed to insert into {}", kind.table()),
                e,
            )),
        }
    }

    async fn find_by_id(
        &self,
        kind: ItemKind,
        id: &ItemId,
    ) -> Result<Option<PlannerItem>, DomainError> {
        let sql = format!(
            "SELECT id, user_id, {} FROM {} WHERE id = $1",
            column_list(kind),
            kind.table()
        );
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(&format!("Failed to fetch from {}", kind.table()), e))?;

        row.map(|row| row_to_item(kind, &row)).transpose()
    }

    async fn update(&self, item: &PlannerItem) -> Result<(), DomainError> {
        let kind = item.kind();
        let assignments = kind
            .fields()
            .iter()
            .enumerate()
            .map(|(i, spec)| format!("\"{}\" = ${}", spec.name, i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = $1", kind.table(), assignments);

        let mut query = sqlx::query(&sql).bind(item.id().as_str());
        for spec in kind.fields() {
            query = bind_field(query, spec, item.get(spec.name));
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(&format!("Failed to update {}", kind.table()), e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(kind, item.id()));
        }

        Ok(())
    }

    async fn delete(&self, kind: ItemKind, id: &ItemId) -> Result<(), DomainError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&sql)
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(&format!("Failed to delete from {}", kind.table()), e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(kind, id));
        }

        Ok(())
    }
}

// === Helper functions ===

fn column_list(kind: ItemKind) -> String {
    kind.fields()
        .iter()
        .map(|spec| format!("\"{}\"", spec.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn bind_field<'q>(
    query: Query<'q, Postgres, PgArguments>,
    spec: &FieldSpec,
    value: &Value,
) -> Query<'q, Postgres, PgArguments> {
    match spec.field_type {
        FieldType::Text { .. } => query.bind(value.as_str().map(str::to_owned)),
        FieldType::Integer => query.bind(value.as_i64().and_then(|n| i32::try_from(n).ok())),
        FieldType::Json if value.is_null() => query.bind(None::<Json<Value>>),
        FieldType::Json => query.bind(Some(Json(value.clone()))),
    }
}

fn row_to_item(kind: ItemKind, row: &PgRow) -> Result<PlannerItem, DomainError> {
    let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
    let user_id: String = row.try_get("user_id").map_err(|e| column_error("user_id", e))?;

    let mut fields = Map::with_capacity(kind.fields().len());
    for spec in kind.fields() {
        let value = match spec.field_type {
            FieldType::Text { .. } => row
                .try_get::<Option<String>, _>(spec.name)
                .map(|v| v.map_or(Value::Null, Value::String)),
            FieldType::Integer => row
                .try_get::<Option<i32>, _>(spec.name)
                .map(|v| v.map_or(Value::Null, Value::from)),
            FieldType::Json => row
                .try_get::<Option<Json<Value>>, _>(spec.name)
                .map(|v| v.map_or(Value::Null, |json| json.0)),
        }
        .map_err(|e| column_error(spec.name, e))?;
        fields.insert(spec.name.to_string(), value);
    }

    Ok(PlannerItem::reconstitute(
        kind,
        ItemId::new(id)?,
        UserId::new(user_id)?,
        fields,
    ))
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(&format!("Failed to read column {}", column), e)
}

fn not_found(kind: ItemKind, id: &ItemId) -> DomainError {
    DomainError::new(
        ErrorCode::ItemNotFound,
        format!("{} not found: {}", kind.label(), id),
    )
}
