use super::traits::Storage;
use crate::common::error::{Result, StoreError};
use crate::database::DatabaseManager;
use crate::domain::dates::{format_datetime, format_day, parse_datetime};
use crate::domain::{Activity, ActivityFilter, ActivityInput};
use async_trait::async_trait;
use libsql::{Row, Value};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, category, date, city, venue FROM activities";

/// Relational storage backed by a local libSQL database, one row per activity.
pub struct DatabaseStorage {
    db: Arc<DatabaseManager>,
}

impl DatabaseStorage {
    /// Open the database at `path` and bring its schema up to date.
    pub async fn open(path: &str) -> Result<Self> {
        let db_manager = DatabaseManager::open(path).await?;
        db_manager.run_migrations().await?;
        Ok(Self::with_manager(Arc::new(db_manager)))
    }

    pub fn with_manager(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    fn db_error(context: &'static str) -> impl FnOnce(libsql::Error) -> StoreError {
        move |e| StoreError::Database {
            message: format!("{context}: {e}"),
        }
    }

    fn text(row: &Row, idx: i32, column: &str) -> Result<Option<String>> {
        match row.get_value(idx).map_err(Self::db_error("Failed to read column"))? {
            Value::Text(s) => Ok(Some(s)),
            Value::Null => Ok(None),
            other => Err(StoreError::CorruptRecord {
                id: String::new(),
                message: format!("column {column} holds {other:?}"),
            }),
        }
    }

    fn row_to_activity(row: &Row) -> Result<Activity> {
        let raw_id = Self::text(row, 0, "id")?.unwrap_or_default();
        let corrupt = |message: String| StoreError::CorruptRecord {
            id: raw_id.clone(),
            message,
        };

        let id = Uuid::parse_str(&raw_id).map_err(|e| corrupt(format!("invalid id: {e}")))?;
        let raw_date = Self::text(row, 4, "date")?.unwrap_or_default();
        let date = parse_datetime(&raw_date).map_err(|e| corrupt(e.to_string()))?;

        Ok(Activity {
            id,
            title: Self::text(row, 1, "title")?.unwrap_or_default(),
            description: Self::text(row, 2, "description")?,
            category: Self::text(row, 3, "category")?.unwrap_or_default(),
            date,
            city: Self::text(row, 5, "city")?.unwrap_or_default(),
            venue: Self::text(row, 6, "venue")?.unwrap_or_default(),
        })
    }

    async fn collect(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Activity>> {
        let mut rows = self
            .db
            .connection()
            .query(sql, params)
            .await
            .map_err(Self::db_error("Failed to query activities"))?;

        let mut activities = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(Self::db_error("Failed to read row"))?
        {
            activities.push(Self::row_to_activity(&row)?);
        }
        Ok(activities)
    }

    fn field_values(activity: &Activity) -> Vec<Value> {
        vec![
            Value::Text(activity.title.clone()),
            activity
                .description
                .clone()
                .map(Value::Text)
                .unwrap_or(Value::Null),
            Value::Text(activity.category.clone()),
            Value::Text(format_datetime(&activity.date)),
            Value::Text(activity.city.clone()),
            Value::Text(activity.venue.clone()),
            Value::Text(activity.id.to_string()),
        ]
    }
}

#[async_trait]
impl Storage for DatabaseStorage {
    async fn list(&self, filter: &ActivityFilter) -> Result<Vec<Activity>> {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        if let Some(day) = filter.date {
            clauses.push("date(date) = ?");
            params.push(Value::Text(format_day(&day)));
        }
        if let Some(category) = &filter.category {
            clauses.push("category = ?");
            params.push(Value::Text(category.clone()));
        }
        if let Some(city) = &filter.city {
            clauses.push("city = ?");
            params.push(Value::Text(city.clone()));
        }

        let sql = if clauses.is_empty() {
            SELECT_COLUMNS.to_string()
        } else {
            format!("{SELECT_COLUMNS} WHERE {}", clauses.join(" AND "))
        };

        let activities = self.collect(&sql, params).await?;
        debug!("Listed {} activities for {:?}", activities.len(), filter);
        Ok(activities)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Activity>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?");
        let mut found = self
            .collect(&sql, vec![Value::Text(id.to_string())])
            .await?;
        Ok(found.pop())
    }

    async fn insert(&self, input: ActivityInput) -> Result<Activity> {
        let activity = input.into_activity(Uuid::new_v4());

        self.db
            .connection()
            .execute(
                "INSERT INTO activities (title, description, category, date, city, venue, id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                Self::field_values(&activity),
            )
            .await
            .map_err(Self::db_error("Failed to insert activity"))?;

        info!("Created activity: {} with id {}", activity.title, activity.id);
        Ok(activity)
    }

    async fn replace(&self, id: Uuid, input: ActivityInput) -> Result<Option<Activity>> {
        let activity = input.into_activity(id);

        let updated = self
            .db
            .connection()
            .execute(
                "UPDATE activities
                 SET title = ?1, description = ?2, category = ?3, date = ?4, city = ?5, venue = ?6
                 WHERE id = ?7",
                Self::field_values(&activity),
            )
            .await
            .map_err(Self::db_error("Failed to update activity"))?;

        if updated == 0 {
            return Ok(None);
        }

        info!("Updated activity: {} with id {}", activity.title, id);
        Ok(Some(activity))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let deleted = self
            .db
            .connection()
            .execute(
                "DELETE FROM activities WHERE id = ?1",
                vec![Value::Text(id.to_string())],
            )
            .await
            .map_err(Self::db_error("Failed to delete activity"))?;

        if deleted > 0 {
            info!("Deleted activity {}", id);
        }
        Ok(deleted > 0)
    }
}
