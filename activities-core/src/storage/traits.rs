use crate::common::error::Result;
use crate::domain::{Activity, ActivityFilter, ActivityInput};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage trait for persisting activities.
///
/// Each method is one storage operation; callers never compose them into
/// a transaction. `list` makes no ordering promise.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn list(&self, filter: &ActivityFilter) -> Result<Vec<Activity>>;
    async fn get(&self, id: Uuid) -> Result<Option<Activity>>;

    /// Store a new activity under a freshly generated id.
    async fn insert(&self, input: ActivityInput) -> Result<Activity>;

    /// Overwrite every field of an existing activity. `None` if absent.
    async fn replace(&self, id: Uuid, input: ActivityInput) -> Result<Option<Activity>>;

    /// Hard delete. `false` if there was nothing to delete.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
