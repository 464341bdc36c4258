use super::traits::Storage;
use crate::common::error::Result;
use crate::domain::{Activity, ActivityFilter, ActivityInput};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// In-memory storage implementation for development/testing
#[derive(Clone)]
pub struct InMemoryStorage {
    activities: Arc<Mutex<HashMap<Uuid, Activity>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            activities: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave a half-written map behind:
    // every mutation is a single insert/remove.
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Activity>> {
        self.activities.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn list(&self, filter: &ActivityFilter) -> Result<Vec<Activity>> {
        let activities = self.lock();
        Ok(activities
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Activity>> {
        Ok(self.lock().get(&id).cloned())
    }

    async fn insert(&self, input: ActivityInput) -> Result<Activity> {
        let mut activities = self.lock();
        let mut id = Uuid::new_v4();
        while activities.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let activity = input.into_activity(id);
        activities.insert(id, activity.clone());

        debug!("Created activity: {} with id {}", activity.title, id);
        Ok(activity)
    }

    async fn replace(&self, id: Uuid, input: ActivityInput) -> Result<Option<Activity>> {
        let mut activities = self.lock();
        let Some(slot) = activities.get_mut(&id) else {
            return Ok(None);
        };

        *slot = input.into_activity(id);
        debug!("Updated activity: {} with id {}", slot.title, id);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            debug!("Deleted activity {}", id);
        }
        Ok(removed)
    }
}
