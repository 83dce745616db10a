use std::sync::Arc;

use models::user::{seed_users, User, UserPatch};
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ServiceError;

const ENTITY: &str = "user";

/// Ordered in-memory user collection.
///
/// Iteration order is insertion order; ids are unique at all times.
pub struct UserStore {
    inner: RwLock<Vec<User>>,
}

impl UserStore {
    /// Build a store from initial records, rejecting duplicate ids.
    pub fn new(users: Vec<User>) -> Result<Arc<Self>, ServiceError> {
        for (i, u) in users.iter().enumerate() {
            if users[..i].iter().any(|other| other.id == u.id) {
                return Err(ServiceError::duplicate_id(ENTITY, u.id));
            }
        }
        Ok(Arc::new(Self { inner: RwLock::new(users) }))
    }

    /// Store holding the two startup records.
    pub fn with_seed() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(seed_users()) })
    }

    pub async fn list_all(&self) -> Vec<User> {
        self.inner.read().await.clone()
    }

    pub async fn find_by_id(&self, id: i64) -> Option<User> {
        let users = self.inner.read().await;
        users.iter().find(|u| u.id == id).cloned()
    }

    /// Append a record unless its id is taken.
    pub async fn insert(&self, user: User) -> Result<User, ServiceError> {
        let mut users = self.inner.write().await;
        if users.iter().any(|u| u.id == user.id) {
            return Err(ServiceError::duplicate_id(ENTITY, user.id));
        }
        users.push(user.clone());
        debug!(id = user.id, total = users.len(), "user inserted");
        Ok(user)
    }

    /// Merge `patch` over the record in place. A patch that moves the id onto
    /// another record is rejected and leaves the store untouched.
    pub async fn update_by_id(&self, id: i64, patch: UserPatch) -> Result<User, ServiceError> {
        let mut users = self.inner.write().await;
        let pos = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        if let Some(new_id) = patch.id {
            if new_id != id && users.iter().any(|u| u.id == new_id) {
                return Err(ServiceError::duplicate_id(ENTITY, new_id));
            }
        }
        let record = &mut users[pos];
        record.apply(patch);
        debug!(id, new_id = record.id, "user updated");
        Ok(record.clone())
    }

    /// Remove the record, shifting later ones down. Returns what was removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<User, ServiceError> {
        let mut users = self.inner.write().await;
        let pos = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        let removed = users.remove(pos);
        debug!(id, total = users.len(), "user deleted");
        Ok(removed)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
