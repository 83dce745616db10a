use serde_json::Value;

use models::user::{self, User, UserPatch};
use crate::{errors::ServiceError, storage::UserStore};

/// List every user in insertion order.
pub async fn list_users(store: &UserStore) -> Vec<User> {
    store.list_all().await
}

/// Get a user by id.
pub async fn get_user(store: &UserStore, id: i64) -> Result<User, ServiceError> {
    store
        .find_by_id(id)
        .await
        .ok_or_else(|| ServiceError::not_found("user", id))
}

/// Create a user from a raw JSON body; type errors win over id conflicts.
pub async fn create_user(store: &UserStore, body: &Value) -> Result<User, ServiceError> {
    let new_user = user::parse_new_user(body)?;
    store.insert(new_user).await
}

/// Merge a raw JSON patch over an existing user.
///
/// A missing user is reported before the body is type-checked.
pub async fn update_user(store: &UserStore, id: i64, body: &Value) -> Result<User, ServiceError> {
    if store.find_by_id(id).await.is_none() {
        return Err(ServiceError::not_found("user", id));
    }
    let patch = UserPatch::from_json(body)?;
    store.update_by_id(id, patch).await
}

/// Delete a user by id.
pub async fn delete_user(store: &UserStore, id: i64) -> Result<User, ServiceError> {
    store.delete_by_id(id).await
}
