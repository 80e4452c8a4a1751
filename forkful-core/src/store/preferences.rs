//! User-preference documents, keyed by user id.

use super::{ensure_owner, DocumentStore, StoreError};
use crate::types::UserPreferences;

/// One preferences document per user.
pub const USER_PREFERENCES_COLLECTION: &str = "user_preferences";

/// Fetch a user's preferences, if they have completed onboarding.
pub async fn get_preferences(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Option<UserPreferences>, StoreError> {
    match store.get(USER_PREFERENCES_COLLECTION, user_id).await? {
        Some(document) => serde_json::from_value(document)
            .map(Some)
            .map_err(|e| StoreError::Other(format!("Malformed preferences document: {e}"))),
        None => Ok(None),
    }
}

/// Create or replace a user's preferences.
pub async fn set_preferences(
    store: &dyn DocumentStore,
    auth_uid: &str,
    user_id: &str,
    preferences: &UserPreferences,
) -> Result<(), StoreError> {
    ensure_owner(auth_uid, user_id)?;
    let document =
        serde_json::to_value(preferences).map_err(|e| StoreError::Other(e.to_string()))?;
    store.set(USER_PREFERENCES_COLLECTION, user_id, document).await
}
