//! Saved-recipe documents: the user <-> recipe join.

use chrono::Utc;

use super::{ensure_owner, DocumentStore, StoreError};
use crate::types::{Recipe, SavedRecipe};

/// Collection of one document per (user, recipe) pair.
pub const SAVED_RECIPES_COLLECTION: &str = "saved_recipes";

/// Composite key so existence checks are point lookups.
pub fn saved_recipe_key(user_id: &str, recipe_id: &str) -> String {
    format!("{user_id}_{recipe_id}")
}

/// Save (or re-save) a recipe for a user.
///
/// The original `savedAt` survives updates via a read-before-write;
/// `updatedAt` always refreshes. The write is rejected up front when the
/// caller is not the target user.
pub async fn save_recipe(
    store: &dyn DocumentStore,
    auth_uid: &str,
    user_id: &str,
    recipe: &Recipe,
) -> Result<SavedRecipe, StoreError> {
    ensure_owner(auth_uid, user_id)?;

    let key = saved_recipe_key(user_id, &recipe.id);
    let now = Utc::now();

    let saved_at = match store.get(SAVED_RECIPES_COLLECTION, &key).await? {
        Some(existing) => serde_json::from_value::<SavedRecipe>(existing)
            .map(|doc| doc.saved_at)
            .unwrap_or(now),
        None => now,
    };

    let saved = SavedRecipe {
        user_id: user_id.to_string(),
        recipe: recipe.clone(),
        saved_at,
        updated_at: now,
    };

    let document =
        serde_json::to_value(&saved).map_err(|e| StoreError::Other(e.to_string()))?;
    store.set(SAVED_RECIPES_COLLECTION, &key, document).await?;

    Ok(saved)
}

/// Remove a saved recipe. Idempotent.
pub async fn remove_recipe(
    store: &dyn DocumentStore,
    auth_uid: &str,
    user_id: &str,
    recipe_id: &str,
) -> Result<(), StoreError> {
    ensure_owner(auth_uid, user_id)?;
    store
        .delete(SAVED_RECIPES_COLLECTION, &saved_recipe_key(user_id, recipe_id))
        .await
}

/// List a user's saved recipes, most recently saved first.
///
/// The service's native ordering is not guaranteed on this collection,
/// so the sort happens here after the equality query.
pub async fn list_saved_recipes(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Vec<SavedRecipe>, StoreError> {
    let documents = store
        .query_eq(
            SAVED_RECIPES_COLLECTION,
            "userId",
            &serde_json::json!(user_id),
            None,
        )
        .await?;

    let mut saved: Vec<SavedRecipe> = documents
        .into_iter()
        .filter_map(|doc| match serde_json::from_value::<SavedRecipe>(doc) {
            Ok(saved) => Some(saved),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed saved-recipe document");
                None
            }
        })
        .collect();

    saved.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    Ok(saved)
}

/// Point lookup: has this user saved this recipe?
pub async fn is_recipe_saved(
    store: &dyn DocumentStore,
    user_id: &str,
    recipe_id: &str,
) -> Result<bool, StoreError> {
    Ok(store
        .get(SAVED_RECIPES_COLLECTION, &saved_recipe_key(user_id, recipe_id))
        .await?
        .is_some())
}
