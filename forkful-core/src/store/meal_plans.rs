//! Meal-plan documents, keyed by plan id with an owner field for queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ensure_owner, DocumentStore, StoreError};
use crate::types::MealPlan;

/// One document per meal plan.
pub const MEAL_PLANS_COLLECTION: &str = "meal_plans";

/// A meal plan as persisted: the plan itself plus bookkeeping stamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMealPlan {
    #[serde(flatten)]
    pub plan: MealPlan,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Save (or update) a meal plan, preserving `createdAt` across updates.
///
/// A plan without an id gets one assigned; the returned document carries
/// it. The caller must be the plan's owner.
pub async fn save_meal_plan(
    store: &dyn DocumentStore,
    auth_uid: &str,
    plan: &MealPlan,
) -> Result<StoredMealPlan, StoreError> {
    ensure_owner(auth_uid, &plan.user_id)?;

    let mut plan = plan.clone();
    if plan.id.is_empty() {
        plan.id = Uuid::new_v4().to_string();
    }

    let now = Utc::now();
    let created_at = match store.get(MEAL_PLANS_COLLECTION, &plan.id).await? {
        Some(existing) => serde_json::from_value::<StoredMealPlan>(existing)
            .map(|doc| doc.created_at)
            .unwrap_or(now),
        None => now,
    };

    let stored = StoredMealPlan {
        plan,
        created_at,
        updated_at: now,
    };

    let document =
        serde_json::to_value(&stored).map_err(|e| StoreError::Other(e.to_string()))?;
    store
        .set(MEAL_PLANS_COLLECTION, &stored.plan.id, document)
        .await?;

    Ok(stored)
}

/// Fetch one meal plan. Reading another user's plan is a permission
/// error, not a miss.
pub async fn get_meal_plan(
    store: &dyn DocumentStore,
    user_id: &str,
    plan_id: &str,
) -> Result<Option<StoredMealPlan>, StoreError> {
    let Some(document) = store.get(MEAL_PLANS_COLLECTION, plan_id).await? else {
        return Ok(None);
    };

    let stored: StoredMealPlan = serde_json::from_value(document)
        .map_err(|e| StoreError::Other(format!("Malformed meal-plan document: {e}")))?;

    if stored.plan.user_id != user_id {
        return Err(StoreError::PermissionDenied(format!(
            "meal plan {plan_id} is not owned by {user_id}"
        )));
    }

    Ok(Some(stored))
}

/// List a user's meal plans, newest first.
pub async fn list_meal_plans(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Vec<StoredMealPlan>, StoreError> {
    let documents = store
        .query_eq(
            MEAL_PLANS_COLLECTION,
            "userId",
            &serde_json::json!(user_id),
            Some("createdAt"),
        )
        .await?;

    Ok(documents
        .into_iter()
        .filter_map(|doc| match serde_json::from_value::<StoredMealPlan>(doc) {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed meal-plan document");
                None
            }
        })
        .collect())
}

/// Delete a meal plan. Idempotent for missing plans; deleting someone
/// else's plan is a permission error.
pub async fn delete_meal_plan(
    store: &dyn DocumentStore,
    auth_uid: &str,
    user_id: &str,
    plan_id: &str,
) -> Result<(), StoreError> {
    ensure_owner(auth_uid, user_id)?;

    // Ownership check needs the document; a miss is fine to delete through
    if let Some(existing) = store.get(MEAL_PLANS_COLLECTION, plan_id).await? {
        let owner = existing.get("userId").and_then(|v| v.as_str());
        if owner != Some(user_id) {
            return Err(StoreError::PermissionDenied(format!(
                "meal plan {plan_id} is not owned by {user_id}"
            )));
        }
    }

    store.delete(MEAL_PLANS_COLLECTION, plan_id).await
}
