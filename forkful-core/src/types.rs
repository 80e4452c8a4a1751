//! Shared data model: recipes, user preferences, and meal plans.
//!
//! Field names serialize as camelCase because every one of these shapes is
//! shared verbatim with the web frontend and the document database.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// How hard a recipe is to cook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// One ingredient line. `amount` is free text ("2 cups", "to taste").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// One instruction step, optionally with a tip shown alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// Nutrition facts as free-text strings, exactly as the model emits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub protein: String,
    #[serde(default)]
    pub carbs: String,
    #[serde(default)]
    pub fat: String,
}

/// A recipe as generated by the completion service and stored for users.
///
/// Most fields are lenient: the model reply may omit anything except `name`
/// and `ingredients` (see [`Recipe::from_value`]). A recipe with empty
/// `ingredients`/`instructions` is a lightweight placeholder awaiting
/// background completion, see [`Recipe::is_complete`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub time_to_cook: String,
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_tips: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
}

impl Recipe {
    /// Validate a candidate JSON object into a `Recipe`.
    ///
    /// Minimum bar: a non-empty string `name` and an array-typed
    /// `ingredients` field. Anything less means "no recipe here" and the
    /// caller should treat the reply as plain chat text. A missing `id`
    /// gets a fresh v4 identifier so the recipe can be saved immediately.
    pub fn from_value(value: serde_json::Value) -> Result<Recipe, ValidationError> {
        let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;

        match obj.get("name").and_then(|v| v.as_str()) {
            Some(name) if !name.trim().is_empty() => {}
            Some(_) => return Err(ValidationError::InvalidField("name".to_string())),
            None => return Err(ValidationError::MissingField("name".to_string())),
        }

        match obj.get("ingredients") {
            Some(v) if v.is_array() => {}
            Some(_) => return Err(ValidationError::InvalidField("ingredients".to_string())),
            None => return Err(ValidationError::MissingField("ingredients".to_string())),
        }

        let mut recipe: Recipe = serde_json::from_value(value)
            .map_err(|e| ValidationError::InvalidField(e.to_string()))?;

        if recipe.id.is_empty() {
            recipe.id = Uuid::new_v4().to_string();
        }

        Ok(recipe)
    }

    /// A complete recipe has at least one ingredient and one instruction.
    /// Lightweight meal-plan placeholders fail this until filled in.
    pub fn is_complete(&self) -> bool {
        !self.ingredients.is_empty() && !self.instructions.is_empty()
    }
}

/// Per-user settings captured at onboarding and editable afterwards.
///
/// `allergies` is safety-critical: every prompt builder renders it as a
/// hard constraint the model must not violate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default = "default_people_count")]
    pub people_count: u32,
    #[serde(default)]
    pub has_kids: bool,
    #[serde(default)]
    pub kids_ages: Vec<String>,
    #[serde(default)]
    pub has_partner: bool,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub health_goals: Vec<String>,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub onboarding_complete: bool,
}

fn default_people_count() -> u32 {
    1
}

/// Meal slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// How long a meal plan spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanDuration {
    Day,
    Week,
    Month,
}

/// One planned meal: a date, a slot, and an embedded recipe.
///
/// The recipe may be lightweight (empty ingredients/instructions) until
/// the detail endpoint fills it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanItem {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe: Recipe,
}

/// A user's meal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    pub duration: PlanDuration,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<MealPlanItem>,
}

/// The join document between a user and a saved recipe.
///
/// Stored one document per (user, recipe) pair under the composite key
/// `{user_id}_{recipe_id}` so existence checks are point lookups and
/// listing is a single equality query on `userId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub user_id: String,
    pub recipe: Recipe,
    pub saved_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_minimal() {
        let recipe = Recipe::from_value(json!({
            "name": "Toast",
            "ingredients": [{"name": "Bread", "amount": "2 slices"}]
        }))
        .unwrap();

        assert_eq!(recipe.name, "Toast");
        assert!(!recipe.id.is_empty(), "missing id should be generated");
        assert_eq!(recipe.ingredients.len(), 1);
        assert!(!recipe.is_complete(), "no instructions yet");
    }

    #[test]
    fn test_from_value_rejects_missing_name() {
        let err = Recipe::from_value(json!({"ingredients": []})).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(f) if f == "name"));
    }

    #[test]
    fn test_from_value_rejects_empty_name() {
        let err = Recipe::from_value(json!({"name": "  ", "ingredients": []})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField(f) if f == "name"));
    }

    #[test]
    fn test_from_value_rejects_non_array_ingredients() {
        let err =
            Recipe::from_value(json!({"name": "Toast", "ingredients": "bread"})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField(f) if f == "ingredients"));
    }

    #[test]
    fn test_from_value_keeps_existing_id() {
        let recipe = Recipe::from_value(json!({
            "id": "abc-123",
            "name": "Toast",
            "ingredients": []
        }))
        .unwrap();
        assert_eq!(recipe.id, "abc-123");
    }

    #[test]
    fn test_recipe_round_trip_is_camel_case() {
        let recipe = Recipe::from_value(json!({
            "name": "Soup",
            "timeToCook": "30 min",
            "ingredients": [],
            "instructions": [{"step": "Simmer"}]
        }))
        .unwrap();

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["timeToCook"], "30 min");
        assert!(value.get("time_to_cook").is_none());
    }

    #[test]
    fn test_preferences_defaults() {
        let prefs: UserPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.people_count, 1);
        assert!(prefs.allergies.is_empty());
        assert!(!prefs.onboarding_complete);
    }
}
