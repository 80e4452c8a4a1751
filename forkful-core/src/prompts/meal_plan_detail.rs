//! Prompt for completing a lightweight meal-plan recipe.

use crate::types::{Recipe, UserPreferences};

use super::{render_preferences, RECIPE_JSON_SHAPE};

/// Prompt name, used in logs.
pub const MEAL_PLAN_DETAIL_PROMPT_NAME: &str = "meal_plan_detail";

/// Render the prompt that fills in a placeholder recipe's missing fields.
///
/// Meal plans are generated with name-and-emoji stubs; this asks the model
/// for the full recipe while pinning the id and name so the completed
/// version can be patched back into the plan.
pub fn render_meal_plan_detail_prompt(
    recipe: &Recipe,
    preferences: Option<&UserPreferences>,
) -> String {
    let serialized = serde_json::to_string_pretty(recipe).unwrap_or_else(|_| "{}".to_string());

    let mut prompt = format!(
        "You are a cooking assistant. This recipe from a meal plan is missing its details:\n{serialized}\n\nWrite the complete recipe. Keep the same \"id\" and \"name\"; fill in ingredients, instructions, and everything else.\n"
    );

    if let Some(prefs) = preferences {
        prompt.push('\n');
        prompt.push_str(&render_preferences(prefs));
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(RECIPE_JSON_SHAPE);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pins_id_and_name() {
        let recipe = Recipe::from_value(serde_json::json!({
            "id": "mp-7",
            "name": "Sheet-Pan Gnocchi",
            "ingredients": []
        }))
        .unwrap();

        let prompt = render_meal_plan_detail_prompt(&recipe, None);
        assert!(prompt.contains("\"id\": \"mp-7\""));
        assert!(prompt.contains("Keep the same \"id\" and \"name\""));
    }
}
