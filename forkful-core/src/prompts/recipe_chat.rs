//! System prompt for the conversational recipe generation endpoint.

use crate::types::{Recipe, UserPreferences};

use super::{render_preferences, RECIPE_JSON_SHAPE};

/// Prompt name, used in logs.
pub const RECIPE_CHAT_PROMPT_NAME: &str = "recipe_chat";

/// Render the system prompt for a chat turn.
///
/// `current_recipe` (when modifying) is serialized to JSON and embedded
/// verbatim so the model edits the exact object the user is looking at.
/// The conversation history itself is passed through separately as
/// role-tagged messages.
pub fn render_recipe_chat_prompt(
    current_recipe: Option<&Recipe>,
    available_ingredients: &[String],
    removed_ingredients: &[String],
    preferences: Option<&UserPreferences>,
) -> String {
    let mut prompt = String::from(
        "You are a friendly cooking assistant. Help the user land on one great recipe for what they describe.\n",
    );

    if let Some(recipe) = current_recipe {
        let serialized =
            serde_json::to_string_pretty(recipe).unwrap_or_else(|_| "{}".to_string());
        prompt.push_str(&format!(
            "\nThe user is modifying this recipe. Apply their requested changes to it, keeping the same id:\n{serialized}\n"
        ));
    }

    if !available_ingredients.is_empty() {
        prompt.push_str(&format!(
            "\nIngredients the user has on hand: {}. Prefer these.\n",
            available_ingredients.join(", ")
        ));
    }

    if !removed_ingredients.is_empty() {
        prompt.push_str(&format!(
            "\nThe user does NOT have these ingredients; substitute or omit them: {}.\n",
            removed_ingredients.join(", ")
        ));
    }

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
    fn test_embeds_current_recipe_json() {
        let recipe = Recipe::from_value(serde_json::json!({
            "id": "r-1",
            "name": "Lentil Soup",
            "ingredients": [{"name": "Lentils", "amount": "1 cup"}]
        }))
        .unwrap();

        let prompt = render_recipe_chat_prompt(Some(&recipe), &[], &[], None);
        assert!(prompt.contains("\"name\": \"Lentil Soup\""));
        assert!(prompt.contains("\"id\": \"r-1\""));
    }

    #[test]
    fn test_lists_removed_ingredients() {
        let prompt = render_recipe_chat_prompt(
            None,
            &["rice".to_string()],
            &["cilantro".to_string()],
            None,
        );
        assert!(prompt.contains("on hand: rice"));
        assert!(prompt.contains("substitute or omit them: cilantro"));
    }

    #[test]
    fn test_includes_json_shape_instructions() {
        let prompt = render_recipe_chat_prompt(None, &[], &[], None);
        assert!(prompt.contains("```json"));
        assert!(prompt.contains("\"ingredients\""));
    }

    #[test]
    fn test_allergies_flagged() {
        let prefs = UserPreferences {
            allergies: vec!["tree nuts".to_string()],
            ..Default::default()
        };
        let prompt = render_recipe_chat_prompt(None, &[], &[], Some(&prefs));
        assert!(prompt.contains("ABSOLUTELY DO NOT"));
        assert!(prompt.contains("tree nuts"));
    }
}
