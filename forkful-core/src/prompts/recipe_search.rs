//! Single-shot prompt for the recipe search endpoint.

use crate::types::UserPreferences;

use super::{render_preferences, RECIPE_JSON_SHAPE};

/// Prompt name, used in logs.
pub const RECIPE_SEARCH_PROMPT_NAME: &str = "recipe_search";

/// Render the one-shot search prompt: a query, optional pantry contents,
/// and the user's constraints.
pub fn render_recipe_search_prompt(
    query: &str,
    available_ingredients: &[String],
    preferences: Option<&UserPreferences>,
) -> String {
    let mut prompt = format!(
        "You are a cooking assistant. Produce one recipe that best matches this request: {query}\n"
    );

    if !available_ingredients.is_empty() {
        prompt.push_str(&format!(
            "\nIngredients on hand: {}. Prefer these.\n",
            available_ingredients.join(", ")
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
    fn test_query_interpolated_verbatim() {
        let prompt = render_recipe_search_prompt("cozy ramen for a cold night", &[], None);
        assert!(prompt.contains("cozy ramen for a cold night"));
    }

    #[test]
    fn test_preferences_included() {
        let prefs = UserPreferences {
            dietary_restrictions: vec!["vegan".to_string()],
            ..Default::default()
        };
        let prompt = render_recipe_search_prompt("dinner", &[], Some(&prefs));
        assert!(prompt.contains("vegan"));
    }
}
