//! Prompt for the image-generation service.

use crate::types::Recipe;

/// Prompt name, used in logs.
pub const RECIPE_IMAGE_PROMPT_NAME: &str = "recipe_image";

/// How many leading ingredients to mention. More than this adds noise
/// without changing the rendered dish.
const MAX_PROMPT_INGREDIENTS: usize = 5;

/// Build the image prompt from a recipe's name, its first few
/// ingredients, and its first presentation tip.
pub fn render_recipe_image_prompt(recipe: &Recipe) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .take(MAX_PROMPT_INGREDIENTS)
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        "Professional food photography of {}, featuring {ingredients}. Overhead shot, natural light, appetizing plating.",
        recipe.name
    );

    if let Some(tip) = recipe
        .presentation_tips
        .as_ref()
        .and_then(|tips| tips.first())
    {
        prompt.push_str(&format!(" Presentation: {tip}"));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_first_five_ingredients_and_first_tip() {
        let recipe = Recipe::from_value(serde_json::json!({
            "name": "Rainbow Bowl",
            "ingredients": [
                {"name": "Rice"}, {"name": "Carrot"}, {"name": "Cabbage"},
                {"name": "Edamame"}, {"name": "Avocado"}, {"name": "Sesame"}
            ],
            "presentationTips": ["Arrange by color", "Serve chilled"]
        }))
        .unwrap();

        let prompt = render_recipe_image_prompt(&recipe);
        assert!(prompt.contains("Rainbow Bowl"));
        assert!(prompt.contains("Avocado"));
        assert!(!prompt.contains("Sesame"), "only the first five ingredients");
        assert!(prompt.contains("Arrange by color"));
        assert!(!prompt.contains("Serve chilled"));
    }
}
