//! Prompt construction for the completion and image services.
//!
//! Builders are pure string functions: user free text is interpolated
//! directly, and dietary constraints are rendered as hard instructions.
//! Enforcement is entirely on the model's side; nothing here can verify
//! compliance.

pub mod image;
pub mod meal_plan_detail;
pub mod recipe_chat;
pub mod recipe_search;

use crate::types::UserPreferences;

/// Shared description of the JSON shape the model must reply with.
pub(crate) const RECIPE_JSON_SHAPE: &str = r#"Reply with a short, friendly message followed by the recipe as a single JSON object in a ```json fenced block, shaped like:
{
  "name": "...",
  "description": "...",
  "emoji": "...",
  "timeToCook": "...",
  "servings": "...",
  "difficulty": "Easy" | "Medium" | "Hard",
  "rating": 4.5,
  "tags": ["..."],
  "ingredients": [{"name": "...", "amount": "..."}],
  "instructions": [{"step": "...", "tip": "..."}],
  "presentationTips": ["..."],
  "nutrition": {"calories": "...", "protein": "...", "carbs": "...", "fat": "..."}
}"#;

/// Render the user's preferences as prompt constraints.
///
/// Allergies and dietary restrictions come first and are phrased as
/// absolute prohibitions; everything else is advisory context.
pub(crate) fn render_preferences(prefs: &UserPreferences) -> String {
    let mut sections = Vec::new();

    if !prefs.allergies.is_empty() {
        sections.push(format!(
            "ALLERGIES - ABSOLUTELY DO NOT include these ingredients or anything derived from them: {}.",
            prefs.allergies.join(", ")
        ));
    }

    if !prefs.dietary_restrictions.is_empty() {
        sections.push(format!(
            "DIETARY RESTRICTIONS - ABSOLUTELY DO NOT violate these: {}.",
            prefs.dietary_restrictions.join(", ")
        ));
    }

    sections.push(format!("Cooking for {} people.", prefs.people_count));

    if prefs.has_kids {
        if prefs.kids_ages.is_empty() {
            sections.push("The household includes kids; keep flavors kid-friendly.".to_string());
        } else {
            sections.push(format!(
                "The household includes kids aged {}; keep flavors kid-friendly.",
                prefs.kids_ages.join(", ")
            ));
        }
    }

    if !prefs.equipment.is_empty() {
        sections.push(format!(
            "Available kitchen equipment: {}. Do not require anything else.",
            prefs.equipment.join(", ")
        ));
    }

    if !prefs.health_goals.is_empty() {
        sections.push(format!("Health goals: {}.", prefs.health_goals.join(", ")));
    }

    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allergies_rendered_as_hard_constraint() {
        let prefs = UserPreferences {
            allergies: vec!["peanuts".to_string(), "shellfish".to_string()],
            ..Default::default()
        };
        let rendered = render_preferences(&prefs);
        assert!(rendered.contains("ABSOLUTELY DO NOT"));
        assert!(rendered.contains("peanuts, shellfish"));
    }

    #[test]
    fn test_equipment_listed() {
        let prefs = UserPreferences {
            equipment: vec!["oven".to_string(), "blender".to_string()],
            ..Default::default()
        };
        let rendered = render_preferences(&prefs);
        assert!(rendered.contains("oven, blender"));
    }
}
