//! Recovery of structured recipes from free-form completion-service replies.
//!
//! The model is asked to answer with a short chat message plus a JSON
//! recipe, but the reply is plain text and the JSON arrives in whatever
//! shape the model felt like: fenced, inline, with trailing commas or raw
//! newlines inside strings. This module locates the JSON, repairs it via
//! [`crate::repair::repair_json`], validates it, and returns the leftover
//! prose as the chat message. Failures never propagate: the caller always
//! gets a response, at worst the original text with no recipe.

use std::sync::LazyLock;

use regex::Regex;

use crate::repair::repair_json;
use crate::types::{MealPlan, Recipe};

/// Fenced code block, with or without a `json` language tag.
static FENCED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("Invalid fenced-block regex")
});

/// "Here's the recipe"-style preamble sentence left behind once the JSON
/// is stripped out of the reply.
static PREAMBLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)here(?:'s|’s| is)[^.!:\n]*[.!:]?").expect("Invalid preamble regex")
});

/// Fallback chat message when stripping the JSON leaves nothing usable.
const CANNED_ACK: &str = "Here you go! Let me know if you'd like any changes.";

/// Chat text longer than this after JSON removal is almost certainly
/// half-extracted JSON debris, not a message. Heuristic, not a contract.
const MAX_PLAUSIBLE_MESSAGE_LEN: usize = 100;

/// Result of scanning a completion reply for a recipe.
#[derive(Debug, Clone)]
pub struct RecipeExtraction {
    /// The validated recipe, if one was found.
    pub recipe: Option<Recipe>,
    /// Chat text to show the user, with the JSON removed on success or
    /// the reply untouched otherwise.
    pub message: String,
}

/// Locate, repair, and validate a recipe JSON object in `reply`.
///
/// Search order: first fenced code block whose content is an object, then
/// the greedy first-`{`-to-last-`}` span of the raw text. A candidate
/// must pass [`Recipe::from_value`] (non-empty `name`, array
/// `ingredients`) to count; anything less returns the reply unchanged
/// with `recipe: None`.
pub fn extract_recipe(reply: &str) -> RecipeExtraction {
    let Some((start, end, candidate)) = find_json_candidate(reply) else {
        return RecipeExtraction {
            recipe: None,
            message: reply.to_string(),
        };
    };

    let Some(value) = parse_with_repair(&candidate) else {
        tracing::debug!("JSON candidate did not parse even after repair");
        return RecipeExtraction {
            recipe: None,
            message: reply.to_string(),
        };
    };

    match Recipe::from_value(value) {
        Ok(recipe) => RecipeExtraction {
            message: chat_remainder(reply, start, end),
            recipe: Some(recipe),
        },
        Err(e) => {
            tracing::debug!(error = %e, "JSON candidate is not a recipe");
            RecipeExtraction {
                recipe: None,
                message: reply.to_string(),
            }
        }
    }
}

/// Meal-plan variant of [`extract_recipe`].
///
/// Tolerates very large item arrays (the repair scanner is single-pass
/// and covers every string value in the document) and validates the
/// plan-level shape instead of the recipe shape: a non-empty `items`
/// array whose entries each embed a recipe.
pub fn extract_meal_plan(reply: &str) -> Option<MealPlan> {
    let (_, _, candidate) = find_json_candidate(reply)?;
    let value = parse_with_repair(&candidate)?;

    let items = value.get("items").and_then(|v| v.as_array());
    match items {
        Some(items) if !items.is_empty() => {}
        _ => {
            tracing::debug!("Meal plan candidate has no items array");
            return None;
        }
    }

    match serde_json::from_value::<MealPlan>(value) {
        Ok(plan) => Some(plan),
        Err(e) => {
            tracing::debug!(error = %e, "Meal plan candidate failed validation");
            None
        }
    }
}

/// Find the most likely JSON span in the reply.
///
/// Returns the byte range to cut from the chat text together with the
/// candidate string to parse (fence markers excluded from the candidate
/// but included in the cut range).
fn find_json_candidate(reply: &str) -> Option<(usize, usize, String)> {
    for cap in FENCED_RE.captures_iter(reply) {
        let whole = cap.get(0).expect("capture 0 always present");
        let inner = match cap.get(1) {
            Some(m) => m.as_str().trim(),
            None => continue,
        };
        if inner.starts_with('{') {
            return Some((whole.start(), whole.end(), inner.to_string()));
        }
    }

    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end <= start {
        return None;
    }
    Some((start, end + 1, reply[start..=end].to_string()))
}

/// Parse a candidate directly, falling back to one repair pass.
fn parse_with_repair(candidate: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(candidate) {
        return Some(value);
    }

    let repaired = repair_json(candidate);
    match serde_json::from_str(&repaired) {
        Ok(value) => {
            tracing::debug!("JSON candidate recovered by repair pass");
            Some(value)
        }
        Err(_) => None,
    }
}

/// Remove the JSON span and any preamble, falling back to the canned
/// acknowledgement when what remains is empty or implausibly long.
fn chat_remainder(reply: &str, start: usize, end: usize) -> String {
    let mut remainder = format!("{}{}", &reply[..start], &reply[end..]);
    remainder = PREAMBLE_RE.replace(&remainder, "").to_string();
    let remainder = remainder.trim();

    if remainder.is_empty() || remainder.len() > MAX_PLAUSIBLE_MESSAGE_LEN {
        CANNED_ACK.to_string()
    } else {
        remainder.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_fenced_json() {
        let reply = "Sure!\n```json\n{\"name\": \"Pasta\", \"ingredients\": [{\"name\": \"Spaghetti\"}]}\n```";
        let result = extract_recipe(reply);
        let recipe = result.recipe.unwrap();
        assert_eq!(recipe.name, "Pasta");
        assert_eq!(result.message, "Sure!");
    }

    #[test]
    fn test_extracts_bare_json_from_prose() {
        let reply = r#"Enjoy! {"name": "Salad", "ingredients": []} Hope that helps."#;
        let result = extract_recipe(reply);
        assert_eq!(result.recipe.unwrap().name, "Salad");
        assert!(!result.message.contains('{'));
    }

    #[test]
    fn test_repairs_raw_newlines_inside_strings() {
        let reply = "{\"name\": \"Stew\", \"ingredients\": [], \"description\": \"Slow\ncooked\"}";
        let result = extract_recipe(reply);
        let recipe = result.recipe.unwrap();
        assert_eq!(recipe.name, "Stew");
        assert_eq!(recipe.description, "Slow\ncooked");
    }

    #[test]
    fn test_no_braces_returns_text_unchanged() {
        let reply = "I couldn't come up with a recipe for that, sorry!";
        let result = extract_recipe(reply);
        assert!(result.recipe.is_none());
        assert_eq!(result.message, reply);
    }

    #[test]
    fn test_invalid_candidate_returns_text_unchanged() {
        let reply = "The set {1, 2, 3} has three elements.";
        let result = extract_recipe(reply);
        assert!(result.recipe.is_none());
        assert_eq!(result.message, reply);
    }

    #[test]
    fn test_json_without_name_is_not_a_recipe() {
        let reply = r#"Some data: {"ingredients": ["flour"]}"#;
        let result = extract_recipe(reply);
        assert!(result.recipe.is_none());
        assert_eq!(result.message, reply);
    }

    #[test]
    fn test_strips_preamble_sentence() {
        let reply = "Here's the recipe you asked for:\n```json\n{\"name\": \"Tacos\", \"ingredients\": []}\n```\nEnjoy!";
        let result = extract_recipe(reply);
        assert!(result.recipe.is_some());
        assert_eq!(result.message, "Enjoy!");
    }

    #[test]
    fn test_empty_remainder_falls_back_to_canned_ack() {
        let reply = r#"{"name": "Rice", "ingredients": []}"#;
        let result = extract_recipe(reply);
        assert!(result.recipe.is_some());
        assert_eq!(result.message, CANNED_ACK);
    }

    #[test]
    fn test_long_remainder_falls_back_to_canned_ack() {
        let debris = "x".repeat(150);
        let reply = format!(r#"{{"name": "Rice", "ingredients": []}}{debris}"#);
        let result = extract_recipe(&reply);
        assert!(result.recipe.is_some());
        assert_eq!(result.message, CANNED_ACK);
    }

    #[test]
    fn test_veggie_wrap_scenario() {
        let reply = concat!(
            "Great choice! ",
            r#"{"name":"Veggie Wrap","ingredients":[{"name":"Tortilla","amount":"1"}],"#,
            r#""instructions":[{"step":"Roll it"}]}"#,
        );
        let result = extract_recipe(reply);
        let recipe = result.recipe.unwrap();
        assert_eq!(recipe.name, "Veggie Wrap");
        assert_eq!(recipe.ingredients[0].amount.as_deref(), Some("1"));
        assert!(!result.message.contains('{'));
    }

    #[test]
    fn test_meal_plan_extraction() {
        let reply = r#"```json
{
  "name": "Week of dinners",
  "duration": "week",
  "startDate": "2025-03-03",
  "endDate": "2025-03-09",
  "items": [
    {
      "date": "2025-03-03",
      "mealType": "dinner",
      "recipe": {"name": "Chili", "ingredients": [], "instructions": []}
    }
  ]
}
```"#;
        let plan = extract_meal_plan(reply).unwrap();
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].recipe.name, "Chili");
    }

    #[test]
    fn test_meal_plan_requires_items() {
        assert!(extract_meal_plan(r#"{"name": "Empty", "items": []}"#).is_none());
        assert!(extract_meal_plan("no json at all").is_none());
    }

    #[test]
    fn test_meal_plan_tolerates_large_arrays_with_broken_strings() {
        let mut items = Vec::new();
        for i in 0..120 {
            items.push(format!(
                "{{\"date\": \"2025-03-03\", \"mealType\": \"lunch\", \"recipe\": {{\"name\": \"Dish {i}\", \"description\": \"two\nlines\", \"ingredients\": [], \"instructions\": []}}}}"
            ));
        }
        let reply = format!(
            "{{\"duration\": \"month\", \"startDate\": \"2025-03-01\", \"endDate\": \"2025-03-30\", \"items\": [{}]}}",
            items.join(",")
        );

        let plan = extract_meal_plan(&reply).unwrap();
        assert_eq!(plan.items.len(), 120);
        assert_eq!(plan.items[7].recipe.description, "two\nlines");
    }
}
