//! End-to-end flow over the core pieces: prompt -> fake completion ->
//! extraction, the same path the chat endpoint drives.

use forkful_core::extract::extract_recipe;
use forkful_core::llm::{ChatMessage, ChatRequest, CompletionProvider, FakeProvider};
use forkful_core::prompts::recipe_chat::render_recipe_chat_prompt;
use forkful_core::types::UserPreferences;

#[tokio::test]
async fn chat_turn_produces_recipe_and_clean_message() {
    let provider = FakeProvider::with_response(
        "curry",
        concat!(
            "Here's the recipe:\n",
            "```json\n",
            r#"{"name": "Chickpea Curry", "ingredients": [{"name": "Chickpeas", "amount": "2 cups"}], "instructions": [{"step": "Simmer for 20 minutes."}]}"#,
            "\n```\nEnjoy!"
        ),
    );

    let prefs = UserPreferences {
        allergies: vec!["peanuts".to_string()],
        ..Default::default()
    };
    let system = render_recipe_chat_prompt(None, &[], &[], Some(&prefs));
    let request = ChatRequest::new(system, vec![ChatMessage::user("a quick curry")]);

    let reply = provider.complete(&request).await.unwrap();
    let extraction = extract_recipe(&reply);

    let recipe = extraction.recipe.expect("reply contained a recipe");
    assert_eq!(recipe.name, "Chickpea Curry");
    assert!(!recipe.id.is_empty());
    assert!(recipe.is_complete());
    assert!(!extraction.message.contains('{'));
    assert_eq!(extraction.message, "Enjoy!");
}

#[tokio::test]
async fn reply_without_recipe_passes_text_through() {
    let provider =
        FakeProvider::new().with_default_response("What cuisine are you in the mood for?");

    let request = ChatRequest::single(
        render_recipe_chat_prompt(None, &[], &[], None),
        "not sure yet",
    );

    let reply = provider.complete(&request).await.unwrap();
    let extraction = extract_recipe(&reply);

    assert!(extraction.recipe.is_none());
    assert_eq!(extraction.message, "What cuisine are you in the mood for?");
}

#[tokio::test]
async fn malformed_reply_is_recovered_by_repair() {
    // Raw newline inside a string value: direct parse fails, repair saves it
    let provider = FakeProvider::with_response(
        "soup",
        "{\"name\": \"Miso Soup\", \"ingredients\": [{\"name\": \"Miso\"}], \"description\": \"Light\nand warming\"}",
    );

    let request = ChatRequest::single("", "miso soup please");
    let reply = provider.complete(&request).await.unwrap();
    let extraction = extract_recipe(&reply);

    let recipe = extraction.recipe.expect("repair pass recovered the JSON");
    assert_eq!(recipe.name, "Miso Soup");
    assert_eq!(recipe.description, "Light\nand warming");
}
