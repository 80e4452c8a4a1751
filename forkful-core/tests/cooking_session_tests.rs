//! Integration tests for the guided cooking session.

use forkful_core::cooking::timer::{TimerTick, FINISH_BEEPS};
use forkful_core::cooking::{CookingSession, TimerStart};
use forkful_core::types::Recipe;
use serde_json::json;

fn test_recipe() -> Recipe {
    Recipe::from_value(json!({
        "id": "r-1",
        "name": "Weeknight Stir Fry",
        "ingredients": [
            {"name": "Rice", "amount": "2 cups"},
            {"name": "Soy sauce", "amount": "1/2 tsp"},
            {"name": "Scallions", "amount": "to taste"}
        ],
        "instructions": [
            {"step": "Rinse the rice."},
            {"step": "Simmer for 8 minutes."},
            {"step": "Fry the vegetables for 5 to 10 minutes."},
            {"step": "Serve."}
        ]
    }))
    .unwrap()
}

#[test]
fn advancing_marks_steps_completed() {
    let mut session = CookingSession::new(test_recipe());

    session.advance();
    assert_eq!(session.current_step(), 1);
    assert!(session.completed_steps().contains(&0));
    assert!(!session.completed_steps().contains(&1));
}

#[test]
fn advancing_from_last_step_marks_it_but_stays() {
    let mut session = CookingSession::new(test_recipe());
    session.jump_to(3);

    session.advance();
    assert_eq!(session.current_step(), 3);
    assert!(session.completed_steps().contains(&3));
}

#[test]
fn retreating_from_first_step_is_a_noop() {
    let mut session = CookingSession::new(test_recipe());

    session.retreat();
    assert_eq!(session.current_step(), 0);
}

#[test]
fn retreating_does_not_uncomplete() {
    let mut session = CookingSession::new(test_recipe());
    session.advance();

    session.retreat();
    assert_eq!(session.current_step(), 0);
    assert!(session.completed_steps().contains(&0));
}

#[test]
fn jump_clamps_to_last_step_and_skips_completion() {
    let mut session = CookingSession::new(test_recipe());

    session.jump_to(99);
    assert_eq!(session.current_step(), 3);
    assert!(session.completed_steps().is_empty());
}

#[test]
fn fixed_duration_starts_timer_immediately() {
    let mut session = CookingSession::new(test_recipe());
    session.jump_to(1); // "Simmer for 8 minutes."

    let start = session.start_timer_from_step();
    assert_eq!(start, TimerStart::Started { minutes: 8 });
    assert_eq!(session.timer().unwrap().remaining_secs(), 8 * 60);
}

#[test]
fn range_duration_offers_both_endpoints() {
    let mut session = CookingSession::new(test_recipe());
    session.jump_to(2); // "Fry the vegetables for 5 to 10 minutes."

    let start = session.start_timer_from_step();
    assert_eq!(
        start,
        TimerStart::ChooseDuration {
            minutes: vec![5, 10]
        }
    );
    assert!(session.timer().is_none(), "nothing starts until the user picks");

    session.start_timer_minutes(10);
    assert_eq!(session.timer().unwrap().remaining_secs(), 600);
}

#[test]
fn step_without_duration_detects_nothing() {
    let mut session = CookingSession::new(test_recipe());

    assert_eq!(session.start_timer_from_step(), TimerStart::NotDetected);
}

#[test]
fn timer_finishes_with_beeps_then_goes_idle() {
    let mut session = CookingSession::new(test_recipe());
    session.start_timer_minutes(1);

    for _ in 0..59 {
        assert!(matches!(session.tick(), TimerTick::Running { .. }));
    }
    assert_eq!(session.tick(), TimerTick::Finished { beeps: FINISH_BEEPS });
    assert_eq!(session.tick(), TimerTick::Idle);
}

#[test]
fn dismissing_timer_clears_it() {
    let mut session = CookingSession::new(test_recipe());
    session.start_timer_minutes(5);

    session.dismiss_timer();
    assert!(session.timer().is_none());
    assert_eq!(session.tick(), TimerTick::Idle);
}

#[test]
fn scaling_is_display_only() {
    let mut session = CookingSession::new(test_recipe());
    session.increase_servings(); // 1.5

    let scaled = session.scaled_ingredients();
    assert_eq!(scaled[0].amount.as_deref(), Some("3 cups"));
    assert_eq!(scaled[2].amount.as_deref(), Some("to taste"));

    // Stored recipe untouched
    assert_eq!(
        session.recipe().ingredients[0].amount.as_deref(),
        Some("2 cups")
    );
}

#[test]
fn multiplier_clamps_at_both_ends() {
    let mut session = CookingSession::new(test_recipe());

    for _ in 0..10 {
        session.increase_servings();
    }
    assert_eq!(session.serving_multiplier(), 4.0);

    for _ in 0..10 {
        session.decrease_servings();
    }
    assert_eq!(session.serving_multiplier(), 0.5);
}

#[test]
fn removing_ingredient_requests_substitution_without_mutating() {
    let mut session = CookingSession::new(test_recipe());

    let request = session.remove_ingredient(1).unwrap();
    assert_eq!(request.ingredient, "Soy sauce");
    assert_eq!(
        request.message,
        "I don't have Soy sauce, what can I substitute?"
    );
    assert!(session.removed_ingredients().contains(&1));
    assert_eq!(session.recipe().ingredients.len(), 3);

    // Removing again does not fire another request
    assert!(session.remove_ingredient(1).is_none());

    session.restore_ingredient(1);
    assert!(session.removed_ingredients().is_empty());
}

#[test]
fn replacing_recipe_resets_everything() {
    let mut session = CookingSession::new(test_recipe());
    session.advance();
    session.toggle_ingredient(0);
    session.remove_ingredient(1);
    session.increase_servings();
    session.start_timer_minutes(5);

    let edited = Recipe::from_value(json!({
        "id": "r-2",
        "name": "Edited Stir Fry",
        "ingredients": [{"name": "Quinoa", "amount": "1 cup"}],
        "instructions": [{"step": "Cook it."}]
    }))
    .unwrap();

    session.replace_recipe(edited);

    assert_eq!(session.current_step(), 0);
    assert!(session.completed_steps().is_empty());
    assert!(session.checked_ingredients().is_empty());
    assert!(session.removed_ingredients().is_empty());
    assert_eq!(session.serving_multiplier(), 1.0);
    assert!(session.timer().is_none());
    assert_eq!(session.recipe().name, "Edited Stir Fry");
}
