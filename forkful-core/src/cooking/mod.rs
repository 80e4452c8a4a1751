//! Guided cooking-mode session state.
//!
//! A [`CookingSession`] tracks one user stepping through one recipe:
//! current step, completed steps, the ingredient checklist, a serving
//! multiplier, and an optional countdown timer. It is single-threaded
//! and UI-event-driven; every method is a synchronous transition and the
//! session only drives presentation. The recipe itself is never mutated
//! here.

pub mod scale;
pub mod timer;

use std::collections::BTreeSet;

use crate::types::{Ingredient, Recipe};

use scale::scale_amount;
use timer::{detect_duration, StepTimer, TimerSuggestion, TimerTick};

/// Serving multiplier bounds and step.
const MIN_MULTIPLIER: f32 = 0.5;
const MAX_MULTIPLIER: f32 = 4.0;
const MULTIPLIER_STEP: f32 = 0.5;

/// What the session asks the chat component to do when an ingredient is
/// marked as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRequest {
    pub ingredient: String,
    pub message: String,
}

/// Result of asking the current step for a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerStart {
    /// A single duration was found; the timer is already running.
    Started { minutes: u32 },
    /// A range was found; the caller offers these durations to pick from.
    ChooseDuration { minutes: Vec<u32> },
    /// The step text mentions no usable duration.
    NotDetected,
}

/// State for one guided cooking session.
#[derive(Debug, Clone)]
pub struct CookingSession {
    recipe: Recipe,
    current_step: usize,
    completed_steps: BTreeSet<usize>,
    checked_ingredients: BTreeSet<usize>,
    removed_ingredients: BTreeSet<usize>,
    serving_multiplier: f32,
    timer: Option<StepTimer>,
}

impl CookingSession {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            current_step: 0,
            completed_steps: BTreeSet::new(),
            checked_ingredients: BTreeSet::new(),
            removed_ingredients: BTreeSet::new(),
            serving_multiplier: 1.0,
            timer: None,
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.completed_steps
    }

    pub fn checked_ingredients(&self) -> &BTreeSet<usize> {
        &self.checked_ingredients
    }

    pub fn removed_ingredients(&self) -> &BTreeSet<usize> {
        &self.removed_ingredients
    }

    pub fn serving_multiplier(&self) -> f32 {
        self.serving_multiplier
    }

    pub fn timer(&self) -> Option<&StepTimer> {
        self.timer.as_ref()
    }

    fn step_count(&self) -> usize {
        self.recipe.instructions.len()
    }

    /// Move to the next step, marking the one being left as completed.
    ///
    /// Advancing from the last step is a no-op on the index but still
    /// marks that step completed, so "done" state is reachable.
    pub fn advance(&mut self) {
        if self.step_count() == 0 {
            return;
        }
        self.completed_steps.insert(self.current_step);
        if self.current_step + 1 < self.step_count() {
            self.current_step += 1;
        }
    }

    /// Move to the previous step. Does not un-complete anything.
    pub fn retreat(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Direct navigation (overview strip). No completion side effect.
    pub fn jump_to(&mut self, step: usize) {
        if self.step_count() == 0 {
            return;
        }
        self.current_step = step.min(self.step_count() - 1);
    }

    /// Toggle an ingredient's checked state on the checklist.
    pub fn toggle_ingredient(&mut self, index: usize) {
        if index >= self.recipe.ingredients.len() {
            return;
        }
        if !self.checked_ingredients.remove(&index) {
            self.checked_ingredients.insert(index);
        }
    }

    /// Mark an ingredient as unavailable.
    ///
    /// The recipe is untouched; the returned request is forwarded to the
    /// chat component so the model can suggest a substitute.
    pub fn remove_ingredient(&mut self, index: usize) -> Option<SubstitutionRequest> {
        let ingredient = self.recipe.ingredients.get(index)?;
        if !self.removed_ingredients.insert(index) {
            return None;
        }
        Some(SubstitutionRequest {
            ingredient: ingredient.name.clone(),
            message: format!(
                "I don't have {}, what can I substitute?",
                ingredient.name
            ),
        })
    }

    /// Undo [`Self::remove_ingredient`].
    pub fn restore_ingredient(&mut self, index: usize) {
        self.removed_ingredients.remove(&index);
    }

    pub fn increase_servings(&mut self) -> f32 {
        self.serving_multiplier =
            (self.serving_multiplier + MULTIPLIER_STEP).min(MAX_MULTIPLIER);
        self.serving_multiplier
    }

    pub fn decrease_servings(&mut self) -> f32 {
        self.serving_multiplier =
            (self.serving_multiplier - MULTIPLIER_STEP).max(MIN_MULTIPLIER);
        self.serving_multiplier
    }

    /// Ingredients with amounts scaled for display at the current
    /// multiplier. The stored recipe keeps its original amounts.
    pub fn scaled_ingredients(&self) -> Vec<Ingredient> {
        self.recipe
            .ingredients
            .iter()
            .map(|ingredient| Ingredient {
                name: ingredient.name.clone(),
                amount: ingredient
                    .amount
                    .as_ref()
                    .map(|amount| scale_amount(amount, self.serving_multiplier)),
            })
            .collect()
    }

    /// Offer a timer for the current step based on its text.
    ///
    /// A fixed duration starts immediately; a range hands the choice
    /// back to the caller (both endpoints selectable).
    pub fn start_timer_from_step(&mut self) -> TimerStart {
        let Some(step) = self.recipe.instructions.get(self.current_step) else {
            return TimerStart::NotDetected;
        };

        match detect_duration(&step.step) {
            Some(TimerSuggestion::Fixed(minutes)) => {
                self.timer = Some(StepTimer::from_minutes(minutes));
                TimerStart::Started { minutes }
            }
            Some(suggestion @ TimerSuggestion::Range(..)) => TimerStart::ChooseDuration {
                minutes: suggestion.choices(),
            },
            None => TimerStart::NotDetected,
        }
    }

    /// Start a timer with an explicit duration (preset or custom).
    pub fn start_timer_minutes(&mut self, minutes: u32) {
        self.timer = Some(StepTimer::from_minutes(minutes));
    }

    /// One-second tick from the UI interval; inert with no timer.
    pub fn tick(&mut self) -> TimerTick {
        match self.timer.as_mut() {
            Some(timer) => timer.tick(),
            None => TimerTick::Idle,
        }
    }

    pub fn pause_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.pause();
        }
    }

    pub fn resume_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.resume();
        }
    }

    pub fn reset_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.reset();
        }
    }

    pub fn dismiss_timer(&mut self) {
        self.timer = None;
    }

    /// Swap in a new recipe (e.g. an AI edit arrived) and reset
    /// everything: prior step and checklist progress cannot be trusted
    /// to still apply to the edited recipe.
    pub fn replace_recipe(&mut self, recipe: Recipe) {
        *self = Self::new(recipe);
    }
}
