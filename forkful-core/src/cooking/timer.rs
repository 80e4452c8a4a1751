//! Countdown timer for cooking steps.
//!
//! The timer itself is passive: the embedding UI calls [`StepTimer::tick`]
//! once per second and cancels its interval on teardown. Duration
//! detection scans step text for "8 minutes" / "5 to 10 minutes"
//! patterns so the timer can be offered automatically.

use std::sync::LazyLock;

use regex::Regex;

/// "5 to 10 minutes", "5-10 min"
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(?:to|-|–)\s*(\d+)\s*min(?:ute)?s?\b")
        .expect("Invalid duration-range regex")
});

/// "8 minutes", "8 min"
static FIXED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*min(?:ute)?s?\b").expect("Invalid duration regex")
});

/// How many beeps the UI should play when a timer finishes.
pub const FINISH_BEEPS: u32 = 3;

/// A duration found in step text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerSuggestion {
    /// Single duration in minutes; the timer can start immediately.
    Fixed(u32),
    /// A range; the user picks between the endpoints before starting.
    Range(u32, u32),
}

impl TimerSuggestion {
    /// Selectable durations for this suggestion, in minutes.
    pub fn choices(&self) -> Vec<u32> {
        match *self {
            TimerSuggestion::Fixed(minutes) => vec![minutes],
            TimerSuggestion::Range(low, high) => vec![low, high],
        }
    }
}

/// Scan step text for a duration mention.
///
/// Ranges win over single values so "5 to 10 minutes" is not read as
/// just "10 minutes".
pub fn detect_duration(text: &str) -> Option<TimerSuggestion> {
    if let Some(cap) = RANGE_RE.captures(text) {
        let low: u32 = cap[1].parse().ok()?;
        let high: u32 = cap[2].parse().ok()?;
        return Some(TimerSuggestion::Range(low, high));
    }

    if let Some(cap) = FIXED_RE.captures(text) {
        let minutes: u32 = cap[1].parse().ok()?;
        return Some(TimerSuggestion::Fixed(minutes));
    }

    None
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Paused, finished, or dismissed; nothing happened.
    Idle,
    /// Still counting down.
    Running { remaining_secs: u32 },
    /// Just hit zero. Fired exactly once per countdown.
    Finished { beeps: u32 },
}

/// Countdown state for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTimer {
    total_secs: u32,
    remaining_secs: u32,
    running: bool,
    finished: bool,
}

impl StepTimer {
    /// Start a running timer for the given number of minutes.
    pub fn from_minutes(minutes: u32) -> Self {
        let total_secs = minutes * 60;
        Self {
            total_secs,
            remaining_secs: total_secs,
            running: true,
            finished: false,
        }
    }

    /// Advance one second. The driver calls this on its interval.
    pub fn tick(&mut self) -> TimerTick {
        if !self.running || self.finished {
            return TimerTick::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            self.finished = true;
            TimerTick::Finished {
                beeps: FINISH_BEEPS,
            }
        } else {
            TimerTick::Running {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        if !self.finished {
            self.running = true;
        }
    }

    /// Back to the full duration, paused, ready to start again.
    pub fn reset(&mut self) {
        self.remaining_secs = self.total_secs;
        self.running = false;
        self.finished = false;
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_fixed_duration() {
        assert_eq!(
            detect_duration("Simmer for 8 minutes, stirring."),
            Some(TimerSuggestion::Fixed(8))
        );
    }

    #[test]
    fn test_detects_range_duration() {
        let suggestion = detect_duration("Bake for 5 to 10 minutes until golden.").unwrap();
        assert_eq!(suggestion, TimerSuggestion::Range(5, 10));
        assert_eq!(suggestion.choices(), vec![5, 10]);
    }

    #[test]
    fn test_detects_hyphenated_range() {
        assert_eq!(
            detect_duration("Rest 10-15 min before slicing."),
            Some(TimerSuggestion::Range(10, 15))
        );
    }

    #[test]
    fn test_no_duration_in_text() {
        assert_eq!(detect_duration("Whisk until fluffy."), None);
    }

    #[test]
    fn test_countdown_finishes_once() {
        let mut timer = StepTimer::from_minutes(1);
        for expected in (1..60).rev() {
            assert_eq!(
                timer.tick(),
                TimerTick::Running {
                    remaining_secs: expected
                }
            );
        }
        assert_eq!(timer.tick(), TimerTick::Finished { beeps: FINISH_BEEPS });
        // Subsequent ticks are inert
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert!(timer.is_finished());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut timer = StepTimer::from_minutes(1);
        timer.tick();
        timer.pause();
        assert_eq!(timer.tick(), TimerTick::Idle);
        let before = timer.remaining_secs();
        timer.resume();
        timer.tick();
        assert_eq!(timer.remaining_secs(), before - 1);
    }

    #[test]
    fn test_reset_restores_full_duration() {
        let mut timer = StepTimer::from_minutes(2);
        timer.tick();
        timer.tick();
        timer.reset();
        assert_eq!(timer.remaining_secs(), 120);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_resume_after_finish_is_inert() {
        let mut timer = StepTimer::from_minutes(1);
        for _ in 0..60 {
            timer.tick();
        }
        assert!(timer.is_finished());
        timer.resume();
        assert_eq!(timer.tick(), TimerTick::Idle);
    }
}
