//! Focus timer engine.
//!
//! The engine is a one-second-resolution countdown state machine. It owns no
//! clock: the caller invokes `tick()` once per elapsed second while the timer
//! is active. Ticks the caller never delivers (app suspended, process asleep)
//! are simply not counted.
//!
//! ## State Transitions
//!
//! ```text
//! Focus --(0s)--> ShortBreak | LongBreak --(0s)--> Focus
//! ```
//!
//! Each mode is crossed with running/paused. A focus interval reaching zero
//! bumps `sessions_completed`; every `MAX_SESSIONS`-th one is followed by a
//! long break.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerSettings::default());
//! engine.toggle_start_pause();
//! // Once per second:
//! engine.tick(); // Returns Some(Event) when an interval completes
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mode::{duration_for, Mode, TimerSettings, MAX_SESSIONS};
use crate::events::Event;

/// Mutable part of the timer, as read by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRun {
    pub mode: Mode,
    pub seconds_remaining: u64,
    pub is_active: bool,
    pub sessions_completed: u64,
}

/// Core timer engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    settings: TimerSettings,
    run: TimerRun,
}

impl TimerEngine {
    /// Create a paused engine in focus mode with the full focus duration.
    pub fn new(settings: TimerSettings) -> Self {
        let run = TimerRun {
            mode: Mode::Focus,
            seconds_remaining: duration_for(Mode::Focus, &settings),
            is_active: false,
            sessions_completed: 0,
        };
        Self { settings, run }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.run.mode
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.run.seconds_remaining
    }

    pub fn is_active(&self) -> bool {
        self.run.is_active
    }

    pub fn sessions_completed(&self) -> u64 {
        self.run.sessions_completed
    }

    pub fn run(&self) -> TimerRun {
        self.run
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Full duration of the current mode under the current settings.
    pub fn total_secs(&self) -> u64 {
        duration_for(self.run.mode, &self.settings)
    }

    /// 0.0 .. 100.0 share of the current interval still remaining.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (self.run.seconds_remaining as f64 / total as f64 * 100.0).min(100.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.run.mode,
            mode_label: self.run.mode.label().to_string(),
            seconds_remaining: self.run.seconds_remaining,
            total_secs: self.total_secs(),
            is_active: self.run.is_active,
            sessions_completed: self.run.sessions_completed,
            progress_pct: self.progress_pct(),
            quote: self.settings.quote().map(str::to_string),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance by one second. Returns `Some(Event::IntervalCompleted)` when
    /// the countdown reaches zero; the transition happens in the same call.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.run.is_active {
            return None;
        }
        self.run.seconds_remaining = self.run.seconds_remaining.saturating_sub(1);
        if self.run.seconds_remaining == 0 {
            return Some(self.complete_interval());
        }
        None
    }

    pub fn toggle_start_pause(&mut self) -> Event {
        self.run.is_active = !self.run.is_active;
        let at = Utc::now();
        if self.run.is_active {
            Event::TimerStarted {
                mode: self.run.mode,
                seconds_remaining: self.run.seconds_remaining,
                at,
            }
        } else {
            Event::TimerPaused {
                mode: self.run.mode,
                seconds_remaining: self.run.seconds_remaining,
                at,
            }
        }
    }

    /// Jump to `mode` with its full duration, paused.
    pub fn switch_mode(&mut self, mode: Mode) -> Event {
        let from = self.run.mode;
        self.run.mode = mode;
        self.run.seconds_remaining = duration_for(mode, &self.settings);
        self.run.is_active = false;
        debug!(%from, to = %mode, "timer mode switched");
        Event::ModeSwitched {
            from,
            to: mode,
            duration_secs: self.run.seconds_remaining,
            at: Utc::now(),
        }
    }

    pub fn skip(&mut self) -> Event {
        self.switch_mode(self.run.mode.skip_target())
    }

    /// Refill the current mode and pause. Mode and session count are kept.
    pub fn reset(&mut self) -> Event {
        self.run.seconds_remaining = self.total_secs();
        self.run.is_active = false;
        Event::TimerReset {
            mode: self.run.mode,
            seconds_remaining: self.run.seconds_remaining,
            at: Utc::now(),
        }
    }

    /// Replace the settings.
    ///
    /// A paused timer picks up the new duration for its mode immediately. A
    /// running countdown is left alone; the new durations apply from the next
    /// reset, switch or transition.
    pub fn apply_settings(&mut self, settings: TimerSettings) -> Event {
        self.settings = settings;
        let recomputed = !self.run.is_active;
        if recomputed {
            self.run.seconds_remaining = self.total_secs();
        }
        Event::SettingsApplied {
            recomputed,
            seconds_remaining: self.run.seconds_remaining,
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_interval(&mut self) -> Event {
        let completed = self.run.mode;
        let next = if completed.is_break() {
            Mode::Focus
        } else {
            self.run.sessions_completed += 1;
            if self.run.sessions_completed % MAX_SESSIONS == 0 {
                Mode::LongBreak
            } else {
                Mode::ShortBreak
            }
        };
        self.run.mode = next;
        self.run.seconds_remaining = duration_for(next, &self.settings);
        self.run.is_active = self.settings.auto_start_next;
        debug!(
            %completed,
            %next,
            sessions_completed = self.run.sessions_completed,
            "timer interval completed"
        );
        Event::IntervalCompleted {
            completed,
            next,
            sessions_completed: self.run.sessions_completed,
            auto_started: self.run.is_active,
            at: Utc::now(),
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}
