use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::growth::StageKey;
use crate::timer::Mode;

/// Every state change in the core produces an Event.
/// The shell prints them; a GUI would render from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    /// The countdown hit zero and the engine moved on by itself.
    IntervalCompleted {
        completed: Mode,
        next: Mode,
        sessions_completed: u64,
        auto_started: bool,
        at: DateTime<Utc>,
    },
    /// User picked a mode directly or pressed skip.
    ModeSwitched {
        from: Mode,
        to: Mode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    SettingsApplied {
        /// False when the timer was running and the new durations wait
        /// for the next reset or transition.
        recomputed: bool,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        mode_label: String,
        seconds_remaining: u64,
        total_secs: u64,
        is_active: bool,
        sessions_completed: u64,
        progress_pct: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quote: Option<String>,
        at: DateTime<Utc>,
    },
    /// A growth session was recorded without changing stage.
    SessionGrown {
        session_count: u64,
        stage: StageKey,
        sessions_remaining: u64,
        at: DateTime<Utc>,
    },
    StageAdvanced {
        from: StageKey,
        to: StageKey,
        session_count: u64,
        at: DateTime<Utc>,
    },
    /// A full growth cycle finished; the session counter is back at zero.
    TreeBloomed {
        completed_cycles: u64,
        at: DateTime<Utc>,
    },
    TreeReset {
        previous_count: u64,
        at: DateTime<Utc>,
    },
    GrowthSnapshot {
        session_count: u64,
        stage: StageKey,
        stage_label: String,
        sessions_into_stage: u64,
        sessions_remaining: u64,
        completed_cycles: u64,
        at: DateTime<Utc>,
    },
}
