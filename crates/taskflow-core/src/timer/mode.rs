use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Focus intervals per set; every `MAX_SESSIONS`-th focus is followed by a long break.
pub const MAX_SESSIONS: u64 = 4;

/// Upper bound accepted by [`TimerSettings::validate`], in minutes.
pub const MAX_DURATION_MIN: u32 = 24 * 60;

const MOTIVATIONAL_QUOTE: &str = "Stay focused. You're doing great!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Mode::Focus)
    }

    /// Target of the manual "skip" control: focus skips to a short break,
    /// either break skips back to focus.
    pub fn skip_target(self) -> Mode {
        match self {
            Mode::Focus => Mode::ShortBreak,
            Mode::ShortBreak | Mode::LongBreak => Mode::Focus,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short_break",
            Mode::LongBreak => "long_break",
        };
        f.write_str(s)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "focus" => Ok(Mode::Focus),
            "short_break" | "break" | "short" => Ok(Mode::ShortBreak),
            "long_break" | "long" => Ok(Mode::LongBreak),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// User-facing timer settings.
///
/// Owned by the caller and replaced wholesale through
/// [`TimerEngine::apply_settings`](super::TimerEngine::apply_settings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_focus_duration")]
    pub focus_duration_min: u32,
    #[serde(default = "default_short_break")]
    pub short_break_duration_min: u32,
    #[serde(default = "default_long_break")]
    pub long_break_duration_min: u32,
    #[serde(default = "default_true")]
    pub auto_start_next: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub vibration_enabled: bool,
    #[serde(default = "default_true")]
    pub show_quotes: bool,
}

fn default_focus_duration() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_true() -> bool {
    true
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_duration_min: default_focus_duration(),
            short_break_duration_min: default_short_break(),
            long_break_duration_min: default_long_break(),
            auto_start_next: true,
            sound_enabled: true,
            vibration_enabled: true,
            show_quotes: true,
        }
    }
}

impl TimerSettings {
    pub fn duration_min(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_duration_min,
            Mode::ShortBreak => self.short_break_duration_min,
            Mode::LongBreak => self.long_break_duration_min,
        }
    }

    /// Check the durations the settings form would accept.
    ///
    /// The engine itself never calls this; it runs in the configuration
    /// layer before settings are handed over.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for mode in Mode::ALL {
            let minutes = self.duration_min(mode);
            if minutes == 0 || minutes > MAX_DURATION_MIN {
                return Err(ValidationError::InvalidValue {
                    field: format!("{mode}_duration_min"),
                    message: format!("must be between 1 and {MAX_DURATION_MIN} minutes, got {minutes}"),
                });
            }
        }
        Ok(())
    }

    pub fn quote(&self) -> Option<&'static str> {
        self.show_quotes.then_some(MOTIVATIONAL_QUOTE)
    }
}

/// Full duration of `mode` in seconds under `settings`.
pub fn duration_for(mode: Mode, settings: &TimerSettings) -> u64 {
    u64::from(settings.duration_min(mode)).saturating_mul(60)
}
