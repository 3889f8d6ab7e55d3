mod engine;
mod mode;

pub use engine::{TimerEngine, TimerRun};
pub use mode::{duration_for, Mode, TimerSettings, MAX_DURATION_MIN, MAX_SESSIONS};
