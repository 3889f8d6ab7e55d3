//! # TaskFlow Core Library
//!
//! Logic behind the TaskFlow focus timer and tree growth screens. Rendering,
//! navigation and input forms live elsewhere; they hold these values and call
//! into them.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a one-second-resolution focus/break state machine that
//!   requires the caller to invoke `tick()` once per second
//! - **Growth Tracker**: maps completed sessions to a tree stage and blooms
//!   (resets) when the whole stage plan is done
//! - **Storage**: SQLite key-value store for the durable bloom tally and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: focus timer state machine
//! - [`GrowthTracker`]: tree growth state machine
//! - [`Database`]: durable completed-cycles tally
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod growth;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use growth::{
    CycleStore, GrowthState, GrowthTracker, MemoryCycleStore, Stage, StageKey, StagePlan,
    StageProgress, StageRow,
};
pub use storage::{Config, Database, GrowthConfig};
pub use timer::{duration_for, Mode, TimerEngine, TimerRun, TimerSettings, MAX_SESSIONS};
