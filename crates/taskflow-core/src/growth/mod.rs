mod stage;
mod store;
mod tracker;

pub use stage::{Stage, StageKey, StagePlan, StageProgress, StageRow};
pub use store::{CycleStore, MemoryCycleStore};
pub use tracker::{GrowthState, GrowthTracker};
