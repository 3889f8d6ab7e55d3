//! Tree growth tracker.
//!
//! Turns a counter of completed sessions into a growth stage. Reaching the
//! plan's grand total is a bloom: the durable cycle tally goes up and the
//! counter starts over from the first stage.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stage::{Stage, StagePlan, StageProgress, StageRow};
use super::store::CycleStore;
use crate::error::{Result, ValidationError};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GrowthState {
    pub session_count: u64,
}

/// Owned growth state plus the store that keeps its completion tally.
#[derive(Debug)]
pub struct GrowthTracker<S: CycleStore> {
    plan: StagePlan,
    state: GrowthState,
    completed_cycles: u64,
    store: S,
}

impl<S: CycleStore> GrowthTracker<S> {
    /// Start at zero sessions with the tally loaded from `store`.
    pub fn new(plan: StagePlan, store: S) -> Result<Self> {
        let completed_cycles = store.load_completed_cycles()?;
        Ok(Self {
            plan,
            state: GrowthState::default(),
            completed_cycles,
            store,
        })
    }

    pub fn plan(&self) -> &StagePlan {
        &self.plan
    }

    pub fn session_count(&self) -> u64 {
        self.state.session_count
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub fn current_stage(&self) -> Option<&Stage> {
        self.plan.resolve(self.state.session_count)
    }

    pub fn progress(&self) -> Option<StageProgress> {
        self.plan.progress(self.state.session_count)
    }

    pub fn table(&self) -> Vec<StageRow> {
        self.plan.table(self.state.session_count)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn snapshot(&self) -> Option<Event> {
        let stage = self.current_stage()?;
        let progress = self.progress()?;
        Some(Event::GrowthSnapshot {
            session_count: self.state.session_count,
            stage: stage.key,
            stage_label: stage.label.clone(),
            sessions_into_stage: progress.sessions_into_stage,
            sessions_remaining: progress.sessions_remaining,
            completed_cycles: self.completed_cycles,
            at: Utc::now(),
        })
    }

    /// Record one completed session.
    ///
    /// Crossing the grand total returns `Event::TreeBloomed`. The new tally
    /// is persisted before any in-memory state changes. A failed call leaves
    /// the tracker exactly as it was.
    pub fn increment_session(&mut self) -> Result<Event> {
        let previous = self.state.session_count;
        let next = previous + 1;
        let total = self.plan.total_required();

        if next >= total && previous < total {
            let cycles = self.completed_cycles + 1;
            self.store.save_completed_cycles(cycles)?;
            self.completed_cycles = cycles;
            self.state.session_count = 0;
            info!(completed_cycles = cycles, "tree bloomed, starting a new cycle");
            return Ok(Event::TreeBloomed {
                completed_cycles: cycles,
                at: Utc::now(),
            });
        }

        let progress = self
            .plan
            .progress(next)
            .ok_or_else(|| ValidationError::EmptyCollection("growth stages".into()))?;
        let from = self.plan.resolve(previous).map(|s| s.key);
        self.state.session_count = next;
        let at = Utc::now();

        match from {
            Some(from) if from != progress.key => {
                debug!(%from, to = %progress.key, session_count = next, "tree stage advanced");
                Ok(Event::StageAdvanced {
                    from,
                    to: progress.key,
                    session_count: next,
                    at,
                })
            }
            _ => Ok(Event::SessionGrown {
                session_count: next,
                stage: progress.key,
                sessions_remaining: progress.sessions_remaining,
                at,
            }),
        }
    }

    /// Put the counter back to zero. The cycle tally is untouched.
    pub fn reset(&mut self) -> Event {
        let previous_count = self.state.session_count;
        self.state.session_count = 0;
        Event::TreeReset {
            previous_count,
            at: Utc::now(),
        }
    }

    /// Developer reset of the durable tally.
    pub fn reset_completed_cycles(&mut self) -> Result<()> {
        self.store.save_completed_cycles(0)?;
        self.completed_cycles = 0;
        Ok(())
    }
}
