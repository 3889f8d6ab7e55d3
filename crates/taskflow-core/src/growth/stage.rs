use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKey {
    Seed,
    Roots,
    Leaf,
    Tree,
    Bloom,
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StageKey::Seed => "seed",
            StageKey::Roots => "roots",
            StageKey::Leaf => "leaf",
            StageKey::Tree => "tree",
            StageKey::Bloom => "bloom",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub key: StageKey,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    /// Sessions needed to pass this stage.
    pub required_sessions: u32,
}

impl Stage {
    fn new(key: StageKey, label: &str, icon: &str, required_sessions: u32) -> Self {
        Self {
            key,
            label: label.into(),
            icon: icon.into(),
            required_sessions,
        }
    }
}

/// Where a session count sits inside its stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProgress {
    pub stage_index: usize,
    pub key: StageKey,
    /// Sessions required by all stages before the current one.
    pub cumulative_before: u64,
    pub sessions_into_stage: u64,
    pub sessions_remaining: u64,
}

/// One line of the stage table shown under the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRow {
    pub key: StageKey,
    pub label: String,
    pub icon: String,
    pub sessions_done: u64,
    pub required_sessions: u64,
    pub is_current: bool,
}

/// Ordered growth stages. Order matters: thresholds are cumulative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePlan {
    pub stages: Vec<Stage>,
}

impl StagePlan {
    pub fn new(stages: Vec<Stage>) -> Result<Self, ValidationError> {
        let plan = Self { stages };
        plan.validate()?;
        Ok(plan)
    }

    /// Seed 1, Roots 3, Leaf 7, Tree 15, Bloom 30.
    pub fn default_garden() -> Self {
        Self {
            stages: vec![
                Stage::new(StageKey::Seed, "Seed", "🌱", 1),
                Stage::new(StageKey::Roots, "Roots", "🌿", 3),
                Stage::new(StageKey::Leaf, "Leaf", "🍃", 7),
                Stage::new(StageKey::Tree, "Tree", "🌳", 15),
                Stage::new(StageKey::Bloom, "Bloom", "🌸", 30),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stages.is_empty() {
            return Err(ValidationError::EmptyCollection("growth stages".into()));
        }
        if let Some(stage) = self.stages.iter().find(|s| s.required_sessions == 0) {
            return Err(ValidationError::InvalidValue {
                field: format!("{}.required_sessions", stage.key),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Sessions needed to go from the first stage through the last.
    pub fn total_required(&self) -> u64 {
        self.stages.iter().map(|s| u64::from(s.required_sessions)).sum()
    }

    /// Sessions required by the stages before (not including) `index`.
    pub fn cumulative_before(&self, index: usize) -> u64 {
        self.stages
            .iter()
            .take(index)
            .map(|s| u64::from(s.required_sessions))
            .sum()
    }

    /// Index of the first stage whose cumulative total exceeds
    /// `session_count`, or the last stage once every threshold is met.
    pub fn stage_index(&self, session_count: u64) -> usize {
        let mut cumulative = 0u64;
        for (i, stage) in self.stages.iter().enumerate() {
            cumulative += u64::from(stage.required_sessions);
            if session_count < cumulative {
                return i;
            }
        }
        self.stages.len().saturating_sub(1)
    }

    pub fn resolve(&self, session_count: u64) -> Option<&Stage> {
        self.stages.get(self.stage_index(session_count))
    }

    pub fn progress(&self, session_count: u64) -> Option<StageProgress> {
        let stage_index = self.stage_index(session_count);
        let stage = self.stages.get(stage_index)?;
        let cumulative_before = self.cumulative_before(stage_index);
        let sessions_into_stage = session_count.saturating_sub(cumulative_before);
        Some(StageProgress {
            stage_index,
            key: stage.key,
            cumulative_before,
            sessions_into_stage,
            sessions_remaining: u64::from(stage.required_sessions)
                .saturating_sub(sessions_into_stage),
        })
    }

    /// Per-stage `done / required` for `session_count`, each clamped to
    /// its stage's range.
    pub fn table(&self, session_count: u64) -> Vec<StageRow> {
        let current = self.stage_index(session_count);
        let mut cumulative = 0u64;
        self.stages
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                let required = u64::from(stage.required_sessions);
                let done = session_count.saturating_sub(cumulative).min(required);
                cumulative += required;
                StageRow {
                    key: stage.key,
                    label: stage.label.clone(),
                    icon: stage.icon.clone(),
                    sessions_done: done,
                    required_sessions: required,
                    is_current: i == current,
                }
            })
            .collect()
    }
}

impl Default for StagePlan {
    fn default() -> Self {
        Self::default_garden()
    }
}
