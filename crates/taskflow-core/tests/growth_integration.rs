//! Integration tests for tree growth and its durable bloom tally.

use proptest::prelude::*;
use taskflow_core::{
    CycleStore, Database, Event, GrowthTracker, MemoryCycleStore, StageKey, StagePlan,
};

#[test]
fn stage_boundaries_for_default_garden() {
    let plan = StagePlan::default();
    assert_eq!(plan.resolve(0).unwrap().key, StageKey::Seed);
    assert_eq!(plan.resolve(1).unwrap().key, StageKey::Roots);

    let progress = plan.progress(55).unwrap();
    assert_eq!(progress.key, StageKey::Bloom);
    assert_eq!(progress.sessions_into_stage, 29);
    assert_eq!(progress.sessions_remaining, 1);
}

#[test]
fn fifty_sixth_session_blooms_and_restarts() {
    let mut tracker = GrowthTracker::new(StagePlan::default(), MemoryCycleStore::default()).unwrap();
    let mut stages_seen = vec![tracker.current_stage().unwrap().key];
    for _ in 0..55 {
        if let Event::StageAdvanced { to, .. } = tracker.increment_session().unwrap() {
            stages_seen.push(to);
        }
    }
    assert_eq!(
        stages_seen,
        vec![
            StageKey::Seed,
            StageKey::Roots,
            StageKey::Leaf,
            StageKey::Tree,
            StageKey::Bloom
        ]
    );

    let bloom = tracker.increment_session().unwrap();
    assert!(matches!(bloom, Event::TreeBloomed { completed_cycles: 1, .. }));
    assert_eq!(tracker.session_count(), 0);
    assert_eq!(tracker.current_stage().unwrap().key, StageKey::Seed);
}

#[test]
fn completed_cycles_survive_restart_but_progress_does_not() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskflow.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut tracker = GrowthTracker::new(StagePlan::default(), db).unwrap();
        for _ in 0..56 + 10 {
            tracker.increment_session().unwrap();
        }
        assert_eq!(tracker.completed_cycles(), 1);
        assert_eq!(tracker.session_count(), 10);
    }

    let db = Database::open_at(&path).unwrap();
    assert_eq!(db.load_completed_cycles().unwrap(), 1);
    let tracker = GrowthTracker::new(StagePlan::default(), db).unwrap();
    assert_eq!(tracker.completed_cycles(), 1);
    assert_eq!(tracker.session_count(), 0);
}

#[test]
fn tracker_can_borrow_its_store() {
    let mut db = Database::open_memory().unwrap();
    {
        let mut tracker = GrowthTracker::new(StagePlan::default(), &mut db).unwrap();
        for _ in 0..56 {
            tracker.increment_session().unwrap();
        }
    }
    assert_eq!(db.load_completed_cycles().unwrap(), 1);
}

#[test]
fn custom_plan_blooms_at_its_own_total() {
    let mut plan = StagePlan::default();
    plan.stages.truncate(2);
    let mut tracker = GrowthTracker::new(plan, MemoryCycleStore::new(2)).unwrap();
    let events: Vec<Event> = (0..4)
        .map(|_| tracker.increment_session().unwrap())
        .collect();
    assert!(matches!(events[3], Event::TreeBloomed { completed_cycles: 3, .. }));
}

proptest! {
    #[test]
    fn stage_index_is_monotonic(a in 0u64..200, b in 0u64..200) {
        let plan = StagePlan::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(plan.stage_index(lo) <= plan.stage_index(hi));
    }

    #[test]
    fn progress_is_within_stage(count in 0u64..56) {
        let plan = StagePlan::default();
        let progress = plan.progress(count).unwrap();
        let required = u64::from(plan.stages[progress.stage_index].required_sessions);
        prop_assert!(progress.sessions_into_stage < required);
        prop_assert_eq!(progress.sessions_into_stage + progress.sessions_remaining, required);
        prop_assert_eq!(progress.cumulative_before + progress.sessions_into_stage, count);
    }

    #[test]
    fn session_count_never_reaches_total(increments in 0usize..400) {
        let mut tracker = GrowthTracker::new(StagePlan::default(), MemoryCycleStore::default()).unwrap();
        for _ in 0..increments {
            tracker.increment_session().unwrap();
            prop_assert!(tracker.session_count() < 56);
        }
        prop_assert_eq!(tracker.completed_cycles(), (increments / 56) as u64);
    }
}
