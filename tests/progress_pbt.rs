//! Property-based tests for the progress state machines.
//!
//! Invariants covered:
//! - completed sets only ever grow, and completed ids are never re-offered
//! - version numbers increase by exactly one per transition
//! - serde round-trips preserve every progress family
//! - BKT posteriors stay probabilities for in-range parameters

use std::collections::HashSet;

use proptest::prelude::*;
use uuid::Uuid;

use pathway_engine::pathway::bkt::{self, BktParams};
use pathway_engine::pathway::config::BktSettings;
use pathway_engine::pathway::progress::{
    BktProgress, GraphProgress, LinearProgress, PathwayProgress, RandomProgress,
};
use pathway_engine::{ElementKind, WalkableRef};

// ============================================================================
// Generators
// ============================================================================

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn arb_walkable() -> impl Strategy<Value = WalkableRef> {
    (arb_uuid(), any::<bool>()).prop_map(|(id, interactive)| {
        let kind = if interactive {
            ElementKind::Interactive
        } else {
            ElementKind::Activity
        };
        WalkableRef::new(id, kind)
    })
}

fn arb_probability() -> impl Strategy<Value = f64> {
    (0u64..=1000u64).prop_map(|v| v as f64 / 1000.0)
}

/// Slip/guess kept off the boundaries so denominators stay non-degenerate.
fn arb_interior_probability() -> impl Strategy<Value = f64> {
    (10u64..=990u64).prop_map(|v| v as f64 / 1000.0)
}

fn arb_bkt_settings() -> impl Strategy<Value = BktSettings> {
    (
        1u64..=10,
        arb_interior_probability(),
        arb_interior_probability(),
        arb_probability(),
        arb_probability(),
        arb_probability(),
        1u32..=5,
    )
        .prop_map(
            |(exit_after, p_slip, p_guess, p_transit, p_l0, p_ln, maintain_for)| BktSettings {
                exit_after,
                params: BktParams {
                    p_slip,
                    p_guess,
                    p_transit,
                },
                p_l0,
                p_ln,
                maintain_for,
                competency: vec![],
            },
        )
}

// ============================================================================
// Linear
// ============================================================================

proptest! {
    #[test]
    fn linear_completed_set_grows_monotonically(ids in prop::collection::vec(arb_uuid(), 0..20)) {
        let mut record = LinearProgress::start(Uuid::new_v4(), "learner-1");
        let mut seen: HashSet<Uuid> = HashSet::new();

        for id in &ids {
            let next = record.with_completed(*id);
            seen.insert(*id);

            // nothing is ever removed, and every recorded id is present
            prop_assert_eq!(next.completed.len(), seen.len());
            for prior in &record.completed {
                prop_assert!(next.completed.contains(prior));
            }
            prop_assert_eq!(next.meta.version, record.meta.version + 1);
            record = next;
        }
    }

    #[test]
    fn linear_never_offers_a_completed_child(
        children in prop::collection::vec(arb_walkable(), 1..10),
        completed_count in 0usize..10,
    ) {
        let mut record = LinearProgress::start(Uuid::new_v4(), "learner-1");
        for child in children.iter().take(completed_count) {
            record = record.with_completed(child.element_id);
        }

        match record.next_pending(&children) {
            Some(next) => prop_assert!(!record.completed.contains(&next.element_id)),
            None => prop_assert!(children
                .iter()
                .all(|child| record.completed.contains(&child.element_id))),
        }
    }
}

// ============================================================================
// Random
// ============================================================================

proptest! {
    #[test]
    fn random_remaining_is_disjoint_from_completed(
        children in prop::collection::vec(arb_walkable(), 0..12),
        finished_count in 0usize..12,
    ) {
        let mut record = RandomProgress::start(Uuid::new_v4(), "learner-1");
        for child in children.iter().take(finished_count) {
            record = record.finished(child);
        }

        let remaining = record.remaining(&children);
        let remaining_ids: HashSet<Uuid> = remaining.iter().map(|c| c.element_id).collect();
        prop_assert!(remaining_ids.is_disjoint(&record.completed));

        let distinct: HashSet<Uuid> = children.iter().map(|c| c.element_id).collect();
        prop_assert_eq!(remaining_ids.len() + record.completed.len(), distinct.len());
    }

    #[test]
    fn random_resume_slot_survives_until_finished(walkable in arb_walkable()) {
        let record = RandomProgress::start(Uuid::new_v4(), "learner-1").started(walkable);
        prop_assert_eq!(record.in_progress, Some(walkable));

        let done = record.finished(&walkable);
        prop_assert!(done.in_progress.is_none());
        prop_assert!(done.completed.contains(&walkable.element_id));
    }
}

// ============================================================================
// BKT
// ============================================================================

proptest! {
    #[test]
    fn bkt_posterior_stays_a_probability(
        actual in any::<bool>(),
        prior in arb_probability(),
        slip in arb_interior_probability(),
        guess in arb_interior_probability(),
        transit in arb_probability(),
    ) {
        let params = BktParams { p_slip: slip, p_guess: guess, p_transit: transit };
        let update = bkt::advance(actual, prior, &params).unwrap();
        prop_assert!((0.0..=1.0).contains(&update.p_correct));
        prop_assert!((0.0..=1.0).contains(&update.p_known_prior));
        prop_assert!((0.0..=1.0).contains(&update.p_ln));
        // the transit step can only raise the conditioned estimate
        prop_assert!(update.p_ln >= update.p_known_prior - 1e-12);
    }

    #[test]
    fn bkt_observations_accumulate_and_stay_bounded(
        settings in arb_bkt_settings(),
        responses in prop::collection::vec(any::<bool>(), 1..15),
    ) {
        let mut record = BktProgress::start(Uuid::new_v4(), "learner-1", settings.p_l0);

        for &actual in &responses {
            let walkable = WalkableRef::activity(Uuid::new_v4());
            let before = record.completed.len();
            record = record.started(walkable).observe(actual, &settings).unwrap();

            prop_assert_eq!(record.completed.len(), before + 1);
            prop_assert!((0.0..=1.0).contains(&record.mastery));
            prop_assert!(record.in_progress.is_none());
        }

        // the terminal flag latches once either bound is crossed
        if record.completed.len() as u64 >= settings.exit_after {
            prop_assert!(record.is_completed);
        }
        if record.is_completed {
            let again = record
                .started(WalkableRef::activity(Uuid::new_v4()))
                .observe(true, &settings)
                .unwrap();
            prop_assert!(again.is_completed);
        }
    }
}

// ============================================================================
// Serialization
// ============================================================================

proptest! {
    #[test]
    fn every_progress_family_round_trips(
        walkable in arb_walkable(),
        ids in prop::collection::vec(arb_uuid(), 0..8),
        mastery in arb_probability(),
        streak in 0u32..10,
        terminal in any::<bool>(),
    ) {
        let pathway_id = Uuid::new_v4();

        let mut linear = LinearProgress::start(pathway_id, "learner-1");
        for id in &ids {
            linear = linear.with_completed(*id);
        }

        let mut random = RandomProgress::start(pathway_id, "learner-1").started(walkable);
        for id in &ids {
            random = random.finished(&WalkableRef::activity(*id));
        }

        let graph = GraphProgress::start_at(pathway_id, "learner-1", walkable);

        let mut bkt = BktProgress::start(pathway_id, "learner-1", mastery);
        bkt.mastery_streak = streak;
        bkt.is_completed = terminal;
        bkt.completed = ids.iter().copied().collect();

        for record in [
            PathwayProgress::Linear(linear),
            PathwayProgress::Random(random),
            PathwayProgress::Graph(graph),
            PathwayProgress::Bkt(bkt),
        ] {
            let json = serde_json::to_string(&record).unwrap();
            let back: PathwayProgress = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(&back, &record);
        }
    }
}
