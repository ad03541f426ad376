#![forbid(unsafe_code)]
use roulement::model::{Availability, ConflictPair, Dataset, Shift, ShiftKind, User, UserId, Window};
use roulement::scheduler::{TieState, WorkloadTracker};
use roulement::{ConflictRegistry, TieBreak};

fn uid(s: &str) -> UserId {
    UserId::new(s)
}

#[test]
fn pairs_are_symmetric() {
    let mut registry = ConflictRegistry::new();
    assert!(registry.add(&uid("bob"), &uid("alice")));
    assert!(!registry.add(&uid("alice"), &uid("bob")));
    assert_eq!(registry.len(), 1);
    assert!(registry.contains(&uid("alice"), &uid("bob")));
    assert!(registry.contains(&uid("bob"), &uid("alice")));

    assert!(registry.remove(&uid("alice"), &uid("bob")));
    assert!(registry.is_empty());
    assert!(!registry.contains(&uid("bob"), &uid("alice")));
}

#[test]
fn self_pair_is_refused() {
    let mut registry = ConflictRegistry::new();
    assert!(!registry.add(&uid("alice"), &uid("alice")));
    assert!(registry.is_empty());
    assert!(!registry.contains(&uid("alice"), &uid("alice")));
}

#[test]
fn conflicts_with_checks_every_assigned_user() {
    let registry = ConflictRegistry::from_pairs(&[
        ConflictPair::new(uid("carol"), uid("dan")),
        ConflictPair::new(uid("eve"), uid("alice")),
    ]);
    let assigned = vec![uid("alice"), uid("bob")];

    assert!(registry.conflicts_with(&assigned, &uid("eve")));
    assert!(!registry.conflicts_with(&assigned, &uid("dan")));
    assert!(!registry.conflicts_with(&[], &uid("eve")));
}

#[test]
fn persisted_pairs_are_normalized_and_deduplicated() {
    let registry = ConflictRegistry::from_pairs(&[
        ConflictPair::new(uid("zoe"), uid("adam")),
        ConflictPair::new(uid("adam"), uid("zoe")),
        ConflictPair::new(uid("bob"), uid("adam")),
    ]);

    assert_eq!(
        registry.to_pairs(),
        vec![
            ConflictPair::new(uid("adam"), uid("bob")),
            ConflictPair::new(uid("adam"), uid("zoe")),
        ]
    );
}

#[test]
fn forget_drops_all_pairs_of_a_user() {
    let mut registry = ConflictRegistry::new();
    registry.add(&uid("a"), &uid("b"));
    registry.add(&uid("c"), &uid("a"));
    registry.add(&uid("b"), &uid("c"));
    registry.forget(&uid("a"));
    assert_eq!(registry.to_pairs(), vec![ConflictPair::new(uid("b"), uid("c"))]);
}

#[test]
fn removing_a_user_drops_pairs_and_assignments() {
    let mut dataset = Dataset {
        users: ["a", "b", "c"]
            .into_iter()
            .map(|id| User::new(id, 3).with_id(uid(id)))
            .collect(),
        shifts: vec![Shift::new("desk", ShiftKind::Fixed, Window::new(0, 9, 12), 2).unwrap()],
        conflicts: vec![
            ConflictPair::new(uid("a"), uid("b")),
            ConflictPair::new(uid("c"), uid("b")),
            ConflictPair::new(uid("b"), uid("a")),
            ConflictPair::new(uid("c"), uid("a")),
        ],
    };
    dataset.shifts[0].assigned_users = vec![uid("a"), uid("c")];

    let removed = dataset.remove_user(&uid("a")).unwrap();

    assert_eq!(removed.id, uid("a"));
    assert_eq!(dataset.users.len(), 2);
    assert_eq!(dataset.conflicts, vec![ConflictPair::new(uid("b"), uid("c"))]);
    assert_eq!(dataset.shifts[0].assigned_users, vec![uid("c")]);
    assert!(dataset.remove_user(&uid("a")).is_none());
}

#[test]
fn tracker_counts_start_at_zero() {
    let mut tracker = WorkloadTracker::new();
    assert_eq!(tracker.count(&uid("new")), 0);
    tracker.increment(&uid("new"));
    tracker.increment(&uid("new"));
    assert_eq!(tracker.count(&uid("new")), 2);
    tracker.reset();
    assert_eq!(tracker.count(&uid("new")), 0);
}

#[test]
fn ranking_prefers_lower_count_then_lower_id() {
    let users: Vec<User> = ["c", "a", "b"]
        .iter()
        .map(|id| User::new(*id, 5).with_id(uid(id)).with_availability(Availability::always()))
        .collect();
    let mut tracker = WorkloadTracker::new();
    tracker.increment(&uid("a"));

    let mut ties = TieState::new(TieBreak::ById);
    let ranked: Vec<&str> = tracker
        .rank(users.iter().collect(), &mut ties)
        .into_iter()
        .map(|u| u.id.as_str())
        .collect();

    assert_eq!(ranked, vec!["b", "c", "a"]);
}

#[test]
fn seeded_ranking_keeps_counts_first() {
    let users: Vec<User> = (0..8)
        .map(|i| User::new(format!("u{i}"), 5).with_id(uid(&format!("u{i}"))))
        .collect();
    let mut tracker = WorkloadTracker::new();
    for busy in ["u0", "u1", "u2"] {
        tracker.increment(&uid(busy));
    }

    let mut ties = TieState::new(TieBreak::Seeded { seed: 42 });
    let ranked = tracker.rank(users.iter().collect(), &mut ties);
    let counts: Vec<u32> = ranked.iter().map(|u| tracker.count(&u.id)).collect();

    assert_eq!(counts, vec![0, 0, 0, 0, 0, 1, 1, 1]);

    let mut again = TieState::new(TieBreak::Seeded { seed: 42 });
    let replay = tracker.rank(users.iter().collect(), &mut again);
    let first: Vec<&UserId> = ranked.iter().map(|u| &u.id).collect();
    let second: Vec<&UserId> = replay.iter().map(|u| &u.id).collect();
    assert_eq!(first, second);
}
