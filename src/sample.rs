//! Jeu de données de démonstration : cinq personnes, six créneaux, un conflit.

use crate::model::{
    Availability, ConflictPair, Dataset, Shift, ShiftId, ShiftKind, User, UserId,
};

fn weekly(ranges: &[(u8, u8, u8)]) -> Availability {
    Availability::from_ranges(ranges.iter().copied())
}

fn user(id: &str, name: &str, max: u32, color: &str, availability: Availability) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        max_shifts_per_week: max,
        availability,
        color: color.to_string(),
    }
}

fn shift(id: &str, name: &str, kind: ShiftKind, day: u8, start: u8, end: u8, staff: u32) -> Shift {
    Shift {
        id: ShiftId::new(id),
        name: name.to_string(),
        kind,
        day,
        start_hour: start,
        end_hour: end,
        required_staff: staff,
        assigned_users: Vec::new(),
    }
}

pub fn sample_dataset() -> Dataset {
    let users = vec![
        user(
            "alice",
            "Alice",
            4,
            "#FF6B6B",
            weekly(&[(1, 9, 17), (2, 9, 17), (3, 9, 17), (4, 9, 17), (5, 10, 14)]),
        ),
        user(
            "bob",
            "Bob",
            5,
            "#4ECDC4",
            weekly(&[(0, 8, 20), (1, 8, 20), (2, 8, 20), (3, 8, 20), (4, 8, 20)]),
        ),
        user(
            "charlie",
            "Charlie",
            3,
            "#45B7D1",
            weekly(&[(0, 6, 14), (1, 6, 14), (2, 6, 14), (3, 6, 14), (5, 8, 16), (6, 8, 16)]),
        ),
        user("diana", "Diana", 4, "#96CEB4", Availability::always()),
        user(
            "eve",
            "Eve",
            5,
            "#FFEAA7",
            weekly(&[
                (0, 12, 22),
                (1, 12, 22),
                (2, 12, 22),
                (3, 12, 22),
                (4, 12, 22),
                (5, 10, 22),
                (6, 10, 22),
            ]),
        ),
    ];

    let shifts = vec![
        shift("shift_1", "Morning Reception", ShiftKind::Fixed, 0, 9, 12, 2),
        shift("shift_2", "Afternoon Support", ShiftKind::Fixed, 0, 13, 17, 2),
        shift("shift_3", "Team Meeting", ShiftKind::Flexible, 2, 10, 12, 3),
        shift("shift_4", "Training Session", ShiftKind::Flexible, 3, 14, 16, 2),
        shift("shift_5", "Weekly Review", ShiftKind::Fixed, 4, 15, 17, 2),
        shift("shift_6", "Evening Shift", ShiftKind::Fixed, 1, 18, 22, 2),
    ];

    let conflicts = vec![ConflictPair::new(UserId::new("alice"), UserId::new("bob"))];

    Dataset {
        users,
        shifts,
        conflicts,
    }
}
