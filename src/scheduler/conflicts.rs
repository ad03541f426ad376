use super::{availability, Conflict, ConflictKind, Scheduler};
use crate::model::{Shift, User, UserId};
use std::collections::HashMap;

pub(super) fn detect_conflicts(scheduler: &Scheduler<'_>, shifts: &[Shift]) -> Vec<Conflict> {
    let mut out = Vec::new();
    let users: HashMap<&UserId, &User> = scheduler.users.iter().map(|u| (&u.id, u)).collect();

    for shift in shifts {
        if shift.assigned_users.len() > shift.required_staff as usize {
            out.push(Conflict {
                user: None,
                other: None,
                shift_a: shift.id.clone(),
                shift_b: None,
                kind: ConflictKind::Overstaffed,
            });
        }

        for (idx, user_id) in shift.assigned_users.iter().enumerate() {
            if shift.assigned_users[..idx].contains(user_id) {
                out.push(Conflict {
                    user: Some(user_id.clone()),
                    other: None,
                    shift_a: shift.id.clone(),
                    shift_b: None,
                    kind: ConflictKind::DuplicateAssignee,
                });
                continue;
            }
            match users.get(user_id) {
                None => out.push(Conflict {
                    user: Some(user_id.clone()),
                    other: None,
                    shift_a: shift.id.clone(),
                    shift_b: None,
                    kind: ConflictKind::UnknownUser,
                }),
                Some(user) if !availability::is_available_for_shift(user, shift) => {
                    out.push(Conflict {
                        user: Some(user_id.clone()),
                        other: None,
                        shift_a: shift.id.clone(),
                        shift_b: None,
                        kind: ConflictKind::Unavailable,
                    })
                }
                Some(_) => {}
            }

            for other in shift.assigned_users.iter().skip(idx + 1) {
                if scheduler.registry.contains(user_id, other) {
                    out.push(Conflict {
                        user: Some(user_id.clone()),
                        other: Some(other.clone()),
                        shift_a: shift.id.clone(),
                        shift_b: None,
                        kind: ConflictKind::PairConflict,
                    });
                }
            }
        }
    }

    for user in scheduler.users {
        let mine: Vec<&Shift> = shifts.iter().filter(|s| s.is_assigned(&user.id)).collect();

        if mine.len() > user.max_shifts_per_week as usize {
            if let Some(last) = mine.last() {
                out.push(Conflict {
                    user: Some(user.id.clone()),
                    other: None,
                    shift_a: last.id.clone(),
                    shift_b: None,
                    kind: ConflictKind::OverCapacity,
                });
            }
        }

        for (idx, a) in mine.iter().enumerate() {
            for b in mine.iter().skip(idx + 1) {
                if a.overlaps_with(b) {
                    out.push(Conflict {
                        user: Some(user.id.clone()),
                        other: None,
                        shift_a: a.id.clone(),
                        shift_b: Some(b.id.clone()),
                        kind: ConflictKind::DoubleBooking,
                    });
                }
            }
        }
    }

    out
}
