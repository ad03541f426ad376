use super::{availability, util, SchedError, Scheduler};
use crate::model::{Shift, ShiftId, UserId};

pub(super) fn assign_manual(
    scheduler: &Scheduler<'_>,
    shifts: &mut [Shift],
    shift_id: &ShiftId,
    user_id: &UserId,
) -> Result<(), SchedError> {
    let Some(pos) = util::find_shift_index(shifts, shift_id) else {
        return Err(SchedError::UnknownShift(shift_id.as_str().to_string()));
    };
    let user = scheduler
        .users
        .iter()
        .find(|u| &u.id == user_id)
        .ok_or_else(|| SchedError::UnknownUser(user_id.as_str().to_string()))?;

    let shift = &shifts[pos];
    if shift.is_assigned(user_id) {
        return Err(SchedError::AssignInvalid("user already on this shift"));
    }
    if shift.is_full() {
        return Err(SchedError::AssignInvalid("shift already fully staffed"));
    }
    if !availability::is_available_for_shift(user, shift) {
        return Err(SchedError::AssignInvalid("user not available for this window"));
    }
    if scheduler.registry.conflicts_with(&shift.assigned_users, user_id) {
        return Err(SchedError::AssignInvalid("user conflicts with someone already assigned"));
    }
    let current = shifts.iter().filter(|s| s.is_assigned(user_id)).count();
    if current >= user.max_shifts_per_week as usize {
        return Err(SchedError::AssignInvalid("user already at weekly maximum"));
    }
    if scheduler.opts.forbid_double_booking
        && shifts
            .iter()
            .any(|other| other.is_assigned(user_id) && other.overlaps_with(&shifts[pos]))
    {
        return Err(SchedError::AssignInvalid("user already on an overlapping shift"));
    }

    shifts[pos].assigned_users.push(user_id.clone());
    Ok(())
}

/// Idempotent : retirer une personne absente n'est pas une erreur.
pub(super) fn unassign(
    shifts: &mut [Shift],
    shift_id: &ShiftId,
    user_id: &UserId,
) -> Result<(), SchedError> {
    let Some(pos) = util::find_shift_index(shifts, shift_id) else {
        return Err(SchedError::UnknownShift(shift_id.as_str().to_string()));
    };
    shifts[pos].assigned_users.retain(|u| u != user_id);
    Ok(())
}

pub(super) fn clear_assignments(shifts: &mut [Shift]) {
    for shift in shifts {
        shift.assigned_users.clear();
    }
}
