use crate::model::{Shift, ShiftId};

pub(super) fn find_shift_index(shifts: &[Shift], shift_id: &ShiftId) -> Option<usize> {
    shifts.iter().position(|s| &s.id == shift_id)
}
