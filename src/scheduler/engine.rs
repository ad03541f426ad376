use super::{slots, workload::TieState, SchedError, Scheduler, WorkloadTracker};
use crate::model::Shift;
use crate::validation::validate_shifts;
use tracing::info;

pub(super) fn schedule_all(scheduler: &Scheduler<'_>, shifts: &[Shift]) -> Result<Vec<Shift>, SchedError> {
    scheduler.opts.validate()?;
    validate_shifts(shifts, &scheduler.opts).map_err(SchedError::Validation)?;

    info!(
        shifts = shifts.len(),
        users = scheduler.users.len(),
        conflicts = scheduler.registry.len(),
        "scheduling run started"
    );

    let mut tracker = WorkloadTracker::new();
    let mut ties = TieState::new(scheduler.opts.tie_break);

    // copie intégrale : les créneaux de l'appelant ne sont jamais modifiés
    let mut out: Vec<Shift> = shifts
        .iter()
        .map(|shift| {
            let mut copy = shift.clone();
            copy.assigned_users.clear();
            copy
        })
        .collect();

    let (fixed, flexible): (Vec<usize>, Vec<usize>) =
        (0..out.len()).partition(|&idx| !out[idx].kind.is_movable());

    for idx in fixed.into_iter().chain(flexible) {
        let mut shift = out[idx].clone();
        if shift.kind.is_movable() {
            let choice = slots::find_best_window(&shift, scheduler.users, &tracker, &scheduler.opts);
            shift.move_to(choice.window);
        }
        scheduler.assign_shift(&mut shift, &mut tracker, &mut ties, &out);
        out[idx] = shift;
    }

    let understaffed = out.iter().filter(|s| s.is_understaffed()).count();
    info!(
        shifts = out.len(),
        understaffed,
        "scheduling run finished"
    );
    Ok(out)
}
