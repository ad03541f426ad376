use super::{availability, workload::TieState, Scheduler, WorkloadTracker};
use crate::model::{Shift, User};
use tracing::debug;

impl Scheduler<'_> {
    /// Pourvoit `shift` sur sa fenêtre courante.
    ///
    /// `booked` sont les créneaux déjà traités dans l'exécution, utilisés
    /// uniquement si la double affectation est interdite.
    pub fn assign_shift(
        &self,
        shift: &mut Shift,
        tracker: &mut WorkloadTracker,
        ties: &mut TieState,
        booked: &[Shift],
    ) {
        let candidates: Vec<&User> = self
            .users
            .iter()
            .filter(|user| !shift.is_assigned(&user.id))
            .filter(|user| availability::is_available_for_shift(user, shift))
            .filter(|user| tracker.has_capacity(user))
            .filter(|user| {
                !self.opts.forbid_double_booking || !is_double_booked(user, shift, booked)
            })
            .collect();
        let ranked = tracker.rank(candidates, ties);

        for user in ranked {
            if shift.is_full() {
                break;
            }
            if self.registry.conflicts_with(&shift.assigned_users, &user.id) {
                continue;
            }
            shift.assigned_users.push(user.id.clone());
            tracker.increment(&user.id);
        }

        debug!(
            shift = %shift.id,
            assigned = shift.assigned_users.len(),
            required = shift.required_staff,
            "shift staffed"
        );
    }
}

fn is_double_booked(user: &User, shift: &Shift, booked: &[Shift]) -> bool {
    booked
        .iter()
        .any(|other| other.id != shift.id && other.is_assigned(&user.id) && other.overlaps_with(shift))
}
