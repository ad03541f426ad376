pub mod availability;
mod assignment;
mod conflicts;
mod engine;
mod mutate;
mod registry;
pub mod slots;
mod types;
mod util;
mod workload;

pub use registry::ConflictRegistry;
pub use slots::SlotChoice;
pub use types::{AssignOptions, Conflict, ConflictKind, SchedError, TieBreak};
pub use workload::{TieState, WorkloadTracker};

use crate::model::{ConflictPair, Dataset, Shift, ShiftId, User, UserId};

/// Scheduler : vue en lecture seule sur les utilisateurs et leurs conflits.
///
/// Aucun état mutable n'est conservé entre deux appels ; les compteurs de
/// charge et le départage sont recréés à chaque `schedule_all`.
#[derive(Debug, Clone)]
pub struct Scheduler<'a> {
    users: &'a [User],
    registry: ConflictRegistry,
    opts: AssignOptions,
}

impl<'a> Scheduler<'a> {
    pub fn new(users: &'a [User], conflicts: &[ConflictPair], opts: AssignOptions) -> Self {
        Self::with_registry(users, ConflictRegistry::from_pairs(conflicts), opts)
    }

    pub fn with_registry(users: &'a [User], registry: ConflictRegistry, opts: AssignOptions) -> Self {
        Self {
            users,
            registry,
            opts,
        }
    }

    pub fn from_dataset(dataset: &'a Dataset, opts: AssignOptions) -> Self {
        Self::new(&dataset.users, &dataset.conflicts, opts)
    }

    /// Planifie tout le lot : créneaux fixes d'abord, puis flexibles.
    ///
    /// Renvoie une nouvelle liste dans l'ordre d'entrée ; le lot est rejeté
    /// en entier si un créneau est invalide.
    pub fn schedule_all(&self, shifts: &[Shift]) -> Result<Vec<Shift>, SchedError> {
        engine::schedule_all(self, shifts)
    }

    pub fn detect_conflicts(&self, shifts: &[Shift]) -> Vec<Conflict> {
        conflicts::detect_conflicts(self, shifts)
    }

    pub fn assign_manual(
        &self,
        shifts: &mut [Shift],
        shift_id: &ShiftId,
        user_id: &UserId,
    ) -> Result<(), SchedError> {
        mutate::assign_manual(self, shifts, shift_id, user_id)
    }

    pub fn unassign(
        &self,
        shifts: &mut [Shift],
        shift_id: &ShiftId,
        user_id: &UserId,
    ) -> Result<(), SchedError> {
        mutate::unassign(shifts, shift_id, user_id)
    }

    pub fn clear_assignments(&self, shifts: &mut [Shift]) {
        mutate::clear_assignments(shifts)
    }
}
