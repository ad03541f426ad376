#![forbid(unsafe_code)]
//! Roulement — répartition automatique de créneaux hebdomadaires.
//!
//! - Disponibilités heure par heure, plafond hebdomadaire par personne.
//! - Paires de personnes incompatibles, répartition équitable de la charge.
//! - Placement automatique des créneaux flexibles.
//! - Stockage fichiers (JSON/CSV) ; chaque exécution recalcule tout.

pub mod io;
pub mod model;
pub mod presentation;
pub mod sample;
pub mod scheduler;
pub mod storage;
pub mod validation;

pub use model::{
    Availability, ConflictPair, Dataset, Shift, ShiftId, ShiftKind, User, UserId, Window,
};
pub use presentation::{ScheduleRenderer, ScheduleView, TextSchedule};
pub use scheduler::{
    AssignOptions, Conflict, ConflictKind, ConflictRegistry, SchedError, Scheduler, TieBreak,
    WorkloadTracker,
};
pub use storage::{JsonRepository, Repository};
pub use validation::{validate_shifts, ValidationError, ValidationErrorKind};
