use crate::model::{ShiftId, UserId, HOURS_PER_DAY};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Départage des candidats à charge égale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum TieBreak {
    /// Identifiant croissant.
    #[default]
    ById,
    /// Clé pseudo-aléatoire tirée d'un générateur initialisé par `seed`, puis identifiant.
    Seeded { seed: u64 },
}

/// Options d'assignation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignOptions {
    /// Première heure possible pour un créneau flexible.
    pub window_start_hour: u8,
    /// Heure limite (exclue) de fin pour un créneau flexible.
    pub window_end_hour: u8,
    pub tie_break: TieBreak,
    /// Refuse qu'une personne tienne deux créneaux qui se chevauchent.
    pub forbid_double_booking: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            window_start_hour: 0,
            window_end_hour: HOURS_PER_DAY as u8,
            tie_break: TieBreak::ById,
            forbid_double_booking: false,
        }
    }
}

impl AssignOptions {
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.window_start_hour >= self.window_end_hour
            || usize::from(self.window_end_hour) > HOURS_PER_DAY
        {
            return Err(SchedError::InvalidOptions(format!(
                "search window {}..{} must satisfy start < end <= {HOURS_PER_DAY}",
                self.window_start_hour, self.window_end_hour
            )));
        }
        Ok(())
    }

    /// Nombre d'heures de la fenêtre de recherche.
    pub fn window_span(&self) -> u8 {
        self.window_end_hour.saturating_sub(self.window_start_hour)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleBooking,
    PairConflict,
    Unavailable,
    OverCapacity,
    UnknownUser,
    Overstaffed,
    /// Même personne listée deux fois sur un créneau.
    DuplicateAssignee,
}

impl ConflictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::DoubleBooking => "double_booking",
            ConflictKind::PairConflict => "pair_conflict",
            ConflictKind::Unavailable => "unavailable",
            ConflictKind::OverCapacity => "over_capacity",
            ConflictKind::UnknownUser => "unknown_user",
            ConflictKind::Overstaffed => "overstaffed",
            ConflictKind::DuplicateAssignee => "duplicate_assignee",
        }
    }
}

/// Anomalie relevée sur un planning existant.
///
/// `shift_b` n'est renseigné que pour les anomalies qui impliquent deux
/// créneaux (double affectation) ; `other` pour celles qui impliquent deux
/// personnes (paire en conflit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub user: Option<UserId>,
    pub other: Option<UserId>,
    pub shift_a: ShiftId,
    pub shift_b: Option<ShiftId>,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid shift batch: {}", summarize(.0))]
    Validation(Vec<ValidationError>),
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("unknown user: {0}")]
    UnknownUser(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("assignment invalid: {0}")]
    AssignInvalid(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
