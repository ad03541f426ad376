//! Validation d'un lot de créneaux avant planification.
//!
//! Un lot contenant au moins un créneau invalide est rejeté en entier :
//! aucune planification partielle.

use crate::model::{Shift, Window, DAYS_PER_WEEK, HOURS_PER_DAY};
use crate::scheduler::AssignOptions;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `start_hour >= end_hour`.
    EmptyWindow,
    /// `required_staff < 1`.
    NoStaffRequired,
    DayOutOfRange,
    HourOutOfRange,
    /// Identifiant déjà présent plus haut dans le lot.
    DuplicateId,
    /// Créneau flexible plus long que la fenêtre de recherche.
    WindowTooShort,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shift {shift}: {message}")]
pub struct ValidationError {
    pub shift: String,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    fn new(shift: &Shift, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            shift: shift.id.as_str().to_string(),
            kind,
            message: message.into(),
        }
    }
}

/// Contrôles de bornes d'une fenêtre : jour dans la semaine, heures dans la journée.
///
/// Partagés par `Shift::new` et `validate_shifts`.
pub fn window_errors(window: &Window) -> Vec<(ValidationErrorKind, String)> {
    let mut errors = Vec::new();
    if usize::from(window.day) >= DAYS_PER_WEEK {
        errors.push((
            ValidationErrorKind::DayOutOfRange,
            format!("day {} is outside 0..{DAYS_PER_WEEK}", window.day),
        ));
    }
    if window.start_hour >= window.end_hour {
        errors.push((
            ValidationErrorKind::EmptyWindow,
            format!(
                "end hour must be strictly after start hour ({} >= {})",
                window.start_hour, window.end_hour
            ),
        ));
    } else if usize::from(window.end_hour) > HOURS_PER_DAY {
        errors.push((
            ValidationErrorKind::HourOutOfRange,
            format!("end hour {} is past {HOURS_PER_DAY}", window.end_hour),
        ));
    }
    errors
}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Vérifie chaque créneau du lot et renvoie toutes les erreurs d'un coup.
pub fn validate_shifts(shifts: &[Shift], opts: &AssignOptions) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for shift in shifts {
        if !seen.insert(&shift.id) {
            errors.push(ValidationError::new(
                shift,
                ValidationErrorKind::DuplicateId,
                "duplicate shift id",
            ));
        }
        let bounds = window_errors(&shift.window());
        let window_ok = bounds.is_empty();
        for (kind, message) in bounds {
            errors.push(ValidationError::new(shift, kind, message));
        }
        if window_ok && shift.kind.is_movable() && shift.duration_hours() > opts.window_span() {
            errors.push(ValidationError::new(
                shift,
                ValidationErrorKind::WindowTooShort,
                format!(
                    "{}h flexible shift does not fit in search window {}..{}",
                    shift.duration_hours(),
                    opts.window_start_hour,
                    opts.window_end_hour
                ),
            ));
        }
        if shift.required_staff < 1 {
            errors.push(ValidationError::new(
                shift,
                ValidationErrorKind::NoStaffRequired,
                "required staff must be at least 1",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
