use crate::model::{Shift, User, Window};

/// Disponibilité ponctuelle (jour, heure). Hors grille : indisponible.
pub fn is_available(user: &User, day: u8, hour: u8) -> bool {
    user.availability.get(day, hour)
}

/// Vrai si chaque heure de `[start_hour, end_hour)` est disponible.
pub fn is_available_for_window(user: &User, window: Window) -> bool {
    window
        .hours()
        .all(|hour| is_available(user, window.day, hour))
}

pub fn is_available_for_shift(user: &User, shift: &Shift) -> bool {
    is_available_for_window(user, shift.window())
}
