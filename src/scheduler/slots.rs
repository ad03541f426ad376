use super::{availability, AssignOptions, WorkloadTracker};
use crate::model::{Shift, User, Window, DAYS_PER_WEEK};
use tracing::debug;

/// Placement retenu pour un créneau flexible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotChoice {
    pub window: Window,
    pub score: usize,
}

/// Nombre de personnes disponibles sur toute la fenêtre et encore sous leur plafond.
pub fn score_window(window: Window, users: &[User], tracker: &WorkloadTracker) -> usize {
    users
        .iter()
        .filter(|user| tracker.has_capacity(user))
        .filter(|user| availability::is_available_for_window(user, window))
        .count()
}

/// Fenêtres candidates de durée `duration`, jour par jour puis heure par heure.
pub fn candidate_windows(duration: u8, opts: &AssignOptions) -> Vec<Window> {
    if duration == 0 || duration > opts.window_span() {
        return Vec::new();
    }
    let last_start = opts.window_end_hour - duration;
    (0..DAYS_PER_WEEK as u8)
        .flat_map(|day| {
            (opts.window_start_hour..=last_start)
                .map(move |start| Window::new(day, start, start + duration))
        })
        .collect()
}

/// Cherche le meilleur placement pour `shift`.
///
/// Le score maximal l'emporte ; à égalité, la première fenêtre énumérée
/// (jour le plus tôt, puis heure la plus tôt). Le choix est retenu même si
/// son score reste sous `required_staff`. Sans candidate, la fenêtre
/// d'origine est conservée.
pub fn find_best_window(
    shift: &Shift,
    users: &[User],
    tracker: &WorkloadTracker,
    opts: &AssignOptions,
) -> SlotChoice {
    let mut best: Option<SlotChoice> = None;

    for window in candidate_windows(shift.duration_hours(), opts) {
        let score = score_window(window, users, tracker);
        if best.map_or(true, |b| score > b.score) {
            best = Some(SlotChoice { window, score });
        }
    }

    let choice = best.unwrap_or_else(|| {
        let window = shift.window();
        SlotChoice {
            window,
            score: score_window(window, users, tracker),
        }
    });
    debug!(
        shift = %shift.id,
        day = choice.window.day,
        start = choice.window.start_hour,
        end = choice.window.end_hour,
        score = choice.score,
        "flexible shift placed"
    );
    choice
}
