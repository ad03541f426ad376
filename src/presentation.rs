use crate::model::{Shift, User, UserId};
use chrono::Weekday;
use std::collections::HashMap;
use std::fmt::Write;

/// Libellé court d'un jour (0 = lundi).
pub fn day_label(day: u8) -> String {
    Weekday::try_from(day)
        .map(|d| d.to_string())
        .unwrap_or_else(|_| format!("day{day}"))
}

/// Personne affectée, résolue pour l'affichage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeRow<'a> {
    pub id: &'a UserId,
    pub name: &'a str,
    pub color: Option<&'a str>,
}

/// Ligne de planning prête à afficher.
#[derive(Debug, Clone)]
pub struct ShiftRow<'a> {
    pub shift: &'a Shift,
    pub assignees: Vec<AssigneeRow<'a>>,
}

/// Charge d'une personne après planification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadLine<'a> {
    pub name: &'a str,
    pub assigned: usize,
    pub max: u32,
}

/// Vue en lecture seule sur un planning calculé.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleView<'a> {
    pub shifts: &'a [Shift],
    pub users: &'a [User],
}

impl<'a> ScheduleView<'a> {
    pub fn new(shifts: &'a [Shift], users: &'a [User]) -> Self {
        Self { shifts, users }
    }

    /// Les identifiants inconnus sont affichés tels quels, sans couleur.
    pub fn rows(&self) -> Vec<ShiftRow<'a>> {
        let by_id: HashMap<&UserId, &User> = self.users.iter().map(|u| (&u.id, u)).collect();
        self.shifts
            .iter()
            .map(|shift| ShiftRow {
                shift,
                assignees: shift
                    .assigned_users
                    .iter()
                    .map(|id| match by_id.get(id) {
                        Some(user) => AssigneeRow {
                            id,
                            name: user.name.as_str(),
                            color: Some(user.color.as_str()),
                        },
                        None => AssigneeRow {
                            id,
                            name: id.as_str(),
                            color: None,
                        },
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn understaffed(&self) -> Vec<&'a Shift> {
        self.shifts.iter().filter(|s| s.is_understaffed()).collect()
    }

    /// Répartition par personne, triée par nom.
    pub fn distribution(&self) -> Vec<WorkloadLine<'a>> {
        let mut lines: Vec<WorkloadLine<'a>> = self
            .users
            .iter()
            .map(|user| WorkloadLine {
                name: user.name.as_str(),
                assigned: self.shifts.iter().filter(|s| s.is_assigned(&user.id)).count(),
                max: user.max_shifts_per_week,
            })
            .collect();
        lines.sort_by(|a, b| a.name.cmp(b.name));
        lines
    }
}

/// Port de présentation : consomme un planning, ne renvoie rien au moteur.
pub trait ScheduleRenderer {
    fn render(&self, view: &ScheduleView<'_>) -> String;
}

/// Rendu texte brut, une ligne par créneau.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSchedule;

impl ScheduleRenderer for TextSchedule {
    fn render(&self, view: &ScheduleView<'_>) -> String {
        let mut out = String::new();
        for row in view.rows() {
            let shift = row.shift;
            let names: Vec<&str> = row.assignees.iter().map(|a| a.name).collect();
            let staffed = if shift.is_understaffed() { " !" } else { "" };
            let _ = writeln!(
                out,
                "{day} {start:02}:00-{end:02}:00 | {name} [{kind}] | {who} | {n}/{req}{staffed}",
                day = day_label(shift.day),
                start = shift.start_hour,
                end = shift.end_hour,
                name = shift.name,
                kind = shift.kind.as_str(),
                who = if names.is_empty() { "-".to_string() } else { names.join(", ") },
                n = shift.assigned_users.len(),
                req = shift.required_staff,
            );
        }
        out
    }
}

/// Résumé de répartition, comme affiché après une planification.
pub fn render_distribution(view: &ScheduleView<'_>) -> String {
    let mut out = String::from("Shift distribution:\n");
    for line in view.distribution() {
        let _ = writeln!(out, "  {}: {} shifts (max: {})", line.name, line.assigned, line.max);
    }
    out
}
