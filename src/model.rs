use crate::scheduler::ConflictRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: usize = 24;

/// Identifiant fort pour User
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grille de disponibilité hebdomadaire : `[jour][heure]`, jour 0 = lundi.
///
/// Toujours entièrement renseignée ; une coordonnée hors grille est
/// considérée comme indisponible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability([[bool; HOURS_PER_DAY]; DAYS_PER_WEEK]);

impl Availability {
    pub fn always() -> Self {
        Self([[true; HOURS_PER_DAY]; DAYS_PER_WEEK])
    }

    pub fn never() -> Self {
        Self([[false; HOURS_PER_DAY]; DAYS_PER_WEEK])
    }

    pub fn get(&self, day: u8, hour: u8) -> bool {
        self.0
            .get(usize::from(day))
            .and_then(|hours| hours.get(usize::from(hour)))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, day: u8, hour: u8, available: bool) {
        if let Some(cell) = self
            .0
            .get_mut(usize::from(day))
            .and_then(|hours| hours.get_mut(usize::from(hour)))
        {
            *cell = available;
        }
    }

    /// Marque `[start, end)` sur `day`. Les heures hors grille sont ignorées.
    pub fn set_range(&mut self, day: u8, start: u8, end: u8, available: bool) {
        for hour in start..end {
            self.set(day, hour, available);
        }
    }

    /// Construit une grille à partir de plages `(jour, début, fin)`.
    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = (u8, u8, u8)>,
    {
        let mut grid = Self::never();
        for (day, start, end) in ranges {
            grid.set_range(day, start, end, true);
        }
        grid
    }

    pub fn available_hours(&self) -> usize {
        self.0.iter().flatten().filter(|cell| **cell).count()
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::always()
    }
}

/// Membre de l'équipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub max_shifts_per_week: u32,
    #[serde(default)]
    pub availability: Availability,
    /// Purement présentation, sans effet sur la planification.
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#4A90D9".to_string()
}

impl User {
    pub fn new<N: Into<String>>(name: N, max_shifts_per_week: u32) -> Self {
        Self {
            id: UserId::random(),
            name: name.into(),
            max_shifts_per_week,
            availability: Availability::always(),
            color: default_color(),
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_color<C: Into<String>>(mut self, color: C) -> Self {
        self.color = color.into();
        self
    }
}

/// Nature d'un créneau : horaire imposé ou placement libre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    Fixed,
    Flexible,
}

impl ShiftKind {
    /// Le créneau peut-il être déplacé par l'optimiseur ?
    pub fn is_movable(self) -> bool {
        matches!(self, ShiftKind::Flexible)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Fixed => "fixed",
            ShiftKind::Flexible => "flexible",
        }
    }
}

impl std::str::FromStr for ShiftKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fixe" => Ok(ShiftKind::Fixed),
            "flexible" => Ok(ShiftKind::Flexible),
            other => Err(format!("unknown shift type: {other}")),
        }
    }
}

/// Fenêtre horaire `[start_hour, end_hour)` sur un jour de la semaine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub day: u8,
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Window {
    pub fn new(day: u8, start_hour: u8, end_hour: u8) -> Self {
        Self {
            day,
            start_hour,
            end_hour,
        }
    }

    pub fn duration(&self) -> u8 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    pub fn hours(&self) -> std::ops::Range<u8> {
        self.start_hour..self.end_hour
    }

    pub fn overlaps(&self, other: &Window) -> bool {
        self.day == other.day
            && self.start_hour < other.end_hour
            && other.start_hour < self.end_hour
    }
}

/// Créneau à pourvoir
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ShiftKind,
    pub day: u8,
    pub start_hour: u8,
    pub end_hour: u8,
    pub required_staff: u32,
    #[serde(default)]
    pub assigned_users: Vec<UserId>,
}

impl Shift {
    /// Crée un shift en validant les bornes de `window` et `required_staff >= 1`.
    pub fn new<N: Into<String>>(
        name: N,
        kind: ShiftKind,
        window: Window,
        required_staff: u32,
    ) -> Result<Self, String> {
        let bounds = crate::validation::window_errors(&window);
        if let Some((_, message)) = bounds.into_iter().next() {
            return Err(message);
        }
        if required_staff == 0 {
            return Err("a shift needs at least one person".to_string());
        }
        Ok(Self {
            id: ShiftId::random(),
            name: name.into(),
            kind,
            day: window.day,
            start_hour: window.start_hour,
            end_hour: window.end_hour,
            required_staff,
            assigned_users: Vec::new(),
        })
    }

    pub fn with_id(mut self, id: ShiftId) -> Self {
        self.id = id;
        self
    }

    pub fn window(&self) -> Window {
        Window::new(self.day, self.start_hour, self.end_hour)
    }

    /// Replace le créneau ; la durée est celle de `window`.
    pub fn move_to(&mut self, window: Window) {
        self.day = window.day;
        self.start_hour = window.start_hour;
        self.end_hour = window.end_hour;
    }

    /// Durée en heures.
    pub fn duration_hours(&self) -> u8 {
        self.window().duration()
    }

    pub fn overlaps_with(&self, other: &Shift) -> bool {
        self.window().overlaps(&other.window())
    }

    pub fn is_assigned(&self, user: &UserId) -> bool {
        self.assigned_users.contains(user)
    }

    pub fn is_full(&self) -> bool {
        self.assigned_users.len() >= self.required_staff as usize
    }

    pub fn is_understaffed(&self) -> bool {
        !self.is_full()
    }
}

/// Paire d'utilisateurs qui ne doivent jamais partager un créneau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictPair {
    pub user_a: UserId,
    pub user_b: UserId,
}

impl ConflictPair {
    pub fn new(user_a: UserId, user_b: UserId) -> Self {
        Self { user_a, user_b }
    }
}

/// Jeu de données complet, tel que chargé depuis un dépôt.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub shifts: Vec<Shift>,
    pub conflicts: Vec<ConflictPair>,
}

impl Dataset {
    /// Résout un utilisateur par identifiant, puis par nom (insensible à la casse).
    pub fn resolve_user<'a>(&'a self, key: &str) -> Option<&'a User> {
        self.users
            .iter()
            .find(|u| u.id.as_str() == key)
            .or_else(|| self.users.iter().find(|u| u.name.eq_ignore_ascii_case(key)))
    }

    /// Retire un utilisateur ainsi que ses affectations et ses conflits.
    pub fn remove_user(&mut self, id: &UserId) -> Option<User> {
        let pos = self.users.iter().position(|u| &u.id == id)?;
        let user = self.users.remove(pos);
        for shift in &mut self.shifts {
            shift.assigned_users.retain(|u| u != id);
        }
        let mut registry = ConflictRegistry::from_pairs(&self.conflicts);
        registry.forget(id);
        self.conflicts = registry.to_pairs();
        Some(user)
    }

    pub fn remove_shift(&mut self, id: &ShiftId) -> Option<Shift> {
        let pos = self.shifts.iter().position(|s| &s.id == id)?;
        Some(self.shifts.remove(pos))
    }
}
