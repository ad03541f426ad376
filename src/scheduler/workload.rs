use super::TieBreak;
use crate::model::{User, UserId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Compteurs de charge d'une exécution. Jamais persistés.
#[derive(Debug, Clone, Default)]
pub struct WorkloadTracker {
    counts: HashMap<UserId, u32>,
}

impl WorkloadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }

    pub fn increment(&mut self, user: &UserId) {
        *self.counts.entry(user.clone()).or_insert(0) += 1;
    }

    pub fn count(&self, user: &UserId) -> u32 {
        self.counts.get(user).copied().unwrap_or(0)
    }

    /// A-t-il encore de la marge sous `max_shifts_per_week` ?
    pub fn has_capacity(&self, user: &User) -> bool {
        self.count(&user.id) < user.max_shifts_per_week
    }

    /// Trie par charge croissante puis selon la règle de départage.
    pub fn rank<'a>(&self, candidates: Vec<&'a User>, ties: &mut TieState) -> Vec<&'a User> {
        match ties {
            TieState::ById => {
                let mut ranked = candidates;
                ranked.sort_by(|a, b| {
                    self.count(&a.id)
                        .cmp(&self.count(&b.id))
                        .then_with(|| a.id.cmp(&b.id))
                });
                ranked
            }
            TieState::Seeded(rng) => {
                let mut keyed: Vec<(u32, u64, &'a User)> = candidates
                    .into_iter()
                    .map(|user| (self.count(&user.id), rng.random::<u64>(), user))
                    .collect();
                keyed.sort_by(|a, b| {
                    a.0.cmp(&b.0)
                        .then(a.1.cmp(&b.1))
                        .then_with(|| a.2.id.cmp(&b.2.id))
                });
                keyed.into_iter().map(|(_, _, user)| user).collect()
            }
        }
    }
}

/// État du départage pour une exécution ; recréé à chaque appel.
#[derive(Debug, Clone)]
pub enum TieState {
    ById,
    Seeded(StdRng),
}

impl TieState {
    pub fn new(rule: TieBreak) -> Self {
        match rule {
            TieBreak::ById => TieState::ById,
            TieBreak::Seeded { seed } => TieState::Seeded(StdRng::seed_from_u64(seed)),
        }
    }
}
