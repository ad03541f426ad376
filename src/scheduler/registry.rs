use crate::model::{ConflictPair, UserId};
use std::collections::BTreeSet;

/// Ensemble symétrique de paires d'utilisateurs incompatibles.
///
/// Chaque paire est rangée sous sa clé normalisée (plus petit id en
/// premier) : `(A, B)` et `(B, A)` désignent la même entrée.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictRegistry {
    pairs: BTreeSet<(UserId, UserId)>,
}

fn normalize(a: &UserId, b: &UserId) -> (UserId, UserId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

impl ConflictRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[ConflictPair]) -> Self {
        let mut registry = Self::new();
        for pair in pairs {
            registry.add(&pair.user_a, &pair.user_b);
        }
        registry
    }

    /// Enregistre la paire. Renvoie `false` pour une paire réflexive ou déjà connue.
    pub fn add(&mut self, a: &UserId, b: &UserId) -> bool {
        if a == b {
            return false;
        }
        self.pairs.insert(normalize(a, b))
    }

    pub fn remove(&mut self, a: &UserId, b: &UserId) -> bool {
        self.pairs.remove(&normalize(a, b))
    }

    pub fn contains(&self, a: &UserId, b: &UserId) -> bool {
        a != b && self.pairs.contains(&normalize(a, b))
    }

    /// Vrai si `candidate` est en conflit avec au moins une personne de `assigned`.
    pub fn conflicts_with(&self, assigned: &[UserId], candidate: &UserId) -> bool {
        assigned.iter().any(|user| self.contains(user, candidate))
    }

    /// Retire toutes les paires impliquant `user`.
    pub fn forget(&mut self, user: &UserId) {
        self.pairs.retain(|(a, b)| a != user && b != user);
    }

    /// Paires normalisées, triées, sans doublon.
    pub fn to_pairs(&self) -> Vec<ConflictPair> {
        self.pairs
            .iter()
            .map(|(a, b)| ConflictPair::new(a.clone(), b.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
