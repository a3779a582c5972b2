use crate::board::{Facing, Pos};
use crate::catalog::{SwitchCatalog, SwitchSpec};
use crate::consts::{KEY_COUNT, KEY_LABELS};
use crate::interaction::KeyCondition;
use fastrand::Rng;
use serde::Serialize;

/// One physical key for the current round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyInstance {
    pub slot: usize,
    pub label: char,
    pub catalog_index: usize,
    pub switch: SwitchSpec,
    pub rank: u8,
    pub position: Pos,
    pub facing: Facing,
    pub condition: KeyCondition,
}

/// Draws five catalog indices independently (duplicates allowed).
pub fn draw_switches(rng: &mut Rng, catalog: &SwitchCatalog) -> [usize; KEY_COUNT] {
    let mut draws = [0usize; KEY_COUNT];
    for d in draws.iter_mut() {
        *d = rng.usize(0..catalog.len());
    }
    draws
}

/// Ranks the drawn indices 1..=5 by ascending catalog index.
///
/// Equal indices are ranked by their position in `draws`.
pub fn assign_ranks(draws: &[usize; KEY_COUNT]) -> [u8; KEY_COUNT] {
    let mut order: Vec<usize> = (0..KEY_COUNT).collect();
    // Stable sort keeps draw position as the tie-breaker.
    order.sort_by_key(|&slot| draws[slot]);

    let mut ranks = [0u8; KEY_COUNT];
    for (i, &slot) in order.iter().enumerate() {
        ranks[slot] = (i + 1) as u8;
    }
    ranks
}

/// The five keys of a round, indexed by physical slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyAssignment {
    pub keys: Vec<KeyInstance>,
}

impl KeyAssignment {
    /// Builds the assignment for fixed draws. Every key starts Normal.
    pub fn from_draws(catalog: &SwitchCatalog, draws: &[usize; KEY_COUNT]) -> Self {
        let ranks = assign_ranks(draws);
        let keys = draws
            .iter()
            .enumerate()
            .map(|(slot, &idx)| KeyInstance {
                slot,
                label: KEY_LABELS[slot],
                catalog_index: idx,
                switch: catalog[idx].clone(),
                rank: ranks[slot],
                position: Pos::default(),
                facing: Facing::North,
                condition: KeyCondition::Normal,
            })
            .collect();
        Self { keys }
    }

    pub fn random(rng: &mut Rng, catalog: &SwitchCatalog) -> Self {
        let draws = draw_switches(rng, catalog);
        Self::from_draws(catalog, &draws)
    }

    pub fn with_conditions(mut self, conditions: [KeyCondition; KEY_COUNT]) -> Self {
        for (key, condition) in self.keys.iter_mut().zip(conditions) {
            key.condition = condition;
        }
        self
    }

    pub fn by_rank(&self, rank: u8) -> Option<&KeyInstance> {
        self.keys.iter().find(|k| k.rank == rank)
    }

    pub fn slot_of_rank(&self, rank: u8) -> Option<usize> {
        self.keys.iter().position(|k| k.rank == rank)
    }

    pub fn switches(&self) -> impl Iterator<Item = &SwitchSpec> {
        self.keys.iter().map(|k| &k.switch)
    }

    pub fn draws(&self) -> [usize; KEY_COUNT] {
        let mut out = [0usize; KEY_COUNT];
        for (o, k) in out.iter_mut().zip(&self.keys) {
            *o = k.catalog_index;
        }
        out
    }
}
