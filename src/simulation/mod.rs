//! Token-movement simulation that turns a starting order into the hold order.
//!
//! Five tokens start on the top row of the rule grid. For a fixed number of
//! iterations each key, in rank order, takes as many diagonal steps as its
//! rank. Serial bits pick the direction, rule flags on landing cells turn
//! the key. Reading the board row by row afterwards yields the order in
//! which the keys must be held.

pub mod movement;
pub mod trace;

use crate::assignment::KeyAssignment;
use crate::board::Board;
use crate::consts::{KEY_COUNT, SERIAL_BIT_COUNT, SIMULATION_ITERATIONS};
use crate::rules::{DynamicKeyFacts, RuleFlags, StaticFacts};
use crate::serial::SerialBitVector;
use movement::{step, RepetitionOutcome, Token};
use trace::{IterationSnapshot, TokenSnapshot};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub hold_order: Vec<u8>,
    /// Final tokens, indexed by `rank - 1`.
    pub tokens: [Token; KEY_COUNT],
    pub board: Board,
    pub trace: Vec<IterationSnapshot>,
}

impl SimulationOutcome {
    /// Copies final positions and facings onto the round's keys.
    pub fn apply_to(&self, assignment: &mut KeyAssignment) {
        for key in assignment.keys.iter_mut() {
            if let Some(t) = self.tokens.get((key.rank as usize).wrapping_sub(1)) {
                key.position = t.position;
                key.facing = t.facing;
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GridSimulationEngine {
    pub iterations: usize,
}

impl Default for GridSimulationEngine {
    fn default() -> Self {
        Self {
            iterations: SIMULATION_ITERATIONS,
        }
    }
}

impl GridSimulationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(iterations: usize) -> Self {
        Self { iterations }
    }

    pub fn run(
        &self,
        assignment: &KeyAssignment,
        starting_order: &[u8; KEY_COUNT],
        serial: &SerialBitVector,
        statics: &StaticFacts,
    ) -> SimulationOutcome {
        let mut board = Board::with_starting_order(starting_order);
        let mut tokens: [Token; KEY_COUNT] =
            std::array::from_fn(|i| Token::new(i as u8 + 1, Board::start_pos(0)));
        for (slot, &rank) in starting_order.iter().enumerate() {
            if let Some(t) = tokens.get_mut((rank as usize).wrapping_sub(1)) {
                t.position = Board::start_pos(slot);
            }
        }

        let dynamics: [DynamicKeyFacts; KEY_COUNT] = std::array::from_fn(|i| {
            let rank = i as u8 + 1;
            assignment
                .by_rank(rank)
                .map(|k| DynamicKeyFacts::for_key(&k.switch, rank))
                .unwrap_or(DynamicKeyFacts {
                    rank,
                    ..Default::default()
                })
        });

        let mut trace = Vec::with_capacity(self.iterations);

        for iteration in 0..self.iterations {
            // Flips only touch this copy.
            let mut bits: [bool; SERIAL_BIT_COUNT] = std::array::from_fn(|i| serial.get(i));
            let mut cursor = 0usize;
            let mut moves = 0;
            let mut abandons = 0;

            for (idx, token) in tokens.iter_mut().enumerate() {
                let repetitions = idx + 1;
                let flags = RuleFlags::new(statics, dynamics[idx]);
                token.last_rule_true = false;

                for rep in 0..repetitions {
                    let bit = &mut bits[cursor % SERIAL_BIT_COUNT];
                    let outcome = step(&mut board, token, &flags, bit, rep + 1 == repetitions);
                    match outcome {
                        RepetitionOutcome::Moved { .. } => moves += 1,
                        RepetitionOutcome::Abandoned { .. } => abandons += 1,
                    }
                    cursor += 1;
                }
            }

            let snapshot = IterationSnapshot {
                iteration: iteration + 1,
                tokens: tokens.iter().map(TokenSnapshot::from).collect(),
                moves,
                abandons,
            };
            debug!(
                "Iteration {}: {} ({} moved, {} abandoned)",
                snapshot.iteration,
                snapshot.summary(),
                moves,
                abandons
            );
            trace.push(snapshot);
        }

        SimulationOutcome {
            hold_order: board.hold_order(),
            tokens,
            board,
            trace,
        }
    }
}
