use super::movement::Token;
use crate::board::{Facing, Pos};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenSnapshot {
    pub rank: u8,
    pub position: Pos,
    pub facing: Facing,
}

impl From<&Token> for TokenSnapshot {
    fn from(t: &Token) -> Self {
        Self {
            rank: t.rank,
            position: t.position,
            facing: t.facing,
        }
    }
}

/// Token state after one iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IterationSnapshot {
    pub iteration: usize,
    pub tokens: Vec<TokenSnapshot>,
    pub moves: usize,
    pub abandons: usize,
}

impl IterationSnapshot {
    pub fn summary(&self) -> String {
        self.tokens
            .iter()
            .map(|t| {
                format!(
                    "{}@({},{}){}",
                    t.rank,
                    t.position.row,
                    t.position.col,
                    &t.facing.to_string()[..1]
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
