use crate::board::{Board, CellState, Diagonal, Facing, Pos};
use crate::consts::MAX_RETRY_ATTEMPTS;
use crate::rules::RuleFlags;
use serde::Serialize;

/// A key's token while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub rank: u8,
    pub position: Pos,
    pub facing: Facing,
    /// Rule flag of the last cell this key landed on during the current
    /// iteration.
    pub last_rule_true: bool,
}

impl Token {
    pub fn new(rank: u8, position: Pos) -> Self {
        Self {
            rank,
            position,
            facing: Facing::North,
            last_rule_true: false,
        }
    }

    pub fn neighbour(&self, diagonal: Diagonal) -> Pos {
        let (dr, dc) = diagonal.offset_for(self.facing);
        self.position.offset(dr, dc)
    }
}

/// What one repetition did to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RepetitionOutcome {
    Moved {
        from: Pos,
        to: Pos,
        diagonal: Diagonal,
        landed_on_true: bool,
        attempts: u8,
    },
    Abandoned {
        attempts: u8,
    },
}

impl RepetitionOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, RepetitionOutcome::Moved { .. })
    }

    pub fn attempts(&self) -> u8 {
        match *self {
            RepetitionOutcome::Moved { attempts, .. } => attempts,
            RepetitionOutcome::Abandoned { attempts } => attempts,
        }
    }
}

/// States of the four facing-relative diagonals, in `Diagonal::ALL` order.
pub fn survey(board: &Board, token: &Token) -> [CellState; 4] {
    Diagonal::ALL.map(|d| board.classify(token.neighbour(d)))
}

/// Runs the retry loop for one repetition of `token`.
///
/// `bit` is the working serial bit at the cursor and is flipped in place
/// when the chosen diagonal leaves the board. `final_repetition` selects
/// the landing turn direction.
pub fn step(
    board: &mut Board,
    token: &mut Token,
    flags: &RuleFlags<'_>,
    bit: &mut bool,
    final_repetition: bool,
) -> RepetitionOutcome {
    let mut attempts: u8 = 1;

    loop {
        let [dl, dr, ul, ur] = survey(board, token);
        let none_free = ![dl, dr, ul, ur].iter().any(|s| s.is_available());

        if none_free || attempts > MAX_RETRY_ATTEMPTS {
            return RepetitionOutcome::Abandoned { attempts };
        }

        if !dl.is_available() && !dr.is_available() {
            let turn = if token.last_rule_true { 1 } else { 2 };
            token.facing = token.facing.rotated(turn);
            attempts += 1;
            continue;
        }

        let (diagonal, state) = if *bit {
            (Diagonal::DownRight, dr)
        } else {
            (Diagonal::DownLeft, dl)
        };

        match state {
            CellState::OutOfBounds => {
                *bit = !*bit;
            }
            CellState::Occupied => {
                token.facing = token.facing.rotated(-1);
            }
            CellState::Free => {
                let from = token.position;
                let to = token.neighbour(diagonal);
                board.move_token(from, to);
                token.position = to;

                let landed_on_true = flags.is_set(to.rule_id());
                token.last_rule_true = landed_on_true;
                if landed_on_true {
                    let turn = if final_repetition { -1 } else { 1 };
                    token.facing = token.facing.rotated(turn);
                }

                return RepetitionOutcome::Moved {
                    from,
                    to,
                    diagonal,
                    landed_on_true,
                    attempts,
                };
            }
        }
        attempts += 1;
    }
}
