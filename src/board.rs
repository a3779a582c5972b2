use crate::consts::{BOARD_SIZE, KEY_COUNT};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Rule id printed on each board cell. Zero cells are never reachable:
/// diagonal steps keep `row + col` even.
pub const RULE_GRID: [[u8; BOARD_SIZE]; BOARD_SIZE] = [
    [32, 0, 9, 0, 40, 0, 2, 0, 11],
    [0, 8, 0, 12, 0, 4, 0, 41, 0],
    [15, 0, 39, 0, 25, 0, 30, 0, 35],
    [0, 20, 0, 18, 0, 22, 0, 17, 0],
    [19, 0, 31, 0, 26, 0, 37, 0, 24],
    [0, 36, 0, 7, 0, 5, 0, 33, 0],
    [16, 0, 38, 0, 27, 0, 21, 0, 1],
    [0, 3, 0, 13, 0, 28, 0, 10, 0],
    [29, 0, 6, 0, 14, 0, 34, 0, 23],
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Pos {
    pub row: i8,
    pub col: i8,
}

impl Pos {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn offset(self, dr: i8, dc: i8) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    pub fn in_bounds(self) -> bool {
        let n = BOARD_SIZE as i8;
        (0..n).contains(&self.row) && (0..n).contains(&self.col)
    }

    pub fn rule_id(self) -> u8 {
        if self.in_bounds() {
            RULE_GRID[self.row as usize][self.col as usize]
        } else {
            0
        }
    }
}

/// Per-key heading. Each step clockwise turns the key's frame a quarter.
#[derive(Debug, Clone, Copy, Default, EnumIter, Display, PartialEq, Eq, Hash, Serialize)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    pub fn from_index(i: u8) -> Self {
        match i % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Turns by `steps` quarters; negative steps turn back.
    pub fn rotated(self, steps: i8) -> Self {
        Self::from_index((self.index() as i8 + steps).rem_euclid(4) as u8)
    }

    /// Maps a canonical `(dr, dc)` into this facing's frame.
    pub fn transform(self, dr: i8, dc: i8) -> (i8, i8) {
        let (mut r, mut c) = (dr, dc);
        for _ in 0..self.index() {
            (r, c) = (c, -r);
        }
        (r, c)
    }
}

#[derive(Debug, Clone, Copy, EnumIter, Display, PartialEq, Eq, Hash, Serialize)]
pub enum Diagonal {
    #[strum(serialize = "DL")]
    DownLeft,
    #[strum(serialize = "DR")]
    DownRight,
    #[strum(serialize = "UL")]
    UpLeft,
    #[strum(serialize = "UR")]
    UpRight,
}

impl Diagonal {
    pub const ALL: [Diagonal; 4] = [
        Diagonal::DownLeft,
        Diagonal::DownRight,
        Diagonal::UpLeft,
        Diagonal::UpRight,
    ];

    pub fn canonical_offset(self) -> (i8, i8) {
        match self {
            Self::DownLeft => (1, -1),
            Self::DownRight => (1, 1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
        }
    }

    pub fn offset_for(self, facing: Facing) -> (i8, i8) {
        let (dr, dc) = self.canonical_offset();
        facing.transform(dr, dc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellState {
    OutOfBounds,
    Occupied,
    Free,
}

impl CellState {
    pub fn is_available(self) -> bool {
        self == CellState::Free
    }
}

/// Token positions over the fixed rule grid. A token is the rank of the
/// key standing on that cell; zero means empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    tokens: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out the starting permutation along the top row: the rank in
    /// slot `s` sits at `(0, 2s)`.
    pub fn with_starting_order(order: &[u8; KEY_COUNT]) -> Self {
        let mut board = Self::new();
        for (slot, &rank) in order.iter().enumerate() {
            board.place(rank, Board::start_pos(slot));
        }
        board
    }

    pub fn start_pos(slot: usize) -> Pos {
        Pos::new(0, (slot * 2) as i8)
    }

    pub fn token_at(&self, pos: Pos) -> u8 {
        if pos.in_bounds() {
            self.tokens[pos.row as usize][pos.col as usize]
        } else {
            0
        }
    }

    pub fn place(&mut self, rank: u8, pos: Pos) {
        if pos.in_bounds() {
            self.tokens[pos.row as usize][pos.col as usize] = rank;
        }
    }

    pub fn move_token(&mut self, from: Pos, to: Pos) {
        let rank = self.token_at(from);
        self.place(0, from);
        self.place(rank, to);
    }

    pub fn classify(&self, pos: Pos) -> CellState {
        if !pos.in_bounds() {
            CellState::OutOfBounds
        } else if self.token_at(pos) != 0 {
            CellState::Occupied
        } else {
            CellState::Free
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.iter().flatten().filter(|&&t| t != 0).count()
    }

    pub fn position_of(&self, rank: u8) -> Option<Pos> {
        self.occupied().find(|&(_, r)| r == rank).map(|(p, _)| p)
    }

    /// Occupied cells in reading order.
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, u8)> + '_ {
        self.tokens.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &t)| t != 0)
                .map(move |(c, &t)| (Pos::new(r as i8, c as i8), t))
        })
    }

    /// Ranks in row-major order: the hold order.
    pub fn hold_order(&self) -> Vec<u8> {
        self.occupied().map(|(_, r)| r).collect()
    }

    /// Text rendering, one row per line. Empty cells print as `.`.
    pub fn render(&self) -> String {
        self.tokens
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&t| if t == 0 { ".".to_string() } else { t.to_string() })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
