/// Keys on the module.
pub const KEY_COUNT: usize = 5;

/// Side length of the movement board.
pub const BOARD_SIZE: usize = 9;

/// Number of rule flags (ids 1..=41).
pub const RULE_COUNT: usize = 41;

/// Length of the serial-derived movement bit vector (1+2+3+4+5 repetitions).
pub const SERIAL_BIT_COUNT: usize = 15;

/// Movement iterations per simulation. Fixed, not convergence-based.
pub const SIMULATION_ITERATIONS: usize = 10;

/// Retries allowed inside a single repetition before it is abandoned.
pub const MAX_RETRY_ATTEMPTS: u8 = 4;

/// Labels printed on the five keycaps, by slot.
pub const KEY_LABELS: [char; KEY_COUNT] = ['X', 'B', 'C', 'R', 'L'];

/// Prefix used on every per-module log line.
pub const LOG_TAG: &str = "Mechanical Switches";
