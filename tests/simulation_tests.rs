use mechswitch::assignment::KeyAssignment;
use mechswitch::board::{Board, Diagonal, Facing, Pos};
use mechswitch::catalog::SwitchCatalog;
use mechswitch::facts::BombFacts;
use mechswitch::order_rule::OrderRule;
use mechswitch::round::RoundSetup;
use mechswitch::rules::{DynamicKeyFacts, RuleFlags, StaticFacts};
use mechswitch::serial::SerialBitVector;
use mechswitch::simulation::movement::{step, RepetitionOutcome, Token};
use mechswitch::simulation::GridSimulationEngine;
use rstest::rstest;

fn derive(draws: [usize; 5], serial: &str, engine: &GridSimulationEngine) -> RoundSetup {
    let catalog = SwitchCatalog::with_forces(70.0, 80.0);
    let assignment = KeyAssignment::from_draws(&catalog, &draws);
    let facts = BombFacts::new(serial);
    let statics = StaticFacts::evaluate(&facts);
    RoundSetup::derive(
        assignment,
        &SerialBitVector::from_serial(serial),
        &statics,
        engine,
    )
}

#[rstest]
#[case([0, 5, 9, 13, 21], "AB1C2D", OrderRule::AllCherry, vec![5, 2, 1, 3, 4])]
#[case([5, 6, 0, 1, 2], "E5Z9K0", OrderRule::TwoRed, vec![5, 2, 3, 4, 1])]
#[case([38, 33, 29, 12, 3], "QX7R4M", OrderRule::ManyRazer, vec![2, 1, 3, 4, 5])]
#[case([17, 17, 17, 17, 17], "AB1C2D", OrderRule::AllCherry, vec![2, 1, 3, 4, 5])]
fn test_known_hold_orders(
    #[case] draws: [usize; 5],
    #[case] serial: &str,
    #[case] rule: OrderRule,
    #[case] hold: Vec<u8>,
) {
    let setup = derive(draws, serial, &GridSimulationEngine::new());
    assert_eq!(setup.order_rule, rule);
    assert_eq!(setup.hold_order(), hold.as_slice());
}

#[test]
fn test_final_positions_written_back() {
    let setup = derive([0, 5, 9, 13, 21], "AB1C2D", &GridSimulationEngine::new());
    let expected = [
        (1, Pos::new(4, 2), Facing::West),
        (2, Pos::new(2, 4), Facing::North),
        (3, Pos::new(6, 4), Facing::West),
        (4, Pos::new(8, 8), Facing::West),
        (5, Pos::new(0, 8), Facing::East),
    ];
    for (rank, pos, facing) in expected {
        let key = setup.assignment.by_rank(rank).unwrap();
        assert_eq!(key.position, pos, "rank {}", rank);
        assert_eq!(key.facing, facing, "rank {}", rank);
        assert_eq!(setup.simulation.board.token_at(pos), rank);
    }
}

#[test]
fn test_single_iteration() {
    let setup = derive(
        [0, 5, 9, 13, 21],
        "AB1C2D",
        &GridSimulationEngine::with_iterations(1),
    );
    assert_eq!(setup.hold_order(), &[1, 2, 3, 4, 5]);
    assert_eq!(
        setup.assignment.by_rank(1).map(|k| k.position),
        Some(Pos::new(1, 1))
    );
    assert_eq!(setup.simulation.trace.len(), 1);
}

#[test]
fn test_zero_iterations_keeps_starting_order() {
    let setup = derive(
        [5, 6, 0, 1, 2],
        "E5Z9K0",
        &GridSimulationEngine::with_iterations(0),
    );
    assert_eq!(setup.hold_order(), &[2, 4, 5, 3, 1]);
    assert!(setup.simulation.trace.is_empty());
}

#[test]
fn test_trace_accounts_for_every_repetition() {
    let setup = derive([5, 6, 0, 1, 2], "E5Z9K0", &GridSimulationEngine::new());
    let trace = &setup.simulation.trace;
    assert_eq!(trace.len(), 10);
    for (i, snap) in trace.iter().enumerate() {
        assert_eq!(snap.iteration, i + 1);
        assert_eq!(snap.moves + snap.abandons, 15);
        assert_eq!(snap.tokens.len(), 5);
    }
    let abandons: Vec<usize> = trace.iter().map(|s| s.abandons).collect();
    assert_eq!(abandons, vec![0, 0, 1, 0, 0, 0, 0, 0, 2, 0]);
}

#[test]
fn test_simulation_is_deterministic() {
    let a = derive([38, 33, 29, 12, 3], "QX7R4M", &GridSimulationEngine::new());
    let b = derive([38, 33, 29, 12, 3], "QX7R4M", &GridSimulationEngine::new());
    assert_eq!(a.hold_order(), b.hold_order());
    assert_eq!(a.simulation.trace, b.simulation.trace);
}

#[test]
fn test_hold_order_is_permutation() {
    let setup = derive([38, 33, 29, 12, 3], "QX7R4M", &GridSimulationEngine::new());
    let mut sorted = setup.hold_order().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    assert_eq!(setup.simulation.board.token_count(), 5);
}

// --- Single repetitions ---

fn black_rank_one<'a>(statics: &'a StaticFacts, catalog: &SwitchCatalog) -> RuleFlags<'a> {
    RuleFlags::new(statics, DynamicKeyFacts::for_key(&catalog[0], 1))
}

#[test]
fn test_enclosed_token_is_abandoned() {
    let catalog = SwitchCatalog::with_forces(70.0, 80.0);
    let statics = StaticFacts::evaluate(&BombFacts::new("AB1C2D"));
    let flags = black_rank_one(&statics, &catalog);

    let mut board = Board::new();
    board.place(1, Pos::new(0, 0));
    board.place(2, Pos::new(1, 1));
    let mut token = Token::new(1, Pos::new(0, 0));
    let mut bit = false;

    let outcome = step(&mut board, &mut token, &flags, &mut bit, true);
    assert_eq!(outcome, RepetitionOutcome::Abandoned { attempts: 1 });
    assert_eq!(board.token_count(), 2);
    assert_eq!(token.position, Pos::new(0, 0));
    assert!(!bit);
}

#[test]
fn test_fully_surrounded_token_keeps_all_five() {
    let catalog = SwitchCatalog::with_forces(70.0, 80.0);
    let statics = StaticFacts::evaluate(&BombFacts::new("AB1C2D"));
    let flags = black_rank_one(&statics, &catalog);

    let mut board = Board::new();
    board.place(1, Pos::new(4, 4));
    for (rank, (r, c)) in (2..=5).zip([(3, 3), (3, 5), (5, 3), (5, 5)]) {
        board.place(rank, Pos::new(r, c));
    }
    let mut token = Token::new(1, Pos::new(4, 4));
    let mut bit = true;

    let outcome = step(&mut board, &mut token, &flags, &mut bit, false);
    assert_eq!(outcome, RepetitionOutcome::Abandoned { attempts: 1 });
    assert_eq!(board.token_count(), 5);
    assert_eq!(board.token_at(Pos::new(4, 4)), 1);
    assert_eq!(token.facing, Facing::North);
    assert!(bit);
}

#[test]
fn test_repetition_abandoned_at_retry_cap() {
    let catalog = SwitchCatalog::with_forces(70.0, 80.0);
    let statics = StaticFacts::evaluate(&BombFacts::new("AB1C2D"));
    let flags = black_rank_one(&statics, &catalog);

    // Both downward cells taken: North turns East, where DR is taken again
    // and turns back North. The loop never finds a move.
    let mut board = Board::new();
    board.place(1, Pos::new(1, 1));
    for (rank, (r, c)) in (2..=5).zip([(2, 0), (2, 2), (8, 8), (8, 0)]) {
        board.place(rank, Pos::new(r, c));
    }
    let mut token = Token::new(1, Pos::new(1, 1));
    token.last_rule_true = true;
    let mut bit = true;

    let outcome = step(&mut board, &mut token, &flags, &mut bit, false);
    assert_eq!(outcome, RepetitionOutcome::Abandoned { attempts: 5 });
    assert_eq!(token.position, Pos::new(1, 1));
    assert_eq!(token.facing, Facing::North);
    assert!(bit);
    assert_eq!(board.token_count(), 5);
}

#[test]
fn test_edge_flips_working_bit() {
    let catalog = SwitchCatalog::with_forces(70.0, 80.0);
    let statics = StaticFacts::evaluate(&BombFacts::new("AB1C2D"));
    let flags = black_rank_one(&statics, &catalog);

    let mut board = Board::new();
    board.place(1, Pos::new(0, 0));
    let mut token = Token::new(1, Pos::new(0, 0));
    let mut bit = false;

    let outcome = step(&mut board, &mut token, &flags, &mut bit, true);
    assert_eq!(
        outcome,
        RepetitionOutcome::Moved {
            from: Pos::new(0, 0),
            to: Pos::new(1, 1),
            diagonal: Diagonal::DownRight,
            landed_on_true: false,
            attempts: 2,
        }
    );
    assert!(bit);
    assert_eq!(token.facing, Facing::North);
    assert_eq!(board.token_at(Pos::new(1, 1)), 1);
}

#[test]
fn test_landing_on_true_rule_turns_token() {
    let catalog = SwitchCatalog::with_forces(70.0, 80.0);
    let statics = StaticFacts::evaluate(&BombFacts::new("AB1C2D"));
    // Rule 2 (vowel in serial) sits at (0, 6).
    let flags = black_rank_one(&statics, &catalog);
    let mut board = Board::new();
    board.place(1, Pos::new(1, 7));
    let mut token = Token::new(1, Pos::new(1, 7));
    token.facing = Facing::South;

    // South maps DL to (-1, +1) and DR to (-1, -1).
    let mut bit = true;
    let outcome = step(&mut board, &mut token, &flags, &mut bit, false);
    assert!(outcome.moved());
    assert_eq!(token.position, Pos::new(0, 6));
    assert!(token.last_rule_true);
    assert_eq!(token.facing, Facing::West);

    // Same landing on the final repetition turns the other way.
    let mut board = Board::new();
    board.place(1, Pos::new(1, 7));
    let mut token = Token::new(1, Pos::new(1, 7));
    token.facing = Facing::South;
    let mut bit = true;
    step(&mut board, &mut token, &flags, &mut bit, true);
    assert_eq!(token.facing, Facing::East);
}

#[test]
fn test_blocked_downward_diagonals_rotate_by_two() {
    let catalog = SwitchCatalog::with_forces(70.0, 80.0);
    let statics = StaticFacts::evaluate(&BombFacts::new("AB1C2D"));
    let flags = black_rank_one(&statics, &catalog);

    // Token on the bottom row facing North: both downward diagonals leave
    // the board, so it turns to face South and moves up.
    let mut board = Board::new();
    board.place(1, Pos::new(8, 4));
    let mut token = Token::new(1, Pos::new(8, 4));
    let mut bit = false;

    let outcome = step(&mut board, &mut token, &flags, &mut bit, false);
    assert_eq!(outcome.attempts(), 2);
    assert_eq!(token.facing, Facing::South);
    // South DL is (-1, +1).
    assert_eq!(token.position, Pos::new(7, 5));
}
