use mechswitch::board::{Board, CellState, Diagonal, Facing, Pos, RULE_GRID};
use rstest::rstest;

#[test]
fn test_rule_cells_follow_parity() {
    let mut ids = Vec::new();
    for (r, row) in RULE_GRID.iter().enumerate() {
        for (c, &id) in row.iter().enumerate() {
            assert_eq!(id != 0, (r + c) % 2 == 0, "cell ({}, {})", r, c);
            if id != 0 {
                ids.push(id);
            }
        }
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=41).collect::<Vec<u8>>());
}

#[rstest]
#[case(Facing::North, Diagonal::DownLeft, (1, -1))]
#[case(Facing::North, Diagonal::UpRight, (-1, 1))]
#[case(Facing::East, Diagonal::DownLeft, (-1, -1))]
#[case(Facing::East, Diagonal::DownRight, (1, -1))]
#[case(Facing::South, Diagonal::DownLeft, (-1, 1))]
#[case(Facing::South, Diagonal::DownRight, (-1, -1))]
#[case(Facing::West, Diagonal::DownLeft, (1, 1))]
#[case(Facing::West, Diagonal::UpLeft, (1, -1))]
fn test_facing_transform(
    #[case] facing: Facing,
    #[case] diagonal: Diagonal,
    #[case] expected: (i8, i8),
) {
    assert_eq!(diagonal.offset_for(facing), expected);
}

#[test]
fn test_rotation_wraps() {
    assert_eq!(Facing::North.rotated(1), Facing::East);
    assert_eq!(Facing::North.rotated(-1), Facing::West);
    assert_eq!(Facing::West.rotated(2), Facing::East);
    assert_eq!(Facing::South.rotated(3), Facing::East);
    assert_eq!(Facing::from_index(6), Facing::South);
}

#[test]
fn test_starting_layout() {
    let board = Board::with_starting_order(&[2, 4, 5, 3, 1]);
    assert_eq!(board.token_count(), 5);
    assert_eq!(board.hold_order(), vec![2, 4, 5, 3, 1]);
    assert_eq!(board.position_of(5), Some(Pos::new(0, 4)));
    assert_eq!(board.token_at(Pos::new(0, 8)), 1);
}

#[test]
fn test_classify_and_move() {
    let mut board = Board::with_starting_order(&[1, 2, 3, 4, 5]);
    assert_eq!(board.classify(Pos::new(-1, 0)), CellState::OutOfBounds);
    assert_eq!(board.classify(Pos::new(0, 9)), CellState::OutOfBounds);
    assert_eq!(board.classify(Pos::new(0, 2)), CellState::Occupied);
    assert_eq!(board.classify(Pos::new(1, 1)), CellState::Free);

    board.move_token(Pos::new(0, 2), Pos::new(1, 1));
    assert_eq!(board.token_count(), 5);
    assert_eq!(board.token_at(Pos::new(0, 2)), 0);
    assert_eq!(board.hold_order(), vec![1, 3, 4, 5, 2]);
}

#[test]
fn test_rule_id_lookup() {
    assert_eq!(Pos::new(0, 0).rule_id(), 32);
    assert_eq!(Pos::new(4, 4).rule_id(), 26);
    assert_eq!(Pos::new(8, 8).rule_id(), 23);
    assert_eq!(Pos::new(0, 1).rule_id(), 0);
    assert_eq!(Pos::new(9, 0).rule_id(), 0);
}

#[test]
fn test_render() {
    let board = Board::with_starting_order(&[1, 2, 3, 4, 5]);
    let text = board.render();
    let first = text.lines().next().unwrap();
    assert_eq!(first, "1 . 2 . 3 . 4 . 5");
    assert_eq!(text.lines().count(), 9);
}
