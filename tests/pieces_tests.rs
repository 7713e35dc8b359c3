//! Piece tests: shapes, movement and SRS rotation against a real board.

use blocktris::core::{get_shape, Board, Tetromino};
use blocktris::types::{PieceKind, RotateDirection, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn board_full_except(free: &[(i8, i8)]) -> Board {
    let mut board = Board::new();
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if !free.contains(&(x, y)) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }
    board
}

#[test]
fn test_i_piece_north_is_a_horizontal_bar() {
    let shape = get_shape(PieceKind::I, Rotation::North);
    assert!(shape.iter().all(|&(_, y)| y == 1));
    let mut xs: Vec<_> = shape.iter().map(|&(x, _)| x).collect();
    xs.sort();
    assert_eq!(xs, vec![0, 1, 2, 3]);
}

#[test]
fn test_four_clockwise_rotations_return_to_start() {
    let board = Board::new();
    for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L, PieceKind::I] {
        let start = Tetromino {
            y: 8,
            ..Tetromino::spawn(kind)
        };
        let mut piece = start;
        for _ in 0..4 {
            piece = piece
                .try_rotate(&board, RotateDirection::Clockwise)
                .expect("open space rotation");
        }
        assert_eq!(piece, start, "{:?}", kind);
    }
}

#[test]
fn test_o_piece_never_rotates() {
    let board = Board::new();
    let o = Tetromino::spawn(PieceKind::O);
    assert_eq!(o.try_rotate(&board, RotateDirection::Clockwise), None);
    assert_eq!(o.try_rotate(&board, RotateDirection::CounterClockwise), None);
}

#[test]
fn test_i_piece_kicks_off_left_wall() {
    let board = Board::new();
    let vertical = Tetromino {
        kind: PieceKind::I,
        rotation: Rotation::West,
        x: -1,
        y: 5,
    };
    assert!(vertical.fits(&board));

    let rotated = vertical
        .try_rotate(&board, RotateDirection::Clockwise)
        .unwrap();
    assert_eq!(rotated.rotation, Rotation::North);
    assert_eq!(rotated.x, 0);
    assert!(rotated.fits(&board));
}

#[test]
fn test_rotation_fails_when_every_kick_is_blocked() {
    let piece = Tetromino {
        y: 5,
        ..Tetromino::spawn(PieceKind::T)
    };
    let board = board_full_except(&piece.occupied_cells());
    assert!(piece.fits(&board));
    assert_eq!(piece.try_rotate(&board, RotateDirection::Clockwise), None);
    assert_eq!(piece.try_rotate(&board, RotateDirection::CounterClockwise), None);
}

#[test]
fn test_try_move_respects_walls_and_blocks() {
    let mut board = Board::new();
    let piece = Tetromino::spawn(PieceKind::O);

    let mut left = piece;
    while let Some(next) = left.try_move(&board, -1, 0) {
        left = next;
    }
    // O occupies box columns 1-2, so it stops with x = -1.
    assert_eq!(left.x, -1);

    board.set(6, 0, Some(PieceKind::I));
    assert_eq!(piece.try_move(&board, 1, 0), None);
}

#[test]
fn test_ghost_lands_on_stack() {
    let board = Board::from_rows(&["..........", "IIIIIIIIII", "IIIIIIIIII"]);
    let ghost = Tetromino::spawn(PieceKind::O).ghost(&board);
    // Stack top is row 18; the O rests on rows 16-17.
    assert_eq!(ghost.y, 16);
    assert!(ghost.is_grounded(&board));
}
