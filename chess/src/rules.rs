//! Movement rules for each type of piece.
//!
//! Each predicate answers one question: ignoring whose turn it is and who owns the destination,
//! could a piece of this type travel from `orig` to `dest` on this board? All of them assume that
//! `orig != dest` and that a piece of the relevant type stands on `orig`.
//!
//! None of the predicates consider check. See the [`check`](../check/index.html) module for that.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;
use PieceType::*;

/// Returns `true` if `piece` could move from `orig` to `dest`, where `en_passant` is the square a
/// pawn may capture onto this turn, if any.
pub fn can_move(
    board: &Board,
    en_passant: Option<Square>,
    piece: Piece,
    orig: Square,
    dest: Square)
-> bool {
    match piece.kind() {
        Pawn => pawn_can_move(board, en_passant, piece.color(), orig, dest),
        Knight => knight_can_move(orig, dest),
        Bishop => bishop_can_move(board, orig, dest),
        Rook => rook_can_move(board, orig, dest),
        Queen => queen_can_move(board, orig, dest),
        King => king_can_move(board, piece, orig, dest),
    }
}

/// Pawn movement: a single step forward onto an empty square, a two-square advance from the
/// pawn's starting row through empty squares, a diagonal step onto an opposing piece, or a
/// diagonal step onto the en-passant square.
pub fn pawn_can_move(
    board: &Board,
    en_passant: Option<Square>,
    color: Color,
    orig: Square,
    dest: Square)
-> bool {
    let forward = color.forward();
    let (row_diff, col_diff) = diff(orig, dest);

    match (row_diff * forward, col_diff.abs()) {
        (1, 0) => board.is_empty(dest),
        (2, 0) => {
            orig.row() == color.pawn_row()
                && orig.offset(forward, 0).map_or(false, |sq| board.is_empty(sq))
                && board.is_empty(dest)
        },
        (1, 1) => {
            let captures = board.piece_at(dest).map_or(false, |piece| piece.color() != color);
            captures || en_passant == Some(dest)
        },
        _ => false,
    }
}

/// Knight movement: an L-shaped jump, never blocked.
pub fn knight_can_move(orig: Square, dest: Square) -> bool {
    let (row_diff, col_diff) = diff(orig, dest);

    match (row_diff.abs(), col_diff.abs()) {
        (2, 1) | (1, 2) => true,
        _ => false,
    }
}

/// Bishop movement: any distance along a diagonal with nothing in between.
pub fn bishop_can_move(board: &Board, orig: Square, dest: Square) -> bool {
    let (row_diff, col_diff) = diff(orig, dest);

    row_diff != 0 && row_diff.abs() == col_diff.abs() && path_is_clear(board, orig, dest)
}

/// Rook movement: any distance along a row or column with nothing in between.
pub fn rook_can_move(board: &Board, orig: Square, dest: Square) -> bool {
    let (row_diff, col_diff) = diff(orig, dest);

    (row_diff == 0) != (col_diff == 0) && path_is_clear(board, orig, dest)
}

/// Queen movement: anything a bishop or a rook could do.
pub fn queen_can_move(board: &Board, orig: Square, dest: Square) -> bool {
    bishop_can_move(board, orig, dest) || rook_can_move(board, orig, dest)
}

/// King movement: a single step in any direction, or castling.
pub fn king_can_move(board: &Board, king: Piece, orig: Square, dest: Square) -> bool {
    let (row_diff, col_diff) = diff(orig, dest);

    if row_diff.abs() <= 1 && col_diff.abs() <= 1 {
        true
    } else {
        can_castle(board, king, orig, dest)
    }
}

/// Returns `true` if `king` may castle from `orig` to `dest`.
///
/// The king must not have moved and must travel two columns along its own row to column 6
/// (king side) or column 2 (queen side). A rook of the same color which has never moved must stand
/// in the corner on that side, and every square between king and rook must be empty.
///
/// Whether the king is in check, passes through check or lands in check is not considered.
pub fn can_castle(board: &Board, king: Piece, orig: Square, dest: Square) -> bool {
    let (row_diff, col_diff) = diff(orig, dest);

    if king.kind() != King || king.has_moved() || row_diff != 0 || col_diff.abs() != 2 {
        return false;
    }

    let side = if col_diff > 0 { CastlingSide::KingSide } else { CastlingSide::QueenSide };
    if dest.col() != side.king_destination() {
        return false;
    }

    let rook_sq = match orig.with_col(side.rook_origin()) {
        Ok(sq) => sq,
        Err(_) => return false,
    };

    match board.piece_at(rook_sq) {
        Some(rook) if rook.is(king.color(), Rook) && !rook.has_moved() => {
            path_is_clear(board, orig, rook_sq)
        },
        _ => false,
    }
}

/// Returns `true` if every square strictly between `orig` and `dest` is empty.
///
/// `orig` and `dest` must share a row, a column or a diagonal. Both coordinates are stepped in
/// lockstep for a fixed number of steps, so the scan never overshoots the destination.
pub fn path_is_clear(board: &Board, orig: Square, dest: Square) -> bool {
    let (row_diff, col_diff) = diff(orig, dest);
    let steps = row_diff.abs().max(col_diff.abs());
    let (row_step, col_step) = (row_diff.signum(), col_diff.signum());

    (1..steps).all(|i| {
        orig.offset(row_step * i, col_step * i)
            .map_or(false, |sq| board.is_empty(sq))
    })
}

fn diff(orig: Square, dest: Square) -> (isize, isize) {
    (dest.row() as isize - orig.row() as isize, dest.col() as isize - orig.col() as isize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Color::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn board(placement: &str) -> Board {
        placement.parse().unwrap()
    }

    #[test]
    fn pawn_single_and_double_steps() {
        let b = Board::new();
        assert!(pawn_can_move(&b, None, White, sq("e2"), sq("e3")));
        assert!(pawn_can_move(&b, None, White, sq("e2"), sq("e4")));
        assert!(!pawn_can_move(&b, None, White, sq("e2"), sq("e5")));
        assert!(pawn_can_move(&b, None, Black, sq("d7"), sq("d6")));
        assert!(pawn_can_move(&b, None, Black, sq("d7"), sq("d5")));

        // backward and sideways
        assert!(!pawn_can_move(&b, None, White, sq("e2"), sq("e1")));
        assert!(!pawn_can_move(&b, None, Black, sq("d7"), sq("d8")));
        assert!(!pawn_can_move(&b, None, White, sq("e2"), sq("f2")));
    }

    #[test]
    fn pawn_double_step_only_from_starting_row() {
        let b = board("4k3/8/8/8/8/4P3/8/4K3");
        assert!(pawn_can_move(&b, None, White, sq("e3"), sq("e4")));
        assert!(!pawn_can_move(&b, None, White, sq("e3"), sq("e5")));
    }

    #[test]
    fn pawn_is_blocked() {
        // blocker on the destination
        let b = board("4k3/8/8/8/8/4n3/4P3/4K3");
        assert!(!pawn_can_move(&b, None, White, sq("e2"), sq("e3")));
        assert!(!pawn_can_move(&b, None, White, sq("e2"), sq("e4")));

        // blocker on the skipped square
        let b = board("4k3/8/8/8/8/4N3/4P3/4K3");
        assert!(!pawn_can_move(&b, None, White, sq("e2"), sq("e4")));

        // blocker on the far square
        let b = board("4k3/8/8/8/4n3/8/4P3/4K3");
        assert!(pawn_can_move(&b, None, White, sq("e2"), sq("e3")));
        assert!(!pawn_can_move(&b, None, White, sq("e2"), sq("e4")));
    }

    #[test]
    fn pawn_captures_diagonally() {
        let b = board("4k3/8/8/3p1P2/4P3/8/8/4K3");
        assert!(pawn_can_move(&b, None, White, sq("e4"), sq("d5")));
        assert!(!pawn_can_move(&b, None, White, sq("e4"), sq("f5")));
        assert!(pawn_can_move(&b, None, Black, sq("d5"), sq("e4")));
        assert!(!pawn_can_move(&b, None, Black, sq("d5"), sq("c4")));
        assert!(!pawn_can_move(&b, None, White, sq("e4"), sq("f3")));
    }

    #[test]
    fn pawn_captures_en_passant() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3");
        assert!(pawn_can_move(&b, Some(sq("d6")), White, sq("e5"), sq("d6")));
        assert!(!pawn_can_move(&b, None, White, sq("e5"), sq("d6")));
        assert!(!pawn_can_move(&b, Some(sq("f6")), White, sq("e5"), sq("d6")));
    }

    #[test]
    fn knight_jumps() {
        assert!(knight_can_move(sq("g1"), sq("f3")));
        assert!(knight_can_move(sq("g1"), sq("e2")));
        assert!(knight_can_move(sq("d4"), sq("b5")));
        assert!(!knight_can_move(sq("g1"), sq("g3")));
        assert!(!knight_can_move(sq("g1"), sq("e3")));
    }

    #[test]
    fn bishop_moves_diagonally_until_blocked() {
        let b = board("4k3/8/8/8/3p4/8/1B6/4K3");
        assert!(bishop_can_move(&b, sq("b2"), sq("c3")));
        assert!(bishop_can_move(&b, sq("b2"), sq("d4")));
        assert!(!bishop_can_move(&b, sq("b2"), sq("e5")));
        assert!(bishop_can_move(&b, sq("b2"), sq("a1")));
        assert!(bishop_can_move(&b, sq("b2"), sq("a3")));
        assert!(!bishop_can_move(&b, sq("b2"), sq("b5")));
        assert!(!bishop_can_move(&b, sq("b2"), sq("d3")));
    }

    #[test]
    fn rook_moves_straight_until_blocked() {
        let b = Board::new();
        assert!(!rook_can_move(&b, sq("a1"), sq("a8")));
        assert!(!rook_can_move(&b, sq("a1"), sq("a3")));
        assert!(rook_can_move(&b, sq("a1"), sq("a2")));

        let b = board("4k3/8/8/8/R2p4/8/8/4K3");
        assert!(rook_can_move(&b, sq("a4"), sq("d4")));
        assert!(!rook_can_move(&b, sq("a4"), sq("e4")));
        assert!(rook_can_move(&b, sq("a4"), sq("a8")));
        assert!(rook_can_move(&b, sq("a4"), sq("a1")));
        assert!(!rook_can_move(&b, sq("a4"), sq("b5")));
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let b = board("4k3/8/8/8/3Q4/8/8/4K3");
        assert!(queen_can_move(&b, sq("d4"), sq("d8")));
        assert!(queen_can_move(&b, sq("d4"), sq("h8")));
        assert!(queen_can_move(&b, sq("d4"), sq("a4")));
        assert!(!queen_can_move(&b, sq("d4"), sq("e6")));
    }

    #[test]
    fn king_steps_once() {
        let b = board("4k3/8/8/8/3K4/8/8/8");
        let king = Piece::new(White, King).moved();
        for dest in &["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5"] {
            assert!(king_can_move(&b, king, sq("d4"), sq(dest)), "d4-{}", dest);
        }
        assert!(!king_can_move(&b, king, sq("d4"), sq("d6")));
        assert!(!king_can_move(&b, king, sq("d4"), sq("f4")));
    }

    #[test]
    fn castling_requires_unmoved_pieces_and_empty_squares() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R");
        let king = Piece::new(White, King);
        assert!(can_castle(&b, king, sq("e1"), sq("g1")));
        assert!(can_castle(&b, king, sq("e1"), sq("c1")));
        assert!(!can_castle(&b, king.moved(), sq("e1"), sq("g1")));

        let black = Piece::new(Black, King);
        assert!(can_castle(&b, black, sq("e8"), sq("g8")));
        assert!(can_castle(&b, black, sq("e8"), sq("c8")));

        // b-file blocker only matters on the queen side
        let b = board("4k3/8/8/8/8/8/8/RN2K2R");
        assert!(!can_castle(&b, king, sq("e1"), sq("c1")));
        assert!(can_castle(&b, king, sq("e1"), sq("g1")));

        // moved rook
        let b = BoardBuilder::from_board(&board("4k3/8/8/8/8/8/8/R3K2R"))
            .mark_moved(sq("h1"))
            .build();
        assert!(!can_castle(&b, king, sq("e1"), sq("g1")));
        assert!(can_castle(&b, king, sq("e1"), sq("c1")));

        // missing or foreign rook
        let b = board("4k3/8/8/8/8/8/8/r3K3");
        assert!(!can_castle(&b, king, sq("e1"), sq("g1")));
        assert!(!can_castle(&b, king, sq("e1"), sq("c1")));
    }

    #[test]
    fn path_scan_stops_at_the_destination() {
        let b = board("7k/8/8/8/8/8/8/K7");
        assert!(path_is_clear(&b, sq("a1"), sq("h8")));
        assert!(path_is_clear(&b, sq("a1"), sq("a8")));

        let b = board("7k/8/8/8/8/8/1p6/K7");
        assert!(!path_is_clear(&b, sq("a1"), sq("h8")));
        assert!(path_is_clear(&b, sq("a1"), sq("b2")));
    }
}
