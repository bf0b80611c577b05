//! Detection of attacks on the king.
//!
//! Nothing here is used by [`GameState::is_valid_move`](../struct.GameState.html#method.is_valid_move),
//! which ignores check entirely. Callers who want check rules can layer these functions on top of
//! it; variants without check can leave them out.
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

/// Returns `true` if any piece of color `by` could capture on `square`.
///
/// Pawn advances and castling never capture, so they are not attacks. En passant is left out too,
/// since it never captures a piece on the square moved to.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    board.pieces()
        .filter(|(orig, piece)| piece.color() == by && *orig != square)
        .any(|(orig, piece)| match piece.kind() {
            Pawn => {
                orig.offset(by.forward(), -1) == Some(square)
                    || orig.offset(by.forward(), 1) == Some(square)
            },
            King => {
                let row_diff = square.row() as isize - orig.row() as isize;
                let col_diff = square.col() as isize - orig.col() as isize;
                row_diff.abs() <= 1 && col_diff.abs() <= 1
            },
            _ => rules::can_move(board, None, piece, orig, square),
        })
}

/// Returns `true` if `color`'s king is attacked. A side without a king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_location(color) {
        Some(king) => is_square_attacked(board, king, !color),
        None => false,
    }
}

/// Returns `true` if moving the piece on `orig` to `dest` would leave the mover's king attacked.
///
/// The move is applied hypothetically; `state` is not changed. Returns `false` if `orig` is empty.
pub fn would_expose_king(state: &GameState, orig: Square, dest: Square) -> bool {
    let mover = match state.board().piece_at(orig) {
        Some(piece) => piece.color(),
        None => return false,
    };

    match state.apply_move(orig, dest) {
        Ok(outcome) => is_in_check(&outcome.board, mover),
        Err(_) => false,
    }
}
