//! Contains structures to describe moves, and the classifiers for special moves
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

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which piece to promote to for a promotion move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Promotion {
    ToKnight = 1,
    ToBishop = 2,
    ToRook = 3,
    ToQueen = 4,
}

use Promotion::*;

impl Promotion {
    /// Every promotion choice, strongest first
    pub const ALL: [Promotion; 4] = [ToQueen, ToRook, ToBishop, ToKnight];
}

impl Default for Promotion {
    fn default() -> Self {
        ToQueen
    }
}

impl From<Promotion> for PieceType {
    fn from(prom: Promotion) -> Self {
        match prom {
            ToKnight => Knight,
            ToBishop => Bishop,
            ToRook => Rook,
            ToQueen => Queen,
        }
    }
}

impl TryFrom<PieceType> for Promotion {
    type Error = Error;

    fn try_from(kind: PieceType) -> Result<Self> {
        match kind {
            Knight => Ok(ToKnight),
            Bishop => Ok(ToBishop),
            Rook => Ok(ToRook),
            Queen => Ok(ToQueen),
            Pawn | King => Err(Error::ParseError),
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PieceType::from(*self).fmt(f)
    }
}

impl FromStr for Promotion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Promotion::try_from(s.parse::<PieceType>()?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The side of the board a king castles toward
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    /// Toward the h-file (higher columns)
    KingSide,
    /// Toward the a-file (lower columns)
    QueenSide,
}

impl CastlingSide {
    /// The column the king lands on.
    pub fn king_destination(self) -> usize {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    /// The column the rook starts from.
    pub fn rook_origin(self) -> usize {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    /// The column the rook lands on, which is the square the king passes over.
    pub fn rook_destination(self) -> usize {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }
}

impl fmt::Display for CastlingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastlingSide::KingSide => "O-O",
            CastlingSide::QueenSide => "O-O-O",
        }.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A record of a move that has been made, used for move history and for replaying the
/// consequences of special moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    piece: Piece,
    orig: Square,
    dest: Square,
    capt_pc: Option<Piece>,
    promotion: bool,
    prom_pc: Option<Promotion>,
    castling: Option<CastlingSide>,
    en_passant: bool,
}

impl Move {
    pub(crate) fn new(piece: Piece, orig: Square, dest: Square, capt_pc: Option<Piece>) -> Move {
        Move {
            piece,
            orig,
            dest,
            capt_pc,
            promotion: false,
            prom_pc: None,
            castling: None,
            en_passant: false,
        }
    }

    pub(crate) fn with_flags(
        self,
        promotion: bool,
        castling: Option<CastlingSide>,
        en_passant: bool)
    -> Move {
        Move { promotion, castling, en_passant, ..self }
    }

    /// Returns the piece that moved, as it was before the move.
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Returns the origin of the moved piece.
    pub fn origin(&self) -> Square {
        self.orig
    }

    /// Returns the destination of the moved piece.
    pub fn destination(&self) -> Square {
        self.dest
    }

    /// Returns the color of the side that moved.
    pub fn color(&self) -> Color {
        self.piece.color()
    }

    /// Returns the captured piece, if any.
    pub fn captured_piece(&self) -> Option<Piece> {
        self.capt_pc
    }

    /// Returns `true` if the move is a capture.
    pub fn is_capture(&self) -> bool {
        self.capt_pc.is_some()
    }

    /// Returns `true` if the move took a pawn to its last rank.
    pub fn is_promotion(&self) -> bool {
        self.promotion
    }

    /// Returns the piece the pawn was promoted to, once it has been chosen.
    pub fn promoted_to(&self) -> Option<Promotion> {
        self.prom_pc
    }

    /// Returns `true` if the move is castling.
    pub fn is_castling(&self) -> bool {
        self.castling.is_some()
    }

    /// Returns the side castled toward, if the move is castling.
    pub fn castling_side(&self) -> Option<CastlingSide> {
        self.castling
    }

    /// Returns `true` if the move is an en passant capture.
    pub fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    /// Returns `true` if the move captured a king.
    pub fn captures_king(&self) -> bool {
        self.capt_pc.map_or(false, |piece| piece.kind() == King)
    }

    /// Returns a copy of the move with the promotion choice filled in.
    pub fn with_promotion(self, prom_pc: Promotion) -> Move {
        Move { prom_pc: Some(prom_pc), ..self }
    }
}

impl fmt::Display for Move {
    /// The move is formatted as follows:
    ///
    /// "{}" -- Long Algebraic Notation (eg Ng1-f3, e5xd6, e7-e8=Q, or O-O)
    ///
    /// "{:#}" -- Coordinate Notation (eg g1f3, e5d6, e7e8q, or e1g1)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();

        if f.alternate() {
            s += &self.orig.to_string();
            s += &self.dest.to_string();
            if let Some(prom_pc) = self.prom_pc {
                s += &prom_pc.to_string().to_ascii_lowercase();
            }
            return s.fmt(f);
        }

        if let Some(side) = self.castling {
            return side.fmt(f);
        }

        if self.piece.kind() != Pawn {
            s += &self.piece.kind().to_string();
        }
        s += &self.orig.to_string();
        s += if self.is_capture() { "x" } else { "-" };
        s += &self.dest.to_string();

        if self.promotion {
            s += "=";
            match self.prom_pc {
                Some(prom_pc) => s += &prom_pc.to_string(),
                None => s += "?",
            }
        }

        s.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The result of applying a move: the new board and everything the caller needs to finish the
/// turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The board after the move
    pub board: Board,
    /// The record of the move
    pub mv: Move,
    /// The square a pawn may capture onto en passant on the next turn, if any
    pub en_passant_target: Option<Square>,
}

impl MoveOutcome {
    /// Returns the captured piece, including an en passant victim.
    pub fn captured_piece(&self) -> Option<Piece> {
        self.mv.captured_piece()
    }

    /// Returns `true` if a pawn reached its last rank and is waiting to be promoted.
    pub fn is_promotion(&self) -> bool {
        self.mv.is_promotion()
    }

    /// Returns `true` if the move is castling.
    pub fn is_castling(&self) -> bool {
        self.mv.is_castling()
    }

    /// Returns the side castled toward, if the move is castling.
    pub fn castling_side(&self) -> Option<CastlingSide> {
        self.mv.castling_side()
    }

    /// Returns `true` if the move is an en passant capture.
    pub fn is_en_passant(&self) -> bool {
        self.mv.is_en_passant()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Returns `true` if `piece` is a pawn standing on its promotion row.
pub fn is_pawn_promotion(square: Square, piece: Piece) -> bool {
    piece.kind() == Pawn && square.row() == piece.color().promotion_row()
}

/// Returns the castling side if moving `piece` from `orig` to `dest` is shaped like castling: a
/// king moving two columns along its row.
pub fn castling_side(orig: Square, dest: Square, piece: Piece) -> Option<CastlingSide> {
    if piece.kind() != King || orig.row() != dest.row() {
        return None;
    }

    match dest.col() as isize - orig.col() as isize {
        2 => Some(CastlingSide::KingSide),
        -2 => Some(CastlingSide::QueenSide),
        _ => None,
    }
}

/// Returns `true` if moving `piece` from `orig` to `dest` is shaped like castling.
pub fn is_castling_move(orig: Square, dest: Square, piece: Piece) -> bool {
    castling_side(orig, dest, piece).is_some()
}

/// Returns `true` if `piece` is a pawn landing on the en passant square.
pub fn is_en_passant_move(dest: Square, piece: Piece, en_passant: Option<Square>) -> bool {
    piece.kind() == Pawn && en_passant == Some(dest)
}

/// Replaces the pawn on `square` with the chosen piece. See
/// [`Board::promote_pawn`](struct.Board.html#method.promote_pawn).
pub fn promote_pawn(board: &Board, square: Square, promotion: Promotion) -> Board {
    board.promote_pawn(square, promotion)
}
