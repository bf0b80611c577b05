//! Contains the `Board` and its builder.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use super::*;

use Color::*;
use PieceType::*;

const BACK_ROW: [PieceType; Square::SIDE] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The arrangement of pieces on the 8×8 board.
///
/// A `Board` is a snapshot. Operations that change the arrangement, such as
/// [`GameState::apply_move`](struct.GameState.html#method.apply_move) and
/// [`promote_pawn`](#method.promote_pawn), return a new `Board` and leave the original untouched.
///
/// `Board` displays in two ways:
///
/// "{}" -- the piece placement field of Forsyth-Edwards Notation
/// (eg `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`)
///
/// "{:#}" -- an 8-line diagram with rank and file labels
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; Square::SIDE]; Square::SIDE],
}

impl Board {
    /// Returns the standard starting position, with no piece marked as moved.
    pub fn new() -> Board {
        let mut board = Board::empty();

        for (col, kind) in BACK_ROW.iter().enumerate() {
            board.squares[Black.back_row()][col] = Some(Piece::new(Black, *kind));
            board.squares[Black.pawn_row()][col] = Some(Piece::new(Black, Pawn));
            board.squares[White.pawn_row()][col] = Some(Piece::new(White, Pawn));
            board.squares[White.back_row()][col] = Some(Piece::new(White, *kind));
        }

        board
    }

    /// Returns a board with no pieces.
    pub fn empty() -> Board {
        Board { squares: [[None; Square::SIDE]; Square::SIDE] }
    }

    /// Returns the piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row()][square.col()]
    }

    /// Returns `true` if no piece stands on `square`.
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Returns an iterator over every occupied square and its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Returns the location of `color`'s king, or `None` if it has been captured.
    pub fn king_location(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(color, King))
            .map(|(sq, _)| sq)
    }

    /// Replaces the pawn on `square` with a piece of the chosen type and the same color.
    ///
    /// The new piece counts as moved. If `square` does not hold a pawn, the board is returned
    /// unchanged. This does not check that the pawn has reached the last rank.
    pub fn promote_pawn(&self, square: Square, promotion: Promotion) -> Board {
        let mut board = self.clone();

        if let Some(pawn) = self.piece_at(square) {
            if pawn.kind() == Pawn {
                let piece = Piece::new(pawn.color(), promotion.into()).moved();
                board.set(square, Some(piece));
            }
        }

        board
    }

    /// Returns a diagram of the board, using chess glyphs if `unicode` is set.
    pub fn diagram(&self, unicode: bool) -> String {
        let mut s = String::new();

        for row in 0..Square::SIDE {
            s += &format!("{} ", Square::SIDE - row);
            for col in 0..Square::SIDE {
                let sq = Square::new(row, col).expect("INFALLIBLE");
                let c = match self.piece_at(sq) {
                    Some(piece) if unicode => piece.glyph(),
                    Some(piece) => piece.to_char(),
                    None => '.',
                };
                s.push(' ');
                s.push(c);
            }
            s.push('\n');
        }
        s += "   a b c d e f g h";

        s
    }

    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row()][square.col()] = piece;
    }

    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square);
        self.set(square, None);
        piece
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.diagram(false).fmt(f);
        }

        let mut s = String::new();

        for row in 0..Square::SIDE {
            if row > 0 {
                s.push('/');
            }

            let mut gap = 0;
            for col in 0..Square::SIDE {
                match self.squares[row][col] {
                    Some(piece) => {
                        if gap > 0 {
                            s += &gap.to_string();
                            gap = 0;
                        }
                        s.push(piece.to_char());
                    },
                    None => gap += 1,
                }
            }
            if gap > 0 {
                s += &gap.to_string();
            }
        }

        s.fmt(f)
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses the piece placement field of Forsyth-Edwards Notation. Every piece is unmoved.
    fn from_str(s: &str) -> Result<Board> {
        let mut builder = BoardBuilder::new();
        let mut row = 0;
        let mut col = 0;

        for c in s.trim().chars() {
            match c {
                '1' ..= '8' => {
                    col += c.to_digit(10).expect("INFALLIBLE") as usize;
                    if col > Square::SIDE {
                        return Err(Error::ParseError);
                    }
                },
                '/' => {
                    if col == Square::SIDE && row < Square::SIDE - 1 {
                        row += 1;
                        col = 0;
                    } else {
                        return Err(Error::ParseError);
                    }
                },
                _ => {
                    let sq = Square::new(row, col).map_err(|_| Error::ParseError)?;
                    let piece = Piece::from_char(c)?;
                    builder.piece(piece.color(), piece.kind(), sq);
                    col += 1;
                },
            }
        }

        if row < Square::SIDE - 1 || col != Square::SIDE {
            return Err(Error::ParseError);
        }

        Ok(builder.build())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A builder for `Board`
///
/// ```rust
/// use chess::{BoardBuilder, Color, PieceType, Square};
///
/// let e1: Square = "e1".parse()?;
/// let board = BoardBuilder::new()
///     .piece(Color::White, PieceType::King, e1)
///     .moved_piece(Color::Black, PieceType::King, "e8".parse()?)
///     .build();
///
/// assert!(!board.piece_at(e1).unwrap().has_moved());
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoardBuilder {
    board: Option<Board>,
}

impl BoardBuilder {
    /// Creates a new `BoardBuilder` for an empty board
    pub fn new() -> Self {
        BoardBuilder { board: None }
    }

    /// Creates a new `BoardBuilder` starting from an existing board
    pub fn from_board(board: &Board) -> Self {
        BoardBuilder { board: Some(board.clone()) }
    }

    /// Places an unmoved piece on `square`
    pub fn piece(&mut self, color: Color, kind: PieceType, square: Square) -> &mut Self {
        self.board_mut().set(square, Some(Piece::new(color, kind)));
        self
    }

    /// Places a piece which has already moved on `square`
    pub fn moved_piece(&mut self, color: Color, kind: PieceType, square: Square) -> &mut Self {
        self.board_mut().set(square, Some(Piece::new(color, kind).moved()));
        self
    }

    /// Marks the piece on `square`, if any, as moved
    pub fn mark_moved(&mut self, square: Square) -> &mut Self {
        let board = self.board_mut();
        if let Some(piece) = board.piece_at(square) {
            board.set(square, Some(piece.moved()));
        }
        self
    }

    /// Clears the piece at `square`
    pub fn clear(&mut self, square: Square) -> &mut Self {
        self.board_mut().set(square, None);
        self
    }

    /// Returns the board
    pub fn build(&self) -> Board {
        self.board.clone().unwrap_or_else(Board::empty)
    }

    fn board_mut(&mut self) -> &mut Board {
        self.board.get_or_insert_with(Board::empty)
    }
}
