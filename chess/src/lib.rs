//! The `chess` crate implements the rules of chess for two players sharing one board.
//!
//! Every operation is a pure function of its inputs. Positions are immutable snapshots
//! ([`GameState`]) that the caller threads from one move to the next, either by hand or through
//! the [`Game`](game/struct.Game.html) controller.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::ops;
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// The row direction in which this side's pawns advance.
    ///
    /// # Example
    /// ```
    /// use chess::Color;
    /// assert_eq!(Color::White.forward(), -1);
    /// assert_eq!(Color::Black.forward(), 1);
    /// ```
    pub fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The row holding this side's king and rooks at the start of the game.
    pub fn back_row(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The row holding this side's pawns at the start of the game.
    pub fn pawn_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The row on which this side's pawns are promoted (the opponent's back row).
    pub fn promotion_row(self) -> usize {
        (!self).back_row()
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    /// "{}" gives the FEN letter (`w` or `b`), "{:#}" gives the name (`White` or `Black`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, f.alternate()) {
            (Color::White, false) => "w".fmt(f),
            (Color::Black, false) => "b".fmt(f),
            (Color::White, true) => "White".fmt(f),
            (Color::Black, true) => "Black".fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(Error::ParseError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl From<Color> for usize {
    fn from(value: Color) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    /// The number of piece types
    pub const COUNT: usize = PieceType::King as usize + 1;

    /// Every piece type, in discriminant order
    pub const ALL: [PieceType; PieceType::COUNT] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => "P",
            PieceType::Knight => "N",
            PieceType::Bishop => "B",
            PieceType::Rook => "R",
            PieceType::Queen => "Q",
            PieceType::King => "K",
        }.fmt(f)
    }
}

impl FromStr for PieceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "P"|"p" => Ok(PieceType::Pawn),
            "N"|"n" => Ok(PieceType::Knight),
            "B"|"b" => Ok(PieceType::Bishop),
            "R"|"r" => Ok(PieceType::Rook),
            "Q"|"q" => Ok(PieceType::Queen),
            "K"|"k" => Ok(PieceType::King),
            _       => Err(Error::ParseError),
        }
    }
}

impl Default for PieceType {
    fn default() -> Self {
        PieceType::Pawn
    }
}

impl TryFrom<usize> for PieceType {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        PieceType::ALL.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<PieceType> for usize {
    fn from(value: PieceType) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A piece on the board: its type, its color, and whether it has ever moved.
///
/// `Piece` is a plain value. Moving a piece never modifies it in place; the board receives a new
/// value with `has_moved` set (see [`Piece::moved`]).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceType,
    color: Color,
    has_moved: bool,
}

impl Piece {
    /// Returns a piece which has not moved yet.
    pub fn new(color: Color, kind: PieceType) -> Piece {
        Piece { kind, color, has_moved: false }
    }

    /// Returns the piece type.
    pub fn kind(self) -> PieceType {
        self.kind
    }

    /// Returns the piece's color.
    pub fn color(self) -> Color {
        self.color
    }

    /// Returns `true` if the piece has left its square at least once.
    pub fn has_moved(self) -> bool {
        self.has_moved
    }

    /// Returns a copy of this piece marked as moved.
    pub fn moved(self) -> Piece {
        Piece { has_moved: true, ..self }
    }

    /// Returns `true` if the piece is of the given color and type.
    pub fn is(self, color: Color, kind: PieceType) -> bool {
        self.color == color && self.kind == kind
    }

    /// Returns the FEN letter for the piece: uppercase for white, lowercase for black.
    pub fn to_char(self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        };

        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parses a FEN letter into an unmoved piece.
    pub fn from_char(c: char) -> Result<Piece> {
        let kind = c.to_string().parse()?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Ok(Piece::new(color, kind))
    }

    /// Returns the chess glyph for the piece.
    pub fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceType::King) => '♔',
            (Color::White, PieceType::Queen) => '♕',
            (Color::White, PieceType::Rook) => '♖',
            (Color::White, PieceType::Bishop) => '♗',
            (Color::White, PieceType::Knight) => '♘',
            (Color::White, PieceType::Pawn) => '♙',
            (Color::Black, PieceType::King) => '♚',
            (Color::Black, PieceType::Queen) => '♛',
            (Color::Black, PieceType::Rook) => '♜',
            (Color::Black, PieceType::Bishop) => '♝',
            (Color::Black, PieceType::Knight) => '♞',
            (Color::Black, PieceType::Pawn) => '♟',
        }
    }
}

impl fmt::Display for Piece {
    /// "{}" gives the FEN letter, "{:#}" gives the glyph.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.glyph().fmt(f)
        } else {
            self.to_char().fmt(f)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, given by row and column.
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank (rank 1). Column 0 is the
/// a-file and column 7 the h-file. Both coordinates are always in range: a `Square` can only be
/// built through checked constructors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = 64;

    /// The number of rows (and of columns)
    pub const SIDE: usize = 8;

    /// Returns the square at `row` and `col`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TryFromIntError` if either coordinate is greater than 7.
    pub fn new(row: usize, col: usize) -> Result<Square> {
        if row < Self::SIDE && col < Self::SIDE {
            Ok(Square { row: row as u8, col: col as u8 })
        } else {
            Err(Error::TryFromIntError)
        }
    }

    /// Returns the square's row.
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Returns the square's column.
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Returns the square `rows` and `cols` away from this one, or `None` if that is off the
    /// board.
    pub fn offset(self, rows: isize, cols: isize) -> Option<Square> {
        let row = self.row as isize + rows;
        let col = self.col as isize + cols;

        if row < 0 || col < 0 {
            None
        } else {
            Square::new(row as usize, col as usize).ok()
        }
    }

    /// Returns the square on the same row in column `col`.
    pub fn with_col(self, col: usize) -> Result<Square> {
        Square::new(self.row(), col)
    }

    /// Returns the square reflected top to bottom (`a1` becomes `a8`).
    pub fn flip(self) -> Square {
        Square { row: 7 - self.row, col: self.col }
    }

    /// Returns an iterator over all 64 squares, row by row from `a8` to `h1`.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT).map(|i| Square { row: (i / Self::SIDE) as u8, col: (i % Self::SIDE) as u8 })
    }
}

impl fmt::Display for Square {
    /// Formats the square in algebraic notation, such as `e4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        format!("{}{}", file, rank).fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    /// Parses algebraic notation, such as `e4`, into a square.
    fn from_str(s: &str) -> Result<Self> {
        let c: Vec<_> = s.chars().collect();
        if c.len() != 2 {
            return Err(Error::ParseError);
        }

        let file = c[0].to_ascii_lowercase();
        let rank = c[1];
        match (file, rank) {
            ('a' ..= 'h', '1' ..= '8') => {
                Square::new((b'8' - rank as u8) as usize, (file as u8 - b'a') as usize)
            },
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square { row: 0, col: 0 }
    }
}

impl TryFrom<usize> for Square {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if value < Self::COUNT {
            Square::new(value / Self::SIDE, value % Self::SIDE)
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.row() * Square::SIDE + value.col()
    }
}

/// Converts algebraic notation (`"e4"`) into a square.
pub fn notation_to_square(s: &str) -> Result<Square> {
    s.parse()
}

/// Converts a square into algebraic notation (`"e4"`).
pub fn square_to_notation(square: Square) -> String {
    square.to_string()
}

////////////////////////////////////////////////////////////////////////////////////////////////////
mod board;
pub use board::{Board, BoardBuilder};

pub mod rules;

mod moves;
pub use moves::{Move, MoveOutcome, CastlingSide, Promotion};
pub use moves::{is_pawn_promotion, castling_side, is_castling_move, is_en_passant_move};
pub use moves::promote_pawn;

mod state;
pub use state::GameState;

pub mod check;
pub mod game;
pub mod input;
pub mod variations;

pub mod error;
pub use error::{Error, Result};

#[cfg(test)]
mod color_tests {
    use super::Color;

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Color::White), "w");
        assert_eq!(format!("{}", Color::Black), "b");
        assert_eq!(format!("{:#}", Color::White), "White");
        assert_eq!(format!("{:#}", Color::Black), "Black");
    }

    #[test]
    fn fromstr_trait_works() {
        assert_eq!("w".parse::<Color>().unwrap(), Color::White);
        assert_eq!("b".parse::<Color>().unwrap(), Color::Black);
        assert!("x".parse::<Color>().is_err());
    }

    #[test]
    fn default_is_white() {
        assert_eq!(Color::White, Default::default());
    }

    #[test]
    fn rows_mirror_each_other() {
        assert_eq!(Color::White.back_row(), 7);
        assert_eq!(Color::Black.back_row(), 0);
        assert_eq!(Color::White.pawn_row(), 6);
        assert_eq!(Color::Black.pawn_row(), 1);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.promotion_row(), 7);
    }
}
