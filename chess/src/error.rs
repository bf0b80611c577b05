//! Defines the error types needed by the chess crate
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` crate
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot parse string
    ParseError,
    /// Row, column or index out of range
    TryFromIntError,
    /// Illegal move
    IllegalMove,
    /// No piece on the origin square
    EmptySquare,
    /// A promotion must be resolved before the next move
    PromotionPending,
    /// There is no promotion to resolve
    NoPendingPromotion,
    /// A king has been captured
    GameOver,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseError => "cannot parse string",
            TryFromIntError => "integer out of range",
            IllegalMove => "illegal move",
            EmptySquare => "no piece on the origin square",
            PromotionPending => "a pawn is waiting to be promoted",
            NoPendingPromotion => "no pawn is waiting to be promoted",
            GameOver => "the game is over",
        }.fmt(f)
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` crate
pub type Result<T> = std::result::Result<T, Error>;
