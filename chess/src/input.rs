//! Parsing of moves typed by a player.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use regex::Regex;
use super::*;

lazy_static! {
    static ref MOVE_TEXT: Regex = Regex::new(
        r"^\s*([a-hA-H][1-8])\s*[-x:]?\s*([a-hA-H][1-8])\s*(?:=?\s*([qrbnQRBN]))?\s*$"
    ).expect("INFALLIBLE");
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move given as origin and destination squares, with an optional promotion choice.
///
/// Accepts coordinate notation with an optional separator and promotion suffix, in either case:
/// `e2e4`, `e2-e4`, `e4xd5`, `e7e8q` and `e7-e8=Q` are all valid.
///
/// ```rust
/// use chess::input::MoveText;
/// use chess::Promotion;
///
/// let text: MoveText = "e7-e8=Q".parse()?;
/// assert_eq!(text.origin().to_string(), "e7");
/// assert_eq!(text.destination().to_string(), "e8");
/// assert_eq!(text.promotion(), Some(Promotion::ToQueen));
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveText {
    orig: Square,
    dest: Square,
    prom_pc: Option<Promotion>,
}

impl MoveText {
    /// Returns the origin square.
    pub fn origin(&self) -> Square {
        self.orig
    }

    /// Returns the destination square.
    pub fn destination(&self) -> Square {
        self.dest
    }

    /// Returns the promotion choice, if one was given.
    pub fn promotion(&self) -> Option<Promotion> {
        self.prom_pc
    }
}

impl FromStr for MoveText {
    type Err = Error;

    fn from_str(s: &str) -> Result<MoveText> {
        let caps = MOVE_TEXT.captures(s).ok_or(Error::ParseError)?;

        let orig = caps.get(1).expect("INFALLIBLE").as_str().parse()?;
        let dest = caps.get(2).expect("INFALLIBLE").as_str().parse()?;
        let prom_pc = match caps.get(3) {
            Some(m) => Some(m.as_str().parse()?),
            None => None,
        };

        Ok(MoveText { orig, dest, prom_pc })
    }
}

impl fmt::Display for MoveText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = format!("{}{}", self.orig, self.dest);
        if let Some(prom_pc) = self.prom_pc {
            s += &prom_pc.to_string().to_ascii_lowercase();
        }
        s.fmt(f)
    }
}
