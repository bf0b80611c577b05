//! Contains the `Game` controller, which keeps the running state of a game between turns.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::{debug, info};
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A chess game between two players sharing one board.
///
/// `Game` threads a [`GameState`](../struct.GameState.html) from one move to the next and keeps
/// what a front end needs to show: the move history, the pieces each side has captured, a pawn
/// waiting to be promoted, and the winner.
///
/// Check is not enforced. The game ends when a king is captured, and the side that captured it
/// wins.
///
/// While a promotion is pending, the pawn already stands on its last rank and the turn stays
/// with its owner until [`promote`](#method.promote) is called.
///
/// ```rust
/// use chess::game::Game;
/// use chess::Color;
///
/// let mut game = Game::new();
/// game.play("e2".parse()?, "e4".parse()?)?
///     .play("e7".parse()?, "e5".parse()?)?;
///
/// assert_eq!(game.history().len(), 2);
/// assert_eq!(game.state().turn(), Color::White);
/// assert!(game.play("e4".parse()?, "e5".parse()?).is_err());
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Game {
    state: GameState,
    history: Vec<Move>,
    captured: [Vec<Piece>; Color::COUNT],
    pending_promotion: Option<Square>,
    winner: Option<Color>,
}

impl Game {
    /// Creates a new game from the standard starting position
    pub fn new() -> Self {
        Game::default()
    }

    /// Creates a new game using `state` as the starting position
    pub fn starting_at(state: GameState) -> Self {
        Game {
            state,
            ..Default::default()
        }
    }

    /// Returns the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the moves made so far, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the opponent's pieces captured by `color`, in the order they were taken
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[usize::from(color)]
    }

    /// Returns the square of the pawn waiting to be promoted, if any
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Returns the side that captured the opposing king, if any
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Returns `true` once a king has been captured
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Returns every square the piece on `orig` may move to. Empty if the game is over, a
    /// promotion is pending, or the piece does not belong to the side to move.
    pub fn valid_moves(&self, orig: Square) -> Vec<Square> {
        if self.is_over() || self.pending_promotion.is_some() {
            Vec::new()
        } else {
            self.state.valid_moves(orig)
        }
    }

    /// Moves the piece on `orig` to `dest`.
    ///
    /// # Errors
    ///
    /// Returns `Error::GameOver` if a king has already been captured, `Error::PromotionPending`
    /// if a pawn must be promoted first, or `Error::IllegalMove` if the move is not valid.
    pub fn play(&mut self, orig: Square, dest: Square) -> Result<&mut Self> {
        self.play_promoting(orig, dest, None)
    }

    /// Moves the piece on `orig` to `dest`, promoting to `promotion` at once if one is given.
    ///
    /// Without a choice, a pawn reaching its last rank waits for [`promote`](#method.promote),
    /// unless it captured a king, in which case it becomes a queen.
    ///
    /// # Errors
    ///
    /// As [`play`](#method.play). A promotion choice for a move that does not promote is
    /// `Error::IllegalMove`.
    pub fn play_promoting(&mut self, orig: Square, dest: Square, promotion: Option<Promotion>)
    -> Result<&mut Self> {
        if self.is_over() {
            return Err(Error::GameOver);
        } else if self.pending_promotion.is_some() {
            return Err(Error::PromotionPending);
        } else if !self.state.is_valid_move(orig, dest) {
            return Err(Error::IllegalMove);
        }

        let mover = self.state.turn();
        let outcome = self.state.apply_move(orig, dest)?;
        let mv = outcome.mv;
        if promotion.is_some() && !mv.is_promotion() {
            return Err(Error::IllegalMove);
        }
        debug!("{:#} plays {}", mover, mv);

        if let Some(piece) = mv.captured_piece() {
            self.captured[usize::from(mover)].push(piece);
        }
        self.history.push(mv);
        self.state = self.state.advance(outcome);

        if mv.captures_king() {
            info!("{:#} captured the king and wins", mover);
            self.winner = Some(mover);
        }

        if mv.is_promotion() {
            match promotion {
                Some(promotion) => {
                    info!("{:#} promotes on {} to {}", mover, dest, promotion);
                    self.resolve(dest, promotion);
                },
                None if self.is_over() => self.resolve(dest, Promotion::default()),
                None => {
                    debug!("{:#} must choose a promotion for {}", mover, dest);
                    self.state = self.state.clone().with_turn(mover);
                    self.pending_promotion = Some(dest);
                },
            }
        }

        Ok(self)
    }

    /// Promotes the pending pawn to `promotion` and passes the turn.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoPendingPromotion` if no pawn is waiting to be promoted.
    pub fn promote(&mut self, promotion: Promotion) -> Result<&mut Self> {
        let square = self.pending_promotion.take().ok_or(Error::NoPendingPromotion)?;
        let mover = self.state.turn();

        info!("{:#} promotes on {} to {}", mover, square, promotion);
        self.resolve(square, promotion);
        self.state = self.state.clone().with_turn(!mover);

        Ok(self)
    }

    fn resolve(&mut self, square: Square, promotion: Promotion) {
        self.state = self.state.promoted(square, promotion);
        if let Some(last) = self.history.last_mut() {
            *last = last.with_promotion(promotion);
        }
    }
}

impl fmt::Display for Game {
    /// Writes the history as numbered move pairs, eg `1. e2-e4 e7-e5 2. Ng1-f3`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.history.first().map_or(self.state.turn(), |mv| mv.color());
        let mut s = String::new();

        for (i, mv) in self.history.iter().enumerate() {
            let ply = if first == Color::Black { i + 1 } else { i };
            if !s.is_empty() {
                s.push(' ');
            }
            if ply % 2 == 0 {
                s += &format!("{}. ", ply / 2 + 1);
            } else if i == 0 {
                s += &format!("{}... ", ply / 2 + 1);
            }
            s += &mv.to_string();
        }

        s.fmt(f)
    }
}
