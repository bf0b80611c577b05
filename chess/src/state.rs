//! Contains `GameState`, the snapshot threaded from one move to the next.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::trace;
use super::*;

use Color::*;
use PieceType::*;

const KING_COL: usize = 4;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The board, the side to move, the last move made and the en passant square.
///
/// A `GameState` is never modified. [`apply_move`](#method.apply_move) computes the next board,
/// and [`advance`](#method.advance) turns its result into the next `GameState`.
///
/// ```rust
/// use chess::{GameState, Square};
///
/// let state = GameState::new();
/// let e2: Square = "e2".parse()?;
/// let e4: Square = "e4".parse()?;
///
/// assert!(state.is_valid_move(e2, e4));
/// let outcome = state.apply_move(e2, e4)?;
/// assert_eq!(outcome.en_passant_target, Some("e3".parse()?));
///
/// let state = state.advance(outcome);
/// assert_eq!(state.to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3");
/// # Ok::<(), chess::Error>(())
/// ```
///
/// `GameState` can be written and parsed as the first four fields of Forsyth-Edwards Notation:
/// piece placement, side to move, castling availability and en passant square. Castling
/// availability is derived from, and mapped onto, whether kings and corner rooks have moved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    turn: Color,
    last_move: Option<Move>,
    en_passant: Option<Square>,
}

impl GameState {
    /// Returns the state at the start of a game.
    pub fn new() -> GameState {
        GameState::from_board(Board::new(), White)
    }

    /// Returns a state with the given board and side to move, no en passant square and no last
    /// move.
    pub fn from_board(board: Board, turn: Color) -> GameState {
        GameState { board, turn, last_move: None, en_passant: None }
    }

    /// Returns a copy of the state with the en passant square replaced.
    pub fn with_en_passant(self, en_passant: Option<Square>) -> GameState {
        GameState { en_passant, ..self }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the last move made, if any.
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// Returns the square a pawn may capture onto en passant this turn, if any.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns `true` if the side to move may move the piece on `orig` to `dest`.
    ///
    /// The checks are made in order: a piece stands on `orig`, it belongs to the side to move,
    /// `dest` does not hold a piece of the same color, and the piece's movement rules allow it.
    /// Check is not considered; see [`check::would_expose_king`](check/fn.would_expose_king.html).
    pub fn is_valid_move(&self, orig: Square, dest: Square) -> bool {
        let piece = match self.board.piece_at(orig) {
            Some(piece) => piece,
            None => return false,
        };

        if piece.color() != self.turn {
            return false;
        }

        // also rejects `orig == dest`
        if let Some(target) = self.board.piece_at(dest) {
            if target.color() == piece.color() {
                return false;
            }
        }

        rules::can_move(&self.board, self.en_passant, piece, orig, dest)
    }

    /// Returns every square the piece on `orig` may move to.
    pub fn valid_moves(&self, orig: Square) -> Vec<Square> {
        Square::all().filter(|dest| self.is_valid_move(orig, *dest)).collect()
    }

    /// Returns every valid move for the side to move, as origin and destination pairs.
    pub fn moves(&self) -> Vec<(Square, Square)> {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color() == self.turn)
            .flat_map(|(orig, _)| {
                self.valid_moves(orig).into_iter().map(move |dest| (orig, dest))
            })
            .collect()
    }

    /// Computes the board after moving the piece on `orig` to `dest`.
    ///
    /// The move is assumed to be valid; check it first with
    /// [`is_valid_move`](#method.is_valid_move). Castling also moves the rook, and an en passant
    /// capture removes the pawn that was passed. The pawn on its last rank is left as a pawn until
    /// [`promote_pawn`](fn.promote_pawn.html) is called, and the side to move is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptySquare` if there is no piece on `orig`, or `Error::IllegalMove` if
    /// `orig` and `dest` are the same square.
    pub fn apply_move(&self, orig: Square, dest: Square) -> Result<MoveOutcome> {
        let piece = self.board.piece_at(orig).ok_or(Error::EmptySquare)?;
        if orig == dest {
            return Err(Error::IllegalMove);
        }

        let promotion = is_pawn_promotion(dest, piece);
        let castling = castling_side(orig, dest, piece);
        let en_passant = is_en_passant_move(dest, piece, self.en_passant);

        let mut board = self.board.clone();
        board.take(orig);
        let mut capt_pc = board.take(dest);
        board.set(dest, Some(piece.moved()));

        if let Some(side) = castling {
            let rook_orig = orig.with_col(side.rook_origin())?;
            let rook_dest = orig.with_col(side.rook_destination())?;
            if let Some(rook) = board.take(rook_orig) {
                board.set(rook_dest, Some(rook.moved()));
            }
        }

        if en_passant {
            if let Some(victim) = dest.offset(-piece.color().forward(), 0) {
                capt_pc = board.take(victim);
            }
        }

        let row_diff = dest.row() as isize - orig.row() as isize;
        let en_passant_target = if piece.kind() == Pawn && row_diff.abs() == 2 {
            orig.offset(piece.color().forward(), 0)
        } else {
            None
        };

        let mv = Move::new(piece, orig, dest, capt_pc).with_flags(promotion, castling, en_passant);
        trace!("applied {} to {}", mv, self);

        Ok(MoveOutcome { board, mv, en_passant_target })
    }

    /// Returns the state after `outcome`: its board, its en passant square, and the other side to
    /// move.
    pub fn advance(&self, outcome: MoveOutcome) -> GameState {
        GameState {
            board: outcome.board,
            turn: !self.turn,
            last_move: Some(outcome.mv),
            en_passant: outcome.en_passant_target,
        }
    }

    /// Validates and applies a move and passes the turn, promoting to `promotion` (or to a queen)
    /// if a pawn reaches its last rank.
    ///
    /// # Errors
    ///
    /// Returns `Error::IllegalMove` if the move is not valid.
    pub fn make_move(&self, orig: Square, dest: Square, promotion: Option<Promotion>)
    -> Result<GameState> {
        if !self.is_valid_move(orig, dest) {
            return Err(Error::IllegalMove);
        }

        let outcome = self.apply_move(orig, dest)?;
        let state = self.advance(outcome);

        if state.last_move.map_or(false, |mv| mv.is_promotion()) {
            Ok(state.promoted(dest, promotion.unwrap_or_default()))
        } else {
            Ok(state)
        }
    }

    /// Returns a copy of the state with the pawn on `square` promoted and the promotion recorded
    /// on the last move.
    pub(crate) fn promoted(&self, square: Square, promotion: Promotion) -> GameState {
        GameState {
            board: self.board.promote_pawn(square, promotion),
            last_move: self.last_move.map(|mv| mv.with_promotion(promotion)),
            ..self.clone()
        }
    }

    /// Returns a copy of the state with `turn` to move.
    pub(crate) fn with_turn(self, turn: Color) -> GameState {
        GameState { turn, ..self }
    }

    fn castling_flags(&self) -> String {
        let mut s = String::new();

        for &color in &[White, Black] {
            for &(side, c) in &[(CastlingSide::KingSide, 'K'), (CastlingSide::QueenSide, 'Q')] {
                if self.can_still_castle(color, side) {
                    s.push(if color == White { c } else { c.to_ascii_lowercase() });
                }
            }
        }

        if s.is_empty() {
            s.push('-');
        }
        s
    }

    fn can_still_castle(&self, color: Color, side: CastlingSide) -> bool {
        let row = color.back_row();
        let unmoved = |col, kind| {
            Square::new(row, col).ok()
                .and_then(|sq| self.board.piece_at(sq))
                .map_or(false, |piece: Piece| piece.is(color, kind) && !piece.has_moved())
        };

        unmoved(KING_COL, King) && unmoved(side.rook_origin(), Rook)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ep = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {}", self.board, self.turn, self.castling_flags(), ep).fmt(f)
    }
}

impl FromStr for GameState {
    type Err = Error;

    /// Parses the first two to four fields of Forsyth-Edwards Notation. Any halfmove clock and
    /// move number that follow are ignored.
    fn from_str(s: &str) -> Result<GameState> {
        let fields: Vec<_> = s.split_whitespace().collect();
        if fields.len() < 2 || fields.len() > 6 {
            return Err(Error::ParseError);
        }

        let placement: Board = fields[0].parse()?;
        let turn: Color = fields[1].parse()?;
        let castling = fields.get(2).copied().unwrap_or("-");
        let ep = fields.get(3).copied().unwrap_or("-");

        let mut rights = Vec::new();
        if castling != "-" {
            for c in castling.chars() {
                let color = if c.is_ascii_uppercase() { White } else { Black };
                let side = match c.to_ascii_uppercase() {
                    'K' => CastlingSide::KingSide,
                    'Q' => CastlingSide::QueenSide,
                    _ => return Err(Error::ParseError),
                };
                if rights.contains(&(color, side)) {
                    return Err(Error::ParseError);
                }
                rights.push((color, side));
            }
        }

        // every piece starts unmoved; mark whatever cannot be
        let mut builder = BoardBuilder::from_board(&placement);
        for (sq, piece) in placement.pieces() {
            let color = piece.color();
            let on_back_row = sq.row() == color.back_row();
            let moved = match piece.kind() {
                Pawn => sq.row() != color.pawn_row(),
                King => !on_back_row || sq.col() != KING_COL
                    || !rights.iter().any(|&(c, _)| c == color),
                Rook => !on_back_row || !rights.iter().any(|&(c, side)| {
                    c == color && side.rook_origin() == sq.col()
                }),
                _ => false,
            };
            if moved {
                builder.mark_moved(sq);
            }
        }

        let state = GameState::from_board(builder.build(), turn);
        for &(color, side) in &rights {
            if !state.can_still_castle(color, side) {
                return Err(Error::ParseError);
            }
        }

        let en_passant = match ep {
            "-" => None,
            _ => {
                let sq: Square = ep.parse()?;
                // the pawn that just advanced belongs to the side not on move
                let row = (!turn).pawn_row() as isize + (!turn).forward();
                if sq.row() as isize != row || !state.board.is_empty(sq) {
                    return Err(Error::ParseError);
                }
                let passed = sq.offset((!turn).forward(), 0).and_then(|pawn| state.board.piece_at(pawn));
                if !passed.map_or(false, |pawn| pawn.is(!turn, Pawn)) {
                    return Err(Error::ParseError);
                }
                Some(sq)
            },
        };

        Ok(state.with_en_passant(en_passant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn start_position_round_trips() {
        let state = GameState::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";
        assert_eq!(state.to_string(), fen);
        assert_eq!(fen.parse::<GameState>().unwrap(), state);
        assert_eq!((fen.to_string() + " 0 1").parse::<GameState>().unwrap(), state);
    }

    #[test]
    fn fromstr_maps_castling_onto_moved_flags() {
        let state: GameState = "r3k2r/8/8/8/8/8/8/R3K2R w Kq -".parse().unwrap();
        let board = state.board();
        assert!(!board.piece_at(sq("e1")).unwrap().has_moved());
        assert!(!board.piece_at(sq("h1")).unwrap().has_moved());
        assert!(board.piece_at(sq("a1")).unwrap().has_moved());
        assert!(!board.piece_at(sq("e8")).unwrap().has_moved());
        assert!(board.piece_at(sq("h8")).unwrap().has_moved());
        assert!(!board.piece_at(sq("a8")).unwrap().has_moved());
        assert_eq!(state.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R w Kq -");

        let state: GameState = "r3k2r/8/8/8/8/8/8/R3K2R b - -".parse().unwrap();
        assert!(state.board().piece_at(sq("e1")).unwrap().has_moved());
        assert!(state.board().piece_at(sq("e8")).unwrap().has_moved());
    }

    #[test]
    fn fromstr_trait_produces_errors_when_it_should() {
        assert!("8/8/8/8/8/8/8/8".parse::<GameState>().is_err());
        assert!("8/8/8/8/8/8/8/8 x".parse::<GameState>().is_err());
        // castling right without a rook
        assert!("4k3/8/8/8/8/8/8/4K3 w K -".parse::<GameState>().is_err());
        assert!("4k3/8/8/8/8/8/8/4K3 w X -".parse::<GameState>().is_err());
        // en passant square on the wrong row or occupied
        assert!("4k3/8/8/8/4P3/8/8/4K3 b - e4".parse::<GameState>().is_err());
        assert!("4k3/8/8/8/4P3/4n3/8/4K3 b - e3".parse::<GameState>().is_err());
        // en passant square with no pawn in front of it
        assert!("4k3/8/8/8/3p4/8/8/4K3 b - e3".parse::<GameState>().is_err());
        assert!("4k3/8/8/8/4p3/8/8/4K3 b - e3".parse::<GameState>().is_err());
        // repeated castling letters
        assert!("r3k2r/8/8/8/8/8/8/R3K2R w KK -".parse::<GameState>().is_err());
        assert!("r3k2r/8/8/8/8/8/8/R3K2R w KQKQ -".parse::<GameState>().is_err());
        assert!("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -".parse::<GameState>().is_ok());
        assert!("4k3/8/8/8/4P3/8/8/4K3 b - e3".parse::<GameState>().is_ok());
        assert!("4k3/8/8/3p4/8/8/8/4K3 w - d6".parse::<GameState>().is_ok());
    }

    #[test]
    fn orchestrator_checks_ownership_and_turn() {
        let state = GameState::new();
        // empty origin
        assert!(!state.is_valid_move(sq("e4"), sq("e5")));
        // opponent's piece
        assert!(!state.is_valid_move(sq("e7"), sq("e5")));
        // own piece on the destination
        assert!(!state.is_valid_move(sq("a1"), sq("a2")));
        assert!(!state.is_valid_move(sq("e1"), sq("e1")));
        // blocked
        assert!(!state.is_valid_move(sq("a1"), sq("a8")));
        assert!(state.is_valid_move(sq("g1"), sq("f3")));
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let state = GameState::new();
        assert_eq!(state.moves().len(), 20);
        assert_eq!(state.valid_moves(sq("b1")), vec![sq("a3"), sq("c3")]);
        assert_eq!(state.valid_moves(sq("e2")), vec![sq("e4"), sq("e3")]);
        assert!(state.valid_moves(sq("e1")).is_empty());
    }

    #[test]
    fn apply_move_leaves_the_input_untouched() -> Result<()> {
        let state = GameState::new();
        let outcome = state.apply_move(sq("g1"), sq("f3"))?;

        assert_eq!(state.board(), &Board::new());
        assert!(outcome.board.is_empty(sq("g1")));
        let knight = outcome.board.piece_at(sq("f3")).expect("knight");
        assert!(knight.is(White, Knight));
        assert!(knight.has_moved());
        assert_eq!(outcome.captured_piece(), None);
        assert_eq!(outcome.en_passant_target, None);
        assert!(!outcome.is_promotion() && !outcome.is_castling() && !outcome.is_en_passant());

        assert_eq!(state.apply_move(sq("e4"), sq("e5")), Err(Error::EmptySquare));
        assert_eq!(state.apply_move(sq("e2"), sq("e2")), Err(Error::IllegalMove));
        Ok(())
    }

    #[test]
    fn apply_move_reports_captures() -> Result<()> {
        let state: GameState = "4k3/8/8/3p4/4P3/8/8/4K3 w - -".parse()?;
        let outcome = state.apply_move(sq("e4"), sq("d5"))?;
        assert_eq!(outcome.captured_piece().map(Piece::kind), Some(Pawn));
        assert_eq!(outcome.board.to_string(), "4k3/8/8/3P4/8/8/8/4K3");
        Ok(())
    }

    #[test]
    fn apply_move_castles_both_sides() -> Result<()> {
        let state: GameState = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq -".parse()?;

        let outcome = state.apply_move(sq("e1"), sq("g1"))?;
        assert_eq!(outcome.castling_side(), Some(CastlingSide::KingSide));
        assert_eq!(outcome.board.to_string(), "r3k2r/8/8/8/8/8/8/R4RK1");
        assert!(outcome.board.piece_at(sq("f1")).unwrap().has_moved());

        let outcome = state.apply_move(sq("e1"), sq("c1"))?;
        assert_eq!(outcome.castling_side(), Some(CastlingSide::QueenSide));
        assert_eq!(outcome.board.to_string(), "r3k2r/8/8/8/8/8/8/2KR3R");

        let state = state.advance(outcome);
        assert_eq!(state.to_string(), "r3k2r/8/8/8/8/8/8/2KR3R b kq -");
        let outcome = state.apply_move(sq("e8"), sq("c8"))?;
        assert_eq!(outcome.board.to_string(), "2kr3r/8/8/8/8/8/8/2KR3R");
        Ok(())
    }

    #[test]
    fn apply_move_captures_en_passant() -> Result<()> {
        let state: GameState = "4k3/8/8/3pP3/8/8/8/4K3 w - d6".parse()?;
        assert!(state.is_valid_move(sq("e5"), sq("d6")));

        let outcome = state.apply_move(sq("e5"), sq("d6"))?;
        assert!(outcome.is_en_passant());
        assert_eq!(outcome.captured_piece(), Some(Piece::new(Black, Pawn).moved()));
        assert_eq!(outcome.board.to_string(), "4k3/8/3P4/8/8/8/8/4K3");
        assert_eq!(outcome.en_passant_target, None);
        Ok(())
    }

    #[test]
    fn make_move_promotes() -> Result<()> {
        let state: GameState = "4k3/1P6/8/8/8/8/8/4K3 w - -".parse()?;
        let next = state.make_move(sq("b7"), sq("b8"), Some(Promotion::ToKnight))?;
        assert_eq!(next.board().to_string(), "1N2k3/8/8/8/8/8/8/4K3");
        assert_eq!(next.last_move().and_then(Move::promoted_to), Some(Promotion::ToKnight));
        assert_eq!(next.turn(), Black);

        let next = state.make_move(sq("b7"), sq("b8"), None)?;
        assert_eq!(next.board().to_string(), "1Q2k3/8/8/8/8/8/8/4K3");

        assert_eq!(state.make_move(sq("b7"), sq("b6"), None), Err(Error::IllegalMove));
        Ok(())
    }
}
