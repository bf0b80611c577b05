//! The interactive terminal session: two players take turns typing moves at one prompt.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use log::{debug, info, warn};
use lazy_static::lazy_static;
use regex::{RegexSet, Regex};
use chess::{Color, Promotion, Square};
use chess::game::Game;
use chess::input::MoveText;
use crate::config::Config;

const HELP: &str = "\
Commands:
  <move>          make a move, eg e2e4, e2-e4, or e7e8q to promote to a queen
  q, r, b, n      choose a promotion when asked
  moves <square>  list the squares the piece on <square> may move to
  board           show the board
  history         show the moves made so far
  help            show this message
  quit            leave the game

Check is not enforced. The game is won by capturing the opposing king.";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A line typed at the prompt
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move a piece, optionally naming the promotion.
    ///
    /// ```text
    /// e2e4
    /// e7-e8=Q
    /// ```
    Move(MoveText),

    /// Promote the pawn waiting on the last rank.
    ///
    /// ```text
    /// q | r | b | n
    /// ```
    Promote(Promotion),

    /// List the squares the piece on a square may move to.
    ///
    /// ```text
    /// moves <square>
    /// ```
    Moves(Square),

    /// Show the board.
    Board,

    /// Show the moves made so far.
    History,

    /// Show the list of commands.
    Help,

    /// Leave the game.
    Quit,
}

impl FromStr for Command {
    type Err = chess::Error;

    fn from_str(s: &str) -> chess::Result<Self> {
        use Command::*;

        let s = s.trim();
        if let Some(ind) = COMMAND_SET.matches(s).iter().next() {
            let args = COMMAND_VEC[ind].captures(s).expect("INFALLIBLE");

            match ind {
                0 => Ok(Moves(args.get(1).expect("INFALLIBLE").as_str().parse()?)),
                1 => Ok(Board),
                2 => Ok(History),
                3 => Ok(Help),
                4 => Ok(Quit),
                5 => Ok(Promote(args.get(1).expect("INFALLIBLE").as_str().parse()?)),
                6 => Ok(Move(s.parse()?)),
                _ => unreachable!(),
            }
        } else {
            Err(chess::Error::ParseError)
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Command::*;

        match self {
            Move(text) => text.fmt(f),
            Promote(prom_pc) => prom_pc.to_string().to_ascii_lowercase().fmt(f),
            Moves(square) => format!("moves {}", square).fmt(f),
            Board => "board".fmt(f),
            History => "history".fmt(f),
            Help => "help".fmt(f),
            Quit => "quit".fmt(f),
        }
    }
}

const COMMANDS: [&str; 7] = [
    r"^(?i)moves?\s+([a-h][1-8])$",
    r"^(?i)board$",
    r"^(?i)history$",
    r"^(?i)(?:help|\?)$",
    r"^(?i)(?:quit|exit)$",
    r"^(?i)([qrbn])$",
    r"^[a-hA-H][1-8]",
];

lazy_static! {
    static ref COMMAND_SET: RegexSet = RegexSet::new(&COMMANDS).expect("INFALLIBLE");
    static ref COMMAND_VEC: Vec<Regex> = {
        let mut cmd_vec = Vec::new();
        for cmd in &COMMANDS {
            cmd_vec.push(Regex::new(cmd).expect("INFALLIBLE"));
        }
        cmd_vec
    };
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A game played at one terminal.
///
/// Commands are read a line at a time from `input`, and everything meant for the players is
/// written to `output`.
#[derive(Debug)]
pub struct Session<R, W> {
    game: Game,
    config: Config,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session that continues `game`.
    pub fn new(game: Game, config: Config, input: R, output: W) -> Self {
        Session { game, config, input, output }
    }

    /// Returns the game being played
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the output, eg to inspect what was written
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Plays until a king is captured, a player quits, or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        info!("starting game at {}", self.game.state());
        self.show_board()?;

        while !self.game.is_over() {
            self.prompt()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!("<{:#}>: {}", self.game.state().turn(), line);

            match line.parse() {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.execute(cmd)?,
                Err(_) => {
                    warn!("unknown command: {}", line);
                    writeln!(self.output, "Unknown command: {}. Type 'help' for a list of commands.", line)?;
                },
            }
        }

        Ok(())
    }

    fn execute(&mut self, cmd: Command) -> io::Result<()> {
        use Command::*;

        match cmd {
            Move(text) => self.play(text)?,
            Promote(prom_pc) => self.promote(prom_pc)?,
            Moves(square) => self.show_targets(square)?,
            Board => self.show_board()?,
            History => {
                if self.game.history().is_empty() {
                    writeln!(self.output, "No moves yet.")?;
                } else {
                    writeln!(self.output, "{}", self.game)?;
                }
            },
            Help => writeln!(self.output, "{}", HELP)?,
            Quit => { },
        }

        Ok(())
    }

    fn play(&mut self, text: MoveText) -> io::Result<()> {
        let (orig, dest) = (text.origin(), text.destination());

        let played = self.game.play_promoting(orig, dest, text.promotion()).map(|_| ());
        match played {
            Ok(()) => self.after_move(),
            Err(chess::Error::IllegalMove)
            if text.promotion().is_some() && self.game.state().is_valid_move(orig, dest) => {
                warn!("promotion suffix on {} in {}", text, self.game.state());
                writeln!(self.output, "{}: only a pawn reaching its last rank can be promoted", text)
            },
            Err(chess::Error::IllegalMove) => {
                warn!("illegal move {} in {}", text, self.game.state());
                writeln!(self.output, "Illegal move: {}", text)?;
                if self.config.show_targets && self.owns(orig) {
                    self.show_targets(orig)?;
                }
                Ok(())
            },
            Err(err) => {
                warn!("rejected {}: {}", text, err);
                writeln!(self.output, "{}: {}", text, err)
            },
        }
    }

    fn promote(&mut self, prom_pc: Promotion) -> io::Result<()> {
        let promoted = self.game.promote(prom_pc).map(|_| ());
        match promoted {
            Ok(()) => self.after_move(),
            Err(err) => {
                warn!("rejected promotion to {}: {}", prom_pc, err);
                writeln!(self.output, "There is no pawn to promote.")
            },
        }
    }

    fn after_move(&mut self) -> io::Result<()> {
        if self.game.pending_promotion().is_none() {
            self.show_board()?;
        }

        if let Some(winner) = self.game.winner() {
            writeln!(self.output, "{:#} captures the king and wins.", winner)?;
            writeln!(self.output, "{}", self.game)?;
        }

        Ok(())
    }

    fn owns(&self, square: Square) -> bool {
        let state = self.game.state();
        state.board().piece_at(square).map_or(false, |piece| piece.color() == state.turn())
    }

    fn show_targets(&mut self, square: Square) -> io::Result<()> {
        let targets = self.game.valid_moves(square);

        if targets.is_empty() {
            writeln!(self.output, "No valid moves from {}.", square)
        } else {
            let targets: Vec<_> = targets.iter().map(|sq| sq.to_string()).collect();
            writeln!(self.output, "Valid moves from {}: {}", square, targets.join(" "))
        }
    }

    fn show_board(&mut self) -> io::Result<()> {
        let board = self.game.state().board().diagram(self.config.unicode);
        writeln!(self.output, "\n{}", board)?;

        for &color in &[Color::White, Color::Black] {
            let captured = self.game.captured(color);
            if !captured.is_empty() {
                let pieces: String = captured.iter()
                    .map(|&piece| if self.config.unicode { piece.glyph() } else { piece.to_char() })
                    .collect();
                writeln!(self.output, "Captured by {:#}: {}", color, pieces)?;
            }
        }

        writeln!(self.output)
    }

    fn prompt(&mut self) -> io::Result<()> {
        let turn = self.game.state().turn();

        match self.game.pending_promotion() {
            Some(square) => write!(self.output, "{:#}, promote on {} to (q, r, b, n): ", turn, square)?,
            None => write!(self.output, "{:#} to move: ", turn)?,
        }

        self.output.flush()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// ***************************************** UNIT TESTS ***************************************** //
////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use chess::PieceType;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn run(game: Game, input: &str) -> (Game, String) {
        let mut session = Session::new(game, Config::default(), input.as_bytes(), Vec::new());
        session.run().unwrap();
        let output = String::from_utf8(session.output().clone()).unwrap();
        (session.game().clone(), output)
    }

    #[test]
    fn parse_commands() {
        use Command::*;

        assert_eq!("e2e4".parse::<Command>(), Ok(Move("e2e4".parse().unwrap())));
        assert_eq!(" E7-E8=Q ".parse::<Command>(), Ok(Move("e7e8q".parse().unwrap())));
        assert_eq!("moves e2".parse::<Command>(), Ok(Moves(sq("e2"))));
        assert_eq!("MOVE g1".parse::<Command>(), Ok(Moves(sq("g1"))));
        assert_eq!("board".parse::<Command>(), Ok(Board));
        assert_eq!("history".parse::<Command>(), Ok(History));
        assert_eq!("?".parse::<Command>(), Ok(Help));
        assert_eq!("exit".parse::<Command>(), Ok(Quit));
        assert_eq!("b".parse::<Command>(), Ok(Promote(Promotion::ToBishop)));
        assert_eq!("N".parse::<Command>(), Ok(Promote(Promotion::ToKnight)));

        for s in &["", "k", "moves", "moves z9", "e2", "e2e9", "boards", "castle"] {
            assert_eq!(s.parse::<Command>(), Err(chess::Error::ParseError), "{}", s);
        }
    }

    #[test]
    fn display_commands() {
        let cmds = ["e7e8q", "q", "moves e2", "board", "history", "help", "quit"];
        for s in &cmds {
            assert_eq!(s.parse::<Command>().unwrap().to_string(), *s);
        }
    }

    #[test]
    fn players_alternate_until_quit() {
        let (game, output) = run(Game::new(), "e2e4\ne7e5\nhistory\nquit\ne2e4\n");

        assert_eq!(game.history().len(), 2);
        assert!(output.contains("1. e2-e4 e7-e5"));
        assert!(output.contains("White to move: "));
        assert!(output.contains("Black to move: "));
    }

    #[test]
    fn illegal_moves_are_reported_with_targets() {
        let (game, output) = run(Game::new(), "e2e5\nfoo\n");

        assert!(game.history().is_empty());
        assert!(output.contains("Illegal move: e2e5"));
        assert!(output.contains("Valid moves from e2: e4 e3"));
        assert!(output.contains("Unknown command: foo"));
    }

    #[test]
    fn capturing_the_king_ends_the_session() {
        let moves = "f2f3\ne7e5\ng2g4\nd8h4\na2a3\nh4e1\na3a4\n";
        let (game, output) = run(Game::new(), moves);

        assert_eq!(game.winner(), Some(Color::Black));
        assert_eq!(game.history().len(), 6);
        assert!(output.contains("Black captures the king and wins."));
        assert!(output.contains("Captured by Black: K"));
    }

    #[test]
    fn promotion_is_asked_for() {
        let state = "4k3/1P6/8/8/8/8/8/4K3 w - -".parse().unwrap();
        let (game, output) = run(Game::starting_at(state), "b7b8\ne1e2\nn\nboard\n");

        assert!(output.contains("White, promote on b8 to (q, r, b, n): "));
        assert!(output.contains("a pawn is waiting to be promoted"));
        assert_eq!(game.state().board().piece_at(sq("b8")).map(|pc| pc.kind()), Some(PieceType::Knight));
        assert_eq!(game.state().turn(), Color::Black);
    }

    #[test]
    fn promotion_can_be_given_inline() {
        let state = "4k3/1P6/8/8/8/8/8/4K3 w - -".parse().unwrap();
        let (game, output) = run(Game::starting_at(state), "b7b8r\nq\n");

        assert_eq!(game.state().board().piece_at(sq("b8")).map(|pc| pc.kind()), Some(PieceType::Rook));
        assert!(output.contains("There is no pawn to promote."));
    }

    #[test]
    fn promotion_suffix_needs_a_promoting_move() {
        let (game, output) = run(Game::new(), "e2e4q
");

        assert!(game.history().is_empty());
        assert!(output.contains("e2e4q: only a pawn reaching its last rank can be promoted"));
        assert!(!output.contains("Illegal move"));
    }

    #[test]
    fn promotion_onto_the_king_keeps_the_chosen_piece() {
        let state = "1k6/P7/8/8/8/8/8/4K3 w - -".parse().unwrap();
        let (game, _) = run(Game::starting_at(state), "a7b8n
");

        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.state().board().piece_at(sq("b8")).map(|pc| pc.kind()), Some(PieceType::Knight));
    }
}
