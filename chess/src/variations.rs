//! Module for counting and printing the number of variations from a given position
//!
//! A variation ends early when a king is captured. Pawns reaching their last rank are promoted
//! to queens.
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

/// Print the number of variations of the given `depth` for each valid move from `state`
pub fn print(state: &GameState, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;

    for (orig, dest) in state.moves() {
        if let Some(next) = successor(state, orig, dest) {
            let count = if ends_game(&next) { 1 } else { count(&next, depth - 1) };
            total += count;
            if let Some(mv) = next.last_move() {
                println!("\t{:7}\t{:12}\t{}", mv, count, next);
            }
        }
    }

    total
}

/// Count the number of variations of the given `depth` from `state`
pub fn count(state: &GameState, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;

    for (orig, dest) in state.moves() {
        if let Some(next) = successor(state, orig, dest) {
            total += if ends_game(&next) { 1 } else { count(&next, depth - 1) };
        }
    }

    total
}

fn successor(state: &GameState, orig: Square, dest: Square) -> Option<GameState> {
    let next = state.advance(state.apply_move(orig, dest).ok()?);

    if next.last_move().map_or(false, |mv| mv.is_promotion()) {
        Some(next.promoted(dest, Promotion::ToQueen))
    } else {
        Some(next)
    }
}

fn ends_game(state: &GameState) -> bool {
    state.last_move().map_or(false, |mv| mv.captures_king())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_counts_from_the_start() {
        let state = GameState::new();
        assert_eq!(count(&state, 0), 1);
        assert_eq!(count(&state, 1), 20);
        assert_eq!(count(&state, 2), 400);
    }

    #[test]
    fn king_capture_is_a_leaf() -> Result<()> {
        let state: GameState = "k7/8/8/8/8/8/8/R6K w - -".parse()?;

        let rook_moves = 6 + 1 + 6;
        let king_moves = 3;
        assert_eq!(count(&state, 1), rook_moves + king_moves);

        // black has three king moves after everything except Rxa8
        assert_eq!(count(&state, 2), (rook_moves + king_moves - 1) * 3 + 1);
        Ok(())
    }

    #[test]
    fn promotions_count_once() -> Result<()> {
        let state: GameState = "8/P7/8/8/8/8/8/k6K w - -".parse()?;
        assert_eq!(count(&state, 1), 1 + 3);
        Ok(())
    }
}
