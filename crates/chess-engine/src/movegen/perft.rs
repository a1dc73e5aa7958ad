//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions are generated to a queen only, so reference counts from
//! positions where pawns promote do not apply.

use super::legal::legal_moves;
use crate::Position;

/// Counts the number of leaf nodes at the given depth for the side to move.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position, position.side_to_move());

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&position.apply(*m), depth - 1))
        .sum()
}

/// Perft with divide: node counts below each root move, sorted by move text.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = legal_moves(position, position.side_to_move());
    let mut results: Vec<(String, u64)> = moves
        .iter()
        .map(|m| {
            let nodes = if depth > 1 {
                perft(&position.apply(*m), depth - 1)
            } else {
                1
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
