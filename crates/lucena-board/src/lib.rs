//! Board representation and game rules for the lucena engine.
//!
//! The search core consumes a small, copy-make board contract: query the
//! position, generate legal moves, and derive child positions without ever
//! mutating the parent. This crate realizes that contract on top of
//! [`shakmaty`], which supplies move generation, FEN parsing, attack
//! lookups, and Zobrist hashing.

mod board;
mod error;

pub use board::{Board, chebyshev_distance, color_index, mirror_square, move_to_uci, role_index};
pub use error::BoardError;

// The engine works directly with these shakmaty primitives.
pub use shakmaty::{Bitboard, Color, Move, MoveList, Role, Square, attacks};
