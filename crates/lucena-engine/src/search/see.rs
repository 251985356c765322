//! Static Exchange Evaluation.
//!
//! Answers "does this capture win material once every sensible recapture is
//! played out?" by simulating the exchange on the destination square with
//! each side always using its least valuable attacker. Sliding attackers are
//! recomputed as pieces come off the occupancy, so X-ray batteries join the
//! exchange naturally.

use lucena_board::{Bitboard, Board, Color, Move, Role, Square, role_index};

use crate::eval::material::PIECE_VALUES;

/// Longest exchange chain worth simulating (32 captures on one square is
/// already beyond any legal position).
const MAX_EXCHANGE: usize = 32;

#[inline]
fn value_of(role: Role) -> i32 {
    PIECE_VALUES[role_index(role)]
}

/// The square of the pawn captured en passant: one rank behind the
/// destination from the mover's point of view.
fn en_passant_victim(board: &Board, mv: &Move) -> Option<Square> {
    let delta = match board.side_to_move() {
        Color::White => -8,
        Color::Black => 8,
    };
    mv.to().offset(delta)
}

/// The least valuable piece in `attackers`, with its kind.
fn least_valuable_attacker(board: &Board, attackers: Bitboard) -> Option<(Square, Role)> {
    for role in [Role::Pawn, Role::Knight, Role::Bishop, Role::Rook, Role::Queen, Role::King] {
        if let Some(sq) = (attackers & board.pieces(role)).first() {
            return Some((sq, role));
        }
    }
    None
}

/// Decide whether the exchange started by `mv` gains at least `threshold`
/// centipawns for the side to move. The board is not modified.
///
/// Early exits: a victim already below the threshold fails immediately, and
/// a capture that stays ahead even after losing the capturing piece succeeds
/// without simulating. Otherwise sides alternate least-valuable recaptures
/// until one of them prefers to stand pat or runs out of attackers; a king
/// "recapture" into remaining enemy attackers is illegal and ends the
/// exchange for that side instead.
pub fn is_good_capture(board: &Board, mv: &Move, threshold: i32) -> bool {
    let to = mv.to();
    let Some(from) = mv.from() else {
        return false;
    };
    let mut occ = board.occupied().without(from);

    let mut gain = if mv.is_en_passant() {
        if let Some(victim_sq) = en_passant_victim(board, mv) {
            occ = occ.without(victim_sq);
        }
        value_of(Role::Pawn) - threshold
    } else {
        match mv.capture() {
            Some(victim) => value_of(victim) - threshold,
            None => -threshold,
        }
    };

    if gain < 0 {
        return false;
    }

    let attacker = board.piece_on(from).unwrap_or(Role::Pawn);
    gain -= value_of(attacker);
    if gain >= 0 {
        return true;
    }

    let mover = board.side_to_move();
    let mut side = !mover;

    loop {
        let all = board.attackers(to, occ) & occ;
        let recapturers = all & board.side(side);
        if recapturers.is_empty() {
            break;
        }

        side = !side;
        let Some((sq, role)) = least_valuable_attacker(board, recapturers) else {
            break;
        };

        gain = -gain - 1 - value_of(role);
        if gain >= 0 {
            if role == Role::King && !(all & board.side(side)).is_empty() {
                // The king cannot legally step into the remaining attackers,
                // so the side that wanted the recapture gives up instead.
                side = !side;
            }
            break;
        }

        occ = occ.without(sq);
    }

    side != mover
}

/// Full static exchange value of `mv` in centipawns for the side to move.
///
/// Simulates the complete forced exchange, then walks the gain chain
/// backward letting each side stand pat when continuing would lose material.
pub fn see(board: &Board, mv: &Move) -> i32 {
    let to = mv.to();
    let Some(from) = mv.from() else {
        return 0;
    };
    let mut occ = board.occupied().without(from);

    let mut gain = [0i32; MAX_EXCHANGE];
    gain[0] = if mv.is_en_passant() {
        if let Some(victim_sq) = en_passant_victim(board, mv) {
            occ = occ.without(victim_sq);
        }
        value_of(Role::Pawn)
    } else {
        mv.capture().map(value_of).unwrap_or(0)
    };

    // The piece now standing on the destination, next to be captured.
    let mut next_victim = value_of(board.piece_on(from).unwrap_or(Role::Pawn));
    let mut side = !board.side_to_move();
    let mut depth = 0usize;

    loop {
        let all = board.attackers(to, occ) & occ;
        let recapturers = all & board.side(side);
        let Some((sq, role)) = least_valuable_attacker(board, recapturers) else {
            break;
        };

        depth += 1;
        if depth >= MAX_EXCHANGE {
            break;
        }

        gain[depth] = next_victim - gain[depth - 1];
        next_victim = value_of(role);
        occ = occ.without(sq);
        side = !side;
    }

    // Backward minimax: each side only recaptures when it profits.
    while depth > 0 {
        depth -= 1;
        gain[depth] = -((-gain[depth]).max(gain[depth + 1]));
    }

    gain[0]
}
