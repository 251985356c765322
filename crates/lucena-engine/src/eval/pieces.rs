//! Piece-specific terms: rook placement, the bishop pair, knights in thin
//! endgames, and knight outposts.

use lucena_board::{Bitboard, Board, Color, Role, attacks, color_index};

use crate::eval::pawns::{ADJACENT_FILES, PASSED_MASKS};
use crate::eval::score::{S, Score};

/// Rook on a file with no pawns at all.
const ROOK_OPEN_FILE: Score = S(25, 15);

/// Rook on a file with no friendly pawns (enemy pawns remain).
const ROOK_SEMI_OPEN_FILE: Score = S(15, 10);

/// Rook on the 7th rank (2nd from the enemy's side).
const ROOK_ON_SEVENTH: Score = S(20, 30);

/// Owning both bishops.
const BISHOP_PAIR: Score = S(30, 35);

/// Per-knight penalty once the side is down to two pawns or fewer —
/// knights cannot shepherd a bare endgame the way bishops can.
const KNIGHT_FEW_PAWNS: Score = S(0, -15);

/// Knight on a supported outpost no enemy pawn can ever evict.
const KNIGHT_OUTPOST: Score = S(20, 15);

const FILE_A: u64 = 0x0101_0101_0101_0101;

/// Evaluate piece placement from White's perspective.
pub fn evaluate_pieces(board: &Board) -> Score {
    evaluate_side(board, Color::White) - evaluate_side(board, Color::Black)
}

fn evaluate_side(board: &Board, color: Color) -> Score {
    let friendly = board.side(color);
    let all_pawns = board.pieces(Role::Pawn);
    let friendly_pawns = all_pawns & friendly;
    let enemy_pawns = all_pawns & board.side(!color);

    let mut score = Score::ZERO;

    // Rooks: open and semi-open files, seventh rank.
    let seventh = match color {
        Color::White => 6,
        Color::Black => 1,
    };
    for sq in board.pieces(Role::Rook) & friendly {
        let file_mask = Bitboard(FILE_A << (sq.file() as usize));
        if (file_mask & all_pawns).is_empty() {
            score += ROOK_OPEN_FILE;
        } else if (file_mask & friendly_pawns).is_empty() {
            score += ROOK_SEMI_OPEN_FILE;
        }
        if sq.rank() as usize == seventh {
            score += ROOK_ON_SEVENTH;
        }
    }

    // Bishop pair.
    if (board.pieces(Role::Bishop) & friendly).count() >= 2 {
        score += BISHOP_PAIR;
    }

    let knights = board.pieces(Role::Knight) & friendly;

    // Knights lose value with almost no pawns left to play around.
    if friendly_pawns.count() <= 2 {
        score += KNIGHT_FEW_PAWNS * knights.count() as i16;
    }

    // Knight outposts: advanced, pawn-supported, and on a square no enemy
    // pawn can advance to attack.
    let outpost_ranks: std::ops::RangeInclusive<usize> = match color {
        Color::White => 4..=5,
        Color::Black => 2..=3,
    };
    for sq in knights {
        if !outpost_ranks.contains(&(sq.rank() as usize)) {
            continue;
        }
        let supported = !(attacks::pawn_attacks(!color, sq) & friendly_pawns).is_empty();
        if !supported {
            continue;
        }
        let attackable_span =
            PASSED_MASKS[color_index(color)][sq as usize] & ADJACENT_FILES[sq.file() as usize];
        if attackable_span & enemy_pawns.0 == 0 {
            score += KNIGHT_OUTPOST;
        }
    }

    score
}
