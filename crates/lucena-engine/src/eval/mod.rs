//! Position evaluation: tapered material + positional terms.

pub mod endgame;
pub mod king_safety;
pub mod material;
pub mod mobility;
pub mod pawns;
pub mod phase;
pub mod pieces;
pub mod pst;
pub mod score;

use lucena_board::{Board, Color};

use crate::search::negamax::{DRAW, MATE};
use endgame::{DRAW_DIVIDE_SCALE, is_drawish};
use king_safety::evaluate_king_safety;
use material::material;
use mobility::evaluate_mobility;
use pawns::evaluate_pawns;
use phase::game_phase;
use pieces::evaluate_pieces;
use pst::pst_value;
use score::Score;

/// Evaluate the position in centipawns from the side to move's perspective.
///
/// Terminal positions are handled first: with no legal moves the result is
/// `-MATE` in check (the search folds in the ply adjustment) and `DRAW`
/// otherwise, so the evaluator is safe to call on a finished game. Everything
/// else is the tapered sum of material, piece-square placement, pawn
/// structure, mobility, king safety, and piece-specific terms, collapsed
/// toward zero in recognizably drawish minor-piece endings.
pub fn evaluate(board: &Board) -> i32 {
    if board.legal_moves().is_empty() {
        return if board.in_check() { -MATE } else { DRAW };
    }

    let phase = game_phase(board);

    let mut total = material(board);
    total += placement(board);
    total += evaluate_pawns(board);
    total += evaluate_mobility(board);
    total += evaluate_king_safety(board, phase);
    total += evaluate_pieces(board);

    let mut score = total.taper(phase);

    if is_drawish(board) {
        score /= DRAW_DIVIDE_SCALE;
    }

    match board.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}

/// Sum piece-square values over every piece on the board, White-relative.
fn placement(board: &Board) -> Score {
    let mut score = Score::ZERO;
    for sq in board.occupied() {
        let Some(role) = board.piece_on(sq) else {
            continue;
        };
        let Some(color) = board.color_on(sq) else {
            continue;
        };
        match color {
            Color::White => score += pst_value(role, sq, color),
            Color::Black => score -= pst_value(role, sq, color),
        }
    }
    score
}
