//! Recursive negamax alpha-beta search with quiescence.

use lucena_board::{Board, Color, MoveList, Role};

use crate::eval::evaluate;
use crate::search::control::SearchControl;
use crate::search::heuristics::{HistoryTable, KillerTable};
use crate::search::ordering::MovePicker;
use crate::search::see::is_good_capture;
use crate::search::tt::{Bound, TranspositionTable};

/// Unreachable score bound.
pub const INF: i32 = 32_000;

/// Base checkmate score; actual mate scores are `MATE - ply`.
pub const MATE: i32 = 30_000;

/// Score of a drawn position.
pub const DRAW: i32 = 0;

/// Hard ceiling on iterative-deepening depth.
pub const MAX_DEPTH: i32 = 64;

/// Ply ceiling for the search stack (depth plus extensions plus quiescence).
pub const MAX_PLY: usize = 128;

/// Ordering bonus for captures SEE approves of.
pub(crate) const GOOD_CAPTURE_WEIGHT: i32 = 5_000;

/// Delta-pruning margin in quiescence.
pub(crate) const DELTA: i32 = 200;

/// Quiescence recursion ceiling, counted from the quiescence entry point.
const MAX_QUIESCENCE_PLY: usize = 10;

/// Static evaluations at or beyond this magnitude disable null-move logic.
const EVAL_SANITY_LIMIT: i32 = 9_000;

/// Null-move pruning applies from this depth.
const NULL_MOVE_MIN_DEPTH: i32 = 3;

/// Static null move: fail high when eval beats beta by this much per depth.
const STATIC_NULL_MARGIN: i32 = 120;

/// Null-move cutoffs at or beyond this depth get a verification search when
/// the eval sits near beta.
const NULL_VERIFY_MIN_DEPTH: i32 = 5;
const NULL_VERIFY_WINDOW: i32 = 200;
const NULL_VERIFY_MOVES: usize = 5;

/// Late-move pruning: at depth <= 3, quiet moves past `3 + 3 * depth` are
/// skipped outright.
const LMP_MAX_DEPTH: i32 = 3;
const LMP_BASE: usize = 3;
const LMP_PER_DEPTH: usize = 3;

/// Futility pruning margins at depth <= 3.
const FUTILITY_MAX_DEPTH: i32 = 3;
const FUTILITY_BASE: i32 = 125;
const FUTILITY_PER_DEPTH: i32 = 100;
const FUTILITY_NOT_IMPROVING: i32 = 125;

/// Late-move reductions: from this depth and move index on.
const LMR_MIN_DEPTH: i32 = 3;
const LMR_MIN_INDEX: usize = 4;

/// SEE threshold for keeping a capture in quiescence.
const QUIESCENCE_SEE_THRESHOLD: i32 = -20;

/// Mutable state threaded through one search request.
pub(crate) struct SearchContext<'a> {
    pub nodes: u64,
    pub tt: &'a mut TranspositionTable,
    pub control: &'a mut SearchControl,
    pub killers: KillerTable,
    pub history: HistoryTable,
    /// Static evaluations by ply, for the "improving" test.
    pub eval_stack: [i32; MAX_PLY],
}

impl<'a> SearchContext<'a> {
    pub fn new(tt: &'a mut TranspositionTable, control: &'a mut SearchControl) -> Self {
        Self {
            nodes: 0,
            tt,
            control,
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            eval_stack: [0; MAX_PLY],
        }
    }
}

/// Negamax alpha-beta search.
///
/// Returns the score of `board` from the side to move's perspective,
/// searched to `depth` plies plus quiescence. `ply` is the distance from the
/// root and feeds mate scores; the window is `(alpha, beta)`.
pub(crate) fn negamax(
    board: &Board,
    depth: i32,
    ply: usize,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext,
) -> i32 {
    ctx.nodes += 1;
    if ctx.control.time_is_up(ctx.nodes) {
        return alpha;
    }
    if ply >= MAX_PLY {
        return evaluate(board);
    }

    // Mate-distance pruning: no line from here can beat a mate already
    // found closer to the root.
    alpha = alpha.max(-MATE + ply as i32);
    beta = beta.min(MATE - ply as i32);
    if alpha >= beta {
        return alpha;
    }

    if board.is_insufficient_material() || board.is_repetition(2) || board.is_halfmove_draw() {
        return DRAW;
    }

    let in_check = board.in_check();
    // Check extension: never drop an in-check node straight into quiescence.
    let depth = if in_check { depth + 1 } else { depth };

    if depth <= 0 {
        return quiescence(board, alpha, beta, ply, 0, ctx);
    }

    let hash = board.hash();
    if let Some(score) = ctx.tt.lookup(hash, depth as i16, alpha, beta) {
        return score;
    }

    let moves = board.legal_moves();
    if moves.is_empty() {
        return if in_check { -MATE + ply as i32 } else { DRAW };
    }

    let static_eval = evaluate(board);
    ctx.eval_stack[ply] = static_eval;
    let improving = !in_check && ply >= 2 && static_eval > ctx.eval_stack[ply - 2];

    // Null-move block: both the static margin check and the reduced search
    // hand the opponent a free tempo, which is only sound when we are not in
    // check, zugzwang is unlikely, and the eval is sane.
    let side = board.side_to_move();
    if !in_check
        && depth >= NULL_MOVE_MIN_DEPTH
        && has_non_pawn_material(board, side)
        && !is_possible_zugzwang(board, side)
        && static_eval.abs() < EVAL_SANITY_LIMIT
    {
        if static_eval >= beta + STATIC_NULL_MARGIN * depth {
            return beta;
        }

        if let Some(null_board) = board.make_null_move() {
            let reduction = null_move_reduction(board, depth, static_eval);
            let score = -negamax(
                &null_board,
                depth - 1 - reduction,
                ply + 1,
                -beta,
                -beta + 1,
                ctx,
            );
            if ctx.control.stopped() {
                return alpha;
            }
            if score >= beta {
                let near_beta = (static_eval - beta).abs() <= NULL_VERIFY_WINDOW;
                let verified = if depth >= NULL_VERIFY_MIN_DEPTH && near_beta {
                    verify_null_cutoff(board, &moves, depth, ply, beta, ctx)
                } else {
                    true
                };
                if verified {
                    return beta;
                }
            }
        }
    }

    let mut picker = MovePicker::new(board, &moves, &ctx.killers, &ctx.history, ply);

    let original_alpha = alpha;
    let mut best_score = -INF;
    let mut index = 0usize;
    let mut searched = 0usize;

    while let Some((mv, _)) = picker.pick_next() {
        let is_capture = board.is_capture(&mv);
        let is_promotion = mv.is_promotion();
        let quiet = !is_capture && !is_promotion;

        // Late move pruning: shallow, late, quiet, and not escaping check.
        if depth <= LMP_MAX_DEPTH
            && index >= LMP_BASE + LMP_PER_DEPTH * depth as usize
            && quiet
            && !in_check
        {
            index += 1;
            continue;
        }

        let child = board.make_move(&mv);
        let gives_check = child.in_check();

        // Futility pruning: a quiet move cannot lift a hopeless static eval
        // over alpha at shallow depth.
        if depth <= FUTILITY_MAX_DEPTH && quiet && !gives_check && !in_check {
            let mut margin = FUTILITY_BASE + FUTILITY_PER_DEPTH * depth;
            if !improving {
                margin += FUTILITY_NOT_IMPROVING;
            }
            if static_eval + margin <= alpha {
                index += 1;
                continue;
            }
        }

        // Late move reduction.
        let mut new_depth = depth - 1;
        if depth >= LMR_MIN_DEPTH && index >= LMR_MIN_INDEX && quiet && !gives_check {
            let mut reduction = 1 + depth / 6 + index as i32 / 6;
            if improving {
                reduction -= 1;
            }
            let reduction = reduction.clamp(1, depth - 1);
            new_depth = depth - reduction;
        }
        let reduced = new_depth < depth - 1;

        // Principal variation search: first move gets the full window, the
        // rest prove themselves against a null window first.
        let score = if index == 0 {
            -negamax(&child, depth - 1, ply + 1, -beta, -alpha, ctx)
        } else {
            let mut score = -negamax(&child, new_depth, ply + 1, -alpha - 1, -alpha, ctx);
            if reduced && score > alpha && !ctx.control.stopped() {
                score = -negamax(&child, depth - 1, ply + 1, -alpha - 1, -alpha, ctx);
            }
            if score > alpha && score < beta && !ctx.control.stopped() {
                score = -negamax(&child, depth - 1, ply + 1, -beta, -alpha, ctx);
            }
            score
        };

        if ctx.control.stopped() {
            return alpha;
        }

        searched += 1;
        best_score = best_score.max(score);

        if score > alpha {
            alpha = score;
            if alpha >= beta {
                if quiet {
                    ctx.killers.put(&mv, ply);
                    ctx.history.update(&mv, depth, side);
                }
                ctx.tt.store(hash, beta, Bound::Lower, depth as i16);
                return beta;
            }
        }

        index += 1;
    }

    // Every move fell to a pruning rule: each skip proved its line cannot
    // reach alpha, so fail low without polluting the table.
    if searched == 0 {
        return alpha;
    }

    let bound = if alpha > original_alpha {
        Bound::Exact
    } else {
        Bound::Upper
    };
    ctx.tt.store(hash, best_score, bound, depth as i16);
    best_score
}

/// Dynamic null-move reduction: deeper searches and larger static margins
/// reduce more, endgames less.
fn null_move_reduction(board: &Board, depth: i32, static_eval: i32) -> i32 {
    let mut reduction = 3 + depth / 4 + (static_eval.abs() / 200).min(3);
    if is_endgame(board) {
        reduction -= 1;
    }
    reduction.clamp(2, (depth - 1).min(4))
}

/// Confirm a null-move fail-high by trying the best few real moves at half
/// depth. Any of them beating beta vindicates the cutoff.
fn verify_null_cutoff(
    board: &Board,
    moves: &MoveList,
    depth: i32,
    ply: usize,
    beta: i32,
    ctx: &mut SearchContext,
) -> bool {
    let mut picker = MovePicker::new(board, moves, &ctx.killers, &ctx.history, ply);
    let mut tried = 0usize;

    while let Some((mv, _)) = picker.pick_next() {
        if tried >= NULL_VERIFY_MOVES {
            break;
        }
        tried += 1;

        let child = board.make_move(&mv);
        let score = -negamax(&child, depth / 2, ply + 1, -beta, -beta + 1, ctx);
        if ctx.control.stopped() {
            return false;
        }
        if score >= beta {
            return true;
        }
    }

    false
}

/// Quiescence search: play out captures (and every evasion while in check)
/// so the static evaluation is only consulted in quiet positions.
///
/// `ply` continues the search ply for mate scoring; `qply` counts quiescence
/// recursion and enforces [`MAX_QUIESCENCE_PLY`].
pub(crate) fn quiescence(
    board: &Board,
    mut alpha: i32,
    mut beta: i32,
    ply: usize,
    qply: usize,
    ctx: &mut SearchContext,
) -> i32 {
    ctx.nodes += 1;
    if ctx.control.time_is_up(ctx.nodes) {
        return alpha;
    }
    if ply >= MAX_PLY {
        return evaluate(board);
    }

    alpha = alpha.max(-MATE + ply as i32);
    beta = beta.min(MATE - ply as i32);
    if alpha >= beta {
        return alpha;
    }

    if board.is_insufficient_material() || board.is_repetition(2) || board.is_halfmove_draw() {
        return DRAW;
    }

    if qply >= MAX_QUIESCENCE_PLY {
        return evaluate(board);
    }

    let hash = board.hash();
    if let Some(score) = ctx.tt.lookup(hash, 0, alpha, beta) {
        return score;
    }

    let in_check = board.in_check();

    let mut stand_pat = 0;
    if !in_check {
        stand_pat = evaluate(board);
        if stand_pat >= beta {
            ctx.tt.store(hash, beta, Bound::Lower, 0);
            return beta;
        }
        alpha = alpha.max(stand_pat);
    }

    let all_moves = board.legal_moves();
    if all_moves.is_empty() {
        return if in_check { -MATE + ply as i32 } else { DRAW };
    }

    // In check every evasion is searched; otherwise only forcing moves.
    let moves: MoveList = if in_check {
        all_moves
    } else {
        all_moves
            .iter()
            .filter(|mv| board.is_capture(mv) || mv.is_promotion())
            .cloned()
            .collect()
    };

    let mut picker = MovePicker::new(board, &moves, &ctx.killers, &ctx.history, ply);

    while let Some((mv, move_score)) = picker.pick_next() {
        if !in_check {
            // Delta pruning: even capturing this victim plus a margin
            // cannot reach alpha.
            if stand_pat + move_score + DELTA <= alpha {
                continue;
            }
            if !is_good_capture(board, &mv, QUIESCENCE_SEE_THRESHOLD) {
                continue;
            }
        }

        let child = board.make_move(&mv);
        let score = -quiescence(&child, -beta, -alpha, ply + 1, qply + 1, ctx);
        if ctx.control.stopped() {
            return alpha;
        }

        if score >= beta {
            ctx.tt.store(hash, beta, Bound::Lower, 0);
            return beta;
        }
        alpha = alpha.max(score);
    }

    ctx.tt.store(hash, alpha, Bound::Upper, 0);
    alpha
}

/// Whether `side` still owns a knight, bishop, rook, or queen.
pub(crate) fn has_non_pawn_material(board: &Board, side: Color) -> bool {
    let pieces = board.pieces(Role::Knight)
        | board.pieces(Role::Bishop)
        | board.pieces(Role::Rook)
        | board.pieces(Role::Queen);
    !(pieces & board.side(side)).is_empty()
}

/// A material signature where null-move reductions should back off: queens
/// are gone, or both armies are down to a couple of pieces.
pub(crate) fn is_endgame(board: &Board) -> bool {
    if board.pieces(Role::Queen).is_empty() {
        return true;
    }
    let pieces = board.pieces(Role::Knight)
        | board.pieces(Role::Bishop)
        | board.pieces(Role::Rook)
        | board.pieces(Role::Queen);
    (pieces & board.side(Color::White)).count() <= 2 && (pieces & board.side(Color::Black)).count() <= 2
}

/// Positions where passing the move might be the only losing option: no
/// heavy pieces and at most five men besides the king.
pub(crate) fn is_possible_zugzwang(board: &Board, side: Color) -> bool {
    let side_bb = board.side(side);
    let heavy = (board.pieces(Role::Rook) | board.pieces(Role::Queen)) & side_bb;
    heavy.is_empty() && side_bb.count() - 1 <= 5
}
