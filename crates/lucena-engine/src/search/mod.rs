//! Search driver: opening book probe, iterative deepening, move selection.

pub mod control;
pub mod heuristics;
pub mod negamax;
pub mod ordering;
pub mod see;
pub mod tt;

use std::time::Duration;

use tracing::{debug, info, warn};

use lucena_board::{Board, Move, move_to_uci};

use crate::book::{NullBook, OpeningBook};
use crate::config::EngineConfig;
use control::SearchControl;
use negamax::{DRAW, INF, MATE, SearchContext, negamax};
use ordering::MovePicker;
use tt::{TranspositionTable, TtStats};

/// Outcome of one search request.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, or `None` when the root has no legal move.
    pub best_move: Option<Move>,
    /// Score of the last completed iteration, side-to-move relative.
    pub score: i32,
    /// Deepest fully completed iteration (0 for book and forced moves).
    pub depth: i32,
    /// Nodes visited.
    pub nodes: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// The engine: a transposition table, an optional opening book, and the
/// iterative-deepening driver over [`negamax`].
///
/// One engine serves one caller at a time; concurrent searches need their
/// own instances.
pub struct Engine {
    config: EngineConfig,
    tt: TranspositionTable,
    book: Box<dyn OpeningBook>,
}

impl Engine {
    /// Engine with shipping defaults.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.tt_size_mb),
            book: Box::new(NullBook),
            config,
        }
    }

    /// Engine with default configuration except for the table size.
    pub fn with_tt_size(tt_size_mb: usize) -> Self {
        Self::with_config(EngineConfig {
            tt_size_mb,
            ..EngineConfig::default()
        })
    }

    /// Install an opening book (and enable its use).
    pub fn set_opening_book(&mut self, book: Box<dyn OpeningBook>) {
        self.book = book;
        self.config.use_opening_book = true;
    }

    /// Toggle book probing without replacing the book.
    pub fn enable_opening_book(&mut self, enabled: bool) {
        self.config.use_opening_book = enabled;
    }

    /// Cap the fullmove number at which the book is still consulted.
    pub fn set_max_book_moves(&mut self, max_moves: u32) {
        self.config.max_book_moves = max_moves;
    }

    /// Usage statistics of the transposition table.
    pub fn tt_stats(&self) -> TtStats {
        self.tt.stats()
    }

    /// The best move for this position, or `None` when there is none
    /// (the caller distinguishes mate from stalemate via the board).
    pub fn best_move(&mut self, board: &Board) -> Option<Move> {
        self.search(board).best_move
    }

    /// Run a full search for the position.
    pub fn search(&mut self, board: &Board) -> SearchResult {
        // Book first: a recorded move skips the search entirely, but only
        // after validating it against the legal moves.
        if self.config.use_opening_book
            && board.fullmove_number() <= self.config.max_book_moves
            && let Some(book_move) = self.book.lookup(board.hash())
        {
            if board.legal_moves().contains(&book_move) {
                debug!(uci = %move_to_uci(&book_move), "playing book move");
                return SearchResult {
                    best_move: Some(book_move),
                    score: DRAW,
                    depth: 0,
                    nodes: 0,
                    elapsed: Duration::ZERO,
                };
            }
            warn!(uci = %move_to_uci(&book_move), "book returned an illegal move, searching");
        }

        let mut control = SearchControl::with_limit(self.config.time_limit);
        self.tt.increment_age();
        let mut ctx = SearchContext::new(&mut self.tt, &mut control);

        let moves = board.legal_moves();
        if moves.is_empty() {
            let score = if board.in_check() { -MATE } else { DRAW };
            return SearchResult {
                best_move: None,
                score,
                depth: 0,
                nodes: 0,
                elapsed: ctx.control.elapsed(),
            };
        }
        if moves.len() == 1 {
            return SearchResult {
                best_move: Some(moves[0].clone()),
                score: DRAW,
                depth: 0,
                nodes: 0,
                elapsed: ctx.control.elapsed(),
            };
        }

        // Root ordering happens once; the deepening loop walks the same list
        // every iteration.
        let mut root_picker = MovePicker::new(board, &moves, &ctx.killers, &ctx.history, 0);
        let mut root_moves = Vec::with_capacity(moves.len());
        while let Some((mv, _)) = root_picker.pick_next() {
            root_moves.push(mv);
        }

        let mut best_move: Option<Move> = None;
        let mut best_score = DRAW;
        let mut completed_depth = 0;

        let max_depth = self.config.max_depth.clamp(1, negamax::MAX_DEPTH);
        for depth in 1..=max_depth {
            let mut alpha = -INF;
            let beta = INF;
            let mut current_best: Option<Move> = None;

            for mv in &root_moves {
                let child = board.make_move(mv);
                let score = -negamax(&child, depth - 1, 1, -beta, -alpha, &mut ctx);
                if ctx.control.stopped() {
                    break;
                }
                if score > alpha {
                    alpha = score;
                    current_best = Some(mv.clone());
                }
            }

            // An aborted iteration searched only part of the move list; its
            // partial best must not displace the last completed one.
            if !ctx.control.stopped()
                && let Some(mv) = current_best
            {
                debug!(
                    depth,
                    score = alpha,
                    nodes = ctx.nodes,
                    elapsed_ms = ctx.control.elapsed().as_millis() as u64,
                    uci = %move_to_uci(&mv),
                    "completed iteration"
                );
                best_move = Some(mv);
                best_score = alpha;
                completed_depth = depth;
            }

            if ctx.control.check_deadline() {
                break;
            }
        }

        // Not even the first iteration finished: fall back to any legal
        // move rather than resigning on the clock.
        let best_move = best_move.or_else(|| {
            let pick = fastrand::usize(..root_moves.len());
            Some(root_moves[pick].clone())
        });

        let nodes = ctx.nodes;
        let elapsed = ctx.control.elapsed();
        info!(
            depth = completed_depth,
            score = best_score,
            nodes,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        SearchResult {
            best_move,
            score: best_score,
            depth: completed_depth,
            nodes,
            elapsed,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("tt", &self.tt)
            .finish()
    }
}
