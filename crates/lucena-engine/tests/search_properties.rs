//! End-to-end search properties on full positions.

use std::time::Duration;

use lucena_board::{Board, move_to_uci};
use lucena_engine::{Engine, EngineConfig};

const MATE: i32 = 30_000;

fn parse(fen: &str) -> Board {
    fen.parse().unwrap()
}

fn fixed_depth_engine(depth: i32) -> Engine {
    Engine::with_config(EngineConfig {
        tt_size_mb: 8,
        ..EngineConfig::fixed_depth(depth)
    })
}

#[test]
fn mate_in_one_back_rank() {
    let board = parse("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
    let result = fixed_depth_engine(3).search(&board);
    assert_eq!(move_to_uci(&result.best_move.unwrap()), "a1a8");
    assert!(
        result.score >= MATE - 2,
        "mate-in-one score expected, got {}",
        result.score
    );
}

#[test]
fn stalemate_trap_is_avoided() {
    let board = parse("7k/8/6Q1/8/8/8/8/7K w - - 0 1");
    let result = fixed_depth_engine(5).search(&board);
    let after = board.make_move(&result.best_move.unwrap());
    assert!(
        after.is_checkmate() || !after.legal_moves().is_empty(),
        "the defender must not be stalemated"
    );
}

#[test]
fn forced_recapture_via_see() {
    // exd5 trades into an insufficient-material draw, the best White has.
    let board = parse("4k3/8/4n3/3p4/4P3/8/8/4K3 w - - 0 1");
    let result = fixed_depth_engine(4).search(&board);
    assert_eq!(move_to_uci(&result.best_move.unwrap()), "e4d5");
}

#[test]
fn zugzwang_pawn_endgame_stays_sane() {
    // No non-pawn material: null-move pruning is disabled by its own gate,
    // and the search must not score the position as lost outright.
    let board = parse("8/8/8/4k3/4p3/4K3/8/8 w - - 0 1");
    let result = fixed_depth_engine(6).search(&board);
    let mv = result.best_move.expect("white has king moves");
    assert!(board.legal_moves().contains(&mv));
    assert!(
        result.score.abs() < MATE - 100,
        "no forced mate exists here, got {}",
        result.score
    );
}

#[test]
fn fixed_depth_search_is_deterministic() {
    let board = Board::starting_position();

    let first = fixed_depth_engine(6).search(&board);
    let second = fixed_depth_engine(6).search(&board);

    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.nodes, second.nodes, "node counts must replay exactly");
    assert_eq!(first.score, second.score);
}

#[test]
fn threefold_line_scores_as_draw() {
    // Shuffle knights until the start position stands on its third
    // occurrence; any further repetition inside the search is a draw by the
    // repetition contract, and the search result must stay bounded.
    let mut board = Board::starting_position();
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        let mv = board.find_uci_move(uci).unwrap();
        board = board.make_move(&mv);
    }
    assert!(board.is_repetition(2));

    let result = fixed_depth_engine(4).search(&board);
    let mv = result.best_move.expect("plenty of legal moves");
    assert!(board.legal_moves().contains(&mv));
    assert!(
        result.score.abs() < 200,
        "a balanced shuffle should stay near the draw score, got {}",
        result.score
    );
}

#[test]
fn returned_moves_are_always_legal() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
    ];
    for fen in fens {
        let board = parse(fen);
        let result = fixed_depth_engine(3).search(&board);
        let mv = result.best_move.unwrap_or_else(|| panic!("no move for {fen}"));
        assert!(
            board.legal_moves().contains(&mv),
            "illegal move {} returned for {fen}",
            move_to_uci(&mv)
        );
        assert!(result.score.abs() <= MATE, "score out of bounds for {fen}");
    }
}

#[test]
fn board_is_bitwise_restored_after_search() {
    let fens = [
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1",
    ];
    for fen in fens {
        let board = parse(fen);
        let fen_before = board.fen();
        let hash_before = board.hash();
        let _ = fixed_depth_engine(4).search(&board);
        assert_eq!(board.fen(), fen_before, "FEN drifted for {fen}");
        assert_eq!(board.hash(), hash_before, "hash drifted for {fen}");
    }
}

#[test]
fn zero_time_limit_still_produces_a_move() {
    let board = parse("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");
    let mut engine = Engine::with_config(EngineConfig {
        time_limit: Duration::ZERO,
        tt_size_mb: 8,
        ..EngineConfig::default()
    });
    let result = engine.search(&board);
    let mv = result.best_move.expect("fallback must trigger");
    assert!(board.legal_moves().contains(&mv));
}

#[test]
fn tt_statistics_accumulate_over_a_search() {
    let board = parse("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");
    let mut engine = fixed_depth_engine(5);
    let _ = engine.search(&board);
    let stats = engine.tt_stats();
    assert!(stats.size > 0, "a depth-5 search must store entries");
    assert!(stats.hits + stats.misses > 0, "and probe the table");
}
