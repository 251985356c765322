//! King safety: pawn shield, open lines toward the king, attacker tropism.
//!
//! The whole term is a middlegame concern — it feeds the mg component only,
//! so the taper scales it by phase, and below [`MIN_PHASE`] it is dropped
//! outright.

use lucena_board::{Board, Color, Role, Square, chebyshev_distance};

use crate::eval::score::{S, Score};

/// Phase below which king safety is ignored entirely.
const MIN_PHASE: i32 = 64;

/// Shield bonus by distance of the pawn in front of the king (1-3 ranks).
const SHIELD_BONUS: [i32; 3] = [10, 7, 4];

/// Penalties for open and semi-open files on the king's own file.
const KING_FILE_OPEN: i32 = -30;
const KING_FILE_SEMI_OPEN: i32 = -15;

/// Penalties for open and semi-open files adjacent to the king.
const NEAR_FILE_OPEN: i32 = -15;
const NEAR_FILE_SEMI_OPEN: i32 = -7;

/// Tropism weights: how much a nearby enemy queen or rook costs.
const QUEEN_TROPISM_WEIGHT: i32 = 5;
const ROOK_TROPISM_WEIGHT: i32 = 3;

/// Evaluate king safety from White's perspective.
///
/// Returns a middlegame-only [`Score`]; the caller's taper applies the
/// phase scaling the term calls for.
pub fn evaluate_king_safety(board: &Board, phase: i32) -> Score {
    if phase < MIN_PHASE {
        return Score::ZERO;
    }

    let white = side_safety(board, Color::White);
    let black = side_safety(board, Color::Black);
    S((white - black) as i16, 0)
}

/// Raw safety of one side's king (positive = safe).
fn side_safety(board: &Board, color: Color) -> i32 {
    let king = board.king_square(color);
    let king_file = king.file() as i32;

    let mut safety = pawn_shield(board, color);

    for file in king_file - 1..=king_file + 1 {
        if !(0..8).contains(&file) {
            continue;
        }
        let on_king_file = file == king_file;
        if is_open_file(board, file) {
            safety += if on_king_file { KING_FILE_OPEN } else { NEAR_FILE_OPEN };
        } else if is_semi_open_file(board, file, color) {
            safety += if on_king_file { KING_FILE_SEMI_OPEN } else { NEAR_FILE_SEMI_OPEN };
        }
    }

    let enemy = board.side(!color);
    for sq in board.pieces(Role::Queen) & enemy {
        safety -= (8 - chebyshev_distance(sq, king)) * QUEEN_TROPISM_WEIGHT;
    }
    for sq in board.pieces(Role::Rook) & enemy {
        safety -= (8 - chebyshev_distance(sq, king)) * ROOK_TROPISM_WEIGHT;
    }

    safety
}

/// Shield credit: for each of the three files around the king, the nearest
/// friendly pawn within three ranks in front of it, closer pawns counting
/// for more.
fn pawn_shield(board: &Board, color: Color) -> i32 {
    let king = board.king_square(color);
    let king_file = king.file() as i32;
    let king_rank = king.rank() as i32;
    let pawns = board.pieces(Role::Pawn) & board.side(color);

    let forward = match color {
        Color::White => 1,
        Color::Black => -1,
    };

    let mut bonus = 0;
    for file in king_file - 1..=king_file + 1 {
        if !(0..8).contains(&file) {
            continue;
        }
        for step in 0..3 {
            let rank = king_rank + forward * (step + 1);
            if !(0..8).contains(&rank) {
                break;
            }
            let sq = Square::new((rank * 8 + file) as u32);
            if pawns.contains(sq) {
                bonus += SHIELD_BONUS[step as usize];
                break; // only the nearest pawn per file counts
            }
        }
    }
    bonus
}

fn file_pawns(board: &Board, file: i32) -> (bool, bool) {
    let mut white = false;
    let mut black = false;
    for sq in board.pieces(Role::Pawn) {
        if sq.file() as i32 == file {
            match board.color_on(sq) {
                Some(Color::White) => white = true,
                Some(Color::Black) => black = true,
                None => {}
            }
        }
    }
    (white, black)
}

/// A file with no pawns of either color.
fn is_open_file(board: &Board, file: i32) -> bool {
    let (white, black) = file_pawns(board, file);
    !white && !black
}

/// A file with no pawns of the given color.
fn is_semi_open_file(board: &Board, file: i32, color: Color) -> bool {
    let (white, black) = file_pawns(board, file);
    match color {
        Color::White => !white,
        Color::Black => !black,
    }
}

#[cfg(test)]
mod tests {
    use lucena_board::Board;

    use super::evaluate_king_safety;
    use crate::eval::score::Score;

    #[test]
    fn zero_below_minimum_phase() {
        // A rook ending: phase = 2*2*256/24 rounded = 43, below the cutoff.
        let board: Board = "4k3/8/8/8/8/8/8/R3K2r w - - 0 1".parse().unwrap();
        assert_eq!(evaluate_king_safety(&board, 43), Score::ZERO);
    }

    #[test]
    fn symmetric_position_is_zero() {
        let board = Board::starting_position();
        assert_eq!(evaluate_king_safety(&board, 256), Score::ZERO);
    }

    #[test]
    fn intact_shield_beats_broken_shield() {
        // Both kings castled short; White keeps f2/g2/h2, Black has lost g7.
        let with_shield: Board = "r4rk1/pppq1p1p/8/8/8/8/PPPQ1PPP/R4RK1 w - - 0 1"
            .parse()
            .unwrap();
        let score = evaluate_king_safety(&with_shield, 256);
        assert!(
            score.mg() > 0,
            "white's fuller shield should score higher, got {score}"
        );
    }

    #[test]
    fn enemy_queen_nearby_is_a_penalty() {
        // Same structure for both kings, but Black's queen camps next to
        // the white king while White's queen stays home.
        let board: Board = "r4rk1/ppp2ppp/8/8/8/7q/PPP2PPP/RQ3RK1 w - - 0 1"
            .parse()
            .unwrap();
        let score = evaluate_king_safety(&board, 256);
        assert!(
            score.mg() < 0,
            "black queen at h3 should endanger the white king, got {score}"
        );
    }

    #[test]
    fn only_mg_component_is_populated() {
        let board: Board = "r4rk1/pppq1p1p/8/8/8/8/PPPQ1PPP/R4RK1 w - - 0 1"
            .parse()
            .unwrap();
        let score = evaluate_king_safety(&board, 256);
        assert_eq!(score.eg(), 0);
    }
}
