//! Piece-square tables for all six piece kinds.
//!
//! Tables are written from White's perspective in LERF order: index 0 = a1,
//! index 7 = h1, index 63 = h8. Black looks its squares up through the
//! vertical mirror (`sq ^ 56`). Every row is a palindrome, so the
//! left-right evaluation symmetry the engine promises holds exactly.

use lucena_board::{Color, Role, Square, mirror_square};

use crate::eval::score::{S, Score};

/// Pawn PST. Ranks 1 and 8 are zero — pawns never sit there.
#[rustfmt::skip]
const PAWN_PST: [Score; 64] = [
    // Rank 1
    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),
    // Rank 2
    S(5,0),    S(10,0),   S(10,0),   S(-20,0),  S(-20,0),  S(10,0),   S(10,0),   S(5,0),
    // Rank 3
    S(5,5),    S(-5,5),   S(-10,5),  S(0,5),    S(0,5),    S(-10,5),  S(-5,5),   S(5,5),
    // Rank 4
    S(0,10),   S(0,10),   S(0,10),   S(20,10),  S(20,10),  S(0,10),   S(0,10),   S(0,10),
    // Rank 5
    S(5,20),   S(5,20),   S(10,20),  S(25,25),  S(25,25),  S(10,20),  S(5,20),   S(5,20),
    // Rank 6
    S(10,40),  S(10,40),  S(20,40),  S(30,45),  S(30,45),  S(20,40),  S(10,40),  S(10,40),
    // Rank 7
    S(50,90),  S(50,90),  S(50,90),  S(50,90),  S(50,90),  S(50,90),  S(50,90),  S(50,90),
    // Rank 8
    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),
];

#[rustfmt::skip]
const KNIGHT_PST: [Score; 64] = [
    // Rank 1
    S(-50,-40),S(-40,-30),S(-30,-20),S(-30,-20),S(-30,-20),S(-30,-20),S(-40,-30),S(-50,-40),
    // Rank 2
    S(-40,-30),S(-20,-10),S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-20,-10),S(-40,-30),
    // Rank 3
    S(-30,-20),S(0,0),    S(10,10),  S(15,15),  S(15,15),  S(10,10),  S(0,0),    S(-30,-20),
    // Rank 4
    S(-30,-20),S(5,5),    S(15,15),  S(20,20),  S(20,20),  S(15,15),  S(5,5),    S(-30,-20),
    // Rank 5
    S(-30,-20),S(0,5),    S(15,15),  S(20,20),  S(20,20),  S(15,15),  S(0,5),    S(-30,-20),
    // Rank 6
    S(-30,-20),S(5,0),    S(10,10),  S(15,15),  S(15,15),  S(10,10),  S(5,0),    S(-30,-20),
    // Rank 7
    S(-40,-30),S(-20,-10),S(0,0),    S(5,0),    S(5,0),    S(0,0),    S(-20,-10),S(-40,-30),
    // Rank 8
    S(-50,-40),S(-40,-30),S(-30,-20),S(-30,-20),S(-30,-20),S(-30,-20),S(-40,-30),S(-50,-40),
];

#[rustfmt::skip]
const BISHOP_PST: [Score; 64] = [
    // Rank 1
    S(-20,-15),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-20,-15),
    // Rank 2
    S(-10,-10),S(5,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(5,0),    S(-10,-10),
    // Rank 3
    S(-10,-5), S(10,5),   S(10,5),   S(10,5),   S(10,5),   S(10,5),   S(10,5),   S(-10,-5),
    // Rank 4
    S(-10,-5), S(0,0),    S(10,10),  S(10,10),  S(10,10),  S(10,10),  S(0,0),    S(-10,-5),
    // Rank 5
    S(-10,-5), S(5,5),    S(5,5),    S(10,10),  S(10,10),  S(5,5),    S(5,5),    S(-10,-5),
    // Rank 6
    S(-10,-5), S(0,0),    S(5,5),    S(10,10),  S(10,10),  S(5,5),    S(0,0),    S(-10,-5),
    // Rank 7
    S(-10,-10),S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-10,-10),
    // Rank 8
    S(-20,-15),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-10,-10),S(-20,-15),
];

#[rustfmt::skip]
const ROOK_PST: [Score; 64] = [
    // Rank 1
    S(0,0),   S(0,0),   S(0,5),   S(5,5),   S(5,5),   S(0,5),   S(0,0),   S(0,0),
    // Rank 2
    S(-5,0),  S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(-5,0),
    // Rank 3
    S(-5,0),  S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(-5,0),
    // Rank 4
    S(-5,0),  S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(-5,0),
    // Rank 5
    S(-5,0),  S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(-5,0),
    // Rank 6
    S(-5,0),  S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(0,0),   S(-5,0),
    // Rank 7
    S(5,10),  S(10,10), S(10,10), S(10,10), S(10,10), S(10,10), S(10,10), S(5,10),
    // Rank 8
    S(0,5),   S(0,5),   S(0,5),   S(0,5),   S(0,5),   S(0,5),   S(0,5),   S(0,5),
];

#[rustfmt::skip]
const QUEEN_PST: [Score; 64] = [
    // Rank 1
    S(-20,-20),S(-10,-10),S(-10,-10),S(-5,-5),  S(-5,-5),  S(-10,-10),S(-10,-10),S(-20,-20),
    // Rank 2
    S(-10,-10),S(0,0),    S(5,0),    S(0,0),    S(0,0),    S(5,0),    S(0,0),    S(-10,-10),
    // Rank 3
    S(-10,-5), S(5,5),    S(5,5),    S(5,5),    S(5,5),    S(5,5),    S(5,5),    S(-10,-5),
    // Rank 4
    S(-5,0),   S(0,5),    S(5,5),    S(5,10),   S(5,10),   S(5,5),    S(0,5),    S(-5,0),
    // Rank 5
    S(-5,0),   S(0,5),    S(5,5),    S(5,10),   S(5,10),   S(5,5),    S(0,5),    S(-5,0),
    // Rank 6
    S(-10,-5), S(0,5),    S(5,5),    S(5,5),    S(5,5),    S(5,5),    S(0,5),    S(-10,-5),
    // Rank 7
    S(-10,-10),S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-10,-10),
    // Rank 8
    S(-20,-20),S(-10,-10),S(-10,-10),S(-5,-5),  S(-5,-5),  S(-10,-10),S(-10,-10),S(-20,-20),
];

/// King PST. Middlegame rewards the castled corners; endgame rewards
/// marching toward the center.
#[rustfmt::skip]
const KING_PST: [Score; 64] = [
    // Rank 1
    S(20,-50), S(30,-30), S(10,-30), S(0,-30),  S(0,-30),  S(10,-30), S(30,-30), S(20,-50),
    // Rank 2
    S(20,-30), S(20,-10), S(0,-5),   S(0,-5),   S(0,-5),   S(0,-5),   S(20,-10), S(20,-30),
    // Rank 3
    S(-10,-30),S(-20,0),  S(-20,10), S(-20,15), S(-20,15), S(-20,10), S(-20,0),  S(-10,-30),
    // Rank 4
    S(-20,-30),S(-30,0),  S(-30,20), S(-40,30), S(-40,30), S(-30,20), S(-30,0),  S(-20,-30),
    // Rank 5
    S(-30,-30),S(-40,0),  S(-40,20), S(-50,30), S(-50,30), S(-40,20), S(-40,0),  S(-30,-30),
    // Rank 6
    S(-30,-30),S(-40,0),  S(-40,10), S(-50,15), S(-50,15), S(-40,10), S(-40,0),  S(-30,-30),
    // Rank 7
    S(-30,-30),S(-40,-10),S(-40,0),  S(-50,0),  S(-50,0),  S(-40,0),  S(-40,-10),S(-30,-30),
    // Rank 8
    S(-30,-50),S(-40,-30),S(-40,-30),S(-50,-30),S(-50,-30),S(-40,-30),S(-40,-30),S(-30,-50),
];

fn table(role: Role) -> &'static [Score; 64] {
    match role {
        Role::Pawn => &PAWN_PST,
        Role::Knight => &KNIGHT_PST,
        Role::Bishop => &BISHOP_PST,
        Role::Rook => &ROOK_PST,
        Role::Queen => &QUEEN_PST,
        Role::King => &KING_PST,
    }
}

/// Piece-square value for a piece of `color` on `sq`, from that side's own
/// perspective (positive = good placement).
#[inline]
pub fn pst_value(role: Role, sq: Square, color: Color) -> Score {
    let idx = match color {
        Color::White => sq as usize,
        Color::Black => mirror_square(sq) as usize,
    };
    table(role)[idx]
}
