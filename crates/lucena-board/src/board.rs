//! The chess position consumed by the search: queries, legal moves, and
//! copy-make child derivation.

use std::fmt;
use std::str::FromStr;

use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Bitboard, CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Position, Role, Square};

use crate::error::BoardError;

/// A chess position plus the Zobrist history of its ancestors.
///
/// The board is copy-make: [`make_move`](Board::make_move) returns the child
/// position and leaves the parent untouched, so every search path trivially
/// restores the position it entered with. The ancestor hashes carried along
/// are what back [`is_repetition`](Board::is_repetition).
#[derive(Clone)]
pub struct Board {
    pos: Chess,
    /// Zobrist hashes of every ancestor position, oldest first.
    history: Vec<u64>,
    /// Zobrist hash of the current position.
    hash: u64,
}

/// Index a [`Role`] into the 0..6 range (Pawn = 0, King = 5).
#[inline]
pub fn role_index(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

/// Index a [`Color`] into the 0..2 range (White = 0, Black = 1).
#[inline]
pub fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

/// Mirror a square vertically (a1 <-> a8). Used to look up white-oriented
/// piece-square tables for black pieces.
#[inline]
pub fn mirror_square(sq: Square) -> Square {
    sq.flip_vertical()
}

/// Chebyshev (king-move) distance between two squares.
#[inline]
pub fn chebyshev_distance(a: Square, b: Square) -> i32 {
    let file_diff = (a.file() as i32 - b.file() as i32).abs();
    let rank_diff = (a.rank() as i32 - b.rank() as i32).abs();
    file_diff.max(rank_diff)
}

/// Format a move in UCI notation (e.g. `e2e4`, `e7e8q`, `e1g1` for castling).
pub fn move_to_uci(mv: &Move) -> String {
    if let Move::Castle { king, rook } = mv {
        // UCI writes castling as the king's two-square hop, not king-takes-rook.
        let to_file = if rook.file() > king.file() {
            shakmaty::File::G
        } else {
            shakmaty::File::C
        };
        let to = Square::from_coords(to_file, king.rank());
        return format!("{king}{to}");
    }

    let from = mv.from().expect("standard chess moves always have an origin");
    let to = mv.to();
    match mv.promotion() {
        Some(role) => format!("{from}{to}{}", role.char()),
        None => format!("{from}{to}"),
    }
}

impl Board {
    /// The standard starting position.
    pub fn starting_position() -> Board {
        Board::from_position(Chess::default())
    }

    /// Parse a FEN string into a board with empty history.
    pub fn from_fen(fen: &str) -> Result<Board, BoardError> {
        let parsed: Fen = fen.parse().map_err(|_| BoardError::InvalidFen {
            fen: fen.to_string(),
        })?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|_| BoardError::IllegalPosition {
                fen: fen.to_string(),
            })?;
        Ok(Board::from_position(pos))
    }

    fn from_position(pos: Chess) -> Board {
        let hash = zobrist(&pos);
        Board {
            pos,
            history: Vec::new(),
            hash,
        }
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.pos.turn()
    }

    /// The piece kind on a square, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Role> {
        self.pos.board().role_at(sq)
    }

    /// The color of the piece on a square, if any.
    #[inline]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.pos.board().color_at(sq)
    }

    /// Bitboard of all pieces of the given kind, both colors.
    #[inline]
    pub fn pieces(&self, role: Role) -> Bitboard {
        self.pos.board().by_role(role)
    }

    /// Bitboard of all pieces of one side.
    #[inline]
    pub fn side(&self, color: Color) -> Bitboard {
        self.pos.board().by_color(color)
    }

    /// Bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.pos.board().occupied()
    }

    /// The king square for a side.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.pos
            .board()
            .king_of(color)
            .expect("a legal position always has both kings")
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.pos.is_check()
    }

    /// Whether the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    /// Whether the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        self.pos.is_stalemate()
    }

    /// Whether a move captures (including en passant).
    #[inline]
    pub fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    /// All legal moves in the current position.
    #[inline]
    pub fn legal_moves(&self) -> MoveList {
        self.pos.legal_moves()
    }

    /// All pieces of both colors attacking `sq` under the given occupancy.
    ///
    /// Sliding attacks honor `occupied`, so callers that peel pieces off the
    /// occupancy (SEE) see X-ray attackers appear; they must mask the result
    /// by their own occupancy to drop already-removed pieces.
    #[inline]
    pub fn attackers(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let board = self.pos.board();
        board.attacks_to(sq, Color::White, occupied) | board.attacks_to(sq, Color::Black, occupied)
    }

    /// Derive the child position after a legal move.
    pub fn make_move(&self, mv: &Move) -> Board {
        let mut pos = self.pos.clone();
        pos.play_unchecked(mv);
        let mut history = self.history.clone();
        history.push(self.hash);
        let hash = zobrist(&pos);
        Board { pos, history, hash }
    }

    /// Derive the position after passing the move to the opponent.
    ///
    /// Returns `None` when the null move is illegal, i.e. the side to move is
    /// in check. The null position keeps the parent's repetition history; a
    /// null move can never complete a repetition cycle.
    pub fn make_null_move(&self) -> Option<Board> {
        let pos = self.pos.clone().swap_turn().ok()?;
        let hash = zobrist(&pos);
        Some(Board {
            pos,
            history: self.history.clone(),
            hash,
        })
    }

    /// Zobrist hash of the current position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Whether the current position already occurred at least `count` times
    /// among its ancestors.
    pub fn is_repetition(&self, count: usize) -> bool {
        self.history.iter().filter(|&&h| h == self.hash).count() >= count
    }

    /// Whether the fifty-move rule applies (halfmove clock at 100 plies).
    #[inline]
    pub fn is_halfmove_draw(&self) -> bool {
        self.pos.halfmoves() >= 100
    }

    /// Whether neither side can possibly deliver mate.
    #[inline]
    pub fn is_insufficient_material(&self) -> bool {
        self.pos.is_insufficient_material()
    }

    /// Fullmove number (starts at 1, incremented after Black moves).
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.pos.fullmoves().get()
    }

    /// The position as a FEN string.
    pub fn fen(&self) -> String {
        Fen(self.pos.clone().into_setup(EnPassantMode::Legal)).to_string()
    }

    /// Find the legal move matching a UCI string, if any.
    pub fn find_uci_move(&self, uci: &str) -> Option<Move> {
        self.legal_moves()
            .iter()
            .find(|mv| move_to_uci(mv) == uci)
            .cloned()
    }
}

fn zobrist(pos: &Chess) -> u64 {
    pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Board, BoardError> {
        Board::from_fen(s)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.fen())
            .field("hash", &self.hash)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::{Color, Role, Square};

    use super::{Board, chebyshev_distance, mirror_square, move_to_uci};

    #[test]
    fn starting_position_basics() {
        let board = Board::starting_position();
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.legal_moves().len(), 20);
        assert_eq!(board.pieces(Role::Pawn).count(), 16);
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
        assert!(!board.in_check());
    }

    #[test]
    fn fen_round_trip() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        let board: Board = fen.parse().unwrap();
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn bad_fen_is_rejected() {
        assert!(Board::from_fen("not a fen").is_err());
        // Kingless position parses as FEN but is not a legal chess position.
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn make_move_leaves_parent_untouched() {
        let board = Board::starting_position();
        let fen_before = board.fen();
        let hash_before = board.hash();

        let mv = board.find_uci_move("e2e4").unwrap();
        let child = board.make_move(&mv);

        assert_eq!(board.fen(), fen_before);
        assert_eq!(board.hash(), hash_before);
        assert_ne!(child.hash(), hash_before);
        assert_eq!(child.side_to_move(), Color::Black);
    }

    #[test]
    fn capture_detection() {
        let board: Board = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let capture = board.find_uci_move("e4d5").unwrap();
        let push = board.find_uci_move("e4e5").unwrap();
        assert!(board.is_capture(&capture));
        assert!(!board.is_capture(&push));
    }

    #[test]
    fn repetition_after_knight_shuffle() {
        let mut board = Board::starting_position();
        assert!(!board.is_repetition(1));

        // Nf3 Nf6 Ng1 Ng8 returns to the starting position once...
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            let mv = board.find_uci_move(uci).unwrap();
            board = board.make_move(&mv);
        }
        assert!(board.is_repetition(1));
        assert!(!board.is_repetition(2));

        // ...and a second shuffle makes it a threefold.
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            let mv = board.find_uci_move(uci).unwrap();
            board = board.make_move(&mv);
        }
        assert!(board.is_repetition(2));
    }

    #[test]
    fn null_move_flips_side() {
        let board = Board::starting_position();
        let null = board.make_null_move().unwrap();
        assert_eq!(null.side_to_move(), Color::Black);
        assert_eq!(null.occupied(), board.occupied());
    }

    #[test]
    fn null_move_illegal_in_check() {
        // White king on e1 is in check from the rook on e8.
        let board: Board = "4r2k/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(board.in_check());
        assert!(board.make_null_move().is_none());
    }

    #[test]
    fn halfmove_draw_at_100() {
        let board: Board = "4k3/8/8/8/8/8/8/4K2R w - - 100 80".parse().unwrap();
        assert!(board.is_halfmove_draw());
        let board: Board = "4k3/8/8/8/8/8/8/4K2R w - - 99 80".parse().unwrap();
        assert!(!board.is_halfmove_draw());
    }

    #[test]
    fn insufficient_material_bare_kings() {
        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(board.is_insufficient_material());
    }

    #[test]
    fn checkmate_and_stalemate() {
        // Back-rank mate: black king h8, white queen g7 guarded by king f6.
        let mated: Board = "7k/6Q1/5K2/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(mated.is_checkmate());
        assert!(mated.legal_moves().is_empty());

        let stalemated: Board = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert!(stalemated.is_stalemate());
        assert!(!stalemated.in_check());
    }

    #[test]
    fn uci_formatting() {
        let board = Board::starting_position();
        let mv = board.find_uci_move("g1f3").unwrap();
        assert_eq!(move_to_uci(&mv), "g1f3");

        // Promotion carries the piece suffix.
        let promo: Board = "7k/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(promo.find_uci_move("e7e8q").is_some());

        // Castling is written as the king's hop.
        let castle: Board = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
        assert!(castle.find_uci_move("e1g1").is_some());
    }

    #[test]
    fn mirror_and_distance_helpers() {
        assert_eq!(mirror_square(Square::A1), Square::A8);
        assert_eq!(mirror_square(Square::E4), Square::E5);
        assert_eq!(chebyshev_distance(Square::A1, Square::H8), 7);
        assert_eq!(chebyshev_distance(Square::E4, Square::E4), 0);
        assert_eq!(chebyshev_distance(Square::B2, Square::C4), 2);
    }

    #[test]
    fn hash_ignores_move_counters() {
        let a: Board = "4k3/8/8/8/8/8/8/4K2R w - - 0 1".parse().unwrap();
        let b: Board = "4k3/8/8/8/8/8/8/4K2R w - - 40 60".parse().unwrap();
        assert_eq!(a.hash(), b.hash());
    }
}
