//! Killer move and history heuristics for quiet-move ordering.

use lucena_board::{Color, Move, color_index};

use crate::search::negamax::MAX_PLY;

/// Two quiet moves per ply that caused beta cutoffs there.
pub struct KillerTable {
    slots: Vec<[Option<Move>; 2]>,
}

impl KillerTable {
    /// Create an empty killer table.
    pub fn new() -> Self {
        Self {
            slots: vec![[None, None]; MAX_PLY],
        }
    }

    /// Record a killer at `ply`, shifting the previous first slot down
    /// unless the move is already there.
    pub fn put(&mut self, mv: &Move, ply: usize) {
        if ply >= MAX_PLY {
            return;
        }
        let [first, second] = &mut self.slots[ply];
        if first.as_ref() != Some(mv) {
            *second = first.take();
            *first = Some(mv.clone());
        }
    }

    /// Whether `mv` occupies either killer slot at `ply`.
    pub fn is_killer(&self, mv: &Move, ply: usize) -> bool {
        if ply >= MAX_PLY {
            return false;
        }
        let [first, second] = &self.slots[ply];
        first.as_ref() == Some(mv) || second.as_ref() == Some(mv)
    }

    /// Forget all killers.
    pub fn clear(&mut self) {
        self.slots.fill([None, None]);
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Butterfly history: a per-side counter over (from, to) square pairs,
/// rewarding quiet moves that produced beta cutoffs.
pub struct HistoryTable {
    table: Box<[[[i32; 64]; 64]; 2]>,
}

impl HistoryTable {
    /// Create a zeroed history table.
    pub fn new() -> Self {
        Self {
            table: Box::new([[[0; 64]; 64]; 2]),
        }
    }

    /// Reward a cutoff move with `depth * depth`.
    pub fn update(&mut self, mv: &Move, depth: i32, side: Color) {
        let Some(from) = mv.from() else {
            return;
        };
        self.table[color_index(side)][from as usize][mv.to() as usize] += depth * depth;
    }

    /// The accumulated score for a quiet move.
    pub fn get(&self, mv: &Move, side: Color) -> i32 {
        let Some(from) = mv.from() else {
            return 0;
        };
        self.table[color_index(side)][from as usize][mv.to() as usize]
    }

    /// Zero every counter.
    pub fn clear(&mut self) {
        for side in self.table.iter_mut() {
            for from in side.iter_mut() {
                from.fill(0);
            }
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}
