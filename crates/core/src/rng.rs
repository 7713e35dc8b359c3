//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one of each piece (I, O, T, S, Z, J, L), shuffled. Pieces are drawn
//! from the bag until it is empty, then a new bag is shuffled. Long-run frequency is
//! uniform and the gap between two pieces of the same kind is bounded.
//!
//! The shuffle is driven by a small seeded LCG so that a session is reproducible
//! from its seed alone.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seed 0 is treated as 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // state = a * state + c (mod 2^32)
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceQueue {
    bag: [PieceKind; 7],
    /// Index of the next piece in `bag`; 7 means the bag is spent
    bag_index: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        queue.refill_bag();
        queue
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// The piece the next `draw` will return, without consuming it.
    pub fn peek(&self) -> PieceKind {
        if self.bag_index < self.bag.len() {
            return self.bag[self.bag_index];
        }

        // Bag is spent: shuffle a preview from a copy of the RNG. `draw` refills from the
        // same state, so the preview always matches.
        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceKind::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    /// Draw the next piece from the queue
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Pieces left in the current bag
    pub fn remaining_in_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }

    /// Current RNG state; seeding a new queue with it continues the sequence deterministically.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_piece_queue_draws_all_seven() {
        let mut queue = PieceQueue::new(1);
        assert_eq!(queue.remaining_in_bag().len(), 7);

        let drawn: Vec<_> = (0..7).map(|_| queue.draw()).collect();
        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
        assert!(queue.remaining_in_bag().is_empty());
    }

    #[test]
    fn test_every_bag_is_a_permutation() {
        let mut queue = PieceQueue::new(99);
        for _ in 0..20 {
            let mut bag: Vec<_> = (0..7).map(|_| queue.draw()).collect();
            bag.sort_by_key(|k| PieceKind::ALL.iter().position(|a| a == k));
            assert_eq!(bag, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_piece_queue_peek_matches_draw() {
        let mut queue = PieceQueue::new(1);
        for _ in 0..30 {
            let peeked = queue.peek();
            assert_eq!(peeked, queue.draw());
        }
    }

    #[test]
    fn test_peek_across_bag_boundary_does_not_consume_rng() {
        let mut queue = PieceQueue::new(7);
        for _ in 0..7 {
            queue.draw();
        }
        let seed_before = queue.seed();
        let _ = queue.peek();
        assert_eq!(queue.seed(), seed_before);
    }
}
