//! Seeded Random Stream
//!
//! Mulberry32: a counter-based 32-bit generator. The state is a single counter
//! advanced by a fixed odd increment; each output is a multiply-xor-shift mix
//! of the counter, so the same seed always yields the same sequence.

/// Counter increment (Weyl sequence step)
const GOLDEN_STEP: u32 = 0x6D2B_79F5;

/// Multiplier spreading consecutive indices across the seed space
const INDEX_PRIME: u32 = 7919;

/// Derive the stream seed for an item
pub fn item_seed(index: usize, discriminant: u32) -> u32 {
    (index as u32)
        .wrapping_mul(INDEX_PRIME)
        .wrapping_add(discriminant)
}

/// Deterministic pseudo-random stream
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_STEP);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Next integer in `[0, bound)`; `bound` must be non-zero
    pub fn below(&mut self, bound: usize) -> usize {
        ((self.next_f64() * bound as f64) as usize).min(bound.saturating_sub(1))
    }

    /// Pick one element
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Pick `n` distinct elements without replacement, in selection order
    pub fn pick_n<T: Copy>(&mut self, items: &[T], n: usize) -> Vec<T> {
        let n = n.min(items.len());
        let mut pool: Vec<usize> = (0..items.len()).collect();
        for i in 0..n {
            let j = i + self.below(pool.len() - i);
            pool.swap(i, j);
        }
        pool[..n].iter().map(|&i| items[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Mulberry32::new(42);
        let mut b = Mulberry32::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Mulberry32::new(1);
        let mut b = Mulberry32::new(2);
        let same = (0..16).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 16);
    }

    #[test]
    fn test_unit_interval() {
        let mut rng = Mulberry32::new(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_pick_n_is_unique() {
        let pool = ["a", "b", "c", "d", "e"];
        let mut rng = Mulberry32::new(99);
        for n in 0..=6 {
            let picked = rng.pick_n(&pool, n);
            assert_eq!(picked.len(), n.min(pool.len()));
            let mut sorted = picked.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), picked.len());
        }
    }
}
