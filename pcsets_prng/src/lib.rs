// Deterministic pseudo-random source for twelve-tone row generation.
//
// xoshiro256++ (Blackman & Vigna, 2019), seeded through SplitMix64. The
// generator is written out by hand so a given seed yields the same rows on
// every platform and toolchain; `pcsets::tone_row::ToneRow::random` is the
// only consumer, and nothing else in the workspace draws randomness.
//
// Only integer arithmetic is used. Sampling helpers are limited to what row
// generation needs: bounded integers (rejection-sampled, no modulo bias) and
// an in-place Fisher-Yates shuffle.

use serde::{Deserialize, Serialize};

/// Xoshiro256++ state. Cloning forks the stream; serializing captures it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRng {
    s: [u64; 4],
}

impl RowRng {
    /// Seed a generator from a single `u64`.
    ///
    /// SplitMix64 expands the seed into the 256-bit state, so nearby seeds
    /// still produce unrelated streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        let mut s = [0u64; 4];
        for word in &mut s {
            *word = splitmix64(&mut sm);
        }
        Self { s }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = self.s;
        let result = s0.wrapping_add(s3).rotate_left(23).wrapping_add(s0);

        let t = s1 << 17;
        let s2 = s2 ^ s0;
        let s3 = s3 ^ s1;
        let s1 = s1 ^ s2;
        let s0 = s0 ^ s3;

        self.s = [s0, s1, s2 ^ t, s3.rotate_left(45)];
        result
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        assert!(low < high, "range_usize: empty range {low}..{high}");
        let span = (high - low) as u64;
        if span.is_power_of_two() {
            return low + (self.next_u64() & (span - 1)) as usize;
        }
        // Reject the short tail of the u64 range that would bias low values.
        let threshold = span.wrapping_neg() % span;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % span) as usize;
            }
        }
    }

    /// Shuffle a slice in place (Fisher-Yates, back to front).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.range_usize(0, i + 1);
            items.swap(i, j);
        }
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RowRng::new(7);
        let mut b = RowRng::new(7);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RowRng::new(7);
        let mut b = RowRng::new(8);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn range_usize_stays_in_bounds() {
        let mut rng = RowRng::new(31);
        for _ in 0..10_000 {
            let v = rng.range_usize(3, 12);
            assert!((3..12).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn range_usize_reaches_both_ends() {
        let mut rng = RowRng::new(5);
        let mut seen = [false; 12];
        for _ in 0..10_000 {
            seen[rng.range_usize(0, 12)] = true;
        }
        assert!(seen.iter().all(|&s| s), "every value 0..12 should appear");
    }

    #[test]
    #[should_panic(expected = "empty range")]
    fn range_usize_rejects_empty_range() {
        RowRng::new(0).range_usize(4, 4);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = RowRng::new(2024);
        let mut row: Vec<u8> = (0..12).collect();
        rng.shuffle(&mut row);
        let mut sorted = row.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..12).collect::<Vec<u8>>());
    }

    #[test]
    fn shuffle_is_deterministic() {
        let mut a: Vec<u8> = (0..12).collect();
        let mut b: Vec<u8> = (0..12).collect();
        RowRng::new(99).shuffle(&mut a);
        RowRng::new(99).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_handles_short_slices() {
        let mut rng = RowRng::new(1);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
        let mut one = [4u8];
        rng.shuffle(&mut one);
        assert_eq!(one, [4]);
    }

    #[test]
    fn serialized_state_resumes_stream() {
        let mut rng = RowRng::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: RowRng = serde_json::from_str(&json).unwrap();
        for _ in 0..50 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }
}
