// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// A minimal, zero-dependency, completely insecure PRNG for sampling and
/// picking cards.
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Initialize the RNG from the system clock.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(C);
        Self::from_seed(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    /// Generate a random index in the range [0, max) from a 64-bit draw.
    /// `max` must be non-zero.
    pub fn generate(&mut self, max: usize) -> usize {
        let wide = (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32());
        (wide % max as u64) as usize
    }

    /// Generate a random index in [0, len) other than `exclude`, unless
    /// `len` is 1, in which case the only index is returned. If `exclude`
    /// is out of range every index is a candidate.
    pub fn generate_excluding(&mut self, len: usize, exclude: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        if exclude >= len {
            return self.generate(len);
        }
        let i = self.generate(len - 1);
        if i >= exclude { i + 1 } else { i }
    }
}

/// Remove a uniformly chosen element, filling its slot with the last
/// element of the vector.
pub fn swap_remove_random<T>(v: &mut Vec<T>, rng: &mut TinyRng) -> Option<T> {
    if v.is_empty() {
        return None;
    }
    let i = rng.generate(v.len());
    Some(v.swap_remove(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_stays_in_range() {
        let mut rng = TinyRng::from_seed(7);
        for max in 1..50 {
            for _ in 0..100 {
                assert!(rng.generate(max) < max);
            }
        }
    }

    #[test]
    fn test_generate_excluding_never_returns_excluded() {
        let mut rng = TinyRng::from_seed(42);
        for len in 2..10 {
            for exclude in 0..len {
                for _ in 0..200 {
                    let i = rng.generate_excluding(len, exclude);
                    assert!(i < len);
                    assert_ne!(i, exclude);
                }
            }
        }
    }

    #[test]
    fn test_generate_excluding_single_element() {
        let mut rng = TinyRng::from_seed(1);
        assert_eq!(rng.generate_excluding(1, 0), 0);
    }

    #[test]
    fn test_generate_excluding_is_uniform() {
        let mut rng = TinyRng::from_seed(1234);
        let trials = 30_000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            counts[rng.generate_excluding(4, 1)] += 1;
        }
        assert_eq!(counts[1], 0);
        let expected = trials / 3;
        for i in [0, 2, 3] {
            let diff = counts[i].abs_diff(expected);
            assert!(diff < expected / 10, "index {i} drawn {} times", counts[i]);
        }
    }

    #[test]
    fn test_swap_remove_random_drains_everything() {
        let mut rng = TinyRng::from_seed(99);
        let mut v: Vec<u32> = (0..20).collect();
        let mut drawn = Vec::new();
        while let Some(x) = swap_remove_random(&mut v, &mut rng) {
            drawn.push(x);
        }
        drawn.sort();
        assert_eq!(drawn, (0..20).collect::<Vec<_>>());
        assert!(swap_remove_random(&mut v, &mut rng).is_none());
    }
}
