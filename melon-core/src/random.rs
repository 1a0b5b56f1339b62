use std::ops::RangeInclusive;

use rand::Rng;

/// Uniform integer draws for price generation
pub trait RandomSource: Send + Sync {
    /// Draw an integer from `range`, both ends inclusive
    fn draw(&self, range: RangeInclusive<i32>) -> i32;
}

/// Draws from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self, range: RangeInclusive<i32>) -> i32 {
        rand::thread_rng().gen_range(range)
    }
}

/// Always yields the same value, clamped into the requested range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRandom(pub i32);

impl RandomSource for FixedRandom {
    fn draw(&self, range: RangeInclusive<i32>) -> i32 {
        self.0.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let source = ThreadRandom;
        for _ in 0..500 {
            let value = source.draw(5..=9);
            assert!((5..=9).contains(&value));
        }
    }

    #[test]
    fn test_fixed_random_clamps() {
        assert_eq!(FixedRandom(7).draw(5..=9), 7);
        assert_eq!(FixedRandom(2).draw(5..=9), 5);
        assert_eq!(FixedRandom(42).draw(5..=9), 9);
    }
}
