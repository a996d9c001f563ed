//! Injectable randomness for the loot evaluator.

use rand::Rng;

/// A source of uniform rolls in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `min..=max`, derived from a single unit roll.
    fn next_in_range(&mut self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        let span = (max - min) as f64 + 1.0;
        let offset = (self.next_unit() * span).floor() as u64;
        min.saturating_add(offset).min(max)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// Adapts any `rand` generator (thread RNG, seeded ChaCha) into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

impl RngSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        RngSource(rand::thread_rng())
    }
}

/// Replays a fixed sequence of rolls, cycling when exhausted.
///
/// Values are clamped into `[0, 1)` so a script cannot produce an
/// out-of-contract roll.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    pos: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: Vec<f64>) -> Self {
        Self { rolls, pos: 0 }
    }

    /// Number of rolls consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let roll = self.rolls[self.pos % self.rolls.len()];
        self.pos += 1;
        if roll.is_nan() {
            0.0
        } else {
            roll.clamp(0.0, 1.0 - f64::EPSILON)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scripted_rolls_cycle() {
        let mut rolls = ScriptedRolls::new(vec![0.1, 0.2]);
        assert_eq!(rolls.next_unit(), 0.1);
        assert_eq!(rolls.next_unit(), 0.2);
        assert_eq!(rolls.next_unit(), 0.1);
        assert_eq!(rolls.consumed(), 3);
    }

    #[test]
    fn test_scripted_rolls_clamp_out_of_range() {
        let mut rolls = ScriptedRolls::new(vec![-0.5, 1.0, f64::NAN]);
        assert_eq!(rolls.next_unit(), 0.0);
        assert!(rolls.next_unit() < 1.0);
        assert_eq!(rolls.next_unit(), 0.0);
    }

    #[test]
    fn test_next_in_range_endpoints() {
        let mut low = ScriptedRolls::new(vec![0.0]);
        assert_eq!(low.next_in_range(8, 15), 8);

        let mut high = ScriptedRolls::new(vec![0.999_999]);
        assert_eq!(high.next_in_range(8, 15), 15);

        // Degenerate range consumes nothing
        let mut fixed = ScriptedRolls::new(vec![0.5]);
        assert_eq!(fixed.next_in_range(200, 200), 200);
        assert_eq!(fixed.consumed(), 0);
    }

    #[test]
    fn test_next_in_range_covers_every_value() {
        let mut rng = RngSource(ChaCha8Rng::seed_from_u64(7));
        let mut seen = [false; 5];
        for _ in 0..500 {
            let v = rng.next_in_range(1, 5);
            assert!((1..=5).contains(&v));
            seen[(v - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "all of 1..=5 should appear: {seen:?}");
    }

    #[test]
    fn test_next_in_range_full_width() {
        let mut low = ScriptedRolls::new(vec![0.0]);
        assert_eq!(low.next_in_range(0, u64::MAX), 0);

        let mut high = ScriptedRolls::new(vec![0.999_999]);
        assert!(high.next_in_range(0, u64::MAX) > u64::MAX / 2);

        let mut top = ScriptedRolls::new(vec![1.0]);
        assert!(top.next_in_range(u64::MAX - 1, u64::MAX) >= u64::MAX - 1);
    }

    #[test]
    fn test_next_index_stays_in_bounds() {
        let mut rolls = ScriptedRolls::new(vec![0.0, 0.5, 0.999_999_9]);
        assert_eq!(rolls.next_index(8), 0);
        assert_eq!(rolls.next_index(8), 4);
        assert_eq!(rolls.next_index(8), 7);
    }
}
