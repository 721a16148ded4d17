//! Scripted randomness for tests.

use wheelshow_core::rng::DeterministicRng;

/// Always draws the low end: `min` for integers and `0.0` for floats.
/// A toss-up therefore picks the first candidate and a spin starts at the
/// slowest velocity with the strongest friction and the shortest tick.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from predetermined sequences. Integer and
/// float draws come from separate streams. Panics if a stream is
/// exhausted. Used in tests that need specific, repeatable outcomes
/// (e.g., which toss-up position is revealed, or how hard the wheel spins).
#[derive(Debug, Default)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
    floats: Vec<f64>,
    float_index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given integer values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Adds the float stream returned by `next_f64`.
    #[must_use]
    pub fn with_floats(mut self, floats: Vec<f64>) -> Self {
        self.floats = floats;
        self
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val.clamp(min, max)
    }

    fn next_f64(&mut self) -> f64 {
        let val = self.floats[self.float_index];
        self.float_index += 1;
        val
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_rng_picks_first_candidate() {
        assert_eq!(MockRng.pick_index(5), Some(0));
        assert_eq!(MockRng.pick_index(0), None);
    }

    #[test]
    fn test_sequence_rng_clamps_and_keeps_streams_apart() {
        // Arrange
        let mut rng = SequenceRng::new(vec![9, 1]).with_floats(vec![0.25]);

        // Act
        let clamped = rng.pick_index(3);
        let float = rng.next_f64();
        let next = rng.pick_index(3);

        // Assert
        assert_eq!(clamped, Some(2));
        assert!((float - 0.25).abs() < f64::EPSILON);
        assert_eq!(next, Some(1));
    }
}
