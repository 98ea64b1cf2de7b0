//! Random source replaying a fixed script.

use std::collections::VecDeque;

use tether::RandomSource;

/// Hands out scripted values in order, then a fallback value forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<f32>,
    fallback: f32,
    drawn: usize,
}

impl ScriptedRandom {
    /// Create a source that replays `values` and then returns `0.0`.
    ///
    /// # Examples
    /// ```
    /// use test_utils::ScriptedRandom;
    /// use tether::RandomSource;
    /// let mut rng = ScriptedRandom::new([0.25, 0.75]);
    /// assert_eq!(rng.value(), 0.25);
    /// assert_eq!(rng.range(0.0, 4.0), 3.0);
    /// assert_eq!(rng.value(), 0.0);
    /// ```
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.0,
            drawn: 0,
        }
    }

    /// Replace the value returned once the script runs out.
    #[must_use]
    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RandomSource for ScriptedRandom {
    fn value(&mut self) -> f32 {
        self.drawn += 1;
        self.values.pop_front().unwrap_or(self.fallback)
    }
}
