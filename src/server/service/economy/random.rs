use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniform samples in `[0, 1)` for reward resolution.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[min, max]`. Returns `min` when the range is empty.
    fn uniform_in(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }

        let span = (max as i128 - min as i128 + 1) as f64;
        let offset = (self.next_unit() * span).floor() as i128;

        (min as i128 + offset).min(max as i128) as i64
    }
}

/// [`RandomSource`] backed by any `rand` generator.
pub struct RngSource<R: Rng>(pub R);

impl RngSource<StdRng> {
    /// Generator seeded from the operating system, safe to hold across `.await`.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
#[cfg(test)]
pub struct SequenceSource {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl SequenceSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            index: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }

        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_covers_both_ends() {
        let mut low = SequenceSource::new([0.0]);
        let mut high = SequenceSource::new([0.999_999]);

        assert_eq!(low.uniform_in(50, 200), 50);
        assert_eq!(high.uniform_in(50, 200), 200);
    }

    #[test]
    fn uniform_on_single_value_range() {
        let mut source = SequenceSource::new([0.7]);

        assert_eq!(source.uniform_in(75, 75), 75);
    }

    #[test]
    fn uniform_on_full_i64_range() {
        let mut low = SequenceSource::new([0.0]);
        let mut high = SequenceSource::new([0.999_999]);

        assert_eq!(low.uniform_in(i64::MIN, i64::MAX), i64::MIN);
        assert!(high.uniform_in(0, i64::MAX) > 0);
    }

    #[test]
    fn rng_source_stays_in_unit_interval() {
        let mut source = RngSource(StdRng::seed_from_u64(7));

        for _ in 0..1_000 {
            let value = source.next_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
