use std::time::Duration;

/// Per-frame projection latencies, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTimings {
    samples: Vec<Duration>,
}

impl FrameTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Duration) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    pub fn max(&self) -> Option<Duration> {
        self.samples.iter().copied().max()
    }

    /// Arithmetic mean, or `None` when no frame was recorded.
    pub fn mean(&self) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        let total: u128 = self.samples.iter().map(|d| d.as_nanos()).sum();
        let mean = total / self.samples.len() as u128;
        Some(Duration::from_nanos(mean.min(u64::MAX as u128) as u64))
    }
}

impl FromIterator<Duration> for FrameTimings {
    fn from_iter<I: IntoIterator<Item = Duration>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
