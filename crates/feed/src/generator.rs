use chrono::Local;
use livemon_core::{Metric, Sample, SampleSource};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Time-of-day format stamped on every sample.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Stand-in telemetry source: uniform random values for every metric.
///
/// Each metric is drawn independently from its descriptor's `[min, max)`
/// range; the timestamp is the local wall-clock time.
pub struct RandomSource {
    rng:   StdRng,
    clock: fn() -> String,
}

impl RandomSource {
    pub fn new() -> Self {
        Self {
            rng:   StdRng::from_os_rng(),
            clock: wall_clock,
        }
    }

    /// Reproducible sequence of values; timestamps still follow the clock.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng:   StdRng::seed_from_u64(seed),
            clock: wall_clock,
        }
    }

    fn draw(&mut self, metric: Metric) -> f64 {
        let d = metric.descriptor();
        self.rng.random_range(d.min..d.max)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for RandomSource {
    fn generate(&mut self) -> Sample {
        Sample {
            time:        (self.clock)(),
            cpu:         self.draw(Metric::Cpu),
            memory:      self.draw(Metric::Memory),
            temperature: self.draw(Metric::Temperature),
        }
    }
}

fn wall_clock() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}
