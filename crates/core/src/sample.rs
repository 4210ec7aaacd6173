use serde::{Deserialize, Serialize};

/// One timestamped reading of every tracked metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Wall-clock time of generation, already formatted for display.
    pub time: String,
    /// CPU usage (0.0 – 100.0).
    pub cpu: f64,
    /// Memory in use, in GB (0.0 – 16.0).
    pub memory: f64,
    /// Temperature in °C (20.0 – 60.0).
    pub temperature: f64,
}

/// Anything that can produce a fresh [`Sample`] on demand.
///
/// Generation cannot fail; implementations are free to be nondeterministic.
pub trait SampleSource {
    fn generate(&mut self) -> Sample;
}

impl<F> SampleSource for F
where
    F: FnMut() -> Sample,
{
    fn generate(&mut self) -> Sample {
        self()
    }
}
