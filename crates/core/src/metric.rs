use crate::{error::LivemonError, sample::Sample};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The closed set of metrics carried by every [`Sample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Cpu,
    Memory,
    Temperature,
}

/// Static display data for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDescriptor {
    /// Human-readable label, e.g. `"CPU Usage"`.
    pub label: &'static str,
    /// Unit suffix shown next to values.
    pub unit: &'static str,
    /// Default series colour (CSS `hsl(...)` notation).
    pub color: &'static str,
    /// Nerd Font glyph.
    pub icon: &'static str,
    /// ASCII fallback for `icon`.
    pub short: &'static str,
    /// Lower bound of generated values (inclusive).
    pub min: f64,
    /// Upper bound of generated values (exclusive).
    pub max: f64,
}

const CPU: MetricDescriptor = MetricDescriptor {
    label: "CPU Usage",
    unit:  "%",
    color: "hsl(152, 100%, 50%)",
    icon:  "\u{f4bc}",
    short: "CPU",
    min:   0.0,
    max:   100.0,
};

const MEMORY: MetricDescriptor = MetricDescriptor {
    label: "Memory Usage",
    unit:  "GB",
    color: "hsl(206, 100%, 50%)",
    icon:  "\u{f2db}",
    short: "MEM",
    min:   0.0,
    max:   16.0,
};

const TEMPERATURE: MetricDescriptor = MetricDescriptor {
    label: "Temperature",
    unit:  "°C",
    color: "hsl(0, 100%, 50%)",
    icon:  "\u{f2c9}",
    short: "TMP",
    min:   20.0,
    max:   60.0,
};

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 3] = [Metric::Cpu, Metric::Memory, Metric::Temperature];

    /// Config / command key, e.g. `"cpu"`.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Cpu         => "cpu",
            Metric::Memory      => "memory",
            Metric::Temperature => "temperature",
        }
    }

    pub fn descriptor(self) -> &'static MetricDescriptor {
        match self {
            Metric::Cpu         => &CPU,
            Metric::Memory      => &MEMORY,
            Metric::Temperature => &TEMPERATURE,
        }
    }

    /// Read this metric's field from a sample.
    #[inline]
    pub fn read(self, sample: &Sample) -> f64 {
        match self {
            Metric::Cpu         => sample.cpu,
            Metric::Memory      => sample.memory,
            Metric::Temperature => sample.temperature,
        }
    }

    /// Format a reading as `"12.34 %"`, or `"N/A"` when there is none.
    pub fn format_reading(self, value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{v:.2} {}", self.descriptor().unit),
            None    => "N/A".to_string(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().label)
    }
}

impl FromStr for Metric {
    type Err = LivemonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LivemonError::UnknownMetric(s.to_string()))
    }
}
