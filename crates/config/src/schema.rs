use livemon_core::{ControllerOptions, Metric, CAPACITY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure parsed from `livemon.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivemonConfig {
    /// Sample stream settings.
    pub stream: StreamConfig,
    /// Main window settings.
    pub window: WindowConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

/// Settings for the simulated sample stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Milliseconds between ticks while running.
    pub interval_ms: u64,
    /// Number of samples kept in the live window.
    pub capacity: usize,
    /// Start streaming as soon as the dashboard opens.
    pub autostart: bool,
    /// Metric charted on launch.
    pub metric: Metric,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            capacity:    CAPACITY,
            autostart:   false,
            metric:      Metric::Cpu,
        }
    }
}

impl StreamConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            capacity: self.capacity,
            interval: self.interval(),
            selected: self.metric,
        }
    }
}

/// Main window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial width in logical pixels.
    pub width: f32,
    /// Initial height in logical pixels.
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title:  "Live System Monitor".to_string(),
            width:  900.0,
            height: 560.0,
        }
    }
}

/// Theme / styling configuration.
///
/// Colours accept `#RRGGBB`, `#RRGGBBAA` or `hsl(h, s%, l%)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background.
    pub background: String,
    /// Primary text colour.
    pub foreground: String,
    /// Panel / readout background.
    pub muted: String,
    /// Accent used for the running badge.
    pub accent: String,
    /// Base font size in points.
    pub font_size: f32,
    /// `"nerd"` for Nerd Font glyphs, `"ascii"` for plain labels.
    pub icon_style: String,
    pub cpu_color: String,
    pub memory_color: String,
    pub temperature_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background:        "#1e1e2e".to_string(), // Catppuccin Mocha: base
            foreground:        "#cdd6f4".to_string(), // Catppuccin Mocha: text
            muted:             "#313244".to_string(), // Catppuccin Mocha: surface0
            accent:            "#cba6f7".to_string(), // Catppuccin Mocha: mauve
            font_size:         14.0,
            icon_style:        "nerd".to_string(),
            cpu_color:         Metric::Cpu.descriptor().color.to_string(),
            memory_color:      Metric::Memory.descriptor().color.to_string(),
            temperature_color: Metric::Temperature.descriptor().color.to_string(),
        }
    }
}

impl ThemeConfig {
    /// Configured series colour string for `metric`.
    pub fn metric_color(&self, metric: Metric) -> &str {
        match metric {
            Metric::Cpu         => &self.cpu_color,
            Metric::Memory      => &self.memory_color,
            Metric::Temperature => &self.temperature_color,
        }
    }
}
