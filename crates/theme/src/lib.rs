pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::ChartStyle;

use livemon_config::ThemeConfig;
use livemon_core::Metric;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed into normalised `[0, 1]` RGBA.  Calling
/// [`Theme::from_config`] is infallible; invalid color strings fall back to
/// safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted:      Color,
    pub accent:     Color,
    pub font_size:  f32,
    /// When `true`, widgets render Nerd Font glyphs.  `false` → ASCII labels.
    pub use_nerd_icons: bool,
    /// Series colours in [`Metric::ALL`] order.
    series: [Color; 3],
    pub chart: ChartStyle,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let series = Metric::ALL.map(|metric| {
            Color::parse(cfg.metric_color(metric))
                .or_else(|| Color::parse(metric.descriptor().color))
                .unwrap_or(Color::WHITE)
        });

        Self {
            background:     Color::parse(&cfg.background).unwrap_or(Color::DARK),
            foreground:     Color::parse(&cfg.foreground).unwrap_or(Color::WHITE),
            muted:          Color::parse(&cfg.muted).unwrap_or(Color::SURFACE),
            accent:         Color::parse(&cfg.accent).unwrap_or(Color::PURPLE),
            font_size:      cfg.font_size,
            use_nerd_icons: cfg.icon_style.to_lowercase() != "ascii",
            series,
            chart:          ChartStyle::default(),
        }
    }

    /// Series colour for `metric`.
    pub fn metric_color(&self, metric: Metric) -> Color {
        match metric {
            Metric::Cpu         => self.series[0],
            Metric::Memory      => self.series[1],
            Metric::Temperature => self.series[2],
        }
    }

    /// Icon or ASCII tag for `metric`, depending on `use_nerd_icons`.
    pub fn metric_icon(&self, metric: Metric) -> &'static str {
        let d = metric.descriptor();
        if self.use_nerd_icons { d.icon } else { d.short }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_series_colour_falls_back_to_descriptor() {
        let cfg = ThemeConfig {
            memory_color: "not-a-colour".into(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(
            theme.metric_color(Metric::Memory),
            Color::parse(Metric::Memory.descriptor().color).unwrap()
        );
    }

    #[test]
    fn ascii_icon_style() {
        let cfg = ThemeConfig {
            icon_style: "ASCII".into(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert!(!theme.use_nerd_icons);
        assert_eq!(theme.metric_icon(Metric::Temperature), "TMP");
    }

    #[test]
    fn default_background_parses() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::from_hex("#1e1e2e").unwrap());
        assert_eq!(theme.chart.emphasis_radius, 5.0);
    }
}
