/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const DARK:   Self = Self { r: 0.118, g: 0.118, b: 0.180, a: 1.0 }; // #1e1e2e
    pub const WHITE:  Self = Self { r: 0.804, g: 0.839, b: 0.957, a: 1.0 }; // #cdd6f4
    pub const PURPLE: Self = Self { r: 0.796, g: 0.651, b: 0.969, a: 1.0 }; // #cba6f7
    pub const SURFACE: Self = Self { r: 0.192, g: 0.196, b: 0.267, a: 1.0 }; // #313244

    /// Parse any supported notation: `#RRGGBB`, `#RRGGBBAA` or `hsl(h, s%, l%)`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with("hsl") {
            Self::from_hsl_str(s)
        } else {
            Self::from_hex(s)
        }
    }

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: byte(&hex[6..8])? as f32 / 255.0,
            }),
            _ => None,
        }
    }

    /// Parse `hsl(152, 100%, 50%)`.  Percent signs are optional.
    fn from_hsl_str(s: &str) -> Option<Self> {
        let inner = s.strip_prefix("hsl(")?.strip_suffix(')')?;
        let mut parts = inner.split(',').map(|p| p.trim().trim_end_matches('%'));

        let h: f32 = parts.next()?.parse().ok()?;
        let s: f32 = parts.next()?.parse().ok()?;
        let l: f32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }

        Some(Self::from_hsl(h, s / 100.0, l / 100.0))
    }

    /// Build an opaque colour from HSL (H: 0–360, S: 0–1, L: 0–1).
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let (s, l) = (s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
        if s < 1e-6 {
            return Self { r: l, g: l, b: l, a: 1.0 };
        }

        fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
            if t < 0.0 { t += 1.0; }
            if t > 1.0 { t -= 1.0; }
            if t < 1.0 / 6.0 { return p + (q - p) * 6.0 * t; }
            if t < 0.5 { return q; }
            if t < 2.0 / 3.0 { return p + (q - p) * (2.0 / 3.0 - t) * 6.0; }
            p
        }

        let hn = h.rem_euclid(360.0) / 360.0;
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self {
            r: hue_to_rgb(p, q, hn + 1.0 / 3.0),
            g: hue_to_rgb(p, q, hn),
            b: hue_to_rgb(p, q, hn - 1.0 / 3.0),
            a: 1.0,
        }
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}
