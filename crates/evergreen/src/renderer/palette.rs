//! Scene palette and the small amount of color math the controllers need.

/// RGB color with components in [0, 1] (sRGB).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Hue, saturation, lightness; each in [0, 1].
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let lightness = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, lightness);
        }

        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        let hue = if max == self.r {
            (self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / delta + 2.0
        } else {
            (self.r - self.g) / delta + 4.0
        };
        (hue / 6.0, saturation, lightness)
    }

    /// Inverse of `to_hsl`. Hue wraps; saturation and lightness are clamped.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let lo = 2.0 * l - hi;
        Self::new(
            hue_to_rgb(lo, hi, h + 1.0 / 3.0),
            hue_to_rgb(lo, hi, h),
            hue_to_rgb(lo, hi, h - 1.0 / 3.0),
        )
    }

    /// Same hue and saturation, lightness shifted by `offset`.
    pub fn offset_lightness(self, offset: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, l + offset)
    }
}

fn hue_to_rgb(lo: f32, hi: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

// ── Palette ──────────────────────────────────────────────────────────────

pub const EMERALD_DEEP: Color = Color::from_hex(0x002409);
pub const EMERALD_LIGHT: Color = Color::from_hex(0x006B3C);
pub const GOLD_METALLIC: Color = Color::from_hex(0xD4AF37);
pub const GOLD_HIGHLIGHT: Color = Color::from_hex(0xF9E076);
/// Burgundy accent.
pub const RED_LUXURY: Color = Color::from_hex(0x800020);
pub const WHITE_WARM: Color = Color::from_hex(0xFFFDD0);

/// Two-color ornament palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentPalette {
    pub gold: Color,
    pub accent: Color,
    /// Chance that an ornament takes the gold color.
    pub gold_probability: f32,
    /// Full width of the random lightness offset, centered on 0.
    pub lightness_jitter: f32,
}

impl Default for OrnamentPalette {
    fn default() -> Self {
        Self {
            gold: GOLD_METALLIC,
            accent: RED_LUXURY,
            gold_probability: 0.4,
            lightness_jitter: 0.1,
        }
    }
}

impl OrnamentPalette {
    pub fn with_gold_probability(mut self, p: f32) -> Self {
        self.gold_probability = p;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-4 && (a.g - b.g).abs() < 1e-4 && (a.b - b.b).abs() < 1e-4
    }

    #[test]
    fn parse_hex_strings() {
        assert_eq!(Color::parse("#D4AF37"), Some(GOLD_METALLIC));
        assert_eq!(Color::parse("800020"), Some(RED_LUXURY));
        assert_eq!(Color::parse("#FFF"), None);
        assert_eq!(Color::parse("#GGGGGG"), None);
    }

    #[test]
    fn hsl_round_trip_palette() {
        let palette = [
            EMERALD_DEEP,
            EMERALD_LIGHT,
            GOLD_METALLIC,
            GOLD_HIGHLIGHT,
            RED_LUXURY,
            WHITE_WARM,
        ];
        for c in palette {
            let (h, s, l) = c.to_hsl();
            assert!(close(Color::from_hsl(h, s, l), c), "{:?} did not round-trip", c);
        }
    }

    #[test]
    fn grey_has_no_saturation() {
        let (_, s, l) = Color::new(0.5, 0.5, 0.5).to_hsl();
        assert_eq!(s, 0.0);
        assert_eq!(l, 0.5);
    }

    #[test]
    fn lightness_offset_moves_lightness_only() {
        let (h0, s0, l0) = GOLD_METALLIC.to_hsl();
        let (h1, s1, l1) = GOLD_METALLIC.offset_lightness(0.05).to_hsl();
        assert!((h0 - h1).abs() < 1e-3);
        assert!((s0 - s1).abs() < 1e-3);
        assert!((l1 - l0 - 0.05).abs() < 1e-3);
    }

    #[test]
    fn lightness_offset_clamps() {
        assert!(close(WHITE_WARM.offset_lightness(5.0), Color::new(1.0, 1.0, 1.0)));
        assert!(close(RED_LUXURY.offset_lightness(-5.0), Color::new(0.0, 0.0, 0.0)));
    }
}
