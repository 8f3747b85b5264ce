use crate::config::ThemeConfig;
use palette::Srgb;
use palette::rgb::FromHexError;
use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// An sRGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn from_rgb(hex: u32) -> Self {
        Self(Srgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8))
    }

    /// Channels in `0.0..=1.0`, for renderers that draw with floats.
    pub fn components(&self) -> (f64, f64, f64) {
        self.0.into_format::<f64>().into_components()
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ButtonStyle {
    pub fill: HexColor,
    pub glyph: HexColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub focus: ButtonStyle,
    pub idle: ButtonStyle,
    pub trigger: HexColor,
    pub backdrop: HexColor,
}

impl Theme {
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            focus: ButtonStyle {
                fill: cfg.focus_fill,
                glyph: cfg.focus_glyph,
            },
            idle: ButtonStyle {
                fill: cfg.idle_fill,
                glyph: cfg.idle_glyph,
            },
            trigger: cfg.trigger,
            backdrop: cfg.backdrop,
        }
    }

    pub fn style(&self, emphasized: bool) -> ButtonStyle {
        if emphasized { self.focus } else { self.idle }
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
    fn test_hex_color_parsing() {
        let cases = vec![
            ("#c33532", 0xc33532),
            ("636064", 0x636064),
            ("#fff", 0xffffff),
            (" #007AFF ", 0x007aff),
        ];

        for (s, expected) in cases {
            assert_eq!(s.parse::<HexColor>().unwrap(), HexColor::from_rgb(expected), "{s}");
        }
        assert!("#12345".parse::<HexColor>().is_err());
        assert!("red".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_hex_color_serde() {
        let c: HexColor = serde_json::from_str("\"#C33532\"").unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#c33532\"");
    }

    #[test]
    fn test_components() {
        let (r, g, b) = HexColor::from_rgb(0xff0000).components();
        assert_eq!((r, g, b), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_emphasis_swaps_style() {
        let theme = Theme::default();
        assert_eq!(theme.style(true).fill, HexColor::from_rgb(0xc33532));
        assert_eq!(theme.style(true).glyph, HexColor::from_rgb(0xffffff));
        assert_eq!(theme.style(false).fill, HexColor::from_rgb(0xffffff));
        assert_eq!(theme.style(false).glyph, HexColor::from_rgb(0x636064));
    }
}
