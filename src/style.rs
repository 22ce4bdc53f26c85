//! Fill styles and themes.

use crate::error::ConfigError;
use crate::render::Color;

/// Fill color plus an opacity multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentStyle {
    /// Base fill color.
    pub color: Color,
    /// Opacity applied on top of the color's own alpha, 0.0..=1.0.
    pub alpha: f32,
}

impl SegmentStyle {
    /// Create a fully opaque style.
    pub const fn new(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    /// Replace the opacity.
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Color with the opacity folded into its alpha channel.
    pub fn effective_color(&self) -> Color {
        self.color.with_alpha(self.color.a * self.alpha.clamp(0.0, 1.0))
    }

    pub(crate) fn validate(&self, target: &'static str) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ConfigError::Alpha {
                target,
                alpha: self.alpha,
            });
        }
        Ok(())
    }
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self::new(Color::GREEN)
    }
}

/// Visual theme for segment bars.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Background behind the bar.
    pub background: Color,
    /// Fill of the background segments.
    pub segment: SegmentStyle,
    /// Fill of the progress overlay.
    pub progress: SegmentStyle,
}

impl Theme {
    /// Light theme: gray segments on white with a green overlay.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            segment: SegmentStyle::new(Color::LIGHT_GRAY),
            progress: SegmentStyle::new(Color::from_rgb_u32(0x00a5_d6a7)),
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::new(0.07, 0.08, 0.09, 1.0),
            segment: SegmentStyle::new(Color::new(0.28, 0.30, 0.33, 1.0)),
            progress: SegmentStyle::new(Color::from_rgb_u32(0x0066_bb6a)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_color_multiplies_alpha() {
        let style = SegmentStyle::new(Color::new(1.0, 0.0, 0.0, 0.5)).with_alpha(0.5);
        assert_eq!(style.effective_color().a, 0.25);
        assert_eq!(style.effective_color().r, 1.0);
    }

    #[test]
    fn alpha_out_of_range_is_rejected() {
        let style = SegmentStyle::default().with_alpha(1.5);
        assert!(matches!(
            style.validate("progress"),
            Err(ConfigError::Alpha { target: "progress", .. })
        ));
        assert!(SegmentStyle::default().with_alpha(0.0).validate("segment").is_ok());
    }
}
