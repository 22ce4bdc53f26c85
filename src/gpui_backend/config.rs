use crate::render::Color;

/// Configuration for the GPUI segment bar view.
#[derive(Debug, Clone)]
pub struct SegmentBarViewConfig {
    /// Bar height in pixels; the bar is centered vertically in the view.
    ///
    /// `None` fills the whole view height.
    pub bar_height: Option<f32>,
    /// Background fill behind the bar.
    pub background: Option<Color>,
    /// Keep requesting frames while the progress animates or breathes.
    pub animate: bool,
}

impl Default for SegmentBarViewConfig {
    fn default() -> Self {
        Self {
            bar_height: Some(16.0),
            background: None,
            animate: true,
        }
    }
}
