//! Styling configuration for the countdown widget.

use crate::indicator::IndicatorConfig;
use crate::label::{Font, Weight};

/// Display styling of a countdown: label font and colour plus the ring's
/// own configuration.
///
/// Applying a configuration never touches the countdown's timing state, so
/// a running countdown can be restyled at any point.
///
/// ```rust
/// use countdown_ring::config::Configuration;
/// use countdown_ring::label::{Font, Weight};
///
/// let config = Configuration {
///     font: Font::new(Weight::Regular).italic(true),
///     text_color: "#ffcc00".to_string(),
///     ..Configuration::default()
/// };
/// assert_eq!(config.indicator.stroke_width, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Font of the remaining-count label.
    pub font: Font,
    /// Foreground colour of the label.
    pub text_color: String,
    /// Stroke width and colours of the ring.
    pub indicator: IndicatorConfig,
}

impl Default for Configuration {
    /// Bold white digits over a gray track with a white fill.
    fn default() -> Self {
        Self {
            font: Font::new(Weight::Bold),
            text_color: "#FFFFFF".to_string(),
            indicator: IndicatorConfig {
                stroke_width: 1,
                track_color: "#808080".to_string(),
                fill_color: "#FFFFFF".to_string(),
            },
        }
    }
}
