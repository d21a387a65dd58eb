//! Configuration for SVG rendering

use crate::color::Rgb;
use crate::layout::tables::MIN_KEYBOARD_WIDTH;

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Canvas width in pixels
    pub width: f64,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Solid fill drawn behind everything; transparent when `None`
    pub background: Option<Rgb>,

    /// Whether to draw the keyboard under the stroke
    pub show_keyboard: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: MIN_KEYBOARD_WIDTH,
            standalone: false,
            pretty_print: true,
            background: None,
            show_keyboard: false,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Fill the canvas with a solid color
    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    /// Leave the canvas transparent
    pub fn without_background(mut self) -> Self {
        self.background = None;
        self
    }

    /// Set whether the keyboard is drawn
    pub fn with_keyboard(mut self, show: bool) -> Self {
        self.show_keyboard = show;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert_eq!(config.width, 650.0);
        assert!(!config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.background, None);
        assert!(!config.show_keyboard);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_width(800.0)
            .with_standalone(true)
            .with_pretty_print(false)
            .with_background(Rgb::BLACK)
            .with_keyboard(true);

        assert_eq!(config.width, 800.0);
        assert!(config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.background, Some(Rgb::BLACK));
        assert!(config.show_keyboard);

        let config = config.without_background();
        assert_eq!(config.background, None);
    }
}
