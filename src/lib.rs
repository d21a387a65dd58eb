//! Keyboard Signature - draw a name by tracing its letters across a keyboard
//!
//! Each character of a name is looked up on a keyboard layout, the key
//! positions become points, and the points are joined by one of several
//! curve types. The resulting path can be exported as SVG or PNG.
//!
//! # Example
//!
//! ```rust
//! use keyboard_signature::{render, SignatureOptions};
//!
//! let svg = render("AB", &SignatureOptions::default()).unwrap();
//! assert!(svg.contains(r#"d="M 73 100 L 343 160""#));
//! ```

pub mod claim;
pub mod color;
pub mod error;
pub mod layout;
pub mod preset;
pub mod renderer;
pub mod style;

pub use color::{generate_smooth_gradient, GradientStop, Oklab, Rgb};
pub use error::ParseError;
pub use layout::{map_to_points, resolve_layout, CharacterTable, KeyboardLayout, Point};
pub use preset::{Preset, PresetError};
pub use renderer::{
    generate_path, png_data_uri, render_svg, signature_height, CurveType, PathSegment, RasterError,
    SignaturePath, SvgConfig,
};
pub use style::{ColorMode, DashPattern, StrokeStyle};

use serde::{Deserialize, Serialize};
use tracing::debug;

use renderer::KeyboardOverlay;

/// Everything that decides how a name is drawn
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SignatureOptions {
    /// Keyboard layout the name is typed on
    pub layout: KeyboardLayout,
    /// Whether the number row is part of the keyboard
    pub include_numbers: bool,
    /// Interpolation between consecutive keys
    pub curve: CurveType,
    /// Presentation of the stroke
    pub stroke: StrokeStyle,
}

impl SignatureOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyboard layout
    pub fn with_layout(mut self, layout: KeyboardLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Enable or disable the number row
    pub fn with_numbers(mut self, include_numbers: bool) -> Self {
        self.include_numbers = include_numbers;
        self
    }

    /// Set the curve type
    pub fn with_curve(mut self, curve: CurveType) -> Self {
        self.curve = curve;
        self
    }

    /// Set the stroke style
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Canvas height for these options
    pub fn height(&self) -> f64 {
        signature_height(self.layout, self.include_numbers)
    }
}

/// A name traced across a keyboard
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    options: SignatureOptions,
    points: Vec<Point>,
    path: SignaturePath,
}

impl Signature {
    /// Map `name` onto the keyboard and build its path
    pub fn new(name: &str, options: &SignatureOptions) -> Self {
        let table = resolve_layout(options.layout, options.include_numbers);
        let points = map_to_points(name, table, options.include_numbers);
        let path = generate_path(&points, options.curve);
        debug!(
            layout = %options.layout,
            curve = %options.curve,
            points = points.len(),
            "built signature"
        );

        Self {
            name: name.to_string(),
            options: options.clone(),
            points,
            path,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &SignatureOptions {
        &self.options
    }

    /// Pixel positions of the recognized characters, in typing order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn path(&self) -> &SignaturePath {
        &self.path
    }

    /// The path as an SVG `d` attribute
    pub fn path_data(&self) -> String {
        self.path.to_svg_d()
    }

    /// True when no character of the name is on the keyboard
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn height(&self) -> f64 {
        self.options.height()
    }

    /// SVG document with the default configuration
    pub fn to_svg(&self) -> Option<String> {
        self.to_svg_with_config(&SvgConfig::default())
    }

    /// SVG document; draws the keyboard when `config.show_keyboard` is set
    pub fn to_svg_with_config(&self, config: &SvgConfig) -> Option<String> {
        let table = resolve_layout(self.options.layout, self.options.include_numbers);
        let overlay = KeyboardOverlay::for_name(&self.name, table, self.options.include_numbers);
        renderer::render_svg_with_keyboard(
            &self.path,
            &self.options.stroke,
            self.height(),
            config,
            Some(&overlay),
        )
    }

    /// PNG image at twice the canvas size
    pub fn to_png(&self) -> Result<Option<Vec<u8>>, RasterError> {
        renderer::render_png(
            &self.path,
            &self.options.stroke,
            self.height(),
            &SvgConfig::default(),
        )
    }
}

/// Render a name to SVG with the default configuration
///
/// Returns `None` when none of the characters are on the keyboard.
pub fn render(name: &str, options: &SignatureOptions) -> Option<String> {
    Signature::new(name, options).to_svg()
}

/// Render a name to SVG with a custom configuration
///
/// # Example
///
/// ```rust
/// use keyboard_signature::{render_with_config, SignatureOptions, SvgConfig};
///
/// let config = SvgConfig::new().with_keyboard(true);
/// let svg = render_with_config("hi", &SignatureOptions::default(), &config).unwrap();
/// assert!(svg.contains(r#"<g id="keyboard""#));
/// ```
pub fn render_with_config(
    name: &str,
    options: &SignatureOptions,
    config: &SvgConfig,
) -> Option<String> {
    Signature::new(name, options).to_svg_with_config(config)
}

/// Render a name to PNG bytes
pub fn render_png(name: &str, options: &SignatureOptions) -> Result<Option<Vec<u8>>, RasterError> {
    Signature::new(name, options).to_png()
}
