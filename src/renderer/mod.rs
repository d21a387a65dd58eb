//! Signature rendering: curve interpolation and export
//!
//! Points from the layout mapper become a [`SignaturePath`], which is then
//! written out as an SVG document or rasterized to PNG.

pub mod config;
pub mod path;
pub mod raster;
pub mod svg;

pub use config::SvgConfig;
pub use path::{generate_path, CurveType, PathSegment, SignaturePath};
pub use raster::{png_data_uri, render_png, RasterError};
pub use svg::{render_svg, render_svg_with_keyboard, signature_height, KeyboardOverlay, SvgBuilder};
