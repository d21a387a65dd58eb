//! PNG export through resvg

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;
use thiserror::Error;
use tracing::debug;

use crate::color::Rgb;
use crate::style::StrokeStyle;

use super::path::SignaturePath;
use super::svg::render_svg;
use super::SvgConfig;

/// Raster output is twice the canvas size in each dimension
pub const RASTER_SCALE: f32 = 2.0;

/// Errors that can occur while rasterizing a signature
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to parse generated SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// Render a signature path to PNG bytes
///
/// The image is `2 * width` by `2 * height` pixels on an opaque black
/// background. The keyboard is never drawn. Returns `Ok(None)` when the path
/// is empty.
pub fn render_png(
    path: &SignaturePath,
    stroke: &StrokeStyle,
    height: f64,
    config: &SvgConfig,
) -> Result<Option<Vec<u8>>, RasterError> {
    let svg_config = config
        .clone()
        .with_background(Rgb::BLACK)
        .with_keyboard(false)
        .with_pretty_print(false);
    let Some(svg) = render_svg(path, stroke, height, &svg_config) else {
        debug!("empty signature path, skipping PNG export");
        return Ok(None);
    };

    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())?;

    let width = (config.width as f32 * RASTER_SCALE).round() as u32;
    let height = (height as f32 * RASTER_SCALE).round() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(RasterError::Allocation { width, height })?;
    pixmap.fill(Color::BLACK);

    resvg::render(
        &tree,
        Transform::from_scale(RASTER_SCALE, RASTER_SCALE),
        &mut pixmap.as_mut(),
    );

    let png = pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    debug!(width, height, bytes = png.len(), "encoded signature PNG");
    Ok(Some(png))
}

/// Wrap PNG bytes in a `data:` URI
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;
    use crate::renderer::{generate_path, CurveType};

    fn sample_path() -> SignaturePath {
        generate_path(
            &[Point::new(73.0, 100.0), Point::new(343.0, 160.0)],
            CurveType::Linear,
        )
    }

    #[test]
    fn test_empty_path_gives_no_png() {
        let png = render_png(
            &SignaturePath::empty(),
            &StrokeStyle::default(),
            200.0,
            &SvgConfig::default(),
        )
        .unwrap();
        assert!(png.is_none());
    }

    #[test]
    fn test_png_dimensions_and_background() {
        let png = render_png(
            &sample_path(),
            &StrokeStyle::default(),
            200.0,
            &SvgConfig::default(),
        )
        .unwrap()
        .unwrap();

        let pixmap = Pixmap::decode_png(&png).unwrap();
        assert_eq!(pixmap.width(), 1300);
        assert_eq!(pixmap.height(), 400);

        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!(
            (corner.red(), corner.green(), corner.blue(), corner.alpha()),
            (0, 0, 0, 255)
        );

        // Midpoint of the stroke, (208, 130) at scale 2
        let on_stroke = pixmap.pixel(416, 260).unwrap();
        assert!(on_stroke.red() > 200);
        assert_eq!(on_stroke.alpha(), 255);
    }

    #[test]
    fn test_glow_keeps_single_row_stroke() {
        // Both points on one row: the path's bounding box has zero height
        let path = generate_path(
            &[Point::new(58.0, 40.0), Point::new(118.0, 40.0)],
            CurveType::Linear,
        );
        let style = StrokeStyle::new().with_glow(true);
        let png = render_png(&path, &style, 200.0, &SvgConfig::default())
            .unwrap()
            .unwrap();

        let pixmap = Pixmap::decode_png(&png).unwrap();
        let on_stroke = pixmap.pixel(176, 80).unwrap();
        assert!(on_stroke.red() > 200);
        assert!(on_stroke.green() > 200);
    }

    #[test]
    fn test_png_height_follows_canvas() {
        let png = render_png(
            &sample_path(),
            &StrokeStyle::default(),
            260.0,
            &SvgConfig::default(),
        )
        .unwrap()
        .unwrap();
        let pixmap = Pixmap::decode_png(&png).unwrap();
        assert_eq!(pixmap.height(), 520);
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(png_data_uri(b"abc"), "data:image/png;base64,YWJj");
    }
}
