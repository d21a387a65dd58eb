//! SVG generation for signature paths

use std::collections::BTreeSet;

use tracing::debug;

use crate::color::{generate_smooth_gradient, GradientStop, Rgb, DEFAULT_GRADIENT_STOPS};
use crate::layout::CharacterTable;
use crate::style::{Paint, StrokeStyle};

use super::path::{format_number, SignaturePath};
use super::SvgConfig;

pub const GRADIENT_ID: &str = "pathGradient";
pub const GLOW_FILTER_ID: &str = "glow";
pub const PATH_ID: &str = "signature-path";

const KEY_PITCH: f64 = 60.0;
const KEY_WIDTH: f64 = 56.0;
const KEY_HEIGHT: f64 = 48.0;
const KEY_TOP: f64 = 15.0;
const KEY_TOP_NUMERIC: f64 = 75.0;

/// Keyboard drawn underneath a signature
#[derive(Debug, Clone)]
pub struct KeyboardOverlay<'a> {
    pub table: &'a CharacterTable,
    pub include_numbers: bool,
    /// Keys that appear in the name
    pub active: BTreeSet<char>,
    /// Key of the last typed character
    pub current: Option<char>,
}

impl<'a> KeyboardOverlay<'a> {
    /// Overlay highlighting the keys typed for `name`
    pub fn for_name(name: &str, table: &'a CharacterTable, include_numbers: bool) -> Self {
        let upper = name.to_uppercase();
        Self {
            table,
            include_numbers,
            active: crate::layout::active_keys(name, table),
            current: upper.chars().last().filter(|&c| table.contains(c)),
        }
    }

    /// Canvas width that fits every key, at least the default 650
    pub fn width(&self) -> f64 {
        crate::layout::tables::table_width(self.table)
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    width: f64,
    height: f64,
    defs: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder for a canvas of the given size
    pub fn new(config: SvgConfig, width: f64, height: f64) -> Self {
        Self {
            config,
            width,
            height,
            defs: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_at(&self, depth: usize) -> String {
        if self.config.pretty_print {
            "  ".repeat(depth)
        } else {
            String::new()
        }
    }

    fn indent_str(&self) -> String {
        self.indent_at(self.indent)
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a horizontal gradient spanning the full canvas width
    pub fn add_gradient(&mut self, id: &str, stops: &[GradientStop]) {
        let nl = self.newline().to_string();
        let mut def = format!(
            r#"{}<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="{}" y2="0">"#,
            self.indent_at(2),
            id,
            format_number(self.width)
        );
        for stop in stops {
            def.push_str(&nl);
            def.push_str(&format!(
                r#"{}<stop offset="{}%" stop-color="{}" stop-opacity="1"/>"#,
                self.indent_at(3),
                stop.offset,
                stop.color.to_hex()
            ));
        }
        def.push_str(&nl);
        def.push_str(&format!("{}</linearGradient>", self.indent_at(2)));
        self.defs.push(def);
    }

    /// Add a glow filter: the blurred stroke merged under the sharp one
    ///
    /// The filter region covers the whole canvas. A bounding-box region
    /// collapses to nothing for a path drawn along a single key row.
    pub fn add_glow_filter(&mut self, id: &str, std_deviation: f64) {
        let nl = self.newline();
        let lines = [
            (
                2,
                format!(
                    r#"<filter id="{}" filterUnits="userSpaceOnUse" x="0" y="0" width="{}" height="{}">"#,
                    id,
                    format_number(self.width),
                    format_number(self.height)
                ),
            ),
            (
                3,
                format!(
                    r#"<feGaussianBlur stdDeviation="{}" result="coloredBlur"/>"#,
                    format_number(std_deviation)
                ),
            ),
            (3, "<feMerge>".to_string()),
            (4, r#"<feMergeNode in="coloredBlur"/>"#.to_string()),
            (4, r#"<feMergeNode in="SourceGraphic"/>"#.to_string()),
            (3, "</feMerge>".to_string()),
            (2, "</filter>".to_string()),
        ];
        let def = lines
            .iter()
            .map(|(depth, line)| format!("{}{}", self.indent_at(*depth), line))
            .collect::<Vec<_>>()
            .join(nl);
        self.defs.push(def);
    }

    /// Fill the whole canvas
    pub fn add_background(&mut self, color: Rgb) {
        self.elements.push(format!(
            r#"{}<rect width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            format_number(self.width),
            format_number(self.height),
            color.to_hex()
        ));
    }

    /// Add a group element with optional ID and attributes
    pub fn start_group(&mut self, id: Option<&str>, attrs: &str) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, attrs));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Draw every key of the overlay's table as a labelled rounded rect
    pub fn add_keyboard(&mut self, keyboard: &KeyboardOverlay<'_>) {
        let top = if keyboard.include_numbers {
            KEY_TOP_NUMERIC
        } else {
            KEY_TOP
        };

        self.start_group(
            Some("keyboard"),
            r#" font-family="monospace" font-size="14" text-anchor="middle" dominant-baseline="central""#,
        );
        for key in keyboard.table.keys() {
            let x = key.position.x * KEY_PITCH;
            let y = key.position.y * KEY_PITCH + top;

            let (key_style, label_fill) = if keyboard.current == Some(key.label) {
                (r##"fill="#ffffff" fill-opacity="0.5" stroke="#a3a3a3""##, "#000000")
            } else if keyboard.active.contains(&key.label) {
                (r##"fill="#171717" stroke="#262626""##, "#ffffff")
            } else {
                (r##"fill="none" stroke="#262626" stroke-opacity="0.5""##, "#d4d4d4")
            };

            self.elements.push(format!(
                r#"{}<rect x="{}" y="{}" width="{}" height="{}" rx="8" {}/>"#,
                self.indent_str(),
                format_number(x),
                format_number(y),
                format_number(KEY_WIDTH),
                format_number(KEY_HEIGHT),
                key_style
            ));
            self.elements.push(format!(
                r#"{}<text x="{}" y="{}" fill="{}">{}</text>"#,
                self.indent_str(),
                format_number(x + KEY_WIDTH / 2.0),
                format_number(y + KEY_HEIGHT / 2.0),
                label_fill,
                escape_xml(&key.label.to_string())
            ));
        }
        self.end_group();
    }

    /// Add the signature stroke itself
    pub fn add_signature_path(&mut self, path: &SignaturePath, stroke: &str, style: &StrokeStyle) {
        let dash = style
            .dash
            .dash_array()
            .map(|d| format!(r#" stroke-dasharray="{}""#, d))
            .unwrap_or_default();
        let filter = if style.glow {
            format!(r#" filter="url(#{})""#, GLOW_FILTER_ID)
        } else {
            String::new()
        };

        self.elements.push(format!(
            r#"{}<path id="{}" d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"{}{}/>"#,
            self.indent_str(),
            PATH_ID,
            path.to_svg_d(),
            stroke,
            format_number(style.width),
            dash,
            filter
        ));
    }

    /// Build the final SVG string
    pub fn build(self) -> String {
        let nl = self.newline();
        let w = format_number(self.width);
        let h = format_number(self.height);

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        ));
        svg.push_str(nl);

        if !self.defs.is_empty() {
            svg.push_str(&self.indent_at(1));
            svg.push_str("<defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str(&self.indent_at(1));
            svg.push_str("</defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Height of the signature canvas
///
/// Numeric mode and wide-script layouts need the taller canvas.
pub fn signature_height(layout: crate::layout::KeyboardLayout, include_numbers: bool) -> f64 {
    if include_numbers || layout.is_wide_script() {
        260.0
    } else {
        200.0
    }
}

/// Render a signature path to an SVG document
///
/// Returns `None` when the path is empty; there is nothing to export.
pub fn render_svg(
    path: &SignaturePath,
    stroke: &StrokeStyle,
    height: f64,
    config: &SvgConfig,
) -> Option<String> {
    render_svg_with_keyboard(path, stroke, height, config, None)
}

/// Render a signature path with an optional keyboard underneath
///
/// The keyboard is only drawn when `config.show_keyboard` is set; the canvas
/// widens if the keys would not fit.
pub fn render_svg_with_keyboard(
    path: &SignaturePath,
    stroke: &StrokeStyle,
    height: f64,
    config: &SvgConfig,
    keyboard: Option<&KeyboardOverlay<'_>>,
) -> Option<String> {
    if path.is_empty() {
        debug!("empty signature path, skipping SVG export");
        return None;
    }

    let keyboard = keyboard.filter(|_| config.show_keyboard);
    let width = keyboard.map_or(config.width, |kb| config.width.max(kb.width()));
    let mut builder = SvgBuilder::new(config.clone(), width, height);

    let stroke_ref = match stroke.paint() {
        Paint::Solid(color) => color.to_hex(),
        Paint::Gradient { start, end } => {
            let stops = generate_smooth_gradient(start, end, DEFAULT_GRADIENT_STOPS);
            builder.add_gradient(GRADIENT_ID, &stops);
            format!("url(#{})", GRADIENT_ID)
        }
    };
    if stroke.glow {
        builder.add_glow_filter(GLOW_FILTER_ID, stroke.width);
    }

    if let Some(color) = config.background {
        builder.add_background(color);
    }
    if let Some(kb) = keyboard {
        builder.add_keyboard(kb);
    }
    builder.add_signature_path(path, &stroke_ref, stroke);

    Some(builder.build())
}

/// Escape special XML characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{resolve_layout, KeyboardLayout, Point};
    use crate::renderer::{generate_path, CurveType};
    use crate::style::DashPattern;
    use pretty_assertions::assert_eq;

    fn line_path() -> SignaturePath {
        generate_path(
            &[Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            CurveType::Linear,
        )
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }

    #[test]
    fn test_empty_path_renders_nothing() {
        let svg = render_svg(
            &SignaturePath::empty(),
            &StrokeStyle::default(),
            200.0,
            &SvgConfig::default(),
        );
        assert_eq!(svg, None);
    }

    #[test]
    fn test_compact_document() {
        let config = SvgConfig::new().with_pretty_print(false);
        let svg = render_svg(&line_path(), &StrokeStyle::default(), 200.0, &config).unwrap();
        insta::assert_snapshot!(svg, @r##"<svg xmlns="http://www.w3.org/2000/svg" width="650" height="200" viewBox="0 0 650 200"><path id="signature-path" d="M 0 0 L 10 10" fill="none" stroke="#ffffff" stroke-width="3" stroke-linecap="round" stroke-linejoin="round"/></svg>"##);
    }

    #[test]
    fn test_standalone_declaration() {
        let config = SvgConfig::new().with_standalone(true);
        let svg = render_svg(&line_path(), &StrokeStyle::default(), 200.0, &config).unwrap();
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    }

    #[test]
    fn test_gradient_defs() {
        let style = StrokeStyle::new().with_gradient(Rgb::BLACK, Rgb::WHITE);
        let svg = render_svg(&line_path(), &style, 260.0, &SvgConfig::default()).unwrap();

        assert!(svg.contains(r#"height="260""#));
        assert!(svg.contains(r#"<linearGradient id="pathGradient" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="650" y2="0">"#));
        assert_eq!(svg.matches("<stop ").count(), 6);
        assert!(svg.contains(r##"<stop offset="0%" stop-color="#000000" stop-opacity="1"/>"##));
        assert!(svg.contains(r##"<stop offset="100%" stop-color="#ffffff" stop-opacity="1"/>"##));
        assert!(svg.contains(r#"stroke="url(#pathGradient)""#));
    }

    #[test]
    fn test_dash_and_glow() {
        let style = StrokeStyle::new()
            .with_width(4.0)
            .with_dash(DashPattern::Dashed)
            .with_glow(true);
        let svg = render_svg(&line_path(), &style, 200.0, &SvgConfig::default()).unwrap();

        assert!(svg.contains(r#"stroke-dasharray="6 12""#));
        assert!(svg.contains(r#"filter="url(#glow)""#));
        assert!(svg.contains(
            r#"<filter id="glow" filterUnits="userSpaceOnUse" x="0" y="0" width="650" height="200">"#
        ));
        assert!(svg.contains(r#"<feGaussianBlur stdDeviation="4" result="coloredBlur"/>"#));
        assert!(svg.contains(r#"<feMergeNode in="SourceGraphic"/>"#));
    }

    #[test]
    fn test_solid_stroke_has_no_defs() {
        let svg = render_svg(
            &line_path(),
            &StrokeStyle::default(),
            200.0,
            &SvgConfig::default(),
        )
        .unwrap();
        assert!(!svg.contains("<defs>"));
        assert!(!svg.contains("stroke-dasharray"));
        assert!(!svg.contains("filter="));
    }

    #[test]
    fn test_background_rect() {
        let config = SvgConfig::new().with_background(Rgb::BLACK);
        let svg = render_svg(&line_path(), &StrokeStyle::default(), 200.0, &config).unwrap();
        assert!(svg.contains(r##"<rect width="650" height="200" fill="#000000"/>"##));
        // Background goes under the stroke
        assert!(svg.find("<rect").unwrap() < svg.find("<path").unwrap());
    }

    #[test]
    fn test_keyboard_overlay() {
        let table = resolve_layout(KeyboardLayout::Qwerty, false);
        let overlay = KeyboardOverlay::for_name("ab", table, false);
        assert_eq!(overlay.current, Some('B'));

        let config = SvgConfig::new().with_keyboard(true);
        let svg = render_svg_with_keyboard(
            &line_path(),
            &StrokeStyle::default(),
            200.0,
            &config,
            Some(&overlay),
        )
        .unwrap();

        assert!(svg.contains(r#"<g id="keyboard""#));
        assert_eq!(svg.matches(r#"rx="8""#).count(), table.len());
        // 'A' sits at (0.75, 1): left 45, top 75
        assert!(svg.contains(r##"<rect x="45" y="75" width="56" height="48" rx="8" fill="#171717" stroke="#262626"/>"##));
        assert!(svg.contains(r##"fill="#000000">B</text>"##));
    }

    #[test]
    fn test_keyboard_hidden_unless_enabled() {
        let table = resolve_layout(KeyboardLayout::Qwerty, false);
        let overlay = KeyboardOverlay::for_name("ab", table, false);
        let svg = render_svg_with_keyboard(
            &line_path(),
            &StrokeStyle::default(),
            200.0,
            &SvgConfig::default(),
            Some(&overlay),
        )
        .unwrap();
        assert!(!svg.contains("keyboard"));
    }

    #[test]
    fn test_wide_keyboard_widens_canvas() {
        let table = resolve_layout(KeyboardLayout::Arabic, false);
        let overlay = KeyboardOverlay::for_name("", table, false);
        assert_eq!(
            overlay.width(),
            crate::layout::keyboard_width(KeyboardLayout::Arabic, false)
        );
        assert_eq!(overlay.width(), 806.0);

        let config = SvgConfig::new().with_keyboard(true);
        let svg = render_svg_with_keyboard(
            &line_path(),
            &StrokeStyle::default(),
            260.0,
            &config,
            Some(&overlay),
        )
        .unwrap();
        assert!(svg.contains(&format!(r#"width="{}""#, overlay.width())));
    }

    #[test]
    fn test_signature_height() {
        assert_eq!(signature_height(KeyboardLayout::Qwerty, false), 200.0);
        assert_eq!(signature_height(KeyboardLayout::Qwerty, true), 260.0);
        assert_eq!(signature_height(KeyboardLayout::Arabic, false), 260.0);
    }
}
