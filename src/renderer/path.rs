//! Signature path generation
//!
//! Turns the ordered key points of a name into SVG path segments using one of
//! five interpolation strategies.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::Point;

/// Tension used by the Catmull-Rom spline
const CATMULL_ROM_TENSION: f64 = 0.5;

/// Vertical pull of the cubic-bezier control points
const CUBIC_WAVE_OFFSET: f64 = 20.0;

/// Height of the simple-curve arc above the higher endpoint
const SIMPLE_CURVE_LIFT: f64 = 15.0;

/// Interpolation strategy between consecutive key points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CurveType {
    /// Straight segments
    #[default]
    Linear,
    /// Spline through every point with continuous tangents
    CatmullRom,
    /// Quadratic segments with the control point on the chord midpoint
    QuadraticBezier,
    /// Cubic segments with a fixed up/down wave
    CubicBezier,
    /// Quadratic arcs lifted above the higher endpoint
    SimpleCurve,
}

impl CurveType {
    pub const ALL: [CurveType; 5] = [
        CurveType::Linear,
        CurveType::CatmullRom,
        CurveType::QuadraticBezier,
        CurveType::CubicBezier,
        CurveType::SimpleCurve,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CurveType::Linear => "linear",
            CurveType::CatmullRom => "catmull-rom",
            CurveType::QuadraticBezier => "quadratic-bezier",
            CurveType::CubicBezier => "cubic-bezier",
            CurveType::SimpleCurve => "simple-curve",
        }
    }

    /// Parse a curve name; anything unrecognized falls back to [`CurveType::Linear`]
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
        match Self::ALL.iter().find(|c| c.name() == wanted) {
            Some(curve) => *curve,
            None => {
                debug!(curve = name, "unknown curve type, using linear");
                CurveType::Linear
            }
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for CurveType {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for CurveType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<CurveType> for String {
    fn from(curve: CurveType) -> Self {
        curve.name().to_string()
    }
}

/// A segment of a signature path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Quadratic Bezier curve
    QuadraticTo { control: Point, end: Point },
    /// Cubic Bezier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl PathSegment {
    /// Final point of the segment
    pub fn end(&self) -> Point {
        match self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => *p,
            PathSegment::QuadraticTo { end, .. } | PathSegment::CubicTo { end, .. } => *end,
        }
    }

    /// Evaluate the segment at `t` in `0.0..=1.0`, starting from `start`
    pub fn point_at(&self, start: Point, t: f64) -> Point {
        let u = 1.0 - t;
        match *self {
            PathSegment::MoveTo(p) => p,
            PathSegment::LineTo(p) => {
                Point::new(start.x * u + p.x * t, start.y * u + p.y * t)
            }
            PathSegment::QuadraticTo { control, end } => Point::new(
                u * u * start.x + 2.0 * u * t * control.x + t * t * end.x,
                u * u * start.y + 2.0 * u * t * control.y + t * t * end.y,
            ),
            PathSegment::CubicTo {
                control1,
                control2,
                end,
            } => Point::new(
                u * u * u * start.x
                    + 3.0 * u * u * t * control1.x
                    + 3.0 * u * t * t * control2.x
                    + t * t * t * end.x,
                u * u * u * start.y
                    + 3.0 * u * u * t * control1.y
                    + 3.0 * u * t * t * control2.y
                    + t * t * t * end.y,
            ),
        }
    }
}

/// A generated signature path ready for SVG rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignaturePath {
    pub segments: Vec<PathSegment>,
}

impl SignaturePath {
    /// A path with nothing to draw
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();

        for seg in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M {} {}", format_number(p.x), format_number(p.y)));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!("L {} {}", format_number(p.x), format_number(p.y)));
                }
                PathSegment::QuadraticTo { control, end } => {
                    d.push_str(&format!(
                        "Q {} {} {} {}",
                        format_number(control.x),
                        format_number(control.y),
                        format_number(end.x),
                        format_number(end.y)
                    ));
                }
                PathSegment::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    d.push_str(&format!(
                        "C {} {}, {} {}, {} {}",
                        format_number(control1.x),
                        format_number(control1.y),
                        format_number(control2.x),
                        format_number(control2.y),
                        format_number(end.x),
                        format_number(end.y)
                    ));
                }
            }
        }

        d
    }
}

impl fmt::Display for SignaturePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg_d())
    }
}

/// Shortest decimal form that round-trips, without a trailing `.0`
pub(crate) fn format_number(v: f64) -> String {
    // Normalize negative zero so it prints as "0"
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{}", v)
}

/// Generate the signature path through `points` with the given curve type
///
/// Zero points give an empty path and a single point gives a lone move.
/// Exactly two points always give a straight line, whatever the curve type.
pub fn generate_path(points: &[Point], curve: CurveType) -> SignaturePath {
    let (first, rest) = match points.split_first() {
        Some(split) => split,
        None => return SignaturePath::empty(),
    };

    let mut segments = Vec::with_capacity(points.len());
    segments.push(PathSegment::MoveTo(*first));

    if points.len() == 2 {
        segments.push(PathSegment::LineTo(rest[0]));
        return SignaturePath { segments };
    }

    for (i, pair) in points.windows(2).enumerate() {
        let (current, next) = (pair[0], pair[1]);
        let segment = match curve {
            CurveType::Linear => PathSegment::LineTo(next),
            CurveType::CatmullRom => catmull_rom_segment(points, i),
            CurveType::QuadraticBezier => PathSegment::QuadraticTo {
                control: current.midpoint(next),
                end: next,
            },
            CurveType::CubicBezier => cubic_wave_segment(current, next),
            CurveType::SimpleCurve => PathSegment::QuadraticTo {
                control: Point::new(
                    (current.x + next.x) / 2.0,
                    current.y.min(next.y) - SIMPLE_CURVE_LIFT,
                ),
                end: next,
            },
        };
        segments.push(segment);
    }

    SignaturePath { segments }
}

/// Cubic segment from `points[i]` to `points[i + 1]` of a Catmull-Rom spline
///
/// Missing neighbors at either end are replaced by the endpoint itself.
fn catmull_rom_segment(points: &[Point], i: usize) -> PathSegment {
    let p1 = points[i];
    let p2 = points[i + 1];
    let p0 = if i == 0 { p1 } else { points[i - 1] };
    let p3 = points.get(i + 2).copied().unwrap_or(p2);

    let t = CATMULL_ROM_TENSION;
    PathSegment::CubicTo {
        control1: Point::new(
            p1.x + (p2.x - p0.x) * t / 6.0,
            p1.y + (p2.y - p0.y) * t / 6.0,
        ),
        control2: Point::new(
            p2.x - (p3.x - p1.x) * t / 6.0,
            p2.y - (p3.y - p1.y) * t / 6.0,
        ),
        end: p2,
    }
}

/// Cubic segment with control points at 30% and 70% of the chord, pulled
/// up and down by a fixed offset
fn cubic_wave_segment(current: Point, next: Point) -> PathSegment {
    let dx = next.x - current.x;
    let dy = next.y - current.y;
    PathSegment::CubicTo {
        control1: Point::new(
            current.x + dx * 0.3,
            current.y + dy * 0.3 - CUBIC_WAVE_OFFSET,
        ),
        control2: Point::new(
            current.x + dx * 0.7,
            current.y + dy * 0.7 + CUBIC_WAVE_OFFSET,
        ),
        end: next,
    }
}
