//! Freehand stroke definitions.

use super::color::Color;
use crate::util::Rect;

/// A position in surface space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Paint attributes frozen into a stroke when the gesture begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokePaint {
    /// Line width in pixels
    pub width: f64,
    /// Stroke RGB; always opaque, opacity lives in `alpha`
    pub color: Color,
    /// Stroke opacity (0 = invisible, 255 = opaque)
    pub alpha: u8,
}

impl StrokePaint {
    /// Color handed to the rasterizer: the stroke RGB with its own opacity.
    pub fn source_color(&self) -> Color {
        self.color.with_alpha8(self.alpha)
    }
}

/// One finished freehand gesture.
///
/// Strokes are immutable once built; the point path and the paint snapshot
/// are only readable.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    paint: StrokePaint,
}

impl Stroke {
    /// Builds a stroke from its path and paint snapshot.
    pub fn new(points: Vec<Point>, paint: StrokePaint) -> Self {
        Self { points, paint }
    }

    /// Points in the order they were traced.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn paint(&self) -> &StrokePaint {
        &self.paint
    }

    /// A stroke whose path never leaves its first point renders as a dot.
    pub fn is_dot(&self) -> bool {
        match self.points.split_first() {
            None => true,
            Some((first, rest)) => rest.iter().all(|p| p == first),
        }
    }

    /// Axis-aligned bounds of the rendered stroke, padded by half its width.
    ///
    /// Returns `None` for a stroke with no points.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box_for_points(&self.points, self.paint.width)
    }
}

fn stroke_padding(width: f64) -> f64 {
    (width / 2.0).ceil().max(1.0)
}

/// Bounds of a polyline drawn with the given width.
pub(crate) fn bounding_box_for_points(points: &[Point], width: f64) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;

    for p in rest {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let padding = stroke_padding(width);
    ensure_positive_rect(
        to_pixel((min_x - padding).floor()),
        to_pixel((min_y - padding).floor()),
        to_pixel((max_x + padding).ceil()),
        to_pixel((max_y + padding).ceil()),
    )
}

/// Clamps a surface coordinate into the `i32` pixel range.
fn to_pixel(value: f64) -> i32 {
    value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

fn ensure_positive_rect(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Rect> {
    let max_x = if min_x == max_x { max_x.saturating_add(1) } else { max_x };
    let max_y = if min_y == max_y { max_y.saturating_add(1) } else { max_y };
    Rect::from_min_max(min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;

    fn paint(width: f64) -> StrokePaint {
        StrokePaint {
            width,
            color: BLACK,
            alpha: 255,
        }
    }

    #[test]
    fn bounding_box_expands_with_width() {
        let stroke = Stroke::new(
            vec![Point::new(10.0, 20.0), Point::new(30.0, 40.0)],
            paint(6.0),
        );

        let rect = stroke.bounding_box().expect("stroke should have bounds");
        assert_eq!(rect.x, 7);
        assert_eq!(rect.y, 17);
        assert_eq!(rect.width, 26);
        assert_eq!(rect.height, 26);
    }

    #[test]
    fn single_point_is_a_dot_with_bounds() {
        let stroke = Stroke::new(vec![Point::new(5.0, 5.0)], paint(10.0));
        assert!(stroke.is_dot());

        let rect = stroke.bounding_box().unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0, 0, 10, 10));
    }

    #[test]
    fn repeated_point_is_a_dot() {
        let p = Point::new(1.5, 2.5);
        assert!(Stroke::new(vec![p, p, p], paint(2.0)).is_dot());
        assert!(!Stroke::new(vec![p, Point::new(3.0, 2.5)], paint(2.0)).is_dot());
    }

    #[test]
    fn far_off_surface_points_do_not_overflow_bounds() {
        let far = Stroke::new(vec![Point::new(3e9, 3e9)], paint(4.0));
        assert!(far.bounding_box().is_none());

        let spanning = Stroke::new(
            vec![Point::new(-3e9, 0.0), Point::new(3e9, 0.0)],
            paint(4.0),
        );
        assert!(spanning.bounding_box().is_none());

        let near_edge = Stroke::new(vec![Point::new(2.0e9, 0.0)], paint(2.0));
        let rect = near_edge.bounding_box().unwrap();
        assert_eq!((rect.x, rect.width), (1_999_999_999, 2));
    }

    #[test]
    fn empty_stroke_has_no_bounds() {
        assert!(Stroke::new(Vec::new(), paint(4.0)).bounding_box().is_none());
    }

    #[test]
    fn source_color_carries_stroke_alpha() {
        let paint = StrokePaint {
            width: 1.0,
            color: BLACK,
            alpha: 0,
        };
        assert_eq!(paint.source_color().a, 0.0);
    }
}
