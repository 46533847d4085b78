//! Geometric primitives for skin placement and surface layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in editor space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle
//!
//! # Coordinate System
//!
//! The editor uses the same convention as SVG: origin at the top-left corner,
//! X growing to the right and Y growing downward. Unlike diagram layout code,
//! visuals are positioned by their **top-left** corner, which matches how a
//! retained scene graph relocates its children.

/// A 2D point in editor coordinate space.
///
/// # Examples
///
/// ```
/// # use grapheditor_core::geometry::Point;
/// let p = Point::new(10.0, 20.0).add_point(Point::new(5.0, 5.0));
/// assert_eq!(p.x(), 15.0);
/// assert_eq!(p.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Rounds both coordinates to the nearest multiple of `spacing`.
    ///
    /// A non-positive spacing leaves the point unchanged.
    ///
    /// ```
    /// # use grapheditor_core::geometry::Point;
    /// let snapped = Point::new(23.0, 36.0).snap_to(10.0);
    /// assert_eq!(snapped, Point::new(20.0, 40.0));
    /// ```
    pub fn snap_to(self, spacing: f32) -> Self {
        if spacing <= 0.0 {
            return self;
        }
        Self {
            x: (self.x / spacing).round() * spacing,
            y: (self.y / spacing).round() * spacing,
        }
    }

    /// Clamps both coordinates into the rectangle spanned by `min` and `max`.
    ///
    /// If `max` is smaller than `min` on an axis, `min` wins on that axis.
    pub fn clamp(self, min: Point, max: Point) -> Self {
        Self {
            x: self.x.min(max.x).max(min.x),
            y: self.y.min(max.y).max(min.y),
        }
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a size that has the max width and height of the two
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Checks if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle described by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns `true` if the point lies inside or on the edge of the bounds.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.add_point(Point::new(1.0, 1.0)), Point::new(4.0, 5.0));
        assert_eq!(p.sub_point(Point::new(1.0, 1.0)), Point::new(2.0, 3.0));
    }

    #[test]
    fn test_point_snap_to() {
        assert_eq!(Point::new(14.0, 16.0).snap_to(10.0), Point::new(10.0, 20.0));
        assert_eq!(Point::new(14.0, 16.0).snap_to(0.0), Point::new(14.0, 16.0));
        assert_eq!(Point::new(-6.0, 4.0).snap_to(10.0), Point::new(-10.0, 0.0));
    }

    #[test]
    fn test_point_clamp() {
        let min = Point::new(0.0, 0.0);
        let max = Point::new(100.0, 50.0);

        assert_eq!(Point::new(-5.0, 60.0).clamp(min, max), Point::new(0.0, 50.0));
        assert_eq!(Point::new(20.0, 20.0).clamp(min, max), Point::new(20.0, 20.0));
        // Inverted range: min wins
        assert_eq!(
            Point::new(20.0, 20.0).clamp(min, Point::new(-10.0, -10.0)),
            Point::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_size_max() {
        let a = Size::new(10.0, 30.0);
        let b = Size::new(20.0, 5.0);
        assert_eq!(a.max(b), Size::new(20.0, 30.0));
        assert!(Size::default().is_zero());
        assert!(!a.is_zero());
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(100.0, 40.0));

        assert_approx_eq!(f32, bounds.min_x(), 10.0);
        assert_approx_eq!(f32, bounds.min_y(), 20.0);
        assert_approx_eq!(f32, bounds.max_x(), 110.0);
        assert_approx_eq!(f32, bounds.max_y(), 60.0);
        assert_approx_eq!(f32, bounds.width(), 100.0);
        assert_approx_eq!(f32, bounds.height(), 40.0);
        assert_eq!(bounds.center(), Point::new(60.0, 40.0));
        assert_eq!(bounds.to_size(), Size::new(100.0, 40.0));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new_from_top_left(Point::default(), Size::new(10.0, 10.0));
        assert!(bounds.contains(Point::new(0.0, 0.0)));
        assert!(bounds.contains(Point::new(10.0, 5.0)));
        assert!(!bounds.contains(Point::new(10.1, 5.0)));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn spacing_strategy() -> impl Strategy<Value = f32> {
        1.0f32..100.0
    }

    /// A snapped point is never further than half a grid cell from the original.
    fn check_snap_is_nearest(p: Point, spacing: f32) -> Result<(), TestCaseError> {
        let snapped = p.snap_to(spacing);
        let half = spacing / 2.0 + 1e-3;

        prop_assert!((snapped.x() - p.x()).abs() <= half);
        prop_assert!((snapped.y() - p.y()).abs() <= half);
        Ok(())
    }

    /// Snapping an already snapped point is a no-op.
    fn check_snap_is_idempotent(p: Point, spacing: f32) -> Result<(), TestCaseError> {
        let once = p.snap_to(spacing);
        let twice = once.snap_to(spacing);

        prop_assert!(approx_eq!(f32, once.x(), twice.x(), epsilon = 1e-3));
        prop_assert!(approx_eq!(f32, once.y(), twice.y(), epsilon = 1e-3));
        Ok(())
    }

    proptest! {
        #[test]
        fn snap_is_nearest(p in point_strategy(), spacing in spacing_strategy()) {
            check_snap_is_nearest(p, spacing)?;
        }

        #[test]
        fn snap_is_idempotent(p in point_strategy(), spacing in spacing_strategy()) {
            check_snap_is_idempotent(p, spacing)?;
        }
    }
}
