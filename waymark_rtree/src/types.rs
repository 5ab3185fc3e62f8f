// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle algebra and the spatial object capability.

use kurbo::Point;

/// Default half-width used when inflating a point into a query rectangle.
///
/// A bare point has zero area and would never win a containment test, so
/// [`GeoPoint`] promotes it to a square of this half-width. The value is part
/// of the public contract: every point-to-rectangle promotion uses the same
/// inflation unless a [`GeoPoint`] is built with an explicit one.
pub const DEFAULT_POINT_EPSILON: f64 = 2e-5;

/// Axis-aligned bounding rectangle with a cached area.
///
/// Corners are normalised on construction so `min_x <= max_x` and
/// `min_y <= max_y` always hold. Comparisons are plain `f64` with no epsilon
/// tolerance; coordinates are assumed finite (no NaNs).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    area: f64,
}

impl Aabb {
    /// Create a rectangle from two opposite corners, in any order.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            area: (max_x - min_x) * (max_y - min_y),
        }
    }

    /// Create a rectangle spanning two points, in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Minimum x (left).
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Minimum y (bottom).
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Maximum x (right).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Maximum y (top).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// The cached area, `(max_x - min_x) * (max_y - min_y)`.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Grow this rectangle in place to the minimum bounding box of
    /// `self ∪ other`, recomputing the cached area.
    pub fn enlarge(&mut self, other: &Self) {
        if other.min_x < self.min_x {
            self.min_x = other.min_x;
        }
        if other.min_y < self.min_y {
            self.min_y = other.min_y;
        }
        if other.max_x > self.max_x {
            self.max_x = other.max_x;
        }
        if other.max_y > self.max_y {
            self.max_y = other.max_y;
        }
        self.area = (self.max_x - self.min_x) * (self.max_y - self.min_y);
    }

    /// The minimum bounding box of `self ∪ other`.
    ///
    /// Its area is never smaller than either input's.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.enlarge(other);
        out
    }

    /// Whether the two rectangles overlap. Non-strict: touching edges count
    /// as intersecting.
    pub fn intersects(&self, other: &Self) -> bool {
        if other.max_x < self.min_x || self.max_x < other.min_x {
            return false;
        }
        if other.max_y < self.min_y || self.max_y < other.min_y {
            return false;
        }
        true
    }

    /// Whether `inner` lies entirely within `self` (shared edges allowed).
    pub fn contains(&self, inner: &Self) -> bool {
        self.min_x <= inner.min_x
            && self.min_y <= inner.min_y
            && self.max_x >= inner.max_x
            && self.max_y >= inner.max_y
    }

    /// Squared distance from `p` to the closest point of this rectangle.
    /// Zero when `p` lies inside.
    pub fn distance_squared_to(&self, p: Point) -> f64 {
        let dx = (self.min_x - p.x).max(p.x - self.max_x).max(0.0);
        let dy = (self.min_y - p.y).max(p.y - self.max_y).max(0.0);
        dx * dx + dy * dy
    }
}

/// Capability an indexable value must expose.
///
/// Any value that can report a bounding rectangle and a squared distance to
/// an arbitrary rectangle can be stored in an [`RTree`](crate::tree::RTree).
/// It is not an error for two distinct objects to share a bounding box:
/// deletion matches on object identity ([`PartialEq`]), never on geometry.
pub trait SpatialObject {
    /// The minimum bounding rectangle of this object.
    fn bounding_rect(&self) -> Aabb;

    /// Squared distance from this object to `rect`. Must be non-negative and
    /// zero when the object touches or overlaps the rectangle.
    fn distance_squared(&self, rect: &Aabb) -> f64;
}

/// A 2D point indexable by the tree.
///
/// Wraps a [`Point`] together with the inflation half-width used to promote
/// it to a rectangle. The half-width is fixed at construction;
/// [`GeoPoint::new`] uses [`DEFAULT_POINT_EPSILON`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoPoint {
    point: Point,
    epsilon: f64,
}

impl GeoPoint {
    /// Wrap a point with the default inflation half-width.
    pub fn new(point: Point) -> Self {
        Self::with_epsilon(point, DEFAULT_POINT_EPSILON)
    }

    /// Wrap a point with an explicit inflation half-width.
    pub fn with_epsilon(point: Point, epsilon: f64) -> Self {
        debug_assert!(epsilon > 0.0, "inflation half-width must be positive");
        Self { point, epsilon }
    }

    /// The wrapped point.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    /// The inflation half-width.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Euclidean distance from this point to the closest point of `rect`.
    pub fn distance(&self, rect: &Aabb) -> f64 {
        let nearest = Point::new(
            self.point.x.clamp(rect.min_x, rect.max_x),
            self.point.y.clamp(rect.min_y, rect.max_y),
        );
        self.point.distance(nearest)
    }
}

impl SpatialObject for GeoPoint {
    fn bounding_rect(&self) -> Aabb {
        Aabb::new(
            self.point.x - self.epsilon,
            self.point.y - self.epsilon,
            self.point.x + self.epsilon,
            self.point.y + self.epsilon,
        )
    }

    fn distance_squared(&self, rect: &Aabb) -> f64 {
        rect.distance_squared_to(self.point)
    }
}
