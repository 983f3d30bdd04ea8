// Copyright 2026 the Rectclip Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier paths (up to cubic).

use alloc::vec::Vec;
use core::ops::{Mul, Range};

use crate::{Affine, CubicBez, Line, ParamCurve, ParamCurveArea, Point, QuadBez, Rect};

/// A Bézier path with segments up to cubic, possibly with multiple subpaths.
///
/// The internal representation is a list of [`PathEl`]; a valid path has a
/// [`PathEl::MoveTo`] at the beginning of each subpath.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezPath(Vec<PathEl>);

/// The element of a Bézier path.
///
/// A valid path has `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic bezier using the current location and the two points.
    QuadTo(Point, Point),
    /// Draw a cubic bezier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

/// A segment of a Bézier path.
///
/// Unlike [`PathEl`], a `PathSeg` carries its own start point, so it can be
/// evaluated and subdivided in isolation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSeg {
    /// A line segment.
    Line(Line),
    /// A quadratic bezier segment.
    Quad(QuadBez),
    /// A cubic bezier segment.
    Cubic(CubicBez),
}

impl BezPath {
    /// Create a new path.
    pub fn new() -> BezPath {
        BezPath::default()
    }

    /// Create a path from a vector of path elements.
    pub fn from_vec(v: Vec<PathEl>) -> BezPath {
        BezPath(v)
    }

    /// Push a generic path element onto the path.
    pub fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }

    /// Removes the last [`PathEl`] from the path and returns it, or `None`
    /// if the path is empty.
    pub fn pop(&mut self) -> Option<PathEl> {
        self.0.pop()
    }

    /// Shortens the path, keeping the first `len` elements.
    ///
    /// Has no effect if the path has fewer elements. The allocation is
    /// retained, so this is the way to reuse a path as an output buffer.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::MoveTo(p.into()));
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::LineTo(p.into()));
    }

    /// Push a "quad to" element onto the path.
    pub fn quad_to<P: Into<Point>>(&mut self, p1: P, p2: P) {
        self.push(PathEl::QuadTo(p1.into(), p2.into()));
    }

    /// Push a "curve to" element onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(PathEl::CurveTo(p1.into(), p2.into(), p3.into()));
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// Returns `true` if the path contains no drawing segments.
    ///
    /// A path consisting only of `MoveTo` and `ClosePath` elements counts
    /// as empty.
    pub fn is_empty(&self) -> bool {
        !self
            .0
            .iter()
            .any(|el| matches!(el, PathEl::LineTo(..) | PathEl::QuadTo(..) | PathEl::CurveTo(..)))
    }

    /// Iterate over the path segments.
    ///
    /// A `ClosePath` element yields the implicit closing line segment when
    /// it is not degenerate.
    pub fn segments(&self) -> Segments<'_> {
        segments_of_slice(&self.0)
    }

    /// Signed area of the path.
    ///
    /// For a closed path with non-self-intersecting subpaths, this is the
    /// enclosed area, positive when the winding is counter-clockwise in a
    /// y-up coordinate system. The result only has a meaningful
    /// interpretation for open subpaths if they are treated as implicitly
    /// closed.
    pub fn area(&self) -> f64 {
        self.segments().map(|seg| seg.signed_area()).sum()
    }

    /// Is this path finite?
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|el| el.is_finite())
    }

    /// Apply an affine transform to the path.
    pub fn apply_affine(&mut self, affine: Affine) {
        for el in self.0.iter_mut() {
            *el = affine * (*el);
        }
    }
}

impl PathEl {
    /// Is this path element finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        match self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
            PathEl::QuadTo(p1, p2) => p1.is_finite() && p2.is_finite(),
            PathEl::CurveTo(p1, p2, p3) => p1.is_finite() && p2.is_finite() && p3.is_finite(),
            PathEl::ClosePath => true,
        }
    }

    /// Is this path element NaN?
    #[inline]
    pub fn is_nan(&self) -> bool {
        match self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_nan(),
            PathEl::QuadTo(p1, p2) => p1.is_nan() || p2.is_nan(),
            PathEl::CurveTo(p1, p2, p3) => p1.is_nan() || p2.is_nan() || p3.is_nan(),
            PathEl::ClosePath => false,
        }
    }

    /// The end point of the element, if it has one.
    #[inline]
    pub fn end_point(&self) -> Option<Point> {
        match self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            PathEl::QuadTo(_, p2) => Some(*p2),
            PathEl::CurveTo(_, _, p3) => Some(*p3),
            PathEl::ClosePath => None,
        }
    }
}

impl PathSeg {
    /// The bounding box of the segment's control polygon.
    ///
    /// This contains the curve (by the convex hull property) but is not
    /// tight; it is the cheap conservative test used before committing to
    /// root finding.
    pub fn control_box(&self) -> Rect {
        match self {
            PathSeg::Line(l) => Rect::from_points(l.p0, l.p1),
            PathSeg::Quad(q) => Rect::from_points(q.p0, q.p1).union_pt(q.p2),
            PathSeg::Cubic(c) => Rect::from_points(c.p0, c.p1).union_pt(c.p2).union_pt(c.p3),
        }
    }

    /// Is this segment finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        match self {
            PathSeg::Line(l) => l.is_finite(),
            PathSeg::Quad(q) => q.is_finite(),
            PathSeg::Cubic(c) => c.is_finite(),
        }
    }
}

impl ParamCurve for PathSeg {
    fn eval(&self, t: f64) -> Point {
        match self {
            PathSeg::Line(line) => line.eval(t),
            PathSeg::Quad(quad) => quad.eval(t),
            PathSeg::Cubic(cubic) => cubic.eval(t),
        }
    }

    fn subsegment(&self, range: Range<f64>) -> PathSeg {
        match self {
            PathSeg::Line(line) => PathSeg::Line(line.subsegment(range)),
            PathSeg::Quad(quad) => PathSeg::Quad(quad.subsegment(range)),
            PathSeg::Cubic(cubic) => PathSeg::Cubic(cubic.subsegment(range)),
        }
    }

    fn start(&self) -> Point {
        match self {
            PathSeg::Line(line) => line.start(),
            PathSeg::Quad(quad) => quad.start(),
            PathSeg::Cubic(cubic) => cubic.start(),
        }
    }

    fn end(&self) -> Point {
        match self {
            PathSeg::Line(line) => line.end(),
            PathSeg::Quad(quad) => quad.end(),
            PathSeg::Cubic(cubic) => cubic.end(),
        }
    }
}

impl ParamCurveArea for PathSeg {
    fn signed_area(&self) -> f64 {
        match self {
            PathSeg::Line(line) => line.signed_area(),
            PathSeg::Quad(quad) => quad.signed_area(),
            PathSeg::Cubic(cubic) => cubic.signed_area(),
        }
    }
}

/// An iterator over the segments of a slice of path elements.
#[derive(Debug)]
pub struct Segments<'a> {
    els: core::slice::Iter<'a, PathEl>,
    start: Point,
    last: Point,
}

pub(crate) fn segments_of_slice(slice: &[PathEl]) -> Segments<'_> {
    let first = match slice.first() {
        Some(PathEl::MoveTo(p)) => *p,
        Some(_) => panic!("path must begin with a MoveTo element"),
        None => Point::ZERO,
    };
    Segments {
        els: slice.iter(),
        start: first,
        last: first,
    }
}

impl Iterator for Segments<'_> {
    type Item = PathSeg;

    fn next(&mut self) -> Option<PathSeg> {
        for el in &mut self.els {
            let (seg, last) = match *el {
                PathEl::MoveTo(p) => {
                    self.start = p;
                    self.last = p;
                    continue;
                }
                PathEl::LineTo(p) => (PathSeg::Line(Line::new(self.last, p)), p),
                PathEl::QuadTo(p1, p2) => (PathSeg::Quad(QuadBez::new(self.last, p1, p2)), p2),
                PathEl::CurveTo(p1, p2, p3) => {
                    (PathSeg::Cubic(CubicBez::new(self.last, p1, p2, p3)), p3)
                }
                PathEl::ClosePath => {
                    if self.last != self.start {
                        (
                            PathSeg::Line(Line::new(self.last, self.start)),
                            self.start,
                        )
                    } else {
                        continue;
                    }
                }
            };
            self.last = last;
            return Some(seg);
        }
        None
    }
}

impl<'a> IntoIterator for &'a BezPath {
    type Item = PathEl;
    type IntoIter = core::iter::Cloned<core::slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements().iter().cloned()
    }
}

impl IntoIterator for BezPath {
    type Item = PathEl;
    type IntoIter = alloc::vec::IntoIter<PathEl>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<PathEl> for BezPath {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl Mul<PathEl> for Affine {
    type Output = PathEl;

    fn mul(self, other: PathEl) -> PathEl {
        match other {
            PathEl::MoveTo(p) => PathEl::MoveTo(self * p),
            PathEl::LineTo(p) => PathEl::LineTo(self * p),
            PathEl::QuadTo(p1, p2) => PathEl::QuadTo(self * p1, self * p2),
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(self * p1, self * p2, self * p3),
            PathEl::ClosePath => PathEl::ClosePath,
        }
    }
}

impl Mul<BezPath> for Affine {
    type Output = BezPath;

    fn mul(self, other: BezPath) -> BezPath {
        BezPath(other.0.iter().map(|&el| self * el).collect())
    }
}

impl Mul<&BezPath> for Affine {
    type Output = BezPath;

    fn mul(self, other: &BezPath) -> BezPath {
        BezPath(other.0.iter().map(|&el| self * el).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.line_to((1.0, 1.0));
        path.line_to((0.0, 1.0));
        path.close_path();
        path
    }

    #[test]
    fn square_area() {
        assert_eq!(unit_square().area(), 1.0);
    }

    #[test]
    fn segments_include_implicit_close() {
        let path = unit_square();
        let segs: Vec<PathSeg> = path.segments().collect();
        assert_eq!(segs.len(), 4);
        assert_eq!(
            segs[3],
            PathSeg::Line(Line::new((0.0, 1.0), (0.0, 0.0)))
        );
    }

    #[test]
    fn degenerate_close_yields_no_segment() {
        let mut path = BezPath::new();
        path.move_to((1.0, 1.0));
        path.line_to((2.0, 1.0));
        path.line_to((1.0, 1.0));
        path.close_path();
        assert_eq!(path.segments().count(), 2);
    }

    #[test]
    fn control_box_contains_curve() {
        let seg = PathSeg::Cubic(CubicBez::new(
            (0.0, 0.0),
            (1.0, 2.0),
            (3.0, -1.0),
            (4.0, 1.0),
        ));
        let cb = seg.control_box();
        for i in 0..=32 {
            let t = (i as f64) / 32.0;
            assert!(cb.contains(seg.eval(t)));
        }
    }

    #[test]
    fn finiteness() {
        let mut path = unit_square();
        assert!(path.is_finite());
        path.line_to((f64::NAN, 0.0));
        assert!(!path.is_finite());
    }

    #[test]
    fn apply_affine_translates() {
        let mut path = unit_square();
        path.apply_affine(Affine::translate((10.0, 0.0)));
        assert_eq!(
            path.elements()[0],
            PathEl::MoveTo(Point::new(10.0, 0.0))
        );
        assert_eq!(path.area(), 1.0);
    }
}
