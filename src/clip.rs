// Copyright 2026 the Rectclip Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipping a path to an axis-aligned rectangle in a single pass.
//!
//! The engine walks the subject path exactly once. Segments whose control
//! polygon lies inside the window are passed through untouched. Segments
//! that may cross an edge are split at the parameters where a coordinate
//! polynomial equals an edge value (a closed-form root find of degree at
//! most three per axis), the inside pieces are emitted as curves of the
//! original type, and the outside pieces are replaced by straight edges
//! along the window boundary.
//!
//! The boundary trace is the per-coordinate clamp of the outside
//! trajectory. The clamp is continuous, fixes the window pointwise, and
//! maps everything else onto the boundary, so it never changes the winding
//! number of any point interior to the window. That single observation is
//! what lets a rectangle clip avoid planar-subdivision machinery: the
//! clipped path fills exactly the intersection of the subject's fill with
//! the window, under whichever fill rule the caller declares.

use smallvec::SmallVec;
use thiserror::Error;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

use crate::common::{solve_cubic, solve_quadratic};
use crate::{
    Affine, BezPath, CubicBez, Line, ParamCurve, PathEl, PathSeg, Point, QuadBez, Rect,
};

/// The rule used to decide which regions of a self-intersecting path are
/// filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRule {
    /// A point is filled when its winding number is nonzero.
    NonZero,
    /// A point is filled when a ray from it crosses the path an odd number
    /// of times.
    EvenOdd,
}

/// Errors that can arise while clipping a path.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ClipError {
    /// A drawing element appeared where only a `MoveTo` may: before any
    /// subpath was started, or directly after a `ClosePath`.
    #[error("path element outside a subpath; every subpath must begin with a move-to")]
    InvalidPath,
    /// A coordinate of the path, the transform, or the rectangle was NaN or
    /// infinite.
    #[error("non-finite coordinate in clip input")]
    NonFinite,
}

/// Options for clipping a path to a rectangle.
#[derive(Clone, Copy, Debug)]
pub struct ClipOpts {
    /// The fill rule under which the subject path is interpreted.
    ///
    /// The clip itself preserves winding numbers, so the emitted path is
    /// valid under either rule; the rule decides when a subpath that only
    /// traces the window boundary contributes no fill and can be dropped.
    pub fill_rule: FillRule,
    /// Distance within which a point counts as lying on the window
    /// boundary.
    ///
    /// Emitted boundary points are snapped onto the edge when within this
    /// distance, which keeps floating-point noise from producing hairline
    /// sliver geometry along the window edges.
    pub tolerance: f64,
    /// An optional transform applied to each input element as it is read,
    /// before clipping, in the same single pass.
    pub transform: Option<Affine>,
}

impl Default for ClipOpts {
    fn default() -> Self {
        ClipOpts {
            fill_rule: FillRule::NonZero,
            tolerance: 1e-9,
            transform: None,
        }
    }
}

impl ClipOpts {
    /// Builder method for setting the fill rule.
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Builder method for setting the boundary tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method for setting the input transform.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Clip a path to an axis-aligned rectangle.
///
/// Returns the portion of `path`'s fill region that lies inside `rect`,
/// as a path in the same representation. Segments fully inside are copied
/// verbatim, segments crossing the boundary are split at the crossing
/// parameters, and portions outside are replaced by edges tracing the
/// window boundary so that winding is preserved.
///
/// A degenerate (zero-area) rectangle clips everything away, as does an
/// empty path. Subpaths are processed independently; open subpaths stay
/// open.
///
/// # Errors
///
/// Returns [`ClipError::InvalidPath`] when a drawing element appears
/// outside a subpath, and [`ClipError::NonFinite`] when the rectangle, the
/// transform, or any (transformed) coordinate is NaN or infinite.
pub fn clip_to_rect(
    path: impl IntoIterator<Item = PathEl>,
    rect: Rect,
    opts: &ClipOpts,
) -> Result<BezPath, ClipError> {
    let mut output = BezPath::new();
    clip_to_rect_into(path, rect, opts, &mut output)?;
    Ok(output)
}

/// Clip a path to an axis-aligned rectangle, writing into a caller-owned
/// buffer.
///
/// This is [`clip_to_rect`] with the output allocation hoisted out, for
/// callers clipping many paths in a loop. The buffer is cleared first and
/// its allocation is reused. On `Err` the contents of `out` are
/// unspecified.
///
/// # Errors
///
/// Same conditions as [`clip_to_rect`].
pub fn clip_to_rect_into(
    path: impl IntoIterator<Item = PathEl>,
    rect: Rect,
    opts: &ClipOpts,
    out: &mut BezPath,
) -> Result<(), ClipError> {
    out.truncate(0);
    if !rect.is_finite() {
        return Err(ClipError::NonFinite);
    }
    if let Some(transform) = opts.transform {
        if !transform.is_finite() {
            return Err(ClipError::NonFinite);
        }
    }
    let rect = rect.abs();
    let tol = opts.tolerance.abs();
    // A degenerate window clips everything away.
    if rect.width() <= tol || rect.height() <= tol {
        return Ok(());
    }
    let mut ctx = ClipCtx {
        rect,
        tol,
        fill_rule: opts.fill_rule,
        out,
        cur: Point::ZERO,
        start: Point::ZERO,
        subpath_ix: 0,
        in_subpath: false,
        after_close: false,
        saw_inside: false,
        last_pt: Point::ZERO,
        prev_pt: Point::ZERO,
        have_prev: false,
        last_was_trace: false,
    };
    for el in path {
        let el = match opts.transform {
            Some(transform) => transform * el,
            None => el,
        };
        if !el.is_finite() {
            return Err(ClipError::NonFinite);
        }
        ctx.do_el(el)?;
    }
    ctx.flush();
    Ok(())
}

/// Crossing parameters closer than this to a segment endpoint (or to each
/// other) are not split at; the resulting sliver is absorbed by the
/// boundary tolerance instead.
const T_EPS: f64 = 1e-9;

/// Internal state for one clip pass.
struct ClipCtx<'a> {
    rect: Rect,
    tol: f64,
    fill_rule: FillRule,
    out: &'a mut BezPath,
    /// Current point, in input coordinates.
    cur: Point,
    /// Start of the current subpath, in input coordinates.
    start: Point,
    /// Index of the current subpath's `MoveTo` in the output.
    subpath_ix: usize,
    in_subpath: bool,
    after_close: bool,
    /// Whether the current subpath emitted geometry besides boundary trace.
    saw_inside: bool,
    /// Last emitted output point.
    last_pt: Point,
    /// Output point before the last, for collinear trace merging.
    prev_pt: Point,
    have_prev: bool,
    /// Whether the last output element is a boundary-trace line.
    last_was_trace: bool,
}

impl ClipCtx<'_> {
    fn do_el(&mut self, el: PathEl) -> Result<(), ClipError> {
        match el {
            PathEl::MoveTo(p) => {
                self.flush();
                self.in_subpath = true;
                self.after_close = false;
                self.start = p;
                self.cur = p;
                self.subpath_ix = self.out.elements().len();
                let c = self.clamp(p);
                self.out.move_to(c);
                self.last_pt = c;
                self.have_prev = false;
                self.last_was_trace = false;
                self.saw_inside = false;
            }
            PathEl::LineTo(p) => {
                self.check_drawable()?;
                self.do_seg(PathSeg::Line(Line::new(self.cur, p)), Some(el));
                self.cur = p;
            }
            PathEl::QuadTo(p1, p2) => {
                self.check_drawable()?;
                self.do_seg(PathSeg::Quad(QuadBez::new(self.cur, p1, p2)), Some(el));
                self.cur = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                self.check_drawable()?;
                self.do_seg(
                    PathSeg::Cubic(CubicBez::new(self.cur, p1, p2, p3)),
                    Some(el),
                );
                self.cur = p3;
            }
            PathEl::ClosePath => {
                self.check_drawable()?;
                if self.cur != self.start {
                    // The implicit closing edge is clipped like a line;
                    // when it survives whole it stays implicit.
                    self.do_seg(PathSeg::Line(Line::new(self.cur, self.start)), None);
                }
                self.drop_redundant_close_vertex();
                self.out.close_path();
                self.cur = self.start;
                self.after_close = true;
            }
        }
        Ok(())
    }

    fn check_drawable(&self) -> Result<(), ClipError> {
        if !self.in_subpath || self.after_close {
            return Err(ClipError::InvalidPath);
        }
        Ok(())
    }

    fn do_seg(&mut self, seg: PathSeg, el: Option<PathEl>) {
        let cb = seg.control_box();
        let r = self.rect;
        let tol = self.tol;
        // Entirely inside: the control polygon bounds the curve.
        if cb.x0 >= r.x0 - tol && cb.x1 <= r.x1 + tol && cb.y0 >= r.y0 - tol && cb.y1 <= r.y1 + tol
        {
            self.emit_verbatim(el, seg.end());
            return;
        }
        // Entirely beyond one side: no visible contribution, only trace.
        if cb.x1 < r.x0 - tol || cb.x0 > r.x1 + tol || cb.y1 < r.y0 - tol || cb.y0 > r.y1 + tol {
            let p = self.clamp(seg.end());
            self.trace_to(p);
            return;
        }
        // Split at every crossing of a boundary line. Between consecutive
        // roots each coordinate polynomial keeps its sign, so a piece lies
        // on one side of every boundary line and its midpoint classifies
        // the whole piece.
        let mut ts: SmallVec<[f64; 8]> = SmallVec::new();
        let (cx, cy, degree) = poly_coeffs(&seg);
        add_axis_crossings(&cx, degree, r.x0, &mut ts);
        add_axis_crossings(&cx, degree, r.x1, &mut ts);
        add_axis_crossings(&cy, degree, r.y0, &mut ts);
        add_axis_crossings(&cy, degree, r.y1, &mut ts);
        ts.sort_unstable_by(f64::total_cmp);

        let mut pieces: SmallVec<[(f64, f64, bool); 8]> = SmallVec::new();
        let mut t0 = 0.0;
        for &t in &ts {
            if t - t0 > T_EPS {
                pieces.push((t0, t, false));
                t0 = t;
            }
        }
        pieces.push((t0, 1.0, false));
        let mut all_inside = true;
        for piece in pieces.iter_mut() {
            piece.2 = self.piece_is_inside(&seg, piece.0, piece.1);
            all_inside &= piece.2;
        }
        if all_inside {
            // Tangent touches are not crossings; keep the segment whole.
            self.emit_verbatim(el, seg.end());
            return;
        }
        for &(t0, t1, inside) in &pieces {
            if inside {
                let entry = self.clamp(seg.eval(t0));
                self.trace_to(entry);
                self.emit_piece(seg.subsegment(t0..t1));
            } else {
                let exit = self.clamp(seg.eval(t1));
                self.trace_to(exit);
            }
        }
    }

    /// Emit the original element untouched (or, for an implicit closing
    /// edge, nothing at all) and update the emitter state.
    fn emit_verbatim(&mut self, el: Option<PathEl>, end: Point) {
        if let Some(el) = el {
            self.out.push(el);
        }
        self.prev_pt = self.last_pt;
        self.have_prev = true;
        self.last_pt = end;
        self.last_was_trace = false;
        self.saw_inside = true;
    }

    /// Emit an inside piece of a split segment, preserving its curve type.
    fn emit_piece(&mut self, sub: PathSeg) {
        let prev = self.last_pt;
        let end = match sub {
            PathSeg::Line(l) => {
                let p = self.clamp(l.p1);
                self.out.line_to(p);
                p
            }
            PathSeg::Quad(q) => {
                let p = self.clamp(q.p2);
                self.out.quad_to(q.p1, p);
                p
            }
            PathSeg::Cubic(c) => {
                let p = self.clamp(c.p3);
                self.out.curve_to(c.p1, c.p2, p);
                p
            }
        };
        self.prev_pt = prev;
        self.have_prev = true;
        self.last_pt = end;
        self.last_was_trace = false;
        self.saw_inside = true;
    }

    /// Append a boundary-trace point, merging collinear runs along an edge
    /// and dropping zero-length steps.
    fn trace_to(&mut self, p: Point) {
        if (p.x - self.last_pt.x).abs() <= self.tol && (p.y - self.last_pt.y).abs() <= self.tol {
            return;
        }
        if self.last_was_trace
            && self.have_prev
            && self.collinear_on_edge(self.prev_pt, self.last_pt, p)
        {
            self.out.pop();
            self.out.line_to(p);
            self.last_pt = p;
            return;
        }
        self.out.line_to(p);
        self.prev_pt = self.last_pt;
        self.have_prev = true;
        self.last_pt = p;
        self.last_was_trace = true;
    }

    /// All three points on the same window edge. Trace points are snapped,
    /// so exact comparison is the right test.
    fn collinear_on_edge(&self, a: Point, b: Point, c: Point) -> bool {
        let r = self.rect;
        (a.x == b.x && b.x == c.x && (b.x == r.x0 || b.x == r.x1))
            || (a.y == b.y && b.y == c.y && (b.y == r.y0 || b.y == r.y1))
    }

    /// A trace that ends exactly on the subpath's (clamped) start point is
    /// subsumed by the `ClosePath` that follows it.
    fn drop_redundant_close_vertex(&mut self) {
        if !self.last_was_trace {
            return;
        }
        let els = self.out.elements();
        if els.len() < self.subpath_ix + 3 {
            return;
        }
        let PathEl::MoveTo(m) = els[self.subpath_ix] else {
            return;
        };
        if let Some(&PathEl::LineTo(p)) = els.last() {
            if p == m {
                self.out.pop();
            }
        }
    }

    /// Finish the current subpath, dropping it when it contributes no fill.
    fn flush(&mut self) {
        if !self.in_subpath {
            return;
        }
        self.in_subpath = false;
        let ix = self.subpath_ix;
        let n = self.out.elements().len() - ix;
        if n <= 1 {
            // A bare MoveTo draws nothing.
            self.out.truncate(ix);
            return;
        }
        if n == 2 {
            let els = self.out.elements();
            if matches!(els[ix + 1], PathEl::ClosePath) {
                // A degenerate dot survives only when it is in the window.
                if !self.is_inside(self.start) {
                    self.out.truncate(ix);
                }
                return;
            }
        }
        if self.saw_inside {
            return;
        }
        // A subpath with no inside geometry is a pure trace along the
        // window boundary. Its winding about the window interior is
        // constant, so it fills either some whole number of copies of the
        // window or nothing at all.
        let area = polyline_area(&self.out.elements()[ix..]);
        let w = (area / self.rect.area()).round();
        let drop = match self.fill_rule {
            FillRule::NonZero => w == 0.0,
            FillRule::EvenOdd => (w as i64) % 2 == 0,
        };
        if drop {
            self.out.truncate(ix);
        }
    }

    /// Classify a piece that contains no boundary crossings.
    ///
    /// Sign constancy makes any interior point representative of the side
    /// the piece is on; three samples rather than one keep a piece that
    /// merely grazes the tolerance band at a single parameter from being
    /// taken for inside geometry.
    fn piece_is_inside(&self, seg: &PathSeg, t0: f64, t1: f64) -> bool {
        let dt = t1 - t0;
        self.is_inside(seg.eval(t0 + 0.25 * dt))
            && self.is_inside(seg.eval(t0 + 0.5 * dt))
            && self.is_inside(seg.eval(t0 + 0.75 * dt))
    }

    fn is_inside(&self, p: Point) -> bool {
        p.x >= self.rect.x0 - self.tol
            && p.x <= self.rect.x1 + self.tol
            && p.y >= self.rect.y0 - self.tol
            && p.y <= self.rect.y1 + self.tol
    }

    fn clamp(&self, p: Point) -> Point {
        Point::new(
            clamp_coord(p.x, self.rect.x0, self.rect.x1, self.tol),
            clamp_coord(p.y, self.rect.y0, self.rect.y1, self.tol),
        )
    }
}

/// Snap onto the boundary when within tolerance, then clamp into range.
fn clamp_coord(v: f64, lo: f64, hi: f64, tol: f64) -> f64 {
    let v = if (v - lo).abs() <= tol {
        lo
    } else if (v - hi).abs() <= tol {
        hi
    } else {
        v
    };
    v.clamp(lo, hi)
}

/// Shoelace area of a subpath slice containing only move/line/close
/// elements; an open subpath is treated as implicitly closed.
fn polyline_area(els: &[PathEl]) -> f64 {
    let mut sum = 0.0;
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    for el in els {
        match el {
            PathEl::MoveTo(p) => {
                start = *p;
                last = *p;
            }
            PathEl::LineTo(p) => {
                sum += last.to_vec2().cross(p.to_vec2());
                last = *p;
            }
            PathEl::ClosePath => {
                sum += last.to_vec2().cross(start.to_vec2());
                last = start;
            }
            _ => debug_assert!(false, "curve element in a boundary trace"),
        }
    }
    sum += last.to_vec2().cross(start.to_vec2());
    0.5 * sum
}

/// Power-basis coefficients of the segment's coordinate polynomials,
/// lowest order first, along with the polynomial degree.
fn poly_coeffs(seg: &PathSeg) -> ([f64; 4], [f64; 4], usize) {
    match *seg {
        PathSeg::Line(l) => (
            [l.p0.x, l.p1.x - l.p0.x, 0.0, 0.0],
            [l.p0.y, l.p1.y - l.p0.y, 0.0, 0.0],
            1,
        ),
        PathSeg::Quad(q) => (
            [
                q.p0.x,
                2.0 * (q.p1.x - q.p0.x),
                q.p0.x - 2.0 * q.p1.x + q.p2.x,
                0.0,
            ],
            [
                q.p0.y,
                2.0 * (q.p1.y - q.p0.y),
                q.p0.y - 2.0 * q.p1.y + q.p2.y,
                0.0,
            ],
            2,
        ),
        PathSeg::Cubic(c) => (
            [
                c.p0.x,
                3.0 * (c.p1.x - c.p0.x),
                3.0 * (c.p0.x - 2.0 * c.p1.x + c.p2.x),
                c.p3.x - c.p0.x + 3.0 * (c.p1.x - c.p2.x),
            ],
            [
                c.p0.y,
                3.0 * (c.p1.y - c.p0.y),
                3.0 * (c.p0.y - 2.0 * c.p1.y + c.p2.y),
                c.p3.y - c.p0.y + 3.0 * (c.p1.y - c.p2.y),
            ],
            3,
        ),
    }
}

/// Parameters strictly inside (0, 1) where the coordinate polynomial takes
/// the value `k`.
fn add_axis_crossings(c: &[f64; 4], degree: usize, k: f64, ts: &mut SmallVec<[f64; 8]>) {
    let c0 = c[0] - k;
    match degree {
        1 => push_unit_root(-c0 / c[1], ts),
        2 => {
            for t in solve_quadratic(c0, c[1], c[2]) {
                push_unit_root(t, ts);
            }
        }
        _ => {
            for t in solve_cubic(c0, c[1], c[2], c[3]) {
                push_unit_root(t, ts);
            }
        }
    }
}

#[inline]
fn push_unit_root(t: f64, ts: &mut SmallVec<[f64; 8]>) {
    // NaN fails both comparisons.
    if t > T_EPS && t < 1.0 - T_EPS {
        ts.push(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BezPath, ParamCurve, Point, Rect};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn window() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 200.0)
    }

    fn opts() -> ClipOpts {
        ClipOpts::default()
    }

    fn triangle() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((300.0, 0.0));
        path.line_to((150.0, 300.0));
        path.close_path();
        path
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        path.line_to((x1, y0));
        path.line_to((x1, y1));
        path.line_to((x0, y1));
        path.close_path();
        path
    }

    fn assert_contained(path: &BezPath, rect: Rect, tol: f64) {
        for seg in path.segments() {
            for i in 0..=16 {
                let p = seg.eval(i as f64 / 16.0);
                assert!(
                    p.x >= rect.x0 - tol
                        && p.x <= rect.x1 + tol
                        && p.y >= rect.y0 - tol
                        && p.y <= rect.y1 + tol,
                    "{p:?} lies outside {rect:?}"
                );
            }
        }
    }

    #[test]
    fn triangle_clips_to_window() {
        // The window is contained in this triangle, with two corners
        // touching its slanted edges, so the clip is the window itself.
        let clipped = clip_to_rect(&triangle(), window(), &opts()).unwrap();
        assert_eq!(
            clipped.elements(),
            &[
                PathEl::MoveTo(Point::new(100.0, 100.0)),
                PathEl::LineTo(Point::new(200.0, 100.0)),
                PathEl::LineTo(Point::new(200.0, 200.0)),
                PathEl::LineTo(Point::new(100.0, 200.0)),
                PathEl::ClosePath,
            ]
        );
        assert_eq!(clipped.area(), 10_000.0);
        assert_contained(&clipped, window(), 1e-9);
    }

    #[test]
    fn square_coincident_with_window_is_unchanged() {
        let path = square(100.0, 100.0, 200.0, 200.0);
        let clipped = clip_to_rect(&path, window(), &opts()).unwrap();
        assert_eq!(clipped.elements(), path.elements());
    }

    #[test]
    fn fully_inside_path_is_copied_verbatim() {
        let mut path = BezPath::new();
        path.move_to((120.0, 120.0));
        path.quad_to((150.0, 110.0), (180.0, 120.0));
        path.curve_to((190.0, 150.0), (170.0, 170.0), (150.0, 180.0));
        path.line_to((120.0, 150.0));
        path.close_path();
        let clipped = clip_to_rect(&path, window(), &opts()).unwrap();
        assert_eq!(clipped.elements(), path.elements());
    }

    #[test]
    fn cubic_subpath_beyond_one_side_is_empty() {
        let mut path = BezPath::new();
        path.move_to((10.0, 110.0));
        path.curve_to((20.0, 150.0), (30.0, 250.0), (10.0, 290.0));
        path.close_path();
        let clipped = clip_to_rect(&path, window(), &opts()).unwrap();
        assert!(clipped.elements().is_empty());
    }

    #[test]
    fn disjoint_bounding_boxes_give_zero_subpaths() {
        let path = square(400.0, 400.0, 500.0, 500.0);
        let clipped = clip_to_rect(&path, window(), &opts()).unwrap();
        assert!(clipped.elements().is_empty());
    }

    #[test]
    fn degenerate_window_clips_everything() {
        let clipped =
            clip_to_rect(&triangle(), Rect::new(100.0, 100.0, 100.0, 100.0), &opts()).unwrap();
        assert!(clipped.elements().is_empty());
        let clipped =
            clip_to_rect(&triangle(), Rect::new(100.0, 100.0, 100.0, 200.0), &opts()).unwrap();
        assert!(clipped.elements().is_empty());
    }

    #[test]
    fn empty_path_gives_empty_output() {
        let clipped = clip_to_rect(&BezPath::new(), window(), &opts()).unwrap();
        assert!(clipped.elements().is_empty());
    }

    #[test]
    fn clipping_twice_is_idempotent() {
        let once = clip_to_rect(&triangle(), window(), &opts()).unwrap();
        let twice = clip_to_rect(&once, window(), &opts()).unwrap();
        assert_eq!(once.elements(), twice.elements());
    }

    // The quadratic traces y = 2x - x^2 over [0, 2], closed along y = 0.
    // Clipped to the band y <= 1/2, the removed cap has area (2/3)sqrt(1/2),
    // which gives the expected area below in closed form.
    fn parabola_band_expected() -> f64 {
        -(4.0 / 3.0 - 2.0 * 0.5f64.sqrt() / 3.0)
    }

    #[test]
    fn quad_crossing_band_has_exact_area() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((1.0, 2.0), (2.0, 0.0));
        path.close_path();
        let band = Rect::new(0.0, 0.0, 2.0, 0.5);
        let clipped = clip_to_rect(&path, band, &opts()).unwrap();
        assert!((clipped.area() - parabola_band_expected()).abs() < 1e-9);
        assert_contained(&clipped, band, 1e-9);

        // Clipping the clipped result changes nothing.
        let twice = clip_to_rect(&clipped, band, &opts()).unwrap();
        assert_eq!(clipped.elements(), twice.elements());
    }

    #[test]
    fn cubic_crossing_band_has_exact_area() {
        // The same parabola, degree-raised to a cubic.
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to(
            (2.0 / 3.0, 4.0 / 3.0),
            (4.0 / 3.0, 4.0 / 3.0),
            (2.0, 0.0),
        );
        path.close_path();
        let band = Rect::new(0.0, 0.0, 2.0, 0.5);
        let clipped = clip_to_rect(&path, band, &opts()).unwrap();
        assert!((clipped.area() - parabola_band_expected()).abs() < 1e-9);
        assert_contained(&clipped, band, 1e-9);
    }

    #[test]
    fn surrounding_subpath_becomes_the_window() {
        let clipped =
            clip_to_rect(&square(-100.0, -100.0, 400.0, 400.0), window(), &opts()).unwrap();
        assert_eq!(clipped.area(), 10_000.0);
        assert_contained(&clipped, window(), 0.0);
    }

    #[test]
    fn winding_direction_is_preserved() {
        // The same surrounding square, traversed clockwise.
        let mut path = BezPath::new();
        path.move_to((-100.0, -100.0));
        path.line_to((-100.0, 400.0));
        path.line_to((400.0, 400.0));
        path.line_to((400.0, -100.0));
        path.close_path();
        let clipped = clip_to_rect(&path, window(), &opts()).unwrap();
        assert_eq!(clipped.area(), -10_000.0);
    }

    #[test]
    fn outer_ring_with_inner_hole() {
        let mut path = square(-100.0, -100.0, 400.0, 400.0);
        // A clockwise hole fully inside the window.
        path.move_to((120.0, 120.0));
        path.line_to((120.0, 180.0));
        path.line_to((180.0, 180.0));
        path.line_to((180.0, 120.0));
        path.close_path();
        let clipped = clip_to_rect(&path, window(), &opts()).unwrap();
        assert_eq!(clipped.area(), 10_000.0 - 3_600.0);
    }

    #[test]
    fn double_loop_respects_fill_rule() {
        let mut path = BezPath::new();
        path.move_to((-100.0, -100.0));
        for _ in 0..2 {
            path.line_to((400.0, -100.0));
            path.line_to((400.0, 400.0));
            path.line_to((-100.0, 400.0));
            path.line_to((-100.0, -100.0));
        }
        path.close_path();

        let nonzero = clip_to_rect(&path, window(), &opts()).unwrap();
        assert_eq!(nonzero.area(), 20_000.0);

        let evenodd = clip_to_rect(
            &path,
            window(),
            &opts().with_fill_rule(FillRule::EvenOdd),
        )
        .unwrap();
        assert!(evenodd.elements().is_empty());
    }

    #[test]
    fn open_subpath_stays_open() {
        let mut path = BezPath::new();
        path.move_to((50.0, 150.0));
        path.line_to((250.0, 150.0));
        let clipped = clip_to_rect(&path, window(), &opts()).unwrap();
        assert_eq!(
            clipped.elements(),
            &[
                PathEl::MoveTo(Point::new(100.0, 150.0)),
                PathEl::LineTo(Point::new(200.0, 150.0)),
            ]
        );
    }

    #[test]
    fn element_before_move_to_is_invalid() {
        let path = BezPath::from_vec(vec![PathEl::LineTo(Point::new(1.0, 1.0))]);
        assert_eq!(
            clip_to_rect(&path, window(), &opts()).unwrap_err(),
            ClipError::InvalidPath
        );
    }

    #[test]
    fn element_after_close_is_invalid() {
        let path = BezPath::from_vec(vec![
            PathEl::MoveTo(Point::new(110.0, 110.0)),
            PathEl::LineTo(Point::new(150.0, 150.0)),
            PathEl::ClosePath,
            PathEl::LineTo(Point::new(120.0, 120.0)),
        ]);
        assert_eq!(
            clip_to_rect(&path, window(), &opts()).unwrap_err(),
            ClipError::InvalidPath
        );
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let path = BezPath::from_vec(vec![PathEl::MoveTo(Point::new(f64::NAN, 0.0))]);
        assert_eq!(
            clip_to_rect(&path, window(), &opts()).unwrap_err(),
            ClipError::NonFinite
        );

        assert_eq!(
            clip_to_rect(&triangle(), Rect::new(0.0, 0.0, f64::INFINITY, 1.0), &opts())
                .unwrap_err(),
            ClipError::NonFinite
        );
    }

    #[test]
    fn output_buffer_is_reused() {
        let mut buffer = BezPath::new();
        buffer.move_to((1.0, 2.0));
        buffer.line_to((3.0, 4.0));
        clip_to_rect_into(&triangle(), window(), &opts(), &mut buffer).unwrap();
        let direct = clip_to_rect(&triangle(), window(), &opts()).unwrap();
        assert_eq!(buffer.elements(), direct.elements());
    }

    #[test]
    fn transform_is_applied_before_clipping() {
        let path = square(20.0, 20.0, 80.0, 80.0);
        let shifted = clip_to_rect(
            &path,
            window(),
            &opts().with_transform(Affine::translate((100.0, 100.0))),
        )
        .unwrap();
        assert_eq!(
            shifted.elements(),
            square(120.0, 120.0, 180.0, 180.0).elements()
        );
    }

    // An independent Sutherland-Hodgman clipper, used only as an area
    // oracle for simple polygons. The engine under test never works this
    // way; agreement of the enclosed areas is what is being checked.
    fn oracle_clip(poly: &[Point], rect: Rect) -> Vec<Point> {
        fn clip_half_plane(
            pts: &[Point],
            inside: impl Fn(Point) -> bool,
            cross_at: impl Fn(Point, Point) -> Point,
        ) -> Vec<Point> {
            let mut out = Vec::new();
            for i in 0..pts.len() {
                let cur = pts[i];
                let prev = pts[(i + pts.len() - 1) % pts.len()];
                match (inside(prev), inside(cur)) {
                    (true, true) => out.push(cur),
                    (true, false) => out.push(cross_at(prev, cur)),
                    (false, true) => {
                        out.push(cross_at(prev, cur));
                        out.push(cur);
                    }
                    (false, false) => {}
                }
            }
            out
        }
        let at_x = |x: f64| move |a: Point, b: Point| a.lerp(b, (x - a.x) / (b.x - a.x));
        let at_y = |y: f64| move |a: Point, b: Point| a.lerp(b, (y - a.y) / (b.y - a.y));
        let mut pts = poly.to_vec();
        pts = clip_half_plane(&pts, |p| p.x >= rect.x0, at_x(rect.x0));
        pts = clip_half_plane(&pts, |p| p.x <= rect.x1, at_x(rect.x1));
        pts = clip_half_plane(&pts, |p| p.y >= rect.y0, at_y(rect.y0));
        pts = clip_half_plane(&pts, |p| p.y <= rect.y1, at_y(rect.y1));
        pts
    }

    fn shoelace(pts: &[Point]) -> f64 {
        let mut sum = 0.0;
        for i in 0..pts.len() {
            let j = (i + 1) % pts.len();
            sum += pts[i].to_vec2().cross(pts[j].to_vec2());
        }
        0.5 * sum
    }

    #[test]
    fn random_star_polygons_match_area_oracle() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            // A star-shaped polygon about (150, 150) is always simple,
            // which is the regime where the oracle is meaningful.
            let mut angles: Vec<f64> = (0..12)
                .map(|_| rng.random::<f64>() * core::f64::consts::TAU)
                .collect();
            angles.sort_by(f64::total_cmp);
            let pts: Vec<Point> = angles
                .iter()
                .map(|th| {
                    let r = 20.0 + 180.0 * rng.random::<f64>();
                    Point::new(150.0 + r * th.cos(), 150.0 + r * th.sin())
                })
                .collect();

            let mut path = BezPath::new();
            path.move_to(pts[0]);
            for p in &pts[1..] {
                path.line_to(*p);
            }
            path.close_path();

            let clipped = clip_to_rect(&path, window(), &opts()).unwrap();
            let expected = shoelace(&oracle_clip(&pts, window()));
            let got = clipped.area();
            assert!(
                (got - expected).abs() < 1e-6 * expected.abs().max(1.0),
                "area {got} does not match oracle {expected}"
            );
            assert_contained(&clipped, window(), 1e-6);
        }
    }

    #[test]
    fn random_mixed_paths_are_contained_and_stable() {
        // The shape generator from the original demo: twenty random
        // segments, mixed line/quad/cubic, in a 300 by 300 field.
        fn coord(rng: &mut StdRng) -> f64 {
            (300.0 * rng.random::<f64>()).floor()
        }
        fn pt(rng: &mut StdRng) -> Point {
            Point::new(coord(rng), coord(rng))
        }

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..5 {
            let mut path = BezPath::new();
            path.move_to(pt(&mut rng));
            for _ in 0..20 {
                match rng.random_range(0..3) {
                    0 => path.line_to(pt(&mut rng)),
                    1 => path.quad_to(pt(&mut rng), pt(&mut rng)),
                    _ => path.curve_to(pt(&mut rng), pt(&mut rng), pt(&mut rng)),
                }
            }
            path.close_path();

            let once = clip_to_rect(&path, window(), &opts()).unwrap();
            assert_contained(&once, window(), 1e-6);

            let twice = clip_to_rect(&once, window(), &opts()).unwrap();
            assert_contained(&twice, window(), 1e-6);
            assert!(
                (once.area() - twice.area()).abs() < 1e-6 * once.area().abs().max(1.0),
                "reclipping changed the enclosed area"
            );
        }
    }
}
