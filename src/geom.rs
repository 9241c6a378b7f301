// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Geometric value types and every predicate the sweep depends on.
//
// The sweep runs in "sweep space": an input point (x, y) becomes
// (s, t) = (y, -x). `s` is the sweep coordinate, `t` orders edges across the
// sweep line. The mapping is a rotation, so orientation is preserved and the
// inverse is exact. All ordering, orientation and intersection arithmetic
// lives in this module; nothing else in the crate compares raw coordinates.

pub type Real = f32;

/// Largest coordinate magnitude accepted as input.
pub const MAX_COORD: Real = (1u32 << 23) as Real;

/// A point in the caller's coordinate system.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn to_sweep(self) -> SweepPos {
        SweepPos { s: self.y, t: -self.x }
    }

    /// True when both coordinates are finite and within [`MAX_COORD`].
    #[inline]
    pub fn is_valid(self) -> bool {
        self.x.abs() <= MAX_COORD && self.y.abs() <= MAX_COORD
    }
}

/// Axis-aligned bounding box in caller coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn new(min: Point, max: Point) -> Self {
        Rect { min, max }
    }

    /// Bounding box of `points`, or `None` when the slice is empty.
    pub fn from_points(points: &[Point]) -> Option<Rect> {
        let (first, rest) = points.split_first()?;
        let mut r = Rect::new(*first, *first);
        for p in rest {
            r.min.x = r.min.x.min(p.x);
            r.min.y = r.min.y.min(p.y);
            r.max.x = r.max.x.max(p.x);
            r.max.y = r.max.y.max(p.y);
        }
        Some(r)
    }

    pub fn width(&self) -> Real {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> Real {
        self.max.y - self.min.y
    }

    /// True when `p` lies in the box, boundary included.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// (s_min, s_max, t_min, t_max) of this box in sweep space.
    pub fn sweep_extent(&self) -> (Real, Real, Real, Real) {
        (self.min.y, self.max.y, -self.max.x, -self.min.x)
    }
}

/// A position in sweep space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SweepPos {
    pub s: Real,
    pub t: Real,
}

impl SweepPos {
    #[inline]
    pub const fn new(s: Real, t: Real) -> Self {
        SweepPos { s, t }
    }

    #[inline]
    pub fn to_point(self) -> Point {
        Point { x: -self.t, y: self.s }
    }

    #[inline]
    fn transposed(self) -> Self {
        SweepPos { s: self.t, t: self.s }
    }
}

/// Sweep order: `u` is processed no later than `v`.
#[inline]
pub fn vert_leq(u: SweepPos, v: SweepPos) -> bool {
    u.s < v.s || (u.s == v.s && u.t <= v.t)
}

#[inline]
pub fn vert_eq(u: SweepPos, v: SweepPos) -> bool {
    u.s == v.s && u.t == v.t
}

/// Given `u <= v <= w` in sweep order, returns the signed distance from
/// edge `uw` to `v` along `t`, measured at `v.s`. Zero when `uw` is
/// perpendicular to the sweep direction.
///
/// The interpolation is taken from whichever endpoint is nearer to `v`, which
/// keeps the result accurate when `v` is close to either end.
pub fn edge_eval(u: SweepPos, v: SweepPos, w: SweepPos) -> Real {
    let gap_l = v.s - u.s;
    let gap_r = w.s - v.s;
    if gap_l + gap_r <= 0.0 {
        return 0.0;
    }
    if gap_l < gap_r {
        (v.t - u.t) + (u.t - w.t) * (gap_l / (gap_l + gap_r))
    } else {
        (v.t - w.t) + (w.t - u.t) * (gap_r / (gap_l + gap_r))
    }
}

/// Same sign as [`edge_eval`]: positive when `v` lies above `uw`.
#[inline]
pub fn edge_sign(u: SweepPos, v: SweepPos, w: SweepPos) -> Real {
    edge_eval(u, v, w)
}

/// True when `u`, `v`, `w` turn counter-clockwise (or are collinear). Exact.
#[inline]
pub fn vert_ccw(u: SweepPos, v: SweepPos, w: SweepPos) -> bool {
    // the sweep mapping is a rotation
    orient(u.to_point(), v.to_point(), w.to_point()) >= 0.0
}

// Relative error bound of the plain f64 determinant.
const ORIENT_ERR_BOUND: f64 = (3.0 + 16.0 * HALF_EPS) * HALF_EPS;
const HALF_EPS: f64 = f64::EPSILON / 2.0;

/// Twice the signed area of triangle `abc` in caller coordinates.
///
/// The sign is exact: when the `f64` determinant is too close to zero to be
/// trusted it is recomputed without rounding, and the leading term of the
/// exact value is returned.
#[inline]
pub fn orient(a: Point, b: Point, c: Point) -> f64 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (cx, cy) = (c.x as f64, c.y as f64);
    let left = (bx - ax) * (cy - ay);
    let right = (by - ay) * (cx - ax);
    let det = left - right;
    if det.abs() > ORIENT_ERR_BOUND * (left.abs() + right.abs()) {
        return det;
    }
    orient_exact([ax, ay], [bx, by], [cx, cy])
}

// Sum and product without rounding error, as (rounded, error) pairs.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bv = s - a;
    let av = s - bv;
    (s, (a - av) + (b - bv))
}

#[inline]
fn two_product(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

/// Adds `b` to a non-overlapping expansion sorted by increasing magnitude.
fn grow_expansion(e: &mut [f64; 16], len: &mut usize, b: f64) {
    let mut q = b;
    for term in e.iter_mut().take(*len) {
        let (sum, err) = two_sum(q, *term);
        *term = err;
        q = sum;
    }
    e[*len] = q;
    *len += 1;
}

fn orient_exact(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    // each difference of two f64 values is exactly hi + lo
    let abx = two_sum(b[0], -a[0]);
    let aby = two_sum(b[1], -a[1]);
    let acx = two_sum(c[0], -a[0]);
    let acy = two_sum(c[1], -a[1]);

    let mut e = [0.0; 16];
    let mut len = 0;
    for (x, y, sign) in [(abx, acy, 1.0), (aby, acx, -1.0)] {
        for p in [x.0, x.1] {
            for q in [y.0, y.1] {
                let (hi, lo) = two_product(p, q);
                grow_expansion(&mut e, &mut len, sign * lo);
                grow_expansion(&mut e, &mut len, sign * hi);
            }
        }
    }
    e[..len].iter().rev().copied().find(|&t| t != 0.0).unwrap_or(0.0)
}

/// Twice the signed area of a closed loop. A repeated closing point is
/// harmless.
pub fn loop_area2(points: &[Point]) -> f64 {
    let Some(&first) = points.first() else {
        return 0.0;
    };
    points
        .windows(2)
        .map(|w| orient(first, w[0], w[1]))
        .sum()
}

/// Returns `(b*x + a*y) / (a + b)`, clamping negative weights to zero. The
/// result always lies between `x` and `y`.
#[inline]
pub fn real_interpolate(a: Real, x: Real, b: Real, y: Real) -> Real {
    let a = a.max(0.0);
    let b = b.max(0.0);
    if a <= b {
        if b == 0.0 {
            x / 2.0 + y / 2.0
        } else {
            x + (y - x) * (a / (a + b))
        }
    } else {
        y + (x - y) * (b / (a + b))
    }
}

/// Intersection of segments `o1-d1` and `o2-d2`. The result lies inside the
/// bounding box of the overlap of both segments even when they only touch or
/// are numerically parallel.
pub fn edge_intersect(o1: SweepPos, d1: SweepPos, o2: SweepPos, d2: SweepPos) -> SweepPos {
    let s = intersect_s(o1, d1, o2, d2);
    let t = intersect_s(
        o1.transposed(),
        d1.transposed(),
        o2.transposed(),
        d2.transposed(),
    );
    SweepPos { s, t }
}

// `s` of the crossing. Calling it on transposed input yields `t`.
fn intersect_s(o1: SweepPos, d1: SweepPos, o2: SweepPos, d2: SweepPos) -> Real {
    let (mut a, mut b, mut c, mut d) = (o1, d1, o2, d2);
    if !vert_leq(a, b) {
        std::mem::swap(&mut a, &mut b);
    }
    if !vert_leq(c, d) {
        std::mem::swap(&mut c, &mut d);
    }
    if !vert_leq(a, c) {
        std::mem::swap(&mut a, &mut c);
        std::mem::swap(&mut b, &mut d);
    }

    if !vert_leq(c, b) {
        // No overlap in s: split the gap.
        return c.s / 2.0 + b.s / 2.0;
    }
    let (mut z1, mut z2, far) = if vert_leq(b, d) {
        // c <= b <= d
        (edge_eval(a, c, b), edge_eval(c, b, d), b)
    } else {
        // c <= d <= b: second segment is nested inside the first
        (edge_sign(a, c, b), -edge_sign(a, d, b), d)
    };
    if z1 + z2 < 0.0 {
        z1 = -z1;
        z2 = -z2;
    }
    real_interpolate(z1, c.s, z2, far.s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(s: Real, t: Real) -> SweepPos {
        SweepPos::new(s, t)
    }

    #[test]
    fn sweep_mapping_round_trips() {
        let p = Point::new(3.5, -7.25);
        assert_eq!(p.to_sweep().to_point(), p);
        // sweeping upward in y
        assert!(vert_leq(Point::new(0.0, 1.0).to_sweep(), Point::new(-5.0, 2.0).to_sweep()));
    }

    #[test]
    fn vert_leq_orders_s_then_t() {
        assert!(vert_leq(sp(0.0, 0.0), sp(1.0, 0.0)));
        assert!(vert_leq(sp(0.0, 0.0), sp(0.0, 1.0)));
        assert!(vert_leq(sp(0.0, 0.0), sp(0.0, 0.0)));
        assert!(!vert_leq(sp(1.0, 0.0), sp(0.0, 5.0)));
    }

    #[test]
    fn edge_eval_measures_distance_above_edge() {
        let r = edge_eval(sp(0.0, 0.0), sp(0.5, 1.0), sp(1.0, 0.0));
        assert!((r - 1.0).abs() < 1e-6, "got {}", r);
        let r = edge_eval(sp(0.0, 0.0), sp(0.5, -2.0), sp(1.0, 0.0));
        assert!((r + 2.0).abs() < 1e-6, "got {}", r);
    }

    #[test]
    fn edge_eval_perpendicular_edge_is_zero() {
        assert_eq!(edge_eval(sp(0.0, 0.0), sp(0.0, 0.5), sp(0.0, 1.0)), 0.0);
    }

    #[test]
    fn orientation_is_preserved_by_mapping() {
        let (a, b, c) = (Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0));
        assert!(orient(a, b, c) > 0.0);
        assert!(vert_ccw(a.to_sweep(), b.to_sweep(), c.to_sweep()));
        assert!(!vert_ccw(a.to_sweep(), c.to_sweep(), b.to_sweep()));
    }

    #[test]
    fn orient_detects_exact_collinearity() {
        // 0.2f32 and 0.4f32 are exact multiples of 0.1f32
        let a = Point::new(0.1, 0.1);
        let b = Point::new(0.2, 0.2);
        let c = Point::new(0.4, 0.4);
        assert_eq!(orient(a, b, c), 0.0);
        assert_eq!(orient(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(3.0, 3.0)), 0.0);
        assert!(orient(a, b, Point::new(0.4, 0.41)) > 0.0);
    }

    #[test]
    fn orient_sign_is_exact_near_zero() {
        // c sits one f32 ulp off the line through a and b
        let a = Point::new(0.5, 0.5);
        let b = Point::new(12.0, 12.0);
        let c = Point::new(24.0, f32::from_bits(24.0f32.to_bits() + 1));
        assert!(orient(a, b, c) > 0.0);
        assert!(orient(a, c, b) < 0.0);
        assert_eq!(orient(a, b, Point::new(24.0, 24.0)), 0.0);

        // 1 - 1e-30 rounds to 1 in f64, which would make these collinear
        let a = Point::new(1.0e-30, 0.0);
        let b = Point::new(1.0, 1.0);
        let c = Point::new(2.0, 2.0);
        assert!(orient(a, b, c) < 0.0, "got {}", orient(a, b, c));
        assert!(orient(a, c, b) > 0.0);
        assert!(!vert_ccw(a.to_sweep(), b.to_sweep(), c.to_sweep()));
        assert!(vert_ccw(a.to_sweep(), c.to_sweep(), b.to_sweep()));
    }

    #[test]
    fn loop_area_of_unit_square() {
        let sq = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        assert_eq!(loop_area2(&sq), 2.0);
        assert_eq!(loop_area2(&sq[..4]), 2.0);
    }

    #[test]
    fn real_interpolate_stays_in_range() {
        assert!((real_interpolate(0.0, 0.0, 0.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((real_interpolate(1.0, 0.0, 1.0, 2.0) - 1.0).abs() < 1e-6);
        let r = real_interpolate(-3.0, 4.0, 1.0, 8.0);
        assert_eq!(r, 4.0);
    }

    #[test]
    fn edge_intersect_crossing() {
        let p = edge_intersect(sp(0.0, 0.0), sp(1.0, 1.0), sp(0.0, 1.0), sp(1.0, 0.0));
        assert!((p.s - 0.5).abs() < 1e-5, "s={}", p.s);
        assert!((p.t - 0.5).abs() < 1e-5, "t={}", p.t);
    }

    #[test]
    fn edge_intersect_stays_inside_segment_boxes() {
        let p = edge_intersect(sp(0.0, 0.0), sp(10.0, 1.0), sp(0.0, 1.0), sp(10.0, 0.0));
        assert!(p.s >= 0.0 && p.s <= 10.0);
        assert!(p.t >= 0.0 && p.t <= 1.0);
        assert!((p.s - 5.0).abs() < 1e-4);
    }

    #[test]
    fn rect_sweep_extent() {
        let r = Rect::from_points(&[Point::new(1.0, 2.0), Point::new(-3.0, 5.0)]).unwrap();
        assert_eq!(r.sweep_extent(), (2.0, 5.0, -1.0, 3.0));
        assert!(Rect::from_points(&[]).is_none());
    }
}
