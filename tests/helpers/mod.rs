// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Shared test utilities for polytess tests.

#![allow(dead_code)]

use polytess::{
    Collected, FillRule, Point, Polygon, TessConfig, TessMode, TessStats, Tessellator,
};

pub fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

pub fn pts(v: &[(f32, f32)]) -> Vec<Point> {
    v.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

/// A polygon as owned buffers: all points plus one count per contour.
#[derive(Clone, Debug, Default)]
pub struct Shape {
    pub points: Vec<Point>,
    pub counts: Vec<u16>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contour(mut self, v: &[(f32, f32)]) -> Self {
        self.points.extend(v.iter().map(|&(x, y)| Point::new(x, y)));
        self.counts.push(v.len() as u16);
        self
    }

    pub fn polygon(&self) -> Polygon<'_> {
        Polygon::new(&self.points, &self.counts)
    }
}

/// Parse `.dat` format: one vertex per line as `x y` or `x, y`.
/// Blank lines separate contours.
pub fn parse_contours(data: &str) -> Shape {
    let mut shape = Shape::new();
    let mut count = 0u16;
    for line in data.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if count > 0 {
                shape.counts.push(count);
                count = 0;
            }
            continue;
        }
        let floats: Vec<f32> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<f32>().ok())
            .collect();
        if let [x, y, ..] = floats[..] {
            shape.points.push(Point::new(x, y));
            count += 1;
        }
    }
    if count > 0 {
        shape.counts.push(count);
    }
    shape
}

pub fn config(rule: FillRule, mode: TessMode) -> TessConfig {
    TessConfig {
        rule,
        mode,
        validate_mesh: true,
        ..TessConfig::default()
    }
}

/// Tessellates `shape` with mesh validation on, panicking on error.
pub fn tessellate(shape: &Shape, rule: FillRule, mode: TessMode) -> (Collected, TessStats) {
    let mut tess = Tessellator::with_config(config(rule, mode));
    let mut out = Collected::new();
    let stats = tess
        .done(shape.polygon(), None, &mut out)
        .unwrap_or_else(|e| panic!("tessellation failed for {:?}/{:?}: {}", rule, mode, e));
    (out, stats)
}

/// Signed area of a triangle, with an exact sign.
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    0.5 * polytess::geom::orient(a, b, c)
}

/// Signed area of a simple polygon; a repeated closing point is harmless.
pub fn polygon_signed_area(points: &[Point]) -> f64 {
    0.5 * polytess::geom::loop_area2(points)
}

pub fn assert_area_approx(actual: f64, expected: f64, tolerance: f64, label: &str) {
    assert!(
        (actual - expected).abs() < tolerance,
        "{}: expected area ~{}, got {} (diff={})",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}

/// Every output coordinate is finite, loops are closed and triangles are
/// counter-clockwise with non-zero area.
pub fn verify_valid_output(out: &Collected) {
    for poly in &out.polygons {
        assert!(poly.len() >= 4, "loop too short: {:?}", poly);
        assert_eq!(poly.first(), poly.last(), "loop not closed: {:?}", poly);
        assert!(poly.iter().all(|q| q.x.is_finite() && q.y.is_finite()));
        assert!(polygon_signed_area(poly) > 0.0, "loop not counter-clockwise: {:?}", poly);
    }
    for (i, t) in out.triangles.iter().enumerate() {
        assert!(t.iter().all(|q| q.x.is_finite() && q.y.is_finite()));
        let area = triangle_area(t[0], t[1], t[2]);
        assert!(area > 0.0, "triangle {} is degenerate or clockwise: {:?}", i, t);
    }
}

/// Direction changes in y along a closed loop, flat steps ignored. A loop
/// monotone in y has at most two.
pub fn y_turns(loop_pts: &[Point]) -> usize {
    let dirs: Vec<bool> = loop_pts
        .windows(2)
        .filter(|w| w[1].y != w[0].y)
        .map(|w| w[1].y > w[0].y)
        .collect();
    let n = dirs.len();
    (0..n).filter(|&i| dirs[i] != dirs[(i + 1) % n]).count()
}

/// Closed loop with no clockwise turn.
pub fn is_convex(loop_pts: &[Point]) -> bool {
    let ring = &loop_pts[..loop_pts.len() - 1];
    let n = ring.len();
    (0..n).all(|i| triangle_area(ring[i], ring[(i + 1) % n], ring[(i + 2) % n]) >= 0.0)
}

/// A star with `spikes` points alternating between two radii around the
/// origin, counter-clockwise.
pub fn star(spikes: usize, outer: f32, inner: f32) -> Vec<Point> {
    (0..spikes * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = i as f32 * std::f32::consts::PI / spikes as f32;
            Point::new(r * a.cos(), r * a.sin())
        })
        .collect()
}
