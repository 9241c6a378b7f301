// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Input validation and contour loading.

use super::Polygon;
use crate::error::{Result, TessError};
use crate::geom::{orient, Point, Rect};
use crate::mesh::{sym, EdgeIdx, Mesh, INVALID};

/// Number of points covered by `counts` (up to the first zero).
fn used_points(polygon: &Polygon<'_>) -> usize {
    polygon
        .counts
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as usize)
        .sum()
}

/// Checks the whole polygon before anything is touched. Returns the number
/// of points the contours use.
pub(super) fn validate(polygon: &Polygon<'_>, bounds: Option<&Rect>) -> Result<usize> {
    let needed = used_points(polygon);
    let available = polygon.points.len();
    if needed > available {
        return Err(TessError::CountOverflow { needed, available });
    }
    for (index, p) in polygon.points[..needed].iter().enumerate() {
        if !p.is_valid() {
            return Err(TessError::InvalidCoordinate { index });
        }
        if let Some(b) = bounds {
            if !b.contains(*p) {
                return Err(TessError::OutsideBounds { index });
            }
        }
    }
    Ok(needed)
}

/// Checks that every contour of a polygon flagged convex really is.
pub(super) fn check_convex(polygon: &Polygon<'_>, ring: &mut Vec<Point>) -> Result<()> {
    for (contour, points) in contours(polygon).enumerate() {
        clean_ring(points, ring);
        if !is_convex_ring(ring) {
            return Err(TessError::NotConvex { contour });
        }
    }
    Ok(())
}

/// A convex loop in either orientation: no two turns of opposite sign, and
/// a single rise and fall in y, which rules out loops that wind twice.
/// Collinear points are allowed.
pub(super) fn is_convex_ring(ring: &[Point]) -> bool {
    let n = ring.len();
    let (mut left, mut right) = (false, false);
    for i in 0..n {
        let o = orient(ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
        left |= o > 0.0;
        right |= o < 0.0;
    }
    if left && right {
        return false;
    }

    let mut first = None;
    let mut prev = None;
    let mut changes = 0;
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        if a.y == b.y {
            continue;
        }
        let up = b.y > a.y;
        if prev.is_some_and(|p| p != up) {
            changes += 1;
        }
        first.get_or_insert(up);
        prev = Some(up);
    }
    if first.is_some() && first != prev {
        changes += 1;
    }
    changes <= 2
}

/// The contours of a validated polygon.
pub(super) fn contours<'a>(polygon: &Polygon<'a>) -> impl Iterator<Item = &'a [Point]> + 'a {
    let (points, counts) = (polygon.points, polygon.counts);
    let mut start = 0usize;
    counts
        .iter()
        .take_while(|&&c| c != 0)
        .map(move |&c| {
            let first = start;
            start += c as usize;
            &points[first..start]
        })
}

/// Copies `points` into `ring`, dropping repeated neighbours and a closing
/// copy of the first point. Returns how many points were dropped.
pub(super) fn clean_ring(points: &[Point], ring: &mut Vec<Point>) -> usize {
    ring.clear();
    for &p in points {
        if ring.last() != Some(&p) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    points.len() - ring.len()
}

/// At least three different positions: anything less encloses nothing.
pub(super) fn spans_area(ring: &[Point]) -> bool {
    let Some(&a) = ring.first() else {
        return false;
    };
    let Some(&b) = ring.iter().find(|&&p| p != a) else {
        return false;
    };
    ring.iter().any(|&p| p != a && p != b)
}

/// Adds `ring` as a closed loop of edges. Each edge carries winding +1 on
/// the side to its left, so a counter-clockwise ring has its interior at
/// winding one. Returns an edge of the loop.
pub(super) fn add_contour(mesh: &mut Mesh, ring: &[Point]) -> Result<EdgeIdx> {
    let mut e = INVALID;
    for &p in ring {
        if e == INVALID {
            // a self-loop: one vertex, two faces
            e = mesh.make_edge();
            mesh.splice(e, sym(e))?;
        } else {
            // the new vertex becomes the origin of lnext(e)
            mesh.split_edge(e)?;
            e = mesh.lnext(e);
        }
        let v = mesh.org(e);
        mesh.verts[v as usize].pos = p.to_sweep();
        mesh.edges[e as usize].winding = 1;
        mesh.edges[sym(e) as usize].winding = -1;
    }
    Ok(e)
}
