// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Delivering results to the caller.

use super::builder::spans_area;
use super::TessStats;
use crate::error::{Result, TessError};
use crate::geom::{loop_area2, orient, Point};
use crate::mesh::Mesh;

/// One unit of output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive<'a> {
    /// A closed loop; the last point repeats the first. Faces found by the
    /// sweep run counter-clockwise, contours passed as convex keep their
    /// input order.
    Polygon(&'a [Point]),
    /// Counter-clockwise triangles as consecutive triples of points.
    Triangles(&'a [Point]),
}

impl<'a> Primitive<'a> {
    pub fn points(&self) -> &'a [Point] {
        match *self {
            Primitive::Polygon(p) | Primitive::Triangles(p) => p,
        }
    }
}

/// Receives the primitives of a [`Tessellator::done`](super::Tessellator::done)
/// call. The borrowed points are only valid during `emit`.
///
/// Any `FnMut(Primitive<'_>)` closure is a sink; whatever it captures is the
/// caller's context.
pub trait PrimitiveSink {
    fn emit(&mut self, primitive: Primitive<'_>);
}

impl<F> PrimitiveSink for F
where
    F: FnMut(Primitive<'_>),
{
    fn emit(&mut self, primitive: Primitive<'_>) {
        self(primitive)
    }
}

/// A sink that keeps owned copies of everything it receives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collected {
    /// Closed loops, in emission order.
    pub polygons: Vec<Vec<Point>>,
    pub triangles: Vec<[Point; 3]>,
}

impl Collected {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.polygons.clear();
        self.triangles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.triangles.is_empty()
    }

    /// Total area covered by the collected primitives.
    pub fn area(&self) -> f64 {
        let loops: f64 = self.polygons.iter().map(|p| loop_area2(p).abs()).sum();
        let tris: f64 = self
            .triangles
            .iter()
            .map(|&[a, b, c]| orient(a, b, c).abs())
            .sum();
        (loops + tris) / 2.0
    }
}

impl PrimitiveSink for Collected {
    fn emit(&mut self, primitive: Primitive<'_>) {
        match primitive {
            Primitive::Polygon(points) => self.polygons.push(points.to_vec()),
            Primitive::Triangles(points) => self
                .triangles
                .extend(points.chunks_exact(3).map(|t| [t[0], t[1], t[2]])),
        }
    }
}

/// Reusable output buffers.
#[derive(Debug, Default)]
pub(super) struct Output {
    ring: Vec<Point>,
    triangles: Vec<Point>,
}

impl Output {
    pub(super) fn clear(&mut self) {
        self.ring.clear();
        self.triangles.clear();
    }

    /// Emits `points` as one closed loop unless it encloses nothing.
    pub(super) fn emit_loop<S>(&mut self, points: &[Point], sink: &mut S, stats: &mut TessStats)
    where
        S: PrimitiveSink + ?Sized,
    {
        self.ring.clear();
        self.ring.extend_from_slice(points);
        self.emit_ring(sink, stats);
    }

    /// Emits every inside face of `mesh` as a closed loop.
    pub(super) fn emit_faces<S>(&mut self, mesh: &Mesh, sink: &mut S, stats: &mut TessStats)
    where
        S: PrimitiveSink + ?Sized,
    {
        for f in mesh.face_ids() {
            if !mesh.faces[f as usize].inside {
                continue;
            }
            self.ring.clear();
            self.ring
                .extend(mesh.face_loop(f).map(|e| mesh.point(mesh.org(e))));
            if loop_area2(&self.ring) < 0.0 {
                // turned over by rounded intersection points
                log::debug!("skipping clockwise face of {} points", self.ring.len());
                stats.degenerate_faces += 1;
                continue;
            }
            self.emit_ring(sink, stats);
        }
    }

    fn emit_ring<S>(&mut self, sink: &mut S, stats: &mut TessStats)
    where
        S: PrimitiveSink + ?Sized,
    {
        if !spans_area(&self.ring) || loop_area2(&self.ring) == 0.0 {
            log::debug!("skipping loop of {} points with no area", self.ring.len());
            stats.degenerate_faces += 1;
            return;
        }
        let first = self.ring[0];
        if self.ring.last() != Some(&first) {
            self.ring.push(first);
        }
        sink.emit(Primitive::Polygon(&self.ring));
        stats.primitives += 1;
    }

    /// Queues the inside faces of a triangulated mesh.
    pub(super) fn add_triangles(&mut self, mesh: &Mesh, stats: &mut TessStats) -> Result<()> {
        for f in mesh.face_ids() {
            if !mesh.faces[f as usize].inside {
                continue;
            }
            let mut corners = [Point::default(); 3];
            let mut n = 0;
            for e in mesh.face_loop(f) {
                if n == 3 {
                    return Err(TessError::Topology("inside face is not a triangle"));
                }
                corners[n] = mesh.point(mesh.org(e));
                n += 1;
            }
            if n != 3 {
                return Err(TessError::Topology("inside face is not a triangle"));
            }
            let [a, b, c] = corners;
            if orient(a, b, c) <= 0.0 {
                log::debug!("skipping flat or turned triangle {:?} {:?} {:?}", a, b, c);
                stats.degenerate_faces += 1;
                continue;
            }
            self.triangles.extend_from_slice(&corners);
            stats.triangles += 1;
        }
        Ok(())
    }

    /// Emits every queued triangle in a single call, if there is any.
    pub(super) fn flush_triangles<S>(&mut self, sink: &mut S, stats: &mut TessStats)
    where
        S: PrimitiveSink + ?Sized,
    {
        if self.triangles.is_empty() {
            return;
        }
        sink.emit(Primitive::Triangles(&self.triangles));
        stats.primitives += 1;
        self.triangles.clear();
    }
}
