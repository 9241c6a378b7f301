// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// The public tessellator.
//
// A `done` call runs the stages in order: contours are loaded into the mesh,
// the sweep classifies faces and leaves every inside face monotone, inside
// faces are triangulated (or merged into convex pieces), and the result is
// handed to the caller's sink. Contours flagged convex skip the sweep and
// are handled one at a time.

mod builder;
mod output;


pub use output::{Collected, Primitive, PrimitiveSink};

use crate::error::{Result, TessError};
use crate::geom::{loop_area2, Point, Rect};
use crate::mesh::Mesh;
use crate::sweep::{Sweep, SweepCounters};
use output::Output;

/// Which regions of the plane count as inside, from their winding number.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// Winding number is not zero.
    #[default]
    NonZero,
    /// Winding number is odd.
    EvenOdd,
}

impl FillRule {
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding & 1 != 0,
        }
    }
}

/// Shape of the emitted primitives.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TessMode {
    /// Closed convex loops.
    Convex,
    /// Closed loops monotone along y.
    Monotone,
    /// One flat list of triangles.
    #[default]
    Triangulation,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TessConfig {
    pub rule: FillRule,
    pub mode: TessMode,
    /// Upper bound on the vertices of a merged loop in [`TessMode::Convex`].
    pub max_convex_vertices: usize,
    /// Run [`Mesh::check`] between stages.
    pub validate_mesh: bool,
}

impl Default for TessConfig {
    fn default() -> Self {
        TessConfig {
            rule: FillRule::NonZero,
            mode: TessMode::Triangulation,
            max_convex_vertices: usize::MAX,
            validate_mesh: cfg!(debug_assertions),
        }
    }
}

/// Stage of a `done` call. Between calls the tessellator is `Idle`; after a
/// fatal error it stays at the stage that failed.
///
/// Stages run in declaration order. Monotone decomposition happens in the
/// same sweep as classification, so it has no stage of its own.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TessState {
    #[default]
    Idle,
    Building,
    /// Sweep: inside/outside classification and monotone decomposition.
    Classifying,
    Triangulating,
    /// Merging triangles back into convex pieces, in [`TessMode::Convex`].
    Merging,
    Collecting,
}

/// What a `done` call did. Every degeneracy that was skipped is counted
/// here rather than reported as an error.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TessStats {
    /// Contours loaded into the mesh.
    pub contours: usize,
    /// Contours with fewer than three distinct points.
    pub skipped_contours: usize,
    pub events: usize,
    /// Events by vertex kind; every event gets exactly one.
    pub start_vertices: usize,
    pub end_vertices: usize,
    pub split_vertices: usize,
    pub merge_vertices: usize,
    pub regular_vertices: usize,
    pub diagonals: usize,
    pub intersections: usize,
    /// Repeated points, zero-length edges and coincident vertices removed.
    pub degenerate_edges: usize,
    /// Faces and loops dropped because they enclose no area.
    pub degenerate_faces: usize,
    /// Edges deleted while merging convex pieces.
    pub merged_edges: usize,
    pub primitives: usize,
    pub triangles: usize,
}

impl TessStats {
    fn absorb(&mut self, sweep: &SweepCounters) {
        self.events += sweep.events;
        self.start_vertices += sweep.start_vertices;
        self.end_vertices += sweep.end_vertices;
        self.split_vertices += sweep.split_vertices;
        self.merge_vertices += sweep.merge_vertices;
        self.regular_vertices += sweep.regular_vertices;
        self.diagonals += sweep.diagonals;
        self.intersections += sweep.intersections;
        self.degenerate_edges += sweep.zero_length_edges + sweep.coincident_vertices;
        self.degenerate_faces += sweep.degenerate_contours + sweep.degenerate_faces;
    }
}

/// Input of one `done` call.
#[derive(Copy, Clone, Debug)]
pub struct Polygon<'a> {
    pub points: &'a [Point],
    /// Points per contour, read up to the first zero.
    pub counts: &'a [u16],
    /// Every contour is convex and simple; the sweep is skipped.
    pub convex: bool,
}

impl<'a> Polygon<'a> {
    pub fn new(points: &'a [Point], counts: &'a [u16]) -> Self {
        Polygon {
            points,
            counts,
            convex: false,
        }
    }

    pub fn convex(points: &'a [Point], counts: &'a [u16]) -> Self {
        Polygon {
            points,
            counts,
            convex: true,
        }
    }
}

#[derive(Debug)]
pub struct Tessellator {
    mesh: Mesh,
    sweep: Sweep,
    output: Output,
    ring: Vec<Point>,
    config: TessConfig,
    state: TessState,
    poisoned: bool,
    /// Fails the given stage once it has been entered this many more times.
    #[cfg(test)]
    fail_at: Option<(TessState, usize)>,
}

impl Tessellator {
    pub fn new() -> Self {
        Self::with_config(TessConfig::default())
    }

    pub fn with_config(config: TessConfig) -> Self {
        Tessellator {
            mesh: Mesh::new(),
            sweep: Sweep::new(),
            output: Output::default(),
            ring: Vec::new(),
            config,
            state: TessState::Idle,
            poisoned: false,
            #[cfg(test)]
            fail_at: None,
        }
    }

    pub fn set_rule(&mut self, rule: FillRule) {
        self.config.rule = rule;
    }

    pub fn set_mode(&mut self, mode: TessMode) {
        self.config.mode = mode;
    }

    pub fn set_config(&mut self, config: TessConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &TessConfig {
        &self.config
    }

    pub fn state(&self) -> TessState {
        self.state
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// The mesh left by the last call: the tessellated result after a
    /// success, the partial state after a fatal error.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Drops all working state, including a poisoned one. Buffers keep
    /// their capacity.
    pub fn reset(&mut self) {
        self.mesh.clear();
        self.output.clear();
        self.ring.clear();
        self.state = TessState::Idle;
        self.poisoned = false;
    }

    /// Tessellates `polygon` and hands the primitives to `sink`.
    ///
    /// `bounds` must contain every point when given; it is computed from the
    /// points otherwise. Input errors are reported before anything changes
    /// and leave the tessellator usable. A [`TessError::Topology`] error
    /// poisons it until [`reset`](Self::reset).
    pub fn done<S>(
        &mut self,
        polygon: Polygon<'_>,
        bounds: Option<Rect>,
        sink: &mut S,
    ) -> Result<TessStats>
    where
        S: PrimitiveSink + ?Sized,
    {
        if self.poisoned {
            return Err(TessError::Poisoned);
        }
        let used = builder::validate(&polygon, bounds.as_ref())?;
        if polygon.convex && self.config.validate_mesh {
            builder::check_convex(&polygon, &mut self.ring)?;
        }

        self.mesh.clear();
        self.output.clear();
        let mut stats = TessStats::default();
        let result = if polygon.convex {
            self.done_convex(&polygon, sink, &mut stats)
        } else {
            let bounds = bounds.or_else(|| Rect::from_points(&polygon.points[..used]));
            self.done_concave(&polygon, bounds, sink, &mut stats)
        };

        match result {
            Ok(()) => {
                self.state = TessState::Idle;
                log::debug!(
                    "tessellated {} contours ({} skipped): {} events, {} intersections, {} primitives",
                    stats.contours,
                    stats.skipped_contours,
                    stats.events,
                    stats.intersections,
                    stats.primitives
                );
                Ok(stats)
            }
            Err(err) => {
                if err.is_fatal() {
                    self.poisoned = true;
                    log::debug!("tessellation failed during {:?}: {}", self.state, err);
                } else {
                    self.state = TessState::Idle;
                }
                Err(err)
            }
        }
    }

    fn enter(&mut self, state: TessState) -> Result<()> {
        self.state = state;
        #[cfg(test)]
        if let Some((at, ref mut remaining)) = self.fail_at {
            if at == state {
                if *remaining == 0 {
                    self.fail_at = None;
                    return Err(TessError::Topology("forced failure"));
                }
                *remaining -= 1;
            }
        }
        Ok(())
    }

    fn check_mesh(&self) -> Result<()> {
        if self.config.validate_mesh {
            self.mesh.check()?;
        }
        Ok(())
    }

    /// Copies `contour` into the ring buffer. Returns false when it encloses
    /// nothing.
    fn load_ring(&mut self, contour: &[Point], stats: &mut TessStats) -> bool {
        stats.degenerate_edges += builder::clean_ring(contour, &mut self.ring);
        if !builder::spans_area(&self.ring) {
            log::debug!("skipping contour of {} points", contour.len());
            stats.skipped_contours += 1;
            return false;
        }
        stats.contours += 1;
        true
    }

    /// Each contour is its own convex piece.
    fn done_convex<S>(&mut self, polygon: &Polygon<'_>, sink: &mut S, stats: &mut TessStats) -> Result<()>
    where
        S: PrimitiveSink + ?Sized,
    {
        let triangulate = self.config.mode == TessMode::Triangulation;
        for contour in builder::contours(polygon) {
            self.enter(TessState::Building)?;
            if !self.load_ring(contour, stats) {
                continue;
            }
            let area = loop_area2(&self.ring);

            if !triangulate {
                // the contour itself, in the caller's order
                self.enter(TessState::Collecting)?;
                self.output.emit_loop(&self.ring, sink, stats);
                continue;
            }

            if area == 0.0 {
                log::debug!("skipping convex contour with no area");
                stats.degenerate_faces += 1;
                continue;
            }
            self.mesh.clear();
            let e = builder::add_contour(&mut self.mesh, &self.ring)?;
            self.check_mesh()?;
            // lface(e) runs in input order, rface(e) against it
            let face = if area > 0.0 {
                self.mesh.lface(e)
            } else {
                self.mesh.rface(e)
            };
            self.mesh.faces[face as usize].inside = true;
            self.mesh.faces[face as usize].winding = 1;

            self.enter(TessState::Triangulating)?;
            self.mesh.tessellate_mono_region(face)?;
            self.check_mesh()?;

            self.enter(TessState::Collecting)?;
            self.output.add_triangles(&self.mesh, stats)?;
        }
        if triangulate {
            self.enter(TessState::Collecting)?;
            self.output.flush_triangles(sink, stats);
        }
        Ok(())
    }

    fn done_concave<S>(
        &mut self,
        polygon: &Polygon<'_>,
        bounds: Option<Rect>,
        sink: &mut S,
        stats: &mut TessStats,
    ) -> Result<()>
    where
        S: PrimitiveSink + ?Sized,
    {
        self.enter(TessState::Building)?;
        for contour in builder::contours(polygon) {
            if self.load_ring(contour, stats) {
                builder::add_contour(&mut self.mesh, &self.ring)?;
            }
        }
        let Some(bounds) = bounds.filter(|_| stats.contours > 0) else {
            return Ok(());
        };
        self.check_mesh()?;

        self.enter(TessState::Classifying)?;
        let counters = self
            .sweep
            .run(&mut self.mesh, self.config.rule, bounds.sweep_extent())?;
        stats.absorb(&counters);
        self.check_mesh()?;

        match self.config.mode {
            TessMode::Monotone => {}
            TessMode::Triangulation => {
                self.enter(TessState::Triangulating)?;
                self.mesh.tessellate_interior()?;
                self.check_mesh()?;
            }
            TessMode::Convex => {
                self.enter(TessState::Triangulating)?;
                self.mesh.tessellate_interior()?;
                self.check_mesh()?;
                self.enter(TessState::Merging)?;
                stats.merged_edges += self
                    .mesh
                    .merge_convex_faces(self.config.max_convex_vertices.max(3))?;
                self.check_mesh()?;
            }
        }

        self.enter(TessState::Collecting)?;
        if self.config.mode == TessMode::Triangulation {
            self.output.add_triangles(&self.mesh, stats)?;
            self.output.flush_triangles(sink, stats);
        } else {
            self.output.emit_faces(&self.mesh, sink, stats);
        }
        Ok(())
    }
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}
