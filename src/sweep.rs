// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Plane sweep over the mesh.
//
// Vertices are processed in sweep order. The active edges crossing the sweep
// line are kept in `dict`, bottom to top, and the space between two
// neighbouring edges is an `ActiveRegion` carrying the winding number of that
// space. A region's upper edge `e_up` is directed right to left: its origin
// lies ahead of the sweep line and its destination behind it.
//
// The same pass resolves crossings (both edges are split at a new vertex
// which goes back into the event queue), classifies every face it closes
// as inside or outside, and inserts the diagonals that leave every inside
// face monotone. Vertex events live in `monotone.rs`.

mod monotone;

pub use monotone::VertexKind;

use crate::dict::{Dict, NodeIdx};
use crate::error::{Result, TessError};
use crate::geom::{edge_eval, edge_intersect, edge_sign, vert_eq, vert_leq, Real, SweepPos};
use crate::mesh::{sym, EdgeIdx, Mesh, VertIdx, E_HEAD, F_HEAD, INVALID};
use crate::pool::Pool;
use crate::priorityq::EventQueue;
use crate::tess::FillRule;

pub type RegionIdx = u32;

/// The space between two neighbouring active edges.
#[derive(Clone, Debug)]
pub struct ActiveRegion {
    /// Upper edge, directed right to left.
    pub e_up: EdgeIdx,
    /// Node of this region in the edge dictionary.
    pub node_up: NodeIdx,
    pub winding: i32,
    pub inside: bool,
    /// One of the two edges bounding the whole sweep.
    pub sentinel: bool,
    /// Upper or lower edge changed; ordering and crossings must be rechecked.
    pub dirty: bool,
    /// `e_up` is a temporary edge added at a vertex with no right-going
    /// edges. It is replaced as soon as a better target is seen.
    pub fix_upper_edge: bool,
}

impl ActiveRegion {
    fn new(e_up: EdgeIdx) -> Self {
        ActiveRegion {
            e_up,
            node_up: INVALID,
            winding: 0,
            inside: false,
            sentinel: false,
            dirty: false,
            fix_upper_edge: false,
        }
    }
}

/// What one sweep observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepCounters {
    pub events: usize,
    pub start_vertices: usize,
    pub end_vertices: usize,
    pub split_vertices: usize,
    pub merge_vertices: usize,
    pub regular_vertices: usize,
    /// Edges inserted by the sweep, temporary ones included.
    pub diagonals: usize,
    pub intersections: usize,
    /// Input vertices folded into an earlier vertex at the same position.
    pub coincident_vertices: usize,
    pub zero_length_edges: usize,
    pub degenerate_contours: usize,
    pub degenerate_faces: usize,
}

impl SweepCounters {
    pub(crate) fn record(&mut self, kind: VertexKind) {
        match kind {
            VertexKind::Start => self.start_vertices += 1,
            VertexKind::End => self.end_vertices += 1,
            VertexKind::Split => self.split_vertices += 1,
            VertexKind::Merge => self.merge_vertices += 1,
            VertexKind::RegularLeft | VertexKind::RegularRight => self.regular_vertices += 1,
        }
    }
}

/// Sweep state. Buffers are reused between runs.
#[derive(Debug, Default)]
pub struct Sweep {
    dict: Dict,
    regions: Pool<ActiveRegion>,
    queue: EventQueue,
    /// Vertex being processed.
    event: VertIdx,
    rule: FillRule,
    counters: SweepCounters,
    kind_recorded: bool,
}

impl Sweep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies every face of `mesh` under `rule` and splits the inside
    /// faces into monotone pieces.
    ///
    /// `extent` is `(s_min, s_max, t_min, t_max)` of every vertex in sweep
    /// space; the sentinel edges are placed outside it.
    pub fn run(
        &mut self,
        mesh: &mut Mesh,
        rule: FillRule,
        extent: (Real, Real, Real, Real),
    ) -> Result<SweepCounters> {
        self.dict.clear();
        self.regions.clear();
        self.queue.clear();
        self.rule = rule;
        self.counters = SweepCounters::default();

        self.remove_degenerate_edges(mesh)?;
        self.queue.init(mesh);
        self.init_edge_dict(mesh, extent);

        while let Some(v) = self.queue.pop(mesh) {
            // Vertices at one position become a single event.
            while let Some(next) = self.queue.peek(mesh) {
                if !vert_eq(mesh.pos(next), mesh.pos(v)) {
                    break;
                }
                self.queue.pop(mesh);
                let (a, b) = (mesh.verts[v as usize].an_edge, mesh.verts[next as usize].an_edge);
                mesh.splice(a, b)?;
                self.counters.coincident_vertices += 1;
            }
            self.counters.events += 1;
            self.kind_recorded = false;
            self.sweep_event(mesh, v)?;
        }

        self.done_edge_dict(mesh)?;
        self.remove_degenerate_faces(mesh)?;
        Ok(self.counters)
    }

    // Regions

    fn region_above(&self, reg: RegionIdx) -> Option<RegionIdx> {
        self.dict.key(self.dict.succ(self.regions[reg].node_up))
    }

    fn region_below(&self, reg: RegionIdx) -> Option<RegionIdx> {
        self.dict.key(self.dict.pred(self.regions[reg].node_up))
    }

    fn above(&self, reg: RegionIdx) -> Result<RegionIdx> {
        self.region_above(reg)
            .ok_or(TessError::Topology("sweep region has no region above it"))
    }

    fn below(&self, reg: RegionIdx) -> Result<RegionIdx> {
        self.region_below(reg)
            .ok_or(TessError::Topology("sweep region has no region below it"))
    }

    fn e_up(&self, reg: RegionIdx) -> EdgeIdx {
        self.regions[reg].e_up
    }

    fn is_fix(&self, reg: RegionIdx) -> bool {
        self.regions[reg].fix_upper_edge
    }

    fn mark_dirty(&mut self, reg: RegionIdx) {
        self.regions[reg].dirty = true;
    }

    /// Points `reg` at a new upper edge.
    fn set_upper_edge(&mut self, mesh: &mut Mesh, reg: RegionIdx, e: EdgeIdx) {
        let old = self.regions[reg].e_up;
        if mesh.edges[old as usize].active_region == reg {
            mesh.edges[old as usize].active_region = INVALID;
        }
        self.regions[reg].e_up = e;
        mesh.edges[e as usize].active_region = reg;
    }

    /// Inserts a region with upper edge `e_new_up` directly below
    /// `reg_above`, or lower if the ordering demands it. The winding number
    /// is left for the caller to fill in.
    fn add_region_below(&mut self, mesh: &mut Mesh, reg_above: RegionIdx, e_new_up: EdgeIdx) -> RegionIdx {
        let reg = self.regions.alloc(ActiveRegion::new(e_new_up));
        let start = self.regions[reg_above].node_up;
        let event = self.event;
        let view: &Mesh = mesh;
        let regions = &self.regions;
        let node = self
            .dict
            .insert_before(start, reg, |k| edge_leq(view, event, regions[k].e_up, e_new_up));
        self.regions[reg].node_up = node;
        mesh.edges[e_new_up as usize].active_region = reg;
        reg
    }

    fn delete_region(&mut self, mesh: &mut Mesh, reg: RegionIdx) {
        let e_up = self.regions[reg].e_up;
        if mesh.edges[e_up as usize].active_region == reg {
            mesh.edges[e_up as usize].active_region = INVALID;
        }
        self.dict.delete(self.regions[reg].node_up);
        self.regions.free(reg);
    }

    /// Replaces a temporary upper edge with `new_edge`.
    fn fix_upper_edge(&mut self, mesh: &mut Mesh, reg: RegionIdx, new_edge: EdgeIdx) -> Result<()> {
        if !self.is_fix(reg) {
            return Err(TessError::Topology("replacing an upper edge that is not temporary"));
        }
        mesh.delete_edge(self.e_up(reg))?;
        self.regions[reg].fix_upper_edge = false;
        self.regions[reg].e_up = new_edge;
        mesh.edges[new_edge as usize].active_region = reg;
        Ok(())
    }

    fn compute_winding(&mut self, mesh: &Mesh, reg: RegionIdx) -> Result<()> {
        let above = self.above(reg)?;
        let winding = self.regions[above].winding + mesh.edges[self.e_up(reg) as usize].winding;
        self.regions[reg].winding = winding;
        self.regions[reg].inside = self.rule.is_inside(winding);
        Ok(())
    }

    /// The face left of `reg`'s upper edge is complete: record its
    /// classification and drop the region.
    fn finish_region(&mut self, mesh: &mut Mesh, reg: RegionIdx) {
        let e = self.e_up(reg);
        let f = mesh.lface(e) as usize;
        mesh.faces[f].inside = self.regions[reg].inside;
        mesh.faces[f].winding = self.regions[reg].winding;
        mesh.faces[f].an_edge = e;
        self.delete_region(mesh, reg);
    }

    /// Region above the topmost edge ending at `reg.e_up`'s destination.
    fn top_right_region(&self, mesh: &Mesh, reg: RegionIdx) -> Result<RegionIdx> {
        let dst = mesh.dst(self.e_up(reg));
        let mut reg = reg;
        loop {
            reg = self.above(reg)?;
            if mesh.dst(self.e_up(reg)) != dst {
                return Ok(reg);
            }
        }
    }

    /// Adds regions for the right-going edges `e_first ..= e_last` (walking
    /// `onext`, `e_last` exclusive) that share an origin, below `reg_up`.
    /// The edges are spliced into dictionary order around their origin and
    /// the new regions get their winding numbers.
    ///
    /// `e_top_left` is the edge just above the new ones around the origin,
    /// `None` when no left-going edge exists there.
    fn add_right_edges(
        &mut self,
        mesh: &mut Mesh,
        reg_up: RegionIdx,
        e_first: EdgeIdx,
        e_last: EdgeIdx,
        e_top_left: Option<EdgeIdx>,
        clean_up: bool,
    ) -> Result<()> {
        let mut e = e_first;
        loop {
            self.add_region_below(mesh, reg_up, sym(e));
            e = mesh.onext(e);
            if e == e_last {
                break;
            }
        }

        let e_top_left = match e_top_left {
            Some(e) => e,
            None => mesh.rprev(self.e_up(self.below(reg_up)?)),
        };
        let mut reg_prev = reg_up;
        let mut e_prev = e_top_left;
        let mut first = true;
        loop {
            let reg = self.below(reg_prev)?;
            let e = sym(self.e_up(reg));
            if mesh.org(e) != mesh.org(e_prev) {
                break;
            }
            if mesh.onext(e) != e_prev {
                // move e directly below e_prev in the origin ring
                mesh.splice(mesh.oprev(e), e)?;
                mesh.splice(mesh.oprev(e_prev), e)?;
            }
            let winding = self.regions[reg_prev].winding - mesh.edges[e as usize].winding;
            self.regions[reg].winding = winding;
            self.regions[reg].inside = self.rule.is_inside(winding);

            self.mark_dirty(reg_prev);
            if !first && self.check_for_right_splice(mesh, reg_prev)? {
                add_winding(mesh, e, e_prev);
                self.delete_region(mesh, reg_prev);
                mesh.delete_edge(e_prev)?;
            }
            first = false;
            reg_prev = reg;
            e_prev = e;
        }
        self.mark_dirty(reg_prev);
        if clean_up {
            self.walk_dirty_regions(mesh, reg_prev)?;
        }
        Ok(())
    }

    // Ordering repair

    /// Makes the origins of `reg_up`'s two edges respect the dictionary
    /// order, splicing one into the other when they are out of order.
    /// Returns whether anything changed.
    fn check_for_right_splice(&mut self, mesh: &mut Mesh, reg_up: RegionIdx) -> Result<bool> {
        let reg_lo = self.below(reg_up)?;
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);
        let (org_up, org_lo) = (mesh.org_pos(e_up), mesh.org_pos(e_lo));

        if vert_leq(org_up, org_lo) {
            if edge_sign(mesh.dst_pos(e_lo), org_up, org_lo) > 0.0 {
                return Ok(false);
            }
            if !vert_eq(org_up, org_lo) {
                // e_up's origin lies on e_lo
                mesh.split_edge(sym(e_lo))?;
                mesh.splice(e_up, mesh.oprev(e_lo))?;
                self.mark_dirty(reg_up);
                self.mark_dirty(reg_lo);
            } else if mesh.org(e_up) != mesh.org(e_lo) {
                // same position: keep e_lo's origin
                let dup = mesh.org(e_up);
                EventQueue::remove(mesh, dup);
                mesh.splice(mesh.oprev(e_lo), e_up)?;
                self.counters.coincident_vertices += 1;
            }
        } else {
            if edge_sign(mesh.dst_pos(e_up), org_lo, org_up) < 0.0 {
                return Ok(false);
            }
            // e_lo's origin lies on e_up
            let above = self.above(reg_up)?;
            self.mark_dirty(above);
            self.mark_dirty(reg_up);
            mesh.split_edge(sym(e_up))?;
            mesh.splice(mesh.oprev(e_lo), e_up)?;
        }
        Ok(true)
    }

    /// Same as [`Self::check_for_right_splice`] for the destinations, which
    /// are behind the sweep line.
    fn check_for_left_splice(&mut self, mesh: &mut Mesh, reg_up: RegionIdx) -> Result<bool> {
        let reg_lo = self.below(reg_up)?;
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);
        let (dst_up, dst_lo) = (mesh.dst_pos(e_up), mesh.dst_pos(e_lo));

        if vert_leq(dst_up, dst_lo) {
            if edge_sign(dst_up, dst_lo, mesh.org_pos(e_up)) < 0.0 {
                return Ok(false);
            }
            // e_lo's destination lies on e_up
            let above = self.above(reg_up)?;
            self.mark_dirty(above);
            self.mark_dirty(reg_up);
            let e = mesh.split_edge(e_up)?;
            mesh.splice(sym(e_lo), e)?;
            let f = mesh.lface(e) as usize;
            mesh.faces[f].inside = self.regions[reg_up].inside;
        } else {
            if edge_sign(dst_lo, dst_up, mesh.org_pos(e_lo)) > 0.0 {
                return Ok(false);
            }
            // e_up's destination lies on e_lo
            self.mark_dirty(reg_up);
            self.mark_dirty(reg_lo);
            let e = mesh.split_edge(e_lo)?;
            mesh.splice(mesh.lnext(e_up), sym(e_lo))?;
            let f = mesh.rface(e) as usize;
            mesh.faces[f].inside = self.regions[reg_up].inside;
        }
        Ok(true)
    }

    /// Tests the two edges of `reg_up` for a crossing ahead of the sweep
    /// line and splits both at the crossing. Returns `true` when the repair
    /// already walked the dirty regions, so the caller must stop.
    fn check_for_intersect(&mut self, mesh: &mut Mesh, reg_up: RegionIdx) -> Result<bool> {
        let reg_lo = self.below(reg_up)?;
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);
        if mesh.org(e_up) == mesh.org(e_lo) {
            return Ok(false);
        }
        let (org_up, dst_up) = (mesh.org_pos(e_up), mesh.dst_pos(e_up));
        let (org_lo, dst_lo) = (mesh.org_pos(e_lo), mesh.dst_pos(e_lo));

        if org_up.t.min(dst_up.t) > org_lo.t.max(dst_lo.t) {
            return Ok(false);
        }
        if vert_leq(org_up, org_lo) {
            if edge_sign(dst_lo, org_up, org_lo) > 0.0 {
                return Ok(false);
            }
        } else if edge_sign(dst_up, org_lo, org_up) < 0.0 {
            return Ok(false);
        }

        let ev = mesh.pos(self.event);
        let mut isect = edge_intersect(dst_up, org_up, dst_lo, org_lo);
        // The crossing may not be placed behind the sweep line or past the
        // nearer right endpoint.
        if vert_leq(isect, ev) {
            isect = ev;
        }
        let org_min = if vert_leq(org_up, org_lo) { org_up } else { org_lo };
        if vert_leq(org_min, isect) {
            isect = org_min;
        }

        if vert_eq(isect, org_up) || vert_eq(isect, org_lo) {
            self.check_for_right_splice(mesh, reg_up)?;
            return Ok(false);
        }

        let up_wrong_side = !vert_eq(dst_up, ev) && edge_sign(dst_up, ev, isect) >= 0.0;
        let lo_wrong_side = !vert_eq(dst_lo, ev) && edge_sign(dst_lo, ev, isect) <= 0.0;
        if up_wrong_side || lo_wrong_side {
            if mesh.dst(e_lo) == self.event {
                // splice the event into e_up and redo its regions
                mesh.split_edge(sym(e_up))?;
                mesh.splice(sym(e_lo), e_up)?;
                let reg_up = self.top_left_region(mesh, reg_up)?;
                let reg = self.below(reg_up)?;
                let e_up = self.e_up(reg);
                self.finish_left_regions(mesh, reg, Some(reg_lo))?;
                let e_first = mesh.oprev(e_up);
                self.add_right_edges(mesh, reg_up, e_first, e_up, Some(e_up), true)?;
                return Ok(true);
            }
            if mesh.dst(e_up) == self.event {
                // splice the event into e_lo and redo its regions
                mesh.split_edge(sym(e_lo))?;
                mesh.splice(mesh.lnext(e_up), mesh.oprev(e_lo))?;
                let reg_lo = reg_up;
                let reg_up = self.top_right_region(mesh, reg_up)?;
                let e = mesh.rprev(self.e_up(self.below(reg_up)?));
                let lower_piece = mesh.oprev(e_lo);
                self.set_upper_edge(mesh, reg_lo, lower_piece);
                let e_lo = self.finish_left_regions(mesh, reg_lo, None)?;
                let (e_first, e_last) = (mesh.onext(e_lo), mesh.rprev(e_up));
                self.add_right_edges(mesh, reg_up, e_first, e_last, Some(e), true)?;
                return Ok(true);
            }
            // An edge passes on the wrong side of the event: split it at the
            // event and let the caller splice it.
            if edge_sign(dst_up, ev, isect) >= 0.0 {
                let above = self.above(reg_up)?;
                self.mark_dirty(above);
                self.mark_dirty(reg_up);
                mesh.split_edge(sym(e_up))?;
                let v = mesh.org(e_up);
                mesh.verts[v as usize].pos = ev;
            }
            if edge_sign(dst_lo, ev, isect) <= 0.0 {
                self.mark_dirty(reg_up);
                self.mark_dirty(reg_lo);
                mesh.split_edge(sym(e_lo))?;
                let v = mesh.org(e_lo);
                mesh.verts[v as usize].pos = ev;
            }
            return Ok(false);
        }

        // General case: both edges meet at a new vertex, queued for later.
        mesh.split_edge(sym(e_up))?;
        mesh.split_edge(sym(e_lo))?;
        mesh.splice(mesh.oprev(e_lo), e_up)?;
        let v = mesh.org(e_up);
        mesh.verts[v as usize].pos = isect;
        self.queue.insert(mesh, v);
        self.counters.intersections += 1;
        log::trace!("edges {} and {} cross at ({}, {})", e_up, e_lo, isect.to_point().x, isect.to_point().y);

        let above = self.above(reg_up)?;
        self.mark_dirty(above);
        self.mark_dirty(reg_up);
        self.mark_dirty(reg_lo);
        Ok(false)
    }

    /// Rechecks every dirty region from `reg_up` downwards until the
    /// dictionary order holds and no pair of neighbouring edges crosses.
    fn walk_dirty_regions(&mut self, mesh: &mut Mesh, reg_up: RegionIdx) -> Result<()> {
        let mut reg_up = reg_up;
        let mut reg_lo = self.below(reg_up)?;
        loop {
            // lowest dirty region first
            while self.regions[reg_lo].dirty {
                reg_up = reg_lo;
                reg_lo = self.below(reg_lo)?;
            }
            if !self.regions[reg_up].dirty {
                reg_lo = reg_up;
                match self.region_above(reg_up) {
                    Some(r) if self.regions[r].dirty => reg_up = r,
                    _ => return Ok(()),
                }
            }
            self.regions[reg_up].dirty = false;
            let mut e_up = self.e_up(reg_up);
            let mut e_lo = self.e_up(reg_lo);

            if mesh.dst(e_up) != mesh.dst(e_lo) && self.check_for_left_splice(mesh, reg_up)? {
                // a temporary edge is no longer needed once the vertex
                // gained a real right-going edge
                if self.is_fix(reg_lo) {
                    self.delete_region(mesh, reg_lo);
                    mesh.delete_edge(e_lo)?;
                    reg_lo = self.below(reg_up)?;
                    e_lo = self.e_up(reg_lo);
                } else if self.is_fix(reg_up) {
                    self.delete_region(mesh, reg_up);
                    mesh.delete_edge(e_up)?;
                    reg_up = self.above(reg_lo)?;
                    e_up = self.e_up(reg_up);
                }
            }
            if mesh.org(e_up) != mesh.org(e_lo) {
                let crossing_possible = mesh.dst(e_up) != mesh.dst(e_lo)
                    && !self.is_fix(reg_up)
                    && !self.is_fix(reg_lo)
                    && (mesh.dst(e_up) == self.event || mesh.dst(e_lo) == self.event);
                if crossing_possible {
                    if self.check_for_intersect(mesh, reg_up)? {
                        return Ok(());
                    }
                } else {
                    self.check_for_right_splice(mesh, reg_up)?;
                }
            }
            if mesh.org(e_up) == mesh.org(e_lo) && mesh.dst(e_up) == mesh.dst(e_lo) {
                // two edges bounding an empty loop
                add_winding(mesh, e_lo, e_up);
                self.delete_region(mesh, reg_up);
                mesh.delete_edge(e_up)?;
                reg_up = self.above(reg_lo)?;
            }
        }
    }

    // Setup and teardown

    /// Zero-length edges and contours of one or two edges carry no area.
    fn remove_degenerate_edges(&mut self, mesh: &mut Mesh) -> Result<()> {
        let mut e = mesh.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            let mut e_next = mesh.edges[e as usize].next;
            let mut e_lnext = mesh.lnext(e);

            if vert_eq(mesh.org_pos(e), mesh.dst_pos(e)) && mesh.lnext(e_lnext) != e {
                mesh.splice(e_lnext, e)?;
                mesh.delete_edge(e)?;
                self.counters.zero_length_edges += 1;
                e = e_lnext;
                e_lnext = mesh.lnext(e);
            }
            if mesh.lnext(e_lnext) == e {
                if e_lnext != e {
                    if e_lnext == e_next || e_lnext == sym(e_next) {
                        e_next = mesh.edges[e_next as usize].next;
                    }
                    mesh.delete_edge(e_lnext)?;
                }
                if e == e_next || e == sym(e_next) {
                    e_next = mesh.edges[e_next as usize].next;
                }
                mesh.delete_edge(e)?;
                self.counters.degenerate_contours += 1;
            }
            e = e_next;
        }
        Ok(())
    }

    /// Two horizontal edges below and above everything keep every real
    /// region bounded on both sides.
    fn init_edge_dict(&mut self, mesh: &mut Mesh, extent: (Real, Real, Real, Real)) {
        let (smin, smax, tmin, tmax) = extent;
        let w = (smax - smin) + 0.01;
        let h = (tmax - tmin) + 0.01;
        self.add_sentinel(mesh, smin - w, smax + w, tmin - h);
        self.add_sentinel(mesh, smin - w, smax + w, tmax + h);
    }

    fn add_sentinel(&mut self, mesh: &mut Mesh, smin: Real, smax: Real, t: Real) {
        let e = mesh.make_edge();
        let (org, dst) = (mesh.org(e), mesh.dst(e));
        mesh.verts[org as usize].pos = SweepPos::new(smax, t);
        mesh.verts[dst as usize].pos = SweepPos::new(smin, t);
        self.event = dst;

        let reg = self.regions.alloc(ActiveRegion {
            sentinel: true,
            ..ActiveRegion::new(e)
        });
        let event = self.event;
        let view: &Mesh = mesh;
        let regions = &self.regions;
        let node = self
            .dict
            .insert(reg, |k| edge_leq(view, event, regions[k].e_up, e));
        self.regions[reg].node_up = node;
        mesh.edges[e as usize].active_region = reg;
    }

    /// Drops the remaining regions together with their edges: the two
    /// sentinels and at most one temporary edge from the last event.
    fn done_edge_dict(&mut self, mesh: &mut Mesh) -> Result<()> {
        while let Some(reg) = self.dict.key(self.dict.min()) {
            let ActiveRegion {
                e_up,
                sentinel,
                fix_upper_edge,
                winding,
                ..
            } = self.regions[reg];
            if !sentinel && !fix_upper_edge {
                return Err(TessError::Topology("sweep finished with a real edge still active"));
            }
            if winding != 0 {
                log::debug!("region of edge {} left the sweep with winding {}", e_up, winding);
            }
            self.delete_region(mesh, reg);
            mesh.delete_edge(e_up)?;
        }
        Ok(())
    }

    /// Deletes faces bounded by only two edges, folding their winding into
    /// the neighbouring edge.
    fn remove_degenerate_faces(&mut self, mesh: &mut Mesh) -> Result<()> {
        let mut f = mesh.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            let f_next = mesh.faces[f as usize].next;
            let e = mesh.faces[f as usize].an_edge;
            if mesh.lnext(mesh.lnext(e)) == e {
                let neighbour = mesh.onext(e);
                add_winding(mesh, neighbour, e);
                mesh.delete_edge(e)?;
                self.counters.degenerate_faces += 1;
            }
            f = f_next;
        }
        Ok(())
    }
}

/// Folds the winding contribution of `src` into `dst`.
fn add_winding(mesh: &mut Mesh, dst: EdgeIdx, src: EdgeIdx) {
    mesh.edges[dst as usize].winding += mesh.edges[src as usize].winding;
    mesh.edges[sym(dst) as usize].winding += mesh.edges[sym(src) as usize].winding;
}

/// Dictionary order at the current event: is `e1` at or below `e2`?
///
/// Both edges cross the sweep line. An edge ending at the event itself is
/// compared by orientation against the other edge, since its position along
/// the sweep line is exactly the event.
fn edge_leq(mesh: &Mesh, event: VertIdx, e1: EdgeIdx, e2: EdgeIdx) -> bool {
    let ev = mesh.pos(event);
    let (o1, d1) = (mesh.org_pos(e1), mesh.dst_pos(e1));
    let (o2, d2) = (mesh.org_pos(e2), mesh.dst_pos(e2));

    match (mesh.dst(e1) == event, mesh.dst(e2) == event) {
        (true, true) => {
            // both edges start at the event: compare their slopes
            if vert_leq(o1, o2) {
                edge_sign(d2, o1, o2) <= 0.0
            } else {
                edge_sign(d1, o2, o1) >= 0.0
            }
        }
        (true, false) => edge_sign(d2, ev, o2) <= 0.0,
        (false, true) => edge_sign(d1, ev, o1) >= 0.0,
        (false, false) => edge_eval(d1, ev, o1) >= edge_eval(d2, ev, o2),
    }
}
