// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Vertex events of the sweep.
//
// Each event first closes the regions whose edges end at the vertex, then
// opens regions for the edges leaving it. A vertex that would leave an inside
// face non-monotone gets a diagonal:
//   - a split vertex (nothing behind it, inside region) is joined to the
//     rightmost processed vertex of the region it lands in
//   - a merge vertex (nothing ahead of it, inside region) gets a temporary
//     edge to the nearer right endpoint of the region's edges; the edge is
//     re-targeted to the next vertex the region sees, which is the helper
//     of the textbook algorithm

use super::{RegionIdx, Sweep};
use crate::error::{Result, TessError};
use crate::geom::{edge_sign, vert_eq, vert_leq};
use crate::mesh::{sym, EdgeIdx, Mesh, VertIdx, INVALID};

/// How a vertex relates to its neighbours along the sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// Both neighbours ahead, outside region: a new piece begins.
    Start,
    /// Both neighbours behind, outside region: a piece ends.
    End,
    /// Both neighbours ahead inside the fill.
    Split,
    /// Both neighbours behind inside the fill.
    Merge,
    /// One neighbour behind and one ahead, fill on the right.
    RegularLeft,
    /// One neighbour behind and one ahead, fill on the left.
    RegularRight,
}

impl Sweep {
    /// Records the kind of the current event. Re-entered events keep the
    /// first kind.
    fn classified(&mut self, v: VertIdx, kind: VertexKind) {
        if self.kind_recorded {
            return;
        }
        self.kind_recorded = true;
        self.counters.record(kind);
        log::trace!("event {} ({:?})", v, kind);
    }

    /// Processes vertex `v`.
    pub(super) fn sweep_event(&mut self, mesh: &mut Mesh, v: VertIdx) -> Result<()> {
        self.event = v;

        // An edge already in the dictionary that ends here saves a search.
        let start = mesh.verts[v as usize].an_edge;
        let mut e = start;
        while mesh.edges[e as usize].active_region == INVALID {
            e = mesh.onext(e);
            if e == start {
                // every edge goes right
                return self.connect_left_vertex(mesh, v);
            }
        }

        let reg_first = mesh.edges[e as usize].active_region;
        let reg_up = self.top_left_region(mesh, reg_first)?;
        let reg = self.below(reg_up)?;
        let e_top_left = self.e_up(reg);
        let e_bottom_left = self.finish_left_regions(mesh, reg, None)?;

        if mesh.onext(e_bottom_left) == e_top_left {
            // no right-going edges
            let kind = if self.regions[reg_up].inside {
                VertexKind::Merge
            } else {
                VertexKind::End
            };
            self.classified(v, kind);
            self.connect_right_vertex(mesh, reg_up, e_bottom_left)
        } else {
            let kind = if self.regions[reg_up].inside {
                VertexKind::RegularRight
            } else {
                VertexKind::RegularLeft
            };
            self.classified(v, kind);
            let e_first = mesh.onext(e_bottom_left);
            self.add_right_edges(mesh, reg_up, e_first, e_top_left, Some(e_top_left), true)
        }
    }

    /// Region above the topmost edge sharing `reg.e_up`'s origin. A
    /// temporary upper edge met on the way is replaced by a real diagonal
    /// to that origin.
    pub(super) fn top_left_region(&mut self, mesh: &mut Mesh, reg: RegionIdx) -> Result<RegionIdx> {
        let org = mesh.org(self.e_up(reg));
        let mut reg = reg;
        loop {
            reg = self.above(reg)?;
            if mesh.org(self.e_up(reg)) != org {
                break;
            }
        }
        if self.is_fix(reg) {
            let (from, to) = (sym(self.e_up(self.below(reg)?)), mesh.lnext(self.e_up(reg)));
            let e = mesh.connect(from, to)?;
            self.counters.diagonals += 1;
            self.fix_upper_edge(mesh, reg, e)?;
            reg = self.above(reg)?;
        }
        Ok(reg)
    }

    /// Closes the regions from `reg_first` downwards whose edges meet at the
    /// event, down to `reg_last` (or the first region not ending at the
    /// event). Edges are spliced into sweep order around the event on the
    /// way. Returns the lowest left-going edge at the event.
    pub(super) fn finish_left_regions(
        &mut self,
        mesh: &mut Mesh,
        reg_first: RegionIdx,
        reg_last: Option<RegionIdx>,
    ) -> Result<EdgeIdx> {
        let mut reg_prev = reg_first;
        let mut e_prev = self.e_up(reg_first);
        while Some(reg_prev) != reg_last {
            self.regions[reg_prev].fix_upper_edge = false;
            let reg = self.below(reg_prev)?;
            let mut e = self.e_up(reg);
            if mesh.org(e) != mesh.org(e_prev) {
                if !self.is_fix(reg) {
                    self.finish_region(mesh, reg_prev);
                    break;
                }
                // the temporary edge below can now end at the event
                let from = mesh.lprev(e_prev);
                e = mesh.connect(from, sym(e))?;
                self.counters.diagonals += 1;
                self.fix_upper_edge(mesh, reg, e)?;
            }
            if mesh.onext(e_prev) != e {
                mesh.splice(mesh.oprev(e), e)?;
                mesh.splice(e_prev, e)?;
            }
            self.finish_region(mesh, reg_prev);
            e_prev = self.e_up(reg);
            reg_prev = reg;
        }
        Ok(e_prev)
    }

    /// The event has only left-going edges, with `reg_up` above them and
    /// `e_bottom_left` the lowest. Without a right-going edge the region
    /// would be lost, so a temporary edge is added.
    fn connect_right_vertex(&mut self, mesh: &mut Mesh, reg_up: RegionIdx, e_bottom_left: EdgeIdx) -> Result<()> {
        let mut reg_up = reg_up;
        let mut e_bottom_left = e_bottom_left;
        let mut e_top_left = mesh.onext(e_bottom_left);
        let reg_lo = self.below(reg_up)?;
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);
        let mut degenerate = false;

        if mesh.dst(e_up) != mesh.dst(e_lo) {
            self.check_for_intersect(mesh, reg_up)?;
        }

        // the region's edges may pass through the event
        let ev = mesh.pos(self.event);
        if vert_eq(mesh.org_pos(e_up), ev) {
            mesh.splice(mesh.oprev(e_top_left), e_up)?;
            reg_up = self.top_left_region(mesh, reg_up)?;
            let reg = self.below(reg_up)?;
            e_top_left = self.e_up(reg);
            self.finish_left_regions(mesh, reg, Some(reg_lo))?;
            degenerate = true;
        }
        if vert_eq(mesh.org_pos(e_lo), ev) {
            mesh.splice(e_bottom_left, mesh.oprev(e_lo))?;
            e_bottom_left = self.finish_left_regions(mesh, reg_lo, None)?;
            degenerate = true;
        }
        if degenerate {
            let e_first = mesh.onext(e_bottom_left);
            return self.add_right_edges(mesh, reg_up, e_first, e_top_left, Some(e_top_left), true);
        }

        // connect to the nearer right endpoint
        let target = if vert_leq(mesh.org_pos(e_lo), mesh.org_pos(e_up)) {
            mesh.oprev(e_lo)
        } else {
            e_up
        };
        let from = mesh.lprev(e_bottom_left);
        let e_new = mesh.connect(from, target)?;
        self.counters.diagonals += 1;

        // no cleanup yet: e_new must be marked before it can be removed
        let e_next = mesh.onext(e_new);
        self.add_right_edges(mesh, reg_up, e_new, e_next, Some(e_next), false)?;
        let reg = mesh.edges[sym(e_new) as usize].active_region;
        if reg == INVALID {
            return Err(TessError::Topology("temporary edge was not added to the sweep"));
        }
        self.regions[reg].fix_upper_edge = true;
        self.walk_dirty_regions(mesh, reg_up)
    }

    /// The event lies on `reg_up`'s upper edge.
    fn connect_left_degenerate(&mut self, mesh: &mut Mesh, reg_up: RegionIdx, v: VertIdx) -> Result<()> {
        let e = self.e_up(reg_up);
        let v_edge = mesh.verts[v as usize].an_edge;
        let pos = mesh.pos(v);

        if vert_eq(mesh.org_pos(e), pos) {
            // unprocessed vertex at the same spot: merge and wait for it
            mesh.splice(e, v_edge)?;
            self.counters.coincident_vertices += 1;
            return Ok(());
        }

        if !vert_eq(mesh.dst_pos(e), pos) {
            // the edge passes through the event: split it there
            mesh.split_edge(sym(e))?;
            if self.is_fix(reg_up) {
                // drop the unused part of the temporary edge
                mesh.delete_edge(mesh.onext(e))?;
                self.regions[reg_up].fix_upper_edge = false;
            }
            mesh.splice(v_edge, e)?;
            return self.sweep_event(mesh, v);
        }

        // The event sits on an already processed vertex: add the extra
        // right-going edges there.
        let reg_up = self.top_right_region(mesh, reg_up)?;
        let reg = self.below(reg_up)?;
        let mut e_top_right = sym(self.e_up(reg));
        let e_last = mesh.onext(e_top_right);
        let mut e_top_left = Some(e_last);
        if self.is_fix(reg) {
            // its only right-going edge was temporary
            self.delete_region(mesh, reg);
            mesh.delete_edge(e_top_right)?;
            e_top_right = mesh.oprev(e_last);
        }
        mesh.splice(v_edge, e_top_right)?;
        if !mesh.edge_goes_left(e_last) {
            e_top_left = None;
        }
        let e_first = mesh.onext(e_top_right);
        self.add_right_edges(mesh, reg_up, e_first, e_last, e_top_left, true)
    }

    /// The event has no processed neighbour.
    fn connect_left_vertex(&mut self, mesh: &mut Mesh, v: VertIdx) -> Result<()> {
        let v_edge = mesh.verts[v as usize].an_edge;
        let key = sym(v_edge);
        let event = self.event;
        let view: &Mesh = mesh;
        let regions = &self.regions;
        let node = self
            .dict
            .search(|k| super::edge_leq(view, event, key, regions[k].e_up));
        let reg_up = self
            .dict
            .key(node)
            .ok_or(TessError::Topology("event vertex found no enclosing region"))?;
        let reg_lo = self.below(reg_up)?;
        let e_up = self.e_up(reg_up);
        let e_lo = self.e_up(reg_lo);

        if edge_sign(mesh.dst_pos(e_up), mesh.pos(v), mesh.org_pos(e_up)) == 0.0 {
            self.classified(v, VertexKind::RegularLeft);
            return self.connect_left_degenerate(mesh, reg_up, v);
        }

        // the rightmost processed vertex of either chain
        let reg = if vert_leq(mesh.dst_pos(e_lo), mesh.dst_pos(e_up)) {
            reg_up
        } else {
            reg_lo
        };

        if self.regions[reg_up].inside || self.is_fix(reg) {
            let kind = if self.regions[reg_up].inside {
                VertexKind::Split
            } else {
                VertexKind::Start
            };
            self.classified(v, kind);
            let e_new = if reg == reg_up {
                let to = mesh.lnext(e_up);
                mesh.connect(sym(v_edge), to)?
            } else {
                let from = mesh.dnext(e_lo);
                sym(mesh.connect(from, v_edge)?)
            };
            self.counters.diagonals += 1;
            if self.is_fix(reg) {
                self.fix_upper_edge(mesh, reg, e_new)?;
            } else {
                let reg_new = self.add_region_below(mesh, reg_up, e_new);
                self.compute_winding(mesh, reg_new)?;
            }
            self.sweep_event(mesh, v)
        } else {
            // outside the fill: nothing to connect to
            self.classified(v, VertexKind::Start);
            self.add_right_edges(mesh, reg_up, v_edge, v_edge, None, true)
        }
    }
}
