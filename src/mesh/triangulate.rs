// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Triangulation of monotone faces, and the greedy convex merge used when
// convex output is requested for non-convex input.

use super::{sym, FaceIdx, Mesh, E_HEAD, INVALID};
use crate::error::{Result, TessError};
use crate::geom::{edge_sign, loop_area2, orient, vert_ccw, vert_leq};

impl Mesh {
    /// Triangulates one face that is monotone in the sweep direction and
    /// oriented counter-clockwise.
    ///
    /// The face boundary is split at its last vertex in sweep order into an
    /// upper chain (walked with `up`) and a lower chain (`lo`). The part of
    /// the boundary between `lo` and `up` holds the vertices not yet cut
    /// off, which is the reflex stack of the two-chain algorithm: a diagonal
    /// is added from the newest vertex while the turn allows it, and the
    /// walk switches to the other chain when its next vertex comes first.
    /// What remains at the end is a fan around the first vertex.
    pub fn tessellate_mono_region(&mut self, face: FaceIdx) -> Result<()> {
        let n = self.count_face_verts(face);
        let mut up = self.faces[face as usize].an_edge;
        if n < 3 {
            return Err(TessError::Topology("monotone face has fewer than three edges"));
        }

        // Find the half-edge whose origin is last in sweep order.
        let mut steps = 0;
        while vert_leq(self.dst_pos(up), self.org_pos(up)) {
            up = self.lprev(up);
            steps += 1;
            if steps > n {
                return Err(TessError::Topology("monotone face has no sweep extent"));
            }
        }
        while vert_leq(self.org_pos(up), self.dst_pos(up)) {
            up = self.lnext(up);
            steps += 1;
            if steps > 2 * n {
                return Err(TessError::Topology("monotone face has no sweep extent"));
            }
        }
        let mut lo = self.lprev(up);

        while self.lnext(up) != lo {
            if vert_leq(self.dst_pos(up), self.org_pos(lo)) {
                // up.dst comes first: cut triangles off at lo.org
                while self.lnext(lo) != up {
                    let next = self.lnext(lo);
                    let reflex = !self.edge_goes_left(next)
                        && edge_sign(self.org_pos(lo), self.dst_pos(lo), self.dst_pos(next)) > 0.0;
                    if reflex {
                        break;
                    }
                    lo = sym(self.connect(next, lo)?);
                }
                lo = self.lprev(lo);
            } else {
                // lo.org comes first: cut triangles off at up.dst
                while self.lnext(lo) != up {
                    let prev = self.lprev(up);
                    let reflex = !self.edge_goes_right(prev)
                        && edge_sign(self.dst_pos(up), self.org_pos(up), self.org_pos(prev)) < 0.0;
                    if reflex {
                        break;
                    }
                    up = sym(self.connect(up, prev)?);
                }
                up = self.lnext(up);
            }
        }

        if self.lnext(lo) == up {
            return Err(TessError::Topology("monotone face collapsed during triangulation"));
        }
        while self.lnext(self.lnext(lo)) != up {
            lo = sym(self.connect(self.lnext(lo), lo)?);
        }
        Ok(())
    }

    /// Triangulates every inside face. Faces created by the triangulation
    /// are appended to the face list and inherit `inside`, so they are
    /// skipped by collecting the original faces first.
    pub fn tessellate_interior(&mut self) -> Result<usize> {
        let faces: Vec<FaceIdx> = self
            .face_ids()
            .filter(|&f| self.faces[f as usize].inside)
            .collect();
        for &f in &faces {
            self.tessellate_mono_region(f)?;
        }
        Ok(faces.len())
    }

    /// True when `f` encloses area and has no clockwise corner.
    fn is_convex_face(&self, f: FaceIdx) -> bool {
        let pts: Vec<_> = self.face_loop(f).map(|e| self.point(self.org(e))).collect();
        let n = pts.len();
        n >= 3
            && loop_area2(&pts) > 0.0
            && (0..n).all(|i| orient(pts[i], pts[(i + 1) % n], pts[(i + 2) % n]) >= 0.0)
    }

    /// Deletes interior edges between two convex inside faces whenever the
    /// merged face stays convex at both endpoints of the edge and has at most
    /// `max_verts` vertices. Faces that are not convex to begin with (slivers
    /// turned over by rounded intersections) are never merged. Edges are
    /// visited in mesh order, so the result is deterministic. Returns the
    /// number of merges.
    pub fn merge_convex_faces(&mut self, max_verts: usize) -> Result<usize> {
        let mut convex = vec![false; self.faces.len()];
        for f in self.face_ids() {
            convex[f as usize] = self.faces[f as usize].inside && self.is_convex_face(f);
        }
        let is_convex = |f: FaceIdx| convex.get(f as usize).copied().unwrap_or(false);

        let mut merged = 0;
        let mut e = self.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            let mut e_next = self.edges[e as usize].next;
            let e_sym = sym(e);
            let (lf, rf) = (self.lface(e), self.rface(e));
            if lf == INVALID || rf == INVALID || lf == rf || !is_convex(lf) || !is_convex(rf) {
                e = e_next;
                continue;
            }
            let left_nv = self.count_face_verts(lf);
            let right_nv = self.count_face_verts(rf);
            if left_nv + right_nv - 2 > max_verts {
                e = e_next;
                continue;
            }

            //      vf--ve--vd
            //          ^|
            // left   e ||   right
            //          |v
            //      va--vb--vc
            let va = self.org_pos(self.lprev(e));
            let vb = self.org_pos(e);
            let vc = self.dst_pos(self.lnext(e_sym));
            let vd = self.org_pos(self.lprev(e_sym));
            let ve = self.org_pos(e_sym);
            let vf = self.dst_pos(self.lnext(e));

            if vert_ccw(va, vb, vc) && vert_ccw(vd, ve, vf) {
                if e == e_next || e == sym(e_next) {
                    e_next = self.edges[e_next as usize].next;
                }
                self.delete_edge(e)?;
                merged += 1;
            }
            e = e_next;
        }
        Ok(merged)
    }
}
