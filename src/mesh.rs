// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Planar subdivision stored as a half-edge (quad-edge style) mesh.
//
// Every record lives in a Vec arena and is addressed by a u32 index:
//   - half-edges come in pairs, edges[e] and edges[e ^ 1], so sym(e) = e ^ 1
//   - index 0 of each arena is a list head (vHead, fHead) and edges 0/1 are
//     the head pair of the global edge list
//   - a killed record keeps its slot with `next == INVALID`; slots are only
//     reclaimed by `clear`
//
// `splice` is the only primitive that rewires rotation rings; `connect`,
// `delete_edge`, `add_edge_vertex` and `split_edge` are built on it.

mod check;
mod triangulate;

use crate::error::{Result, TessError};
use crate::geom::{vert_leq, Point, SweepPos};

pub use check::MeshCounts;

pub const INVALID: u32 = u32::MAX;

pub type VertIdx = u32;
pub type FaceIdx = u32;
pub type EdgeIdx = u32;

pub const V_HEAD: VertIdx = 0;
pub const F_HEAD: FaceIdx = 0;
pub const E_HEAD: EdgeIdx = 0;
pub const E_HEAD_SYM: EdgeIdx = 1;

/// The twin of `e`.
#[inline(always)]
pub fn sym(e: EdgeIdx) -> EdgeIdx {
    e ^ 1
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub next: VertIdx,
    pub prev: VertIdx,
    /// Some half-edge whose origin is this vertex.
    pub an_edge: EdgeIdx,
    /// Position in sweep space.
    pub pos: SweepPos,
    /// Still waiting in the event queue.
    pub queued: bool,
}

impl Default for Vertex {
    fn default() -> Self {
        Vertex {
            next: INVALID,
            prev: INVALID,
            an_edge: INVALID,
            pos: SweepPos::default(),
            queued: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Face {
    pub next: FaceIdx,
    pub prev: FaceIdx,
    /// Some half-edge whose left face is this face.
    pub an_edge: EdgeIdx,
    pub inside: bool,
    /// Winding number of the sweep region that closed this face.
    pub winding: i32,
}

impl Default for Face {
    fn default() -> Self {
        Face {
            next: INVALID,
            prev: INVALID,
            an_edge: INVALID,
            inside: false,
            winding: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Global edge list. For the even half this is the next pair; for the odd
    /// half it is the previous pair.
    pub next: EdgeIdx,
    /// Next edge counter-clockwise around the origin.
    pub onext: EdgeIdx,
    /// Next edge counter-clockwise around the left face.
    pub lnext: EdgeIdx,
    pub org: VertIdx,
    pub lface: FaceIdx,
    /// Sweep region whose upper edge this is, or `INVALID`.
    pub active_region: u32,
    /// Change in winding number when crossing from the right face to the left.
    pub winding: i32,
}

impl Default for HalfEdge {
    fn default() -> Self {
        HalfEdge {
            next: INVALID,
            onext: INVALID,
            lnext: INVALID,
            org: INVALID,
            lface: INVALID,
            active_region: INVALID,
            winding: 0,
        }
    }
}

#[derive(Debug)]
pub struct Mesh {
    pub verts: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub edges: Vec<HalfEdge>,
}

impl Mesh {
    pub fn new() -> Self {
        let mut mesh = Mesh {
            verts: Vec::new(),
            faces: Vec::new(),
            edges: Vec::new(),
        };
        mesh.push_heads();
        mesh
    }

    /// Removes every vertex, edge and face. Arena capacity is kept so the
    /// next polygon of similar size does not allocate.
    pub fn clear(&mut self) {
        self.verts.clear();
        self.faces.clear();
        self.edges.clear();
        self.push_heads();
    }

    fn push_heads(&mut self) {
        self.verts.push(Vertex {
            next: V_HEAD,
            prev: V_HEAD,
            ..Vertex::default()
        });
        self.faces.push(Face {
            next: F_HEAD,
            prev: F_HEAD,
            ..Face::default()
        });
        self.edges.push(HalfEdge {
            next: E_HEAD,
            ..HalfEdge::default()
        });
        self.edges.push(HalfEdge {
            next: E_HEAD_SYM,
            ..HalfEdge::default()
        });
    }

    // Navigation

    #[inline]
    pub fn org(&self, e: EdgeIdx) -> VertIdx {
        self.edges[e as usize].org
    }

    #[inline]
    pub fn dst(&self, e: EdgeIdx) -> VertIdx {
        self.edges[sym(e) as usize].org
    }

    #[inline]
    pub fn onext(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].onext
    }

    #[inline]
    pub fn lnext(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[e as usize].lnext
    }

    #[inline]
    pub fn lface(&self, e: EdgeIdx) -> FaceIdx {
        self.edges[e as usize].lface
    }

    #[inline]
    pub fn rface(&self, e: EdgeIdx) -> FaceIdx {
        self.edges[sym(e) as usize].lface
    }

    /// Previous edge around the origin.
    #[inline]
    pub fn oprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[sym(e) as usize].lnext
    }

    /// Previous edge around the left face.
    #[inline]
    pub fn lprev(&self, e: EdgeIdx) -> EdgeIdx {
        sym(self.edges[e as usize].onext)
    }

    #[inline]
    pub fn rprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[sym(e) as usize].onext
    }

    /// Next edge around the destination.
    #[inline]
    pub fn dnext(&self, e: EdgeIdx) -> EdgeIdx {
        sym(self.rprev(e))
    }

    #[inline]
    pub fn pos(&self, v: VertIdx) -> SweepPos {
        self.verts[v as usize].pos
    }

    /// Position of `v` in caller coordinates.
    #[inline]
    pub fn point(&self, v: VertIdx) -> Point {
        self.verts[v as usize].pos.to_point()
    }

    #[inline]
    pub fn org_pos(&self, e: EdgeIdx) -> SweepPos {
        self.pos(self.org(e))
    }

    #[inline]
    pub fn dst_pos(&self, e: EdgeIdx) -> SweepPos {
        self.pos(self.dst(e))
    }

    #[inline]
    pub fn edge_goes_left(&self, e: EdgeIdx) -> bool {
        vert_leq(self.dst_pos(e), self.org_pos(e))
    }

    #[inline]
    pub fn edge_goes_right(&self, e: EdgeIdx) -> bool {
        vert_leq(self.org_pos(e), self.dst_pos(e))
    }

    // Liveness

    pub fn is_live_edge(&self, e: EdgeIdx) -> bool {
        e > E_HEAD_SYM && (e as usize) < self.edges.len() && self.edges[e as usize].next != INVALID
    }

    pub fn is_live_vertex(&self, v: VertIdx) -> bool {
        v != V_HEAD && (v as usize) < self.verts.len() && self.verts[v as usize].next != INVALID
    }

    pub fn is_live_face(&self, f: FaceIdx) -> bool {
        f != F_HEAD && (f as usize) < self.faces.len() && self.faces[f as usize].next != INVALID
    }

    fn live(&self, e: EdgeIdx) -> Result<EdgeIdx> {
        if self.is_live_edge(e) {
            Ok(e)
        } else {
            Err(TessError::Topology("edge handle is not a live edge of this mesh"))
        }
    }

    // Iteration

    /// Live vertices in list order.
    pub fn vertices(&self) -> impl Iterator<Item = VertIdx> + '_ {
        let mut v = self.verts[V_HEAD as usize].next;
        std::iter::from_fn(move || {
            if v == V_HEAD {
                return None;
            }
            let cur = v;
            v = self.verts[v as usize].next;
            Some(cur)
        })
    }

    /// Live faces in list order.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceIdx> + '_ {
        let mut f = self.faces[F_HEAD as usize].next;
        std::iter::from_fn(move || {
            if f == F_HEAD {
                return None;
            }
            let cur = f;
            f = self.faces[f as usize].next;
            Some(cur)
        })
    }

    /// The even half of every live edge pair, in list order.
    pub fn edge_pairs(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        let mut e = self.edges[E_HEAD as usize].next;
        std::iter::from_fn(move || {
            if e == E_HEAD {
                return None;
            }
            let cur = e;
            e = self.edges[e as usize].next;
            Some(cur)
        })
    }

    /// Edges around `f`, starting at its `an_edge`.
    pub fn face_loop(&self, f: FaceIdx) -> impl Iterator<Item = EdgeIdx> + '_ {
        let start = self.faces[f as usize].an_edge;
        let mut e = start;
        let mut done = start == INVALID;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            let cur = e;
            e = self.lnext(e);
            done = e == start;
            Some(cur)
        })
    }

    pub fn count_face_verts(&self, f: FaceIdx) -> usize {
        self.face_loop(f).count()
    }

    // Allocation

    /// New edge pair linked into the global list before `e_next`.
    fn make_edge_pair(&mut self, e_next: EdgeIdx) -> EdgeIdx {
        let e_next = e_next & !1;
        let e = self.edges.len() as EdgeIdx;
        let e_sym = e + 1;
        // the previous pair is stored in the odd half's `next`
        let e_prev = self.edges[sym(e_next) as usize].next;

        self.edges.push(HalfEdge {
            next: e_next,
            onext: e,
            lnext: e_sym,
            ..HalfEdge::default()
        });
        self.edges.push(HalfEdge {
            next: e_prev,
            onext: e_sym,
            lnext: e,
            ..HalfEdge::default()
        });
        self.edges[sym(e_prev) as usize].next = e;
        self.edges[sym(e_next) as usize].next = e_sym;
        e
    }

    /// New vertex before `v_next` in the vertex list; every edge in the
    /// origin ring of `e_orig` is pointed at it.
    fn make_vertex(&mut self, e_orig: EdgeIdx, v_next: VertIdx, pos: SweepPos) -> VertIdx {
        let v = self.verts.len() as VertIdx;
        let v_prev = self.verts[v_next as usize].prev;
        self.verts.push(Vertex {
            next: v_next,
            prev: v_prev,
            an_edge: e_orig,
            pos,
            queued: false,
        });
        self.verts[v_prev as usize].next = v;
        self.verts[v_next as usize].prev = v;

        let mut e = e_orig;
        loop {
            self.edges[e as usize].org = v;
            e = self.onext(e);
            if e == e_orig {
                break;
            }
        }
        v
    }

    /// New face before `f_next` in the face list, inheriting its classification.
    fn make_face(&mut self, e_orig: EdgeIdx, f_next: FaceIdx) -> FaceIdx {
        let f = self.faces.len() as FaceIdx;
        let Face {
            prev: f_prev,
            inside,
            winding,
            ..
        } = self.faces[f_next as usize];
        self.faces.push(Face {
            next: f_next,
            prev: f_prev,
            an_edge: e_orig,
            inside,
            winding,
        });
        self.faces[f_prev as usize].next = f;
        self.faces[f_next as usize].prev = f;

        let mut e = e_orig;
        loop {
            self.edges[e as usize].lface = f;
            e = self.lnext(e);
            if e == e_orig {
                break;
            }
        }
        f
    }

    fn kill_vertex(&mut self, v_del: VertIdx, new_org: VertIdx) {
        let start = self.verts[v_del as usize].an_edge;
        let mut e = start;
        loop {
            self.edges[e as usize].org = new_org;
            e = self.onext(e);
            if e == start {
                break;
            }
        }
        let Vertex { next, prev, .. } = self.verts[v_del as usize];
        self.verts[prev as usize].next = next;
        self.verts[next as usize].prev = prev;
        self.verts[v_del as usize] = Vertex::default();
    }

    fn kill_face(&mut self, f_del: FaceIdx, new_lface: FaceIdx) {
        let start = self.faces[f_del as usize].an_edge;
        let mut e = start;
        loop {
            self.edges[e as usize].lface = new_lface;
            e = self.lnext(e);
            if e == start {
                break;
            }
        }
        let Face { next, prev, .. } = self.faces[f_del as usize];
        self.faces[prev as usize].next = next;
        self.faces[next as usize].prev = prev;
        self.faces[f_del as usize] = Face::default();
    }

    fn kill_edge(&mut self, e_del: EdgeIdx) {
        let e_del = e_del & !1;
        let e_next = self.edges[e_del as usize].next;
        let e_prev = self.edges[sym(e_del) as usize].next;
        self.edges[sym(e_next) as usize].next = e_prev;
        self.edges[sym(e_prev) as usize].next = e_next;
        self.edges[e_del as usize].next = INVALID;
        self.edges[sym(e_del) as usize].next = INVALID;
    }

    /// Exchanges `a.onext` and `b.onext`, fixing up the `lnext` links.
    fn swap_rings(&mut self, a: EdgeIdx, b: EdgeIdx) {
        let a_onext = self.onext(a);
        let b_onext = self.onext(b);
        self.edges[sym(a_onext) as usize].lnext = b;
        self.edges[sym(b_onext) as usize].lnext = a;
        self.edges[a as usize].onext = b_onext;
        self.edges[b as usize].onext = a_onext;
    }

    // Topological operations

    /// Creates an isolated edge with two new vertices and one face on both
    /// sides.
    pub fn make_edge(&mut self) -> EdgeIdx {
        let e = self.make_edge_pair(E_HEAD);
        self.make_vertex(e, V_HEAD, SweepPos::default());
        self.make_vertex(sym(e), V_HEAD, SweepPos::default());
        self.make_face(e, F_HEAD);
        e
    }

    /// Exchanges the origin rings of `e_org` and `e_dst`.
    ///
    /// If the origins differ they are merged into `e_org`'s origin, otherwise
    /// the ring is split and `e_dst` gets a new origin. Likewise the left
    /// faces are merged when distinct and split when shared.
    pub fn splice(&mut self, e_org: EdgeIdx, e_dst: EdgeIdx) -> Result<()> {
        self.live(e_org)?;
        self.live(e_dst)?;
        if e_org == e_dst {
            return Ok(());
        }

        let org = self.org(e_org);
        let lface = self.lface(e_org);
        let dst_org = self.org(e_dst);
        let dst_lface = self.lface(e_dst);

        let joining_vertices = dst_org != org;
        let joining_loops = dst_lface != lface;
        if joining_vertices {
            self.kill_vertex(dst_org, org);
        }
        if joining_loops {
            self.kill_face(dst_lface, lface);
        }

        self.swap_rings(e_dst, e_org);

        if !joining_vertices {
            let pos = self.pos(org);
            self.make_vertex(e_dst, org, pos);
            self.verts[org as usize].an_edge = e_org;
        }
        if !joining_loops {
            self.make_face(e_dst, lface);
            self.faces[lface as usize].an_edge = e_org;
        }
        Ok(())
    }

    /// Removes the edge pair of `e_del`. Faces on both sides are merged, or,
    /// if they were the same face, the loop is split in two. Vertices left
    /// without edges are removed.
    pub fn delete_edge(&mut self, e_del: EdgeIdx) -> Result<()> {
        self.live(e_del)?;
        let e_del_sym = sym(e_del);

        let lface = self.lface(e_del);
        let rface = self.rface(e_del);
        let joining_loops = lface != rface;
        if joining_loops {
            self.kill_face(lface, rface);
        }

        if self.onext(e_del) == e_del {
            self.kill_vertex(self.org(e_del), INVALID);
        } else {
            let rf = self.rface(e_del);
            self.faces[rf as usize].an_edge = self.oprev(e_del);
            let org = self.org(e_del);
            self.verts[org as usize].an_edge = self.onext(e_del);

            self.swap_rings(e_del, self.oprev(e_del));
            if !joining_loops {
                self.make_face(e_del, self.lface(e_del));
            }
        }

        if self.onext(e_del_sym) == e_del_sym {
            self.kill_vertex(self.org(e_del_sym), INVALID);
            self.kill_face(self.lface(e_del_sym), INVALID);
        } else {
            let lf = self.lface(e_del);
            self.faces[lf as usize].an_edge = self.oprev(e_del_sym);
            let org = self.org(e_del_sym);
            self.verts[org as usize].an_edge = self.onext(e_del_sym);
            self.swap_rings(e_del_sym, self.oprev(e_del_sym));
        }

        self.kill_edge(e_del);
        Ok(())
    }

    /// Adds `e_new` such that `e_new == e_org.lnext` and its destination is a
    /// new vertex. Both halves lie in `e_org`'s left face.
    pub fn add_edge_vertex(&mut self, e_org: EdgeIdx) -> Result<EdgeIdx> {
        self.live(e_org)?;
        let e_new = self.make_edge_pair(e_org);
        let e_new_sym = sym(e_new);

        self.swap_rings(e_new, self.lnext(e_org));

        let org = self.dst(e_org);
        self.edges[e_new as usize].org = org;
        let pos = self.pos(org);
        self.make_vertex(e_new_sym, org, pos);

        let lface = self.lface(e_org);
        self.edges[e_new as usize].lface = lface;
        self.edges[e_new_sym as usize].lface = lface;
        Ok(e_new)
    }

    /// Splits `e_org` in two at a new vertex. Returns the second half, which
    /// starts at the new vertex and inherits `e_org`'s winding. The caller
    /// positions the new vertex.
    pub fn split_edge(&mut self, e_org: EdgeIdx) -> Result<EdgeIdx> {
        let e_new = sym(self.add_edge_vertex(e_org)?);
        let e_org_sym = sym(e_org);

        // move e_org's destination to e_new's origin
        self.swap_rings(e_org_sym, self.oprev(e_org_sym));
        self.swap_rings(e_org_sym, e_new);

        self.edges[e_org_sym as usize].org = self.org(e_new);
        let dst = self.dst(e_new);
        self.verts[dst as usize].an_edge = sym(e_new);
        self.edges[sym(e_new) as usize].lface = self.rface(e_org);
        self.edges[e_new as usize].winding = self.edges[e_org as usize].winding;
        self.edges[sym(e_new) as usize].winding = self.edges[e_org_sym as usize].winding;
        Ok(e_new)
    }

    /// Adds an edge from `e_org.dst` to `e_dst.org`. If the two edges share a
    /// left face it is split and the new face lies left of the returned edge;
    /// otherwise the two loops are joined into one face.
    pub fn connect(&mut self, e_org: EdgeIdx, e_dst: EdgeIdx) -> Result<EdgeIdx> {
        self.live(e_org)?;
        self.live(e_dst)?;
        if self.dst(e_org) == self.org(e_dst) {
            return Err(TessError::Topology("connect would join a vertex to itself"));
        }

        let e_new = self.make_edge_pair(e_org);
        let e_new_sym = sym(e_new);

        let org_lface = self.lface(e_org);
        let dst_lface = self.lface(e_dst);
        let joining_loops = dst_lface != org_lface;
        if joining_loops {
            self.kill_face(dst_lface, org_lface);
        }

        self.swap_rings(e_new, self.lnext(e_org));
        self.swap_rings(e_new_sym, e_dst);

        self.edges[e_new as usize].org = self.dst(e_org);
        self.edges[e_new_sym as usize].org = self.org(e_dst);
        self.edges[e_new as usize].lface = org_lface;
        self.edges[e_new_sym as usize].lface = org_lface;

        self.faces[org_lface as usize].an_edge = e_new_sym;
        if !joining_loops {
            self.make_face(e_new, org_lface);
        }
        Ok(e_new)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Closed contour built the same way the tessellator builds one.
    fn contour(mesh: &mut Mesh, pts: &[(f32, f32)]) -> EdgeIdx {
        let mut e = INVALID;
        for &(x, y) in pts {
            if e == INVALID {
                e = mesh.make_edge();
                mesh.splice(e, sym(e)).unwrap();
            } else {
                mesh.split_edge(e).unwrap();
                e = mesh.lnext(e);
            }
            let v = mesh.org(e);
            mesh.verts[v as usize].pos = Point::new(x, y).to_sweep();
        }
        e
    }

    #[test]
    fn make_edge_creates_single_edge() {
        let mut mesh = Mesh::new();
        let e = mesh.make_edge();
        let counts = mesh.counts();
        assert_eq!((counts.vertices, counts.edges, counts.faces), (2, 1, 1));
        assert_ne!(mesh.org(e), mesh.dst(e));
        assert_eq!(mesh.lface(e), mesh.rface(e));
        mesh.check().unwrap();
    }

    #[test]
    fn sym_involution() {
        for e in 0u32..16 {
            assert_eq!(sym(sym(e)), e);
            assert_ne!(sym(e), e);
        }
    }

    #[test]
    fn splice_with_twin_makes_a_loop() {
        let mut mesh = Mesh::new();
        let e = mesh.make_edge();
        mesh.splice(e, sym(e)).unwrap();
        let counts = mesh.counts();
        assert_eq!((counts.vertices, counts.edges, counts.faces), (1, 1, 2));
        assert_eq!(mesh.org(e), mesh.dst(e));
        mesh.check().unwrap();
    }

    #[test]
    fn contour_has_two_faces() {
        let mut mesh = Mesh::new();
        let e = contour(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let counts = mesh.counts();
        assert_eq!((counts.vertices, counts.edges, counts.faces), (4, 4, 2));
        assert_eq!(mesh.count_face_verts(mesh.lface(e)), 4);
        assert_eq!(mesh.count_face_verts(mesh.rface(e)), 4);
        mesh.check().unwrap();
    }

    #[test]
    fn connect_splits_and_delete_merges() {
        let mut mesh = Mesh::new();
        let e = contour(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let diag = mesh.connect(mesh.lnext(e), e).unwrap();
        assert_eq!(mesh.counts().faces, 3);
        assert_ne!(mesh.lface(diag), mesh.rface(diag));
        assert_eq!(mesh.count_face_verts(mesh.lface(diag)), 3);
        assert_eq!(mesh.count_face_verts(mesh.rface(diag)), 3);
        mesh.check().unwrap();

        mesh.delete_edge(diag).unwrap();
        assert_eq!(mesh.counts().faces, 2);
        assert!(!mesh.is_live_edge(diag));
        mesh.check().unwrap();
    }

    #[test]
    fn split_edge_copies_winding() {
        let mut mesh = Mesh::new();
        let e = mesh.make_edge();
        mesh.edges[e as usize].winding = 1;
        mesh.edges[sym(e) as usize].winding = -1;
        let e2 = mesh.split_edge(e).unwrap();
        assert_eq!(mesh.lnext(e), e2);
        assert_eq!(mesh.dst(e), mesh.org(e2));
        assert_eq!(mesh.edges[e2 as usize].winding, 1);
        assert_eq!(mesh.edges[sym(e2) as usize].winding, -1);
        assert_eq!(mesh.counts().vertices, 3);
        mesh.check().unwrap();
    }

    #[test]
    fn deleting_isolated_edge_empties_mesh() {
        let mut mesh = Mesh::new();
        let e = mesh.make_edge();
        mesh.delete_edge(e).unwrap();
        let counts = mesh.counts();
        assert_eq!((counts.vertices, counts.edges, counts.faces), (0, 0, 0));
        assert!(!mesh.is_live_edge(e));
    }

    #[test]
    fn dead_handles_are_contract_violations() {
        let mut mesh = Mesh::new();
        let e = mesh.make_edge();
        let other = mesh.make_edge();
        mesh.delete_edge(other).unwrap();
        assert!(matches!(mesh.splice(e, other), Err(TessError::Topology(_))));
        assert!(matches!(mesh.connect(e, 9999), Err(TessError::Topology(_))));
        assert!(matches!(mesh.delete_edge(E_HEAD), Err(TessError::Topology(_))));
    }

    #[test]
    fn connect_to_same_vertex_is_rejected() {
        let mut mesh = Mesh::new();
        let e = contour(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        // e.dst == e.lnext.org
        let err = mesh.connect(e, mesh.lnext(e)).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut mesh = Mesh::new();
        contour(&mut mesh, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let cap = mesh.edges.capacity();
        mesh.clear();
        assert_eq!(mesh.edges.capacity(), cap);
        assert_eq!(mesh.edges.len(), 2);
        assert_eq!(mesh.vertices().count(), 0);
        assert_eq!(mesh.face_ids().count(), 0);
    }
}
