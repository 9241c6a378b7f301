// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Structural validation of the mesh. A failed check means an algorithm bug
// upstream, so every failure is reported as `TessError::Topology`.

use super::{sym, EdgeIdx, Mesh, VertIdx, E_HEAD, F_HEAD, INVALID, V_HEAD};
use crate::error::{Result, TessError};

/// Sizes of the live mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshCounts {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    /// Connected fragments.
    pub components: usize,
}

impl MeshCounts {
    /// `V - E + F`. Every fragment of a valid planar mesh contributes 2.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }
}

fn broken(what: &'static str) -> TessError {
    TessError::Topology(what)
}

impl Mesh {
    pub fn counts(&self) -> MeshCounts {
        let mut parent: Vec<VertIdx> = (0..self.verts.len() as VertIdx).collect();
        fn root(parent: &mut [VertIdx], mut v: VertIdx) -> VertIdx {
            while parent[v as usize] != v {
                let up = parent[parent[v as usize] as usize];
                parent[v as usize] = up;
                v = up;
            }
            v
        }

        let mut edges = 0;
        for e in self.edge_pairs() {
            edges += 1;
            let (a, b) = (self.org(e), self.dst(e));
            if a == INVALID || b == INVALID {
                continue;
            }
            let (ra, rb) = (root(&mut parent, a), root(&mut parent, b));
            if ra != rb {
                parent[ra as usize] = rb;
            }
        }

        let mut vertices = 0;
        let mut components = 0;
        for v in self.vertices() {
            vertices += 1;
            if root(&mut parent, v) == v {
                components += 1;
            }
        }

        MeshCounts {
            vertices,
            edges,
            faces: self.face_ids().count(),
            components,
        }
    }

    /// Checks every link invariant and Euler's formula per fragment.
    pub fn check(&self) -> Result<()> {
        let limit = self.edges.len();

        // local rotation/face consistency of one half-edge
        let linked = |e: EdgeIdx| -> Result<()> {
            if !self.is_live_edge(e) {
                return Err(broken("loop reaches a dead edge"));
            }
            if sym(self.onext(self.lnext(e))) != e || self.lnext(sym(self.onext(e))) != e {
                return Err(broken("onext and lnext disagree"));
            }
            Ok(())
        };

        let mut face_halves = 0;
        let mut prev = F_HEAD;
        let mut f = self.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            if !self.is_live_face(f) || self.faces[f as usize].prev != prev {
                return Err(broken("face list is not doubly linked"));
            }
            let start = self.faces[f as usize].an_edge;
            let mut e = start;
            loop {
                linked(e)?;
                if self.lface(e) != f {
                    return Err(broken("edge in face loop names another face"));
                }
                face_halves += 1;
                if face_halves > limit {
                    return Err(broken("face loop does not close"));
                }
                e = self.lnext(e);
                if e == start {
                    break;
                }
            }
            prev = f;
            f = self.faces[f as usize].next;
        }
        if self.faces[F_HEAD as usize].prev != prev {
            return Err(broken("face list is not doubly linked"));
        }

        let mut ring_halves = 0;
        let mut prev = V_HEAD;
        let mut v = self.verts[V_HEAD as usize].next;
        while v != V_HEAD {
            if !self.is_live_vertex(v) || self.verts[v as usize].prev != prev {
                return Err(broken("vertex list is not doubly linked"));
            }
            let start = self.verts[v as usize].an_edge;
            let mut e = start;
            loop {
                linked(e)?;
                if self.org(e) != v {
                    return Err(broken("edge in origin ring names another vertex"));
                }
                ring_halves += 1;
                if ring_halves > limit {
                    return Err(broken("origin ring does not close"));
                }
                e = self.onext(e);
                if e == start {
                    break;
                }
            }
            prev = v;
            v = self.verts[v as usize].next;
        }
        if self.verts[V_HEAD as usize].prev != prev {
            return Err(broken("vertex list is not doubly linked"));
        }

        let mut pairs = 0;
        let mut prev = E_HEAD;
        let mut e = self.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            linked(e)?;
            if self.edges[sym(e) as usize].next != sym(prev) {
                return Err(broken("edge list is not doubly linked"));
            }
            if self.org(e) == INVALID || self.dst(e) == INVALID {
                return Err(broken("edge without endpoints"));
            }
            pairs += 1;
            if pairs > limit {
                return Err(broken("edge list does not close"));
            }
            prev = e;
            e = self.edges[e as usize].next;
        }
        if self.edges[sym(E_HEAD) as usize].next != sym(prev) {
            return Err(broken("edge list is not doubly linked"));
        }

        if face_halves != 2 * pairs || ring_halves != 2 * pairs {
            return Err(broken("a half-edge is outside every face loop or origin ring"));
        }

        let counts = self.counts();
        if counts.euler_characteristic() != 2 * counts.components as i64 {
            return Err(broken("Euler characteristic is not 2 per fragment"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Mesh;
    use super::*;

    #[test]
    fn empty_mesh_is_valid() {
        let mesh = Mesh::new();
        mesh.check().unwrap();
        assert_eq!(mesh.counts(), MeshCounts::default());
    }

    #[test]
    fn separate_edges_are_separate_components() {
        let mut mesh = Mesh::new();
        mesh.make_edge();
        mesh.make_edge();
        let counts = mesh.counts();
        assert_eq!(counts.components, 2);
        assert_eq!(counts.euler_characteristic(), 4);
        mesh.check().unwrap();
    }

    #[test]
    fn corrupted_ring_is_detected() {
        let mut mesh = Mesh::new();
        let e = mesh.make_edge();
        mesh.splice(e, sym(e)).unwrap();
        // break the rotation ring by hand
        mesh.edges[e as usize].onext = e;
        assert!(matches!(mesh.check(), Err(TessError::Topology(_))));
    }

    #[test]
    fn wrong_face_label_is_detected() {
        let mut mesh = Mesh::new();
        let e = mesh.make_edge();
        mesh.splice(e, sym(e)).unwrap();
        let other = mesh.rface(e);
        mesh.edges[e as usize].lface = other;
        assert!(mesh.check().is_err());
    }
}
