// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Sweep event queue.
//
// Input vertices are known up front and sorted once. Vertices created during
// the sweep (segment intersections) go into a binary heap. Removal is lazy: a
// vertex leaves the queue by clearing its `queued` flag, and stale entries are
// skipped when they reach the front.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::geom::SweepPos;
use crate::mesh::{Mesh, VertIdx};

#[derive(Clone, Copy, Debug)]
struct Event {
    pos: SweepPos,
    vert: VertIdx,
}

impl Ord for Event {
    /// Sweep order; ties between equal positions go to the older vertex.
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos
            .s
            .total_cmp(&other.pos.s)
            .then(self.pos.t.total_cmp(&other.pos.t))
            .then(self.vert.cmp(&other.vert))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

#[derive(Debug, Default)]
pub struct EventQueue {
    sorted: Vec<Event>,
    cursor: usize,
    pending: BinaryHeap<Reverse<Event>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the queue. Capacity is kept.
    pub fn clear(&mut self) {
        self.sorted.clear();
        self.cursor = 0;
        self.pending.clear();
    }

    /// Replaces the contents with every live vertex of `mesh`.
    pub fn init(&mut self, mesh: &mut Mesh) {
        self.clear();
        self.sorted.extend(mesh.vertices().map(|vert| Event {
            pos: mesh.pos(vert),
            vert,
        }));
        for ev in &self.sorted {
            mesh.verts[ev.vert as usize].queued = true;
        }
        self.sorted.sort_unstable();
    }

    pub fn insert(&mut self, mesh: &mut Mesh, vert: VertIdx) {
        mesh.verts[vert as usize].queued = true;
        self.pending.push(Reverse(Event {
            pos: mesh.pos(vert),
            vert,
        }));
    }

    /// Takes `vert` out of the queue if it is still waiting.
    pub fn remove(mesh: &mut Mesh, vert: VertIdx) {
        mesh.verts[vert as usize].queued = false;
    }

    fn is_waiting(mesh: &Mesh, ev: &Event) -> bool {
        mesh.is_live_vertex(ev.vert) && mesh.verts[ev.vert as usize].queued
    }

    /// Front of the queue, with `true` when it comes from the sorted input.
    fn front(&mut self, mesh: &Mesh) -> Option<(Event, bool)> {
        while self.cursor < self.sorted.len() && !Self::is_waiting(mesh, &self.sorted[self.cursor]) {
            self.cursor += 1;
        }
        while let Some(Reverse(ev)) = self.pending.peek() {
            if Self::is_waiting(mesh, ev) {
                break;
            }
            self.pending.pop();
        }
        let initial = self.sorted.get(self.cursor).copied();
        let created = self.pending.peek().map(|Reverse(ev)| *ev);
        match (initial, created) {
            (Some(a), Some(b)) if b < a => Some((b, false)),
            (Some(a), _) => Some((a, true)),
            (None, Some(b)) => Some((b, false)),
            (None, None) => None,
        }
    }

    /// Next vertex in sweep order, without removing it.
    pub fn peek(&mut self, mesh: &Mesh) -> Option<VertIdx> {
        self.front(mesh).map(|(ev, _)| ev.vert)
    }

    /// Removes and returns the next vertex in sweep order.
    pub fn pop(&mut self, mesh: &mut Mesh) -> Option<VertIdx> {
        let (ev, from_sorted) = self.front(mesh)?;
        if from_sorted {
            self.cursor += 1;
        } else {
            self.pending.pop();
        }
        mesh.verts[ev.vert as usize].queued = false;
        Some(ev.vert)
    }
}
