// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Ordered list of active sweep regions, bottom to top.
//
// The list is circular with a keyless head node at index 0. Ordering is not
// stored here: callers walk from a known position with their own comparison,
// which lets the comparison borrow sweep state that lives next to the list.

/// Index into the node table.
pub type NodeIdx = u32;

/// Index of the keyless head node.
pub const DICT_HEAD: NodeIdx = 0;

const NO_KEY: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct Node {
    key: u32,
    next: NodeIdx,
    prev: NodeIdx,
}

const HEAD_NODE: Node = Node {
    key: NO_KEY,
    next: DICT_HEAD,
    prev: DICT_HEAD,
};

#[derive(Debug)]
pub struct Dict {
    nodes: Vec<Node>,
    free: Vec<NodeIdx>,
}

impl Dict {
    pub fn new() -> Self {
        Dict {
            nodes: vec![HEAD_NODE],
            free: Vec::new(),
        }
    }

    /// Removes every key. Capacity is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(HEAD_NODE);
        self.free.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[DICT_HEAD as usize].next == DICT_HEAD
    }

    /// Links `key` directly after `node`.
    pub fn insert_after(&mut self, node: NodeIdx, key: u32) -> NodeIdx {
        let next = self.nodes[node as usize].next;
        let fresh = Node {
            key,
            next,
            prev: node,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx as usize] = fresh;
                idx
            }
            None => {
                self.nodes.push(fresh);
                (self.nodes.len() - 1) as NodeIdx
            }
        };
        self.nodes[node as usize].next = idx;
        self.nodes[next as usize].prev = idx;
        idx
    }

    /// Walks down from `node` to the first key for which `at_or_below` holds
    /// (or to the head) and links `key` right above it.
    pub fn insert_before<F>(&mut self, mut node: NodeIdx, key: u32, mut at_or_below: F) -> NodeIdx
    where
        F: FnMut(u32) -> bool,
    {
        loop {
            node = self.nodes[node as usize].prev;
            match self.key(node) {
                None => break,
                Some(k) if at_or_below(k) => break,
                Some(_) => {}
            }
        }
        self.insert_after(node, key)
    }

    /// Inserts `key` into the list ordered by `at_or_below`.
    pub fn insert<F>(&mut self, key: u32, at_or_below: F) -> NodeIdx
    where
        F: FnMut(u32) -> bool,
    {
        self.insert_before(DICT_HEAD, key, at_or_below)
    }

    pub fn delete(&mut self, node: NodeIdx) {
        let Node { next, prev, .. } = self.nodes[node as usize];
        self.nodes[next as usize].prev = prev;
        self.nodes[prev as usize].next = next;
        self.nodes[node as usize] = Node {
            key: NO_KEY,
            next: node,
            prev: node,
        };
        self.free.push(node);
    }

    /// First node, from the bottom, whose key satisfies `pred`; the head when
    /// none does.
    pub fn search<F>(&self, mut pred: F) -> NodeIdx
    where
        F: FnMut(u32) -> bool,
    {
        let mut node = DICT_HEAD;
        loop {
            node = self.nodes[node as usize].next;
            match self.key(node) {
                None => return node,
                Some(k) if pred(k) => return node,
                Some(_) => {}
            }
        }
    }

    /// Key stored at `node`; `None` for the head.
    #[inline]
    pub fn key(&self, node: NodeIdx) -> Option<u32> {
        match self.nodes[node as usize].key {
            NO_KEY => None,
            k => Some(k),
        }
    }

    #[inline]
    pub fn min(&self) -> NodeIdx {
        self.nodes[DICT_HEAD as usize].next
    }

    #[inline]
    pub fn succ(&self, node: NodeIdx) -> NodeIdx {
        self.nodes[node as usize].next
    }

    #[inline]
    pub fn pred(&self, node: NodeIdx) -> NodeIdx {
        self.nodes[node as usize].prev
    }

    /// Keys from bottom to top.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        let mut node = self.min();
        std::iter::from_fn(move || {
            let k = self.key(node)?;
            node = self.succ(node);
            Some(k)
        })
    }
}

impl Default for Dict {
    fn default() -> Self {
        Self::new()
    }
}
