// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The binder maps translated key chords to `(backend, id)` pairs using a packed trie.
//!
//! Nodes live in a flat arena and siblings form an intrusive linked list, so a fully
//! populated binder is one contiguous allocation that is walked byte by byte as input
//! arrives. The arena capacity is fixed at construction; binding fails once it is
//! exhausted, which surfaces during embedder startup rather than mid-session.

use miette::Diagnostic;
use thiserror::Error;

use super::{translate_chord, BindResolver, ChordError};
use crate::ok;

/// Arena index value that means "no such node".
pub(crate) const SENTINEL: u16 = u16::MAX;

/// Default node arena capacity. Each bound chord consumes one node per byte that is not
/// already shared with a previously bound chord.
pub const DEFAULT_BINDER_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum NodeUsage {
    #[default]
    Unused,
    Parent,
    Bound,
}

/// One slot in the packed trie arena.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Node {
    /// The byte leading into this node from its parent. Unset on the root.
    pub key: u8,
    pub usage: NodeUsage,
    /// [`NodeUsage::Parent`]: arena index of the first child.
    /// [`NodeUsage::Bound`]: the backend supplied binding id.
    pub id_or_child: u16,
    /// [`NodeUsage::Bound`]: index into the backend table.
    pub backend: u8,
    /// Arena index of the next sibling under the same parent, or [`SENTINEL`].
    pub sibling: u16,
}

/// Ways in which [`Binder::bind`] can fail. All of these surface during embedder
/// startup; a successfully initialised binder never fails at runtime.
#[derive(Debug, Error, Diagnostic, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    #[error(transparent)]
    Chord(#[from] ChordError),

    #[error("chord notation is empty")]
    EmptyChord,

    #[error("key chord is already bound")]
    AlreadyBound,

    /// The chord is a strict prefix of a chord that is already bound.
    #[error("a longer chord already extends past this one")]
    ShadowedByLongerChord,

    /// An already bound chord is a strict prefix of this one.
    #[error("chord extends through an already bound chord")]
    ExtendsThroughBoundChord,

    #[error("binder node arena is exhausted")]
    ArenaExhausted,
}

/// Packed trie mapping byte sequences to `(backend, id)` pairs. See the
/// [module docs](self).
#[derive(Debug)]
pub struct Binder {
    /// Dedicated root, kept outside the arena. Becomes [`NodeUsage::Parent`] as soon as
    /// any chord is bound.
    root: Node,
    nodes: Vec<Node>,
    capacity: usize,
}

impl Default for Binder {
    fn default() -> Self { Self::new(DEFAULT_BINDER_CAPACITY) }
}

impl Binder {
    /// Create a binder whose node arena holds at most `capacity` nodes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(SENTINEL as usize - 1);
        Self {
            root: Node::default(),
            nodes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Bind `chord` (in [`translate_chord`] notation) to `(backend, id)`.
    ///
    /// # Errors
    ///
    /// Fails if the notation is invalid, the chord is empty, the chord (or a prefix /
    /// extension relationship with an existing chord) is already claimed, or the node
    /// arena is out of space.
    pub fn bind(&mut self, chord: &str, backend: u8, id: u8) -> Result<(), BindError> {
        let translated = translate_chord(chord)?;
        if translated.is_empty() {
            return Err(BindError::EmptyChord);
        }

        // Walk / create nodes for each byte of the translated chord.
        let mut current: Option<u16> = None; // `None` is the root.
        for (index, &key) in translated.iter().enumerate() {
            let is_last = index + 1 == translated.len();
            match self.find_child(current, key) {
                Some(child) => {
                    match self.nodes[child as usize].usage {
                        NodeUsage::Bound if is_last => return Err(BindError::AlreadyBound),
                        NodeUsage::Bound => return Err(BindError::ExtendsThroughBoundChord),
                        NodeUsage::Parent if is_last => {
                            return Err(BindError::ShadowedByLongerChord)
                        }
                        // `Unused` nodes can be left over from a bind that failed
                        // partway; they are re-claimed here.
                        _ => current = Some(child),
                    }
                }
                None => current = Some(self.add_child(current, key)?),
            }
        }

        let final_index = current.expect("chord is non-empty so at least one node was walked");
        let node = &mut self.nodes[final_index as usize];
        debug_assert_eq!(node.usage, NodeUsage::Unused);
        node.usage = NodeUsage::Bound;
        node.backend = backend;
        node.id_or_child = u16::from(id);
        ok!()
    }

    /// Advance `resolver` by one input byte. Reaching a bound node resolves to its
    /// `(backend, id)`; reaching a dead end resolves to "no binding" which the driver
    /// treats as a pass-through to the default backend.
    pub fn update_resolver(&self, key: u8, resolver: &mut BindResolver) {
        if resolver.is_resolved() {
            resolver.reset();
        }

        match self.find_child(resolver.node_index(), key) {
            Some(child) => {
                let node = &self.nodes[child as usize];
                match node.usage {
                    NodeUsage::Parent => resolver.set_node_index(child),
                    NodeUsage::Bound => {
                        resolver.resolve_bound(node.backend, node.id_or_child as u8);
                    }
                    NodeUsage::Unused => resolver.resolve_unbound(),
                }
            }
            None => resolver.resolve_unbound(),
        }
    }

    /// Linear scan of the sibling chain under `parent` (`None` is the root). Siblings
    /// are prepended on insert, so lookup order is most-recently-bound first.
    fn find_child(&self, parent: Option<u16>, key: u8) -> Option<u16> {
        let parent_node = match parent {
            Some(index) => &self.nodes[index as usize],
            None => &self.root,
        };
        if parent_node.usage != NodeUsage::Parent {
            return None;
        }

        let mut current = parent_node.id_or_child;
        while current != SENTINEL {
            let node = &self.nodes[current as usize];
            if node.key == key {
                return Some(current);
            }
            current = node.sibling;
        }
        None
    }

    fn add_child(&mut self, parent: Option<u16>, key: u8) -> Result<u16, BindError> {
        let child_index = self.alloc_node().ok_or(BindError::ArenaExhausted)?;

        let parent_node = match parent {
            Some(index) => &mut self.nodes[index as usize],
            None => &mut self.root,
        };
        debug_assert_ne!(parent_node.usage, NodeUsage::Bound);

        // Prepend to the sibling chain.
        let first_sibling = match parent_node.usage {
            NodeUsage::Parent => parent_node.id_or_child,
            _ => SENTINEL,
        };
        parent_node.usage = NodeUsage::Parent;
        parent_node.id_or_child = child_index;

        self.nodes[child_index as usize] = Node {
            key,
            sibling: first_sibling,
            ..Node::default()
        };
        Ok(child_index)
    }

    fn alloc_node(&mut self) -> Option<u16> {
        if self.nodes.len() < self.capacity {
            self.nodes.push(Node::default());
            Some((self.nodes.len() - 1) as u16)
        } else {
            None
        }
    }
}

/// Narrow view of the [`Binder`] handed to a backend during initialisation. Chords
/// bound through the view are attributed to that backend.
#[derive(Debug)]
pub struct BinderView<'a> {
    binder: &'a mut Binder,
    backend: u8,
}

impl<'a> BinderView<'a> {
    pub(crate) fn new(binder: &'a mut Binder, backend: u8) -> Self {
        Self { binder, backend }
    }

    /// Bind `chord` to this backend under `id`.
    ///
    /// # Errors
    ///
    /// See [`Binder::bind`].
    pub fn bind(&mut self, chord: &str, id: u8) -> Result<(), BindError> {
        self.binder.bind(chord, self.backend, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResolvedBinding;
    use pretty_assertions::assert_eq;

    fn resolve(binder: &Binder, bytes: &[u8]) -> Option<ResolvedBinding> {
        let mut resolver = BindResolver::default();
        for &byte in bytes {
            binder.update_resolver(byte, &mut resolver);
        }
        resolver.resolution()
    }

    #[test]
    fn bound_chord_resolves_to_backend_and_id() {
        let mut binder = Binder::default();
        binder.bind("\\e[A", 3, 7).unwrap();

        assert_eq!(
            resolve(&binder, &[0x1b, b'[', b'A']),
            Some(ResolvedBinding::Bound { backend: 3, id: 7 })
        );
    }

    #[test]
    fn unknown_byte_resolves_unbound_at_any_depth() {
        let mut binder = Binder::default();
        binder.bind("\\e[A", 0, 7).unwrap();

        assert_eq!(resolve(&binder, b"z"), Some(ResolvedBinding::Unbound));
        assert_eq!(
            resolve(&binder, &[0x1b, b'Z']),
            Some(ResolvedBinding::Unbound)
        );
    }

    #[test]
    fn walking_a_prefix_leaves_the_resolver_unresolved() {
        let mut binder = Binder::default();
        binder.bind("\\e[A", 0, 7).unwrap();

        assert_eq!(resolve(&binder, &[0x1b, b'[']), None);
    }

    #[test]
    fn rebinding_fails_and_keeps_the_first_claim() {
        let mut binder = Binder::default();
        binder.bind("gg", 1, 7).unwrap();

        assert_eq!(binder.bind("gg", 2, 8), Err(BindError::AlreadyBound));
        assert_eq!(
            resolve(&binder, b"gg"),
            Some(ResolvedBinding::Bound { backend: 1, id: 7 })
        );
    }

    #[test]
    fn prefix_shadowing_is_rejected_both_ways() {
        let mut binder = Binder::default();
        binder.bind("ab", 0, 1).unwrap();
        assert_eq!(binder.bind("a", 0, 2), Err(BindError::ShadowedByLongerChord));
        assert_eq!(
            binder.bind("abc", 0, 3),
            Err(BindError::ExtendsThroughBoundChord)
        );

        let mut binder = Binder::default();
        binder.bind("a", 0, 1).unwrap();
        assert_eq!(
            binder.bind("ab", 0, 2),
            Err(BindError::ExtendsThroughBoundChord)
        );
    }

    #[test]
    fn empty_chord_is_rejected() {
        let mut binder = Binder::default();
        assert_eq!(binder.bind("", 0, 1), Err(BindError::EmptyChord));
    }

    #[test]
    fn arena_exhaustion_fails_the_bind_and_later_binds_still_work() {
        let mut binder = Binder::new(3);
        binder.bind("ab", 0, 1).unwrap();
        assert_eq!(binder.bind("cd", 0, 2), Err(BindError::ArenaExhausted));

        // The node for `c` was allocated before exhaustion; it can still be claimed by
        // a chord that fits.
        binder.bind("c", 0, 3).unwrap();
        assert_eq!(
            resolve(&binder, b"c"),
            Some(ResolvedBinding::Bound { backend: 0, id: 3 })
        );
    }

    #[test]
    fn siblings_are_looked_up_most_recently_bound_first() {
        // Re-binding is forbidden, so prepend order is only visible through traversal
        // reaching the right nodes; make sure every sibling stays reachable.
        let mut binder = Binder::default();
        for (index, chord) in ["a", "b", "c", "d"].iter().enumerate() {
            binder.bind(chord, 0, index as u8).unwrap();
        }
        for (index, chord) in [b"a", b"b", b"c", b"d"].iter().enumerate() {
            assert_eq!(
                resolve(&binder, *chord),
                Some(ResolvedBinding::Bound { backend: 0, id: index as u8 })
            );
        }
    }
}
