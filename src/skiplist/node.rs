/// Index of a node slot in the arena.
pub(crate) type NodeId = usize;

/// Forward reference: the next node at one level, or the end of that level.
pub(crate) type Link = Option<NodeId>;

/// A single entry in the skip list.
///
/// A node at level `n` has `n + 1` forward links, one per level `0..=n`.
/// Level 0 contains all nodes (a sorted linked list). Higher levels skip
/// over nodes, enabling O(log n) average-case search.
///
/// ```text
/// Level 3:  HEAD ─────────────────────────────► 8 ──────────────► NIL
/// Level 2:  HEAD ─────────► 3 ────────────────► 8 ──────► 18 ───► NIL
/// Level 1:  HEAD ──► 1 ──► 3 ──► 4 ─────────► 8 ──► 9 ──► 18 ───► NIL
/// Level 0:  HEAD ──► 1 ──► 3 ──► 4 ──► 7 ──► 8 ──► 9 ──► 18 ───► NIL
/// ```
///
/// Here node 3 is at level 2 and its `forward` is `[4, 4, 8]`; node 7 is at
/// level 0 and its `forward` is `[8]`.
///
/// Links are arena indices rather than pointers. The arena owns every node,
/// so there is no shared ownership and no `unsafe`.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) forward: Vec<Link>,
}

impl<K, V> Node<K, V> {
    /// Create a node participating in levels `0..=level`, unlinked at every level.
    pub(crate) fn new(key: K, value: V, level: usize) -> Self {
        Node {
            key,
            value,
            forward: vec![None; level + 1],
        }
    }

    /// Highest level index this node participates in.
    pub(crate) fn level(&self) -> usize {
        self.forward.len() - 1
    }
}

/// Where a traversal currently stands: on the header sentinel or on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cursor {
    Head,
    Node(NodeId),
}
