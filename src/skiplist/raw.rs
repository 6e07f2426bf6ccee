use std::borrow::Borrow;
use std::fmt;
use std::iter::FusedIterator;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::skiplist::level::random_level;
use crate::skiplist::node::{Cursor, Link, Node, NodeId};
use crate::types::{DeleteStatus, InsertStatus};

/// The unsynchronized skip list.
///
/// Nodes live in an arena of slots addressed by [`NodeId`]. The header
/// sentinel is `head`, a forward array with one link per level
/// `0..=max_level`. It carries no key or value.
///
/// Every operation is a single top-to-bottom descent from the header:
/// move right while the next key is smaller, then drop one level without
/// rewinding. Mutations record the last node visited at each level (the
/// "update" array) and splice through it.
///
/// This type needs `&mut self` to mutate. [`crate::SkipList`] wraps it in a
/// lock for shared use across threads.
pub struct RawSkipList<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    head: Vec<Link>,
    max_level: usize,
    level: usize,
    len: usize,
    rng: StdRng,
}

impl<K, V> RawSkipList<K, V> {
    /// Create an empty list whose nodes never rise above `max_level`.
    pub fn new(max_level: usize) -> Self {
        Self::with_rng(max_level, StdRng::from_entropy())
    }

    /// Create an empty list with reproducible level draws.
    pub fn with_seed(max_level: usize, seed: u64) -> Self {
        Self::with_rng(max_level, StdRng::seed_from_u64(seed))
    }

    fn with_rng(max_level: usize, rng: StdRng) -> Self {
        RawSkipList {
            nodes: Vec::new(),
            free: Vec::new(),
            head: vec![None; max_level + 1],
            max_level,
            level: 0,
            len: 0,
            rng,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest level currently populated (0 when empty).
    pub fn level(&self) -> usize {
        self.level
    }

    /// Configured level ceiling.
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Iterate over all entries in ascending key order.
    ///
    /// Simply follows level 0, which is a sorted linked list of every entry.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            next: self.head[0],
            remaining: self.len,
        }
    }

    /// Release every node and reset to the empty state.
    ///
    /// The arena is a flat vector, so each node is dropped exactly once
    /// without walking the chain recursively.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head.fill(None);
        self.level = 0;
        self.len = 0;
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        match &self.nodes[id] {
            Some(node) => node,
            None => unreachable!("link to released slot {id}"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match &mut self.nodes[id] {
            Some(node) => node,
            None => unreachable!("link to released slot {id}"),
        }
    }

    fn next(&self, cursor: Cursor, level: usize) -> Link {
        match cursor {
            Cursor::Head => self.head[level],
            Cursor::Node(id) => self.node(id).forward[level],
        }
    }

    fn set_next(&mut self, cursor: Cursor, level: usize, link: Link) {
        match cursor {
            Cursor::Head => self.head[level] = link,
            Cursor::Node(id) => self.node_mut(id).forward[level] = link,
        }
    }

    /// Allocate a node in the arena, reusing a released slot when one exists.
    fn create_node(&mut self, key: K, value: V, level: usize) -> NodeId {
        let node = Node::new(key, value, level);
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release_node(&mut self, id: NodeId) -> Node<K, V> {
        match self.nodes[id].take() {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => unreachable!("double release of slot {id}"),
        }
    }
}

impl<K: Ord, V> RawSkipList<K, V> {
    /// Leveled descent toward `key`.
    ///
    /// Returns the last node at level 0 whose key is strictly less than
    /// `key`. `record` is called once per level with that level's
    /// predecessor, from `self.level` down to 0.
    fn descend<Q>(&self, key: &Q, mut record: impl FnMut(usize, Cursor)) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = Cursor::Head;
        for level in (0..=self.level).rev() {
            while let Some(next) = self.next(cursor, level) {
                let next_key: &Q = self.node(next).key.borrow();
                if next_key >= key {
                    break;
                }
                cursor = Cursor::Node(next);
            }
            record(level, cursor);
        }
        cursor
    }

    /// Node holding exactly `key`, if any.
    fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let pred = self.descend(key, |_, _| {});
        let candidate = self.next(pred, 0)?;
        let candidate_key: &Q = self.node(candidate).key.borrow();
        (candidate_key == key).then_some(candidate)
    }

    /// Look up a key. Returns the value if found.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|id| &self.node(id).value)
    }

    /// Whether `key` is present.
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Insert a key-value pair. Never overwrites an existing key.
    ///
    /// Algorithm:
    ///   1. Descend, recording the predecessor at each level
    ///   2. If the level-0 successor holds `key`, stop
    ///   3. Draw a random level; levels above the current top get the header
    ///      as predecessor and the top is raised
    ///   4. Splice the new node in after each recorded predecessor
    pub fn insert(&mut self, key: K, value: V) -> InsertStatus {
        let mut update = vec![Cursor::Head; self.max_level + 1];
        let pred = self.descend(&key, |level, cursor| update[level] = cursor);

        if let Some(next) = self.next(pred, 0) {
            if self.node(next).key == key {
                return InsertStatus::AlreadyExists;
            }
        }

        let new_level = random_level(&mut self.rng, self.max_level);
        if new_level > self.level {
            for slot in &mut update[self.level + 1..=new_level] {
                *slot = Cursor::Head;
            }
            self.level = new_level;
        }

        let id = self.create_node(key, value, new_level);
        for (level, &pred) in update.iter().enumerate().take(new_level + 1) {
            let succ = self.next(pred, level);
            self.node_mut(id).forward[level] = succ;
            self.set_next(pred, level, Some(id));
        }
        self.len += 1;

        InsertStatus::Inserted
    }

    /// Unlink the node holding `key` and hand back its entry.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut update = vec![Cursor::Head; self.max_level + 1];
        let pred = self.descend(key, |level, cursor| update[level] = cursor);

        let target = self.next(pred, 0)?;
        let target_key: &Q = self.node(target).key.borrow();
        if target_key != key {
            return None;
        }

        // A node present at level i is present at every level below it, so
        // the first level whose predecessor skips it ends the unlinking.
        let target_level = self.node(target).level();
        for level in 0..=self.level {
            if self.next(update[level], level) != Some(target) {
                debug_assert!(level > target_level);
                break;
            }
            let succ = self.node(target).forward[level];
            self.set_next(update[level], level, succ);
        }

        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }

        self.len -= 1;
        let node = self.release_node(target);
        Some((node.key, node.value))
    }

    /// Delete `key`, reporting whether it was there.
    pub fn delete<Q>(&mut self, key: &Q) -> DeleteStatus
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.remove(key) {
            Some(_) => DeleteStatus::Deleted,
            None => DeleteStatus::NotFound,
        }
    }
}

/// Per-level listing, top level first. Diagnostic only.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for RawSkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "***************** Skip List *****************")?;
        for level in (0..=self.level).rev() {
            write!(f, "Level {level}: ")?;
            let mut link = self.head[level];
            while let Some(id) = link {
                let node = self.node(id);
                write!(f, "{}:{}; ", node.key, node.value)?;
                link = node.forward[level];
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RawSkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over entries in sorted order, following level 0.
pub struct Iter<'a, K, V> {
    list: &'a RawSkipList<K, V>,
    next: Link,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.list.node(id);
        self.next = node.forward[0];
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a RawSkipList<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
