//! Recency List Module
//!
//! Arena-backed doubly linked list that keeps session records in access order.

// == Node Handle ==
/// Stable handle to a node in a [`RecencyList`].
///
/// A handle stays valid until its node is removed; after that the slot may be
/// reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Tracks access order for session records.
///
/// Nodes live in a growable arena and link to each other by slot index:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Insertion, move-to-front and removal by handle are all O(1).
#[derive(Debug)]
pub(crate) struct RecencyList<T> {
    slots: Vec<Option<Node<T>>>,
    /// Vacant slot indices available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a value at the most recently used end and returns its handle.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: None,
            next: None,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Touch ==
    /// Marks a node as recently used (moves to front).
    ///
    /// Returns false if the handle does not refer to a live node.
    pub fn touch(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.head != Some(id.0) {
            self.unlink(id.0);
            self.link_front(id.0);
        }
        true
    }

    // == Remove ==
    /// Removes a node and returns its value.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }

        self.unlink(id.0);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used value.
    ///
    /// Returns None if the list is empty.
    pub fn evict_oldest(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(NodeId(tail))
    }

    // == Peek Oldest ==
    /// Returns the least recently used value without removing it.
    pub fn peek_oldest(&self) -> Option<&T> {
        self.tail.and_then(|idx| self.node(idx)).map(|n| &n.value)
    }

    // == Peek Newest ==
    /// Returns the most recently used value without removing it.
    #[allow(dead_code)]
    pub fn peek_newest(&self) -> Option<&T> {
        self.head.and_then(|idx| self.node(idx)).map(|n| &n.value)
    }

    // == Accessors ==
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id.0).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .map(|n| &mut n.value)
    }

    /// Checks if a handle refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id.0).is_some()
    }

    /// Returns the number of live nodes.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates from most recently used to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Link Helpers ==
    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev.and_then(|p| self.node_mut(p)) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.node_mut(n)) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }

        match old_head.and_then(|h| self.node_mut(h)) {
            Some(h) => h.prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub(crate) struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.value)
    }
}
