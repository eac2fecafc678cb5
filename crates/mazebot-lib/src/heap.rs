//! Mergeable min-priority queue backed by a pairing heap.
//!
//! The tree is owned top-down: every node owns its child subheaps. A separate
//! membership map tracks each queued item's current priority, which answers
//! [`PairingHeap::contains`] in constant time and bounds the search performed
//! by [`PairingHeap::decrease_key`].
//!
//! See <https://en.wikipedia.org/wiki/Pairing_heap>.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Priority values usable by [`PairingHeap`].
///
/// `INFINITY` is the priority given to items inserted without one.
pub trait Priority: Copy + PartialOrd {
    const INFINITY: Self;
}

macro_rules! bounded_priority {
    ($($ty:ty),* $(,)?) => {
        $(impl Priority for $ty {
            const INFINITY: Self = <$ty>::MAX;
        })*
    };
}

bounded_priority!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Priority for f32 {
    const INFINITY: Self = f32::INFINITY;
}

impl Priority for f64 {
    const INFINITY: Self = f64::INFINITY;
}

struct HeapNode<T, P> {
    item: T,
    priority: P,
    children: Vec<HeapNode<T, P>>,
}

impl<T, P> HeapNode<T, P> {
    fn singleton(item: T, priority: P) -> Self {
        Self {
            item,
            priority,
            children: Vec::new(),
        }
    }
}

/// Pairing heap keyed by item identity.
///
/// Each item is present at most once. Equal priorities favour the most
/// recently merged item.
pub struct PairingHeap<T, P> {
    root: Option<HeapNode<T, P>>,
    index: HashMap<T, P>,
    prune_search: bool,
}

impl<T, P> Default for PairingHeap<T, P> {
    fn default() -> Self {
        Self {
            root: None,
            index: HashMap::new(),
            prune_search: false,
        }
    }
}

impl<T, P> PairingHeap<T, P>
where
    T: Clone + Eq + Hash,
    P: Priority,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Heap whose [`decrease_key`](Self::decrease_key) skips subtrees that
    /// cannot contain the target.
    ///
    /// A subtree is skipped when its root priority exceeds the target's
    /// tracked priority. The default heap searches the whole tree.
    pub fn with_pruned_search() -> Self {
        Self {
            root: None,
            index: HashMap::new(),
            prune_search: true,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Current priority of a queued item.
    pub fn priority(&self, item: &T) -> Option<P> {
        self.index.get(item).copied()
    }

    /// Add `item` with the given priority.
    ///
    /// Returns `false` when the item was already queued; in that case the
    /// call behaves like [`decrease_key`](Self::decrease_key).
    pub fn insert(&mut self, item: T, priority: P) -> bool {
        if self.contains(&item) {
            self.decrease_key(&item, priority);
            return false;
        }

        self.index.insert(item.clone(), priority);
        self.meld_into_root(HeapNode::singleton(item, priority));
        true
    }

    /// Add `item` with [`Priority::INFINITY`].
    pub fn insert_unbounded(&mut self, item: T) -> bool {
        self.insert(item, P::INFINITY)
    }

    pub fn peek_min(&self) -> Option<(&T, P)> {
        self.root.as_ref().map(|root| (&root.item, root.priority))
    }

    /// Remove and return the item with the smallest priority.
    pub fn pop_min(&mut self) -> Option<(T, P)> {
        let HeapNode {
            item,
            priority,
            children,
        } = self.root.take()?;
        self.index.remove(&item);
        self.root = combine_siblings(children);
        Some((item, priority))
    }

    /// Lower the priority of a queued item.
    ///
    /// Returns `false` without changing anything when the item is absent or
    /// `priority` is not strictly lower than its current priority.
    pub fn decrease_key(&mut self, item: &T, priority: P) -> bool {
        let Some(current) = self.priority(item) else {
            return false;
        };
        if !(priority < current) {
            return false;
        }
        let Some(path) = self.locate(item, current) else {
            return false;
        };
        let Some(root) = self.root.as_mut() else {
            return false;
        };

        if let Some(entry) = self.index.get_mut(item) {
            *entry = priority;
        }

        let Some((&last, ancestors)) = path.split_last() else {
            root.priority = priority;
            return true;
        };

        let parent = ancestors
            .iter()
            .fold(root, |node, &idx| &mut node.children[idx]);
        if parent.priority <= priority {
            parent.children[last].priority = priority;
            return true;
        }

        let mut detached = parent.children.remove(last);
        detached.priority = priority;
        self.meld_into_root(detached);
        true
    }

    /// Move every item of `other` into this heap, leaving `other` empty.
    ///
    /// Items present in both heaps keep the lower of their two priorities.
    pub fn append(&mut self, other: &mut Self) {
        if other.index.keys().any(|item| self.contains(item)) {
            while let Some((item, priority)) = other.pop_min() {
                self.insert(item, priority);
            }
            return;
        }

        self.index.extend(other.index.drain());
        if let Some(root) = other.root.take() {
            self.meld_into_root(root);
        }
    }

    fn meld_into_root(&mut self, node: HeapNode<T, P>) {
        self.root = Some(match self.root.take() {
            Some(root) => meld(root, node),
            None => node,
        });
    }

    /// Child-index path from the root to `item`, or `None` when not found.
    ///
    /// `bound` is the item's tracked priority; with pruning enabled no subtree
    /// rooted above it is entered.
    fn locate(&self, item: &T, bound: P) -> Option<Vec<usize>> {
        let root = self.root.as_ref()?;
        if root.item == *item {
            return Some(Vec::new());
        }

        let mut path = Vec::new();
        let mut stack: Vec<(&HeapNode<T, P>, usize)> = vec![(root, 0)];
        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let idx = frame.1;
            if idx >= node.children.len() {
                stack.pop();
                path.pop();
                continue;
            }
            frame.1 += 1;

            let child = &node.children[idx];
            if self.prune_search && child.priority > bound {
                continue;
            }
            if child.item == *item {
                path.push(idx);
                return Some(path);
            }
            if !child.children.is_empty() {
                path.push(idx);
                stack.push((child, 0));
            }
        }

        None
    }
}

impl<T, P> FromIterator<(T, P)> for PairingHeap<T, P>
where
    T: Clone + Eq + Hash,
    P: Priority,
{
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut heap = Self::new();
        for (item, priority) in iter {
            heap.insert(item, priority);
        }
        heap
    }
}

impl<T: Clone, P: Clone> Clone for PairingHeap<T, P> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.as_ref().and_then(clone_tree),
            index: self.index.clone(),
            prune_search: self.prune_search,
        }
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for PairingHeap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairingHeap")
            .field("len", &self.index.len())
            .field(
                "min",
                &self.root.as_ref().map(|root| (&root.item, &root.priority)),
            )
            .field("prune_search", &self.prune_search)
            .finish()
    }
}

impl<T, P> Drop for PairingHeap<T, P> {
    // Unlink iteratively; decreasing insert sequences build chains as deep as the heap.
    fn drop(&mut self) {
        let mut pending: Vec<HeapNode<T, P>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Copy a tree without recursing.
///
/// Nodes are first copied in pre-order with their parent's index, then
/// attached to their parents from the back; every child sits after its parent.
fn clone_tree<T: Clone, P: Clone>(root: &HeapNode<T, P>) -> Option<HeapNode<T, P>> {
    let mut nodes: Vec<(HeapNode<T, P>, Option<usize>)> = Vec::new();
    let mut stack: Vec<(&HeapNode<T, P>, Option<usize>)> = vec![(root, None)];
    while let Some((node, parent)) = stack.pop() {
        let idx = nodes.len();
        nodes.push((
            HeapNode::singleton(node.item.clone(), node.priority.clone()),
            parent,
        ));
        stack.extend(node.children.iter().rev().map(|child| (child, Some(idx))));
    }

    while let Some((mut node, parent)) = nodes.pop() {
        // Siblings arrive last-first.
        node.children.reverse();
        match parent {
            Some(parent) => nodes[parent].0.children.push(node),
            None => return Some(node),
        }
    }
    None
}

/// The root with the larger priority becomes the last child of the other.
/// Ties go to `right`.
fn meld<T, P: PartialOrd>(mut left: HeapNode<T, P>, mut right: HeapNode<T, P>) -> HeapNode<T, P> {
    if left.priority < right.priority {
        left.children.push(right);
        left
    } else {
        right.children.push(left);
        right
    }
}

/// Two-pass merge of a removed root's children: pair left to right, then
/// fold the pairs right to left.
fn combine_siblings<T, P: PartialOrd>(children: Vec<HeapNode<T, P>>) -> Option<HeapNode<T, P>> {
    let mut pairs = Vec::with_capacity(children.len().div_ceil(2));
    let mut iter = children.into_iter();
    while let Some(first) = iter.next() {
        match iter.next() {
            Some(second) => pairs.push(meld(first, second)),
            None => pairs.push(first),
        }
    }

    pairs.into_iter().rev().reduce(|acc, left| meld(left, acc))
}
