//! The BST engine. A [`Tree`] owns its nodes and their values and is bound to one
//! [`Descriptor`], which is the only way it ever touches a value.
//!
//! Insert, search, remove and clear walk the tree with loops and explicit work stacks rather
//! than recursion, so a degenerate chain (e.g. from ascending inserts) can't overflow the
//! call stack. Call [`Tree::balance`] to flatten such a chain.
//!
//! # Examples
//!
//! ```
//! use bstree::types::IntType;
//! use bstree::Tree;
//!
//! let mut tree = Tree::new(IntType);
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.contains(&1));
//!
//! // Duplicates are rejected and the tree is unchanged.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! assert!(tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace};

use crate::descriptor::Descriptor;
use crate::node::{Link, Node};

/// A binary search tree over the values described by `D`.
///
/// No two values in a tree compare equal under `D::compare`.
pub struct Tree<D: Descriptor> {
    pub(crate) descriptor: D,
    pub(crate) root: Link<D::Value>,
    pub(crate) len: usize,
}

impl<D: Descriptor> Drop for Tree<D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<D> fmt::Debug for Tree<D>
where
    D: Descriptor,
    D::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("type", &self.descriptor.name())
            .field("len", &self.len)
            .field("values", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<D: Descriptor> Tree<D> {
    /// Creates an empty tree bound to `descriptor`. Pass `&descriptor` to borrow it instead.
    pub fn new(descriptor: D) -> Self {
        Self {
            descriptor,
            root: None,
            len: 0,
        }
    }

    /// The descriptor this tree is bound to.
    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, for inspecting the shape of the tree.
    pub fn root(&self) -> Option<&Node<D::Value>> {
        self.root.as_deref()
    }

    /// Number of levels in the tree. An empty tree has height 0 and a lone root has height 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<&Node<D::Value>> = self.root().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| node.left().into_iter().chain(node.right()))
                .collect();
        }
        height
    }

    /// Takes ownership of `value` and stores it in a new leaf. Returns `false` if an equal
    /// value is already present, in which case the tree is unchanged and `value` is handed to
    /// the descriptor to be destroyed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::types::IntType;
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new(IntType);
    /// for x in [5, 3, 8] {
    ///     assert!(tree.insert(x));
    /// }
    ///
    /// assert!(!tree.insert(3));
    /// assert_eq!(tree.to_string_in_order(), "3 5 8");
    /// ```
    pub fn insert(&mut self, value: D::Value) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match self.descriptor.compare(&value, &node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    trace!(value = %self.descriptor.print(&value), "rejected duplicate");
                    self.descriptor.destroy(value);
                    return false;
                }
            };
        }

        *link = Some(Node::new_boxed(value));
        self.len += 1;
        true
    }

    /// Inserts a copy of `value`, leaving the caller's value alone.
    pub fn insert_cloned(&mut self, value: &D::Value) -> bool {
        let value = self.descriptor.clone_value(value);
        self.insert(value)
    }

    /// Whether a value equal to `key` is stored in the tree.
    pub fn contains(&self, key: &D::Value) -> bool {
        self.find_node(key).is_some()
    }

    /// The stored value equal to `key`, if any.
    pub fn get(&self, key: &D::Value) -> Option<&D::Value> {
        self.find_node(key).map(Node::value)
    }

    pub(crate) fn find_node(&self, key: &D::Value) -> Option<&Node<D::Value>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match self.descriptor.compare(key, &node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Removes the value equal to `key`. Returns whether anything was removed.
    ///
    /// A node with two children takes the value of its in-order successor (the left-most node
    /// of its right subtree), and the successor's node is spliced out in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::types::IntType;
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new(IntType);
    /// tree.load_traversal("5 3 8 1 4 7 9", Default::default()).unwrap();
    ///
    /// assert!(tree.remove(&5));
    /// assert!(!tree.remove(&5));
    ///
    /// assert_eq!(tree.to_string_in_order(), "1 3 4 7 8 9");
    /// assert_eq!(tree.root().map(|n| *n.value()), Some(7));
    /// ```
    pub fn remove(&mut self, key: &D::Value) -> bool {
        let mut link = &mut self.root;
        loop {
            let ordering = match link.as_deref() {
                None => return false,
                Some(node) => self.descriptor.compare(key, &node.value),
            };
            if ordering == Ordering::Equal {
                break;
            }
            if let Some(node) = link {
                link = match ordering {
                    Ordering::Less => &mut node.left,
                    _ => &mut node.right,
                };
            }
        }

        let Some(mut node) = link.take() else {
            return false;
        };
        match (node.left.take(), node.right.take()) {
            (None, None) => self.descriptor.destroy(node.value),
            (Some(child), None) | (None, Some(child)) => {
                *link = Some(child);
                self.descriptor.destroy(node.value);
            }
            (Some(left), Some(right)) => {
                node.left = Some(left);
                node.right = Some(right);
                if let Some(successor) = detach_min(&mut node.right) {
                    let old = std::mem::replace(&mut node.value, successor);
                    self.descriptor.destroy(old);
                }
                *link = Some(node);
            }
        }

        self.len -= 1;
        trace!(len = self.len, "removed value");
        true
    }

    /// Destroys every value, children before parents, and leaves the tree empty. Safe to
    /// call on an empty tree.
    pub fn clear(&mut self) {
        if self.root.is_none() {
            return;
        }

        // Nodes come off `pending` root first, right subtree before left, so `detached`
        // popped from the back yields post-order.
        let mut pending: Vec<Box<Node<D::Value>>> = self.root.take().into_iter().collect();
        let mut detached = Vec::with_capacity(self.len);
        while let Some(node) = pending.pop() {
            let Node { value, left, right } = *node;
            pending.extend(left);
            pending.extend(right);
            detached.push(value);
        }
        while let Some(value) = detached.pop() {
            self.descriptor.destroy(value);
        }

        debug!(removed = self.len, "cleared tree");
        self.len = 0;
    }

    /// Rebuilds the tree so that its height is `ceil(log2(n + 1))`. The set of values is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::types::IntType;
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new(IntType);
    /// for x in 1..=7 {
    ///     tree.insert(x);
    /// }
    /// assert_eq!(tree.height(), 7);
    ///
    /// tree.balance();
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(tree.to_string_in_order(), "1 2 3 4 5 6 7");
    /// ```
    pub fn balance(&mut self) {
        let height_before = self.height();
        let mut values: Vec<Option<D::Value>> =
            self.drain_in_order().into_iter().map(Some).collect();
        self.insert_median_first(&mut values);
        debug!(
            len = self.len,
            height_before,
            height_after = self.height(),
            "balanced tree"
        );
    }

    /// Moves every value out of the tree in ascending order, leaving it empty.
    fn drain_in_order(&mut self) -> Vec<D::Value> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root.take();
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            let Node { value, right, .. } = *node;
            out.push(value);
            current = right;
        }
        self.len = 0;
        out
    }

    /// Inserts the median of `values`, then the medians of each half, and so on.
    /// Recursion depth is logarithmic in `values.len()`.
    fn insert_median_first(&mut self, values: &mut [Option<D::Value>]) {
        if values.is_empty() {
            return;
        }
        let mid = (values.len() - 1) / 2;
        if let Some(value) = values[mid].take() {
            self.insert(value);
        }
        let (left, right) = values.split_at_mut(mid);
        self.insert_median_first(left);
        self.insert_median_first(&mut right[1..]);
    }

    /// Copies the subtree rooted at the node equal to `key` into a new tree bound to the same
    /// descriptor, or `None` if `key` isn't present.
    ///
    /// The copy is built by inserting the subtree's values in pre-order into an empty tree, so
    /// it holds exactly the subtree's values.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::types::IntType;
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new(IntType);
    /// tree.load_traversal("5 3 8 1 4 7 9", Default::default()).unwrap();
    ///
    /// let sub = tree.subtree(&3).unwrap();
    /// assert_eq!(sub.to_string_pre_order(), "3 1 4");
    /// assert!(tree.contains_subtree(&sub));
    ///
    /// assert!(tree.subtree(&6).is_none());
    /// ```
    pub fn subtree(&self, key: &D::Value) -> Option<Tree<D>>
    where
        D: Clone,
    {
        let found = self.find_node(key)?;
        let mut out = Tree::new(self.descriptor.clone());
        let mut stack = vec![found];
        while let Some(node) = stack.pop() {
            out.insert_cloned(&node.value);
            stack.extend(node.right());
            stack.extend(node.left());
        }
        Some(out)
    }

    /// Whether `sub` appears somewhere in this tree with exactly the same shape and equal
    /// values at every position. An empty `sub` is contained in every tree.
    pub fn contains_subtree<E>(&self, sub: &Tree<E>) -> bool
    where
        E: Descriptor<Value = D::Value>,
    {
        let Some(sub_root) = sub.root() else {
            return true;
        };
        self.levels_nodes().any(|node| {
            self.descriptor.compare(&node.value, &sub_root.value) == Ordering::Equal
                && self.same_shape(node, sub_root)
        })
    }

    /// Structural equality: same shape, pairwise-equal values, absent children matching
    /// absent children.
    fn same_shape(&self, a: &Node<D::Value>, b: &Node<D::Value>) -> bool {
        let mut stack = vec![(Some(a), Some(b))];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if self.descriptor.compare(&a.value, &b.value) != Ordering::Equal {
                        return false;
                    }
                    stack.push((a.left(), b.left()));
                    stack.push((a.right(), b.right()));
                }
                _ => return false,
            }
        }
        true
    }

    /// Follows `path` from the root and returns the value it ends on. `L`/`l` step left,
    /// `R`/`r`/`P`/`p` step right and any other character stays put. Falling off the tree
    /// at any point gives `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::types::IntType;
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new(IntType);
    /// tree.load_traversal("5 3 8 1 4 7 9", Default::default()).unwrap();
    ///
    /// assert_eq!(tree.find_by_path(""), Some(&5));
    /// assert_eq!(tree.find_by_path("LR"), Some(&4));
    /// assert_eq!(tree.find_by_path("p-l"), Some(&7));
    /// assert_eq!(tree.find_by_path("LLL"), None);
    /// ```
    pub fn find_by_path(&self, path: &str) -> Option<&D::Value> {
        let mut current = self.root.as_deref();
        for step in path.chars() {
            let node = current?;
            current = match step {
                'L' | 'l' => node.left(),
                'R' | 'r' | 'P' | 'p' => node.right(),
                _ => Some(node),
            };
        }
        current.map(Node::value)
    }

    /// Inserts a copy of every value of `other`, visited level by level. Values already
    /// present are skipped. Returns how many values were added.
    pub fn merge<E>(&mut self, other: &Tree<E>) -> usize
    where
        E: Descriptor<Value = D::Value>,
    {
        let added = other
            .levels()
            .filter(|value| self.insert_cloned(value))
            .count();
        debug!(added, skipped = other.len() - added, "merged tree");
        added
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, D::Value> {
        Iter::new(self.root())
    }

    /// Iterates over the values level by level, left to right within a level.
    pub fn levels(&self) -> Levels<'_, D::Value> {
        Levels {
            inner: self.levels_nodes(),
        }
    }

    fn levels_nodes(&self) -> LevelNodes<'_, D::Value> {
        LevelNodes {
            queue: self.root().into_iter().collect(),
        }
    }
}

impl<'a, D: Descriptor> IntoIterator for &'a Tree<D> {
    type Item = &'a D::Value;
    type IntoIter = Iter<'a, D::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Removes the left-most node below `slot`, splicing its right child into its place, and
/// returns its value.
fn detach_min<V>(slot: &mut Link<V>) -> Option<V> {
    let mut link = slot;
    while link.as_ref().map_or(false, |node| node.left.is_some()) {
        if let Some(node) = link {
            link = &mut node.left;
        }
    }
    let node = link.take()?;
    let Node { value, right, .. } = *node;
    *link = right;
    Some(value)
}

/// In-order iterator over a tree's values. See [`Tree::iter`].
pub struct Iter<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iter<'a, V> {
    fn new(root: Option<&'a Node<V>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.value)
    }
}

/// Level-order iterator over a tree's values. See [`Tree::levels`].
pub struct Levels<'a, V> {
    inner: LevelNodes<'a, V>,
}

impl<'a, V> Iterator for Levels<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Node::value)
    }
}

struct LevelNodes<'a, V> {
    queue: VecDeque<&'a Node<V>>,
}

impl<'a, V> Iterator for LevelNodes<'a, V> {
    type Item = &'a Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node)
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;
    use crate::types::IntType;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts,
    /// removes and rebalances we have the same values in both.
    fn do_ops(ops: &[Op<i8>], bst: &mut Tree<IntType>, set: &mut BTreeSet<i8>) {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    assert_eq!(bst.insert(i32::from(*x)), set.insert(*x));
                }
                Op::Remove(x) => {
                    assert_eq!(bst.remove(&i32::from(*x)), set.remove(x));
                }
                Op::Balance => bst.balance(),
                Op::Iter => {
                    let expected: Vec<i32> = set.iter().copied().map(i32::from).collect();
                    assert_eq!(bst.iter().copied().collect::<Vec<_>>(), expected);
                }
            }
            assert_eq!(bst.len(), set.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new(IntType);
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|x| tree.contains(&i32::from(*x)))
                && tree.iter().copied().collect::<Vec<_>>()
                    == set.iter().copied().map(i32::from).collect::<Vec<_>>()
        }
    }

    quickcheck::quickcheck! {
        fn balanced_height_is_logarithmic(xs: Vec<i16>) -> bool {
            let mut tree = Tree::new(IntType);
            for x in &xs {
                tree.insert(i32::from(*x));
            }
            let before: Vec<i32> = tree.iter().copied().collect();

            tree.balance();

            let n = tree.len();
            let bound = (usize::BITS - n.leading_zeros()) as usize;
            tree.height() <= bound && tree.iter().copied().collect::<Vec<_>>() == before
        }
    }

    quickcheck::quickcheck! {
        fn every_subtree_is_contained(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new(IntType);
            for x in &xs {
                tree.insert(i32::from(*x));
            }

            xs.iter().all(|x| {
                let sub = tree.subtree(&i32::from(*x)).expect("inserted key");
                tree.contains_subtree(&sub)
            })
        }
    }
}
