//! A single tree vertex.

/// An owned, possibly empty, child subtree.
pub(crate) type Link<V> = Option<Box<Node<V>>>;

/// A `Node` owns exactly one value and exclusively owns its left and right subtrees. There
/// are no parent pointers and no shared children.
///
/// Nodes are only handed out by reference (see [`Tree::root`](crate::Tree::root)) so callers
/// can inspect the shape of a tree without being able to break its invariants.
#[derive(Debug)]
pub struct Node<V> {
    pub(crate) value: V,
    pub(crate) left: Link<V>,
    pub(crate) right: Link<V>,
}

impl<V> Node<V> {
    pub(crate) fn new_boxed(value: V) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    /// The value stored in this node.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
