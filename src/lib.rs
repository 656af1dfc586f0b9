//! This crate provides a Binary Search Tree (BST) whose values are described at runtime by a
//! [`Descriptor`], plus text formats for saving and loading trees and a small command shell
//! for driving trees of several types side by side.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! may have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Here "less" and "greater" are whatever the tree's [`Descriptor`] says they are. The
//! descriptor also knows how to parse, print, clone and destroy values, so the tree itself
//! never needs the value type to implement `Ord`, `Clone` or `Display`.
//!
//! Searching takes `O(height)`. Inserting values in sorted order degrades the tree to a
//! chain, so [`Tree::balance`] rebuilds it with height `O(lg N)`.
//!
//! ## Text formats
//!
//! A tree can be written out and read back as a traversal string (in, pre or post order),
//! as a bracketed string like `{5}({3}()[])[{8}()[]]`, or as a list of `value - parent`
//! pairs. See [`codec`].
//!
//! ## Sessions
//!
//! A [`Session`] keeps named trees of any [`TypeName`] and runs text commands against them.
//! The `bstree` binary reads those commands from standard input.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod catalog;
pub mod codec;
pub mod descriptor;
mod display;
pub mod error;
pub mod node;
pub mod session;
pub mod tree;
pub mod types;

pub use catalog::{DynTree, TypeName};
pub use codec::TraversalOrder;
pub use descriptor::Descriptor;
pub use display::MAX_DRAW_HEIGHT;
pub use error::{CatalogError, CommandError, PairListError, ParseError};
pub use node::Node;
pub use session::Session;
pub use tree::{Iter, Levels, Tree};
