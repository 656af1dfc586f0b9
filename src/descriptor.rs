//! The capability set a storable type must provide.
//!
//! A [`Tree`](crate::Tree) never looks inside the values it stores. Everything it does with
//! them (copying, ordering, printing, releasing) goes through a `Descriptor`. A descriptor is
//! usually a zero-sized unit struct, but it can carry state, e.g. a collation table or a
//! counter in tests.
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//! use bstree::{Descriptor, ParseError, Tree};
//!
//! /// Orders strings by length, then bytes.
//! #[derive(Clone, Copy)]
//! struct ByLength;
//!
//! impl Descriptor for ByLength {
//!     type Value = String;
//!
//!     fn name(&self) -> &'static str {
//!         "BYLEN"
//!     }
//!
//!     fn clone_value(&self, value: &String) -> String {
//!         value.clone()
//!     }
//!
//!     fn parse(&self, text: &str) -> Result<String, ParseError> {
//!         Ok(text.to_owned())
//!     }
//!
//!     fn compare(&self, a: &String, b: &String) -> Ordering {
//!         a.len().cmp(&b.len()).then_with(|| a.cmp(b))
//!     }
//!
//!     fn print(&self, value: &String) -> String {
//!         value.clone()
//!     }
//! }
//!
//! let mut tree = Tree::new(ByLength);
//! tree.load_traversal("ccc a bb", Default::default()).unwrap();
//! assert_eq!(tree.to_string_in_order(), "a bb ccc");
//! ```

use std::cmp::Ordering;

use crate::error::ParseError;

/// Runtime description of a value type: how to copy, parse, release, order and print it.
pub trait Descriptor {
    /// The values described.
    type Value;

    /// The catalog name of this type, e.g. `INT`.
    fn name(&self) -> &'static str;

    /// Size of one value in bytes. Informational only.
    fn size(&self) -> usize {
        std::mem::size_of::<Self::Value>()
    }

    /// Deep copy of `value`. The engine never shares a value between two nodes.
    fn clone_value(&self, value: &Self::Value) -> Self::Value;

    /// Builds a value from a single token.
    fn parse(&self, text: &str) -> Result<Self::Value, ParseError>;

    /// Releases a value. The engine calls this exactly once for every value it owns, when
    /// the value leaves the tree.
    fn destroy(&self, value: Self::Value) {
        drop(value);
    }

    /// A total order. Must be antisymmetric and transitive or the tree breaks.
    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Ordering;

    /// Textual form of a value. Must not contain whitespace if the value is meant to survive
    /// a round trip through the traversal strings.
    fn print(&self, value: &Self::Value) -> String;
}

/// A borrowed descriptor is a descriptor, so a tree can either own its descriptor or borrow
/// it for its whole lifetime.
impl<D> Descriptor for &D
where
    D: Descriptor + ?Sized,
{
    type Value = D::Value;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn clone_value(&self, value: &Self::Value) -> Self::Value {
        (**self).clone_value(value)
    }

    fn parse(&self, text: &str) -> Result<Self::Value, ParseError> {
        (**self).parse(text)
    }

    fn destroy(&self, value: Self::Value) {
        (**self).destroy(value)
    }

    fn compare(&self, a: &Self::Value, b: &Self::Value) -> Ordering {
        (**self).compare(a, b)
    }

    fn print(&self, value: &Self::Value) -> String {
        (**self).print(value)
    }
}
