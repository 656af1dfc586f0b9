//! Text forms of a tree and the matching loaders.
//!
//! There are four export forms: the three depth-first traversals as space-separated
//! tokens, and a bracketed form `{value}(left)[right]`. There is also a level-order list
//! of `(value, parent)` pairs.
//!
//! Every loader rebuilds the tree by plain insertion in the order the values appear. That
//! reproduces the set of values, and the shape only when the input order happens to
//! produce it (pre-order and level-order always do).

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::descriptor::Descriptor;
use crate::error::{PairListError, ParseError};
use crate::node::Node;
use crate::tree::Tree;

/// A depth-first traversal order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree. Ascending order.
    #[default]
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

impl FromStr for TraversalOrder {
    type Err = String;

    /// Accepts `IN`, `PRE` and `POST`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IN" => Ok(Self::InOrder),
            "PRE" => Ok(Self::PreOrder),
            "POST" => Ok(Self::PostOrder),
            _ => Err(s.to_owned()),
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InOrder => "IN",
            Self::PreOrder => "PRE",
            Self::PostOrder => "POST",
        })
    }
}

/// One step of the bracketed export.
enum Step<'a, V> {
    Open(&'a Node<V>),
    Text(&'static str),
}

impl<D: Descriptor> Tree<D> {
    /// Values in ascending order, separated by single spaces.
    pub fn to_string_in_order(&self) -> String {
        self.join(self.iter())
    }

    /// Values in pre-order, separated by single spaces.
    pub fn to_string_pre_order(&self) -> String {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<D::Value>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push(node.value());
            stack.extend(node.right());
            stack.extend(node.left());
        }
        self.join(out)
    }

    /// Values in post-order, separated by single spaces.
    pub fn to_string_post_order(&self) -> String {
        // Node, right, left reversed is left, right, node.
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<D::Value>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push(node.value());
            stack.extend(node.left());
            stack.extend(node.right());
        }
        out.reverse();
        self.join(out)
    }

    /// The traversal string for `order`.
    pub fn to_traversal_string(&self, order: TraversalOrder) -> String {
        match order {
            TraversalOrder::InOrder => self.to_string_in_order(),
            TraversalOrder::PreOrder => self.to_string_pre_order(),
            TraversalOrder::PostOrder => self.to_string_post_order(),
        }
    }

    /// The bracketed form: every node is `{value}(left)[right]`, and an empty subtree is
    /// empty text between its brackets. An empty tree is the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::types::IntType;
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new(IntType);
    /// tree.load_traversal("2 1 3", Default::default()).unwrap();
    ///
    /// assert_eq!(tree.to_string_formatted(), "{2}({1}()[])[{3}()[]]");
    /// ```
    pub fn to_string_formatted(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<Step<'_, D::Value>> = self.root().map(Step::Open).into_iter().collect();
        while let Some(step) = stack.pop() {
            match step {
                Step::Text(text) => out.push_str(text),
                Step::Open(node) => {
                    out.push('{');
                    out.push_str(&self.descriptor.print(node.value()));
                    out.push_str("}(");
                    stack.push(Step::Text("]"));
                    stack.extend(node.right().map(Step::Open));
                    stack.push(Step::Text(")["));
                    stack.extend(node.left().map(Step::Open));
                }
            }
        }
        out
    }

    fn join<'a, I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = &'a D::Value>,
        D::Value: 'a,
    {
        values
            .into_iter()
            .map(|value| self.descriptor.print(value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replaces the contents of the tree with the whitespace-separated values of `text`,
    /// inserted left to right. Duplicates are skipped.
    ///
    /// `order` names the traversal that produced `text` but doesn't change how it is
    /// loaded: every order is rebuilt by sequential insertion.
    ///
    /// If a token fails to parse the tree is left empty.
    pub fn load_traversal(&mut self, text: &str, order: TraversalOrder) -> Result<(), ParseError> {
        self.clear();
        let values = self.parse_all(text.split_whitespace())?;
        debug!(%order, tokens = values.len(), "loading traversal string");
        self.insert_all(values);
        Ok(())
    }

    /// Replaces the contents of the tree with the values of a bracketed string, inserted in
    /// the order their `{...}` tokens appear. The bracket nesting is not used.
    ///
    /// If a token fails to parse the tree is left empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::types::IntType;
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new(IntType);
    /// tree.load_formatted("{2}({1}()[])[{3}()[]]").unwrap();
    ///
    /// assert_eq!(tree.to_string_pre_order(), "2 1 3");
    /// ```
    pub fn load_formatted(&mut self, text: &str) -> Result<(), ParseError> {
        self.clear();
        let values = self.parse_all(braced_tokens(text))?;
        debug!(tokens = values.len(), "loading formatted string");
        self.insert_all(values);
        Ok(())
    }

    /// Parses every token or none of them.
    fn parse_all<'t, I>(&self, tokens: I) -> Result<Vec<D::Value>, ParseError>
    where
        I: IntoIterator<Item = &'t str>,
    {
        let mut values = Vec::new();
        for token in tokens {
            match self.descriptor.parse(token) {
                Ok(value) => values.push(value),
                Err(err) => {
                    warn!(token, %err, "discarding load after parse failure");
                    for value in values {
                        self.descriptor.destroy(value);
                    }
                    return Err(err);
                }
            }
        }
        Ok(values)
    }

    fn insert_all(&mut self, values: Vec<D::Value>) {
        for value in values {
            self.insert(value);
        }
    }

    /// Every value paired with its parent's value, level by level. Only the root has no
    /// parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::types::IntType;
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new(IntType);
    /// tree.load_traversal("2 1 3", Default::default()).unwrap();
    ///
    /// assert_eq!(
    ///     tree.to_pair_list(),
    ///     vec![(&2, None), (&1, Some(&2)), (&3, Some(&2))]
    /// );
    /// ```
    pub fn to_pair_list(&self) -> Vec<(&D::Value, Option<&D::Value>)> {
        let mut out = Vec::with_capacity(self.len);
        let mut queue: VecDeque<(&Node<D::Value>, Option<&D::Value>)> =
            self.root().map(|root| (root, None)).into_iter().collect();
        while let Some((node, parent)) = queue.pop_front() {
            out.push((node.value(), parent));
            queue.extend(node.left().map(|left| (left, Some(node.value()))));
            queue.extend(node.right().map(|right| (right, Some(node.value()))));
        }
        out
    }

    /// Replaces the contents of the tree with the values of a pair list.
    ///
    /// Exactly one pair must have no parent. It is inserted first and the remaining values
    /// follow in list order. Parents only identify the root; placement always comes from
    /// the ordering, so the original shape comes back only when the list order rebuilds it
    /// (as the output of [`to_pair_list`](Self::to_pair_list) does).
    ///
    /// An empty list gives an empty tree. On error the tree is left empty.
    pub fn load_pair_list<I>(&mut self, pairs: I) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = (D::Value, Option<D::Value>)>,
    {
        self.clear();
        let pairs: Vec<_> = pairs.into_iter().collect();
        let roots = pairs.iter().filter(|(_, parent)| parent.is_none()).count();
        if roots != 1 && !pairs.is_empty() {
            let err = if roots == 0 {
                PairListError::MissingRoot
            } else {
                PairListError::AmbiguousRoot { count: roots }
            };
            warn!(pairs = pairs.len(), %err, "rejected pair list");
            for (value, parent) in pairs {
                self.descriptor.destroy(value);
                if let Some(parent) = parent {
                    self.descriptor.destroy(parent);
                }
            }
            return Err(err);
        }

        let total = pairs.len();
        let mut rest = Vec::with_capacity(total);
        for (value, parent) in pairs {
            match parent {
                None => {
                    self.insert(value);
                }
                Some(parent) => {
                    self.descriptor.destroy(parent);
                    rest.push(value);
                }
            }
        }
        debug!(pairs = total, "loading pair list");
        self.insert_all(rest);
        Ok(())
    }
}

/// The contents of every `{...}` in `text`, in order. An unclosed `{` ends the scan.
fn braced_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        tokens.push(after[..close].trim());
        rest = &after[close + 1..];
    }
    tokens
}
