//! The value catalog: maps type names to descriptors and hides the value type behind
//! [`DynTree`] so trees of different types can live side by side in one
//! [`Session`](crate::Session).

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use crate::codec::TraversalOrder;
use crate::descriptor::Descriptor;
use crate::error::{CatalogError, CommandError, ParseError};
use crate::tree::Tree;
use crate::types::{ComplexType, DoubleType, FunctionType, IntType, PersonType, StringType};

/// Marks the missing parent of the root in a textual pair list.
pub const NULL_PARENT: &str = "NULL";

/// The types the catalog knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// [`IntType`]
    Int,
    /// [`DoubleType`]
    Double,
    /// [`ComplexType`]
    Complex,
    /// [`StringType`]
    String,
    /// [`FunctionType`]
    Function,
    /// [`PersonType`]
    Person,
}

impl TypeName {
    /// Every registered type.
    pub const ALL: [TypeName; 6] = [
        Self::Int,
        Self::Double,
        Self::Complex,
        Self::String,
        Self::Function,
        Self::Person,
    ];

    /// The registered name, e.g. `INT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => IntType.name(),
            Self::Double => DoubleType.name(),
            Self::Complex => ComplexType.name(),
            Self::String => StringType.name(),
            Self::Function => FunctionType.name(),
            Self::Person => PersonType.name(),
        }
    }

    /// An empty tree bound to this type's descriptor.
    pub fn new_tree(self) -> Box<dyn DynTree> {
        match self {
            Self::Int => Box::new(Tree::new(IntType)),
            Self::Double => Box::new(Tree::new(DoubleType)),
            Self::Complex => Box::new(Tree::new(ComplexType)),
            Self::String => Box::new(Tree::new(StringType)),
            Self::Function => Box::new(Tree::new(FunctionType)),
            Self::Person => Box::new(Tree::new(PersonType)),
        }
    }
}

impl FromStr for TypeName {
    type Err = CatalogError;

    /// Looks a type up by its registered name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CatalogError::UnknownType(s.to_owned()))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A [`Tree`] with its value type erased. Values go in and come out as text, parsed and
/// printed by the tree's own descriptor.
pub trait DynTree {
    /// Name of the value type.
    fn type_name(&self) -> &'static str;

    /// Number of values.
    fn size(&self) -> usize;

    /// Parses `token` and inserts it. `Ok(false)` means it was already present.
    fn insert_token(&mut self, token: &str) -> Result<bool, ParseError>;

    /// Parses `token` and looks it up.
    fn contains_token(&self, token: &str) -> Result<bool, ParseError>;

    /// Parses `token` and removes it. `Ok(false)` means it wasn't present.
    fn remove_token(&mut self, token: &str) -> Result<bool, ParseError>;

    /// A traversal string.
    fn traversal(&self, order: TraversalOrder) -> String;

    /// The bracketed form.
    fn formatted(&self) -> String;

    /// The ASCII drawing.
    fn drawing(&self) -> String;

    /// One `value - parent` line per node, level by level, with [`NULL_PARENT`] for the
    /// root's parent.
    fn pair_lines(&self) -> Vec<String>;

    /// See [`Tree::balance`].
    fn rebalance(&mut self);

    /// See [`Tree::load_traversal`].
    fn load_traversal_text(&mut self, text: &str, order: TraversalOrder) -> Result<(), ParseError>;

    /// See [`Tree::load_formatted`].
    fn load_formatted_text(&mut self, text: &str) -> Result<(), ParseError>;

    /// Loads `(value, parent)` token pairs, [`NULL_PARENT`] marking the root. Every token is
    /// parsed before anything is inserted; on any error the tree is left empty.
    fn load_pair_tokens(&mut self, pairs: &[(&str, &str)]) -> Result<(), CommandError>;

    /// Copies the subtree rooted at `token`, or `Ok(None)` if it isn't present.
    fn subtree_token(&self, token: &str) -> Result<Option<Box<dyn DynTree>>, ParseError>;

    /// The printed value at the end of `path`. See [`Tree::find_by_path`].
    fn path_value(&self, path: &str) -> Option<String>;

    /// Merges `other` into this tree. Both must hold the same value type.
    fn merge_from(&mut self, other: &dyn DynTree) -> Result<usize, CommandError>;

    /// Whether `other` appears in this tree. Both must hold the same value type.
    fn contains_subtree_of(&self, other: &dyn DynTree) -> Result<bool, CommandError>;

    /// For downcasting to the concrete tree.
    fn as_any(&self) -> &dyn Any;
}

impl<D> Tree<D>
where
    D: Descriptor + 'static,
    D::Value: 'static,
{
    fn same_type<'a>(&self, other: &'a dyn DynTree) -> Result<&'a Tree<D>, CommandError> {
        other
            .as_any()
            .downcast_ref::<Tree<D>>()
            .ok_or_else(|| CommandError::TypeMismatch {
                left: self.descriptor.name(),
                right: other.type_name(),
            })
    }
}

impl<D> DynTree for Tree<D>
where
    D: Descriptor + Clone + 'static,
    D::Value: 'static,
{
    fn type_name(&self) -> &'static str {
        self.descriptor.name()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn insert_token(&mut self, token: &str) -> Result<bool, ParseError> {
        let value = self.descriptor.parse(token)?;
        Ok(self.insert(value))
    }

    fn contains_token(&self, token: &str) -> Result<bool, ParseError> {
        let key = self.descriptor.parse(token)?;
        let found = self.contains(&key);
        self.descriptor.destroy(key);
        Ok(found)
    }

    fn remove_token(&mut self, token: &str) -> Result<bool, ParseError> {
        let key = self.descriptor.parse(token)?;
        let removed = self.remove(&key);
        self.descriptor.destroy(key);
        Ok(removed)
    }

    fn traversal(&self, order: TraversalOrder) -> String {
        self.to_traversal_string(order)
    }

    fn formatted(&self) -> String {
        self.to_string_formatted()
    }

    fn drawing(&self) -> String {
        self.pretty()
    }

    fn pair_lines(&self) -> Vec<String> {
        self.to_pair_list()
            .into_iter()
            .map(|(value, parent)| {
                let parent = parent.map_or_else(
                    || NULL_PARENT.to_owned(),
                    |parent| self.descriptor.print(parent),
                );
                format!("{} - {}", self.descriptor.print(value), parent)
            })
            .collect()
    }

    fn rebalance(&mut self) {
        self.balance();
    }

    fn load_traversal_text(&mut self, text: &str, order: TraversalOrder) -> Result<(), ParseError> {
        self.load_traversal(text, order)
    }

    fn load_formatted_text(&mut self, text: &str) -> Result<(), ParseError> {
        self.load_formatted(text)
    }

    fn load_pair_tokens(&mut self, pairs: &[(&str, &str)]) -> Result<(), CommandError> {
        self.clear();
        let mut parsed = Vec::with_capacity(pairs.len());
        for &(value, parent) in pairs {
            let pair = self.descriptor.parse(value).and_then(|value| {
                if parent == NULL_PARENT {
                    return Ok((value, None));
                }
                match self.descriptor.parse(parent) {
                    Ok(parent) => Ok((value, Some(parent))),
                    Err(err) => {
                        self.descriptor.destroy(value);
                        Err(err)
                    }
                }
            });
            match pair {
                Ok(pair) => parsed.push(pair),
                Err(err) => {
                    for (value, parent) in parsed {
                        self.descriptor.destroy(value);
                        if let Some(parent) = parent {
                            self.descriptor.destroy(parent);
                        }
                    }
                    return Err(err.into());
                }
            }
        }
        self.load_pair_list(parsed)?;
        Ok(())
    }

    fn subtree_token(&self, token: &str) -> Result<Option<Box<dyn DynTree>>, ParseError> {
        let key = self.descriptor.parse(token)?;
        let sub = self.subtree(&key);
        self.descriptor.destroy(key);
        Ok(sub.map(|sub| Box::new(sub) as Box<dyn DynTree>))
    }

    fn path_value(&self, path: &str) -> Option<String> {
        self.find_by_path(path)
            .map(|value| self.descriptor.print(value))
    }

    fn merge_from(&mut self, other: &dyn DynTree) -> Result<usize, CommandError> {
        let other = self.same_type(other)?;
        Ok(self.merge(other))
    }

    fn contains_subtree_of(&self, other: &dyn DynTree) -> Result<bool, CommandError> {
        let other = self.same_type(other)?;
        Ok(self.contains_subtree(other))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
