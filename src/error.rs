//! Error types, one per boundary: descriptors, pair lists, the catalog and the command
//! session.
//!
//! Duplicate keys and missing keys are not errors here. The engine reports those as `bool`
//! or `Option` results.

use thiserror::Error;

/// Raised by a [`Descriptor`](crate::Descriptor) when text cannot be turned into a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// There was nothing to parse.
    #[error("empty {kind} literal")]
    Empty {
        /// The kind of value being parsed.
        kind: &'static str,
    },

    /// The text is not a number of the requested kind.
    #[error("invalid {kind} literal `{text}`")]
    InvalidNumber {
        /// The kind of value being parsed.
        kind: &'static str,
        /// The offending text.
        text: String,
    },

    /// The text is a number that doesn't fit the requested kind.
    #[error("{kind} literal `{text}` is out of range")]
    OutOfRange {
        /// The kind of value being parsed.
        kind: &'static str,
        /// The offending text.
        text: String,
    },

    /// NaN has no place in a total order.
    #[error("`{0}` is not a number")]
    NotANumber(String),

    /// A complex literal that isn't `re`, `im i` or `re+im i`.
    #[error("malformed complex literal `{0}`")]
    MalformedComplex(String),

    /// A function identifier that isn't registered.
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
}

/// Why a pair list could not be loaded. The tree is left empty in both cases.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairListError {
    /// No pair has an empty parent.
    #[error("pair list has no root entry")]
    MissingRoot,

    /// More than one pair has an empty parent.
    #[error("pair list has {count} root entries")]
    AmbiguousRoot {
        /// How many pairs claimed to be the root.
        count: usize,
    },
}

/// Raised by the value catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The type name isn't registered.
    #[error("Unknown type")]
    UnknownType(String),
}

/// Everything that can go wrong while running one command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command word isn't recognised.
    #[error("Unknown command")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// No tree has been created or selected yet.
    #[error("No tree selected")]
    NoTreeSelected,

    /// The named tree doesn't exist.
    #[error("No such tree")]
    NoSuchTree(String),

    /// `PRINT` or `LOAD STR` with an order that isn't recognised.
    #[error("Unknown order")]
    UnknownOrder(String),

    /// `LOAD` with a source that isn't `STR`, `FORM` or `PAIRS`.
    #[error("Unknown load source")]
    UnknownSource(String),

    /// A pair count that isn't a non-negative integer.
    #[error("Invalid pair count `{0}`")]
    InvalidCount(String),

    /// The key is not in the current tree.
    #[error("Not found {0}")]
    NotFound(String),

    /// Two trees with different value types were combined.
    #[error("Type mismatch: {left} and {right}")]
    TypeMismatch {
        /// The current tree's type.
        left: &'static str,
        /// The other tree's type.
        right: &'static str,
    },

    /// A token could not be parsed by the current tree's descriptor.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A pair list was rejected.
    #[error("Bad pair list: {0}")]
    PairList(#[from] PairListError),

    /// The catalog doesn't know the type.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
