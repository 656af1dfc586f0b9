//! A line-oriented command shell over named trees.
//!
//! A [`Session`] holds any number of named trees of any catalog type and a current
//! selection. Each call to [`Session::execute`] runs one command line and returns the reply
//! text. Failures come back as [`CommandError`]s and leave the session usable.
//!
//! # Examples
//!
//! ```
//! use bstree::Session;
//!
//! let mut session = Session::new();
//! let mut run = |line: &str| match session.execute(line) {
//!     Ok(reply) => reply.unwrap_or_default(),
//!     Err(err) => err.to_string(),
//! };
//!
//! assert_eq!(run("CREATE nums INT"), "Created nums");
//! assert_eq!(run("LOAD STR IN 5 3 8"), "Loaded from str");
//! assert_eq!(run("INSERT 3"), "Exists 3");
//! assert_eq!(run("PRINT PRE"), "5 3 8");
//! assert_eq!(run("PATH L"), "3");
//! assert_eq!(run("SELECT other"), "No such tree");
//! ```

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::catalog::{DynTree, TypeName};
use crate::codec::TraversalOrder;
use crate::error::CommandError;

/// Suffix of the tree created by `SUBTREE`.
const SUBTREE_SUFFIX: &str = "_sub";

/// `LOAD PAIRS n` waiting for the rest of its `2n` tokens.
#[derive(Debug)]
struct PendingPairs {
    tree: String,
    expected: usize,
    tokens: Vec<String>,
}

/// Named trees plus the current selection.
#[derive(Default)]
pub struct Session {
    trees: BTreeMap<String, Box<dyn DynTree>>,
    current: Option<String>,
    pending: Option<PendingPairs>,
}

impl Session {
    /// A session with no trees.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the selected tree, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The tree called `name`.
    pub fn tree(&self, name: &str) -> Option<&dyn DynTree> {
        self.trees.get(name).map(|tree| &**tree)
    }

    /// Whether a `LOAD PAIRS` is still collecting tokens from following lines.
    pub fn awaiting_pairs(&self) -> bool {
        self.pending.is_some()
    }

    /// Runs one command line. Returns `Ok(None)` for a blank line and for lines consumed by
    /// an unfinished `LOAD PAIRS`.
    pub fn execute(&mut self, line: &str) -> Result<Option<String>, CommandError> {
        if let Some(mut pending) = self.pending.take() {
            pending
                .tokens
                .extend(line.split_whitespace().map(str::to_owned));
            return self.finish_pairs(pending);
        }

        let (command, rest) = split_word(line);
        if command.is_empty() {
            return Ok(None);
        }
        debug!(command, "executing command");

        let reply = match command.to_ascii_uppercase().as_str() {
            "CREATE" => self.create(rest)?,
            "SELECT" => self.select(rest)?,
            "INSERT" => {
                let token = argument(rest, "value")?;
                let inserted = self.current_mut()?.insert_token(token)?;
                format!("{} {}", if inserted { "Inserted" } else { "Exists" }, token)
            }
            "SEARCH" => {
                let token = argument(rest, "value")?;
                let found = self.current_ref()?.contains_token(token)?;
                format!("{} {}", if found { "Found" } else { "Not found" }, token)
            }
            "REMOVE" => {
                let token = argument(rest, "value")?;
                let removed = self.current_mut()?.remove_token(token)?;
                format!("{} {}", if removed { "Removed" } else { "No such" }, token)
            }
            "PRINT" => self.print(rest)?,
            "PAIRS" => self.current_ref()?.pair_lines().join("\n"),
            "BALANCE" => {
                self.current_mut()?.rebalance();
                "Balanced".to_owned()
            }
            "LOAD" => return self.load(rest),
            "MERGE" => self.merge(rest)?,
            "SUBTREE" => self.subtree(rest)?,
            "CONTAINS" => {
                let other = argument(rest, "tree")?;
                let other = self.named(other)?;
                if self.current_ref()?.contains_subtree_of(other)? {
                    "Yes".to_owned()
                } else {
                    "No".to_owned()
                }
            }
            "PATH" => {
                let (path, _) = split_word(rest);
                self.current_ref()?
                    .path_value(path)
                    .unwrap_or_else(|| "No node".to_owned())
            }
            _ => return Err(CommandError::UnknownCommand(command.to_owned())),
        };
        Ok(Some(reply))
    }

    fn create(&mut self, rest: &str) -> Result<String, CommandError> {
        let (name, rest) = split_word(rest);
        if name.is_empty() {
            return Err(CommandError::MissingArgument("name"));
        }
        let type_name: TypeName = argument(rest, "type")?.parse()?;

        debug!(name, %type_name, "creating tree");
        self.trees.insert(name.to_owned(), type_name.new_tree());
        self.current = Some(name.to_owned());
        Ok(format!("Created {}", name))
    }

    fn select(&mut self, rest: &str) -> Result<String, CommandError> {
        let name = argument(rest, "name")?;
        self.named(name)?;
        self.current = Some(name.to_owned());
        Ok(format!("Selected {}", name))
    }

    fn print(&self, rest: &str) -> Result<String, CommandError> {
        let (order, _) = split_word(rest);
        let tree = self.current_ref()?;
        let text = match order.to_ascii_uppercase().as_str() {
            "FORM" => tree.formatted(),
            "TREE" => tree.drawing().trim_end_matches('\n').to_owned(),
            _ => {
                let order: TraversalOrder = order
                    .parse()
                    .map_err(CommandError::UnknownOrder)?;
                tree.traversal(order)
            }
        };
        Ok(text)
    }

    fn load(&mut self, rest: &str) -> Result<Option<String>, CommandError> {
        let (source, rest) = split_word(rest);
        match source.to_ascii_uppercase().as_str() {
            "STR" => {
                let (order, text) = split_word(rest);
                let order: TraversalOrder = order
                    .parse()
                    .map_err(CommandError::UnknownOrder)?;
                self.current_mut()?.load_traversal_text(text, order)?;
                Ok(Some("Loaded from str".to_owned()))
            }
            "FORM" => {
                self.current_mut()?.load_formatted_text(rest)?;
                Ok(Some("Loaded formatted".to_owned()))
            }
            "PAIRS" => {
                let (count, rest) = split_word(rest);
                let expected: usize = count
                    .parse()
                    .map_err(|_| CommandError::InvalidCount(count.to_owned()))?;
                let tree = self.current_name()?.to_owned();
                let pending = PendingPairs {
                    tree,
                    expected,
                    tokens: rest.split_whitespace().map(str::to_owned).collect(),
                };
                self.finish_pairs(pending)
            }
            "" => Err(CommandError::MissingArgument("source")),
            _ => Err(CommandError::UnknownSource(source.to_owned())),
        }
    }

    /// Loads the pairs once all `2n` tokens have arrived, otherwise parks them.
    fn finish_pairs(&mut self, pending: PendingPairs) -> Result<Option<String>, CommandError> {
        let needed = pending.expected.saturating_mul(2);
        if pending.tokens.len() < needed {
            debug!(
                have = pending.tokens.len(),
                need = needed,
                "waiting for more pair tokens"
            );
            self.pending = Some(pending);
            return Ok(None);
        }
        if pending.tokens.len() > needed {
            warn!(
                extra = pending.tokens.len() - needed,
                "ignoring tokens after the last pair"
            );
        }

        let pairs: Vec<(&str, &str)> = pending
            .tokens
            .chunks_exact(2)
            .take(pending.expected)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
            .collect();
        let tree = self
            .trees
            .get_mut(&pending.tree)
            .ok_or_else(|| CommandError::NoSuchTree(pending.tree.clone()))?;
        tree.load_pair_tokens(&pairs)?;
        Ok(Some("Loaded pairs".to_owned()))
    }

    fn merge(&mut self, rest: &str) -> Result<String, CommandError> {
        let other = argument(rest, "tree")?;
        let current = self.current_name()?.to_owned();
        if other == current {
            return Ok(format!("Merged {}", other));
        }
        self.named(other)?;

        // Take the current tree out so it can be mutated while the other one is borrowed.
        let mut tree = self
            .trees
            .remove(&current)
            .ok_or_else(|| CommandError::NoSuchTree(current.clone()))?;
        let merged = self.named(other).and_then(|other| tree.merge_from(other));
        self.trees.insert(current, tree);
        let added = merged?;

        debug!(other, added, "merged trees");
        Ok(format!("Merged {}", other))
    }

    fn subtree(&mut self, rest: &str) -> Result<String, CommandError> {
        let token = argument(rest, "value")?;
        let current = self.current_name()?;
        let name = format!("{}{}", current, SUBTREE_SUFFIX);
        let sub = self
            .current_ref()?
            .subtree_token(token)?
            .ok_or_else(|| CommandError::NotFound(token.to_owned()))?;

        self.trees.insert(name.clone(), sub);
        Ok(format!("Subtree {}", name))
    }

    fn named(&self, name: &str) -> Result<&dyn DynTree, CommandError> {
        self.tree(name)
            .ok_or_else(|| CommandError::NoSuchTree(name.to_owned()))
    }

    fn current_name(&self) -> Result<&str, CommandError> {
        self.current.as_deref().ok_or(CommandError::NoTreeSelected)
    }

    fn current_ref(&self) -> Result<&dyn DynTree, CommandError> {
        self.named(self.current_name()?)
    }

    fn current_mut(&mut self) -> Result<&mut dyn DynTree, CommandError> {
        let name = self.current.as_deref().ok_or(CommandError::NoTreeSelected)?;
        match self.trees.get_mut(name) {
            Some(tree) => Ok(&mut **tree),
            None => Err(CommandError::NoSuchTree(name.to_owned())),
        }
    }
}

/// Splits off the first whitespace-separated word. The remainder keeps its leading
/// whitespace.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => text.split_at(end),
        None => (text, ""),
    }
}

/// The first word of `rest`, which must be there.
fn argument<'a>(rest: &'a str, name: &'static str) -> Result<&'a str, CommandError> {
    match split_word(rest).0 {
        "" => Err(CommandError::MissingArgument(name)),
        word => Ok(word),
    }
}
