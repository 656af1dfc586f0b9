//! ASCII drawing of a tree, one row per level with `/` and `\` connectors between rows.
//!
//! The drawing is `2^height - 1` columns of padding wide, so it is only useful for small
//! trees. Trees taller than [`MAX_DRAW_HEIGHT`] get a one-line placeholder instead.

use std::fmt::{self, Write};

use crate::descriptor::Descriptor;
use crate::node::Node;
use crate::tree::Tree;

/// The tallest tree that is drawn in full. Rows are `2^height - 1` columns wide.
pub const MAX_DRAW_HEIGHT: usize = 16;

impl<D: Descriptor> Tree<D> {
    /// Draws the tree. An empty tree is drawn as `(empty)`, and a tree taller than
    /// [`MAX_DRAW_HEIGHT`] as `(too tall to draw: height N)`. Balancing usually brings it
    /// back in range.
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
    /// assert_eq!(tree.pretty(), "\n 2  \n/  \\ \n1 3 \n\n");
    /// assert_eq!(Tree::new(IntType).pretty(), "(empty)\n");
    /// ```
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        // Writing to a `String` can't fail.
        let _ = self.write_pretty(&mut out);
        out
    }

    /// Draws the tree into `out`. See [`pretty`](Self::pretty).
    pub fn write_pretty<W: Write>(&self, out: &mut W) -> fmt::Result {
        let Some(root) = self.root() else {
            return out.write_str("(empty)\n");
        };
        out.write_char('\n')?;

        let height = self.height();
        if height > MAX_DRAW_HEIGHT {
            return writeln!(out, "(too tall to draw: height {})", height);
        }
        let max_width = u32::try_from(height)
            .ok()
            .and_then(|h| 1usize.checked_shl(h))
            .map_or(usize::MAX, |w| w - 1);

        let mut current: Vec<Option<&Node<D::Value>>> = vec![Some(root)];
        let mut next = Vec::new();
        for _ in 0..height {
            let spacing = max_width / current.len();
            for slot in &current {
                pad(out, spacing / 2)?;
                match slot {
                    Some(node) => {
                        out.write_str(&self.descriptor.print(node.value()))?;
                        next.push(node.left());
                        next.push(node.right());
                    }
                    None => {
                        out.write_char(' ')?;
                        next.push(None);
                        next.push(None);
                    }
                }
                pad(out, spacing - spacing / 2)?;
            }
            out.write_char('\n')?;

            if next.iter().all(Option::is_none) {
                break;
            }

            for pair in next.chunks(2) {
                pad(out, (spacing / 2).saturating_sub(1))?;
                out.write_char(if pair[0].is_some() { '/' } else { ' ' })?;
                out.write_str("  ")?;
                let right = pair.get(1).map_or(false, Option::is_some);
                out.write_char(if right { '\\' } else { ' ' })?;
                pad(out, (spacing - spacing / 2).saturating_sub(1))?;
            }
            out.write_char('\n')?;

            current = std::mem::take(&mut next);
        }
        out.write_char('\n')
    }
}

fn pad<W: Write>(out: &mut W, width: usize) -> fmt::Result {
    (0..width).try_for_each(|_| out.write_char(' '))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::types::IntType;
    use crate::Tree;

    #[test]
    fn empty_marker() {
        assert_eq!(Tree::new(IntType).pretty(), "(empty)\n");
    }

    #[test]
    fn single_node() {
        let mut tree = Tree::new(IntType);
        tree.insert(7);

        assert_eq!(tree.pretty(), "\n7 \n\n");
    }

    #[test]
    fn missing_children_leave_gaps() {
        let mut tree = Tree::new(IntType);
        for x in [4, 2, 6, 5] {
            tree.insert(x);
        }

        let expected = concat!(
            "\n",
            "   4    \n",
            "  /  \\   \n",
            " 2   6  \n",
            "     /    \n",
            "    5   \n",
            "\n",
        );
        assert_eq!(tree.pretty(), expected);
    }

    #[test]
    fn full_tree() {
        let mut tree = Tree::new(IntType);
        for x in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert(x);
        }

        let expected = concat!(
            "\n",
            "   5    \n",
            "  /  \\   \n",
            " 3   8  \n",
            "/  \\ /  \\ \n",
            "1 4 7 9 \n",
            "\n",
        );
        assert_eq!(tree.pretty(), expected);
    }

    #[test]
    fn deep_chain_gets_placeholder() {
        let mut tree = Tree::new(IntType);
        for x in 0..64 {
            tree.insert(x);
        }

        assert_eq!(tree.pretty(), "(too tall to draw: height 64)\n");

        tree.balance();
        assert!(tree.pretty().starts_with('\n'));
    }

    #[test]
    fn write_pretty_into_any_writer() {
        let mut tree = Tree::new(IntType);
        tree.insert(1);

        let mut out = String::from(">");
        tree.write_pretty(&mut out).unwrap();
        assert_eq!(out, ">\n1 \n\n");
    }
}
