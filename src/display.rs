use std::fmt::Write;

use crate::{node::NestedNode, NestedSet};

const COLUMN_WIDTH: usize = 2;

/// Renders the tree in interval order, one `name [left, right]` per line
impl<N> std::fmt::Display for NestedSet<N>
where
    N: NestedNode,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();

        let mut nodes: Vec<&N> = inner.nodes.iter().map(|key| &inner.arena[*key]).collect();
        nodes.sort_unstable_by_key(|node| node.left());

        let mut iter = nodes.into_iter().peekable();
        let mut root_children = false;

        while let Some(node) = iter.next() {
            let coordinates = node.coordinates();
            let depth = coordinates.level.max(0) as usize;

            // Peek at the next node to see if there are siblings
            let has_siblings = iter
                .peek()
                .is_some_and(|next| next.level() == coordinates.level);
            let has_children = !coordinates.is_leaf();

            if depth == 0 {
                root_children = has_children;
                if has_children {
                    f.write_char('┏')?;
                } else {
                    f.write_char('━')?;
                }
            } else {
                for i in 0..depth * COLUMN_WIDTH {
                    if i % COLUMN_WIDTH == 0 {
                        f.write_char('┃')?;
                    } else {
                        f.write_char(' ')?;
                    }
                }

                if has_children || has_siblings {
                    f.write_char('┣')?;
                } else {
                    f.write_char('┗')?;
                }
            }

            writeln!(f, "{} {}", node.name(), coordinates)?;
        }

        if root_children {
            f.write_char('┗')?;
        }
        Ok(())
    }
}
