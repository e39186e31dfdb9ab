//! The nested set container.
//!
//! Nodes are kept in a flat collection and positioned purely by their
//! `[left, right]` intervals. Every structural mutation renumbers the
//! intervals of the whole collection, so all public operations run under one
//! lock and never interleave.

use colored::Colorize;
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, debug_span, error};

use crate::{
    arena::{Arena, NodeKey},
    error::{NestedSetError, Result},
    id::{AtomicU64Generator, UniqueGenerator},
    node::{Coordinates, NestedNode},
    NodeBound,
};

pub(crate) struct Inner<N> {
    pub(crate) arena: Arena<N>,
    /// Collection order. Insertion order until a branch query sorts it by `left`.
    pub(crate) nodes: Vec<NodeKey>,
    pub(crate) root: NodeKey,
    idgen: AtomicU64Generator,
    last_id: u64,
}

/// A tree encoded as a nested set, guarded by a single mutex.
pub struct NestedSet<N>
where
    N: NestedNode,
{
    inner: Mutex<Inner<N>>,
}

impl<N> std::fmt::Debug for NestedSet<N>
where
    N: NestedNode + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("NestedSet")
            .field("root", &inner.root)
            .field("last_id", &inner.last_id)
            .field(
                "nodes",
                &inner
                    .nodes
                    .iter()
                    .map(|key| &inner.arena[*key])
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<N> NestedSet<N>
where
    N: NestedNode,
{
    /// Create a set holding only `root`, which is placed at `[0, 1]` on level 0.
    pub fn new(mut root: N) -> Self {
        root.set_coordinates(Coordinates::new(0, 0, 1));

        let mut arena = Arena::default();
        let root = arena.insert(root);

        debug!("Created nested set with root {}", root);

        Self {
            inner: Mutex::new(Inner {
                arena,
                nodes: Vec::from([root]),
                root,
                idgen: AtomicU64Generator::starting_at(1),
                last_id: 0,
            }),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Inner<N>> {
        self.inner.lock()
    }

    /// Key of the root node
    pub fn root(&self) -> NodeKey {
        self.inner.lock().root
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.inner.lock().nodes.len()
    }

    /// A set always holds its root, so this is never true
    pub fn is_empty(&self) -> bool {
        self.inner.lock().nodes.is_empty()
    }

    /// Number of successful additions so far
    pub fn last_id(&self) -> u64 {
        self.inner.lock().last_id
    }

    /// Identity membership test
    pub fn contains(&self, key: NodeKey) -> bool {
        self.inner.lock().exists(key)
    }

    /// Insert `node` as the last child of `parent`, or of the root when `parent` is `None`.
    pub fn add(&self, node: N, parent: Option<NodeKey>) -> Result<NodeKey> {
        let mut inner = self.inner.lock();
        debug_span!("add").in_scope(|| inner.add(node, parent))
    }

    /// Remove `key` together with its whole branch.
    ///
    /// Returns the removed nodes ordered by ascending `left`, carrying the
    /// coordinates they had before removal.
    pub fn delete(&self, key: NodeKey) -> Result<Vec<N>> {
        let mut inner = self.inner.lock();
        debug_span!("delete").in_scope(|| inner.delete(key))
    }

    /// Relocate `key` and its branch to become the last child of `parent`,
    /// or of the root when `parent` is `None`.
    pub fn move_to(&self, key: NodeKey, parent: Option<NodeKey>) -> Result<()> {
        let mut inner = self.inner.lock();
        debug_span!("move").in_scope(|| inner.move_to(key, parent))
    }

    /// The node one level up whose interval contains `key`
    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.inner.lock().parent_of(key)
    }

    /// First node in collection order carrying `id`
    pub fn find_by_id(&self, id: &N::Id) -> Option<NodeKey> {
        let inner = self.inner.lock();
        inner
            .nodes
            .iter()
            .copied()
            .find(|key| inner.arena[*key].id() == *id)
    }

    /// `key` and all its descendants, ascending by `left`. `None` returns the
    /// whole set. An unknown key yields an empty branch.
    ///
    /// Sorts the internal collection by `left` as a side effect.
    pub fn branch(&self, key: Option<NodeKey>) -> Vec<NodeKey> {
        self.inner.lock().branch(key)
    }

    /// Direct children of `key`, ascending by `left`
    pub fn children(&self, key: NodeKey) -> Vec<NodeKey> {
        let inner = self.inner.lock();
        let Some(target) = inner.coordinates(key) else {
            return Vec::new();
        };

        let mut children: Vec<(NodeBound, NodeKey)> = inner
            .nodes
            .iter()
            .map(|k| (inner.arena[*k].coordinates(), *k))
            .filter(|(c, _)| target.strictly_contains(c) && c.level == target.level + 1)
            .map(|(c, k)| (c.left, k))
            .collect();
        children.sort_unstable();
        children.into_iter().map(|(_, k)| k).collect()
    }

    /// Ancestors of `key` from the root down to its parent
    pub fn ancestors(&self, key: NodeKey) -> Vec<NodeKey> {
        let inner = self.inner.lock();
        let Some(target) = inner.coordinates(key) else {
            return Vec::new();
        };

        let mut ancestors: Vec<(NodeBound, NodeKey)> = inner
            .nodes
            .iter()
            .map(|k| (inner.arena[*k].coordinates(), *k))
            .filter(|(c, _)| c.strictly_contains(&target))
            .map(|(c, k)| (c.left, k))
            .collect();
        ancestors.sort_unstable();
        ancestors.into_iter().map(|(_, k)| k).collect()
    }

    /// True when `ancestor` is a proper ancestor of `descendant`
    pub fn is_ancestor(&self, ancestor: NodeKey, descendant: NodeKey) -> bool {
        let inner = self.inner.lock();
        match (inner.coordinates(ancestor), inner.coordinates(descendant)) {
            (Some(a), Some(d)) => a.strictly_contains(&d),
            _ => false,
        }
    }

    pub fn coordinates(&self, key: NodeKey) -> Option<Coordinates> {
        self.inner.lock().coordinates(key)
    }

    /// Calls the provided closure with a reference to the node
    pub fn with_node<R, F>(&self, key: NodeKey, f: F) -> Option<R>
    where
        F: FnOnce(&N) -> R,
    {
        let inner = self.inner.lock();
        inner.arena.get(key).map(f)
    }

    /// Calls the provided closure with a mutable reference to the node.
    ///
    /// Coordinates are owned by the set: any change the closure makes to them
    /// is reverted before the lock is released.
    pub fn with_node_mut<R, F>(&self, key: NodeKey, f: F) -> Option<R>
    where
        F: FnOnce(&mut N) -> R,
    {
        let mut inner = self.inner.lock();
        let node = inner.arena.get_mut(key)?;
        let coordinates = node.coordinates();
        let result = f(node);
        node.set_coordinates(coordinates);
        Some(result)
    }

    /// Clone of the node behind `key`
    pub fn node(&self, key: NodeKey) -> Option<N>
    where
        N: Clone,
    {
        self.with_node(key, N::clone)
    }

    /// Clone of every node in collection order
    pub fn nodes(&self) -> Vec<N>
    where
        N: Clone,
    {
        let inner = self.inner.lock();
        inner
            .nodes
            .iter()
            .map(|key| inner.arena[*key].clone())
            .collect()
    }

    /// Check every interval invariant of the set
    pub fn validate(&self) -> Result<()> {
        self.inner.lock().validate()
    }
}

impl<N> Inner<N>
where
    N: NestedNode,
{
    fn exists(&self, key: NodeKey) -> bool {
        self.arena.contains(key)
    }

    fn coordinates(&self, key: NodeKey) -> Option<Coordinates> {
        self.arena.get(key).map(|node| node.coordinates())
    }

    fn add(&mut self, mut node: N, parent: Option<NodeKey>) -> Result<NodeKey> {
        let parent = match parent {
            Some(parent) if !self.exists(parent) => {
                error!("Parent {} not found in structure", parent);
                return Err(NestedSetError::NotFound {
                    what: "parent node",
                });
            }
            Some(parent) => parent,
            None => self.root,
        };

        let target = self.arena[parent].coordinates();
        let right = target.right;

        node.set_coordinates(Coordinates::new(target.level + 1, right, right + 1));
        self.last_id = self.idgen.generate();

        debug!(
            "{} {} under {} at {}",
            "Widening".bright_green(),
            node.name(),
            parent,
            right
        );

        for key in &self.nodes {
            let n = &mut self.arena[*key];
            if n.right() >= right {
                n.set_right(n.right() + 2);
                if n.left() > right {
                    n.set_left(n.left() + 2);
                }
            }
        }

        let key = self.arena.insert(node);
        self.nodes.push(key);
        Ok(key)
    }

    fn delete(&mut self, key: NodeKey) -> Result<Vec<N>> {
        if key == self.root {
            error!("Refusing to delete the root node");
            return Err(NestedSetError::InvalidArgument("can't delete root node"));
        }

        let Some(target) = self.coordinates(key) else {
            error!("Node {} not found in structure", key);
            return Err(NestedSetError::NotFound { what: "node" });
        };
        let width = target.width();

        debug!(
            "{} {} width {}",
            "Closing".bright_red(),
            target,
            width
        );

        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.nodes.len());

        for k in std::mem::take(&mut self.nodes) {
            let n = &mut self.arena[k];
            if target.contains(&n.coordinates()) {
                removed.push((n.left(), k));
                continue;
            }

            if n.right() > target.right {
                n.set_right(n.right() - width);
            }
            if n.left() > target.left {
                n.set_left(n.left() - width);
            }
            kept.push(k);
        }

        self.nodes = kept;

        removed.sort_unstable();
        debug!("Removed {} nodes", removed.len());

        Ok(removed
            .into_iter()
            .filter_map(|(_, k)| self.arena.remove(k))
            .collect())
    }

    fn move_to(&mut self, key: NodeKey, parent: Option<NodeKey>) -> Result<()> {
        let Some(source) = self.coordinates(key) else {
            error!("Node {} not found in structure", key);
            return Err(NestedSetError::NotFound { what: "node" });
        };

        if source.level == 0 {
            error!("Refusing to move the root node");
            return Err(NestedSetError::InvalidArgument("can't move root node"));
        }

        let parent = match parent {
            Some(parent) if !self.exists(parent) => {
                error!("Parent {} not found in structure", parent);
                return Err(NestedSetError::NotFound {
                    what: "parent node",
                });
            }
            Some(parent) => parent,
            None => self.root,
        };
        let dest = self.arena[parent].coordinates();

        if source.contains(&dest) {
            error!("Refusing to move {} into its own branch", key);
            return Err(NestedSetError::InvalidArgument(
                "can't move branch to node within itself",
            ));
        }

        let Some(current) = self.parent_of(key) else {
            error!("No parent found for {}", key);
            return Err(NestedSetError::BrokenStructure(format!(
                "parent of node {key} not found"
            )));
        };
        if current == parent {
            return Err(NestedSetError::NotImplemented(
                "moving in same branch not implemented",
            ));
        }

        // The branch lands just before the destination's right bound.
        let skew_tree = source.width();
        let skew_level = dest.level - source.level + 1;
        let right_near = dest.right - 1;
        let is_up = right_near < source.right;

        // Branch membership has to be captured before any coordinate shifts.
        let branch = self.branch_of(&source);

        let skew_edit = if is_up {
            // Everything in [dest.right, source.left) slides right to open the gap.
            let shift = |v: NodeBound| v > right_near && v < source.left;
            for k in &self.nodes {
                let n = &mut self.arena[*k];
                if shift(n.right()) {
                    n.set_right(n.right() + skew_tree);
                }
                if shift(n.left()) {
                    n.set_left(n.left() + skew_tree);
                }
            }
            dest.right - source.left
        } else {
            // Everything in (source.right, dest.right) slides left over the vacated span.
            let shift = |v: NodeBound| v > source.right && v <= right_near;
            for k in &self.nodes {
                let n = &mut self.arena[*k];
                if shift(n.right()) {
                    n.set_right(n.right() - skew_tree);
                }
                if shift(n.left()) {
                    n.set_left(n.left() - skew_tree);
                }
            }
            right_near - source.right
        };

        debug!(
            "{} {} {} by {} level {:+} ({} nodes)",
            "Moving".bright_purple(),
            if is_up { "up" } else { "down" },
            source,
            skew_edit,
            skew_level,
            branch.len()
        );

        for k in branch {
            let n = &mut self.arena[k];
            n.set_left(n.left() + skew_edit);
            n.set_right(n.right() + skew_edit);
            n.set_level(n.level() + skew_level);
        }

        Ok(())
    }

    pub(crate) fn parent_of(&self, key: NodeKey) -> Option<NodeKey> {
        let target = self.coordinates(key)?;
        self.nodes.iter().copied().find(|k| {
            let c = self.arena[*k].coordinates();
            c.contains(&target) && c.level == target.level - 1
        })
    }

    /// Keys whose interval lies within `target`, in collection order
    fn branch_of(&self, target: &Coordinates) -> Vec<NodeKey> {
        self.nodes
            .iter()
            .copied()
            .filter(|k| target.contains(&self.arena[*k].coordinates()))
            .collect()
    }

    pub(crate) fn sort(&mut self) {
        let arena = &self.arena;
        self.nodes.sort_by_key(|k| arena[*k].left());
    }

    fn branch(&mut self, key: Option<NodeKey>) -> Vec<NodeKey> {
        self.sort();

        match key {
            None => self.nodes.clone(),
            Some(key) => match self.coordinates(key) {
                Some(target) => self.branch_of(&target),
                None => Vec::new(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        let broken = |reason: String| Err(NestedSetError::BrokenStructure(reason));

        let Some(root) = self.coordinates(self.root) else {
            return broken("root node missing".into());
        };
        if root.level != 0 || root.left != 0 {
            return broken(format!("root sits at level {} {}", root.level, root));
        }

        let mut ordered: Vec<Coordinates> = Vec::with_capacity(self.nodes.len());
        let mut bounds: Vec<NodeBound> = Vec::with_capacity(self.nodes.len() * 2);
        for k in &self.nodes {
            let c = self.arena[*k].coordinates();
            if c.left >= c.right {
                return broken(format!("empty interval {c}"));
            }
            bounds.push(c.left);
            bounds.push(c.right);
            ordered.push(c);
        }

        bounds.sort_unstable();
        if let Some((expected, found)) = bounds
            .iter()
            .enumerate()
            .find(|(i, b)| **b != *i as NodeBound)
        {
            return broken(format!("expected bound {expected}, found {found}"));
        }

        ordered.sort_unstable_by_key(|c| c.left);

        // Open intervals enclosing the current node, outermost first
        let mut open: Vec<Coordinates> = Vec::new();
        for (i, c) in ordered.iter().enumerate() {
            while open.last().is_some_and(|o| o.right < c.left) {
                open.pop();
            }
            if let Some(enclosing) = open.last() {
                if enclosing.right < c.right {
                    return broken(format!("{enclosing} partially overlaps {c}"));
                }
            } else if i > 0 {
                return broken(format!("second root at {c}"));
            }
            if c.level != open.len() as i64 {
                return broken(format!(
                    "{c} has level {} but {} ancestors",
                    c.level,
                    open.len()
                ));
            }
            open.push(*c);
        }

        Ok(())
    }
}
