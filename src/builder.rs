//! Builders for composing a nested set from closures.
//!
//! The `NestedSetBuilder` and `NodeBuilder` types build a whole tree in one
//! expression. Each node is added through [`NestedSet::add`], so the result
//! carries exactly the coordinates a sequence of manual additions would.
//!

use std::marker::PhantomData;

use tracing::{debug, debug_span};

use crate::{node::NestedNode, NestedSet, NestedSetError, NodeKey};

/// A builder for adding children under one node of the set.
///
/// It is handed to the closures passed to [`NestedSetBuilder::root`] and
/// [`NodeBuilder::child`].
pub struct NodeBuilder<'a, N, E>
where
    N: NestedNode,
{
    set: &'a NestedSet<N>,
    // Key of the node children are added to
    key: NodeKey,
    _phantom: PhantomData<E>,
}

impl<'a, N, E> NodeBuilder<'a, N, E>
where
    N: NestedNode,
    E: From<NestedSetError>,
{
    fn new(set: &'a NestedSet<N>, key: NodeKey) -> Self {
        Self {
            set,
            key,
            _phantom: PhantomData,
        }
    }

    /// Adds a child to the current node.
    ///
    /// # Arguments
    ///
    /// * `node`: The node to append as the last child.
    /// * `f`: A closure that takes the child builder and adds its own children.
    pub fn child<F>(&mut self, node: N, f: F) -> Result<NodeKey, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, N, E>) -> Result<(), E>,
    {
        let key = self.set.add(node, Some(self.key))?;

        let mut node_builder = NodeBuilder::new(self.set, key);

        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut node_builder)?;

        Ok(key)
    }

    /// Key of the node this builder adds children to
    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn set(&self) -> &NestedSet<N> {
        self.set
    }
}

/// A builder for constructing nested sets.
///
/// The `root` method seeds the set with its root node and calls the provided
/// closure with a [`NodeBuilder`] used to recursively add children. The
/// closures return `Result<(), E>` where E is your error type, which must be
/// constructible from [`NestedSetError`].
///
/// # Examples
///
/// ```
/// use nestedset::{node::simple::Node, NestedSetBuilder, NestedSetError};
///
/// let set = NestedSetBuilder::<Node<u64>, NestedSetError>::new()
///     .root(Node::new(0, "root"), |root| {
///         root.child(Node::new(1, "child"), |_| Ok(()))?;
///         Ok(())
///     })
///     .and_then(|builder| builder.done())
///     .unwrap();
///
/// assert_eq!(set.len(), 2);
/// ```
pub struct NestedSetBuilder<N, E>
where
    N: NestedNode,
{
    set: Option<NestedSet<N>>,
    debug_span: tracing::Span,
    _phantom: PhantomData<E>,
}

impl<N, E> Default for NestedSetBuilder<N, E>
where
    N: NestedNode,
    E: From<NestedSetError>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> NestedSetBuilder<N, E>
where
    N: NestedNode,
    E: From<NestedSetError>,
{
    /// Creates a new `NestedSetBuilder` instance.
    pub fn new() -> Self {
        let debug_span = debug_span!("NestedSetBuilder");
        debug_span.in_scope(|| debug!("Created new NestedSetBuilder"));

        Self {
            set: None,
            debug_span,
            _phantom: PhantomData,
        }
    }

    /// Seeds the set with its root node and returns the updated builder.
    ///
    /// Fails with `InvalidArgument` when a root was already added.
    pub fn root<F>(mut self, node: N, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, N, E>) -> Result<(), E>,
    {
        if self.set.is_some() {
            return Err(NestedSetError::InvalidArgument("root node already exists").into());
        }

        let span = self.debug_span.clone();
        span.in_scope(|| -> Result<Self, E> {
            let set = NestedSet::new(node);
            let mut node_builder = NodeBuilder::new(&set, set.root());

            // Call the supplied closure with the NodeBuilder to add the root's children
            f(&mut node_builder)?;

            debug!("Added root with {} descendants", set.len() - 1);
            self.set = Some(set);
            Ok(self)
        })
    }

    /// Returns the constructed set when finished building it.
    pub fn done(self) -> Result<NestedSet<N>, E> {
        self.debug_span.in_scope(|| {
            debug!("Finished building nested set");
            self.set.ok_or_else(|| {
                NestedSetError::NotFound {
                    what: "root node",
                }
                .into()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        node::simple::Node,
        test::{builder_set, names},
    };

    #[traced_test]
    #[test]
    fn builds_in_interval_order() {
        let set = builder_set();
        set.validate().unwrap();

        assert_eq!(
            names(&set),
            vec!["root", "fruit", "apple", "pear", "conference", "veg", "leek"]
        );

        let pear = set.find_by_id(&3).unwrap();
        let c = set.coordinates(pear).unwrap();
        assert_eq!((c.level, c.left, c.right), (2, 4, 7));
        assert_eq!(set.coordinates(set.root()).unwrap().right, 13);
    }

    #[test]
    fn child_keys() {
        let set = NestedSetBuilder::<Node<u64>, NestedSetError>::new()
            .root(Node::new(0, "root"), |root| {
                let key = root.child(Node::new(1, "only"), |only| {
                    assert_eq!(only.set().len(), 2);
                    Ok(())
                })?;
                assert_eq!(root.set().parent(key), Some(root.key()));
                Ok(())
            })
            .unwrap()
            .done()
            .unwrap();

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn errors_propagate() {
        #[derive(Debug, PartialEq)]
        enum MyError {
            Fail(String),
            Set(NestedSetError),
        }

        impl From<NestedSetError> for MyError {
            fn from(e: NestedSetError) -> Self {
                MyError::Set(e)
            }
        }

        let result = NestedSetBuilder::<Node<u64>, MyError>::new().root(Node::new(0, "root"), |root| {
            root.child(Node::new(1, "bad"), |_| Err(MyError::Fail("nope".into())))?;
            Ok(())
        });
        assert_eq!(result.err(), Some(MyError::Fail("nope".into())));

        let missing = NestedSetBuilder::<Node<u64>, MyError>::new().done();
        assert_eq!(
            missing.err(),
            Some(MyError::Set(NestedSetError::NotFound { what: "root node" }))
        );
    }

    #[test]
    fn single_root() {
        let builder = NestedSetBuilder::<Node<u64>, NestedSetError>::new()
            .root(Node::new(0, "root"), |_| Ok(()))
            .unwrap();
        let err = builder.root(Node::new(1, "again"), |_| Ok(())).err();
        assert_eq!(
            err,
            Some(NestedSetError::InvalidArgument("root node already exists"))
        );
    }
}
