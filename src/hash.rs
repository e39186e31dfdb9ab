use std::hash::{Hash as _, Hasher as _};

use xxhash_rust::xxh64::Xxh64;

use crate::{node::NestedNode, NestedSet};

impl<N> NestedSet<N>
where
    N: NestedNode,
{
    /// Digest of every node's id and coordinates taken in interval order.
    ///
    /// Two sets with equal fingerprints describe the same tree. Collection
    /// order does not contribute, so this never sorts the set.
    pub fn fingerprint(&self) -> u64 {
        let inner = self.lock();

        let mut nodes: Vec<&N> = inner.nodes.iter().map(|key| &inner.arena[*key]).collect();
        nodes.sort_unstable_by_key(|node| node.left());

        let mut hasher = Xxh64::new(0);
        nodes.len().hash(&mut hasher);
        for node in nodes {
            node.id().hash(&mut hasher);
            node.coordinates().hash(&mut hasher);
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        node::simple::Node,
        test::{sample_set, Sample},
        NestedSet,
    };

    #[test]
    fn independent_of_collection_order() {
        let Sample { set, .. } = sample_set();
        let before = set.fingerprint();
        set.branch(None);
        assert_eq!(set.fingerprint(), before);
    }

    #[test]
    fn same_shape_same_digest() {
        let Sample { set, .. } = sample_set();
        let Sample { set: other, .. } = sample_set();
        assert_eq!(set.fingerprint(), other.fingerprint());

        let lone = NestedSet::new(Node::new(0u64, "R"));
        assert_ne!(set.fingerprint(), lone.fingerprint());
    }

    #[test]
    fn ids_contribute() {
        let a = NestedSet::new(Node::new(0u64, "R"));
        a.add(Node::new(1, "x"), None).unwrap();
        let b = NestedSet::new(Node::new(0u64, "R"));
        b.add(Node::new(2, "x"), None).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
