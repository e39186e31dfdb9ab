use crate::{NodeBound, NodeLevel, UniqueId};

pub mod simple;

/// Capability implemented by anything that can be stored in a [`crate::NestedSet`].
///
/// The set only reads and rewrites the three interval coordinates. Everything
/// else on the implementing type belongs to the caller.
pub trait NestedNode {
    type Id: UniqueId;

    fn id(&self) -> Self::Id;
    fn name(&self) -> &str;

    fn level(&self) -> NodeLevel;
    fn left(&self) -> NodeBound;
    fn right(&self) -> NodeBound;

    fn set_level(&mut self, level: NodeLevel);
    fn set_left(&mut self, left: NodeBound);
    fn set_right(&mut self, right: NodeBound);

    /// Snapshot of the interval coordinates
    fn coordinates(&self) -> Coordinates {
        Coordinates {
            level: self.level(),
            left: self.left(),
            right: self.right(),
        }
    }

    /// Overwrite all three coordinates at once
    fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.set_level(coordinates.level);
        self.set_left(coordinates.left);
        self.set_right(coordinates.right);
    }
}

/// Interval position of a node within a nested set
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub level: NodeLevel,
    pub left: NodeBound,
    pub right: NodeBound,
}

impl Coordinates {
    pub fn new(level: NodeLevel, left: NodeBound, right: NodeBound) -> Self {
        Self { level, left, right }
    }

    /// Number of numbering units consumed by this node and its descendants
    pub fn width(&self) -> NodeBound {
        self.right - self.left + 1
    }

    /// Inclusive interval containment. A node contains itself.
    pub fn contains(&self, other: &Coordinates) -> bool {
        self.left <= other.left && self.right >= other.right
    }

    /// Strict containment, true only for proper ancestors of `other`
    pub fn strictly_contains(&self, other: &Coordinates) -> bool {
        self.left < other.left && self.right > other.right
    }

    pub fn is_leaf(&self) -> bool {
        self.right - self.left == 1
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment() {
        let outer = Coordinates::new(0, 0, 7);
        let inner = Coordinates::new(1, 1, 4);
        let leaf = Coordinates::new(2, 2, 3);
        let aside = Coordinates::new(1, 5, 6);

        assert!(outer.contains(&inner));
        assert!(inner.contains(&inner));
        assert!(!inner.strictly_contains(&inner));
        assert!(outer.strictly_contains(&leaf));
        assert!(!inner.contains(&aside));
        assert!(leaf.is_leaf());
        assert!(!inner.is_leaf());
        assert_eq!(inner.width(), 4);
        assert_eq!(outer.to_string(), "[0, 7]");
    }

    #[test]
    fn coordinates_roundtrip_through_trait() {
        let mut node = simple::Node::new(7u64, "seven");
        node.set_coordinates(Coordinates::new(2, 3, 4));
        assert_eq!(node.level(), 2);
        assert_eq!(node.left(), 3);
        assert_eq!(node.right(), 4);
        assert_eq!(node.coordinates(), Coordinates::new(2, 3, 4));
    }
}
