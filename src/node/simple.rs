use serde::{Deserialize, Serialize};

use crate::{NodeBound, NodeLevel, UniqueId};

use super::NestedNode;

/// Plain node record carrying an id, a display name and its interval coordinates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node<Id = crate::NodeId> {
    #[serde(rename = "id")]
    id: Id,
    #[serde(rename = "node_name")]
    name: String,
    level: NodeLevel,
    left: NodeBound,
    right: NodeBound,
}

impl<Id> Node<Id>
where
    Id: UniqueId,
{
    /// Create a detached node. Coordinates are assigned when the node is added to a set.
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            level: 0,
            left: 0,
            right: 0,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl<Id> NestedNode for Node<Id>
where
    Id: UniqueId,
{
    type Id = Id;

    fn id(&self) -> Id {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> NodeLevel {
        self.level
    }

    fn left(&self) -> NodeBound {
        self.left
    }

    fn right(&self) -> NodeBound {
        self.right
    }

    fn set_level(&mut self, level: NodeLevel) {
        self.level = level;
    }

    fn set_left(&mut self, left: NodeBound) {
        self.left = left;
    }

    fn set_right(&mut self, right: NodeBound) {
        self.right = right;
    }
}
