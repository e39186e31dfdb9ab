//! Slot storage giving every node in a set a stable identity.

/// Handle to a node owned by a [`crate::NestedSet`].
///
/// Keys compare by identity. Once a node is deleted its key goes stale and will
/// never resolve again, even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    index: u32,
    generation: u32,
}

impl NodeKey {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot<N> {
    generation: u32,
    value: Option<N>,
}

#[derive(Debug)]
pub(crate) struct Arena<N> {
    slots: Vec<Slot<N>>,
    free: Vec<u32>,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<N> Arena<N> {
    pub fn insert(&mut self, value: N) -> NodeKey {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.value = Some(value);
            return NodeKey {
                index,
                generation: slot.generation,
            };
        }

        let index = u32::try_from(self.slots.len()).expect("node arena exhausted u32 slots");
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        NodeKey {
            index,
            generation: 0,
        }
    }

    pub fn remove(&mut self, key: NodeKey) -> Option<N> {
        let slot = self.slots.get_mut(key.index())?;
        if slot.generation != key.generation {
            return None;
        }
        let value = slot.value.take()?;
        self.free.push(key.index);
        Some(value)
    }

    pub fn get(&self, key: NodeKey) -> Option<&N> {
        self.slots
            .get(key.index())
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.slots
            .get_mut(key.index())
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.get(key).is_some()
    }
}

impl<N> std::ops::Index<NodeKey> for Arena<N> {
    type Output = N;

    fn index(&self, key: NodeKey) -> &N {
        self.get(key).expect("stale node key")
    }
}

impl<N> std::ops::IndexMut<NodeKey> for Arena<N> {
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        self.get_mut(key).expect("stale node key")
    }
}
