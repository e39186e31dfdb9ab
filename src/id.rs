use std::sync::atomic::AtomicU64;

/// Bounds required of a node id. Ids are supplied by the caller and compared by value.
pub trait UniqueId:
    Clone + PartialEq + std::hash::Hash + std::fmt::Debug + std::fmt::Display + 'static
{
}

impl<T> UniqueId for T where
    T: Clone + PartialEq + std::hash::Hash + std::fmt::Debug + std::fmt::Display + 'static
{
}

pub trait UniqueGenerator: std::fmt::Debug {
    type Output: UniqueId;
    /// Generate a unique value
    fn generate(&mut self) -> Self::Output;
}

#[derive(Default, Debug)]
pub struct AtomicU64Generator {
    next_id: AtomicU64,
}

impl AtomicU64Generator {
    /// Start generating from `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next_id: AtomicU64::new(first),
        }
    }

    /// The value the next call to `generate` will return
    pub fn peek(&self) -> u64 {
        self.next_id.load(std::sync::atomic::Ordering::Relaxed)
    }
}

impl UniqueGenerator for AtomicU64Generator {
    type Output = u64;

    fn generate(&mut self) -> u64 {
        self.next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    }
}

#[derive(Default, Debug)]
pub struct UuidGenerator;

impl UniqueGenerator for UuidGenerator {
    type Output = uuid::Uuid;

    fn generate(&mut self) -> uuid::Uuid {
        uuid::Uuid::new_v4()
    }
}
