//! # Nestedset
//!
//! Trees stored as nested sets.
//!
//! ## Overview
//!
//! Every node carries a `[left, right]` interval and a `level`. A node's
//! interval strictly contains the intervals of all its descendants, so
//! descendant and ancestor lookups are range checks rather than traversals.
//! The price is paid on mutation: adding, deleting or moving a node renumbers
//! intervals across the whole set.
//!
//! Nodes are owned by the [`NestedSet`] and addressed by [`NodeKey`]. Any type
//! implementing [`NestedNode`] can be stored; [`node::simple::Node`] is a
//! ready-made record.

mod arena;
mod builder;
mod display;
mod error;
mod hash;
mod id;
mod serialize;
mod set;


pub mod node;

pub use arena::NodeKey;
pub use builder::*;
pub use error::{ErrorKind, NestedSetError, Result};
pub use id::*;
pub use set::NestedSet;

pub use node::{Coordinates, NestedNode};

pub type NodeLevel = i64;
pub type NodeBound = i64;

pub type IdGenerator = id::AtomicU64Generator;
pub type NodeId = <IdGenerator as UniqueGenerator>::Output;
