//! Stable node identifier for the node arena.
//!
//! A [`NodeId`] is a newtype over `u32` addressing a slot in the arena owned
//! by [`LevelGraph`](crate::graph::LevelGraph). Parent/child links store ids,
//! never references, so no node owns another.

use std::fmt;

use petgraph::graph::NodeIndex;

/// Stable node identifier. Maps one-to-one onto a petgraph `NodeIndex<u32>`
/// in graphs exported with [`LevelGraph::to_petgraph`](crate::graph::LevelGraph::to_petgraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// Node level. The root sits at level 0.
pub type Level = u32;

impl NodeId {
    /// Position of this node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Bridge between NodeId and petgraph's NodeIndex<u32>.

impl From<NodeIndex<u32>> for NodeId {
    fn from(idx: NodeIndex<u32>) -> Self {
        NodeId(idx.index() as u32)
    }
}

impl From<NodeId> for NodeIndex<u32> {
    fn from(id: NodeId) -> Self {
        NodeIndex::new(id.index())
    }
}
