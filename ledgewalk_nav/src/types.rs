// Core identifier types shared across the path builder.
//
// Nodes, edges and brushes are addressed by compact integer indices into the
// `Vec`s that own them (`NavGraph::nodes`, `NavGraph::edges`,
// `Level::brushes`). Wrapping them in newtypes keeps a node index from being
// passed where an edge index is expected.
//
// **Critical constraint: determinism.** IDs are assigned sequentially in a
// fixed order during the build, so identical input produces identical IDs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in `NavGraph::nodes`. During the build the same index
/// addresses the pin the node is created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Index of a directed edge in `NavGraph::edges`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Index of a brush in `Level::brushes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrushId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl BrushId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl fmt::Display for BrushId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brush#{}", self.0)
    }
}
