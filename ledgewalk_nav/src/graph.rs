// Navigation graph: the builder's output, consumed by the runtime pathfinder.
//
// The graph is a set of `NavNode`s (locations) connected by directed
// `NavEdge`s (typed, costed links). Edges come in mirrored pairs, A->B and
// B->A with the same type and cost, except where the start node's slot table
// was already full; that direction is dropped rather than stored.
//
// Storage is arena style: `Vec`s indexed by `NodeId`/`EdgeId`. Each node keeps
// a bounded `EdgeSlots` table of its outgoing edges. Capacities are not baked
// into the types; the builder checks them against `NavConfig` when
// committing.
//
// See also: `builder.rs` which assembles and commits the graph,
// `explore.rs` which fills in `NavEdge::breadth` for walk edges.

use crate::types::{EdgeId, NodeId};
use ledgewalk_geom::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// How an edge is traversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathType {
    /// Straight walk over continuous ground.
    Walk,
    /// Jump or drop between separate surfaces.
    Jump,
}

/// Outgoing edge table of one node. The inline size matches the default
/// per-node capacity; larger capacities spill to the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSlots(SmallVec<[EdgeId; 4]>);

impl EdgeSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_room(&self, capacity: usize) -> bool {
        self.0.len() < capacity
    }

    /// Record `edge` if fewer than `capacity` slots are taken.
    pub fn try_push(&mut self, edge: EdgeId, capacity: usize) -> bool {
        if self.has_room(capacity) {
            self.0.push(edge);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.0.iter().copied()
    }
}

/// A waypoint in the navigation graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    pub location: Vec2,
    /// Edges that start at this node.
    pub edges: EdgeSlots,
}

/// A directed, typed link between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavEdge {
    pub start: NodeId,
    pub end: NodeId,
    pub path_type: PathType,
    pub cost: i32,
    /// Vertical clearance along a walk edge. `None` means unbounded, which is
    /// what jump edges always carry since their arc is not checked.
    pub breadth: Option<f32>,
}

impl NavEdge {
    pub fn new(start: NodeId, end: NodeId, path_type: PathType, cost: i32) -> Self {
        Self {
            start,
            end,
            path_type,
            cost,
            breadth: None,
        }
    }

    /// The same link in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            ..self.clone()
        }
    }
}

/// The navigation graph container.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavGraph {
    pub nodes: Vec<NavNode>,
    pub edges: Vec<NavEdge>,
}

impl NavGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> &NavNode {
        &self.nodes[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &NavEdge {
        &self.edges[id.index()]
    }

    /// Edges leaving `node`, in slot order.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &NavEdge> + '_ {
        self.node(node).edges.iter().map(|id| self.edge(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count_by_type(&self, path_type: PathType) -> usize {
        self.edges
            .iter()
            .filter(|e| e.path_type == path_type)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
