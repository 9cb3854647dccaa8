// ledgewalk_nav - offline navigation graph builder for 2D brush levels.
//
// Given a level made of polygonal brushes, this crate places waypoint pins
// on walkable surfaces, clusters and groups them, links them with walk and
// jump edges, measures clearance along walk edges, and commits the result
// to the level as a compact `NavGraph` for a runtime pathfinder.
//
// Module overview:
// - `builder.rs`:  Build orchestration, capacity checks, `build_paths` / `destroy_paths`.
// - `pins.rs`:     Pin placement (surface and fall pins) and merging.
// - `groups.rs`:   Per-brush line-of-sight grouping and intra-group walk edges.
// - `linker.rs`:   Walk and jump links between groups.
// - `explore.rs`:  Vertical clearance ("breadth") along walk edges.
// - `oracle.rs`:   Point and line queries over the level's solid brushes.
// - `graph.rs`:    NavNode / NavEdge / NavGraph, the output contract.
// - `level.rs`:    Level and Brush input types.
// - `config.rs`:   NavConfig, every tunable distance, weight and capacity.
// - `progress.rs`: ProgressIndicator and the task guard used during builds.
// - `error.rs`:    NavError.
// - `types.rs`:    NodeId, EdgeId, BrushId.
//
// Geometry primitives (vectors, rectangles, polygon predicates) live in the
// companion crate `ledgewalk_geom`.
//
// **Critical constraint: determinism.** A build is a pure function of
// `(level, config, walkability)`. Iteration follows brush order and vector
// order throughout; hash sets are only used for membership tests, never
// iterated.

pub mod builder;
pub mod config;
pub mod error;
pub mod explore;
pub mod graph;
pub mod groups;
pub mod level;
pub mod linker;
pub mod oracle;
pub mod pins;
pub mod progress;
pub mod types;

pub use builder::{BuildStats, build_network, build_paths, destroy_network, destroy_paths};
pub use config::NavConfig;
pub use error::{NavError, Result};
pub use graph::{NavEdge, NavGraph, NavNode, PathType};
pub use level::{Brush, BrushKind, Level};
pub use oracle::{SlopeLimit, Walkability};
pub use progress::{LogProgress, NullProgress, ProgressIndicator};
