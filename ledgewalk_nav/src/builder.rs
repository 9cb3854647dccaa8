// Path building orchestrator: runs the build stages in order and commits the
// result to the level.
//
// Stages:
// 1. Surface pins, fall pins, merge, grouping (`pins.rs`, `groups.rs`).
// 2. Walk links, then jump links between groups (`linker.rs`).
// 3. Pins become nodes one to one, edges carry over unchanged.
// 4. Breadth exploration over walk edges (`explore.rs`).
// 5. Capacity validation, then commit to `Level::navigator`.
//
// The level's previous graph is dropped before anything else runs, so a
// failed build leaves the level with no graph rather than a stale one. All
// working state (pins, groups, edge list) lives in this module's locals and
// is gone when the build returns; nothing carries over between builds.
//
// See also: `progress.rs` for the indicator the stages report into,
// `error.rs` for the capacity failures.
//
// **Critical constraint: determinism.** The same level and config always
// produce the same graph, node for node and edge for edge.

use crate::config::NavConfig;
use crate::error::{NavError, Result};
use crate::explore::explore_paths;
use crate::graph::{NavGraph, PathType};
use crate::groups::{PinGroup, group_pins};
use crate::level::Level;
use crate::linker::{link_jumpable, link_walkable};
use crate::oracle::{GeometryOracle, Walkability};
use crate::pins::{Pin, create_fall_pins, create_surface_pins, merge_pins};
use crate::progress::{ProgressIndicator, ProgressTask};
use serde::Serialize;

/// Summary of a successful build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Pins placed before merging.
    pub pins_before_merge: usize,
    /// Pins left after merging.
    pub pins: usize,
    pub sectors: usize,
    /// Sectors with no walk or jump link to any other sector.
    pub unlinked_sectors: usize,
    pub nodes: usize,
    pub edges: usize,
    pub walk_edges: usize,
    pub jump_edges: usize,
}

/// Everything a build produces before it is validated.
struct Assembled {
    graph: NavGraph,
    pins_before_merge: usize,
    pins: usize,
    groups: Vec<PinGroup>,
}

fn assemble<W: Walkability + ?Sized>(
    level: &Level,
    config: &NavConfig,
    walkability: &W,
    task: &mut ProgressTask<'_>,
) -> Assembled {
    let oracle = GeometryOracle::new(level, walkability);
    let mut pins: Vec<Pin> = Vec::new();
    let mut edges = Vec::new();

    task.update_details("Placing Pins...");
    task.set_progress(0, 4);
    create_surface_pins(&oracle, config, &mut pins);
    tracing::debug!(pins = pins.len(), "surface pins placed");
    task.set_progress(1, 4);
    create_fall_pins(&oracle, config, &mut pins);
    let pins_before_merge = pins.len();
    tracing::debug!(pins = pins_before_merge, "fall pins placed");
    task.set_progress(2, 4);
    let merges = merge_pins(&mut pins, config);
    tracing::debug!(merges, pins = pins.len(), "pins merged");
    task.set_progress(3, 4);
    let mut groups = group_pins(&oracle, config, &mut pins, &mut edges);
    tracing::debug!(groups = groups.len(), "pins grouped");

    task.update_details("Linking...");
    task.set_progress(0, 2);
    let walks = link_walkable(&oracle, config, &mut pins, &mut groups, &mut edges);
    task.set_progress(1, 2);
    let jumps = link_jumpable(&oracle, config, &mut pins, &mut groups, &mut edges);
    tracing::debug!(walks, jumps, edges = edges.len(), "groups linked");

    let mut graph = NavGraph {
        nodes: pins.iter().map(Pin::to_node).collect(),
        edges,
    };

    task.update_details("Exploration...");
    task.set_progress(1, 2);
    let measured = explore_paths(&mut graph, &oracle, config);
    tracing::debug!(measured, "walk breadth explored");

    Assembled {
        graph,
        pins_before_merge,
        pins: pins.len(),
        groups,
    }
}

fn check_capacity(graph: &NavGraph, config: &NavConfig) -> Result<()> {
    if graph.node_count() > config.max_nodes {
        return Err(NavError::TooManyNodes {
            actual: graph.node_count(),
            max: config.max_nodes,
        });
    }
    if graph.edge_count() > config.max_edges {
        return Err(NavError::TooManyEdges {
            actual: graph.edge_count(),
            max: config.max_edges,
        });
    }
    Ok(())
}

/// Build a navigation graph for `level` and commit it to
/// `level.navigator`. Any previous graph is discarded first, whether or not
/// the build succeeds.
pub fn build_network<W: Walkability + ?Sized>(
    level: &mut Level,
    config: &NavConfig,
    walkability: &W,
    progress: &mut dyn ProgressIndicator,
) -> Result<BuildStats> {
    config.validate()?;
    level.navigator = None;

    let assembled = {
        let mut task = ProgressTask::begin(progress, "Path Building");
        assemble(level, config, walkability, &mut task)
    };
    let graph = assembled.graph;

    if let Err(err) = check_capacity(&graph, config) {
        tracing::error!(
            level = %level.name,
            nodes = graph.node_count(),
            max_nodes = config.max_nodes,
            edges = graph.edge_count(),
            max_edges = config.max_edges,
            "path building failed: {err}"
        );
        return Err(err);
    }

    let stats = BuildStats {
        pins_before_merge: assembled.pins_before_merge,
        pins: assembled.pins,
        sectors: assembled.groups.len(),
        unlinked_sectors: assembled
            .groups
            .iter()
            .filter(|g| g.linked.is_empty())
            .count(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        walk_edges: graph.edge_count_by_type(PathType::Walk),
        jump_edges: graph.edge_count_by_type(PathType::Jump),
    };

    tracing::info!(
        level = %level.name,
        pins_before_merge = stats.pins_before_merge,
        sectors = stats.sectors,
        unlinked_sectors = stats.unlinked_sectors,
        nodes = stats.nodes,
        edges = stats.edges,
        "path building complete"
    );

    level.navigator = Some(graph);
    Ok(stats)
}

/// Build with the config's slope limit as the walkability predicate.
pub fn build_paths(
    level: &mut Level,
    config: &NavConfig,
    progress: &mut dyn ProgressIndicator,
) -> Result<BuildStats> {
    let walkability = config.slope_limit();
    build_network(level, config, &walkability, progress)
}

/// Drop the level's navigation graph, if any.
pub fn destroy_network(level: &mut Level) {
    if level.navigator.take().is_some() {
        tracing::debug!(level = %level.name, "navigation graph destroyed");
    }
}

/// Same as `destroy_network`; paired with `build_paths`.
pub fn destroy_paths(level: &mut Level) {
    destroy_network(level);
}
