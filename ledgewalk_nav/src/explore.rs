// Breadth exploration: measure the vertical clearance along walk edges.
//
// Each walk edge is sampled at roughly unit spacing from its start node to
// its end node. At every sample a probe goes straight up `max_hull_height`;
// the nearest ceiling found, counting a probe that only touches a corner,
// bounds how tall an agent may be to use the edge. Jump edges are left
// unbounded.

use crate::config::NavConfig;
use crate::graph::{NavGraph, PathType};
use crate::oracle::{GeometryOracle, TraceMode, Walkability};
use ledgewalk_geom::Vec2;

/// Clearance above the segment `from -> to`, capped at `max_hull_height`.
pub fn measure_breadth<W: Walkability + ?Sized>(
    oracle: &GeometryOracle<'_, W>,
    config: &NavConfig,
    from: Vec2,
    to: Vec2,
) -> f32 {
    let span = to - from;
    let steps = (span.length().floor() as usize).max(1);
    let mut breadth = config.max_hull_height;
    for k in 0..=steps {
        let at = from + span * (k as f32 / steps as f32);
        let top = Vec2::new(at.x, at.y + config.max_hull_height);
        if let Some(hit) = oracle.test_line(at, top, TraceMode::Contact) {
            let clearance = (hit.point.y - at.y).abs() + config.pin_base;
            breadth = breadth.min(clearance);
        }
    }
    breadth
}

/// Fill in `breadth` for every walk edge of `graph`. Returns the number of
/// edges measured.
pub fn explore_paths<W: Walkability + ?Sized>(
    graph: &mut NavGraph,
    oracle: &GeometryOracle<'_, W>,
    config: &NavConfig,
) -> usize {
    let mut measured = 0;
    for i in 0..graph.edges.len() {
        let edge = &graph.edges[i];
        if edge.path_type != PathType::Walk {
            continue;
        }
        let from = graph.node(edge.start).location;
        let to = graph.node(edge.end).location;
        let breadth = measure_breadth(oracle, config, from, to);
        graph.edges[i].breadth = Some(breadth);
        measured += 1;
    }
    measured
}
