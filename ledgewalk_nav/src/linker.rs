// Inter-group linking: walk links between adjacent groups, then jump links
// between groups that still have no connection.
//
// `link_walkable` looks at every pair of groups whose bounding boxes sit
// side by side. It joins the facing end pins when the straight line between
// them is clear and ground lies under the whole stretch, sampled every
// `walk_step` and probed `walk_height` down. Ground probes use contact
// traces, so a sample exactly on the seam between two floor brushes lands.
//
// `link_jumpable` handles what is left. For each unlinked pair it gathers
// every pin pair where the higher pin is a surface corner facing the lower
// one, within `max_jump_x`, with a clear arc approximated by the straight
// line from the launch spot just past the corner. Candidates are bucketed by
// direction, sorted by cost, and one per bucket becomes a mirrored jump
// edge. The pick is the lower middle of the sorted bucket, not the cheapest.
//
// See also: `groups.rs` for `PinGroup` and the intra-group walk edges.
//
// **Critical constraint: determinism.** Groups are visited in index order
// and candidate buckets use a stable sort, so equal-cost candidates keep
// their discovery order.

use crate::config::NavConfig;
use crate::graph::{NavEdge, PathType};
use crate::groups::{PinGroup, mark_linked};
use crate::oracle::{GeometryOracle, TraceMode, Walkability};
use crate::pins::{Pin, PinFlags, add_mirrored_edge};
use ledgewalk_geom::Vec2;

/// Tolerance when deciding whether two group boxes are side by side.
const SIDE_TOLERANCE: f32 = 0.5;

/// Which way a walk or jump heads from the first group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn side_of(g1: &PinGroup, g2: &PinGroup) -> Option<Side> {
    if g2.bounds.max.x < g1.bounds.min.x + SIDE_TOLERANCE {
        Some(Side::Left)
    } else if g2.bounds.min.x > g1.bounds.max.x - SIDE_TOLERANCE {
        Some(Side::Right)
    } else {
        None
    }
}

fn horizontal_cost(a: Vec2, b: Vec2) -> i32 {
    (a.x - b.x).abs().floor() as i32
}

// ---------------------------------------------------------------------------
// Walk links
// ---------------------------------------------------------------------------

/// True if every sample along `from -> to`, endpoints included, has ground
/// within `walk_height` below it. A probe landing exactly on the seam
/// between two floor brushes touches both and counts as ground.
fn has_ground<W: Walkability + ?Sized>(
    oracle: &GeometryOracle<'_, W>,
    config: &NavConfig,
    from: Vec2,
    to: Vec2,
) -> bool {
    let span = to - from;
    let steps = ((span.length() / config.walk_step).ceil() as usize).max(1);
    (0..=steps).all(|k| {
        let at = from + span * (k as f32 / steps as f32);
        let below = Vec2::new(at.x, at.y - config.walk_height);
        oracle.test_line(at, below, TraceMode::Contact).is_some()
    })
}

/// Join side-by-side groups that can be walked between. Returns the number
/// of group pairs linked.
pub fn link_walkable<W: Walkability + ?Sized>(
    oracle: &GeometryOracle<'_, W>,
    config: &NavConfig,
    pins: &mut [Pin],
    groups: &mut [PinGroup],
    edges: &mut Vec<NavEdge>,
) -> usize {
    let mut linked = 0;
    for g1 in 0..groups.len() {
        for g2 in g1 + 1..groups.len() {
            if groups[g1].is_linked_to(g2) {
                continue;
            }
            let Some(side) = side_of(&groups[g1], &groups[g2]) else {
                continue;
            };
            let (a, b) = match side {
                Side::Left => (groups[g1].first_pin(), groups[g2].last_pin()),
                Side::Right => (groups[g1].last_pin(), groups[g2].first_pin()),
            };
            let (from, to) = (pins[a].location, pins[b].location);
            if oracle.is_obstructed(from, to) || !has_ground(oracle, config, from, to) {
                continue;
            }

            add_mirrored_edge(
                pins,
                edges,
                a,
                b,
                PathType::Walk,
                horizontal_cost(from, to),
                config.max_edges_per_node,
            );
            mark_linked(groups, g1, g2);
            linked += 1;
        }
    }
    linked
}

// ---------------------------------------------------------------------------
// Jump links
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
struct JumpCandidate {
    cost: i32,
    upper: usize,
    lower: usize,
}

/// Evaluate a jump from `upper` down to `lower`.
fn jump_candidate<W: Walkability + ?Sized>(
    oracle: &GeometryOracle<'_, W>,
    config: &NavConfig,
    pins: &[Pin],
    upper: usize,
    lower: usize,
) -> Option<(Side, JumpCandidate)> {
    let top = &pins[upper];
    if !top.is_launch() {
        return None;
    }
    let side = if top.flags.contains(PinFlags::LEFT) {
        Side::Left
    } else {
        Side::Right
    };

    let dir = pins[lower].location - top.location;
    let facing = match side {
        Side::Left => dir.x < 0.0,
        Side::Right => dir.x > 0.0,
    };
    if !facing || dir.x.abs() > config.max_jump_x {
        return None;
    }

    let (normal, tangent) = (top.normal, top.tangent());
    let launch = match side {
        Side::Left => top.location + (normal - tangent) * config.pin_base,
        Side::Right => top.location + (normal + tangent) * config.pin_base,
    };
    if oracle.test_point(launch).is_some()
        || oracle.is_obstructed(launch, pins[lower].location)
    {
        return None;
    }

    let cost = (config.jump_weight * (dir.x.abs() + dir.y.abs())).floor() as i32;
    Some((side, JumpCandidate { cost, upper, lower }))
}

/// Add jump links between groups that are still unconnected. Returns the
/// number of jump links added.
pub fn link_jumpable<W: Walkability + ?Sized>(
    oracle: &GeometryOracle<'_, W>,
    config: &NavConfig,
    pins: &mut [Pin],
    groups: &mut [PinGroup],
    edges: &mut Vec<NavEdge>,
) -> usize {
    let mut added = 0;
    for g1 in 0..groups.len() {
        for g2 in g1 + 1..groups.len() {
            if groups[g1].is_linked_to(g2) {
                continue;
            }

            // [right, left]
            let mut buckets: [Vec<JumpCandidate>; 2] = [Vec::new(), Vec::new()];
            for &p1 in &groups[g1].pins {
                for &p2 in &groups[g2].pins {
                    let (upper, lower) = if pins[p1].location.y > pins[p2].location.y {
                        (p1, p2)
                    } else {
                        (p2, p1)
                    };
                    if let Some((side, candidate)) =
                        jump_candidate(oracle, config, pins, upper, lower)
                    {
                        let bucket = match side {
                            Side::Right => 0,
                            Side::Left => 1,
                        };
                        buckets[bucket].push(candidate);
                    }
                }
            }

            if buckets.iter().all(Vec::is_empty) {
                continue;
            }
            for bucket in &mut buckets {
                if bucket.is_empty() {
                    continue;
                }
                bucket.sort_by_key(|c| c.cost);
                let pick = bucket[(bucket.len() / 2).saturating_sub(1)];
                add_mirrored_edge(
                    pins,
                    edges,
                    pick.upper,
                    pick.lower,
                    PathType::Jump,
                    pick.cost,
                    config.max_edges_per_node,
                );
                added += 1;
            }
            mark_linked(groups, g1, g2);
        }
    }
    added
}
