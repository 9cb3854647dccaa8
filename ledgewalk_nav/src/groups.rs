// Sector grouping: split each brush's pins into line-of-sight runs.
//
// For every brush, its pins are sorted left to right and walked pairwise.
// Consecutive pins with a clear straight line between them (tested against
// the whole level, not just their own brush) belong to the same group; an
// obstruction starts a new group. Groups are then sorted by the left edge
// of their bounding box so later linking proceeds left to right, every pin
// is stamped with its group index, and consecutive pins inside a group are
// joined by mirrored walk edges costing their horizontal distance.
//
// See also: `linker.rs` which connects groups to each other, `pins.rs` for
// `add_mirrored_edge`.

use crate::config::NavConfig;
use crate::graph::{NavEdge, PathType};
use crate::oracle::{GeometryOracle, Walkability};
use crate::pins::{Pin, PinFlags, add_mirrored_edge};
use crate::types::BrushId;
use ledgewalk_geom::Rect;
use rustc_hash::FxHashSet;

/// A sector: an x-ordered run of mutually visible pins on one brush.
#[derive(Clone, Debug)]
pub struct PinGroup {
    /// Pin indices, sorted by x.
    pub pins: Vec<usize>,
    /// Groups this one already has a walk or jump link to.
    pub linked: FxHashSet<usize>,
    pub bounds: Rect,
    pub floor: BrushId,
}

impl PinGroup {
    fn new(floor: BrushId, first: usize, pins: &[Pin]) -> Self {
        Self {
            pins: vec![first],
            linked: FxHashSet::default(),
            bounds: Rect::from_point(pins[first].location),
            floor,
        }
    }

    pub fn is_linked_to(&self, other: usize) -> bool {
        self.linked.contains(&other)
    }

    pub fn first_pin(&self) -> usize {
        self.pins[0]
    }

    pub fn last_pin(&self) -> usize {
        self.pins[self.pins.len() - 1]
    }
}

/// Record a link between groups `a` and `b` in both directions.
pub fn mark_linked(groups: &mut [PinGroup], a: usize, b: usize) {
    groups[a].linked.insert(b);
    groups[b].linked.insert(a);
}

/// Partition pins into groups and create intra-group walk edges.
pub fn group_pins<W: Walkability + ?Sized>(
    oracle: &GeometryOracle<'_, W>,
    config: &NavConfig,
    pins: &mut [Pin],
    edges: &mut Vec<NavEdge>,
) -> Vec<PinGroup> {
    let mut groups = Vec::new();

    for &(brush, _) in oracle.brushes() {
        let mut list: Vec<usize> = (0..pins.len())
            .filter(|&i| pins[i].floor == Some(brush))
            .collect();
        if list.is_empty() {
            continue;
        }
        list.sort_by(|&a, &b| pins[a].location.x.total_cmp(&pins[b].location.x));

        let mut group = PinGroup::new(brush, list[0], pins);
        for pair in list.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if oracle.is_obstructed(pins[from].location, pins[to].location) {
                groups.push(group);
                group = PinGroup::new(brush, to, pins);
            } else {
                group.pins.push(to);
                group.bounds.include(pins[to].location);
            }
        }
        groups.push(group);
    }

    groups.sort_by(|a, b| a.bounds.min.x.total_cmp(&b.bounds.min.x));

    for (index, group) in groups.iter().enumerate() {
        for &pin in &group.pins {
            pins[pin].group = Some(index);
            pins[pin].flags |= PinFlags::GROUPED;
        }
    }

    for group in &groups {
        for pair in group.pins.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let cost = (pins[a].location.x - pins[b].location.x).abs().floor() as i32;
            add_mirrored_edge(
                pins,
                edges,
                a,
                b,
                PathType::Walk,
                cost,
                config.max_edges_per_node,
            );
        }
    }

    groups
}
