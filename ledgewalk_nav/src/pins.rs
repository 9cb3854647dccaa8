// Pin generation and clustering.
//
// A pin is a candidate waypoint. Pins are placed in three passes:
// 1. **Surface pins** (`create_surface_pins`): every walkable brush edge gets
//    a Left pin near its start corner and a Right pin near its end corner,
//    lifted `pin_base` off the surface and inset `pin_base` along it. Pins
//    that land inside solid geometry are dropped.
// 2. **Fall pins** (`create_fall_pins`): from each edge pin, a probe drops
//    from a point `pin_fall_offset` past the corner. If it lands on another
//    brush's walkable surface far enough below, a Middle|Fall pin marks the
//    landing spot.
// 3. **Merge** (`merge_pins`): pins within `pin_same` of each other are
//    fused until no close pair remains. Merging is pairwise and in place, so
//    for clusters of three or more the result depends on scan order; that is
//    kept as is so rebuilt graphs match previously built ones exactly.
//
// Pins become graph nodes one to one, so a pin's index is its `NodeId`.
// `add_mirrored_edge` is the single place edges are created; it enforces the
// per-pin slot capacity.
//
// See also: `groups.rs` which partitions pins per brush, `oracle.rs` for the
// point and line tests used here.
//
// **Critical constraint: determinism.** Pins are produced in brush order,
// then edge order, and merged in index order. Any change to iteration order
// changes merged positions.

use crate::config::NavConfig;
use crate::graph::{EdgeSlots, NavEdge, NavNode, PathType};
use crate::oracle::{GeometryOracle, TraceMode, Walkability};
use crate::types::{BrushId, EdgeId, NodeId};
use ledgewalk_geom::{Vec2, edge_normal, polygon};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Weight of the surviving pin's location when two pins merge. Slightly
/// above one half so that ties resolve toward the first pin.
const MERGE_WEIGHT: f32 = 0.5001;

// ---------------------------------------------------------------------------
// Pin flags
// ---------------------------------------------------------------------------

/// Bit set describing how a pin was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PinFlags(u8);

impl PinFlags {
    pub const NONE: Self = Self(0);
    /// Start corner of a walkable edge. Can launch jumps to the left.
    pub const LEFT: Self = Self(1 << 0);
    /// End corner of a walkable edge. Can launch jumps to the right.
    pub const RIGHT: Self = Self(1 << 1);
    /// Landing spot inside a surface.
    pub const MIDDLE: Self = Self(1 << 2);
    pub const SURFACE: Self = Self(1 << 3);
    pub const FALL: Self = Self(1 << 4);
    /// Assigned to a group.
    pub const GROUPED: Self = Self(1 << 5);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for PinFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PinFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for PinFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(PinFlags, &str); 6] = [
            (PinFlags::LEFT, "Left"),
            (PinFlags::RIGHT, "Right"),
            (PinFlags::MIDDLE, "Middle"),
            (PinFlags::SURFACE, "Surface"),
            (PinFlags::FALL, "Fall"),
            (PinFlags::GROUPED, "Grouped"),
        ];
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("None")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pin
// ---------------------------------------------------------------------------

/// A candidate waypoint during path building.
#[derive(Clone, Debug, PartialEq)]
pub struct Pin {
    pub flags: PinFlags,
    pub location: Vec2,
    /// Outward normal of the surface the pin stands on.
    pub normal: Vec2,
    /// Brush the pin stands on.
    pub floor: Option<BrushId>,
    pub edges: EdgeSlots,
    /// Index into the builder's group list once grouped.
    pub group: Option<usize>,
}

impl Pin {
    pub fn new(flags: PinFlags, location: Vec2, normal: Vec2, floor: BrushId) -> Self {
        Self {
            flags,
            location,
            normal,
            floor: Some(floor),
            edges: EdgeSlots::new(),
            group: None,
        }
    }

    /// Direction along the surface, pointing from the Left corner toward
    /// the Right one.
    pub fn tangent(&self) -> Vec2 {
        Vec2::new(self.normal.y, -self.normal.x)
    }

    /// Can a jump start here?
    pub fn is_launch(&self) -> bool {
        self.flags.intersects(PinFlags::LEFT | PinFlags::RIGHT)
    }

    /// Fold `other` into `self`: union of flags, location biased toward
    /// `self`, averaged normal, and `self`'s floor unless it has none.
    pub fn absorb(&mut self, other: &Pin) {
        self.flags |= other.flags;
        self.location = self.location * MERGE_WEIGHT + other.location * (1.0 - MERGE_WEIGHT);
        self.normal = (self.normal + other.normal) * 0.5;
        self.floor = self.floor.or(other.floor);
    }

    /// The graph node this pin turns into.
    pub fn to_node(&self) -> NavNode {
        NavNode {
            location: self.location,
            edges: self.edges.clone(),
        }
    }
}

/// Create the mirrored pair `from -> to`, `to -> from`. Each direction is
/// recorded only if its start pin has a free slot. Returns how many
/// directions were recorded.
pub fn add_mirrored_edge(
    pins: &mut [Pin],
    edges: &mut Vec<NavEdge>,
    from: usize,
    to: usize,
    path_type: PathType,
    cost: i32,
    slot_capacity: usize,
) -> usize {
    let forward = NavEdge::new(NodeId(from as u32), NodeId(to as u32), path_type, cost);
    let backward = forward.reversed();
    let mut added = 0;
    for (start, edge) in [(from, forward), (to, backward)] {
        let id = EdgeId(edges.len() as u32);
        if pins[start].edges.try_push(id, slot_capacity) {
            edges.push(edge);
            added += 1;
        }
    }
    added
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Place Left/Right surface pins on every walkable brush edge.
pub fn create_surface_pins<W: Walkability + ?Sized>(
    oracle: &GeometryOracle<'_, W>,
    config: &NavConfig,
    pins: &mut Vec<Pin>,
) {
    for &(id, brush) in oracle.brushes() {
        for (p1, p2) in polygon::edges(&brush.vertices) {
            let tangent = (p2 - p1).normalized();
            let normal = edge_normal(p1, p2);
            if !oracle.is_walkable(normal) {
                continue;
            }

            let left = p1 + (normal + tangent) * config.pin_base + brush.location;
            if oracle.test_point(left).is_none() {
                pins.push(Pin::new(PinFlags::LEFT | PinFlags::SURFACE, left, normal, id));
            }

            let right = p2 + (normal - tangent) * config.pin_base + brush.location;
            if oracle.test_point(right).is_none() {
                pins.push(Pin::new(PinFlags::RIGHT | PinFlags::SURFACE, right, normal, id));
            }
        }
    }
}

/// Probe down past every edge pin and mark where a fall would land.
pub fn create_fall_pins<W: Walkability + ?Sized>(
    oracle: &GeometryOracle<'_, W>,
    config: &NavConfig,
    pins: &mut Vec<Pin>,
) {
    let source_count = pins.len();
    for i in 0..source_count {
        let source = &pins[i];
        let tangent = source.tangent();
        let from = if source.flags.contains(PinFlags::RIGHT) {
            source.location + tangent * config.pin_fall_offset
        } else if source.flags.contains(PinFlags::LEFT) {
            source.location - tangent * config.pin_fall_offset
        } else {
            continue;
        };
        let to = Vec2::new(from.x, from.y - config.fall_max_len);

        let Some(hit) = oracle.test_line(from, to, TraceMode::Contact) else {
            continue;
        };
        if Some(hit.brush) == source.floor
            || !oracle.is_walkable(hit.normal)
            || (hit.point.y - from.y).abs() <= config.pin_base * 1.5
        {
            continue;
        }

        pins.push(Pin::new(
            PinFlags::MIDDLE | PinFlags::FALL,
            hit.point + hit.normal * config.pin_base,
            hit.normal,
            hit.brush,
        ));
    }
}

// ---------------------------------------------------------------------------
// Clustering
// ---------------------------------------------------------------------------

/// Fuse pins closer than `pin_same` until none remain. Returns the number of
/// merges performed.
///
/// Each pass scans pairs `(i, j > i)`. When `j` is merged into `i` it is
/// swap-removed and the scan moves on to `j + 1`, so the pin swapped into
/// slot `j` is only compared on the next pass.
pub fn merge_pins(pins: &mut Vec<Pin>, config: &NavConfig) -> usize {
    let threshold = config.pin_same * config.pin_same;
    let mut merges = 0;
    loop {
        let mut merged_this_pass = false;
        let mut i = 0;
        while i < pins.len() {
            let mut j = i + 1;
            while j < pins.len() {
                if pins[i].location.distance_squared(pins[j].location) <= threshold {
                    let other = pins.swap_remove(j);
                    pins[i].absorb(&other);
                    merged_this_pass = true;
                    merges += 1;
                }
                j += 1;
            }
            i += 1;
        }
        if !merged_this_pass {
            return merges;
        }
    }
}
