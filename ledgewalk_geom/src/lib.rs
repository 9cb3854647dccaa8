// 2D geometry primitives for the Ledgewalk path builder.
//
// This crate holds the math the navigation builder needs and nothing else:
// a `Vec2` with the usual operators, an axis-aligned `Rect`, and the polygon
// predicates (point containment, segment crossing, segment-vs-polygon hit)
// that the builder's geometry oracle composes into level-wide queries.
//
// Module overview:
// - `vector.rs`:  `Vec2` value type, dot/cross/perp, normalization.
// - `rect.rs`:    `Rect` bounding box grown point by point.
// - `polygon.rs`: Crossing-number containment, strict and touching segment
//                 intersection, separating-axis overlap, nearest
//                 segment/polygon hit.
//
// Polygons are plain vertex slices. The builder's convention is clockwise
// winding in a y-up frame, which makes `edge_normal(v1, v2)` point out of the
// polygon; containment and overlap tests do not depend on winding.
//
// **Critical constraint: determinism.** Every function is a pure function of
// its `f32` inputs. No lookup tables, no platform intrinsics, no randomness.

pub mod polygon;
pub mod rect;
pub mod vector;

pub use polygon::{
    PolyHit, edge_normal, line_polygon_contact, line_polygon_hit, point_in_polygon,
};
pub use rect::Rect;
pub use vector::Vec2;

/// Lengths below this are treated as zero (degenerate edges, null axes).
pub const EPSILON: f32 = 1e-6;
