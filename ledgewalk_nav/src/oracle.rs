// Geometry oracle: stateless spatial queries over a level's collidable brushes.
//
// The oracle borrows the level's brushes for the duration of one build and
// answers two questions:
// - `test_point(p)`: which solid brush contains `p`? Semi-solid brushes are
//   one-way platforms and never contain points.
// - `test_line(from, to, mode)`: what does the segment hit? Solid brushes
//   always block; semi-solid brushes block only where the hit surface is
//   walkable (landing on a platform from above). `TraceMode::Nearest`
//   returns the hit closest to `from`; `TraceMode::Fast` returns the first
//   blocking hit in brush order and is meant for yes/no obstruction checks.
//   `TraceMode::Contact` is `Nearest` where merely touching an edge end
//   counts; ground and ceiling probes use it so seams between brushes are
//   not mistaken for gaps.
//
// Queries transform into each brush's local space and defer to the polygon
// predicates in `ledgewalk_geom`.
//
// See also: `pins.rs`, `groups.rs`, `linker.rs` and `explore.rs`, which are
// the only callers.

use crate::level::{Brush, BrushKind, Level};
use crate::types::BrushId;
use ledgewalk_geom::{Vec2, line_polygon_contact, line_polygon_hit, point_in_polygon};

/// Decides whether a surface with the given outward normal can be stood on.
pub trait Walkability {
    fn is_walkable(&self, normal: Vec2) -> bool;
}

impl<F: Fn(Vec2) -> bool> Walkability for F {
    fn is_walkable(&self, normal: Vec2) -> bool {
        self(normal)
    }
}

/// Walkable when the surface normal points up steeply enough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlopeLimit {
    pub min_normal_y: f32,
}

impl Walkability for SlopeLimit {
    fn is_walkable(&self, normal: Vec2) -> bool {
        normal.y >= self.min_normal_y
    }
}

/// How thoroughly `test_line` scans the brush list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceMode {
    /// Check every brush and report the hit nearest to the segment start.
    Nearest,
    /// Stop at the first blocking brush. Only the existence of the hit is
    /// meaningful.
    Fast,
    /// Like `Nearest`, but a segment touching an edge or vertex without
    /// crossing it also hits.
    Contact,
}

/// A blocking intersection found by `test_line`, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineHit {
    pub brush: BrushId,
    pub point: Vec2,
    pub normal: Vec2,
}

/// Spatial queries over the collidable brushes of one level.
pub struct GeometryOracle<'a, W: Walkability + ?Sized> {
    brushes: Vec<(BrushId, &'a Brush)>,
    walkability: &'a W,
}

impl<'a, W: Walkability + ?Sized> GeometryOracle<'a, W> {
    /// Collect the solid and semi-solid brushes of `level`, in level order.
    pub fn new(level: &'a Level, walkability: &'a W) -> Self {
        let brushes = level
            .brushes
            .iter()
            .enumerate()
            .filter(|(_, brush)| brush.is_collidable())
            .map(|(i, brush)| (BrushId(i as u32), brush))
            .collect();
        Self {
            brushes,
            walkability,
        }
    }

    /// The brushes taking part in the build, in level order.
    pub fn brushes(&self) -> &[(BrushId, &'a Brush)] {
        &self.brushes
    }

    pub fn is_walkable(&self, normal: Vec2) -> bool {
        self.walkability.is_walkable(normal)
    }

    /// The solid brush containing `p`, if any.
    pub fn test_point(&self, p: Vec2) -> Option<BrushId> {
        self.brushes
            .iter()
            .filter(|(_, brush)| brush.kind == BrushKind::Solid)
            .find(|(_, brush)| point_in_polygon(p - brush.location, &brush.vertices))
            .map(|&(id, _)| id)
    }

    /// Intersect the segment `from -> to` with the level.
    pub fn test_line(&self, from: Vec2, to: Vec2, mode: TraceMode) -> Option<LineHit> {
        let mut best: Option<(f32, LineHit)> = None;

        for &(id, brush) in &self.brushes {
            let local_from = from - brush.location;
            let local_to = to - brush.location;
            let hit = match mode {
                TraceMode::Contact => line_polygon_contact(local_from, local_to, &brush.vertices),
                TraceMode::Nearest | TraceMode::Fast => {
                    line_polygon_hit(local_from, local_to, &brush.vertices)
                }
            };
            let Some(hit) = hit else {
                continue;
            };
            let blocks = match brush.kind {
                BrushKind::Solid => true,
                BrushKind::SemiSolid => self.walkability.is_walkable(hit.normal),
                BrushKind::NotSolid => false,
            };
            if !blocks {
                continue;
            }

            let point = hit.point + brush.location;
            let dist = from.distance_squared(point);
            if best.is_none_or(|(best_dist, _)| dist < best_dist) {
                let line_hit = LineHit {
                    brush: id,
                    point,
                    normal: hit.normal,
                };
                if mode == TraceMode::Fast {
                    return Some(line_hit);
                }
                best = Some((dist, line_hit));
            }
        }

        best.map(|(_, hit)| hit)
    }

    /// True if anything blocks the straight segment between two points.
    pub fn is_obstructed(&self, from: Vec2, to: Vec2) -> bool {
        self.test_line(from, to, TraceMode::Fast).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(brushes: Vec<Brush>) -> Level {
        Level::new("oracle", brushes)
    }

    const FLAT: SlopeLimit = SlopeLimit { min_normal_y: 0.7 };

    #[test]
    fn slope_limit_and_closures_are_walkability() {
        assert!(FLAT.is_walkable(Vec2::UP));
        assert!(!FLAT.is_walkable(Vec2::new(-1.0, 0.0)));
        let always = |_: Vec2| true;
        assert!(always.is_walkable(Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn only_solid_brushes_contain_points() {
        let lvl = level(vec![
            Brush::rect(0.0, 0.0, 10.0, 2.0, BrushKind::SemiSolid),
            Brush::rect(20.0, 0.0, 30.0, 2.0, BrushKind::Solid),
            Brush::rect(40.0, 0.0, 50.0, 2.0, BrushKind::NotSolid),
        ]);
        let oracle = GeometryOracle::new(&lvl, &FLAT);
        assert_eq!(oracle.brushes().len(), 2);
        assert_eq!(oracle.test_point(Vec2::new(5.0, 1.0)), None);
        assert_eq!(oracle.test_point(Vec2::new(25.0, 1.0)), Some(BrushId(1)));
        assert_eq!(oracle.test_point(Vec2::new(45.0, 1.0)), None);
    }

    #[test]
    fn nearest_hit_picks_closest_brush() {
        let lvl = level(vec![
            Brush::rect(0.0, 0.0, 10.0, 2.0, BrushKind::Solid),
            Brush::rect(0.0, 5.0, 10.0, 7.0, BrushKind::Solid),
        ]);
        let oracle = GeometryOracle::new(&lvl, &FLAT);
        let hit = oracle
            .test_line(Vec2::new(5.0, 10.0), Vec2::new(5.0, -10.0), TraceMode::Nearest)
            .unwrap();
        assert_eq!(hit.brush, BrushId(1));
        assert!((hit.point.y - 7.0).abs() < 1e-4);
        assert_eq!(hit.normal, Vec2::UP);
    }

    #[test]
    fn fast_trace_stops_at_first_brush_in_order() {
        let lvl = level(vec![
            Brush::rect(0.0, 0.0, 10.0, 2.0, BrushKind::Solid),
            Brush::rect(0.0, 5.0, 10.0, 7.0, BrushKind::Solid),
        ]);
        let oracle = GeometryOracle::new(&lvl, &FLAT);
        let hit = oracle
            .test_line(Vec2::new(5.0, 10.0), Vec2::new(5.0, -10.0), TraceMode::Fast)
            .unwrap();
        assert_eq!(hit.brush, BrushId(0));
        assert!(oracle.is_obstructed(Vec2::new(5.0, 10.0), Vec2::new(5.0, -10.0)));
        assert!(!oracle.is_obstructed(Vec2::new(-5.0, 3.0), Vec2::new(15.0, 3.0)));
    }

    #[test]
    fn semi_solid_blocks_only_from_above() {
        let lvl = level(vec![Brush::rect(0.0, 0.0, 10.0, 1.0, BrushKind::SemiSolid)]);
        let oracle = GeometryOracle::new(&lvl, &FLAT);

        let down = oracle.test_line(Vec2::new(5.0, 3.0), Vec2::new(5.0, -3.0), TraceMode::Nearest);
        assert_eq!(down.map(|h| h.brush), Some(BrushId(0)));

        // Jumping up through the platform: the first face hit is the bottom.
        let up = oracle.test_line(Vec2::new(5.0, -3.0), Vec2::new(5.0, 3.0), TraceMode::Nearest);
        assert!(up.is_none());

        // Walking through it sideways hits a vertical face.
        let side = oracle.test_line(Vec2::new(-3.0, 0.5), Vec2::new(13.0, 0.5), TraceMode::Nearest);
        assert!(side.is_none());
    }

    #[test]
    fn hits_respect_brush_location() {
        let lvl = level(vec![Brush::rect(100.0, 50.0, 110.0, 52.0, BrushKind::Solid)]);
        let oracle = GeometryOracle::new(&lvl, &FLAT);
        let hit = oracle
            .test_line(Vec2::new(105.0, 60.0), Vec2::new(105.0, 40.0), TraceMode::Nearest)
            .unwrap();
        assert!((hit.point.x - 105.0).abs() < 1e-4);
        assert!((hit.point.y - 52.0).abs() < 1e-4);
    }

    #[test]
    fn contact_trace_finds_seam_between_brushes() {
        let lvl = level(vec![
            Brush::rect(0.0, 0.0, 3.0, 2.0, BrushKind::Solid),
            Brush::rect(3.0, 0.0, 6.0, 2.0, BrushKind::Solid),
        ]);
        let oracle = GeometryOracle::new(&lvl, &FLAT);
        let (from, to) = (Vec2::new(3.0, 2.6), Vec2::new(3.0, 1.4));
        assert!(oracle.test_line(from, to, TraceMode::Nearest).is_none());
        let hit = oracle.test_line(from, to, TraceMode::Contact).unwrap();
        assert!((hit.point.y - 2.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec2::UP);
    }

    #[test]
    fn contact_trace_lands_on_semi_solid_corner() {
        let lvl = level(vec![Brush::rect(0.0, 0.0, 10.0, 1.0, BrushKind::SemiSolid)]);
        let oracle = GeometryOracle::new(&lvl, &FLAT);
        let hit = oracle.test_line(Vec2::new(10.0, 3.0), Vec2::new(10.0, -3.0), TraceMode::Contact);
        assert_eq!(hit.map(|h| h.normal), Some(Vec2::UP));
    }
}
