// Polygon predicates over vertex slices.
//
// - `point_in_polygon`: crossing-number (even-odd) test, works for convex and
//   concave polygons of either winding.
// - `segment_intersection`: strict crossing of two segments. Touching at an
//   endpoint or running collinear does not count, so a probe grazing a
//   vertex passes through.
// - `segment_overlaps_polygon`: separating-axis test over the polygon's edge
//   normals and the segment's own normal. Cheap rejection only; for concave
//   polygons it tests against the convex hull.
// - `line_polygon_hit`: SAT rejection, then the crossing nearest to the
//   segment start with that edge's outward normal.
// - `segment_contact` / `line_polygon_contact`: inclusive variants where a
//   segment touching an edge or a vertex counts. Ground and ceiling probes
//   need these so a probe landing on a seam between two brushes still
//   finds a surface.
//
// See also: `ledgewalk_nav::oracle` which lifts these into level-wide
// queries over brushes placed in world space.

use crate::EPSILON;
use crate::vector::Vec2;

/// Where a segment first meets a polygon boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolyHit {
    pub point: Vec2,
    /// Unit normal of the edge that was hit. For a segment that starts buried
    /// inside the polygon this is the reversed segment direction.
    pub normal: Vec2,
}

/// Iterate polygon edges as `(v1, v2)` pairs, starting with the closing
/// edge `last -> first`.
pub fn edges(verts: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    verts.iter().enumerate().map(move |(i, &v2)| {
        let v1 = if i == 0 { verts[verts.len() - 1] } else { verts[i - 1] };
        (v1, v2)
    })
}

/// Outward unit normal of the edge `v1 -> v2` for clockwise (y-up) winding.
/// Zero for a degenerate edge.
pub fn edge_normal(v1: Vec2, v2: Vec2) -> Vec2 {
    (v2 - v1).normalized().perp()
}

/// Returns `true` if `p` lies strictly inside the polygon.
pub fn point_in_polygon(p: Vec2, verts: &[Vec2]) -> bool {
    if verts.len() < 3 {
        return false;
    }
    let mut inside = false;
    for (a, b) in edges(verts) {
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Strict intersection point of segments `a1-a2` and `b1-b2`.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let a_dir = a2 - a1;
    let b_dir = b2 - b1;
    let a_normal = a_dir.perp();
    let b_normal = b_dir.perp();

    let a_offset = a1.dot(a_normal);
    let b_offset = b1.dot(b_normal);

    // Signed distances of each segment's endpoints from the other's line.
    let t_a1 = a1.dot(b_normal) - b_offset;
    let t_a2 = a2.dot(b_normal) - b_offset;
    let t_b1 = b1.dot(a_normal) - a_offset;
    let t_b2 = b2.dot(a_normal) - a_offset;

    if t_a1 * t_a2 >= 0.0 || t_b1 * t_b2 >= 0.0 {
        return None;
    }
    let t = t_a1 / (t_a1 - t_a2);
    Some(a1 + a_dir * t)
}

/// Slack on the edge parameters of `segment_contact`, so that contact at a
/// shared vertex survives rounding in local-space transforms.
const CONTACT_SLACK: f32 = 1e-5;

/// Intersection of segments `a1-a2` and `b1-b2`, counting a touch at either
/// segment's endpoints. Parallel and collinear segments never meet.
pub fn segment_contact(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let a_dir = a2 - a1;
    let b_dir = b2 - b1;
    let denom = a_dir.cross(b_dir);
    if denom.abs() <= EPSILON {
        return None;
    }
    let offset = b1 - a1;
    let t = offset.cross(b_dir) / denom;
    let u = offset.cross(a_dir) / denom;
    let range = -CONTACT_SLACK..=1.0 + CONTACT_SLACK;
    if range.contains(&t) && range.contains(&u) {
        Some(a1 + a_dir * t.clamp(0.0, 1.0))
    } else {
        None
    }
}

fn project(points: impl Iterator<Item = Vec2>, axis: Vec2) -> (f32, f32) {
    points.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

/// Separating-axis test between segment `a-b` and the polygon. Projections
/// that merely touch count as separated.
pub fn segment_overlaps_polygon(a: Vec2, b: Vec2, verts: &[Vec2]) -> bool {
    if verts.len() < 3 {
        return false;
    }
    let segment_axis = (b - a).perp();
    let axes = edges(verts)
        .map(|(v1, v2)| (v2 - v1).perp())
        .chain(std::iter::once(segment_axis));

    for axis in axes {
        if axis.length_squared() <= EPSILON * EPSILON {
            continue;
        }
        let (seg_min, seg_max) = project([a, b].into_iter(), axis);
        let (poly_min, poly_max) = project(verts.iter().copied(), axis);
        if seg_max <= poly_min || poly_max <= seg_min {
            return false;
        }
    }
    true
}

/// Nearest hit of segment `a-b` against the polygon, measured from `a`.
///
/// A segment that overlaps the polygon without crossing any edge while `a`
/// is inside is buried in it; that reports a hit at `a` itself.
pub fn line_polygon_hit(a: Vec2, b: Vec2, verts: &[Vec2]) -> Option<PolyHit> {
    if !segment_overlaps_polygon(a, b, verts) {
        return None;
    }

    let mut best: Option<(f32, PolyHit)> = None;
    for (v1, v2) in edges(verts) {
        let Some(point) = segment_intersection(a, b, v1, v2) else {
            continue;
        };
        let dist = a.distance_squared(point);
        if best.is_none_or(|(best_dist, _)| dist < best_dist) {
            best = Some((
                dist,
                PolyHit {
                    point,
                    normal: edge_normal(v1, v2),
                },
            ));
        }
    }

    match best {
        Some((_, hit)) => Some(hit),
        None if point_in_polygon(a, verts) => Some(PolyHit {
            point: a,
            normal: -(b - a).normalized(),
        }),
        None => None,
    }
}

/// Nearest contact of segment `a-b` with the polygon boundary, counting
/// touches at edge ends. When several edges meet at the contact point (a
/// vertex), the edge facing the segment most directly is reported.
///
/// Buried segments report a hit at `a`, as in `line_polygon_hit`.
pub fn line_polygon_contact(a: Vec2, b: Vec2, verts: &[Vec2]) -> Option<PolyHit> {
    if verts.len() < 3 {
        return None;
    }
    let dir = (b - a).normalized();
    let mut best: Option<(f32, PolyHit)> = None;
    for (v1, v2) in edges(verts) {
        let Some(point) = segment_contact(a, b, v1, v2) else {
            continue;
        };
        let normal = edge_normal(v1, v2);
        let dist = a.distance_squared(point);
        let better = match best {
            None => true,
            Some((best_dist, best_hit)) => {
                dist < best_dist - EPSILON
                    || (dist <= best_dist + EPSILON && normal.dot(dir) < best_hit.normal.dot(dir))
            }
        };
        if better {
            best = Some((dist, PolyHit { point, normal }));
        }
    }

    match best {
        Some((_, hit)) => Some(hit),
        None if point_in_polygon(a, verts) => Some(PolyHit {
            point: a,
            normal: -dir,
        }),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clockwise (y-up) box spanning `x0..x1`, `y0..y1`.
    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(x0, y0),
            Vec2::new(x0, y1),
            Vec2::new(x1, y1),
            Vec2::new(x1, y0),
        ]
    }

    #[test]
    fn clockwise_edges_have_outward_normals() {
        let verts = rect(0.0, 0.0, 10.0, 2.0);
        let normals: Vec<Vec2> = edges(&verts).map(|(a, b)| edge_normal(a, b)).collect();
        // Closing edge (10,0)->(0,0) is the floor, then left, top, right.
        assert_eq!(normals[0], Vec2::new(0.0, -1.0));
        assert_eq!(normals[1], Vec2::new(-1.0, 0.0));
        assert_eq!(normals[2], Vec2::new(0.0, 1.0));
        assert_eq!(normals[3], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn point_containment() {
        let verts = rect(0.0, 0.0, 10.0, 2.0);
        assert!(point_in_polygon(Vec2::new(5.0, 1.0), &verts));
        assert!(!point_in_polygon(Vec2::new(5.0, 2.6), &verts));
        assert!(!point_in_polygon(Vec2::new(-0.1, 1.0), &verts));
    }

    #[test]
    fn point_containment_concave() {
        // An L shape: the notch at the top right is outside.
        let verts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(2.0, 4.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(4.0, 0.0),
        ];
        assert!(point_in_polygon(Vec2::new(1.0, 3.0), &verts));
        assert!(point_in_polygon(Vec2::new(3.0, 1.0), &verts));
        assert!(!point_in_polygon(Vec2::new(3.0, 3.0), &verts));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let verts = vec![Vec2::ZERO, Vec2::new(1.0, 1.0)];
        assert!(!point_in_polygon(Vec2::new(0.5, 0.5), &verts));
        assert!(line_polygon_hit(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), &verts).is_none());
    }

    #[test]
    fn crossing_segments_meet() {
        let hit = segment_intersection(
            Vec2::new(5.0, 3.0),
            Vec2::new(5.0, 1.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(10.0, 2.0),
        )
        .unwrap();
        assert!((hit.x - 5.0).abs() < 1e-5);
        assert!((hit.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn touching_segments_do_not_count() {
        // Probe ends exactly on the edge.
        assert!(
            segment_intersection(
                Vec2::new(5.0, 3.0),
                Vec2::new(5.0, 2.0),
                Vec2::new(0.0, 2.0),
                Vec2::new(10.0, 2.0),
            )
            .is_none()
        );
        // Collinear overlap.
        assert!(
            segment_intersection(
                Vec2::new(1.0, 0.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(2.0, 0.0),
                Vec2::new(4.0, 0.0),
            )
            .is_none()
        );
    }

    #[test]
    fn sat_separates_disjoint_segment() {
        let verts = rect(0.0, 0.0, 10.0, 2.0);
        assert!(!segment_overlaps_polygon(
            Vec2::new(-5.0, 3.0),
            Vec2::new(15.0, 3.0),
            &verts
        ));
        // Diagonal passing beyond the corner; only the segment's own axis
        // separates it.
        assert!(!segment_overlaps_polygon(
            Vec2::new(9.0, 4.0),
            Vec2::new(13.0, 0.0),
            &verts
        ));
        assert!(segment_overlaps_polygon(
            Vec2::new(5.0, 3.0),
            Vec2::new(5.0, 1.0),
            &verts
        ));
    }

    #[test]
    fn nearest_hit_is_reported() {
        let verts = rect(0.0, 0.0, 10.0, 2.0);
        let hit = line_polygon_hit(Vec2::new(-2.0, 1.0), Vec2::new(12.0, 1.0), &verts).unwrap();
        assert!(hit.point.x.abs() < 1e-5);
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));

        let hit = line_polygon_hit(Vec2::new(12.0, 1.0), Vec2::new(-2.0, 1.0), &verts).unwrap();
        assert!((hit.point.x - 10.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn downward_probe_hits_top_face() {
        let verts = rect(0.0, 0.0, 10.0, 2.0);
        let hit = line_polygon_hit(Vec2::new(4.0, 2.6), Vec2::new(4.0, 1.4), &verts).unwrap();
        assert!((hit.point.y - 2.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec2::UP);
    }

    #[test]
    fn buried_segment_hits_at_start() {
        let verts = rect(0.0, 0.0, 10.0, 2.0);
        let hit = line_polygon_hit(Vec2::new(2.0, 1.0), Vec2::new(4.0, 1.0), &verts).unwrap();
        assert_eq!(hit.point, Vec2::new(2.0, 1.0));
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn probe_along_vertical_edge_misses() {
        let verts = rect(0.0, 0.0, 10.0, 2.0);
        assert!(line_polygon_hit(Vec2::new(10.0, 3.0), Vec2::new(10.0, -1.0), &verts).is_none());
    }

    #[test]
    fn contact_counts_touching_endpoints() {
        let hit = segment_contact(
            Vec2::new(5.0, 3.0),
            Vec2::new(5.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(10.0, 2.0),
        )
        .unwrap();
        assert!((hit.y - 2.0).abs() < 1e-5);
        // Edge ending exactly where the probe passes.
        assert!(
            segment_contact(
                Vec2::new(6.0, 2.6),
                Vec2::new(6.0, 1.4),
                Vec2::new(3.0, 2.0),
                Vec2::new(6.0, 2.0),
            )
            .is_some()
        );
        // Collinear still does not count.
        assert!(
            segment_contact(
                Vec2::new(1.0, 0.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(2.0, 0.0),
                Vec2::new(4.0, 0.0),
            )
            .is_none()
        );
        assert!(
            segment_contact(
                Vec2::new(5.0, 3.0),
                Vec2::new(5.0, 2.5),
                Vec2::new(0.0, 2.0),
                Vec2::new(10.0, 2.0),
            )
            .is_none()
        );
    }

    #[test]
    fn contact_at_corner_reports_facing_edge() {
        // Straight down onto the top-right corner: the top face and the
        // right wall meet there; the top face opposes the probe.
        let verts = rect(0.0, 0.0, 10.0, 2.0);
        assert!(line_polygon_hit(Vec2::new(10.0, 2.6), Vec2::new(10.0, 1.4), &verts).is_none());
        let hit =
            line_polygon_contact(Vec2::new(10.0, 2.6), Vec2::new(10.0, 1.4), &verts).unwrap();
        assert!((hit.point.y - 2.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec2::UP);
    }

    #[test]
    fn contact_reaches_spike_apex() {
        // Downward spike; an upward probe through the apex touches it
        // before crossing the top.
        let verts = vec![Vec2::new(5.0, 4.0), Vec2::new(4.0, 6.0), Vec2::new(6.0, 6.0)];
        let from = Vec2::new(5.0, 2.6);
        let to = Vec2::new(5.0, 10.0);
        let strict = line_polygon_hit(from, to, &verts).unwrap();
        assert!((strict.point.y - 6.0).abs() < 1e-5);
        let contact = line_polygon_contact(from, to, &verts).unwrap();
        assert!((contact.point.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn contact_misses_clear_segment() {
        let verts = rect(0.0, 0.0, 10.0, 2.0);
        assert!(line_polygon_contact(Vec2::new(-5.0, 3.0), Vec2::new(15.0, 3.0), &verts).is_none());
    }
}
