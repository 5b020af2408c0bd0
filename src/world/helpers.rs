//! Stateless 2-D geometry used by the locator and the raycaster.

use glam::Vec2;

/// Denominators below this are treated as parallel / degenerate.
pub const EPSILON: f32 = 1e-6;

// ──────────────────────────────────────────────────────────────────────────
//                       segment / segment
// ──────────────────────────────────────────────────────────────────────────

/// Intersection point of segments `p1→p2` and `p3→p4`.
///
/// ```text
/// den = (x1-x2)(y3-y4) - (y1-y2)(x3-x4)
/// t   = ((x1-x3)(y3-y4) - (y1-y3)(x3-x4)) / den     along p1→p2
/// u   = ((x1-x3)(y1-y2) - (y1-y3)(x1-x2)) / den     along p3→p4
/// ```
///
/// `None` for parallel or collinear input and when either parameter falls
/// outside `[0, 1]`.
pub fn segment_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let den = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if den.abs() < EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / den;
    let u = ((p1.x - p3.x) * (p1.y - p2.y) - (p1.y - p3.y) * (p1.x - p2.x)) / den;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(p1 + (p2 - p1) * t)
}

// ──────────────────────────────────────────────────────────────────────────
//                       point / segment
// ──────────────────────────────────────────────────────────────────────────

/// Distance from `p` to the closest point of segment `a→b` (not the line).
pub fn point_to_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

// ──────────────────────────────────────────────────────────────────────────
//                       point / polygon
// ──────────────────────────────────────────────────────────────────────────

/// Even-odd crossing test.  Polygons with fewer than 3 vertices contain
/// nothing.
pub fn point_in_polygon(p: Vec2, vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        // edge straddles the horizontal line through p, and the crossing
        // lies to the right of p
        if (vi.y > p.y) != (vj.y > p.y)
            && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Unsigned shoelace area.
pub fn polygon_area(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let n = vertices.len();
    let twice: f32 = (0..n)
        .map(|i| vertices[i].perp_dot(vertices[(i + 1) % n]))
        .sum();
    twice.abs() * 0.5
}

// ──────────────────────────────────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn square(size: f32) -> Vec<Vec2> {
        vec![
            vec2(0.0, 0.0),
            vec2(size, 0.0),
            vec2(size, size),
            vec2(0.0, size),
        ]
    }

    #[test]
    fn crossing_segments_meet() {
        let hit = segment_intersect(
            vec2(0.0, 0.0),
            vec2(10.0, 10.0),
            vec2(0.0, 10.0),
            vec2(10.0, 0.0),
        )
        .unwrap();
        assert!((hit - vec2(5.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn parallel_segments_never_meet() {
        assert_eq!(
            segment_intersect(
                vec2(0.0, 0.0),
                vec2(10.0, 0.0),
                vec2(0.0, 1.0),
                vec2(10.0, 1.0)
            ),
            None
        );
        // collinear counts as parallel
        assert_eq!(
            segment_intersect(
                vec2(0.0, 0.0),
                vec2(10.0, 0.0),
                vec2(2.0, 0.0),
                vec2(5.0, 0.0)
            ),
            None
        );
    }

    #[test]
    fn lines_that_cross_beyond_the_segments_miss() {
        // infinite lines meet at (5,5) but the second segment stops short
        assert_eq!(
            segment_intersect(
                vec2(0.0, 0.0),
                vec2(10.0, 10.0),
                vec2(0.0, 10.0),
                vec2(2.0, 8.0)
            ),
            None
        );
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = vec2(0.0, 0.0);
        let b = vec2(10.0, 0.0);
        assert!((point_to_segment_distance(vec2(5.0, 3.0), a, b) - 3.0).abs() < 1e-5);
        // beyond `b`: distance to the endpoint, not to the infinite line
        assert!((point_to_segment_distance(vec2(13.0, 4.0), a, b) - 5.0).abs() < 1e-5);
        // zero-length segment
        assert!((point_to_segment_distance(vec2(3.0, 4.0), a, a) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn polygon_containment() {
        let sq = square(10.0);
        assert!(point_in_polygon(vec2(5.0, 5.0), &sq));
        assert!(point_in_polygon(vec2(0.5, 9.5), &sq));
        assert!(!point_in_polygon(vec2(-1.0, 5.0), &sq));
        assert!(!point_in_polygon(vec2(5.0, 11.0), &sq));
    }

    #[test]
    fn polygon_with_two_vertices_contains_nothing() {
        let line = [vec2(0.0, 0.0), vec2(10.0, 10.0)];
        assert!(!point_in_polygon(vec2(5.0, 5.0), &line));
        assert!(!point_in_polygon(vec2(0.0, 0.0), &[]));
    }

    #[test]
    fn shoelace_is_winding_independent() {
        let mut sq = square(10.0);
        assert!((polygon_area(&sq) - 100.0).abs() < 1e-4);
        sq.reverse();
        assert!((polygon_area(&sq) - 100.0).abs() < 1e-4);
        assert_eq!(polygon_area(&sq[..2]), 0.0);
    }
}
