//! Ray intersection with a flat, finite line segment.
use super::Hit;
use nalgebra::{Point2, Vector2};

/// Outward slack on the half length of a segment so that exact corner hits survive rounding.
const CORNER_SLACK: f64 = 1e-7;

/// Intersect the ray `origin + t * dir` (`t > tol`) with the segment from `a` to `b`.
///
/// The tangent of the segment is `(a - b) / |a - b|` and the normal is this tangent rotated by +90
/// degrees. With this orientation the normal always points towards the side "1" of refractive and
/// dichroic elements. Every physical model downstream depends on this orientation.
///
/// Returns `None` if
///   - the segment is shorter than `tol`,
///   - the ray runs parallel to the segment,
///   - the intersection lies at or behind the ray origin (`t <= tol`),
///   - the hit point is outside the segment.
#[must_use]
pub fn intersect_segment(
    origin: &Point2<f64>,
    dir: &Vector2<f64>,
    a: &Point2<f64>,
    b: &Point2<f64>,
    tol: f64,
) -> Option<Hit> {
    let chord = a - b;
    let length = chord.norm();
    if length < tol {
        return None;
    }
    let tangent = chord / length;
    let normal = Vector2::new(-tangent.y, tangent.x);
    let denominator = dir.dot(&normal);
    if denominator.abs() < tol {
        return None;
    }
    let center = nalgebra::center(a, b);
    let t = (center - origin).dot(&normal) / denominator;
    if t <= tol {
        return None;
    }
    let point = origin + t * dir;
    let along = (point - center).dot(&tangent);
    if along.abs() > 0.5f64.mul_add(length, CORNER_SLACK) {
        return None;
    }
    Some(Hit {
        t,
        point,
        tangent,
        normal,
        center,
        length,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::point;

    const TOL: f64 = 1e-9;

    #[test]
    fn hit_vertical_segment() {
        let hit = intersect_segment(
            &point![-400.0, 0.0],
            &Vector2::new(1.0, 0.0),
            &point![0.0, -40.0],
            &point![0.0, 40.0],
            TOL,
        )
        .unwrap();
        assert_abs_diff_eq!(hit.t, 400.0);
        assert_abs_diff_eq!(hit.point.x, 0.0);
        assert_abs_diff_eq!(hit.point.y, 0.0);
        assert_abs_diff_eq!(hit.length, 80.0);
        assert_eq!(hit.center, point![0.0, 0.0]);
        // tangent runs from b to a, normal is the tangent rotated by +90 degrees
        assert_abs_diff_eq!(hit.tangent.y, -1.0);
        assert_abs_diff_eq!(hit.normal.x, 1.0);
        assert_abs_diff_eq!(hit.normal.y, 0.0);
    }
    #[test]
    fn normal_orientation_follows_endpoint_order() {
        let forward = intersect_segment(
            &point![0.0, -10.0],
            &Vector2::new(0.0, 1.0),
            &point![-5.0, 0.0],
            &point![5.0, 0.0],
            TOL,
        )
        .unwrap();
        let reversed = intersect_segment(
            &point![0.0, -10.0],
            &Vector2::new(0.0, 1.0),
            &point![5.0, 0.0],
            &point![-5.0, 0.0],
            TOL,
        )
        .unwrap();
        assert_abs_diff_eq!(forward.normal.y, -1.0);
        assert_abs_diff_eq!(reversed.normal.y, 1.0);
    }
    #[test]
    fn scaled_direction() {
        let hit = intersect_segment(
            &point![0.0, 0.0],
            &Vector2::new(2.0, 0.0),
            &point![10.0, -1.0],
            &point![10.0, 1.0],
            TOL,
        )
        .unwrap();
        assert_abs_diff_eq!(hit.t, 5.0);
        assert_abs_diff_eq!(hit.point.x, 10.0);
    }
    #[test]
    fn degenerate_segment() {
        assert!(intersect_segment(
            &point![0.0, 0.0],
            &Vector2::new(1.0, 0.0),
            &point![5.0, 0.0],
            &point![5.0, 0.0],
            TOL,
        )
        .is_none());
    }
    #[test]
    fn parallel_ray() {
        assert!(intersect_segment(
            &point![0.0, 0.0],
            &Vector2::new(1.0, 0.0),
            &point![5.0, 1.0],
            &point![10.0, 1.0],
            TOL,
        )
        .is_none());
    }
    #[test]
    fn behind_origin() {
        assert!(intersect_segment(
            &point![0.0, 0.0],
            &Vector2::new(-1.0, 0.0),
            &point![5.0, -1.0],
            &point![5.0, 1.0],
            TOL,
        )
        .is_none());
        // origin exactly on the surface
        assert!(intersect_segment(
            &point![5.0, 0.0],
            &Vector2::new(1.0, 0.0),
            &point![5.0, -1.0],
            &point![5.0, 1.0],
            TOL,
        )
        .is_none());
    }
    #[test]
    fn outside_segment() {
        assert!(intersect_segment(
            &point![0.0, 2.0],
            &Vector2::new(1.0, 0.0),
            &point![5.0, -1.0],
            &point![5.0, 1.0],
            TOL,
        )
        .is_none());
    }
    #[test]
    fn corner_hit_accepted() {
        let hit = intersect_segment(
            &point![0.0, 1.0],
            &Vector2::new(1.0, 0.0),
            &point![5.0, -1.0],
            &point![5.0, 1.0],
            TOL,
        );
        assert!(hit.is_some());
    }
}
