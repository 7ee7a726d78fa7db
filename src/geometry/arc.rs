//! Ray intersection with a circular arc.
use super::Hit;
use nalgebra::{Point2, Vector2};
use roots::find_roots_quadratic;
use std::f64::consts::{PI, TAU};

/// Angular slack used by the arc containment test.
const ANGLE_SLACK: f64 = 1e-9;

/// Intersect the ray `origin + t * dir` (`t > tol`) with the arc of the circle (`center`, `radius`)
/// bounded by `p1` and `p2`.
///
/// Both roots of the ray / circle quadratic are tried in ascending order. The first root in front of
/// the ray whose point lies on the arc is returned. The arc is always the shorter of the two arcs
/// between `p1` and `p2`. The returned normal is the outward radial direction, the tangent is the
/// normal rotated by -90 degrees (so that rotating the tangent by +90 degrees gives the normal again,
/// as for flat segments). The length is the arc length between the endpoints.
///
/// Only the magnitude of `radius` is used here.
#[must_use]
pub fn intersect_arc(
    origin: &Point2<f64>,
    dir: &Vector2<f64>,
    center: &Point2<f64>,
    radius: f64,
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    tol: f64,
) -> Option<Hit> {
    let radius = radius.abs();
    if radius < tol {
        return None;
    }
    let oc = origin - center;
    let a = dir.norm_squared();
    let b = 2.0 * dir.dot(&oc);
    let c = radius.mul_add(-radius, oc.norm_squared());
    let mut ts: Vec<f64> = find_roots_quadratic(a, b, c).as_ref().to_vec();
    ts.sort_by(f64::total_cmp);
    let v1 = p1 - center;
    let v2 = p2 - center;
    for t in ts {
        if t <= tol {
            continue;
        }
        let point = origin + t * dir;
        if !angle_within_arc(&(point - center), &v1, &v2) {
            continue;
        }
        let normal = (point - center) / radius;
        let tangent = Vector2::new(normal.y, -normal.x);
        let cos_span = (v1.dot(&v2) / (radius * radius)).clamp(-1.0, 1.0);
        return Some(Hit {
            t,
            point,
            tangent,
            normal,
            center: nalgebra::center(p1, p2),
            length: radius * cos_span.acos(),
        });
    }
    None
}

fn normalized_angle(v: &Vector2<f64>) -> f64 {
    v.y.atan2(v.x).rem_euclid(TAU)
}

/// Check whether the direction `v` lies on the minor arc between `v1` and `v2`.
fn angle_within_arc(v: &Vector2<f64>, v1: &Vector2<f64>, v2: &Vector2<f64>) -> bool {
    let angle = normalized_angle(v);
    let a1 = normalized_angle(v1);
    let a2 = normalized_angle(v2);
    let (start, end) = if a1 <= a2 { (a1, a2) } else { (a2, a1) };
    if end - start <= PI {
        angle >= start - ANGLE_SLACK && angle <= end + ANGLE_SLACK
    } else {
        // the minor arc wraps through 0
        angle >= end - ANGLE_SLACK || angle <= start + ANGLE_SLACK
    }
}
