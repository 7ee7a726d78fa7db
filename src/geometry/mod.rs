#![warn(missing_docs)]
//! Geometry kernel
//!
//! Every optical element owns exactly one [`Geometry`]: either a flat [`Geometry::Segment`] or a
//! circular arc ([`Geometry::CurvedSegment`]). This module provides the ray intersection routines
//! for both together with some vector helpers.
mod arc;
mod segment;
pub mod vector;

pub use arc::intersect_arc;
pub use segment::intersect_segment;
pub use vector::{
    direction_from_user_angle, math_angle_to_user, normalize, perpendicular, reflect,
    user_angle_to_math,
};

use crate::error::{LbError, LbResult};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use uom::si::{f64::Angle, f64::Length, length::millimeter};

/// Result of a successful ray / surface intersection.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// ray parameter of the intersection (`origin + t * dir`)
    pub t: f64,
    /// intersection point
    pub point: Point2<f64>,
    /// unit tangent of the surface at the intersection point
    pub tangent: Vector2<f64>,
    /// unit normal of the surface at the intersection point (tangent rotated by +90 degrees)
    pub normal: Vector2<f64>,
    /// midpoint of the segment (or of the chord of an arc)
    pub center: Point2<f64>,
    /// length of the segment (or the arc length)
    pub length: f64,
}

/// Shape of an optical element. All coordinates are given in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A flat interface between `p1` and `p2`.
    Segment {
        /// first endpoint
        p1: Point2<f64>,
        /// second endpoint
        p2: Point2<f64>,
    },
    /// The minor circular arc between `p1` and `p2` on the circle around `center`.
    ///
    /// The sign of `radius` records on which side of the chord the center lies (see
    /// [`Geometry::arc_through`]). Intersections only use its magnitude.
    CurvedSegment {
        /// first endpoint
        p1: Point2<f64>,
        /// second endpoint
        p2: Point2<f64>,
        /// center of the circle
        center: Point2<f64>,
        /// signed radius of the circle
        radius: f64,
    },
}
impl Geometry {
    /// Create a flat [`Geometry::Segment`] between two points.
    ///
    /// # Errors
    ///
    /// This function will return an error if the points are not finite or coincide.
    pub fn segment(p1: Point2<f64>, p2: Point2<f64>) -> LbResult<Self> {
        check_chord(&p1, &p2)?;
        Ok(Self::Segment { p1, p2 })
    }
    /// Create a flat segment of the given length centered at `center`.
    ///
    /// `normal_angle` is the direction the surface normal points to, given in the (clockwise) screen
    /// convention. A `normal_angle` of zero thus gives a vertical segment whose normal points along +X.
    ///
    /// # Errors
    ///
    /// This function will return an error if the center is not finite, the length is not positive or
    /// the angle is not finite.
    pub fn centered(center: Point2<f64>, length: Length, normal_angle: Angle) -> LbResult<Self> {
        let length = length.get::<millimeter>();
        if !length.is_finite() || length <= 0.0 {
            return Err(LbError::Element("segment length must be >0 and finite".into()));
        }
        if !normal_angle.is_finite() {
            return Err(LbError::Element("segment angle must be finite".into()));
        }
        let normal = direction_from_user_angle(normal_angle);
        let tangent = Vector2::new(normal.y, -normal.x);
        Self::segment(
            center + 0.5 * length * tangent,
            center - 0.5 * length * tangent,
        )
    }
    /// Create a [`Geometry::CurvedSegment`] from its endpoints and an explicit circle.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the endpoints coincide or any value is not finite
    ///   - the radius is zero
    ///   - the endpoints do not lie on the circle (within 1e-6 relative tolerance)
    pub fn arc(
        p1: Point2<f64>,
        p2: Point2<f64>,
        center: Point2<f64>,
        radius: f64,
    ) -> LbResult<Self> {
        let arc = Self::CurvedSegment {
            p1,
            p2,
            center,
            radius,
        };
        arc.validate()?;
        Ok(arc)
    }
    /// Create a [`Geometry::CurvedSegment`] through `p1` and `p2` with the given signed radius.
    ///
    /// A positive radius places the circle center on the side the chord normal points to (side "1"),
    /// so the arc bulges towards side "2". A negative radius mirrors this.
    ///
    /// # Errors
    ///
    /// This function will return an error if the endpoints coincide, the radius is zero or not finite,
    /// or `|radius|` is smaller than half the chord length.
    pub fn arc_through(p1: Point2<f64>, p2: Point2<f64>, radius: f64) -> LbResult<Self> {
        check_chord(&p1, &p2)?;
        if !radius.is_finite() || radius == 0.0 {
            return Err(LbError::Element("radius must be !=0 and finite".into()));
        }
        let chord = p1 - p2;
        let half_chord = 0.5 * chord.norm();
        if radius.abs() < half_chord {
            return Err(LbError::Element(
                "radius must be at least half the chord length".into(),
            ));
        }
        let tangent = chord / chord.norm();
        let normal = perpendicular(&tangent);
        let sagitta_offset = half_chord.mul_add(-half_chord, radius * radius).sqrt();
        let center = nalgebra::center(&p1, &p2) + radius.signum() * sagitta_offset * normal;
        Ok(Self::CurvedSegment {
            p1,
            p2,
            center,
            radius,
        })
    }
    /// Check a [`Geometry`] that was not built by one of the constructors (e.g. a deserialized one).
    ///
    /// # Errors
    ///
    /// This function will return an error if the endpoints coincide or are not finite. For curved
    /// segments the radius must be finite and non-zero and both endpoints must lie on the circle
    /// around `center` (within 1e-6 relative tolerance).
    pub fn validate(&self) -> LbResult<()> {
        match self {
            Self::Segment { p1, p2 } => check_chord(p1, p2),
            Self::CurvedSegment {
                p1,
                p2,
                center,
                radius,
            } => {
                check_chord(p1, p2)?;
                if !radius.is_finite() || *radius == 0.0 {
                    return Err(LbError::Element("radius must be !=0 and finite".into()));
                }
                if !(center.x.is_finite() && center.y.is_finite()) {
                    return Err(LbError::Element("arc center must be finite".into()));
                }
                let tolerance = 1e-6 * radius.abs();
                if ((p1 - center).norm() - radius.abs()).abs() > tolerance
                    || ((p2 - center).norm() - radius.abs()).abs() > tolerance
                {
                    return Err(LbError::Element(
                        "arc endpoints must lie on the circle".into(),
                    ));
                }
                Ok(())
            }
        }
    }
    /// Returns `true` if this is a [`Geometry::CurvedSegment`].
    #[must_use]
    pub const fn is_curved(&self) -> bool {
        matches!(self, Self::CurvedSegment { .. })
    }
    /// Returns both endpoints of this [`Geometry`].
    #[must_use]
    pub fn endpoints(&self) -> (Point2<f64>, Point2<f64>) {
        match self {
            Self::Segment { p1, p2 } | Self::CurvedSegment { p1, p2, .. } => (*p1, *p2),
        }
    }
    /// Returns the midpoint between both endpoints.
    #[must_use]
    pub fn chord_midpoint(&self) -> Point2<f64> {
        let (p1, p2) = self.endpoints();
        nalgebra::center(&p1, &p2)
    }
    /// Axis-aligned bounding box `(min, max)` spanned by the two endpoints.
    ///
    /// For arcs this box only covers the chord.
    #[must_use]
    pub fn bounding_box(&self) -> (Point2<f64>, Point2<f64>) {
        let (p1, p2) = self.endpoints();
        (p1.inf(&p2), p1.sup(&p2))
    }
    /// Intersect a ray with this [`Geometry`].
    ///
    /// Dispatches to [`intersect_arc`] for curved segments and to [`intersect_segment`] otherwise.
    #[must_use]
    pub fn intersect(&self, origin: &Point2<f64>, dir: &Vector2<f64>, tol: f64) -> Option<Hit> {
        match self {
            Self::Segment { p1, p2 } => intersect_segment(origin, dir, p1, p2, tol),
            Self::CurvedSegment {
                p1,
                p2,
                center,
                radius,
            } => intersect_arc(origin, dir, center, *radius, p1, p2, tol),
        }
    }
}

fn check_chord(p1: &Point2<f64>, p2: &Point2<f64>) -> LbResult<()> {
    if !(p1.x.is_finite() && p1.y.is_finite() && p2.x.is_finite() && p2.y.is_finite()) {
        return Err(LbError::Element("endpoints must be finite".into()));
    }
    if (p1 - p2).norm() <= vector::NORMALIZE_EPSILON {
        return Err(LbError::Element("endpoints must not coincide".into()));
    }
    Ok(())
}
