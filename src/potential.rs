//! Potential-theory core of the elliptic cylinder.
//!
//! For a point (x2, x3) exterior to the cross-section, λ is the largest
//! root of the confocal characteristic equation
//! x2²/(a²+λ) + x3²/(b²+λ) = 1, obtained in closed form since the
//! two-axis case reduces the cubic to a quadratic. The body-frame field
//! components follow from λ, its spatial gradient, and the corrected
//! magnetization.
//!
//! All functions here assume an exterior point with a > b; the focal locus
//! (discriminant zero) and interior points are screened out by the caller.

use crate::math::{R3, Scalar};

/// In-plane distance r = √(x2² + x3²) from the cylinder axis.
#[inline]
#[must_use]
pub fn axial_distance(x2: Scalar, x3: Scalar) -> Scalar {
    x2.hypot(x3)
}

/// Discriminant δ = √(r⁴ + (a²−b²)² − 2(a²−b²)(x2²−x3²)) of the
/// characteristic quadratic.
///
/// Algebraically non-negative for real geometry; round-off can drive the
/// radicand slightly negative very near r = 0, which lies inside the body
/// and is rejected upstream.
#[must_use]
pub fn discriminant(a: Scalar, b: Scalar, x2: Scalar, x3: Scalar, r: Scalar) -> Scalar {
    let e2 = a * a - b * b;
    (r.powi(4) + e2 * e2 - 2.0 * e2 * (x2 * x2 - x3 * x3)).sqrt()
}

/// Largest root λ = (r² − a² − b² + δ)/2 of the characteristic quadratic;
/// positive strictly outside the cross-section.
#[inline]
#[must_use]
pub fn largest_root(a: Scalar, b: Scalar, r: Scalar, delta: Scalar) -> Scalar {
    (r * r - a * a - b * b + delta) / 2.0
}

/// Spatial gradient (∂λ/∂x2, ∂λ/∂x3) of the largest root.
///
/// Singular where δ = 0 (the focal locus), which lies inside the
/// cross-section and is never reached for exterior points.
#[must_use]
pub fn root_gradient(
    a: Scalar,
    b: Scalar,
    x2: Scalar,
    x3: Scalar,
    r: Scalar,
    delta: Scalar,
) -> (Scalar, Scalar) {
    let r2 = r * r;
    let dl_dx2 = x2 * (1.0 + (r2 - a * a + b * b) / delta);
    let dl_dx3 = x3 * (1.0 + (r2 + a * a - b * b) / delta);
    (dl_dx2, dl_dx3)
}

/// Body-frame field components (B2, B3) at an exterior point, from the
/// corrected magnetization `jrd` (body coordinates).
///
/// Each component combines a gradient-weighted shared term with a
/// demagnetization-difference term divided by (a² − b²); the construction
/// of [`crate::geometry::EllipticCylinder`] guarantees a > b.
#[must_use]
pub fn body_field(a: Scalar, b: Scalar, x2: Scalar, x3: Scalar, jrd: &R3) -> (Scalar, Scalar) {
    let r = axial_distance(x2, x3);
    let delta = discriminant(a, b, x2, x3, r);
    let lambda = largest_root(a, b, r, delta);
    let (dl_dx2, dl_dx3) = root_gradient(a, b, x2, x3, r, delta);

    let a2l = a * a + lambda;
    let b2l = b * b + lambda;
    let shared = (2.0 * std::f64::consts::PI * a * b) / (a2l * b2l).sqrt()
        * (jrd.y * x2 / a2l + jrd.z * x3 / b2l);

    let contrast = (4.0 * std::f64::consts::PI * a * b) / (a * a - b * b);
    let b2 = dl_dx2 * shared - contrast * jrd.y * (1.0 - (b2l / a2l).sqrt());
    let b3 = dl_dx3 * shared - contrast * jrd.z * ((a2l / b2l).sqrt() - 1.0);
    (b2, b3)
}
