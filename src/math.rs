//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{Matrix3, Vector3};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;
/// Convenient alias for three-by-three real matrices.
pub type R3x3 = Matrix3<Scalar>;

/// Direction cosines (ℓ, m, n) of the unit vector given by declination and
/// inclination, both in radians.
#[must_use]
pub fn direction_cosines(declination: Scalar, inclination: Scalar) -> R3 {
    R3::new(
        declination.cos() * inclination.cos(),
        declination.sin() * inclination.cos(),
        inclination.sin(),
    )
}

/// Decomposes a Cartesian vector into (intensity, declination, inclination),
/// angles in degrees: declination = atan2(y, x), inclination = asin(z/‖v‖).
///
/// A zero vector yields zero intensity and zero angles.
#[must_use]
pub fn vector_to_angles(vector: &R3) -> (Scalar, Scalar, Scalar) {
    let intensity = vector.norm();
    if intensity == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let declination = vector.y.atan2(vector.x).to_degrees();
    let inclination = (vector.z / intensity).asin().to_degrees();
    (intensity, declination, inclination)
}
