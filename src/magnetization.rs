//! Magnetization assembly: induced and remanent contributions in body
//! coordinates, and the self-demagnetization correction.

use crate::errors::MagcylError;
use crate::geometry::EllipticCylinder;
use crate::math::{direction_cosines, vector_to_angles, R3, R3x3, Scalar};
use crate::susceptibility::Susceptibility;

/// A vector given in the geophysical angular convention: declination and
/// inclination in degrees plus an intensity. Used for both the remanent
/// magnetization and the ambient (inducing) field.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalVector {
    /// Declination, degrees east of geographic north.
    pub declination_deg: Scalar,
    /// Inclination, degrees below horizontal.
    pub inclination_deg: Scalar,
    /// Vector magnitude (nT for fields, A/m-scale for magnetizations).
    pub intensity: Scalar,
}

impl SphericalVector {
    /// Creates an angular vector from degrees and intensity.
    #[must_use]
    pub const fn new(declination_deg: Scalar, inclination_deg: Scalar, intensity: Scalar) -> Self {
        Self {
            declination_deg,
            inclination_deg,
            intensity,
        }
    }

    /// Unit direction cosines of this vector.
    #[must_use]
    pub fn direction(&self) -> R3 {
        direction_cosines(
            self.declination_deg.to_radians(),
            self.inclination_deg.to_radians(),
        )
    }

    /// Cartesian form, intensity times direction cosines.
    #[must_use]
    pub fn cartesian(&self) -> R3 {
        self.direction() * self.intensity
    }
}

/// Resultant magnetization of the body after the self-demagnetization
/// correction, reported in body coordinates, geographic coordinates, and
/// angular (intensity/declination/inclination) form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceMagnetization {
    /// Corrected magnetization in body coordinates.
    pub body: R3,
    /// Corrected magnetization in geographic coordinates.
    pub geographic: R3,
    /// Magnitude of the corrected magnetization.
    pub intensity: Scalar,
    /// Declination of the corrected magnetization, degrees.
    pub declination_deg: Scalar,
    /// Inclination of the corrected magnetization, degrees.
    pub inclination_deg: Scalar,
}

/// Assembles the corrected resultant magnetization of the cylinder.
///
/// The induced part is the ambient field rotated into body coordinates and
/// passed through the susceptibility tensor; the remanent part is rotated
/// directly. The self-demagnetization correction solves
/// (I + N·k)·J_corrected = J for the two in-plane tensor columns, both
/// scaled by the minor-axis factor N2, matching the published
/// elliptic-cylinder formulation (N3 enters the field terms, not the
/// correction).
///
/// # Errors
/// Returns [`MagcylError::SingularDemagnetization`] when the correction
/// matrix has no inverse.
pub fn resultant_magnetization(
    cylinder: &EllipticCylinder,
    remanence: &SphericalVector,
    ambient: &SphericalVector,
    susceptibility: &Susceptibility,
) -> Result<SourceMagnetization, MagcylError> {
    let rotation = cylinder.rotation();
    let km = susceptibility.tensor(&rotation);

    let ambient_body = rotation * ambient.cartesian();
    let remanent_body = rotation * remanence.cartesian();

    let uncorrected = km * ambient_body + remanent_body;
    let body = correct_for_self_demagnetization(cylinder, &km, &uncorrected)?;

    let geographic = rotation.transpose() * body;
    let (intensity, declination_deg, inclination_deg) = vector_to_angles(&geographic);
    Ok(SourceMagnetization {
        body,
        geographic,
        intensity,
        declination_deg,
        inclination_deg,
    })
}

/// Solves (I + N·k)·J_corrected = J, where N·k scales susceptibility
/// columns 1 and 2 by N2 and leaves the axis column untouched.
fn correct_for_self_demagnetization(
    cylinder: &EllipticCylinder,
    km: &R3x3,
    uncorrected: &R3,
) -> Result<R3, MagcylError> {
    let (n2, _n3) = cylinder.demagnetization_factors();
    let scaled = R3x3::from_columns(&[
        R3::zeros(),
        km.column(1) * n2,
        km.column(2) * n2,
    ]);
    let system = R3x3::identity() + scaled;
    let inverse = system
        .try_inverse()
        .ok_or(MagcylError::SingularDemagnetization)?;
    Ok(inverse * uncorrected)
}
