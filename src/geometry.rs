//! Elliptic-cylinder geometry: validated construction, the geographic→body
//! change of basis, demagnetization factors, and the body-plane mapping.
//!
//! Conventions follow the geophysical forward-model literature: x is
//! geographic north, z is depth (positive downward), and the cylinder axis
//! is horizontal along geographic y. The tilt angle is the inclination of
//! the major axis with respect to the horizontal plane.

use crate::errors::MagcylError;
use crate::math::{R3, R3x3, Scalar};

/// Uniformly magnetized elliptic cylinder: center, cross-section semi-axes,
/// and tilt of the major axis (degrees, 0–90 expected).
///
/// Construction enforces `semi_major > semi_minor > 0`; the exterior field
/// formulas divide by (a² − b²) and are singular for circular sections.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticCylinder {
    center: R3,
    semi_major: Scalar,
    semi_minor: Scalar,
    tilt_deg: Scalar,
}

impl EllipticCylinder {
    /// Creates a cylinder, rejecting degenerate cross-sections.
    ///
    /// `center` is (x, y, depth) with depth positive downward.
    pub fn new(
        center: R3,
        semi_major: Scalar,
        semi_minor: Scalar,
        tilt_deg: Scalar,
    ) -> Result<Self, MagcylError> {
        if !(semi_major > semi_minor && semi_minor > 0.0) {
            return Err(MagcylError::DegenerateAxes {
                semi_major,
                semi_minor,
            });
        }
        Ok(Self {
            center,
            semi_major,
            semi_minor,
            tilt_deg,
        })
    }

    /// Cylinder center (x, y, depth).
    #[must_use]
    pub const fn center(&self) -> R3 {
        self.center
    }

    /// Semi-major axis of the cross-section.
    #[must_use]
    pub const fn semi_major(&self) -> Scalar {
        self.semi_major
    }

    /// Semi-minor axis of the cross-section.
    #[must_use]
    pub const fn semi_minor(&self) -> Scalar {
        self.semi_minor
    }

    /// Tilt of the major axis above the horizontal plane, degrees.
    #[must_use]
    pub const fn tilt_deg(&self) -> Scalar {
        self.tilt_deg
    }

    /// Change-of-basis matrix from geographic to body coordinates.
    ///
    /// Row 0 is the cylinder axis (geographic y); rows 1 and 2 span the
    /// cross-section plane, tilted by δ. The matrix is orthogonal, so its
    /// transpose is the body→geographic map.
    #[must_use]
    pub fn rotation(&self) -> R3x3 {
        let delta = self.tilt_deg.to_radians();
        let (sin_d, cos_d) = delta.sin_cos();
        R3x3::new(
            0.0, 1.0, 0.0, //
            cos_d, 0.0, -sin_d, //
            -sin_d, 0.0, -cos_d,
        )
    }

    /// Demagnetization factors (N2, N3) along the cross-section axes.
    ///
    /// N2 = 4πb/(a+b), N3 = 4πa/(a+b); they depend only on the axis ratio
    /// and satisfy N2·(a+b) = 4πb and N3·(a+b) = 4πa.
    #[must_use]
    pub fn demagnetization_factors(&self) -> (Scalar, Scalar) {
        let four_pi = 4.0 * std::f64::consts::PI;
        let sum = self.semi_major + self.semi_minor;
        (
            four_pi * self.semi_minor / sum,
            four_pi * self.semi_major / sum,
        )
    }

    /// Maps an observation point (x, y, depth) to the in-plane body
    /// coordinates (x2, x3) centered on the cylinder.
    ///
    /// The depth column carries the source's sign convention: depths are
    /// positive downward and the center depth is added, not subtracted.
    #[must_use]
    pub fn body_plane_coords(&self, rotation: &R3x3, point: R3) -> (Scalar, Scalar) {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        let dz = point.z + self.center.z;
        let x2 = dx * rotation[(1, 0)] + dy * rotation[(1, 1)] - dz * rotation[(1, 2)];
        let x3 = dx * rotation[(2, 0)] + dy * rotation[(2, 1)] - dz * rotation[(2, 2)];
        (x2, x3)
    }

    /// True when (x2, x3) lies inside or on the cross-section ellipse,
    /// where the exterior field formulas do not apply.
    #[must_use]
    pub fn encloses(&self, x2: Scalar, x3: Scalar) -> bool {
        let u = x2 / self.semi_major;
        let v = x3 / self.semi_minor;
        u * u + v * v <= 1.0
    }
}
