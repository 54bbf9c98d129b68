//! Forward-model orchestration: assembles the source magnetization once,
//! then evaluates Bx, Bz, and the total-field anomaly per observation
//! point, sequentially or in parallel.

use rayon::prelude::*;

use crate::errors::MagcylError;
use crate::geometry::EllipticCylinder;
use crate::magnetization::{resultant_magnetization, SourceMagnetization, SphericalVector};
use crate::math::{R3, R3x3, Scalar};
use crate::potential::body_field;
use crate::susceptibility::Susceptibility;

/// Magnetic field at one observation point, nT.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Geographic X (north) component.
    pub bx: Scalar,
    /// Geographic Z (down) component.
    pub bz: Scalar,
    /// Total-field anomaly: projection onto the ambient field direction.
    pub anomaly: Scalar,
}

/// Complete description of one forward problem: the body, its remanence,
/// the ambient inducing field, and the susceptibility.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderModel {
    /// Body geometry and orientation.
    pub cylinder: EllipticCylinder,
    /// Remanent magnetization (declination/inclination degrees, intensity).
    pub remanence: SphericalVector,
    /// Ambient inducing field (declination/inclination degrees, nT).
    pub ambient: SphericalVector,
    /// Body susceptibility.
    pub susceptibility: Susceptibility,
}

/// Per-model quantities shared by every observation point.
struct Evaluator {
    rotation: R3x3,
    jrd_body: R3,
    semi_major: Scalar,
    semi_minor: Scalar,
    // Projection weights onto the ambient field direction.
    north_weight: Scalar,
    down_weight: Scalar,
}

impl CylinderModel {
    /// Corrected resultant magnetization of the body.
    ///
    /// # Errors
    /// Propagates susceptibility validation and singular-correction errors.
    pub fn magnetization(&self) -> Result<SourceMagnetization, MagcylError> {
        self.susceptibility.validate()?;
        resultant_magnetization(
            &self.cylinder,
            &self.remanence,
            &self.ambient,
            &self.susceptibility,
        )
    }

    fn evaluator(&self) -> Result<Evaluator, MagcylError> {
        let magnetization = self.magnetization()?;
        let inc = self.ambient.inclination_deg.to_radians();
        let dec = self.ambient.declination_deg.to_radians();
        Ok(Evaluator {
            rotation: self.cylinder.rotation(),
            jrd_body: magnetization.body,
            semi_major: self.cylinder.semi_major(),
            semi_minor: self.cylinder.semi_minor(),
            north_weight: inc.cos() * dec.cos(),
            down_weight: inc.sin(),
        })
    }

    /// Field at a single observation point (x, y, depth positive down).
    ///
    /// # Errors
    /// Returns [`MagcylError::InteriorPoint`] when the point falls inside
    /// or on the cross-section, plus any magnetization-assembly error.
    pub fn field_at(&self, point: R3) -> Result<FieldSample, MagcylError> {
        let evaluator = self.evaluator()?;
        self.sample(&evaluator, point, 0)
    }

    /// Field along a profile of observation points. The output preserves
    /// index correspondence with `points`.
    ///
    /// # Errors
    /// Fails on the first interior point, reporting its index.
    pub fn field_profile(&self, points: &[R3]) -> Result<Vec<FieldSample>, MagcylError> {
        let evaluator = self.evaluator()?;
        points
            .iter()
            .enumerate()
            .map(|(index, &point)| self.sample(&evaluator, point, index))
            .collect()
    }

    /// Parallel variant of [`Self::field_profile`]; every point is
    /// independent, so the map distributes freely across threads and the
    /// results are identical to the sequential evaluation.
    ///
    /// # Errors
    /// Same contract as [`Self::field_profile`].
    pub fn field_profile_par(&self, points: &[R3]) -> Result<Vec<FieldSample>, MagcylError> {
        let evaluator = self.evaluator()?;
        points
            .par_iter()
            .enumerate()
            .map(|(index, &point)| self.sample(&evaluator, point, index))
            .collect()
    }

    fn sample(
        &self,
        evaluator: &Evaluator,
        point: R3,
        index: usize,
    ) -> Result<FieldSample, MagcylError> {
        let (x2, x3) = self.cylinder.body_plane_coords(&evaluator.rotation, point);
        if self.cylinder.encloses(x2, x3) {
            return Err(MagcylError::InteriorPoint { index });
        }
        let (b2, b3) = body_field(
            evaluator.semi_major,
            evaluator.semi_minor,
            x2,
            x3,
            &evaluator.jrd_body,
        );
        let rotation = &evaluator.rotation;
        let bx = b2 * rotation[(1, 0)] + b3 * rotation[(2, 0)];
        let bz = b2 * rotation[(1, 2)] + b3 * rotation[(2, 2)];
        let anomaly = bx * evaluator.north_weight + bz * evaluator.down_weight;
        Ok(FieldSample { bx, bz, anomaly })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// Vertical 50000 nT inducing field over an untilted (2, 1) cylinder
    /// buried at 5 units depth, isotropic k = 0.01, no remanence.
    fn reference_model() -> CylinderModel {
        CylinderModel {
            cylinder: EllipticCylinder::new(R3::new(0.0, 0.0, 5.0), 2.0, 1.0, 0.0).unwrap(),
            remanence: SphericalVector::new(0.0, 0.0, 0.0),
            ambient: SphericalVector::new(0.0, 90.0, 50_000.0),
            susceptibility: Susceptibility::Isotropic { intensity: 0.01 },
        }
    }

    #[test]
    fn reference_point_matches_golden_values() {
        let sample = reference_model().field_at(R3::new(0.0, 0.0, 0.0)).unwrap();
        assert!(sample.bx.abs() < 1.0e-9);
        assert_relative_eq!(sample.bz, 221.478_240_209_028, max_relative = 1.0e-10);
        assert_relative_eq!(sample.anomaly, 221.478_240_209_028, max_relative = 1.0e-10);
    }

    #[test]
    fn tilted_remanent_model_matches_regression_values() {
        let model = CylinderModel {
            cylinder: EllipticCylinder::new(R3::new(0.0, 0.0, 5.0), 2.0, 1.0, 30.0).unwrap(),
            remanence: SphericalVector::new(25.0, 40.0, 2.0),
            ambient: SphericalVector::new(-3.0, 58.0, 48_500.0),
            susceptibility: Susceptibility::Isotropic { intensity: 0.01 },
        };
        let sample = model.field_at(R3::new(10.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(sample.bx, -17.119_077_057_249, max_relative = 1.0e-10);
        assert_relative_eq!(sample.bz, -44.641_617_417_426_4, max_relative = 1.0e-10);
        assert_relative_eq!(sample.anomaly, -46.917_534_889_796_2, max_relative = 1.0e-10);
    }

    #[test]
    fn horizontal_component_vanishes_above_center_by_symmetry() {
        // Zero tilt, purely vertical inducing field, isotropic body: the
        // geometry is mirror-symmetric about the vertical through the
        // center, so Bx must vanish there.
        let sample = reference_model().field_at(R3::new(0.0, 0.0, 0.0)).unwrap();
        assert!(sample.bx.abs() < 1.0e-9, "Bx = {}", sample.bx);
    }

    #[test]
    fn anomaly_decays_monotonically_with_distance() {
        let model = reference_model();
        let mut previous = Scalar::INFINITY;
        for distance in [5.0, 10.0, 20.0, 40.0, 80.0, 160.0] {
            let sample = model.field_at(R3::new(distance, 0.0, 0.0)).unwrap();
            let magnitude = sample.bx.hypot(sample.bz);
            assert!(
                magnitude < previous,
                "field grew from {previous} to {magnitude} at x = {distance}"
            );
            previous = magnitude;
        }
    }

    #[test]
    fn interior_point_is_rejected_with_its_index() {
        let model = reference_model();
        // Depth -5 places the observation point at the cylinder center.
        let points = [R3::new(50.0, 0.0, 0.0), R3::new(0.0, 0.0, -5.0)];
        let err = model.field_profile(&points).unwrap_err();
        assert_eq!(err, MagcylError::InteriorPoint { index: 1 });
    }

    #[test]
    fn parallel_profile_matches_sequential() {
        let model = reference_model();
        let points: Vec<R3> = (0..256)
            .map(|i| R3::new(-64.0 + 0.5 * i as Scalar, 0.0, 0.0))
            .collect();
        let sequential = model.field_profile(&points).unwrap();
        let parallel = model.field_profile_par(&points).unwrap();
        assert_eq!(sequential.len(), parallel.len());
        for (s, p) in sequential.iter().zip(&parallel) {
            assert_eq!(s.bx, p.bx);
            assert_eq!(s.bz, p.bz);
            assert_eq!(s.anomaly, p.anomaly);
        }
    }

    #[test]
    fn profile_preserves_index_correspondence() {
        let model = reference_model();
        let points = [R3::new(-10.0, 0.0, 0.0), R3::new(10.0, 0.0, 0.0)];
        let profile = model.field_profile(&points).unwrap();
        let left = model.field_at(points[0]).unwrap();
        let right = model.field_at(points[1]).unwrap();
        assert_eq!(profile[0], left);
        assert_eq!(profile[1], right);
        // Mirror symmetry of the reference model about the center.
        assert_relative_eq!(left.bx, -right.bx, max_relative = 1.0e-9);
        assert_relative_eq!(left.bz, right.bz, max_relative = 1.0e-9);
    }
}
