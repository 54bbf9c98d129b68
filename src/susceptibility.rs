//! Susceptibility descriptors and assembly of the body-frame tensor.
//!
//! The caller states explicitly whether the body is isotropic or carries
//! three principal susceptibility directions; the choice is a tagged enum
//! rather than an equality test on floating-point intensities.

use crate::errors::MagcylError;
use crate::math::{direction_cosines, R3, R3x3, Scalar};

/// One principal susceptibility axis: intensity (SI) plus the declination
/// and inclination of the axis direction, degrees.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalSusceptibility {
    /// Susceptibility intensity along this axis (dimensionless SI).
    pub intensity: Scalar,
    /// Declination of the axis direction, degrees.
    pub declination_deg: Scalar,
    /// Inclination of the axis direction, degrees (within ±90).
    pub inclination_deg: Scalar,
}

/// Magnetic susceptibility of the body.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Susceptibility {
    /// Single scalar susceptibility, identical along all three body axes.
    Isotropic {
        /// Susceptibility intensity (dimensionless SI).
        intensity: Scalar,
    },
    /// Three principal axes with individual intensities and directions.
    Anisotropic {
        /// Principal axes in body order.
        axes: [PrincipalSusceptibility; 3],
    },
}

impl Susceptibility {
    /// Boundary validation: intensities must be non-negative and principal
    /// inclinations within ±90°.
    pub fn validate(&self) -> Result<(), MagcylError> {
        match self {
            Self::Isotropic { intensity } => {
                if *intensity < 0.0 {
                    return Err(MagcylError::InvalidSusceptibility(format!(
                        "negative intensity {intensity}"
                    )));
                }
            }
            Self::Anisotropic { axes } => {
                for (i, axis) in axes.iter().enumerate() {
                    if axis.intensity < 0.0 {
                        return Err(MagcylError::InvalidSusceptibility(format!(
                            "negative intensity {} on axis {i}",
                            axis.intensity
                        )));
                    }
                    if axis.inclination_deg.abs() > 90.0 {
                        return Err(MagcylError::InvalidSusceptibility(format!(
                            "inclination {}° on axis {i} outside ±90°",
                            axis.inclination_deg
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Assembles the symmetric 3×3 susceptibility tensor in body
    /// coordinates given the geographic→body rotation.
    ///
    /// The isotropic arm contracts the rotation rows against themselves
    /// with equal weights; the anisotropic arm contracts the per-axis
    /// direction cosines against the rotation rows instead.
    #[must_use]
    pub fn tensor(&self, rotation: &R3x3) -> R3x3 {
        match self {
            Self::Isotropic { intensity } => {
                let weights = [*intensity; 3];
                let directions = [
                    rotation.row(0).transpose(),
                    rotation.row(1).transpose(),
                    rotation.row(2).transpose(),
                ];
                contract(&weights, &directions, rotation)
            }
            Self::Anisotropic { axes } => {
                let weights = [axes[0].intensity, axes[1].intensity, axes[2].intensity];
                let directions = [
                    direction_cosines(
                        axes[0].declination_deg.to_radians(),
                        axes[0].inclination_deg.to_radians(),
                    ),
                    direction_cosines(
                        axes[1].declination_deg.to_radians(),
                        axes[1].inclination_deg.to_radians(),
                    ),
                    direction_cosines(
                        axes[2].declination_deg.to_radians(),
                        axes[2].inclination_deg.to_radians(),
                    ),
                ];
                contract(&weights, &directions, rotation)
            }
        }
    }
}

/// km[i][j] = Σ_r w_r · (d_r · row_i) · (d_r · row_j).
fn contract(weights: &[Scalar; 3], directions: &[R3; 3], rotation: &R3x3) -> R3x3 {
    let mut km = R3x3::zeros();
    for i in 0..3 {
        for j in 0..3 {
            let mut sum = 0.0;
            for r in 0..3 {
                let di = directions[r].dot(&rotation.row(i).transpose());
                let dj = directions[r].dot(&rotation.row(j).transpose());
                sum += weights[r] * di * dj;
            }
            km[(i, j)] = sum;
        }
    }
    km
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::EllipticCylinder;

    #[test]
    fn isotropic_tensor_is_diagonal_for_orthogonal_rotation() {
        let cyl = EllipticCylinder::new(R3::zeros(), 2.0, 1.0, 37.0).unwrap();
        let km = Susceptibility::Isotropic { intensity: 0.01 }.tensor(&cyl.rotation());
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 0.01 } else { 0.0 };
                assert_relative_eq!(km[(i, j)], expected, epsilon = 1.0e-14);
            }
        }
    }

    #[test]
    fn anisotropic_tensor_matches_isotropic_when_axes_coincide() {
        // With zero tilt the body axes point along geographic y, x, and -z;
        // principal directions aligned with those rows must reproduce the
        // isotropic contraction for equal intensities.
        let cyl = EllipticCylinder::new(R3::zeros(), 2.0, 1.0, 0.0).unwrap();
        let rotation = cyl.rotation();
        let iso = Susceptibility::Isotropic { intensity: 0.02 }.tensor(&rotation);
        let aligned = |declination_deg, inclination_deg| PrincipalSusceptibility {
            intensity: 0.02,
            declination_deg,
            inclination_deg,
        };
        let aniso = Susceptibility::Anisotropic {
            axes: [aligned(90.0, 0.0), aligned(0.0, 0.0), aligned(0.0, -90.0)],
        }
        .tensor(&rotation);
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(aniso[(i, j)], iso[(i, j)], epsilon = 1.0e-12);
            }
        }
    }

    #[test]
    fn tensor_is_symmetric_for_arbitrary_axes() {
        let cyl = EllipticCylinder::new(R3::zeros(), 3.0, 1.5, 25.0).unwrap();
        let axes = [
            PrincipalSusceptibility {
                intensity: 0.013,
                declination_deg: 12.0,
                inclination_deg: 40.0,
            },
            PrincipalSusceptibility {
                intensity: 0.009,
                declination_deg: 102.0,
                inclination_deg: -5.0,
            },
            PrincipalSusceptibility {
                intensity: 0.004,
                declination_deg: 195.0,
                inclination_deg: 50.0,
            },
        ];
        let km = Susceptibility::Anisotropic { axes }.tensor(&cyl.rotation());
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(km[(i, j)], km[(j, i)], epsilon = 1.0e-15);
            }
        }
    }

    #[test]
    fn validation_rejects_bad_descriptors() {
        assert!(Susceptibility::Isotropic { intensity: -0.01 }
            .validate()
            .is_err());
        let bad_inclination = PrincipalSusceptibility {
            intensity: 0.01,
            declination_deg: 0.0,
            inclination_deg: 120.0,
        };
        let ok = PrincipalSusceptibility {
            intensity: 0.01,
            declination_deg: 0.0,
            inclination_deg: 0.0,
        };
        assert!(Susceptibility::Anisotropic {
            axes: [ok, bad_inclination, ok]
        }
        .validate()
        .is_err());
        assert!(Susceptibility::Isotropic { intensity: 0.01 }.validate().is_ok());
    }
}
