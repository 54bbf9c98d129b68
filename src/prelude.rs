//! Convenience re-exports for building forward-model runs.

pub use crate::errors::MagcylError;
pub use crate::forward::{CylinderModel, FieldSample};
pub use crate::geometry::EllipticCylinder;
pub use crate::magnetization::{resultant_magnetization, SourceMagnetization, SphericalVector};
pub use crate::math::{direction_cosines, vector_to_angles, Scalar, R3, R3x3};
pub use crate::susceptibility::{PrincipalSusceptibility, Susceptibility};
