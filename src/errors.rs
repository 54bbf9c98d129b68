//! Shared error types used across submodules.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MagcylError {
    /// Raised when the cross-section axes do not satisfy major > minor > 0.
    /// The field formulas divide by (a² − b²), so a circular cross-section
    /// is rejected rather than producing infinities.
    #[error("degenerate cross-section: expected semi-major > semi-minor > 0, got ({semi_major}, {semi_minor})")]
    DegenerateAxes {
        /// Semi-major axis as supplied by the caller.
        semi_major: f64,
        /// Semi-minor axis as supplied by the caller.
        semi_minor: f64,
    },
    /// Raised when the self-demagnetization system I + N·k is singular and
    /// the corrected magnetization cannot be solved for.
    #[error("self-demagnetization correction matrix is singular for the given susceptibility and geometry")]
    SingularDemagnetization,
    /// Raised when an observation point lies inside or on the cylinder
    /// cross-section, where the exterior potential formulas do not apply.
    #[error("observation point {index} lies inside or on the cylinder cross-section")]
    InteriorPoint {
        /// Index of the offending point in the caller's slice.
        index: usize,
    },
    /// Raised when a susceptibility descriptor carries a negative intensity
    /// or an inclination outside ±90°.
    #[error("invalid susceptibility descriptor: {0}")]
    InvalidSusceptibility(String),
}
