#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Shared mathematical utilities (scalar/vector aliases, direction cosines).
pub mod math;
/// Cylinder geometry, body-frame rotation, and demagnetization factors.
pub mod geometry;
/// Susceptibility descriptors and body-frame tensor assembly.
pub mod susceptibility;
/// Magnetization assembly with self-demagnetization correction.
pub mod magnetization;
/// Elliptic-cylinder potential core and body-frame field components.
pub mod potential;
/// Forward-model orchestration and total-field projection.
pub mod forward;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

pub use errors::MagcylError;
