//! Core types for orientation-parameter convention recovery.
//!
//! This crate contains:
//! - the rigid algebra kernel (`Spinor`, `Transform`, photogrammetric
//!   angle extraction),
//! - the six-value [`ParmGroup`] and the finite [`Convention`] space
//!   that governs its interpretation,
//! - sensor keys and the pairwise relative-orientation builder.
//!
//! The search strategies and file pipelines live in `oriconv-search`
//! and `oriconv-pipeline`, re-exported via the top-level `oriconv`
//! crate.

/// Interpretation conventions and their numeric/string encodings.
pub mod convention;
/// Sensor identifiers and keyed-map helpers.
pub mod keys;
/// Vectors, bivectors, spinors, and rigid transforms.
pub mod math;
/// Sensor orientations and relative orientations.
pub mod orientation;
/// Parameter groups and interpretation enumerations.
pub mod parms;
/// Photogrammetric sequential-angle extraction.
pub mod rotation;

pub use convention::*;
pub use keys::*;
pub use math::*;
pub use orientation::*;
pub use parms::*;
pub use rotation::*;
