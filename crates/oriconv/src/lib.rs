//! High-level entry crate for the `oriconv` toolbox.
//!
//! `oriconv` recovers the parameter-interpretation convention of a
//! black-box sensor payload: given the payload's six-value exports
//! (three distances, three angle magnitudes per sensor) and
//! independently measured sensor orientations, it searches the finite
//! convention space for the interpretation(s) that reconcile the two,
//! comparing *relative* orientations so the unknown payload-to-world
//! transform cancels.
//!
//! ```ignore
//! use oriconv::prelude::*;
//!
//! let box_groups = load_parm_groups(box_reader)?;
//! let ind_eos = load_independent_eos(eo_reader)?;
//!
//! let conventions = Convention::all();
//! let fits = one_sided_search(&box_groups, &ind_eos.orientations, &conventions);
//! println!("best: {}", conventions[fits[0].1]);
//! ```
//!
//! ## Module organization
//!
//! - **[`core`]**: spinor algebra, rigid transforms, the convention
//!   model and its encodings, relative-orientation building
//! - **[`search`]**: scoring kernels and the one-sided / cross search
//!   strategies
//! - **[`pipeline`]**: ASCII loaders, report writer, end-to-end runs

/// Rigid algebra kernel, convention model, and sensor keys.
pub mod core {
    pub use oriconv_core::*;
}

/// Convention-search strategies and scoring.
pub mod search {
    pub use oriconv_search::*;
}

/// File loaders, report writer, and end-to-end runs.
pub mod pipeline {
    pub use oriconv_pipeline::*;
}

// Re-exports for convenience
pub use oriconv_core::{
    Convention, ConventionAngle, ConventionOffset, ConventionString, KeyPair, Order, ParmGroup,
    SenKey, SenOri, Spinor, Transform,
};

pub use oriconv_search::{cross_search, one_sided_search, one_sided_trials, PairScore};

pub use oriconv_pipeline::{run_cross, run_one_sided, CrossConfig, OneSidedConfig};

/// Convenient re-exports for common use cases.
pub mod prelude {
    pub use crate::core::{
        relative_orientations, BiVec3, ConNumId, Convention, ConventionString, KeyPair, Order,
        ParmGroup, Real, SenKey, SenOri, Spinor, Transform, Vec3,
    };
    pub use crate::pipeline::{
        load_independent_eos, load_parm_groups, run_cross, run_one_sided, CrossConfig,
        OneSidedConfig,
    };
    pub use crate::search::{
        basis_rmse, cross_search, fit_prominence, one_sided_search, one_sided_trials, FitNdxPair,
        PairScore, TrialResult,
    };
}
