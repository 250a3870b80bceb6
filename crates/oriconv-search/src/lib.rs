//! Search engines that recover parameter-interpretation conventions.
//!
//! Two strategies coexist and are both part of the public contract:
//!
//! - [`one_sided_search`] / [`one_sided_trials`]: every box convention
//!   scored against reference relative orientations, errors summed over
//!   sensor pairs (noise amortisation);
//! - [`cross_search`]: the full box-by-independent convention cross
//!   product, aggregated per sensor by maximum (uniform consistency).
//!
//! Sum and max aggregation are deliberately different; neither may be
//! substituted for the other.

/// Per-sensor candidate orientation tables.
pub mod combo;
/// Box-by-independent cross search.
pub mod crosssearch;
/// One-sided search over box conventions.
pub mod onesided;
/// Ranking and prominence helpers.
pub mod rank;
/// Transform error statistics.
pub mod score;

pub use combo::*;
pub use crosssearch::*;
pub use onesided::*;
pub use rank::*;
pub use score::*;
