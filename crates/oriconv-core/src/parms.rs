//! Raw six-value parameter groups and the small enumerations that
//! describe how they may be interpreted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Real;

/// Translate/rotate composition order of a rigid transform.
///
/// `TranRot` expresses the offset in the domain frame, `RotTran` in the
/// range frame. `Unknown` flags an unparsed or invalid convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Order {
    TranRot,
    RotTran,
    Unknown,
}

impl Order {
    /// Numeric code used by the convention encodings (0, 1, 2).
    pub fn number(self) -> i64 {
        match self {
            Order::TranRot => 0,
            Order::RotTran => 1,
            Order::Unknown => 2,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Order::TranRot => "TR",
            Order::RotTran => "RT",
            Order::Unknown => "??",
        };
        write!(f, "{tag}")
    }
}

/// Ordered triple of signs, each -1 or +1.
pub type ThreeSigns = [i8; 3];

/// Ordered triple of small index values in `{0, 1, 2}`.
pub type ThreeIndices = [u8; 3];

/// Three distance values (meters) of unknown order and sign.
pub type ThreeDistances = [Real; 3];

/// Three angle magnitudes (radians) of unknown order and sign.
pub type ThreeAngles = [Real; 3];

/// All 8 sign combinations for a triple, in ascending binary order.
pub fn all_three_signs() -> [ThreeSigns; 8] {
    [
        [-1, -1, -1],
        [-1, -1, 1],
        [-1, 1, -1],
        [-1, 1, 1],
        [1, -1, -1],
        [1, -1, 1],
        [1, 1, -1],
        [1, 1, 1],
    ]
}

/// All 6 permutations of `{0, 1, 2}` used for axis assignment.
pub fn all_axis_permutations() -> [ThreeIndices; 6] {
    [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 1, 0],
        [2, 0, 1],
    ]
}

/// All 12 rotation-plane sequences `(a, b, c)` with `a != b`, `b != c`.
///
/// The first and last plane may repeat (e.g. `121`), which covers the
/// classic symmetric three-angle conventions.
pub fn all_bivector_triples() -> [ThreeIndices; 12] {
    [
        [0, 1, 0],
        [0, 1, 2],
        [0, 2, 0],
        [0, 2, 1],
        [1, 0, 1],
        [1, 0, 2],
        [1, 2, 0],
        [1, 2, 1],
        [2, 0, 1],
        [2, 0, 2],
        [2, 1, 0],
        [2, 1, 2],
    ]
}

/// The two usable composition orders (`TranRot` first).
pub fn all_orders() -> [Order; 2] {
    [Order::TranRot, Order::RotTran]
}

/// Grouping of the six exported values for one sensor: three distances
/// and three angle magnitudes whose interpretation is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParmGroup {
    /// Distance values (meters); order and sign not yet assigned.
    pub distances: ThreeDistances,
    /// Angle magnitudes (radians); order, sign and plane not yet assigned.
    pub angles: ThreeAngles,
}

impl ParmGroup {
    pub fn new(distances: ThreeDistances, angles: ThreeAngles) -> Self {
        Self { distances, angles }
    }

    /// True if all six components are finite.
    pub fn is_valid(&self) -> bool {
        self.distances.iter().all(|value| value.is_finite())
            && self.angles.iter().all(|value| value.is_finite())
    }
}

impl fmt::Display for ParmGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dists: ({:9.3}, {:9.3}, {:9.3})  angles: ({:8.5}, {:8.5}, {:8.5})",
            self.distances[0],
            self.distances[1],
            self.distances[2],
            self.angles[0],
            self.angles[1],
            self.angles[2]
        )
    }
}
