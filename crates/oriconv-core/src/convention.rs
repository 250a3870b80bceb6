//! Interpretation conventions for six-value parameter groups.
//!
//! A [`Convention`] fixes everything the exported parameters leave open:
//! the sign and axis assignment of the three distances, the sign, order
//! and rotation planes of the three angles, and whether the offset is
//! expressed in the domain or range frame. The full space has
//! `48 * 576 * 2 = 55_296` members, each carried by a stable numeric id
//! and a short string encoding.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::math::{basis_bivector, Real, Spinor, Transform, Vec3};
use crate::parms::{
    all_axis_permutations, all_bivector_triples, all_orders, all_three_signs, Order, ParmGroup,
    ThreeIndices, ThreeSigns,
};

/// Numeric id of a [`Convention`] (decimal-digit field layout).
pub type ConNumId = i64;

// Decimal field positions of the numeric encoding, two digits per field,
// chosen so that ids stay human readable in dumps.
const NUM_PAD: ConNumId = 1_000_000_000_000;
const NUM_OFF_SGN: ConNumId = 10_000_000_000;
const NUM_OFF_NDX: ConNumId = 100_000_000;
const NUM_ANG_SGN: ConNumId = 1_000_000;
const NUM_ANG_NDX: ConNumId = 10_000;
const NUM_BIV_NDX: ConNumId = 100;
const NUM_FIELD: ConNumId = 100;

/// Numeric code of a sign triple: binary digits with `-1 -> 0`, `+1 -> 1`.
fn number_for_signs(signs: &ThreeSigns) -> i64 {
    let bit = |sign: i8| i64::from(1 + sign) / 2;
    4 * bit(signs[0]) + 2 * bit(signs[1]) + bit(signs[2])
}

/// Numeric code of an index triple: base-3 digits, range `[0, 27)`.
fn number_for_indices(indices: &ThreeIndices) -> i64 {
    9 * i64::from(indices[0]) + 3 * i64::from(indices[1]) + i64::from(indices[2])
}

fn signs_for_number(num: i64) -> Option<ThreeSigns> {
    if !(0..8).contains(&num) {
        return None;
    }
    let sign = |bit: i64| if bit == 0 { -1 } else { 1 };
    Some([sign(num / 4 % 2), sign(num / 2 % 2), sign(num % 2)])
}

fn indices_for_number(num: i64) -> Option<ThreeIndices> {
    if !(0..27).contains(&num) {
        return None;
    }
    Some([(num / 9) as u8, (num / 3 % 3) as u8, (num % 3) as u8])
}

fn order_for_number(num: i64) -> Option<Order> {
    match num {
        0 => Some(Order::TranRot),
        1 => Some(Order::RotTran),
        2 => Some(Order::Unknown),
        _ => None,
    }
}

/// Convention for assembling an offset vector from three distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConventionOffset {
    /// Sign applied to each assembled component.
    pub signs: ThreeSigns,
    /// Which source distance feeds each component (a permutation).
    pub indices: ThreeIndices,
}

impl ConventionOffset {
    /// All 48 offset conventions (signs outer, permutations inner).
    pub fn all() -> Vec<ConventionOffset> {
        let mut conventions = Vec::with_capacity(48);
        for signs in all_three_signs() {
            for indices in all_axis_permutations() {
                conventions.push(ConventionOffset { signs, indices });
            }
        }
        conventions
    }

    /// The identity-like interpretation: all positive, order `012`.
    pub fn identity() -> ConventionOffset {
        ConventionOffset {
            signs: [1, 1, 1],
            indices: [0, 1, 2],
        }
    }

    /// Dense index in `[0, 48)` following the [`Self::all`] order.
    pub fn index_value(&self) -> usize {
        let perm_rank = all_axis_permutations()
            .iter()
            .position(|perm| perm == &self.indices)
            .expect("offset indices must be a permutation of {0,1,2}");
        (number_for_signs(&self.signs) as usize) * 6 + perm_rank
    }

    /// Offset vector for a parameter group under this convention.
    pub fn offset_for(&self, parm_group: &ParmGroup) -> Vec3 {
        let dist = &parm_group.distances;
        Vec3::new(
            Real::from(self.signs[0]) * dist[self.indices[0] as usize],
            Real::from(self.signs[1]) * dist[self.indices[1] as usize],
            Real::from(self.signs[2]) * dist[self.indices[2] as usize],
        )
    }
}

/// Convention for building an attitude from three angle magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConventionAngle {
    /// Sign applied to each sequential angle.
    pub signs: ThreeSigns,
    /// Which source magnitude feeds each sequential angle (a permutation).
    pub indices: ThreeIndices,
    /// Cardinal rotation plane of each sequential angle.
    pub biv_indices: ThreeIndices,
}

impl ConventionAngle {
    /// All 576 angle conventions (signs, then permutation, then planes).
    pub fn all() -> Vec<ConventionAngle> {
        let mut conventions = Vec::with_capacity(576);
        for signs in all_three_signs() {
            for indices in all_axis_permutations() {
                for biv_indices in all_bivector_triples() {
                    conventions.push(ConventionAngle {
                        signs,
                        indices,
                        biv_indices,
                    });
                }
            }
        }
        conventions
    }

    /// Sparse index in `[0, 5832)`: `signs * 729 + perm * 27 + planes`.
    ///
    /// Only 576 of the values are ever produced; the range is usable
    /// directly for lookup tables at modest sparsity.
    pub fn index_value(&self) -> usize {
        (number_for_signs(&self.signs) as usize) * 729
            + (number_for_indices(&self.indices) as usize) * 27
            + number_for_indices(&self.biv_indices) as usize
    }

    /// Attitude for a parameter group under this convention.
    ///
    /// The three signed angles spin about their cardinal planes in
    /// sequence; the spinor product composes them right-to-left, so the
    /// first listed angle is applied first. That order is part of the
    /// interface contract with the data files and must not change.
    pub fn attitude_for(&self, parm_group: &ParmGroup) -> Spinor {
        let angs = &parm_group.angles;
        let sizes = [
            Real::from(self.signs[0]) * angs[self.indices[0] as usize],
            Real::from(self.signs[1]) * angs[self.indices[1] as usize],
            Real::from(self.signs[2]) * angs[self.indices[2] as usize],
        ];
        let spin_a = Spinor::from_phys_angle(sizes[0] * basis_bivector(self.biv_indices[0]));
        let spin_b = Spinor::from_phys_angle(sizes[1] * basis_bivector(self.biv_indices[1]));
        let spin_c = Spinor::from_phys_angle(sizes[2] * basis_bivector(self.biv_indices[2]));
        spin_c * spin_b * spin_a
    }
}

/// Full interpretation convention for a six-value parameter group.
#[derive(Debug, Clone, Copy)]
pub struct Convention {
    pub offset: ConventionOffset,
    pub angle: ConventionAngle,
    pub order: Order,
}

impl Convention {
    /// All conventions sharing one offset convention: angle conventions
    /// outer, the two composition orders inner (`TranRot` first).
    pub fn all_for_offset(offset: ConventionOffset) -> Vec<Convention> {
        let mut conventions = Vec::with_capacity(2 * 576);
        for angle in ConventionAngle::all() {
            for order in all_orders() {
                conventions.push(Convention {
                    offset,
                    angle,
                    order,
                });
            }
        }
        conventions
    }

    /// Lazily enumerate all 55 296 conventions in the canonical order:
    /// offset conventions outermost, then angle conventions, then the
    /// composition order.
    pub fn enumerate_all() -> impl Iterator<Item = Convention> {
        ConventionOffset::all()
            .into_iter()
            .flat_map(Convention::all_for_offset)
    }

    /// All 55 296 conventions collected in the canonical order.
    pub fn all() -> Vec<Convention> {
        let mut conventions = Vec::with_capacity(55_296);
        conventions.extend(Convention::enumerate_all());
        conventions
    }

    /// True unless the composition order is unresolved.
    pub fn is_valid(&self) -> bool {
        self.order != Order::Unknown
    }

    /// Stable numeric id; `-1` for invalid conventions.
    ///
    /// Decimal layout (two digits per field):
    /// `1 | offSigns | offIndices | angSigns | angIndices | bivIndices | order`.
    pub fn number(&self) -> ConNumId {
        if !self.is_valid() {
            return -1;
        }
        NUM_PAD
            + NUM_OFF_SGN * number_for_signs(&self.offset.signs)
            + NUM_OFF_NDX * number_for_indices(&self.offset.indices)
            + NUM_ANG_SGN * number_for_signs(&self.angle.signs)
            + NUM_ANG_NDX * number_for_indices(&self.angle.indices)
            + NUM_BIV_NDX * number_for_indices(&self.angle.biv_indices)
            + self.order.number()
    }

    /// Rebuild a convention from its numeric id.
    ///
    /// Returns `None` when any digit pair falls outside its field range.
    pub fn from_number(num_id: ConNumId) -> Option<Convention> {
        if num_id < 0 {
            return None;
        }
        let mut curr = num_id;
        let mut next = || {
            let digits = curr % NUM_FIELD;
            curr /= NUM_FIELD;
            digits
        };
        let dig_order = next();
        let dig_biv = next();
        let dig_ang_ndx = next();
        let dig_ang_sgn = next();
        let dig_off_ndx = next();
        let dig_off_sgn = next();

        Some(Convention {
            offset: ConventionOffset {
                signs: signs_for_number(dig_off_sgn)?,
                indices: indices_for_number(dig_off_ndx)?,
            },
            angle: ConventionAngle {
                signs: signs_for_number(dig_ang_sgn)?,
                indices: indices_for_number(dig_ang_ndx)?,
                biv_indices: indices_for_number(dig_biv)?,
            },
            order: order_for_number(dig_order)?,
        })
    }

    /// Offset vector for a parameter group (domain-frame expression).
    pub fn offset_for(&self, parm_group: &ParmGroup) -> Vec3 {
        self.offset.offset_for(parm_group)
    }

    /// Attitude for a parameter group.
    pub fn attitude_for(&self, parm_group: &ParmGroup) -> Spinor {
        self.angle.attitude_for(parm_group)
    }

    /// Rigid transform for a parameter group under this convention.
    ///
    /// Under `RotTran` the raw offset is expressed in the range frame;
    /// the inverse attitude converts it into the domain frame so that
    /// the returned transform always composes uniformly.
    pub fn transform_for(&self, parm_group: &ParmGroup) -> Transform {
        let offset = self.offset_for(parm_group);
        let att = self.attitude_for(parm_group);
        let loc = match self.order {
            Order::RotTran => att.reverse().rotate(&offset),
            _ => offset,
        };
        Transform { loc, att }
    }
}

impl PartialEq for Convention {
    fn eq(&self, other: &Self) -> bool {
        self.number() == other.number()
    }
}

impl Eq for Convention {}

impl PartialOrd for Convention {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Convention {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number().cmp(&other.number())
    }
}

impl Hash for Convention {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number().hash(state);
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Off+/-: {:?}  OffNdx: {:?}  Ang+/-: {:?}  AngNdx: {:?}  BivNdx: {:?}  Order: {}  NumId: {}",
            self.offset.signs,
            self.offset.indices,
            self.angle.signs,
            self.angle.indices,
            self.angle.biv_indices,
            self.order,
            self.number()
        )
    }
}

//
// String encoding
//

fn string_from_signs(signs: &ThreeSigns) -> String {
    signs
        .iter()
        .map(|&sign| if sign < 0 { '-' } else { '+' })
        .collect()
}

fn string_from_indices(indices: &ThreeIndices) -> String {
    indices.iter().map(|&ndx| char::from(b'0' + ndx)).collect()
}

fn signs_from_string(text: &str) -> ThreeSigns {
    let mut signs: ThreeSigns = [0, 0, 0];
    if text.chars().count() == 3 {
        for (slot, ch) in signs.iter_mut().zip(text.chars()) {
            *slot = match ch {
                '-' => -1,
                '+' => 1,
                _ => 0, // sentinel for invalid input
            };
        }
    }
    signs
}

fn indices_from_string(text: &str) -> ThreeIndices {
    let mut indices: ThreeIndices = [255, 255, 255];
    if text.chars().count() == 3 {
        for (slot, ch) in indices.iter_mut().zip(text.chars()) {
            *slot = match ch {
                '0' => 0,
                '1' => 1,
                '2' => 2,
                _ => 255, // sentinel for invalid input
            };
        }
    }
    indices
}

fn order_from_string(text: &str) -> Order {
    match text {
        "0" => Order::TranRot,
        "1" => Order::RotTran,
        _ => Order::Unknown,
    }
}

/// Token-level representation of a [`Convention`].
///
/// Six whitespace-separated tokens, e.g. `"+-+ 012 ++- 201 121 1"`:
/// offset signs, offset indices, angle signs, angle indices, rotation
/// plane indices, and the numeric composition-order code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionString {
    pub off_signs: String,
    pub off_indices: String,
    pub ang_signs: String,
    pub ang_indices: String,
    pub biv_indices: String,
    pub order: String,
}

impl ConventionString {
    /// Token representation of a convention.
    pub fn from_convention(convention: &Convention) -> ConventionString {
        ConventionString {
            off_signs: string_from_signs(&convention.offset.signs),
            off_indices: string_from_indices(&convention.offset.indices),
            ang_signs: string_from_signs(&convention.angle.signs),
            ang_indices: string_from_indices(&convention.angle.indices),
            biv_indices: string_from_indices(&convention.angle.biv_indices),
            order: convention.order.number().to_string(),
        }
    }

    /// Split an encoded line into tokens. Missing tokens come back as
    /// empty strings and fail [`Self::is_valid`].
    pub fn parse(encoding: &str) -> ConventionString {
        let mut tokens = encoding.split_whitespace();
        let mut next = || tokens.next().unwrap_or_default().to_string();
        ConventionString {
            off_signs: next(),
            off_indices: next(),
            ang_signs: next(),
            ang_indices: next(),
            biv_indices: next(),
            order: next(),
        }
    }

    /// Canonical single-line encoding.
    pub fn string_encoding(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.off_signs,
            self.off_indices,
            self.ang_signs,
            self.ang_indices,
            self.biv_indices,
            self.order
        )
    }

    /// True if every token has the right length and character class.
    pub fn is_valid(&self) -> bool {
        let signs_ok = |text: &str| {
            text.chars().count() == 3 && text.chars().all(|ch| ch == '+' || ch == '-')
        };
        let indices_ok =
            |text: &str| text.chars().count() == 3 && text.chars().all(|ch| ('0'..='2').contains(&ch));
        signs_ok(&self.off_signs)
            && indices_ok(&self.off_indices)
            && signs_ok(&self.ang_signs)
            && indices_ok(&self.ang_indices)
            && indices_ok(&self.biv_indices)
            && (self.order == "0" || self.order == "1")
    }

    /// Convention named by the tokens (fields fall back to sentinels on
    /// invalid input; check [`Self::is_valid`] first).
    pub fn to_convention(&self) -> Convention {
        Convention {
            offset: ConventionOffset {
                signs: signs_from_string(&self.off_signs),
                indices: indices_from_string(&self.off_indices),
            },
            angle: ConventionAngle {
                signs: signs_from_string(&self.ang_signs),
                indices: indices_from_string(&self.ang_indices),
                biv_indices: indices_from_string(&self.biv_indices),
            },
            order: order_from_string(&self.order),
        }
    }
}

impl fmt::Display for ConventionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_encoding())
    }
}
