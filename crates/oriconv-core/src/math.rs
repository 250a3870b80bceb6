//! Rigid-body algebra over 3D geometric-algebra rotors.
//!
//! The attitude representation is a unit *spinor* (even-grade element:
//! scalar plus bivector) rather than a rotation matrix. Bivector
//! components are carried on the cardinal planes `(e23, e31, e12)` so
//! that `exp(half * b)` for bivector `b` rotates vectors through the
//! full magnitude of `b` under the sandwich product `s v ~s`.

use std::fmt;
use std::ops::Mul;

use nalgebra::Vector3;

/// Scalar type used throughout the workspace (currently `f64`).
pub type Real = f64;

/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;

/// Bivector with components on the cardinal planes `(e23, e31, e12)`.
///
/// Shares storage with [`Vec3`]; the plane interpretation is by
/// position: component 0 is the `e23` plane, 1 is `e31`, 2 is `e12`.
pub type BiVec3 = Vector3<Real>;

/// Unit bivector for one of the cardinal planes (0:`e23`, 1:`e31`, 2:`e12`).
pub fn basis_bivector(ndx: u8) -> BiVec3 {
    let mut biv = BiVec3::zeros();
    biv[ndx as usize] = 1.0;
    biv
}

/// Geometric-algebra rotor: scalar part plus bivector part.
///
/// A unit spinor represents a 3D rotation via the sandwich product.
/// Products of unit spinors stay unit (up to roundoff), so no explicit
/// renormalisation is performed by composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinor {
    /// Scalar (grade-0) part.
    pub scalar: Real,
    /// Bivector (grade-2) part on planes `(e23, e31, e12)`.
    pub biv: BiVec3,
}

impl Spinor {
    /// The identity rotation.
    pub fn identity() -> Self {
        Self {
            scalar: 1.0,
            biv: BiVec3::zeros(),
        }
    }

    /// Rotor `exp(biv / 2)` for a physical-angle bivector.
    ///
    /// The magnitude of `biv` is the rotation angle in radians and its
    /// direction selects the rotation plane. The half-angle is taken
    /// here so that the sandwich product applies the full angle.
    pub fn from_phys_angle(biv: BiVec3) -> Self {
        let mag = biv.norm();
        let half = 0.5 * mag;
        // sin(x/2)/x -> 1/2 as x -> 0
        let scale = if mag > 0.0 { half.sin() / mag } else { 0.5 };
        Self {
            scalar: half.cos(),
            biv: scale * biv,
        }
    }

    /// Reverse (grade involution of the bivector part).
    ///
    /// For a unit spinor the reverse is the inverse rotation.
    pub fn reverse(&self) -> Self {
        Self {
            scalar: self.scalar,
            biv: -self.biv,
        }
    }

    /// Rotate a vector by the sandwich product `s v ~s`.
    pub fn rotate(&self, vec: &Vec3) -> Vec3 {
        // Expanded sandwich product for unit even-grade elements.
        let cross = self.biv.cross(vec);
        vec - 2.0 * self.scalar * cross + 2.0 * self.biv.cross(&cross)
    }

    /// Physical-angle bivector (principal logarithm, doubled).
    ///
    /// The spinor is first normalised to a non-negative scalar part so
    /// that the two rotor representatives of one rotation map to the
    /// same angle in `[0, pi]`.
    pub fn phys_angle(&self) -> BiVec3 {
        let (scalar, biv) = if self.scalar < 0.0 {
            (-self.scalar, -self.biv)
        } else {
            (self.scalar, self.biv)
        };
        let mag = biv.norm();
        if mag > 0.0 {
            let angle = 2.0 * mag.atan2(scalar);
            (angle / mag) * biv
        } else {
            BiVec3::zeros()
        }
    }

    /// True if all four components are finite.
    pub fn is_finite(&self) -> bool {
        self.scalar.is_finite() && self.biv.iter().all(|c| c.is_finite())
    }
}

impl Mul for Spinor {
    type Output = Spinor;

    /// Geometric product of spinors; composes rotations right-to-left.
    fn mul(self, rhs: Spinor) -> Spinor {
        Spinor {
            scalar: self.scalar * rhs.scalar - self.biv.dot(&rhs.biv),
            biv: self.scalar * rhs.biv + rhs.scalar * self.biv - self.biv.cross(&rhs.biv),
        }
    }
}

impl fmt::Display for Spinor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:+.6} ({:+.6}, {:+.6}, {:+.6})]",
            self.scalar, self.biv.x, self.biv.y, self.biv.z
        )
    }
}

/// 3D rigid-body transform: translation plus spinor attitude.
///
/// Application order is rotate-then-translate:
/// `apply(v) = loc + att.rotate(v)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation expressed in the range frame.
    pub loc: Vec3,
    /// Attitude carrying the domain frame into the range frame.
    pub att: Spinor,
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            loc: Vec3::zeros(),
            att: Spinor::identity(),
        }
    }

    /// Transform a vector from the domain frame into the range frame.
    pub fn apply(&self, vec: &Vec3) -> Vec3 {
        self.loc + self.att.rotate(vec)
    }

    /// Inverse transform (range frame into domain frame).
    pub fn inverse(&self) -> Self {
        let att = self.att.reverse();
        Self {
            loc: att.rotate(&(-self.loc)),
            att,
        }
    }

    /// True if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.loc.iter().all(|c| c.is_finite()) && self.att.is_finite()
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// Composition `a * b`: apply `b` first, then `a`.
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            loc: self.loc + self.att.rotate(&rhs.loc),
            att: self.att * rhs.att,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ang = self.att.phys_angle();
        write!(
            f,
            "loc: ({:+.6}, {:+.6}, {:+.6})  ang: ({:+.6}, {:+.6}, {:+.6})",
            self.loc.x, self.loc.y, self.loc.z, ang.x, ang.y, ang.z
        )
    }
}
