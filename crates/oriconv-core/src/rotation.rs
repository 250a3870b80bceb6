//! Photogrammetric sequential-angle extraction.

use crate::math::{Real, Spinor};

/// Gimbal-lock guard on the recovered `sin(phi)` matrix element (2^-18).
const LOCK_NEAR: Real = 1.0 / 262_144.0;

/// Omega-phi-kappa angles for a spinor built as `R_kappa * R_phi * R_omega`
/// with rotation planes `e23`, `e31`, `e12` applied right-to-left.
///
/// Returns `[omega, phi, kappa]` such that rebuilding the three-rotation
/// spinor reproduces the input rotation (up to overall rotor sign). Within
/// `2^-18` of gimbal lock (`|sin(phi)| -> 1`) all three angles are NaN and
/// the caller must check for that.
pub fn opk_from(spin: &Spinor) -> [Real; 3] {
    let r0 = spin.scalar;
    let r1 = spin.biv.x;
    let r2 = spin.biv.y;
    let r3 = spin.biv.z;

    // matrix elements of the rotation carried by the sandwich product
    let r31 = 2.0 * (r1 * r3 + r0 * r2);

    if (r31.abs() - 1.0).abs() < LOCK_NEAR {
        return [Real::NAN, Real::NAN, Real::NAN];
    }

    let r11 = r0 * r0 + r1 * r1 - r2 * r2 - r3 * r3;
    let r21 = 2.0 * (r1 * r2 - r0 * r3);
    let r32 = 2.0 * (r2 * r3 - r0 * r1);
    let r33 = r0 * r0 - r1 * r1 - r2 * r2 + r3 * r3;

    // The factored matrix describes the negative angle directions,
    // hence the negations.
    [
        -(r32.atan2(r33)),
        -((-r31).asin()),
        -(r21.atan2(r11)),
    ]
}
