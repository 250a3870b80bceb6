//! Error statistics between candidate rigid transforms.

use oriconv_core::{Real, SenOri, Vec3};

/// Basis-transform RMSE between two rigid transforms.
///
/// The three cardinal basis vectors are pushed through each transform
/// and compared columnwise; the divisor 3 reflects the residual degrees
/// of freedom (9 measurements less 6 transform parameters). This is the
/// cross-search inner loop. Non-finite inputs yield NaN.
pub fn basis_rmse(xfm_a: &SenOri, xfm_b: &SenOri) -> Real {
    let mut sum_sq = 0.0;
    for axis in 0..3 {
        let mut basis = Vec3::zeros();
        basis[axis] = 1.0;
        let diff = xfm_a.apply(&basis) - xfm_b.apply(&basis);
        sum_sq += diff.norm_squared();
    }
    (sum_sq / 3.0).sqrt()
}

/// Location-weighted residual between two rigid transforms.
///
/// Location residuals are downweighted by `min(1, 1/|ave(loc)|)` so
/// that large coordinate frames do not drown the attitude signal;
/// attitude residuals compare physical-angle bivectors at unit weight.
/// This is the per-pair kernel of the one-sided search only; the
/// cross-search constructions control their own magnitude scales and
/// must use [`basis_rmse`].
pub fn pose_difference(ori_a: &SenOri, ori_b: &SenOri) -> Real {
    let ave_mag = 0.5 * (ori_a.loc.norm() + ori_b.loc.norm());
    let weight_loc = if ave_mag > 1.0 { 1.0 / ave_mag } else { 1.0 };
    let resid_sq_loc = (weight_loc / 3.0) * (ori_b.loc - ori_a.loc).norm_squared();

    let biv_a = ori_a.att.phys_angle();
    let biv_b = ori_b.att.phys_angle();
    let resid_sq_att = (1.0 / 3.0) * (biv_b - biv_a).norm_squared();

    (0.5 * (resid_sq_loc + resid_sq_att)).sqrt()
}
