//! Bradford Chromatic Adaptation
//!
//! The ICC `chad` tag and the colorant tags of a v4 profile are both built
//! from the Bradford transform between the profile white and the D50 PCS
//! illuminant. The cone-response inverse is computed from the forward matrix
//! rather than taken from a rounded published table, the same as lcms2.
//!
//! References:
//! - ICC.1:2022 Annex E
//! - Lindbloom: http://www.brucelindbloom.com/index.html?Eqn_ChromAdapt.html

use crate::color::Xyz;
use crate::math::Matrix3x3;

/// Bradford matrix: XYZ → LMS (cone response)
pub const BRADFORD_XYZ_TO_LMS: Matrix3x3 = Matrix3x3::new([
    [0.8951000, 0.2664000, -0.1614000],
    [-0.7502000, 1.7135000, 0.0367000],
    [0.0389000, -0.0685000, 1.0296000],
]);

/// Compute the Bradford matrix taking `src_white` to `dst_white`
///
/// The returned matrix M is used as `XYZ_dest = M × XYZ_src`. Returns `None`
/// when the source white has a zero cone response.
pub fn adaptation_matrix(src_white: Xyz, dst_white: Xyz) -> Option<Matrix3x3> {
    let m_a = BRADFORD_XYZ_TO_LMS;
    let m_a_inv = m_a.inverse()?;

    let src_lms = m_a.multiply_vec(src_white.to_array());
    let dst_lms = m_a.multiply_vec(dst_white.to_array());

    if src_lms.iter().any(|v| v.abs() < 1e-10) {
        return None;
    }

    let scale = [0, 1, 2].map(|i| dst_lms[i] / src_lms[i]);

    // M = M_A^-1 × diag(scale) × M_A
    Some(m_a_inv.scale_columns(scale).multiply(&m_a))
}
