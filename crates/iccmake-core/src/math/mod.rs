//! Mathematical operations for profile synthesis
//!
//! - 3x3 matrix operations for primary matrices
//! - Bradford chromatic adaptation
//! - Tone curves and ICC parametric functions

pub mod chromatic_adaptation;
pub mod gamma;
pub mod matrix;

pub use chromatic_adaptation::adaptation_matrix;
pub use gamma::{ParametricCurve, ParametricCurveType, PiecewiseCurve, ToneCurve, parametric_curve_eval};
pub use matrix::Matrix3x3;
