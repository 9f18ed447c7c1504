//! Tone curves and ICC parametric functions
//!
//! This module provides:
//! - [`ToneCurve`], the curve a profile applies to every channel
//! - ICC parametric curve types 0-4, used to encode and decode `para` tags

/// ICC Parametric Curve Type
///
/// As defined in ICC.1:2022 Section 10.18
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametricCurveType {
    /// Type 0: Y = X^g
    Gamma,
    /// Type 1: Y = (aX + b)^g  if X >= -b/a, else 0
    CIE122,
    /// Type 2: Y = (aX + b)^g + c  if X >= -b/a, else c
    IEC61966_3,
    /// Type 3: Y = (aX + b)^g  if X >= d, else cX (sRGB-like)
    IEC61966_2_1,
    /// Type 4: Y = (aX + b)^g + e  if X >= d, else cX + f
    Full,
}

impl ParametricCurveType {
    pub fn from_u16(function_type: u16) -> Option<Self> {
        match function_type {
            0 => Some(Self::Gamma),
            1 => Some(Self::CIE122),
            2 => Some(Self::IEC61966_3),
            3 => Some(Self::IEC61966_2_1),
            4 => Some(Self::Full),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            Self::Gamma => 0,
            Self::CIE122 => 1,
            Self::IEC61966_3 => 2,
            Self::IEC61966_2_1 => 3,
            Self::Full => 4,
        }
    }

    /// Get the number of parameters required
    pub fn param_count(&self) -> usize {
        match self {
            Self::Gamma => 1,
            Self::CIE122 => 3,
            Self::IEC61966_3 => 4,
            Self::IEC61966_2_1 => 5,
            Self::Full => 7,
        }
    }
}

/// ICC Parametric Curve
///
/// Parameters are named as in ICC.1:2022; unused ones stay at their defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricCurve {
    pub curve_type: ParametricCurveType,
    pub g: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl ParametricCurve {
    /// Create a simple gamma curve (type 0)
    pub fn gamma(g: f64) -> Self {
        Self {
            curve_type: ParametricCurveType::Gamma,
            g,
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create from ICC parameters in table order (g, a, b, c, d, e, f)
    pub fn from_params(curve_type: ParametricCurveType, params: &[f64]) -> Option<Self> {
        if params.len() < curve_type.param_count() {
            return None;
        }

        let mut curve = Self::gamma(params[0]);
        curve.curve_type = curve_type;

        match curve_type {
            ParametricCurveType::Gamma => {}
            ParametricCurveType::CIE122 => {
                curve.a = params[1];
                curve.b = params[2];
            }
            ParametricCurveType::IEC61966_3 => {
                curve.a = params[1];
                curve.b = params[2];
                curve.c = params[3];
            }
            ParametricCurveType::IEC61966_2_1 => {
                curve.a = params[1];
                curve.b = params[2];
                curve.c = params[3];
                curve.d = params[4];
            }
            ParametricCurveType::Full => {
                curve.a = params[1];
                curve.b = params[2];
                curve.c = params[3];
                curve.d = params[4];
                curve.e = params[5];
                curve.f = params[6];
            }
        }

        Some(curve)
    }

    /// Parameters in table order, as many as the type uses
    pub fn params(&self) -> Vec<f64> {
        let all = [self.g, self.a, self.b, self.c, self.d, self.e, self.f];
        all[..self.curve_type.param_count()].to_vec()
    }
}

/// Evaluate a parametric curve (encoded → linear)
#[inline]
pub fn parametric_curve_eval(curve: &ParametricCurve, x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);

    match curve.curve_type {
        ParametricCurveType::Gamma => x.powf(curve.g),
        ParametricCurveType::CIE122 => {
            let threshold = if curve.a.abs() > 1e-10 {
                -curve.b / curve.a
            } else {
                0.0
            };
            if x >= threshold {
                (curve.a * x + curve.b).max(0.0).powf(curve.g)
            } else {
                0.0
            }
        }
        ParametricCurveType::IEC61966_3 => {
            let threshold = if curve.a.abs() > 1e-10 {
                -curve.b / curve.a
            } else {
                0.0
            };
            if x >= threshold {
                (curve.a * x + curve.b).max(0.0).powf(curve.g) + curve.c
            } else {
                curve.c
            }
        }
        ParametricCurveType::IEC61966_2_1 => {
            if x >= curve.d {
                (curve.a * x + curve.b).max(0.0).powf(curve.g)
            } else {
                curve.c * x
            }
        }
        ParametricCurveType::Full => {
            if x >= curve.d {
                (curve.a * x + curve.b).max(0.0).powf(curve.g) + curve.e
            } else {
                curve.c * x + curve.f
            }
        }
    }
}

/// Power segment above a breakpoint, linear segment below it
///
/// `(slope·x + intercept)^gamma` for `x >= breakpoint`, else `linear_slope·x`.
/// This is ICC parametric function type 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiecewiseCurve {
    pub gamma: f64,
    pub slope: f64,
    pub intercept: f64,
    pub linear_slope: f64,
    pub breakpoint: f64,
}

impl PiecewiseCurve {
    #[inline]
    pub fn power_branch(&self, x: f64) -> f64 {
        (self.slope * x + self.intercept).max(0.0).powf(self.gamma)
    }

    #[inline]
    pub fn linear_branch(&self, x: f64) -> f64 {
        self.linear_slope * x
    }

    /// Jump between the two branches at the breakpoint
    pub fn breakpoint_gap(&self) -> f64 {
        (self.power_branch(self.breakpoint) - self.linear_branch(self.breakpoint)).abs()
    }

    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x >= self.breakpoint {
            self.power_branch(x)
        } else {
            self.linear_branch(x)
        }
    }
}

/// Tone response curve shared by every channel of a profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneCurve {
    /// Pure power law `x^exponent`
    Gamma(f64),
    Piecewise(PiecewiseCurve),
}

impl ToneCurve {
    /// Evaluate at `x`, clamped to [0, 1]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            ToneCurve::Gamma(g) => x.clamp(0.0, 1.0).powf(*g),
            ToneCurve::Piecewise(p) => p.eval(x),
        }
    }

    /// The ICC parametric form: type 0 for gammas, type 3 for piecewise curves
    pub fn to_parametric(&self) -> ParametricCurve {
        match *self {
            ToneCurve::Gamma(g) => ParametricCurve::gamma(g),
            ToneCurve::Piecewise(p) => ParametricCurve {
                curve_type: ParametricCurveType::IEC61966_2_1,
                g: p.gamma,
                a: p.slope,
                b: p.intercept,
                c: p.linear_slope,
                d: p.breakpoint,
                e: 0.0,
                f: 0.0,
            },
        }
    }

    /// Tone curve of a parametric function; only types 0 and 3 have one
    pub fn from_parametric(curve: &ParametricCurve) -> Option<Self> {
        match curve.curve_type {
            ParametricCurveType::Gamma => Some(ToneCurve::Gamma(curve.g)),
            ParametricCurveType::IEC61966_2_1 => Some(ToneCurve::Piecewise(PiecewiseCurve {
                gamma: curve.g,
                slope: curve.a,
                intercept: curve.b,
                linear_slope: curve.c,
                breakpoint: curve.d,
            })),
            _ => None,
        }
    }

    /// Sample `n` evenly spaced points (at least 2) into a 16-bit table
    pub fn sample(&self, n: usize) -> Vec<u16> {
        let n = n.max(2);
        let last = (n - 1) as f64;
        (0..n)
            .map(|i| {
                let y = self.eval(i as f64 / last);
                (y * 65535.0).round().clamp(0.0, 65535.0) as u16
            })
            .collect()
    }
}
