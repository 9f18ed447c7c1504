//! 3x3 matrices for primary matrices and chromatic adaptation
//!
//! All operations use f64, matching lcms2's internal precision.

/// Row-major 3x3 matrix: `m[row][col]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x3 {
    pub m: [[f64; 3]; 3],
}

impl Matrix3x3 {
    pub const IDENTITY: Self = Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    #[inline]
    pub const fn new(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Build a matrix whose columns are the given vectors
    #[inline]
    pub const fn from_columns(c0: [f64; 3], c1: [f64; 3], c2: [f64; 3]) -> Self {
        Self {
            m: [[c0[0], c1[0], c2[0]], [c0[1], c1[1], c2[1]], [c0[2], c1[2], c2[2]]],
        }
    }

    #[inline]
    pub fn column(&self, index: usize) -> [f64; 3] {
        self.m.map(|row| row[index])
    }

    /// `self × diag(s)`: column `j` multiplied by `s[j]`
    #[inline]
    pub fn scale_columns(&self, s: [f64; 3]) -> Self {
        Self::new(self.m.map(|row| [row[0] * s[0], row[1] * s[1], row[2] * s[2]]))
    }

    /// M × v
    #[inline]
    pub fn multiply_vec(&self, v: [f64; 3]) -> [f64; 3] {
        self.m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
    }

    /// self × other
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from_columns(
            self.multiply_vec(other.column(0)),
            self.multiply_vec(other.column(1)),
            self.multiply_vec(other.column(2)),
        )
    }

    /// Inverse by adjugate; `None` when the determinant is ~0
    pub fn inverse(&self) -> Option<Self> {
        let [a, b, c] = self.m;
        // Columns of the adjugate are the row cross products
        let c0 = cross(b, c);
        let c1 = cross(c, a);
        let c2 = cross(a, b);
        let det = a[0] * c0[0] + a[1] * c0[1] + a[2] * c0[2];
        if det.abs() < 1e-14 {
            return None;
        }

        let adjugate = Self::new([c0, c1, c2]);
        Some(Self::new(adjugate.m.map(|row| row.map(|v| v / det))).transposed())
    }

    fn transposed(&self) -> Self {
        Self::from_columns(self.m[0], self.m[1], self.m[2])
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
