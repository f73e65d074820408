use num_complex::Complex64;

/// A 2x2 matrix over complex doubles.
///
/// A plain value type with inlined arithmetic — this crate does not pull
/// in a general matrix library for a type this small (spec.md §9, Design
/// Notes: "Do not introduce a general matrix library for this").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex2x2 {
    pub m00: Complex64,
    pub m01: Complex64,
    pub m10: Complex64,
    pub m11: Complex64,
}

impl Complex2x2 {
    pub fn new(m00: Complex64, m01: Complex64, m10: Complex64, m11: Complex64) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// The 2x2 identity matrix.
    pub fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Row-by-column matrix product `self * rhs`.
    pub fn matmul(&self, rhs: &Complex2x2) -> Complex2x2 {
        Complex2x2::new(
            self.m00 * rhs.m00 + self.m01 * rhs.m10,
            self.m00 * rhs.m01 + self.m01 * rhs.m11,
            self.m10 * rhs.m00 + self.m11 * rhs.m10,
            self.m10 * rhs.m01 + self.m11 * rhs.m11,
        )
    }

    /// Left-multiplication by a complex scalar: `scalar * self`.
    pub fn scale(&self, scalar: Complex64) -> Complex2x2 {
        Complex2x2::new(
            scalar * self.m00,
            scalar * self.m01,
            scalar * self.m10,
            scalar * self.m11,
        )
    }

    /// Right-division by a complex scalar: `self / scalar`.
    pub fn divide(&self, scalar: Complex64) -> Complex2x2 {
        Complex2x2::new(
            self.m00 / scalar,
            self.m01 / scalar,
            self.m10 / scalar,
            self.m11 / scalar,
        )
    }
}
