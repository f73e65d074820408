use num_complex::Complex64;

use crate::error::{Result, TmmError};
use crate::interp::interp_one;

/// Supplies a complex refractive index n(lambda) = n' + i*n'' at a vacuum
/// wavelength (spec.md §4.1). Wavelength units must match the units used
/// for layer thickness and for the Cauchy/Sellmeier coefficients supplied
/// at construction — the model itself is unit-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum DispersionModel {
    /// A fixed complex value, independent of wavelength.
    Constant(Complex64),

    /// n(lambda) = A + B/lambda^2 + C/lambda^4. Always real (no absorption).
    Cauchy { a: f64, b: f64, c: f64 },

    /// n(lambda)^2 = 1 + sum_i B_i*lambda^2 / (lambda^2 - C_i).
    ///
    /// Real-only, like Cauchy; intended for transparent media away from
    /// resonances. `terms` is the (B_i, C_i) list.
    Sellmeier { terms: Vec<(f64, f64)> },

    /// Tabulated (lambda, n', n'') triples, linearly interpolated and
    /// clamped at the ends of the table (spec.md §4.1: "extrapolate by a
    /// documented rule"). `lambda` must be sorted ascending with at least
    /// two points.
    Tabulated {
        lambda: Vec<f64>,
        n_real: Vec<f64>,
        n_imag: Vec<f64>,
    },
}

impl DispersionModel {
    pub fn constant(n: Complex64) -> Self {
        Self::Constant(n)
    }

    pub fn cauchy(a: f64, b: f64, c: f64) -> Self {
        Self::Cauchy { a, b, c }
    }

    pub fn sellmeier(terms: Vec<(f64, f64)>) -> Self {
        Self::Sellmeier { terms }
    }

    /// Build a tabulated model. Fails if the table has fewer than two
    /// points, if the three arrays have mismatched lengths, or if
    /// `lambda` is not strictly ascending.
    pub fn tabulated(lambda: Vec<f64>, n_real: Vec<f64>, n_imag: Vec<f64>) -> Result<Self> {
        if lambda.len() < 2 || lambda.len() != n_real.len() || lambda.len() != n_imag.len() {
            return Err(TmmError::DispersionEvaluation(
                "tabulated dispersion model requires matching arrays of length >= 2".to_string(),
            ));
        }
        if !lambda.windows(2).all(|w| w[0] < w[1]) {
            return Err(TmmError::DispersionEvaluation(
                "tabulated dispersion model requires strictly ascending wavelengths".to_string(),
            ));
        }
        Ok(Self::Tabulated {
            lambda,
            n_real,
            n_imag,
        })
    }

    /// Evaluate the complex refractive index at vacuum wavelength `lambda`.
    pub fn index_at(&self, lambda: f64) -> Result<Complex64> {
        if lambda <= 0.0 {
            return Err(TmmError::NonPositiveWavelength { lambda });
        }

        match self {
            Self::Constant(n) => Ok(*n),

            Self::Cauchy { a, b, c } => {
                let l2 = lambda * lambda;
                let n = a + b / l2 + c / (l2 * l2);
                if !n.is_finite() {
                    return Err(TmmError::DispersionEvaluation(format!(
                        "Cauchy model produced non-finite index at lambda = {lambda}"
                    )));
                }
                Ok(Complex64::new(n, 0.0))
            }

            Self::Sellmeier { terms } => {
                let l2 = lambda * lambda;
                let mut n2 = 1.0;
                for &(b, c) in terms {
                    let denom = l2 - c;
                    if denom.abs() < 1e-12 {
                        return Err(TmmError::DispersionEvaluation(format!(
                            "Sellmeier model has a resonance at lambda = {lambda}"
                        )));
                    }
                    n2 += b * l2 / denom;
                }
                if n2 < 0.0 {
                    return Err(TmmError::DispersionEvaluation(format!(
                        "Sellmeier model produced n^2 < 0 at lambda = {lambda}"
                    )));
                }
                Ok(Complex64::new(n2.sqrt(), 0.0))
            }

            Self::Tabulated {
                lambda: xp,
                n_real,
                n_imag,
            } => {
                let re = interp_one(lambda, xp, n_real);
                let im = interp_one(lambda, xp, n_imag);
                Ok(Complex64::new(re, im))
            }
        }
    }
}
