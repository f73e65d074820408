use std::sync::atomic::{AtomicBool, Ordering};

use num_complex::Complex64;

use crate::constants::{BRANCH_EPSILON, OPACITY_CLAMP};
use crate::error::{Result, TmmError};
use crate::matrix::Complex2x2;
use crate::stack::{Polarization, Stack};

/// Result of a solve: reflectance and transmittance of the stack.
///
/// `r + t` is <= 1 (within tolerance) for passive stacks; absorption
/// `a = 1 - r - t` is derivable but not returned (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    pub r: f64,
    pub t: f64,
}

/// Latches the one-time opacity-clamp diagnostic (spec.md §4.4.4, §5,
/// §9). This is the only global mutable state in the crate, and it is
/// read only to decide whether to emit a log line — it never feeds back
/// into the numerical result.
static OPACITY_WARNED: AtomicBool = AtomicBool::new(false);

/// Forward-angle diagnostic (spec.md §4.4.2).
///
/// Decides whether `theta` in a medium of index `n` describes the
/// forward-propagating wave: in the lossy/gain regime this is the
/// decaying branch (`Im(n cos theta) > 0`); at the lossless boundary it
/// falls back to the sign of the Poynting flux (`Re(n cos theta) > 0`).
/// Gain media and sign inconsistencies across the three diagnostic
/// quantities are logged as warnings, not treated as failures — the
/// solver proceeds with the branch this function selects.
fn is_forward_angle(n: Complex64, theta: Complex64) -> bool {
    if n.re * n.im < 0.0 {
        log::warn!(
            "gain medium (n' * n'' = {} < 0): forward-wave direction is ambiguous",
            n.re * n.im
        );
    }

    let ncostheta = n * theta.cos();
    let forward = if ncostheta.im.abs() > BRANCH_EPSILON {
        ncostheta.im > 0.0
    } else {
        ncostheta.re > 0.0
    };

    let conj_term = (n * theta.conj().cos()).re;
    let consistent = if forward {
        ncostheta.im > -BRANCH_EPSILON && ncostheta.re > -BRANCH_EPSILON && conj_term > -BRANCH_EPSILON
    } else {
        ncostheta.im < BRANCH_EPSILON && ncostheta.re < BRANCH_EPSILON && conj_term < BRANCH_EPSILON
    };
    if !consistent {
        log::warn!(
            "forward-angle consistency check failed (n={n}, theta={theta}, chosen forward={forward})"
        );
    }

    forward
}

/// Snell propagation through the stack (spec.md §4.4.3): compute each
/// layer's refraction angle from the incidence medium's lateral
/// wavevector, then correct the branch at the two semi-infinite
/// boundaries so they describe forward-propagating waves.
fn snell_angles(n_list: &[Complex64], theta0: Complex64) -> Vec<Complex64> {
    let lateral = n_list[0] * theta0.sin();
    let mut angles: Vec<Complex64> = n_list
        .iter()
        .map(|&n| (lateral / n).asin())
        .collect();

    let last = angles.len() - 1;
    if !is_forward_angle(n_list[0], angles[0]) {
        angles[0] = std::f64::consts::PI - angles[0];
    }
    if !is_forward_angle(n_list[last], angles[last]) {
        angles[last] = std::f64::consts::PI - angles[last];
    }
    angles
}

/// Fresnel reflection and transmission amplitudes at a single interface
/// (spec.md §4.4.5).
fn fresnel(
    polarization: Polarization,
    n_i: Complex64,
    n_j: Complex64,
    cos_i: Complex64,
    cos_j: Complex64,
) -> (Complex64, Complex64) {
    match polarization {
        Polarization::S => {
            let denom = n_i * cos_i + n_j * cos_j;
            let r = (n_i * cos_i - n_j * cos_j) / denom;
            let t = (n_i * cos_i * 2.0) / denom;
            (r, t)
        }
        Polarization::P => {
            let denom = n_j * cos_i + n_i * cos_j;
            let r = (n_j * cos_i - n_i * cos_j) / denom;
            let t = (n_i * cos_i * 2.0) / denom;
            (r, t)
        }
    }
}

/// Solve the coherent transfer-matrix problem for a stack (spec.md
/// §4.4): compute the reflectance and transmittance at a single vacuum
/// wavelength, polarization, and (possibly complex) angle of incidence.
///
/// Fails with a [`TmmError`] if `lambda` is not positive, if `n0 *
/// sin(theta0)` is not real within tolerance, if `theta0` does not
/// describe a forward-propagating wave in the incidence medium, or if
/// any layer's dispersion model cannot be evaluated at `lambda`.
/// Gain-medium ambiguity, forward-angle consistency failures, and the
/// opacity clamp are reported through the `log` facade and do not abort
/// the solve (spec.md §7).
pub fn coherent_tmm(
    stack: &Stack,
    polarization: Polarization,
    theta0: Complex64,
    lambda: f64,
) -> Result<SolveResult> {
    if lambda <= 0.0 {
        return Err(TmmError::NonPositiveWavelength { lambda });
    }
    if stack.len() < 2 {
        return Err(TmmError::InsufficientLayers { len: stack.len() });
    }

    let n_list: Vec<Complex64> = stack
        .layers()
        .iter()
        .map(|layer| {
            layer
                .index
                .index_at(lambda)
                .map_err(|e| TmmError::DispersionEvaluation(e.to_string()))
        })
        .collect::<Result<_>>()?;

    let n0 = n_list[0];
    let lateral = n0 * theta0.sin();
    if lateral.im.abs() >= BRANCH_EPSILON {
        return Err(TmmError::NonRealLateralWavevector {
            imag_part: lateral.im,
        });
    }
    if !is_forward_angle(n0, theta0) {
        return Err(TmmError::NonForwardIncidence);
    }

    let theta_list = snell_angles(&n_list, theta0);

    let n = n_list.len();
    let two_pi_over_lambda = 2.0 * std::f64::consts::PI / lambda;

    let cos_list: Vec<Complex64> = theta_list.iter().map(|t| t.cos()).collect();
    let kz_list: Vec<Complex64> = n_list
        .iter()
        .zip(&cos_list)
        .map(|(&ni, &ci)| ni * ci * two_pi_over_lambda)
        .collect();

    let mut delta_list = vec![Complex64::new(0.0, 0.0); n];
    for i in 1..n - 1 {
        let mut delta = kz_list[i] * stack.layer(i).thickness;
        if delta.im > OPACITY_CLAMP {
            if !OPACITY_WARNED.swap(true, Ordering::Relaxed) {
                log::warn!(
                    "opacity clamp engaged: Im(delta) > {OPACITY_CLAMP} in layer {i}, clamping for numerical stability"
                );
            }
            delta = Complex64::new(delta.re, OPACITY_CLAMP);
        }
        delta_list[i] = delta;
    }

    // Fresnel amplitudes for every adjacent pair (i, i+1).
    let mut r_list = Vec::with_capacity(n - 1);
    let mut t_list = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let (r, t) = fresnel(
            polarization,
            n_list[i],
            n_list[i + 1],
            cos_list[i],
            cos_list[i + 1],
        );
        r_list.push(r);
        t_list.push(t);
    }

    // Interior per-layer matrices, composed left-to-right (identity if N == 2).
    let mut m_tilde = Complex2x2::identity();
    for i in 1..n.saturating_sub(1) {
        let phase = Complex2x2::new(
            (-Complex64::i() * delta_list[i]).exp(),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            (Complex64::i() * delta_list[i]).exp(),
        );
        let interface = Complex2x2::new(
            Complex64::new(1.0, 0.0),
            r_list[i],
            r_list[i],
            Complex64::new(1.0, 0.0),
        );
        let m_i = phase.matmul(&interface).divide(t_list[i]);
        m_tilde = m_tilde.matmul(&m_i);
    }

    let interface0 = Complex2x2::new(
        Complex64::new(1.0, 0.0),
        r_list[0],
        r_list[0],
        Complex64::new(1.0, 0.0),
    )
    .divide(t_list[0]);
    m_tilde = interface0.matmul(&m_tilde);

    let r_amp = m_tilde.m10 / m_tilde.m00;
    let t_amp = Complex64::new(1.0, 0.0) / m_tilde.m00;

    let r = (r_amp * r_amp.conj()).re;

    let last = n - 1;
    let power_ratio = match polarization {
        Polarization::S => {
            (n_list[last] * cos_list[last]).re / (n_list[0] * cos_list[0]).re
        }
        Polarization::P => {
            (n_list[last] * cos_list[last].conj()).re / (n_list[0] * cos_list[0].conj()).re
        }
    };
    let t = (t_amp * t_amp.conj()).re * power_ratio;

    Ok(SolveResult { r, t })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispersion::DispersionModel;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    #[test]
    fn normal_incidence_air_glass_s_pol() {
        let air = Arc::new(DispersionModel::constant(Complex64::new(1.0, 0.0)));
        let glass = Arc::new(DispersionModel::constant(Complex64::new(1.5, 0.0)));
        let stack = Stack::new(air, glass);
        let result = coherent_tmm(
            &stack,
            Polarization::S,
            Complex64::new(0.0, 0.0),
            500.0,
        )
        .unwrap();
        assert_relative_eq!(result.r, 0.04, epsilon = 1e-8);
        assert_relative_eq!(result.t, 0.96, epsilon = 1e-8);
    }

    #[test]
    fn energy_conserves_for_lossless_stacks() {
        let air = Arc::new(DispersionModel::constant(Complex64::new(1.0, 0.0)));
        let glass = Arc::new(DispersionModel::constant(Complex64::new(1.5, 0.0)));
        for deg in [0.0, 10.0, 30.0, 60.0, 89.0] {
            let theta0 = Complex64::new(deg.to_radians(), 0.0);
            for pol in [Polarization::S, Polarization::P] {
                let stack = Stack::new(air.clone(), glass.clone());
                let result = coherent_tmm(&stack, pol, theta0, 500.0).unwrap();
                assert_relative_eq!(result.r + result.t, 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn rejects_nonpositive_wavelength() {
        let air = Arc::new(DispersionModel::constant(Complex64::new(1.0, 0.0)));
        let glass = Arc::new(DispersionModel::constant(Complex64::new(1.5, 0.0)));
        let stack = Stack::new(air, glass);
        let err = coherent_tmm(&stack, Polarization::S, Complex64::new(0.0, 0.0), 0.0).unwrap_err();
        assert_eq!(err, TmmError::NonPositiveWavelength { lambda: 0.0 });
    }

    #[test]
    fn rejects_non_forward_incidence_angle() {
        let air = Arc::new(DispersionModel::constant(Complex64::new(1.0, 0.0)));
        let glass = Arc::new(DispersionModel::constant(Complex64::new(1.5, 0.0)));
        let stack = Stack::new(air, glass);
        // pi - small forward angle is the backward branch.
        let theta0 = Complex64::new(std::f64::consts::PI - 0.2, 0.0);
        let err = coherent_tmm(&stack, Polarization::S, theta0, 500.0).unwrap_err();
        assert_eq!(err, TmmError::NonForwardIncidence);
    }
}
