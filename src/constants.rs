/// Numerical tolerance used throughout the solver for "is this effectively
/// zero/real/on-axis" branch decisions (spec.md §4.4.1, §4.4.2: "100*eps").
pub const BRANCH_EPSILON: f64 = 100.0 * f64::EPSILON;

/// Imaginary-phase-thickness clamp threshold (spec.md §4.4.4). Above this,
/// single-pass transmission through a layer is below 1e-30 and the
/// exponentials in the propagation matrix would overflow.
pub const OPACITY_CLAMP: f64 = 35.0;
