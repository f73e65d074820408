//! Coherent transfer-matrix method (TMM) optics core.
//!
//! Computes reflectance and transmittance of a planar multilayer stack
//! for a monochromatic plane wave at arbitrary angle and polarization,
//! including absorbing (complex-index) media and evanescent regimes.
//!
//! The four cooperating pieces, leaves-first:
//! - [`dispersion::DispersionModel`] — a complex refractive index as a
//!   function of vacuum wavelength.
//! - [`matrix::Complex2x2`] — the 2x2 complex value type the solver is
//!   built from.
//! - [`stack::Stack`] — the ordered multilayer with semi-infinite ends.
//! - [`tmm::coherent_tmm`] — the solver itself.
//!
//! This crate has no CLI, wire protocol, or persisted state — its only
//! boundary is the programmatic interface re-exported at the crate root.

pub mod constants;
pub mod dispersion;
pub mod error;
mod interp;
pub mod matrix;
pub mod stack;
pub mod tmm;

pub use dispersion::DispersionModel;
pub use error::{Result, TmmError};
pub use matrix::Complex2x2;
pub use stack::{Layer, Polarization, Stack};
pub use tmm::{coherent_tmm, SolveResult};
