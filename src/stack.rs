use std::sync::Arc;

use crate::dispersion::DispersionModel;
use crate::error::{Result, TmmError};

/// Polarization of the incident plane wave (spec.md §3).
///
/// S-polarization (TE) has the electric field perpendicular to the plane
/// of incidence; P-polarization (TM) has it in the plane of incidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarization {
    S,
    P,
}

/// One layer of a [`Stack`]: a dispersion model and a thickness.
///
/// Thickness is `f64::INFINITY` for the incidence and exit media and
/// finite and positive for every interior layer.
#[derive(Debug, Clone)]
pub struct Layer {
    pub index: Arc<DispersionModel>,
    pub thickness: f64,
}

impl Layer {
    fn semi_infinite(index: Arc<DispersionModel>) -> Self {
        Self {
            index,
            thickness: f64::INFINITY,
        }
    }
}

/// An ordered sequence of [`Layer`]s modeling a planar multilayer stack.
///
/// Invariants (spec.md §3): length is always >= 2; the first and last
/// layers are semi-infinite and their thickness cannot be changed through
/// the public API; [`Stack::insert_layer`] always inserts immediately
/// above the bottom layer, so the top and bottom stay at positions `0`
/// and `len() - 1`.
#[derive(Debug, Clone)]
pub struct Stack {
    layers: Vec<Layer>,
}

impl Stack {
    /// Build a bare two-layer stack `[top(inf), bottom(inf)]`.
    pub fn new(top: Arc<DispersionModel>, bottom: Arc<DispersionModel>) -> Self {
        Self {
            layers: vec![Layer::semi_infinite(top), Layer::semi_infinite(bottom)],
        }
    }

    /// Insert a finite-thickness layer immediately above the bottom layer,
    /// shifting the previous bottom down by one position.
    ///
    /// `thickness` must be finite and strictly positive.
    pub fn insert_layer(&mut self, index: Arc<DispersionModel>, thickness: f64) -> Result<()> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(TmmError::InvalidThickness { thickness });
        }
        let insert_at = self.layers.len() - 1;
        self.layers.insert(insert_at, Layer { index, thickness });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn layer(&self, i: usize) -> &Layer {
        &self.layers[i]
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Human-readable listing of each layer's index and thickness at a
    /// given wavelength. Diagnostic only — not part of the numerical
    /// contract (spec.md §4.3, §6).
    pub fn print_layers(&self, lambda: f64) -> Result<String> {
        let mut out = String::new();
        for (i, layer) in self.layers.iter().enumerate() {
            let n = layer.index.index_at(lambda)?;
            if layer.thickness.is_infinite() {
                out.push_str(&format!("[{i}] n = {n:.4} (semi-infinite)\n"));
            } else {
                out.push_str(&format!(
                    "[{i}] n = {n:.4}, d = {:.2} nm\n",
                    layer.thickness
                ));
            }
        }
        out.pop();
        Ok(out)
    }
}
