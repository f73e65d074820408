use std::fmt;

/// Domain errors for the coherent TMM solver.
///
/// These are the only fatal outcomes of a solve (spec.md §7): ambiguity
/// warnings and the opacity notice are diagnostics, not errors, and are
/// reported through the `log` facade instead (see [`crate::tmm`]).
#[derive(Debug, Clone, PartialEq)]
pub enum TmmError {
    NonPositiveWavelength {
        lambda: f64,
    },
    NonRealLateralWavevector {
        imag_part: f64,
    },
    NonForwardIncidence,
    InsufficientLayers {
        len: usize,
    },
    InvalidThickness {
        thickness: f64,
    },
    DispersionEvaluation(String),
}

pub type Result<T> = std::result::Result<T, TmmError>;

impl fmt::Display for TmmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveWavelength { lambda } => {
                write!(f, "wavelength must be positive, got {lambda}")
            }
            Self::NonRealLateralWavevector { imag_part } => write!(
                f,
                "n0*sin(theta0) is not real within tolerance (|Im| = {imag_part})"
            ),
            Self::NonForwardIncidence => {
                write!(f, "theta0 does not describe a forward-propagating wave")
            }
            Self::InsufficientLayers { len } => {
                write!(f, "stack must have at least 2 layers, got {len}")
            }
            Self::InvalidThickness { thickness } => {
                write!(f, "layer thickness must be finite and positive, got {thickness}")
            }
            Self::DispersionEvaluation(msg) => write!(f, "dispersion model error: {msg}"),
        }
    }
}

impl std::error::Error for TmmError {}
