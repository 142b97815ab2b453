//! Shared configuration for optimizers.
//!
//! Provides [`CommonCfg`] with the default tolerance and iteration cap,
//! used by all optimizer configs.
//!
//! [`CommonCfg`] : universal fields
//! ├ `tol`      : stopping tolerance ε (step, width or score)
//! └ `max_iter` : iteration cap (optional)
//!
//! Score-based methods additionally carry an optional fixed σ (see
//! [`resolve_sigma`]); golden section carries the searched parameter.


pub const DEFAULT_TOL: f64 = 1e-6;


#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CommonCfg {
    tol: f64,
    max_iter: Option<usize>,
}

impl CommonCfg {
    pub fn new() -> Self {
        Self {
            tol      : DEFAULT_TOL,
            max_iter : None,
        }
    }

    // getters
    pub fn tol(&self)      -> f64 { self.tol }
    pub fn max_iter(&self) -> Option<usize> { self.max_iter }

    // setters (internal)
    pub(crate) fn with_tol      (&mut self, v: f64)   { self.tol      = v; }
    pub(crate) fn with_max_iter (&mut self, v: usize) { self.max_iter = Some(v); }
}

impl Default for CommonCfg {
    fn default() -> Self { Self::new() }
}

macro_rules! impl_common_cfg {
    ($cfg:ty) => {
        impl $cfg {
            pub fn set_tol(
                mut self, v: f64
            ) -> Result<Self, $crate::optimization::errors::OptimizationError> {
                if !v.is_finite() || v <= 0.0 {
                    return Err(
                        $crate::optimization::errors::OptimizationError::InvalidTolerance { got: v }
                    );
                }
                self.common.with_tol(v);
                Ok(self)
            }
            pub fn set_max_iter(
                mut self, v: usize
            ) -> Result<Self, $crate::optimization::errors::OptimizationError> {
                if v == 0 {
                    return Err(
                        $crate::optimization::errors::OptimizationError::InvalidMaxIter { got: v }
                    );
                }
                self.common.with_max_iter(v);
                Ok(self)
            }

            #[inline] pub fn tol(&self)      -> f64 { self.common.tol() }
            #[inline] pub fn max_iter(&self) -> Option<usize> { self.common.max_iter() }
        }
    };
}
pub(crate) use impl_common_cfg;


/// Resolves the σ used by score-based methods.
///
/// Explicit σ wins; otherwise the population standard deviation. A zero or
/// non-finite σ² is reported back as `Err(variance)` so each method can
/// surface its own `DegenerateObjective` variant.
pub(crate) fn resolve_sigma(
    fixed: Option<f64>,
    state: &crate::objective::ObjectiveState
) -> Result<f64, f64> {
    let sigma = fixed.unwrap_or_else(|| state.std_dev());
    let var = sigma * sigma;
    if !var.is_finite() || var <= 0.0 {
        return Err(var);
    }
    Ok(sigma)
}
