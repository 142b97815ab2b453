//! Sign utilities for bracketing methods.
//! - `same_sign` : `true` if values share the same sign
//!
//! Exact zeros are handled by the callers before these are consulted.

/// Returns `true` if `x` and `y` have the same sign.
#[inline]
pub(crate) fn same_sign(x: f64, y: f64) -> bool {
    x.is_sign_positive() == y.is_sign_positive()
}
