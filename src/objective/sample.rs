//! Validated sample of observations.

use super::errors::ObjectiveError;

/// Immutable, ordered sequence of finite observations with `n >= 1`.
///
/// # Validation
/// ├ `values` must be non-empty       ([`ObjectiveError::EmptySample`])
/// └ every value must be finite       ([`ObjectiveError::NonFiniteObservation`])
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    pub fn new(values: Vec<f64>) -> Result<Self, ObjectiveError> {
        if values.is_empty() {
            return Err(ObjectiveError::EmptySample);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ObjectiveError::NonFiniteObservation { index, value });
        }
        Ok(Self { values })
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, ObjectiveError> {
        Self::new(values.to_vec())
    }

    #[inline] pub fn len(&self) -> usize { self.values.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.values.is_empty() }
    #[inline] pub fn values(&self) -> &[f64] { &self.values }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] { &self.values }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = ObjectiveError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}
