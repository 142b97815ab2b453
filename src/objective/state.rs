//! Sufficient statistics of a [`Sample`], computed once and shared by
//! every optimizer.
//!
//! For the Normal log-likelihood every quantity reduces to
//! ┌ Σ(xᵢ − μ)  = n(x̄ − μ)
//! └ Σ(xᵢ − μ)² = SSD + n(x̄ − μ)²
//! so after one pass the objective is O(1) per evaluation.

use super::sample::Sample;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ObjectiveState {
    n: usize,
    mean: f64,
    ssd: f64,
    median: f64,
}

impl ObjectiveState {
    pub fn new(sample: &Sample) -> Self {
        let xs = sample.values();
        let n = xs.len();
        let nf = n as f64;

        let mean = xs.iter().sum::<f64>() / nf;
        let ssd = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>();

        let mut sorted = xs.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
        };

        Self { n, mean, ssd, median }
    }

    #[inline] pub fn n(&self) -> usize { self.n }
    #[inline] pub fn mean(&self) -> f64 { self.mean }
    #[inline] pub fn median(&self) -> f64 { self.median }

    /// Sum of squared deviations about the sample mean.
    #[inline] pub fn sum_sq_dev(&self) -> f64 { self.ssd }

    /// Population variance, SSD / n (the MLE of σ²).
    #[inline] pub fn variance(&self) -> f64 { self.ssd / self.n as f64 }

    /// Closed-form MLE of σ.
    #[inline] pub fn std_dev(&self) -> f64 { self.variance().sqrt() }

    /// Σ(xᵢ − μ)
    #[inline]
    pub(crate) fn sum_dev(&self, mu: f64) -> f64 {
        self.n as f64 * (self.mean - mu)
    }

    /// Σ(xᵢ − μ)²
    #[inline]
    pub(crate) fn sum_sq_dev_about(&self, mu: f64) -> f64 {
        let d = self.mean - mu;
        self.ssd + self.n as f64 * d * d
    }
}
