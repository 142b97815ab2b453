//! Convergence trace recorded by every optimizer.
//!
//! A [`Trace`] is append-only while the optimizer runs and owned by the
//! report it ends up in, so traces are never shared between methods.

use serde::Serialize;


/// One recorded iteration.
/// - `iteration` : 1-based iteration index
/// - `estimate`  : parameter estimate after the iteration
/// - `objective` : log-likelihood associated with the estimate
/// - `bracket`   : bracket after the update (bracketing methods only)
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TracePoint {
    pub iteration : usize,
    pub estimate  : f64,
    pub objective : f64,
    pub bracket   : Option<[f64; 2]>,
}

impl TracePoint {
    pub fn width(&self) -> Option<f64> {
        self.bracket.map(|[lo, hi]| hi - lo)
    }
}


#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    points: Vec<TracePoint>,
}

impl Trace {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(n: usize) -> Self {
        Self { points: Vec::with_capacity(n) }
    }

    pub(crate) fn push(&mut self, point: TracePoint) {
        self.points.push(point);
    }

    #[inline] pub fn len(&self) -> usize { self.points.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() }
    #[inline] pub fn points(&self) -> &[TracePoint] { &self.points }
    #[inline] pub fn last(&self) -> Option<&TracePoint> { self.points.last() }

    pub fn iter(&self) -> std::slice::Iter<'_, TracePoint> {
        self.points.iter()
    }

    /// `(iteration, estimate)` pairs, the minimal form consumed by reporting.
    pub fn estimates(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.points.iter().map(|p| (p.iteration, p.estimate))
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TracePoint;
    type IntoIter = std::slice::Iter<'a, TracePoint>;

    fn into_iter(self) -> Self::IntoIter { self.points.iter() }
}
