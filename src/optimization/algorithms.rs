//! Optimizer definitions.
//!
//! Provides the [`Algorithm`] enum, which enumerates all supported methods,
//! along with the shared [`GLOBAL_MAX_ITER_FALLBACK`] hard cap.

use super::golden_section::GOLDEN_RATIO;


/// Methods with a theoretical iteration bound (bisection, golden section)
/// compute their cap from the initial bracket. This cap is only applied
/// when that bound would otherwise exceed it.
pub const GLOBAL_MAX_ITER_FALLBACK: usize = 500;


/// Optimizer variants.
/// - [`Algorithm::Bracket`] : root-finding on the score with a sign-change bracket
/// - [`Algorithm::Open`]    : root-finding on the score from a single guess
/// - [`Algorithm::Search`]  : derivative-free maximization on a bracket
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    Bracket(BracketFamily),
    Open(OpenFamily),
    Search(SearchFamily),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BracketFamily {
    Bisection,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpenFamily {
    Newton,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchFamily {
    GoldenSection,
}

impl Algorithm {
    pub const BISECTION: Algorithm      = Algorithm::Bracket(BracketFamily::Bisection);
    pub const NEWTON: Algorithm         = Algorithm::Open(OpenFamily::Newton);
    pub const GOLDEN_SECTION: Algorithm = Algorithm::Search(SearchFamily::GoldenSection);

    /// Default iteration count if `max_iter` is unset in config.
    ///
    /// # Notes
    /// - Methods with theoretical bounds return `None`, meaning
    ///   "compute from the bracket via [`Algorithm::theoretical_iter`]".
    pub const fn default_max_iter(self) -> Option<usize> {
        match self {
            Algorithm::Open(OpenFamily::Newton)              => Some(100),
            Algorithm::Bracket(BracketFamily::Bisection)     => None,
            Algorithm::Search(SearchFamily::GoldenSection)   => None,
        }
    }

    /// Fewest iterations that bring a bracket of `width` strictly below `tol`.
    /// - bisection     : `floor(log2(width / tol)) + 1`
    /// - golden section: `floor(ln(width / tol) / ln(1/φ)) + 1`
    ///
    /// Equals `ceil(..)` unless the ratio is an exact power, where one more
    /// iteration is needed for the strict comparison.
    ///
    /// Returns `None` for open methods.
    pub fn theoretical_iter(self, width: f64, tol: f64) -> Option<usize> {
        if matches!(self, Algorithm::Open(_)) {
            return None;
        }
        if width < tol {
            return Some(0);
        }
        let levels = match self {
            Algorithm::Search(SearchFamily::GoldenSection) => (width / tol).ln() / (1.0 / GOLDEN_RATIO).ln(),
            _                                              => (width / tol).log2(),
        };
        let iters = levels.floor() + 1.0;
        if !iters.is_finite() || iters >= GLOBAL_MAX_ITER_FALLBACK as f64 {
            return Some(GLOBAL_MAX_ITER_FALLBACK);
        }
        Some(iters as usize)
    }

    pub const fn algorithm_name(self) -> &'static str {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)   => "bisection",
            Algorithm::Open(OpenFamily::Newton)            => "newton",
            Algorithm::Search(SearchFamily::GoldenSection) => "golden_section",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}
