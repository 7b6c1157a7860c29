//! Marginal credible intervals for a normal-inverse-gamma distribution.
//!
//! [`IntervalEstimator`] draws a large sample through [`crate::sampler::NigSampler`] and reads the
//! lower and upper percentiles of the mean column and the variance column independently. For the
//! default level of 0.95 those are the 2.5th and 97.5th percentiles. Percentiles interpolate
//! linearly between order statistics.
//!
//! [`analytic_intervals`] returns the exact quantiles of the two marginals (Student-t for the
//! mean, inverse-gamma for the variance), which the Monte-Carlo estimate converges to.

use crate::distributions::NormalInverseGamma;
use crate::errors::{NigError, NigResult};
use crate::sampler::{NigSampler, SIGMA2_COL, X_COL};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{array, Array1, ArrayView1, ArrayView2, Axis};
use ndarray_stats::{interpolate::Linear, QuantileExt};
use noisy_float::types::{n64, R64};
use rand::Rng;
use statrs::distribution::{ContinuousCDF, InverseGamma};
use std::fmt;

/// Number of draws used when none is configured.
pub const DEFAULT_N_DRAWS: usize = 1_000_000;
/// Credible level used when none is configured.
pub const DEFAULT_LEVEL: f64 = 0.95;
/// Number of parallel sampling blocks used when none is configured.
pub const DEFAULT_N_CHUNKS: usize = 16;

const BISECTION_STEPS: usize = 200;

/// A closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lower, self.upper)
    }
}

/// Marginal credible intervals for the mean and the variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CredibleIntervals {
    /// Interval for `x`, the mean of the normal distribution.
    pub mean: Interval,
    /// Interval for `sigma2`, the variance of the normal distribution.
    pub variance: Interval,
    /// Credible level, e.g. `0.95`.
    pub level: f64,
    /// Number of draws behind the estimate; `None` for exact quantiles.
    pub n_draws: Option<usize>,
}

impl fmt::Display for CredibleIntervals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.n_draws {
            Some(n) => format!("{n} draws"),
            None => "analytic marginals".to_string(),
        };
        write!(
            f,
            "{:.1}% credible intervals ({source})\n  mean:     {}\n  variance: {}",
            self.level * 100.0,
            self.mean,
            self.variance
        )
    }
}

/// Monte-Carlo estimator of marginal credible intervals.
///
/// # Example
///
/// ```rust
/// use nig_conjugate::distributions::NormalInverseGamma;
/// use nig_conjugate::interval::IntervalEstimator;
///
/// let prior = NormalInverseGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
/// let ci = IntervalEstimator::new(prior)
///     .n_draws(20_000)
///     .seed(42)
///     .estimate()
///     .unwrap();
/// assert!(ci.mean.contains(0.0));
/// println!("{ci}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalEstimator {
    target: NormalInverseGamma,
    n_draws: usize,
    level: f64,
    n_chunks: usize,
    seed: u64,
}

impl IntervalEstimator {
    /// Creates an estimator with [`DEFAULT_N_DRAWS`], [`DEFAULT_LEVEL`], [`DEFAULT_N_CHUNKS`]
    /// and a random seed.
    pub fn new(target: NormalInverseGamma) -> Self {
        Self {
            target,
            n_draws: DEFAULT_N_DRAWS,
            level: DEFAULT_LEVEL,
            n_chunks: DEFAULT_N_CHUNKS,
            seed: rand::rng().random::<u64>(),
        }
    }

    pub fn n_draws(mut self, n_draws: usize) -> Self {
        self.n_draws = n_draws;
        self
    }

    pub fn level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    pub fn n_chunks(mut self, n_chunks: usize) -> Self {
        self.n_chunks = n_chunks;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draws the sample and computes both marginal intervals.
    pub fn estimate(&self) -> NigResult<CredibleIntervals> {
        self.validate()?;
        let draws = self.sampler()?.sample_par(self.n_draws, self.n_chunks)?;
        self.summarize(draws.view())
    }

    /// Same as [`IntervalEstimator::estimate`] while displaying a progress bar over the draws.
    pub fn estimate_progress(&self) -> NigResult<CredibleIntervals> {
        self.validate()?;
        let pb = ProgressBar::new(self.n_draws as u64);
        let style = ProgressStyle::default_bar()
            .template("{prefix:8} {bar:40.cyan/blue} {pos}/{len} ({eta}) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        pb.set_style(style);
        pb.set_prefix("Draws");
        pb.set_message(format!("{} blocks", self.n_chunks));

        let draws = self
            .sampler()?
            .sample_blocks(self.n_draws, self.n_chunks, |len| pb.inc(len as u64))?;
        pb.set_message("computing percentiles");
        let intervals = self.summarize(draws.view())?;
        pb.finish_with_message("done");
        Ok(intervals)
    }

    /// Computes both intervals from an existing `[n, 2]` batch of draws.
    pub fn summarize(&self, draws: ArrayView2<f64>) -> NigResult<CredibleIntervals> {
        Ok(CredibleIntervals {
            mean: percentile_interval(draws.column(X_COL), self.level)?,
            variance: percentile_interval(draws.column(SIGMA2_COL), self.level)?,
            level: self.level,
            n_draws: Some(draws.nrows()),
        })
    }

    fn validate(&self) -> NigResult<()> {
        check_level(self.level)?;
        if self.n_draws == 0 {
            return Err(NigError::EmptyDraws);
        }
        if self.n_chunks == 0 {
            return Err(NigError::InvalidChunks);
        }
        Ok(())
    }

    fn sampler(&self) -> NigResult<NigSampler> {
        Ok(NigSampler::new(self.target)?.set_seed(self.seed))
    }
}

/// Central interval of `column` holding `level` of its values, from the
/// `(1 - level) / 2` and `(1 + level) / 2` percentiles.
///
/// # Errors
///
/// Returns an error for an invalid `level`, an empty column, or a NaN/±inf value.
pub fn percentile_interval(column: ArrayView1<f64>, level: f64) -> NigResult<Interval> {
    check_level(level)?;
    if column.is_empty() {
        return Err(NigError::EmptyDraws);
    }
    let values = column
        .iter()
        .enumerate()
        .map(|(index, &v)| R64::try_new(v).ok_or(NigError::NonFiniteDraw { index }))
        .collect::<NigResult<Vec<R64>>>()?;
    let mut values = Array1::from_vec(values);

    let tail = (1.0 - level) / 2.0;
    let qs = array![n64(tail), n64(1.0 - tail)];
    let bounds = values.quantiles_axis_mut(Axis(0), &qs, &Linear)?;
    Ok(Interval {
        lower: bounds[0].raw(),
        upper: bounds[1].raw(),
    })
}

/// Exact marginal credible intervals of `target` at `level`.
pub fn analytic_intervals(target: &NormalInverseGamma, level: f64) -> NigResult<CredibleIntervals> {
    check_level(level)?;
    let tail = (1.0 - level) / 2.0;

    let t = target.mean_marginal()?;
    let ig = target.variance_marginal()?;
    Ok(CredibleIntervals {
        mean: Interval {
            lower: t.inverse_cdf(tail),
            upper: t.inverse_cdf(1.0 - tail),
        },
        variance: Interval {
            lower: inverse_gamma_quantile(&ig, tail),
            upper: inverse_gamma_quantile(&ig, 1.0 - tail),
        },
        level,
        n_draws: None,
    })
}

/// Bisection on the inverse-gamma CDF over `(0, hi]`, doubling `hi` until it brackets `p`.
fn inverse_gamma_quantile(ig: &InverseGamma, p: f64) -> f64 {
    let (mut lo, mut hi) = (0.0, 1.0);
    while ig.cdf(hi) < p {
        lo = hi;
        hi *= 2.0;
    }
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if ig.cdf(mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

fn check_level(level: f64) -> NigResult<()> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(NigError::InvalidLevel { level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_percentile_interval_linear_interpolation() {
        // 0..=100: the 2.5th percentile sits at index 2.5, the 97.5th at 97.5.
        let column = Array1::from_iter((0..=100).map(f64::from));
        let ci = percentile_interval(column.view(), 0.95).unwrap();
        assert_abs_diff_eq!(ci.lower, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ci.upper, 97.5, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_interval_unsorted_input() {
        let column = array![5.0, 1.0, 4.0, 2.0, 3.0];
        let ci = percentile_interval(column.view(), 0.5).unwrap();
        // Quartiles of 1..=5 with linear interpolation.
        assert_abs_diff_eq!(ci.lower, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ci.upper, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_interval_errors() {
        let column = array![1.0, 2.0];
        assert_eq!(
            percentile_interval(column.view(), 1.0),
            Err(NigError::InvalidLevel { level: 1.0 })
        );
        assert_eq!(
            percentile_interval(column.view(), 0.0),
            Err(NigError::InvalidLevel { level: 0.0 })
        );
        let empty = Array1::<f64>::zeros(0);
        assert_eq!(
            percentile_interval(empty.view(), 0.9),
            Err(NigError::EmptyDraws)
        );
        let with_nan = array![1.0, f64::NAN, 3.0];
        assert_eq!(
            percentile_interval(with_nan.view(), 0.9),
            Err(NigError::NonFiniteDraw { index: 1 })
        );
        let with_inf = array![1.0, f64::INFINITY, 3.0];
        assert_eq!(
            percentile_interval(with_inf.view(), 0.9),
            Err(NigError::NonFiniteDraw { index: 1 })
        );
        let with_neg_inf = array![f64::NEG_INFINITY, 2.0];
        assert_eq!(
            percentile_interval(with_neg_inf.view(), 0.5),
            Err(NigError::NonFiniteDraw { index: 0 })
        );
    }

    #[test]
    fn test_estimate_reports_infinite_draws() {
        // With alpha this small about 5% of the gamma draws underflow to 0, so sigma2 = inf.
        let nig = NormalInverseGamma::new(0.0, 1.0, 0.004, 1.0).unwrap();
        let result = IntervalEstimator::new(nig)
            .n_draws(10_000)
            .n_chunks(1)
            .seed(1)
            .estimate();
        assert!(
            matches!(result, Err(NigError::NonFiniteDraw { .. })),
            "Expected NonFiniteDraw, got {result:?}"
        );
    }

    #[test]
    fn test_inverse_gamma_quantile_inverts_cdf() {
        let ig = InverseGamma::new(3.12, 3.0665).unwrap();
        for &p in &[0.025, 0.5, 0.975] {
            let q = inverse_gamma_quantile(&ig, p);
            assert_abs_diff_eq!(ig.cdf(q), p, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_analytic_intervals_symmetric_mean() {
        let nig = NormalInverseGamma::new(2.0, 1.0, 3.0, 2.0).unwrap();
        let ci = analytic_intervals(&nig, 0.95).unwrap();
        assert_abs_diff_eq!(ci.mean.lower + ci.mean.upper, 4.0, epsilon = 1e-8);
        assert!(ci.variance.lower > 0.0);
        assert!(ci.variance.contains(nig.expected_variance().unwrap()));
        assert_eq!(ci.n_draws, None);
    }

    #[test]
    fn test_estimator_validation() {
        let nig = NormalInverseGamma::new(0.0, 1.0, 2.0, 2.0).unwrap();
        let base = IntervalEstimator::new(nig).seed(1);
        assert_eq!(
            base.clone().n_draws(0).estimate(),
            Err(NigError::EmptyDraws)
        );
        assert_eq!(
            base.clone().n_chunks(0).estimate(),
            Err(NigError::InvalidChunks)
        );
        assert_eq!(
            base.level(1.5).estimate(),
            Err(NigError::InvalidLevel { level: 1.5 })
        );
    }

    #[test]
    fn test_estimate_is_reproducible() {
        let nig = NormalInverseGamma::new(0.0, 1.0, 2.0, 2.0).unwrap();
        let est = IntervalEstimator::new(nig).n_draws(10_000).n_chunks(4).seed(9);
        assert_eq!(est.estimate().unwrap(), est.estimate().unwrap());
    }

    #[test]
    fn test_estimate_close_to_analytic() {
        let nig = NormalInverseGamma::new(2.467, 4.054, 3.12, 3.0665).unwrap();
        let mc = IntervalEstimator::new(nig)
            .n_draws(200_000)
            .seed(2024)
            .estimate()
            .unwrap();
        let exact = analytic_intervals(&nig, 0.95).unwrap();
        assert_abs_diff_eq!(mc.mean.lower, exact.mean.lower, epsilon = 0.04);
        assert_abs_diff_eq!(mc.mean.upper, exact.mean.upper, epsilon = 0.04);
        assert_abs_diff_eq!(mc.variance.lower, exact.variance.lower, epsilon = 0.02);
        assert_abs_diff_eq!(mc.variance.upper, exact.variance.upper, epsilon = 0.15);
    }

    #[test]
    fn test_display() {
        let ci = CredibleIntervals {
            mean: Interval {
                lower: -1.0,
                upper: 1.0,
            },
            variance: Interval {
                lower: 0.5,
                upper: 2.0,
            },
            level: 0.95,
            n_draws: Some(10),
        };
        assert_eq!(
            ci.to_string(),
            "95.0% credible intervals (10 draws)\n  mean:     [-1.0000, 1.0000]\n  variance: [0.5000, 2.0000]"
        );
    }
}
