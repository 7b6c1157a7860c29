/*!
Conjugate posterior updates for a normal-inverse-gamma prior.

Given a prior `NIG(mu0, nu0, alpha0, beta0)` and `n` observations with mean `m`, the
posterior is `NIG(mu, nu, alpha, beta)` with

```text
mu    = (nu0 mu0 + n m) / (nu0 + n)
nu    = nu0 + n
alpha = alpha0 + n / 2
beta  = beta0 + 1/2 sum (d_i - m)^2 + n nu0 (m - mu0)^2 / (2 (nu0 + n))
```

The data enter only through [`SufficientStats`] `(n, m, sum (d_i - m)^2)`, which can be
accumulated one value at a time or merged across batches. Updating batch by batch gives the same
posterior as a single update with all data. With no data the posterior is the prior.

# Example

```rust
use nig_conjugate::distributions::NormalInverseGamma;

let prior = NormalInverseGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
let post = prior.posterior(&[1.0, 2.0, 3.0, 4.0]).unwrap();

assert!((post.mu() - 2.4667).abs() < 1e-4);
assert!((post.nu() - 4.054).abs() < 1e-12);
assert!((post.alpha() - 3.12).abs() < 1e-12);
assert!((post.beta() - 3.0665).abs() < 1e-4);
```
*/

use crate::distributions::NormalInverseGamma;
use crate::errors::{NigError, NigResult};
use statrs::distribution::StudentsT;

/// Count, mean and sum of squared deviations of a set of observations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SufficientStats {
    n: usize,
    mean: f64,
    m2: f64,
}

impl SufficientStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates all of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`NigError::NonFiniteData`] for the first NaN/±inf value.
    pub fn from_data(data: &[f64]) -> NigResult<Self> {
        let mut stats = Self::new();
        stats.extend(data)?;
        Ok(stats)
    }

    /// Adds one observation (Welford's update).
    ///
    /// # Errors
    ///
    /// - [`NigError::NonFiniteData`] for a NaN/±inf value; `index` is the number of values
    ///   accumulated before it.
    /// - [`NigError::DataOverflow`] if the running mean or sum of squares leaves the `f64` range.
    ///
    /// On error the accumulator is left unchanged.
    pub fn push(&mut self, value: f64) -> NigResult<()> {
        if !value.is_finite() {
            return Err(NigError::NonFiniteData {
                index: self.n,
                value,
            });
        }
        let n = self.n + 1;
        let delta = value - self.mean;
        let mean = self.mean + delta / n as f64;
        let m2 = self.m2 + delta * (value - mean);
        if !(mean.is_finite() && m2.is_finite()) {
            return Err(NigError::DataOverflow { n });
        }
        *self = SufficientStats { n, mean, m2 };
        Ok(())
    }

    /// Adds every value of `data`; on error the values before the offending one are kept.
    ///
    /// A [`NigError::NonFiniteData`] index is the position within `data`.
    pub fn extend(&mut self, data: &[f64]) -> NigResult<()> {
        data.iter().enumerate().try_for_each(|(index, &v)| {
            self.push(v).map_err(|err| match err {
                NigError::NonFiniteData { value, .. } => NigError::NonFiniteData { index, value },
                other => other,
            })
        })
    }

    /// Combines two accumulators as if all their observations had been pushed into one.
    pub fn merge(&self, other: &SufficientStats) -> SufficientStats {
        if self.n == 0 {
            return *other;
        }
        if other.n == 0 {
            return *self;
        }
        let n = self.n + other.n;
        let (na, nb, nt) = (self.n as f64, other.n as f64, n as f64);
        let delta = other.mean - self.mean;
        SufficientStats {
            n,
            mean: self.mean + delta * nb / nt,
            m2: self.m2 + other.m2 + delta * delta * na * nb / nt,
        }
    }

    /// Number of observations.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Sample mean; `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        (self.n > 0).then_some(self.mean)
    }

    /// Sum of squared deviations from the mean.
    pub fn sum_sq_dev(&self) -> f64 {
        self.m2
    }
}

impl NormalInverseGamma {
    /// Posterior after observing `data`.
    pub fn posterior(&self, data: &[f64]) -> NigResult<NormalInverseGamma> {
        self.update_with(&SufficientStats::from_data(data)?)
    }

    /// Posterior after observing data summarized by `stats`.
    ///
    /// # Errors
    ///
    /// Returns [`NigError::DataOverflow`] if the updated hyperparameters leave the `f64` range.
    pub fn update_with(&self, stats: &SufficientStats) -> NigResult<NormalInverseGamma> {
        if stats.n == 0 {
            return Ok(*self);
        }
        let (mu0, nu0, alpha0, beta0) = self.params();
        let n = stats.n as f64;
        let nu = nu0 + n;
        let dev = stats.mean - mu0;
        NormalInverseGamma::new(
            (nu0 * mu0 + n * stats.mean) / nu,
            nu,
            alpha0 + n / 2.0,
            beta0 + 0.5 * stats.m2 + n * nu0 * dev * dev / (2.0 * nu),
        )
        .map_err(|_| NigError::DataOverflow { n: stats.n })
    }

    /// Posterior predictive distribution of one new observation: Student-t with `2 alpha`
    /// degrees of freedom, location `mu` and scale `sqrt(beta (nu + 1) / (alpha nu))`.
    pub fn predictive(&self) -> NigResult<StudentsT> {
        let (mu, nu, alpha, beta) = self.params();
        let scale = (beta * (nu + 1.0) / (alpha * nu)).sqrt();
        StudentsT::new(mu, scale, 2.0 * alpha).map_err(|e| NigError::Distribution(e.to_string()))
    }
}

/// Posterior of `prior` after observing `data`. Shorthand for [`NormalInverseGamma::posterior`].
pub fn update(prior: &NormalInverseGamma, data: &[f64]) -> NigResult<NormalInverseGamma> {
    prior.posterior(data)
}
