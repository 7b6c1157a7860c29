/*!
The normal-inverse-gamma (NIG) distribution and the traits used to evaluate it.

A NIG with hyperparameters `(mu, nu, alpha, beta)` is the joint distribution of a
normal distribution's mean `x` and variance `sigma2`:

- `sigma2 ~ InverseGamma(alpha, beta)`,
- `x | sigma2 ~ Normal(mu, sigma2 / nu)`.

It is the conjugate prior for a normal likelihood with unknown mean and variance,
so updating it with data (see [`crate::posterior`]) yields another NIG.

This module defines:
- [`Target`] for unnormalized log densities,
- [`Normalized`] for fully normalized log densities,
- [`NormalInverseGamma`], the hyperparameter set with density, moments and marginals,
- [`NigSample`], one draw `(x, sigma2)`, which can be read as a normal distribution.

## Examples

```rust
use nig_conjugate::distributions::{NormalInverseGamma, Normalized};

let nig = NormalInverseGamma::new(0.0, 1.0, 2.0, 3.0).unwrap();

// Joint density at (x, sigma2) = (0.5, 1.2)
let p = nig.pdf(0.5, 1.2);
assert!(p > 0.0);

// The same value via the trait, in log space
let logp = nig.logp(&[0.5, 1.2]);
assert!((logp.exp() - p).abs() < 1e-12);

// Outside the support the density vanishes
assert_eq!(nig.pdf(0.5, -1.0), 0.0);
```
*/

use crate::errors::{NigError, NigResult};
use num_traits::Float;
use statrs::distribution::{Continuous, InverseGamma, Normal, StudentsT};
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;
use std::fmt;

/// A trait for densities over `[x, sigma2]` that can be evaluated up to a normalizing constant.
pub trait Target<T, F: Float> {
    /// Returns the log of the unnormalized density at `position`.
    fn unnorm_logp(&self, position: &[T; 2]) -> F;
}

/// A trait for distributions over `[x, sigma2]` that provide a normalized log-density.
pub trait Normalized<T, F: Float> {
    /// Returns the normalized log-density at `position`.
    fn logp(&self, position: &[T; 2]) -> F;
}

/**
Hyperparameters `(mu, nu, alpha, beta)` of a normal-inverse-gamma distribution.

- `mu`: prior location of the mean.
- `nu`: pseudo-count behind `mu`; the mean's variance is `sigma2 / nu`.
- `alpha`: shape of the inverse-gamma on the variance.
- `beta`: scale of the inverse-gamma on the variance.

Construct through [`NormalInverseGamma::new`], which enforces `nu, alpha, beta > 0`
and finiteness of all four values.
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalInverseGamma {
    mu: f64,
    nu: f64,
    alpha: f64,
    beta: f64,
}

impl NormalInverseGamma {
    /// Creates a NIG distribution after validating the hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`NigError::InvalidParam`] if `mu` is non-finite or any of
    /// `nu`, `alpha`, `beta` is non-finite or not strictly positive.
    pub fn new(mu: f64, nu: f64, alpha: f64, beta: f64) -> NigResult<Self> {
        if !mu.is_finite() {
            return Err(NigError::InvalidParam {
                name: "mu",
                value: mu,
                reason: "Must be finite.",
            });
        }
        for (name, value) in [("nu", nu), ("alpha", alpha), ("beta", beta)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(NigError::InvalidParam {
                    name,
                    value,
                    reason: "Must be finite and > 0.",
                });
            }
        }
        Ok(Self {
            mu,
            nu,
            alpha,
            beta,
        })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Hyperparameters as a `(mu, nu, alpha, beta)` tuple.
    pub fn params(&self) -> (f64, f64, f64, f64) {
        (self.mu, self.nu, self.alpha, self.beta)
    }

    /// Joint density `Normal(x; mu, sigma2 / nu) * InverseGamma(sigma2; alpha, beta)`.
    ///
    /// Returns `0.0` for `sigma2 <= 0`.
    pub fn pdf(&self, x: f64, sigma2: f64) -> f64 {
        self.ln_pdf(x, sigma2).exp()
    }

    /// Natural log of [`NormalInverseGamma::pdf`]; `-inf` for `sigma2 <= 0`.
    pub fn ln_pdf(&self, x: f64, sigma2: f64) -> f64 {
        self.logp(&[x, sigma2])
    }

    /// Log of the normalizing constant `sqrt(nu / 2 pi) beta^alpha / Gamma(alpha)`.
    fn ln_normalizer(&self) -> f64 {
        0.5 * (self.nu / (2.0 * PI)).ln() + self.alpha * self.beta.ln() - ln_gamma(self.alpha)
    }

    /// Marginal distribution of the mean: a location-scale Student-t with `2 alpha`
    /// degrees of freedom, location `mu` and scale `sqrt(beta / (alpha nu))`.
    pub fn mean_marginal(&self) -> NigResult<StudentsT> {
        let scale = (self.beta / (self.alpha * self.nu)).sqrt();
        StudentsT::new(self.mu, scale, 2.0 * self.alpha)
            .map_err(|e| NigError::Distribution(e.to_string()))
    }

    /// Marginal distribution of the variance: `InverseGamma(alpha, beta)`.
    pub fn variance_marginal(&self) -> NigResult<InverseGamma> {
        InverseGamma::new(self.alpha, self.beta).map_err(|e| NigError::Distribution(e.to_string()))
    }

    /// `E[x] = mu`.
    pub fn expected_mean(&self) -> f64 {
        self.mu
    }

    /// `E[sigma2] = beta / (alpha - 1)`, defined only for `alpha > 1`.
    pub fn expected_variance(&self) -> Option<f64> {
        (self.alpha > 1.0).then(|| self.beta / (self.alpha - 1.0))
    }

    /// Joint mode `(mu, beta / (alpha + 3/2))`.
    pub fn mode(&self) -> (f64, f64) {
        (self.mu, self.beta / (self.alpha + 1.5))
    }
}

impl Normalized<f64, f64> for NormalInverseGamma {
    /// Log density at `[x, sigma2]`.
    fn logp(&self, position: &[f64; 2]) -> f64 {
        self.unnorm_logp(position) + self.ln_normalizer()
    }
}

impl Target<f64, f64> for NormalInverseGamma {
    /// Log density at `[x, sigma2]` without the terms that only depend on the hyperparameters.
    fn unnorm_logp(&self, position: &[f64; 2]) -> f64 {
        let [x, sigma2] = *position;
        if sigma2 <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let dev = x - self.mu;
        -(self.alpha + 1.5) * sigma2.ln() - (2.0 * self.beta + self.nu * dev * dev) / (2.0 * sigma2)
    }
}

impl fmt::Display for NormalInverseGamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NIG(mu={:.4}, nu={:.4}, alpha={:.4}, beta={:.4})",
            self.mu, self.nu, self.alpha, self.beta
        )
    }
}

/// One draw from a NIG: the mean `x` and variance `sigma2` of a normal distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NigSample {
    pub x: f64,
    pub sigma2: f64,
}

impl NigSample {
    /// The normal distribution `Normal(x, sigma2)` this draw stands for.
    pub fn as_normal(&self) -> NigResult<Normal> {
        Normal::new(self.x, self.sigma2.sqrt()).map_err(|e| NigError::Distribution(e.to_string()))
    }

    /// Evaluates the density of [`NigSample::as_normal`] on `grid`.
    pub fn pdf_curve(&self, grid: &[f64]) -> NigResult<Vec<f64>> {
        let normal = self.as_normal()?;
        Ok(grid.iter().map(|&v| normal.pdf(v)).collect())
    }
}
