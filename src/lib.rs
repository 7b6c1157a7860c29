//! # NIG Conjugate
//!
//! A compact Rust library for **Bayesian inference on a normal likelihood with unknown mean and
//! variance**, using the **normal-inverse-gamma (NIG)** distribution as conjugate prior and
//! posterior.
//!
//! ## Getting Started
//!
//! To use this library, add it to your project:
//! ```bash
//! cargo add nig-conjugate
//! ```
//!
//! The library covers four calculations:
//! 1. **Density**: [`distributions::NormalInverseGamma::pdf`] evaluates the joint density of a
//!    normal distribution's mean `x` and variance `sigma2`.
//! 2. **Sampling**: [`sampler::NigSampler`] draws `(x, sigma2)` pairs, sequentially or in
//!    parallel blocks. Each draw can be read as a normal distribution via
//!    [`distributions::NigSample::as_normal`].
//! 3. **Credible intervals**: [`interval::IntervalEstimator`] reads marginal intervals off the
//!    percentiles of a large sample; [`interval::analytic_intervals`] gives the exact values.
//! 4. **Posterior updates**: [`distributions::NormalInverseGamma::posterior`] applies the
//!    closed-form conjugate update to observed data.
//!
//! ## Example 1: Density and Sampling
//!
//! ```rust
//! use nig_conjugate::distributions::NormalInverseGamma;
//! use nig_conjugate::sampler::NigSampler;
//!
//! let prior = NormalInverseGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
//! println!("p(x=0, sigma2=1) = {}", prior.pdf(0.0, 1.0));
//!
//! // 1000 draws, shape [1000, 2]: column 0 is x, column 1 is sigma2.
//! let mut sampler = NigSampler::new(prior).unwrap().set_seed(42);
//! let draws = sampler.sample(1000);
//! println!("Sample shape: {:?}", draws.shape());
//!
//! // Each draw stands for a normal distribution.
//! let normal = sampler.draw().as_normal().unwrap();
//! println!("{normal:?}");
//! ```
//!
//! ## Example 2: Monte-Carlo Credible Intervals
//!
//! ```rust
//! use nig_conjugate::distributions::NormalInverseGamma;
//! use nig_conjugate::interval::{analytic_intervals, IntervalEstimator};
//!
//! let prior = NormalInverseGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
//!
//! // 95% intervals from 100k draws in 4 parallel blocks.
//! let mc = IntervalEstimator::new(prior)
//!     .n_draws(100_000)
//!     .n_chunks(4)
//!     .seed(42)
//!     .estimate()
//!     .unwrap();
//! let exact = analytic_intervals(&prior, 0.95).unwrap();
//! println!("{mc}\n{exact}");
//! ```
//!
//! ## Example 3: Posterior Update
//!
//! ```rust
//! use nig_conjugate::distributions::NormalInverseGamma;
//!
//! let prior = NormalInverseGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
//! let post = prior.posterior(&[1.0, 2.0, 3.0, 4.0]).unwrap();
//! println!("{post}"); // NIG(mu=2.4667, nu=4.0540, alpha=3.1200, beta=3.0665)
//! ```
//!
//! For complete programs (including plotting), see the `demos/` directory.
//!
//! ## Features
//! - **Parallel Sampling** in independently seeded blocks for reproducible large samples
//! - **Progress Indicators** for long Monte-Carlo runs
//! - **Exact Marginals** (Student-t mean, inverse-gamma variance) and posterior predictive
//! - **Sequential Updates** through mergeable sufficient statistics
//! - **Optional I/O** (CSV)

pub mod distributions;
pub mod errors;
pub mod interval;
pub mod io;
pub mod posterior;
pub mod sampler;
