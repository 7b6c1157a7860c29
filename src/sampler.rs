/*!
# Sampling from a Normal-Inverse-Gamma distribution.

Draws are generated by composition:

1. `sigma2 ~ InverseGamma(alpha, beta)`, sampled as `1 / Gamma(shape = alpha, scale = 1 / beta)`,
2. `x | sigma2 ~ Normal(mu, sigma2 / nu)`, sampled as `mu + sqrt(sigma2 / nu) * z` with `z ~ N(0, 1)`.

Draws are independent, so besides the sequential [`NigSampler::sample`] the module offers
[`NigSampler::sample_par`], which splits the draws into blocks and runs them in parallel (using
Rayon). Every block owns a [`SmallRng`] seeded with `seed + block_index`, so the output only
depends on the seed and the number of blocks, not on thread scheduling.

Sampled batches are [`ndarray::Array2<f64>`] of shape `[size, 2]`: column [`X_COL`] holds the
means and column [`SIGMA2_COL`] the variances.

# Example

```rust
use nig_conjugate::distributions::NormalInverseGamma;
use nig_conjugate::sampler::NigSampler;

let prior = NormalInverseGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
let mut sampler = NigSampler::new(prior).unwrap().set_seed(42);

let draws = sampler.sample(1_000);
assert_eq!(draws.shape(), &[1_000, 2]);
assert!(draws.column(1).iter().all(|&s| s > 0.0));
```
*/

use crate::distributions::{NigSample, NormalInverseGamma};
use crate::errors::{NigError, NigResult};
use ndarray::{concatenate, Array2, ArrayView2, Axis};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Gamma, StandardNormal};
use rayon::prelude::*;

/// Column index of the means in a batch of draws.
pub const X_COL: usize = 0;
/// Column index of the variances in a batch of draws.
pub const SIGMA2_COL: usize = 1;

/// A seeded sampler for a [`NormalInverseGamma`] distribution.
#[derive(Debug, Clone)]
pub struct NigSampler {
    target: NormalInverseGamma,
    seed: u64,
    rng: SmallRng,
    precision: Gamma<f64>,
}

impl NigSampler {
    /// Creates a sampler seeded from the thread-local RNG.
    pub fn new(target: NormalInverseGamma) -> NigResult<Self> {
        let seed = rand::rng().random::<u64>();
        let precision = Gamma::new(target.alpha(), 1.0 / target.beta())
            .map_err(|e| NigError::Distribution(e.to_string()))?;
        Ok(Self {
            target,
            seed,
            rng: SmallRng::seed_from_u64(seed),
            precision,
        })
    }

    /// Sets a new seed and resets the random number generator.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// The distribution being sampled.
    pub fn target(&self) -> &NormalInverseGamma {
        &self.target
    }

    /// The seed the sampler was last (re)seeded with; block `i` of
    /// [`NigSampler::sample_par`] uses `seed + i`.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a single `(x, sigma2)` pair.
    pub fn draw(&mut self) -> NigSample {
        draw_with(&self.target, &self.precision, &mut self.rng)
    }

    /// Draws `size` independent pairs into a `[size, 2]` array.
    pub fn sample(&mut self, size: usize) -> Array2<f64> {
        let mut out = Array2::<f64>::zeros((size, 2));
        for mut row in out.rows_mut() {
            let s = self.draw();
            row[X_COL] = s.x;
            row[SIGMA2_COL] = s.sigma2;
        }
        out
    }

    /// Draws `size` pairs in `n_chunks` parallel blocks.
    ///
    /// Block `i` uses its own generator seeded with `seed + i`. The sampler's own
    /// generator is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`NigError::InvalidChunks`] if `n_chunks == 0`.
    pub fn sample_par(&self, size: usize, n_chunks: usize) -> NigResult<Array2<f64>> {
        self.sample_blocks(size, n_chunks, |_| {})
    }

    /// Same as [`NigSampler::sample_par`], calling `on_block(len)` after each finished block.
    pub(crate) fn sample_blocks<F>(
        &self,
        size: usize,
        n_chunks: usize,
        on_block: F,
    ) -> NigResult<Array2<f64>>
    where
        F: Fn(usize) + Sync,
    {
        if n_chunks == 0 {
            return Err(NigError::InvalidChunks);
        }
        if size == 0 {
            return Ok(Array2::zeros((0, 2)));
        }

        let blocks: Vec<Array2<f64>> = chunk_sizes(size, n_chunks)
            .into_par_iter()
            .enumerate()
            .map(|(i, len)| {
                let mut block = NigSampler {
                    target: self.target,
                    seed: self.seed.wrapping_add(i as u64),
                    rng: SmallRng::seed_from_u64(self.seed.wrapping_add(i as u64)),
                    precision: self.precision,
                };
                let out = block.sample(len);
                on_block(len);
                out
            })
            .collect();
        let views: Vec<ArrayView2<f64>> = blocks.iter().map(|b| b.view()).collect();
        Ok(concatenate(Axis(0), &views)?)
    }
}

impl Iterator for NigSampler {
    type Item = NigSample;

    /// Never returns `None`; use [`Iterator::take`] to bound it.
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.draw())
    }
}

fn draw_with<R: Rng + ?Sized>(
    target: &NormalInverseGamma,
    precision: &Gamma<f64>,
    rng: &mut R,
) -> NigSample {
    let sigma2 = 1.0 / precision.sample(rng);
    let z: f64 = StandardNormal.sample(rng);
    NigSample {
        x: target.mu() + (sigma2 / target.nu()).sqrt() * z,
        sigma2,
    }
}

/// Splits `size` into `n_chunks` near-equal block lengths; the first `size % n_chunks`
/// blocks get one extra draw. Empty blocks are dropped.
fn chunk_sizes(size: usize, n_chunks: usize) -> Vec<usize> {
    let base = size / n_chunks;
    let extra = size % n_chunks;
    (0..n_chunks)
        .map(|i| base + usize::from(i < extra))
        .filter(|&len| len > 0)
        .collect()
}
