//! Simulates observations from a known normal distribution and feeds them to a NIG prior in
//! batches, printing how the posterior and its credible intervals tighten around the truth.

use nig_conjugate::distributions::NormalInverseGamma;
use nig_conjugate::interval::analytic_intervals;
use nig_conjugate::posterior::SufficientStats;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    const TRUE_MEAN: f64 = 2.0;
    const TRUE_SD: f64 = 0.8;
    const BATCH: usize = 25;
    const N_BATCHES: usize = 8;

    let normal = Normal::new(TRUE_MEAN, TRUE_SD)?;
    let mut rng = SmallRng::seed_from_u64(7);

    let prior = NormalInverseGamma::new(0.0, 0.054, 1.12, 0.4)?;
    let mut post = prior;
    let mut all = SufficientStats::new();

    println!("Truth: mean={TRUE_MEAN}, variance={:.2}", TRUE_SD * TRUE_SD);
    println!("Prior: {prior}");
    for b in 1..=N_BATCHES {
        let batch: Vec<f64> = (0..BATCH).map(|_| normal.sample(&mut rng)).collect();
        let stats = SufficientStats::from_data(&batch)?;
        post = post.update_with(&stats)?;
        all = all.merge(&stats);

        let ci = analytic_intervals(&post, 0.95)?;
        println!(
            "n={:4} {post} mean in {} variance in {}",
            b * BATCH,
            ci.mean,
            ci.variance
        );
    }

    let batch_post = prior.update_with(&all)?;
    println!("\nSequential: {post}\nBatch:      {batch_post}");
    println!("Predictive: {:?}", post.predictive()?);
    Ok(())
}
