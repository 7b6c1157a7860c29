//! Walks through the normal-inverse-gamma toolkit: density, sampling, credible intervals,
//! posterior update, and a plot of the draws together with the normal curves they stand for.

use nig_conjugate::distributions::NormalInverseGamma;
use nig_conjugate::interval::{analytic_intervals, IntervalEstimator};
use nig_conjugate::sampler::{NigSampler, SIGMA2_COL, X_COL};

use plotly::{
    common::{Marker, Mode},
    layout::{Axis, GridPattern, LayoutGrid},
    Layout, Plot, Scatter,
};
use std::error::Error;

#[cfg(feature = "csv")]
use nig_conjugate::io::csv::save_csv;

fn main() -> Result<(), Box<dyn Error>> {
    const N_PLOT: usize = 2_000;
    const N_CURVES: usize = 8;
    const SEED: u64 = 42;

    let prior = NormalInverseGamma::new(0.0, 0.054, 1.12, 0.4)?;
    println!("Prior: {prior}");

    // Density on a few points
    for (x, sigma2) in [(0.0, 0.5), (0.0, 1.0), (1.0, 1.0), (0.0, -1.0)] {
        println!("p(x={x:5.2}, sigma2={sigma2:5.2}) = {:.6}", prior.pdf(x, sigma2));
    }

    // Credible intervals of the prior and of the posterior after four observations
    let data = [1.0, 2.0, 3.0, 4.0];
    let post = prior.posterior(&data)?;
    println!("\nPosterior after {data:?}: {post}");

    for (name, nig) in [("prior", prior), ("posterior", post)] {
        let mc = IntervalEstimator::new(nig).seed(SEED).estimate_progress()?;
        println!("\n[{name}] {mc}");
        println!("[{name}] {}", analytic_intervals(&nig, 0.95)?);
    }

    // Posterior draws: scatter of (x, sigma2) and normal curves for a handful of draws
    let mut sampler = NigSampler::new(post)?.set_seed(SEED);
    let draws = sampler.sample(N_PLOT);

    let scatter = Scatter::new(draws.column(X_COL).to_vec(), draws.column(SIGMA2_COL).to_vec())
        .mode(Mode::Markers)
        .name("Posterior draws")
        .marker(
            Marker::new()
                .size(4)
                .opacity(0.5)
                .color("rgb(70, 130, 180)"),
        );

    let mut plot = Plot::new();
    plot.add_trace(scatter);

    let grid: Vec<f64> = (0..=200).map(|i| -2.0 + 9.0 * i as f64 / 200.0).collect();
    for (i, draw) in sampler.by_ref().take(N_CURVES).enumerate() {
        let curve = Scatter::new(grid.clone(), draw.pdf_curve(&grid)?)
            .mode(Mode::Lines)
            .name(&format!("N({:.2}, {:.2}) #{i}", draw.x, draw.sigma2))
            .x_axis("x2")
            .y_axis("y2");
        plot.add_trace(curve);
    }

    let layout = Layout::new()
        .title("Normal-inverse-gamma posterior")
        .grid(
            LayoutGrid::new()
                .rows(1)
                .columns(2)
                .pattern(GridPattern::Independent),
        )
        .x_axis(Axis::new().title("x (mean)"))
        .y_axis(Axis::new().title("sigma2 (variance)"))
        .x_axis2(Axis::new().title("value"))
        .y_axis2(Axis::new().title("density"))
        .show_legend(true)
        .width(1200)
        .height(600);
    plot.set_layout(layout);
    plot.write_html("nig_samples.html");
    println!("\nSaved plot to nig_samples.html");

    #[cfg(feature = "csv")]
    {
        save_csv(&draws, "nig_samples.csv")?;
        println!("Saved draws in file nig_samples.csv.");
    }

    Ok(())
}
