//! Runs one chain of the regression explorer to completion and prints the posterior summary.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::path::PathBuf;

use mh_explorer::core::AlgorithmConfig;
use mh_explorer::io::json::load_config;
use mh_explorer::sampler::Sampler;
use mh_explorer::stats::PosteriorSummary;

#[derive(Parser)]
#[command(name = "mh-demo")]
#[command(about = "Metropolis-Hastings for Bayesian linear regression")]
struct Cli {
    /// JSON configuration; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,

    /// Write the chain history as CSV
    #[cfg(feature = "csv")]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AlgorithmConfig {
            total_samples: 5000.0,
            burn_in_samples: 1000.0,
            ..AlgorithmConfig::default()
        },
    };

    let mut sampler = Sampler::new(&config).set_seed(cli.seed);
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    let calls = sampler.run_auto_with_progress(&pb);
    pb.finish_with_message("Done!");

    let state = sampler.state();
    let truth = state.config.true_params;
    println!(
        "{} data points, {} burn-in + {} samples in {} batches",
        state.data.len(),
        state.burn_in_samples.len(),
        state.accepted_samples.len(),
        calls
    );
    println!("{}", state.status_message);

    match PosteriorSummary::from_samples(&state.accepted_samples) {
        Some(summary) => {
            let rows = [
                ("slope", summary.mean.slope, summary.variance.slope, summary.ci95.slope, truth.slope),
                (
                    "intercept",
                    summary.mean.intercept,
                    summary.variance.intercept,
                    summary.ci95.intercept,
                    truth.intercept,
                ),
                ("sigma", summary.mean.sigma, summary.variance.sigma, summary.ci95.sigma, truth.sigma),
            ];
            println!("{:>10} {:>9} {:>9} {:>21} {:>7}", "", "mean", "sd", "95% CI", "true");
            for (name, mean, var, (lo, hi), true_value) in rows {
                println!(
                    "{:>10} {:>9.3} {:>9.3}   [{:>8.3}, {:>8.3}] {:>7.3}",
                    name,
                    mean,
                    var.sqrt(),
                    lo,
                    hi,
                    true_value
                );
            }
            println!(
                "slope/intercept correlation: {:.3}",
                summary.slope_intercept_correlation()
            );
        }
        None => println!("Not enough samples for a summary."),
    }

    #[cfg(feature = "csv")]
    if let Some(path) = &cli.output {
        mh_explorer::io::csv::save_csv(state, path)?;
        println!("Saved chain to {}", path.display());
    }

    Ok(())
}
