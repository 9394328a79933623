//! Clamps a raw [`AlgorithmConfig`] into one the model and sampler can use unchecked.
//!
//! Non-finite numbers fall back to the matching field of [`AlgorithmConfig::default`];
//! floors are applied after substitution and counts are rounded to the nearest integer
//! and capped at [`MAX_SAMPLES`] or [`MAX_DATA_POINTS`].
//! The result is idempotent: sanitizing a sanitized config changes nothing.

use log::debug;

use crate::core::{
    AlgorithmConfig, Params, MAX_DATA_POINTS, MAX_SAMPLES, MIN_PROPOSAL_WIDTH, MIN_SIGMA,
};

fn finite_or(value: f64, fallback: f64, field: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        debug!("{field} = {value} is not finite, using default {fallback}");
        fallback
    }
}

fn at_least(value: f64, min: f64, field: &str) -> f64 {
    if value < min {
        debug!("{field} = {value} is below {min}, clamping");
        min
    } else {
        value
    }
}

fn at_most(value: f64, max: f64, field: &str) -> f64 {
    if value > max {
        debug!("{field} = {value} is above {max}, clamping");
        max
    } else {
        value
    }
}

fn bounded_count(value: f64, fallback: f64, min: f64, max: f64, field: &str) -> f64 {
    at_most(
        at_least(finite_or(value, fallback, field).round(), min, field),
        max,
        field,
    )
}

fn sanitize_params(params: &Params, fallback: &Params, name: &str) -> Params {
    Params {
        slope: finite_or(params.slope, fallback.slope, name),
        intercept: finite_or(params.intercept, fallback.intercept, name),
        sigma: at_least(
            finite_or(params.sigma, fallback.sigma, name),
            MIN_SIGMA,
            name,
        ),
    }
}

fn sanitize_widths(widths: &Params, fallback: &Params) -> Params {
    let width = |value: f64, fallback: f64| {
        at_least(
            finite_or(value, fallback, "proposal_widths"),
            MIN_PROPOSAL_WIDTH,
            "proposal_widths",
        )
    };
    Params {
        slope: width(widths.slope, fallback.slope),
        intercept: width(widths.intercept, fallback.intercept),
        sigma: width(widths.sigma, fallback.sigma),
    }
}

/**
Returns a copy of `config` in which every number is finite and respects its minimum.

# Examples

```rust
use mh_explorer::core::{AlgorithmConfig, Params};
use mh_explorer::sanitize::sanitize;

let dirty = AlgorithmConfig {
    total_samples: 0.2,
    true_params: Params::new(f64::INFINITY, 1.0, -3.0),
    ..AlgorithmConfig::default()
};
let clean = sanitize(&dirty);
assert_eq!(clean.total_samples, 1.0);
assert_eq!(clean.true_params.slope, 2.5);
assert_eq!(clean.true_params.sigma, 0.01);
assert_eq!(sanitize(&clean), clean);
```
*/
pub fn sanitize(config: &AlgorithmConfig) -> AlgorithmConfig {
    let defaults = AlgorithmConfig::default();
    AlgorithmConfig {
        total_samples: bounded_count(
            config.total_samples,
            defaults.total_samples,
            1.0,
            MAX_SAMPLES,
            "total_samples",
        ),
        burn_in_samples: bounded_count(
            config.burn_in_samples,
            defaults.burn_in_samples,
            0.0,
            MAX_SAMPLES,
            "burn_in_samples",
        ),
        data_points: bounded_count(
            config.data_points,
            defaults.data_points,
            1.0,
            MAX_DATA_POINTS,
            "data_points",
        ),
        true_params: sanitize_params(&config.true_params, &defaults.true_params, "true_params"),
        prior_params: sanitize_params(&config.prior_params, &defaults.prior_params, "prior_params"),
        proposal_widths: sanitize_widths(&config.proposal_widths, &defaults.proposal_widths),
    }
}
