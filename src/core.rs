/*!
Plain data types shared by every stage of the engine: a point in parameter space
([`Params`]), one observation ([`DataPoint`]) and the user-tunable
[`AlgorithmConfig`].

A raw [`AlgorithmConfig`] may hold anything a user typed into a form, including
non-finite numbers and fractional counts. Pass it through
[`crate::sanitize::sanitize`] before handing it to the model or the sampler.

# Examples

```rust
use mh_explorer::core::{AlgorithmConfig, Params};

let config = AlgorithmConfig {
    total_samples: 200.0,
    true_params: Params::new(1.0, -2.0, 0.5),
    ..AlgorithmConfig::default()
};
assert_eq!(config.burn_in_samples, 0.0);
assert_eq!(config.prior_params, Params::new(0.0, 0.0, 5.0));
```
*/

use serde::{Deserialize, Serialize};

/// Lowest admissible value for any sigma-like field.
pub const MIN_SIGMA: f64 = 0.01;

/// Lowest admissible proposal standard deviation.
pub const MIN_PROPOSAL_WIDTH: f64 = 0.01;

/// Largest admissible `total_samples` and `burn_in_samples`.
pub const MAX_SAMPLES: f64 = 1e7;

/// Largest admissible synthetic data set.
pub const MAX_DATA_POINTS: f64 = 1e5;

/// Number of full Metropolis-Hastings steps performed by one `AutoStep` event.
pub const AUTO_BATCH_SIZE: usize = 5;

/// Fixed prior standard deviations for slope, intercept and sigma.
pub const PRIOR_STD_DEVS: Params = Params {
    slope: 10.0,
    intercept: 20.0,
    sigma: 10.0,
};

/// One point in the (slope, intercept, sigma) parameter space.
///
/// `sigma <= 0` is representable but has zero posterior support.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub slope: f64,
    pub intercept: f64,
    pub sigma: f64,
}

impl Params {
    pub const fn new(slope: f64, intercept: f64, sigma: f64) -> Self {
        Self {
            slope,
            intercept,
            sigma,
        }
    }

    /// Returns `[slope, intercept, sigma]`.
    pub fn to_array(&self) -> [f64; 3] {
        [self.slope, self.intercept, self.sigma]
    }

    /// Regression line evaluated at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl From<[f64; 3]> for Params {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// A single observed `(x, y)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

/**
User-tunable settings for one chain.

Count fields are `f64` because they arrive unvalidated; after sanitizing they hold
non-negative integers and the `*_target` accessors give their `usize` value.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    /// Number of post-burn-in samples to collect (at least 1).
    pub total_samples: f64,
    /// Number of leading samples tagged as burn-in (at least 0).
    pub burn_in_samples: f64,
    /// Size of the synthetic data set (at least 1).
    pub data_points: f64,
    /// Parameters used to generate the synthetic data.
    pub true_params: Params,
    /// Prior means; also the starting point of the chain.
    pub prior_params: Params,
    /// Per-dimension standard deviation of the random-walk proposal.
    pub proposal_widths: Params,
}

impl AlgorithmConfig {
    /// Post-burn-in target as a count.
    pub fn total_target(&self) -> usize {
        self.total_samples as usize
    }

    /// Burn-in target as a count.
    pub fn burn_in_target(&self) -> usize {
        self.burn_in_samples as usize
    }

    pub fn data_point_count(&self) -> usize {
        self.data_points as usize
    }
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            total_samples: 1000.0,
            burn_in_samples: 0.0,
            data_points: 50.0,
            true_params: Params::new(2.5, 5.0, 3.0),
            prior_params: Params::new(0.0, 0.0, 5.0),
            proposal_widths: Params::new(0.3, 1.0, 0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: AlgorithmConfig =
            serde_json::from_str(r#"{"total_samples": 12, "true_params": {"slope": 1.0, "intercept": 2.0, "sigma": 0.5}}"#)
                .unwrap();
        assert_eq!(config.total_target(), 12);
        assert_eq!(config.true_params, Params::new(1.0, 2.0, 0.5));
        assert_eq!(config.proposal_widths, AlgorithmConfig::default().proposal_widths);
    }

    #[test]
    fn params_predict_and_array() {
        let p = Params::from([2.0, 1.0, 0.3]);
        assert_eq!(p.predict(3.0), 7.0);
        assert_eq!(p.to_array(), [2.0, 1.0, 0.3]);
    }
}
