/*!
The probabilistic model for Bayesian linear regression: a normal likelihood around the
line `slope * x + intercept` and independent normal priors on each parameter.

Everything is evaluated in log-space. A parameter point with no support (non-positive
noise scale) evaluates to exactly `f64::NEG_INFINITY`, never to NaN.

# Examples

```rust
use mh_explorer::core::{DataPoint, Params};
use mh_explorer::distributions::{LinearRegression, TargetDistribution};

let data = vec![DataPoint { x: 1.0, y: 2.0 }, DataPoint { x: 2.0, y: 4.1 }];
let prior_means = Params::new(0.0, 0.0, 5.0);
let model = LinearRegression::new(&data, &prior_means);

let good = model.unnorm_log_prob(&Params::new(2.0, 0.0, 0.5));
let bad = model.unnorm_log_prob(&Params::new(2.0, 0.0, -1.0));
assert!(good.is_finite());
assert_eq!(bad, f64::NEG_INFINITY);
```
*/

use std::f64::consts::PI;

use crate::core::{DataPoint, Params, MIN_SIGMA, PRIOR_STD_DEVS};

/// A target density over parameter points, known up to a constant.
pub trait TargetDistribution<S> {
    /// Returns the log of the unnormalized density for state `theta`.
    fn unnorm_log_prob(&self, theta: &S) -> f64;
}

/// Log of the normal density `N(x | mean, std)`.
pub fn log_normal_pdf(x: f64, mean: f64, std: f64) -> f64 {
    let z = (x - mean) / std;
    -0.5 * ((2.0 * PI).ln() + 2.0 * std.ln() + z * z)
}

/// Sum of normal log-densities of every `y` around the regression line.
pub fn log_likelihood(params: &Params, data: &[DataPoint]) -> f64 {
    if params.sigma <= 0.0 {
        return f64::NEG_INFINITY;
    }
    data.iter()
        .map(|p| log_normal_pdf(p.y, params.predict(p.x), params.sigma))
        .sum()
}

/// Independent normal priors centered at `prior_means` with [`PRIOR_STD_DEVS`].
///
/// Sigma at or below [`MIN_SIGMA`] has no prior support.
pub fn log_prior(params: &Params, prior_means: &Params) -> f64 {
    if params.sigma <= MIN_SIGMA {
        return f64::NEG_INFINITY;
    }
    log_normal_pdf(params.slope, prior_means.slope, PRIOR_STD_DEVS.slope)
        + log_normal_pdf(
            params.intercept,
            prior_means.intercept,
            PRIOR_STD_DEVS.intercept,
        )
        + log_normal_pdf(params.sigma, prior_means.sigma, PRIOR_STD_DEVS.sigma)
}

/// `log_likelihood + log_prior`, skipping the likelihood where the prior vanishes.
pub fn log_posterior(params: &Params, data: &[DataPoint], prior_means: &Params) -> f64 {
    let lp = log_prior(params, prior_means);
    if lp == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    log_likelihood(params, data) + lp
}

/// The regression posterior for a fixed data set and prior.
#[derive(Debug, Clone, Copy)]
pub struct LinearRegression<'a> {
    pub data: &'a [DataPoint],
    pub prior_means: &'a Params,
}

impl<'a> LinearRegression<'a> {
    pub fn new(data: &'a [DataPoint], prior_means: &'a Params) -> Self {
        Self { data, prior_means }
    }
}

impl TargetDistribution<Params> for LinearRegression<'_> {
    fn unnorm_log_prob(&self, theta: &Params) -> f64 {
        log_posterior(theta, self.data, self.prior_means)
    }
}
