/*!
# Metropolis–Hastings Transition

A symmetric random-walk proposal and the acceptance rule for a single
Metropolis–Hastings step over [`Params`].

Because the proposal is a per-dimension normal centered at the current point, the
Hastings correction cancels and the log acceptance ratio is the plain difference of
log-posteriors. The degenerate cases where that difference is undefined
(`-inf - -inf`) are resolved by fixed rules in [`log_acceptance_ratio`], so neither
the ratio nor the acceptance probability can ever be NaN.

## Example Usage

```rust
use mh_explorer::core::{DataPoint, Params};
use mh_explorer::distributions::LinearRegression;
use mh_explorer::metropolis_hastings::step;
use rand::{rngs::SmallRng, SeedableRng};

let data = vec![DataPoint { x: 1.0, y: 2.0 }, DataPoint { x: 3.0, y: 6.2 }];
let prior_means = Params::new(0.0, 0.0, 5.0);
let target = LinearRegression::new(&data, &prior_means);
let widths = Params::new(0.3, 1.0, 0.5);

let mut rng = SmallRng::seed_from_u64(42);
let result = step(&Params::new(0.0, 0.0, 5.0), &target, &widths, &mut rng);
assert!((0.0..=1.0).contains(&result.acceptance_probability));
```
*/

use rand::Rng;

use crate::core::Params;
use crate::distributions::TargetDistribution;
use crate::random::normal;

/// Everything produced by one proposed transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// The candidate point.
    pub proposed: Params,
    pub log_posterior_current: f64,
    pub log_posterior_proposed: f64,
    /// `log_posterior_proposed - log_posterior_current`, with degenerate cases resolved.
    pub log_ratio: f64,
    pub acceptance_probability: f64,
    pub accepted: bool,
    /// The `Uniform[0, 1)` draw compared against `acceptance_probability`.
    pub random_draw: f64,
    /// The chain position after the step: `proposed` if accepted, else the current point.
    pub new_params: Params,
}

impl StepResult {
    /// Evaluates a proposal without resolving it.
    ///
    /// `accepted` is `false`, `random_draw` is `0.0` and `new_params` is `current`
    /// until [`StepResult::resolve`] is called.
    pub fn evaluate<D>(current: &Params, proposed: Params, target: &D) -> Self
    where
        D: TargetDistribution<Params>,
    {
        let lp_current = target.unnorm_log_prob(current);
        let lp_proposed = target.unnorm_log_prob(&proposed);
        Self {
            proposed,
            log_posterior_current: lp_current,
            log_posterior_proposed: lp_proposed,
            log_ratio: log_acceptance_ratio(lp_current, lp_proposed),
            acceptance_probability: acceptance_probability(lp_current, lp_proposed),
            accepted: false,
            random_draw: 0.0,
            new_params: *current,
        }
    }

    /// Accepts iff `u < acceptance_probability`.
    pub fn resolve(self, current: &Params, u: f64) -> Self {
        let accepted = u < self.acceptance_probability;
        Self {
            accepted,
            random_draw: u,
            new_params: if accepted { self.proposed } else { *current },
            ..self
        }
    }
}

/// Perturbs each dimension of `current` with independent normal noise of the given width.
///
/// A width of zero leaves that dimension unchanged.
pub fn propose<R: Rng + ?Sized>(current: &Params, widths: &Params, rng: &mut R) -> Params {
    Params {
        slope: normal(rng, current.slope, widths.slope),
        intercept: normal(rng, current.intercept, widths.intercept),
        sigma: normal(rng, current.sigma, widths.sigma),
    }
}

/**
Log of the Metropolis acceptance ratio, `proposed - current`.

When the difference is undefined:
- both `-inf` gives `-inf` (two impossible points never trade places),
- equal values give `0`,
- otherwise `+inf` if `proposed` is larger, `-inf` if `current` is.
*/
pub fn log_acceptance_ratio(log_posterior_current: f64, log_posterior_proposed: f64) -> f64 {
    let log_ratio = log_posterior_proposed - log_posterior_current;
    if !log_ratio.is_nan() {
        return log_ratio;
    }
    if log_posterior_current == f64::NEG_INFINITY && log_posterior_proposed == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if log_posterior_current == log_posterior_proposed {
        return 0.0;
    }
    if log_posterior_proposed > log_posterior_current {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    }
}

/// `min(1, exp(log_ratio))`, with `-inf` and any non-finite exponential mapped to 0.
pub fn acceptance_probability(log_posterior_current: f64, log_posterior_proposed: f64) -> f64 {
    let log_ratio = log_acceptance_ratio(log_posterior_current, log_posterior_proposed);
    if log_ratio >= 0.0 {
        return 1.0;
    }
    if log_ratio == f64::NEG_INFINITY {
        return 0.0;
    }
    let alpha = log_ratio.exp();
    if alpha.is_finite() {
        alpha.min(1.0)
    } else {
        0.0
    }
}

/// One complete Metropolis–Hastings transition: propose, evaluate, draw, resolve.
pub fn step<D, R>(current: &Params, target: &D, widths: &Params, rng: &mut R) -> StepResult
where
    D: TargetDistribution<Params>,
    R: Rng + ?Sized,
{
    let proposed = propose(current, widths, rng);
    let pending = StepResult::evaluate(current, proposed, target);
    let u = rng.gen::<f64>();
    pending.resolve(current, u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataPoint;
    use crate::distributions::LinearRegression;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const NEG_INF: f64 = f64::NEG_INFINITY;

    proptest! {
        #[test]
        fn equal_finite_log_posteriors_give_zero_ratio(a in -1e12f64..1e12f64) {
            prop_assert_eq!(log_acceptance_ratio(a, a), 0.0);
            prop_assert_eq!(acceptance_probability(a, a), 1.0);
        }

        #[test]
        fn probability_is_a_probability(a in -1e6f64..1e6f64, b in -1e6f64..1e6f64) {
            let p = acceptance_probability(a, b);
            prop_assert!((0.0..=1.0).contains(&p));
            prop_assert!(!log_acceptance_ratio(a, b).is_nan());
        }
    }

    #[test]
    fn impossible_vs_impossible_is_rejected() {
        let ratio = log_acceptance_ratio(NEG_INF, NEG_INF);
        assert_eq!(ratio, NEG_INF);
        assert!(!ratio.is_nan());
        assert_eq!(acceptance_probability(NEG_INF, NEG_INF), 0.0);
    }

    #[test]
    fn infinite_one_sided_cases() {
        assert_eq!(acceptance_probability(NEG_INF, 0.0), 1.0);
        assert_eq!(acceptance_probability(0.0, NEG_INF), 0.0);
        assert_eq!(log_acceptance_ratio(f64::INFINITY, f64::INFINITY), 0.0);
    }

    #[test]
    fn downhill_probability_is_exp_ratio() {
        let p = acceptance_probability(-10.0, -12.0);
        assert!((p - (-2.0f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn zero_widths_propose_current_point() {
        let mut rng = SmallRng::seed_from_u64(5);
        let current = Params::new(1.5, -0.25, 2.0);
        let zero = Params::new(0.0, 0.0, 0.0);
        assert_eq!(propose(&current, &zero, &mut rng), current);
    }

    #[test]
    fn rejected_step_keeps_current() {
        let data = [DataPoint { x: 1.0, y: 1.0 }];
        let means = Params::new(0.0, 0.0, 5.0);
        let target = LinearRegression::new(&data, &means);
        let mut rng = SmallRng::seed_from_u64(9);
        // sigma = 0 everywhere, both sides impossible
        let current = Params::new(0.0, 0.0, 0.0);
        let result = step(&current, &target, &Params::new(0.0, 0.0, 0.0), &mut rng);
        assert!(!result.accepted);
        assert_eq!(result.acceptance_probability, 0.0);
        assert_eq!(result.log_ratio, NEG_INF);
        assert_eq!(result.new_params, current);
        assert!((0.0..1.0).contains(&result.random_draw));
    }

    #[test]
    fn escape_from_impossible_start_is_always_accepted() {
        let data = [DataPoint { x: 1.0, y: 1.0 }];
        let means = Params::new(0.0, 0.0, 5.0);
        let target = LinearRegression::new(&data, &means);
        let current = Params::new(0.0, 0.0, 0.0);
        let proposed = Params::new(0.0, 1.0, 1.0);
        let result = StepResult::evaluate(&current, proposed, &target).resolve(&current, 0.999);
        assert_eq!(result.log_ratio, f64::INFINITY);
        assert!(result.accepted);
        assert_eq!(result.new_params, proposed);
    }
}
