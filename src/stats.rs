//! Posterior summaries computed from the collected (post-burn-in) samples.

use ndarray::prelude::*;
use ndarray_stats::CorrelationExt;

use crate::core::Params;
use crate::state::SampleRecord;

/// A central interval for each parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CredibleIntervals {
    pub slope: (f64, f64),
    pub intercept: (f64, f64),
    pub sigma: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorSummary {
    pub n: usize,
    pub mean: Params,
    /// Unbiased (divisor `n - 1`) variance per parameter.
    pub variance: Params,
    /// 2.5th to 97.5th percentile.
    pub ci95: CredibleIntervals,
    /// 3×3 sample covariance, ordered slope, intercept, sigma.
    pub covariance: Array2<f64>,
}

impl PosteriorSummary {
    /**
    Summarizes `samples`, or returns `None` when fewer than two are available.

    # Examples

    ```rust
    use mh_explorer::core::Params;
    use mh_explorer::state::SampleRecord;
    use mh_explorer::stats::PosteriorSummary;

    let samples: Vec<SampleRecord> = [1.0, 2.0, 3.0]
        .iter()
        .map(|&v| SampleRecord { params: Params::new(v, 2.0 * v, 1.0), is_burn_in: false })
        .collect();
    let summary = PosteriorSummary::from_samples(&samples).unwrap();
    assert_eq!(summary.mean, Params::new(2.0, 4.0, 1.0));
    assert!((summary.variance.slope - 1.0).abs() < 1e-12);
    assert!(PosteriorSummary::from_samples(&samples[..1]).is_none());
    ```
    */
    pub fn from_samples(samples: &[SampleRecord]) -> Option<Self> {
        let n = samples.len();
        if n < 2 {
            return None;
        }
        let draws = Array2::from_shape_fn((n, 3), |(i, j)| samples[i].params.to_array()[j]);

        let mean = draws.mean_axis(Axis(0))?;
        let variance = draws.var_axis(Axis(0), 1.0);
        let covariance = draws.t().cov(1.0).ok()?;

        let interval = |j: usize| {
            let mut column = draws.column(j).to_vec();
            column.sort_unstable_by(f64::total_cmp);
            (percentile(&column, 2.5), percentile(&column, 97.5))
        };

        Some(Self {
            n,
            mean: Params::new(mean[0], mean[1], mean[2]),
            variance: Params::new(variance[0], variance[1], variance[2]),
            ci95: CredibleIntervals {
                slope: interval(0),
                intercept: interval(1),
                sigma: interval(2),
            },
            covariance,
        })
    }

    /// Posterior correlation between slope and intercept.
    pub fn slope_intercept_correlation(&self) -> f64 {
        let c = &self.covariance;
        c[(0, 1)] / (c[(0, 0)] * c[(1, 1)]).sqrt()
    }
}

/// Linearly interpolated percentile `p` (0 to 100) of already sorted values.
///
/// NaN for an empty slice; `p` outside `[0, 100]` is clamped to the nearest end.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let idx = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (idx - lo as f64) * (sorted[hi] - sorted[lo])
}
