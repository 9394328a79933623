//! Synthetic regression data: `x ~ Uniform(0, 10)`, `y = slope * x + intercept + noise`.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::core::{DataPoint, Params};
use crate::random::normal;

/// Lower bound of the generated inputs.
pub const X_MIN: f64 = 0.0;
/// Upper bound (exclusive) of the generated inputs.
pub const X_MAX: f64 = 10.0;

/**
Generates `n` observations from the line described by `true_params`, adding
normal noise with standard deviation `true_params.sigma`.

# Examples

```rust
use mh_explorer::core::Params;
use mh_explorer::data::generate_data;
use rand::{rngs::SmallRng, SeedableRng};

let mut rng = SmallRng::seed_from_u64(1);
let data = generate_data(&Params::new(2.0, 1.0, 0.5), 20, &mut rng);
assert_eq!(data.len(), 20);
```
*/
pub fn generate_data<R: Rng + ?Sized>(true_params: &Params, n: usize, rng: &mut R) -> Vec<DataPoint> {
    let xs = Uniform::new(X_MIN, X_MAX);
    (0..n)
        .map(|_| {
            let x = xs.sample(rng);
            let y = true_params.predict(x) + normal(rng, 0.0, true_params.sigma);
            DataPoint { x, y }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn noiseless_points_lie_on_the_line() {
        let mut rng = SmallRng::seed_from_u64(3);
        let params = Params::new(-1.5, 4.0, 0.0);
        let data = generate_data(&params, 30, &mut rng);
        assert_eq!(data.len(), 30);
        for p in &data {
            assert!((X_MIN..X_MAX).contains(&p.x));
            assert_eq!(p.y, params.predict(p.x));
        }
    }

    #[test]
    fn same_seed_same_data() {
        let params = Params::new(2.5, 5.0, 3.0);
        let a = generate_data(&params, 10, &mut SmallRng::seed_from_u64(11));
        let b = generate_data(&params, 10, &mut SmallRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
