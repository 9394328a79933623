/*!
A seeded driver that owns one interactive chain.

[`reduce`](crate::state::reduce) is pure and takes its randomness as an argument.
[`Sampler`] pairs an [`AlgorithmState`] with the generator that feeds it, so callers
(a UI event loop, an animation timer, a test) only send [`Event`]s.

# Examples

```rust
use mh_explorer::core::AlgorithmConfig;
use mh_explorer::sampler::Sampler;
use mh_explorer::state::Phase;

let config = AlgorithmConfig { total_samples: 50.0, burn_in_samples: 10.0, ..AlgorithmConfig::default() };
let mut sampler = Sampler::new(&config).set_seed(42);
let calls = sampler.run_auto();

assert_eq!(sampler.state().phase, Phase::Completed);
assert_eq!(sampler.state().accepted_samples.len(), 50);
assert_eq!(calls, 12);
```
*/

use indicatif::ProgressBar;
use rand::prelude::*;

use crate::core::AlgorithmConfig;
use crate::state::{create_initial_state, reduce, AlgorithmState, Event, Phase};

/// One chain plus its random number generator.
#[derive(Debug, Clone)]
pub struct Sampler {
    state: AlgorithmState,
    /// The seed the generator was created from.
    pub seed: u64,
    pub rng: SmallRng,
}

impl Sampler {
    /// Builds a chain for `config`, seeded from entropy.
    pub fn new(config: &AlgorithmConfig) -> Self {
        let seed = thread_rng().gen::<u64>();
        let mut rng = SmallRng::seed_from_u64(seed);
        let state = create_initial_state(config, &mut rng);
        Self { state, seed, rng }
    }

    /// Reseeds the generator and rebuilds the initial state, including the data set.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
        self.state = create_initial_state(&self.state.config, &mut self.rng);
        self
    }

    pub fn state(&self) -> &AlgorithmState {
        &self.state
    }

    pub fn into_state(self) -> AlgorithmState {
        self.state
    }

    /// Applies one event and returns the resulting state.
    pub fn dispatch(&mut self, event: Event) -> &AlgorithmState {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event, &mut self.rng);
        &self.state
    }

    /// Starts auto-run and sends `AutoStep` until the phase leaves `AutoRunning`.
    ///
    /// Returns the number of `AutoStep` events sent.
    pub fn run_auto(&mut self) -> usize {
        self.dispatch(Event::StartAuto);
        let mut calls = 0;
        while self.state.phase == Phase::AutoRunning {
            self.dispatch(Event::AutoStep);
            calls += 1;
        }
        calls
    }

    /// Like [`Sampler::run_auto`], reporting collected samples on `pb`.
    pub fn run_auto_with_progress(&mut self, pb: &ProgressBar) -> usize {
        pb.set_length(self.state.target_total() as u64);
        pb.set_position(self.state.total_collected() as u64);

        self.dispatch(Event::StartAuto);
        let mut calls = 0;
        while self.state.phase == Phase::AutoRunning {
            self.dispatch(Event::AutoStep);
            calls += 1;
            pb.set_position(self.state.total_collected() as u64);
            pb.set_message(self.state.status_message.clone());
        }
        calls
    }
}
