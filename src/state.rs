/*!
# Sampling Controller

The interactive chain is a pure state machine: [`reduce`] takes the current
[`AlgorithmState`], an [`Event`] and a random generator, and returns the next state.
Nothing is mutated behind the caller's back; an event that is not valid in the current
[`Phase`] returns the input state unchanged.

```text
           NextStep               Accept
  Idle ─────────────▶ ProposalShown ─────▶ ResultShown ──┐
   │                                          ▲  │       │ NextStep
   │ StartAuto                      StopAuto  │  ▼       │
   └──────────────▶ AutoRunning ──────────────┘  ProposalShown
                      │ AutoStep (×5 steps)
                      ▼
                   Completed  (burn-in + samples reached target)
```

# Examples

```rust
use mh_explorer::core::AlgorithmConfig;
use mh_explorer::state::{create_initial_state, reduce, Event, Phase};
use rand::{rngs::SmallRng, SeedableRng};

let mut rng = SmallRng::seed_from_u64(42);
let config = AlgorithmConfig { total_samples: 1.0, data_points: 1.0, ..AlgorithmConfig::default() };

let state = create_initial_state(&config, &mut rng);
let state = reduce(state, Event::NextStep, &mut rng);
assert_eq!(state.phase, Phase::ProposalShown);

let state = reduce(state, Event::Accept, &mut rng);
assert_eq!(state.phase, Phase::Completed);
assert_eq!(state.accepted_samples.len(), 1);
```
*/

use log::{debug, info};
use rand::Rng;

use crate::core::{AlgorithmConfig, DataPoint, Params, AUTO_BATCH_SIZE};
use crate::data::generate_data;
use crate::distributions::LinearRegression;
use crate::metropolis_hastings::{propose, step, StepResult};
use crate::sanitize::sanitize;

/// Where the interactive chain currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Ready for the first step.
    Idle,
    /// A proposal has been evaluated and awaits `Accept`.
    ProposalShown,
    /// The last proposal was resolved.
    ResultShown,
    /// Stepping in batches without confirmation.
    AutoRunning,
    /// The target number of samples has been collected.
    Completed,
}

/// Tone of the status message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Info,
    Success,
    Error,
    Warning,
}

/// One entry in the chain history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRecord {
    pub params: Params,
    pub is_burn_in: bool,
}

/// Inputs to [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Start over from a (raw) configuration.
    Reset(AlgorithmConfig),
    /// Propose and evaluate the next move.
    NextStep,
    /// Draw the uniform variate and resolve the pending proposal.
    Accept,
    StartAuto,
    StopAuto,
    /// Run one batch of full steps; sent repeatedly by an external scheduler.
    AutoStep,
}

/// The complete state of one interactive chain.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmState {
    pub phase: Phase,
    /// Always sanitized.
    pub config: AlgorithmConfig,
    pub data: Vec<DataPoint>,
    pub current_params: Params,
    pub proposed_params: Option<Params>,
    pub step_result: Option<StepResult>,
    pub burn_in_samples: Vec<SampleRecord>,
    pub accepted_samples: Vec<SampleRecord>,
    /// Post-burn-in steps taken.
    pub total_steps: usize,
    /// Post-burn-in steps that moved the chain.
    pub accepted_count: usize,
    pub status_message: String,
    pub status_kind: StatusKind,
}

impl AlgorithmState {
    pub fn total_collected(&self) -> usize {
        self.burn_in_samples.len() + self.accepted_samples.len()
    }

    pub fn target_total(&self) -> usize {
        self.config
            .burn_in_target()
            .saturating_add(self.config.total_target())
    }

    /// True while the next recorded sample would still be tagged as burn-in.
    pub fn in_burn_in(&self) -> bool {
        self.burn_in_samples.len() < self.config.burn_in_target()
    }

    pub fn is_complete(&self) -> bool {
        self.total_collected() >= self.target_total()
    }

    /// Fraction of post-burn-in steps that were accepted, 0 before any step.
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            self.accepted_count as f64 / self.total_steps as f64
        }
    }

    /// Collected over target, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let target = self.target_total();
        if target == 0 {
            return 0.0;
        }
        (self.total_collected() as f64 / target as f64).min(1.0)
    }

    fn with_status(self, phase: Phase, message: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            phase,
            status_message: message.into(),
            status_kind: kind,
            ..self
        }
    }

    fn completed(self) -> Self {
        info!("chain complete after {} samples", self.total_collected());
        self.with_status(Phase::Completed, "Sampling complete!", StatusKind::Success)
    }

    /// Appends a record for `params`, tagged by the current burn-in quota.
    fn record(&mut self, params: Params) -> bool {
        let is_burn_in = self.in_burn_in();
        let record = SampleRecord { params, is_burn_in };
        if is_burn_in {
            self.burn_in_samples.push(record);
        } else {
            self.accepted_samples.push(record);
        }
        is_burn_in
    }
}

// An idle chain over the default config with no data set.
impl Default for AlgorithmState {
    fn default() -> Self {
        let config = AlgorithmConfig::default();
        Self {
            phase: Phase::Idle,
            current_params: config.prior_params,
            config,
            data: Vec::new(),
            proposed_params: None,
            step_result: None,
            burn_in_samples: Vec::new(),
            accepted_samples: Vec::new(),
            total_steps: 0,
            accepted_count: 0,
            status_message: String::new(),
            status_kind: StatusKind::Info,
        }
    }
}

/// Sanitizes `config`, generates its data set and places the chain at the prior means.
pub fn create_initial_state<R: Rng + ?Sized>(config: &AlgorithmConfig, rng: &mut R) -> AlgorithmState {
    let config = sanitize(config);
    let data = generate_data(&config.true_params, config.data_point_count(), rng);
    AlgorithmState {
        phase: Phase::Idle,
        current_params: config.prior_params,
        config,
        data,
        proposed_params: None,
        step_result: None,
        burn_in_samples: Vec::new(),
        accepted_samples: Vec::new(),
        total_steps: 0,
        accepted_count: 0,
        status_message: "Click \"Next Step\" to begin exploring the posterior.".to_string(),
        status_kind: StatusKind::Info,
    }
}

/// Applies `event` to `state`. Events that are not valid in the current phase are ignored.
pub fn reduce<R: Rng + ?Sized>(state: AlgorithmState, event: Event, rng: &mut R) -> AlgorithmState {
    debug!("{:?} in {:?}", event, state.phase);
    match event {
        Event::Reset(config) => create_initial_state(&config, rng),
        Event::NextStep => next_step(state, rng),
        Event::Accept => accept(state, rng),
        Event::StartAuto => start_auto(state),
        Event::StopAuto => {
            let message = format!("Paused after {} samples.", state.total_collected());
            state.with_status(Phase::ResultShown, message, StatusKind::Info)
        }
        Event::AutoStep => auto_step(state, rng),
    }
}

fn proposal_message(result: &StepResult) -> (String, StatusKind) {
    if result.proposed.sigma <= 0.0 {
        let message = format!(
            "Proposed sigma = {:.3} <= 0. Will be auto-rejected.",
            result.proposed.sigma
        );
        (message, StatusKind::Warning)
    } else if result.acceptance_probability >= 1.0 {
        let message = format!(
            "Acceptance probability = 100%. Posterior improved by {:.2}x.",
            result.log_ratio.exp()
        );
        (message, StatusKind::Info)
    } else {
        let message = format!(
            "Acceptance probability = {:.1}%. Log ratio = {:.3}.",
            result.acceptance_probability * 100.0,
            result.log_ratio
        );
        (message, StatusKind::Info)
    }
}

fn next_step<R: Rng + ?Sized>(state: AlgorithmState, rng: &mut R) -> AlgorithmState {
    if !matches!(state.phase, Phase::Idle | Phase::ResultShown) {
        debug!("ignoring NextStep in {:?}", state.phase);
        return state;
    }
    if state.is_complete() {
        return state.completed();
    }

    let proposed = propose(&state.current_params, &state.config.proposal_widths, rng);
    let target = LinearRegression::new(&state.data, &state.config.prior_params);
    let result = StepResult::evaluate(&state.current_params, proposed, &target);
    let (message, kind) = proposal_message(&result);

    AlgorithmState {
        proposed_params: Some(proposed),
        step_result: Some(result),
        ..state.with_status(Phase::ProposalShown, message, kind)
    }
}

fn accept<R: Rng + ?Sized>(mut state: AlgorithmState, rng: &mut R) -> AlgorithmState {
    let pending = match (state.phase, state.step_result) {
        (Phase::ProposalShown, Some(pending)) => pending,
        _ => {
            debug!("ignoring Accept in {:?}", state.phase);
            return state;
        }
    };

    let u = rng.gen::<f64>();
    let result = pending.resolve(&state.current_params, u);
    let is_burn_in = state.record(result.new_params);
    if !is_burn_in {
        state.total_steps += 1;
        if result.accepted {
            state.accepted_count += 1;
        }
    }

    let alpha = result.acceptance_probability;
    let (message, kind) = if result.accepted {
        (format!("Accepted! (drew {u:.3} < {alpha:.3})"), StatusKind::Success)
    } else {
        (format!("Rejected. (drew {u:.3} >= {alpha:.3})"), StatusKind::Error)
    };

    state.current_params = result.new_params;
    state.proposed_params = None;
    state.step_result = Some(result);
    if state.is_complete() {
        info!("chain complete after {} samples", state.total_collected());
        state.with_status(
            Phase::Completed,
            format!("Sampling complete! {message}"),
            StatusKind::Success,
        )
    } else {
        state.with_status(Phase::ResultShown, message, kind)
    }
}

fn start_auto(state: AlgorithmState) -> AlgorithmState {
    if state.is_complete() {
        return state.completed();
    }
    AlgorithmState {
        proposed_params: None,
        step_result: None,
        ..state.with_status(Phase::AutoRunning, "Auto-running...", StatusKind::Info)
    }
}

fn auto_step<R: Rng + ?Sized>(mut state: AlgorithmState, rng: &mut R) -> AlgorithmState {
    if state.phase != Phase::AutoRunning {
        debug!("ignoring AutoStep in {:?}", state.phase);
        return state;
    }

    let target_total = state.target_total();
    for _ in 0..AUTO_BATCH_SIZE {
        if state.total_collected() >= target_total {
            break;
        }
        let target = LinearRegression::new(&state.data, &state.config.prior_params);
        let result = step(
            &state.current_params,
            &target,
            &state.config.proposal_widths,
            rng,
        );
        state.current_params = result.new_params;
        if !state.record(result.new_params) {
            state.total_steps += 1;
            if result.accepted {
                state.accepted_count += 1;
            }
        }
    }

    state.proposed_params = None;
    state.step_result = None;
    let rate = state.acceptance_rate() * 100.0;
    if state.is_complete() {
        info!("chain complete after {} samples", state.total_collected());
        let message = format!("Sampling complete! Acceptance rate: {rate:.1}%");
        state.with_status(Phase::Completed, message, StatusKind::Success)
    } else if state.in_burn_in() {
        let message = format!(
            "Auto-running... {}/{} burn-in steps",
            state.burn_in_samples.len(),
            state.config.burn_in_target()
        );
        state.with_status(Phase::AutoRunning, message, StatusKind::Info)
    } else {
        let message = format!(
            "Auto-running... {}/{} samples ({rate:.1}% accepted)",
            state.accepted_samples.len(),
            state.config.total_target()
        );
        state.with_status(Phase::AutoRunning, message, StatusKind::Info)
    }
}
