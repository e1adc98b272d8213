//! All Parameters Loop
//!
//! The full product: steps x cfg x shift ranges and sampler x scheduler
//! names, under any traversal mode. Steps varies slowest, scheduler fastest.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::catalog::NameCatalog;
use crate::node::descriptor::{InputSpec, NodeDescriptor, OutputKind, OutputSpec};
use crate::node::LoopNode;
use crate::sweep::{
    filter_names, CombinationSpace, Dim, FloatRange, IntRange, LoopState, Mode, SweepValue,
    DEFAULT_FLOAT_DECIMALS,
};

/// Inputs for [`AllParametersLoop`]; omitted fields take their declared defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllParametersLoopInputs {
    pub mode: String,
    pub steps_start: i64,
    pub steps_end: i64,
    pub steps_interval: i64,
    pub cfg_start: f64,
    pub cfg_end: f64,
    pub cfg_interval: f64,
    pub shift_start: f64,
    pub shift_end: f64,
    pub shift_interval: f64,
    pub seed: u64,
    pub reset: bool,
    pub skip_samplers: String,
    pub skip_schedulers: String,
}

impl Default for AllParametersLoopInputs {
    fn default() -> Self {
        Self {
            mode: "sequential".to_string(),
            steps_start: 20,
            steps_end: 50,
            steps_interval: 10,
            cfg_start: 1.0,
            cfg_end: 8.0,
            cfg_interval: 1.0,
            shift_start: 1.0,
            shift_end: 3.0,
            shift_interval: 0.5,
            seed: 0,
            reset: false,
            skip_samplers: String::new(),
            skip_schedulers: String::new(),
        }
    }
}

/// Named outputs of one [`AllParametersLoop`] invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllParametersLoopOutputs {
    pub steps: i64,
    pub cfg: f64,
    pub shift: f64,
    pub sampler: String,
    pub scheduler: String,
    pub current_index: usize,
    pub total_combinations: usize,
    pub current_combination: String,
}

/// Loop node over the full five-dimension product
#[derive(Debug, Clone)]
pub struct AllParametersLoop {
    catalog: Arc<NameCatalog>,
    state: LoopState,
    float_decimals: usize,
}

impl AllParametersLoop {
    pub fn new(catalog: Arc<NameCatalog>) -> Self {
        Self { catalog, state: LoopState::new(), float_decimals: DEFAULT_FLOAT_DECIMALS }
    }

    /// Set the decimals used for float values in combination labels
    pub fn with_float_decimals(mut self, decimals: usize) -> Self {
        self.float_decimals = decimals;
        self
    }

    /// Registration metadata for this variant
    pub fn describe() -> NodeDescriptor {
        NodeDescriptor::new("AllParametersLoop", "All Parameters Loop", "Samplers/Loop")
            .with_input(InputSpec::choice("mode", &Mode::WIRE_NAMES))
            .with_input(InputSpec::int("steps_start", 20, 1, 1000))
            .with_input(InputSpec::int("steps_end", 50, 1, 1000))
            .with_input(InputSpec::int("steps_interval", 10, 1, 100))
            .with_input(InputSpec::float("cfg_start", 1.0, 0.0, 30.0, 0.1))
            .with_input(InputSpec::float("cfg_end", 8.0, 0.0, 30.0, 0.1))
            .with_input(InputSpec::float("cfg_interval", 1.0, 0.1, 10.0, 0.1))
            .with_input(InputSpec::float("shift_start", 1.0, 0.0, 10.0, 0.1))
            .with_input(InputSpec::float("shift_end", 3.0, 0.0, 10.0, 0.1))
            .with_input(InputSpec::float("shift_interval", 0.5, 0.1, 5.0, 0.1))
            .with_input(InputSpec::seed("seed"))
            .with_input(InputSpec::flag("reset", false))
            .with_input(
                InputSpec::text(
                    "skip_samplers",
                    "Enter sampler names to skip, separated by commas:\ne.g., euler, dpm_2, lcm",
                )
                .optional(),
            )
            .with_input(
                InputSpec::text(
                    "skip_schedulers",
                    "Enter scheduler names to skip, separated by commas:\ne.g., karras, exponential",
                )
                .optional(),
            )
            .with_output(OutputSpec::new("steps", OutputKind::Int))
            .with_output(OutputSpec::new("cfg", OutputKind::Float))
            .with_output(OutputSpec::new("shift", OutputKind::Float))
            .with_output(OutputSpec::new("sampler", OutputKind::Sampler))
            .with_output(OutputSpec::new("scheduler", OutputKind::Scheduler))
            .with_output(OutputSpec::new("current_index", OutputKind::Int))
            .with_output(OutputSpec::new("total_combinations", OutputKind::Int))
            .with_output(OutputSpec::new("current_combination", OutputKind::Text))
    }

    /// Report the current combination across all five dimensions and advance
    pub fn invoke(&mut self, inputs: &AllParametersLoopInputs) -> Result<AllParametersLoopOutputs> {
        let mode: Mode = inputs.mode.parse()?;

        let steps = IntRange::new(inputs.steps_start, inputs.steps_end, inputs.steps_interval);
        let cfg = FloatRange::new(inputs.cfg_start, inputs.cfg_end, inputs.cfg_interval);
        let shift = FloatRange::new(inputs.shift_start, inputs.shift_end, inputs.shift_interval);
        let samplers = filter_names(self.catalog.samplers(), &inputs.skip_samplers);
        let schedulers = filter_names(self.catalog.schedulers(), &inputs.skip_schedulers);

        let space = CombinationSpace::new(vec![
            Dim::ints("steps", steps.values()),
            Dim::floats("cfg", cfg.values()),
            Dim::floats("shift", shift.values()),
            Dim::names("sampler", samplers),
            Dim::names("scheduler", schedulers),
        ])
        .with_float_decimals(self.float_decimals);

        let size = space.size();
        let index = self.state.select(mode, size, inputs.seed, inputs.reset);
        let combo = space.combo(index);

        let outputs = AllParametersLoopOutputs {
            steps: combo.first().and_then(SweepValue::as_i64).unwrap_or(inputs.steps_start),
            cfg: combo.get(1).and_then(SweepValue::as_f64).unwrap_or(inputs.cfg_start),
            shift: combo.get(2).and_then(SweepValue::as_f64).unwrap_or(inputs.shift_start),
            sampler: combo
                .get(3)
                .and_then(SweepValue::as_name)
                .unwrap_or_default()
                .to_string(),
            scheduler: combo
                .get(4)
                .and_then(SweepValue::as_name)
                .unwrap_or_default()
                .to_string(),
            current_index: index,
            total_combinations: size,
            current_combination: space.label(&combo),
        };

        debug!(
            "AllParametersLoop: selected {} (index {} of {}, mode {})",
            outputs.current_combination,
            index,
            size,
            mode.as_str()
        );

        Ok(outputs)
    }
}

impl LoopNode for AllParametersLoop {
    fn descriptor(&self) -> NodeDescriptor {
        Self::describe()
    }

    fn invoke_json(&mut self, inputs: &serde_json::Value) -> Result<serde_json::Value> {
        let inputs: AllParametersLoopInputs = serde_json::from_value(inputs.clone())?;
        Ok(serde_json::to_value(self.invoke(&inputs)?)?)
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn state(&self) -> &LoopState {
        &self.state
    }
}
