//! Float Range Loop
//!
//! Steps through combinations of cfg and shift float values in index order,
//! cfg varying slowest. Sequential traversal only.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::descriptor::{InputSpec, NodeDescriptor, OutputKind, OutputSpec};
use crate::node::LoopNode;
use crate::sweep::{
    CombinationSpace, Dim, FloatRange, LoopState, Mode, SweepValue, DEFAULT_FLOAT_DECIMALS,
};

/// Inputs for [`FloatRangeLoop`]; omitted fields take their declared defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatRangeLoopInputs {
    pub cfg_start: f64,
    pub cfg_end: f64,
    pub cfg_step: f64,
    pub shift_start: f64,
    pub shift_end: f64,
    pub shift_step: f64,
    pub seed: u64,
    pub reset: bool,
}

impl Default for FloatRangeLoopInputs {
    fn default() -> Self {
        Self {
            cfg_start: 1.0,
            cfg_end: 8.0,
            cfg_step: 1.0,
            shift_start: 1.0,
            shift_end: 3.0,
            shift_step: 0.5,
            seed: 0,
            reset: false,
        }
    }
}

/// Named outputs of one [`FloatRangeLoop`] invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatRangeLoopOutputs {
    pub cfg: f64,
    pub shift: f64,
    pub current_index: usize,
    pub total_combinations: usize,
    pub current_combination: String,
}

/// Loop node over the cfg x shift float range product
#[derive(Debug, Clone)]
pub struct FloatRangeLoop {
    state: LoopState,
    float_decimals: usize,
}

impl Default for FloatRangeLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FloatRangeLoop {
    pub fn new() -> Self {
        Self { state: LoopState::new(), float_decimals: DEFAULT_FLOAT_DECIMALS }
    }

    /// Set the decimals used for float values in combination labels
    pub fn with_float_decimals(mut self, decimals: usize) -> Self {
        self.float_decimals = decimals;
        self
    }

    /// Registration metadata for this variant
    pub fn describe() -> NodeDescriptor {
        NodeDescriptor::new("FloatRangeLoop", "Float Range Loop", "Parameters/Loop")
            .with_input(InputSpec::float("cfg_start", 1.0, 0.0, 100.0, 0.1))
            .with_input(InputSpec::float("cfg_end", 8.0, 0.0, 100.0, 0.1))
            .with_input(InputSpec::float("cfg_step", 1.0, 0.1, 10.0, 0.1))
            .with_input(InputSpec::float("shift_start", 1.0, 0.0, 100.0, 0.1))
            .with_input(InputSpec::float("shift_end", 3.0, 0.0, 100.0, 0.1))
            .with_input(InputSpec::float("shift_step", 0.5, 0.1, 10.0, 0.1))
            .with_input(InputSpec::seed("seed"))
            .with_input(InputSpec::flag("reset", false))
            .with_output(OutputSpec::new("cfg", OutputKind::Float))
            .with_output(OutputSpec::new("shift", OutputKind::Float))
            .with_output(OutputSpec::new("current_index", OutputKind::Int))
            .with_output(OutputSpec::new("total_combinations", OutputKind::Int))
            .with_output(OutputSpec::new("current_combination", OutputKind::Text))
    }

    /// Report the current cfg/shift combination and advance for the next call
    pub fn invoke(&mut self, inputs: &FloatRangeLoopInputs) -> FloatRangeLoopOutputs {
        let cfg = FloatRange::new(inputs.cfg_start, inputs.cfg_end, inputs.cfg_step);
        let shift = FloatRange::new(inputs.shift_start, inputs.shift_end, inputs.shift_step);

        let space = CombinationSpace::new(vec![
            Dim::floats("cfg", cfg.values()),
            Dim::floats("shift", shift.values()),
        ])
        .with_float_decimals(self.float_decimals);

        let size = space.size();
        let index = self.state.select(Mode::Sequential, size, inputs.seed, inputs.reset);
        let combo = space.combo(index);

        let outputs = FloatRangeLoopOutputs {
            cfg: combo.first().and_then(SweepValue::as_f64).unwrap_or(inputs.cfg_start),
            shift: combo.get(1).and_then(SweepValue::as_f64).unwrap_or(inputs.shift_start),
            current_index: index,
            total_combinations: size,
            current_combination: space.label(&combo),
        };

        debug!(
            "FloatRangeLoop: selected {} (index {} of {})",
            outputs.current_combination, index, size
        );

        outputs
    }
}

impl LoopNode for FloatRangeLoop {
    fn descriptor(&self) -> NodeDescriptor {
        Self::describe()
    }

    fn invoke_json(&mut self, inputs: &serde_json::Value) -> Result<serde_json::Value> {
        let inputs: FloatRangeLoopInputs = serde_json::from_value(inputs.clone())?;
        Ok(serde_json::to_value(self.invoke(&inputs))?)
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn state(&self) -> &LoopState {
        &self.state
    }
}
