//! Parameters Range Loop
//!
//! Steps through combinations of steps, cfg, and shift values in index order,
//! steps varying slowest and shift fastest. Sequential traversal only.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::descriptor::{InputSpec, NodeDescriptor, OutputKind, OutputSpec};
use crate::node::LoopNode;
use crate::sweep::{
    CombinationSpace, Dim, FloatRange, IntRange, LoopState, Mode, SweepValue,
    DEFAULT_FLOAT_DECIMALS,
};

/// Inputs for [`ParametersRangeLoop`]; omitted fields take their declared defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParametersRangeLoopInputs {
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
}

impl Default for ParametersRangeLoopInputs {
    fn default() -> Self {
        Self {
            steps_start: 20,
            steps_end: 50,
            steps_interval: 5,
            cfg_start: 1.0,
            cfg_end: 8.0,
            cfg_interval: 1.0,
            shift_start: 1.0,
            shift_end: 3.0,
            shift_interval: 0.5,
            seed: 0,
            reset: false,
        }
    }
}

/// Named outputs of one [`ParametersRangeLoop`] invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersRangeLoopOutputs {
    pub steps: i64,
    pub cfg: f64,
    pub shift: f64,
    pub current_index: usize,
    pub total_combinations: usize,
    pub current_combination: String,
}

/// Loop node over the steps x cfg x shift range product
#[derive(Debug, Clone)]
pub struct ParametersRangeLoop {
    state: LoopState,
    float_decimals: usize,
}

impl Default for ParametersRangeLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl ParametersRangeLoop {
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
        NodeDescriptor::new("ParametersRangeLoop", "Parameters Range Loop", "Parameters/Loop")
            .with_input(InputSpec::int("steps_start", 20, 1, 1000))
            .with_input(InputSpec::int("steps_end", 50, 1, 1000))
            .with_input(InputSpec::int("steps_interval", 5, 1, 100))
            .with_input(InputSpec::float("cfg_start", 1.0, 0.0, 30.0, 0.1))
            .with_input(InputSpec::float("cfg_end", 8.0, 0.0, 30.0, 0.1))
            .with_input(InputSpec::float("cfg_interval", 1.0, 0.1, 10.0, 0.1))
            .with_input(InputSpec::float("shift_start", 1.0, 0.0, 10.0, 0.1))
            .with_input(InputSpec::float("shift_end", 3.0, 0.0, 10.0, 0.1))
            .with_input(InputSpec::float("shift_interval", 0.5, 0.1, 5.0, 0.1))
            .with_input(InputSpec::seed("seed"))
            .with_input(InputSpec::flag("reset", false))
            .with_output(OutputSpec::new("steps", OutputKind::Int))
            .with_output(OutputSpec::new("cfg", OutputKind::Float))
            .with_output(OutputSpec::new("shift", OutputKind::Float))
            .with_output(OutputSpec::new("current_index", OutputKind::Int))
            .with_output(OutputSpec::new("total_combinations", OutputKind::Int))
            .with_output(OutputSpec::new("current_combination", OutputKind::Text))
    }

    /// Report the current steps/cfg/shift combination and advance for the next call
    pub fn invoke(&mut self, inputs: &ParametersRangeLoopInputs) -> ParametersRangeLoopOutputs {
        let steps = IntRange::new(inputs.steps_start, inputs.steps_end, inputs.steps_interval);
        let cfg = FloatRange::new(inputs.cfg_start, inputs.cfg_end, inputs.cfg_interval);
        let shift = FloatRange::new(inputs.shift_start, inputs.shift_end, inputs.shift_interval);

        let space = CombinationSpace::new(vec![
            Dim::ints("steps", steps.values()),
            Dim::floats("cfg", cfg.values()),
            Dim::floats("shift", shift.values()),
        ])
        .with_float_decimals(self.float_decimals);

        let size = space.size();
        let index = self.state.select(Mode::Sequential, size, inputs.seed, inputs.reset);
        let combo = space.combo(index);

        let outputs = ParametersRangeLoopOutputs {
            steps: combo.first().and_then(SweepValue::as_i64).unwrap_or(inputs.steps_start),
            cfg: combo.get(1).and_then(SweepValue::as_f64).unwrap_or(inputs.cfg_start),
            shift: combo.get(2).and_then(SweepValue::as_f64).unwrap_or(inputs.shift_start),
            current_index: index,
            total_combinations: size,
            current_combination: space.label(&combo),
        };

        debug!(
            "ParametersRangeLoop: selected {} (index {} of {})",
            outputs.current_combination, index, size
        );

        outputs
    }
}

impl LoopNode for ParametersRangeLoop {
    fn descriptor(&self) -> NodeDescriptor {
        Self::describe()
    }

    fn invoke_json(&mut self, inputs: &serde_json::Value) -> Result<serde_json::Value> {
        let inputs: ParametersRangeLoopInputs = serde_json::from_value(inputs.clone())?;
        Ok(serde_json::to_value(self.invoke(&inputs))?)
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn state(&self) -> &LoopState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ParametersRangeLoopInputs {
        ParametersRangeLoopInputs {
            steps_start: 10,
            steps_end: 20,
            steps_interval: 10,
            cfg_start: 1.0,
            cfg_end: 2.0,
            cfg_interval: 1.0,
            shift_start: 1.0,
            shift_end: 1.5,
            shift_interval: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_total_is_product_of_three_ranges() {
        let mut node = ParametersRangeLoop::new();
        let outputs = node.invoke(&inputs());
        assert_eq!(outputs.total_combinations, 8); // 2 steps x 2 cfg x 2 shift
    }

    #[test]
    fn test_steps_varies_slowest() {
        let mut node = ParametersRangeLoop::new();
        let input = inputs();

        // steps stays at its first value for the 4 combinations of cfg x shift
        let steps: Vec<i64> = (0..5).map(|_| node.invoke(&input).steps).collect();
        assert_eq!(steps, vec![10, 10, 10, 10, 20]);
    }

    #[test]
    fn test_shift_varies_fastest() {
        let mut node = ParametersRangeLoop::new();
        let input = inputs();

        let shifts: Vec<f64> = (0..3).map(|_| node.invoke(&input).shift).collect();
        assert_eq!(shifts, vec![1.0, 1.5, 1.0]);
    }

    #[test]
    fn test_label_field_order() {
        let mut node = ParametersRangeLoop::new();
        let outputs = node.invoke(&inputs());
        assert_eq!(outputs.current_combination, "steps=10, cfg=1.00, shift=1.00");
    }

    #[test]
    fn test_reset_returns_first_combination() {
        let mut node = ParametersRangeLoop::new();
        let mut input = inputs();

        for _ in 0..5 {
            node.invoke(&input);
        }

        input.reset = true;
        let outputs = node.invoke(&input);
        assert_eq!(outputs.current_index, 0);
        assert_eq!(outputs.steps, 10);
    }

    #[test]
    fn test_degenerate_ranges_single_combination() {
        let mut node = ParametersRangeLoop::new();
        let input = ParametersRangeLoopInputs {
            steps_start: 50,
            steps_end: 20, // inverted
            steps_interval: 5,
            cfg_start: 3.0,
            cfg_end: 3.0,
            cfg_interval: 1.0,
            shift_start: 2.0,
            shift_end: 1.0, // inverted
            shift_interval: 0.5,
            ..Default::default()
        };

        let outputs = node.invoke(&input);
        assert_eq!(outputs.total_combinations, 1);
        assert_eq!(outputs.steps, 50);
        assert_eq!(outputs.cfg, 3.0);
        assert_eq!(outputs.shift, 2.0);
    }

    #[test]
    fn test_invoke_json_defaults() {
        let mut node = ParametersRangeLoop::new();
        let outputs = node.invoke_json(&serde_json::json!({})).unwrap();
        // Defaults: 7 steps x 8 cfg x 5 shift
        assert_eq!(outputs["total_combinations"], 280);
        assert_eq!(outputs["steps"], 20);
    }
}
