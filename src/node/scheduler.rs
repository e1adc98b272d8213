//! Scheduler Loop
//!
//! Cycles through the host's scheduler names under any traversal mode, with
//! an optional comma-separated skip list. "Scheduler" here is a diffusion
//! noise-schedule identifier, an opaque enumerable string.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::catalog::NameCatalog;
use crate::node::descriptor::{InputSpec, NodeDescriptor, OutputKind, OutputSpec};
use crate::node::LoopNode;
use crate::sweep::{filter_names, CombinationSpace, Dim, LoopState, Mode, SweepValue};

/// Inputs for [`SchedulerLoop`]; omitted fields take their declared defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerLoopInputs {
    pub mode: String,
    pub seed: u64,
    pub reset: bool,
    pub skip_schedulers: String,
}

impl Default for SchedulerLoopInputs {
    fn default() -> Self {
        Self {
            mode: "sequential".to_string(),
            seed: 0,
            reset: false,
            skip_schedulers: String::new(),
        }
    }
}

/// Named outputs of one [`SchedulerLoop`] invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerLoopOutputs {
    pub scheduler: String,
    pub current_index: usize,
    pub total_combinations: usize,
    pub current_combination: String,
}

/// Loop node over the scheduler name list
#[derive(Debug, Clone)]
pub struct SchedulerLoop {
    catalog: Arc<NameCatalog>,
    state: LoopState,
}

impl SchedulerLoop {
    pub fn new(catalog: Arc<NameCatalog>) -> Self {
        Self { catalog, state: LoopState::new() }
    }

    /// Registration metadata for this variant
    pub fn describe() -> NodeDescriptor {
        NodeDescriptor::new("SchedulerLoop", "Scheduler Loop", "Schedulers/Loop")
            .with_input(InputSpec::choice("mode", &Mode::WIRE_NAMES))
            .with_input(InputSpec::seed("seed"))
            .with_input(InputSpec::flag("reset", false))
            .with_input(
                InputSpec::text(
                    "skip_schedulers",
                    "Enter scheduler names to skip, separated by commas:\ne.g., karras, exponential",
                )
                .optional(),
            )
            .with_output(OutputSpec::new("scheduler", OutputKind::Scheduler))
            .with_output(OutputSpec::new("current_index", OutputKind::Int))
            .with_output(OutputSpec::new("total_combinations", OutputKind::Int))
            .with_output(OutputSpec::new("current_combination", OutputKind::Text))
    }

    /// Report the current scheduler and advance for the next call
    pub fn invoke(&mut self, inputs: &SchedulerLoopInputs) -> Result<SchedulerLoopOutputs> {
        let mode: Mode = inputs.mode.parse()?;
        let schedulers = filter_names(self.catalog.schedulers(), &inputs.skip_schedulers);

        let space = CombinationSpace::new(vec![Dim::names("scheduler", schedulers)]);
        let size = space.size();
        let index = self.state.select(mode, size, inputs.seed, inputs.reset);
        let combo = space.combo(index);

        let outputs = SchedulerLoopOutputs {
            scheduler: combo
                .first()
                .and_then(SweepValue::as_name)
                .unwrap_or_default()
                .to_string(),
            current_index: index,
            total_combinations: size,
            current_combination: space.label(&combo),
        };

        debug!(
            "SchedulerLoop: selected '{}' (index {} of {}, mode {})",
            outputs.scheduler,
            index,
            size,
            mode.as_str()
        );

        Ok(outputs)
    }
}

impl LoopNode for SchedulerLoop {
    fn descriptor(&self) -> NodeDescriptor {
        Self::describe()
    }

    fn invoke_json(&mut self, inputs: &serde_json::Value) -> Result<serde_json::Value> {
        let inputs: SchedulerLoopInputs = serde_json::from_value(inputs.clone())?;
        Ok(serde_json::to_value(self.invoke(&inputs)?)?)
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn state(&self) -> &LoopState {
        &self.state
    }
}
