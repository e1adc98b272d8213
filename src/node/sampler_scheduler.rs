//! Sampler Scheduler Loop
//!
//! Cycles through the Cartesian product of sampler and scheduler names under
//! any traversal mode, sampler varying slowest.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::catalog::NameCatalog;
use crate::node::descriptor::{InputSpec, NodeDescriptor, OutputKind, OutputSpec};
use crate::node::LoopNode;
use crate::sweep::{filter_names, CombinationSpace, Dim, LoopState, Mode, SweepValue};

/// Inputs for [`SamplerSchedulerLoop`]; omitted fields take their declared defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSchedulerLoopInputs {
    pub mode: String,
    pub seed: u64,
    pub reset: bool,
    pub skip_samplers: String,
    pub skip_schedulers: String,
}

impl Default for SamplerSchedulerLoopInputs {
    fn default() -> Self {
        Self {
            mode: "sequential".to_string(),
            seed: 0,
            reset: false,
            skip_samplers: String::new(),
            skip_schedulers: String::new(),
        }
    }
}

/// Named outputs of one [`SamplerSchedulerLoop`] invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerSchedulerLoopOutputs {
    pub sampler: String,
    pub scheduler: String,
    pub current_index: usize,
    pub total_combinations: usize,
    pub current_combination: String,
}

/// Loop node over the sampler x scheduler product
#[derive(Debug, Clone)]
pub struct SamplerSchedulerLoop {
    catalog: Arc<NameCatalog>,
    state: LoopState,
}

impl SamplerSchedulerLoop {
    pub fn new(catalog: Arc<NameCatalog>) -> Self {
        Self { catalog, state: LoopState::new() }
    }

    /// Registration metadata for this variant
    pub fn describe() -> NodeDescriptor {
        NodeDescriptor::new("SamplerSchedulerLoop", "Sampler Scheduler Loop", "Samplers/Loop")
            .with_input(InputSpec::choice("mode", &Mode::WIRE_NAMES))
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
            .with_output(OutputSpec::new("sampler", OutputKind::Sampler))
            .with_output(OutputSpec::new("scheduler", OutputKind::Scheduler))
            .with_output(OutputSpec::new("current_index", OutputKind::Int))
            .with_output(OutputSpec::new("total_combinations", OutputKind::Int))
            .with_output(OutputSpec::new("current_combination", OutputKind::Text))
    }

    /// Report the current sampler/scheduler pair and advance for the next call
    pub fn invoke(&mut self, inputs: &SamplerSchedulerLoopInputs) -> Result<SamplerSchedulerLoopOutputs> {
        let mode: Mode = inputs.mode.parse()?;
        let samplers = filter_names(self.catalog.samplers(), &inputs.skip_samplers);
        let schedulers = filter_names(self.catalog.schedulers(), &inputs.skip_schedulers);

        let space = CombinationSpace::new(vec![
            Dim::names("sampler", samplers),
            Dim::names("scheduler", schedulers),
        ]);
        let size = space.size();
        let index = self.state.select(mode, size, inputs.seed, inputs.reset);
        let combo = space.combo(index);

        let outputs = SamplerSchedulerLoopOutputs {
            sampler: combo
                .first()
                .and_then(SweepValue::as_name)
                .unwrap_or_default()
                .to_string(),
            scheduler: combo
                .get(1)
                .and_then(SweepValue::as_name)
                .unwrap_or_default()
                .to_string(),
            current_index: index,
            total_combinations: size,
            current_combination: space.label(&combo),
        };

        debug!(
            "SamplerSchedulerLoop: selected {} (index {} of {}, mode {})",
            outputs.current_combination,
            index,
            size,
            mode.as_str()
        );

        Ok(outputs)
    }
}

impl LoopNode for SamplerSchedulerLoop {
    fn descriptor(&self) -> NodeDescriptor {
        Self::describe()
    }

    fn invoke_json(&mut self, inputs: &serde_json::Value) -> Result<serde_json::Value> {
        let inputs: SamplerSchedulerLoopInputs = serde_json::from_value(inputs.clone())?;
        Ok(serde_json::to_value(self.invoke(&inputs)?)?)
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

    fn catalog() -> Arc<NameCatalog> {
        Arc::new(NameCatalog::new(
            vec!["euler".to_string(), "heun".to_string()],
            vec!["normal".to_string(), "karras".to_string(), "simple".to_string()],
        ))
    }

    #[test]
    fn test_total_is_product() {
        let mut node = SamplerSchedulerLoop::new(catalog());
        let outputs = node.invoke(&SamplerSchedulerLoopInputs::default()).unwrap();
        assert_eq!(outputs.total_combinations, 6);
    }

    #[test]
    fn test_sampler_varies_slowest() {
        let mut node = SamplerSchedulerLoop::new(catalog());
        let input = SamplerSchedulerLoopInputs::default();

        let pairs: Vec<(String, String)> = (0..6)
            .map(|_| {
                let out = node.invoke(&input).unwrap();
                (out.sampler, out.scheduler)
            })
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("euler".to_string(), "normal".to_string()),
                ("euler".to_string(), "karras".to_string()),
                ("euler".to_string(), "simple".to_string()),
                ("heun".to_string(), "normal".to_string()),
                ("heun".to_string(), "karras".to_string()),
                ("heun".to_string(), "simple".to_string()),
            ]
        );
    }

    #[test]
    fn test_label_field_order() {
        let mut node = SamplerSchedulerLoop::new(catalog());
        let outputs = node.invoke(&SamplerSchedulerLoopInputs::default()).unwrap();
        assert_eq!(outputs.current_combination, "sampler=euler, scheduler=normal");
    }

    #[test]
    fn test_independent_skip_lists() {
        let mut node = SamplerSchedulerLoop::new(catalog());
        let input = SamplerSchedulerLoopInputs {
            skip_samplers: "heun".to_string(),
            skip_schedulers: "normal, simple".to_string(),
            ..Default::default()
        };

        let outputs = node.invoke(&input).unwrap();
        assert_eq!(outputs.total_combinations, 1);
        assert_eq!(outputs.sampler, "euler");
        assert_eq!(outputs.scheduler, "karras");
    }

    #[test]
    fn test_ping_pong_over_product() {
        let mut node = SamplerSchedulerLoop::new(catalog());
        let input =
            SamplerSchedulerLoopInputs { mode: "ping_pong".to_string(), ..Default::default() };

        let indices: Vec<usize> =
            (0..12).map(|_| node.invoke(&input).unwrap().current_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 4, 3, 2, 1, 0, 1]);
    }

    #[test]
    fn test_random_reproducible_for_same_seed() {
        let mut first = SamplerSchedulerLoop::new(catalog());
        let mut second = SamplerSchedulerLoop::new(catalog());
        let input = SamplerSchedulerLoopInputs {
            mode: "random".to_string(),
            seed: 99,
            ..Default::default()
        };

        let run_a: Vec<usize> =
            (0..10).map(|_| first.invoke(&input).unwrap().current_index).collect();
        let run_b: Vec<usize> =
            (0..10).map(|_| second.invoke(&input).unwrap().current_index).collect();
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn test_unknown_mode_fails() {
        let mut node = SamplerSchedulerLoop::new(catalog());
        let input =
            SamplerSchedulerLoopInputs { mode: "pingpong".to_string(), ..Default::default() };
        let err = node.invoke(&input).unwrap_err();
        assert_eq!(err.to_string(), "Unknown mode: pingpong");
    }
}
