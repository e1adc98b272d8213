//! Sampler Loop
//!
//! Cycles through the host's sampler names under any traversal mode, with an
//! optional comma-separated skip list.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::catalog::NameCatalog;
use crate::node::descriptor::{InputSpec, NodeDescriptor, OutputKind, OutputSpec};
use crate::node::LoopNode;
use crate::sweep::{filter_names, CombinationSpace, Dim, LoopState, Mode, SweepValue};

/// Inputs for [`SamplerLoop`]; omitted fields take their declared defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerLoopInputs {
    pub mode: String,
    pub seed: u64,
    pub reset: bool,
    pub skip_samplers: String,
}

impl Default for SamplerLoopInputs {
    fn default() -> Self {
        Self {
            mode: "sequential".to_string(),
            seed: 0,
            reset: false,
            skip_samplers: String::new(),
        }
    }
}

/// Named outputs of one [`SamplerLoop`] invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerLoopOutputs {
    pub sampler: String,
    pub current_index: usize,
    pub total_combinations: usize,
    pub current_combination: String,
}

/// Loop node over the sampler name list
#[derive(Debug, Clone)]
pub struct SamplerLoop {
    catalog: Arc<NameCatalog>,
    state: LoopState,
}

impl SamplerLoop {
    pub fn new(catalog: Arc<NameCatalog>) -> Self {
        Self { catalog, state: LoopState::new() }
    }

    /// Registration metadata for this variant
    pub fn describe() -> NodeDescriptor {
        NodeDescriptor::new("SamplerLoop", "Sampler Loop", "Samplers/Loop")
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
            .with_output(OutputSpec::new("sampler", OutputKind::Sampler))
            .with_output(OutputSpec::new("current_index", OutputKind::Int))
            .with_output(OutputSpec::new("total_combinations", OutputKind::Int))
            .with_output(OutputSpec::new("current_combination", OutputKind::Text))
    }

    /// Report the current sampler and advance for the next call
    pub fn invoke(&mut self, inputs: &SamplerLoopInputs) -> Result<SamplerLoopOutputs> {
        let mode: Mode = inputs.mode.parse()?;
        let samplers = filter_names(self.catalog.samplers(), &inputs.skip_samplers);

        let space = CombinationSpace::new(vec![Dim::names("sampler", samplers)]);
        let size = space.size();
        let index = self.state.select(mode, size, inputs.seed, inputs.reset);
        let combo = space.combo(index);

        let outputs = SamplerLoopOutputs {
            sampler: combo
                .first()
                .and_then(SweepValue::as_name)
                .unwrap_or_default()
                .to_string(),
            current_index: index,
            total_combinations: size,
            current_combination: space.label(&combo),
        };

        debug!(
            "SamplerLoop: selected '{}' (index {} of {}, mode {})",
            outputs.sampler,
            index,
            size,
            mode.as_str()
        );

        Ok(outputs)
    }
}

impl LoopNode for SamplerLoop {
    fn descriptor(&self) -> NodeDescriptor {
        Self::describe()
    }

    fn invoke_json(&mut self, inputs: &serde_json::Value) -> Result<serde_json::Value> {
        let inputs: SamplerLoopInputs = serde_json::from_value(inputs.clone())?;
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

    fn catalog(samplers: &[&str]) -> Arc<NameCatalog> {
        Arc::new(NameCatalog::new(
            samplers.iter().map(|s| s.to_string()).collect(),
            Vec::new(),
        ))
    }

    #[test]
    fn test_sequential_walks_catalog_order() {
        let mut node = SamplerLoop::new(catalog(&["euler", "heun", "lcm"]));
        let input = SamplerLoopInputs::default();

        let names: Vec<String> = (0..4).map(|_| node.invoke(&input).unwrap().sampler).collect();
        assert_eq!(names, vec!["euler", "heun", "lcm", "euler"]);
    }

    #[test]
    fn test_skip_list_removes_names() {
        let mut node = SamplerLoop::new(catalog(&["euler", "heun", "lcm"]));
        let input = SamplerLoopInputs { skip_samplers: "heun".to_string(), ..Default::default() };

        let outputs = node.invoke(&input).unwrap();
        assert_eq!(outputs.total_combinations, 2);

        let second = node.invoke(&input).unwrap();
        assert_eq!(second.sampler, "lcm");
    }

    #[test]
    fn test_all_skipped_falls_back_to_full_list() {
        let mut node = SamplerLoop::new(catalog(&["euler", "heun"]));
        let input =
            SamplerLoopInputs { skip_samplers: "euler, heun".to_string(), ..Default::default() };

        let outputs = node.invoke(&input).unwrap();
        assert_eq!(outputs.total_combinations, 2);
        assert_eq!(outputs.sampler, "euler");
    }

    #[test]
    fn test_ping_pong_bounces() {
        let mut node = SamplerLoop::new(catalog(&["a", "b", "c", "d"]));
        let input = SamplerLoopInputs { mode: "ping_pong".to_string(), ..Default::default() };

        let indices: Vec<usize> =
            (0..8).map(|_| node.invoke(&input).unwrap().current_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 2, 1, 0, 1]);
    }

    #[test]
    fn test_random_reproducible_for_same_seed() {
        let names = catalog(&["a", "b", "c", "d", "e", "f", "g"]);
        let input = SamplerLoopInputs { mode: "random".to_string(), seed: 7, ..Default::default() };

        let mut first = SamplerLoop::new(names.clone());
        let mut second = SamplerLoop::new(names);

        let run_a: Vec<usize> = (0..10).map(|_| first.invoke(&input).unwrap().current_index).collect();
        let run_b: Vec<usize> = (0..10).map(|_| second.invoke(&input).unwrap().current_index).collect();
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn test_unknown_mode_fails() {
        let mut node = SamplerLoop::new(catalog(&["euler"]));
        let input = SamplerLoopInputs { mode: "shuffled".to_string(), ..Default::default() };

        let err = node.invoke(&input).unwrap_err();
        assert_eq!(err.to_string(), "Unknown mode: shuffled");
    }

    #[test]
    fn test_empty_catalog_yields_defaults() {
        let mut node = SamplerLoop::new(catalog(&[]));
        let outputs = node.invoke(&SamplerLoopInputs::default()).unwrap();

        assert_eq!(outputs.sampler, "");
        assert_eq!(outputs.current_index, 0);
        assert_eq!(outputs.total_combinations, 0);
        assert_eq!(outputs.current_combination, "no combinations available");
    }

    #[test]
    fn test_label_format() {
        let mut node = SamplerLoop::new(catalog(&["euler"]));
        let outputs = node.invoke(&SamplerLoopInputs::default()).unwrap();
        assert_eq!(outputs.current_combination, "sampler=euler");
    }

    #[test]
    fn test_reset_via_trait() {
        let mut node = SamplerLoop::new(catalog(&["a", "b", "c"]));
        let input = SamplerLoopInputs::default();

        node.invoke(&input).unwrap();
        node.invoke(&input).unwrap();
        LoopNode::reset(&mut node);
        assert_eq!(node.state().index, 0);

        let outputs = node.invoke(&input).unwrap();
        assert_eq!(outputs.sampler, "a");
    }
}
