//! Loop node variants and host registration surface.
//!
//! Six node variants compose the sweep primitives into invocable units:
//! - `FloatRangeLoop`: cfg x shift float ranges, sequential
//! - `ParametersRangeLoop`: steps x cfg x shift ranges, sequential
//! - `SamplerLoop` / `SchedulerLoop`: one categorical dimension, all modes
//! - `SamplerSchedulerLoop`: sampler x scheduler, all modes
//! - `AllParametersLoop`: all five dimensions, all modes
//!
//! Each instance owns its [`LoopState`] exclusively; the host re-invokes the
//! node once per graph execution and the state carries the position between
//! calls. The [`LoopNode`] trait is the dynamic surface a host drives through
//! the [`NodeRegistry`] with JSON payloads; each variant also exposes a typed
//! `invoke` for direct embedding.

mod all_params;
mod catalog;
mod descriptor;
mod float_range;
mod params_range;
mod registry;
mod sampler;
mod sampler_scheduler;
mod scheduler;

pub use all_params::{AllParametersLoop, AllParametersLoopInputs, AllParametersLoopOutputs};
pub use catalog::{NameCatalog, FALLBACK_SAMPLERS, FALLBACK_SCHEDULERS};
pub use descriptor::{InputKind, InputSpec, NodeDescriptor, OutputKind, OutputSpec};
pub use float_range::{FloatRangeLoop, FloatRangeLoopInputs, FloatRangeLoopOutputs};
pub use params_range::{ParametersRangeLoop, ParametersRangeLoopInputs, ParametersRangeLoopOutputs};
pub use registry::NodeRegistry;
pub use sampler::{SamplerLoop, SamplerLoopInputs, SamplerLoopOutputs};
pub use sampler_scheduler::{
    SamplerSchedulerLoop, SamplerSchedulerLoopInputs, SamplerSchedulerLoopOutputs,
};
pub use scheduler::{SchedulerLoop, SchedulerLoopInputs, SchedulerLoopOutputs};

use crate::error::Result;
use crate::sweep::LoopState;

/// A loop node instance the host can invoke repeatedly.
///
/// One invocation is one atomic read-modify-write of the instance's
/// [`LoopState`]: report the current combination, advance for the next call.
/// Invocations are synchronous in-memory computations; the trait is `Send` so
/// hosts may move instances between worker threads, but concurrent invocation
/// of a single instance is not part of the contract.
pub trait LoopNode: Send + std::fmt::Debug {
    /// Registration metadata for this variant
    fn descriptor(&self) -> NodeDescriptor;

    /// Invoke with a JSON input payload, returning the named outputs as JSON.
    ///
    /// Missing input fields take their declared defaults. Fails only on
    /// malformed payloads or an unknown mode string.
    fn invoke_json(&mut self, inputs: &serde_json::Value) -> Result<serde_json::Value>;

    /// Reinitialize traversal state, equivalent to invoking with `reset` set
    fn reset(&mut self);

    /// Read-only view of the persistent traversal state
    fn state(&self) -> &LoopState;
}
