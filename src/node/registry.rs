//! Node registry
//!
//! Maps node names to descriptors and factories so a host can list the pack's
//! variants and instantiate fresh node instances. Every instantiated node owns
//! its own traversal state; the registry never shares state between instances.

use std::sync::Arc;

use log::info;

use crate::config::Config;
use crate::error::{Result, SweeprError};
use crate::node::catalog::NameCatalog;
use crate::node::descriptor::NodeDescriptor;
use crate::node::{
    AllParametersLoop, FloatRangeLoop, LoopNode, ParametersRangeLoop, SamplerLoop,
    SamplerSchedulerLoop, SchedulerLoop,
};

type NodeFactory = Box<dyn Fn() -> Box<dyn LoopNode> + Send + Sync>;

struct Entry {
    descriptor: NodeDescriptor,
    factory: NodeFactory,
}

/// Registry of loop node variants, in registration order
pub struct NodeRegistry {
    entries: Vec<Entry>,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Registry with all six built-in variants, drawing names from `catalog`
    pub fn builtin(catalog: Arc<NameCatalog>) -> Self {
        Self::with_label_decimals(catalog, crate::sweep::DEFAULT_FLOAT_DECIMALS)
    }

    /// Registry configured from a [`Config`]: name-list overrides and label
    /// precision
    pub fn from_config(config: &Config) -> Self {
        let catalog = Arc::new(NameCatalog::from_config(config));
        Self::with_label_decimals(catalog, config.label.float_decimals)
    }

    fn with_label_decimals(catalog: Arc<NameCatalog>, decimals: usize) -> Self {
        let mut registry = Self::new();

        registry.register(FloatRangeLoop::describe(), move || {
            Box::new(FloatRangeLoop::new().with_float_decimals(decimals))
        });
        registry.register(ParametersRangeLoop::describe(), move || {
            Box::new(ParametersRangeLoop::new().with_float_decimals(decimals))
        });

        let samplers = catalog.clone();
        registry.register(SamplerLoop::describe(), move || {
            Box::new(SamplerLoop::new(samplers.clone()))
        });

        let schedulers = catalog.clone();
        registry.register(SchedulerLoop::describe(), move || {
            Box::new(SchedulerLoop::new(schedulers.clone()))
        });

        let pairs = catalog.clone();
        registry.register(SamplerSchedulerLoop::describe(), move || {
            Box::new(SamplerSchedulerLoop::new(pairs.clone()))
        });

        registry.register(AllParametersLoop::describe(), move || {
            Box::new(AllParametersLoop::new(catalog.clone()).with_float_decimals(decimals))
        });

        info!("Registered {} loop node variants", registry.len());
        registry
    }

    /// Register a variant; a later registration under the same name replaces
    /// the earlier one
    pub fn register(
        &mut self,
        descriptor: NodeDescriptor,
        factory: impl Fn() -> Box<dyn LoopNode> + Send + Sync + 'static,
    ) {
        self.entries.retain(|entry| entry.descriptor.name != descriptor.name);
        self.entries.push(Entry { descriptor, factory: Box::new(factory) });
    }

    /// Build a fresh instance of the named variant
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn LoopNode>> {
        self.entries
            .iter()
            .find(|entry| entry.descriptor.name == name)
            .map(|entry| (entry.factory)())
            .ok_or_else(|| SweeprError::UnknownNode(name.to_string()))
    }

    /// Descriptors of every registered variant, in registration order
    pub fn descriptors(&self) -> Vec<&NodeDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor).collect()
    }

    /// Registered node names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.descriptor.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.descriptor.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
