//! Node registration metadata
//!
//! A [`NodeDescriptor`] is the surface a host node-graph system reads when
//! registering a node variant: a category string plus ordered, typed input and
//! output fields. Descriptors are plain data and serialize to JSON so a host
//! can render input widgets from them.

use serde::{Deserialize, Serialize};

/// Value kind a node output carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Int,
    Float,
    Text,
    /// A sampler name, typed so hosts can wire it into sampler inputs
    Sampler,
    /// A scheduler name, typed so hosts can wire it into scheduler inputs
    Scheduler,
}

/// Widget kind and constraints for a node input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    Float { default: f64, min: f64, max: f64, step: f64 },
    Int { default: i64, min: i64, max: i64 },
    /// Unsigned seed field spanning the full u64 range
    Seed { default: u64 },
    Bool { default: bool },
    /// One-of selector (traversal mode)
    Choice { options: Vec<String> },
    /// Free-form text (skip lists)
    Text { placeholder: String, multiline: bool },
}

/// One typed input field of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    pub name: String,
    pub kind: InputKind,
    pub required: bool,
}

impl InputSpec {
    pub fn float(name: impl Into<String>, default: f64, min: f64, max: f64, step: f64) -> Self {
        Self { name: name.into(), kind: InputKind::Float { default, min, max, step }, required: true }
    }

    pub fn int(name: impl Into<String>, default: i64, min: i64, max: i64) -> Self {
        Self { name: name.into(), kind: InputKind::Int { default, min, max }, required: true }
    }

    pub fn seed(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: InputKind::Seed { default: 0 }, required: true }
    }

    pub fn flag(name: impl Into<String>, default: bool) -> Self {
        Self { name: name.into(), kind: InputKind::Bool { default }, required: true }
    }

    pub fn choice(name: impl Into<String>, options: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Choice { options: options.iter().map(|s| s.to_string()).collect() },
            required: true,
        }
    }

    pub fn text(name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Text { placeholder: placeholder.into(), multiline: true },
            required: true,
        }
    }

    /// Mark the field optional (host may omit it)
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// One typed output field of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub name: String,
    pub kind: OutputKind,
}

impl OutputSpec {
    pub fn new(name: impl Into<String>, kind: OutputKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// Registration metadata for one node variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Registry name (e.g. "SamplerLoop")
    pub name: String,
    /// Human-facing name (e.g. "Sampler Loop")
    pub display_name: String,
    /// Host menu category (e.g. "Samplers/Loop")
    pub category: String,
    /// Ordered input fields
    pub inputs: Vec<InputSpec>,
    /// Ordered output fields; order matches the combination label
    pub outputs: Vec<OutputSpec>,
}

impl NodeDescriptor {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            category: category.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: InputSpec) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_output(mut self, output: OutputSpec) -> Self {
        self.outputs.push(output);
        self
    }
}
