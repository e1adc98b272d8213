//! Combination space
//!
//! The ordered Cartesian product of one or more dimensions. Combinations are
//! never materialized eagerly; `combo()` reconstructs the tuple for a flat
//! index via mixed-radix decomposition. The first-listed dimension varies
//! slowest (outer loop), the last-listed varies fastest (inner loop).

use serde::Serialize;

/// Default number of decimals when rendering float values in labels
pub const DEFAULT_FLOAT_DECIMALS: usize = 2;

/// Label emitted for an index into a size-0 space
pub const EMPTY_SPACE_LABEL: &str = "no combinations available";

/// A single value drawn from one dimension of the space
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SweepValue {
    Int(i64),
    Float(f64),
    Name(String),
}

impl SweepValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SweepValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SweepValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            SweepValue::Name(s) => Some(s),
            _ => None,
        }
    }
}

/// The ordered values making up one dimension
#[derive(Debug, Clone, PartialEq)]
enum DimValues {
    Floats(Vec<f64>),
    Ints(Vec<i64>),
    Names(Vec<String>),
}

/// One named, ordered dimension of a combination space
#[derive(Debug, Clone, PartialEq)]
pub struct Dim {
    key: String,
    values: DimValues,
}

impl Dim {
    /// A float-valued dimension
    pub fn floats(key: impl Into<String>, values: Vec<f64>) -> Self {
        Self { key: key.into(), values: DimValues::Floats(values) }
    }

    /// An integer-valued dimension
    pub fn ints(key: impl Into<String>, values: Vec<i64>) -> Self {
        Self { key: key.into(), values: DimValues::Ints(values) }
    }

    /// A categorical dimension of opaque names
    pub fn names(key: impl Into<String>, values: Vec<String>) -> Self {
        Self { key: key.into(), values: DimValues::Names(values) }
    }

    /// Field name this dimension maps to in outputs and labels
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        match &self.values {
            DimValues::Floats(v) => v.len(),
            DimValues::Ints(v) => v.len(),
            DimValues::Names(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `index`; callers guarantee `index < len()`
    fn value_at(&self, index: usize) -> SweepValue {
        match &self.values {
            DimValues::Floats(v) => SweepValue::Float(v[index]),
            DimValues::Ints(v) => SweepValue::Int(v[index]),
            DimValues::Names(v) => SweepValue::Name(v[index].clone()),
        }
    }
}

/// The ordered Cartesian product of a list of dimensions
#[derive(Debug, Clone)]
pub struct CombinationSpace {
    dims: Vec<Dim>,
    float_decimals: usize,
}

impl CombinationSpace {
    pub fn new(dims: Vec<Dim>) -> Self {
        Self { dims, float_decimals: DEFAULT_FLOAT_DECIMALS }
    }

    /// Set the number of decimals used for float values in labels
    pub fn with_float_decimals(mut self, decimals: usize) -> Self {
        self.float_decimals = decimals;
        self
    }

    /// Total number of combinations; 0 if any dimension is empty
    pub fn size(&self) -> usize {
        self.dims.iter().map(Dim::len).product()
    }

    /// Reconstruct the combination tuple at a flat index.
    ///
    /// Mixed-radix decomposition: the first-listed dimension varies slowest.
    /// The index is reduced modulo `size()`; a size-0 space yields an empty
    /// tuple.
    pub fn combo(&self, index: usize) -> Vec<SweepValue> {
        let size = self.size();
        if size == 0 {
            return Vec::new();
        }

        let mut remaining = index % size;
        let mut values = vec![SweepValue::Int(0); self.dims.len()];
        for (slot, dim) in self.dims.iter().enumerate().rev() {
            values[slot] = dim.value_at(remaining % dim.len());
            remaining /= dim.len();
        }
        values
    }

    /// Human-readable rendering of a combination tuple.
    ///
    /// `key=value` pairs joined by `", "`, in dimension order. An empty tuple
    /// (size-0 space) renders as [`EMPTY_SPACE_LABEL`].
    pub fn label(&self, combo: &[SweepValue]) -> String {
        if combo.is_empty() {
            return EMPTY_SPACE_LABEL.to_string();
        }

        self.dims
            .iter()
            .zip(combo)
            .map(|(dim, value)| format!("{}={}", dim.key(), self.format_value(value)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Convenience: label of the combination at a flat index
    pub fn label_at(&self, index: usize) -> String {
        self.label(&self.combo(index))
    }

    fn format_value(&self, value: &SweepValue) -> String {
        match value {
            SweepValue::Int(v) => v.to_string(),
            SweepValue::Float(v) => format!("{:.*}", self.float_decimals, v),
            SweepValue::Name(s) => s.clone(),
        }
    }
}
