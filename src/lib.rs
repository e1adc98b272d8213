//! Sweepr - stateful parameter-sweep loop nodes for node-graph hosts
//!
//! Sweepr provides "loop" generator nodes that, on each invocation by a host
//! graph engine, return the current point in an ordered parameter space
//! (numeric ranges, categorical name sets, or Cartesian products of both) and
//! advance their internal state so the next invocation moves on. Traversal can
//! be sequential, seeded-random, or ping-pong, with an explicit reset contract.

pub mod config;
pub mod error;
pub mod node;
pub mod sweep;

pub use error::{Result, SweeprError};
