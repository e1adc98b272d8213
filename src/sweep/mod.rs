//! Parameter-space construction and traversal.
//!
//! This module provides the pieces the loop nodes compose:
//! - `range`: float/int range enumeration with clamping
//! - `categorical`: skip-list parsing and name filtering with fallback
//! - `space`: ordered Cartesian products, mixed-radix indexing, labels
//! - `traversal`: sequential/random/ping-pong policies over a `LoopState`

pub mod categorical;
pub mod range;
pub mod space;
pub mod traversal;

pub use categorical::{filter_names, parse_skip_list};
pub use range::{FloatRange, IntRange};
pub use space::{CombinationSpace, Dim, SweepValue, DEFAULT_FLOAT_DECIMALS, EMPTY_SPACE_LABEL};
pub use traversal::{Direction, LoopState, Mode};
