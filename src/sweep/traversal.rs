//! Traversal state machine
//!
//! A [`LoopState`] is the persistent `(index, direction, calls)` record owned
//! by exactly one loop node instance. Each host invocation performs a single
//! read-modify-write: report the current index, then advance it under the
//! selected mode. Reset reinitializes the state and reports index 0 without
//! advancing, so the next non-reset invocation behaves as if fresh.

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SweeprError;

/// Traversal policy over an ordered combination space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Wrap-around index order
    Sequential,
    /// Uniform draw per call, reproducible for a fixed seed
    Random,
    /// Bounce between both ends: `0,1,...,N-1,N-2,...,1,0,1,...`
    PingPong,
}

impl Mode {
    /// Wire names accepted by [`FromStr`], in declaration order
    pub const WIRE_NAMES: [&'static str; 3] = ["sequential", "random", "ping_pong"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Sequential => "sequential",
            Mode::Random => "random",
            Mode::PingPong => "ping_pong",
        }
    }
}

impl FromStr for Mode {
    type Err = SweeprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Mode::Sequential),
            "random" => Ok(Mode::Random),
            "ping_pong" => Ok(Mode::PingPong),
            _ => Err(SweeprError::UnknownMode(s.to_string())),
        }
    }
}

/// Direction of travel; only meaningful in ping-pong mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Persistent per-node-instance traversal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopState {
    /// Current position in the combination space
    pub index: usize,

    /// Travel direction for ping-pong mode
    pub direction: Direction,

    /// Monotonically increasing invocation counter; derives per-call
    /// sub-seeds in random mode
    pub calls: u64,
}

impl Default for LoopState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopState {
    /// Fresh state: `index = 0`, forward, no calls recorded
    pub fn new() -> Self {
        Self { index: 0, direction: Direction::Forward, calls: 0 }
    }

    /// Reinitialize to the fresh state. Available from any state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Report the current index, then advance for the next invocation.
    ///
    /// This is the single read-modify-write a host invocation performs:
    /// - `reset` short-circuits: reinitialize and report index 0, no advance;
    /// - a size-0 space reports index 0 and leaves the state untouched;
    /// - if the space shrank since the last call, the persisted index is
    ///   reduced modulo the new size before reporting.
    pub fn select(&mut self, mode: Mode, size: usize, seed: u64, reset: bool) -> usize {
        if reset {
            self.reset();
            return 0;
        }

        if size == 0 {
            self.index = 0;
            return 0;
        }

        if self.index >= size {
            self.index %= size;
        }

        let current = self.index;
        self.advance(mode, size, seed);
        current
    }

    /// Advance the state by one step under `mode`.
    ///
    /// No-op when `size` is 0.
    pub fn advance(&mut self, mode: Mode, size: usize, seed: u64) {
        if size == 0 {
            return;
        }

        match mode {
            Mode::Sequential => {
                self.index = (self.index + 1) % size;
            }
            Mode::Random => {
                // Sub-seed per call so the draw sequence is reproducible for
                // a fixed seed without collapsing every call to one value.
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(self.calls));
                self.index = rng.random_range(0..size);
            }
            Mode::PingPong => {
                let last = size as i64 - 1;
                let step: i64 = match self.direction {
                    Direction::Forward => 1,
                    Direction::Backward => -1,
                };
                let mut next = self.index as i64 + step;
                if next >= last {
                    next = last;
                    self.direction = Direction::Backward;
                }
                if next <= 0 {
                    next = 0;
                    self.direction = Direction::Forward;
                }
                self.index = next as usize;
            }
        }

        self.calls += 1;
    }
}
