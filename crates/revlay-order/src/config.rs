//! Optimizer configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OrderError;

/// Default largest line count searched exhaustively.
pub const DEFAULT_EXHAUSTIVE_LIMIT: usize = 10;

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Exhaustive up to the configured limit, greedy above it.
    #[default]
    Auto,
    /// Every permutation; optimal.
    Exhaustive,
    /// Greedy construction from every start line; heuristic.
    Greedy,
}

impl Strategy {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Exhaustive => "exhaustive",
            Self::Greedy => "greedy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "exhaustive" | "exact" => Ok(Self::Exhaustive),
            "greedy" | "heuristic" => Ok(Self::Greedy),
            other => Err(OrderError::UnknownStrategy(other.to_owned())),
        }
    }
}

/// Optimizer settings, loadable from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Search strategy.
    pub strategy: Strategy,
    /// Largest line count searched exhaustively.
    pub exhaustive_limit: usize,
    /// Cap on cost evaluations per search.
    pub max_evaluations: Option<u64>,
    /// Wall-clock limit per search, in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Retry greedily when an `auto` exhaustive run cannot finish.
    pub fallback_to_greedy: bool,
    /// Split exhaustive search over threads (needs the `parallel` feature).
    pub parallel: bool,
}

impl OptimizerConfig {
    /// The configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
            max_evaluations: None,
            timeout_ms: None,
            fallback_to_greedy: true,
            parallel: false,
        }
    }
}
