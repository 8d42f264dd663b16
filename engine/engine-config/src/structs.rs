//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use std::fmt;
use std::str::FromStr;

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_budget() -> Budget {
    defaults::budget()
}
fn d_exploration_constant() -> f64 {
    defaults::exploration_constant()
}
fn d_planned_iterations() -> u32 {
    defaults::planned_iterations()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub search: SearchConfig,
}

/// When a search stops.
///
/// Written in TOML as `budget = { time_ms = 1000 }` or
/// `budget = { iterations = 500 }`, and in environment variables as
/// `time_ms:1000` or `iterations:500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    /// Wall-clock milliseconds per decision.
    TimeMs(u64),
    /// Exact number of search iterations per decision.
    Iterations(u32),
}

/// Error returned when a budget string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid budget {0:?}, expected time_ms:<n> or iterations:<n>")]
pub struct ParseBudgetError(String);

impl FromStr for Budget {
    type Err = ParseBudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseBudgetError(s.to_string());
        let (kind, value) = s.split_once(':').ok_or_else(err)?;
        match kind.trim() {
            "time_ms" => value.trim().parse().map(Budget::TimeMs).map_err(|_| err()),
            "iterations" => value
                .trim()
                .parse()
                .map(Budget::Iterations)
                .map_err(|_| err()),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::TimeMs(ms) => write!(f, "time_ms:{ms}"),
            Budget::Iterations(n) => write!(f, "iterations:{n}"),
        }
    }
}

/// Monte Carlo search configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "d_budget")]
    pub budget: Budget,
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f64,
    /// Iterations the node arena is sized for under a time budget.
    #[serde(default = "d_planned_iterations")]
    pub planned_iterations: u32,
    /// Fixed RNG seed for reproducible searches (None = seed from entropy)
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            budget: defaults::budget(),
            exploration_constant: defaults::exploration_constant(),
            planned_iterations: defaults::planned_iterations(),
            seed: defaults::seed(),
        }
    }
}
