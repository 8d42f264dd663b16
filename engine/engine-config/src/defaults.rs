//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so every binary and test
//! agrees on the same values without shipping the file alongside.

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::structs::Budget;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    search: SearchDefaults,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    budget: Budget,
    exploration_constant: f64,
    planned_iterations: u32,
    #[serde(default)]
    seed: Option<u64>,
}

// ============================================================================
// Public accessor functions
// ============================================================================

pub fn budget() -> Budget {
    DEFAULTS.search.budget
}
pub fn exploration_constant() -> f64 {
    DEFAULTS.search.exploration_constant
}
pub fn planned_iterations() -> u32 {
    DEFAULTS.search.planned_iterations
}
pub fn seed() -> Option<u64> {
    DEFAULTS.search.seed
}
