//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared by
//! every component that runs a search.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`PLAYOUT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (`config.defaults.toml`, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! PLAYOUT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     PLAYOUT_SEARCH_BUDGET=iterations:500
//!     PLAYOUT_SEARCH_BUDGET=time_ms:250
//!     PLAYOUT_SEARCH_EXPLORATION_CONSTANT=1.2
//!     PLAYOUT_SEARCH_SEED=7
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
