//! MCTS configuration parameters.

use std::time::Duration;

use engine_config::{Budget, SearchConfig};

/// When a search stops. Checked between iterations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Keep iterating until this much wall-clock time has passed.
    Time(Duration),
    /// Run exactly this many iterations.
    Iterations(u32),
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Termination rule for each decision.
    pub budget: SearchBudget,

    /// Exploration constant C in the UCT formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration_constant: f32,

    /// Iterations the node arena is sized for under a time budget.
    /// Ignored for iteration budgets, which size the arena exactly.
    pub planned_iterations: u32,

    /// Seed for the rollout RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    /// Built-in defaults from `config.defaults.toml`.
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for MctsConfig {
    fn from(config: &SearchConfig) -> Self {
        let budget = match config.budget {
            Budget::TimeMs(ms) => SearchBudget::Time(Duration::from_millis(ms)),
            Budget::Iterations(n) => SearchBudget::Iterations(n),
        };
        Self {
            budget,
            exploration_constant: config.exploration_constant as f32,
            planned_iterations: config.planned_iterations,
            seed: config.seed,
        }
    }
}

impl MctsConfig {
    /// Load from config.toml and environment overrides.
    pub fn load() -> Self {
        Self::from(&engine_config::load_config().search)
    }

    /// Create a fast, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            budget: SearchBudget::Iterations(200),
            exploration_constant: 1.5,
            planned_iterations: 200,
            seed: Some(42),
        }
    }

    /// Builder pattern: run a fixed number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.budget = SearchBudget::Iterations(n);
        self
    }

    /// Builder pattern: search for a fixed amount of time.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.budget = SearchBudget::Time(limit);
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f32) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the arena sizing for time budgets.
    pub fn with_planned_iterations(mut self, n: u32) -> Self {
        self.planned_iterations = n;
        self
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of iterations the arena must be able to hold.
    pub fn capacity_iterations(&self) -> u32 {
        match self.budget {
            SearchBudget::Iterations(n) => n,
            SearchBudget::Time(_) => self.planned_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.budget, SearchBudget::Time(Duration::from_secs(1)));
        assert!((config.exploration_constant - 1.5).abs() < 1e-6);
        assert_eq!(config.planned_iterations, 3200);
        assert_eq!(config.seed, None);
        assert_eq!(config.capacity_iterations(), 3200);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_exploration_constant(0.5)
            .with_seed(9);

        assert_eq!(config.budget, SearchBudget::Iterations(100));
        assert!((config.exploration_constant - 0.5).abs() < 1e-6);
        assert_eq!(config.seed, Some(9));
        // Iteration budgets size the arena themselves
        assert_eq!(config.capacity_iterations(), 100);
    }

    #[test]
    fn test_time_budget_uses_planned_iterations() {
        let config = MctsConfig::for_testing()
            .with_time_limit(Duration::from_millis(5))
            .with_planned_iterations(64);
        assert_eq!(config.capacity_iterations(), 64);
    }

    #[test]
    fn test_from_search_config() {
        let search = SearchConfig {
            budget: Budget::Iterations(12),
            exploration_constant: 0.25,
            planned_iterations: 10,
            seed: Some(3),
        };

        let config = MctsConfig::from(&search);
        assert_eq!(config.budget, SearchBudget::Iterations(12));
        assert!((config.exploration_constant - 0.25).abs() < 1e-6);
        assert_eq!(config.planned_iterations, 10);
        assert_eq!(config.seed, Some(3));

        let search = SearchConfig {
            budget: Budget::TimeMs(250),
            ..search
        };
        assert_eq!(
            MctsConfig::from(&search).budget,
            SearchBudget::Time(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_load_reads_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[search]\nbudget = { iterations = 48 }\nexploration_constant = 0.9\nseed = 5\n",
        )
        .unwrap();

        std::env::set_var("PLAYOUT_CONFIG", &path);
        let config = MctsConfig::load();
        std::env::remove_var("PLAYOUT_CONFIG");

        assert_eq!(config.budget, SearchBudget::Iterations(48));
        assert!((config.exploration_constant - 0.9).abs() < 1e-6);
        assert_eq!(config.planned_iterations, 3200);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.capacity_iterations(), 48);
    }
}
