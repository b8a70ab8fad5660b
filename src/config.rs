use crate::error::Result;
use crate::patterns::SeedPattern;
use crate::rules::RuleParameters;
use crate::settings::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the grid looks when the session opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartGrid {
    #[default]
    Empty,
    Glider,
    Blinker,
    Random,
}

impl StartGrid {
    pub fn pattern(&self) -> Option<SeedPattern> {
        match self {
            StartGrid::Glider => Some(SeedPattern::Glider),
            StartGrid::Blinker => Some(SeedPattern::Blinker),
            StartGrid::Empty | StartGrid::Random => None,
        }
    }
}

/// Startup configuration, read from a JSON file.
///
/// Only describes how a session starts; nothing is ever written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    pub simulation: SimulationConfig,
    pub rules: RuleParameters,
    pub start: StartGrid,
    /// Fixed seed for randomize; entropy when absent
    pub random_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            simulation: SimulationConfig::default(),
            rules: RuleParameters::default(),
            start: StartGrid::default(),
            random_seed: None,
        }
    }
}

impl AppConfig {
    /// Import config from a JSON file. Values are range-checked later, when
    /// the controller is built from them.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use crate::settings::CellColor;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_file_load() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(
            temp_file.path(),
            r#"{
                "simulation": { "rows": 25, "cols": 30, "tick_interval_ms": 50, "live_color": "Cyan" },
                "rules": { "survive_min": 1, "survive_max": 5, "birth_count": 3 },
                "start": "glider",
                "random_seed": 99
            }"#,
        )
        .unwrap();

        let config = AppConfig::load_from_file(temp_file.path()).unwrap();

        assert_eq!(config.version, 1);
        assert_eq!(config.simulation.rows, 25);
        assert_eq!(config.simulation.cols, 30);
        assert_eq!(config.simulation.tick_interval_ms, 50);
        assert_eq!(config.simulation.live_color, CellColor::Cyan);
        // Unlisted fields fall back to defaults
        assert_eq!(config.simulation.cell_size, 2);
        assert_eq!(config.rules.survive_max, 5);
        assert_eq!(config.start, StartGrid::Glider);
        assert_eq!(config.random_seed, Some(99));
    }

    #[test]
    fn test_printed_config_loads_back() {
        let config = AppConfig {
            start: StartGrid::Random,
            random_seed: Some(3),
            ..Default::default()
        };
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), config.to_json().unwrap()).unwrap();
        assert_eq!(AppConfig::load_from_file(temp_file.path()).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "not valid json").unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(matches!(result, Err(LifeError::Serde(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load_from_file(Path::new("/nonexistent/path/config.json"));
        assert!(matches!(result, Err(LifeError::Io(_))));
    }

    #[test]
    fn test_start_grid_patterns() {
        assert_eq!(StartGrid::Blinker.pattern(), Some(SeedPattern::Blinker));
        assert_eq!(StartGrid::Random.pattern(), None);
    }
}
