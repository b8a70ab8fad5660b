use crate::error::{LifeError, Result};
use crate::rules::RuleParameters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A named Life-like rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub rules: RuleParameters,
}

impl Preset {
    pub fn new(name: impl Into<String>, description: impl Into<String>, rules: RuleParameters) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rules,
        }
    }
}

/// Built-in rules plus any the user dropped into the presets directory
pub struct PresetManager {
    /// Rules that ship with the app
    pub builtin: Vec<Preset>,
    /// User presets loaded from disk
    pub user: Vec<Preset>,
}

impl Default for PresetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetManager {
    pub fn new() -> Self {
        let mut manager = Self::builtin_only();
        if let Some(dir) = Self::presets_dir() {
            manager.load_user_presets(&dir);
        }
        manager
    }

    /// Manager without any user presets
    pub fn builtin_only() -> Self {
        let mut manager = Self {
            builtin: Vec::new(),
            user: Vec::new(),
        };
        manager.load_builtin_presets();
        manager
    }

    fn load_builtin_presets(&mut self) {
        let rule = |survive_min, survive_max, birth_count| RuleParameters {
            survive_min,
            survive_max,
            birth_count,
        };
        self.builtin = vec![
            Preset::new("Conway", "Classic Game of Life", RuleParameters::default()),
            Preset::new(
                "Life Without Death",
                "Every live cell survives; ladders and blobs",
                rule(0, 8, 3),
            ),
            Preset::new("Maze", "Grows long corridors", rule(1, 5, 3)),
            Preset::new("Mazectric", "Maze with straighter walls", rule(1, 4, 3)),
            Preset::new("Coral", "Slow, dense coral-like growth", rule(4, 8, 3)),
            Preset::new("Gnarl", "Twisting, explosive growth from one cell", rule(1, 1, 1)),
            // survive_min > survive_max: nothing survives
            Preset::new("Seeds", "Every cell lives exactly one generation", rule(1, 0, 2)),
            Preset::new(
                "Birth Zero",
                "Empty space comes alive; the grid flickers",
                rule(1, 0, 0),
            ),
        ];
    }

    /// Get the presets directory path
    fn presets_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("life-simulation").join("presets"))
    }

    /// Load every `*.json` preset in `dir`, skipping files that don't parse
    /// or hold out-of-range thresholds
    pub fn load_user_presets(&mut self, dir: &Path) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|e| e == "json") {
                continue;
            }
            match Self::load_preset(&path) {
                Ok(preset) => {
                    tracing::debug!(name = %preset.name, path = %path.display(), "loaded user preset");
                    self.user.push(preset);
                }
                Err(e) => tracing::warn!(path = %path.display(), "skipping preset: {}", e),
            }
        }
        self.user.sort_by(|a, b| a.name.cmp(&b.name));
    }

    fn load_preset(path: &Path) -> Result<Preset> {
        let content = fs::read_to_string(path)?;
        let preset: Preset = serde_json::from_str(&content)?;
        preset.rules.validate()?;
        Ok(preset)
    }

    /// Get all presets (builtin + user)
    pub fn all_presets(&self) -> impl Iterator<Item = &Preset> {
        self.builtin.iter().chain(self.user.iter())
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.user.len()
    }

    /// Preset at `index` in `all_presets` order, wrapping around
    pub fn get_wrapped(&self, index: usize) -> Option<&Preset> {
        match self.len() {
            0 => None,
            n => self.all_presets().nth(index % n),
        }
    }

    /// Find a preset by name, ignoring case
    pub fn find(&self, name: &str) -> Result<&Preset> {
        self.all_presets()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LifeError::UnknownPreset(name.to_string()))
    }

    /// Index in `all_presets` order of the first preset whose rules equal `rules`
    pub fn position_of(&self, rules: &RuleParameters) -> Option<usize> {
        self.all_presets().position(|p| &p.rules == rules)
    }

    /// Name of the first preset whose rules equal `rules`
    pub fn name_of(&self, rules: &RuleParameters) -> Option<&str> {
        self.position_of(rules)
            .and_then(|i| self.get_wrapped(i))
            .map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_presets_are_valid() {
        let manager = PresetManager::builtin_only();
        assert!(!manager.builtin.is_empty());
        for preset in manager.all_presets() {
            assert!(preset.rules.validate().is_ok(), "{}", preset.name);
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let manager = PresetManager::builtin_only();
        assert_eq!(manager.find("conway").unwrap().rules, RuleParameters::default());
        assert_eq!(manager.find("MAZE").unwrap().rules.survive_max, 5);
        assert!(matches!(manager.find("highlife"), Err(LifeError::UnknownPreset(_))));
    }

    #[test]
    fn test_name_of_and_wrapping() {
        let manager = PresetManager::builtin_only();
        assert_eq!(manager.name_of(&RuleParameters::default()), Some("Conway"));
        assert_eq!(manager.get_wrapped(manager.len()).unwrap().name, "Conway");
    }

    #[test]
    fn test_position_of_matches_list_order() {
        let manager = PresetManager::builtin_only();
        let maze = manager.find("maze").unwrap().rules;
        assert_eq!(manager.position_of(&maze), Some(2));
        assert_eq!(manager.position_of(&RuleParameters::new(8, 8, 8).unwrap()), None);
    }

    #[test]
    fn test_user_presets_loaded_and_bad_files_skipped() {
        let dir = TempDir::new().unwrap();
        let good = Preset::new("Sparse", "Test rule", RuleParameters::new(3, 4, 2).unwrap());
        fs::write(dir.path().join("sparse.json"), serde_json::to_string(&good).unwrap()).unwrap();
        fs::write(dir.path().join("broken.json"), "not valid json").unwrap();
        fs::write(
            dir.path().join("range.json"),
            r#"{"name":"Bad","description":"","rules":{"survive_min":2,"survive_max":3,"birth_count":9}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut manager = PresetManager::builtin_only();
        manager.load_user_presets(dir.path());

        assert_eq!(manager.user, vec![good]);
        assert_eq!(manager.find("sparse").unwrap().rules.birth_count, 2);
    }

    #[test]
    fn test_missing_directory_is_ignored() {
        let mut manager = PresetManager::builtin_only();
        manager.load_user_presets(Path::new("/nonexistent/presets"));
        assert!(manager.user.is_empty());
    }
}
