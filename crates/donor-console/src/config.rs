use std::path::{Path, PathBuf};
use std::time::Duration;

use donor_export::SimulatedExporter;
use donor_segments::{SavedSegment, TriggerRegistry, TriggerRule, TriggerTranslator};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::ConsoleError;
use crate::session::Session;

const DEFAULT_EXPORT_DELAY_MS: u64 = 1500;

/// Startup settings, read from `DONOR_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// JSON array of extra trigger rules merged over the built-ins.
    pub rules_path: Option<PathBuf>,
    /// JSON array of saved segments to seed the translator with.
    pub segments_path: Option<PathBuf>,
    pub export_delay: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            rules_path: None,
            segments_path: None,
            export_delay: Duration::from_millis(DEFAULT_EXPORT_DELAY_MS),
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConsoleError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConsoleError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let export_delay = match var("DONOR_EXPORT_DELAY_MS") {
            Some(raw) => {
                let ms = raw.trim().parse().map_err(|_| ConsoleError::Setting {
                    name: "DONOR_EXPORT_DELAY_MS",
                    value: raw.clone(),
                })?;
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_EXPORT_DELAY_MS),
        };

        Ok(Self {
            rules_path: var("DONOR_RULES_PATH").map(PathBuf::from),
            segments_path: var("DONOR_SEGMENTS_PATH").map(PathBuf::from),
            export_delay,
        })
    }

    pub fn load_rules(&self) -> Result<Vec<TriggerRule>, ConsoleError> {
        match &self.rules_path {
            Some(path) => read_json(path),
            None => Ok(Vec::new()),
        }
    }

    pub fn load_segments(&self) -> Result<Vec<SavedSegment>, ConsoleError> {
        match &self.segments_path {
            Some(path) => read_json(path),
            None => Ok(Vec::new()),
        }
    }

    /// Built-in rules plus configured overrides, seeded with saved segments.
    pub fn translator(&self) -> Result<TriggerTranslator, ConsoleError> {
        let mut registry = TriggerRegistry::builtin();
        let merged = registry.merge(self.load_rules()?)?;

        let mut translator = TriggerTranslator::new(registry);
        let segments = self.load_segments()?;
        let seeded = segments.len();
        for segment in segments {
            translator.register_segment(segment);
        }

        info!(
            rules = translator.registry().len(),
            merged,
            segments = seeded,
            "trigger translator ready"
        );
        Ok(translator)
    }

    pub fn session(&self) -> Result<Session, ConsoleError> {
        let exporter = SimulatedExporter::new(self.export_delay);
        Ok(Session::new(self.translator()?, Box::new(exporter)))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConsoleError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConsoleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConsoleError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = ConsoleConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.export_delay, Duration::from_millis(1500));
    }

    #[test]
    fn reads_paths_and_delay() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            ("DONOR_RULES_PATH", "/etc/donor/rules.json"),
            ("DONOR_SEGMENTS_PATH", " "),
            ("DONOR_EXPORT_DELAY_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.rules_path, Some(PathBuf::from("/etc/donor/rules.json")));
        assert_eq!(config.segments_path, None);
        assert_eq!(config.export_delay, Duration::ZERO);
    }

    #[test]
    fn rejects_bad_delay() {
        let err = ConsoleConfig::from_lookup(lookup(&[("DONOR_EXPORT_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Setting { .. }));
    }

    #[test]
    fn missing_rules_file_is_an_error() {
        let config = ConsoleConfig {
            rules_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..ConsoleConfig::default()
        };
        assert!(matches!(config.load_rules(), Err(ConsoleError::Read { .. })));
    }
}
