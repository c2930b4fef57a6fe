use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{TriestError, Result};

/// Estimator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriestConfig {
    pub memory_size: usize, // Maximum number of sampled edges (M)
    pub seed: Option<u64>,  // Fixed RNG seed, entropy when absent
}

impl Default for TriestConfig {
    fn default() -> Self {
        Self {
            memory_size: 5000,
            seed: None,
        }
    }
}

impl TriestConfig {
    pub fn new(memory_size: usize) -> Self {
        Self {
            memory_size,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.memory_size == 0 {
            return Err(TriestError::invalid_parameter("memory size must be at least 1"));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Memory-size sweep configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub memory_sizes: Vec<usize>,
    pub trials: usize,
    pub seed: Option<u64>, // Trial i uses seed + i
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            memory_sizes: (500..10000).step_by(500).collect(),
            trials: 20,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.memory_sizes.is_empty() {
            return Err(TriestError::invalid_parameter("at least one memory size is required"));
        }
        if self.memory_sizes.contains(&0) {
            return Err(TriestError::invalid_parameter("memory sizes must be at least 1"));
        }
        if self.trials == 0 {
            return Err(TriestError::invalid_parameter("trial count must be at least 1"));
        }
        Ok(())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TriestConfig::default();
        assert_eq!(config.memory_size, 5000);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());

        let experiment = ExperimentConfig::default();
        assert_eq!(experiment.memory_sizes.len(), 19);
        assert_eq!(experiment.memory_sizes[0], 500);
        assert_eq!(experiment.memory_sizes[18], 9500);
        assert_eq!(experiment.trials, 20);
    }

    #[test]
    fn test_zero_memory_rejected() {
        let config = TriestConfig::new(0);
        assert!(matches!(config.validate(), Err(TriestError::InvalidParameter(_))));
    }

    #[test]
    fn test_experiment_validation() {
        let mut config = ExperimentConfig::default();
        config.trials = 0;
        assert!(config.validate().is_err());

        let config = ExperimentConfig {
            memory_sizes: vec![],
            ..ExperimentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "memory_size": 250, "seed": 9 }}"#).unwrap();

        let config = TriestConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config, TriestConfig::new(250).with_seed(9));
    }

    #[test]
    fn test_load_partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "trials": 3 }}"#).unwrap();

        let config = ExperimentConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.trials, 3);
        assert_eq!(config.memory_sizes, ExperimentConfig::default().memory_sizes);
    }

    #[test]
    fn test_invalid_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "memory_size": 0 }}"#).unwrap();
        assert!(TriestConfig::from_json_file(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            TriestConfig::from_json_file(file.path()),
            Err(TriestError::Serialization(_))
        ));
    }
}
