use std::path::Path;

use crate::error::CoreError;

/// Main simulator configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EnvConfig {
    /// Account configuration
    #[serde(default)]
    pub account: AccountConfig,
    /// Instrument constants (pip/point size, lot bounds)
    #[serde(default)]
    pub instrument: InstrumentConfig,
    /// Feature pipeline parameters
    #[serde(default)]
    pub features: FeatureConfig,
    /// Draw a random start offset on reset
    #[serde(default)]
    pub random_start: bool,
    /// Steps of runway reserved after a random start
    #[serde(default = "default_min_runway")]
    pub min_runway: usize,
    /// RNG seed for start offsets (entropy-seeded when absent)
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_min_runway() -> usize {
    100
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            account: AccountConfig::default(),
            instrument: InstrumentConfig::default(),
            features: FeatureConfig::default(),
            random_start: false,
            min_runway: default_min_runway(),
            rng_seed: None,
        }
    }
}

impl EnvConfig {
    /// Parses a JSON config; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`CoreError::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a YAML config; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`CoreError::Yaml`] on malformed input.
    pub fn from_yaml(yaml: &str) -> Result<Self, CoreError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a YAML config file.
    ///
    /// # Errors
    /// Returns [`CoreError::Io`] if the file cannot be read, or a parse error.
    pub fn load_yaml(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let account = &self.account;
        if !(account.initial_balance.is_finite() && account.initial_balance > 0.0) {
            return Err(CoreError::Config(
                "account.initial_balance must be > 0".to_string(),
            ));
        }
        if !(account.balance_per_lot.is_finite() && account.balance_per_lot > 0.0) {
            return Err(CoreError::Config(
                "account.balance_per_lot must be > 0".to_string(),
            ));
        }
        if !(account.max_drawdown > 0.0 && account.max_drawdown <= 1.0) {
            return Err(CoreError::Config(
                "account.max_drawdown must be in (0, 1]".to_string(),
            ));
        }

        let instrument = &self.instrument;
        if instrument.pip_size <= 0.0 {
            return Err(CoreError::Config(
                "instrument.pip_size must be > 0".to_string(),
            ));
        }
        if instrument.point_value < 0.0 {
            return Err(CoreError::Config(
                "instrument.point_value must be >= 0".to_string(),
            ));
        }
        if instrument.min_lots <= 0.0 || instrument.max_lots < instrument.min_lots {
            return Err(CoreError::Config(format!(
                "instrument lot bounds invalid: min_lots={}, max_lots={}",
                instrument.min_lots, instrument.max_lots
            )));
        }

        let features = &self.features;
        if features.atr_period == 0 || features.rsi_period == 0 || features.bollinger_period == 0
        {
            return Err(CoreError::Config(
                "feature periods must be > 0".to_string(),
            ));
        }
        if features.bollinger_std <= 0.0 {
            return Err(CoreError::Config(
                "features.bollinger_std must be > 0".to_string(),
            ));
        }
        if features.returns_clip <= 0.0 {
            return Err(CoreError::Config(
                "features.returns_clip must be > 0".to_string(),
            ));
        }
        if features.min_rows == 0 {
            return Err(CoreError::Config(
                "features.min_rows must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================
// SUB-CONFIGS
// ============================================

/// Account and sizing configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccountConfig {
    /// Initial account balance
    #[serde(default = "default_initial_balance")]
    pub initial_balance: f64,
    /// Balance backing one lot
    #[serde(default = "default_balance_per_lot")]
    pub balance_per_lot: f64,
    /// Drawdown fraction that terminates the episode
    #[serde(default = "default_max_drawdown")]
    pub max_drawdown: f64,
}

fn default_initial_balance() -> f64 {
    10_000.0
}
fn default_balance_per_lot() -> f64 {
    1_000.0
}
fn default_max_drawdown() -> f64 {
    0.5
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
            balance_per_lot: default_balance_per_lot(),
            max_drawdown: default_max_drawdown(),
        }
    }
}

/// Instrument constants
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InstrumentConfig {
    /// Price value of one spread point
    #[serde(default = "default_point_value")]
    pub point_value: f64,
    /// Price increment of one pip
    #[serde(default = "default_pip_size")]
    pub pip_size: f64,
    /// Smallest tradable lot size
    #[serde(default = "default_min_lots")]
    pub min_lots: f64,
    /// Largest tradable lot size
    #[serde(default = "default_max_lots")]
    pub max_lots: f64,
}

fn default_point_value() -> f64 {
    0.01
}
fn default_pip_size() -> f64 {
    0.0001
}
fn default_min_lots() -> f64 {
    0.01
}
fn default_max_lots() -> f64 {
    100.0
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            point_value: default_point_value(),
            pip_size: default_pip_size(),
            min_lots: default_min_lots(),
            max_lots: default_max_lots(),
        }
    }
}

/// Feature pipeline parameters
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeatureConfig {
    /// True-range averaging period
    #[serde(default = "default_period")]
    pub atr_period: usize,
    /// RSI averaging period
    #[serde(default = "default_period")]
    pub rsi_period: usize,
    /// Bollinger window
    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,
    /// Bollinger standard deviation factor
    #[serde(default = "default_bollinger_std")]
    pub bollinger_std: f64,
    /// Symmetric clip applied to close-over-close returns
    #[serde(default = "default_returns_clip")]
    pub returns_clip: f64,
    /// Minimum rows that must survive warm-up trimming
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,
}

fn default_period() -> usize {
    14
}
fn default_bollinger_period() -> usize {
    20
}
fn default_bollinger_std() -> f64 {
    2.0
}
fn default_returns_clip() -> f64 {
    0.1
}
fn default_min_rows() -> usize {
    100
}

impl FeatureConfig {
    /// Leading rows discarded before undefined-row filtering.
    #[must_use]
    pub fn lookback(&self) -> usize {
        self.bollinger_period.max(self.atr_period)
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            atr_period: default_period(),
            rsi_period: default_period(),
            bollinger_period: default_bollinger_period(),
            bollinger_std: default_bollinger_std(),
            returns_clip: default_returns_clip(),
            min_rows: default_min_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config = EnvConfig::from_json("{}").unwrap();
        assert_eq!(config, EnvConfig::default());
        assert_eq!(config.features.lookback(), 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = "account:\n  initial_balance: 5000\nrandom_start: true\nrng_seed: 7\n";
        let config = EnvConfig::from_yaml(yaml).unwrap();
        assert!((config.account.initial_balance - 5000.0).abs() < f64::EPSILON);
        assert!((config.account.balance_per_lot - 1000.0).abs() < f64::EPSILON);
        assert!(config.random_start);
        assert_eq!(config.rng_seed, Some(7));
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.yaml");
        std::fs::write(&path, "instrument:\n  pip_size: 0.01\n").unwrap();

        let config = EnvConfig::load_yaml(&path).unwrap();
        assert!((config.instrument.pip_size - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EnvConfig::default();
        config.account.balance_per_lot = 0.0;
        assert!(matches!(config.validate(), Err(CoreError::Config(msg)) if msg.contains("balance_per_lot")));

        let mut config = EnvConfig::default();
        config.instrument.min_lots = 5.0;
        config.instrument.max_lots = 1.0;
        assert!(config.validate().is_err());

        let mut config = EnvConfig::default();
        config.account.max_drawdown = 1.5;
        assert!(config.validate().is_err());

        let mut config = EnvConfig::default();
        config.features.rsi_period = 0;
        assert!(config.validate().is_err());
    }
}
