use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    AdvisorErr, Result,
    recommend::{Advisor, DEFAULT_BAUD_CANDIDATES, LengthSearch},
    training::{FitConfig, LogisticTrainer, SplitConfig},
};

/// Everything needed to go from a transmission log to a recommendation.
///
/// Every field is optional in the JSON form and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub fit: FitConfig,
    pub split: SplitConfig,
    /// Baud rates considered when recommending by length, in scan order.
    pub candidates: Vec<u32>,
    pub search: LengthSearch,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            fit: FitConfig::default(),
            split: SplitConfig::default(),
            candidates: DEFAULT_BAUD_CANDIDATES.to_vec(),
            search: LengthSearch::default(),
        }
    }
}

impl AdvisorConfig {
    /// Loads and validates a config from a JSON file.
    ///
    /// # Errors
    /// `Io` if the file can't be read, `InvalidConfig` if it doesn't parse or validate.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|e| match e {
            AdvisorErr::InvalidConfig(msg) => {
                AdvisorErr::InvalidConfig(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parses and validates a config from a JSON string.
    ///
    /// # Errors
    /// `InvalidConfig` if it doesn't parse or validate.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| AdvisorErr::InvalidConfig(format!("invalid JSON: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// `InvalidConfig` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.fit.validate()?;
        self.split.validate()?;

        if self.candidates.is_empty() {
            return Err(AdvisorErr::InvalidConfig(
                "candidates must not be empty".into(),
            ));
        }

        if self.candidates.contains(&0) {
            return Err(AdvisorErr::InvalidConfig(
                "candidates must be positive baud rates".into(),
            ));
        }

        self.search
            .validate()
            .map_err(|e| AdvisorErr::InvalidConfig(format!("search: {e}")))
    }

    pub fn trainer(&self) -> Result<LogisticTrainer> {
        LogisticTrainer::new(self.fit)
    }

    pub fn advisor(&self) -> Advisor {
        Advisor::new(self.candidates.clone(), self.search)
    }
}
