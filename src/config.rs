//! Run-time configuration of the object-selection pipeline
//!
//! Thresholds are read once at startup, validated, and never change
//! mid-run. The per-object working-point tables themselves are code
//! constants selected by the era; the configuration picks the era and
//! the angular-distance thresholds, and may override a few common
//! kinematic cuts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::select::{ConfigError, Era};

/// Angular-distance thresholds of the gen matcher
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GenMatchConfig {
    pub lepton_delta_r: f64,
    pub had_tau_delta_r: f64,
    pub jet_delta_r: f64,
}

impl Default for GenMatchConfig {
    fn default() -> Self {
        Self {
            lepton_delta_r: 0.3,
            had_tau_delta_r: 0.3,
            jet_delta_r: 0.5,
        }
    }
}

/// Angular-distance thresholds of the overlap removal
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CleaningConfig {
    pub electron_delta_r: f64,
    pub had_tau_delta_r: f64,
    pub jet_delta_r: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            electron_delta_r: 0.3,
            had_tau_delta_r: 0.3,
            jet_delta_r: 0.4,
        }
    }
}

/// Optional overrides of the jet kinematic cuts
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq,
)]
#[serde(default)]
pub struct JetConfig {
    pub min_pt: Option<f64>,
    pub max_abs_eta: Option<f64>,
}

/// Optional overrides of the hadronic-tau cuts
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq,
)]
#[serde(default)]
pub struct HadTauConfig {
    pub min_pt: Option<f64>,
    /// Raise the identification working point of every tier to at
    /// least this value
    pub min_id_mva: Option<i32>,
}

/// Complete pipeline configuration
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    pub era: String,
    pub gen_match: GenMatchConfig,
    pub cleaning: CleaningConfig,
    pub jets: JetConfig,
    pub had_taus: HadTauConfig,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            era: Era::Era2017.to_string(),
            gen_match: Default::default(),
            cleaning: Default::default(),
            jets: Default::default(),
            had_taus: Default::default(),
        }
    }
}

impl SelectionConfig {
    pub fn for_era(era: Era) -> Self {
        Self {
            era: era.to_string(),
            ..Default::default()
        }
    }

    /// Read and validate a configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigReadError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// The configured data-taking era
    pub fn era(&self) -> Result<Era, ConfigError> {
        Era::from_str(&self.era)
            .map_err(|_| ConfigError::UnknownEra(self.era.clone()))
    }

    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.era()?;
        check_threshold("gen_match.lepton_delta_r", self.gen_match.lepton_delta_r)?;
        check_threshold("gen_match.had_tau_delta_r", self.gen_match.had_tau_delta_r)?;
        check_threshold("gen_match.jet_delta_r", self.gen_match.jet_delta_r)?;
        check_threshold("cleaning.electron_delta_r", self.cleaning.electron_delta_r)?;
        check_threshold("cleaning.had_tau_delta_r", self.cleaning.had_tau_delta_r)?;
        check_threshold("cleaning.jet_delta_r", self.cleaning.jet_delta_r)?;
        if let Some(min_pt) = self.jets.min_pt {
            check_threshold("jets.min_pt", min_pt)?;
        }
        if let Some(max_abs_eta) = self.jets.max_abs_eta {
            check_threshold("jets.max_abs_eta", max_abs_eta)?;
        }
        if let Some(min_pt) = self.had_taus.min_pt {
            check_threshold("had_taus.min_pt", min_pt)?;
        }
        Ok(())
    }
}

fn check_threshold(
    name: &'static str,
    value: f64,
) -> Result<(), ConfigError> {
    if value < 0. {
        Err(ConfigError::NegativeThreshold { name, value })
    } else {
        Ok(())
    }
}

/// Failure to read a configuration
#[derive(Debug, Error)]
pub enum ConfigReadError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SelectionConfig::default();
        assert_eq!(config.era().unwrap(), Era::Era2017);
        assert_eq!(config.gen_match.jet_delta_r, 0.5);
        assert_eq!(config.cleaning.jet_delta_r, 0.4);
        config.validate().unwrap();
    }

    #[test]
    fn yaml_round_trip() {
        let yaml = r#"
era: "2016"
gen_match:
  jet_delta_r: 0.4
cleaning:
  jet_delta_r: 0.5
jets:
  min_pt: 30.0
"#;
        let config = SelectionConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.era().unwrap(), Era::Era2016);
        assert_eq!(config.gen_match.jet_delta_r, 0.4);
        // unset fields keep their defaults
        assert_eq!(config.gen_match.lepton_delta_r, 0.3);
        assert_eq!(config.cleaning.jet_delta_r, 0.5);
        assert_eq!(config.jets.min_pt, Some(30.));
        assert_eq!(config.had_taus.min_pt, None);

        let reparsed = SelectionConfig::from_yaml(
            &serde_yaml::to_string(&config).unwrap(),
        )
        .unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn unknown_era_is_rejected() {
        let result = SelectionConfig::from_yaml("era: \"1999\"");
        assert!(matches!(
            result,
            Err(ConfigReadError::Invalid(ConfigError::UnknownEra(_)))
        ));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let yaml = "gen_match:\n  jet_delta_r: -0.5\n";
        let result = SelectionConfig::from_yaml(yaml);
        assert!(matches!(
            result,
            Err(ConfigReadError::Invalid(
                ConfigError::NegativeThreshold { .. }
            ))
        ));
    }
}
