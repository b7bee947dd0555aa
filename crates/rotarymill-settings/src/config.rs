//! Job configuration for RotaryMill
//!
//! Provides job file handling and validation.
//! Supports JSON and TOML file formats, chosen by file extension.
//!
//! A job file is organized into:
//! - Machine settings (feed rates, safe retract location)
//! - The job itself (rotary surfacing, fixture trim or a literal script)

use crate::error::{SettingsError, SettingsResult};
use rotarymill_camtools::{
    FixtureTrimGenerator, FixtureTrimParameters, ProgramScript, RotarySurfacingGenerator,
    RotarySurfacingParameters,
};
use rotarymill_core::{Coordinates, EndMill, FeedRates, Stock};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Machine settings shared by every job kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Cutting feed rate in units/min
    pub standard_feed: f64,
    /// Traverse feed rate in units/min
    pub rapid_feed: f64,
    /// Retract position used before and after cutting
    pub safe_location: Coordinates,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            standard_feed: 500.0,
            rapid_feed: 800.0,
            safe_location: Coordinates::new(0.0, 0.0, 10.0),
        }
    }
}

impl MachineSettings {
    pub fn feed_rates(&self) -> FeedRates {
        FeedRates::new(self.standard_feed, self.rapid_feed)
    }
}

/// Job to generate, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobKind {
    RotarySurfacing(RotarySurfacingParameters),
    FixtureTrim(FixtureTrimParameters),
    Script(ProgramScript),
}

/// Complete job configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Optional job name, used for script output files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Machine settings
    #[serde(default)]
    pub machine: MachineSettings,
    /// Job parameters
    pub job: JobKind,
}

impl JobConfig {
    pub fn new(machine: MachineSettings, job: JobKind) -> Self {
        Self {
            name: None,
            machine,
            job,
        }
    }

    /// Rotary surfacing of 28.8 mm stock with a 6 mm end mill
    pub fn sample() -> Self {
        Self {
            name: Some("rotary-surfacing".to_string()),
            machine: MachineSettings::default(),
            job: JobKind::RotarySurfacing(RotarySurfacingParameters {
                stock: Stock::new(28.8, 1.0),
                tool: EndMill::new(6.0),
                target_depth: -5.0,
                max_step_down: 2.0,
            }),
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        debug!("Loaded job config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate machine settings
    ///
    /// Job geometry is not checked here; degenerate dimensions just produce
    /// a program without cutting passes.
    pub fn validate(&self) -> SettingsResult<()> {
        let rates = [
            ("machine.standard_feed", self.machine.standard_feed),
            ("machine.rapid_feed", self.machine.rapid_feed),
        ];
        for (key, value) in rates {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::InvalidSetting {
                    key: key.to_string(),
                    reason: format!("feed rate must be > 0, got {}", value),
                });
            }
        }

        if !self.machine.safe_location.is_finite() {
            return Err(SettingsError::InvalidSetting {
                key: "machine.safe_location".to_string(),
                reason: "coordinates must be finite".to_string(),
            });
        }

        Ok(())
    }

    /// Name of the `.nc` file this job is written to
    pub fn output_file_name(&self) -> String {
        match &self.job {
            JobKind::RotarySurfacing(params) => {
                RotarySurfacingGenerator::new(params.clone()).output_file_name()
            }
            JobKind::FixtureTrim(params) => {
                FixtureTrimGenerator::new(params.clone()).output_file_name()
            }
            JobKind::Script(_) => {
                format!("{}.nc", self.name.as_deref().unwrap_or("program"))
            }
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(format!(
                "{} (config file must be .json or .toml)",
                other.unwrap_or("no extension")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotarymill_camtools::ScriptStep;
    use rotarymill_core::{Fixture, PartialPosition};

    #[test]
    fn test_sample_is_valid() {
        assert!(JobConfig::sample().validate().is_ok());
        assert_eq!(
            JobConfig::sample().output_file_name(),
            "stock_thickness-28.8_length-1_depth--5_step-2.nc"
        );
    }

    #[test]
    fn test_rejects_non_positive_feed() {
        let mut config = JobConfig::sample();
        config.machine.rapid_feed = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidSetting { ref key, .. } if key == "machine.rapid_feed"
        ));
    }

    #[test]
    fn test_rejects_non_finite_safe_location() {
        let mut config = JobConfig::sample();
        config.machine.safe_location.z = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rotary_surfacing_from_toml() {
        let text = r#"
            [machine]
            standard_feed = 35.0
            rapid_feed = 800.0
            safe_location = { x = 85.0, y = 85.0, z = 5.0 }

            [job]
            kind = "rotary_surfacing"
            target_depth = -5.0
            max_step_down = 2.0
            stock = { diameter = 28.8, length = 1.0 }
            tool = { diameter = 6.0 }
        "#;
        let config: JobConfig = toml::from_str(text).unwrap();
        assert_eq!(config.machine.feed_rates(), FeedRates::new(35.0, 800.0));
        assert_eq!(config.job, JobConfig::sample().job);
    }

    #[test]
    fn test_fixture_trim_defaults() {
        let text = r#"
            [job]
            kind = "fixture_trim"
            desired_head_width = 12.6
            fixture = { head_diameter = 13.85, head_thickness = 2.75, shaft_diameter = 8.15 }
            tool = { diameter = 6.0 }
        "#;
        let config: JobConfig = toml::from_str(text).unwrap();
        assert_eq!(config.machine, MachineSettings::default());
        assert_eq!(
            config.job,
            JobKind::FixtureTrim(FixtureTrimParameters::new(
                Fixture::new(13.85, 2.75, 8.15),
                EndMill::new(6.0),
                12.6
            ))
        );
        assert_eq!(config.output_file_name(), "fixture_head-13.85_width-12.6.nc");
    }

    #[test]
    fn test_script_from_json() {
        let text = r#"{
            "name": "facing",
            "job": {
                "kind": "script",
                "steps": [
                    { "kind": "safe_height" },
                    { "kind": "rapid", "x": 1.0, "y": 2.0 }
                ]
            }
        }"#;
        let config: JobConfig = serde_json::from_str(text).unwrap();
        assert_eq!(
            config.job,
            JobKind::Script(ProgramScript::new(vec![
                ScriptStep::SafeHeight,
                ScriptStep::Rapid {
                    position: PartialPosition::xy(1.0, 2.0),
                    comment: None,
                },
            ]))
        );
        assert_eq!(config.output_file_name(), "facing.nc");
    }
}
