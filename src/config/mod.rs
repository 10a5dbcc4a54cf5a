pub mod demo;
pub mod toml_config;

pub use toml_config::{Scenario, ScenarioConfig, ScenarioOutcome};

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "course-registration")]
#[command(about = "Validate course registrations against credit, prerequisite and schedule rules")]
pub struct CliConfig {
    /// TOML scenario file; the built-in demonstration runs when omitted
    #[arg(long)]
    pub scenario: Option<String>,

    /// Maximum credits a student may carry (overrides the scenario policy)
    #[arg(long)]
    pub max_credits: Option<u32>,

    #[arg(long, help = "Print outcomes as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit log lines as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// The flag wins over the scenario file's policy.
    pub fn effective_max_credits(&self, scenarios: &ScenarioConfig) -> u32 {
        self.max_credits
            .unwrap_or_else(|| scenarios.max_credits())
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.scenario {
            validate_path("--scenario", path)?;
        }
        if let Some(max) = self.max_credits {
            validate_positive_number("--max-credits", max, 1)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_runs_demo_with_default_limit() {
        let config = CliConfig::try_parse_from(["course-registration"]).unwrap();
        assert!(config.scenario.is_none());
        assert_eq!(config.max_credits, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_credits_flag_overrides_policy() {
        let scenarios = demo::demo_config().unwrap();
        let config =
            CliConfig::try_parse_from(["course-registration", "--max-credits", "30"]).unwrap();
        assert_eq!(config.effective_max_credits(&scenarios), 30);

        let config = CliConfig::try_parse_from(["course-registration"]).unwrap();
        assert_eq!(config.effective_max_credits(&scenarios), 24);
    }

    #[test]
    fn test_zero_max_credits_is_invalid() {
        let config =
            CliConfig::try_parse_from(["course-registration", "--max-credits", "0"]).unwrap();
        assert!(config.validate().is_err());
    }
}
