pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{RecordingSink, TracingSink};
pub use config::{Scenario, ScenarioConfig, ScenarioOutcome};
pub use self::core::{rules::DEFAULT_MAX_CREDITS, validator::RegistrationValidator};
pub use domain::model::{
    Course, RegistrationRequest, StudentRecord, TimeSlot, ValidationResult, Violation, ViolationKind,
};
pub use utils::error::{RegistrationError, Result};
