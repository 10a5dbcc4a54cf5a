use crate::core::rules::DEFAULT_MAX_CREDITS;
use crate::core::validator::RegistrationValidator;
use crate::core::{ConfigProvider, RegistrationRequest, ValidationResult};
use crate::domain::model::{Course, StudentRecord, TimeSlot};
use crate::utils::error::{RegistrationError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_unique_codes, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub policy: Option<PolicyConfig>,
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub max_credits: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
    pub title: Option<String>,
    pub credits: u32,
    pub day: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioEntry {
    pub name: String,
    pub student: String,
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default)]
    pub enrolled: Vec<String>,
    #[serde(default)]
    pub requested: Vec<String>,
}

/// A named request ready to be validated.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub request: RegistrationRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub student: String,
    pub total_credits: u32,
    pub result: ValidationResult,
}

impl Scenario {
    pub fn run(&self, validator: &RegistrationValidator) -> ScenarioOutcome {
        ScenarioOutcome {
            scenario: self.name.clone(),
            student: self.request.student().id().to_string(),
            total_credits: self.request.total_credits(),
            result: validator.validate(&self.request),
        }
    }
}

impl CatalogEntry {
    fn to_course(&self) -> Result<Course> {
        let slot = TimeSlot::parse(&self.day, &self.start, &self.end).map_err(|e| match e {
            RegistrationError::InvalidInput { field, reason } => RegistrationError::InvalidInput {
                field: format!("catalog.{}.{}", self.code, field),
                reason,
            },
            other => other,
        })?;

        let mut course =
            Course::new(self.code.as_str(), self.credits, slot)?.with_prerequisites(&self.prerequisites)?;
        if let Some(title) = &self.title {
            course = course.with_title(title.as_str());
        }
        Ok(course)
    }
}

impl ScenarioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistrationError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RegistrationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(max) = self.policy.as_ref().and_then(|p| p.max_credits) {
            validate_positive_number("policy.max_credits", max, 1)?;
        }

        validate_unique_codes("catalog", self.catalog.iter().map(|c| c.code.trim()))?;

        if self.scenarios.is_empty() {
            return Err(RegistrationError::ConfigValidationError {
                field: "scenarios".to_string(),
                message: "At least one [[scenarios]] entry is required".to_string(),
            });
        }

        for scenario in &self.scenarios {
            validate_non_empty_string("scenarios.name", &scenario.name)?;
        }

        Ok(())
    }

    pub fn max_credits(&self) -> u32 {
        self.policy
            .as_ref()
            .and_then(|p| p.max_credits)
            .unwrap_or(DEFAULT_MAX_CREDITS)
    }

    pub fn build_catalog(&self) -> Result<HashMap<String, Course>> {
        let mut catalog = HashMap::with_capacity(self.catalog.len());
        for entry in &self.catalog {
            let course = entry.to_course()?;
            if catalog.contains_key(course.code()) {
                return Err(RegistrationError::invalid_input(
                    "catalog",
                    format!("Course '{}' appears more than once", course.code()),
                ));
            }
            catalog.insert(course.code().to_string(), course);
        }
        Ok(catalog)
    }

    /// Resolves every scenario's course codes against the catalog.
    pub fn build_scenarios(&self) -> Result<Vec<Scenario>> {
        let catalog = self.build_catalog()?;
        let lookup = |codes: &[String]| -> Result<Vec<Course>> {
            codes
                .iter()
                .map(|code| {
                    catalog
                        .get(code.trim())
                        .cloned()
                        .ok_or_else(|| RegistrationError::UnknownCourse { code: code.clone() })
                })
                .collect()
        };

        self.scenarios
            .iter()
            .map(|entry| {
                let student =
                    StudentRecord::new(entry.student.as_str(), &entry.completed, lookup(&entry.enrolled)?)?;
                let request = RegistrationRequest::new(student, lookup(&entry.requested)?)?;
                tracing::debug!("Loaded scenario '{}'", entry.name);
                Ok(Scenario {
                    name: entry.name.clone(),
                    request,
                })
            })
            .collect()
    }
}

impl ConfigProvider for ScenarioConfig {
    fn max_credits(&self) -> u32 {
        self.max_credits()
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
