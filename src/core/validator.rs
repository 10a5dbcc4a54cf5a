use crate::adapters::sink::TracingSink;
use crate::core::rules::standard_rules;
use crate::core::{ConfigProvider, EventSink, RegistrationRequest, Result, Rule, ValidationResult};
use crate::utils::validation::validate_positive_number;
use std::sync::Arc;
use tracing::Level;

/// Runs every rule against a request and collects all violations.
pub struct RegistrationValidator {
    rules: Vec<Box<dyn Rule>>,
    sink: Arc<dyn EventSink>,
}

impl RegistrationValidator {
    /// Standard rule set logging through `tracing`.
    pub fn new(max_credits: u32) -> Result<Self> {
        validate_positive_number("max_credits", max_credits, 1)?;
        Ok(Self::with_rules(standard_rules(max_credits), Arc::new(TracingSink)))
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.max_credits())
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>, sink: Arc<dyn EventSink>) -> Self {
        Self { rules, sink }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn validate(&self, request: &RegistrationRequest) -> ValidationResult {
        let student = request.student();
        self.sink.emit(
            Level::INFO,
            &format!(
                "Validating registration for {}: {} course(s) requested, {} enrolled credits",
                student.id(),
                request.requested().len(),
                student.enrolled_credits()
            ),
        );

        let mut violations = Vec::new();
        for rule in &self.rules {
            match rule.check(request) {
                Some(violation) => {
                    self.sink.emit(violation.level(), &violation.to_string());
                    violations.push(violation);
                }
                None => self
                    .sink
                    .emit(Level::DEBUG, &format!("Rule {} passed", rule.name())),
            }
        }

        let result = ValidationResult::from_violations(violations);
        if result.is_accepted() {
            self.sink
                .emit(Level::INFO, &format!("Registration accepted for {}", student.id()));
        } else {
            self.sink.emit(
                Level::ERROR,
                &format!(
                    "Registration rejected for {} with {} violation(s)",
                    student.id(),
                    result.violations().len()
                ),
            );
        }

        result
    }
}
