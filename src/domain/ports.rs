use crate::domain::model::{RegistrationRequest, Violation};
use tracing::Level;

/// One independent registration check.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns at most one violation carrying everything this rule found.
    fn check(&self, request: &RegistrationRequest) -> Option<Violation>;
}

/// Receives leveled messages produced while validating.
pub trait EventSink: Send + Sync {
    fn emit(&self, level: Level, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn max_credits(&self) -> u32;
}
