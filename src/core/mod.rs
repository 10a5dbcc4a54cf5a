pub mod rules;
pub mod validator;

pub use crate::domain::model::{RegistrationRequest, ValidationResult, Violation};
pub use crate::domain::ports::{ConfigProvider, EventSink, Rule};
pub use crate::utils::error::Result;
