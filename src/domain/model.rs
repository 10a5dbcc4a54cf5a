use crate::utils::error::{RegistrationError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_unique_codes};
use chrono::{NaiveTime, Weekday};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

const TIME_FORMAT: &str = "%H:%M";

/// Upper bound on a single course's credit weight.
pub const MAX_COURSE_CREDITS: u32 = 60;

/// A weekly meeting period. Two slots collide only when all three fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    day: Weekday,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    pub fn new(day: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(RegistrationError::invalid_input(
                "slot",
                format!(
                    "start {} must be before end {}",
                    start.format(TIME_FORMAT),
                    end.format(TIME_FORMAT)
                ),
            ));
        }
        Ok(Self { day, start, end })
    }

    /// Parses a day name (`Mon`, `monday`, ...) and two `HH:MM` times.
    pub fn parse(day: &str, start: &str, end: &str) -> Result<Self> {
        let day: Weekday = day
            .trim()
            .parse()
            .map_err(|_| RegistrationError::invalid_input("slot.day", format!("unknown weekday '{}'", day)))?;
        let start = parse_time("slot.start", start)?;
        let end = parse_time("slot.end", end)?;
        Self::new(day, start, end)
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|e| {
        RegistrationError::invalid_input(field, format!("'{}' is not an HH:MM time ({})", value, e))
    })
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    code: String,
    title: String,
    credits: u32,
    slot: TimeSlot,
    prerequisites: BTreeSet<String>,
}

impl Course {
    pub fn new(code: impl Into<String>, credits: u32, slot: TimeSlot) -> Result<Self> {
        let code = code.into().trim().to_string();
        validate_non_empty_string("course.code", &code)?;
        validate_range(&format!("course.credits ({})", code), credits, 1, MAX_COURSE_CREDITS)?;

        Ok(Self {
            title: code.clone(),
            code,
            credits,
            slot,
            prerequisites: BTreeSet::new(),
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        if !title.trim().is_empty() {
            self.title = title;
        }
        self
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prerequisite in prerequisites {
            let prerequisite = prerequisite.into().trim().to_string();
            validate_non_empty_string(&format!("course.prerequisites ({})", self.code), &prerequisite)?;
            if prerequisite == self.code {
                return Err(RegistrationError::invalid_input(
                    "course.prerequisites",
                    format!("{} cannot be its own prerequisite", self.code),
                ));
            }
            self.prerequisites.insert(prerequisite);
        }
        Ok(self)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn slot(&self) -> TimeSlot {
        self.slot
    }

    pub fn prerequisites(&self) -> impl Iterator<Item = &str> {
        self.prerequisites.iter().map(String::as_str)
    }
}

fn sum_credits(courses: &[Course]) -> u32 {
    courses
        .iter()
        .fold(0, |total, course| total.saturating_add(course.credits))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    id: String,
    completed: BTreeSet<String>,
    enrolled: Vec<Course>,
}

impl StudentRecord {
    pub fn new<I, S>(id: impl Into<String>, completed: I, enrolled: Vec<Course>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        validate_non_empty_string("student.id", &id)?;

        let mut completed_codes = BTreeSet::new();
        for code in completed {
            let code = code.into().trim().to_string();
            validate_non_empty_string("student.completed", &code)?;
            completed_codes.insert(code);
        }
        let completed = completed_codes;

        validate_unique_codes("student.enrolled", enrolled.iter().map(Course::code))?;

        if let Some(course) = enrolled.iter().find(|c| completed.contains(c.code())) {
            return Err(RegistrationError::invalid_input(
                "student.enrolled",
                format!("{} is both completed and currently enrolled", course.code()),
            ));
        }

        Ok(Self {
            id,
            completed,
            enrolled,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_completed(&self, code: &str) -> bool {
        self.completed.contains(code)
    }

    pub fn completed(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }

    pub fn enrolled(&self) -> &[Course] {
        &self.enrolled
    }

    /// Always derived from the enrolled list.
    pub fn enrolled_credits(&self) -> u32 {
        sum_credits(&self.enrolled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    student: StudentRecord,
    requested: Vec<Course>,
}

impl RegistrationRequest {
    pub fn new(student: StudentRecord, requested: Vec<Course>) -> Result<Self> {
        validate_unique_codes("request.courses", requested.iter().map(Course::code))?;

        if let Some(course) = requested
            .iter()
            .find(|r| student.enrolled().iter().any(|e| e.code() == r.code()))
        {
            return Err(RegistrationError::invalid_input(
                "request.courses",
                format!("{} is already enrolled", course.code()),
            ));
        }

        Ok(Self { student, requested })
    }

    pub fn student(&self) -> &StudentRecord {
        &self.student
    }

    pub fn requested(&self) -> &[Course] {
        &self.requested
    }

    pub fn requested_credits(&self) -> u32 {
        sum_credits(&self.requested)
    }

    pub fn total_credits(&self) -> u32 {
        self.student
            .enrolled_credits()
            .saturating_add(self.requested_credits())
    }

    /// Enrolled courses first, then requested ones, each in their original order.
    pub fn all_courses(&self) -> impl Iterator<Item = &Course> {
        self.student.enrolled().iter().chain(self.requested.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmetPrerequisites {
    pub course: String,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotConflict {
    pub first: String,
    pub second: String,
    pub slot: TimeSlot,
}

impl SlotConflict {
    pub fn involves(&self, code: &str) -> bool {
        self.first == code || self.second == code
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    CreditLimitExceeded,
    PrerequisiteNotMet,
    ScheduleConflict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    CreditLimitExceeded { limit: u32, total: u32, excess: u32 },
    PrerequisiteNotMet { unmet: Vec<UnmetPrerequisites> },
    ScheduleConflict { conflicts: Vec<SlotConflict> },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::CreditLimitExceeded { .. } => ViolationKind::CreditLimitExceeded,
            Self::PrerequisiteNotMet { .. } => ViolationKind::PrerequisiteNotMet,
            Self::ScheduleConflict { .. } => ViolationKind::ScheduleConflict,
        }
    }

    /// Log level the violation is reported at.
    pub fn level(&self) -> tracing::Level {
        match self {
            Self::CreditLimitExceeded { .. } => tracing::Level::WARN,
            Self::PrerequisiteNotMet { .. } | Self::ScheduleConflict { .. } => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditLimitExceeded { limit, total, excess } => write!(
                f,
                "credit limit exceeded: {} credits against a limit of {} (excess {})",
                total, limit, excess
            ),
            Self::PrerequisiteNotMet { unmet } => {
                let details: Vec<String> = unmet
                    .iter()
                    .map(|u| format!("{} requires {}", u.course, u.missing.join(", ")))
                    .collect();
                write!(f, "prerequisites not met: {}", details.join("; "))
            }
            Self::ScheduleConflict { conflicts } => {
                let details: Vec<String> = conflicts
                    .iter()
                    .map(|c| format!("{} and {} both at {}", c.first, c.second, c.slot))
                    .collect();
                write!(f, "schedule conflict: {}", details.join("; "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "violations", rename_all = "snake_case")]
pub enum ValidationResult {
    Accepted,
    Rejected(Vec<Violation>),
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self::Accepted
        } else {
            Self::Rejected(violations)
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Accepted => &[],
            Self::Rejected(violations) => violations,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected(violations) => {
                write!(f, "rejected ({} violation(s))", violations.len())?;
                for violation in violations {
                    write!(f, "\n  - {}", violation)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: &str, start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(day, start, end).unwrap()
    }

    #[test]
    fn test_time_slot_parse_and_display() {
        let s = slot("monday", "08:00", "10:00");
        assert_eq!(s.day(), Weekday::Mon);
        assert_eq!(s.to_string(), "Mon 08:00-10:00");
        assert_eq!(s, slot("Mon", "08:00", "10:00"));
    }

    #[test]
    fn test_time_slot_rejects_inverted_period() {
        assert!(TimeSlot::parse("Tue", "10:00", "08:00").is_err());
        assert!(TimeSlot::parse("Tue", "10:00", "10:00").is_err());
        assert!(TimeSlot::parse("Someday", "08:00", "10:00").is_err());
        assert!(TimeSlot::parse("Tue", "8 o'clock", "10:00").is_err());
    }

    #[test]
    fn test_course_requires_positive_credits() {
        let err = Course::new("CS101", 0, slot("Mon", "08:00", "10:00")).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidInput { .. }));
    }

    #[test]
    fn test_course_credits_are_capped() {
        let slot = slot("Mon", "08:00", "10:00");
        assert!(Course::new("CS499", MAX_COURSE_CREDITS, slot).is_ok());

        let err = Course::new("CS500", u32::MAX, slot).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidInput { .. }));
        assert!(err.to_string().contains("between 1 and 60"));
    }

    #[test]
    fn test_credit_sums_saturate() {
        let courses = vec![
            Course {
                code: "BIG1".to_string(),
                title: "BIG1".to_string(),
                credits: u32::MAX,
                slot: slot("Mon", "08:00", "10:00"),
                prerequisites: BTreeSet::new(),
            },
            Course::new("CS101", 2, slot("Tue", "08:00", "10:00")).unwrap(),
        ];
        assert_eq!(sum_credits(&courses), u32::MAX);
    }

    #[test]
    fn test_course_rejects_empty_code_and_self_prerequisite() {
        assert!(Course::new("  ", 3, slot("Mon", "08:00", "10:00")).is_err());

        let course = Course::new("CS201", 3, slot("Mon", "08:00", "10:00")).unwrap();
        assert!(course.with_prerequisites(["CS201"]).is_err());
    }

    #[test]
    fn test_course_title_defaults_to_code() {
        let course = Course::new("CS101", 3, slot("Mon", "08:00", "10:00")).unwrap();
        assert_eq!(course.title(), "CS101");
        assert_eq!(course.with_title("Algorithms").title(), "Algorithms");
    }

    #[test]
    fn test_student_record_sets_must_be_disjoint() {
        let enrolled = vec![Course::new("CS101", 3, slot("Mon", "08:00", "10:00")).unwrap()];
        let err = StudentRecord::new("S-001", ["CS101"], enrolled).unwrap_err();
        assert!(err.to_string().contains("both completed and currently enrolled"));
    }

    #[test]
    fn test_student_record_rejects_blank_completed_code() {
        let err = StudentRecord::new("S-001", ["CS101", "  "], vec![]).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidInput { ref field, .. } if field == "student.completed"));
    }

    #[test]
    fn test_student_record_recomputes_credits() {
        let enrolled = vec![
            Course::new("CS101", 3, slot("Mon", "08:00", "10:00")).unwrap(),
            Course::new("MA101", 4, slot("Tue", "08:00", "10:00")).unwrap(),
        ];
        let student = StudentRecord::new("S-001", Vec::<String>::new(), enrolled).unwrap();
        assert_eq!(student.enrolled_credits(), 7);
    }

    #[test]
    fn test_request_rejects_duplicates_and_already_enrolled() {
        let cs101 = Course::new("CS101", 3, slot("Mon", "08:00", "10:00")).unwrap();
        let student = StudentRecord::new("S-001", Vec::<String>::new(), vec![cs101.clone()]).unwrap();
        assert!(RegistrationRequest::new(student.clone(), vec![cs101]).is_err());

        let ph101 = Course::new("PH101", 2, slot("Wed", "08:00", "10:00")).unwrap();
        assert!(RegistrationRequest::new(student, vec![ph101.clone(), ph101]).is_err());
    }

    #[test]
    fn test_validation_result_serializes_with_outcome_tag() {
        let result = ValidationResult::from_violations(vec![Violation::CreditLimitExceeded {
            limit: 24,
            total: 26,
            excess: 2,
        }]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(json["violations"][0]["kind"], "credit_limit_exceeded");
        assert_eq!(json["violations"][0]["excess"], 2);

        let accepted = serde_json::to_value(ValidationResult::from_violations(vec![])).unwrap();
        assert_eq!(accepted["outcome"], "accepted");
    }
}
