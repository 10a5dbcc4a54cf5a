use crate::core::{RegistrationRequest, Rule, Violation};
use crate::domain::model::{Course, SlotConflict, TimeSlot, UnmetPrerequisites};
use std::collections::HashMap;

/// Default maximum number of credits a student may carry at once.
pub const DEFAULT_MAX_CREDITS: u32 = 24;

#[derive(Debug, Clone, Copy)]
pub struct CreditLimitRule {
    max_credits: u32,
}

impl CreditLimitRule {
    pub fn new(max_credits: u32) -> Self {
        Self { max_credits }
    }

    pub fn max_credits(&self) -> u32 {
        self.max_credits
    }
}

impl Default for CreditLimitRule {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CREDITS)
    }
}

impl Rule for CreditLimitRule {
    fn name(&self) -> &'static str {
        "credit-limit"
    }

    fn check(&self, request: &RegistrationRequest) -> Option<Violation> {
        let total = request.total_credits();
        tracing::trace!(total, limit = self.max_credits, "checking credit load");

        (total > self.max_credits).then(|| Violation::CreditLimitExceeded {
            limit: self.max_credits,
            total,
            excess: total - self.max_credits,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrerequisiteRule;

impl Rule for PrerequisiteRule {
    fn name(&self) -> &'static str {
        "prerequisite"
    }

    fn check(&self, request: &RegistrationRequest) -> Option<Violation> {
        let student = request.student();
        let unmet: Vec<UnmetPrerequisites> = request
            .requested()
            .iter()
            .filter_map(|course| {
                let missing: Vec<String> = course
                    .prerequisites()
                    .filter(|code| !student.has_completed(code))
                    .map(str::to_string)
                    .collect();

                (!missing.is_empty()).then(|| UnmetPrerequisites {
                    course: course.code().to_string(),
                    missing,
                })
            })
            .collect();

        (!unmet.is_empty()).then_some(Violation::PrerequisiteNotMet { unmet })
    }
}

/// Flags every pair of courses, enrolled or requested, sharing a slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleConflictRule;

impl Rule for ScheduleConflictRule {
    fn name(&self) -> &'static str {
        "schedule-conflict"
    }

    fn check(&self, request: &RegistrationRequest) -> Option<Violation> {
        let mut by_slot: HashMap<TimeSlot, Vec<&Course>> = HashMap::new();
        let mut conflicts = Vec::new();

        for course in request.all_courses() {
            let earlier = by_slot.entry(course.slot()).or_default();
            for other in earlier.iter() {
                conflicts.push(SlotConflict {
                    first: other.code().to_string(),
                    second: course.code().to_string(),
                    slot: course.slot(),
                });
            }
            earlier.push(course);
        }

        (!conflicts.is_empty()).then_some(Violation::ScheduleConflict { conflicts })
    }
}

/// The standard rule set in reporting order: credit, prerequisite, schedule.
pub fn standard_rules(max_credits: u32) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(CreditLimitRule::new(max_credits)),
        Box::new(PrerequisiteRule),
        Box::new(ScheduleConflictRule),
    ]
}
