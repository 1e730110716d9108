use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::{InstructorId, PriorityLevel, SlotId, TimeCommitmentBand, TravelTimeBand};

/// Weekday of the fixed Monday-Friday teaching week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// Tunable penalties describing the student's circumstances. Both values are
/// nonnegative and normally picked from the catalog band menus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub travel_time: f64,
    pub time_commitment: f64,
}

impl StudentProfile {
    pub fn from_bands(travel: TravelTimeBand, commitment: TimeCommitmentBand) -> Self {
        StudentProfile {
            travel_time: travel.penalty(),
            time_commitment: commitment.penalty(),
        }
    }
}

impl Default for StudentProfile {
    fn default() -> Self {
        StudentProfile {
            travel_time: TravelTimeBand::Min30To60.penalty(),
            time_commitment: TimeCommitmentBand::SocietyClubSports.penalty(),
        }
    }
}

/// Instructor id to priority level; missing entries are treated as Medium.
pub type PriorityAssignment = HashMap<InstructorId, PriorityLevel>;

/// One entry in the weekly timetable, keyed by (day, slot id). The timetable
/// source guarantees key uniqueness; the optimizer treats the whole set as an
/// immutable snapshot for one solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSession {
    pub day: Day,
    pub slot_id: SlotId,
    pub instructor_id: InstructorId,
    pub subject: String,
}

/// The complete input for one optimization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    pub timetable: Vec<ScheduledSession>,
    #[serde(default)]
    pub student_profile: StudentProfile,
    #[serde(default)]
    pub priorities: PriorityAssignment,
    pub target_percent: f64,
}

/// Per-session attendance decision. `attendance` is a fraction in [0, 1] for
/// the fractional model and exactly 0 or 1 for the integer model; `utility`
/// is the weighted contribution attendance * aps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDecision {
    pub day: Day,
    pub slot_id: SlotId,
    pub instructor_id: InstructorId,
    pub subject: String,
    pub aps: f64,
    pub attendance: f64,
    pub utility: f64,
}

/// Attended/total tally for one instructor across the week.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorAttendance {
    pub instructor_id: InstructorId,
    pub name: String,
    pub sessions_total: usize,
    pub sessions_attended: f64,
}

/// The final output of one solve: all decisions plus derived statistics over
/// a fixed 20-week semester.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub decisions: Vec<AttendanceDecision>,
    pub total_sessions_week: usize,
    pub total_sessions_semester: usize,
    pub required_sessions_week: f64,
    pub required_sessions_semester: usize,
    pub selected_sessions_week: f64,
    pub selected_sessions_semester: f64,
    pub attendance_percentage: f64,
    pub total_utility: f64,
    pub average_utility: f64,
    pub objective_value: f64,
    pub instructor_stats: Vec<InstructorAttendance>,
    /// Labels of constraints dropped to recover feasibility; empty when the
    /// full constraint set was satisfiable.
    pub relaxed_constraints: Vec<String>,
}

/// Rounded to 3 decimal places, for presentation stability of fractions and
/// utilities.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Rounded to 2 decimal places, for percentages and semester projections.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_matches_middle_bands() {
        let profile = StudentProfile::default();
        assert!((profile.travel_time - 2.0).abs() < 1e-12);
        assert!((profile.time_commitment - 0.5).abs() < 1e-12);
    }

    #[test]
    fn request_deserializes_from_camel_case_json() {
        let raw = r#"{
            "timetable": [
                {"day": "Monday", "slotId": 1, "instructorId": 2, "subject": "Calculus"}
            ],
            "studentProfile": {"travelTime": 1.5, "timeCommitment": 0.0},
            "priorities": {"2": "veryHigh"},
            "targetPercent": 75.0
        }"#;
        let request: OptimizationRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.timetable.len(), 1);
        assert_eq!(request.timetable[0].day, Day::Monday);
        assert_eq!(request.timetable[0].instructor_id, 2);
        assert_eq!(request.priorities[&2], PriorityLevel::VeryHigh);
        assert!((request.target_percent - 75.0).abs() < 1e-12);
    }

    #[test]
    fn profile_and_priorities_default_when_omitted() {
        let raw = r#"{"timetable": [], "targetPercent": 60.0}"#;
        let request: OptimizationRequest = serde_json::from_str(raw).unwrap();
        assert!(request.priorities.is_empty());
        assert!((request.student_profile.travel_time - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rounding_helpers_truncate_to_expected_precision() {
        assert!((round3(6.61386) - 6.614).abs() < 1e-12);
        assert!((round2(83.333_333) - 83.33).abs() < 1e-12);
    }
}
