use crate::catalog::{InstructorId, PriorityLevel, TimeBlock, find_instructor};
use crate::data::{StudentProfile, round3};

// Calibrated weight vector for the attendance priority score. The positive
// weights sum close to, but not exactly, 1.
const W_PERCEIVED_VALUE: f64 = 0.1476;
const W_LIKING: f64 = 0.1456;
const W_EFFICIENCY: f64 = 0.1370;
const W_ATTENDANCE_RISK: f64 = 0.1356;
const W_TIME_BLOCK: f64 = 0.1203;
const W_HOLIDAY_BASELINE: f64 = 0.1225;
const W_TRAVEL_TIME: f64 = 0.0935;
const W_TIME_COMMITMENT: f64 = 0.0979;

// Baseline holiday-skip risk factor, not sourced from the instructor record.
const HOLIDAY_BASELINE: f64 = 5.0;

/// Computes the Attendance Priority Score for one (instructor, time block,
/// profile, priority) tuple.
///
/// A linear combination of the instructor's static ratings, the time block's
/// desirability, and the fixed holiday baseline, minus the student's travel
/// and commitment penalties, scaled by the instructor's priority multiplier
/// and rounded to 3 decimal places. An unknown instructor id scores 0.0 so a
/// single bad reference never aborts a whole solve.
pub fn attendance_priority_score(
    instructor_id: InstructorId,
    block: TimeBlock,
    profile: &StudentProfile,
    priority: PriorityLevel,
) -> f64 {
    let Some(instructor) = find_instructor(instructor_id) else {
        return 0.0;
    };

    let base = W_PERCEIVED_VALUE * instructor.perceived_value
        + W_LIKING * instructor.liking
        + W_EFFICIENCY * instructor.efficiency
        + W_ATTENDANCE_RISK * instructor.attendance_risk
        + W_TIME_BLOCK * block.rating()
        + W_HOLIDAY_BASELINE * HOLIDAY_BASELINE
        - W_TRAVEL_TIME * profile.travel_time
        - W_TIME_COMMITMENT * profile.time_commitment;

    round3(base * priority.multiplier())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_profile() -> StudentProfile {
        StudentProfile {
            travel_time: 2.0,
            time_commitment: 0.5,
        }
    }

    #[test]
    fn scores_reference_instructor_in_morning_block() {
        // Instructor 2: pv 8.5, le 7.8, se 8.0, ar 9.2; morning rating 7.5;
        // Medium multiplier 1.10.
        let score = attendance_priority_score(
            2,
            TimeBlock::Morning,
            &reference_profile(),
            PriorityLevel::Medium,
        );
        assert!((score - 6.614).abs() < 1e-9);
    }

    #[test]
    fn score_is_deterministic() {
        let profile = reference_profile();
        let first = attendance_priority_score(5, TimeBlock::Afternoon, &profile, PriorityLevel::High);
        let second = attendance_priority_score(5, TimeBlock::Afternoon, &profile, PriorityLevel::High);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_instructor_scores_zero() {
        let score = attendance_priority_score(
            999,
            TimeBlock::Morning,
            &reference_profile(),
            PriorityLevel::VeryHigh,
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn priority_levels_order_the_score() {
        let profile = reference_profile();
        let avoid = attendance_priority_score(3, TimeBlock::Midday, &profile, PriorityLevel::Avoid);
        let medium = attendance_priority_score(3, TimeBlock::Midday, &profile, PriorityLevel::Medium);
        let very_high =
            attendance_priority_score(3, TimeBlock::Midday, &profile, PriorityLevel::VeryHigh);
        assert!(avoid < medium);
        assert!(medium < very_high);
    }

    #[test]
    fn later_blocks_score_lower_than_morning() {
        let profile = reference_profile();
        let morning = attendance_priority_score(7, TimeBlock::Morning, &profile, PriorityLevel::Low);
        let afternoon =
            attendance_priority_score(7, TimeBlock::Afternoon, &profile, PriorityLevel::Low);
        assert!(afternoon < morning);
    }
}
