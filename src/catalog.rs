use serde::{Deserialize, Serialize};

// Type aliases for clarity
pub type InstructorId = u32;
pub type SlotId = u32;

/// Static instructor record: four survey-derived ratings on a 1-10 scale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: InstructorId,
    pub name: &'static str,
    pub perceived_value: f64,
    pub liking: f64,
    pub efficiency: f64,
    pub attendance_risk: f64,
}

/// Read-only instructor catalog, loaded once at process start.
pub const INSTRUCTORS: &[Instructor] = &[
    Instructor { id: 1, name: "Prof. B. Biswal", perceived_value: 7.2, liking: 6.5, efficiency: 7.0, attendance_risk: 5.5 },
    Instructor { id: 2, name: "Prof. Shobha Bagai", perceived_value: 8.5, liking: 7.8, efficiency: 8.0, attendance_risk: 9.2 },
    Instructor { id: 3, name: "Prof. Pankaj Tyagi", perceived_value: 7.0, liking: 6.5, efficiency: 6.8, attendance_risk: 8.5 },
    Instructor { id: 4, name: "Prof. Swati Arora", perceived_value: 6.5, liking: 5.8, efficiency: 5.5, attendance_risk: 7.0 },
    Instructor { id: 5, name: "Prof. Mahima Kaushik", perceived_value: 7.8, liking: 7.2, efficiency: 7.5, attendance_risk: 8.0 },
    Instructor { id: 6, name: "Prof. Nirmal Yadav", perceived_value: 8.2, liking: 7.5, efficiency: 8.0, attendance_risk: 8.8 },
    Instructor { id: 7, name: "Prof. Sonam Tanwar", perceived_value: 7.5, liking: 6.8, efficiency: 7.2, attendance_risk: 7.8 },
    Instructor { id: 8, name: "Prof. Asani Bhaduri", perceived_value: 7.8, liking: 7.0, efficiency: 7.3, attendance_risk: 8.2 },
    Instructor { id: 9, name: "Prof. Harendra Pal Singh", perceived_value: 7.3, liking: 6.7, efficiency: 7.0, attendance_risk: 7.5 },
    Instructor { id: 10, name: "Prof. Sachin Kumar", perceived_value: 7.6, liking: 6.9, efficiency: 7.2, attendance_risk: 7.9 },
    Instructor { id: 11, name: "Prof. J.S. Purohit", perceived_value: 7.1, liking: 6.4, efficiency: 6.7, attendance_risk: 7.3 },
    Instructor { id: 12, name: "Prof. Dorje Dawa", perceived_value: 6.8, liking: 6.2, efficiency: 6.5, attendance_risk: 7.0 },
    Instructor { id: 13, name: "Prof. Shobha Rai", perceived_value: 7.4, liking: 6.8, efficiency: 7.1, attendance_risk: 7.6 },
    Instructor { id: 14, name: "Prof. Anjani Verma", perceived_value: 7.2, liking: 6.6, efficiency: 6.9, attendance_risk: 7.4 },
    Instructor { id: 15, name: "Prof. Manish Kumar", perceived_value: 7.7, liking: 7.1, efficiency: 7.4, attendance_risk: 8.1 },
    Instructor { id: 16, name: "Prof. Sanjeewani Sehgal", perceived_value: 7.5, liking: 6.9, efficiency: 7.2, attendance_risk: 7.7 },
];

pub fn find_instructor(id: InstructorId) -> Option<&'static Instructor> {
    INSTRUCTORS.iter().find(|i| i.id == id)
}

/// Categorical time-of-day block carrying a fixed desirability rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBlock {
    Morning,
    Midday,
    Afternoon,
}

impl TimeBlock {
    pub fn rating(self) -> f64 {
        match self {
            TimeBlock::Morning => 7.5,
            TimeBlock::Midday => 7.0,
            TimeBlock::Afternoon => 6.5,
        }
    }
}

/// One entry of the fixed weekly slot grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: SlotId,
    pub label: &'static str,
    pub block: TimeBlock,
}

pub const TIME_SLOTS: &[TimeSlot] = &[
    TimeSlot { id: 1, label: "9:00-10:00", block: TimeBlock::Morning },
    TimeSlot { id: 2, label: "10:00-11:00", block: TimeBlock::Morning },
    TimeSlot { id: 3, label: "11:00-12:00", block: TimeBlock::Midday },
    TimeSlot { id: 4, label: "12:00-13:00", block: TimeBlock::Midday },
    TimeSlot { id: 5, label: "14:00-15:00", block: TimeBlock::Afternoon },
    TimeSlot { id: 6, label: "15:00-16:00", block: TimeBlock::Afternoon },
];

pub fn find_slot(id: SlotId) -> Option<&'static TimeSlot> {
    TIME_SLOTS.iter().find(|s| s.id == id)
}

/// Block for a slot id; sessions referencing an unknown slot fall back to the
/// midday rating.
pub fn block_for_slot(id: SlotId) -> TimeBlock {
    find_slot(id).map(|s| s.block).unwrap_or(TimeBlock::Midday)
}

/// Ordinal instructor priority, each level bound to a fixed multiplier on the
/// attendance priority score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriorityLevel {
    VeryHigh,
    High,
    #[default]
    Medium,
    Low,
    Avoid,
}

impl PriorityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            PriorityLevel::VeryHigh => 1.40,
            PriorityLevel::High => 1.25,
            PriorityLevel::Medium => 1.10,
            PriorityLevel::Low => 1.00,
            PriorityLevel::Avoid => 0.80,
        }
    }
}

/// Travel-time bands offered to the student, mapped to penalty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TravelTimeBand {
    Under15Min,
    Min15To30,
    Min30To60,
    Min60To90,
    Over90Min,
}

impl TravelTimeBand {
    pub fn penalty(self) -> f64 {
        match self {
            TravelTimeBand::Under15Min => 1.0,
            TravelTimeBand::Min15To30 => 1.5,
            TravelTimeBand::Min30To60 => 2.0,
            TravelTimeBand::Min60To90 => 2.5,
            TravelTimeBand::Over90Min => 3.0,
        }
    }
}

/// Outside-time-commitment bands, mapped to penalty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeCommitmentBand {
    NoCommitments,
    SocietyClubSports,
    PartTimeJob,
}

impl TimeCommitmentBand {
    pub fn penalty(self) -> f64 {
        match self {
            TimeCommitmentBand::NoCommitments => 0.0,
            TimeCommitmentBand::SocietyClubSports => 0.5,
            TimeCommitmentBand::PartTimeJob => 1.0,
        }
    }
}
