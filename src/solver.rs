use crate::catalog::{InstructorId, block_for_slot, find_instructor};
use crate::data::{
    AttendanceDecision, InstructorAttendance, OptimizationResult, PriorityAssignment,
    ScheduledSession, StudentProfile, round2, round3,
};
use crate::lp::{ConstraintRow, solve_relaxation};
use crate::scoring::attendance_priority_score;
use itertools::Itertools;
use log::{info, trace};
use std::collections::HashMap;

/// Fixed term length used for all semester projections.
pub const WEEKS_PER_SEMESTER: usize = 20;

/// Weekly sessions an instructor must keep when they teach at least this many.
const MINIMUM_CONTACT_SESSIONS: f64 = 2.0;

/// Incumbent must improve by more than this before a branch is explored.
const OBJECTIVE_TOLERANCE: f64 = 1e-6;

/// A variable within this distance of an integer counts as integral.
const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Strict-fractionality band used when building cover cuts.
const FRACTIONAL_EPS: f64 = 1e-8;

/// Node budget for the integer search. Weekly timetables stay under ~30
/// sessions, so this is never reached in practice; it bounds pathological
/// inputs and turns the search into an anytime procedure.
pub const DEFAULT_NODE_BUDGET: usize = 10_000;

struct ScoredSession<'a> {
    session: &'a ScheduledSession,
    aps: f64,
}

/// A group of same-priority droppable constraints. Groups are relaxed as a
/// unit, lowest priority first, when the full problem is infeasible.
struct ConstraintGroup {
    labels: Vec<String>,
    rows: Vec<ConstraintRow>,
}

fn score_sessions<'a>(
    timetable: &'a [ScheduledSession],
    profile: &StudentProfile,
    priorities: &PriorityAssignment,
) -> Vec<ScoredSession<'a>> {
    timetable
        .iter()
        .map(|session| {
            let priority = priorities
                .get(&session.instructor_id)
                .copied()
                .unwrap_or_default();
            let aps = attendance_priority_score(
                session.instructor_id,
                block_for_slot(session.slot_id),
                profile,
                priority,
            );
            ScoredSession { session, aps }
        })
        .collect()
}

/// Minimum-contact rows for every instructor teaching >= 2 weekly sessions,
/// as one droppable group.
fn minimum_contact_group(scored: &[ScoredSession]) -> Option<ConstraintGroup> {
    let n = scored.len();
    let by_instructor: HashMap<InstructorId, Vec<usize>> = scored
        .iter()
        .enumerate()
        .map(|(index, entry)| (entry.session.instructor_id, index))
        .into_group_map();

    let mut labels = Vec::new();
    let mut rows = Vec::new();
    for (instructor_id, indices) in by_instructor.iter().sorted_by_key(|(id, _)| **id) {
        if indices.len() >= MINIMUM_CONTACT_SESSIONS as usize {
            labels.push(format!("instructor #{instructor_id} minimum contact"));
            rows.push(ConstraintRow::minimum_over(
                n,
                indices,
                MINIMUM_CONTACT_SESSIONS,
            ));
        }
    }
    if rows.is_empty() {
        None
    } else {
        Some(ConstraintGroup { labels, rows })
    }
}

fn clamp_percent(target_percent: f64) -> f64 {
    target_percent.clamp(0.0, 100.0)
}

/// Fractional model: attendance fractions in [0, 1] per session, with the
/// weekly total pinned exactly to the target fraction of sessions.
pub fn optimize_fractional(
    timetable: &[ScheduledSession],
    profile: &StudentProfile,
    priorities: &PriorityAssignment,
    target_percent: f64,
) -> Option<OptimizationResult> {
    let n = timetable.len();
    if n == 0 {
        return None;
    }

    let target = clamp_percent(target_percent);
    let required_week = n as f64 * target / 100.0;
    let required_semester = (required_week * WEEKS_PER_SEMESTER as f64).ceil() as usize;

    let scored = score_sessions(timetable, profile, priorities);
    let aps: Vec<f64> = scored.iter().map(|entry| entry.aps).collect();

    info!(
        "fractional solve over {} sessions, weekly target {:.3}",
        n, required_week
    );

    let required_rows = vec![ConstraintRow::total_equals(n, required_week)];
    let droppable: Vec<ConstraintGroup> = minimum_contact_group(&scored).into_iter().collect();

    // Attempt the full constraint set first, then drop groups in ascending
    // priority order until a feasible solve is found.
    for dropped in 0..=droppable.len() {
        let mut rows = required_rows.clone();
        for group in &droppable[dropped..] {
            rows.extend(group.rows.iter().cloned());
        }
        if let Some(x) = solve_relaxation(&aps, &rows) {
            if dropped > 0 {
                info!("solution required relaxing {} constraint group(s)", dropped);
            }
            let relaxed = droppable[..dropped]
                .iter()
                .flat_map(|group| group.labels.iter().cloned())
                .collect();
            return Some(package_result(
                &scored,
                &x,
                round3(required_week),
                required_semester,
                relaxed,
            ));
        }
    }
    None
}

/// Integer model: binary attendance per session, weekly count pinned to
/// ceil(target fraction * sessions), solved by branch-and-bound over the LP
/// relaxation with the default node budget.
pub fn optimize_integer(
    timetable: &[ScheduledSession],
    profile: &StudentProfile,
    priorities: &PriorityAssignment,
    target_percent: f64,
) -> Option<OptimizationResult> {
    optimize_integer_with_budget(
        timetable,
        profile,
        priorities,
        target_percent,
        DEFAULT_NODE_BUDGET,
    )
}

/// Integer model with an explicit node budget. When the budget runs out the
/// best incumbent found so far is returned instead of searching further.
pub fn optimize_integer_with_budget(
    timetable: &[ScheduledSession],
    profile: &StudentProfile,
    priorities: &PriorityAssignment,
    target_percent: f64,
    node_budget: usize,
) -> Option<OptimizationResult> {
    let n = timetable.len();
    if n == 0 {
        return None;
    }

    let target = clamp_percent(target_percent);
    let required_week = (n as f64 * target / 100.0).ceil() as usize;
    let required_semester = required_week * WEEKS_PER_SEMESTER;

    let scored = score_sessions(timetable, profile, priorities);
    let aps: Vec<f64> = scored.iter().map(|entry| entry.aps).collect();

    info!(
        "integer solve over {} sessions, weekly target {} of {}",
        n, required_week, n
    );

    let required_rows = vec![ConstraintRow::total_equals(n, required_week as f64)];
    let droppable: Vec<ConstraintGroup> = minimum_contact_group(&scored).into_iter().collect();

    for dropped in 0..=droppable.len() {
        let mut base = required_rows.clone();
        for group in &droppable[dropped..] {
            base.extend(group.rows.iter().cloned());
        }

        let mut search = Search {
            aps: &aps,
            base: &base,
            best_objective: f64::NEG_INFINITY,
            best_x: None,
            nodes: 0,
            node_budget,
        };
        search.branch_and_bound(Vec::new());
        trace!("search explored {} node(s)", search.nodes);

        if let Some(x) = search.best_x {
            if dropped > 0 {
                info!("solution required relaxing {} constraint group(s)", dropped);
            }
            let relaxed = droppable[..dropped]
                .iter()
                .flat_map(|group| group.labels.iter().cloned())
                .collect();
            return Some(package_result(
                &scored,
                &x,
                required_week as f64,
                required_semester,
                relaxed,
            ));
        }
    }
    None
}

struct Search<'a> {
    aps: &'a [f64],
    base: &'a [ConstraintRow],
    best_objective: f64,
    best_x: Option<Vec<f64>>,
    nodes: usize,
    node_budget: usize,
}

impl Search<'_> {
    /// Depth-first branch-and-bound. Each branch carries its own accumulated
    /// constraint rows, so there is no shared mutable constraint state.
    fn branch_and_bound(&mut self, extra: Vec<ConstraintRow>) {
        if self.nodes >= self.node_budget {
            return;
        }
        self.nodes += 1;

        let mut rows = self.base.to_vec();
        rows.extend(extra.iter().cloned());
        let Some(x) = solve_relaxation(self.aps, &rows) else {
            return;
        };

        let objective: f64 = x.iter().zip(self.aps).map(|(xi, score)| xi * score).sum();
        if objective <= self.best_objective + OBJECTIVE_TOLERANCE {
            return;
        }

        let n = self.aps.len();
        let fractional: Vec<usize> = (0..n)
            .filter(|&i| (x[i] - x[i].round()).abs() > INTEGRALITY_TOLERANCE)
            .collect();
        if fractional.is_empty() {
            self.best_objective = objective;
            self.best_x = Some(x.iter().map(|xi| xi.round()).collect());
            trace!(
                "incumbent improved to {:.6} after {} node(s)",
                objective, self.nodes
            );
            return;
        }

        // Cover cut: bounding the sum of strictly fractional variables by its
        // floor often reaches integrality without deep branching.
        let strict: Vec<usize> = (0..n)
            .filter(|&i| x[i] > FRACTIONAL_EPS && x[i] < 1.0 - FRACTIONAL_EPS)
            .collect();
        if strict.len() >= 2 {
            let sum: f64 = strict.iter().map(|&i| x[i]).sum();
            let rhs = sum.floor();
            if (rhs as usize) < strict.len() {
                let mut with_cut = extra.clone();
                with_cut.push(ConstraintRow::sum_at_most(n, &strict, rhs));
                let mut probe = self.base.to_vec();
                probe.extend(with_cut.iter().cloned());
                if solve_relaxation(self.aps, &probe).is_some() {
                    self.branch_and_bound(with_cut);
                }
            }
        }

        // Branch on the most undecided variable, down then up.
        let branch_var = fractional
            .iter()
            .copied()
            .min_by(|&a, &b| {
                (x[a] - 0.5)
                    .abs()
                    .partial_cmp(&(x[b] - 0.5).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap();

        let mut down = extra.clone();
        down.push(ConstraintRow::upper_bound(n, branch_var, 0.0));
        self.branch_and_bound(down);

        let mut up = extra;
        up.push(ConstraintRow::fix_to_one(n, branch_var));
        self.branch_and_bound(up);
    }
}

fn package_result(
    scored: &[ScoredSession],
    x: &[f64],
    required_week: f64,
    required_semester: usize,
    relaxed_constraints: Vec<String>,
) -> OptimizationResult {
    let n = scored.len();

    let decisions: Vec<AttendanceDecision> = scored
        .iter()
        .zip(x)
        .map(|(entry, &value)| AttendanceDecision {
            day: entry.session.day,
            slot_id: entry.session.slot_id,
            instructor_id: entry.session.instructor_id,
            subject: entry.session.subject.clone(),
            aps: entry.aps,
            attendance: round3(value),
            utility: round3(value * entry.aps),
        })
        .collect();

    let selected_week: f64 = decisions.iter().map(|d| d.attendance).sum();
    let total_semester = n * WEEKS_PER_SEMESTER;
    let selected_semester = selected_week * WEEKS_PER_SEMESTER as f64;
    let attendance_percentage = if total_semester > 0 {
        round2(selected_semester / total_semester as f64 * 100.0)
    } else {
        0.0
    };

    let total_utility: f64 = decisions.iter().map(|d| d.utility).sum();
    let average_utility = if selected_week > 0.0 {
        total_utility / selected_week
    } else {
        0.0
    };
    let objective_value: f64 = scored
        .iter()
        .zip(x)
        .map(|(entry, &value)| entry.aps * value)
        .sum();

    let mut stats: HashMap<InstructorId, InstructorAttendance> = HashMap::new();
    for (entry, decision) in scored.iter().zip(&decisions) {
        let tally = stats
            .entry(entry.session.instructor_id)
            .or_insert_with(|| InstructorAttendance {
                instructor_id: entry.session.instructor_id,
                name: find_instructor(entry.session.instructor_id)
                    .map(|i| i.name.to_string())
                    .unwrap_or_else(|| format!("#{}", entry.session.instructor_id)),
                sessions_total: 0,
                sessions_attended: 0.0,
            });
        tally.sessions_total += 1;
        tally.sessions_attended += decision.attendance;
    }
    let instructor_stats: Vec<InstructorAttendance> = stats
        .into_values()
        .sorted_by_key(|tally| tally.instructor_id)
        .collect();

    OptimizationResult {
        decisions,
        total_sessions_week: n,
        total_sessions_semester: total_semester,
        required_sessions_week: required_week,
        required_sessions_semester: required_semester,
        selected_sessions_week: round3(selected_week),
        selected_sessions_semester: round2(selected_semester),
        attendance_percentage,
        total_utility: round3(total_utility),
        average_utility: round3(average_utility),
        objective_value,
        instructor_stats,
        relaxed_constraints,
    }
}
