use good_lp::{
    Expression, ProblemVariables, Solution, SolverModel, constraint, default_solver, variable,
};
use log::trace;

/// Relation of a constraint row to its right-hand side. Minimum (>=) rows
/// are stored as negated <= rows by the constructors below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessEq,
    Eq,
}

/// One dense constraint row over the per-session decision variables.
#[derive(Debug, Clone)]
pub struct ConstraintRow {
    pub coeffs: Vec<f64>,
    pub rhs: f64,
    pub relation: Relation,
}

impl ConstraintRow {
    /// sum(x_i) == rhs, the weekly attendance target.
    pub fn total_equals(n: usize, rhs: f64) -> Self {
        ConstraintRow {
            coeffs: vec![1.0; n],
            rhs,
            relation: Relation::Eq,
        }
    }

    /// sum(x_i for i in indices) >= minimum, encoded as -sum <= -minimum.
    pub fn minimum_over(n: usize, indices: &[usize], minimum: f64) -> Self {
        let mut coeffs = vec![0.0; n];
        for &index in indices {
            coeffs[index] = -1.0;
        }
        ConstraintRow {
            coeffs,
            rhs: -minimum,
            relation: Relation::LessEq,
        }
    }

    /// sum(x_i for i in indices) <= rhs; used for cover cuts.
    pub fn sum_at_most(n: usize, indices: &[usize], rhs: f64) -> Self {
        let mut coeffs = vec![0.0; n];
        for &index in indices {
            coeffs[index] = 1.0;
        }
        ConstraintRow {
            coeffs,
            rhs,
            relation: Relation::LessEq,
        }
    }

    /// x_index <= bound; branching a variable down uses bound 0.
    pub fn upper_bound(n: usize, index: usize, bound: f64) -> Self {
        let mut coeffs = vec![0.0; n];
        coeffs[index] = 1.0;
        ConstraintRow {
            coeffs,
            rhs: bound,
            relation: Relation::LessEq,
        }
    }

    /// x_index == 1; branching a variable up.
    pub fn fix_to_one(n: usize, index: usize) -> Self {
        let mut coeffs = vec![0.0; n];
        coeffs[index] = 1.0;
        ConstraintRow {
            coeffs,
            rhs: 1.0,
            relation: Relation::Eq,
        }
    }
}

/// Solves one LP relaxation: maximize sum(aps_i * x_i) over x in [0, 1]^n
/// subject to the given rows. Returns the variable values, or None when the
/// relaxation is infeasible.
pub fn solve_relaxation(aps: &[f64], rows: &[ConstraintRow]) -> Option<Vec<f64>> {
    let n = aps.len();
    let mut problem = ProblemVariables::new();
    let vars = problem.add_vector(variable().min(0.0).max(1.0), n);

    let objective = vars
        .iter()
        .zip(aps)
        .fold(Expression::from(0.0), |acc, (var, score)| {
            acc + *score * *var
        });

    let mut model = problem
        .maximise(objective)
        .using(default_solver)
        .set_option("threads", 1) // limit to 1 thread for reproducibility
        .set_option("random_seed", 1234) //set seed for reproducibility
        .set_option("log_to_console", "false");

    for row in rows {
        let lhs = row
            .coeffs
            .iter()
            .zip(&vars)
            .filter(|(coeff, _)| **coeff != 0.0)
            .fold(Expression::from(0.0), |acc, (coeff, var)| {
                acc + *coeff * *var
            });
        match row.relation {
            Relation::LessEq => {
                model.add_constraint(constraint!(lhs <= row.rhs));
            }
            Relation::Eq => {
                model.add_constraint(constraint!(lhs == row.rhs));
            }
        }
    }

    match model.solve() {
        Ok(solution) => Some(vars.iter().map(|var| solution.value(*var)).collect()),
        Err(e) => {
            trace!("relaxation infeasible: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_highest_scores_under_total_constraint() {
        let aps = [2.0, 5.0, 1.0];
        let rows = [ConstraintRow::total_equals(3, 1.0)];
        let x = solve_relaxation(&aps, &rows).unwrap();
        assert!((x[1] - 1.0).abs() < 1e-6);
        assert!(x[0].abs() < 1e-6);
        assert!(x[2].abs() < 1e-6);
    }

    #[test]
    fn reports_infeasibility_as_none() {
        // Two variables bounded by 1 each cannot sum to 3.
        let aps = [1.0, 1.0];
        let rows = [ConstraintRow::total_equals(2, 3.0)];
        assert!(solve_relaxation(&aps, &rows).is_none());
    }

    #[test]
    fn minimum_row_forces_low_score_variables_in() {
        let aps = [9.0, 0.5, 0.4];
        let rows = [
            ConstraintRow::total_equals(3, 2.0),
            ConstraintRow::minimum_over(3, &[1, 2], 1.0),
        ];
        let x = solve_relaxation(&aps, &rows).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-6);
        assert!((x[1] + x[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn branch_rows_pin_variables() {
        let aps = [3.0, 2.0, 1.0];
        let rows = [
            ConstraintRow::total_equals(3, 1.0),
            ConstraintRow::upper_bound(3, 0, 0.0),
            ConstraintRow::fix_to_one(3, 2),
        ];
        let x = solve_relaxation(&aps, &rows).unwrap();
        assert!(x[0].abs() < 1e-6);
        assert!((x[2] - 1.0).abs() < 1e-6);
    }
}
