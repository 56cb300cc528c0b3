use super::parse::parse_grade;
use super::types::{Module, Subject};
use crate::catalog::{Branch, SemesterStrategy};

const PRACTICAL_WEIGHT: f64 = 0.4;
const EXAM_WEIGHT: f64 = 0.6;

/// Average of one subject: 40% continuous assessment, 60% exam.
///
/// Subjects without TD and TP are exam-only and skip the practical
/// weighting entirely. When a component is flagged applicable, a missing
/// grade counts as 0 in the practical mean just like an entered zero.
///
/// `_branch` is an extension point for branch-specific grading policies;
/// every current branch shares this formula.
pub fn subject_average(subject: &Subject, _branch: Branch) -> f64 {
    let exam = parse_grade(&subject.grades.exam);

    if !subject.has_td && !subject.has_tp {
        return exam;
    }

    let mut practical = Vec::with_capacity(2);
    if subject.has_td {
        practical.push(parse_grade(&subject.grades.td));
    }
    if subject.has_tp {
        practical.push(parse_grade(&subject.grades.tp));
    }
    let practical_average = practical.iter().sum::<f64>() / practical.len() as f64;

    practical_average * PRACTICAL_WEIGHT + exam * EXAM_WEIGHT
}

/// Coefficient-weighted mean of a module's subject averages.
/// An empty module or a zero coefficient total yields 0, never a fault.
pub fn module_average(subjects: &[Subject], branch: Branch) -> f64 {
    let total_coefficient: f64 = subjects.iter().map(|s| s.coefficient).sum();
    if total_coefficient == 0.0 {
        return 0.0;
    }
    let weighted_sum: f64 = subjects
        .iter()
        .map(|s| subject_average(s, branch) * s.coefficient)
        .sum();
    weighted_sum / total_coefficient
}

/// Semester average under the branch's aggregation strategy.
pub fn semester_average(modules: &[Module], branch: Branch) -> f64 {
    semester_average_with(modules, branch, branch.strategy())
}

/// Semester average with an explicitly resolved strategy, so callers that
/// recompute on every input change resolve the branch policy once.
pub fn semester_average_with(
    modules: &[Module],
    branch: Branch,
    strategy: SemesterStrategy,
) -> f64 {
    let subjects = modules.iter().flat_map(|m| m.subjects.iter());
    match strategy {
        SemesterStrategy::CreditWeighted => {
            let total_credits: f64 = modules
                .iter()
                .flat_map(|m| m.subjects.iter())
                .map(|s| s.credits)
                .sum();
            if total_credits == 0.0 {
                return 0.0;
            }
            let weighted_sum: f64 = subjects
                .map(|s| subject_average(s, branch) * s.credits)
                .sum();
            weighted_sum / total_credits
        }
        // The divisor is the curriculum's fixed coefficient total, not the
        // summed coefficients of the data. Constant, so no zero guard.
        SemesterStrategy::FixedCoefficientTotal { divisor } => {
            let weighted_sum: f64 = subjects
                .map(|s| subject_average(s, branch) * s.coefficient)
                .sum();
            weighted_sum / divisor
        }
    }
}
