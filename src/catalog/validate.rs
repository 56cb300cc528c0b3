use super::{Branch, SemesterStrategy};
use crate::grading::types::Module;

/// Validate a catalog against the invariants the calculators rely on.
/// Returns all violations at once (not just the first). Used on catalog
/// overrides from the config file; the built-in catalogs are checked by
/// tests with the same function.
pub fn validate_catalog(branch: Branch, modules: &[Module]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let id = branch.id();

    if modules.is_empty() {
        errors.push(format!("catalog {}: no modules", id));
    }

    for module in modules {
        if module.subjects.is_empty() {
            errors.push(format!("catalog {}: module '{}' has no subjects", id, module.id));
        }
        for subject in &module.subjects {
            if !(subject.coefficient > 0.0) {
                errors.push(format!(
                    "catalog {}: subject '{}': coefficient must be > 0 (got {})",
                    id, subject.id, subject.coefficient
                ));
            }
            if !(subject.credits >= 0.0) {
                errors.push(format!(
                    "catalog {}: subject '{}': credits must be >= 0 (got {})",
                    id, subject.id, subject.credits
                ));
            }
        }
    }

    match branch.strategy() {
        SemesterStrategy::CreditWeighted => {
            let total_credits: f64 = modules
                .iter()
                .flat_map(|m| m.subjects.iter())
                .map(|s| s.credits)
                .sum();
            if !modules.is_empty() && total_credits <= 0.0 {
                errors.push(format!(
                    "catalog {}: total credits must be > 0 for credit-weighted averaging",
                    id
                ));
            }
        }
        SemesterStrategy::FixedCoefficientTotal { divisor } => {
            let total_coefficient: f64 = modules
                .iter()
                .flat_map(|m| m.subjects.iter())
                .map(|s| s.coefficient)
                .sum();
            if !modules.is_empty() && (total_coefficient - divisor).abs() > 1e-9 {
                errors.push(format!(
                    "catalog {}: coefficient total {} does not match the fixed divisor {}",
                    id, total_coefficient, divisor
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
