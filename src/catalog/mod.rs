mod data;
pub mod validate;

pub use validate::validate_catalog;

use crate::grading::types::Module;

/// Coefficient total of the GL S1 curriculum, used as the fixed divisor of
/// the GL semester formula. This is an institutional constant, not derived
/// from the catalog data: if the GL catalog changes, update this in
/// lockstep (a test in `data.rs` pins the two together).
pub const GL_COEFFICIENT_TOTAL: f64 = 16.0;

/// Academic program track. Selects both the module catalog and the
/// semester aggregation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Master 1 Intelligence Artificielle et Digitalisation
    Iad,
    /// Master 1 Génie Logiciel
    Gl,
    /// Master 1 Génie Informatique
    Gi,
    /// Master 1 Réseaux et Télécommunications
    Rt,
}

/// How subject averages are aggregated into the semester average.
/// Resolved once per branch, then passed into the calculator, so a new
/// strategy is a data change rather than another string comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SemesterStrategy {
    /// ECTS-style: weight every subject by its credits.
    CreditWeighted,
    /// Weight every subject by its coefficient and divide by the
    /// curriculum's fixed coefficient total.
    FixedCoefficientTotal { divisor: f64 },
}

impl Branch {
    pub const ALL: [Branch; 4] = [Branch::Iad, Branch::Gl, Branch::Gi, Branch::Rt];

    /// Parse a branch identifier. Unknown identifiers fall back to the
    /// default branch rather than failing.
    pub fn parse(id: &str) -> Branch {
        match id.trim().to_ascii_lowercase().as_str() {
            "gl" => Branch::Gl,
            "gi" => Branch::Gi,
            "rt" => Branch::Rt,
            "iad" => Branch::Iad,
            _ => Branch::default(),
        }
    }

    /// Short identifier, as used in config files and export filenames.
    pub fn id(&self) -> &'static str {
        match self {
            Branch::Iad => "iad",
            Branch::Gl => "gl",
            Branch::Gi => "gi",
            Branch::Rt => "rt",
        }
    }

    /// Full program name, as shown in the UI and in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Branch::Iad => "Master 1 Intelligence Artificielle et Digitalisation",
            Branch::Gl => "Master 1 Génie Logiciel",
            Branch::Gi => "Master 1 Génie Informatique",
            Branch::Rt => "Master 1 Réseaux et Télécommunications",
        }
    }

    pub fn strategy(&self) -> SemesterStrategy {
        match self {
            Branch::Gl => SemesterStrategy::FixedCoefficientTotal {
                divisor: GL_COEFFICIENT_TOTAL,
            },
            _ => SemesterStrategy::CreditWeighted,
        }
    }

    /// Fresh catalog for this branch, with empty grade entries. Callers
    /// replace their module list wholesale with this on a branch switch;
    /// in-flight grades are discarded by design.
    pub fn modules(&self) -> Vec<Module> {
        data::modules(*self)
    }

    /// The next branch in display order, wrapping around.
    pub fn next(&self) -> Branch {
        match self {
            Branch::Iad => Branch::Gl,
            Branch::Gl => Branch::Gi,
            Branch::Gi => Branch::Rt,
            Branch::Rt => Branch::Iad,
        }
    }
}

impl Default for Branch {
    fn default() -> Self {
        Branch::Iad
    }
}
