use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_GRADE_MAX: f64 = 20.0;

/// Optional user configuration.
///
/// Example YAML:
/// ```yaml
/// default_branch: gl
/// grade_max: 20
/// catalogs:
///   rt:
///     - id: rt-res
///       title: Réseaux
///       subjects:
///         - { id: rt-mob, title: Réseaux Mobiles, coefficient: 3, credits: 5, td: true }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Branch opened on startup when --branch is not given.
    #[serde(default)]
    pub default_branch: Option<String>,

    /// Upper bound accepted by the grade input (default: 20).
    #[serde(default)]
    pub grade_max: Option<f64>,

    /// Per-branch catalog overrides, keyed by branch id. A branch not
    /// listed here keeps its built-in catalog.
    #[serde(default)]
    pub catalogs: Option<HashMap<String, Vec<ModuleConfig>>>,
}

impl Config {
    pub fn grade_max(&self) -> f64 {
        self.grade_max.unwrap_or(DEFAULT_GRADE_MAX)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    pub id: String,
    pub title: String,
    pub subjects: Vec<SubjectConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SubjectConfig {
    pub id: String,
    pub title: String,
    pub coefficient: f64,
    pub credits: f64,
    /// Whether the subject has a TD (tutorial) component.
    #[serde(default)]
    pub td: bool,
    /// Whether the subject has a TP (practical) component.
    #[serde(default)]
    pub tp: bool,
}
