use serde::{Deserialize, Serialize};

/// Raw grade entries for one subject, as typed by the user.
/// An empty string means "not entered yet"; otherwise a numeric string
/// in [0, 20] once the input layer has clamped it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grades {
    #[serde(default)]
    pub td: String,
    #[serde(default)]
    pub tp: String,
    #[serde(default)]
    pub exam: String,
}

impl Grades {
    pub fn get(&self, field: GradeField) -> &str {
        match field {
            GradeField::Td => &self.td,
            GradeField::Tp => &self.tp,
            GradeField::Exam => &self.exam,
        }
    }

    fn set(&mut self, field: GradeField, value: String) {
        match field {
            GradeField::Td => self.td = value,
            GradeField::Tp => self.tp = value,
            GradeField::Exam => self.exam = value,
        }
    }
}

/// Which grade entry of a subject is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeField {
    Td,
    Tp,
    Exam,
}

impl GradeField {
    pub fn label(&self) -> &'static str {
        match self {
            GradeField::Td => "TD",
            GradeField::Tp => "TP",
            GradeField::Exam => "Exam",
        }
    }
}

/// One teaching unit. `has_td`/`has_tp` flag which continuous-assessment
/// components exist; `coefficient` weighs the subject inside its module
/// (and in the GL semester formula), `credits` weigh it in the
/// credit-weighted semester formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: String,
    pub title: String,
    pub coefficient: f64,
    pub credits: f64,
    pub has_td: bool,
    pub has_tp: bool,
    pub grades: Grades,
}

impl Subject {
    pub fn new(
        id: &str,
        title: &str,
        coefficient: f64,
        credits: f64,
        has_td: bool,
        has_tp: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            coefficient,
            credits,
            has_td,
            has_tp,
            grades: Grades::default(),
        }
    }

    /// Grade fields that actually apply to this subject, in display order
    /// (TD, TP, Exam). The exam always applies.
    pub fn fields(&self) -> Vec<GradeField> {
        let mut fields = Vec::with_capacity(3);
        if self.has_td {
            fields.push(GradeField::Td);
        }
        if self.has_tp {
            fields.push(GradeField::Tp);
        }
        fields.push(GradeField::Exam);
        fields
    }
}

/// Named grouping of subjects. Order matters for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub id: String,
    pub title: String,
    pub subjects: Vec<Subject>,
}

/// Replace one grade field of one subject, addressed by module and subject
/// id, returning a new snapshot. The input is never mutated; concurrent
/// readers of the old snapshot are unaffected. Unknown ids return the
/// snapshot unchanged.
pub fn with_grade(
    modules: &[Module],
    module_id: &str,
    subject_id: &str,
    field: GradeField,
    value: &str,
) -> Vec<Module> {
    modules
        .iter()
        .map(|module| {
            if module.id != module_id {
                return module.clone();
            }
            Module {
                id: module.id.clone(),
                title: module.title.clone(),
                subjects: module
                    .subjects
                    .iter()
                    .map(|subject| {
                        if subject.id != subject_id {
                            return subject.clone();
                        }
                        let mut updated = subject.clone();
                        updated.grades.set(field, value.to_string());
                        updated
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_modules() -> Vec<Module> {
        vec![Module {
            id: "m1".to_string(),
            title: "Module 1".to_string(),
            subjects: vec![
                Subject::new("s1", "Subject 1", 2.0, 4.0, true, false),
                Subject::new("s2", "Subject 2", 1.0, 2.0, false, false),
            ],
        }]
    }

    #[test]
    fn test_with_grade_replaces_one_field() {
        let modules = sample_modules();
        let updated = with_grade(&modules, "m1", "s1", GradeField::Td, "12.5");

        assert_eq!(updated[0].subjects[0].grades.td, "12.5");
        assert_eq!(updated[0].subjects[0].grades.exam, "");
        assert_eq!(updated[0].subjects[1].grades, Grades::default());
        // Original snapshot untouched
        assert_eq!(modules[0].subjects[0].grades.td, "");
    }

    #[test]
    fn test_with_grade_unknown_ids_are_noops() {
        let modules = sample_modules();
        let updated = with_grade(&modules, "m1", "nope", GradeField::Exam, "10");
        assert_eq!(updated, modules);
        let updated = with_grade(&modules, "nope", "s1", GradeField::Exam, "10");
        assert_eq!(updated, modules);
    }

    #[test]
    fn test_with_grade_can_clear() {
        let modules = sample_modules();
        let updated = with_grade(&modules, "m1", "s2", GradeField::Exam, "16");
        let cleared = with_grade(&updated, "m1", "s2", GradeField::Exam, "");
        assert_eq!(cleared[0].subjects[1].grades.exam, "");
    }

    #[test]
    fn test_fields_respect_component_flags() {
        let exam_only = Subject::new("s", "S", 1.0, 1.0, false, false);
        assert_eq!(exam_only.fields(), vec![GradeField::Exam]);

        let full = Subject::new("s", "S", 1.0, 1.0, true, true);
        assert_eq!(
            full.fields(),
            vec![GradeField::Td, GradeField::Tp, GradeField::Exam]
        );
    }
}
