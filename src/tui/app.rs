use std::time::Instant;

use crate::catalog::{Branch, SemesterStrategy};
use crate::config::{resolve_catalog, Config};
use crate::grading::types::{GradeField, Module, Subject};
use crate::grading::{semester_average_with, with_grade};

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    GradeInput,
    Help,
}

pub struct App {
    pub branch: Branch,
    /// Aggregation strategy, resolved once per branch switch.
    pub strategy: SemesterStrategy,
    pub modules: Vec<Module>,
    pub config: Config,
    /// Flat index over all subjects, across modules, in display order.
    pub selected: usize,
    pub field: GradeField,
    pub input_mode: InputMode,
    pub grade_input: String,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub table_state: ratatui::widgets::TableState,
    pub verbose: bool,
}

impl App {
    pub fn new(branch: Branch, modules: Vec<Module>, config: Config, verbose: bool) -> Self {
        let mut app = Self {
            branch,
            strategy: branch.strategy(),
            modules,
            config,
            selected: 0,
            field: GradeField::Exam,
            input_mode: InputMode::Normal,
            grade_input: String::new(),
            flash_message: None,
            should_quit: false,
            table_state: ratatui::widgets::TableState::default(),
            verbose,
        };
        app.clamp_field();
        app.sync_table_selection();
        app
    }

    pub fn subject_count(&self) -> usize {
        self.modules.iter().map(|m| m.subjects.len()).sum()
    }

    /// Map the flat selection index to (module index, subject index).
    pub fn selected_position(&self) -> Option<(usize, usize)> {
        let mut remaining = self.selected;
        for (module_idx, module) in self.modules.iter().enumerate() {
            if remaining < module.subjects.len() {
                return Some((module_idx, remaining));
            }
            remaining -= module.subjects.len();
        }
        None
    }

    pub fn selected_subject(&self) -> Option<&Subject> {
        self.selected_position()
            .map(|(m, s)| &self.modules[m].subjects[s])
    }

    /// Semester average of the current snapshot, under the resolved
    /// strategy. Called on every draw; recomputation is linear in the
    /// subject count, so this stays cheap.
    pub fn semester(&self) -> f64 {
        semester_average_with(&self.modules, self.branch, self.strategy)
    }

    pub fn next_row(&mut self) {
        let count = self.subject_count();
        if count == 0 {
            return;
        }
        self.selected = if self.selected + 1 >= count {
            0
        } else {
            self.selected + 1
        };
        self.clamp_field();
        self.sync_table_selection();
    }

    pub fn previous_row(&mut self) {
        let count = self.subject_count();
        if count == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            count - 1
        } else {
            self.selected - 1
        };
        self.clamp_field();
        self.sync_table_selection();
    }

    pub fn next_field(&mut self) {
        let Some(subject) = self.selected_subject() else {
            return;
        };
        let fields = subject.fields();
        let current = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(current + 1) % fields.len()];
    }

    pub fn previous_field(&mut self) {
        let Some(subject) = self.selected_subject() else {
            return;
        };
        let fields = subject.fields();
        let current = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(current + fields.len() - 1) % fields.len()];
    }

    /// Keep the selected field applicable to the selected subject.
    fn clamp_field(&mut self) {
        if let Some(subject) = self.selected_subject() {
            if !subject.fields().contains(&self.field) {
                self.field = GradeField::Exam;
            }
        }
    }

    /// The table row index of the selected subject, counting module
    /// header rows interleaved above it.
    fn sync_table_selection(&mut self) {
        let Some((module_idx, subject_idx)) = self.selected_position() else {
            self.table_state.select(None);
            return;
        };
        let preceding_subjects: usize = self.modules[..module_idx]
            .iter()
            .map(|m| m.subjects.len())
            .sum();
        // One header row per module up to and including the selected one
        let row = (module_idx + 1) + preceding_subjects + subject_idx;
        self.table_state.select(Some(row));
    }

    /// Start editing the selected grade field, prefilled with its current
    /// text so a typo can be fixed instead of retyped.
    pub fn start_grade_input(&mut self) {
        let field = self.field;
        let Some(current) = self
            .selected_subject()
            .map(|s| s.grades.get(field).to_string())
        else {
            return;
        };
        self.grade_input = current;
        self.input_mode = InputMode::GradeInput;
    }

    /// Accept the typed grade. Empty input clears the entry. Numeric input
    /// is clamped to [0, grade_max] before storage; anything else is
    /// rejected with a flash message and the previous entry is kept.
    pub fn confirm_grade_input(&mut self) {
        let input = self.grade_input.trim().to_string();
        self.input_mode = InputMode::Normal;

        if input.is_empty() {
            self.set_selected_grade("");
            self.grade_input.clear();
            return;
        }

        let Ok(value) = input.parse::<f64>() else {
            self.show_flash(format!("Invalid grade: '{}'", input));
            self.grade_input.clear();
            return;
        };

        let max = self.config.grade_max();
        let clamped = value.clamp(0.0, max);
        let stored = if clamped == value {
            input
        } else {
            format_grade(clamped)
        };
        self.set_selected_grade(&stored);
        self.grade_input.clear();
    }

    pub fn cancel_grade_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.grade_input.clear();
    }

    /// Clear the selected grade entry back to "not entered".
    pub fn clear_selected_grade(&mut self) {
        if self.selected_subject().is_some() {
            self.set_selected_grade("");
        }
    }

    fn set_selected_grade(&mut self, value: &str) {
        let Some((module_idx, subject_idx)) = self.selected_position() else {
            return;
        };
        let module_id = self.modules[module_idx].id.clone();
        let subject_id = self.modules[module_idx].subjects[subject_idx].id.clone();
        // Pure update: the old snapshot is replaced wholesale
        self.modules = with_grade(&self.modules, &module_id, &subject_id, self.field, value);
    }

    /// Switch to the next branch. The catalog is replaced wholesale and
    /// any entered grades are discarded; that is the product behavior,
    /// not an accident.
    pub fn cycle_branch(&mut self) {
        let branch = self.branch.next();
        self.set_branch(branch);
        self.show_flash(format!("Switched to {} (grades reset)", branch.label()));
    }

    pub fn set_branch(&mut self, branch: Branch) {
        self.branch = branch;
        self.strategy = branch.strategy();
        self.modules = match resolve_catalog(&self.config, branch) {
            Ok(modules) => modules,
            Err(e) => {
                self.show_flash(format!("Catalog override rejected: {}", e));
                branch.modules()
            }
        };
        self.selected = 0;
        self.field = GradeField::Exam;
        self.clamp_field();
        self.sync_table_selection();
    }

    /// Write the current snapshot to a dated JSON file in the working
    /// directory.
    pub fn export(&mut self) {
        let report = crate::export::build_report(&self.modules, self.branch);
        let filename = crate::export::default_filename(self.branch);
        match crate::export::write_report(std::path::Path::new(&filename), &report) {
            Ok(()) => self.show_flash(format!("Exported to {}", filename)),
            Err(e) => self.show_flash(format!("Export failed: {}", e)),
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

/// Format a clamped grade without float noise ("20" rather than "20.0").
fn format_grade(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let branch = Branch::Iad;
        App::new(branch, branch.modules(), Config::default(), false)
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        let count = app.subject_count();
        assert!(count > 0);

        app.previous_row();
        assert_eq!(app.selected, count - 1);
        app.next_row();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_field_clamps_to_applicable() {
        let mut app = app();
        // Move onto an exam-only subject while TD is selected
        app.field = GradeField::Td;
        while !matches!(
            app.selected_subject(),
            Some(s) if !s.has_td && !s.has_tp
        ) {
            app.next_row();
            if app.selected == 0 {
                panic!("IAD catalog has no exam-only subject");
            }
        }
        assert_eq!(app.field, GradeField::Exam);
    }

    #[test]
    fn test_field_cycles_through_applicable() {
        let mut app = app();
        // First IAD subject has TD and TP
        let fields = app.selected_subject().unwrap().fields();
        assert_eq!(fields.len(), 3);

        app.field = GradeField::Td;
        app.next_field();
        assert_eq!(app.field, GradeField::Tp);
        app.next_field();
        assert_eq!(app.field, GradeField::Exam);
        app.next_field();
        assert_eq!(app.field, GradeField::Td);
        app.previous_field();
        assert_eq!(app.field, GradeField::Exam);
    }

    #[test]
    fn test_grade_entry_updates_average() {
        let mut app = app();
        app.field = GradeField::Exam;
        app.grade_input = "16".to_string();
        app.confirm_grade_input();

        assert_eq!(app.selected_subject().unwrap().grades.exam, "16");
        assert!(app.semester() > 0.0);
    }

    #[test]
    fn test_grade_entry_clamps_to_max() {
        let mut app = app();
        app.field = GradeField::Exam;
        app.grade_input = "42".to_string();
        app.confirm_grade_input();
        assert_eq!(app.selected_subject().unwrap().grades.exam, "20");
    }

    #[test]
    fn test_invalid_grade_rejected_keeps_previous() {
        let mut app = app();
        app.field = GradeField::Exam;
        app.grade_input = "15".to_string();
        app.confirm_grade_input();

        app.grade_input = "1.2.3".to_string();
        app.confirm_grade_input();
        assert_eq!(app.selected_subject().unwrap().grades.exam, "15");
        assert!(app.flash_message.is_some());
    }

    #[test]
    fn test_empty_input_clears_entry() {
        let mut app = app();
        app.field = GradeField::Exam;
        app.grade_input = "15".to_string();
        app.confirm_grade_input();
        app.grade_input = String::new();
        app.confirm_grade_input();
        assert_eq!(app.selected_subject().unwrap().grades.exam, "");
    }

    #[test]
    fn test_branch_switch_discards_grades() {
        let mut app = app();
        app.field = GradeField::Exam;
        app.grade_input = "16".to_string();
        app.confirm_grade_input();
        assert!(app.semester() > 0.0);

        app.cycle_branch();
        assert_eq!(app.branch, Branch::Gl);
        assert_eq!(app.strategy, Branch::Gl.strategy());
        assert_eq!(app.semester(), 0.0);
        assert_eq!(app.selected, 0);

        // Cycling back does not restore the old entries either
        app.cycle_branch();
        app.cycle_branch();
        app.cycle_branch();
        assert_eq!(app.branch, Branch::Iad);
        assert_eq!(app.semester(), 0.0);
    }

    #[test]
    fn test_table_row_accounts_for_module_headers() {
        let mut app = app();
        // First subject sits under the first module header
        assert_eq!(app.table_state.selected(), Some(1));

        let first_module_len = app.modules[0].subjects.len();
        for _ in 0..first_module_len {
            app.next_row();
        }
        // First subject of the second module: two headers above it
        assert_eq!(app.table_state.selected(), Some(first_module_len + 2));
    }

    #[test]
    fn test_format_grade_strips_float_noise() {
        assert_eq!(format_grade(20.0), "20");
        assert_eq!(format_grade(12.5), "12.5");
    }
}
