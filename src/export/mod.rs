use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::Branch;
use crate::grading::types::{Grades, Module};
use crate::grading::{semester_average, subject_average};

/// Snapshot of a computed semester, as written to the export file and
/// consumed by print/share tooling. Plain numbers and text only, so the
/// serialization is lossless for a given grade snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub branch: String,
    pub average: f64,
    pub modules: Vec<ModuleReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleReport {
    pub title: String,
    pub subjects: Vec<SubjectReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectReport {
    pub title: String,
    pub grades: Grades,
    pub average: f64,
}

/// Build the export record from the current grade snapshot.
pub fn build_report(modules: &[Module], branch: Branch) -> Report {
    Report {
        branch: branch.label().to_string(),
        average: semester_average(modules, branch),
        modules: modules
            .iter()
            .map(|module| ModuleReport {
                title: module.title.clone(),
                subjects: module
                    .subjects
                    .iter()
                    .map(|subject| SubjectReport {
                        title: subject.title.clone(),
                        grades: subject.grades.clone(),
                        average: subject_average(subject, branch),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Default export filename: moyenne-s1-<branch>-<YYYY-MM-DD>.json
pub fn default_filename(branch: Branch) -> String {
    let date = chrono::Local::now().format("%Y-%m-%d");
    format!("moyenne-s1-{}-{}.json", branch.id(), date)
}

/// Write a report as pretty-printed JSON, atomically so a failed write
/// never leaves a truncated file behind.
pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open export file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, report).context("Failed to serialize report")?;

    file.commit()
        .with_context(|| format!("Failed to write export file at {}", path.display()))?;

    Ok(())
}
