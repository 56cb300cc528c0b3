use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::catalog::{Branch, SemesterStrategy};
use crate::grading::types::Module;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the list of known branches, one per line: "id  label  strategy".
pub fn format_branch_list(use_colors: bool) -> String {
    Branch::ALL
        .iter()
        .map(|branch| {
            let strategy = match branch.strategy() {
                SemesterStrategy::CreditWeighted => "credit-weighted".to_string(),
                SemesterStrategy::FixedCoefficientTotal { divisor } => {
                    format!("coefficient-weighted / {}", divisor)
                }
            };
            if use_colors {
                format!(
                    "{:<4} {} ({})",
                    branch.id().cyan().bold(),
                    branch.label(),
                    strategy.dimmed()
                )
            } else {
                format!("{:<4} {} ({})", branch.id(), branch.label(), strategy)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a branch catalog as a reference table: modules with their
/// subjects, coefficients, credits and assessment components.
pub fn format_catalog(branch: Branch, modules: &[Module], use_colors: bool) -> String {
    let mut lines = Vec::new();

    if use_colors {
        lines.push(format!("{}", branch.label().bold()));
    } else {
        lines.push(branch.label().to_string());
    }
    lines.push(String::new());

    let title_width = subject_title_width(modules);

    for module in modules {
        if use_colors {
            lines.push(format!("{}", module.title.cyan().bold()));
        } else {
            lines.push(module.title.clone());
        }
        for subject in &module.subjects {
            let components = match (subject.has_td, subject.has_tp) {
                (true, true) => "TD+TP",
                (true, false) => "TD",
                (false, true) => "TP",
                (false, false) => "Exam only",
            };
            let line = format!(
                "  {:<width$}  coef {:<3} cr {:<3} {}",
                truncate(&subject.title, title_width),
                subject.coefficient,
                subject.credits,
                components,
                width = title_width,
            );
            lines.push(line);
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Widest subject title, capped to what the terminal can show.
fn subject_title_width(modules: &[Module]) -> usize {
    let longest = modules
        .iter()
        .flat_map(|m| m.subjects.iter())
        .map(|s| s.title.chars().count())
        .max()
        .unwrap_or(0);
    let cap = terminal_width().map(|w| w.saturating_sub(30)).unwrap_or(60);
    longest.min(cap.max(20))
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}
