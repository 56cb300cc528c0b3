use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::catalog::Branch;
use crate::grading::types::{GradeField, Subject};
use crate::grading::{module_average, subject_average};
use crate::tui::app::{App, InputMode};
use crate::tui::theme;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Grade table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::GradeInput => render_grade_popup(frame, app),
        InputMode::Help => render_help_popup(frame),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let semester = app.semester();
    let left = "Moyenne S1";
    let right = format!("Moyenne Semestre: {:.2}", semester);
    let padding = (area.width as usize).saturating_sub(left.len() + right.len());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(theme::TITLE_COLOR).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(
            right,
            Style::default().fg(theme::average_color(semester)).bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = Branch::ALL
        .iter()
        .map(|b| b.id().to_uppercase())
        .collect();
    let selected = Branch::ALL
        .iter()
        .position(|b| *b == app.branch)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(Style::default().fg(theme::TITLE_COLOR).bold().reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let branch = app.branch;
    let selected_field = app.field;
    let selected_row = app.table_state.selected();
    let mut rows: Vec<Row<'static>> = Vec::new();
    let mut row_idx = 0usize;

    for module in &app.modules {
        let avg = module_average(&module.subjects, branch);
        rows.push(
            Row::new(vec![
                Cell::from(module.title.clone())
                    .style(Style::default().fg(theme::MODULE_COLOR).bold()),
                Cell::from(""),
                Cell::from(""),
                Cell::from(""),
                Cell::from(""),
                Cell::from(format!("{:>6.2}", avg))
                    .style(Style::default().fg(theme::average_color(avg)).bold()),
            ]),
        );
        row_idx += 1;

        for subject in &module.subjects {
            let is_selected = selected_row == Some(row_idx);
            rows.push(subject_row(subject, branch, selected_field, is_selected));
            row_idx += 1;
        }
    }

    let widths = [
        Constraint::Fill(1),   // Subject title
        Constraint::Length(5), // Coef
        Constraint::Length(6), // TD
        Constraint::Length(6), // TP
        Constraint::Length(6), // Exam
        Constraint::Length(7), // Average
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Matière", "Coef", "TD", "TP", "Exam", "Moy"])
                .style(theme::header_style())
                .bottom_margin(1),
        )
        .row_highlight_style(theme::row_selected());

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn subject_row(
    subject: &Subject,
    branch: Branch,
    selected_field: GradeField,
    is_selected: bool,
) -> Row<'static> {
    let average = subject_average(subject, branch);

    let grade_cell = |field: GradeField, applicable: bool| -> Cell<'static> {
        if !applicable {
            return Cell::from("  —").style(Style::default().fg(theme::FIELD_NA));
        }
        let text = subject.grades.get(field);
        let shown = if text.is_empty() {
            "  ·".to_string()
        } else {
            format!("{:>5}", text)
        };
        let mut style = Style::default();
        if text.is_empty() {
            style = style.fg(theme::MUTED);
        }
        if is_selected && selected_field == field {
            style = Style::default().fg(theme::FIELD_SELECTED).bold();
        }
        Cell::from(shown).style(style)
    };

    Row::new(vec![
        Cell::from(format!("  {}", subject.title)),
        Cell::from(format!("{:>4}", subject.coefficient)),
        grade_cell(GradeField::Td, subject.has_td),
        grade_cell(GradeField::Tp, subject.has_tp),
        grade_cell(GradeField::Exam, true),
        Cell::from(format!("{:>6.2}", average))
            .style(Style::default().fg(theme::average_color(average))),
    ])
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Invalid")
            || msg.starts_with("Export failed")
            || msg.starts_with("Catalog override")
        {
            theme::FLASH_ERROR
        } else {
            theme::FLASH_SUCCESS
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints = [
            ("j/k", ":nav "),
            ("h/l", ":champ "),
            ("Enter", ":saisir "),
            ("x", ":effacer "),
            ("b", ":branche "),
            ("w", ":export "),
            ("?", ":aide "),
            ("q", ":quitter"),
        ];
        let mut spans = vec![
            Span::styled(
                app.branch.label(),
                Style::default().fg(theme::MUTED),
            ),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(theme::STATUS_KEY_COLOR),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme::STATUS_BAR_BG)),
        area,
    );
}

/// Render the grade entry popup
fn render_grade_popup(frame: &mut Frame, app: &App) {
    let Some(subject) = app.selected_subject() else {
        return;
    };

    let popup_area = centered_rect_fixed(46, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let title = format!(" {} — {} ", app.field.label(), subject.title);
    let block = Block::bordered().title(title);
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    let input_text = format!("{}|", app.grade_input);
    frame.render_widget(Paragraph::new(input_text), chunks[0]);

    let help = format!(
        "Enter: confirm | Esc: cancel | empty clears | 0..{}",
        app.config.grade_max()
    );
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(theme::MUTED)),
        chunks[1],
    );
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect_fixed(52, 15, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Keyboard Shortcuts ");
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let entry = |key: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(key, Style::default().fg(Color::Cyan).bold()),
            Span::raw(action),
        ])
    };

    let help_lines = vec![
        entry("j / Down      ", "Next subject"),
        entry("k / Up        ", "Previous subject"),
        entry("h / l / Tab   ", "Select TD / TP / Exam field"),
        entry("Enter / e     ", "Enter a grade"),
        entry("x             ", "Clear the selected grade"),
        entry("b             ", "Next branch (resets grades)"),
        entry("w             ", "Export averages to JSON"),
        entry("?             ", "Show/hide this help"),
        entry("q / Ctrl-c    ", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(theme::MUTED),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
