pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // 250ms tick drives flash message expiry
    let mut events = EventHandler::new(250);

    loop {
        // Every draw recomputes all averages from the current snapshot,
        // so grades re-render live as they change.
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Subject navigation
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

            // Grade field navigation
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.next_field(),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => app.previous_field(),

            // Grade entry
            KeyCode::Enter | KeyCode::Char('e') => app.start_grade_input(),
            KeyCode::Char('x') => app.clear_selected_grade(),

            // Branch switch (wholesale catalog replacement)
            KeyCode::Char('b') => app.cycle_branch(),

            // Export
            KeyCode::Char('w') => app.export(),

            // Help
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::GradeInput => match key.code {
            KeyCode::Enter => app.confirm_grade_input(),
            KeyCode::Esc => app.cancel_grade_input(),
            KeyCode::Backspace => {
                app.grade_input.pop();
            }
            // Grade input only accepts numeric text
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                app.grade_input.push(c);
            }
            // Ignore all other keys (don't propagate to Normal mode)
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Branch;
    use crate::config::Config;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn app() -> App {
        let branch = Branch::Gl;
        App::new(branch, branch.modules(), Config::default(), false)
    }

    #[test]
    fn test_q_quits_in_normal_mode() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_grade_input_swallows_q() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.input_mode, app::InputMode::GradeInput);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_typed_digits_reach_the_buffer() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Enter));
        app.grade_input.clear();
        for c in ['1', '2', '.', '5', 'a'] {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        // 'a' is ignored by the numeric filter
        assert_eq!(app.grade_input, "12.5");

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert_eq!(app.selected_subject().unwrap().grades.exam, "12.5");
    }

    #[test]
    fn test_escape_cancels_edit() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Enter));
        handle_key_event(&mut app, key(KeyCode::Char('9')));
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert_eq!(app.selected_subject().unwrap().grades.exam, "");
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.input_mode, app::InputMode::Help);
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert_eq!(app.selected, 0);
    }
}
