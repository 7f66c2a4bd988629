use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Screen};

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return app.quit(),
        _ => {}
    }

    match &app.screen {
        Screen::Tree(_) => handle_tree_key(app, key),
        Screen::Ticker(_) => handle_ticker_key(app, key),
    }
}

fn handle_tree_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => return app.reload_source(),
        KeyCode::Char('i') => return app.toggle_icons(),
        KeyCode::Char('|') => return app.toggle_indicator(),
        _ => {}
    }

    let Some(tree) = app.tree_mut() else {
        return;
    };
    let view = &mut tree.view;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => view.select_next(),
        KeyCode::Char('k') | KeyCode::Up => view.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => view.select_first(),
        KeyCode::Char('G') | KeyCode::End => view.select_last(),
        KeyCode::Enter | KeyCode::Char(' ') => view.toggle_selected(),
        KeyCode::Char('l') | KeyCode::Right => view.expand_selected(),
        KeyCode::Char('h') | KeyCode::Left => view.collapse_selected(),
        _ => {}
    }
}

fn handle_ticker_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('d') => app.cycle_direction(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_speed(true),
        KeyCode::Char('-') => app.adjust_speed(false),
        KeyCode::Char('p') => app.toggle_pause_on_hover(),
        _ => {}
    }
}

/// Handle a mouse event. Only pointer position matters: it drives
/// hover-to-pause on the ticker.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved
        | MouseEventKind::Down(_)
        | MouseEventKind::Drag(_)
        | MouseEventKind::Up(_) => app.pointer_at(mouse.column, mouse.row),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TreeScreen;
    use crate::theme;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use tinita::config::AppConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn tree_app(text: &str) -> App {
        let screen = Screen::Tree(TreeScreen::new(text, None, &AppConfig::default()));
        App::new(screen, theme::dark_theme())
    }

    fn selected_name(app: &mut App) -> String {
        app.tree_mut().unwrap().view.selected().unwrap().name.clone()
    }

    #[test]
    fn test_quit_keys() {
        let mut app = tree_app("a");
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = tree_app("a");
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_tree_navigation_keys() {
        let mut app = tree_app("root\n  a\n  b");
        handle_key_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(selected_name(&mut app), "a");
        handle_key_event(&mut app, key(KeyCode::Char('G')));
        assert_eq!(selected_name(&mut app), "b");
        handle_key_event(&mut app, key(KeyCode::Char('g')));
        assert_eq!(selected_name(&mut app), "root");
    }

    #[test]
    fn test_tree_collapse_with_enter() {
        let mut app = tree_app("root\n  a\n  b");
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.tree_mut().unwrap().view.rows().len(), 1);
        handle_key_event(&mut app, key(KeyCode::Char('l')));
        assert_eq!(app.tree_mut().unwrap().view.rows().len(), 3);
    }

    #[test]
    fn test_tree_display_toggles() {
        let mut app = tree_app("root\n  a");
        handle_key_event(&mut app, key(KeyCode::Char('i')));
        handle_key_event(&mut app, key(KeyCode::Char('|')));
        let tree = app.tree_mut().unwrap();
        assert!(!tree.use_icons);
        assert!(!tree.indicator);
    }
}
