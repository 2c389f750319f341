// src/tui/input.rs  —  crossterm key → App action
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus};
use crate::form::Payload;

/// Apply one key press. Returns a payload when the press started a submit.
pub fn handle_key(app: &mut App, k: KeyEvent) -> Option<Payload> {
    if k.kind == KeyEventKind::Release {
        return None;
    }
    // AltGr arrives as CONTROL|ALT on Windows; that is a typed character.
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL)
        && !k.modifiers.contains(KeyModifiers::ALT);

    // Ctrl+C always quits
    if ctrl && k.code == KeyCode::Char('c') {
        app.quit = true;
        return None;
    }

    // Blocking alert: only acknowledge it
    if app.alert.is_some() {
        if matches!(k.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return None;
    }

    match k.code {
        KeyCode::Esc            => app.quit = true,
        KeyCode::Tab            => app.next_focus(),
        KeyCode::BackTab        => app.prev_focus(),
        KeyCode::F(2)           => app.toggle_mode(),
        KeyCode::Char('n') if ctrl => app.add_statement(),
        KeyCode::Char('d') if ctrl => app.remove_focused_statement(),
        KeyCode::Char('s') if ctrl => return app.request_submit(),
        KeyCode::Left  if app.focus == Focus::Language => app.cycle_language(-1),
        KeyCode::Right if app.focus == Focus::Language => app.cycle_language(1),
        KeyCode::Enter if app.focus == Focus::Translate => return app.request_submit(),
        KeyCode::Enter          => app.insert_char('\n'),
        KeyCode::Backspace      => app.backspace(),
        KeyCode::Char(c) if !ctrl => app.insert_char(c),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }
    fn ctrl(c: char) -> KeyEvent { KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL) }

    #[test]
    fn enter_inserts_newline_in_text_fields() {
        let mut app = App::new(&AppConfig::default());
        for code in [KeyCode::Char('a'), KeyCode::Enter, KeyCode::Char('b')] {
            handle_key(&mut app, key(code));
        }
        assert_eq!(app.form.state().statements[0].value, "a\nb");
    }

    #[test]
    fn ctrl_shortcuts() {
        let mut app = App::new(&AppConfig::default());
        handle_key(&mut app, ctrl('n'));
        assert_eq!(app.form.state().statements.len(), 2);
        handle_key(&mut app, ctrl('d'));
        assert_eq!(app.form.state().statements.len(), 1);
        assert!(handle_key(&mut app, ctrl('s')).is_some());
        assert!(app.form.state().busy);
        // Disabled while busy
        assert!(handle_key(&mut app, ctrl('s')).is_none());
    }

    #[test]
    fn altgr_characters_reach_the_json_editor() {
        let mut app = App::new(&AppConfig::default());
        handle_key(&mut app, key(KeyCode::F(2)));
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        for c in ['{', '"', 'a', '"', ':', '@', '}'] {
            let mods = if matches!(c, '{' | '}' | '@') { altgr } else { KeyModifiers::NONE };
            handle_key(&mut app, KeyEvent::new(KeyCode::Char(c), mods));
        }
        assert_eq!(app.form.state().raw_json, r#"{"a":@}"#);
        // Ctrl+Alt letters are characters too, not shortcuts
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), altgr));
        assert!(!app.quit);
    }

    #[test]
    fn enter_on_translate_submits() {
        let mut app = App::new(&AppConfig::default());
        app.focus = Focus::Translate;
        assert!(handle_key(&mut app, key(KeyCode::Enter)).is_some());
    }

    #[test]
    fn alert_swallows_keys_until_dismissed() {
        let mut app = App::new(&AppConfig::default());
        app.alert = Some("Translation failed".into());
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.form.state().statements[0].value, "");
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.alert.is_none());
        assert!(!app.quit);
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.quit);
    }

    #[test]
    fn f2_toggles_mode_and_arrows_pick_language() {
        let mut app = App::new(&AppConfig::default());
        handle_key(&mut app, key(KeyCode::F(2)));
        assert_eq!(app.focus, Focus::JsonEditor);
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.form.state().target_language, "english");
    }
}
