use crate::session::messages::Msg;
use crate::session::state::SessionState;
use cosmic::iced::keyboard::{Key, Modifiers, key::Named};

pub fn handle_key_event(state: &SessionState, key: Key, modifiers: Modifiers) -> Option<Msg> {
    match key {
        // Ctrl+O: open the selected file as base image
        Key::Character(c) if c.as_str() == "o" && modifiers.control() => Some(Msg::OpenBaseImage),
        // Ctrl+N: add the selected file as a signature
        Key::Character(c) if c.as_str() == "n" && modifiers.control() => Some(Msg::AddSignature),
        // Ctrl+S: save, only once a base image is loaded
        Key::Character(c) if c.as_str() == "s" && modifiers.control() && state.can_save() => {
            Some(Msg::SaveImage)
        }
        Key::Named(Named::F9) => Some(Msg::ToggleFileChooser),
        // Browser navigation only while the browser is shown
        Key::Named(Named::Backspace) if state.browser.is_visible() => Some(Msg::go_up()),
        Key::Named(Named::F5) if state.browser.is_visible() => Some(Msg::refresh()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BrowserOptions, FileBrowser};
    use crate::config::SigstampConfig;

    fn state() -> SessionState {
        let browser = FileBrowser::empty("/", BrowserOptions::default());
        SessionState::new(SigstampConfig::default(), browser)
    }

    #[test]
    fn test_save_shortcut_requires_base_image() {
        let state = state();
        let key = Key::Character("s".into());
        assert_eq!(handle_key_event(&state, key, Modifiers::CTRL), None);
    }

    #[test]
    fn test_toolbar_shortcuts() {
        let state = state();
        assert_eq!(
            handle_key_event(&state, Key::Character("o".into()), Modifiers::CTRL),
            Some(Msg::OpenBaseImage)
        );
        assert_eq!(
            handle_key_event(&state, Key::Character("n".into()), Modifiers::CTRL),
            Some(Msg::AddSignature)
        );
        assert_eq!(
            handle_key_event(&state, Key::Character("o".into()), Modifiers::empty()),
            None
        );
        assert_eq!(
            handle_key_event(&state, Key::Named(Named::F9), Modifiers::empty()),
            Some(Msg::ToggleFileChooser)
        );
    }

    #[test]
    fn test_navigation_only_when_browser_visible() {
        let mut state = state();
        assert_eq!(
            handle_key_event(&state, Key::Named(Named::Backspace), Modifiers::empty()),
            Some(Msg::go_up())
        );
        state.browser.hide();
        assert_eq!(
            handle_key_event(&state, Key::Named(Named::Backspace), Modifiers::empty()),
            None
        );
    }
}
