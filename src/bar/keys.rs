use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

/// Modifier standing in for the platform command key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutModifier {
    Alt,
    Control,
    Super,
}

impl ShortcutModifier {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "alt" | "option" => Some(Self::Alt),
            "control" | "ctrl" => Some(Self::Control),
            "super" | "command" | "cmd" => Some(Self::Super),
            _ => None,
        }
    }

    pub fn flag(self) -> KeyModifiers {
        match self {
            Self::Alt => KeyModifiers::ALT,
            Self::Control => KeyModifiers::CONTROL,
            Self::Super => KeyModifiers::SUPER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Alt => "⌥",
            Self::Control => "^",
            Self::Super => "⌘",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarCommand {
    MoveDown,
    MoveUp,
    InsertNewline,
    Cancel,
    MoveLeft,
    FocusNext,
    Shortcut(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub preset: KeymapPreset,
    pub shortcut_modifier: ShortcutModifier,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            preset: KeymapPreset::Default,
            shortcut_modifier: ShortcutModifier::Alt,
        }
    }
}

impl KeyBindings {
    pub fn command_for_key(&self, key: KeyEvent) -> Option<BarCommand> {
        if key.modifiers.contains(self.shortcut_modifier.flag())
            && let KeyCode::Char(ch) = key.code
            && let Some(digit) = ch.to_digit(10)
        {
            return Some(BarCommand::Shortcut(digit as u8));
        }

        if self.preset == KeymapPreset::Emacs && key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => return Some(BarCommand::MoveDown),
                KeyCode::Char('p') => return Some(BarCommand::MoveUp),
                KeyCode::Char('g') => return Some(BarCommand::Cancel),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Down => Some(BarCommand::MoveDown),
            KeyCode::Up => Some(BarCommand::MoveUp),
            KeyCode::Enter => Some(BarCommand::InsertNewline),
            KeyCode::Esc => Some(BarCommand::Cancel),
            KeyCode::Left => Some(BarCommand::MoveLeft),
            KeyCode::Tab | KeyCode::BackTab => Some(BarCommand::FocusNext),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{BarCommand, KeyBindings, KeymapPreset, ShortcutModifier};

    #[test]
    fn keymap_preset_parse_defaults_on_unknown_values() {
        assert_eq!(KeymapPreset::parse("default"), KeymapPreset::Default);
        assert_eq!(KeymapPreset::parse("emacs"), KeymapPreset::Emacs);
        assert_eq!(KeymapPreset::parse("vim"), KeymapPreset::Default);
    }

    #[test]
    fn shortcut_requires_configured_modifier() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.command_for_key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::ALT)),
            Some(BarCommand::Shortcut(2))
        );
        assert_eq!(
            bindings.command_for_key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE)),
            None
        );

        let bindings = KeyBindings {
            shortcut_modifier: ShortcutModifier::Super,
            ..KeyBindings::default()
        };
        assert_eq!(
            bindings.command_for_key(KeyEvent::new(KeyCode::Char('0'), KeyModifiers::SUPER)),
            Some(BarCommand::Shortcut(0))
        );
    }

    #[test]
    fn emacs_preset_maps_ctrl_n_p_g() {
        let bindings = KeyBindings {
            preset: KeymapPreset::Emacs,
            ..KeyBindings::default()
        };
        let ctrl = |ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL);

        assert_eq!(bindings.command_for_key(ctrl('n')), Some(BarCommand::MoveDown));
        assert_eq!(bindings.command_for_key(ctrl('p')), Some(BarCommand::MoveUp));
        assert_eq!(bindings.command_for_key(ctrl('g')), Some(BarCommand::Cancel));
        assert_eq!(KeyBindings::default().command_for_key(ctrl('n')), None);
    }

    #[test]
    fn modifier_names_parse() {
        assert_eq!(ShortcutModifier::parse("cmd"), Some(ShortcutModifier::Super));
        assert_eq!(ShortcutModifier::parse("ctrl"), Some(ShortcutModifier::Control));
        assert_eq!(ShortcutModifier::parse("hyper"), None);
    }
}
