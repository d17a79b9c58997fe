/// High-level events with element targeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse click, targeted at the element under the pointer
    /// (`None` for clicks that land on no element).
    Click { target: Option<String> },
    /// Text typed into an input element; carries the full new value.
    Input { target: String, value: String },
    /// A checkbox changed state.
    Toggle { target: String, checked: bool },
    /// Key press event.
    Key { key: Key, modifiers: Modifiers },
}

impl Event {
    pub fn click(target: impl Into<String>) -> Self {
        Event::Click {
            target: Some(target.into()),
        }
    }

    pub fn click_nowhere() -> Self {
        Event::Click { target: None }
    }

    pub fn input(target: impl Into<String>, value: impl Into<String>) -> Self {
        Event::Input {
            target: target.into(),
            value: value.into(),
        }
    }

    pub fn toggle(target: impl Into<String>, checked: bool) -> Self {
        Event::Toggle {
            target: target.into(),
            checked,
        }
    }

    pub fn key(key: Key) -> Self {
        Event::Key {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// The target element id, if this event has one.
    pub fn target(&self) -> Option<&str> {
        match self {
            Event::Click { target } => target.as_deref(),
            Event::Input { target, .. } | Event::Toggle { target, .. } => Some(target),
            Event::Key { .. } => None,
        }
    }
}

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

// Conversion from crossterm types so a terminal host can feed key events
// straight into Document::dispatch.
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for Event {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Event::Key {
            key: event.code.into(),
            modifiers: event.modifiers.into(),
        }
    }
}
