use crate::element::NodeId;

/// What happened, independent of where it is being delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Key press, targeted at the focused element
    KeyDown { key: Key, modifiers: Modifiers },
    /// Mouse click (or programmatic activation)
    Click { button: MouseButton },
    /// Element gained focus; `related_target` lost it
    FocusIn { related_target: Option<NodeId> },
    /// Element lost focus; `related_target` is gaining it
    FocusOut { related_target: Option<NodeId> },
    /// Component-emitted notification, optionally carrying the event that caused it
    Custom {
        name: String,
        detail: Option<Box<Event>>,
    },
}

/// An event travelling along its propagation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    pub current_target: NodeId,
    pub bubbles: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            bubbles: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn key_down(target: NodeId, key: Key, modifiers: Modifiers) -> Self {
        Self::new(EventKind::KeyDown { key, modifiers }, target)
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(
            EventKind::Click {
                button: MouseButton::Left,
            },
            target,
        )
    }

    pub fn custom(target: NodeId, name: impl Into<String>, detail: Option<Event>) -> Self {
        Self::new(
            EventKind::Custom {
                name: name.into(),
                detail: detail.map(Box::new),
            },
            target,
        )
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// True while the event is delivered to its own target (not bubbled).
    pub fn is_from_self(&self) -> bool {
        self.target == self.current_target
    }

    /// The key of a key-down event.
    pub fn key(&self) -> Option<Key> {
        match &self.kind {
            EventKind::KeyDown { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Name of a custom event.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Custom { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&Event> {
        match &self.kind {
            EventKind::Custom { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn related_target(&self) -> Option<NodeId> {
        match &self.kind {
            EventKind::FocusIn { related_target } | EventKind::FocusOut { related_target } => {
                *related_target
            }
            _ => None,
        }
    }
}

/// Simplified key representation
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

/// Key modifiers
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

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

// Conversion from crossterm types
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

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}
