// ABOUTME: Keyboard shortcut registry matching key presses to at most one action
//
// Shortcuts are tried in registration order and the first match wins.
// Modifier expectations are exact: each of ctrl/meta/shift/alt is either
// required or must be absent. Auto-repeat presses never match.
//
// While focus is in a text-entry field every shortcut is suppressed except
// ctrl+K / meta+K, so the command palette stays reachable while typing.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The letter that stays live inside text inputs when combined with ctrl or meta
pub const COMMAND_PALETTE_KEY: char = 'k';

/// Modifier state of a key press, or the exact state a shortcut expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Command / Super / Windows key
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };
}

impl From<KeyModifiers> for Modifiers {
    fn from(m: KeyModifiers) -> Self {
        Self {
            ctrl: m.contains(KeyModifiers::CONTROL),
            meta: m.contains(KeyModifiers::SUPER) || m.contains(KeyModifiers::META),
            shift: m.contains(KeyModifiers::SHIFT),
            alt: m.contains(KeyModifiers::ALT),
        }
    }
}

/// A single key-down as seen by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: char,
    pub modifiers: Modifiers,
    /// Auto-repeat generated by holding the key
    pub repeat: bool,
    /// Focus is inside a text-entry field
    pub in_text_input: bool,
}

impl KeyPress {
    pub fn new(key: char) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            repeat: false,
            in_text_input: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn in_text_input(mut self, focused: bool) -> Self {
        self.in_text_input = focused;
        self
    }

    /// Convert a crossterm key event. Non-character keys and releases yield `None`.
    pub fn from_key_event(event: &KeyEvent, in_text_input: bool) -> Option<Self> {
        let KeyCode::Char(key) = event.code else {
            return None;
        };
        if event.kind == KeyEventKind::Release {
            return None;
        }

        Some(Self {
            key,
            modifiers: event.modifiers.into(),
            repeat: event.kind == KeyEventKind::Repeat,
            in_text_input,
        })
    }
}

/// A registered shortcut
#[derive(Debug, Clone)]
pub struct Shortcut<A> {
    pub key: char,
    pub modifiers: Modifiers,
    pub action: A,
    pub description: &'static str,
}

impl<A> Shortcut<A> {
    /// Shortcut on `key` with no modifiers allowed
    pub fn new(key: char, action: A) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            action,
            description: "",
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Key matches case-insensitively, modifiers match exactly, and the press is not a repeat
    pub fn matches(&self, press: &KeyPress) -> bool {
        !press.repeat
            && self.modifiers == press.modifiers
            && self.key.to_lowercase().eq(press.key.to_lowercase())
    }

    /// ctrl+K / meta+K keep working while typing
    pub fn fires_in_text_input(&self) -> bool {
        self.key.eq_ignore_ascii_case(&COMMAND_PALETTE_KEY) && (self.modifiers.ctrl || self.modifiers.meta)
    }

    /// Human-readable chord, e.g. `Ctrl+K`
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.meta {
            parts.push("Meta".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if parts.is_empty() {
            parts.push(self.key.to_string());
        } else {
            parts.push(self.key.to_uppercase().to_string());
        }
        parts.join("+")
    }
}

impl<A> fmt::Display for Shortcut<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} {}", self.label(), self.description)
    }
}

/// Ordered shortcut registry
#[derive(Debug, Clone)]
pub struct ShortcutDispatcher<A> {
    shortcuts: Vec<Shortcut<A>>,
}

impl<A> Default for ShortcutDispatcher<A> {
    fn default() -> Self {
        Self {
            shortcuts: Vec::new(),
        }
    }
}

impl<A> ShortcutDispatcher<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shortcut; earlier registrations win ties
    pub fn register(&mut self, shortcut: Shortcut<A>) {
        self.shortcuts.push(shortcut);
    }

    pub fn with(mut self, shortcut: Shortcut<A>) -> Self {
        self.register(shortcut);
        self
    }

    pub fn shortcuts(&self) -> &[Shortcut<A>] {
        &self.shortcuts
    }

    /// Shortcut that handles `press`, if any
    pub fn find(&self, press: &KeyPress) -> Option<&Shortcut<A>> {
        self.shortcuts
            .iter()
            .filter(|s| !press.in_text_input || s.fires_in_text_input())
            .find(|s| s.matches(press))
    }

    /// Action bound to `press`, if any
    pub fn dispatch(&self, press: &KeyPress) -> Option<&A> {
        self.find(press).map(|s| &s.action)
    }

    /// Invoke `callback` with the matching action, at most once. Returns whether it fired.
    pub fn handle<F: FnOnce(&A)>(&self, press: &KeyPress, callback: F) -> bool {
        match self.dispatch(press) {
            Some(action) => {
                callback(action);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        PaletteMeta,
        PaletteCtrl,
        Next,
        Save,
    }

    fn dispatcher() -> ShortcutDispatcher<Action> {
        ShortcutDispatcher::new()
            .with(Shortcut::new('k', Action::PaletteMeta).meta())
            .with(Shortcut::new('k', Action::PaletteCtrl).ctrl())
            .with(Shortcut::new('n', Action::Next))
            .with(Shortcut::new('s', Action::Save).ctrl())
    }

    #[test]
    fn test_ctrl_k_fires_exactly_one() {
        let d = dispatcher();
        let mut fired = Vec::new();

        let handled = d.handle(&KeyPress::new('k').with_ctrl(), |a| fired.push(*a));

        assert!(handled);
        assert_eq!(fired, vec![Action::PaletteCtrl]);
    }

    #[test]
    fn test_key_is_case_insensitive_but_shift_must_match() {
        let d = dispatcher();
        assert_eq!(d.dispatch(&KeyPress::new('N')), Some(&Action::Next));
        assert_eq!(d.dispatch(&KeyPress::new('N').with_shift()), None);
    }

    #[test]
    fn test_extra_modifier_prevents_match() {
        let d = dispatcher();
        assert_eq!(d.dispatch(&KeyPress::new('s').with_ctrl().with_alt()), None);
        assert_eq!(d.dispatch(&KeyPress::new('k').with_ctrl().with_meta()), None);
        assert_eq!(d.dispatch(&KeyPress::new('s')), None);
    }

    #[test]
    fn test_repeat_never_matches() {
        let d = dispatcher();
        assert_eq!(d.dispatch(&KeyPress::new('n').repeated()), None);
        assert_eq!(d.dispatch(&KeyPress::new('k').with_ctrl().repeated()), None);
    }

    #[test]
    fn test_text_input_suppresses_all_but_palette() {
        let d = dispatcher();
        assert_eq!(d.dispatch(&KeyPress::new('n').in_text_input(true)), None);
        assert_eq!(
            d.dispatch(&KeyPress::new('s').with_ctrl().in_text_input(true)),
            None
        );
        assert_eq!(d.dispatch(&KeyPress::new('k').in_text_input(true)), None);
        assert_eq!(
            d.dispatch(&KeyPress::new('k').with_meta().in_text_input(true)),
            Some(&Action::PaletteMeta)
        );
    }

    #[test]
    fn test_first_registration_wins() {
        let d = ShortcutDispatcher::new()
            .with(Shortcut::new('x', 1))
            .with(Shortcut::new('x', 2));
        assert_eq!(d.dispatch(&KeyPress::new('x')), Some(&1));
    }

    #[test]
    fn test_from_key_event() {
        let mut event = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        let press = KeyPress::from_key_event(&event, true).unwrap();
        assert!(press.modifiers.ctrl);
        assert!(press.in_text_input);
        assert!(!press.repeat);

        event.kind = KeyEventKind::Repeat;
        assert!(KeyPress::from_key_event(&event, false).unwrap().repeat);

        event.kind = KeyEventKind::Release;
        assert!(KeyPress::from_key_event(&event, false).is_none());

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(KeyPress::from_key_event(&enter, false).is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Shortcut::new('k', ()).ctrl().label(), "Ctrl+K");
        assert_eq!(Shortcut::new('n', ()).label(), "n");
    }
}
