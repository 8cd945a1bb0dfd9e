// ABOUTME: Tests for the shortcut dispatcher's matching rules through the public API

use assessment_wizard::app::events::AppEvent;
use assessment_wizard::app::state::default_shortcuts;
use assessment_wizard::shortcuts::{KeyPress, Shortcut, ShortcutDispatcher};
use std::cell::Cell;

#[test]
fn test_ctrl_k_with_both_palette_bindings_fires_once() {
    let dispatcher = ShortcutDispatcher::new()
        .with(Shortcut::new('k', "meta-palette").meta())
        .with(Shortcut::new('k', "ctrl-palette").ctrl());
    let calls = Cell::new(0);

    let fired = dispatcher.handle(&KeyPress::new('k').with_ctrl(), |action| {
        assert_eq!(*action, "ctrl-palette");
        calls.set(calls.get() + 1);
    });

    assert!(fired);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_text_input_only_lets_palette_through() {
    let dispatcher = default_shortcuts();

    for shortcut in dispatcher.shortcuts() {
        let mut press = KeyPress::new(shortcut.key).in_text_input(true);
        press.modifiers = shortcut.modifiers;

        let expected = shortcut.key == 'k' && (shortcut.modifiers.ctrl || shortcut.modifiers.meta);
        assert_eq!(
            dispatcher.dispatch(&press).is_some(),
            expected,
            "{} while typing",
            shortcut.label()
        );
    }
}

#[test]
fn test_uppercase_key_matches_lowercase_binding() {
    let dispatcher = default_shortcuts();
    assert_eq!(
        dispatcher.dispatch(&KeyPress::new('S').with_ctrl()),
        Some(&AppEvent::SaveDraft)
    );
}

#[test]
fn test_unbound_and_over_modified_presses_do_nothing() {
    let dispatcher = default_shortcuts();
    let mut fired = false;

    assert!(!dispatcher.handle(&KeyPress::new('z'), |_| fired = true));
    assert!(!dispatcher.handle(&KeyPress::new('s').with_ctrl().with_shift(), |_| fired = true));
    assert!(!dispatcher.handle(&KeyPress::new('n').with_alt(), |_| fired = true));
    assert!(!fired);
}

#[test]
fn test_default_bindings_are_described() {
    for shortcut in default_shortcuts().shortcuts() {
        assert!(!shortcut.description.is_empty(), "{} has no description", shortcut.label());
    }
}
