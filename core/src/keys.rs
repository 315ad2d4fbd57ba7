//! Keyboard handling for the question field.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send the current draft.
    Submit,
    /// Let the field insert a line break.
    InsertNewline,
    /// Anything else is left to the field.
    Passthrough,
}

/// Enter sends, Shift+Enter breaks the line. `key` is a DOM `KeyboardEvent.key` value.
///
/// While an input method is composing, Enter confirms the composition and is
/// left to the field.
pub fn classify(key: &str, shift: bool, composing: bool) -> KeyAction {
    match (key, shift, composing) {
        (_, _, true) => KeyAction::Passthrough,
        ("Enter", false, false) => KeyAction::Submit,
        ("Enter", true, false) => KeyAction::InsertNewline,
        _ => KeyAction::Passthrough,
    }
}
