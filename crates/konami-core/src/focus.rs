#![forbid(unsafe_code)]

//! What holds keyboard focus when a key arrives.
//!
//! Cheats are not matched while the user is typing into a form-like element,
//! unless the service is told to ignore form elements.

/// The kind of element that currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusKind {
    /// Nothing focused (document/body level).
    #[default]
    None,
    /// Single-line text input.
    Input,
    /// Drop-down select.
    Select,
    /// An option inside a select or list box.
    Option,
    /// Multi-line text area.
    TextArea,
    /// Push button.
    Button,
    /// Any element with editable content.
    ContentEditable,
    /// Some other, non-editable element.
    Other,
}

impl FocusKind {
    /// Whether keystrokes would go into a form or form-like element.
    #[must_use]
    pub const fn is_form_like(self) -> bool {
        matches!(
            self,
            Self::Input
                | Self::Select
                | Self::Option
                | Self::TextArea
                | Self::Button
                | Self::ContentEditable
        )
    }
}
