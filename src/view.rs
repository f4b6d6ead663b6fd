//! The visual surfaces a controller writes to.
//!
//! The page (or a Yew component) owns the actual elements; controllers only
//! see these traits.

/// Anything exposing settable text content.
pub trait TextView {
    fn set_text(&self, text: &str);
}

/// A bar whose width follows a percentage in `0..=100`.
pub trait ProgressView {
    fn set_percent(&self, percent: u8);
}

/// The clickable trigger of an action.
pub trait ButtonView {
    /// Identifier carried by the trigger (e.g. a student id), if any.
    fn identifier(&self) -> Option<String>;

    /// Toggle the disabled/busy marking.
    fn set_busy(&self, busy: bool);

    /// Visible label as currently rendered.
    fn label(&self) -> String;

    fn set_label(&self, label: &str);
}
