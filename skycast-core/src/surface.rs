//! Where rendered reports and errors end up.

use crate::render::{DetailLine, IconImage};

/// A set of display slots the client writes into.
///
/// Every slot method has a no-op default: a surface that does not override one
/// simply lacks that slot, and the update is skipped. Methods take `&self`
/// because overlapping fetches share the surface; implementors use interior
/// mutability where they keep state.
pub trait DisplaySurface: Send + Sync {
    fn set_city(&self, _text: &str) {}

    fn set_temperature(&self, _text: &str) {}

    fn set_description(&self, _text: &str) {}

    /// `None` hides the icon.
    fn set_icon(&self, _icon: Option<&IconImage>) {}

    /// Replaces the detail block with `lines`, which may be empty.
    fn set_details(&self, _lines: &[DetailLine]) {}

    /// Shows `message` in the error slot. Returns `false` when there is no error slot.
    fn show_error(&self, _message: &str) -> bool {
        false
    }

    fn clear_error(&self) {}

    fn set_loading(&self, _visible: bool) {}

    /// Last-resort notification used when the error slot is missing.
    fn alert(&self, message: &str);
}
