#![forbid(unsafe_code)]

//! Terminal size as a var.

use tickui_core::{RESIZE, WidgetExt};
use tickui_runtime::Var;

/// Size assumed before the first `RESIZE` arrives.
pub const DEFAULT_SCREEN_SIZE: (u16, u16) = (24, 80);

/// A `(height, width)` var that stages every `RESIZE` it receives.
///
/// Mount it where both `RESIZE` and `TICK` reach it; the new size is
/// committed on the next tick like any other change.
#[must_use]
pub fn screen_size_var() -> Var<(u16, u16)> {
    let var = Var::new("screen_size", DEFAULT_SCREEN_SIZE);
    let handle = var.downgrade();
    var.register(&RESIZE, move |size: &(u16, u16)| {
        if let Some(var) = handle.upgrade() {
            var.change(*size);
        }
        Ok(())
    });
    var
}
