#![forbid(unsafe_code)]

//! Var-to-event bridge.

use std::fmt;
use std::rc::Rc;

use tickui_core::{EventKey, Handlers, Widget, WidgetExt};
use tickui_runtime::Var;

/// Dispatches `event` to a target whenever a `Var<bool>` commits `true`.
///
/// The watch is installed on the var and lives as long as the var does; the
/// `WhenTrue` value itself is an inert widget that may be mounted or dropped.
pub struct WhenTrue {
    handlers: Handlers,
}

impl WhenTrue {
    #[must_use]
    pub fn new(var: &Var<bool>, event: EventKey<()>, target: Rc<dyn Widget>) -> Self {
        var.watch(move |value| {
            if *value {
                target.dispatch(&event, &())
            } else {
                Ok(())
            }
        });
        Self {
            handlers: Handlers::new(),
        }
    }
}

impl fmt::Debug for WhenTrue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhenTrue").finish_non_exhaustive()
    }
}

impl Widget for WhenTrue {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}
