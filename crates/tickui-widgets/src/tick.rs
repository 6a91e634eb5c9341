#![forbid(unsafe_code)]

//! Slower clocks.

use std::cell::Cell;
use std::fmt;
use std::num::NonZeroU32;
use std::rc::Rc;

use tickui_core::{EventKey, Handlers, TICK, Widget, WidgetExt};

use crate::error::WidgetError;

/// Turns every `n`th `TICK` into `event` on a target.
///
/// Handles `TICK` itself, so ticks do not bubble past it. Mount vars that
/// need committing beside it, not below it.
pub struct TickReducer {
    handlers: Handlers,
    every: NonZeroU32,
}

impl TickReducer {
    /// Dispatch `event` to `target` once every `n` ticks.
    ///
    /// # Errors
    ///
    /// [`WidgetError::ZeroTickInterval`] if `n` is zero.
    pub fn new(n: u32, event: EventKey<()>, target: Rc<dyn Widget>) -> Result<Self, WidgetError> {
        let every = NonZeroU32::new(n).ok_or(WidgetError::ZeroTickInterval)?;
        let seen = Cell::new(0u32);
        let handlers = Handlers::new();
        handlers.insert(&TICK, move |_: &()| {
            let count = seen.get() + 1;
            if count >= every.get() {
                seen.set(0);
                target.dispatch(&event, &())
            } else {
                seen.set(count);
                Ok(())
            }
        });
        Ok(Self { handlers, every })
    }

    /// Ticks per emitted event.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.every.get()
    }
}

impl fmt::Debug for TickReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickReducer")
            .field("every", &self.every)
            .finish()
    }
}

impl Widget for TickReducer {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}
