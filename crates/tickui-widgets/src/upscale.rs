#![forbid(unsafe_code)]

//! Integer scaling.

use std::fmt;
use std::num::NonZeroU16;
use std::rc::Rc;

use tickui_core::{Cells, Event, Flow, Handlers, Widget};

use crate::error::WidgetError;

/// Draws its child at `1/n` resolution and blows every cell up by `n`.
///
/// The child sees an area of `(height / n, width / n)`. Each cell it
/// produces is scaled in both position and extent, so a 1x1 cell becomes an
/// `n` x `n` block. Events pass straight through.
pub struct Upscale {
    handlers: Handlers,
    factor: NonZeroU16,
    child: Rc<dyn Widget>,
}

impl Upscale {
    /// Scale `child` by `n`.
    ///
    /// # Errors
    ///
    /// [`WidgetError::ZeroScale`] if `n` is zero.
    pub fn new(n: u16, child: Rc<dyn Widget>) -> Result<Self, WidgetError> {
        let factor = NonZeroU16::new(n).ok_or(WidgetError::ZeroScale)?;
        Ok(Self {
            handlers: Handlers::new(),
            factor,
            child,
        })
    }

    /// The scale factor.
    #[must_use]
    pub fn factor(&self) -> u16 {
        self.factor.get()
    }
}

impl fmt::Debug for Upscale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upscale")
            .field("factor", &self.factor)
            .finish_non_exhaustive()
    }
}

impl Widget for Upscale {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn bubble(&self, event: &Event<'_>) -> Flow {
        self.child.dispatch_event(event)
    }

    fn cells(&self, height: u16, width: u16) -> Cells {
        let n = self.factor.get();
        Box::new(
            self.child
                .cells(height / n, width / n)
                .map(move |cell| cell.scale(n)),
        )
    }
}
