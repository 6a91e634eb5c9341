#![forbid(unsafe_code)]

//! One-at-a-time steps.
//!
//! A [`WidgetSequence`] shows its steps one after another: title screen, then
//! the game, then a score screen. Only the first remaining step receives
//! bubbled events and draws. Dispatching [`WidgetSequence::next_key`] to the
//! sequence retires the active step; retiring the last one dispatches
//! [`WidgetSequence::done_key`] to the `on_done` widget.
//!
//! # Invariants
//!
//! 1. At most one step is active.
//! 2. `done` is dispatched exactly once, when the step list becomes empty.
//! 3. `next` on an empty sequence does nothing.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::LazyLock;

use tickui_core::{Cells, Event, EventKey, Flow, Handlers, Widget, WidgetExt};

static NEXT: LazyLock<EventKey<()>> = LazyLock::new(|| EventKey::new("sequence.next"));
static DONE: LazyLock<EventKey<()>> = LazyLock::new(|| EventKey::new("sequence.done"));

/// Shows the first of its remaining steps.
pub struct WidgetSequence {
    handlers: Handlers,
    steps: RefCell<VecDeque<Rc<dyn Widget>>>,
    on_done: Rc<dyn Widget>,
}

impl WidgetSequence {
    /// Sequence `steps`; notify `on_done` after the last one retires.
    #[must_use]
    pub fn new(
        steps: impl IntoIterator<Item = Rc<dyn Widget>>,
        on_done: Rc<dyn Widget>,
    ) -> Rc<Self> {
        let steps: VecDeque<_> = steps.into_iter().collect();
        Rc::new_cyclic(|weak: &Weak<Self>| {
            let handlers = Handlers::new();
            let weak = weak.clone();
            handlers.insert(&*NEXT, move |_: &()| match weak.upgrade() {
                Some(me) => me.advance(),
                None => Ok(()),
            });
            Self {
                handlers,
                steps: RefCell::new(steps),
                on_done,
            }
        })
    }

    /// Retires the active step when dispatched to a sequence.
    #[must_use]
    pub fn next_key() -> EventKey<()> {
        *NEXT
    }

    /// Sent to `on_done` once the last step retires.
    #[must_use]
    pub fn done_key() -> EventKey<()> {
        *DONE
    }

    /// Steps not yet retired, the active one included.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.steps.borrow().len()
    }

    /// The active step.
    #[must_use]
    pub fn active(&self) -> Option<Rc<dyn Widget>> {
        self.steps.borrow().front().cloned()
    }

    fn advance(&self) -> Flow {
        let remaining = {
            let mut steps = self.steps.borrow_mut();
            if steps.pop_front().is_none() {
                return Ok(());
            }
            steps.len()
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "sequence.advance", remaining);
        if remaining == 0 {
            self.on_done.dispatch(&*DONE, &())?;
        }
        Ok(())
    }
}

impl fmt::Debug for WidgetSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetSequence")
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl Widget for WidgetSequence {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn bubble(&self, event: &Event<'_>) -> Flow {
        match self.active() {
            Some(step) => step.dispatch_event(event),
            None => Ok(()),
        }
    }

    fn cells(&self, height: u16, width: u16) -> Cells {
        match self.active() {
            Some(step) => step.cells(height, width),
            None => Box::new(std::iter::empty()),
        }
    }
}
