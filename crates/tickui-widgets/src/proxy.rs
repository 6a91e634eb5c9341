#![forbid(unsafe_code)]

//! Late-bound single child.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tickui_core::{Cells, Event, Flow, Handlers, Widget};

/// Stands in for a widget that does not exist yet, or that gets swapped out
/// wholesale. Until [`Proxy::set`] is called it drops events and draws
/// nothing.
#[derive(Default)]
pub struct Proxy {
    handlers: Handlers,
    target: RefCell<Option<Rc<dyn Widget>>>,
}

impl Proxy {
    /// An unbound proxy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route to `widget` from now on.
    pub fn set(&self, widget: Rc<dyn Widget>) {
        *self.target.borrow_mut() = Some(widget);
    }

    /// Unbind, returning the previous target.
    pub fn clear(&self) -> Option<Rc<dyn Widget>> {
        self.target.borrow_mut().take()
    }

    /// Whether a target is set.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.target.borrow().is_some()
    }

    fn current(&self) -> Option<Rc<dyn Widget>> {
        self.target.borrow().clone()
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl Widget for Proxy {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn bubble(&self, event: &Event<'_>) -> Flow {
        match self.current() {
            Some(target) => target.dispatch_event(event),
            None => Ok(()),
        }
    }

    fn cells(&self, height: u16, width: u16) -> Cells {
        match self.current() {
            Some(target) => target.cells(height, width),
            None => Box::new(std::iter::empty()),
        }
    }
}
