#![forbid(unsafe_code)]

//! Fixed list of children.
//!
//! [`Group`] forwards every event it does not handle itself to each child in
//! list order and draws the children's cells in the same order, so later
//! children paint over earlier ones.
//!
//! # Invariants
//!
//! 1. Children see a bubbled event in list order, each exactly once.
//! 2. A child returning `Quit` stops delivery; later children never see the
//!    event.

use std::fmt;
use std::rc::Rc;

use tickui_core::{Cells, Event, Flow, Handlers, Widget};

/// Fans events out to a fixed list of children.
pub struct Group {
    handlers: Handlers,
    children: Rc<[Rc<dyn Widget>]>,
}

impl Group {
    /// Group `children`, in delivery and drawing order.
    #[must_use]
    pub fn new(children: impl IntoIterator<Item = Rc<dyn Widget>>) -> Self {
        Self {
            handlers: Handlers::new(),
            children: children.into_iter().collect(),
        }
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("children", &self.children.len())
            .finish()
    }
}

impl Widget for Group {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn bubble(&self, event: &Event<'_>) -> Flow {
        for child in self.children.iter() {
            child.dispatch_event(event)?;
        }
        Ok(())
    }

    fn cells(&self, height: u16, width: u16) -> Cells {
        let children = Rc::clone(&self.children);
        Box::new(
            (0..children.len()).flat_map(move |i| children[i].cells(height, width)),
        )
    }
}
