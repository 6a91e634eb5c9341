#![forbid(unsafe_code)]

//! The widget dispatch protocol.
//!
//! Every widget owns a [`Handlers`] table mapping event keys to handlers.
//! Dispatching an event either runs the handler registered for its key (the
//! event is then *handled* and stops) or hands the event to
//! [`Widget::bubble`], which composites override to forward it to children.
//!
//! Delivery is synchronous and depth-first: `dispatch` returns only after all
//! recursive forwarding has finished. There is no queue.
//!
//! # Quit
//!
//! Every dispatch returns a [`Flow`]. A handler that wants the program to
//! stop returns `Err(Quit)`; composites propagate it with `?`, which stops
//! forwarding to later children and unwinds to the driver.
//!
//! # Invariants
//!
//! 1. `register` overwrites: the last handler registered for a key wins.
//! 2. A registered handler for `K` means dispatching `K` never calls `bubble`.
//! 3. No registered handler for `K` means `bubble` is called exactly once.
//! 4. The handler table is not borrowed while a handler runs, so handlers may
//!    register keys on their own widget.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

use crate::cell::Cells;
use crate::event::{Event, EventKey, KeyId};

// Import tracing macros (no-op when tracing feature is disabled).
#[cfg(feature = "tracing")]
use crate::logging::warn;
#[cfg(not(feature = "tracing"))]
use crate::warn;

// ─── Flow ────────────────────────────────────────────────────────────────────

/// Cooperative stop signal raised by a handler and consumed by the driver.
///
/// Not an error in the usual sense: it carries no payload and nothing inside
/// the widget tree ever catches it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Quit;

impl fmt::Display for Quit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quit requested")
    }
}

impl std::error::Error for Quit {}

/// Outcome of a dispatch.
pub type Flow = Result<(), Quit>;

// ─── Handlers ────────────────────────────────────────────────────────────────

type ErasedHandler = Rc<dyn Fn(&dyn Any) -> Flow>;

/// A widget's handler table.
#[derive(Default)]
pub struct Handlers {
    table: RefCell<AHashMap<KeyId, ErasedHandler>>,
}

impl Handlers {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `key`, replacing any previous handler.
    pub fn insert<P: 'static>(&self, key: &EventKey<P>, handler: impl Fn(&P) -> Flow + 'static) {
        let erased: ErasedHandler = Rc::new(move |payload: &dyn Any| {
            match payload.downcast_ref::<P>() {
                Some(payload) => handler(payload),
                // Typed constructors keep key and payload in step; only an
                // event assembled inside this crate can land here.
                None => {
                    warn!("payload type does not match handler key; event dropped");
                    Ok(())
                }
            }
        });
        self.table.borrow_mut().insert(key.id(), erased);
    }

    /// Remove the handler for `key`. Returns whether one was registered.
    pub fn remove<P>(&self, key: &EventKey<P>) -> bool {
        self.table.borrow_mut().remove(&key.id()).is_some()
    }

    /// Whether a handler is registered for `key`.
    #[must_use]
    pub fn contains<P>(&self, key: &EventKey<P>) -> bool {
        self.table.borrow().contains_key(&key.id())
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    /// Whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.borrow().is_empty()
    }

    fn lookup(&self, id: KeyId) -> Option<ErasedHandler> {
        self.table.borrow().get(&id).cloned()
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("count", &self.len())
            .finish()
    }
}

// ─── Widget ──────────────────────────────────────────────────────────────────

/// A node in the widget tree.
///
/// Implementors supply the handler table; composites also override
/// [`bubble`](Widget::bubble), and anything visible overrides
/// [`cells`](Widget::cells).
pub trait Widget {
    /// This widget's handler table.
    fn handlers(&self) -> &Handlers;

    /// Forward an event no handler claimed. The default drops it.
    fn bubble(&self, event: &Event<'_>) -> Flow {
        let _ = event;
        Ok(())
    }

    /// Drawable output for an area of `height` x `width`. The default is
    /// empty.
    fn cells(&self, height: u16, width: u16) -> Cells {
        let _ = (height, width);
        Box::new(std::iter::empty())
    }

    /// Deliver a type-erased event: run the registered handler or bubble.
    fn dispatch_event(&self, event: &Event<'_>) -> Flow {
        match self.handlers().lookup(event.key_id()) {
            Some(handler) => handler(event.payload_any()),
            None => self.bubble(event),
        }
    }
}

/// Typed conveniences over [`Widget`], available on every widget including
/// `dyn Widget`.
pub trait WidgetExt: Widget {
    /// Register `handler` for `key` on this widget (last registration wins).
    fn register<P: 'static>(&self, key: &EventKey<P>, handler: impl Fn(&P) -> Flow + 'static) {
        self.handlers().insert(key, handler);
    }

    /// Dispatch `payload` on `key` to this widget.
    fn dispatch<P: 'static>(&self, key: &EventKey<P>, payload: &P) -> Flow {
        self.dispatch_event(&Event::new(key, payload))
    }
}

impl<W: Widget + ?Sized> WidgetExt for W {}

// ─── Blank ───────────────────────────────────────────────────────────────────

/// A widget with nothing but a handler table.
///
/// Useful as a default notification target and as a plain event sink.
#[derive(Debug, Default)]
pub struct Blank {
    handlers: Handlers,
}

impl Blank {
    /// Create a blank widget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Widget for Blank {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
