#![forbid(unsafe_code)]

//! A child rebuilt from a var.
//!
//! [`Reactive`] keeps one child widget built by `render(&value)`. Whenever
//! the bound var commits, the child is replaced with a fresh one. Events the
//! `Reactive` does not handle itself go to the current child, and so do draw
//! requests.
//!
//! The `Reactive` owns its source var; the var only holds the `Reactive`
//! weakly, so dropping the widget tree releases both.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tickui_core::{Cells, DEFAULT_CHANGE_PREFIX, Event, Flow, Handlers, Widget, change_key};
use tickui_runtime::Var;

type Render<P> = Box<dyn Fn(&P) -> Rc<dyn Widget>>;

/// Widget whose child follows a var.
pub struct Reactive<P> {
    handlers: Handlers,
    child: RefCell<Rc<dyn Widget>>,
    render: Render<P>,
    source: Var<P>,
}

impl<P: Clone + 'static> Reactive<P> {
    /// Bind to `var`, building the first child from its committed value.
    #[must_use]
    pub fn new(var: &Var<P>, render: impl Fn(&P) -> Rc<dyn Widget> + 'static) -> Rc<Self> {
        let first = render(&var.value());
        let reactive = Rc::new_cyclic(|weak: &Weak<Self>| {
            let handlers = Handlers::new();
            let weak = weak.clone();
            handlers.insert(&change_key::<P>(DEFAULT_CHANGE_PREFIX), move |value: &P| {
                if let Some(me) = weak.upgrade() {
                    me.rebuild(value);
                }
                Ok(())
            });
            Self {
                handlers,
                child: RefCell::new(first),
                render: Box::new(render),
                source: var.clone(),
            }
        });

        let widget: Rc<dyn Widget> = reactive.clone();
        // Priming only rebuilds the child, which never quits.
        let _ = var.subscribe(&change_key::<P>(DEFAULT_CHANGE_PREFIX), &widget);
        reactive
    }

    /// The var this widget follows.
    #[must_use]
    pub fn source(&self) -> &Var<P> {
        &self.source
    }

    /// The current child.
    #[must_use]
    pub fn child(&self) -> Rc<dyn Widget> {
        Rc::clone(&self.child.borrow())
    }

    fn rebuild(&self, value: &P) {
        let next = (self.render)(value);
        *self.child.borrow_mut() = next;
        #[cfg(feature = "tracing")]
        tracing::trace!(message = "reactive.rebuild", var = self.source.name());
    }
}

impl<P> fmt::Debug for Reactive<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reactive").finish_non_exhaustive()
    }
}

impl<P: Clone + 'static> Widget for Reactive<P> {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn bubble(&self, event: &Event<'_>) -> Flow {
        self.child().dispatch_event(event)
    }

    fn cells(&self, height: u16, width: u16) -> Cells {
        self.child().cells(height, width)
    }
}
