#![forbid(unsafe_code)]

//! Open-ended fan-out.
//!
//! A [`Bus`] behaves like a `Group` whose children arrive after
//! construction. Typical use: create the bus first, hand it to widgets that
//! need a place to mount vars, then mount the bus in the tree.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tickui_core::{Event, Flow, Handlers, Widget};
use tickui_runtime::Var;

/// Forwards events to listeners added with [`Bus::listen`].
///
/// A bus draws nothing.
#[derive(Default)]
pub struct Bus {
    handlers: Handlers,
    listeners: RefCell<Vec<Rc<dyn Widget>>>,
}

impl Bus {
    /// An empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `child` to the listeners. It sees every later bubbled event.
    pub fn listen(&self, child: Rc<dyn Widget>) {
        self.listeners.borrow_mut().push(child);
    }

    /// Create a var mounted on this bus, so the bus's ticks commit it.
    pub fn var<P: Clone + 'static>(&self, name: impl Into<String>, initial: P) -> Var<P> {
        let var = Var::new(name, initial);
        self.listen(var.as_widget());
        var
    }

    /// Number of listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether nothing is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus").field("listeners", &self.len()).finish()
    }
}

impl Widget for Bus {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn bubble(&self, event: &Event<'_>) -> Flow {
        // Listeners may call `listen` while handling the event.
        let listeners = self.listeners.borrow().clone();
        for listener in &listeners {
            listener.dispatch_event(event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickui_core::{Blank, EventKey, TICK, WidgetExt};

    #[test]
    fn mounted_vars_commit_on_tick() {
        let bus = Bus::new();
        let score = bus.var("score", 0u32);
        let lives = bus.var("lives", 3u8);

        score.change(10);
        lives.change(2);
        bus.dispatch(&TICK, &()).unwrap();

        assert_eq!(score.value(), 10);
        assert_eq!(lives.value(), 2);
        assert_eq!(bus.len(), 2);
    }

    #[test]
    fn listener_added_during_dispatch_waits_for_next_event() {
        let bus = Rc::new(Bus::new());
        let key: EventKey<()> = EventKey::new("bus.late");
        let late_hits = Rc::new(std::cell::Cell::new(0));

        let spawner: Rc<dyn Widget> = Rc::new(Blank::new());
        let weak_bus = Rc::downgrade(&bus);
        let hits = Rc::clone(&late_hits);
        spawner.register(&key, move |_| {
            if let Some(bus) = weak_bus.upgrade() {
                let late: Rc<dyn Widget> = Rc::new(Blank::new());
                let hits = Rc::clone(&hits);
                late.register(&key, move |_| {
                    hits.set(hits.get() + 1);
                    Ok(())
                });
                bus.listen(late);
            }
            Ok(())
        });
        bus.listen(spawner);

        bus.dispatch(&key, &()).unwrap();
        assert_eq!(late_hits.get(), 0);
        bus.dispatch(&key, &()).unwrap();
        assert_eq!(late_hits.get(), 1);
        assert_eq!(bus.len(), 3);
    }

    #[test]
    fn draws_nothing() {
        let bus = Bus::new();
        bus.listen(Rc::new(Blank::new()));
        assert_eq!(bus.cells(10, 10).count(), 0);
    }
}
