#![forbid(unsafe_code)]

//! The reactive cell.
//!
//! # Commit algorithm
//!
//! On every tick a [`Var`] runs:
//!
//! 1. Clean: return.
//! 2. Settle every live dependent first (derived/concatenated vars that were
//!    dirtied through some other path before this tick).
//! 3. Publish: the staged value becomes the committed value; clear dirty.
//! 4. Notify live subscribers in registration order. Dead weak entries are
//!    skipped, then pruned once the pass completes.
//!
//! `derive` and `concat` hook into step 4: their change handlers stage the
//! new value *and* commit it on the spot, inside the source's notify loop.
//!
//! # Same-tick fan-in
//!
//! Commits follow dispatch order, not a topological sort. If both operands of
//! a `concat` change in the same tick, the pair commits once per operand, in
//! the order the operands commit; its subscribers see the intermediate pair
//! (new left, old right) before the final one.
//!
//! # Failure Modes
//!
//! - **Subscriber dropped**: its weak entry fails to upgrade and is skipped.
//! - **Subscriber returns `Quit`**: notification stops and `Quit` propagates;
//!   the commit itself has already happened.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tickui_core::{
    CONCAT_LEFT_PREFIX, CONCAT_RIGHT_PREFIX, DEFAULT_CHANGE_PREFIX, EventKey, Flow, Handlers,
    TICK, Widget, WidgetExt, change_key,
};

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

struct VarState<P> {
    last: P,
    pending: P,
    dirty: bool,
    /// Number of commits so far.
    version: u64,
}

enum Subscriber<P> {
    Widget {
        key: EventKey<P>,
        target: Weak<dyn Widget>,
    },
    Watch(Rc<dyn Fn(&P) -> Flow>),
}

impl<P> Clone for Subscriber<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Widget { key, target } => Self::Widget {
                key: *key,
                target: target.clone(),
            },
            Self::Watch(callback) => Self::Watch(Rc::clone(callback)),
        }
    }
}

impl<P> Subscriber<P> {
    fn is_live(&self) -> bool {
        match self {
            Self::Widget { target, .. } => target.strong_count() > 0,
            Self::Watch(_) => true,
        }
    }
}

/// A var that a source settles before publishing.
trait Settle {
    fn settle(&self) -> Flow;
}

struct VarCell<P> {
    name: String,
    handlers: Handlers,
    state: RefCell<VarState<P>>,
    subscribers: RefCell<Vec<Subscriber<P>>>,
    dependents: RefCell<Vec<Weak<dyn Settle>>>,
    /// Vars this one is computed from, kept alive for as long as it is.
    upstream: RefCell<Vec<Rc<dyn Any>>>,
}

impl<P: Clone + 'static> VarCell<P> {
    fn stage(&self, value: P) {
        let mut state = self.state.borrow_mut();
        state.pending = value;
        state.dirty = true;
    }

    fn on_tick(&self) -> Flow {
        if !self.state.borrow().dirty {
            return Ok(());
        }

        self.settle_dependents()?;

        let committed = {
            let mut state = self.state.borrow_mut();
            let next = state.pending.clone();
            state.last = next;
            state.dirty = false;
            state.version += 1;
            state.last.clone()
        };

        #[cfg(feature = "tracing")]
        self.log_commit();

        self.notify(&committed)
    }

    fn settle_dependents(&self) -> Flow {
        let live: Vec<Rc<dyn Settle>> = self
            .dependents
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();
        if live.len() != self.dependents.borrow().len() {
            self.dependents
                .borrow_mut()
                .retain(|dependent| dependent.strong_count() > 0);
        }
        for dependent in live {
            dependent.settle()?;
        }
        Ok(())
    }

    fn notify(&self, value: &P) -> Flow {
        // Snapshot so subscribers may subscribe or change vars while we iterate.
        let snapshot: Vec<Subscriber<P>> = self.subscribers.borrow().clone();
        let mut dead = 0usize;
        for subscriber in &snapshot {
            match subscriber {
                Subscriber::Widget { key, target } => match target.upgrade() {
                    Some(widget) => widget.dispatch(key, value)?,
                    None => dead += 1,
                },
                Subscriber::Watch(callback) => callback(value)?,
            }
        }
        if dead > 0 {
            self.subscribers.borrow_mut().retain(Subscriber::is_live);
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "var.prune", var = %self.name, dead);
        }
        Ok(())
    }

    #[cfg(feature = "tracing")]
    fn log_commit(&self) {
        let version = self.state.borrow().version;
        let subscribers = self.subscribers.borrow().len();
        tracing::trace!(message = "var.commit", var = %self.name, version, subscribers);
    }
}

impl<P: Clone + 'static> Settle for VarCell<P> {
    fn settle(&self) -> Flow {
        self.on_tick()
    }
}

impl<P: Clone + 'static> Widget for VarCell<P> {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}

// ---------------------------------------------------------------------------
// Var
// ---------------------------------------------------------------------------

/// A named reactive cell.
///
/// Cloning a `Var` creates a new handle to the **same** cell.
///
/// A `Var` is a widget: mount it (or [`as_widget`](Var::as_widget)) in the
/// dispatch tree and every `TICK` that reaches it commits a staged value.
pub struct Var<P> {
    inner: Rc<VarCell<P>>,
}

impl<P> Clone for Var<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Var<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Var")
            .field("name", &self.inner.name)
            .field("value", &state.last)
            .field("pending", &state.pending)
            .field("dirty", &state.dirty)
            .field("version", &state.version)
            .finish()
    }
}

impl<P: Clone + 'static> Var<P> {
    /// Create a var holding `initial`, registered for `TICK`.
    #[must_use]
    pub fn new(name: impl Into<String>, initial: P) -> Self {
        let name = name.into();
        let inner = Rc::new_cyclic(|weak: &Weak<VarCell<P>>| {
            let cell = VarCell {
                name,
                handlers: Handlers::new(),
                state: RefCell::new(VarState {
                    last: initial.clone(),
                    pending: initial,
                    dirty: false,
                    version: 0,
                }),
                subscribers: RefCell::new(Vec::new()),
                dependents: RefCell::new(Vec::new()),
                upstream: RefCell::new(Vec::new()),
            };
            let weak = weak.clone();
            cell.handlers.insert(&TICK, move |_: &()| match weak.upgrade() {
                Some(cell) => cell.on_tick(),
                None => Ok(()),
            });
            cell
        });
        Self { inner }
    }

    /// Debug name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The committed value.
    #[must_use]
    pub fn value(&self) -> P {
        self.inner.state.borrow().last.clone()
    }

    /// Borrow the committed value.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls `change` on this same var.
    pub fn with<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.inner.state.borrow().last)
    }

    /// Whether a staged value is waiting for the next tick.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.inner.state.borrow().dirty
    }

    /// Number of commits so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.state.borrow().version
    }

    /// Stage `value` for the next tick. Last write wins.
    pub fn change(&self, value: P) {
        self.inner.stage(value);
    }

    /// Stage `f(staged)`, building on any write already staged this tick.
    pub fn update(&self, f: impl FnOnce(&P) -> P) {
        let staged = self.inner.state.borrow().pending.clone();
        self.inner.stage(f(&staged));
    }

    /// Commit a staged value now. A clean var returns immediately.
    pub fn on_tick(&self) -> Flow {
        self.inner.on_tick()
    }

    /// Notify `widget` on `key` after every commit.
    ///
    /// The widget is held weakly. It receives the current committed value
    /// right away, so a late subscriber starts in sync.
    pub fn subscribe(&self, key: &EventKey<P>, widget: &Rc<dyn Widget>) -> Flow {
        self.inner.subscribers.borrow_mut().push(Subscriber::Widget {
            key: *key,
            target: Rc::downgrade(widget),
        });
        let current = self.value();
        widget.dispatch(key, &current)
    }

    /// Call `callback` after every commit. Held strongly; not called now.
    pub fn watch(&self, callback: impl Fn(&P) -> Flow + 'static) {
        self.inner
            .subscribers
            .borrow_mut()
            .push(Subscriber::Watch(Rc::new(callback)));
    }

    /// A var holding `f(value)` that re-derives whenever this var commits.
    ///
    /// `f` should be pure. The derived var commits inside this var's commit,
    /// so chains of any depth settle in one tick.
    #[must_use]
    pub fn derive<Q, F>(&self, f: F) -> Var<Q>
    where
        Q: Clone + 'static,
        F: Fn(&P) -> Q + 'static,
    {
        let derived = Var::new(format!("{} >> derive", self.name()), self.with(&f));
        let key = change_key::<P>(DEFAULT_CHANGE_PREFIX);

        let target = Rc::downgrade(&derived.inner);
        derived.register(&key, move |value: &P| match target.upgrade() {
            Some(cell) => {
                cell.stage(f(value));
                cell.on_tick()
            }
            None => Ok(()),
        });

        self.add_dependent(&derived.inner);
        // A fresh var has no subscribers, so priming it cannot ask to quit.
        let _ = self.subscribe(&key, &derived.as_widget());
        derived
    }

    /// A var holding `(self, other)`.
    ///
    /// Each side feeds its own slot through a distinct change channel; a
    /// commit on one side leaves the other slot untouched.
    #[must_use]
    pub fn concat<Q: Clone + 'static>(&self, other: &Var<Q>) -> Var<(P, Q)> {
        let combined = Var::new(
            format!("{} * {}", self.name(), other.name()),
            (self.value(), other.value()),
        );
        let left = change_key::<P>(CONCAT_LEFT_PREFIX);
        let right = change_key::<Q>(CONCAT_RIGHT_PREFIX);

        let target = Rc::downgrade(&combined.inner);
        combined.register(&left, move |value: &P| match target.upgrade() {
            Some(cell) => {
                let slot = cell.state.borrow().pending.1.clone();
                cell.stage((value.clone(), slot));
                cell.on_tick()
            }
            None => Ok(()),
        });
        let target = Rc::downgrade(&combined.inner);
        combined.register(&right, move |value: &Q| match target.upgrade() {
            Some(cell) => {
                let slot = cell.state.borrow().pending.0.clone();
                cell.stage((slot, value.clone()));
                cell.on_tick()
            }
            None => Ok(()),
        });

        self.add_dependent(&combined.inner);
        other.add_dependent(&combined.inner);
        let widget = combined.as_widget();
        // Priming only fills a slot of a var nobody subscribes to yet.
        let _ = self.subscribe(&left, &widget);
        let _ = other.subscribe(&right, &widget);
        combined
    }

    /// This var as a mountable widget.
    #[must_use]
    pub fn as_widget(&self) -> Rc<dyn Widget> {
        self.inner.clone()
    }

    /// A non-owning handle.
    #[must_use]
    pub fn downgrade(&self) -> WeakVar<P> {
        WeakVar {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles refer to the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Length of the subscriber list, counting entries not yet pruned.
    #[must_use]
    pub fn subscriber_slots(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Length of the dependents list, counting entries not yet pruned.
    #[must_use]
    pub fn dependent_slots(&self) -> usize {
        self.inner.dependents.borrow().len()
    }

    fn add_dependent<Q: Clone + 'static>(&self, dependent: &Rc<VarCell<Q>>) {
        let weak: Weak<VarCell<Q>> = Rc::downgrade(dependent);
        let weak: Weak<dyn Settle> = weak;
        self.inner.dependents.borrow_mut().push(weak);
        let strong: Rc<dyn Any> = self.inner.clone();
        dependent.upstream.borrow_mut().push(strong);
    }
}

impl<P: Clone + 'static> Widget for Var<P> {
    fn handlers(&self) -> &Handlers {
        &self.inner.handlers
    }
}

/// A non-owning [`Var`] handle.
pub struct WeakVar<P> {
    inner: Weak<VarCell<P>>,
}

impl<P> Clone for WeakVar<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P> fmt::Debug for WeakVar<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakVar")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<P> WeakVar<P> {
    /// The var, if anything still owns it.
    #[must_use]
    pub fn upgrade(&self) -> Option<Var<P>> {
        self.inner.upgrade().map(|inner| Var { inner })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tickui_core::{Blank, Quit};

    fn tick<P: Clone + 'static>(var: &Var<P>) {
        var.dispatch(&TICK, &()).unwrap();
    }

    /// A widget that records every payload delivered on `key`.
    fn recorder<P: Clone + 'static>(key: &EventKey<P>) -> (Rc<dyn Widget>, Rc<RefCell<Vec<P>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let widget = Rc::new(Blank::new());
        let sink = Rc::clone(&log);
        widget.register(key, move |value: &P| {
            sink.borrow_mut().push(value.clone());
            Ok(())
        });
        (widget, log)
    }

    #[test]
    fn value_is_initial_until_tick() {
        let v = Var::new("n", 1);
        assert_eq!(v.value(), 1);
        v.change(2);
        assert_eq!(v.value(), 1);
        assert!(v.is_dirty());
        tick(&v);
        assert_eq!(v.value(), 2);
        assert!(!v.is_dirty());
    }

    #[test]
    fn last_write_wins_and_notifies_once() {
        let v = Var::new("n", 0);
        let key = EventKey::new("n.changed");
        let (widget, log) = recorder(&key);
        v.subscribe(&key, &widget).unwrap();
        log.borrow_mut().clear();

        v.change(1);
        v.change(2);
        tick(&v);

        assert_eq!(v.value(), 2);
        assert_eq!(*log.borrow(), vec![2]);
    }

    #[test]
    fn subscribe_primes_with_current_value() {
        let v = Var::new("n", 7);
        let key = EventKey::new("prime");
        let (widget, log) = recorder(&key);
        v.subscribe(&key, &widget).unwrap();
        assert_eq!(*log.borrow(), vec![7]);
    }

    #[test]
    fn second_tick_is_a_no_op() {
        let v = Var::new("n", 0);
        let key = EventKey::new("idem");
        let (widget, log) = recorder(&key);
        v.subscribe(&key, &widget).unwrap();

        v.change(5);
        tick(&v);
        let version = v.version();
        tick(&v);

        assert_eq!(v.version(), version);
        assert_eq!(*log.borrow(), vec![0, 5]);
    }

    #[test]
    fn watch_fires_on_commit_only() {
        let v = Var::new("n", 0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        v.watch(move |n| {
            sink.borrow_mut().push(*n);
            Ok(())
        });
        assert!(seen.borrow().is_empty());

        v.change(3);
        tick(&v);
        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn dropped_subscriber_is_skipped_and_pruned() {
        let v = Var::new("n", 0);
        let key = EventKey::new("dead");
        let (widget, log) = recorder(&key);
        v.subscribe(&key, &widget).unwrap();
        assert_eq!(v.subscriber_slots(), 1);
        drop(widget);

        v.change(1);
        tick(&v);

        assert_eq!(*log.borrow(), vec![0]);
        assert_eq!(v.subscriber_slots(), 0);
    }

    #[test]
    fn derive_tracks_source() {
        let length = Var::new("length", 0);
        let doubled = length.derive(|n| n * 2);
        assert_eq!(doubled.value(), 0);

        length.change(4);
        tick(&length);

        assert_eq!(length.value(), 4);
        assert_eq!(doubled.value(), 8);
    }

    #[test]
    fn derive_and_concat_register_dependents() {
        let a = Var::new("a", 1);
        let b = Var::new("b", 2);
        let _doubled = a.derive(|n| n * 2);
        assert_eq!(a.dependent_slots(), 1);

        let _pair = a.concat(&b);
        assert_eq!(a.dependent_slots(), 2);
        assert_eq!(b.dependent_slots(), 1);
    }

    #[test]
    fn derive_chain_settles_in_one_tick() {
        let a = Var::new("a", 1);
        let b = a.derive(|n| n + 1);
        let c = b.derive(|n| n * 10);
        let d = c.derive(|n: &i32| n.to_string());
        assert_eq!(d.value(), "20");

        a.change(4);
        tick(&a);

        assert_eq!(b.value(), 5);
        assert_eq!(c.value(), 50);
        assert_eq!(d.value(), "50");
    }

    #[test]
    fn derived_var_is_not_kept_alive_by_source() {
        let a = Var::new("a", 1);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let derived = a.derive(move |n| {
            counter.set(counter.get() + 1);
            *n
        });
        let weak = derived.downgrade();
        assert_eq!(calls.get(), 2);
        drop(derived);
        assert!(weak.upgrade().is_none());

        a.change(2);
        tick(&a);
        assert_eq!(calls.get(), 2);
        assert_eq!(a.subscriber_slots(), 0);
        assert_eq!(a.dependent_slots(), 0);
    }

    #[test]
    fn dirty_dependent_settles_before_source_publishes() {
        let a = Var::new("a", 1);
        let b = a.derive(|n| n + 100);
        let key = EventKey::new("b.changed");
        let (widget, log) = recorder(&key);
        b.subscribe(&key, &widget).unwrap();
        log.borrow_mut().clear();

        b.change(-1);
        a.change(2);
        tick(&a);

        assert_eq!(*log.borrow(), vec![-1, 102]);
        assert_eq!(b.value(), 102);
    }

    #[test]
    fn concat_updates_only_the_changed_side() {
        let a = Var::new("a", 1);
        let b = Var::new("b", "x".to_string());
        let ab = a.concat(&b);
        assert_eq!(ab.value(), (1, "x".to_string()));

        a.change(2);
        tick(&a);
        assert_eq!(ab.value(), (2, "x".to_string()));

        b.change("y".to_string());
        tick(&b);
        assert_eq!(ab.value(), (2, "y".to_string()));
    }

    #[test]
    fn concat_with_same_payload_type_keeps_sides_apart() {
        let a = Var::new("a", 1);
        let b = Var::new("b", 10);
        let ab = a.concat(&b);

        b.change(20);
        tick(&b);
        assert_eq!(ab.value(), (1, 20));

        a.change(2);
        tick(&a);
        assert_eq!(ab.value(), (2, 20));
    }

    #[test]
    fn concat_same_tick_shows_intermediate_pair() {
        let a = Var::new("a", 0);
        let b = Var::new("b", 0);
        let ab = a.concat(&b);
        let key = EventKey::new("ab.changed");
        let (widget, log) = recorder(&key);
        ab.subscribe(&key, &widget).unwrap();
        log.borrow_mut().clear();

        a.change(1);
        b.change(2);
        tick(&a);
        tick(&b);

        assert_eq!(*log.borrow(), vec![(1, 0), (1, 2)]);
    }

    #[test]
    fn derive_of_concat() {
        let w = Var::new("w", 3);
        let h = Var::new("h", 4);
        let area = w.concat(&h).derive(|(w, h)| w * h);
        assert_eq!(area.value(), 12);

        h.change(5);
        tick(&h);
        assert_eq!(area.value(), 15);
    }

    #[test]
    fn derived_var_keeps_its_sources_alive() {
        let a = Var::new("a", 1);
        let tail = a.derive(|n| n + 1).derive(|n| n * 2);
        let source = a.downgrade();
        drop(a);
        assert!(source.upgrade().is_some());

        let a = source.upgrade().unwrap();
        a.change(5);
        tick(&a);
        assert_eq!(tail.value(), 12);

        drop(a);
        drop(tail);
        assert!(source.upgrade().is_none());
    }

    #[test]
    fn update_builds_on_staged_value() {
        let v = Var::new("n", 1);
        v.update(|n| n + 1);
        v.update(|n| n * 10);
        assert_eq!(v.value(), 1);
        tick(&v);
        assert_eq!(v.value(), 20);
    }

    #[test]
    fn quit_from_watch_propagates_after_commit() {
        let v = Var::new("n", 0);
        v.watch(|n| if *n > 1 { Err(Quit) } else { Ok(()) });

        v.change(1);
        assert_eq!(v.dispatch(&TICK, &()), Ok(()));
        v.change(2);
        assert_eq!(v.dispatch(&TICK, &()), Err(Quit));
        assert_eq!(v.value(), 2);
        assert!(!v.is_dirty());
    }

    #[test]
    fn mounted_var_commits_through_as_widget() {
        let v = Var::new("n", 0);
        let widget = v.as_widget();
        v.change(9);
        widget.dispatch(&TICK, &()).unwrap();
        assert_eq!(v.value(), 9);
    }

    #[test]
    fn change_inside_notification_waits_for_next_tick() {
        let v = Var::new("n", 0);
        let handle = v.downgrade();
        v.watch(move |n| {
            if *n < 3
                && let Some(v) = handle.upgrade()
            {
                v.change(n + 1);
            }
            Ok(())
        });

        v.change(1);
        tick(&v);
        assert_eq!(v.value(), 1);
        assert!(v.is_dirty());
        tick(&v);
        assert_eq!(v.value(), 2);
    }

    #[test]
    fn clone_shares_state() {
        let a = Var::new("n", 0);
        let b = a.clone();
        a.change(1);
        tick(&b);
        assert_eq!(a.value(), 1);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn debug_format() {
        let v = Var::new("score", 42);
        let dbg = format!("{v:?}");
        assert!(dbg.contains("score"));
        assert!(dbg.contains("42"));
    }

    #[cfg(feature = "tracing")]
    mod traced {
        use super::*;
        use std::sync::{Arc, Mutex};
        use tracing::Subscriber;
        use tracing_subscriber::Layer;
        use tracing_subscriber::layer::{Context, SubscriberExt};

        #[derive(Clone, Default)]
        struct MessageCapture {
            messages: Arc<Mutex<Vec<String>>>,
        }

        impl<S: Subscriber> Layer<S> for MessageCapture {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                struct V(Option<String>);
                impl tracing::field::Visit for V {
                    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                        if field.name() == "message" {
                            self.0 = Some(value.to_string());
                        }
                    }

                    fn record_debug(
                        &mut self,
                        field: &tracing::field::Field,
                        value: &dyn std::fmt::Debug,
                    ) {
                        if field.name() == "message" {
                            self.0 = Some(format!("{value:?}").trim_matches('"').to_string());
                        }
                    }
                }
                let mut v = V(None);
                event.record(&mut v);
                if let Some(message) = v.0 {
                    self.messages.lock().expect("capture lock").push(message);
                }
            }
        }

        #[test]
        fn commit_and_prune_are_traced() {
            let capture = MessageCapture::default();
            let subscriber = tracing_subscriber::registry().with(capture.clone());
            tracing::subscriber::with_default(subscriber, || {
                let v = Var::new("traced", 0);
                let key = EventKey::new("traced.changed");
                let widget: Rc<dyn Widget> = Rc::new(Blank::new());
                widget.register(&key, |_: &i32| Ok(()));
                v.subscribe(&key, &widget).unwrap();
                drop(widget);

                v.change(1);
                v.dispatch(&TICK, &()).unwrap();
            });

            let messages = capture.messages.lock().expect("capture lock");
            assert!(messages.iter().any(|m| m == "var.commit"));
            assert!(messages.iter().any(|m| m == "var.prune"));
        }
    }
}
