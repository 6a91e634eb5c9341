#![forbid(unsafe_code)]

//! Key routing.
//!
//! These widgets handle `KEY` themselves (so key events never bubble past
//! them) and turn matching keys into application events:
//!
//! | Widget     | On a matching key                                  |
//! |------------|----------------------------------------------------|
//! | [`OnKey`]  | dispatch a `()` event to a target                  |
//! | [`KeyMap`] | dispatch a prepared, per-key event to a target     |
//! | [`GiveUp`] | return `Quit`                                      |
//!
//! [`QuitOn`] is the non-key counterpart of `GiveUp`: it quits when a given
//! `()` event reaches it.
//!
//! Keys that match nothing are dropped silently.

use std::fmt;
use std::rc::Rc;

use ahash::{AHashMap, AHashSet};
use tickui_core::{EventKey, Handlers, KEY, OwnedEvent, Quit, Widget, WidgetExt};

fn key_set<S: Into<String>>(keys: impl IntoIterator<Item = S>) -> AHashSet<String> {
    keys.into_iter().map(Into::into).collect()
}

// ─── OnKey ───────────────────────────────────────────────────────────────────

/// Dispatches `event` to a target when one of its keys is pressed.
pub struct OnKey {
    handlers: Handlers,
}

impl OnKey {
    /// Watch for `keys`; on a match dispatch `event` to `target`.
    #[must_use]
    pub fn new<S: Into<String>>(
        keys: impl IntoIterator<Item = S>,
        event: EventKey<()>,
        target: Rc<dyn Widget>,
    ) -> Self {
        let keys = key_set(keys);
        let handlers = Handlers::new();
        handlers.insert(&KEY, move |key: &String| {
            if keys.contains(key) {
                target.dispatch(&event, &())
            } else {
                Ok(())
            }
        });
        Self { handlers }
    }
}

impl fmt::Debug for OnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnKey").finish_non_exhaustive()
    }
}

impl Widget for OnKey {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}

// ─── GiveUp / QuitOn ─────────────────────────────────────────────────────────

/// Quits when one of its keys is pressed. Defaults to `q` and `Q`.
pub struct GiveUp {
    handlers: Handlers,
}

impl GiveUp {
    /// Quit on any of `keys`.
    #[must_use]
    pub fn new<S: Into<String>>(keys: impl IntoIterator<Item = S>) -> Self {
        let keys = key_set(keys);
        let handlers = Handlers::new();
        handlers.insert(&KEY, move |key: &String| {
            if keys.contains(key) { Err(Quit) } else { Ok(()) }
        });
        Self { handlers }
    }
}

impl Default for GiveUp {
    fn default() -> Self {
        Self::new(["q", "Q"])
    }
}

impl fmt::Debug for GiveUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GiveUp").finish_non_exhaustive()
    }
}

impl Widget for GiveUp {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}

/// Quits when `event` reaches it.
pub struct QuitOn {
    handlers: Handlers,
}

impl QuitOn {
    #[must_use]
    pub fn new(event: EventKey<()>) -> Self {
        let handlers = Handlers::new();
        handlers.insert(&event, |_: &()| Err(Quit));
        Self { handlers }
    }
}

impl fmt::Debug for QuitOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuitOn").finish_non_exhaustive()
    }
}

impl Widget for QuitOn {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}

// ─── KeyMap ──────────────────────────────────────────────────────────────────

/// Case-insensitive map from key names to prepared events.
///
/// Each binding may carry a different payload type, which is why the
/// events are stored as [`OwnedEvent`]s.
pub struct KeyMap {
    handlers: Handlers,
    bound: usize,
}

impl KeyMap {
    /// Route each bound key to `target`. Later bindings for the same key
    /// (ignoring case) replace earlier ones.
    #[must_use]
    pub fn new<S: AsRef<str>>(
        bindings: impl IntoIterator<Item = (S, OwnedEvent)>,
        target: Rc<dyn Widget>,
    ) -> Self {
        let map: AHashMap<String, OwnedEvent> = bindings
            .into_iter()
            .map(|(key, event)| (key.as_ref().to_lowercase(), event))
            .collect();
        let bound = map.len();
        let handlers = Handlers::new();
        handlers.insert(&KEY, move |key: &String| match map.get(&key.to_lowercase()) {
            Some(event) => target.dispatch_event(&event.as_event()),
            None => Ok(()),
        });
        Self { handlers, bound }
    }

    /// Number of distinct keys bound.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bound
    }

    /// Whether no keys are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bound == 0
    }
}

impl fmt::Debug for KeyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMap").field("bound", &self.bound).finish()
    }
}

impl Widget for KeyMap {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tickui_core::{Blank, Flow};

    fn press(widget: &dyn Widget, key: &str) -> Flow {
        widget.dispatch(&KEY, &key.to_string())
    }

    fn counter(event: &EventKey<()>) -> (Rc<dyn Widget>, Rc<std::cell::Cell<u32>>) {
        let count = Rc::new(std::cell::Cell::new(0));
        let widget: Rc<dyn Widget> = Rc::new(Blank::new());
        let sink = Rc::clone(&count);
        widget.register(event, move |_| {
            sink.set(sink.get() + 1);
            Ok(())
        });
        (widget, count)
    }

    #[test]
    fn on_key_fires_for_listed_keys_only() {
        let jump = EventKey::new("jump");
        let (target, count) = counter(&jump);
        let on_key = OnKey::new([" ", "w"], jump, target);

        press(&on_key, "w").unwrap();
        press(&on_key, " ").unwrap();
        press(&on_key, "x").unwrap();
        press(&on_key, "W").unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn give_up_defaults_to_q() {
        let give_up = GiveUp::default();
        assert_eq!(press(&give_up, "q"), Err(Quit));
        assert_eq!(press(&give_up, "Q"), Err(Quit));
        assert_eq!(press(&give_up, "x"), Ok(()));
    }

    #[test]
    fn give_up_custom_keys() {
        let give_up = GiveUp::new(["KEY_ESCAPE"]);
        assert_eq!(press(&give_up, "q"), Ok(()));
        assert_eq!(press(&give_up, "KEY_ESCAPE"), Err(Quit));
    }

    #[test]
    fn quit_on_event() {
        let game_over = EventKey::new("game.over");
        let quit_on = QuitOn::new(game_over);
        assert_eq!(quit_on.dispatch(&game_over, &()), Err(Quit));
        assert_eq!(quit_on.dispatch(&EventKey::<()>::new("other"), &()), Ok(()));
    }

    #[test]
    fn key_map_is_case_insensitive_and_typed() {
        let turn: EventKey<(i8, i8)> = EventKey::new("turn");
        let pause: EventKey<()> = EventKey::new("pause");
        let log = Rc::new(RefCell::new(Vec::new()));

        let target: Rc<dyn Widget> = Rc::new(Blank::new());
        let sink = Rc::clone(&log);
        target.register(&turn, move |dir| {
            sink.borrow_mut().push(format!("turn {dir:?}"));
            Ok(())
        });
        let sink = Rc::clone(&log);
        target.register(&pause, move |_| {
            sink.borrow_mut().push("pause".to_string());
            Ok(())
        });

        let map = KeyMap::new(
            [
                ("KEY_UP", OwnedEvent::new(&turn, (-1, 0))),
                ("d", OwnedEvent::new(&turn, (0, 1))),
                ("p", OwnedEvent::new(&pause, ())),
            ],
            target,
        );

        press(&map, "key_up").unwrap();
        press(&map, "D").unwrap();
        press(&map, "p").unwrap();
        press(&map, "z").unwrap();
        assert_eq!(*log.borrow(), vec!["turn (-1, 0)", "turn (0, 1)", "pause"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn key_map_later_binding_wins() {
        let pick: EventKey<u8> = EventKey::new("pick");
        let got = Rc::new(std::cell::Cell::new(0));
        let target: Rc<dyn Widget> = Rc::new(Blank::new());
        let sink = Rc::clone(&got);
        target.register(&pick, move |n| {
            sink.set(*n);
            Ok(())
        });

        let map = KeyMap::new(
            [("a", OwnedEvent::new(&pick, 1u8)), ("A", OwnedEvent::new(&pick, 2u8))],
            target,
        );
        press(&map, "a").unwrap();
        assert_eq!(got.get(), 2);
        assert_eq!(map.len(), 1);
    }
}
