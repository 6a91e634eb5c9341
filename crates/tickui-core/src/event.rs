#![forbid(unsafe_code)]

//! Event keys and events.
//!
//! An [`EventKey<P>`] names a channel that carries payloads of type `P`. Keys
//! are compared by identity: every call to [`EventKey::new`] allocates a fresh
//! id, so two keys with the same debug name never compare equal.
//!
//! The "value changed" family is the exception to fresh allocation:
//! [`change_key`] memoizes one key per `(payload type, prefix)` pair for the
//! lifetime of the process. Vars and the widgets bound to them rely on this to
//! agree on a channel without passing the key around.
//!
//! # Invariants
//!
//! 1. `EventKey` equality and hashing look at the id only, never the name.
//! 2. `change_key::<P>(prefix)` returns the same key for the same `P` and
//!    `prefix`, and a different key whenever either differs.
//! 3. The registry has no reset path. The first call for a pair wins.
//!
//! # Prefix discipline
//!
//! Two channels feeding the same widget with the same payload type must use
//! different prefixes, or the second registration overwrites the first.
//! `concat` uses [`CONCAT_LEFT_PREFIX`] and [`CONCAT_RIGHT_PREFIX`] for
//! exactly this reason.

use std::any::{Any, TypeId};
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use ahash::AHashMap;

// ─── Key ids ─────────────────────────────────────────────────────────────────

/// Ids below this value are reserved for the built-in keys.
const FIRST_DYNAMIC_ID: u64 = 64;

static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(FIRST_DYNAMIC_ID);

fn next_key_id() -> KeyId {
    KeyId(NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed))
}

/// Type-erased identity of an [`EventKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(u64);

impl KeyId {
    /// Raw numeric id (for logging).
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

// ─── EventKey ────────────────────────────────────────────────────────────────

/// A process-unique token naming an event channel with payload type `P`.
///
/// The payload type is a compile-time marker only; the key itself carries no
/// data and is `Copy`.
pub struct EventKey<P> {
    id: KeyId,
    name: &'static str,
    _payload: PhantomData<fn() -> P>,
}

impl<P> EventKey<P> {
    /// Allocate a fresh key. `name` is for debugging and may collide freely.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            id: next_key_id(),
            name,
            _payload: PhantomData,
        }
    }

    const fn reserved(id: u64, name: &'static str) -> Self {
        Self {
            id: KeyId(id),
            name,
            _payload: PhantomData,
        }
    }

    /// Identity of this key.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> KeyId {
        self.id
    }

    /// Debug name given at creation (or the prefix, for change keys).
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<P> Clone for EventKey<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for EventKey<P> {}

impl<P> PartialEq for EventKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for EventKey<P> {}

impl<P> Hash for EventKey<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<P> fmt::Debug for EventKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventKey({}#{})", self.name, self.id.0)
    }
}

// ─── Built-in keys ───────────────────────────────────────────────────────────

/// Delivered once per frame by the driver.
pub static TICK: EventKey<()> = EventKey::reserved(1, "base.tick");

/// Terminal size changed: `(height, width)`.
pub static RESIZE: EventKey<(u16, u16)> = EventKey::reserved(2, "base.resize");

/// A key was pressed. The payload is the key name as reported by the input
/// layer (`"q"`, `"KEY_UP"`, ...).
pub static KEY: EventKey<String> = EventKey::reserved(3, "base.key");

/// A channel that can never carry a payload.
pub static NEVER: EventKey<Infallible> = EventKey::reserved(4, "base.never");

// ─── Change-key registry ─────────────────────────────────────────────────────

/// Prefix used by `derive` and by widgets bound to a var.
pub const DEFAULT_CHANGE_PREFIX: &str = "base.change";

/// Prefix for the left operand's edge into a `concat` var.
pub const CONCAT_LEFT_PREFIX: &str = "base.change.left";

/// Prefix for the right operand's edge into a `concat` var.
pub const CONCAT_RIGHT_PREFIX: &str = "base.change.right";

type Registry = Mutex<AHashMap<(TypeId, &'static str), KeyId>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(AHashMap::new()))
}

/// The process-wide "value changed" key for payload `P` under `prefix`.
///
/// Memoized: the first call for a `(P, prefix)` pair allocates the key and
/// every later call returns it.
#[must_use]
pub fn change_key<P: 'static>(prefix: &'static str) -> EventKey<P> {
    // The map is only ever inserted into, so a poisoned lock still holds a
    // consistent table.
    let mut table = registry().lock().unwrap_or_else(PoisonError::into_inner);
    let id = *table
        .entry((TypeId::of::<P>(), prefix))
        .or_insert_with(next_key_id);
    EventKey {
        id,
        name: prefix,
        _payload: PhantomData,
    }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// A borrowed `(key, payload)` pair travelling through one dispatch call.
///
/// The payload is type-erased so events can cross `dyn Widget` boundaries;
/// typed access goes through [`Event::payload`].
#[derive(Clone, Copy)]
pub struct Event<'a> {
    key: KeyId,
    name: &'static str,
    payload: &'a dyn Any,
}

impl<'a> Event<'a> {
    /// Pair `key` with `payload`.
    #[must_use]
    pub fn new<P: 'static>(key: &EventKey<P>, payload: &'a P) -> Self {
        Self {
            key: key.id(),
            name: key.name(),
            payload,
        }
    }

    /// Identity of the key this event travels on.
    #[inline]
    #[must_use]
    pub fn key_id(&self) -> KeyId {
        self.key
    }

    /// Debug name of the key.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this event travels on `key`.
    #[inline]
    #[must_use]
    pub fn is<P>(&self, key: &EventKey<P>) -> bool {
        self.key == key.id()
    }

    /// Typed payload, if this event travels on `key`.
    #[must_use]
    pub fn payload<P: 'static>(&self, key: &EventKey<P>) -> Option<&'a P> {
        if self.is(key) {
            self.payload.downcast_ref::<P>()
        } else {
            None
        }
    }

    /// Erased payload, for handler tables.
    #[inline]
    #[must_use]
    pub fn payload_any(&self) -> &'a dyn Any {
        self.payload
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("key", &self.name)
            .field("id", &self.key.0)
            .finish_non_exhaustive()
    }
}

/// An event prepared ahead of time and dispatched later, possibly many times.
///
/// Used by routing widgets (key maps) that hold heterogeneous events in one
/// table.
#[derive(Clone)]
pub struct OwnedEvent {
    key: KeyId,
    name: &'static str,
    payload: Rc<dyn Any>,
}

impl OwnedEvent {
    /// Prepare `payload` for delivery on `key`.
    #[must_use]
    pub fn new<P: 'static>(key: &EventKey<P>, payload: P) -> Self {
        Self {
            key: key.id(),
            name: key.name(),
            payload: Rc::new(payload),
        }
    }

    /// Borrow as a dispatchable [`Event`].
    #[must_use]
    pub fn as_event(&self) -> Event<'_> {
        Event {
            key: self.key,
            name: self.name,
            payload: &*self.payload,
        }
    }
}

impl fmt::Debug for OwnedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedEvent")
            .field("key", &self.name)
            .field("id", &self.key.0)
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
