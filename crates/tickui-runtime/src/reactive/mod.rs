#![forbid(unsafe_code)]

//! Reactive vars for tickui.
//!
//! - [`Var`]: a named cell with a committed value and a staged value. Writes
//!   are staged by `change()` and committed on the next tick, which is when
//!   subscribers hear about them.
//! - [`WeakVar`]: non-owning handle, for handlers that must not keep their
//!   own var alive.
//!
//! # Architecture
//!
//! `Var<P>` is an `Rc` handle over a single-threaded cell. The cell is itself
//! a widget registered for `TICK`, so mounting it anywhere in the dispatch
//! tree is what drives its commits.
//!
//! Edges point downstream weakly: a source holds `Weak` references to
//! subscriber widgets and to derived vars, so neither is kept alive (or
//! fired) by the source alone. Dead entries are pruned after each notify
//! pass. `watch` callbacks are the one strong downstream edge.
//!
//! Ownership runs upstream: a derived or concatenated var holds its sources
//! strongly, so the intermediate in `a.concat(&b).derive(f)` lives as long as
//! the final var does.
//!
//! # Invariants
//!
//! 1. `value()` only changes at commit time.
//! 2. At most one staged value exists; a second `change()` before the tick
//!    overwrites the first.
//! 3. A commit settles dependents, then publishes, then notifies, depth
//!    first, and never interleaves with a dependent's commit.
//! 4. A tick on a clean var does nothing beyond a flag check.
//! 5. Derived and concatenated vars settle inside their source's commit, so
//!    a change reaches the end of any chain within one tick.

pub mod var;

pub use var::{Var, WeakVar};
