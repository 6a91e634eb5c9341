#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros. Without it, the crate root exports no-op macros of the same names
//! so call sites compile unchanged:
//!
//! ```ignore
//! #[cfg(feature = "tracing")]
//! use crate::logging::warn;
//! #[cfg(not(feature = "tracing"))]
//! use crate::warn;
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

/// No-op stand-in for `tracing::trace!`.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// No-op stand-in for `tracing::debug!`.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

/// No-op stand-in for `tracing::warn!`.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}
