#![forbid(unsafe_code)]

//! Widgets for tickui.
//!
//! Composites ([`Group`], [`Bus`], [`Proxy`], [`WidgetSequence`],
//! [`Upscale`]) decide which children see an event and whose cells are
//! drawn. [`Reactive`] rebuilds its child from a var. The routing widgets
//! turn keys and ticks into application events, and the drawing widgets
//! produce cells.
//!
//! Constructors that can fail return [`WidgetError`] or
//! [`CellError`](tickui_core::CellError).

pub mod bus;
pub mod draw;
pub mod error;
pub mod group;
pub mod keys;
pub mod proxy;
pub mod reactive;
pub mod screen;
pub mod sequence;
pub mod tick;
pub mod trigger;
pub mod upscale;

pub use bus::Bus;
pub use draw::{Fill, Rect, SimpleText, cell};
pub use error::WidgetError;
pub use group::Group;
pub use keys::{GiveUp, KeyMap, OnKey, QuitOn};
pub use proxy::Proxy;
pub use reactive::Reactive;
pub use screen::screen_size_var;
pub use sequence::WidgetSequence;
pub use tick::TickReducer;
pub use trigger::WhenTrue;
pub use upscale::Upscale;
