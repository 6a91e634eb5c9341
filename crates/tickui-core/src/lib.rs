#![forbid(unsafe_code)]

//! Core: event keys, the widget dispatch protocol, and drawable cells.
//!
//! Everything in this crate is single-threaded. Widgets are shared as
//! `Rc<dyn Widget>` and torn down by dropping the last strong reference.

pub mod cell;
pub mod event;
pub mod logging;
pub mod widget;

pub use cell::{Cell, CellError, Cells, Glyph, Style};
pub use event::{
    CONCAT_LEFT_PREFIX, CONCAT_RIGHT_PREFIX, DEFAULT_CHANGE_PREFIX, Event, EventKey, KEY, KeyId,
    NEVER, OwnedEvent, RESIZE, TICK, change_key,
};
pub use widget::{Blank, Flow, Handlers, Quit, Widget, WidgetExt};
