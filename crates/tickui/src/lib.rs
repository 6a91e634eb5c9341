#![forbid(unsafe_code)]

//! tickui public facade crate.
//!
//! ```
//! use std::rc::Rc;
//! use tickui::prelude::*;
//!
//! let bus = Rc::new(Bus::new());
//! let length = bus.var("length", 0u32);
//! let doubled = length.derive(|n| n * 2);
//! let label = Reactive::new(&doubled, |n| {
//!     Rc::new(SimpleText::new(0, 0, &n.to_string(), Style::WHITE)) as Rc<dyn Widget>
//! });
//! let root = Rc::new(Group::new([bus as Rc<dyn Widget>, label]));
//!
//! length.change(4);
//! root.dispatch(&TICK, &()).unwrap();
//! assert_eq!(doubled.value(), 8);
//! ```

pub mod prelude {
    pub use tickui_core as core;
    pub use tickui_runtime as runtime;
    pub use tickui_widgets as widgets;

    pub use tickui_core::{
        Blank, Cell, Cells, Event, EventKey, Flow, Glyph, Handlers, KEY, OwnedEvent, Quit, RESIZE,
        Style, TICK, Widget, WidgetExt,
    };
    pub use tickui_runtime::{
        ExitReason, FrameOutcome, FrameRecorder, InputSource, Painter, Program, ProgramConfig,
        ScriptedInput, Var,
    };
    pub use tickui_widgets::{
        Bus, Fill, GiveUp, Group, KeyMap, OnKey, Proxy, QuitOn, Reactive, Rect, SimpleText,
        TickReducer, Upscale, WhenTrue, WidgetSequence, screen_size_var,
    };
}
