#![forbid(unsafe_code)]

//! Runtime: reactive vars and the frame driver that ticks them.

pub mod config;
pub mod program;
pub mod reactive;

pub use config::{ConfigError, ProgramConfig};
pub use program::{
    ExitReason, FrameOutcome, FrameRecorder, Input, InputSource, Painter, Program,
    ProgramSummary, ScriptedInput,
};
pub use reactive::{Var, WeakVar};
