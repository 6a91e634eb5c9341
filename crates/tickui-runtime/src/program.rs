#![forbid(unsafe_code)]

//! Headless frame driver.
//!
//! [`Program`] owns the tick cadence for a widget tree. Each frame it:
//!
//! 1. on the very first frame, dispatches `RESIZE` with the input size;
//! 2. polls one input and dispatches it as `RESIZE` or `KEY`;
//! 3. dispatches `TICK`;
//! 4. collects `root.cells(height, width)` and hands them to the painter.
//!
//! A `Quit` returned by any of those dispatches ends the frame before
//! rendering, and ends [`Program::run`].
//!
//! The terminal itself stays outside: an [`InputSource`] supplies keys and
//! sizes, a [`Painter`] receives finished frames. [`ScriptedInput`] and
//! [`FrameRecorder`] implement both sides in memory for tests and replays.

use std::collections::VecDeque;
use std::rc::Rc;

use tickui_core::{Cell, Flow, KEY, RESIZE, TICK, Widget, WidgetExt};
use web_time::Instant;

use crate::config::{ConfigError, ProgramConfig};

// ─── Boundary traits ─────────────────────────────────────────────────────────

/// One unit of input from the terminal layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A key press, by name.
    Key(String),
    /// New terminal size: `(height, width)`.
    Resize(u16, u16),
}

/// Where input comes from.
pub trait InputSource {
    /// Current terminal size: `(height, width)`.
    fn size(&self) -> (u16, u16);

    /// At most one input for this frame.
    fn poll(&mut self) -> Option<Input>;

    /// Whether the source has nothing more to give. Ends [`Program::run`].
    fn is_closed(&self) -> bool {
        false
    }
}

/// Where finished frames go.
pub trait Painter {
    /// Paint one frame of `height` x `width`.
    fn paint(&mut self, height: u16, width: u16, cells: &[Cell]);
}

// ─── In-memory implementations ───────────────────────────────────────────────

/// Input replayed from a script, one entry per frame.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    size: (u16, u16),
    frames: VecDeque<Option<Input>>,
}

impl ScriptedInput {
    /// An empty script for a terminal of `height` x `width`.
    #[must_use]
    pub fn new(height: u16, width: u16) -> Self {
        Self {
            size: (height, width),
            frames: VecDeque::new(),
        }
    }

    /// A frame in which `key` is pressed.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.frames.push_back(Some(Input::Key(key.into())));
        self
    }

    /// A frame in which the terminal is resized.
    #[must_use]
    pub fn resize(mut self, height: u16, width: u16) -> Self {
        self.frames.push_back(Some(Input::Resize(height, width)));
        self
    }

    /// `frames` frames without input.
    #[must_use]
    pub fn idle(mut self, frames: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(None, frames));
        self
    }

    /// Frames left in the script.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn poll(&mut self) -> Option<Input> {
        let input = self.frames.pop_front().flatten();
        if let Some(Input::Resize(height, width)) = input {
            self.size = (height, width);
        }
        input
    }

    fn is_closed(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Painter that keeps the most recent frame in memory.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    frames: u64,
    size: (u16, u16),
    last: Vec<Cell>,
}

impl FrameRecorder {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames painted so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Cells of the most recent frame.
    #[must_use]
    pub fn last(&self) -> &[Cell] {
        &self.last
    }

    /// The most recent frame as text, one string per row.
    ///
    /// Later cells overwrite earlier ones; uncovered positions are spaces.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let (height, width) = self.size;
        let mut grid = vec![vec![" ".to_string(); usize::from(width)]; usize::from(height)];
        for cell in &self.last {
            let Some(cell) = cell.clone().clip(height, width) else {
                continue;
            };
            for row in &mut grid[usize::from(cell.y)..usize::from(cell.bottom())] {
                for slot in &mut row[usize::from(cell.x)..usize::from(cell.right())] {
                    slot.clear();
                    slot.push_str(cell.glyph.as_str());
                }
            }
        }
        grid.into_iter().map(|row| row.concat()).collect()
    }
}

impl Painter for FrameRecorder {
    fn paint(&mut self, height: u16, width: u16, cells: &[Cell]) {
        self.frames += 1;
        self.size = (height, width);
        self.last = cells.to_vec();
    }
}

// ─── Program ─────────────────────────────────────────────────────────────────

/// Result of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was rendered; keep going.
    Continue,
    /// A widget asked to quit. Nothing was rendered.
    Quit,
}

/// Why [`Program::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// A widget asked to quit.
    Quit,
    /// The input source closed.
    InputClosed,
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramSummary {
    /// Frames rendered.
    pub frames: u64,
    /// Why the run stopped.
    pub exit: ExitReason,
}

/// Drives a widget tree frame by frame.
pub struct Program<I, P> {
    root: Rc<dyn Widget>,
    input: I,
    painter: P,
    config: ProgramConfig,
    size: (u16, u16),
    started: bool,
    frames: u64,
}

impl<I: InputSource, P: Painter> Program<I, P> {
    /// Validate `config` and prepare to drive `root`.
    pub fn new(
        root: Rc<dyn Widget>,
        input: I,
        painter: P,
        config: ProgramConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let size = input.size();
        Ok(Self {
            root,
            input,
            painter,
            config,
            size,
            started: false,
            frames: 0,
        })
    }

    /// Run one frame.
    pub fn step(&mut self) -> FrameOutcome {
        if self.deliver().is_err() {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "program.quit", frames = self.frames);
            return FrameOutcome::Quit;
        }

        let (height, width) = self.size;
        let cells: Vec<Cell> = self.root.cells(height, width).collect();
        self.painter.paint(height, width, &cells);
        self.frames += 1;
        FrameOutcome::Continue
    }

    /// Run frames until a widget quits or the input closes.
    pub fn run(&mut self) -> ProgramSummary {
        let budget = self.config.frame_budget();
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "program.start", fps = self.config.fps, pace = self.config.pace);

        let exit = loop {
            if self.input.is_closed() {
                break ExitReason::InputClosed;
            }
            let started = Instant::now();
            if self.step() == FrameOutcome::Quit {
                break ExitReason::Quit;
            }
            if self.config.pace
                && let Some(rest) = budget.checked_sub(started.elapsed())
            {
                std::thread::sleep(rest);
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "program.stop", frames = self.frames, exit = ?exit);
        ProgramSummary {
            frames: self.frames,
            exit,
        }
    }

    fn deliver(&mut self) -> Flow {
        if !self.started {
            self.started = true;
            self.root.dispatch(&RESIZE, &self.size)?;
        }
        match self.input.poll() {
            Some(Input::Resize(height, width)) => {
                self.size = (height, width);
                self.root.dispatch(&RESIZE, &self.size)?;
            }
            Some(Input::Key(key)) => self.root.dispatch(&KEY, &key)?,
            None => {}
        }
        self.root.dispatch(&TICK, &())
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current `(height, width)`.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// The painter.
    #[must_use]
    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// The input source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
