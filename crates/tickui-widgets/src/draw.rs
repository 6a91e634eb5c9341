#![forbid(unsafe_code)]

//! Drawing widgets.
//!
//! Every widget here clips to the area it is asked to draw: positions at or
//! beyond `(height, width)` produce no cells, and rectangles that overhang
//! the area are trimmed.

use std::fmt;
use std::rc::Rc;

use tickui_core::{Cell, CellError, Cells, Glyph, Handlers, Style, Widget};

// ─── SimpleText ──────────────────────────────────────────────────────────────

/// One line of text, one cell per grapheme cluster.
pub struct SimpleText {
    handlers: Handlers,
    y: u16,
    x: u16,
    glyphs: Rc<[Glyph]>,
    style: Style,
}

impl SimpleText {
    /// `text` starting at `(y, x)`.
    #[must_use]
    pub fn new(y: u16, x: u16, text: &str, style: Style) -> Self {
        Self {
            handlers: Handlers::new(),
            y,
            x,
            glyphs: Glyph::split(text).collect(),
            style,
        }
    }

    /// The text as glyphs.
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }
}

impl fmt::Debug for SimpleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.glyphs.iter().map(Glyph::as_str).collect();
        f.debug_struct("SimpleText")
            .field("y", &self.y)
            .field("x", &self.x)
            .field("text", &text)
            .field("style", &self.style)
            .finish()
    }
}

impl Widget for SimpleText {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn cells(&self, height: u16, width: u16) -> Cells {
        if self.y >= height {
            return Box::new(std::iter::empty());
        }
        let (y, x, style) = (self.y, self.x, self.style);
        let glyphs = Rc::clone(&self.glyphs);
        Box::new((0..glyphs.len()).map_while(move |i| {
            let col = u16::try_from(i).ok().and_then(|i| x.checked_add(i))?;
            (col < width).then(|| Cell::new(y, col, style, glyphs[i].clone()))
        }))
    }
}

// ─── Rect ────────────────────────────────────────────────────────────────────

/// A filled rectangle.
pub struct Rect {
    handlers: Handlers,
    area: Cell,
}

impl Rect {
    /// A blank-filled `height` x `width` rectangle at `(y, x)`.
    #[must_use]
    pub fn new(y: u16, x: u16, height: u16, width: u16, style: Style) -> Self {
        Self {
            handlers: Handlers::new(),
            area: Cell::rect(y, x, height, width, style, Glyph::blank()),
        }
    }

    /// Fill with `glyph` instead of blanks.
    #[must_use]
    pub fn with_glyph(mut self, glyph: Glyph) -> Self {
        self.area.glyph = glyph;
        self
    }

    /// The unclipped rectangle.
    #[must_use]
    pub fn area(&self) -> &Cell {
        &self.area
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rect").field(&self.area).finish()
    }
}

impl Widget for Rect {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn cells(&self, height: u16, width: u16) -> Cells {
        Box::new(self.area.clone().clip(height, width).into_iter())
    }
}

/// A single character at `(y, x)`.
///
/// # Errors
///
/// Fails unless `glyph` is exactly one grapheme cluster.
pub fn cell(y: u16, x: u16, style: Style, glyph: &str) -> Result<Rect, CellError> {
    Ok(Rect::new(y, x, 1, 1, style).with_glyph(Glyph::new(glyph)?))
}

// ─── Fill ────────────────────────────────────────────────────────────────────

/// Covers the whole area with blanks in one style. Usually a background.
pub struct Fill {
    handlers: Handlers,
    style: Style,
}

impl Fill {
    #[must_use]
    pub fn new(style: Style) -> Self {
        Self {
            handlers: Handlers::new(),
            style,
        }
    }
}

impl fmt::Debug for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fill").field(&self.style).finish()
    }
}

impl Widget for Fill {
    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn cells(&self, height: u16, width: u16) -> Cells {
        let area = Cell::rect(0, 0, height, width, self.style, Glyph::blank());
        Box::new(area.clip(height, width).into_iter())
    }
}
