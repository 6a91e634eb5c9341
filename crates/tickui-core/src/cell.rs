#![forbid(unsafe_code)]

//! Drawable cells.
//!
//! A [`Cell`] is a positioned, styled rectangle filled with one [`Glyph`].
//! A 1x1 cell is a single character on screen. Widgets produce cells lazily
//! through [`Widget::cells`](crate::Widget::cells); the painter that turns
//! them into terminal output lives outside this crate.
//!
//! [`Style`] is an opaque token. Nothing here interprets it.

use std::fmt;
use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;

/// Lazy sequence of drawable cells.
pub type Cells = Box<dyn Iterator<Item = Cell>>;

// ─── Style ───────────────────────────────────────────────────────────────────

/// Opaque style identifier, interpreted only by the color-mapping layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Style(u16);

impl Style {
    pub const DEFAULT: Self = Self(100);
    pub const WHITE: Self = Self(200);
    pub const RED: Self = Self(201);
    pub const BLUE: Self = Self(202);
    pub const GREEN: Self = Self(203);
    pub const CYAN: Self = Self(204);
    pub const DIM: Self = Self(205);

    /// An application-defined style id.
    #[inline]
    #[must_use]
    pub const fn custom(id: u16) -> Self {
        Self(id)
    }

    /// Raw id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u16 {
        self.0
    }
}

// ─── Glyph ───────────────────────────────────────────────────────────────────

/// Construction-time validation failure for drawables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    /// The glyph text was empty.
    EmptyGlyph,
    /// The glyph text held more than one grapheme cluster.
    MultipleGlyphs {
        /// Number of grapheme clusters found.
        count: usize,
    },
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGlyph => write!(f, "glyph is empty"),
            Self::MultipleGlyphs { count } => {
                write!(f, "glyph must be one grapheme, got {count}")
            }
        }
    }
}

impl std::error::Error for CellError {}

/// Exactly one grapheme cluster.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Glyph(Rc<str>);

impl Glyph {
    /// Validate `text` as a single grapheme cluster.
    pub fn new(text: &str) -> Result<Self, CellError> {
        match text.graphemes(true).count() {
            0 => Err(CellError::EmptyGlyph),
            1 => Ok(Self(Rc::from(text))),
            count => Err(CellError::MultipleGlyphs { count }),
        }
    }

    /// A single `char` is always one grapheme cluster.
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        let mut buf = [0u8; 4];
        Self(Rc::from(&*ch.encode_utf8(&mut buf)))
    }

    /// A blank.
    #[must_use]
    pub fn blank() -> Self {
        Self::from_char(' ')
    }

    /// Split `text` into glyphs, one per grapheme cluster.
    pub fn split(text: &str) -> impl Iterator<Item = Glyph> + '_ {
        text.graphemes(true).map(|g| Self(Rc::from(g)))
    }

    /// The grapheme as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Glyph({:?})", &*self.0)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<char> for Glyph {
    fn from(ch: char) -> Self {
        Self::from_char(ch)
    }
}

impl TryFrom<&str> for Glyph {
    type Error = CellError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A positioned, styled rectangle filled with one glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub y: u16,
    pub x: u16,
    pub height: u16,
    pub width: u16,
    pub style: Style,
    pub glyph: Glyph,
}

impl Cell {
    /// A single character at `(y, x)`.
    #[must_use]
    pub fn new(y: u16, x: u16, style: Style, glyph: Glyph) -> Self {
        Self::rect(y, x, 1, 1, style, glyph)
    }

    /// A `height` x `width` rectangle at `(y, x)`.
    #[must_use]
    pub fn rect(y: u16, x: u16, height: u16, width: u16, style: Style, glyph: Glyph) -> Self {
        Self {
            y,
            x,
            height,
            width,
            style,
            glyph,
        }
    }

    /// Whether the cell covers no area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// One past the bottom row.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// One past the right column.
    #[inline]
    #[must_use]
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Clip to an area of `height` x `width` anchored at the origin.
    ///
    /// Returns `None` when nothing remains visible.
    #[must_use]
    pub fn clip(mut self, height: u16, width: u16) -> Option<Self> {
        if self.y >= height || self.x >= width {
            return None;
        }
        self.height = self.height.min(height - self.y);
        self.width = self.width.min(width - self.x);
        if self.is_empty() { None } else { Some(self) }
    }

    /// Shift by `(dy, dx)`, saturating at the coordinate limit.
    #[must_use]
    pub fn offset(mut self, dy: u16, dx: u16) -> Self {
        self.y = self.y.saturating_add(dy);
        self.x = self.x.saturating_add(dx);
        self
    }

    /// Scale position and extent by `factor`.
    #[must_use]
    pub fn scale(mut self, factor: u16) -> Self {
        self.y = self.y.saturating_mul(factor);
        self.x = self.x.saturating_mul(factor);
        self.height = self.height.saturating_mul(factor);
        self.width = self.width.saturating_mul(factor);
        self
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn block(y: u16, x: u16, h: u16, w: u16) -> Cell {
        Cell::rect(y, x, h, w, Style::DEFAULT, Glyph::blank())
    }

    #[test]
    fn glyph_accepts_single_grapheme() {
        assert_eq!(Glyph::new("a").unwrap().as_str(), "a");
        // e + combining acute accent is one cluster
        assert!(Glyph::new("e\u{301}").is_ok());
    }

    #[test]
    fn glyph_rejects_empty_and_multiple() {
        assert_eq!(Glyph::new(""), Err(CellError::EmptyGlyph));
        assert_eq!(
            Glyph::new("ab"),
            Err(CellError::MultipleGlyphs { count: 2 })
        );
    }

    #[test]
    fn glyph_split_yields_clusters() {
        let glyphs: Vec<_> = Glyph::split("hi!").map(|g| g.to_string()).collect();
        assert_eq!(glyphs, ["h", "i", "!"]);
    }

    #[test]
    fn clip_inside_is_identity() {
        assert_eq!(block(1, 1, 2, 2).clip(10, 10), Some(block(1, 1, 2, 2)));
    }

    #[test]
    fn clip_trims_overhang() {
        assert_eq!(block(8, 7, 5, 5).clip(10, 10), Some(block(8, 7, 2, 3)));
    }

    #[test]
    fn clip_outside_is_none() {
        assert_eq!(block(10, 0, 1, 1).clip(10, 10), None);
        assert_eq!(block(0, 10, 1, 1).clip(10, 10), None);
        assert_eq!(block(0, 0, 0, 3).clip(10, 10), None);
    }

    #[test]
    fn scale_multiplies_everything() {
        assert_eq!(block(1, 2, 1, 1).scale(3), block(3, 6, 3, 3));
    }

    #[test]
    fn error_display() {
        assert_eq!(CellError::EmptyGlyph.to_string(), "glyph is empty");
        assert_eq!(
            CellError::MultipleGlyphs { count: 3 }.to_string(),
            "glyph must be one grapheme, got 3"
        );
    }
}
