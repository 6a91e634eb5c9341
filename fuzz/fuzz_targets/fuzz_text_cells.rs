#![no_main]

use libfuzzer_sys::fuzz_target;
use tickui_core::{Glyph, Style, Widget};
use tickui_widgets::SimpleText;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let (height, width) = (u16::from(data[0]), u16::from(data[1]));
    let (y, x) = (u16::from(data[2]), u16::from(data[3]));
    let text = String::from_utf8_lossy(&data[4..]);

    let glyphs: Vec<Glyph> = Glyph::split(&text).collect();
    for glyph in &glyphs {
        assert!(Glyph::new(glyph.as_str()).is_ok());
    }

    let widget = SimpleText::new(y, x, &text, Style::DEFAULT);
    let mut count = 0usize;
    for cell in widget.cells(height, width) {
        assert!(cell.y < height && cell.x < width);
        count += 1;
    }
    assert!(count <= glyphs.len());
});
