// tokio-marquee/src/widgets/marquee/window.rs
use super::{RESET_SEQUENCE, TextBuffer, Unit};

/// Everything the extractor needs to cut one frame out of a buffer.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    pub buffer: &'a TextBuffer,
    pub index: usize,
    pub width: usize,
    pub continuous: bool,
    pub open_prefix: &'a str,
}

impl Window<'_> {
    /// Render the visible slice: open prefix, exactly `width` cells of text,
    /// then a reset. A zero width renders nothing at all.
    pub fn render(&self) -> String {
        if self.width == 0 {
            return String::new();
        }

        let mut out = String::from(self.open_prefix);
        let units = self.buffer.units();
        let filled = if self.continuous {
            if self.buffer.printable_width() == 0 {
                0
            } else {
                let start = self.index % units.len();
                let ring = units[start..].iter().chain(&units[..start]).cycle();
                take_cells(ring, self.width, &mut out)
            }
        } else {
            let start = self.index.min(units.len());
            take_cells(units[start..].iter(), self.width, &mut out)
        };

        // a wide glyph that would straddle the edge leaves a gap
        out.extend(std::iter::repeat_n(' ', self.width - filled));
        out.push_str(RESET_SEQUENCE);
        out
    }
}

/// Copy units into `out` until `width` cells are filled or the next glyph
/// would overflow. Escape units are copied whole while the window is open,
/// so a sequence is never cut in half. Returns the number of cells filled.
fn take_cells<'a>(units: impl Iterator<Item = &'a Unit>, width: usize, out: &mut String) -> usize {
    let mut filled = 0;
    for unit in units {
        if filled >= width {
            break;
        }
        if !unit.escape && filled + unit.width > width {
            break;
        }
        out.push(unit.ch);
        filled += unit.width;
    }
    filled
}
