// tokio-marquee/src/widgets/marquee/text_buffer.rs
use std::fmt;

use tracing::debug;
use unicode_width::UnicodeWidthChar;

use super::scanner::{ESCAPE_MARKER, is_terminator};

/// One `char` of a scroll buffer, classified once at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub ch: char,
    /// Part of an escape sequence (zero width, never a scroll boundary).
    pub escape: bool,
    /// Display cells; always 0 for escape units.
    pub width: usize,
}

/// Text tokenized into units, the coordinate space every scroll index lives in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    units: Vec<Unit>,
    printable_width: usize,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        let mut units = Vec::with_capacity(text.len());
        let mut printable_width = 0;
        let mut in_escape = false;

        for ch in text.chars() {
            let escape = if ch == ESCAPE_MARKER {
                in_escape = true;
                true
            } else if in_escape {
                if is_terminator(ch) {
                    in_escape = false;
                }
                true
            } else {
                false
            };

            let width = if escape { 0 } else { ch.width().unwrap_or(0) };
            printable_width += width;
            units.push(Unit { ch, escape, width });
        }

        Self {
            units,
            printable_width,
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn printable_width(&self) -> usize {
        self.printable_width
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in &self.units {
            write!(f, "{}", unit.ch)?;
        }
        Ok(())
    }
}

/// Derive the scroll buffer for a text/width/layout triple.
///
/// Bounce layout surrounds the text with `width` blank cells on both sides so
/// the text can enter from one edge and leave through the other. Continuous
/// layout uses the text verbatim and treats it as a ring.
pub fn rebuild(text: &str, width: usize, continuous: bool) -> TextBuffer {
    if continuous {
        TextBuffer::new(text)
    } else {
        let padding = " ".repeat(width);
        TextBuffer::new(&format!("{padding}{text}{padding}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct BufferKey {
    text: String,
    width: usize,
    continuous: bool,
}

/// Keeps the last derived buffer and only rebuilds when its inputs change.
#[derive(Debug, Clone, Default)]
pub struct BufferCache {
    key: Option<BufferKey>,
    buffer: TextBuffer,
}

impl BufferCache {
    /// Refresh for the given inputs. Returns `true` when the buffer was rebuilt.
    pub fn refresh(&mut self, text: &str, width: usize, continuous: bool) -> bool {
        let unchanged = self.key.as_ref().is_some_and(|key| {
            key.width == width && key.continuous == continuous && key.text == text
        });
        if unchanged {
            return false;
        }

        self.buffer = rebuild(text, width, continuous);
        debug!(
            units = self.buffer.len(),
            width, continuous, "rebuilt marquee buffer"
        );
        self.key = Some(BufferKey {
            text: text.to_string(),
            width,
            continuous,
        });
        true
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }
}
