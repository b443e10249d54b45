// tokio-marquee/src/widgets/marquee/scanner.rs
use unicode_width::UnicodeWidthChar;

use super::TextBuffer;

/// Every escape sequence starts with this marker.
pub const ESCAPE_MARKER: char = '\x1b';

/// Closes every open SGR attribute.
pub const RESET_SEQUENCE: &str = "\x1b[0m";

/// An escape sequence ends on the first ASCII letter after the marker.
pub fn is_terminator(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Display width of `s` in cells, skipping escape sequences entirely.
pub fn printable_width(s: &str) -> usize {
    let mut in_escape = false;
    let mut width = 0;
    for c in s.chars() {
        if c == ESCAPE_MARKER {
            in_escape = true;
        } else if in_escape {
            if is_terminator(c) {
                in_escape = false;
            }
        } else {
            width += c.width().unwrap_or(0);
        }
    }
    width
}

fn is_full_reset(sequence: &str) -> bool {
    sequence == "\x1b[0m" || sequence == "\x1b[m"
}

/// Escape text seen so far whose effect has not been closed by a reset.
#[derive(Debug, Default, Clone)]
pub(crate) struct OpenEscapes {
    committed: String,
    pending: String,
}

impl OpenEscapes {
    pub(crate) fn feed(&mut self, c: char) {
        if c == ESCAPE_MARKER {
            // a new marker abandons whatever was pending
            self.pending.clear();
        }
        self.pending.push(c);
        if is_terminator(c) {
            if is_full_reset(&self.pending) {
                self.committed.clear();
            } else {
                self.committed.push_str(&self.pending);
            }
            self.pending.clear();
        }
    }

    pub(crate) fn current(&self) -> String {
        let mut open = self.committed.clone();
        open.push_str(&self.pending);
        open
    }
}

/// Result of a single left-to-right scan up to a target unit index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Open escape text in front of `index_forward`.
    pub prefix_forward: String,
    /// Open escape text in front of `index_backward`.
    pub prefix_backward: String,
    /// First printable unit at or after the target, or the buffer length if none.
    pub index_forward: usize,
    /// Last printable unit at or before the target.
    pub index_backward: Option<usize>,
}

/// Walk `buffer` once and compute both safe boundaries around `target`.
///
/// Units inside an unterminated escape sequence stay "inside" until the end
/// of the buffer, so a malformed tail never yields a printable boundary.
pub fn scan(buffer: &TextBuffer, target: usize) -> ScanResult {
    let mut open = OpenEscapes::default();
    let mut backward: Option<(usize, String)> = None;

    for (i, unit) in buffer.units().iter().enumerate() {
        if unit.escape {
            open.feed(unit.ch);
            continue;
        }

        if i <= target {
            backward = Some((i, open.current()));
        }
        if i >= target {
            let (index_backward, prefix_backward) = split_backward(backward);
            return ScanResult {
                prefix_forward: open.current(),
                prefix_backward,
                index_forward: i,
                index_backward,
            };
        }
    }

    let (index_backward, prefix_backward) = split_backward(backward);
    ScanResult {
        prefix_forward: open.current(),
        prefix_backward,
        index_forward: buffer.len(),
        index_backward,
    }
}

fn split_backward(backward: Option<(usize, String)>) -> (Option<usize>, String) {
    match backward {
        Some((index, prefix)) => (Some(index), prefix),
        None => (None, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_ignores_escapes() {
        assert_eq!(printable_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(printable_width(""), 0);
    }

    #[test]
    fn width_counts_wide_cells() {
        assert_eq!(printable_width("你好"), 4);
        assert_eq!(printable_width("a\x1b[1m你\x1b[0mb"), 4);
    }

    #[test]
    fn unterminated_escape_swallows_the_rest() {
        assert_eq!(printable_width("ab\x1b[31"), 2);
        assert_eq!(printable_width("ab\x1b[31;;;  12"), 2);
    }

    #[test]
    fn scan_snaps_past_an_escape() {
        let buffer = TextBuffer::new("ab\x1b[31mcd");
        // unit 3 is '[' inside the sequence, 'c' is unit 7
        let result = scan(&buffer, 3);
        assert_eq!(result.index_forward, 7);
        assert_eq!(result.prefix_forward, "\x1b[31m");
        assert_eq!(result.index_backward, Some(1));
        assert_eq!(result.prefix_backward, "");
    }

    #[test]
    fn scan_on_printable_target_agrees_both_ways() {
        let buffer = TextBuffer::new("\x1b[1mab");
        let result = scan(&buffer, 5);
        assert_eq!(result.index_forward, 5);
        assert_eq!(result.index_backward, Some(5));
        assert_eq!(result.prefix_forward, "\x1b[1m");
        assert_eq!(result.prefix_backward, "\x1b[1m");
    }

    #[test]
    fn reset_closes_open_state() {
        let buffer = TextBuffer::new("\x1b[31mr\x1b[0mx\x1b[4my");
        let y = buffer.len() - 1;
        let result = scan(&buffer, y);
        assert_eq!(result.prefix_forward, "\x1b[4m");
    }

    #[test]
    fn open_state_accumulates_until_reset() {
        let buffer = TextBuffer::new("\x1b[41m\x1b[1mab");
        let result = scan(&buffer, 10);
        assert_eq!(result.prefix_forward, "\x1b[41m\x1b[1m");
    }

    #[test]
    fn no_printable_after_target() {
        let buffer = TextBuffer::new("ab\x1b[0m");
        let result = scan(&buffer, 3);
        assert_eq!(result.index_forward, buffer.len());
        assert_eq!(result.index_backward, Some(1));
    }

    #[test]
    fn no_printable_before_target() {
        let buffer = TextBuffer::new("\x1b[31mab");
        let result = scan(&buffer, 2);
        assert_eq!(result.index_backward, None);
        assert_eq!(result.index_forward, 5);
    }
}
