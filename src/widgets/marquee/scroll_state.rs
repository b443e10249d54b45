// tokio-marquee/src/widgets/marquee/scroll_state.rs
use serde::{Deserialize, Serialize};

use super::{ScanResult, TextBuffer, scan};

/// Which way the scroll index travels on each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Index increases, text moves towards the left edge.
    #[default]
    Forward,
    /// Index decreases, text moves towards the right edge.
    Backward,
}

/// Scroll position plus the escape text that is open at that position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    index: usize,
    open_prefix: String,
}

impl ScrollState {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn open_prefix(&self) -> &str {
        &self.open_prefix
    }

    /// Move one step in `direction`, then snap onto a safe boundary.
    pub fn advance(
        &mut self,
        buffer: &TextBuffer,
        width: usize,
        continuous: bool,
        direction: Direction,
    ) {
        match (continuous, direction) {
            (false, Direction::Forward) => self.bounce_forward(buffer, width),
            (false, Direction::Backward) => self.bounce_backward(buffer, width),
            (true, Direction::Forward) => self.ring_forward(buffer),
            (true, Direction::Backward) => self.ring_backward(buffer),
        }
    }

    /// Recompute the open prefix after the buffer changed underneath the index.
    ///
    /// The index is kept unless it sits on an escape sequence or past the last
    /// printable unit. A ring then restarts at its first printable unit.
    pub fn resync(&mut self, buffer: &TextBuffer, continuous: bool) {
        if continuous {
            self.snap_ring_forward(buffer, self.index);
            return;
        }

        let result = scan(buffer, self.index);
        if result.index_forward < buffer.len() {
            self.index = result.index_forward;
            self.open_prefix = result.prefix_forward;
        } else {
            // nothing printable from here to the end
            self.index = buffer.len();
            self.open_prefix.clear();
        }
    }

    fn bounce_forward(&mut self, buffer: &TextBuffer, width: usize) {
        let limit = bounce_limit(buffer, width);
        let mut index = self.index + 1;
        if index > limit {
            index = 0;
        }

        let result = scan(buffer, index);
        self.open_prefix = result.prefix_forward;
        if result.index_forward > index {
            index = result.index_forward;
        }
        self.index = index;
    }

    fn bounce_backward(&mut self, buffer: &TextBuffer, width: usize) {
        let limit = bounce_limit(buffer, width);
        let index = match self.index.checked_sub(1) {
            Some(index) => index.min(limit),
            None => limit,
        };
        self.snap_backward(buffer, index);
    }

    fn ring_forward(&mut self, buffer: &TextBuffer) {
        let mut index = self.index + 1;
        if index >= buffer.len() {
            index = 0;
        }
        self.snap_ring_forward(buffer, index);
    }

    fn ring_backward(&mut self, buffer: &TextBuffer) {
        let last = buffer.len().saturating_sub(1);
        let index = match self.index.checked_sub(1) {
            Some(index) => index.min(last),
            None => last,
        };

        let mut result = scan(buffer, index);
        if result.index_backward.is_none() {
            // only escape text behind us, continue from the end of the ring
            result = scan(buffer, last);
        }
        self.apply_backward(result);
    }

    /// First printable unit at or after `index`, going round the ring once.
    fn snap_ring_forward(&mut self, buffer: &TextBuffer, index: usize) {
        let len = buffer.len();
        let mut result = scan(buffer, index);
        if result.index_forward >= len && index > 0 {
            // only escape text left before the ring closes
            result = scan(buffer, 0);
        }

        if result.index_forward < len {
            self.index = result.index_forward;
            self.open_prefix = result.prefix_forward;
        } else {
            self.index = 0;
            self.open_prefix.clear();
        }
    }

    fn snap_backward(&mut self, buffer: &TextBuffer, index: usize) {
        self.apply_backward(scan(buffer, index));
    }

    fn apply_backward(&mut self, result: ScanResult) {
        match result.index_backward {
            Some(snapped) => {
                self.open_prefix = result.prefix_backward;
                self.index = snapped;
            }
            None => {
                // nothing printable behind us, the buffer start is the only safe spot
                self.index = 0;
                self.open_prefix.clear();
            }
        }
    }
}

/// Largest bounce index: the window at this offset shows only trailing padding.
fn bounce_limit(buffer: &TextBuffer, width: usize) -> usize {
    buffer.len().saturating_sub(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rebuild;

    fn run(
        buffer: &TextBuffer,
        width: usize,
        continuous: bool,
        direction: Direction,
        ticks: usize,
    ) -> Vec<usize> {
        let mut state = ScrollState::default();
        (0..ticks)
            .map(|_| {
                state.advance(buffer, width, continuous, direction);
                state.index()
            })
            .collect()
    }

    #[test]
    fn bounce_forward_wraps_after_limit() {
        // 2 + 3 + 2 units, limit = 5
        let buffer = rebuild("abc", 2, false);
        let indices = run(&buffer, 2, false, Direction::Forward, 8);
        assert_eq!(indices, vec![1, 2, 3, 4, 5, 0, 1, 2]);
    }

    #[test]
    fn bounce_backward_wraps_below_zero() {
        let buffer = rebuild("abc", 2, false);
        let indices = run(&buffer, 2, false, Direction::Backward, 7);
        assert_eq!(indices, vec![5, 4, 3, 2, 1, 0, 5]);
    }

    #[test]
    fn forward_snaps_over_escape_sequences() {
        // units: ' ' ESC [ 1 m 'a' ' '
        let buffer = rebuild("\x1b[1ma", 1, false);
        let mut state = ScrollState::default();
        state.advance(&buffer, 1, false, Direction::Forward);
        assert_eq!(state.index(), 5);
        assert_eq!(state.open_prefix(), "\x1b[1m");
    }

    #[test]
    fn backward_snaps_before_escape_sequences() {
        let buffer = rebuild("\x1b[1ma", 1, false);
        let mut state = ScrollState::default();
        // 0 -> limit (6) -> 5 ('a') -> 4 is inside the escape, snaps to 0
        state.advance(&buffer, 1, false, Direction::Backward);
        assert_eq!(state.index(), 6);
        state.advance(&buffer, 1, false, Direction::Backward);
        assert_eq!(state.index(), 5);
        assert_eq!(state.open_prefix(), "\x1b[1m");
        state.advance(&buffer, 1, false, Direction::Backward);
        assert_eq!(state.index(), 0);
        assert_eq!(state.open_prefix(), "");
    }

    #[test]
    fn ring_forward_cycles_through_every_unit() {
        let buffer = rebuild("AB", 1, true);
        let indices = run(&buffer, 1, true, Direction::Forward, 5);
        assert_eq!(indices, vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn ring_backward_rotates_in_reverse() {
        let buffer = rebuild("ABC", 1, true);
        let indices = run(&buffer, 1, true, Direction::Backward, 4);
        assert_eq!(indices, vec![2, 1, 0, 2]);
    }

    #[test]
    fn ring_skips_trailing_escape_run() {
        // 'a' 'b' then a reset sequence closing the ring
        let buffer = rebuild("ab\x1b[0m", 1, true);
        let indices = run(&buffer, 1, true, Direction::Forward, 3);
        assert_eq!(indices, vec![1, 0, 1]);
    }

    fn advance_from_resync(
        buffer: &TextBuffer,
        direction: Direction,
        ticks: usize,
    ) -> Vec<(usize, String)> {
        let mut state = ScrollState::default();
        state.resync(buffer, true);
        (0..ticks)
            .map(|_| {
                state.advance(buffer, 1, true, direction);
                (state.index(), state.open_prefix().to_string())
            })
            .collect()
    }

    #[test]
    fn ring_with_leading_escape_alternates() {
        // ESC [ 3 1 m 'A' 'B' ESC [ 0 m
        let buffer = rebuild("\x1b[31mAB\x1b[0m", 1, true);
        let red = "\x1b[31m".to_string();
        assert_eq!(
            advance_from_resync(&buffer, Direction::Forward, 4),
            vec![(6, red.clone()), (5, red.clone()), (6, red.clone()), (5, red)]
        );
    }

    #[test]
    fn ring_backward_with_leading_escape_wraps_to_last_glyph() {
        let buffer = rebuild("\x1b[31mABC", 1, true);
        let indices: Vec<usize> = advance_from_resync(&buffer, Direction::Backward, 4)
            .into_iter()
            .map(|(index, _)| index)
            .collect();
        assert_eq!(indices, vec![7, 6, 5, 7]);
    }

    #[test]
    fn resync_snaps_ring_onto_first_glyph() {
        let buffer = rebuild("\x1b[1mab", 1, true);
        let mut state = ScrollState {
            index: 7,
            open_prefix: String::new(),
        };
        state.resync(&buffer, true);
        assert_eq!(state.index(), 4);
        assert_eq!(state.open_prefix(), "\x1b[1m");
    }

    #[test]
    fn empty_ring_stays_at_zero() {
        let buffer = rebuild("", 3, true);
        let indices = run(&buffer, 3, true, Direction::Forward, 2);
        assert_eq!(indices, vec![0, 0]);
        let indices = run(&buffer, 3, true, Direction::Backward, 2);
        assert_eq!(indices, vec![0, 0]);
    }

    #[test]
    fn resync_moves_off_an_escape() {
        let buffer = rebuild("\x1b[31mab", 2, true);
        let mut state = ScrollState {
            index: 2,
            open_prefix: String::new(),
        };
        state.resync(&buffer, true);
        assert_eq!(state.index(), 5);
        assert_eq!(state.open_prefix(), "\x1b[31m");
    }

    #[test]
    fn resync_resets_ring_that_shrank() {
        let buffer = rebuild("ab", 2, true);
        let mut state = ScrollState {
            index: 9,
            open_prefix: "\x1b[1m".to_string(),
        };
        state.resync(&buffer, true);
        assert_eq!(state.index(), 0);
        assert_eq!(state.open_prefix(), "");
    }

    #[test]
    fn direction_deserializes_lowercase() {
        let direction: Direction = serde_json::from_str("\"backward\"").unwrap();
        assert_eq!(direction, Direction::Backward);
    }
}
