// tokio-marquee/src/tui/tui_widget.rs
use crossterm::event::{KeyEvent, MouseEvent};

pub use ratatui::{buffer::Buffer, layout::Rect};

// Widget trait that all renderable components must implement
pub trait TuiWidget: Send + Sync {
    fn preprocess(&mut self) {}
    fn draw(&mut self, area: Rect, buf: &mut Buffer);
    fn key_event(&mut self, event: KeyEvent) -> bool; // Return true if handled
    #[allow(unused)]
    fn mouse_event(&mut self, event: MouseEvent) -> bool {
        false
    }
    fn focus(&mut self);
    fn unfocus(&mut self);
    fn is_focused(&self) -> bool;
    fn need_draw(&self) -> bool {
        true
    }
}
