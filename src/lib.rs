// tokio-marquee/src/lib.rs
mod widgets;
pub use widgets::*;

mod tui;
pub use tui::*;

pub use ratatui;
