// tokio-marquee/src/tui/mod.rs
mod tui_widget;
pub use tui_widget::*;
