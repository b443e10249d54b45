// tokio-marquee/src/widgets/marquee/mod.rs
mod scanner;
pub use scanner::*;

mod text_buffer;
pub use text_buffer::*;

mod scroll_state;
pub use scroll_state::*;

mod window;
pub use window::*;

mod marquee_id;
pub use marquee_id::*;

mod scheduler;
pub use scheduler::*;

mod parse_ansi;
pub use parse_ansi::*;

mod container_style;
pub use container_style::*;

mod marquee_config;
pub use marquee_config::*;

mod marquee_widget;
pub use marquee_widget::*;
