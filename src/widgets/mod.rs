// tokio-marquee/src/widgets/mod.rs
mod marquee;
pub use marquee::*;
