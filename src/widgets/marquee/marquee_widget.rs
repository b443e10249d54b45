// tokio-marquee/src/widgets/marquee/marquee_widget.rs
use std::{sync::Arc, time::Duration};

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Widget},
};
use tracing::trace;

use crate::TuiWidget;

use super::{
    BufferCache, ContainerStyle, DEFAULT_SCROLL_SPEED, Direction, IdAllocator, MarqueeConfig,
    MarqueeId, MarqueeMsg, PlainStyle, ScrollCmd, ScrollMsg, ScrollScheduler, ScrollState,
    Window, printable_width,
};

/// A fixed-width viewport scrolling over a (possibly ANSI styled) line of text.
pub struct Marquee {
    /// Time between two scroll ticks.
    pub scroll_speed: Duration,
    pub direction: Direction,
    /// Applied to the whole rendered window by [`Marquee::view`].
    pub style: Arc<dyn ContainerStyle>,

    id: MarqueeId,
    scheduler: ScrollScheduler,
    text: String,
    /// Viewport width in cells, 0 while unset.
    width: usize,
    continuous: bool,
    cache: BufferCache,
    state: ScrollState,
    needs_redraw: bool,
    is_focused: bool,
}

impl std::fmt::Debug for Marquee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marquee")
            .field("id", &self.id)
            .field("scroll_speed", &self.scroll_speed)
            .field("direction", &self.direction)
            .field("text", &self.text)
            .field("width", &self.width)
            .field("continuous", &self.continuous)
            .field("index", &self.state.index())
            .field("tag", &self.scheduler.generation())
            .finish()
    }
}

impl Marquee {
    pub fn new() -> Self {
        Self::with_ids(IdAllocator::global())
    }

    /// Create a marquee drawing its id from `ids` instead of the global allocator.
    pub fn with_ids(ids: &IdAllocator) -> Self {
        let mut marquee = Self {
            scroll_speed: DEFAULT_SCROLL_SPEED,
            direction: Direction::Forward,
            style: Arc::new(PlainStyle),
            id: ids.next(),
            scheduler: ScrollScheduler::default(),
            text: String::new(),
            width: 0,
            continuous: false,
            cache: BufferCache::default(),
            state: ScrollState::default(),
            needs_redraw: true,
            is_focused: false,
        };
        marquee.refresh_buffer();
        marquee
    }

    pub fn from_config(config: &MarqueeConfig) -> Self {
        let mut marquee = Self::new();
        marquee.apply_config(config);
        marquee
    }

    pub fn apply_config(&mut self, config: &MarqueeConfig) {
        self.scroll_speed = config.scroll_speed();
        self.direction = config.direction;
        self.set_continuous(config.continuous);
        if let Some(width) = config.width {
            self.set_width(width);
        }
        if let Some(text) = &config.text {
            self.set_text(text.clone());
        }
    }

    pub fn with_style(mut self, style: impl ContainerStyle + 'static) -> Self {
        self.set_style(style);
        self
    }

    pub fn set_style(&mut self, style: impl ContainerStyle + 'static) {
        self.style = Arc::new(style);
        self.needs_redraw = true;
    }

    pub fn id(&self) -> MarqueeId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn index(&self) -> usize {
        self.state.index()
    }

    /// Replace the text. Sets the width to the printable text width when no
    /// width was configured yet.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if self.width == 0 {
            self.set_width(printable_width(&self.text));
        }
        self.refresh_buffer();
    }

    /// Set the viewport width in cells. Zero is ignored.
    pub fn set_width(&mut self, width: usize) {
        if width == 0 {
            return;
        }
        self.width = width;
        self.refresh_buffer();
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
        self.refresh_buffer();
    }

    fn refresh_buffer(&mut self) {
        if self
            .cache
            .refresh(&self.text, self.width, self.continuous)
        {
            self.state.resync(self.cache.buffer(), self.continuous);
            self.needs_redraw = true;
        }
    }

    /// The immediate first tick, used once to enter the scroll loop.
    pub fn scroll(&self) -> MarqueeMsg {
        MarqueeMsg::Scroll(ScrollMsg {
            id: self.id,
            tag: self.scheduler.generation(),
        })
    }

    /// Restart scrolling: cancels any pending tick and arms a fresh one.
    pub fn scroll_cmd(&mut self) -> ScrollCmd {
        self.scheduler.start(self.id, self.scroll_speed)
    }

    /// Stop scrolling; the pending tick resolves to [`MarqueeMsg::Canceled`].
    pub fn stop(&mut self) {
        self.scheduler.cancel();
    }

    /// Handle a message. Returns the next tick to wait for, if any.
    pub fn update(&mut self, msg: &MarqueeMsg) -> Option<ScrollCmd> {
        match msg {
            MarqueeMsg::Scroll(tick) => {
                if !self.scheduler.accepts(self.id, tick) {
                    if tick.id == self.id {
                        trace!(
                            id = self.id.0,
                            tag = tick.tag,
                            current = self.scheduler.generation(),
                            "dropping stale scroll tick"
                        );
                    }
                    return None;
                }

                self.state.advance(
                    self.cache.buffer(),
                    self.width,
                    self.continuous,
                    self.direction,
                );
                self.needs_redraw = true;
                Some(self.scroll_cmd())
            }
            MarqueeMsg::Canceled => None,
        }
    }

    /// The visible window without the container style.
    pub fn body(&self) -> String {
        Window {
            buffer: self.cache.buffer(),
            index: self.state.index(),
            width: self.width,
            continuous: self.continuous,
            open_prefix: self.state.open_prefix(),
        }
        .render()
    }

    /// The visible window with the container style applied.
    pub fn view(&self) -> String {
        self.style.apply(&self.body())
    }

    /// The visible window as a ratatui line.
    pub fn line(&self) -> Line<'static> {
        super::parse_ansi_line(self.body())
    }
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &Marquee {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}

impl TuiWidget for Marquee {
    fn draw(&mut self, area: Rect, buf: &mut Buffer) {
        (&*self).render(area, buf);
        self.needs_redraw = false;
    }

    fn key_event(&mut self, _key: KeyEvent) -> bool {
        false
    }

    fn focus(&mut self) {
        self.is_focused = true;
    }

    fn unfocus(&mut self) {
        self.is_focused = false;
    }

    fn is_focused(&self) -> bool {
        self.is_focused
    }

    fn need_draw(&self) -> bool {
        self.needs_redraw
    }
}
