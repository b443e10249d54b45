// tokio-marquee/src/widgets/marquee/scheduler.rs
use std::time::Duration;

use futures::{FutureExt, future::BoxFuture};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::MarqueeId;

/// A request for the owner's runtime: await it and feed the result back into
/// [`crate::Marquee::update`].
pub type ScrollCmd = BoxFuture<'static, MarqueeMsg>;

/// Tick addressed to one marquee at one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMsg {
    pub(crate) id: MarqueeId,
    pub(crate) tag: u64,
}

impl ScrollMsg {
    pub fn id(&self) -> MarqueeId {
        self.id
    }

    pub fn tag(&self) -> u64 {
        self.tag
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarqueeMsg {
    Scroll(ScrollMsg),
    /// The timer that would have produced a tick was superseded.
    Canceled,
}

impl From<ScrollMsg> for MarqueeMsg {
    fn from(value: ScrollMsg) -> Self {
        MarqueeMsg::Scroll(value)
    }
}

/// One live timer per marquee, identified by a generation tag.
#[derive(Debug, Default)]
pub struct ScrollScheduler {
    cancel: Option<CancellationToken>,
    generation: u64,
}

impl ScrollScheduler {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel any outstanding timer, bump the generation and arm a new one.
    ///
    /// The returned future resolves to a tick carrying the new generation once
    /// `speed` has elapsed, or to [`MarqueeMsg::Canceled`] if another `start`
    /// (or dropping the scheduler) cancels it first.
    pub fn start(&mut self, id: MarqueeId, speed: Duration) -> ScrollCmd {
        self.cancel();

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        self.generation += 1;

        let tick = ScrollMsg {
            id,
            tag: self.generation,
        };
        debug!(id = id.0, tag = tick.tag, ?speed, "armed scroll timer");

        async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    trace!(id = tick.id.0, tag = tick.tag, "scroll timer canceled");
                    MarqueeMsg::Canceled
                }
                _ = tokio::time::sleep(speed) => MarqueeMsg::Scroll(tick),
            }
        }
        .boxed()
    }

    /// Whether `msg` belongs to the current generation of `id`.
    pub fn accepts(&self, id: MarqueeId, msg: &ScrollMsg) -> bool {
        msg.id == id && msg.tag == self.generation
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

impl Drop for ScrollScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
