// tokio-marquee/src/widgets/marquee/marquee_id.rs
use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MarqueeId(pub u64);

/// Hands out marquee ids. Clones share the same counter.
#[derive(Clone, Debug)]
pub struct IdAllocator(Arc<AtomicU64>);

impl Default for IdAllocator {
    fn default() -> Self {
        Self(Arc::new(AtomicU64::new(1)))
    }
}

impl IdAllocator {
    pub fn next(&self) -> MarqueeId {
        MarqueeId(self.0.fetch_add(1, Ordering::SeqCst))
    }

    /// The process-wide allocator used by [`crate::Marquee::new`].
    pub fn global() -> &'static IdAllocator {
        static GLOBAL: OnceLock<IdAllocator> = OnceLock::new();
        GLOBAL.get_or_init(IdAllocator::default)
    }
}
