use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

#[derive(Debug, Default)]
pub(crate) struct Counters {
    created: AtomicU32,
    cloned: AtomicU32,
    dropped: AtomicU32,
}

impl Counters {
    pub(crate) fn created(&self) -> u32 {
        self.created.load(Ordering::Acquire)
    }

    pub(crate) fn cloned(&self) -> u32 {
        self.cloned.load(Ordering::Acquire)
    }

    pub(crate) fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Acquire)
    }

    pub(crate) fn incl_created(&self) {
        self.created.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn incl_cloned(&self) {
        self.cloned.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn incl_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::AcqRel);
    }
}

/// An element that records its own creation, cloning and dropping.
#[derive(Debug)]
pub(crate) struct Value {
    id: u32,
    counters: Arc<Counters>,
}

impl Value {
    pub(crate) fn new(id: u32, counters: &Arc<Counters>) -> Self {
        counters.incl_created();
        Self {
            id,
            counters: Arc::clone(counters),
        }
    }

    pub(crate) fn id(&self) -> u32 {
        self.id
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        self.counters.incl_cloned();
        Self {
            id: self.id,
            counters: Arc::clone(&self.counters),
        }
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        self.counters.incl_dropped();
    }
}
