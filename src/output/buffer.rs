use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::metrics::SampleContainer;

/// Shared queue between sample producers and the flusher. Cloning hands out
/// another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    pending: Arc<Mutex<Vec<SampleContainer>>>,
}

impl SampleBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a container for the next flush. Empty containers are dropped.
    pub fn add_samples(&self, container: SampleContainer) {
        if container.is_empty() {
            return;
        }
        self.lock().push(container);
    }

    /// Takes everything queued so far, leaving the buffer empty.
    #[must_use]
    pub fn drain(&self) -> Vec<SampleContainer> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of containers waiting for the next flush.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SampleContainer>> {
        // A producer panicking mid-push leaves the Vec intact.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
