//! Latest impulse magnitude per sounding body, shared across bodies.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared diagnostics log. Lives in the collision domain only.
#[derive(Debug, Default)]
pub struct ImpulseLog {
    latest: Mutex<Vec<f32>>,
}

impl ImpulseLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a body. Its entry reads 0 until the first record.
    pub fn register(self: &Arc<Self>) -> ImpulseSlot {
        let mut latest = self.lock();
        latest.push(0.0);
        ImpulseSlot {
            log: Arc::clone(self),
            index: latest.len() - 1,
        }
    }

    /// Mean of every body's latest impulse, or 0 with no bodies registered
    pub fn average(&self) -> f32 {
        let latest = self.lock();
        if latest.is_empty() {
            return 0.0;
        }
        latest.iter().sum::<f32>() / latest.len() as f32
    }

    /// Copy of every body's latest impulse, in registration order
    pub fn snapshot(&self) -> Vec<f32> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<f32>> {
        // Plain floats stay valid even if a holder panicked
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One body's entry in an [`ImpulseLog`]
#[derive(Debug, Clone)]
pub struct ImpulseSlot {
    log: Arc<ImpulseLog>,
    index: usize,
}

impl ImpulseSlot {
    /// Overwrite this body's latest impulse
    pub fn record(&self, impulse_magnitude: f32) {
        if let Some(entry) = self.log.lock().get_mut(self.index) {
            *entry = impulse_magnitude;
        }
    }

    pub fn latest(&self) -> f32 {
        self.log.lock().get(self.index).copied().unwrap_or(0.0)
    }

    pub fn log(&self) -> &Arc<ImpulseLog> {
        &self.log
    }
}
