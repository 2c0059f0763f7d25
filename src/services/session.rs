//! Generation tracking
//!
//! Latest-wins coordination for concurrent generation requests from the
//! same client. Each request claims a fresh epoch for its client key; when
//! a result comes back, only the holder of the newest epoch publishes, so
//! a slow older generation can never overwrite a newer one.

use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct GenerationTracker {
    epochs: Mutex<HashMap<String, u64>>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next epoch for `client`. Any earlier epoch becomes stale.
    pub fn begin(&self, client: &str) -> u64 {
        let mut epochs = self.epochs.lock().unwrap_or_else(|e| e.into_inner());
        let epoch = epochs.entry(client.to_string()).or_insert(0);
        *epoch += 1;
        *epoch
    }

    /// Whether `epoch` is still the newest generation for `client`.
    pub fn is_current(&self, client: &str, epoch: u64) -> bool {
        let epochs = self.epochs.lock().unwrap_or_else(|e| e.into_inner());
        epochs.get(client).copied() == Some(epoch)
    }
}
