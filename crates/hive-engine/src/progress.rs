//! Tick callback that reports colony progress in the log.

use hive_core::{MemoryStore, TickCallback, TickSummary};
use tracing::{debug, info};

/// Logs every tick at `debug` and a population report every `every` ticks.
pub struct ProgressCallback {
    every: u64,
    died: u64,
    terminated: u64,
    spawned: u64,
}

impl ProgressCallback {
    /// Report every `every` ticks; zero disables the periodic report.
    pub const fn new(every: u64) -> Self {
        Self {
            every,
            died: 0,
            terminated: 0,
            spawned: 0,
        }
    }
}

fn len_u64<T>(items: &[T]) -> u64 {
    u64::try_from(items.len()).unwrap_or(u64::MAX)
}

impl TickCallback for ProgressCallback {
    fn on_tick(&mut self, summary: &TickSummary, memory: &MemoryStore) {
        self.died = self.died.saturating_add(len_u64(&summary.died));
        self.terminated = self.terminated.saturating_add(len_u64(&summary.terminated));
        self.spawned = self.spawned.saturating_add(len_u64(&summary.spawned));

        debug!(
            tick = summary.tick,
            processed = summary.processed,
            acted = summary.acted,
            "Tick"
        );

        if self.every > 0 && summary.tick.checked_rem(self.every) == Some(0) {
            info!(
                tick = summary.tick,
                workers = memory.len(),
                spawned_total = self.spawned,
                died_total = self.died,
                terminated_total = self.terminated,
                "Colony report"
            );
        }
    }
}
