//! Tunable thresholds for worker behavior.
//!
//! The engine builds a [`BehaviorSettings`] from the `behavior` section of
//! `hive-config.yaml` and passes it into every decision call.

/// Thresholds applied by the selector and the travel adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorSettings {
    /// Consecutive no-path results before a target is abandoned (default: 5).
    pub blocked_threshold: u32,

    /// A container or storage is only a gather candidate while it holds
    /// more than this much energy (default: 100).
    pub container_min_energy: u32,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            blocked_threshold: 5,
            container_min_energy: 100,
        }
    }
}
