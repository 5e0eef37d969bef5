//! The persisted per-worker memory record.
//!
//! [`WorkerMemory`] survives across ticks and is the only state the engine
//! keeps between them. It is serialized with camel-case keys so it stays
//! readable by the game-side scripts, and every field is optional on the
//! wire: a record written by an older version (or an empty `{}`) reads as
//! the first-tick defaults.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{RegionId, TargetId};

/// Per-worker memory persisted between ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerMemory {
    /// `true` while the worker should be acquiring resources. Flips to
    /// `false` once full, back to `true` once empty.
    pub needs_resource: bool,

    /// In-progress gather target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_resource_target_id: Option<TargetId>,

    /// In-progress construction target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_build_target_id: Option<TargetId>,

    /// In-progress deposit target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_deposit_target_id: Option<TargetId>,

    /// Region the worker was created in; resolves its home controller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_region_id: Option<RegionId>,

    /// Consecutive ticks of failed movement toward the current target.
    pub blocked_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_reads_as_defaults() {
        let memory: Result<WorkerMemory, _> = serde_json::from_str("{}");
        assert_eq!(memory.ok(), Some(WorkerMemory::default()));
    }

    #[test]
    fn unknown_and_partial_fields_are_tolerated() {
        let json = r#"{"needsResource": true, "legacyField": 3}"#;
        let memory: WorkerMemory = serde_json::from_str(json).unwrap_or_default();
        assert!(memory.needs_resource);
        assert_eq!(memory.blocked_count, 0);
        assert!(memory.current_resource_target_id.is_none());
    }

    #[test]
    fn keys_are_camel_case() {
        let memory = WorkerMemory {
            current_build_target_id: Some(TargetId::new()),
            blocked_count: 2,
            ..WorkerMemory::default()
        };
        let json = serde_json::to_string(&memory).unwrap_or_default();
        assert!(json.contains("\"currentBuildTargetId\""));
        assert!(json.contains("\"blockedCount\":2"));
        assert!(!json.contains("currentResourceTargetId"));
    }
}
