//! Bounded ring of store snapshots.
//!
//! Every settled burst of edits appends one snapshot (see the debouncer);
//! the ring keeps the newest ten, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Lead;

/// Maximum snapshots retained; the oldest is evicted past the cap.
pub const MAX_BACKUPS: usize = 10;

/// One full copy of the collection at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub timestamp: DateTime<Utc>,
    pub lead_count: usize,
    pub data: Vec<Lead>,
}

impl BackupSnapshot {
    pub fn capture(leads: &[Lead]) -> Self {
        Self {
            timestamp: Utc::now(),
            lead_count: leads.len(),
            data: leads.to_vec(),
        }
    }
}

/// Insert a snapshot at the front and trim the ring to [`MAX_BACKUPS`].
pub fn push_snapshot(ring: &mut Vec<BackupSnapshot>, snapshot: BackupSnapshot) {
    ring.insert(0, snapshot);
    ring.truncate(MAX_BACKUPS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_is_newest_first_and_capped() {
        let mut ring = Vec::new();
        for i in 0..12 {
            let mut snapshot = BackupSnapshot::capture(&[]);
            snapshot.lead_count = i;
            push_snapshot(&mut ring, snapshot);
        }

        assert_eq!(ring.len(), MAX_BACKUPS);
        assert_eq!(ring[0].lead_count, 11);
        assert_eq!(ring[MAX_BACKUPS - 1].lead_count, 2);
    }

    #[test]
    fn test_snapshot_captures_collection() {
        use crate::models::{ClientType, Lead};
        let lead = Lead::new(
            "Test".to_string(),
            "555-0100".to_string(),
            ClientType::Center,
            "Website".to_string(),
        );
        let snapshot = BackupSnapshot::capture(std::slice::from_ref(&lead));
        assert_eq!(snapshot.lead_count, 1);
        assert_eq!(snapshot.data, vec![lead]);
    }

    #[test]
    fn test_snapshot_serializes_with_legacy_field_names() {
        let snapshot = BackupSnapshot::capture(&[]);
        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("leadCount").is_some());
        assert!(value.get("timestamp").is_some());
        assert!(value.get("data").is_some());
    }
}
