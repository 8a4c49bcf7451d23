//! Activity trail
//!
//! Append-only record of everything the user did during a session. Entries
//! are chained with SHA-256 so a copied or exported trail can be checked for
//! tampering; the chain restarts when the trail is cleared on reset.

use crate::error::LogIntegrityError;
use crate::types::{EntryId, Step};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One recorded action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: EntryId,
    /// Position in the trail, starting at 0
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    /// Event category, e.g. "File upload"
    pub action: String,
    /// Outcome description
    pub details: String,
    /// Step the session was on when the entry was written
    pub step: Step,
    pub prev_hash: [u8; 32],
    pub hash: [u8; 32],
}

impl ActivityEntry {
    /// 24-hour `HH:MM:SS` label used by the console view
    #[must_use]
    pub fn clock_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    #[must_use]
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Case-insensitive match on the action label
    #[must_use]
    pub fn action_mentions(&self, needle: &str) -> bool {
        self.action.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current time.
    pub fn append(
        &mut self,
        step: Step,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> &ActivityEntry {
        self.append_at(Utc::now(), step, action, details)
    }

    /// Append an entry with an explicit timestamp.
    pub fn append_at(
        &mut self,
        timestamp: DateTime<Utc>,
        step: Step,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> &ActivityEntry {
        let prev_hash = self.head_hash();
        let mut entry = ActivityEntry {
            id: EntryId::new(),
            seq: self.entries.len() as u64,
            timestamp,
            action: action.into(),
            details: details.into(),
            step,
            prev_hash,
            hash: [0u8; 32],
        };
        entry.hash = compute_hash(&entry);
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.last()
    }

    /// Hash of the newest entry, zeroes for an empty trail
    #[must_use]
    pub fn head_hash(&self) -> [u8; 32] {
        self.entries.last().map(|e| e.hash).unwrap_or([0u8; 32])
    }

    /// Drop every entry. Only a workflow reset does this.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn verify_integrity(&self) -> Result<(), LogIntegrityError> {
        verify_entries(&self.entries)
    }
}

/// Check sequence numbers and the hash chain of an exported trail.
pub fn verify_entries(entries: &[ActivityEntry]) -> Result<(), LogIntegrityError> {
    let mut prev = [0u8; 32];
    for (expected, e) in (0u64..).zip(entries) {
        if e.seq != expected {
            return Err(LogIntegrityError::SequenceGap {
                expected,
                found: e.seq,
            });
        }
        if e.prev_hash != prev {
            return Err(LogIntegrityError::BrokenChain { seq: e.seq });
        }
        if e.hash != compute_hash(e) {
            return Err(LogIntegrityError::HashMismatch { seq: e.seq });
        }
        prev = e.hash;
    }
    Ok(())
}

fn compute_hash(entry: &ActivityEntry) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(entry.id.0.as_bytes());
    hasher.update(entry.seq.to_le_bytes());
    hasher.update(entry.timestamp.timestamp().to_le_bytes());
    hasher.update(entry.timestamp.timestamp_subsec_nanos().to_le_bytes());
    hasher.update([entry.step.number()]);
    hasher.update(entry.action.as_bytes());
    hasher.update([0]);
    hasher.update(entry.details.as_bytes());
    hasher.update([0]);
    hasher.update(entry.prev_hash);
    hasher.finalize().into()
}
