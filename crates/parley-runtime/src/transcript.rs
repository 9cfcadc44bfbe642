//! The transcript the UI renders

use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::warn;

use parley_core::Role;

/// At most one applied delta per item inside this window; excess deltas are
/// dropped, not queued.
pub const DELTA_MIN_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    InProgress,
    Done,
}

#[derive(Debug, Clone)]
pub struct TranscriptItem {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub status: ItemStatus,
    last_delta_at: Option<Instant>,
}

pub struct Transcript {
    items: RwLock<Vec<TranscriptItem>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Insert a new item. Duplicate ids are rejected and the original kept.
    pub fn add_item(&self, id: impl Into<String>, role: Role, text: impl Into<String>) -> bool {
        let id = id.into();
        let mut items = self.items.write();

        if items.iter().any(|item| item.id == id) {
            warn!(item_id = %id, "duplicate transcript item rejected");
            return false;
        }

        items.push(TranscriptItem {
            id,
            role,
            text: text.into(),
            status: ItemStatus::InProgress,
            last_delta_at: None,
        });
        true
    }

    /// Replace or append text. Delta updates are rate-limited per item.
    pub fn update_item(&self, id: &str, text: &str, is_delta: bool) -> bool {
        let mut items = self.items.write();
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            warn!(item_id = %id, "update for unknown transcript item");
            return false;
        };

        if is_delta {
            if let Some(last) = item.last_delta_at {
                if last.elapsed() < DELTA_MIN_INTERVAL {
                    return false;
                }
            }
            item.text.push_str(text);
            item.last_delta_at = Some(Instant::now());
        } else {
            item.text = text.to_string();
        }
        true
    }

    pub fn update_status(&self, id: &str, status: ItemStatus) -> bool {
        let mut items = self.items.write();
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            warn!(item_id = %id, "status update for unknown transcript item");
            return false;
        };
        item.status = status;
        true
    }

    pub fn items(&self) -> Vec<TranscriptItem> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_list() {
        let transcript = Transcript::new();
        assert!(transcript.add_item("a", Role::User, "hello"));
        assert!(transcript.add_item("b", Role::Assistant, ""));

        let items = transcript.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "hello");
        assert_eq!(items[0].status, ItemStatus::InProgress);
    }

    #[test]
    fn test_duplicate_id_rejected_original_kept() {
        let transcript = Transcript::new();
        assert!(transcript.add_item("a", Role::User, "first"));
        assert!(!transcript.add_item("a", Role::User, "second"));

        let items = transcript.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "first");
    }

    #[test]
    fn test_full_update_replaces_text() {
        let transcript = Transcript::new();
        transcript.add_item("a", Role::Assistant, "draft");
        assert!(transcript.update_item("a", "final", false));
        assert_eq!(transcript.items()[0].text, "final");
    }

    #[test]
    fn test_delta_appends() {
        let transcript = Transcript::new();
        transcript.add_item("a", Role::Assistant, "");
        assert!(transcript.update_item("a", "hel", true));
        std::thread::sleep(DELTA_MIN_INTERVAL + Duration::from_millis(10));
        assert!(transcript.update_item("a", "lo", true));
        assert_eq!(transcript.items()[0].text, "hello");
    }

    #[test]
    fn test_delta_rate_limited_per_item() {
        let transcript = Transcript::new();
        transcript.add_item("a", Role::Assistant, "");
        transcript.add_item("b", Role::Assistant, "");

        assert!(transcript.update_item("a", "x", true));
        // Second delta inside the window is dropped.
        assert!(!transcript.update_item("a", "y", true));
        assert_eq!(transcript.items()[0].text, "x");

        // The limit is per item: another item is unaffected.
        assert!(transcript.update_item("b", "z", true));
    }

    #[test]
    fn test_full_update_bypasses_rate_limit() {
        let transcript = Transcript::new();
        transcript.add_item("a", Role::Assistant, "");
        assert!(transcript.update_item("a", "x", true));
        assert!(transcript.update_item("a", "replaced", false));
        assert_eq!(transcript.items()[0].text, "replaced");
    }

    #[test]
    fn test_unknown_item_updates_rejected() {
        let transcript = Transcript::new();
        assert!(!transcript.update_item("missing", "x", false));
        assert!(!transcript.update_status("missing", ItemStatus::Done));
    }

    #[test]
    fn test_status_transition() {
        let transcript = Transcript::new();
        transcript.add_item("a", Role::Assistant, "done text");
        assert!(transcript.update_status("a", ItemStatus::Done));
        assert_eq!(transcript.items()[0].status, ItemStatus::Done);
    }
}
