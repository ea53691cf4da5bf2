//! Upload-generation tracking.
//!
//! Image decode and texture upload are asynchronous from the viewer's point
//! of view: the user can start a new upload while a previous one is still
//! in flight. When the older result eventually arrives it must be discarded
//! rather than raced against the newer one, otherwise a stale completion
//! handler would overwrite newer state. Comparing references is not enough;
//! the guard is an explicit identity token.
//!
//! [`UploadTracker`] hands out monotonically increasing [`UploadId`]s.
//! Starting a new upload invalidates every earlier id, and a completion
//! handler checks [`UploadTracker::is_current`] before touching shared
//! state.

/// Identity token for one upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadId(u64);

/// Tracks which upload generation is current.
#[derive(Debug, Default)]
pub struct UploadTracker {
    generation: u64,
}

impl UploadTracker {
    /// Create a tracker with no uploads started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new upload, invalidating all previously issued ids.
    pub fn begin(&mut self) -> UploadId {
        self.generation += 1;
        log::debug!("upload generation {}", self.generation);
        UploadId(self.generation)
    }

    /// Whether the given id belongs to the most recent upload.
    ///
    /// A completion handler whose id is stale must drop its result.
    pub fn is_current(&self, id: UploadId) -> bool {
        id.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_upload_is_current() {
        let mut tracker = UploadTracker::new();
        let id = tracker.begin();
        assert!(tracker.is_current(id));
    }

    #[test]
    fn test_newer_upload_invalidates_older() {
        let mut tracker = UploadTracker::new();
        let a = tracker.begin();
        let b = tracker.begin();

        assert!(!tracker.is_current(a));
        assert!(tracker.is_current(b));
    }

    #[test]
    fn test_out_of_order_completion_is_discarded() {
        // Upload A starts, then B; B's decode finishes first and is
        // applied; A's late completion must be dropped, not applied.
        let mut tracker = UploadTracker::new();
        let a = tracker.begin();
        let b = tracker.begin();

        let mut displayed: Option<&str> = None;

        // B completes first and wins
        if tracker.is_current(b) {
            displayed = Some("image B");
        }
        // A's stale completion arrives afterwards
        if tracker.is_current(a) {
            displayed = Some("image A");
        }

        assert_eq!(displayed, Some("image B"));
    }

    #[test]
    fn test_ids_are_distinct_across_generations() {
        let mut tracker = UploadTracker::new();
        let a = tracker.begin();
        let b = tracker.begin();
        assert_ne!(a, b);
    }
}
