//! Redraw-request policy.
//!
//! The viewer has no idle render loop: a frame is drawn only after a
//! mutation that can change pixel output. [`RedrawPolicy`] records whether
//! such a mutation happened since the last animation tick and coalesces any
//! number of them into a single redraw request. There is no explicit cancel
//! operation; a pending request is simply consumed by the next tick.

/// A state change that can affect rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The pyramid's rotation changed.
    RotationChanged,
    /// The mesh (and its texture) was replaced by a new upload.
    MeshReplaced,
    /// The viewport was resized.
    ViewportResized,
}

/// Decides when a frame must be redrawn.
#[derive(Debug, Default)]
pub struct RedrawPolicy {
    pending: bool,
}

impl RedrawPolicy {
    /// Create a policy with no redraw pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mutation. Every mutation kind requires a redraw.
    pub fn on_mutation(&mut self, mutation: Mutation) {
        log::trace!("mutation: {mutation:?}");
        self.pending = true;
    }

    /// Consume the pending request, if any.
    ///
    /// Called once per animation tick; returns `true` at most once per
    /// batch of mutations, which is what coalesces redundant redraws.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a redraw is currently due (without consuming the request).
    pub fn redraw_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mutation_kind_requires_redraw() {
        for mutation in [
            Mutation::RotationChanged,
            Mutation::MeshReplaced,
            Mutation::ViewportResized,
        ] {
            let mut policy = RedrawPolicy::new();
            policy.on_mutation(mutation);
            assert!(policy.take_redraw(), "{mutation:?} should trigger a redraw");
        }
    }

    #[test]
    fn test_no_idle_redraw() {
        let mut policy = RedrawPolicy::new();
        assert!(!policy.redraw_pending());
        assert!(!policy.take_redraw());
    }

    #[test]
    fn test_mutations_coalesce_into_one_redraw() {
        let mut policy = RedrawPolicy::new();
        policy.on_mutation(Mutation::RotationChanged);
        policy.on_mutation(Mutation::RotationChanged);
        policy.on_mutation(Mutation::MeshReplaced);

        assert!(policy.take_redraw());
        // The batch is satisfied by one tick
        assert!(!policy.take_redraw());
    }

    #[test]
    fn test_mutation_after_tick_schedules_again() {
        let mut policy = RedrawPolicy::new();
        policy.on_mutation(Mutation::ViewportResized);
        assert!(policy.take_redraw());

        policy.on_mutation(Mutation::RotationChanged);
        assert!(policy.take_redraw());
    }
}
