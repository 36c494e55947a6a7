//! Frame scheduling for animated widgets
//!
//! Mirrors the browser's request/cancel animation-frame contract: a widget
//! requests one callback for the next display refresh, receives a handle,
//! and either re-requests after running or cancels on teardown. Only the
//! most recent outstanding handle is honoured.

/// Handle for one requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

/// Single-slot frame request tracker
#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a callback for the next frame, replacing any pending request.
    pub fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    /// Invalidate the pending request, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consume `handle` if it is the pending request.
    ///
    /// Returns false for stale or cancelled handles; the callback must not run.
    pub fn fire(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_consumes_pending() {
        let mut frames = FrameLoop::new();
        let h = frames.request();
        assert!(frames.is_pending());
        assert!(frames.fire(h));
        assert!(!frames.is_pending());
        // Same handle cannot fire twice
        assert!(!frames.fire(h));
    }

    #[test]
    fn test_cancel_invalidates_handle() {
        let mut frames = FrameLoop::new();
        let h = frames.request();
        frames.cancel();
        assert!(!frames.fire(h));
    }

    #[test]
    fn test_rerequest_makes_old_handle_stale() {
        let mut frames = FrameLoop::new();
        let old = frames.request();
        let new = frames.request();
        assert_ne!(old, new);
        assert!(!frames.fire(old));
        assert!(frames.fire(new));
    }
}
