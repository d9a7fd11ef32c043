// driver.rs
// Stopped/Running animation state machine with at most one pending frame

/// Handle for a scheduled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRequest(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    Running,
}

/// A frame is only scheduled while running, and the next one only after the
/// current one finished. Stopping or teardown drops whatever is pending.
#[derive(Debug)]
pub struct AnimationDriver {
    state: DriverState,
    pending: Option<FrameRequest>,
    next_id: u64,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self {
            state: DriverState::Stopped,
            pending: None,
            next_id: 0,
        }
    }
}

impl AnimationDriver {
    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Stopped -> Running. Returns the first frame request, or `None` if already running.
    pub fn start(&mut self) -> Option<FrameRequest> {
        if self.is_running() {
            return None;
        }
        self.state = DriverState::Running;
        Some(self.schedule())
    }

    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
        if let Some(req) = self.pending.take() {
            log::trace!("Cancelled frame {}", req.0);
        }
    }

    /// Claim the pending frame for execution.
    pub fn begin_frame(&mut self) -> Option<FrameRequest> {
        if !self.is_running() {
            return None;
        }
        self.pending.take()
    }

    /// Current frame done; queue the next one if still running.
    pub fn end_frame(&mut self) -> Option<FrameRequest> {
        if self.is_running() && self.pending.is_none() {
            Some(self.schedule())
        } else {
            None
        }
    }

    pub fn teardown(&mut self) {
        self.stop();
    }

    fn schedule(&mut self) -> FrameRequest {
        let req = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending = Some(req);
        req
    }
}
