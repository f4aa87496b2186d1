/// Coalescing frame requester.
///
/// The host asks [`settle`](RedrawScheduler::settle) after every mutation and
/// every render. At most one frame is outstanding; once every reel is at rest
/// no further frame is requested until the next update.
#[derive(Clone, Debug, Default)]
pub struct RedrawScheduler {
    pending: bool,
    requested: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the host must request a new frame.
    pub fn settle(&mut self, max_remaining: f64) -> bool {
        if max_remaining > 0.0 {
            self.request()
        } else {
            false
        }
    }

    /// Request one frame even though no reel is moving (resize, new atlas).
    pub fn invalidate(&mut self) -> bool {
        self.request()
    }

    /// Called at the top of a render; later mutations may request again.
    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Host frames requested over the scheduler's lifetime.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.requested += 1;
        true
    }
}
