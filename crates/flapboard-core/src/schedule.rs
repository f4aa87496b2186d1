//! Turning a step histogram into timed click triggers.
//!
//! Each histogram step becomes a small number of overlapping one-shots at the
//! moment the reels cross that step. The raw cell count is compressed through
//! a log curve so a full board changing at once stays a dense rattle rather
//! than hundreds of stacked samples.

/// Curve mapping concurrent cells to simultaneous tracks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Compression {
    /// `round(log2(d + 1))`
    #[default]
    Log2Round,
    /// `ceil(log10(d + 1))`
    Log10Ceil,
}

impl Compression {
    pub fn track_count(self, cells: u32) -> u32 {
        let x = cells as f64 + 1.0;
        let tracks = match self {
            Compression::Log2Round => x.log2().round(),
            Compression::Log10Ceil => x.log10().ceil(),
        };
        tracks.max(0.0) as u32
    }
}

/// One planned one-shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trigger {
    /// Histogram step this click belongs to.
    pub step: usize,
    /// Audio-clock time to start playback.
    pub start_time: f64,
    /// Rate that squeezes one clip into one step (`clip_duration * speed`).
    pub playback_rate: f64,
}

/// Plan the triggers for a histogram taken at audio time `current_time`.
///
/// Step `i` is centred at `current_time + (i + 0.5) / speed`.
pub fn schedule(
    histogram: &[u32],
    speed: f64,
    current_time: f64,
    clip_duration: f64,
    compression: Compression,
) -> Vec<Trigger> {
    if !(speed > 0.0) || !speed.is_finite() {
        return Vec::new();
    }
    let playback_rate = clip_duration * speed;
    let mut out = Vec::new();
    for (step, &cells) in histogram.iter().enumerate() {
        let start_time = current_time + (step as f64 + 0.5) / speed;
        for _ in 0..compression.track_count(cells) {
            out.push(Trigger {
                step,
                start_time,
                playback_rate,
            });
        }
    }
    out
}

/// What the scheduler needs from an audio backend.
pub trait AudioSink {
    /// Decoded sample shared by every trigger.
    type Clip;
    /// Handle to a scheduled one-shot, kept so it can be stopped.
    type Track;

    fn current_time(&self) -> f64;

    /// Start `clip` at `start_time` through the shared compressor. `None` when
    /// the backend could not create the source.
    fn schedule_one_shot(
        &mut self,
        clip: &Self::Clip,
        start_time: f64,
        playback_rate: f64,
    ) -> Option<Self::Track>;

    fn stop_all(&mut self, tracks: Vec<Self::Track>);
}

/// Owns the audio backend, the click clip and the tracks of the latest batch.
///
/// A session starts unavailable; updates arriving before [`attach`] and
/// [`load_clip`] produce no sound and are otherwise unaffected.
///
/// [`attach`]: AudioSession::attach
/// [`load_clip`]: AudioSession::load_clip
pub struct AudioSession<S: AudioSink> {
    sink: Option<S>,
    clip: Option<(S::Clip, f64)>,
    compression: Compression,
    tracks: Vec<S::Track>,
    muted: bool,
}

impl<S: AudioSink> AudioSession<S> {
    pub fn new(compression: Compression) -> Self {
        Self {
            sink: None,
            clip: None,
            compression,
            tracks: Vec::new(),
            muted: false,
        }
    }

    pub fn attach(&mut self, sink: S) {
        self.stop();
        self.sink = Some(sink);
    }

    /// Install the decoded click; `duration` is its length in seconds.
    pub fn load_clip(&mut self, clip: S::Clip, duration: f64) {
        self.clip = Some((clip, duration));
    }

    pub fn is_available(&self) -> bool {
        self.sink.is_some() && self.clip.is_some()
    }

    /// A backend is attached but no clip has loaded yet (or the load failed).
    pub fn needs_clip(&self) -> bool {
        self.sink.is_some() && self.clip.is_none()
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    pub fn sink_mut(&mut self) -> Option<&mut S> {
        self.sink.as_mut()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Tracks scheduled by the most recent batch that have not been stopped.
    pub fn live_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Stop the previous batch and schedule clicks for `histogram`.
    /// Returns the number of tracks now scheduled.
    pub fn retrigger(&mut self, histogram: &[u32], speed: f64) -> usize {
        self.stop();
        if self.muted {
            return 0;
        }
        let (Some(sink), Some((clip, duration))) = (self.sink.as_mut(), self.clip.as_ref()) else {
            log::debug!("[audio] session unavailable; skipping click schedule");
            return 0;
        };
        let plan = schedule(
            histogram,
            speed,
            sink.current_time(),
            *duration,
            self.compression,
        );
        for t in &plan {
            if let Some(track) = sink.schedule_one_shot(clip, t.start_time, t.playback_rate) {
                self.tracks.push(track);
            }
        }
        log::debug!(
            "[audio] scheduled {} of {} clicks",
            self.tracks.len(),
            plan.len()
        );
        self.tracks.len()
    }

    /// Stop every track of the current batch.
    pub fn stop(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        let tracks = std::mem::take(&mut self.tracks);
        match self.sink.as_mut() {
            Some(sink) => sink.stop_all(tracks),
            None => drop(tracks),
        }
    }

    /// Stop everything and hand back the backend.
    pub fn teardown(mut self) -> Option<S> {
        self.stop();
        self.clip = None;
        self.sink.take()
    }
}
