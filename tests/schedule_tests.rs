// Host-side tests for click scheduling and the audio session lifecycle.
// A recording sink stands in for WebAudio.

use flapboard_core::*;

const EPS: f64 = 1e-9;

#[derive(Default)]
struct RecordingSink {
    now: f64,
    next_id: usize,
    scheduled: Vec<(usize, f64, f64)>,
    stopped: Vec<usize>,
    refuse: bool,
}

impl AudioSink for RecordingSink {
    type Clip = &'static str;
    type Track = usize;

    fn current_time(&self) -> f64 {
        self.now
    }

    fn schedule_one_shot(&mut self, _clip: &&'static str, start: f64, rate: f64) -> Option<usize> {
        if self.refuse {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.scheduled.push((id, start, rate));
        Some(id)
    }

    fn stop_all(&mut self, tracks: Vec<usize>) {
        self.stopped.extend(tracks);
    }
}

fn sample_histogram() -> Vec<u32> {
    let mut hist = vec![0u32; 100];
    hist[..5].copy_from_slice(&[4, 4, 3, 3, 3]);
    hist
}

fn ready_session(now: f64) -> AudioSession<RecordingSink> {
    let mut session = AudioSession::new(Compression::Log2Round);
    session.attach(RecordingSink {
        now,
        ..Default::default()
    });
    session.load_clip("click", 0.1);
    session
}

#[test]
fn compression_curves() {
    assert_eq!(Compression::Log2Round.track_count(0), 0);
    assert_eq!(Compression::Log2Round.track_count(1), 1);
    assert_eq!(Compression::Log2Round.track_count(3), 2);
    assert_eq!(Compression::Log2Round.track_count(4), 2);
    assert_eq!(Compression::Log2Round.track_count(5), 3);
    assert_eq!(Compression::Log10Ceil.track_count(0), 0);
    assert_eq!(Compression::Log10Ceil.track_count(4), 1);
    assert_eq!(Compression::Log10Ceil.track_count(50), 2);
    assert_eq!(Compression::default(), Compression::Log2Round);
}

#[test]
fn triggers_sit_at_step_midpoints() {
    let plan = schedule(&sample_histogram(), 10.0, 2.0, 0.1, Compression::Log2Round);
    assert_eq!(plan.len(), 10);
    let expected = [2.05, 2.15, 2.25, 2.35, 2.45];
    for (step, &at) in expected.iter().enumerate() {
        let hits: Vec<_> = plan.iter().filter(|t| t.step == step).collect();
        assert_eq!(hits.len(), 2, "step {step}");
        for t in hits {
            assert!((t.start_time - at).abs() < EPS);
            assert!((t.playback_rate - 1.0).abs() < EPS);
        }
    }
    assert!(plan.iter().all(|t| t.step < 5));
}

#[test]
fn log10_plan_is_sparser() {
    let plan = schedule(&sample_histogram(), 10.0, 0.0, 0.1, Compression::Log10Ceil);
    assert_eq!(plan.len(), 5);
}

#[test]
fn invalid_speed_schedules_nothing() {
    let hist = sample_histogram();
    assert!(schedule(&hist, 0.0, 0.0, 0.1, Compression::Log2Round).is_empty());
    assert!(schedule(&hist, f64::NAN, 0.0, 0.1, Compression::Log2Round).is_empty());
}

#[test]
fn unavailable_session_is_silent() {
    let mut session: AudioSession<RecordingSink> = AudioSession::new(Compression::Log2Round);
    assert!(!session.is_available());
    assert_eq!(session.retrigger(&sample_histogram(), 10.0), 0);

    session.attach(RecordingSink::default());
    assert!(!session.is_available());
    assert_eq!(session.retrigger(&sample_histogram(), 10.0), 0);
    assert!(session.sink().map_or(false, |s| s.scheduled.is_empty()));
}

#[test]
fn retrigger_schedules_against_the_audio_clock() {
    let mut session = ready_session(3.0);
    assert_eq!(session.retrigger(&sample_histogram(), 10.0), 10);
    assert_eq!(session.live_tracks(), 10);
    let sink = session.sink().expect("sink attached");
    assert!((sink.scheduled[0].1 - 3.05).abs() < EPS);
}

#[test]
fn retrigger_stops_the_previous_batch() {
    let mut session = ready_session(0.0);
    session.retrigger(&sample_histogram(), 10.0);
    session.retrigger(&sample_histogram(), 10.0);
    let sink = session.sink().expect("sink attached");
    assert_eq!(sink.stopped, (0..10).collect::<Vec<_>>());
    assert_eq!(sink.scheduled.len(), 20);
    assert_eq!(session.live_tracks(), 10);
}

#[test]
fn identity_update_silences_everything() {
    let mut session = ready_session(0.0);
    session.retrigger(&sample_histogram(), 10.0);
    assert_eq!(session.retrigger(&[0; 100], 10.0), 0);
    assert_eq!(session.live_tracks(), 0);
    assert_eq!(session.sink().map(|s| s.stopped.len()), Some(10));
}

#[test]
fn mute_stops_and_blocks_new_batches() {
    let mut session = ready_session(0.0);
    session.retrigger(&sample_histogram(), 10.0);
    session.set_muted(true);
    assert!(session.is_muted());
    assert_eq!(session.live_tracks(), 0);
    assert_eq!(session.retrigger(&sample_histogram(), 10.0), 0);

    session.set_muted(false);
    assert_eq!(session.retrigger(&sample_histogram(), 10.0), 10);
}

#[test]
fn refused_sources_are_not_tracked() {
    let mut session = ready_session(0.0);
    if let Some(sink) = session.sink_mut() {
        sink.refuse = true;
    }
    assert_eq!(session.retrigger(&sample_histogram(), 10.0), 0);
    assert_eq!(session.live_tracks(), 0);
}

#[test]
fn teardown_returns_the_stopped_sink() {
    let mut session = ready_session(0.0);
    session.retrigger(&sample_histogram(), 10.0);
    let sink = session.teardown().expect("sink attached");
    assert_eq!(sink.stopped.len(), 10);
}

#[test]
fn failed_clip_load_can_be_retried() {
    let mut session: AudioSession<RecordingSink> = AudioSession::new(Compression::Log2Round);
    assert!(!session.needs_clip());
    session.attach(RecordingSink::default());
    assert!(session.needs_clip());
    assert_eq!(session.retrigger(&sample_histogram(), 10.0), 0);

    // a later gesture loads the clip into the same session
    session.load_clip("click", 0.1);
    assert!(!session.needs_clip());
    assert!(session.is_available());
    assert_eq!(session.retrigger(&sample_histogram(), 10.0), 10);
}
