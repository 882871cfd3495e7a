//! Audio cue interface
//!
//! Sample decoding, mixing and spatialization belong to the host. The mode
//! only requests cues through [`CueSink`] and never waits on them.

use glam::{Vec2, Vec3};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Warning played at the telegraphed position
    Alarm,
    /// Camera caught by a detonation
    Hit,
    /// Music loop for the whole mode
    Background,
}

/// Handle to a playing cue, for cues the mode keeps around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CueHandle(pub u32);

/// Receiver of cue requests. Implementations must return immediately.
pub trait CueSink {
    /// 3D cue heard from `position`, fading out by `falloff_radius`
    fn play_positioned(
        &mut self,
        cue: AudioCue,
        volume: f32,
        position: Vec3,
        falloff_radius: f32,
    ) -> CueHandle;

    /// Non-positioned one-shot; `pan` in [-1, 1]
    fn play_ambient(&mut self, cue: AudioCue, volume: f32, pan: f32) -> CueHandle;

    /// Non-positioned cue that repeats until the sink drops it
    fn loop_ambient(&mut self, cue: AudioCue, volume: f32, pan: f32) -> CueHandle;

    /// Move the listener (ears at `position`, facing so that `right` is +x)
    fn set_listener(&mut self, position: Vec3, right: Vec2);
}

/// Sink that discards everything
#[derive(Debug, Default)]
pub struct NullSink {
    next: u32,
}

impl NullSink {
    pub fn new() -> Self {
        log::warn!("No audio output - cues will be discarded");
        Self::default()
    }

    fn handle(&mut self) -> CueHandle {
        self.next = self.next.wrapping_add(1);
        CueHandle(self.next)
    }
}

impl CueSink for NullSink {
    fn play_positioned(&mut self, _: AudioCue, _: f32, _: Vec3, _: f32) -> CueHandle {
        self.handle()
    }

    fn play_ambient(&mut self, _: AudioCue, _: f32, _: f32) -> CueHandle {
        self.handle()
    }

    fn loop_ambient(&mut self, _: AudioCue, _: f32, _: f32) -> CueHandle {
        self.handle()
    }

    fn set_listener(&mut self, _: Vec3, _: Vec2) {}
}

/// A request captured by [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueRequest {
    Positioned {
        cue: AudioCue,
        volume: f32,
        position: Vec3,
        falloff_radius: f32,
    },
    Ambient {
        cue: AudioCue,
        volume: f32,
        pan: f32,
    },
    Loop {
        cue: AudioCue,
        volume: f32,
        pan: f32,
    },
}

impl CueRequest {
    pub fn cue(&self) -> AudioCue {
        match *self {
            CueRequest::Positioned { cue, .. }
            | CueRequest::Ambient { cue, .. }
            | CueRequest::Loop { cue, .. } => cue,
        }
    }
}

/// Sink that records every request in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub requests: Vec<CueRequest>,
    /// Last listener update
    pub listener: Option<(Vec3, Vec2)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `cue` was requested
    pub fn count(&self, cue: AudioCue) -> usize {
        self.requests.iter().filter(|r| r.cue() == cue).count()
    }

    fn push(&mut self, request: CueRequest) -> CueHandle {
        self.requests.push(request);
        CueHandle(self.requests.len() as u32)
    }
}

impl CueSink for RecordingSink {
    fn play_positioned(
        &mut self,
        cue: AudioCue,
        volume: f32,
        position: Vec3,
        falloff_radius: f32,
    ) -> CueHandle {
        self.push(CueRequest::Positioned {
            cue,
            volume,
            position,
            falloff_radius,
        })
    }

    fn play_ambient(&mut self, cue: AudioCue, volume: f32, pan: f32) -> CueHandle {
        self.push(CueRequest::Ambient { cue, volume, pan })
    }

    fn loop_ambient(&mut self, cue: AudioCue, volume: f32, pan: f32) -> CueHandle {
        self.push(CueRequest::Loop { cue, volume, pan })
    }

    fn set_listener(&mut self, position: Vec3, right: Vec2) {
        self.listener = Some((position, right));
    }
}
