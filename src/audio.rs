//! Fire-and-forget audio contract
//!
//! The engine emits named events; the host decides what (if anything) they
//! sound like. Sinks must swallow their own failures - a broken audio
//! backend never affects gameplay.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Player fired a bullet or laser
    Shoot,
    /// Rocket launched
    Rocket,
    /// Smart rocket locked on and launched
    Homing,
    /// Enemy destroyed
    Explosion,
    /// Shield raised
    Shield,
    /// Power-up collected
    Powerup,
    /// Player took damage
    Hit,
    /// Run ended
    GameOver,
    /// Wave requirement met
    WaveClear,
}

/// Audio output capability
pub trait AudioSink {
    fn play(&mut self, event: AudioEvent);
}

/// Sink that discards every event (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _event: AudioEvent) {}
}
