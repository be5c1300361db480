//! Restartable alpha fade.

use handray_core::math::saturate;

#[derive(Debug, Clone, Copy, PartialEq)]
struct FadeTrack {
    from: f32,
    to: f32,
    elapsed: f32,
}

/// Alpha animated toward a target over a fixed duration.
///
/// Starting a new fade replaces the one in flight: it begins from whatever
/// alpha is showing right now and runs its full duration.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaFader {
    alpha: f32,
    duration: f32,
    track: Option<FadeTrack>,
}

impl AlphaFader {
    /// Fully visible fader with the given fade duration in seconds.
    pub fn new(duration: f32) -> Self {
        Self {
            alpha: 1.0,
            duration: duration.max(0.0),
            track: None,
        }
    }

    /// Current alpha.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Whether a fade is in flight.
    pub fn is_fading(&self) -> bool {
        self.track.is_some()
    }

    /// Alpha the current fade is heading to, if any.
    pub fn target(&self) -> Option<f32> {
        self.track.map(|track| track.to)
    }

    /// Start fading toward `target`, superseding any fade in flight.
    pub fn fade_to(&mut self, target: f32) {
        self.track = Some(FadeTrack {
            from: self.alpha,
            to: target,
            elapsed: 0.0,
        });
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let Some(track) = self.track.as_mut() else {
            return;
        };
        track.elapsed += dt;
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            saturate(track.elapsed / self.duration)
        };
        if t >= 1.0 {
            self.alpha = track.to;
            self.track = None;
        } else {
            self.alpha = track.from + (track.to - track.from) * t;
        }
    }
}
