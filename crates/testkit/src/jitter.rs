//! Seeded tracking noise.

use glam::Vec3;
use handray_input::FrameInput;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform per-axis noise added to tracked positions, reproducible by seed.
pub struct TrackingJitter {
    rng: StdRng,
    amplitude: f32,
}

impl TrackingJitter {
    /// Noise of at most `amplitude` metres per axis.
    pub fn new(seed: u64, amplitude: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            amplitude: amplitude.abs(),
        }
    }

    /// Largest offset per axis.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Random offset inside the amplitude cube.
    pub fn offset(&mut self) -> Vec3 {
        if self.amplitude == 0.0 {
            return Vec3::ZERO;
        }
        let a = self.amplitude;
        Vec3::new(
            self.rng.gen_range(-a..=a),
            self.rng.gen_range(-a..=a),
            self.rng.gen_range(-a..=a),
        )
    }

    /// Shake the hand position of `input`.
    pub fn apply(&mut self, input: &mut FrameInput) {
        input.hand.position += self.offset();
    }
}
