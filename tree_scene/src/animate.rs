//! Per-frame animation integration.
//!
//! `AnimationState` holds the one-dimensional pose of the scene: a sticky
//! `target` (0 = tree, 1 = exploded) written by the gesture side, and a
//! smoothed `progress` that chases it. Each frame [`update`] advances the
//! progress and emits a fresh [`FrameSnapshot`] — world-space position, scale
//! and color for every particle, the ornament pose and the light intensity.
//! The snapshot is a plain value; the renderer borrows it for one frame and
//! nothing is mutated in place behind its back.

use glam::Vec3;

use crate::config::SceneConfig;
use crate::particle::ParticleField;

// ════════════════════════════════════════════════════════════════════════════
// AnimationState
// ════════════════════════════════════════════════════════════════════════════

/// Continuous pose state. `target` is only ever set through [`set_target`];
/// `progress` only ever moves inside [`update`], monotonically toward the
/// current target.
///
/// [`set_target`]: AnimationState::set_target
/// [`update`]: update
#[derive(Clone, Debug)]
pub struct AnimationState {
    target: f32,
    progress: f32,
}

impl AnimationState {
    /// Start with `progress == target == initial` (0 = tree, 1 = exploded).
    pub fn new(initial: f32) -> Self {
        let initial = initial.clamp(0.0, 1.0);
        AnimationState { target: initial, progress: initial }
    }

    /// The sole write path for the gesture target.
    pub fn set_target(&mut self, target: f32) {
        self.target = target.clamp(0.0, 1.0);
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Frame-rate-compensated exponential approach toward the target.
    ///
    /// The blend factor is clamped to `[0, 1]`, so a huge `dt` lands exactly
    /// on the target instead of overshooting.
    fn advance(&mut self, rate: f32, dt: f32) {
        let blend = (rate * dt).clamp(0.0, 1.0);
        self.progress += (self.target - self.progress) * blend;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameSnapshot
// ════════════════════════════════════════════════════════════════════════════

/// Per-particle render data for one frame.
#[derive(Clone, Debug)]
pub struct ParticleInstance {
    pub position: Vec3,
    pub scale: f32,
    /// Base color × twinkle intensity. Deliberately unclamped — may exceed
    /// 1.0 and relies on downstream tone mapping.
    pub color: [f32; 3],
}

/// Ornament (star) pose for one frame.
#[derive(Clone, Copy, Debug)]
pub struct OrnamentPose {
    pub position: Vec3,
    pub scale: f32,
    /// Rotation about the vertical axis.
    pub yaw: f32,
    /// Secondary oscillating tilt.
    pub tilt: f32,
}

/// Everything the renderer needs for one frame, produced fresh by [`update`].
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub particles: Vec<ParticleInstance>,
    pub ornament: OrnamentPose,
    pub light_intensity: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// update — the integrator
// ════════════════════════════════════════════════════════════════════════════

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Advance the animation by `dt` seconds at session time `time` and compute
/// the full frame snapshot.
///
/// Total function of `(state, dt, time)` — no failure modes. O(N) in the
/// particle count.
pub fn update(
    state: &mut AnimationState,
    field: &ParticleField,
    cfg: &SceneConfig,
    dt: f32,
    time: f32,
) -> FrameSnapshot {
    state.advance(cfg.smoothing_rate, dt);
    let t = state.progress;

    // Whole-group yaw, pure decoration independent of gesture state. Baked
    // into the emitted positions so the renderer sees world space.
    let group_angle = time * cfg.group_spin;
    let (sin_g, cos_g) = group_angle.sin_cos();

    let mut particles = Vec::with_capacity(field.len());
    for (i, p) in field.particles().iter().enumerate() {
        let mut pos = p.tree_pos.lerp(p.explosion_pos, t);

        // Decorative vertical float, phase-shifted by index.
        pos.y += (time * cfg.jitter_frequency + i as f32).sin() * cfg.jitter_amplitude;

        // Rotate about Y; the jittered y is unaffected.
        let rotated = Vec3::new(
            pos.x * cos_g + pos.z * sin_g,
            pos.y,
            -pos.x * sin_g + pos.z * cos_g,
        );

        let blink = (time * p.blink_speed + p.blink_phase).sin();
        let intensity = cfg.blink_base + blink * cfg.blink_amplitude;
        let color = [
            p.color[0] * intensity,
            p.color[1] * intensity,
            p.color[2] * intensity,
        ];

        particles.push(ParticleInstance { position: rotated, scale: p.scale, color });
    }

    let ornament = OrnamentPose {
        position: cfg.ornament_position(),
        scale: lerp(cfg.ornament_scale.0, cfg.ornament_scale.1, t),
        yaw: time * cfg.ornament_spin + group_angle,
        tilt: (time * cfg.ornament_tilt_freq).sin() * cfg.ornament_tilt_amp,
    };

    let light_intensity = lerp(cfg.light_intensity.0, cfg.light_intensity.1, t);

    FrameSnapshot { particles, ornament, light_intensity }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_scene() -> (SceneConfig, ParticleField) {
        let mut cfg = SceneConfig::default();
        cfg.particle_count = 50;
        let mut rng = StdRng::seed_from_u64(99);
        let field = ParticleField::generate(&cfg, &mut rng);
        (cfg, field)
    }

    #[test]
    fn progress_converges_monotonically() {
        let mut state = AnimationState::new(1.0);
        state.set_target(0.0);
        let mut prev = state.progress();
        for _ in 0..200 {
            state.advance(2.5, 0.016);
            assert!(state.progress() <= prev, "progress must not move away");
            assert!(state.progress() >= 0.0 && state.progress() <= 1.0);
            prev = state.progress();
        }
        assert!(state.progress() < 0.01);
    }

    #[test]
    fn large_dt_never_overshoots() {
        let mut state = AnimationState::new(0.0);
        state.set_target(1.0);
        state.advance(2.5, 100.0); // blend clamps to 1.0
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn unit_dt_converges_within_bound() {
        // progress=1, target=0, rate=2.5, dt=1.0: blend clamps to 1, so the
        // first step already lands on the target.
        let mut state = AnimationState::new(1.0);
        state.set_target(0.0);
        let mut steps = 0;
        while (state.progress() - 0.0).abs() >= 0.01 {
            state.advance(2.5, 1.0);
            steps += 1;
            assert!(steps <= 10, "failed to converge in a bounded step count");
        }
        assert!(steps >= 1);
    }

    #[test]
    fn retarget_mid_flight_reverses_direction() {
        let mut state = AnimationState::new(1.0);
        state.set_target(0.0);
        for _ in 0..10 {
            state.advance(2.5, 0.016);
        }
        let mid = state.progress();
        state.set_target(1.0);
        state.advance(2.5, 0.016);
        assert!(state.progress() > mid);
    }

    #[test]
    fn snapshot_covers_every_particle() {
        let (cfg, field) = small_scene();
        let mut state = AnimationState::new(cfg.initial_pose);
        let snap = update(&mut state, &field, &cfg, 0.016, 0.0);
        assert_eq!(snap.particles.len(), field.len());
    }

    #[test]
    fn tree_pose_shows_large_ornament_and_bright_light() {
        let (cfg, field) = small_scene();
        let mut state = AnimationState::new(0.0);
        let snap = update(&mut state, &field, &cfg, 0.0, 0.0);
        assert_eq!(snap.ornament.scale, cfg.ornament_scale.0);
        assert_eq!(snap.light_intensity, cfg.light_intensity.0);
    }

    #[test]
    fn exploded_pose_shrinks_ornament_and_dims_light() {
        let (cfg, field) = small_scene();
        let mut state = AnimationState::new(1.0);
        let snap = update(&mut state, &field, &cfg, 0.0, 0.0);
        assert!((snap.ornament.scale - cfg.ornament_scale.1).abs() < 1e-5);
        assert!((snap.light_intensity - cfg.light_intensity.1).abs() < 1e-5);
    }

    #[test]
    fn twinkle_scales_color_within_expected_band() {
        let (cfg, field) = small_scene();
        let mut state = AnimationState::new(0.0);
        let snap = update(&mut state, &field, &cfg, 0.0, 1.234);
        let lo = cfg.blink_base - cfg.blink_amplitude;
        let hi = cfg.blink_base + cfg.blink_amplitude;
        for (inst, p) in snap.particles.iter().zip(field.particles()) {
            for c in 0..3 {
                assert!(inst.color[c] >= p.color[c] * lo - 1e-4);
                assert!(inst.color[c] <= p.color[c] * hi + 1e-4);
            }
        }
    }

    #[test]
    fn jitter_stays_within_amplitude() {
        let (cfg, field) = small_scene();
        let mut state = AnimationState::new(0.0);
        // Rotation about Y preserves the y coordinate, so the jitter is the
        // only difference from the resting tree height.
        let snap = update(&mut state, &field, &cfg, 0.0, 3.21);
        for (inst, p) in snap.particles.iter().zip(field.particles()) {
            assert!((inst.position.y - p.tree_pos.y).abs() <= cfg.jitter_amplitude + 1e-4);
        }
    }

    #[test]
    fn zero_dt_leaves_progress_alone() {
        let mut state = AnimationState::new(0.5);
        state.set_target(1.0);
        state.advance(2.5, 0.0);
        assert_eq!(state.progress(), 0.5);
    }

    #[test]
    fn set_target_clamps_to_unit_interval() {
        let mut state = AnimationState::new(0.0);
        state.set_target(3.0);
        assert_eq!(state.target(), 1.0);
        state.set_target(-1.0);
        assert_eq!(state.target(), 0.0);
    }
}
