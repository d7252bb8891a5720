//! Scene configuration — every tunable constant in one place.

// ════════════════════════════════════════════════════════════════════════════
// Palette
// ════════════════════════════════════════════════════════════════════════════

/// Ordered festive palette the generator samples particle colors from.
/// RGB in linear 0–1; ordering matters for seeded reproducibility.
pub const PALETTE: [[f32; 3]; 6] = [
    [1.00, 0.27, 0.27], // red
    [0.27, 1.00, 0.27], // green
    [1.00, 0.84, 0.00], // gold
    [0.27, 0.67, 1.00], // ice blue
    [1.00, 0.40, 0.80], // pink
    [1.00, 1.00, 1.00], // white
];

// ════════════════════════════════════════════════════════════════════════════
// SceneConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the particle scene.
///
/// `Default` gives the tuned values; anything can be overridden before the
/// field is generated. The explosion sphere radius is derived (`1.5 × height`)
/// rather than stored, so the two shapes can never drift apart.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Number of particles. Fixed for the lifetime of a session.
    pub particle_count: usize,
    /// Tree height H; particles span `[-H/2, H/2]` vertically.
    pub tree_height: f32,
    /// Cone base radius R at the bottom of the tree.
    pub tree_radius: f32,
    /// Angular increment per particle index — produces the spiral arms.
    pub spiral_step: f32,
    /// Ordered color palette particles are drawn from.
    pub palette: Vec<[f32; 3]>,
    /// Particle scale range (min, max).
    pub scale_range: (f32, f32),
    /// Twinkle oscillation speed range (min, max), radians/second.
    pub blink_speed_range: (f32, f32),

    /// Smoothing constant for the tree ↔ explosion transition.
    pub smoothing_rate: f32,
    /// Amplitude of the per-particle vertical float.
    pub jitter_amplitude: f32,
    /// Frequency of the vertical float, radians/second.
    pub jitter_frequency: f32,
    /// Twinkle luminance base and amplitude: intensity = base + sin·amplitude.
    pub blink_base: f32,
    pub blink_amplitude: f32,
    /// Constant yaw rate of the whole particle group, radians/second.
    pub group_spin: f32,

    /// Ornament scale at (tree, exploded) poses.
    pub ornament_scale: (f32, f32),
    /// Ornament spin rate about the vertical axis, radians/second.
    pub ornament_spin: f32,
    /// Secondary ornament tilt: `sin(time·freq)·amp`.
    pub ornament_tilt_freq: f32,
    pub ornament_tilt_amp: f32,
    /// Point-light intensity at (tree, exploded) poses.
    pub light_intensity: (f32, f32),

    /// Initial pose: 0 = tree, 1 = exploded. Both `progress` and `target`
    /// start here.
    pub initial_pose: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            particle_count:     800,
            tree_height:        10.0,
            tree_radius:        4.0,
            spiral_step:        0.5,
            palette:            PALETTE.to_vec(),
            scale_range:        (0.05, 0.20),
            blink_speed_range:  (0.5, 3.5),

            smoothing_rate:     2.5,
            jitter_amplitude:   0.05,
            jitter_frequency:   2.0,
            blink_base:         0.7,
            blink_amplitude:    0.5,
            group_spin:         0.3,

            ornament_scale:     (1.5, 0.15),
            ornament_spin:      0.8,
            ornament_tilt_freq: 0.5,
            ornament_tilt_amp:  0.1,
            light_intensity:    (2.0, 0.5),

            initial_pose:       1.0,
        }
    }
}

impl SceneConfig {
    /// Radius of the explosion sphere: `1.5 × tree_height`.
    pub fn explosion_radius(&self) -> f32 {
        1.5 * self.tree_height
    }

    /// World position of the ornament (just above the tree tip).
    pub fn ornament_position(&self) -> glam::Vec3 {
        glam::Vec3::new(0.0, self.tree_height / 2.0 + 1.0, 0.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ranges_are_ordered() {
        let cfg = SceneConfig::default();
        assert!(cfg.scale_range.0 < cfg.scale_range.1);
        assert!(cfg.blink_speed_range.0 < cfg.blink_speed_range.1);
        assert!(!cfg.palette.is_empty());
    }

    #[test]
    fn explosion_radius_tracks_height() {
        let mut cfg = SceneConfig::default();
        cfg.tree_height = 8.0;
        assert_eq!(cfg.explosion_radius(), 12.0);
    }

    #[test]
    fn ornament_sits_above_tree_tip() {
        let cfg = SceneConfig::default();
        let pos = cfg.ornament_position();
        assert!(pos.y > cfg.tree_height / 2.0);
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.z, 0.0);
    }
}
