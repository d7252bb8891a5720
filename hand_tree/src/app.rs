//! Top-level application state and run loop.
//!
//! `AppState` owns the particle field, the animation state and the status
//! line. Label events from the classification worker flow through
//! [`AppState::apply_event`] — the only place the animation target is ever
//! written — while [`AppState::frame`] advances the integrator every display
//! frame regardless of gesture traffic.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use tree_scene::{update, AnimationState, FrameSnapshot, ParticleField, SceneConfig};

use crate::gesture::{status_line, GestureLabel, DEFAULT_FIST_THRESHOLD};
use crate::inference::{Classifier, InferenceEvent, LandmarkModel};
#[cfg(not(feature = "leap"))]
use crate::inference::{CameraFrame, SimModel};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub scene: SceneConfig,
    /// Seed for the particle field generator.
    pub seed: u64,
    /// Fist/open decision threshold on mean fingertip–wrist distance.
    pub fist_threshold: f32,
    /// Artificial latency of the simulated landmark model. Mimics real
    /// inference running slower than the display loop.
    pub model_latency: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            scene: SceneConfig::default(),
            seed: 0x5EED,
            fist_threshold: DEFAULT_FIST_THRESHOLD,
            model_latency: Duration::from_millis(25),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    scene: SceneConfig,
    field: ParticleField,
    anim: AnimationState,
    /// Latest human-readable classification status.
    pub status: String,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let field = ParticleField::generate(&cfg.scene, &mut rng);
        let anim = AnimationState::new(cfg.scene.initial_pose);

        AppState {
            scene: cfg.scene.clone(),
            field,
            anim,
            status: "DETECTING...".to_string(),
        }
    }

    /// Apply one inference outcome.
    ///
    /// This is the target setter: `Fist` → 0, `Open` → 1, `None` → no change
    /// (the target is sticky across hand-free frames). Collaborator errors
    /// surface as the status line and leave the animation untouched.
    pub fn apply_event(&mut self, event: InferenceEvent) {
        match event {
            InferenceEvent::Label(label) => {
                match label {
                    GestureLabel::Fist => self.anim.set_target(0.0),
                    GestureLabel::Open => self.anim.set_target(1.0),
                    GestureLabel::None => {}
                }
                self.status = status_line(label).to_string();
            }
            InferenceEvent::Error(msg) => {
                self.status = msg;
            }
        }
    }

    /// Advance the animation by `dt` at session time `time`.
    pub fn frame(&mut self, dt: f32, time: f32) -> FrameSnapshot {
        update(&mut self.anim, &self.field, &self.scene, dt, time)
    }

    pub fn target(&self) -> f32 {
        self.anim.target()
    }

    pub fn progress(&self) -> f32 {
        self.anim.progress()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the window, spawns the classification worker and drives the
/// capture → classify → animate → render loop at ~60 fps. In simulation mode
/// the keyboard pose is captured each frame; with the `leap` feature a
/// hardware thread supplies real landmark frames instead.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    let mut vis = Visualizer::new()?;

    #[cfg(feature = "leap")]
    let model: Box<dyn LandmarkModel> = Box::new(crate::inference::PassthroughModel);
    #[cfg(not(feature = "leap"))]
    let model: Box<dyn LandmarkModel> = Box::new(SimModel::new(cfg.model_latency));

    let classifier = Classifier::spawn(model, cfg.fist_threshold);

    #[cfg(feature = "leap")]
    let leap_rx = crate::source::spawn_leap_source();

    let mut app = AppState::new(&cfg);

    let start = Instant::now();
    let mut last = start;

    while vis.is_open() {
        // 1. Capture. The gate drops this frame when inference is behind.
        let input = vis.poll_input();
        if input.quit {
            break;
        }

        #[cfg(feature = "leap")]
        {
            // Keep only the freshest hardware frame; stale ones are discarded.
            let mut latest = None;
            while let Ok(frame) = leap_rx.try_recv() {
                latest = Some(frame);
            }
            if let Some(frame) = latest {
                classifier.submit(frame);
            }
        }
        #[cfg(not(feature = "leap"))]
        classifier.submit(CameraFrame::Sim(input.pose));

        // 2. Drain classification outcomes (zero or more per display frame).
        for event in classifier.drain() {
            app.apply_event(event);
        }

        // 3. Advance the animation on wall-clock time.
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;
        let time = now.duration_since(start).as_secs_f32();

        let snapshot = app.frame(dt, time);

        // 4. Render.
        vis.render(&snapshot, &app.status);
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn make_app() -> AppState {
        let mut cfg = AppConfig::default();
        cfg.scene.particle_count = 20;
        AppState::new(&cfg)
    }

    #[test]
    fn starts_detecting_at_initial_pose() {
        let app = make_app();
        assert_eq!(app.status, "DETECTING...");
        assert_eq!(app.target(), 1.0);
        assert_eq!(app.progress(), 1.0);
    }

    #[test]
    fn fist_sets_tree_target() {
        let mut app = make_app();
        app.apply_event(InferenceEvent::Label(GestureLabel::Fist));
        assert_eq!(app.target(), 0.0);
        assert_eq!(app.status, "TREE (FIST)");
    }

    #[test]
    fn open_sets_explode_target() {
        let mut app = make_app();
        app.apply_event(InferenceEvent::Label(GestureLabel::Fist));
        app.apply_event(InferenceEvent::Label(GestureLabel::Open));
        assert_eq!(app.target(), 1.0);
        assert_eq!(app.status, "EXPLODE (OPEN)");
    }

    #[test]
    fn none_label_is_sticky() {
        let mut app = make_app();
        app.apply_event(InferenceEvent::Label(GestureLabel::Fist));
        for _ in 0..50 {
            app.apply_event(InferenceEvent::Label(GestureLabel::None));
        }
        assert_eq!(app.target(), 0.0, "NONE frames must not move the target");
        assert_eq!(app.status, "NO HAND DETECTED");
    }

    #[test]
    fn collaborator_error_freezes_target() {
        let mut app = make_app();
        app.apply_event(InferenceEvent::Label(GestureLabel::Fist));
        app.apply_event(InferenceEvent::Error("CAMERA ERROR - ALLOW PERMS".to_string()));
        assert_eq!(app.target(), 0.0);
        assert_eq!(app.status, "CAMERA ERROR - ALLOW PERMS");
    }

    #[test]
    fn fist_then_frames_collapse_the_tree() {
        let mut app = make_app();
        app.apply_event(InferenceEvent::Label(GestureLabel::Fist));
        // rate 2.5, dt 1.0: blend clamps to 1, converges immediately.
        let mut steps = 0;
        while (app.progress() - 0.0).abs() >= 0.01 {
            app.frame(1.0, steps as f32);
            steps += 1;
            assert!(steps <= 10);
        }
    }

    #[test]
    fn landmarks_to_target_fist() {
        // Wrist at origin, four tips at planar distance 0.10 ⇒ FIST ⇒ target 0.
        use crate::gesture::{classify_frame, Landmark, FINGERTIPS, LANDMARKS_PER_HAND};
        let mut hand = vec![Landmark::new(0.0, 0.0, 0.0); LANDMARKS_PER_HAND];
        for &i in &FINGERTIPS {
            hand[i] = Landmark::new(0.10, 0.0, 0.0);
        }
        let label = classify_frame(&[hand], DEFAULT_FIST_THRESHOLD);
        let mut app = make_app();
        app.apply_event(InferenceEvent::Label(label));
        assert_eq!(app.target(), 0.0);
        assert_eq!(app.status, "TREE (FIST)");
    }

    #[test]
    fn landmarks_to_target_open() {
        // Tips at distance 0.50 ⇒ OPEN ⇒ target 1.
        use crate::gesture::{classify_frame, Landmark, FINGERTIPS, LANDMARKS_PER_HAND};
        let mut hand = vec![Landmark::new(0.0, 0.0, 0.0); LANDMARKS_PER_HAND];
        for &i in &FINGERTIPS {
            hand[i] = Landmark::new(0.0, 0.50, 0.0);
        }
        let label = classify_frame(&[hand], DEFAULT_FIST_THRESHOLD);
        let mut app = make_app();
        app.apply_event(InferenceEvent::Label(GestureLabel::Fist));
        app.apply_event(InferenceEvent::Label(label));
        assert_eq!(app.target(), 1.0);
        assert_eq!(app.status, "EXPLODE (OPEN)");
    }

    #[test]
    fn animation_runs_without_gesture_traffic() {
        let mut app = make_app();
        let n = app.field().len();
        let snap = app.frame(0.016, 0.5);
        assert_eq!(snap.particles.len(), n);
        assert_eq!(app.target(), 1.0);
    }
}
