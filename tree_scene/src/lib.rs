//! # tree_scene
//!
//! Core of the gesture-driven particle tree: a fixed field of particles, each
//! with two precomputed target positions — a slot on a spiral-cone "tree" and
//! a random point in a surrounding "explosion" sphere — and a per-frame
//! integrator that smoothly interpolates between the two poses while layering
//! decorative motion on top (vertical float, twinkle, group spin, ornament
//! scale/spin, light dimming).
//!
//! The crate is pure: no windowing, no threads, no wall clock. The caller
//! feeds `dt`/`time` in and gets a read-only [`FrameSnapshot`] back each
//! frame. Gesture input only ever touches [`AnimationState::set_target`].
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use tree_scene::{update, AnimationState, ParticleField, SceneConfig};
//!
//! let cfg = SceneConfig::default();
//! let mut rng = StdRng::seed_from_u64(7);
//! let field = ParticleField::generate(&cfg, &mut rng);
//! let mut state = AnimationState::new(cfg.initial_pose);
//!
//! state.set_target(0.0); // collapse into the tree
//! let snapshot = update(&mut state, &field, &cfg, 1.0 / 60.0, 0.0);
//! assert_eq!(snapshot.particles.len(), cfg.particle_count);
//! ```

pub mod animate;
pub mod config;
pub mod particle;

pub use animate::{update, AnimationState, FrameSnapshot, OrnamentPose, ParticleInstance};
pub use config::{SceneConfig, PALETTE};
pub use particle::{Particle, ParticleField};
