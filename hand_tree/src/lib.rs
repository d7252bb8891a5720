//! # hand_tree
//!
//! Hand-gesture controller for the [`tree_scene`] particle scene: a single
//! fixed heuristic turns 21 hand landmarks into an open/fist signal, and that
//! signal drives the tree ↔ nebula transition.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Label | Action |
//! |---|---|---|
//! | Fist (fingertips near wrist) | `Fist` | target 0 — collapse into the tree |
//! | Open hand (fingertips spread) | `Open` | target 1 — explode into the nebula |
//! | No hand visible | `None` | target unchanged (sticky) |
//!
//! ## Pipeline
//!
//! Capture → single-slot gate → classification worker → label events →
//! target setter → per-frame integrator → renderer. Frames captured while an
//! inference is in flight are dropped, never queued.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: hold `O` for an open hand, `F` for a
//!   fist; releasing both simulates no hand in view.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC
//!   and classifies its landmarks with the same heuristic.

pub mod app;
pub mod gesture;
pub mod inference;
#[cfg(feature = "leap")]
pub mod source;
pub mod visualizer;
