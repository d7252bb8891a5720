//! Gesture classification — one fixed heuristic for one gesture pair.
//!
//! A hand is 21 ordered landmarks in normalized image coordinates. The
//! classifier measures the mean planar distance from the four non-thumb
//! fingertips to the wrist: curled fingers sit close to the wrist (fist),
//! spread fingers sit far (open hand). No history, no smoothing — the same
//! input always yields the same label.

// ════════════════════════════════════════════════════════════════════════════
// Landmarks
// ════════════════════════════════════════════════════════════════════════════

/// One 3D keypoint of a tracked hand. `x`/`y` are normalized to image space
/// (roughly 0–1), `z` is relative depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }
}

/// Landmarks per tracked hand.
pub const LANDMARKS_PER_HAND: usize = 21;

/// Index of the wrist landmark.
pub const WRIST: usize = 0;

/// Fingertip landmark indices: index, middle, ring, pinky. The thumb is
/// excluded — it barely moves toward the wrist in a fist.
pub const FINGERTIPS: [usize; 4] = [8, 12, 16, 20];

/// One hand's landmark set.
pub type Hand = Vec<Landmark>;

/// Mean planar distance from curled fingertips to the wrist below which the
/// hand reads as a fist. Exactly at the threshold reads as open.
pub const DEFAULT_FIST_THRESHOLD: f32 = 0.22;

// ════════════════════════════════════════════════════════════════════════════
// GestureLabel
// ════════════════════════════════════════════════════════════════════════════

/// Classifier output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureLabel {
    /// Open hand — explode the tree.
    Open,
    /// Fist — collapse into the tree.
    Fist,
    /// No hand observed this frame. Carries no direction; the animation
    /// target is left wherever it was.
    None,
}

/// Human-readable status line for a classification.
pub fn status_line(label: GestureLabel) -> &'static str {
    match label {
        GestureLabel::Fist => "TREE (FIST)",
        GestureLabel::Open => "EXPLODE (OPEN)",
        GestureLabel::None => "NO HAND DETECTED",
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify a single hand.
///
/// Empty or malformed input (anything but exactly 21 landmarks) is `None`;
/// it never errors. Mean planar fingertip–wrist distance strictly below
/// `fist_threshold` is `Fist`, otherwise `Open`.
pub fn classify(hand: &[Landmark], fist_threshold: f32) -> GestureLabel {
    if hand.len() != LANDMARKS_PER_HAND {
        return GestureLabel::None;
    }

    let wrist = hand[WRIST];
    let total: f32 = FINGERTIPS
        .iter()
        .map(|&i| {
            let tip = hand[i];
            let dx = tip.x - wrist.x;
            let dy = tip.y - wrist.y;
            (dx * dx + dy * dy).sqrt()
        })
        .sum();
    let avg_dist = total / FINGERTIPS.len() as f32;

    if avg_dist < fist_threshold {
        GestureLabel::Fist
    } else {
        GestureLabel::Open
    }
}

/// Classify a whole frame of zero or more hands.
///
/// Policy: when several hands are reported, the last-processed hand's label
/// wins — each classification silently overwrites the previous one, exactly
/// like the per-hand loop it replaces. This is iteration order, not a
/// confidence ranking.
pub fn classify_frame(hands: &[Hand], fist_threshold: f32) -> GestureLabel {
    let mut label = GestureLabel::None;
    for hand in hands {
        label = classify(hand, fist_threshold);
    }
    label
}

// ════════════════════════════════════════════════════════════════════════════
// Synthetic hands — simulation source and tests
// ════════════════════════════════════════════════════════════════════════════

/// Simulated hand pose held on the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    Open,
    Fist,
    NoHand,
}

/// Build a 21-landmark hand with the wrist at image center and all four
/// non-thumb fingertips at planar distance `tip_dist` from it. Remaining
/// joints are packed near the wrist; the classifier never looks at them.
pub fn synthetic_hand(tip_dist: f32) -> Hand {
    let wrist = Landmark::new(0.5, 0.5, 0.0);
    let mut hand = vec![Landmark::new(0.48, 0.52, 0.0); LANDMARKS_PER_HAND];
    hand[WRIST] = wrist;
    // Fan the tips out at distinct angles, all at the same radius.
    for (k, &i) in FINGERTIPS.iter().enumerate() {
        let angle = 1.2 + k as f32 * 0.25;
        hand[i] = Landmark::new(
            wrist.x + tip_dist * angle.cos(),
            wrist.y - tip_dist * angle.sin(),
            0.0,
        );
    }
    hand
}

/// Landmarks for a wide-open simulated hand.
pub fn open_hand() -> Hand {
    synthetic_hand(0.45)
}

/// Landmarks for a clenched simulated fist.
pub fn fist_hand() -> Hand {
    synthetic_hand(0.12)
}

impl SimPose {
    /// The hands a camera+model collaborator would report for this pose.
    pub fn hands(self) -> Vec<Hand> {
        match self {
            SimPose::Open => vec![open_hand()],
            SimPose::Fist => vec![fist_hand()],
            SimPose::NoHand => Vec::new(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
