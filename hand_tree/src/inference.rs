//! Classification worker and the single-slot in-flight gate.
//!
//! Landmark inference is slower than the display loop, so captured frames are
//! pushed through a one-deep pipeline: a frame is only submitted when the
//! previous one has fully resolved, and anything arriving in between is
//! dropped on the floor. Back-pressure by discarding, never by queueing —
//! latency stays bounded no matter how slow the model is.
//!
//! The worker owns a [`LandmarkModel`] (the external camera+model
//! collaborator, or a synthetic stand-in) and reports labels and errors back
//! over a channel. The gate is released on success *and* on error, so a
//! failed inference never wedges the pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::gesture::{classify_frame, GestureLabel, Hand, SimPose};

// ════════════════════════════════════════════════════════════════════════════
// InferenceGate — single-slot in-flight guard
// ════════════════════════════════════════════════════════════════════════════

/// Compare-and-swap guard ensuring at most one inference is outstanding.
#[derive(Debug, Default)]
pub struct InferenceGate {
    busy: AtomicBool,
}

impl InferenceGate {
    pub fn new() -> Self {
        InferenceGate { busy: AtomicBool::new(false) }
    }

    /// Claim the slot. Returns false if an inference is already in flight.
    pub fn try_acquire(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Free the slot. Called on completion and on error alike.
    pub fn release(&self) {
        self.busy.store(false, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraFrame / LandmarkModel — the external collaborator seam
// ════════════════════════════════════════════════════════════════════════════

/// One captured video frame handed to the landmark model.
#[derive(Clone, Debug)]
pub enum CameraFrame {
    /// Simulated capture: the pose currently held on the keyboard.
    Sim(SimPose),
    /// Hardware capture: landmarks already produced by the tracking SDK.
    Hands(Vec<Hand>),
}

/// Hand-landmark inference backend. Implementations may block; the worker
/// thread absorbs their latency.
pub trait LandmarkModel: Send + 'static {
    fn infer(&mut self, frame: &CameraFrame) -> Result<Vec<Hand>, String>;
}

/// Synthesizes landmarks for simulated poses, with optional artificial
/// latency to exercise the pipeline the way a real model would.
pub struct SimModel {
    pub latency: Duration,
}

impl SimModel {
    pub fn new(latency: Duration) -> Self {
        SimModel { latency }
    }
}

impl LandmarkModel for SimModel {
    fn infer(&mut self, frame: &CameraFrame) -> Result<Vec<Hand>, String> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        match frame {
            CameraFrame::Sim(pose) => Ok(pose.hands()),
            CameraFrame::Hands(hands) => Ok(hands.clone()),
        }
    }
}

/// Forwards landmarks that were already inferred upstream (hardware path).
pub struct PassthroughModel;

impl LandmarkModel for PassthroughModel {
    fn infer(&mut self, frame: &CameraFrame) -> Result<Vec<Hand>, String> {
        match frame {
            CameraFrame::Sim(pose) => Ok(pose.hands()),
            CameraFrame::Hands(hands) => Ok(hands.clone()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// InferenceEvent
// ════════════════════════════════════════════════════════════════════════════

/// Result of one inference round, delivered to the main loop.
#[derive(Clone, Debug, PartialEq)]
pub enum InferenceEvent {
    /// A classification completed (including `None` for an empty frame).
    Label(GestureLabel),
    /// The collaborator failed; classification was skipped for this attempt.
    Error(String),
}

// ════════════════════════════════════════════════════════════════════════════
// Classifier — handle to the worker thread
// ════════════════════════════════════════════════════════════════════════════

/// Handle to the classification worker.
///
/// Dropping the handle disconnects the frame channel; the worker finishes any
/// in-flight inference and exits without rescheduling.
pub struct Classifier {
    frame_tx: Sender<CameraFrame>,
    event_rx: Receiver<InferenceEvent>,
    gate: Arc<InferenceGate>,
}

impl Classifier {
    /// Spawn the worker around `model`.
    pub fn spawn(model: Box<dyn LandmarkModel>, fist_threshold: f32) -> Self {
        let (frame_tx, frame_rx) = mpsc::channel::<CameraFrame>();
        let (event_tx, event_rx) = mpsc::channel::<InferenceEvent>();
        let gate = Arc::new(InferenceGate::new());

        let worker_gate = Arc::clone(&gate);
        thread::spawn(move || {
            classifier_thread(model, fist_threshold, frame_rx, event_tx, worker_gate);
        });

        Classifier { frame_tx, event_rx, gate }
    }

    /// Submit a frame for classification.
    ///
    /// Returns false — and drops the frame — if an inference is still in
    /// flight or the worker has shut down.
    pub fn submit(&self, frame: CameraFrame) -> bool {
        if !self.gate.try_acquire() {
            return false;
        }
        if self.frame_tx.send(frame).is_err() {
            self.gate.release();
            return false;
        }
        true
    }

    /// Drain any pending events (non-blocking).
    pub fn drain(&self) -> Vec<InferenceEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = self.event_rx.try_recv() {
            out.push(ev);
        }
        out
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<InferenceEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn gate(&self) -> &InferenceGate {
        &self.gate
    }
}

fn classifier_thread(
    mut model: Box<dyn LandmarkModel>,
    fist_threshold: f32,
    frame_rx: Receiver<CameraFrame>,
    event_tx: Sender<InferenceEvent>,
    gate: Arc<InferenceGate>,
) {
    for frame in frame_rx {
        let event = match model.infer(&frame) {
            Ok(hands) => InferenceEvent::Label(classify_frame(&hands, fist_threshold)),
            Err(e) => {
                eprintln!("[infer] inference failed: {}", e);
                InferenceEvent::Error(e)
            }
        };
        // Release before reporting, so the slot is free the moment the
        // outcome is observable.
        gate.release();
        if event_tx.send(event).is_err() {
            return;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
