//! LeapMotion landmark source — compiled only with the `leap` feature.
//!
//! Polls a LeapC connection on its own thread and converts each tracked hand
//! into the 21-landmark layout the classifier expects (wrist + four joints
//! per digit), normalized from millimeters into rough image space. Frames are
//! pushed over a channel; the main loop keeps only the freshest one.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::gesture::{Hand, Landmark, LANDMARKS_PER_HAND};
use crate::inference::CameraFrame;

/// Half-extent of the interaction box, in millimeters. Positions are mapped
/// from `[-SPAN, SPAN]` to `[0, 1]`.
const SPAN_MM: f32 = 200.0;

/// Spawn the hardware polling thread and return the frame channel.
pub fn spawn_leap_source() -> Receiver<CameraFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || leap_thread(tx));
    rx
}

fn leap_thread(tx: Sender<CameraFrame>) {
    use leaprs::*;

    let mut connection = match Connection::create(ConnectionConfig::default()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[leap] failed to create LeapC connection: {:?}", e);
            return;
        }
    };
    if let Err(e) = connection.open() {
        eprintln!("[leap] failed to open device: {:?}", e);
        return;
    }

    loop {
        let msg = match connection.poll(100) {
            Ok(m) => m,
            Err(_) => continue,
        };

        if let Event::Tracking(frame) = msg.event() {
            let hands: Vec<Hand> = frame.hands().map(|h| hand_landmarks(&h)).collect();
            if tx.send(CameraFrame::Hands(hands)).is_err() {
                // Main loop went away; stop polling.
                return;
            }
        }
    }
}

fn normalize(x: f32, y: f32, z: f32) -> Landmark {
    Landmark::new(
        x / (2.0 * SPAN_MM) + 0.5,
        // Leap y grows upward from the device; image y grows downward.
        1.0 - y / (2.0 * SPAN_MM),
        z / (2.0 * SPAN_MM),
    )
}

/// Map one Leap hand to the 21-point layout: index 0 is the wrist (palm
/// position), then four joints per digit in thumb→pinky order.
fn hand_landmarks(hand: &leaprs::Hand) -> Hand {
    let mut out = Vec::with_capacity(LANDMARKS_PER_HAND);

    let palm = hand.palm().position();
    out.push(normalize(palm.x, palm.y, palm.z));

    for digit in hand.digits() {
        for bone in [
            digit.metacarpal(),
            digit.proximal(),
            digit.intermediate(),
            digit.distal(),
        ] {
            let j = bone.next_joint();
            out.push(normalize(j.x, j.y, j.z));
        }
    }

    out
}
