//! Software-rendered view of the particle scene using `minifb`.
//!
//! This is the stand-in renderer: it takes the read-only frame snapshot from
//! the integrator and projects it onto a framebuffer. Nothing here feeds back
//! into the animation — the window also doubles as the keyboard input surface
//! for simulation mode (hold `O` for an open hand, `F` for a fist, release
//! both for no hand).

use glam::Vec3;
use minifb::{Key, Window, WindowOptions};

use crate::gesture::SimPose;
use tree_scene::FrameSnapshot;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 960;
pub const WIN_H: usize = 720;

/// Camera distance along +Z from the scene origin.
const CAM_DIST: f32 = 24.0;
/// Perspective focal length in pixels.
const FOCAL: f32 = 560.0;
/// Points closer than this to the camera plane are culled.
const NEAR: f32 = 0.5;

const BG_COLOR: u32 = 0xFF050509;
const STATUS_BG: u32 = 0xFF101828;
const STAR_COLOR: [f32; 3] = [1.0, 0.84, 0.0];
const STATUS_Y: usize = WIN_H - 36;

// ════════════════════════════════════════════════════════════════════════════
// Input
// ════════════════════════════════════════════════════════════════════════════

/// Keyboard state translated to a simulated camera pose.
#[derive(Clone, Copy, Debug)]
pub struct InputState {
    pub pose: SimPose,
    pub quit: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Projection helpers (pure, testable)
// ════════════════════════════════════════════════════════════════════════════

/// Perspective-project a world point. Returns screen x, y and the view-space
/// depth, or `None` when the point is behind the near plane.
pub fn project(p: Vec3) -> Option<(f32, f32, f32)> {
    let depth = CAM_DIST - p.z;
    if depth <= NEAR {
        return None;
    }
    let sx = WIN_W as f32 / 2.0 + p.x * FOCAL / depth;
    let sy = WIN_H as f32 / 2.0 - p.y * FOCAL / depth;
    Some((sx, sy, depth))
}

/// Tone-map an unclamped linear RGB triple to packed ARGB. This is where the
/// "may exceed nominal max" colors from the integrator get clamped.
pub fn color_to_argb(c: [f32; 3]) -> u32 {
    let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u32;
    0xFF000000 | (ch(c[0]) << 16) | (ch(c[1]) << 8) | ch(c[2])
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
}

impl Visualizer {
    pub fn new() -> Result<Self, String> {
        let mut window = Window::new(
            "Hand Tree — open hand explodes, fist rebuilds",
            WIN_W,
            WIN_H,
            WindowOptions { resize: false, ..WindowOptions::default() },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, buf: vec![BG_COLOR; WIN_W * WIN_H] })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Read the currently-held keys as a simulated hand pose.
    pub fn poll_input(&self) -> InputState {
        let quit = self.window.is_key_down(Key::Q) || self.window.is_key_down(Key::Escape);
        let pose = if self.window.is_key_down(Key::O) {
            SimPose::Open
        } else if self.window.is_key_down(Key::F) {
            SimPose::Fist
        } else {
            SimPose::NoHand
        };
        InputState { pose, quit }
    }

    /// Render one frame from the integrator's snapshot.
    pub fn render(&mut self, snapshot: &FrameSnapshot, status: &str) {
        self.buf.fill(BG_COLOR);

        // ── Particles ─────────────────────────────────────────────────────
        for inst in &snapshot.particles {
            if let Some((sx, sy, depth)) = project(inst.position) {
                let size = ((inst.scale * FOCAL / depth).round() as isize).max(1);
                self.fill_square(sx as isize, sy as isize, size, color_to_argb(inst.color));
            }
        }

        // ── Ornament star + light halo ────────────────────────────────────
        if let Some((sx, sy, depth)) = project(snapshot.ornament.position) {
            let radius = (snapshot.ornament.scale * FOCAL / depth) as isize;
            // Light intensity drives the halo brightness (range 0.5–2.0).
            let glow = (snapshot.light_intensity / 2.0).clamp(0.0, 1.0);
            let halo = color_to_argb([
                STAR_COLOR[0] * glow * 0.5,
                STAR_COLOR[1] * glow * 0.5,
                STAR_COLOR[2] * glow * 0.5,
            ]);
            self.draw_star(
                sx as isize,
                sy as isize,
                (radius * 2).max(2),
                snapshot.ornament.yaw,
                snapshot.ornament.tilt,
                halo,
            );
            self.draw_star(
                sx as isize,
                sy as isize,
                radius.max(1),
                snapshot.ornament.yaw,
                snapshot.ornament.tilt,
                color_to_argb(STAR_COLOR),
            );
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, STATUS_BG);
        self.draw_label(status, 10, STATUS_Y + 8, 0xFFEEEEEE);
        self.draw_label(
            "HOLD O=OPEN HAND (EXPLODE)  F=FIST (TREE)  Q=QUIT",
            10,
            WIN_H - 14,
            0xFF8899AA,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    fn fill_square(&mut self, cx: isize, cy: isize, size: isize, color: u32) {
        let half = size / 2;
        for y in (cy - half)..=(cy + half) {
            for x in (cx - half)..=(cx + half) {
                self.set_pixel(x, y, color);
            }
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    /// Five-pointed star: rays from the center, foreshortened by the spin
    /// angle so the star visibly rotates, sheared slightly by the tilt.
    fn draw_star(&mut self, cx: isize, cy: isize, r: isize, yaw: f32, tilt: f32, color: u32) {
        // Horizontal foreshortening fakes rotation about the vertical axis.
        let squeeze = yaw.cos().abs().max(0.25);
        for i in 0..5 {
            let a = -std::f32::consts::FRAC_PI_2
                + i as f32 * std::f32::consts::TAU / 5.0
                + tilt;
            let tip_x = cx as f32 + a.cos() * r as f32 * squeeze;
            let tip_y = cy as f32 + a.sin() * r as f32;
            self.draw_line(cx, cy, tip_x as isize, tip_y as isize, color);
        }
        self.fill_square(cx, cy, (r / 3).max(2), color);
    }

    fn draw_line(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, color: u32) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let x = x0 as f32 + (x1 - x0) as f32 * t;
            let y = y0 as f32 + (y1 - y0) as f32 * t;
            self.set_pixel(x as isize, y as isize, color);
        }
    }

    /// Minimal bitmap font — 3×5 glyphs, uppercase only.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel((cx + col) as isize, (y + row) as isize, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b011, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b110, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b010, 0b010, 0b010, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b111, 0b001, 0b011, 0b000, 0b010], // '?' fallback
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
