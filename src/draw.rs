// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the drawing surface.
// 2) A canvas layer holding the stroke polyline and the square-mode guides.
// 3) A tiny 5x7 bitmap font (scalable) for the score HUD.

use crate::error::Error;
use crate::feedback::Surface;
use crate::types::{FrameBuffer, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Top byte marks a canvas pixel as painted; minifb ignores it.
const PAINTED: u32 = 0xFF_00_00_00;

/// Grid lines: faint white over the dark background.
pub const GRID_COLOR: u32 = 0x00_3A_3A_3A;
/// Reference square outline.
pub const GUIDE_COLOR: u32 = 0x00_80_80_80;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the requested size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels; None when the pointer left the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Edge-triggered key press (no auto-repeat).
    pub fn key_pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }
}

/* ---------- Canvas: the Surface the feedback renderer draws on ---------- */

/// Transparent layer over the background. Unpainted pixels are 0.
pub struct Canvas {
    layer: FrameBuffer,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { layer: FrameBuffer::filled(width, height, 0) }
    }

    pub fn width(&self) -> usize {
        self.layer.width
    }

    pub fn height(&self) -> usize {
        self.layer.height
    }

    /// Color at (x,y) if something was painted there.
    pub fn painted(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.layer.width || y >= self.layer.height {
            return None;
        }
        let px = self.layer.pixels[y * self.layer.width + x];
        (px & PAINTED != 0).then_some(px & !PAINTED)
    }

    /// Fill `screen` with `background`, then copy every painted pixel on top.
    /// Visual: the stroke and guides float over the (maybe darkened) backdrop.
    pub fn composite_onto(&self, screen: &mut FrameBuffer, background: u32) {
        for (dst, &src) in screen.pixels.iter_mut().zip(&self.layer.pixels) {
            *dst = if src & PAINTED != 0 { src & !PAINTED } else { background };
        }
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        self.layer.fill(0);
    }

    fn draw_polyline(&mut self, points: &[Point], color: u32, width: f32) {
        let radius = (width / 2.0).max(0.5);
        for seg in points.windows(2) {
            stamp_segment(&mut self.layer, seg[0], seg[1], radius, color | PAINTED);
        }
    }

    fn draw_grid(&mut self, spacing: usize) {
        if spacing == 0 {
            return;
        }
        let (w, h) = (self.layer.width as i32, self.layer.height as i32);
        for x in (0..w).step_by(spacing) {
            draw_line(&mut self.layer, x, 0, x, h - 1, GRID_COLOR | PAINTED);
        }
        for y in (0..h).step_by(spacing) {
            draw_line(&mut self.layer, 0, y, w - 1, y, GRID_COLOR | PAINTED);
        }
    }

    fn draw_centered_square(&mut self, size: f32) {
        let cx = self.layer.width as f32 / 2.0;
        let cy = self.layer.height as f32 / 2.0;
        let half = size / 2.0;
        let (x0, y0) = ((cx - half).round() as i32, (cy - half).round() as i32);
        let (x1, y1) = ((cx + half).round() as i32, (cy + half).round() as i32);

        // 2 px outline: outer edge plus one pixel inside.
        for inset in 0..2 {
            draw_rect(&mut self.layer, x0 + inset, y0 + inset, x1 - inset, y1 - inset, GUIDE_COLOR | PAINTED);
        }
    }
}

/* ---------- Software drawing: pixels, lines, discs, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

fn draw_rect(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    draw_line(fb, x0, y0, x1, y0, color);
    draw_line(fb, x1, y0, x1, y1, color);
    draw_line(fb, x1, y1, x0, y1, color);
    draw_line(fb, x0, y1, x0, y0, color);
}

/// Solid disc of radius `r` centered at (cx,cy).
fn fill_disc(fb: &mut FrameBuffer, cx: f64, cy: f64, r: f32, color: u32) {
    let r = r as f64;
    let r2 = r * r;
    let (x_lo, x_hi) = ((cx - r).floor() as i32, (cx + r).ceil() as i32);
    let (y_lo, y_hi) = ((cy - r).floor() as i32, (cy + r).ceil() as i32);
    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/// Thick segment: stamp discs every pixel along a → b.
/// Visual: a round-capped line `2r` pixels wide.
fn stamp_segment(fb: &mut FrameBuffer, a: Point, b: Point, r: f32, color: u32) {
    let dist = a.distance(b);
    let steps = dist.ceil().max(1.0) as i32;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        fill_disc(fb, a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t, r, color);
    }
}

/* ---------- 5x7 bitmap font (digits, A-Z, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap; lowercase letters use the uppercase shape.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b10001,0b01010,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),

        _ => None,
    }
}

/// Fill a `scale`x`scale` block: one font pixel.
fn put_block(fb: &mut FrameBuffer, x: i32, y: i32, scale: i32, color: u32) {
    for by in 0..scale {
        for bx in 0..scale {
            put_pixel(fb, x + bx, y + by, color);
        }
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel `scale` screen pixels wide.
/// Visual: the glyph with a 1-block black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass, then the glyph itself.
        for (offset, c) in [(scale, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_block(fb, x + rx * scale + offset, y + ry as i32 * scale + offset, scale, c);
                    }
                }
            }
        }
    }
}

/// Pixel width of `text` at `scale` (5 px glyph + 1 px spacing per char).
pub fn text_width_5x7(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * 6 * scale
}

/// Draw a text string using 5x7 glyphs.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, scale: i32) {
    let scale = scale.max(1);
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale);
        x += 6 * scale;
    }
}
