//! Landmark overlay and the software raster it draws into.
//!
//! [`draw_hands`] only knows the [`Canvas`] trait, so the same code paints
//! the minifb frame buffer and the recording canvas used in tests.

use hand_pose::{Hand, Landmark, HAND_BONES};

// ════════════════════════════════════════════════════════════════════════════
// Canvas
// ════════════════════════════════════════════════════════════════════════════

/// A 2-D surface in pixel coordinates, origin top-left.
pub trait Canvas {
    fn width(&self)  -> usize;
    fn height(&self) -> usize;
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: u32, width: f32);
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: u32);
}

// ════════════════════════════════════════════════════════════════════════════
// Overlay
// ════════════════════════════════════════════════════════════════════════════

pub const PLUM: u32 = 0xFFDDA0DD;
pub const AQUA: u32 = 0xFF00FFFF;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub line_color:   u32,
    pub line_width:   f32,
    pub joint_color:  u32,
    pub joint_radius: f32,
    /// Flip horizontally, the way a webcam preview is shown.
    pub mirror:       bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        OverlayStyle {
            line_color:   PLUM,
            line_width:   4.0,
            joint_color:  AQUA,
            joint_radius: 5.0,
            mirror:       false,
        }
    }
}

/// How much of the overlay was actually drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayCounts {
    pub lines:  usize,
    pub joints: usize,
}

/// Draw every hand's finger chains and joints.
///
/// Segments come first so the joint dots sit on top.  Points with a
/// non-finite coordinate are left out along with any segment touching them.
pub fn draw_hands<C: Canvas + ?Sized>(hands: &[Hand], canvas: &mut C, style: &OverlayStyle) -> OverlayCounts {
    let mut counts = OverlayCounts::default();
    let width = canvas.width() as f32;

    let place = |lm: &Landmark| -> Option<(f32, f32)> {
        if !lm.is_finite() { return None; }
        let x = if style.mirror { width - lm.x } else { lm.x };
        Some((x, lm.y))
    };

    for hand in hands {
        let pts: Vec<Option<(f32, f32)>> = hand.landmarks().iter().map(place).collect();

        for &(a, b) in HAND_BONES.iter() {
            if let (Some(p), Some(q)) = (pts[a], pts[b]) {
                canvas.stroke_line(p, q, style.line_color, style.line_width);
                counts.lines += 1;
            }
        }
        for p in pts.iter().flatten() {
            canvas.fill_circle(*p, style.joint_radius, style.joint_color);
            counts.joints += 1;
        }
    }
    counts
}

// ════════════════════════════════════════════════════════════════════════════
// FrameBuffer — ARGB raster for minifb
// ════════════════════════════════════════════════════════════════════════════

pub struct FrameBuffer {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        FrameBuffer { width, height, pixels: vec![fill; width * height] }
    }

    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn clear(&mut self, color: u32) { self.pixels.fill(color); }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.pixels[row * self.width + col] = color;
            }
        }
    }

    pub fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        let (x, y) = (x as isize, y as isize);
        let (r, b) = (x + w as isize - 1, y + h as isize - 1);
        for col in x..=r {
            self.set_pixel(col, y, color);
            self.set_pixel(col, b, color);
        }
        for row in y..=b {
            self.set_pixel(x, row, color);
            self.set_pixel(r, row, color);
        }
    }

    /// 3×5 bitmap text, each font pixel drawn as a `scale`×`scale` block.
    /// Returns the x just past the last character.
    pub fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) -> usize {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            if cx + 3 * scale > self.width { break; }
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
        }
        cx
    }

    /// A clipped window onto `w × h` pixels at `(x, y)`.
    pub fn viewport(&mut self, x: usize, y: usize, w: usize, h: usize) -> Viewport<'_> {
        let w = w.min(self.width.saturating_sub(x));
        let h = h.min(self.height.saturating_sub(y));
        Viewport { buf: self, x, y, w, h }
    }

    fn fill_disc(&mut self, cx: f32, cy: f32, r: f32, color: u32, clip: (usize, usize, usize, usize)) {
        let (x0, y0, w, h) = clip;
        let r = r.max(0.75);
        let min_x = ((cx - r).floor() as isize).max(x0 as isize);
        let max_x = ((cx + r).ceil()  as isize).min((x0 + w) as isize - 1);
        let min_y = ((cy - r).floor() as isize).max(y0 as isize);
        let max_y = ((cy + r).ceil()  as isize).min((y0 + h) as isize - 1);
        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(px, py, color);
                }
            }
        }
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: u32, width: f32, clip: (usize, usize, usize, usize)) {
        let r = width / 2.0;
        let Some((from, to)) = clip_segment(from, to, clip, r.max(0.75) + 1.0) else {
            return;
        };
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.fill_disc(from.0 + dx * t, from.1 + dy * t, r, color, clip);
        }
    }
}

/// Liang–Barsky clip of a segment to `clip` grown by `margin` on every side.
/// `None` when the segment misses the rectangle or has a non-finite end.
fn clip_segment(
    from:   (f32, f32),
    to:     (f32, f32),
    clip:   (usize, usize, usize, usize),
    margin: f32,
) -> Option<((f32, f32), (f32, f32))> {
    if !(from.0.is_finite() && from.1.is_finite() && to.0.is_finite() && to.1.is_finite()) {
        return None;
    }
    // f64 keeps the clipped ends exact when the far end is very distant
    let (x0, y0, w, h) = clip;
    let m = margin as f64;
    let (min_x, min_y) = (x0 as f64 - m, y0 as f64 - m);
    let (max_x, max_y) = ((x0 + w) as f64 + m, (y0 + h) as f64 + m);
    let (fx, fy) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - fx, to.1 as f64 - fy);

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, fx - min_x), (dx, max_x - fx), (-dy, fy - min_y), (dy, max_y - fy)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 { return None; }
            t0 = t0.max(t);
        } else {
            if t < t0 { return None; }
            t1 = t1.min(t);
        }
    }
    let at = |t: f64| ((fx + dx * t) as f32, (fy + dy * t) as f32);
    Some((at(t0), at(t1)))
}

impl Canvas for FrameBuffer {
    fn width(&self)  -> usize { self.width }
    fn height(&self) -> usize { self.height }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: u32, width: f32) {
        let clip = (0, 0, self.width, self.height);
        self.line(from, to, color, width, clip);
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: u32) {
        let clip = (0, 0, self.width, self.height);
        self.fill_disc(center.0, center.1, radius, color, clip);
    }
}

/// Sub-rectangle of a [`FrameBuffer`] with its own origin.  Nothing drawn
/// through it lands outside the rectangle.
pub struct Viewport<'a> {
    buf: &'a mut FrameBuffer,
    x:   usize,
    y:   usize,
    w:   usize,
    h:   usize,
}

impl Canvas for Viewport<'_> {
    fn width(&self)  -> usize { self.w }
    fn height(&self) -> usize { self.h }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: u32, width: f32) {
        let (ox, oy) = (self.x as f32, self.y as f32);
        let clip = (self.x, self.y, self.w, self.h);
        self.buf.line((from.0 + ox, from.1 + oy), (to.0 + ox, to.1 + oy), color, width, clip);
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: u32) {
        let clip = (self.x, self.y, self.w, self.h);
        self.buf.fill_disc(center.0 + self.x as f32, center.1 + self.y as f32, radius, color, clip);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b011, 0b000, 0b010],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '[' => [0b011, 0b010, 0b010, 0b010, 0b011],
        ']' => [0b110, 0b010, 0b010, 0b010, 0b110],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '|' => [0b010, 0b010, 0b010, 0b010, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
