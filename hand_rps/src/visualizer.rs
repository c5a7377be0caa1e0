//! Software-rendered game window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────┬───────────────────────┐
//! │                                      │  ROCK PAPER SCISSORS  │
//! │   camera panel                       │  Rounds: [5_]         │
//! │   (hand skeleton overlay)            │  input error          │
//! │                                      │  Your gesture: fist   │
//! │                                      │  Round 2/5  You 1 - 0 │
//! │                                      │  result log …         │
//! │  [hold progress bar]                 │                       │
//! ├──────────────────────────────────────┴───────────────────────┤
//! │  status line / key legend                                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Painting is split from the window: [`paint`] fills a [`FrameBuffer`]
//! from a [`UiView`] snapshot, and [`Visualizer`] only pushes the pixels
//! and reads keys.

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use hand_pose::{Hand, SimPose};
use rps_round::{Move, ResultLog};

use crate::overlay::{blend, draw_hands, Canvas, FrameBuffer, OverlayStyle, AQUA, PLUM};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const PANEL_W:  usize = 360;
pub const STATUS_H: usize = 44;
const MIN_BODY_H:   usize = 480;
const TEXT_SCALE:   usize = 2;
const LINE_H:       usize = 16;
const CHAR_W:       usize = 4 * TEXT_SCALE;
const MARGIN:       usize = 12;

const BG_COLOR:     u32 = 0xFF1A1A2E;
const CAMERA_BG:    u32 = 0xFF101018;
const PANEL_BG:     u32 = 0xFF16213E;
const TEXT_BG:      u32 = 0xFF0F3460;
const TEXT_COLOR:   u32 = 0xFFEEEEEE;
const DIM_COLOR:    u32 = 0xFF888888;
const TITLE_COLOR:  u32 = 0xFFFFD700;
const ERROR_COLOR:  u32 = 0xFFFF6060;
const LOCKED_COLOR: u32 = 0xFF60C060;

/// Pixel geometry of the window, derived from the camera size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub camera_w: usize,
    pub camera_h: usize,
    pub width:    usize,
    pub height:   usize,
}

impl Layout {
    pub fn new(camera_w: usize, camera_h: usize) -> Self {
        let body_h = camera_h.max(MIN_BODY_H);
        Layout {
            camera_w,
            camera_h,
            width:  camera_w + PANEL_W,
            height: body_h + STATUS_H,
        }
    }

    fn panel_x(&self)  -> usize { self.camera_w + MARGIN }
    fn status_y(&self) -> usize { self.height - STATUS_H }
    fn panel_chars(&self) -> usize { (PANEL_W - 2 * MARGIN) / CHAR_W }
}

// ════════════════════════════════════════════════════════════════════════════
// Input
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    /// A character typed into the round-count field.
    RoundChar(char),
    RoundBackspace,
    SubmitRounds,
    /// Keyboard fallback for a move.
    ManualMove(Move),
    /// Simulation: hold up a pose, or lower the hand with `None`.
    ShowPose(Option<SimPose>),
    Quit,
}

/// Key → action.  Unmapped keys give `None`.
pub fn action_for_key(key: Key) -> Option<UiAction> {
    use UiAction::*;
    let digit = |c: char| Some(RoundChar(c));
    match key {
        Key::Key0 | Key::NumPad0 => digit('0'),
        Key::Key1 | Key::NumPad1 => digit('1'),
        Key::Key2 | Key::NumPad2 => digit('2'),
        Key::Key3 | Key::NumPad3 => digit('3'),
        Key::Key4 | Key::NumPad4 => digit('4'),
        Key::Key5 | Key::NumPad5 => digit('5'),
        Key::Key6 | Key::NumPad6 => digit('6'),
        Key::Key7 | Key::NumPad7 => digit('7'),
        Key::Key8 | Key::NumPad8 => digit('8'),
        Key::Key9 | Key::NumPad9 => digit('9'),
        Key::Minus | Key::NumPadMinus => digit('-'),
        Key::Backspace                => Some(RoundBackspace),
        Key::Enter | Key::NumPadEnter => Some(SubmitRounds),

        Key::R => Some(ManualMove(Move::Rock)),
        Key::P => Some(ManualMove(Move::Paper)),
        Key::S => Some(ManualMove(Move::Scissors)),

        Key::F => Some(ShowPose(Some(SimPose::Fist))),
        Key::O => Some(ShowPose(Some(SimPose::Open))),
        Key::V => Some(ShowPose(Some(SimPose::Victory))),
        Key::H => Some(ShowPose(None)),

        Key::Q | Key::Escape => Some(Quit),
        _ => None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UiView — per-frame snapshot of what to show
// ════════════════════════════════════════════════════════════════════════════

pub struct UiView<'a> {
    pub hands:          &'a [Hand],
    pub style:          &'a OverlayStyle,
    pub round_input:    &'a str,
    pub input_locked:   bool,
    pub input_error:    Option<&'a str>,
    pub gesture:        Option<&'a str>,
    /// Hold-to-confirm progress of the current gesture, 0.0–1.0.
    pub hold_progress:  f32,
    pub score_line:     String,
    pub log:            &'a ResultLog,
    pub status:         &'a str,
    pub source_name:    &'a str,
    pub shown_pose:     Option<SimPose>,
}

// ════════════════════════════════════════════════════════════════════════════
// Painting
// ════════════════════════════════════════════════════════════════════════════

/// Paint one complete frame of `view` into `buf`.
pub fn paint(buf: &mut FrameBuffer, layout: &Layout, view: &UiView<'_>) {
    buf.clear(BG_COLOR);
    paint_camera(buf, layout, view);
    paint_panel(buf, layout, view);
    paint_status(buf, layout, view);
}

fn paint_camera(buf: &mut FrameBuffer, layout: &Layout, view: &UiView<'_>) {
    let (w, h) = (layout.camera_w, layout.camera_h);
    buf.fill_rect(0, 0, w, h, CAMERA_BG);

    {
        let mut cam = buf.viewport(0, 0, w, h);
        draw_hands(view.hands, &mut cam, view.style);
        if view.hands.is_empty() {
            let (cx, cy) = (cam.width() as f32 / 2.0, cam.height() as f32 / 2.0);
            cam.fill_circle((cx, cy), 3.0, DIM_COLOR);
        }
    }

    let caption = match view.shown_pose {
        Some(pose) => format!("{}  showing: {}", view.source_name, pose.name()),
        None       => view.source_name.to_string(),
    };
    buf.draw_label(&caption, MARGIN, MARGIN, TEXT_SCALE, DIM_COLOR);

    // Hold bar along the bottom edge of the camera panel
    if view.hold_progress > 0.0 {
        let bar_w = (w.saturating_sub(2 * MARGIN) as f32 * view.hold_progress.min(1.0)) as usize;
        let color = blend(PLUM, AQUA, view.hold_progress);
        buf.fill_rect(MARGIN, h.saturating_sub(MARGIN + 6), bar_w, 6, color);
    }
    buf.draw_border(0, 0, w, h, TEXT_BG);
}

fn paint_panel(buf: &mut FrameBuffer, layout: &Layout, view: &UiView<'_>) {
    let x = layout.panel_x();
    buf.fill_rect(layout.camera_w, 0, PANEL_W, layout.status_y(), PANEL_BG);

    let mut y = MARGIN;
    buf.draw_label("ROCK PAPER SCISSORS", x, y, TEXT_SCALE, TITLE_COLOR);
    y += LINE_H * 2;

    // Round-count field
    let label_end = buf.draw_label("Rounds:", x, y, TEXT_SCALE, TEXT_COLOR);
    let field_x = label_end + CHAR_W;
    let field_w = CHAR_W * 8;
    let (field_bg, field_fg) = if view.input_locked {
        (PANEL_BG, LOCKED_COLOR)
    } else {
        (TEXT_BG, TEXT_COLOR)
    };
    buf.fill_rect(field_x, y - 3, field_w, LINE_H, field_bg);
    buf.draw_border(field_x, y - 3, field_w, LINE_H, field_fg);
    let shown = if view.input_locked {
        view.round_input.to_string()
    } else {
        format!("{}_", view.round_input)
    };
    buf.draw_label(&shown, field_x + 4, y, TEXT_SCALE, field_fg);
    if !view.input_locked {
        buf.draw_label("Enter", field_x + field_w + CHAR_W, y, TEXT_SCALE, DIM_COLOR);
    }
    y += LINE_H + 4;

    if let Some(err) = view.input_error {
        for line in wrap(err, layout.panel_chars()) {
            buf.draw_label(&line, x, y, TEXT_SCALE, ERROR_COLOR);
            y += LINE_H;
        }
    }
    y += LINE_H / 2;

    let gesture = format!("Your gesture: {}", view.gesture.unwrap_or("-"));
    buf.draw_label(&gesture, x, y, TEXT_SCALE, TEXT_COLOR);
    y += LINE_H;
    buf.draw_label(&view.score_line, x, y, TEXT_SCALE, TITLE_COLOR);
    y += LINE_H * 2;

    // Result log, newest at the bottom; drop the oldest when it overflows
    let lines: Vec<String> = view.log.iter()
        .flat_map(|entry| wrap(entry, layout.panel_chars()))
        .collect();
    let room = layout.status_y().saturating_sub(y + MARGIN) / LINE_H;
    let skip = lines.len().saturating_sub(room);
    for line in &lines[skip..] {
        buf.draw_label(line, x, y, TEXT_SCALE, TEXT_COLOR);
        y += LINE_H;
    }
}

fn paint_status(buf: &mut FrameBuffer, layout: &Layout, view: &UiView<'_>) {
    let y = layout.status_y();
    buf.fill_rect(0, y, layout.width, STATUS_H, TEXT_BG);
    buf.draw_label(view.status, MARGIN, y + 6, TEXT_SCALE, TEXT_COLOR);
    buf.draw_label(
        "0-9/Enter=rounds  R/P/S=move  F/O/V=show fist/open/victory  H=hide  Q=quit",
        MARGIN, y + 6 + LINE_H, 1, DIM_COLOR,
    );
}

/// Greedy word wrap to at most `max_chars` per line.  Words longer than a
/// line are split.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line  = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let cut = word.char_indices().nth(max_chars).map_or(word.len(), |(i, _)| i);
            lines.push(word[..cut].to_string());
            word = &word[cut..];
        }
        if word.is_empty() { continue; }

        let needed = if line.is_empty() { word.chars().count() } else { line.chars().count() + 1 + word.chars().count() };
        if needed > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() { line.push(' '); }
        line.push_str(word);
    }
    if !line.is_empty() { lines.push(line); }
    lines
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    FrameBuffer,
    layout: Layout,
}

impl Visualizer {
    pub fn new(camera_w: usize, camera_h: usize) -> Result<Self, String> {
        let layout = Layout::new(camera_w, camera_h);
        let window = Window::new(
            "Hand RPS — rock · paper · scissors",
            layout.width, layout.height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| e.to_string())?;

        log::debug!("window {}x{}", layout.width, layout.height);
        Ok(Visualizer {
            window,
            buf: FrameBuffer::new(layout.width, layout.height, BG_COLOR),
            layout,
        })
    }

    pub fn is_open(&self)  -> bool    { self.window.is_open() }
    pub fn layout(&self)   -> &Layout { &self.layout }

    /// Keys pressed since the last call, as actions.  A closed window reads
    /// as [`UiAction::Quit`].
    pub fn poll_input(&mut self) -> Vec<UiAction> {
        if !self.window.is_open() {
            return vec![UiAction::Quit];
        }
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(action_for_key)
            .collect()
    }

    /// Paint `view` and present it.
    pub fn render(&mut self, view: &UiView<'_>) {
        paint(&mut self.buf, &self.layout, view);
        if let Err(e) = self.window.update_with_buffer(self.buf.pixels(), self.layout.width, self.layout.height) {
            log::warn!("window update failed: {}", e);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::synthesize;

    #[test]
    fn key_mapping() {
        assert_eq!(action_for_key(Key::Key7),     Some(UiAction::RoundChar('7')));
        assert_eq!(action_for_key(Key::NumPad0),  Some(UiAction::RoundChar('0')));
        assert_eq!(action_for_key(Key::Minus),    Some(UiAction::RoundChar('-')));
        assert_eq!(action_for_key(Key::Enter),    Some(UiAction::SubmitRounds));
        assert_eq!(action_for_key(Key::S),        Some(UiAction::ManualMove(Move::Scissors)));
        assert_eq!(action_for_key(Key::V),        Some(UiAction::ShowPose(Some(SimPose::Victory))));
        assert_eq!(action_for_key(Key::H),        Some(UiAction::ShowPose(None)));
        assert_eq!(action_for_key(Key::Escape),   Some(UiAction::Quit));
        assert_eq!(action_for_key(Key::Z),        None);
    }

    #[test]
    fn layout_adds_side_panel_and_status() {
        let l = Layout::new(640, 480);
        assert_eq!((l.width, l.height), (640 + PANEL_W, 480 + STATUS_H));
        let small = Layout::new(320, 240);
        assert_eq!(small.height, MIN_BODY_H + STATUS_H);
    }

    #[test]
    fn wrap_splits_on_words() {
        assert_eq!(wrap("Round 1: You win! rock beats scissors", 16), vec![
            "Round 1: You",
            "win! rock beats",
            "scissors",
        ]);
        assert_eq!(wrap("short", 40), vec!["short"]);
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn wrap_breaks_long_words() {
        assert_eq!(wrap("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
    }

    fn view<'a>(hands: &'a [Hand], style: &'a OverlayStyle, log: &'a ResultLog) -> UiView<'a> {
        UiView {
            hands,
            style,
            round_input:   "5",
            input_locked:  false,
            input_error:   Some("number of rounds must be at least 1, got 0"),
            gesture:       Some("fist"),
            hold_progress: 0.5,
            score_line:    "Set the number of rounds to start".to_string(),
            log,
            status:        "ready",
            source_name:   "keyboard simulation",
            shown_pose:    Some(SimPose::Fist),
        }
    }

    #[test]
    fn paint_draws_overlay_inside_camera_panel() {
        let layout = Layout::new(640, 480);
        let mut buf = FrameBuffer::new(layout.width, layout.height, 0);
        let hands = [synthesize(SimPose::Open, (320.0, 240.0), 1.5, 0)];
        let style = OverlayStyle::default();
        let mut log = ResultLog::new();
        log.push("Round 1: You win! rock beats scissors");

        paint(&mut buf, &layout, &view(&hands, &style, &log));

        let wrist = hands[0].landmarks()[0];
        assert_eq!(buf.pixel(wrist.x as usize, wrist.y as usize), Some(AQUA));
        // side panel never receives overlay colours
        for y in 0..layout.height {
            for x in 640..layout.width {
                let p = buf.pixel(x, y).unwrap();
                assert!(p != AQUA && p != PLUM, "overlay leaked at {},{}", x, y);
            }
        }
    }

    #[test]
    fn paint_without_hands() {
        let layout = Layout::new(640, 480);
        let mut buf = FrameBuffer::new(layout.width, layout.height, 0);
        let style = OverlayStyle::default();
        let log = ResultLog::new();
        paint(&mut buf, &layout, &view(&[], &style, &log));
        assert!(!buf.pixels().iter().any(|&p| p == AQUA));
    }
}
