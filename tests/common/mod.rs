#![allow(dead_code)]

use reversi_client::{
    Board, Canvas, Color, Mode, Player, Point, ServerMessage, SessionMachine, SessionState,
    Snapshot, TextAlign, Rgba,
};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Rect { x: f32, y: f32, w: f32, h: f32, color: Rgba },
    Stroke { x: f32, y: f32, w: f32, h: f32, color: Rgba },
    Circle { cx: f32, cy: f32, r: f32, color: Rgba },
    Text { text: String, x: f32, y: f32, size: f32, color: Rgba },
}

/// Canvas that records calls instead of drawing.
pub struct RecordingCanvas {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_color(&self, wanted: &str) -> Option<Rgba> {
        self.ops.iter().find_map(|op| match op {
            Op::Text { text, color, .. } if text == wanted => Some(*color),
            _ => None,
        })
    }

    /// Circles drawn with partial opacity, i.e. legal-move hints.
    pub fn translucent_circles(&self) -> Vec<(f32, f32, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Circle { cx, cy, color, .. } if color.a < 1.0 => Some((*cx, *cy, color.a)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.ops.push(Op::Rect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba, _line_width: f32) {
        self.ops.push(Op::Stroke { x, y, w, h, color });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgba) {
        self.ops.push(Op::Circle { cx, cy, r, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, _align: TextAlign, color: Rgba) {
        self.ops.push(Op::Text { text: text.to_string(), x, y, size, color });
    }
}

pub fn opening_tiles() -> Vec<reversi_client::Tile> {
    Board::new().tiles().to_vec()
}

/// Events of a freshly paired game: A plays black and moves first.
pub fn active_game_events(mode: Mode) -> Vec<ServerMessage> {
    vec![
        ServerMessage::Ok,
        ServerMessage::State(SessionState::Active),
        ServerMessage::Mode(mode),
        ServerMessage::Board(opening_tiles()),
        ServerMessage::Me(Player::new("A", Color::Black)),
        ServerMessage::Enemy(Player::new("B", Color::White)),
        ServerMessage::Turn(Color::Black),
    ]
}

pub fn active_snapshot(mode: Mode) -> Snapshot {
    let mut machine = SessionMachine::new();
    for event in active_game_events(mode) {
        machine.apply(event);
    }
    machine.snapshot().clone()
}

/// Surface centre of a board cell on a 640x480 surface with 40px tiles.
pub fn cell_center(point: Point) -> (f32, f32) {
    (120.0 + 40.0 * point.x as f32 + 20.0, 40.0 + 40.0 * point.y as f32 + 20.0)
}
