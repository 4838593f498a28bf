//! Frame-driven board renderer and pointer hit-testing.
//!
//! The drawing target is abstracted into three capabilities: [`Canvas`]
//! (draw primitives), [`Pointer`] (cursor and primary button sampling) and
//! [`Ticker`] (frame scheduling). [`BoardView::frame`] paints one frame from
//! a snapshot and returns the cell the local player committed to, if any.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::board::{Board, Color, Point, Tile};
use crate::domain::{GameResult, Player, SessionState};
use crate::session::Snapshot;

/// Straight-alpha colour, `a` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => BLACK,
            Color::White => WHITE,
        }
    }
}

pub const BACKGROUND: Rgba = Rgba::rgb(0x2a, 0x92, 0x2a);
pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
pub const LAST_MOVE: Rgba = Rgba::rgb(255, 0, 0);
pub const BANNER: Rgba = Rgba::rgb(255, 255, 0);
pub const DIM: Rgba = Rgba::rgba(0, 0, 0, 0.5);

const HINT_ALPHA: f32 = 0.3;
const HOVER_ALPHA: f32 = 0.5;

/// A position in surface (pixel) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub x: f32,
    pub y: f32,
}

impl Pixel {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Pixel) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Drawing primitives of a render target. `y` of text is its baseline.
pub trait Canvas {
    fn size(&self) -> (f32, f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba, line_width: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign, color: Rgba);
}

/// Pointer sampling. Reports level state; edges are derived by [`ButtonEdge`].
pub trait Pointer {
    fn cursor(&self) -> Option<Pixel>;
    fn primary_down(&self) -> bool;
}

/// Pointer state captured once, so a surface can be drawn on while its
/// input is being consulted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub cursor: Option<Pixel>,
    pub down: bool,
}

impl PointerSample {
    pub fn of<P: Pointer + ?Sized>(pointer: &P) -> Self {
        Self {
            cursor: pointer.cursor(),
            down: pointer.primary_down(),
        }
    }
}

impl Pointer for PointerSample {
    fn cursor(&self) -> Option<Pixel> {
        self.cursor
    }

    fn primary_down(&self) -> bool {
        self.down
    }
}

/// Turns a level-triggered button into press edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdge {
    was_down: bool,
}

impl ButtonEdge {
    /// Feed the current level; returns `true` only on the up-to-down transition.
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}

/// Pixel placement of a board grid on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub origin: Pixel,
    pub tile_size: f32,
    pub tile_radius: f32,
}

impl Geometry {
    /// Centre a `grid_w`×`grid_h` grid on a surface of the given size.
    pub fn centered(surface: (f32, f32), grid_w: usize, grid_h: usize, tile_size: f32) -> Self {
        let (w, h) = surface;
        Self {
            origin: Pixel::new(
                w / 2.0 - grid_w as f32 * tile_size / 2.0,
                h / 2.0 - grid_h as f32 * tile_size / 2.0,
            ),
            tile_size,
            tile_radius: tile_size / 2.8,
        }
    }

    /// Top-left corner of a cell.
    pub fn cell_origin(&self, point: Point) -> Pixel {
        Pixel::new(
            self.origin.x + point.x as f32 * self.tile_size,
            self.origin.y + point.y as f32 * self.tile_size,
        )
    }

    pub fn cell_center(&self, point: Point) -> Pixel {
        let o = self.cell_origin(point);
        Pixel::new(o.x + self.tile_size / 2.0, o.y + self.tile_size / 2.0)
    }

    /// Whether `cursor` lies within the disc drawn on `point`.
    pub fn hovers(&self, point: Point, cursor: Option<Pixel>) -> bool {
        cursor.is_some_and(|c| self.cell_center(point).distance(c) <= self.tile_radius)
    }
}

/// Stateful board renderer. Holds only presentation state (button edges);
/// all game data comes from the snapshot handed to each frame.
#[derive(Debug, Clone)]
pub struct BoardView {
    tile_size: f32,
    button: ButtonEdge,
}

impl BoardView {
    pub fn new(tile_size: f32) -> Self {
        Self {
            tile_size,
            button: ButtonEdge::default(),
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Paint one frame and resolve pointer input.
    ///
    /// Returns the cell to play when the local player pressed the primary
    /// button this frame over a legal cell of their own turn.
    pub fn frame<C, P>(&mut self, canvas: &mut C, pointer: &P, snapshot: Option<&Snapshot>) -> Option<Point>
    where
        C: Canvas + ?Sized,
        P: Pointer + ?Sized,
    {
        // Sample every frame so a button held before the board shows up
        // does not register as a fresh press later.
        let mut pressed = self.button.update(pointer.primary_down());
        let cursor = pointer.cursor();

        let (w, h) = canvas.size();
        canvas.fill_rect(0.0, 0.0, w, h, BACKGROUND);

        let snapshot = snapshot?;
        if let Some(message) = status_message(snapshot.state) {
            canvas.fill_text(message, w / 2.0, h / 2.0, 24.0, TextAlign::Center, WHITE);
            return None;
        }
        let scene = snapshot.scene()?;

        let turn_player = scene.player(scene.turn);
        canvas.fill_text(
            &format!("{}'s turn", turn_player.nickname),
            w / 2.0,
            48.0,
            32.0,
            TextAlign::Center,
            scene.turn.into(),
        );
        draw_player_state(canvas, scene.board, scene.me, true, 80.0, h / 2.0);
        draw_player_state(canvas, scene.board, scene.enemy, false, w - 80.0, h / 2.0);

        let board = scene.board;
        let geometry = Geometry::centered((w, h), board.grid_width(), board.grid_height(), self.tile_size);
        let radius = geometry.tile_radius;
        let show_hints = !scene.is_over();
        let legal = if show_hints {
            board.points_to_put(scene.turn)
        } else {
            Vec::new()
        };
        let mut committed = None;

        for (point, tile) in board.points() {
            if tile == Tile::Wall {
                continue;
            }
            let corner = geometry.cell_origin(point);
            let center = geometry.cell_center(point);

            canvas.stroke_rect(corner.x, corner.y, self.tile_size, self.tile_size, BLACK, 2.0);

            match tile {
                Tile::Black => canvas.fill_circle(center.x, center.y, radius, BLACK),
                Tile::White => canvas.fill_circle(center.x, center.y, radius, WHITE),
                Tile::Empty | Tile::Wall => {}
            }

            if scene.last_move == Some(point) {
                canvas.fill_circle(center.x, center.y, radius / 4.0, LAST_MOVE);
            }

            if legal.contains(&point) {
                let hover = geometry.hovers(point, cursor);
                let alpha = if hover { HOVER_ALPHA } else { HINT_ALPHA };
                canvas.fill_circle(center.x, center.y, radius, Rgba::from(scene.turn).with_alpha(alpha));

                if hover && pressed && scene.accepts_input() {
                    committed = Some(point);
                    pressed = false;
                }
            }

            if (point.x == 3 || point.x == 7) && (point.y == 3 || point.y == 7) {
                canvas.fill_circle(corner.x, corner.y, 3.0, BLACK);
            }
        }

        if let Some(result) = scene.result {
            canvas.fill_rect(0.0, 0.0, w, h, DIM);
            let banner = match result {
                GameResult::Draw => String::from("Draw!"),
                GameResult::Win(color) => format!("{} win!", scene.player(color).nickname),
            };
            canvas.fill_text(&banner, w / 2.0, h / 2.0 - 64.0, 48.0, TextAlign::Center, BANNER);
        }

        committed
    }
}

/// Tile-count swatch, nickname and role label for one player.
fn draw_player_state<C: Canvas + ?Sized>(canvas: &mut C, board: &Board, player: &Player, is_me: bool, x: f32, y: f32) {
    let color = player.color;
    canvas.fill_circle(x, y - 16.0, 32.0, color.into());
    canvas.fill_text(
        &format!("{}", board.count(color)),
        x,
        y - 8.0,
        26.0,
        TextAlign::Center,
        color.reverse().into(),
    );
    canvas.fill_text(&player.nickname, x, y + 48.0, 24.0, TextAlign::Center, color.into());
    let label = if is_me { "(you)" } else { "(enemy)" };
    canvas.fill_text(label, x, y + 80.0, 18.0, TextAlign::Center, color.into());
}

/// Centred message shown instead of the board outside `active` and `finished`.
pub fn status_message(state: SessionState) -> Option<&'static str> {
    match state {
        SessionState::Connecting => Some("Connecting..."),
        SessionState::Waiting => Some("Waiting for other player..."),
        SessionState::Removed => Some("Deleted from connection. Please reload this page."),
        SessionState::Active | SessionState::Finished => None,
    }
}

#[cfg(feature = "std")]
pub use self::driver::{run, IntervalTicker, Surface, Ticker};

#[cfg(feature = "std")]
mod driver {
    use std::sync::Arc;

    use log::{debug, info};
    use tokio::sync::watch;
    use tokio::time::{interval, Duration, Interval, MissedTickBehavior};

    use super::{BoardView, Canvas, Pointer, PointerSample};
    use crate::board::Point;
    use crate::session::Snapshot;

    /// Frame scheduling: resolves once per frame.
    #[async_trait::async_trait]
    pub trait Ticker: Send {
        async fn tick(&mut self);
    }

    /// Fixed-period ticker; late frames are skipped rather than bunched.
    pub struct IntervalTicker {
        interval: Interval,
    }

    impl IntervalTicker {
        pub fn new(period: Duration) -> Self {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            Self { interval }
        }
    }

    #[async_trait::async_trait]
    impl Ticker for IntervalTicker {
        async fn tick(&mut self) {
            self.interval.tick().await;
        }
    }

    /// A native drawing target with pointer input.
    pub trait Surface: Canvas + Pointer {
        /// Show the frame drawn since the last call and pump input events.
        fn present(&mut self) -> anyhow::Result<()>;
        fn is_open(&self) -> bool;
    }

    /// Drive `view` once per tick until the surface closes.
    ///
    /// Each frame reads exactly one snapshot from the slot, so a frame never
    /// mixes fields from two different server updates.
    pub async fn run<S, T, F>(
        view: &mut BoardView,
        surface: &mut S,
        ticker: &mut T,
        snapshots: &watch::Receiver<Arc<Snapshot>>,
        mut on_put: F,
    ) -> anyhow::Result<()>
    where
        S: Surface + ?Sized,
        T: Ticker + ?Sized,
        F: FnMut(Point),
    {
        info!("render loop started");
        let mut frames: u64 = 0;
        while surface.is_open() {
            ticker.tick().await;
            let snapshot: Arc<Snapshot> = snapshots.borrow().clone();
            let sample = PointerSample::of(&*surface);
            if let Some(point) = view.frame(surface, &sample, Some(snapshot.as_ref())) {
                debug!("committing move at ({}, {})", point.x, point.y);
                on_put(point);
            }
            surface.present()?;
            frames += 1;
        }
        info!("render loop stopped after {} frames", frames);
        Ok(())
    }
}
