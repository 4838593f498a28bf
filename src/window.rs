//! Native window front-end on top of `minifb`.

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use crate::client::{SessionClient, SnapshotReceiver};
use crate::config::{ClientConfig, SURFACE_HEIGHT, SURFACE_WIDTH, TILE_SIZE};
use crate::framebuffer::FrameBuffer;
use crate::render::{self, BoardView, Canvas, IntervalTicker, Pixel, Pointer, Rgba, Surface, TextAlign};

/// A minifb window backed by a software frame buffer.
pub struct WindowSurface {
    window: Window,
    frame: FrameBuffer,
}

impl WindowSurface {
    pub fn open(title: &str, width: usize, height: usize) -> anyhow::Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| anyhow::anyhow!("unable to open window: {e}"))?;
        // frame pacing comes from the render ticker
        window.set_target_fps(0);
        Ok(Self {
            window,
            frame: FrameBuffer::new(width, height),
        })
    }
}

impl Canvas for WindowSurface {
    fn size(&self) -> (f32, f32) {
        self.frame.size()
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.frame.fill_rect(x, y, w, h, color);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba, line_width: f32) {
        self.frame.stroke_rect(x, y, w, h, color, line_width);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        self.frame.fill_circle(cx, cy, radius, color);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign, color: Rgba) {
        self.frame.fill_text(text, x, y, size, align, color);
    }
}

impl Pointer for WindowSurface {
    fn cursor(&self) -> Option<Pixel> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Pixel::new(x, y))
    }

    fn primary_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

impl Surface for WindowSurface {
    fn present(&mut self) -> anyhow::Result<()> {
        self.window
            .update_with_buffer(self.frame.pixels(), self.frame.width(), self.frame.height())
            .map_err(|e| anyhow::anyhow!("failed to present frame: {e}"))
    }

    fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }
}

/// Open a window and render the session until it is closed.
pub async fn play(client: &SessionClient, snapshots: &SnapshotReceiver, config: &ClientConfig) -> anyhow::Result<()> {
    let mut surface = WindowSurface::open("Reversi - ESC to exit", SURFACE_WIDTH, SURFACE_HEIGHT)?;
    let mut view = BoardView::new(TILE_SIZE);
    let mut ticker = IntervalTicker::new(config.frame_period);
    render::run(&mut view, &mut surface, &mut ticker, snapshots, |point| {
        client.submit_move(point)
    })
    .await
}
