mod common;

use std::sync::Arc;

use common::{active_snapshot, cell_center};
use reversi_client::render::{self, IntervalTicker, Surface, BACKGROUND};
use reversi_client::{
    BoardView, Canvas, FrameBuffer, Mode, Pixel, Point, Pointer, PointerSample, Rgba, Snapshot,
    TextAlign, TILE_SIZE,
};
use tokio::sync::watch;
use tokio::time::Duration;

/// Off-screen surface replaying a fixed list of pointer samples, one per frame.
struct ScriptedSurface {
    frame: FrameBuffer,
    script: Vec<PointerSample>,
    presented: usize,
}

impl ScriptedSurface {
    fn new(script: Vec<PointerSample>) -> Self {
        Self {
            frame: FrameBuffer::new(640, 480),
            script,
            presented: 0,
        }
    }

    fn current(&self) -> PointerSample {
        self.script.get(self.presented).copied().unwrap_or_default()
    }
}

impl Canvas for ScriptedSurface {
    fn size(&self) -> (f32, f32) {
        self.frame.size()
    }
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.frame.fill_rect(x, y, w, h, color)
    }
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba, line_width: f32) {
        self.frame.stroke_rect(x, y, w, h, color, line_width)
    }
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        self.frame.fill_circle(cx, cy, radius, color)
    }
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign, color: Rgba) {
        self.frame.fill_text(text, x, y, size, align, color)
    }
}

impl Pointer for ScriptedSurface {
    fn cursor(&self) -> Option<Pixel> {
        self.current().cursor
    }
    fn primary_down(&self) -> bool {
        self.current().down
    }
}

impl Surface for ScriptedSurface {
    fn present(&mut self) -> anyhow::Result<()> {
        self.presented += 1;
        Ok(())
    }
    fn is_open(&self) -> bool {
        self.presented < self.script.len()
    }
}

fn over(point: Point, down: bool) -> PointerSample {
    let (x, y) = cell_center(point);
    PointerSample {
        cursor: Some(Pixel::new(x, y)),
        down,
    }
}

#[tokio::test]
async fn loop_forwards_one_move_per_click() -> anyhow::Result<()> {
    let target = Point::new(4, 3);
    let (_tx, rx) = watch::channel(Arc::new(active_snapshot(Mode::Player)));
    let mut surface = ScriptedSurface::new(vec![
        over(target, false),
        over(target, true),
        over(target, true),
        over(target, false),
    ]);
    let mut view = BoardView::new(TILE_SIZE);
    let mut ticker = IntervalTicker::new(Duration::from_millis(1));

    let mut puts = Vec::new();
    render::run(&mut view, &mut surface, &mut ticker, &rx, |p| puts.push(p)).await?;

    assert_eq!(surface.presented, 4);
    assert_eq!(puts, vec![target]);
    Ok(())
}

#[tokio::test]
async fn loop_picks_up_new_snapshots() -> anyhow::Result<()> {
    let (tx, rx) = watch::channel(Arc::new(Snapshot::default()));
    let mut surface = ScriptedSurface::new(vec![PointerSample::default(); 1]);
    let mut view = BoardView::new(TILE_SIZE);
    let mut ticker = IntervalTicker::new(Duration::from_millis(1));

    render::run(&mut view, &mut surface, &mut ticker, &rx, |_| {}).await?;
    // connecting screen: background plus a status line
    let background = surface.frame.pixel(0, 0);

    tx.send_replace(Arc::new(active_snapshot(Mode::Player)));
    surface.script.push(PointerSample::default());
    render::run(&mut view, &mut surface, &mut ticker, &rx, |_| {}).await?;

    assert_eq!(background, surface.frame.pixel(0, 0));
    // a black opening tile now sits on cell (5, 4)
    let (x, y) = cell_center(Point::new(5, 4));
    assert_eq!(surface.frame.pixel(x as usize, y as usize), Some(0));
    assert_ne!(surface.frame.pixel(x as usize, y as usize), background);
    assert_eq!(background, Some(reversi_client::framebuffer::pack(BACKGROUND)));
    Ok(())
}
