//! Plain-text front-end: prints snapshots and reads moves from stdin.

use std::fmt::Write as _;

use crate::board::{Board, Color, Point, Tile};
use crate::domain::{GameResult, Mode};
use crate::render::status_message;
use crate::session::Snapshot;

fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Empty => '.',
        Tile::Black => 'X',
        Tile::White => 'O',
        Tile::Wall => '#',
    }
}

fn color_char(color: Color) -> char {
    tile_char(color.into())
}

/// Playable area as text, columns labelled `a`..`h` and rows `1`..`8`.
///
/// Legal cells are shown as `*`; the last move is wrapped in brackets.
pub fn board_text(board: &Board, legal: &[Point], last_move: Option<Point>) -> String {
    let mut out = String::from("   ");
    for x in 1..=board.width() {
        let _ = write!(out, " {} ", (b'a' + (x - 1) as u8) as char);
    }
    out.push('\n');
    for y in 1..=board.height() {
        let _ = write!(out, "{:2} ", y);
        for x in 1..=board.width() {
            let point = Point::new(x as i32, y as i32);
            let tile = board.get(point).unwrap_or(Tile::Wall);
            let ch = if tile == Tile::Empty && legal.contains(&point) {
                '*'
            } else {
                tile_char(tile)
            };
            if last_move == Some(point) {
                let _ = write!(out, "[{ch}]");
            } else {
                let _ = write!(out, " {ch} ");
            }
        }
        out.push('\n');
    }
    out
}

/// Full console view of one snapshot. Mirrors what the window draws.
pub fn snapshot_text(snapshot: &Snapshot) -> String {
    if let Some(message) = status_message(snapshot.state) {
        return format!("{message}\n");
    }
    let Some(scene) = snapshot.scene() else {
        return String::new();
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}'s turn ({})",
        scene.player(scene.turn).nickname,
        color_char(scene.turn)
    );
    for (player, label) in [(scene.me, "you"), (scene.enemy, "enemy")] {
        let _ = writeln!(
            out,
            "  {} {:<10} ({}) {:>2}",
            color_char(player.color),
            player.nickname,
            label,
            scene.board.count(player.color)
        );
    }

    let legal = if scene.accepts_input() {
        scene.board.points_to_put(scene.turn)
    } else {
        Vec::new()
    };
    out.push_str(&board_text(scene.board, &legal, scene.last_move));

    match scene.result {
        Some(GameResult::Draw) => out.push_str("Draw!\n"),
        Some(GameResult::Win(color)) => {
            let _ = writeln!(out, "{} win!", scene.player(color).nickname);
        }
        None if scene.mode == Mode::Watcher => out.push_str("(watching)\n"),
        None if scene.accepts_input() => out.push_str("Your move (e.g. d3): "),
        None => {}
    }
    out
}

/// Parse a move such as `d3` or `D3` into board coordinates.
pub fn parse_move(input: &str, board: &Board) -> Option<Point> {
    let input = input.trim();
    let mut chars = input.chars();
    let col = chars.next()?.to_ascii_lowercase();
    if !col.is_ascii_lowercase() {
        return None;
    }
    let x = (col as u8 - b'a') as usize + 1;
    let y: usize = chars.as_str().parse().ok()?;
    if (1..=board.width()).contains(&x) && (1..=board.height()).contains(&y) {
        Some(Point::new(x as i32, y as i32))
    } else {
        None
    }
}
