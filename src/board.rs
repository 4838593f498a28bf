//! Reversi board model: tiles, colours, grid coordinates and legal-move search.
//!
//! Boards are stored as a flat row-major grid that includes a one-cell wall
//! border, which is also the layout used on the wire. Playable cells therefore
//! live at `1..=width` / `1..=height` in grid coordinates.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::config::BOARD_SIZE;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Player colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The opposing colour.
    pub fn reverse(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Occupancy of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Empty,
    Black,
    White,
    Wall,
}

impl From<Color> for Tile {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Tile::Black,
            Color::White => Tile::White,
        }
    }
}

/// Cell coordinates in board (grid) space, wall border included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Errors returned when rebuilding a board from its serialized tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Tile sequence does not match the grid dimensions.
    LengthMismatch { expected: usize, actual: usize },
    /// Playable area must be at least 2×2 to hold the opening.
    TooSmall { width: usize, height: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::LengthMismatch { expected, actual } => {
                write!(f, "expected {} tiles, got {}", expected, actual)
            }
            BoardError::TooSmall { width, height } => {
                write!(f, "board {}x{} is too small", width, height)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// A rectangular board surrounded by a one-cell wall border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Standard 8×8 board with the four opening tiles in the centre.
    pub fn new() -> Self {
        Self::with_size(BOARD_SIZE, BOARD_SIZE)
    }

    /// Board with the given playable size and the centre opening.
    ///
    /// Sizes below 2×2 are clamped up so the opening always fits.
    pub fn with_size(width: usize, height: usize) -> Self {
        let width = width.max(2);
        let height = height.max(2);
        let grid_w = width + 2;
        let grid_h = height + 2;
        let mut tiles = vec![Tile::Empty; grid_w * grid_h];
        wall_border(&mut tiles, grid_w, grid_h);
        let hx = width / 2;
        let hy = height / 2;
        tiles[hy * grid_w + hx] = Tile::White;
        tiles[hy * grid_w + hx + 1] = Tile::Black;
        tiles[(hy + 1) * grid_w + hx] = Tile::Black;
        tiles[(hy + 1) * grid_w + hx + 1] = Tile::White;
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Rebuild a board from a flat row-major tile sequence including the
    /// wall border. Border cells always become walls.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<Tile>) -> Result<Self, BoardError> {
        if width < 2 || height < 2 {
            return Err(BoardError::TooSmall { width, height });
        }
        let grid_w = width + 2;
        let grid_h = height + 2;
        let expected = grid_w * grid_h;
        if tiles.len() != expected {
            return Err(BoardError::LengthMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        let mut tiles = tiles;
        wall_border(&mut tiles, grid_w, grid_h);
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Board from the playable cells only, row-major, without the wall
    /// border. The border is added here.
    pub fn from_interior(width: usize, height: usize, interior: Vec<Tile>) -> Result<Self, BoardError> {
        if width < 2 || height < 2 {
            return Err(BoardError::TooSmall { width, height });
        }
        if interior.len() != width * height {
            return Err(BoardError::LengthMismatch {
                expected: width * height,
                actual: interior.len(),
            });
        }
        let grid_w = width + 2;
        let mut tiles = vec![Tile::Wall; grid_w * (height + 2)];
        for (i, tile) in interior.into_iter().enumerate() {
            tiles[(i / width + 1) * grid_w + i % width + 1] = tile;
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Playable width (wall border excluded).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Playable height (wall border excluded).
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn grid_width(&self) -> usize {
        self.width + 2
    }

    pub fn grid_height(&self) -> usize {
        self.height + 2
    }

    /// Row-major tiles, wall border included.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at `point`, or `None` outside the grid.
    pub fn get(&self, point: Point) -> Option<Tile> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x >= self.grid_width() || y >= self.grid_height() {
            return None;
        }
        Some(self.tiles[y * self.grid_width() + x])
    }

    /// Iterate every grid cell in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        let grid_w = self.grid_width();
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let point = Point::new((i % grid_w) as i32, (i / grid_w) as i32);
            (point, *tile)
        })
    }

    /// Number of tiles owned by `color`. Walls and empty cells never count.
    pub fn count(&self, color: Color) -> usize {
        let wanted = Tile::from(color);
        self.tiles.iter().filter(|t| **t == wanted).count()
    }

    /// Whether `color` may legally place a tile at `point`.
    pub fn can_put(&self, point: Point, color: Color) -> bool {
        if self.get(point) != Some(Tile::Empty) {
            return false;
        }
        let me = Tile::from(color);
        let opp = Tile::from(color.reverse());
        DIRECTIONS.iter().any(|(dx, dy)| {
            let mut cursor = Point::new(point.x + dx, point.y + dy);
            let mut seen_opponent = false;
            loop {
                match self.get(cursor) {
                    Some(t) if t == opp => seen_opponent = true,
                    Some(t) if t == me => return seen_opponent,
                    _ => return false,
                }
                cursor = Point::new(cursor.x + dx, cursor.y + dy);
            }
        })
    }

    /// Every cell where `color` may legally play, in row-major order.
    pub fn points_to_put(&self, color: Color) -> Vec<Point> {
        self.points()
            .filter(|(p, tile)| *tile == Tile::Empty && self.can_put(*p, color))
            .map(|(p, _)| p)
            .collect()
    }
}

fn wall_border(tiles: &mut [Tile], grid_w: usize, grid_h: usize) {
    for y in 0..grid_h {
        for x in 0..grid_w {
            if x == 0 || y == 0 || x == grid_w - 1 || y == grid_h - 1 {
                tiles[y * grid_w + x] = Tile::Wall;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_has_two_tiles_each() {
        let board = Board::new();
        assert_eq!(board.count(Color::Black), 2);
        assert_eq!(board.count(Color::White), 2);
        assert_eq!(board.tiles().len(), 100);
    }

    #[test]
    fn opening_moves_for_black() {
        let board = Board::new();
        let moves = board.points_to_put(Color::Black);
        assert_eq!(
            moves,
            vec![
                Point::new(4, 3),
                Point::new(3, 4),
                Point::new(6, 5),
                Point::new(5, 6)
            ]
        );
    }

    #[test]
    fn walls_are_never_playable() {
        let board = Board::new();
        assert!(!board.can_put(Point::new(0, 0), Color::Black));
        assert_eq!(board.get(Point::new(9, 4)), Some(Tile::Wall));
        assert_eq!(board.get(Point::new(10, 4)), None);
        assert_eq!(board.get(Point::new(-1, 4)), None);
    }

    #[test]
    fn from_tiles_forces_wall_border() {
        let tiles = vec![Tile::Black; 100];
        let board = Board::from_tiles(8, 8, tiles).unwrap();
        assert_eq!(board.count(Color::Black), 64);
        assert_eq!(board.get(Point::new(0, 5)), Some(Tile::Wall));
    }

    #[test]
    fn from_tiles_rejects_wrong_length() {
        let err = Board::from_tiles(8, 8, vec![Tile::Empty; 64]).unwrap_err();
        assert_eq!(
            err,
            BoardError::LengthMismatch {
                expected: 100,
                actual: 64
            }
        );
    }

    #[test]
    fn from_interior_wraps_cells_in_walls() {
        let mut interior = vec![Tile::Empty; 64];
        interior[0] = Tile::Black;
        interior[63] = Tile::White;
        let board = Board::from_interior(8, 8, interior).unwrap();
        assert_eq!(board.tiles().len(), 100);
        assert_eq!(board.get(Point::new(1, 1)), Some(Tile::Black));
        assert_eq!(board.get(Point::new(8, 8)), Some(Tile::White));
        assert_eq!(board.get(Point::new(0, 0)), Some(Tile::Wall));
        assert_eq!(board.get(Point::new(9, 4)), Some(Tile::Wall));
        assert!(Board::from_interior(8, 8, vec![Tile::Empty; 100]).is_err());
    }

    #[test]
    fn reverse_is_an_involution() {
        assert_eq!(Color::Black.reverse(), Color::White);
        assert_eq!(Color::White.reverse().reverse(), Color::White);
    }
}
