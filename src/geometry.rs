//! Points, compass directions and distance helpers on the cell grid.

use serde::{Deserialize, Serialize};

use crate::grid::SUBMAP_SIZE;

/// A tile position in grid coordinates (0,0 is the north-west corner, y grows south).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Index of the submap (quadrant) that owns this point: `qx + 2 * qy`.
    pub fn submap_index(self) -> usize {
        let qx = (self.x.max(0) as usize) / SUBMAP_SIZE;
        let qy = (self.y.max(0) as usize) / SUBMAP_SIZE;
        qx.min(1) + 2 * qy.min(1)
    }

    /// Coordinates relative to the owning submap.
    pub fn local(self) -> Point {
        let s = SUBMAP_SIZE as i32;
        Point::new(self.x.rem_euclid(s), self.y.rem_euclid(s))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions in clockwise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn from_index(idx: usize) -> Direction {
        Self::ALL[idx % 4]
    }

    pub fn opposite(self) -> Direction {
        self.rotated(2)
    }

    /// Rotate clockwise by `turns` quarter turns.
    pub fn rotated(self, turns: u8) -> Direction {
        Self::from_index(self.index() + turns as usize)
    }

    /// Unit step towards this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::East => 'e',
            Direction::South => 's',
            Direction::West => 'w',
        }
    }
}

/// Chebyshev distance (king moves).
pub fn rl_dist(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Euclidean distance rounded to the nearest tile.
pub fn trig_dist(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt().round() as i32
}

/// Bresenham line from `a` to `b`, both endpoints included.
pub fn line_to(a: Point, b: Point) -> Vec<Point> {
    let mut points = Vec::new();
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (a.x, a.y);

    loop {
        points.push(Point::new(x, y));
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submap_index_and_local() {
        assert_eq!(Point::new(0, 0).submap_index(), 0);
        assert_eq!(Point::new(12, 0).submap_index(), 1);
        assert_eq!(Point::new(3, 15).submap_index(), 2);
        assert_eq!(Point::new(23, 23).submap_index(), 3);
        assert_eq!(Point::new(13, 22).local(), Point::new(1, 10));
    }

    #[test]
    fn test_direction_rotation() {
        assert_eq!(Direction::North.rotated(1), Direction::East);
        assert_eq!(Direction::West.rotated(1), Direction::North);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn test_line_includes_endpoints() {
        let pts = line_to(Point::new(2, 3), Point::new(9, 5));
        assert_eq!(pts.first(), Some(&Point::new(2, 3)));
        assert_eq!(pts.last(), Some(&Point::new(9, 5)));
        assert_eq!(pts.len(), 8);
        let single = line_to(Point::new(4, 4), Point::new(4, 4));
        assert_eq!(single, vec![Point::new(4, 4)]);
    }

    #[test]
    fn test_distances() {
        assert_eq!(rl_dist(Point::new(0, 0), Point::new(3, 5)), 5);
        assert_eq!(trig_dist(Point::new(0, 0), Point::new(3, 4)), 5);
    }
}
