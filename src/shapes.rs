//! Shape rasterization onto the tile grid.
//!
//! Lines, rectangles and circles stamp a terrain on every covered tile; later calls
//! overwrite earlier ones. Out-of-grid tiles are skipped by the grid itself.

use rand::Rng;

use crate::geometry::{line_to, trig_dist, Point};
use crate::grid::{TileGrid, EDGE};
use crate::seeds::rng;
use crate::terrain::Terrain;

/// Stamp `terrain` along a Bresenham line, both endpoints included.
pub fn line(grid: &mut TileGrid, terrain: Terrain, p1: Point, p2: Point) {
    for p in line_to(p1, p2) {
        grid.set_ter(p, terrain);
    }
}

/// Inclusive rectangle fill; the corners may be given in any order.
pub fn square(grid: &mut TileGrid, terrain: Terrain, p1: Point, p2: Point) {
    for p in rect_points(p1, p2) {
        grid.set_ter(p, terrain);
    }
}

/// Inclusive rectangle fill where each tile's terrain comes from `pick`.
pub fn square_with<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    r: &mut R,
    pick: impl Fn(&mut R) -> Terrain,
    p1: Point,
    p2: Point,
) {
    for p in rect_points(p1, p2) {
        let t = pick(r);
        grid.set_ter(p, t);
    }
}

/// Fill the whole grid.
pub fn fill_background(grid: &mut TileGrid, terrain: Terrain) {
    grid.fill(terrain);
}

/// Fill the whole grid, drawing each tile's terrain from `pick` in row-major order.
pub fn fill_background_with<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    r: &mut R,
    pick: impl Fn(&mut R) -> Terrain,
) {
    square_with(grid, r, pick, Point::new(0, 0), Point::new(EDGE, EDGE));
}

/// Disk of tiles whose rounded distance to `center` is within `radius`.
pub fn circle(grid: &mut TileGrid, terrain: Terrain, center: Point, radius: i32) {
    for p in rect_points(center.offset(-radius, -radius), center.offset(radius, radius)) {
        if trig_dist(center, p) <= radius {
            grid.set_ter(p, terrain);
        }
    }
}

/// Irregular disk: each tile's distance gets a jitter of 0..=2 before the radius test.
pub fn rough_circle<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    r: &mut R,
    terrain: Terrain,
    center: Point,
    radius: i32,
) {
    for p in rect_points(center.offset(-radius, -radius), center.offset(radius, radius)) {
        if trig_dist(center, p) + rng(r, 0, 2) <= radius {
            grid.set_ter(p, terrain);
        }
    }
}

/// Outline of a rectangle: horizontal walls on the top and bottom rows, vertical on the sides.
pub fn walled_box(grid: &mut TileGrid, horizontal: Terrain, vertical: Terrain, p1: Point, p2: Point) {
    let (lo, hi) = normalize(p1, p2);
    line(grid, horizontal, Point::new(lo.x, lo.y), Point::new(hi.x, lo.y));
    line(grid, horizontal, Point::new(lo.x, hi.y), Point::new(hi.x, hi.y));
    line(grid, vertical, Point::new(lo.x, lo.y + 1), Point::new(lo.x, hi.y - 1));
    line(grid, vertical, Point::new(hi.x, lo.y + 1), Point::new(hi.x, hi.y - 1));
}

/// Stamp a block of text rows starting at `origin`. Characters map to terrain through
/// `legend`; characters it does not know are left untouched.
pub fn stamp(grid: &mut TileGrid, origin: Point, rows: &[&str], legend: impl Fn(char) -> Option<Terrain>) {
    for (dy, row) in rows.iter().enumerate() {
        for (dx, c) in row.chars().enumerate() {
            if let Some(t) = legend(c) {
                grid.set_ter(origin.offset(dx as i32, dy as i32), t);
            }
        }
    }
}

pub(crate) fn normalize(p1: Point, p2: Point) -> (Point, Point) {
    (
        Point::new(p1.x.min(p2.x), p1.y.min(p2.y)),
        Point::new(p1.x.max(p2.x), p1.y.max(p2.y)),
    )
}

/// Every point of the inclusive rectangle, row-major.
pub fn rect_points(p1: Point, p2: Point) -> impl Iterator<Item = Point> {
    let (lo, hi) = normalize(p1, p2);
    (lo.y..=hi.y).flat_map(move |y| (lo.x..=hi.x).map(move |x| Point::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_square_is_inclusive_and_order_free() {
        let mut grid = TileGrid::new(0);
        square(&mut grid, Terrain::Floor, Point::new(5, 6), Point::new(2, 3));
        assert_eq!(grid.count_terrain(Terrain::Floor), 4 * 4);
        assert_eq!(grid.ter(Point::new(2, 3)), Terrain::Floor);
        assert_eq!(grid.ter(Point::new(5, 6)), Terrain::Floor);
    }

    #[test]
    fn test_line_stamps_endpoints() {
        let mut grid = TileGrid::new(0);
        line(&mut grid, Terrain::Rock, Point::new(0, 0), Point::new(23, 10));
        assert_eq!(grid.ter(Point::new(0, 0)), Terrain::Rock);
        assert_eq!(grid.ter(Point::new(23, 10)), Terrain::Rock);
    }

    #[test]
    fn test_later_calls_override() {
        let mut grid = TileGrid::new(0);
        square(&mut grid, Terrain::Floor, Point::new(0, 0), Point::new(4, 4));
        line(&mut grid, Terrain::WallH, Point::new(0, 2), Point::new(4, 2));
        assert_eq!(grid.ter(Point::new(2, 2)), Terrain::WallH);
        assert_eq!(grid.ter(Point::new(2, 1)), Terrain::Floor);
    }

    #[test]
    fn test_rough_circle_within_radius() {
        let mut grid = TileGrid::new(0);
        let mut r = ChaCha8Rng::seed_from_u64(9);
        let c = Point::new(12, 12);
        rough_circle(&mut grid, &mut r, Terrain::Lava, c, 5);
        assert_eq!(grid.ter(c), Terrain::Lava);
        for (p, t) in grid.tiles().iter() {
            if t.terrain == Terrain::Lava {
                assert!(trig_dist(c, p) <= 5);
            }
        }
    }

    #[test]
    fn test_shapes_clip_at_edges() {
        let mut grid = TileGrid::new(0);
        circle(&mut grid, Terrain::WaterDeep, Point::new(0, 0), 3);
        assert_eq!(grid.ter(Point::new(0, 0)), Terrain::WaterDeep);
        assert!(grid.count_terrain(Terrain::WaterDeep) < 29);
    }

    #[test]
    fn test_stamp_uses_legend() {
        let mut grid = TileGrid::new(0);
        stamp(&mut grid, Point::new(1, 1), &["|.", "-x"], |c| match c {
            '|' => Some(Terrain::WallV),
            '-' => Some(Terrain::WallH),
            '.' => Some(Terrain::Floor),
            _ => None,
        });
        assert_eq!(grid.ter(Point::new(1, 1)), Terrain::WallV);
        assert_eq!(grid.ter(Point::new(2, 1)), Terrain::Floor);
        assert_eq!(grid.ter(Point::new(2, 2)), Terrain::Null);
    }
}
