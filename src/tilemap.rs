use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A bounded 2D grid. Unlike a world map it does not wrap: out-of-range
/// reads return `None` and out-of-range writes are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Tilemap<T> {
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.in_bounds(p) {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|idx| &self.data[idx])
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        match self.index(p) {
            Some(idx) => Some(&mut self.data[idx]),
            None => None,
        }
    }

    /// Set a value; returns false when `p` is outside the map.
    pub fn set(&mut self, p: Point, value: T) -> bool {
        match self.index(p) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Orthogonal neighbors that lie inside the map.
    pub fn neighbors(&self, p: Point) -> Vec<Point> {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .iter()
            .map(|&(dx, dy)| p.offset(dx, dy))
            .filter(|n| self.in_bounds(*n))
            .collect()
    }

    /// All positions in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width;
        (0..self.data.len()).map(move |idx| Point::new((idx % width) as i32, (idx / width) as i32))
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            (Point::new((idx % width) as i32, (idx / width) as i32), val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Point, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            (Point::new((idx % width) as i32, (idx / width) as i32), val)
        })
    }

    /// Build a new map of the same size where each cell is produced from a source position.
    /// Used for whole-grid permutations such as rotation.
    pub fn remap(&self, mut source_of: impl FnMut(Point) -> Point) -> Self
    where
        T: Clone,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for idx in 0..self.data.len() {
            let dst = Point::new((idx % self.width) as i32, (idx / self.width) as i32);
            let src = source_of(dst);
            let src_idx = self.index(src).unwrap_or(idx);
            data.push(self.data[src_idx].clone());
        }
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_checked_access() {
        let mut map: Tilemap<u8> = Tilemap::new(4, 3);
        assert!(map.set(Point::new(3, 2), 7));
        assert!(!map.set(Point::new(4, 0), 1));
        assert!(!map.set(Point::new(-1, 0), 1));
        assert_eq!(map.get(Point::new(3, 2)), Some(&7));
        assert_eq!(map.get(Point::new(0, 3)), None);
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let map: Tilemap<u8> = Tilemap::new(4, 4);
        assert_eq!(map.neighbors(Point::new(0, 0)).len(), 2);
        assert_eq!(map.neighbors(Point::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_remap_transposes() {
        let mut map: Tilemap<u8> = Tilemap::new(2, 2);
        map.set(Point::new(1, 0), 5);
        let t = map.remap(|p| Point::new(p.y, p.x));
        assert_eq!(t.get(Point::new(0, 1)), Some(&5));
        assert_eq!(t.get(Point::new(1, 0)), Some(&0));
    }
}
