//! Tile grid, coordinates and the shared cardinal direction table.

use std::ops::Add;

/// One grid location of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Water,
    Sand,
    Trees,
    Hill,
}

impl Tile {
    /// Terrain code consumed by the corner codec and the tile renderer.
    /// The values come from the tile atlas the map was originally drawn with;
    /// the only load-bearing property is that Water differs from everything else.
    pub fn terrain_code(self) -> u8 {
        match self {
            Tile::Water => 4,
            Tile::Sand => 8,
            Tile::Trees => 2,
            Tile::Hill => 0,
        }
    }

    pub fn is_water(self) -> bool {
        self == Tile::Water
    }

    pub fn is_land(self) -> bool {
        self != Tile::Water
    }
}

/// An (x, y) grid coordinate. Also doubles as a direction vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Taxicab distance to another coordinate.
    pub fn grid_dist(self, other: Coord) -> i32 {
        (other.x - self.x).abs() + (other.y - self.y).abs()
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// The four cardinal directions: west, north, east, south.
///
/// This cyclic ordering is shared by neighbor enumeration, the route walk
/// and turn classification. `DIRS[(i + 3) % 4]` is a left turn relative to
/// `DIRS[i]` and `DIRS[(i + 1) % 4]` a right turn (y grows downward).
pub const DIRS: [Coord; 4] = [
    Coord { x: -1, y: 0 },
    Coord { x: 0, y: -1 },
    Coord { x: 1, y: 0 },
    Coord { x: 0, y: 1 },
];

/// A fixed-size 2D grid stored as a flat row-major buffer.
#[derive(Clone, PartialEq)]
pub struct Tilemap<T> {
    pub width: i32,
    pub height: i32,
    data: Vec<T>,
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: i32, height: i32, value: T) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        Self {
            width,
            height,
            data: vec![value; (width * height) as usize],
        }
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.width && c.y < self.height
    }

    fn index(&self, c: Coord) -> usize {
        assert!(
            self.in_bounds(c),
            "coordinate ({}, {}) out of bounds for {}x{} map",
            c.x,
            c.y,
            self.width,
            self.height
        );
        (c.y * self.width + c.x) as usize
    }

    pub fn get(&self, c: Coord) -> &T {
        &self.data[self.index(c)]
    }

    pub fn set(&mut self, c: Coord, value: T) {
        let idx = self.index(c);
        self.data[idx] = value;
    }

    /// In-bounds 4-connected neighbors of `c`, in `DIRS` order.
    pub fn neighbors(&self, c: Coord) -> Vec<Coord> {
        let mut result = Vec::with_capacity(4);
        for d in DIRS {
            let n = c + d;
            if self.in_bounds(n) {
                result.push(n);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_math() {
        let a = Coord::new(2, 3);
        let b = Coord::new(5, 1);
        assert_eq!(a.grid_dist(b), 5);
        assert_eq!(a + Coord::new(-1, 0), Coord::new(1, 3));
    }

    #[test]
    fn neighbors_follow_dir_order() {
        let map = Tilemap::new_with(5, 5, Tile::Water);
        let n = map.neighbors(Coord::new(2, 2));
        assert_eq!(
            n,
            vec![
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(3, 2),
                Coord::new(2, 3)
            ]
        );
    }

    #[test]
    fn neighbors_trimmed_at_corner() {
        let map = Tilemap::new_with(4, 4, Tile::Water);
        let n = map.neighbors(Coord::new(0, 0));
        // West and north fall outside; east then south remain, in table order.
        assert_eq!(n, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn get_set_roundtrip() {
        let mut map = Tilemap::new_with(3, 3, Tile::Water);
        map.set(Coord::new(1, 2), Tile::Hill);
        assert_eq!(*map.get(Coord::new(1, 2)), Tile::Hill);
        assert_eq!(*map.get(Coord::new(0, 0)), Tile::Water);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        let map = Tilemap::new_with(3, 3, Tile::Water);
        map.get(Coord::new(3, 0));
    }

    #[test]
    fn terrain_codes_distinguish_water() {
        for t in [Tile::Sand, Tile::Trees, Tile::Hill] {
            assert_ne!(t.terrain_code(), Tile::Water.terrain_code());
        }
    }
}
