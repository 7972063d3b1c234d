//! Connectivity analysis over the tile grid.
//!
//! A single breadth-first flood fill serves both callers: landmass detection
//! (barrier = water) and open-sea detection for lake removal (barrier = land).

use std::collections::{HashSet, VecDeque};

use crate::tilemap::{Coord, Tile, Tilemap};

/// Which tile class blocks the flood fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Barrier {
    /// Water blocks; the fill collects a landmass.
    Water,
    /// Land blocks; the fill collects a connected body of water.
    Land,
}

impl Barrier {
    fn blocks(self, tile: Tile) -> bool {
        match self {
            Barrier::Water => tile.is_water(),
            Barrier::Land => tile.is_land(),
        }
    }
}

/// All cells reachable from `start` via 4-connected steps without crossing
/// the barrier class. Starting on a barrier cell yields an empty set, which
/// distinguishes "nothing here" from an error.
pub fn connected(map: &Tilemap<Tile>, start: Coord, barrier: Barrier) -> HashSet<Coord> {
    let mut conn = HashSet::new();
    if barrier.blocks(*map.get(start)) {
        return conn;
    }

    // Queue is bounded by the cell count; visited membership lives in `conn`.
    let mut queue = VecDeque::new();
    queue.push_back(start);
    conn.insert(start);

    while let Some(c) = queue.pop_front() {
        for n in map.neighbors(c) {
            if !barrier.blocks(*map.get(n)) && !conn.contains(&n) {
                conn.insert(n);
                queue.push_back(n);
            }
        }
    }

    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from_rows(rows: &[&str]) -> Tilemap<Tile> {
        let mut map = Tilemap::new_with(rows[0].len() as i32, rows.len() as i32, Tile::Water);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '.' => Tile::Sand,
                    '^' => Tile::Hill,
                    'T' => Tile::Trees,
                    _ => Tile::Water,
                };
                map.set(Coord::new(x as i32, y as i32), tile);
            }
        }
        map
    }

    #[test]
    fn finds_whole_landmass_across_tile_kinds() {
        let map = map_from_rows(&[
            "     ", //
            " .^  ", //
            " T.  ", //
            "     ",
        ]);
        let conn = connected(&map, Coord::new(1, 1), Barrier::Water);
        assert_eq!(conn.len(), 4);
        assert!(conn.contains(&Coord::new(2, 2)));
    }

    #[test]
    fn separate_islands_stay_separate() {
        let map = map_from_rows(&[
            ".    ", //
            "     ", //
            "   ..",
        ]);
        let conn = connected(&map, Coord::new(0, 0), Barrier::Water);
        assert_eq!(conn.len(), 1);
        assert!(!conn.contains(&Coord::new(3, 2)));
    }

    #[test]
    fn start_on_barrier_is_empty() {
        let map = map_from_rows(&["  ", ". "]);
        assert!(connected(&map, Coord::new(0, 0), Barrier::Water).is_empty());
        assert!(connected(&map, Coord::new(0, 1), Barrier::Land).is_empty());
    }

    #[test]
    fn water_fill_stops_at_land_ring() {
        // Water pocket at (2,2) is walled off from the outside water.
        let map = map_from_rows(&[
            "     ", //
            " ... ", //
            " . . ", //
            " ... ", //
            "     ",
        ]);
        let sea = connected(&map, Coord::new(0, 0), Barrier::Land);
        assert!(!sea.contains(&Coord::new(2, 2)));
        assert_eq!(sea.len(), 16);
    }
}
