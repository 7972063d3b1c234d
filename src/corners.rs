//! Corner signatures for edge-blended tile rendering.
//!
//! Each rendered tile is treated as centered on the half-integer point
//! (x + 0.5, y + 0.5), so its look is decided by the four surrounding lattice
//! cells. Every sample collapses to water or sand; trees and hills only ever
//! sit on land, so water/land is the only blend a shoreline sprite needs.
//! The renderer picks a marching-squares style sprite from the signature.

use crate::tilemap::{Coord, Tile, Tilemap};

/// Corner sample offsets relative to a cell, in signature order.
pub const CORNER_OFFSETS: [Coord; 4] = [
    Coord { x: 0, y: 0 },
    Coord { x: 1, y: 0 },
    Coord { x: 0, y: 1 },
    Coord { x: 1, y: 1 },
];

/// The four corner terrain codes for the tile at (x, y).
///
/// Samples outside the grid always read as water, so the map fades into
/// open sea at its edges.
pub fn corner_signature(map: &Tilemap<Tile>, x: i32, y: i32) -> [u8; 4] {
    let mut out = [Tile::Water.terrain_code(); 4];
    for (i, off) in CORNER_OFFSETS.iter().enumerate() {
        let c = Coord::new(x + off.x, y + off.y);
        if map.in_bounds(c) && map.get(c).is_land() {
            out[i] = Tile::Sand.terrain_code();
        }
    }
    out
}
