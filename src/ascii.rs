//! ASCII rendering of the finished map.
//!
//! One character per tile, with the route and mark drawn on top. Handy for
//! terminals and for eyeballing generator changes without opening the PNG.

use std::collections::HashSet;

use rand::Rng;

use crate::route::TreasureRoute;
use crate::tilemap::{Coord, Tile, Tilemap};

/// Render the map as one string, rows separated by newlines.
///
/// The RNG only drives the occasional `~` shimmer on open water, so pass the
/// decorative stream; the same map may legitimately shimmer differently
/// between prints.
pub fn render_ascii(
    map: &Tilemap<Tile>,
    treasure: Option<&TreasureRoute>,
    rng: &mut impl Rng,
) -> String {
    let on_route: HashSet<Coord> = treasure
        .map(|t| t.route.iter().copied().collect())
        .unwrap_or_default();
    let mark = treasure.map(|t| t.mark);

    let mut out = String::with_capacity(((map.width + 1) * map.height) as usize);
    for y in 0..map.height {
        for x in 0..map.width {
            let c = Coord::new(x, y);
            let ch = if mark == Some(c) {
                'X'
            } else if on_route.contains(&c) {
                '-'
            } else {
                match map.get(c) {
                    Tile::Water => {
                        if rng.gen_range(0..50) < 1 {
                            '~'
                        } else {
                            ' '
                        }
                    }
                    Tile::Sand => '.',
                    Tile::Hill => '^',
                    Tile::Trees => 'T',
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
