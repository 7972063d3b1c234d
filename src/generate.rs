//! Island terrain generation.
//!
//! The island is built in passes over a single grid: recursive subdivision
//! stamps rectangles and ellipses that get exponentially more likely to be
//! water with depth, a guaranteed ellipse of sand anchors the map center,
//! the border is forced to water, the coast is roughened, enclosed lakes are
//! filled in, and hill/tree blobs are grown from random seeds. Everything is
//! driven by one generative RNG, so a fixed seed reproduces the grid exactly.

use rand::Rng;

use crate::connectivity::{connected, Barrier};
use crate::tilemap::{Coord, Tile, Tilemap};

/// Chance that a subdivision stamp below the root is water.
const DEEP_WATER_CHANCE: f64 = 0.75;
/// Chance that a coastal cell with 1-2 water neighbors erodes away.
const ROUGHEN_CHANCE: f64 = 0.3;
/// Chance that blob growth claims an adjacent sand cell.
const BLOB_SPREAD_CHANCE: f64 = 0.2;
/// Iterations of frontier growth per hill/tree seed.
const BLOB_GROWTH_ROUNDS: usize = 10;

/// Generate a complete island map.
pub fn generate_island(width: i32, height: i32, rng: &mut impl Rng) -> Tilemap<Tile> {
    let mut map = Tilemap::new_with(width, height, Tile::Water);

    subdivide(&mut map, rng, 0, 0, width, height, 0);

    // Make sure some island exists in the exact middle; the route finder
    // treats the landmass under the center cell as the main island.
    fill_ellipse(
        &mut map,
        width / 2 - width / 6,
        height / 2 - height / 6,
        width / 3,
        height / 3,
        Tile::Sand,
    );

    // Border with water, one cell thick.
    fill_rect(&mut map, 0, 0, width, 1, Tile::Water);
    fill_rect(&mut map, 0, height - 1, width, 1, Tile::Water);
    fill_rect(&mut map, 0, 0, 1, height, Tile::Water);
    fill_rect(&mut map, width - 1, 0, 1, height, Tile::Water);

    roughen_coast(&mut map, rng);
    remove_inland_lakes(&mut map);
    seed_hill_trees(&mut map, rng);

    map
}

/// Stamp a rectangle or ellipse centered in the region, then recurse into
/// four randomly sized quarters. The stamp is sand at the root; deeper
/// stamps are water three times out of four, which fragments the outskirts
/// into small islands.
fn subdivide(map: &mut Tilemap<Tile>, rng: &mut impl Rng, x: i32, y: i32, w: i32, h: i32, depth: u32) {
    let mut fill = Tile::Sand;
    if depth > 0 && rng.gen_bool(DEEP_WATER_CHANCE) {
        fill = Tile::Water;
    }

    if rng.gen_bool(0.5) {
        fill_rect(map, x + w / 4, y + h / 4, w / 2, h / 2, fill);
    } else {
        fill_ellipse(map, x + w / 4, y + h / 4, w / 2, h / 2, fill);
    }

    if w > 3 && h > 3 {
        let ww = w / 3 + rng.gen_range(0..w / 3);
        let hh = h / 3 + rng.gen_range(0..h / 3);
        subdivide(map, rng, x, y, ww, hh, depth + 1);
        subdivide(map, rng, x + ww, y, w - ww, hh, depth + 1);
        subdivide(map, rng, x, y + hh, ww, h - hh, depth + 1);
        subdivide(map, rng, x + ww, y + hh, w - ww, h - hh, depth + 1);
    }
}

/// Fill a rectangular area, clipped to the map.
fn fill_rect(map: &mut Tilemap<Tile>, x: i32, y: i32, w: i32, h: i32, tile: Tile) {
    for x1 in x..x + w {
        for y1 in y..y + h {
            let c = Coord::new(x1, y1);
            if map.in_bounds(c) {
                map.set(c, tile);
            }
        }
    }
}

/// Fill the ellipse inscribed in the given area, clipped to the map.
fn fill_ellipse(map: &mut Tilemap<Tile>, x: i32, y: i32, w: i32, h: i32, tile: Tile) {
    let rx = w / 2;
    for x1 in -rx..rx {
        let ry = (((rx * rx - x1 * x1) as f64).sqrt() + 0.5) as i32 * h / w;
        let x2 = x + rx + x1;
        for y1 in -ry..ry {
            let c = Coord::new(x2, y + h / 2 + y1);
            if map.in_bounds(c) {
                map.set(c, tile);
            }
        }
    }
}

/// The stamped shapes are a little too geometric; randomly erode land that
/// touches water. Cells with three or more water neighbors are thin
/// peninsulas that erosion would only disconnect, so they are left alone.
fn roughen_coast(map: &mut Tilemap<Tile>, rng: &mut impl Rng) {
    for y in 0..map.height {
        for x in 0..map.width {
            let c = Coord::new(x, y);
            if map.get(c).is_land() {
                let waters = map
                    .neighbors(c)
                    .iter()
                    .filter(|n| map.get(**n).is_water())
                    .count();
                if waters > 0 && waters < 3 && rng.gen_bool(ROUGHEN_CHANCE) {
                    map.set(c, Tile::Water);
                }
            }
        }
    }
}

/// Islands typically don't hold inland water: any water cell unreachable
/// from the surrounding sea becomes sand. The corner (0, 0) is guaranteed
/// water by border forcing and seeds the sea fill.
fn remove_inland_lakes(map: &mut Tilemap<Tile>) {
    let sea = connected(map, Coord::new(0, 0), Barrier::Land);
    for y in 0..map.height {
        for x in 0..map.width {
            let c = Coord::new(x, y);
            if map.get(c).is_water() && !sea.contains(&c) {
                map.set(c, Tile::Sand);
            }
        }
    }
}

/// Scatter hill and tree blobs over the sand.
///
/// Roughly sqrt(W*H) random cells are tried as seeds; each seed that lands
/// on sand flips to hills or trees with equal chance, then grows outward by
/// repeatedly pulling a random cell off its frontier and claiming adjacent
/// sand. Blobs never overwrite water or each other, so seeds are expanded
/// in discovery order.
fn seed_hill_trees(map: &mut Tilemap<Tile>, rng: &mut impl Rng) {
    let tries = ((map.width * map.height) as f64).sqrt().ceil() as i32;

    let mut seeds = Vec::new();
    for _ in 0..tries {
        let c = random_spot(map, rng);
        if *map.get(c) == Tile::Sand {
            let kind = if rng.gen_bool(0.5) {
                Tile::Trees
            } else {
                Tile::Hill
            };
            map.set(c, kind);
            seeds.push(c);
        }
    }

    for seed in seeds {
        let kind = *map.get(seed);
        let mut frontier = vec![seed];
        for _ in 0..BLOB_GROWTH_ROUNDS {
            if frontier.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..frontier.len());
            let c = frontier.swap_remove(idx);
            for n in map.neighbors(c) {
                if rng.gen_bool(BLOB_SPREAD_CHANCE) && *map.get(n) == Tile::Sand {
                    map.set(n, kind);
                    frontier.push(n);
                }
            }
        }
    }
}

/// A uniformly random in-bounds coordinate.
pub fn random_spot(map: &Tilemap<Tile>, rng: &mut impl Rng) -> Coord {
    Coord::new(rng.gen_range(0..map.width), rng.gen_range(0..map.height))
}
