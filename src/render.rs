//! PNG rendering of the map, route and mark.
//!
//! A flat-color stand-in for the original hand-drawn tile atlas: each tile
//! is painted per quadrant from its corner signature, hills and trees get
//! simple markers with a little placement jitter, and the route is drawn as
//! a dashed red line ending in a red X. All randomness here is decorative;
//! two renders of the same map may differ in jitter but never in terrain.

use image::{Rgb, RgbImage};
use rand::Rng;

use crate::corners::corner_signature;
use crate::route::TreasureRoute;
use crate::tilemap::{Coord, Tile, Tilemap};

const WATER_COLOR: Rgb<u8> = Rgb([61, 120, 172]);
const SAND_COLOR: Rgb<u8> = Rgb([219, 194, 142]);
const HILL_COLOR: Rgb<u8> = Rgb([139, 110, 75]);
const TREE_COLOR: Rgb<u8> = Rgb([44, 110, 56]);
const ROUTE_COLOR: Rgb<u8> = Rgb([200, 30, 30]);

/// Render the map to an image of `tile_size` pixels per grid cell.
pub fn render_map(
    map: &Tilemap<Tile>,
    treasure: Option<&TreasureRoute>,
    tile_size: u32,
    rng: &mut impl Rng,
) -> RgbImage {
    let ts = tile_size.max(2) as i32;
    let mut img = RgbImage::new((map.width * ts) as u32, (map.height * ts) as u32);

    // Base terrain. Each tile represents the half-integer point between four
    // grid samples, so its quadrants are colored from the corner signature.
    for y in 0..map.height {
        for x in 0..map.width {
            let codes = corner_signature(map, x, y);
            paint_quadrant(&mut img, x * ts, y * ts, ts, 0, codes[0]);
            paint_quadrant(&mut img, x * ts, y * ts, ts, 1, codes[1]);
            paint_quadrant(&mut img, x * ts, y * ts, ts, 2, codes[2]);
            paint_quadrant(&mut img, x * ts, y * ts, ts, 3, codes[3]);
        }
    }

    // Hill and tree markers. Grid sample (x, y) sits visually at pixel
    // (x*ts, y*ts), a half tile off the tile block painted above.
    for y in 0..map.height {
        for x in 0..map.width {
            let c = Coord::new(x, y);
            let tile = *map.get(c);
            if tile != Tile::Hill && tile != Tile::Trees {
                continue;
            }

            draw_marker(&mut img, tile, x * ts + jitter(rng, ts), y * ts + jitter(rng, ts), ts);

            // Thicken interior clusters with a second marker, like the
            // original doubles up away from the shore.
            let interior = [Coord::new(x + 1, y), Coord::new(x, y + 1), Coord::new(x + 1, y + 1)]
                .iter()
                .all(|n| map.in_bounds(*n) && map.get(*n).is_land());
            if interior {
                draw_marker(
                    &mut img,
                    tile,
                    x * ts + ts / 2 + jitter(rng, ts),
                    y * ts + ts / 2 + jitter(rng, ts),
                    ts,
                );
            }
        }
    }

    if let Some(t) = treasure {
        for pair in t.route.windows(2) {
            draw_dashed_line(
                &mut img,
                pair[0].x * ts,
                pair[0].y * ts,
                pair[1].x * ts,
                pair[1].y * ts,
            );
        }
        draw_x(&mut img, t.mark.x * ts, t.mark.y * ts, ts / 2);
    }

    img
}

fn jitter(rng: &mut impl Rng, ts: i32) -> i32 {
    let j = (ts / 4).max(1);
    rng.gen_range(-j..=j)
}

/// Paint one quadrant of the tile block at (px, py). Quadrants follow the
/// corner signature order: top-left, top-right, bottom-left, bottom-right.
fn paint_quadrant(img: &mut RgbImage, px: i32, py: i32, ts: i32, quadrant: usize, code: u8) {
    let color = if code == Tile::Water.terrain_code() {
        WATER_COLOR
    } else {
        SAND_COLOR
    };
    let half = ts / 2;
    let ox = if quadrant % 2 == 1 { half } else { 0 };
    let oy = if quadrant >= 2 { half } else { 0 };
    let w = if quadrant % 2 == 1 { ts - half } else { half };
    let h = if quadrant >= 2 { ts - half } else { half };
    for dy in 0..h {
        for dx in 0..w {
            put_pixel(img, px + ox + dx, py + oy + dy, color);
        }
    }
}

fn draw_marker(img: &mut RgbImage, tile: Tile, cx: i32, cy: i32, ts: i32) {
    let r = (ts / 4).max(1);
    match tile {
        Tile::Hill => {
            // Upward triangle.
            for dy in 0..r * 2 {
                let half_row = dy * r / (r * 2).max(1) + 1;
                for dx in -half_row..=half_row {
                    put_pixel(img, cx + dx, cy - r + dy, HILL_COLOR);
                }
            }
        }
        Tile::Trees => {
            // Canopy disc over a short trunk.
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy <= r * r {
                        put_pixel(img, cx + dx, cy + dy - r / 2, TREE_COLOR);
                    }
                }
            }
            for dy in 0..r {
                put_pixel(img, cx, cy + dy, HILL_COLOR);
            }
        }
        _ => {}
    }
}

/// Bresenham line with a dash pattern.
fn draw_dashed_line(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    let mut step = 0;

    loop {
        if (step / 4) % 2 == 0 {
            put_pixel(img, x, y, ROUTE_COLOR);
            put_pixel(img, x + 1, y, ROUTE_COLOR);
            put_pixel(img, x, y + 1, ROUTE_COLOR);
        }
        if x == x1 && y == y1 {
            break;
        }
        step += 1;
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
}

/// A thick red X centered at (cx, cy) with arms of length `arm`.
fn draw_x(img: &mut RgbImage, cx: i32, cy: i32, arm: i32) {
    let arm = arm.max(2);
    for d in -arm..=arm {
        for t in -1..=1 {
            put_pixel(img, cx + d + t, cy + d, ROUTE_COLOR);
            put_pixel(img, cx + d + t, cy - d, ROUTE_COLOR);
        }
    }
}

fn put_pixel(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}
