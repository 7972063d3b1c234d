//! Treasure placement and route finding.
//!
//! The treasure mark is sampled onto the landmass under the map center, then
//! a self-avoiding drunken walk is grown outward from the mark until it gets
//! far enough away and reaches the coast. The walk is retried from scratch
//! when it corners itself; exhausting all retries degrades to an empty route
//! rather than failing the map.

use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;
use thiserror::Error;

use crate::connectivity::{connected, Barrier};
use crate::generate::random_spot;
use crate::tilemap::{Coord, Tile, Tilemap, DIRS};

/// Random coordinate samples allowed when placing the mark.
const MARK_SAMPLES: u32 = 1000;
/// Fresh walks attempted before giving up on a route.
const MAX_ROUTE_ATTEMPTS: u32 = 1000;
/// Step proposals per walk attempt.
const MAX_STEPS: u32 = 1000;
/// Consecutive rejected proposals before a walk is abandoned.
const MAX_CONSECUTIVE_REJECTS: u32 = 20;
/// Chance to discard a valid step anyway, which keeps the path winding.
const WANDER_CHANCE: f64 = 0.5;

/// A placed treasure and the walking route to it.
///
/// `route` runs from the coastal arrival cell to the mark, each element one
/// cardinal step from its predecessor, no cell visited twice. `route_dirs`
/// holds one direction per edge in the same order, each still pointing the
/// way it was walked outward from the mark: `route[i + 1] + route_dirs[i]`
/// is `route[i]`. Both are empty when no acceptable route was found, in
/// which case the mark still stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreasureRoute {
    pub mark: Coord,
    pub route: Vec<Coord>,
    pub route_dirs: Vec<Coord>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The map center sits on water, so there is no main landmass to use.
    #[error("map center is on water, no main landmass")]
    NoLandmass,
    /// No valid treasure cell was found within the sample budget.
    #[error("no treasure spot found after {MARK_SAMPLES} samples")]
    MarkNotFound,
}

/// Place the mark and grow a route to the coast.
///
/// A failed route search is not an error: the caller gets the mark with an
/// empty route and may regenerate with another seed or accept the map as is.
pub fn find_route(map: &Tilemap<Tile>, rng: &mut impl Rng) -> Result<TreasureRoute, RouteError> {
    // Assume the center cell sits on the biggest blob of land. It usually
    // does; when it doesn't, the map simply has no usable main island.
    let center = Coord::new(map.width / 2, map.height / 2);
    let main = connected(map, center, Barrier::Water);
    if main.is_empty() {
        return Err(RouteError::NoLandmass);
    }

    let mut mark = None;
    for _ in 0..MARK_SAMPLES {
        let c = random_spot(map, rng);
        if main.contains(&c) && map.get(c).is_land() {
            mark = Some(c);
            break;
        }
    }
    let mark = mark.ok_or(RouteError::MarkNotFound)?;

    // Ending far enough from the mark keeps the hunt interesting; ending by
    // the water models arrival by boat.
    let min_span = (((map.width * map.height) as f64).sqrt() / 3.0) as i32;

    let mut route = Vec::new();
    let mut route_dirs = Vec::new();
    let mut visited = HashSet::new();

    for attempt in 0..MAX_ROUTE_ATTEMPTS {
        route.clear();
        route_dirs.clear();
        visited.clear();
        route.push(mark);
        visited.insert(mark);

        let mut cur = mark;
        let mut dir = random_dir(rng);
        let mut rejects = 0;

        for _ in 0..MAX_STEPS {
            let next = cur + dir;
            let blocked = !map.in_bounds(next)
                || map.get(next).is_water()
                || visited.contains(&next)
                || rng.gen_bool(WANDER_CHANCE);
            if blocked {
                dir = random_dir(rng);
                rejects += 1;
                if rejects > MAX_CONSECUTIVE_REJECTS {
                    break;
                }
                continue;
            }

            cur = next;
            route.push(next);
            visited.insert(next);
            route_dirs.push(dir);
            rejects = 0;
        }

        let reaches_coast = map.neighbors(cur).iter().any(|n| map.get(*n).is_water());
        if cur.grid_dist(mark) >= min_span && reaches_coast {
            debug!("route accepted on attempt {} ({} steps)", attempt + 1, route.len());
            route.reverse();
            route_dirs.reverse();
            return Ok(TreasureRoute {
                mark,
                route,
                route_dirs,
            });
        }
    }

    warn!(
        "no acceptable route after {} attempts, leaving the route empty",
        MAX_ROUTE_ATTEMPTS
    );
    Ok(TreasureRoute {
        mark,
        route: Vec::new(),
        route_dirs: Vec::new(),
    })
}

/// Choose a random cardinal direction from the shared table.
fn random_dir(rng: &mut impl Rng) -> Coord {
    DIRS[rng.gen_range(0..DIRS.len())]
}
