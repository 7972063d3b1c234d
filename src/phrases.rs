//! Template grammar and turn-by-turn route narration.
//!
//! Directions are narrated in pirate-map English: a rule maps to a list of
//! alternative productions separated by `|`, a production may reference
//! other rules with `$name` tokens, and expansion recurses until no tokens
//! remain. The narration itself walks the route's direction list and calls
//! out every left or right turn with a phrase for the terrain it happens on.

use std::collections::HashMap;

use log::warn;
use rand::Rng;

use crate::route::TreasureRoute;
use crate::tilemap::{Coord, Tile, Tilemap, DIRS};

/// Rule table. Alternatives split on `|`; repeating an alternative is a poor
/// man's probability weight.
const RULES: &[(&str, &str)] = &[
    (
        "tree",
        "at the $treedesc tree|at the tree shaped like $animal|at the tree with a $animal painted on",
    ),
    ("treedesc", "burned|blighted|charred|split"),
    ("animal", "monkey|tiger|lion|parrot"),
    ("sand", "$stone|$stone|$stone|$wreck"),
    (
        "stone",
        "at the $color stone|at the stone that looks like a $animal|at the stone with $number scratch marks|at the stone marked with a $mark",
    ),
    ("color", "white|black|red|yellow"),
    ("number", "two|three|four|five"),
    ("wreck", "at the old shack|at the broken shack|at the old post"),
    ("hill", "through the $valleydesc valley|through the $cavedesc cave"),
    ("valleydesc", "bright|dark|mossy|windy"),
    ("cavedesc", "bright|dark|mossy|windy"),
    ("mark", "sun|moon|star|flower|heart|$animal"),
    (
        "start",
        "at $wreck|at the sunken boat|at the seaweed jungle|at the old turtle nest|at the shady cove",
    ),
];

/// A context-free template grammar with uniformly chosen alternatives.
pub struct Grammar {
    rules: HashMap<&'static str, Vec<&'static str>>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    pub fn new() -> Self {
        let mut rules = HashMap::new();
        for (name, rhs) in RULES {
            rules.insert(*name, rhs.split('|').map(str::trim).collect());
        }
        Self { rules }
    }

    /// Expand a rule to a literal string, recursively substituting every
    /// `$name` token. An unknown rule logs and expands to `"[]"` so a typo
    /// in one production cannot sink the whole narration.
    pub fn expand(&self, rule: &str, rng: &mut impl Rng) -> String {
        let Some(alternatives) = self.rules.get(rule) else {
            warn!("no production for grammar rule '{}'", rule);
            return "[]".to_string();
        };
        let chosen = alternatives[rng.gen_range(0..alternatives.len())];

        let mut out = String::with_capacity(chosen.len());
        let mut rest = chosen;
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos + 1..];
            let end = tail
                .find(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
                .unwrap_or(tail.len());
            out.push_str(&self.expand(&tail[..end], rng));
            rest = &tail[end..];
        }
        out.push_str(rest);
        out
    }

    /// The landmark phrase for the terrain a turn happens on. Water never
    /// appears on a route, so it has no phrase.
    pub fn phrase_for(&self, tile: Tile, rng: &mut impl Rng) -> String {
        match tile {
            Tile::Sand => self.expand("sand", rng),
            Tile::Hill => self.expand("hill", rng),
            Tile::Trees => self.expand("tree", rng),
            Tile::Water => {
                warn!("no phrase for a water tile on the route");
                String::new()
            }
        }
    }
}

/// Relation between two consecutive walk directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Straight,
    Left,
    Right,
}

/// Classify the turn between two directions from the shared table.
/// Returns `None` when the pair isn't adjacent in the cyclic ordering,
/// which a well-formed route never produces.
pub fn classify_turn(prev: Coord, next: Coord) -> Option<Turn> {
    let i = DIRS.iter().position(|d| *d == prev)?;
    if next == prev {
        Some(Turn::Straight)
    } else if next == DIRS[(i + 3) % 4] {
        Some(Turn::Left)
    } else if next == DIRS[(i + 1) % 4] {
        Some(Turn::Right)
    } else {
        None
    }
}

/// Narrate a route as turn-by-turn English directions.
///
/// Straight stretches stay silent; the reader is expected to keep walking
/// until the next landmark. The RNG here only varies the wording, so the
/// caller should pass the decorative stream.
pub fn narrate(
    map: &Tilemap<Tile>,
    treasure: &TreasureRoute,
    grammar: &Grammar,
    rng: &mut impl Rng,
) -> String {
    let mut out = format!("Start {}.\n", grammar.expand("start", rng));

    let mut last: Option<Coord> = None;
    for (i, &dir) in treasure.route_dirs.iter().enumerate() {
        let pos = treasure.route[i];
        if let Some(prev) = last {
            match classify_turn(prev, dir) {
                Some(Turn::Straight) => {}
                Some(Turn::Left) => {
                    out.push_str(&format!(
                        "Turn left {}.\n",
                        grammar.phrase_for(*map.get(pos), rng)
                    ));
                }
                Some(Turn::Right) => {
                    out.push_str(&format!(
                        "Turn right {}.\n",
                        grammar.phrase_for(*map.get(pos), rng)
                    ));
                }
                None => {
                    warn!(
                        "inconsistent direction pair {:?} -> {:?} at {:?}, skipping",
                        prev, dir, pos
                    );
                }
            }
        }
        last = Some(dir);
    }

    out.push_str(&format!(
        "Dig {}!\n",
        grammar.phrase_for(*map.get(treasure.mark), rng)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn every_rule_expands_without_residual_tokens() {
        let grammar = Grammar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for (name, _) in RULES {
            for _ in 0..50 {
                let s = grammar.expand(name, &mut rng);
                assert!(!s.contains('$'), "rule '{}' left a token in '{}'", name, s);
            }
        }
    }

    #[test]
    fn unknown_rule_yields_placeholder() {
        let grammar = Grammar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(grammar.expand("kraken", &mut rng), "[]");
    }

    #[test]
    fn turn_classification_matches_hand_scenario() {
        let west = Coord::new(-1, 0);
        let north = Coord::new(0, -1);
        let east = Coord::new(1, 0);
        let south = Coord::new(0, 1);

        // Walking west with y growing downward, south is on your left.
        assert_eq!(classify_turn(west, south), Some(Turn::Left));
        assert_eq!(classify_turn(west, north), Some(Turn::Right));
        assert_eq!(classify_turn(north, east), Some(Turn::Right));
        assert_eq!(classify_turn(north, west), Some(Turn::Left));
        assert_eq!(classify_turn(east, east), Some(Turn::Straight));
        // A reversal is not a single turn.
        assert_eq!(classify_turn(west, east), None);
        assert_eq!(classify_turn(Coord::new(2, 0), east), None);
    }

    #[test]
    fn narration_mentions_each_turn() {
        let map = Tilemap::new_with(6, 6, Tile::Sand);
        // Walked out from the mark at (2, 1): west, then south twice. The
        // stored directions keep that orientation, and the single bend in
        // the path narrates as exactly one right turn.
        let treasure = TreasureRoute {
            mark: Coord::new(2, 1),
            route: vec![
                Coord::new(1, 3),
                Coord::new(1, 2),
                Coord::new(1, 1),
                Coord::new(2, 1),
            ],
            route_dirs: vec![Coord::new(0, 1), Coord::new(0, 1), Coord::new(-1, 0)],
        };
        let grammar = Grammar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let text = narrate(&map, &treasure, &grammar, &mut rng);

        assert!(text.starts_with("Start "));
        assert_eq!(text.matches("Turn right ").count(), 1);
        assert_eq!(text.matches("Turn left ").count(), 0);
        assert!(text.ends_with("!\n"));
        assert!(text.contains("Dig "));
        assert!(!text.contains('$'));
    }

    #[test]
    fn generated_routes_narrate_cleanly() {
        use crate::generate::generate_island;
        use crate::route::find_route;

        let grammar = Grammar::new();
        for seed in 0..5 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let map = generate_island(18, 18, &mut rng);
            let Ok(treasure) = find_route(&map, &mut rng) else {
                continue;
            };

            // Every consecutive direction pair of a real walk classifies.
            for pair in treasure.route_dirs.windows(2) {
                assert!(classify_turn(pair[0], pair[1]).is_some());
            }

            let mut decor = ChaCha8Rng::seed_from_u64(seed + 100);
            let text = narrate(&map, &treasure, &grammar, &mut decor);
            assert!(text.starts_with("Start "));
            assert!(text.ends_with("!\n"));
            assert!(!text.contains('$'));
        }
    }

    #[test]
    fn empty_route_still_opens_and_closes() {
        let map = Tilemap::new_with(4, 4, Tile::Sand);
        let treasure = TreasureRoute {
            mark: Coord::new(2, 2),
            route: Vec::new(),
            route_dirs: Vec::new(),
        };
        let grammar = Grammar::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let text = narrate(&map, &treasure, &grammar, &mut rng);
        assert!(text.starts_with("Start "));
        assert!(text.contains("Dig "));
    }
}
