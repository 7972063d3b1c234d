use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use pirate_map::ascii::render_ascii;
use pirate_map::generate::generate_island;
use pirate_map::phrases::{narrate, Grammar};
use pirate_map::render::render_map;
use pirate_map::route::find_route;

#[derive(Parser, Debug)]
#[command(name = "pirate-map")]
#[command(about = "Generate a pirate treasure map with a route and directions")]
struct Args {
    /// Map width in tiles (random 10-29 if not specified)
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Map height in tiles (random 10-29 if not specified)
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Tile size in pixels for the PNG output
    #[arg(short, long, default_value = "32")]
    tile_size: u32,

    /// Output PNG path
    #[arg(short, long, default_value = "pirate_map.png")]
    out: String,

    /// Also print the map as ASCII
    #[arg(long)]
    ascii: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // Generative stream: terrain and route, reproducible from the seed.
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Unspecified dimensions are drawn from the generative stream so the
    // seed alone reproduces the whole map.
    let width = args.width.unwrap_or_else(|| 10 + rng.gen_range(0..20));
    let height = args.height.unwrap_or_else(|| 10 + rng.gen_range(0..20));
    if width < 3 || height < 3 {
        eprintln!("Map must be at least 3x3, got {}x{}", width, height);
        std::process::exit(1);
    }

    println!("Generating pirate map with seed: {}", seed);
    println!("Map size: {}x{}", width, height);

    let map = generate_island(width, height, &mut rng);
    let treasure = match find_route(&map, &mut rng) {
        Ok(t) => {
            if t.route.is_empty() {
                println!("No route to the treasure; the X stays secret.");
            } else {
                println!("Route found: {} steps to the treasure.", t.route.len() - 1);
            }
            Some(t)
        }
        Err(e) => {
            eprintln!("No treasure on this map: {}", e);
            None
        }
    };

    // Decorative stream: shimmer, marker jitter and phrase wording only.
    // Renders from the same seed may differ here without changing the map.
    let mut decor = ChaCha8Rng::seed_from_u64(rand::random());

    if args.ascii {
        println!("{}", render_ascii(&map, treasure.as_ref(), &mut decor));
    }

    if let Some(t) = &treasure {
        let grammar = Grammar::new();
        println!("{}", narrate(&map, t, &grammar, &mut decor));
    }

    let img = render_map(&map, treasure.as_ref(), args.tile_size, &mut decor);
    match img.save(&args.out) {
        Ok(()) => println!("Wrote {}", args.out),
        Err(e) => eprintln!("Could not save image: {}", e),
    }
}
