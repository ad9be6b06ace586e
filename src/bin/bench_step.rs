//! Step-throughput harness. Run with `--release` for meaningful numbers;
//! compare output across commits to catch regressions in the neighbour scan.

use std::time::Instant;

use life_relay::{Grid, Rules, next_generation};
use rand::SeedableRng;

struct Scenario {
    name: &'static str,
    width: usize,
    height: usize,
    density: f64,
    iters: u64,
    seed: u64,
    wrap: bool,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "console-size bounded",
        width: 60,
        height: 20,
        density: 0.5,
        iters: 20_000,
        seed: 0x5EED_0001,
        wrap: false,
    },
    Scenario {
        name: "console-size toroidal",
        width: 60,
        height: 20,
        density: 0.5,
        iters: 20_000,
        seed: 0x5EED_0001,
        wrap: true,
    },
    Scenario {
        name: "large sparse",
        width: 512,
        height: 512,
        density: 0.1,
        iters: 200,
        seed: 0x5EED_0002,
        wrap: false,
    },
    Scenario {
        name: "large dense toroidal",
        width: 512,
        height: 512,
        density: 0.42,
        iters: 200,
        seed: 0x5EED_0003,
        wrap: true,
    },
];

fn run_scenario(s: &Scenario) -> (f64, usize) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(s.seed);
    let mut grid = Grid::random_with_density(s.width, s.height, s.density, &mut rng);
    let mut rules = Rules::conway();

    let start = Instant::now();
    for generation in 0..s.iters {
        grid = next_generation(&grid, s.wrap, &mut rules, generation);
    }
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    (total_ms, grid.population())
}

fn main() {
    for s in SCENARIOS {
        let (total_ms, population) = run_scenario(s);
        let per_iter = total_ms / s.iters as f64;
        println!(
            "{:<22} {}x{} wrap={} | {:.3} ms total, {:.6} ms/gen, final pop {}",
            s.name, s.width, s.height, s.wrap, total_ms, per_iter, population
        );
    }
}
