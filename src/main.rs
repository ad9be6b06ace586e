use std::path::PathBuf;
use std::time::Duration;

use life_relay::seed::load_seed;
use life_relay::sim::{RunnerConfig, Simulation, SimulationRunner};
use life_relay::{Grid, Renderer};
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_WIDTH: usize = 60;
const DEFAULT_HEIGHT: usize = 20;
const DEFAULT_GENERATIONS: u64 = 1000;
const DEFAULT_FRAME_MS: u64 = 50;

struct MainArgs {
    width: usize,
    height: usize,
    seed_path: Option<PathBuf>,
    wrap: bool,
    generations: u64,
    frame_ms: u64,
    save_dir: PathBuf,
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = MainArgs {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        seed_path: None,
        wrap: false,
        generations: DEFAULT_GENERATIONS,
        frame_ms: DEFAULT_FRAME_MS,
        save_dir: PathBuf::from("."),
    };
    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                parsed.width = next_arg(i, "--width")
                    .parse()
                    .expect("--width requires a positive integer");
            }
            "--height" => {
                i += 1;
                parsed.height = next_arg(i, "--height")
                    .parse()
                    .expect("--height requires a positive integer");
            }
            "--seed" => {
                i += 1;
                parsed.seed_path = Some(PathBuf::from(next_arg(i, "--seed")));
            }
            "--wrap" => {
                parsed.wrap = true;
            }
            "--generations" => {
                i += 1;
                parsed.generations = next_arg(i, "--generations")
                    .parse()
                    .expect("--generations requires a positive integer");
            }
            "--frame-ms" => {
                i += 1;
                parsed.frame_ms = next_arg(i, "--frame-ms")
                    .parse()
                    .expect("--frame-ms requires a positive integer");
            }
            "--save-dir" => {
                i += 1;
                parsed.save_dir = PathBuf::from(next_arg(i, "--save-dir"));
            }
            other => panic!(
                "unknown argument: {other}\nusage: life-relay [--width N] [--height N] [--seed PATH] [--wrap] [--generations N] [--frame-ms N] [--save-dir PATH]"
            ),
        }
        i += 1;
    }
    parsed
}

struct ConsoleRenderer {
    width: usize,
    height: usize,
}

impl Renderer for ConsoleRenderer {
    fn initialise(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, grid: &Grid) {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if grid.get(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        print!("{out}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args();

    let sim = match &args.seed_path {
        Some(path) => {
            let seed = load_seed(path).unwrap_or_else(|err| {
                eprintln!("failed to load seed {}: {err}", path.display());
                std::process::exit(1);
            });
            Simulation::from_seed(seed)
        }
        None => {
            // No seed file asked for: fall back to a random board.
            info!("no --seed given, generating a random board");
            let mut rng = rand::rngs::StdRng::from_os_rng();
            Simulation::random(args.width, args.height, &mut rng)
        }
    };
    let sim = sim.wrap_edges(args.wrap);

    let width = sim.current().width();
    let height = sim.current().height();

    let runner = SimulationRunner::spawn_with_config(
        sim,
        RunnerConfig::default().save_dir(args.save_dir),
    );
    let queue = runner.snapshots();

    let mut renderer = ConsoleRenderer {
        width: 0,
        height: 0,
    };
    renderer.initialise(width, height);

    let mut rendered: u64 = 0;
    while runner.processed_generations() < args.generations {
        if let Some(frame) = queue.try_pop() {
            renderer.render(&frame);
            rendered += 1;
            println!(
                "-- processed generation {} | rendering generation {} --",
                runner.processed_generations(),
                rendered
            );
        }
        std::thread::sleep(Duration::from_millis(args.frame_ms));
    }

    let final_state = runner.join();
    println!(
        "stopped at generation {} with population {}",
        final_state.generation(),
        final_state.current().population()
    );
}
