//! Simulation state, the command surface, and the producer thread.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::engine::next_generation;
use crate::grid::Grid;
use crate::queue::{DEFAULT_CAPACITY, SnapshotQueue};
use crate::rules::Rules;
use crate::seed;

/// Discrete signals delivered to the simulation loop from any thread.
/// Arbitrary interleaving and repetition is tolerated; commands arriving
/// after the loop has stopped are no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace seed and current board with a fresh random board of the same
    /// dimensions; generation counter resets to 0.
    NewBoard,
    /// Flip the toroidal-wrap flag; takes effect on the next tick.
    ToggleWrapEdges,
    /// Set the current board back to the stored seed; counter resets to 0.
    RestartToSeed,
    /// Write the seed board to disk. Read-only with respect to simulation
    /// state.
    Save,
    /// Stop the loop. Terminal for this runner.
    Quit,
}

/// Owned simulation state: one live board, the immutable generation-0 seed,
/// a monotonic generation counter, and the edge-wrap flag.
pub struct Simulation {
    current: Grid,
    seed: Grid,
    generation: u64,
    wrap_edges: bool,
    rules: Rules,
}

impl Simulation {
    /// Start from a loaded seed; the seed is generation 0.
    pub fn from_seed(seed: Grid) -> Self {
        Self {
            current: seed.clone(),
            seed,
            generation: 0,
            wrap_edges: false,
            rules: Rules::conway(),
        }
    }

    /// Start from a freshly generated random board.
    pub fn random<R: Rng>(width: usize, height: usize, rng: &mut R) -> Self {
        Self::from_seed(Grid::random(width, height, rng))
    }

    pub fn wrap_edges(mut self, wrap: bool) -> Self {
        self.wrap_edges = wrap;
        self
    }

    pub fn rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    #[inline]
    pub fn current(&self) -> &Grid {
        &self.current
    }

    #[inline]
    pub fn seed_board(&self) -> &Grid {
        &self.seed
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn wraps_edges(&self) -> bool {
        self.wrap_edges
    }

    /// Advance one generation. The current board is replaced wholesale and
    /// the counter increments; the previous board is untouched by the rule
    /// scan (the step is a pure function of it).
    pub fn tick(&mut self) -> &Grid {
        self.current = next_generation(
            &self.current,
            self.wrap_edges,
            &mut self.rules,
            self.generation,
        );
        self.generation += 1;
        &self.current
    }

    /// Replace seed and current board with a random board of the same
    /// dimensions and reset the counter.
    pub fn new_board<R: Rng>(&mut self, rng: &mut R) {
        let board = Grid::random(self.current.width(), self.current.height(), rng);
        self.seed = board.clone();
        self.current = board;
        self.generation = 0;
    }

    /// Flip the wrap flag. Only the next computed generation is affected.
    pub fn toggle_wrap(&mut self) {
        self.wrap_edges = !self.wrap_edges;
    }

    /// Restore the stored seed as the current board and reset the counter.
    pub fn restart_to_seed(&mut self) {
        self.current = self.seed.clone();
        self.generation = 0;
    }
}

/// Knobs for the producer thread.
pub struct RunnerConfig {
    /// Snapshot queue capacity.
    pub queue_capacity: usize,
    /// Directory that `Command::Save` writes seed files into.
    pub save_dir: PathBuf,
    /// Seed for the RNG backing `Command::NewBoard`. `None` draws from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_CAPACITY,
            save_dir: PathBuf::from("."),
            rng_seed: None,
        }
    }
}

impl RunnerConfig {
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

/// Drives a [`Simulation`] on its own thread, publishing each generation into
/// a bounded [`SnapshotQueue`] without ever blocking on the consumer. When
/// the queue is full the tick still counts and the snapshot is dropped; the
/// render-visible generation may lag the true one.
pub struct SimulationRunner {
    commands: Sender<Command>,
    queue: Arc<SnapshotQueue>,
    processed: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<Simulation>>,
}

impl SimulationRunner {
    pub fn spawn(sim: Simulation) -> Self {
        Self::spawn_with_config(sim, RunnerConfig::default())
    }

    pub fn spawn_with_config(sim: Simulation, config: RunnerConfig) -> Self {
        let queue = Arc::new(SnapshotQueue::new(config.queue_capacity));
        let processed = Arc::new(AtomicU64::new(sim.generation()));
        let running = Arc::new(AtomicBool::new(true));
        let (tx, rx) = unbounded();

        let handle = {
            let queue = Arc::clone(&queue);
            let processed = Arc::clone(&processed);
            let running = Arc::clone(&running);
            std::thread::Builder::new()
                .name("life-sim".into())
                .spawn(move || run_loop(sim, rx, queue, processed, running, config))
                .expect("failed to spawn simulation thread")
        };

        Self {
            commands: tx,
            queue,
            processed,
            running,
            handle: Some(handle),
        }
    }

    /// Deliver a command. Safe from any thread; silently a no-op once the
    /// loop has stopped.
    pub fn send(&self, command: Command) {
        let _ = self.commands.send(command);
    }

    /// A clonable sender for an external input thread.
    pub fn command_sender(&self) -> Sender<Command> {
        self.commands.clone()
    }

    /// The queue the render thread drains.
    pub fn snapshots(&self) -> Arc<SnapshotQueue> {
        Arc::clone(&self.queue)
    }

    /// True simulation generation, which may run ahead of what has been
    /// rendered.
    pub fn processed_generations(&self) -> u64 {
        self.processed.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Quit and wait for the loop to exit, returning the final state.
    pub fn join(mut self) -> Simulation {
        self.send(Command::Quit);
        let handle = self.handle.take().expect("runner already joined");
        handle.join().expect("simulation thread panicked")
    }
}

impl Drop for SimulationRunner {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.commands.send(Command::Quit);
            let _ = handle.join();
        }
    }
}

fn run_loop(
    mut sim: Simulation,
    commands: Receiver<Command>,
    queue: Arc<SnapshotQueue>,
    processed: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    config: RunnerConfig,
) -> Simulation {
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut dropped: u64 = 0;

    info!(
        width = sim.current().width(),
        height = sim.current().height(),
        wrap = sim.wraps_edges(),
        "simulation loop started"
    );

    // The seed itself is the generation-0 snapshot.
    queue.try_push(sim.current().clone());

    while running.load(Ordering::Acquire) {
        // Commands are serialized against ticks by draining them here,
        // between ticks.
        loop {
            match commands.try_recv() {
                Ok(command) => {
                    apply_command(command, &mut sim, &mut rng, &processed, &running, &config);
                }
                Err(TryRecvError::Empty) => break,
                // All handles gone: nobody can quit us anymore, stop.
                Err(TryRecvError::Disconnected) => {
                    running.store(false, Ordering::Release);
                    break;
                }
            }
        }
        if !running.load(Ordering::Acquire) {
            break;
        }

        sim.tick();
        processed.store(sim.generation(), Ordering::Release);
        if !queue.try_push(sim.current().clone()) {
            dropped += 1;
        }
    }

    info!(
        generation = sim.generation(),
        dropped_snapshots = dropped,
        "simulation loop stopped"
    );
    sim
}

fn apply_command(
    command: Command,
    sim: &mut Simulation,
    rng: &mut StdRng,
    processed: &AtomicU64,
    running: &AtomicBool,
    config: &RunnerConfig,
) {
    match command {
        Command::NewBoard => {
            sim.new_board(rng);
            processed.store(0, Ordering::Release);
            info!("new random board");
        }
        Command::ToggleWrapEdges => {
            sim.toggle_wrap();
            info!(wrap = sim.wraps_edges(), "wrap edges toggled");
        }
        Command::RestartToSeed => {
            sim.restart_to_seed();
            processed.store(0, Ordering::Release);
            info!("restarted to seed");
        }
        Command::Save => {
            if let Err(err) = seed::save_seed(sim.seed_board(), &config.save_dir) {
                warn!(%err, "seed save failed");
            }
        }
        Command::Quit => {
            running.store(false, Ordering::Release);
        }
    }
}
