use std::time::{Duration, Instant};

use life_relay::render::NullRenderer;
use life_relay::seed::{decode, encode};
use life_relay::sim::{Command, RunnerConfig, Simulation, SimulationRunner};
use life_relay::{Grid, Renderer};

fn glider_board(width: usize, height: usize) -> Grid {
    let mut grid = Grid::new(width, height);
    for &(x, y) in &[(3, 2), (4, 3), (2, 4), (3, 4), (4, 4)] {
        grid.set(x, y, true);
    }
    grid
}

#[test]
fn first_snapshot_is_the_seed() {
    let seed = glider_board(16, 16);
    let runner = SimulationRunner::spawn(Simulation::from_seed(seed.clone()));
    let queue = runner.snapshots();

    // The queue is FIFO and the generation-0 snapshot is published before
    // the first tick, so the oldest entry is always the seed.
    let first = loop {
        if let Some(frame) = queue.try_pop() {
            break frame;
        }
        std::thread::yield_now();
    };
    assert_eq!(first, seed);

    runner.join();
}

#[test]
fn queue_never_exceeds_capacity_while_producer_free_runs() {
    let runner = SimulationRunner::spawn_with_config(
        Simulation::from_seed(glider_board(20, 20)),
        RunnerConfig::default().queue_capacity(5),
    );
    let queue = runner.snapshots();

    // Let the unthrottled producer overrun the consumer.
    std::thread::sleep(Duration::from_millis(100));
    assert!(queue.len() <= 5);

    // Snapshots keep the dimensions the simulation was started with.
    for _ in 0..3 {
        if let Some(frame) = queue.try_pop() {
            assert_eq!(frame.width(), 20);
            assert_eq!(frame.height(), 20);
        }
    }
    assert!(queue.len() <= 5);

    runner.join();
}

#[test]
fn processed_generations_run_ahead_of_delivered_snapshots() {
    let runner = SimulationRunner::spawn_with_config(
        Simulation::from_seed(glider_board(16, 16)),
        RunnerConfig::default().queue_capacity(4),
    );

    std::thread::sleep(Duration::from_millis(100));
    let processed = runner.processed_generations();
    let deliverable = runner.snapshots().len() as u64;

    // The tick always counts even when its snapshot is dropped, so with a
    // capacity of 4 and no consumer the simulation must be far ahead.
    assert!(
        processed > deliverable,
        "processed {processed} vs deliverable {deliverable}"
    );

    runner.join();
}

#[test]
fn quit_stops_the_loop_promptly() {
    let runner = SimulationRunner::spawn(Simulation::from_seed(glider_board(16, 16)));
    std::thread::sleep(Duration::from_millis(50));
    assert!(runner.is_running());

    let start = Instant::now();
    let final_state = runner.join();

    assert!(start.elapsed() < Duration::from_secs(2), "join was not prompt");
    assert!(final_state.generation() > 0);
}

#[test]
fn restart_command_resets_the_processed_counter() {
    let runner = SimulationRunner::spawn(Simulation::from_seed(glider_board(16, 16)));

    // Let it get some generations ahead.
    let deadline = Instant::now() + Duration::from_secs(5);
    while runner.processed_generations() < 100 {
        assert!(Instant::now() < deadline, "simulation never reached gen 100");
        std::thread::yield_now();
    }
    let before = runner.processed_generations();

    runner.send(Command::RestartToSeed);

    // The counter jumps back to 0 and climbs again; observing any value
    // below the pre-restart reading proves the reset happened.
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if runner.processed_generations() < before {
            break;
        }
        assert!(Instant::now() < deadline, "processed counter never reset");
        std::thread::yield_now();
    }

    runner.join();
}

#[test]
fn new_board_command_keeps_dimensions() {
    let runner = SimulationRunner::spawn_with_config(
        Simulation::from_seed(glider_board(11, 7)),
        RunnerConfig::default().rng_seed(0xD37E_A515),
    );

    runner.send(Command::NewBoard);
    std::thread::sleep(Duration::from_millis(50));
    let final_state = runner.join();

    assert_eq!(final_state.current().width(), 11);
    assert_eq!(final_state.current().height(), 7);
    assert_eq!(final_state.seed_board().width(), 11);
    assert_eq!(final_state.seed_board().height(), 7);
}

#[test]
fn save_command_writes_a_decodable_seed_file() {
    let dir = std::env::temp_dir().join(format!(
        "life-relay-pipeline-test-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("create temp dir");

    let seed = glider_board(9, 9);
    let runner = SimulationRunner::spawn_with_config(
        Simulation::from_seed(seed.clone()),
        RunnerConfig::default().save_dir(&dir),
    );

    // Save is handled before Quit: same channel, drained in order.
    runner.send(Command::Save);
    let final_state = runner.join();

    // Save snapshots the seed, not the advanced current board.
    assert_eq!(final_state.seed_board(), &seed);
    let entry = std::fs::read_dir(&dir)
        .expect("read temp dir")
        .filter_map(|e| e.ok())
        .find(|e| e.path().extension().and_then(|x| x.to_str()) == Some("seed"))
        .expect("a .seed file was written");
    let text = std::fs::read_to_string(entry.path()).expect("read seed file");
    assert_eq!(decode(&text).expect("decode saved seed"), seed);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn commands_after_stop_are_noops() {
    let runner = SimulationRunner::spawn(Simulation::from_seed(glider_board(8, 8)));
    let sender = runner.command_sender();
    // Repeated quits are tolerated.
    runner.send(Command::Quit);
    runner.join();

    // The loop is gone; sending simply does nothing useful and must not
    // panic anything.
    let _ = sender.send(Command::NewBoard);
    let _ = sender.send(Command::Quit);
}

#[test]
fn renderer_consumes_frames_at_its_own_pace() {
    let runner = SimulationRunner::spawn(Simulation::from_seed(glider_board(10, 10)));
    let queue = runner.snapshots();

    let mut renderer = NullRenderer::default();
    renderer.initialise(10, 10);

    // Pop-on-empty is a no-op for the consumer; it just skips the frame.
    let deadline = Instant::now() + Duration::from_secs(5);
    while renderer.frames < 10 {
        assert!(Instant::now() < deadline, "never received 10 frames");
        if let Some(frame) = queue.try_pop() {
            assert_eq!((frame.width(), frame.height()), (10, 10));
            renderer.render(&frame);
        }
    }

    runner.join();
}

#[test]
fn snapshots_round_trip_through_the_codec() {
    let seed = glider_board(12, 12);
    let runner = SimulationRunner::spawn(Simulation::from_seed(seed));
    let queue = runner.snapshots();

    let frame = loop {
        if let Some(frame) = queue.try_pop() {
            break frame;
        }
        std::thread::yield_now();
    };
    assert_eq!(decode(&encode(&frame)).expect("round trip"), frame);

    runner.join();
}
