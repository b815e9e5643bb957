use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use ambient_life::{
    AnimationSpeed, CellEvent, FieldConfig, GridMode, LifeEngine, RespawnMode, SquareSize,
    StartingPattern,
};

struct MainArgs {
    config: FieldConfig,
    generations: u64,
    interval: Option<Duration>,
    seed: Option<u64>,
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut config = FieldConfig::default();
    let mut generations = 600;
    let mut interval = None;
    let mut seed = None;
    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--size" => {
                i += 1;
                let size = match next_arg(i, "--size").to_ascii_lowercase().as_str() {
                    "large" => SquareSize::Large,
                    "medium" => SquareSize::Medium,
                    "small" => SquareSize::Small,
                    "very-small" => SquareSize::VerySmall,
                    "super-small" => SquareSize::SuperSmall,
                    "ultra-small" => SquareSize::UltraSmall,
                    other => panic!("unknown size: {other}"),
                };
                config = config.square_size(size);
            }
            "--pattern" => {
                i += 1;
                let pattern = match next_arg(i, "--pattern").to_ascii_lowercase().as_str() {
                    "random" => StartingPattern::DefaultRandom,
                    "sparse" => StartingPattern::Sparse,
                    "gliders" => StartingPattern::Gliders,
                    "sparse-gliders" => StartingPattern::SparseGliders,
                    "lonely-gliders" => StartingPattern::LonelyGliders,
                    "gun" => StartingPattern::GosperGun,
                    "r-pentomino" => StartingPattern::RPentomino,
                    "acorn" => StartingPattern::Acorn,
                    "pulsar" => StartingPattern::Pulsar,
                    "pentadecathlon" => StartingPattern::Pentadecathlon,
                    "lwss" => StartingPattern::Lightweight,
                    "puffer" => StartingPattern::PufferTrain,
                    other => panic!("unknown pattern: {other}"),
                };
                config = config.starting_pattern(pattern);
            }
            "--mode" => {
                i += 1;
                let mode = match next_arg(i, "--mode").to_ascii_lowercase().as_str() {
                    "toroidal" => GridMode::Toroidal,
                    "infinite" => GridMode::Infinite,
                    other => panic!("unknown grid mode: {other}"),
                };
                config = config.grid_mode(mode);
            }
            "--respawn" => {
                i += 1;
                let mode = match next_arg(i, "--respawn").to_ascii_lowercase().as_str() {
                    "fresh" => RespawnMode::FreshStart,
                    "add" => RespawnMode::AddLife,
                    other => panic!("unknown respawn mode: {other}"),
                };
                config = config.respawn_mode(mode);
            }
            "--speed" => {
                i += 1;
                let speed = match next_arg(i, "--speed").to_ascii_lowercase().as_str() {
                    "fastest" => AnimationSpeed::Fastest,
                    "fast" => AnimationSpeed::Fast,
                    "normal" => AnimationSpeed::Normal,
                    "slow" => AnimationSpeed::Slow,
                    "off" => AnimationSpeed::Off,
                    other => panic!("unknown speed: {other}"),
                };
                config = config.animation_speed(speed);
            }
            "--shifting-colors" => {
                config = config.shifting_colors(true);
            }
            "--no-fade" => {
                config = config.death_fade(false);
            }
            "--generations" => {
                i += 1;
                generations = next_arg(i, "--generations")
                    .parse()
                    .expect("--generations requires a positive integer");
            }
            "--interval-ms" => {
                i += 1;
                let ms: u64 = next_arg(i, "--interval-ms")
                    .parse()
                    .expect("--interval-ms requires a positive integer");
                interval = Some(Duration::from_millis(ms));
            }
            "--seed" => {
                i += 1;
                seed = Some(
                    next_arg(i, "--seed")
                        .parse()
                        .expect("--seed requires an integer"),
                );
            }
            other => panic!(
                "unknown argument: {other}\nusage: ambient-life [--size S] [--pattern P] [--mode toroidal|infinite] [--respawn fresh|add] [--speed S] [--shifting-colors] [--no-fade] [--generations N] [--interval-ms N] [--seed N]"
            ),
        }
        i += 1;
    }
    MainArgs {
        config,
        generations,
        interval,
        seed,
    }
}

fn draw(engine: &LifeEngine) {
    let board = engine.board();
    let mut frame = String::with_capacity(board.len() * 4);
    frame.push_str("\x1b[H");
    for row in 0..board.visible_rows() {
        for col in 0..board.visible_columns() {
            let idx = board.visible_index(col, row);
            let cell = board.cell(idx);
            if cell.alive {
                let c = cell.alive_color;
                frame.push_str(&format!(
                    "\x1b[38;2;{};{};{}m\u{2588}\u{2588}",
                    (c.r * 255.0) as u8,
                    (c.g * 255.0) as u8,
                    (c.b * 255.0) as u8,
                ));
            } else if engine.config().death_fade {
                let c = cell.dead_color;
                frame.push_str(&format!(
                    "\x1b[38;2;{};{};{}m\u{2591}\u{2591}",
                    (c.r * 51.0) as u8,
                    (c.g * 51.0) as u8,
                    (c.b * 51.0) as u8,
                ));
            } else {
                frame.push_str("  ");
            }
        }
        frame.push_str("\x1b[0m\n");
    }
    print!("{frame}");
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let mut engine = match args.seed {
        Some(seed) => LifeEngine::with_rng(args.config, StdRng::seed_from_u64(seed)),
        None => LifeEngine::new(args.config),
    };

    let interval = args
        .interval
        .unwrap_or_else(|| engine.config().timings().generation_interval);

    print!("\x1b[2J");
    let mut births = 0u64;
    let mut deaths = 0u64;
    for _ in 0..args.generations {
        let start = Instant::now();
        let events = engine.step(start);
        for event in &events {
            match event {
                CellEvent::BecameAlive { .. } => births += 1,
                CellEvent::BeganDying { .. } => deaths += 1,
                CellEvent::Resync { .. } => {}
            }
        }
        draw(&engine);
        println!(
            "\x1b[0mgeneration {}  population {}  births {}  deaths {}   ",
            engine.generation(),
            engine.population(),
            births,
            deaths,
        );
        let elapsed = start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }
}
