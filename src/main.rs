//! Sort Trace CLI - Run a traced sort from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::Path;

use sort_trace::{
    animation::{Driver, PlaybackView, RecorderConfig, TracePlayer, TraceRecorder},
    compute::{AlgorithmRegistry, Step, is_sorted, summarize_all},
    schema::PlaybackConfig,
};

/// Log a progress line every this many steps.
const PROGRESS_INTERVAL: u64 = 500;

/// View that logs progress and optionally records the trace.
struct CliView {
    recorder: Option<TraceRecorder>,
    steps: u64,
    truncated: bool,
}

impl PlaybackView for CliView {
    fn on_step(&mut self, step: &Step, _values: &[f64]) {
        self.steps += 1;
        if let Some(recorder) = &mut self.recorder
            && !recorder.record_step(step)
            && !self.truncated
        {
            log::warn!("Trace step limit reached at step {}", self.steps);
            self.truncated = true;
        }
        if self.steps.is_multiple_of(PROGRESS_INTERVAL) {
            log::info!("  step {}", self.steps);
        }
    }

    fn on_done(&mut self, values: &[f64]) {
        log::info!("Done: {} elements, sorted = {}", values.len(), is_sorted(values));
    }
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--example" => print_example_config(),
        "--all" => match args.get(2) {
            Some(path) => run_summaries(Path::new(path)),
            None => {
                print_usage(&args[0]);
                std::process::exit(1);
            }
        },
        "--replay" => match args.get(2) {
            Some(path) => run_replay(Path::new(path)),
            None => {
                print_usage(&args[0]);
                std::process::exit(1);
            }
        },
        path => run_playback(Path::new(path)),
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <config.json>", program);
    eprintln!("       {} --all <config.json>", program);
    eprintln!("       {} --replay <trace.srt>", program);
    eprintln!("       {} --example", program);
    eprintln!();
    eprintln!("Run a traced sort from JSON configuration.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json  Path to playback configuration file");
    eprintln!("  --all        Summarize every algorithm on the configured array");
    eprintln!("  --replay     Rebuild the final array from a recorded trace");
    eprintln!("  --example    Print a default configuration");
}

fn load_config(path: &Path) -> PlaybackConfig {
    let config_str = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: PlaybackConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    }

    config
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_playback(config_path: &Path) {
    let config = load_config(config_path);
    let registry = AlgorithmRegistry::builtin();
    if !registry.contains(&config.algorithm) {
        eprintln!(
            "Unknown algorithm: {} (available: {})",
            config.algorithm,
            registry.names().join(", ")
        );
        std::process::exit(1);
    }
    let mut data = config.pattern.generate(config.size);

    let recorder = config.record.as_ref().map(|path| {
        let rec_config = RecorderConfig {
            compression: config.compression.into(),
            ..Default::default()
        };
        TraceRecorder::new(path, &config.algorithm, &data, rec_config).unwrap_or_else(|e| {
            eprintln!("Error creating trace file {}: {}", path, e);
            std::process::exit(1);
        })
    });

    println!("Sort Trace");
    println!("==========");
    println!("Algorithm: {}", config.algorithm);
    println!("Elements: {}", data.len());
    println!("Delay: {} ms", config.delay_ms);
    println!();

    let mut view = CliView {
        recorder,
        steps: 0,
        truncated: false,
    };

    let outcome = {
        let mut sequence = registry
            .start(&config.algorithm, &mut data)
            .unwrap_or_else(|e| {
                eprintln!("{}", e);
                std::process::exit(1);
            });
        Driver::new(&config).run(sequence.as_mut(), &mut view)
    };

    if let Some(recorder) = view.recorder.take() {
        match recorder.finalize() {
            Ok(stats) => println!("Trace: {}", stats),
            Err(e) => {
                eprintln!("Error finalizing trace: {}", e);
                std::process::exit(1);
            }
        }
    }

    print_json(&outcome);
    println!("Sorted: {}", is_sorted(&data));
}

fn run_summaries(config_path: &Path) {
    let config = load_config(config_path);
    let registry = AlgorithmRegistry::builtin();
    let data = config.pattern.generate(config.size);

    print_json(&summarize_all(&registry, &data));
}

fn run_replay(trace_path: &Path) {
    let player = TracePlayer::open(trace_path).unwrap_or_else(|e| {
        eprintln!("Error opening trace: {}", e);
        std::process::exit(1);
    });

    println!(
        "Trace of {}: {} elements, {} steps",
        player.algorithm(),
        player.initial_values().len(),
        player.step_count()
    );

    match player.replay() {
        Ok(values) => println!("Replayed, sorted = {}", is_sorted(&values)),
        Err(e) => {
            eprintln!("Replay failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_example_config() {
    let config = PlaybackConfig::default();

    println!("Example configuration (config.json):");
    print_json(&config);
}
