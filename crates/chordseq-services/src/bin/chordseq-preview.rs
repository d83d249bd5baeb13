//! chordseq-preview: play a sequence offline and print each chord

use std::path::PathBuf;
use std::thread;

use anyhow::Context;
use chordseq_core::{ChordMode, ChordSequencer, DisplaySnapshot};
use chordseq_services::{ClockedRunner, config_path, load_config_from};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Stack,
    VoiceLeading,
}

impl From<Mode> for ChordMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Stack => ChordMode::Stack,
            Mode::VoiceLeading => ChordMode::VoiceLeading,
        }
    }
}

#[derive(Parser)]
#[command(name = "chordseq-preview")]
#[command(about = "Clock the chord sequencer offline and print each step")]
#[command(version)]
struct Cli {
    /// Config file (default: user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Beats to play
    #[arg(short, long, default_value_t = 16)]
    beats: usize,

    #[arg(long, default_value_t = 120.0)]
    bpm: f32,

    #[arg(long, default_value_t = 48_000.0)]
    sample_rate: f32,

    /// Override the configured chord mode
    #[arg(long)]
    mode: Option<Mode>,

    /// Override the configured seed
    #[arg(long)]
    seed: Option<u64>,

    /// Randomize the steps before playing
    #[arg(short, long)]
    randomize: bool,
}

fn print_snapshot(snapshot: &DisplaySnapshot) {
    let volts: Vec<String> = snapshot.voicing.iter().map(|v| format!("{v:+.3}")).collect();
    println!(
        "{:>2}/{:<2} {:<8} {}",
        snapshot.current_step + 1,
        snapshot.step_count,
        snapshot.current_label().unwrap_or("?"),
        volts.join(" ")
    );
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chordseq=debug".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let path = cli.config.unwrap_or_else(config_path);
    let mut config =
        load_config_from(&path).with_context(|| format!("loading {}", path.display()))?;
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let engine = ChordSequencer::new(&config)?;
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut runner = ClockedRunner::new(engine, cli.sample_rate, cli.bpm)?.with_sender(tx);
    if cli.randomize {
        runner.randomize();
    }

    {
        let snapshot = runner.engine().snapshot();
        println!(
            "{} / root {} / {} / {} bpm at {} Hz",
            snapshot.scale_name,
            snapshot.root_label,
            snapshot.mode.name(),
            runner.bpm(),
            runner.sample_rate()
        );
    }

    let beats = cli.beats;
    let player = thread::spawn(move || {
        runner.run_steps(beats);
    });

    // Ends when the runner thread drops its sender
    for snapshot in rx.iter() {
        print_snapshot(&snapshot);
    }

    player
        .join()
        .map_err(|_| anyhow::anyhow!("playback thread panicked"))?;
    tracing::info!("Played {} beats", beats);
    Ok(())
}
