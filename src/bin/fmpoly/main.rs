//! fmpoly - play a short FM phrase through the default output device
//!
//! Run with: cargo run -- --ratio 3.5 --beta 2

mod app;
mod phrase;

use clap::Parser;
use fmpoly::VoiceConfig;
use tracing_subscriber::EnvFilter;

use app::Player;

#[derive(Parser, Debug)]
#[command(name = "fmpoly", about = "Polyphonic FM synth demo")]
struct Args {
    /// Carrier amplitude
    #[arg(long, default_value_t = 0.2)]
    amp: f32,
    /// Modulator frequency as a multiple of the carrier
    #[arg(long, default_value_t = 3.0)]
    ratio: f32,
    /// Modulation index
    #[arg(long, default_value_t = 0.6)]
    beta: f32,
    /// Attack time in seconds
    #[arg(long, default_value_t = 0.01)]
    attack: f32,
    /// Decay time in seconds
    #[arg(long, default_value_t = 0.01)]
    decay: f32,
    /// Sustain level
    #[arg(long, default_value_t = 0.4)]
    sustain: f32,
    /// Release time in seconds
    #[arg(long, default_value_t = 0.5)]
    release: f32,
    /// Tempo of the phrase in beats per minute
    #[arg(long, default_value_t = 120.0)]
    tempo: f64,
    /// Samples per engine block
    #[arg(long, default_value_t = fmpoly::BLOCK_SIZE)]
    block_size: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let patch = VoiceConfig {
        amplitude: args.amp,
        ratio: args.ratio,
        beta: args.beta,
        attack: args.attack,
        decay: args.decay,
        sustain: args.sustain,
        release: args.release,
    };

    Player::new(patch)
        .tempo(args.tempo)
        .block_size(args.block_size)
        .play(&phrase::demo())
}
