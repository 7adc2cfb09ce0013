use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rockit_gateway::midi::MidiSender;
use rockit_gateway::{Config, Daemon};

/// Rockit - voice and web MIDI remote for the Rockit synthesizer
#[derive(Parser)]
#[command(name = "rockit", version, about)]
struct Cli {
    /// Port for the HTTP API
    #[arg(long, env = "ROCKIT_API_PORT")]
    port: Option<u16>,

    /// Host the synth listens on for raw MIDI
    #[arg(long, env = "ROCKIT_MIDI_HOST")]
    midi_host: Option<String>,

    /// TCP port the synth listens on for raw MIDI
    #[arg(long, env = "ROCKIT_MIDI_PORT")]
    midi_port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable the voice session (HTTP API only)
    #[arg(long, env = "ROCKIT_DISABLE_VOICE")]
    disable_voice: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send a single note to the synth and release it
    Note {
        /// MIDI note number (0-127)
        note: u8,

        /// Velocity
        #[arg(short, long, default_value = "100")]
        velocity: u8,

        /// Hold time in milliseconds before the note-off
        #[arg(long, default_value = "500")]
        hold_ms: u64,
    },
    /// Send a single control change to the synth
    Cc {
        /// Controller number (0-127)
        cc: u8,

        /// Controller value (0-127)
        value: u8,
    },
    /// Silence the synth (All Notes Off)
    Panic,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,rockit_gateway=info",
        1 => "info,rockit_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load_with_options(cli.disable_voice);
    if let Some(port) = cli.port {
        config.api_server.port = port;
    }
    if let Some(host) = cli.midi_host {
        config.midi.host = host;
    }
    if let Some(port) = cli.midi_port {
        config.midi.port = port;
    }

    // Handle one-shot subcommands
    if let Some(cmd) = cli.command {
        let midi = MidiSender::new(
            config.midi.host.clone(),
            config.midi.port,
            config.midi.send_timeout,
        );
        return match cmd {
            Command::Note {
                note,
                velocity,
                hold_ms,
            } => send_note(&midi, note, velocity, hold_ms).await,
            Command::Cc { cc, value } => {
                midi.control_change(cc, value).await?;
                Ok(())
            }
            Command::Panic => {
                midi.all_notes_off().await?;
                Ok(())
            }
        };
    }

    if config.voice.enabled {
        tracing::info!(
            wake_word = %config.voice.wake_word,
            "rockit gateway ready - say the wake word"
        );
    } else {
        tracing::info!("rockit gateway ready (HTTP only, voice disabled)");
    }

    // Run until interrupted
    Daemon::new(config).run().await?;

    Ok(())
}

/// Strike a note, wait, release it
async fn send_note(midi: &MidiSender, note: u8, velocity: u8, hold_ms: u64) -> anyhow::Result<()> {
    midi.note_on(note, velocity).await?;
    tokio::time::sleep(Duration::from_millis(hold_ms)).await;
    midi.note_off(note).await?;
    Ok(())
}
