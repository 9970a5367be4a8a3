// src/main.rs
//
// songosc: watch a song file and show its contents in the VRChat chatbox

use clap::{Parser, Subcommand};
use log::{info, log, warn, LevelFilter};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::error::Error;
use std::fs::File;
use std::future::Future;
use std::path::PathBuf;
use tokio::sync::watch;

use songosc::config::{Config, PollPreset};
use songosc::controllers::{OscController, OscDisplay, OscSender};
use songosc::models::DisplaySink;
use songosc::services::{
    resolve_song_path, ChangeNotifier, ControlListener, PathPicker, SongFile,
};

#[derive(Parser)]
#[command(
    name = "songosc",
    version,
    about = "Show the song from a text file on your VRChat avatar"
)]
struct Args {
    /// Config file (default: config.toml next to the executable, then in the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Song file to watch, bypassing the pointer file
    #[arg(short, long, global = true)]
    source: Option<PathBuf>,

    /// Poll every 200ms instead of the configured preset
    #[arg(long, global = true)]
    fast: bool,

    /// -v for debug output, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Watch the song file and forward changes (default)
    Run,
    /// Send one chatbox message and exit
    Send { text: String },
    /// Set an avatar parameter: a float, or true/false
    Param {
        name: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Clear the chatbox
    Clear,
    /// Only listen for avatar media controls
    Listen,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    init_logging(&config, args.verbose);
    for (level, notice) in config.startup_notices() {
        log!(level, "{}", notice);
    }

    let sender = OscSender::from_config(&config.osc)?;
    info!("Sending OSC to {}", sender.target());

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            let mut picker = picker();
            let song_path = resolve_song_path(&config, args.source, picker.as_mut())?;
            let preset = if args.fast {
                PollPreset::Fast
            } else {
                config.poll.preset
            };
            let listener = if config.control.enabled {
                Some(control_listener(&config)?)
            } else {
                None
            };

            let display = OscDisplay::new(sender, &config.display);
            let notifier = ChangeNotifier::new(SongFile::new(song_path), preset.interval(), display);

            let (stop_tx, stop_rx) = watch::channel(false);
            let signal = async move {
                shutdown_signal().await;
                let _ = stop_tx.send(true);
            };
            let controls = async {
                if let Some(listener) = listener {
                    listener.run(stopped(stop_rx.clone())).await;
                }
            };
            tokio::join!(signal, notifier.run(stopped(stop_rx.clone())), controls);
        }
        Command::Send { text } => {
            let mut display = OscDisplay::new(sender, &config.display);
            display.update(&text)?;
            info!("Sent: {}", display.render(&text));
        }
        Command::Param { name, value } => {
            match value.as_str() {
                "true" | "false" => sender.send_bool_parameter(&name, value == "true")?,
                _ => sender.send_parameter(&name, value.parse()?)?,
            }
            info!("OSC message sent successfully");
        }
        Command::Clear => {
            sender.send_chatbox("", true, false)?;
            info!("Chatbox cleared");
        }
        Command::Listen => {
            control_listener(&config)?.run(shutdown_signal()).await;
        }
    }

    Ok(())
}

fn control_listener(config: &Config) -> Result<ControlListener, Box<dyn Error>> {
    let controller = OscController::new(config.control.listen_port)?;
    let feedback = if config.control.feedback {
        Some(OscSender::from_config(&config.osc)?)
    } else {
        None
    };
    info!("Listening for avatar controls on port {}", config.control.listen_port);
    Ok(ControlListener::new(controller, feedback))
}

// Resolves once `true` is published, or when the sender is gone
fn stopped(mut rx: watch::Receiver<bool>) -> impl Future<Output = ()> {
    async move {
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }
}

fn init_logging(config: &Config, verbose: u8) {
    let level = match verbose {
        0 => config.log_level(),
        1 => config.log_level().max(LevelFilter::Debug),
        _ => LevelFilter::Trace,
    };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        log_config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    let mut file_error = None;
    if let Some(path) = config.resolve_log_file() {
        match File::create(&path) {
            Ok(file) => loggers.push(WriteLogger::new(level, log_config, file)),
            Err(e) => file_error = Some((path, e)),
        }
    }

    let _ = CombinedLogger::init(loggers);
    if let Some((path, e)) = file_error {
        warn!("Failed to open log file {}: {}", path.display(), e);
    }
}

#[cfg(feature = "dialog")]
fn picker() -> Box<dyn PathPicker> {
    Box::new(songosc::services::DialogPicker)
}

#[cfg(not(feature = "dialog"))]
fn picker() -> Box<dyn PathPicker> {
    Box::new(songosc::services::PromptPicker::stdio())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
