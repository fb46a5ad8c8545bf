// SPDX-License-Identifier: MPL-2.0
use reelplay::app::{App, Flags};
use reelplay::config;
use reelplay::playlist::Playlist;
use reelplay::video_player::create_player;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(16);
const STATUS_INTERVAL: Duration = Duration::from_secs(1);

const HELP: &str = "\
reelplay - play a video file or every video in a directory

USAGE:
  reelplay [PATH] [OPTIONS]

OPTIONS:
  --volume F       Initial volume in [0, 1]
  --no-audio       Play video only
  --once           Stop after the last playlist item
  --config FILE    Settings file to use
  --font FILE      Font resource for the interface
  -h, --help       Print this help
";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        volume: args.opt_value_from_str("--volume")?,
        no_audio: args.contains("--no-audio"),
        once: args.contains("--once"),
        config: args.opt_value_from_str("--config")?,
        font: args.opt_value_from_str("--font")?,
        path: args.opt_free_from_str()?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("Ignoring extra arguments: {rest:?}");
    }
    Ok(flags)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if std::env::args().any(|a| a == "-h" || a == "--help") {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(e) => {
            eprintln!("error: {e}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    let loaded = match &flags.config {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let mut settings = loaded.unwrap_or_else(|e| {
        log::warn!("Using default settings: {e}");
        config::Config::default()
    });
    flags.apply(&mut settings);

    let target = flags.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let playlist = match Playlist::build(&target) {
        Ok(playlist) => playlist,
        Err(e) => {
            log::error!("Cannot play {}: {e}", target.display());
            return ExitCode::FAILURE;
        }
    };
    log::info!("Playlist has {} item(s)", playlist.len());

    let mut app = App::new(create_player(&settings), playlist, &settings);
    let mut last_status = Instant::now();

    while !app.is_finished() {
        app.tick();

        if last_status.elapsed() >= STATUS_INTERVAL {
            last_status = Instant::now();
            if let Some(text) = app.transport_view().time_text {
                log::info!("{:?} {text}", app.playback_state());
            }
        }
        std::thread::sleep(TICK);
    }

    ExitCode::SUCCESS
}
