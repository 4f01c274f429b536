mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscores;
mod input;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use crate::input::{Keyboard, PointerTracker, Variant};
use crate::util::ErrorChain;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use simplelog::WriteLogger;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: twinsnake [<options>] [classic|tracking]\n",
    "\n",
    "Play snake in the terminal, steering with the keyboard (classic) or by\n",
    "moving the mouse pointer (tracking).\n",
    "\n",
    "Options:\n",
    "  -c, --config <FILE>   Read configuration from the given file\n",
    "      --log-file <FILE> Write log messages to the given file\n",
    "  -h, --help            Display this help message and exit\n",
    "  -V, --version         Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    variant: Variant,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        let mut variant = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if variant.is_none() => {
                    variant = Some(value.parse::<Variant>()?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        args.variant = variant.unwrap_or_default();
        Ok(Cli::Run(args))
    }
}

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(Cli::Run(args)) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("twinsnake: {e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(Cli::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Cli::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("twinsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let config = match args.config {
        Some(ref path) => Config::load(path, false),
        None => Config::default_path().and_then(|p| Config::load(&p, true)),
    }
    .context("failed to load configuration")?;
    init_logging(&config, args.log_file.as_deref())?;
    log::info!(
        "Starting {} {} with the {} variant",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        args.variant
    );
    let mut store = config.high_score_store(args.variant);
    let high_score = store.load().unwrap_or_else(|e| {
        log::warn!("{}", ErrorChain(&e));
        0
    });
    log::info!("Loaded high score: {high_score}");
    let game = Game::new(config.game, high_score, rand::rng());
    let mut terminal = ratatui::init();
    let r = match args.variant {
        Variant::Classic => App::new(game, Keyboard::new(), store, config.pace)
            .run(&mut terminal)
            .map_err(anyhow::Error::from),
        Variant::Tracking => PointerTracker::start(config.tracking.dead_zone)
            .context("failed to start pointer tracking")
            .and_then(|tracker| {
                App::new(game, tracker, store, config.pace)
                    .run(&mut terminal)
                    .map_err(anyhow::Error::from)
            }),
    };
    ratatui::restore();
    if let Err(ref e) = r {
        log::error!("{e:#}");
    }
    r
}

/// Send log messages to a file, as the terminal belongs to the game.  If no
/// log file is given and the default location cannot be determined, nothing
/// is logged.
fn init_logging(config: &Config, log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file.map(Cow::from).or_else(|| config.log_file()) else {
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    let fp = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&*path)
        .context("failed to open log file")?;
    WriteLogger::init(config.files.log_level, simplelog::Config::default(), fp)
        .context("failed to initialize logging")?;
    Ok(())
}
