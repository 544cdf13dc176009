//! Command-line front end: inspect, change and watch the stored theme.

use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use themekeeper::{
    ColorMode, Config, FileStore, OsProbe, RootElement, ThemeChange, ThemeMode, ThemeResolver,
};
use tracing_subscriber::EnvFilter;

/// Show, change and watch the light/dark theme preference
#[derive(Parser, Debug)]
#[command(name = "themectl")]
#[command(version)]
struct Args {
    /// Preference file
    #[arg(long, value_name = "PATH", default_value = "themekeeper.json")]
    store: PathBuf,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log resolver activity to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored preference and the effective theme
    Show,
    /// Store a preference: dark, light or auto
    Set { mode: ThemeMode },
    /// Follow system and preference-file changes until interrupted
    Watch {
        /// Polling interval in milliseconds
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(args, &mut io::stdout())
}

fn run(args: Args, out: &mut impl Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let store = Rc::new(
        FileStore::open(&args.store)
            .with_context(|| format!("opening preference file {}", args.store.display()))?,
    );
    let probe = Rc::new(OsProbe::new());
    let root = Rc::new(RootElement::new());
    let theme_config = config.theme.clone();
    let resolver = ThemeResolver::new(theme_config, store.clone(), probe.clone(), root.clone());

    match args.command {
        Command::Show => {
            let effective = effective(&root, &config);
            writeln!(
                out,
                "preference: {}\neffective:  {}",
                style(resolver.preference()).bold(),
                paint(effective)
            )?;
        }
        Command::Set { mode } => {
            resolver.set(mode);
            writeln!(
                out,
                "preference set to {} (effective {})",
                style(mode).bold(),
                paint(effective(&root, &config))
            )?;
        }
        Command::Watch { interval_ms } => {
            resolver.subscribe(Rc::new(|change: &ThemeChange| {
                println!(
                    "{} preference={} ({:?})",
                    paint(change.effective),
                    change.preference,
                    change.cause
                );
            }));
            resolver.start();
            writeln!(
                out,
                "watching {} (preference {}, effective {})",
                args.store.display(),
                resolver.preference(),
                paint(effective(&root, &config))
            )?;
            out.flush()?;

            let interval = Duration::from_millis(interval_ms);
            loop {
                probe.poll();
                if let Err(e) = store.refresh() {
                    tracing::warn!("{:#}", e);
                }
                thread::sleep(interval);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "themekeeper=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn effective(root: &RootElement, config: &Config) -> ColorMode {
    use themekeeper::ClassList;

    if root.contains(&config.theme.dark_marker) {
        ColorMode::Dark
    } else {
        ColorMode::Light
    }
}

fn paint(mode: ColorMode) -> console::StyledObject<ColorMode> {
    match mode {
        ColorMode::Dark => style(mode).blue().bold(),
        ColorMode::Light => style(mode).yellow().bold(),
    }
}
