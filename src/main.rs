//! casement - replay a window script
//!
//! Runs a command script against a window manager wired to the ASCII
//! renderer, printing drawings for `RENDER` and JSON for `STATE`.
//!
//! Run without arguments to see the options.

use std::path::{Path, PathBuf};

use casement::backend::AsciiRenderer;
use casement::command::{parse_script, CommandOutput};
use casement::config::parser::parse_size;
use casement::config::Config;
use casement::geometry::Size;
use casement::{CasementResult, WindowManager};

static USAGE: &[&str] = &[
    "USAGE: casement [OPTIONS] SCRIPT",
    "",
    "Options:",
    "\t--config FILE          : sway-style config (z bounds, min_size, container)",
    "\t--container WIDTHxHEIGHT : container size (default: config, then 1920x1080)",
    "\t--ascii-size WIDTHxHEIGHT : drawing grid size (default: 96x27)",
];

const DEFAULT_CONTAINER: Size = Size {
    width: 1920,
    height: 1080,
};

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    container: Option<Size>,
    ascii_size: Option<Size>,
    script: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> CasementResult<Options> {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                options.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--container" if i + 1 < args.len() => {
                options.container = Some(parse_size(&args[i + 1])?);
                i += 2;
            }
            "--ascii-size" if i + 1 < args.len() => {
                options.ascii_size = Some(parse_size(&args[i + 1])?);
                i += 2;
            }
            other => {
                if options.script.is_some() {
                    tracing::warn!("Ignoring extra argument {other}");
                } else {
                    options.script = Some(PathBuf::from(other));
                }
                i += 1;
            }
        }
    }
    Ok(options)
}

fn run(options: &Options, script: &Path) -> CasementResult<()> {
    let config = match &options.config {
        Some(path) => {
            tracing::info!("Using config file: {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };

    let container = options
        .container
        .or(config.container)
        .unwrap_or(DEFAULT_CONTAINER);
    let renderer = match options.ascii_size {
        Some(size) => AsciiRenderer::new(size.width.max(1) as usize, size.height.max(1) as usize),
        None => AsciiRenderer::default(),
    }
    .with_overlay_z(config.overlay_z);

    let mut wm = WindowManager::from_config(&config, Box::new(container), renderer)?;
    tracing::info!("Replaying {} in a {container} container", script.display());

    let content = std::fs::read_to_string(script)?;
    for (line_num, command) in parse_script(&content)? {
        match command.apply(&mut wm) {
            Ok(CommandOutput::Render(art)) => print!("{art}"),
            Ok(CommandOutput::State(json)) => println!("{json}"),
            Ok(CommandOutput::Registered(id)) => tracing::info!("line {line_num}: registered {id}"),
            Ok(CommandOutput::Gesture(false)) => {
                tracing::warn!("line {line_num}: gesture had no effect")
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("line {line_num}: {e}");
                return Err(e);
            }
        }
    }
    Ok(())
}

#[allow(clippy::disallowed_macros)]
fn main() {
    if let Ok(env_filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    let Some(script) = options.script.clone() else {
        for line in USAGE {
            println!("{line}");
        }
        std::process::exit(2);
    };

    if let Err(e) = run(&options, &script) {
        tracing::error!("Replay failed: {e}");
        std::process::exit(1);
    }
}
