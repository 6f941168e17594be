use anyhow::{Context, Result};
use ke::{error, file, logging, App, Config, TuiApplication};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: ke file";

fn main() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(options) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    };

    error::setup_panic_handler();
    run(options)?;
    Ok(ExitCode::SUCCESS)
}

fn run(options: CliOptions) -> Result<()> {
    let mut config = Config::load(options.config.as_deref()).context("failed to load configuration")?;
    if options.debug_log.is_some() {
        config.log_file = options.debug_log;
    }
    let log_file = match config.log_file.as_deref() {
        Some(path) => Some(
            file::expand_path(&path.to_string_lossy())
                .with_context(|| format!("invalid log path {}", path.display()))?,
        ),
        None => None,
    };
    logging::init(log_file.as_deref(), config.log_level)?;

    let path = file::expand_path(&options.file)
        .with_context(|| format!("invalid file path {}", options.file))?;
    let mut app = App::open(&path, config).with_context(|| format!("failed to open {}", path.display()))?;

    let mut frontend = TuiApplication::new();
    frontend.run(&mut app).context("terminal session failed")?;

    log::info!("session ended for {}", path.display());
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
struct CliOptions {
    config: Option<PathBuf>,
    debug_log: Option<PathBuf>,
    file: String,
}

/// 引数を解析する。ファイルがちょうど1つでなければ `None`
fn parse_args(args: &[String]) -> Option<CliOptions> {
    let mut config: Option<PathBuf> = None;
    let mut debug_log: Option<PathBuf> = None;
    let mut files: Vec<String> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(iter.next()?)),
            "--debug-log" => debug_log = Some(PathBuf::from(iter.next()?)),
            _ => files.push(arg.clone()),
        }
    }

    if files.len() != 1 {
        return None;
    }
    let file = files.pop()?;
    Some(CliOptions {
        config,
        debug_log,
        file,
    })
}
