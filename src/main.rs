//! cglyph - print a C source file with syntax colors

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use cglyph::display::{self, RenderOptions};
use cglyph::error::{HighlightError, Result};
use cglyph::{CodeEditor, Config, EditorSurface, Layout, StyledBuffer};

/// Longest time to wait for highlighting before printing anyway
const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    lines: Option<(usize, usize)>,
    color: bool,
    line_numbers: bool,
    file: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let Some(args) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };
    init_logging();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let file = args
        .file
        .ok_or_else(|| HighlightError::Message("no input file (try --help)".to_string()))?;
    let text = fs::read_to_string(&file)?;

    let mut buffer = StyledBuffer::new();
    if let Some((first, last)) = args.lines {
        // One pixel per line, so the viewport is exactly the requested lines
        buffer.set_layout(Layout {
            line_height_px: 1,
            height_px: last.saturating_sub(first) as u32,
        });
    }

    let mut editor = CodeEditor::with_config(buffer, &config);
    let now = Instant::now();
    match args.lines {
        Some((first, _)) => {
            let surface = editor.surface_mut();
            surface.set_text(&text);
            surface.scroll_to_line(first);
            surface.take_events();
            editor.refresh_visible(now);
        }
        None => editor.set_text(&text, now),
    }
    if !editor.settle(SETTLE_TIMEOUT) {
        tracing::warn!("highlighting did not finish in time");
    }
    tracing::debug!(stats = ?editor.scheduler().stats(), "done");

    let options = RenderOptions {
        color: args.color,
        line_numbers: args.line_numbers,
        lines: args.lines,
    };
    let stdout = io::stdout();
    display::render(editor.surface(), &mut stdout.lock(), &options)?;
    Ok(())
}

/// Parse arguments; `None` means help or version was printed
fn parse_args<I: Iterator<Item = String>>(mut iter: I) -> Result<Option<Args>> {
    let mut args = Args {
        color: true,
        ..Args::default()
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--config" | "-c" => {
                let path = iter.next().ok_or_else(|| missing_value(&arg))?;
                args.config = Some(PathBuf::from(path));
            }
            "--lines" | "-l" => {
                let range = iter.next().ok_or_else(|| missing_value(&arg))?;
                args.lines = Some(parse_line_range(&range)?);
            }
            "--no-color" => args.color = false,
            "--line-numbers" | "-n" => args.line_numbers = true,
            _ if arg.starts_with('-') => {
                return Err(HighlightError::Message(format!("unknown option '{}'", arg)));
            }
            _ => args.file = Some(PathBuf::from(&arg)),
        }
    }

    Ok(Some(args))
}

fn missing_value(flag: &str) -> HighlightError {
    HighlightError::Message(format!("{} needs a value", flag))
}

/// Parse `A:B` (1-based, inclusive) into a 0-based line range
fn parse_line_range(s: &str) -> Result<(usize, usize)> {
    let invalid = || HighlightError::Message(format!("invalid line range '{}', expected A:B", s));
    let (a, b) = s.split_once(':').ok_or_else(invalid)?;
    let first: usize = a.trim().parse().map_err(|_| invalid())?;
    let last: usize = b.trim().parse().map_err(|_| invalid())?;
    if first == 0 || last < first {
        return Err(invalid());
    }
    Ok((first - 1, last - 1))
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings)
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn print_usage() {
    println!("cglyph {} - syntax-colored C source printer", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: cglyph [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -h, --help          Show this help message");
    println!("  -V, --version       Show version information");
    println!("  -c, --config PATH   Read settings from PATH instead of ~/.cglyph.toml");
    println!("  -l, --lines A:B     Print lines A through B (highlights only around them)");
    println!("  -n, --line-numbers  Prefix lines with their number");
    println!("      --no-color      Print plain text");
    println!();
    println!("Set RUST_LOG=debug to trace highlighting passes.");
}

fn print_version() {
    println!("cglyph {}", env!("CARGO_PKG_VERSION"));
}
