//! cellterm - box drawing and colour pair showcase
//!
//! Opens a session on the terminal, draws a window border and a few
//! overlapping boxes whose junctions resolve automatically, then waits for a
//! key press.
//!
//! # Quick Start
//!
//! ```text
//! cellterm                   # Style from ~/.cellterm/config.toml
//! cellterm -s heavy -d triple-dash
//! cellterm --headless        # Print the drawing instead of taking over the terminal
//! ```

use std::env;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cellterm::config::Config;
use cellterm::{
    Attributes, Canvas, ColourSlot, Colour, CrosstermDriver, Driver, HeadlessDriver, LineStyle,
    Palette, Rect, Session,
};

/// Command line options
#[derive(Default)]
struct Args {
    style: Option<String>,
    detail: Option<String>,
    headless: bool,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Canvas size used with `--headless`
const HEADLESS_SIZE: (u16, u16) = (64, 18);

fn print_version() {
    eprintln!("cellterm {}", VERSION);
}

fn print_help() {
    eprintln!("cellterm {} - box drawing and colour pair showcase", VERSION);
    eprintln!();
    eprintln!("Usage: cellterm [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --style <STYLE>   Line style: {}", Config::list_styles().join(", "));
    eprintln!("  -d, --detail <DETAIL> Dash pattern: {}", Config::list_details().join(", "));
    eprintln!("  --headless            Draw off-screen and print the result");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Configuration: ~/.cellterm/config.toml");
    eprintln!("Log file:      ~/.cellterm/cellterm.log (level from RUST_LOG)");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-s" | "--style" => {
                i += 1;
                let value = args.get(i).ok_or("Missing style argument")?;
                parsed.style = Some(value.clone());
            }
            "-d" | "--detail" => {
                i += 1;
                let value = args.get(i).ok_or("Missing detail argument")?;
                parsed.detail = Some(value.clone());
            }
            "--headless" => {
                parsed.headless = true;
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

/// Log to ~/.cellterm/cellterm.log, never to the screen being drawn on
fn init_logging() {
    let log_path = Config::dir()
        .map(|dir| dir.join("cellterm.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("cellterm.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("cellterm {} starting...", VERSION);

    let mut config = Config::load();
    if let Some(style) = args.style {
        config.line_style = style;
    }
    if let Some(detail) = args.detail {
        config.detail = detail;
    }

    if args.headless {
        let (cols, rows) = HEADLESS_SIZE;
        let mut session = open_session(HeadlessDriver::new(cols, rows), &config);
        draw(&mut session, &config)?;
        session.end()?;
        print!("{}", session.driver().contents());
    } else {
        let mut driver = CrosstermDriver::stdout()?;
        driver.enter()?;
        let mut session = open_session(driver, &config);
        draw(&mut session, &config)?;
        wait_for_key()?;
        session.end()?;
        session.driver_mut().leave()?;
    }

    info!("cellterm exiting");
    Ok(())
}

fn open_session<D: Driver>(driver: D, config: &Config) -> Session<D> {
    if !config.terminal.colour {
        return Session::with_pair_limit(driver, 0);
    }
    match config.terminal.max_colour_pairs {
        Some(limit) => Session::with_pair_limit(driver, limit),
        None => Session::new(driver),
    }
}

/// Pair for `palette`, or the terminal default when none is left
fn slot_or_default<D: Driver>(session: &mut Session<D>, palette: Palette) -> ColourSlot {
    session.acquire(palette).unwrap_or_else(|e| {
        warn!("Drawing {} in default colours: {}", palette, e);
        ColourSlot::default_slot()
    })
}

fn draw<D: Driver>(session: &mut Session<D>, config: &Config) -> anyhow::Result<()> {
    let caps = session.capabilities();
    let (cols, rows) = (caps.columns, caps.lines);
    let mut canvas = Canvas::new(cols, rows);

    let style = config.line_style();
    let border_slot = slot_or_default(session, config.border_palette());
    let border = session.glyphs(style.clone(), config.border_attributes(), border_slot)?;
    canvas.border(&border);

    let title = format!(" cellterm: {} ", style);
    canvas.print(2, 0, &title, Attributes::BOLD, border_slot)?;

    // Two panels sharing an edge, then a divider through both that meets the border
    let panel_slot = slot_or_default(session, Palette::new(Colour::Yellow, Colour::Default));
    let panel = session.glyphs(style.clone(), Attributes::NORMAL, panel_slot)?;
    let half = cols / 2;
    let panel_rows = rows.saturating_sub(4).min(9);
    canvas.draw_box(Rect::new(2, 2, half.saturating_sub(1), panel_rows), &panel);
    canvas.draw_box(Rect::new(half, 2, half.saturating_sub(2), panel_rows), &panel);

    let divider_palette = Palette::new(Colour::BrightMagenta, Colour::Default);
    let divider_slot = slot_or_default(session, divider_palette);
    let divider = session.glyphs(LineStyle::Double, Attributes::NORMAL, divider_slot)?;
    canvas.horizontal_line(0, 2 + panel_rows / 2, cols, &divider);

    let text_slot = slot_or_default(session, Palette::new(Colour::BrightWhite, Colour::Blue));
    canvas.print(4, 3, "colour pairs in use:", Attributes::NORMAL, text_slot)?;
    let in_use = session.registry().len().saturating_sub(1).to_string();
    canvas.print(half + 2, 3, &in_use, Attributes::BOLD, text_slot)?;

    // One sample of every built-in style along the bottom
    let mut x = 2;
    let sample_row = rows.saturating_sub(3);
    for sample in LineStyle::builtin() {
        let glyphs = session.glyphs(sample, Attributes::NORMAL, ColourSlot::default_slot())?;
        canvas.draw_box(Rect::new(x, sample_row, 3, 2), &glyphs);
        x += 4;
    }

    session.present(&canvas)?;
    info!("Drew {}x{} canvas with {} colour pairs", cols, rows, session.registry().len());
    Ok(())
}

fn wait_for_key() -> anyhow::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
