//! stepgauge - show a step counter gauge in a window

use clap::Parser;
use rand::Rng;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use stepgauge::{GaugeAttributes, GaugeCommand, GaugeError, GaugeWindow, GlyphFont};

/// Step counter gauge viewer
#[derive(Parser, Debug)]
#[command(name = "stepgauge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Attribute file (TOML)
    #[arg(short, long, env = "STEPGAUGE_CONFIG")]
    config: Option<PathBuf>,

    /// TrueType/OpenType font for the label
    #[arg(long, env = "STEPGAUGE_FONT")]
    font: PathBuf,

    /// Current step count, overrides the attribute file
    #[arg(long)]
    curr: Option<u32>,

    /// Maximum step count, overrides the attribute file
    #[arg(long)]
    max: Option<u32>,

    /// Skip the entry animation
    #[arg(long)]
    no_anim: bool,

    /// Window title
    #[arg(long, default_value = "Step Gauge")]
    title: String,

    /// Window side in logical pixels
    #[arg(long, default_value_t = 300)]
    size: u32,

    /// Feed random step counts to the gauge
    #[arg(long)]
    demo: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GaugeError> {
    let mut attributes = match &cli.config {
        Some(path) => GaugeAttributes::load(path)?,
        None => GaugeAttributes::default(),
    };
    if let Some(curr) = cli.curr {
        attributes.curr_step = curr;
    }
    if let Some(max) = cli.max {
        attributes.max_step = max;
    }
    if cli.no_anim {
        attributes.start_with_anim = false;
    }

    let font = GlyphFont::load(&cli.font)?;
    let demo_max = if attributes.max_step > 0 {
        attributes.max_step
    } else {
        10_000
    };

    let window = GaugeWindow::builder()
        .font(font)
        .attributes(attributes)
        .title(cli.title)
        .window_size(cli.size)
        .build();

    if !cli.demo {
        return window.show();
    }

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut rng = rand::rng();
        if sender.send(GaugeCommand::SetMaxStep(demo_max)).is_err() {
            return;
        }
        loop {
            thread::sleep(Duration::from_millis(1500));
            let step = rng.random_range(0..=demo_max);
            if sender.send(GaugeCommand::SetCurrStep(step)).is_err() {
                break;
            }
        }
    });

    println!("Displaying step gauge with random step counts up to {}", demo_max);
    println!("Press Ctrl+C to exit");
    window.show_with_commands(receiver)
}
