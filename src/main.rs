use clap::Parser;
use prompter::core::config::{self, CliOverrides, PrompterConfig};
use prompter::core::script::normalize_line_endings;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prompter", about = "Terminal teleprompter")]
struct Args {
    /// Initial scroll speed multiplier
    #[arg(long)]
    speed: Option<f64>,

    /// Initial font size in px
    #[arg(long)]
    font_size: Option<f64>,

    /// Start with mirrored text
    #[arg(long)]
    mirror: bool,

    /// Load the editor with the contents of this file
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Start in fullscreen presentation mode
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to prompter.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("prompter.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        PrompterConfig::default()
    });
    let cli = CliOverrides {
        speed: args.speed,
        font_size: args.font_size,
        mirrored: args.mirror.then_some(true),
    };
    let resolved = config::resolve(&file_config, &cli);

    let script = match &args.script {
        Some(path) => normalize_line_endings(&fs::read_to_string(path)?),
        None => String::new(),
    };

    log::info!(
        "Prompter starting up (speed={}, font_size={}, mirrored={}, fullscreen={})",
        resolved.speed,
        resolved.font_size,
        resolved.mirrored,
        args.fullscreen
    );

    prompter::tui::run(resolved, script, args.fullscreen)
}
