use std::path::PathBuf;

use annoview::{LaunchOptions, LogLevel, OverlayPolicy, StartupConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "annoview",
    version,
    about = "Browse a folder of images and annotate them with rectangles and points"
)]
struct Args {
    /// Folder to open at startup (defaults to the last opened folder)
    folder: Option<PathBuf>,

    /// Log verbosity; RUST_LOG overrides it
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// What happens to overlays when another image is selected
    #[arg(long, value_enum)]
    overlay_policy: Option<OverlayPolicy>,

    /// Show the image frame and tick marks
    #[arg(long)]
    axes: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn init_logger(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Warn);
    builder.filter_module("annoview", level.into());
    builder.filter_module("annoview_gpu", level.into());
    builder.parse_default_env();
    builder.init();
}

fn main() {
    let args = Args::parse();

    let startup = StartupConfig::load(args.config.as_deref());
    let save_path = startup.save_path();
    let mut config = startup.config;
    if let Some(level) = args.log_level {
        config.preferences.log_level = level;
    }
    if let Some(policy) = args.overlay_policy {
        config.preferences.overlay_policy = policy;
    }
    if args.axes {
        config.preferences.show_axes = true;
    }

    init_logger(config.preferences.log_level);
    log::debug!("Starting with {:?}", args);
    match (&startup.path, &startup.error) {
        (Some(path), Some(e)) => {
            log::warn!("Ignoring config file {}: {e}; it will not be overwritten", path.display())
        }
        (None, Some(e)) => log::warn!("Settings will not be saved: {e}"),
        (Some(path), None) => log::info!("Using configuration file {}", path.display()),
        (None, None) => {}
    }

    let options = LaunchOptions {
        folder: args.folder.or_else(|| {
            config
                .preferences
                .last_folder
                .clone()
                .filter(|folder| folder.is_dir())
        }),
        save_path,
    };

    if let Err(e) = annoview::run(config, options) {
        eprintln!("annoview: {}", e);
        std::process::exit(1);
    }
}
