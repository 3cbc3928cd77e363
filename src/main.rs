//! mirrorview - Remote device screen viewer
//!
//! The desktop window of a screen mirroring client: creates the viewer
//! window and captures the mouse for relative input to the device.

mod app;
mod config;
mod input;
mod util;
mod window;

use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use winit::event_loop::{ControlFlow, EventLoop};

use app::{Viewer, ViewerOptions};
use config::Config;
use input::{PointerWarp, ShortcutMods, WinitPointer};
use util::file;
use window::WindowFlags;

/// mirrorview - Remote device screen viewer
#[derive(Parser)]
#[command(name = "mirrorview")]
#[command(author = "mirrorview Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Mirror and control a remote device's screen", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the viewer window
    Run {
        /// Window title
        #[arg(long)]
        title: Option<String>,

        /// Window width
        #[arg(long)]
        width: Option<u32>,

        /// Window height
        #[arg(long)]
        height: Option<u32>,

        /// Modifier keys toggling mouse capture (e.g. "lalt,lsuper")
        #[arg(long)]
        shortcut_mod: Option<ShortcutMods>,

        /// Never capture the mouse
        #[arg(long)]
        no_mouse_capture: bool,

        /// Window without decorations
        #[arg(long)]
        borderless: bool,

        /// Keep the window above others
        #[arg(long)]
        always_on_top: bool,

        /// Start in fullscreen
        #[arg(short, long)]
        fullscreen: bool,
    },

    /// Show current configuration
    Config {
        /// Generate sample configuration
        #[arg(long)]
        generate: bool,

        /// Output path for generated config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expand a path the way configured paths are expanded
    ExpandPath {
        path: String,
    },

    /// Show system information
    Info,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        Config::load(config_path)?
    } else {
        Config::load_default().unwrap_or_default()
    };

    init_logging(&config, cli.verbose || config.general.verbose)?;

    match cli.command {
        Commands::Run {
            title,
            width,
            height,
            shortcut_mod,
            no_mouse_capture,
            borderless,
            always_on_top,
            fullscreen,
        } => {
            let mut window = config.window.params();
            if let Some(title) = title {
                window.title = title;
            }
            window.width = width.unwrap_or(window.width);
            window.height = height.unwrap_or(window.height);
            if borderless {
                window.flags.insert(WindowFlags::BORDERLESS);
            }
            if always_on_top {
                window.flags.insert(WindowFlags::ALWAYS_ON_TOP);
            }
            if fullscreen {
                window.flags.insert(WindowFlags::FULLSCREEN);
            }

            let options = ViewerOptions {
                window,
                mouse_capture: config.input.mouse_capture && !no_mouse_capture,
                shortcut_mod: shortcut_mod.unwrap_or(config.input.shortcut_mod),
                warp: PointerWarp::for_current_platform(),
            };
            run_viewer(options)?;
        }
        Commands::Config { generate, output } => {
            if generate {
                let sample = config::generate_sample_config()?;
                if let Some(path) = output {
                    if let Some(parent) = path.parent() {
                        file::mkdirs(parent)?;
                    }
                    std::fs::write(&path, &sample)?;
                    println!("Configuration written to: {}", path.display());
                } else {
                    println!("{}", sample);
                }
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
        Commands::ExpandPath { path } => {
            println!("{}", file::expand_path(&path)?.display());
        }
        Commands::Info => {
            print_system_info();
        }
    }

    Ok(())
}

/// Initialize logging to stderr, and to the configured log file if any
fn init_logging(config: &Config, verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let file_layer = match config.log_file()? {
        Some(path) => {
            if let Some(parent) = path.parent() {
                file::mkdirs(parent)?;
            }
            let log = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(log)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(file_layer)
        .with(filter)
        .init();

    Ok(())
}

/// Run the viewer window until it is closed
fn run_viewer(options: ViewerOptions) -> anyhow::Result<()> {
    tracing::info!(
        "Starting viewer '{}' ({}x{})",
        options.window.title,
        options.window.width,
        options.window.height
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut viewer: Viewer<WinitPointer> = Viewer::new(options);
    event_loop.run_app(&mut viewer)?;

    if let Some(e) = viewer.take_error() {
        return Err(e.into());
    }

    tracing::info!("Viewer stopped");
    Ok(())
}

/// Print system information
fn print_system_info() {
    println!("mirrorview System Information");
    println!("=============================\n");

    println!("Platform: {}", input::platform_name());
    println!("Pointer warp on capture: {}", PointerWarp::for_current_platform());
    println!("Default shortcut modifiers: {}", ShortcutMods::default());

    match file::executable_path() {
        Ok(path) => println!("Executable: {}", path.display()),
        Err(e) => println!("Executable: unknown ({})", e),
    }

    println!("\nConfiguration search paths:");
    for path in Config::search_paths() {
        let marker = if file::is_regular(&path) { "*" } else { " " };
        println!("  {} {}", marker, path.display());
    }

    #[cfg(target_os = "linux")]
    {
        println!("\nLinux Requirements:");
        println!("  - Relative mouse mode needs pointer locking support from the compositor");
        if !file::executable_exists("adb") {
            println!("  - adb was not found in $PATH");
        }
    }

    #[cfg(target_os = "macos")]
    {
        println!("\nmacOS Notes:");
        println!("  - The pointer is moved to the window center before capture");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["mirrorview", "info"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_run_options() {
        let cli = Cli::try_parse_from([
            "mirrorview",
            "-v",
            "run",
            "--shortcut-mod",
            "lctrl,rctrl",
            "--no-mouse-capture",
            "--width",
            "1024",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Run {
                shortcut_mod,
                no_mouse_capture,
                width,
                ..
            } => {
                assert_eq!(shortcut_mod, Some(ShortcutMods::LCTRL | ShortcutMods::RCTRL));
                assert!(no_mouse_capture);
                assert_eq!(width, Some(1024));
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_invalid_shortcut_mod() {
        let cli = Cli::try_parse_from(["mirrorview", "run", "--shortcut-mod", "shift"]);
        assert!(cli.is_err());
    }
}
