//! CLI entry point for wtree

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use wtree::{OutputConfig, StreamingFormatter, TreeWalker, WalkerConfig};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "wtree")]
#[command(about = "Directory tree listing that resolves symbolic links")]
#[command(version)]
struct Args {
    /// Directory (or link to one) to display
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show hidden entries (names starting with '.')
    #[arg(short, long)]
    all: bool,

    /// Follow symbolic links to directories, skipping ones already entered
    #[arg(short = 'l', long = "follow")]
    follow: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log traversal details to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "wtree=warn",
        1 => "wtree=info",
        _ => "wtree=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let walker = TreeWalker::new(WalkerConfig {
        show_hidden: args.all,
        follow_symlink_dirs: args.follow,
    });
    let mut formatter = StreamingFormatter::new(OutputConfig {
        use_color: should_use_color(args.color),
    });

    match walker.walk(&args.path, &mut formatter) {
        Ok(report) => {
            if let Err(e) = report.outcome {
                eprintln!("wtree: {} (error code {})", e, e.code());
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("wtree: error writing output: {}", e);
            process::exit(1);
        }
    }
}
