//! Terminal GIF Maker CLI.

mod commands;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tgm",
    version,
    about = "Render scripted terminal sessions as GIF or video",
    long_about = "Terminal GIF Maker: plays a scripted timeline of command/output steps \
                  with a typing animation, previews it live in your terminal, and exports \
                  it as an animated GIF or a video file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the timeline as a live preview in this terminal
    Preview {
        /// Preset JSON file (omit for the built-in demo)
        preset: Option<PathBuf>,
    },
    /// Export the timeline as a GIF or video file
    Export {
        #[command(subcommand)]
        format: ExportFormat,
    },
    /// Write the built-in demo preset to a file
    Init {
        /// Where to write the preset
        #[arg(default_value = "preset.json")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ExportFormat {
    /// Capture-mode export: walks the timeline as fast as possible
    Gif {
        /// Preset JSON file (omit for the built-in demo)
        preset: Option<PathBuf>,
        /// Output file (default: terminal-<timestamp>.gif)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Monospace font file for rasterization
        #[arg(long)]
        font: Option<PathBuf>,
    },
    /// Real-time export: pipes frames to ffmpeg while the clock runs
    Video {
        /// Preset JSON file (omit for the built-in demo)
        preset: Option<PathBuf>,
        /// Output file (default: terminal-<timestamp>.<container>)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Monospace font file for rasterization
        #[arg(long)]
        font: Option<PathBuf>,
    },
}

#[cfg(not(tarpaulin_include))]
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Preview { preset } => commands::handle_preview(preset.as_deref()),
        Commands::Export { format } => match format {
            ExportFormat::Gif {
                preset,
                output,
                font,
            } => commands::handle_export_gif(preset.as_deref(), output, font),
            ExportFormat::Video {
                preset,
                output,
                font,
            } => commands::handle_export_video(preset.as_deref(), output, font),
        },
        Commands::Init { path, force } => commands::handle_init(&path, force),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(not(tarpaulin_include))]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
