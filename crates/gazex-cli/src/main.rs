use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod bulletin;

#[derive(Parser)]
#[command(
    name = "gazex",
    about = "Gazette notice extraction and weekly bulletin generation",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the weekly bulletin from an annotated notice list.
    Bulletin {
        /// CSV with gazette_number,notice_number rows.
        #[arg(long)]
        notices: PathBuf,
        /// Directory holding the gazette PDFs.
        #[arg(long)]
        gazettes: PathBuf,
        /// Directory for the page and summary caches.
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,
    },
    /// Extract a single notice and print it as JSON.
    Notice {
        #[arg(long)]
        gazette: u32,
        #[arg(long)]
        notice: u32,
        /// Directory holding the gazette PDFs.
        #[arg(long)]
        gazettes: PathBuf,
        /// Directory for the page and summary caches.
        #[arg(long, default_value = "cache")]
        cache_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Bulletin {
            notices,
            gazettes,
            cache_dir,
        } => bulletin::run(&notices, &gazettes, &cache_dir),
        Command::Notice {
            gazette,
            notice,
            gazettes,
            cache_dir,
        } => bulletin::print_notice(gazette, notice, &gazettes, &cache_dir),
    }
}
