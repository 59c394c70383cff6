use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "hellcast")]
#[command(version)]
#[command(about = "Now-playing display for MPRIS players with inline album art", long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// MPRIS player to follow, as understood by `playerctl --player` (overrides config)
    #[arg(short, long)]
    pub player: Option<String>,

    /// Show the status footer on startup
    #[arg(short = 's', long)]
    pub status_bar: bool,

    /// Write a default config file to the given path (or directory) and exit
    #[arg(long, value_name = "PATH")]
    pub generate_config: Option<PathBuf>,
}
