use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "releaseforge")]
#[command(author, version, about = "Canonical release names for private-tracker media")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive release names for media files
    Name(NameArgs),

    /// Probe a media file and display the labels it resolves to
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Files to name (reads bulkProcess.txt when omitted)
    pub paths: Vec<PathBuf>,

    /// TMDB ID of the title
    #[arg(short, long)]
    pub tmdb: Option<u64>,

    /// Release group
    #[arg(short, long)]
    pub group: Option<String>,

    /// Source label (e.g. "BluRay Remux", "WEB-DL")
    #[arg(short, long)]
    pub source: Option<String>,

    /// Edition (e.g. "Director's Cut")
    #[arg(short, long)]
    pub edition: Option<String>,

    /// Mark as a repack
    #[arg(long)]
    pub repack: bool,

    /// Use the extended tracker grammar
    #[arg(long)]
    pub extended: bool,

    /// Treat as a movie regardless of the file name
    #[arg(long, conflicts_with = "tv")]
    pub movie: bool,

    /// Treat as a series regardless of the file name
    #[arg(long)]
    pub tv: bool,

    /// Season number
    #[arg(long)]
    pub season: Option<u32>,

    /// Episode number
    #[arg(long, requires = "season")]
    pub episode: Option<u32>,

    /// Language name, overriding the audio track's
    #[arg(long)]
    pub language: Option<String>,

    /// Resolution label (e.g. "1080p"), overriding detection
    #[arg(long)]
    pub resolution: Option<String>,

    /// Title to use instead of a catalog lookup
    #[arg(long)]
    pub title: Option<String>,

    /// Year to use with --title
    #[arg(long, requires = "title")]
    pub year: Option<u16>,

    /// Require an episode marker (no season packs)
    #[arg(long)]
    pub per_episode: bool,

    /// Hardlink the new name next to the source
    #[arg(long, conflicts_with = "rename")]
    pub hardlink: bool,

    /// Rename the source to the new name
    #[arg(long)]
    pub rename: bool,

    /// Never prompt; missing values fail the file
    #[arg(short, long)]
    pub yes: bool,

    /// Exit non-zero when any name uses a banned group
    #[arg(long)]
    pub strict_groups: bool,

    /// Print each derivation as JSON
    #[arg(long)]
    pub json: bool,
}
