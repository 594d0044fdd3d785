use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coursereel")]
#[command(author, version, about = "Course video catalog server")]
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
    /// Start the server with the dashboard and JSON API
    Start {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// CSV file with the video catalog
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Base URL prepended to video identifiers
        #[arg(long)]
        base_url: Option<String>,
    },

    /// List the videos of a module
    List {
        /// Module number
        #[arg(required = true)]
        module: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search video names and key phrases
    Search {
        /// Text to look for (case-insensitive)
        #[arg(required = true)]
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a video's transcript to a text file
    Export {
        /// Video identifier, e.g. Mod01_Intro.mp4
        #[arg(required = true)]
        video_id: String,

        /// Output file (defaults to <video-id>_transcript.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
