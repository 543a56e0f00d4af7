use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "vid2mvp",
    about = "Turn a video link into a product spec and a static prototype",
    version
)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the whole pipeline for one video and write its artifacts
    Run {
        /// Video link
        #[arg(value_name = "URL")]
        url: String,

        /// Working title for the generated project
        #[arg(long)]
        title: Option<String>,
    },
    /// Classify a transcript already on disk
    Viability {
        #[arg(long)]
        title: String,

        #[arg(long, value_name = "FILE")]
        transcript_file: PathBuf,
    },
    /// Package an existing spec.json into a prototype archive
    Package {
        #[arg(long, value_name = "FILE")]
        spec: PathBuf,

        /// Destination of the .tar.gz archive
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
}
