use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "evidence-ai")]
#[command(about = "AI-powered crime scene evidence detection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze an image for evidence (JPG, PNG, WEBP up to 10MB)
    Analyze {
        /// Path to the image
        #[arg(required = true)]
        image: PathBuf,

        /// Detection endpoint URL (overrides the configured one)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Use the synthetic offline backend instead of a live service
        #[arg(long)]
        offline: bool,

        /// Write the analysis result as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save a copy of the image with detection boxes drawn in
        #[arg(short, long)]
        annotate: bool,
    },

    /// Show or edit configuration
    Config {
        /// Set the detection endpoint URL
        #[arg(long)]
        set_endpoint: Option<String>,

        /// Set the multipart field name for the image upload
        #[arg(long)]
        set_field: Option<String>,

        /// Show current settings
        #[arg(long)]
        show: bool,
    },
}
