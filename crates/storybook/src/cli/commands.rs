//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storybook - illustrated children's stories from a title and a genre
#[derive(Parser, Debug)]
#[command(name = "storybook")]
#[command(about = "Generate illustrated children's storybooks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra configuration file, applied over the default locations
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a full storybook
    Create(CreateArgs),

    /// Suggest story titles for a theme
    Titles {
        /// Story theme
        #[arg(long)]
        theme: String,

        /// Story genre
        #[arg(long)]
        genre: String,

        /// Target reader age range
        #[arg(long)]
        age_group: Option<String>,
    },

    /// Write the next scene of an existing story
    Extend {
        /// File holding the story so far
        #[arg(long)]
        story: PathBuf,

        /// File holding the character description
        #[arg(long)]
        character: PathBuf,

        /// Narrative tone, overriding the configured one
        #[arg(long)]
        tone: Option<String>,
    },

    /// Run text through the safety filter
    Check {
        /// Text to check
        text: String,
    },
}

/// Arguments for `storybook create`
#[derive(clap::Args, Debug, Default)]
pub struct CreateArgs {
    /// Story title; asked for interactively when missing
    #[arg(long)]
    pub title: Option<String>,

    /// Story genre; asked for interactively when missing
    #[arg(long)]
    pub genre: Option<String>,

    /// Target reader age range
    #[arg(long)]
    pub age_group: Option<String>,

    /// Number of pages to split the story into
    #[arg(long)]
    pub pages: Option<usize>,

    /// Where to write the PDF
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also write the storybook as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Skip the PDF
    #[arg(long)]
    pub no_pdf: bool,
}
