//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quickstash")]
#[command(about = "Capture URLs, notes, code snippets and files to a quickstash server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the capture server base URL
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a URL, optionally with a title and selected text
    Url {
        /// URL to capture
        url: String,

        /// Title for the saved item
        #[arg(short, long)]
        title: Option<String>,

        /// Selected text to save alongside the link
        #[arg(short, long)]
        selection: Option<String>,

        /// Tag the item (repeatable; a comma-separated value adds each tag)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Capture a note (body from the argument, or stdin when omitted)
    Note {
        /// Note body
        body: Option<String>,

        /// Title for the saved note
        #[arg(short, long)]
        title: Option<String>,

        /// Tag the item (repeatable; a comma-separated value adds each tag)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Capture a code snippet (from a file, or stdin when omitted)
    Code {
        /// File to read the snippet from
        file: Option<PathBuf>,

        /// Title for the saved snippet
        #[arg(short, long)]
        title: Option<String>,

        /// Language hint for syntax fencing
        #[arg(short, long)]
        lang: Option<String>,

        /// Tag the item (repeatable; a comma-separated value adds each tag)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Upload a local file
    File {
        /// File to upload
        path: PathBuf,

        /// Name to store the file under (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,

        /// Tag the item (repeatable; a comma-separated value adds each tag)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Check that the capture server is reachable
    Health,

    /// Configuration utilities
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create a default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Print,
}
