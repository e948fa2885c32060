//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::{SearchMethod, SortAlgorithm, SortField};

/// Formula 1 results explorer: sorting, searching, hashing, trees and recursion
#[derive(Parser, Debug)]
#[command(name = "f1dash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Dataset directory (default: data_dir from config)
    #[arg(short = 'D', long, global = true, value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sort drivers with a chosen algorithm
    Sort {
        /// quick, bubble, selection, insertion or merge (default: config)
        #[arg(short, long)]
        algorithm: Option<SortAlgorithm>,
        /// points, laps or grid (default: config)
        #[arg(short, long)]
        field: Option<SortField>,
        /// Rows to show
        #[arg(short = 'n', long, default_value_t = 10)]
        top: usize,
    },

    /// Find a driver by (part of) their name
    Search {
        /// Name or name fragment, case-insensitive
        query: String,
        /// linear or binary
        #[arg(short, long, default_value = "linear")]
        method: SearchMethod,
        /// Show points per year, podiums and finishing positions
        #[arg(short, long)]
        profile: bool,
    },

    /// Show the name-length hash table
    Buckets {
        /// Number of buckets (default: config)
        #[arg(short, long)]
        buckets: Option<usize>,
    },

    /// SHA-256 digest of a text
    Sha256 {
        /// Text to hash
        text: String,
    },

    /// Rank drivers through a binary search tree on points
    Tree {
        /// Also draw the tree
        #[arg(short, long)]
        render: bool,
    },

    /// Recursive factorial
    Factorial {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },

    /// Naive recursive Fibonacci
    Fibonacci {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },

    /// Recursive sum of points over the leading drivers
    Sum,

    /// Show dataset summary
    Info,

    /// Interactive session with a manual entry stack/queue
    Session,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print config template
    Template,

    /// Show config path
    Path,
}
