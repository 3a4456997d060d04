use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "movieshelf")]
#[command(author, version, about = "Browse a movie catalog and keep favorites and notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Config file (default: platform config dir/movieshelf/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for favorites, notes and search history
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog titles
    Browse {
        /// Only titles of this genre
        #[arg(long)]
        genre: Option<String>,

        /// Only titles of this named list
        #[arg(long)]
        list: Option<String>,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Search titles by keyword
    Search {
        query: String,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Show recent searches
    History {
        /// Remove the entry with this id first
        #[arg(long)]
        remove: Option<String>,
    },

    /// List genres usable with `browse --genre`
    Genres,

    /// List named lists usable with `browse --list`
    Lists,

    /// Show a random popular movie
    Random,

    /// Show one movie with its notes
    Movie {
        id: String,

        /// Toggle the favorite flag
        #[arg(long)]
        favorite: bool,

        /// Add a note
        #[arg(long)]
        note: Option<String>,
    },

    /// Show favorites
    Favorites {
        /// Remove these movie ids first
        #[arg(long, num_args = 1..)]
        remove: Vec<String>,
    },
}
